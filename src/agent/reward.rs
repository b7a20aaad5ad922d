//! Reward shaping from health deltas and round outcome

/// Reward tuning knobs
#[derive(Debug, Clone)]
pub struct RewardConfig {
    /// Applied every tick to discourage stalling
    pub time_penalty: f32,
    /// Applied when our health dropped this tick
    pub damage_taken_penalty: f32,
    /// Applied when the opponent's health dropped this tick
    pub damage_dealt_bonus: f32,
    /// Applied on the final tick of a round we won (negated for a loss)
    pub round_outcome_bonus: f32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            time_penalty: -0.1,
            damage_taken_penalty: -10.0,
            damage_dealt_bonus: 10.0,
            round_outcome_bonus: 100.0,
        }
    }
}

/// Health values observed on one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthPair {
    pub own: i32,
    pub opponent: i32,
}

#[derive(Debug, Clone, Default)]
pub struct RewardModel {
    config: RewardConfig,
}

impl RewardModel {
    pub fn new(config: RewardConfig) -> Self {
        Self { config }
    }

    /// Score one tick. `previous` must be the values cached at the start of
    /// the tick, before they are overwritten with `current`.
    pub fn reward(&self, previous: HealthPair, current: HealthPair, round_over: bool) -> f32 {
        let mut reward = self.config.time_penalty;
        if current.own < previous.own {
            reward += self.config.damage_taken_penalty;
        }
        if current.opponent < previous.opponent {
            reward += self.config.damage_dealt_bonus;
        }
        if round_over {
            if current.own > current.opponent {
                reward += self.config.round_outcome_bonus;
            } else if current.own < current.opponent {
                reward -= self.config.round_outcome_bonus;
            }
        }
        reward
    }
}
