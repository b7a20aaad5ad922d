//! Rolling statistics over rounds and training steps

use std::collections::VecDeque;

/// Moving average calculator
#[derive(Debug, Clone)]
pub struct MovingAverage {
    values: VecDeque<f32>,
    window_size: usize,
    sum: f32,
}

impl MovingAverage {
    pub fn new(window_size: usize) -> Self {
        Self {
            values: VecDeque::with_capacity(window_size),
            window_size,
            sum: 0.0,
        }
    }

    pub fn push(&mut self, value: f32) {
        if self.values.len() >= self.window_size
            && let Some(old) = self.values.pop_front()
        {
            self.sum -= old;
        }
        self.values.push_back(value);
        self.sum += value;
    }

    pub fn average(&self) -> f32 {
        if self.values.is_empty() {
            0.0
        } else {
            self.sum / self.values.len() as f32
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// How a round ended from the bot's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Won,
    Lost,
    Draw,
}

impl RoundOutcome {
    pub fn from_health(own: i32, opponent: i32) -> Self {
        match own.cmp(&opponent) {
            std::cmp::Ordering::Greater => RoundOutcome::Won,
            std::cmp::Ordering::Less => RoundOutcome::Lost,
            std::cmp::Ordering::Equal => RoundOutcome::Draw,
        }
    }
}

/// Per-round performance tracker
#[derive(Debug, Clone)]
pub struct RoundMetrics {
    pub rounds: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
    pub round_rewards: MovingAverage,
    pub round_lengths: MovingAverage,
    pub losses_td: MovingAverage,
}

impl RoundMetrics {
    pub fn new(window_size: usize) -> Self {
        Self {
            rounds: 0,
            wins: 0,
            losses: 0,
            draws: 0,
            round_rewards: MovingAverage::new(window_size),
            round_lengths: MovingAverage::new(window_size),
            losses_td: MovingAverage::new(window_size),
        }
    }

    pub fn record_round(&mut self, reward: f32, ticks: usize, outcome: RoundOutcome) {
        self.rounds += 1;
        match outcome {
            RoundOutcome::Won => self.wins += 1,
            RoundOutcome::Lost => self.losses += 1,
            RoundOutcome::Draw => self.draws += 1,
        }
        self.round_rewards.push(reward);
        self.round_lengths.push(ticks as f32);
    }

    pub fn record_loss(&mut self, loss: f32) {
        self.losses_td.push(loss);
    }

    pub fn win_rate(&self) -> f32 {
        if self.rounds > 0 {
            self.wins as f32 / self.rounds as f32
        } else {
            0.0
        }
    }

    pub fn log_to_console(&self) {
        tracing::info!(
            "Rounds {} | W/L/D {}/{}/{} | win rate {:.1}%",
            self.rounds,
            self.wins,
            self.losses,
            self.draws,
            self.win_rate() * 100.0
        );
        tracing::info!(
            "  Round: reward={:.2}, length={:.1} | TD loss={:.4}",
            self.round_rewards.average(),
            self.round_lengths.average(),
            self.losses_td.average()
        );
    }
}

impl Default for RoundMetrics {
    fn default() -> Self {
        Self::new(100)
    }
}
