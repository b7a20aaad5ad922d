//! State encoder - converts a match snapshot into the policy's feature vector

use crate::protocol::snapshot::{MatchSnapshot, PlayerId};

/// Width of the feature vector fed to the value network
pub const FEATURE_SIZE: usize = 8;

pub type FeatureVector = [f32; FEATURE_SIZE];

/// Divisor applied to distance, health and timer
pub const SCALE: f32 = 100.0;

/// Perspective-normalized encoder: "own" is always the acting player
#[derive(Debug, Clone, Copy, Default)]
pub struct StateEncoder;

impl StateEncoder {
    /// Layout: `[diff, own_health, opp_health, timer, own_attacking,
    /// opp_attacking, round_started, round_over]` where `diff` is the
    /// opponent's x minus our own.
    pub fn encode(&self, snapshot: &MatchSnapshot, player: PlayerId) -> FeatureVector {
        let own = snapshot.player(player);
        let opponent = snapshot.opponent_of(player);

        [
            (opponent.x_coord - own.x_coord) as f32 / SCALE,
            own.health as f32 / SCALE,
            opponent.health as f32 / SCALE,
            snapshot.timer as f32 / SCALE,
            flag(own.player_buttons.is_attacking()),
            flag(opponent.player_buttons.is_attacking()),
            flag(snapshot.round_started),
            flag(snapshot.round_over),
        ]
    }
}

fn flag(value: bool) -> f32 {
    if value { 1.0 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::snapshot::PlayerState;

    fn snapshot() -> MatchSnapshot {
        let mut p1 = PlayerState {
            health: 150,
            x_coord: 100,
            ..PlayerState::default()
        };
        p1.player_buttons.y = true;
        let p2 = PlayerState {
            health: 80,
            x_coord: 250,
            ..PlayerState::default()
        };
        MatchSnapshot {
            player1: p1,
            player2: p2,
            timer: 60,
            round_started: true,
            ..MatchSnapshot::default()
        }
    }

    #[test]
    fn test_encode_player_one() {
        let encoder = StateEncoder::default();
        let features = encoder.encode(&snapshot(), PlayerId::One);
        assert_eq!(features, [1.5, 1.5, 0.8, 0.6, 1.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_player_two_mirrors_roles() {
        let encoder = StateEncoder::default();
        let snap = snapshot();
        let one = encoder.encode(&snap, PlayerId::One);
        let two = encoder.encode(&snap, PlayerId::Two);

        assert_eq!(two[0], -one[0]);
        assert_eq!(two[1], one[2]);
        assert_eq!(two[2], one[1]);
        assert_eq!(two[3], one[3]);
        assert_eq!(two[4], one[5]);
        assert_eq!(two[5], one[4]);
        assert_eq!(&two[6..], &one[6..]);
    }
}
