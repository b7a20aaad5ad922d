use crate::agent::TrainStats;
use crate::bot::{RoundStart, RoundSummary};
use crate::decision_log::DecisionRecord;
use crate::protocol::PlayerId;

/// Trait for observing bot events during a match
pub trait GameObserver {
    /// Called once the emulator has connected
    fn on_game_start(&mut self, player: PlayerId, peer: &str);

    /// Called on the first in-progress tick of a round
    fn on_round_start(&mut self, start: &RoundStart);

    /// Called whenever a new macro action is selected
    fn on_decision(&mut self, _record: &DecisionRecord) {}

    /// Called after every executed training step
    fn on_train_step(&mut self, _stats: &TrainStats) {}

    /// Called when a round ends
    fn on_round_over(&mut self, summary: &RoundSummary);

    /// Called when the emulator disconnects
    fn on_game_finished(&mut self, ticks: u64);
}
