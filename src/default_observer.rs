use crate::agent::{RoundMetrics, TrainStats};
use crate::bot::{RoundStart, RoundSummary};
use crate::decision_log::DecisionRecord;
use crate::game_observer::GameObserver;
use crate::protocol::PlayerId;
use tracing::{debug, info};

/// Logs bot events and keeps rolling round statistics
#[derive(Default)]
pub struct DefaultObserver {
    metrics: RoundMetrics,
}

impl DefaultObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn metrics(&self) -> &RoundMetrics {
        &self.metrics
    }
}

impl GameObserver for DefaultObserver {
    fn on_game_start(&mut self, player: PlayerId, peer: &str) {
        info!("Game connected from {}", peer);
        info!("- playing as player {}", player);
    }

    fn on_round_start(&mut self, start: &RoundStart) {
        info!("Round {} started as {}", start.round_id, start.character);
    }

    fn on_decision(&mut self, record: &DecisionRecord) {
        debug!(
            "round {}: action {} (diff {:.2}, health {:.2}/{:.2})",
            record.round_id,
            record.action_idx,
            record.features[0],
            record.features[1],
            record.features[2]
        );
    }

    fn on_train_step(&mut self, stats: &TrainStats) {
        self.metrics.record_loss(stats.loss);
    }

    fn on_round_over(&mut self, summary: &RoundSummary) {
        info!(
            "Round {} over: {:?} after {} ticks, reward {:.1}",
            summary.round_id, summary.outcome, summary.ticks, summary.reward
        );
        self.metrics
            .record_round(summary.reward, summary.ticks, summary.outcome);
        self.metrics.log_to_console();
    }

    fn on_game_finished(&mut self, ticks: u64) {
        info!("\nGame finished after {} ticks", ticks);
        info!("Rounds played: {}", self.metrics.rounds);
    }
}
