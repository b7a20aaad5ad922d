use crate::agent::TrainStats;
use crate::bot::{RoundStart, RoundSummary};
use crate::decision_log::DecisionRecord;
use crate::game_observer::GameObserver;
use crate::protocol::PlayerId;

pub struct CompositeObserver {
    observers: Vec<Box<dyn GameObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Box<dyn GameObserver>>) -> Self {
        Self { observers }
    }
}

impl GameObserver for CompositeObserver {
    fn on_game_start(&mut self, player: PlayerId, peer: &str) {
        for observer in &mut self.observers {
            observer.on_game_start(player, peer);
        }
    }

    fn on_round_start(&mut self, start: &RoundStart) {
        for observer in &mut self.observers {
            observer.on_round_start(start);
        }
    }

    fn on_decision(&mut self, record: &DecisionRecord) {
        for observer in &mut self.observers {
            observer.on_decision(record);
        }
    }

    fn on_train_step(&mut self, stats: &TrainStats) {
        for observer in &mut self.observers {
            observer.on_train_step(stats);
        }
    }

    fn on_round_over(&mut self, summary: &RoundSummary) {
        for observer in &mut self.observers {
            observer.on_round_over(summary);
        }
    }

    fn on_game_finished(&mut self, ticks: u64) {
        for observer in &mut self.observers {
            observer.on_game_finished(ticks);
        }
    }
}
