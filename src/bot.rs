//! Per-player agent context and round lifecycle
//!
//! ```text
//! AWAITING_START ──round_started──▶ IN_PROGRESS ──round_over──▶ ROUND_OVER
//!       ▲                                                           │
//!       └──────────────────── reset on entry ◀──────────────────────┘
//! ```
//!
//! Everything learned (replay memory, epsilon, both networks) lives in the
//! trainer and survives round boundaries. Everything else is per round.

use burn::tensor::backend::AutodiffBackend;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::agent::{
    ActionSelector, AgentConfig, DqnTrainer, FEATURE_SIZE, FeatureVector, HealthPair,
    RewardConfig, RewardModel, RoundOutcome, StateEncoder, TrainStats, Transition,
};
use crate::decision_log::DecisionRecord;
use crate::error::{Error, Result};
use crate::protocol::{Command, MatchSnapshot, PlayerId};
use crate::roster::Roster;
use crate::sequencer::{ActionCatalog, CommandSequencer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    AwaitingStart,
    InProgress,
    RoundOver,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundStart {
    pub round_id: u32,
    pub character: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoundSummary {
    pub round_id: u32,
    pub outcome: RoundOutcome,
    /// Sum of rewards pushed to replay during the round
    pub reward: f32,
    pub ticks: usize,
}

/// Everything that happened on one tick
#[derive(Debug, Clone)]
pub struct TickReport {
    pub command: Command,
    pub round_start: Option<RoundStart>,
    pub decision: Option<DecisionRecord>,
    /// Reward of the transition pushed this tick, if any
    pub reward: Option<f32>,
    pub train: Option<TrainStats>,
    pub round_over: Option<RoundSummary>,
}

impl TickReport {
    fn neutral() -> Self {
        Self::with_command(Command::neutral())
    }

    fn with_command(command: Command) -> Self {
        Self {
            command,
            round_start: None,
            decision: None,
            reward: None,
            train: None,
            round_over: None,
        }
    }
}

/// Caches that are cleared on every round boundary
#[derive(Debug, Clone, Default)]
struct RoundState {
    health: Option<HealthPair>,
    previous: Option<(FeatureVector, usize)>,
    active_action: Option<usize>,
    reward: f32,
    ticks: usize,
}

pub struct Bot<B: AutodiffBackend> {
    player: PlayerId,
    catalog: ActionCatalog,
    encoder: StateEncoder,
    reward_model: RewardModel,
    sequencer: CommandSequencer,
    selector: ActionSelector,
    trainer: DqnTrainer<B>,
    roster: Roster,
    phase: RoundPhase,
    round: RoundState,
    round_id: u32,
    character: String,
}

impl<B: AutodiffBackend> Bot<B> {
    pub fn new(
        player: PlayerId,
        agent: AgentConfig,
        reward: RewardConfig,
        seed: Option<u64>,
        device: B::Device,
    ) -> Result<Self> {
        let catalog = ActionCatalog::standard()?;
        if agent.network.output_size != catalog.len() {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "network has {} outputs but the catalog has {} actions",
                    agent.network.output_size,
                    catalog.len()
                ),
            });
        }
        if agent.network.input_size != FEATURE_SIZE {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "network expects {} inputs, encoder produces {}",
                    agent.network.input_size, FEATURE_SIZE
                ),
            });
        }
        if agent.replay_capacity == 0 || agent.batch_size == 0 {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "replay capacity ({}) and batch size ({}) must be positive",
                    agent.replay_capacity, agent.batch_size
                ),
            });
        }
        // A batch larger than the memory would never train
        if agent.batch_size > agent.replay_capacity {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "batch size {} exceeds replay capacity {}",
                    agent.batch_size, agent.replay_capacity
                ),
            });
        }

        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let selector = ActionSelector::new(StdRng::from_rng(&mut rng), catalog.len());
        let trainer = DqnTrainer::new(device, agent, StdRng::from_rng(&mut rng));
        let mut roster = Roster::placeholder(StdRng::from_rng(&mut rng))?;
        let character = roster.pick();

        Ok(Self {
            player,
            catalog,
            encoder: StateEncoder::default(),
            reward_model: RewardModel::new(reward),
            sequencer: CommandSequencer::new(),
            selector,
            trainer,
            roster,
            phase: RoundPhase::AwaitingStart,
            round: RoundState::default(),
            round_id: 0,
            character,
        })
    }

    /// Handle one snapshot and produce the command for this frame
    pub fn fight(&mut self, snapshot: &MatchSnapshot) -> Result<TickReport> {
        if snapshot.round_over {
            if self.phase == RoundPhase::RoundOver {
                return Ok(TickReport::neutral());
            }
            return self.finish_round(snapshot);
        }
        if !snapshot.round_started {
            self.phase = RoundPhase::AwaitingStart;
            return Ok(TickReport::neutral());
        }
        self.play(snapshot)
    }

    fn play(&mut self, snapshot: &MatchSnapshot) -> Result<TickReport> {
        let current = self.health_of(snapshot);
        let features = self.encoder.encode(snapshot, self.player);
        let held = snapshot.player(self.player).player_buttons;
        let mut report = TickReport::neutral();
        self.phase = RoundPhase::InProgress;

        let previous_health = match self.round.health {
            Some(health) => health,
            None => {
                info!(
                    "Round {} in progress as {} (player {})",
                    self.round_id, self.character, self.player
                );
                report.round_start = Some(RoundStart {
                    round_id: self.round_id,
                    character: self.character.clone(),
                });
                current
            }
        };

        let advance = if self.sequencer.is_idle() {
            let action = self.selector.select(
                self.trainer.policy(),
                &features,
                self.trainer.epsilon(),
                self.trainer.device(),
            )?;
            let macro_action = self.catalog.get(action)?;
            debug!("Selected {} ({})", macro_action.name(), action);
            self.round.active_action = Some(action);
            report.decision = Some(DecisionRecord::now(
                self.round_id,
                features,
                action,
                self.character.clone(),
            ));
            self.sequencer.advance(Some(macro_action), &held)
        } else {
            self.sequencer.advance(None, &held)
        };

        let reward = self.reward_model.reward(previous_health, current, false);
        self.round.health = Some(current);

        if let Some((state, action)) = self.round.previous.take() {
            self.trainer.remember(Transition {
                state,
                action,
                reward,
                next_state: features,
                done: false,
            });
            self.round.reward += reward;
            report.reward = Some(reward);
            report.train = self.trainer.train_step()?;
        }

        if let Some(action) = self.round.active_action {
            self.round.previous = Some((features, action));
        }
        self.round.ticks += 1;

        report.command = Command::for_player(self.player, advance.frame);
        Ok(report)
    }

    fn finish_round(&mut self, snapshot: &MatchSnapshot) -> Result<TickReport> {
        let mut report = TickReport::neutral();
        let current = self.health_of(snapshot);

        if let (Some(previous_health), Some((state, action))) =
            (self.round.health, self.round.previous.take())
        {
            let reward = self.reward_model.reward(previous_health, current, true);
            self.trainer.remember(Transition {
                state,
                action,
                reward,
                next_state: self.encoder.encode(snapshot, self.player),
                done: true,
            });
            self.round.reward += reward;
            report.reward = Some(reward);
            report.train = self.trainer.train_step()?;
        }

        if self.round.health.is_some() {
            let summary = RoundSummary {
                round_id: self.round_id,
                outcome: RoundOutcome::from_health(current.own, current.opponent),
                reward: self.round.reward,
                ticks: self.round.ticks,
            };
            info!(
                "Round {} over ({:?}), epsilon={:.4}, replay={}",
                summary.round_id,
                summary.outcome,
                self.trainer.epsilon(),
                self.trainer.replay().len()
            );
            report.round_over = Some(summary);
        }

        self.sequencer.reset();
        self.round = RoundState::default();
        self.round_id += 1;
        self.character = self.roster.pick();
        self.phase = RoundPhase::RoundOver;
        debug!("Next round {} as {}", self.round_id, self.character);

        Ok(report)
    }

    fn health_of(&self, snapshot: &MatchSnapshot) -> HealthPair {
        HealthPair {
            own: snapshot.player(self.player).health,
            opponent: snapshot.opponent_of(self.player).health,
        }
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn round_id(&self) -> u32 {
        self.round_id
    }

    pub fn character(&self) -> &str {
        &self.character
    }

    pub fn sequencer(&self) -> &CommandSequencer {
        &self.sequencer
    }

    pub fn trainer(&self) -> &DqnTrainer<B> {
        &self.trainer
    }
}
