//! DQN training step: replay sampling, TD targets, Adam update, target soft-update

use burn::module::AutodiffModule;
use burn::optim::adaptor::OptimizerAdaptor;
use burn::optim::{Adam, AdamConfig, GradientsParams, Optimizer};
use burn::prelude::*;
use burn::tensor::backend::AutodiffBackend;
use rand::rngs::StdRng;
use tracing::{debug, info};

use super::encoder::FEATURE_SIZE;
use super::network::{NetworkConfig, ValueNetwork};
use super::replay::{ReplayMemory, Transition};
use crate::error::{Error, Result};

/// Agent hyperparameters
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Replay memory capacity
    pub replay_capacity: usize,
    /// Discount factor
    pub gamma: f32,
    /// Initial exploration rate
    pub epsilon_start: f64,
    /// Exploration floor
    pub epsilon_min: f64,
    /// Multiplicative decay per executed training step
    pub epsilon_decay: f64,
    /// Transitions per gradient step
    pub batch_size: usize,
    /// Adam learning rate
    pub learning_rate: f64,
    /// Target network smoothing coefficient
    pub tau: f64,
    /// Network shape
    pub network: NetworkConfig,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            replay_capacity: 10_000,
            gamma: 0.99,
            epsilon_start: 1.0,
            epsilon_min: 0.01,
            epsilon_decay: 0.995,
            batch_size: 32,
            learning_rate: 0.001,
            tau: 0.01,
            network: NetworkConfig::default(),
        }
    }
}

/// Outcome of an executed training step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainStats {
    pub loss: f32,
    pub epsilon: f64,
    pub step: u64,
}

/// Owns the learned state: policy, target, optimizer, replay memory, epsilon
pub struct DqnTrainer<B: AutodiffBackend> {
    policy: ValueNetwork<B>,
    target: ValueNetwork<B::InnerBackend>,
    optimizer: OptimizerAdaptor<Adam, ValueNetwork<B>, B>,
    replay: ReplayMemory,
    config: AgentConfig,
    epsilon: f64,
    steps: u64,
    device: B::Device,
    rng: StdRng,
}

impl<B: AutodiffBackend> DqnTrainer<B> {
    pub fn new(device: B::Device, config: AgentConfig, rng: StdRng) -> Self {
        let policy = ValueNetwork::new(&device, &config.network);
        // Target starts as an exact copy of the policy
        let target = policy.valid();
        let optimizer = AdamConfig::new().init::<B, ValueNetwork<B>>();

        Self {
            policy,
            target,
            optimizer,
            replay: ReplayMemory::new(config.replay_capacity),
            epsilon: config.epsilon_start,
            config,
            steps: 0,
            device,
            rng,
        }
    }

    pub fn remember(&mut self, transition: Transition) {
        self.replay.push(transition);
    }

    /// One DQN update. Returns `None` without touching any state while the
    /// replay memory holds fewer than `batch_size` transitions.
    pub fn train_step(&mut self) -> Result<Option<TrainStats>> {
        let batch_size = self.config.batch_size;
        if self.replay.len() < batch_size {
            return Ok(None);
        }

        let mut states = Vec::with_capacity(batch_size * FEATURE_SIZE);
        let mut actions = Vec::with_capacity(batch_size);
        let mut rewards = Vec::with_capacity(batch_size);
        let mut next_states = Vec::with_capacity(batch_size * FEATURE_SIZE);
        let mut not_dones = Vec::with_capacity(batch_size);
        for t in self.replay.sample(batch_size, &mut self.rng) {
            states.extend_from_slice(&t.state);
            actions.push(t.action as i64);
            rewards.push(t.reward);
            next_states.extend_from_slice(&t.next_state);
            not_dones.push(if t.done { 0.0f32 } else { 1.0f32 });
        }
        let n = actions.len();

        // Bootstrap targets come from the gradient-free target copy
        let next_states =
            Tensor::<B::InnerBackend, 1>::from_floats(next_states.as_slice(), &self.device)
                .reshape([n, FEATURE_SIZE]);
        let next_max = self
            .target
            .forward(next_states)
            .max_dim(1)
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| Error::Tensor(format!("{e:?}")))?;
        let targets: Vec<f32> = rewards
            .iter()
            .zip(&not_dones)
            .zip(&next_max)
            .map(|((reward, not_done), next)| reward + not_done * self.config.gamma * next)
            .collect();
        let targets = Tensor::<B, 1>::from_floats(targets.as_slice(), &self.device);

        let states =
            Tensor::<B, 1>::from_floats(states.as_slice(), &self.device).reshape([n, FEATURE_SIZE]);
        let actions = Tensor::<B, 1, Int>::from_ints(actions.as_slice(), &self.device).reshape([n, 1]);
        let q_values: Tensor<B, 1> = self.policy.forward(states).gather(1, actions).reshape([n]);

        let loss = (q_values - targets).powf_scalar(2.0).mean();
        let loss_value = loss
            .clone()
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| Error::Tensor(format!("{e:?}")))?
            .first()
            .copied()
            .unwrap_or_default();

        let grads = GradientsParams::from_grads(loss.backward(), &self.policy);
        self.policy = self
            .optimizer
            .step(self.config.learning_rate, self.policy.clone(), grads);

        self.epsilon = (self.epsilon * self.config.epsilon_decay).max(self.config.epsilon_min);
        self.target.soft_update(&self.policy.valid(), self.config.tau);
        self.steps += 1;

        debug!(
            "Train step {}: loss={:.4}, epsilon={:.4}",
            self.steps, loss_value, self.epsilon
        );
        if self.steps % 1000 == 0 {
            info!(
                "{} training steps, epsilon={:.4}, replay={}",
                self.steps,
                self.epsilon,
                self.replay.len()
            );
        }

        Ok(Some(TrainStats {
            loss: loss_value,
            epsilon: self.epsilon,
            step: self.steps,
        }))
    }

    pub fn policy(&self) -> &ValueNetwork<B> {
        &self.policy
    }

    pub fn target(&self) -> &ValueNetwork<B::InnerBackend> {
        &self.target
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn replay(&self) -> &ReplayMemory {
        &self.replay
    }

    pub fn device(&self) -> &B::Device {
        &self.device
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::{Autodiff, NdArray};
    use rand::SeedableRng;

    type TestBackend = Autodiff<NdArray>;

    fn trainer(config: AgentConfig) -> DqnTrainer<TestBackend> {
        DqnTrainer::new(Default::default(), config, StdRng::seed_from_u64(5))
    }

    fn transition(i: usize, done: bool) -> Transition {
        let x = i as f32 / 10.0;
        Transition {
            state: [x, 1.0, 0.9, 0.99, 0.0, 0.0, 1.0, 0.0],
            action: i % 5,
            reward: if i % 2 == 0 { 9.9 } else { -0.1 },
            next_state: [x + 0.1, 1.0, 0.8, 0.98, 0.0, 0.0, 1.0, done as u8 as f32],
            done,
        }
    }

    fn target_outputs(trainer: &DqnTrainer<TestBackend>) -> Vec<f32> {
        trainer
            .target()
            .q_values(&[0.4; FEATURE_SIZE], trainer.device())
            .unwrap()
    }

    #[test]
    fn test_agent_config_default() {
        let config = AgentConfig::default();
        assert_eq!(config.replay_capacity, 10_000);
        assert_eq!(config.batch_size, 32);
        assert!((config.gamma - 0.99).abs() < 1e-6);
        assert!((config.tau - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_skips_until_batch_available() {
        let mut trainer = trainer(AgentConfig::default());
        let target_before = target_outputs(&trainer);
        for i in 0..31 {
            trainer.remember(transition(i, false));
            assert!(trainer.train_step().unwrap().is_none());
        }
        assert_eq!(trainer.epsilon(), 1.0);
        assert_eq!(trainer.steps(), 0);
        assert_eq!(target_outputs(&trainer), target_before);

        trainer.remember(transition(31, true));
        let stats = trainer.train_step().unwrap().expect("step should run");
        assert_eq!(stats.step, 1);
        assert!((stats.epsilon - 0.995).abs() < 1e-12);
        assert!(stats.loss.is_finite());
    }

    #[test]
    fn test_epsilon_decays_to_floor() {
        let config = AgentConfig {
            epsilon_decay: 0.5,
            epsilon_min: 0.1,
            ..AgentConfig::default()
        };
        let mut trainer = trainer(config);
        for i in 0..32 {
            trainer.remember(transition(i, i % 8 == 0));
        }

        let mut previous = trainer.epsilon();
        for _ in 0..8 {
            trainer.train_step().unwrap();
            let epsilon = trainer.epsilon();
            assert!(epsilon <= previous);
            assert!(epsilon >= 0.1);
            previous = epsilon;
        }
        assert!((trainer.epsilon() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_target_moves_only_by_soft_update() {
        let mut trainer = trainer(AgentConfig::default());
        for i in 0..32 {
            trainer.remember(transition(i, false));
        }
        let before = target_outputs(&trainer);
        trainer.train_step().unwrap();
        let after = target_outputs(&trainer);
        let policy = trainer
            .policy()
            .q_values(&[0.4; FEATURE_SIZE], trainer.device())
            .unwrap();

        // Target moved a little, and did not jump to the policy
        assert_ne!(before, after);
        assert_ne!(after, policy);
    }

    /// Loss of a single-transition batch, computed from the networks before the step
    fn expected_single_loss(trainer: &DqnTrainer<TestBackend>, t: &Transition) -> f32 {
        let q = trainer.policy().q_values(&t.state, trainer.device()).unwrap();
        let target = if t.done {
            t.reward
        } else {
            let next = trainer
                .target()
                .q_values(&t.next_state, trainer.device())
                .unwrap();
            let next_max = next.iter().copied().fold(f32::NEG_INFINITY, f32::max);
            t.reward + 0.99 * next_max
        };
        (q[t.action] - target).powi(2)
    }

    fn single_batch_trainer() -> DqnTrainer<TestBackend> {
        trainer(AgentConfig {
            batch_size: 1,
            replay_capacity: 1,
            ..AgentConfig::default()
        })
    }

    #[test]
    fn test_terminal_target_is_reward_only() {
        let mut trainer = single_batch_trainer();
        let t = transition(3, true);
        let expected = expected_single_loss(&trainer, &t);

        trainer.remember(t);
        let stats = trainer.train_step().unwrap().expect("step should run");
        assert!(
            (stats.loss - expected).abs() <= 1e-4 * expected.max(1.0),
            "loss {} expected {}",
            stats.loss,
            expected
        );
    }

    #[test]
    fn test_non_terminal_target_bootstraps_from_target_network() {
        let mut trainer = single_batch_trainer();
        let t = transition(4, false);
        let expected = expected_single_loss(&trainer, &t);

        trainer.remember(t);
        let stats = trainer.train_step().unwrap().expect("step should run");
        assert!(
            (stats.loss - expected).abs() <= 1e-4 * expected.max(1.0),
            "loss {} expected {}",
            stats.loss,
            expected
        );
    }
}
