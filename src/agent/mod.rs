//! Online DQN agent: encoding, reward shaping, replay, networks, training
//!
//! ```text
//! MatchSnapshot
//!     │
//!     ▼
//! StateEncoder ──▶ FeatureVector [8]
//!     │                 │
//!     │                 ▼
//!     │          ActionSelector (epsilon-greedy over ValueNetwork)
//!     │                 │
//!     ▼                 ▼
//! RewardModel ──▶ Transition ──▶ ReplayMemory ──▶ DqnTrainer
//!                                                  ├─ MSE on r + γ·max Q_target(s')
//!                                                  ├─ Adam step on policy
//!                                                  ├─ epsilon decay
//!                                                  └─ target ← τ·policy + (1-τ)·target
//! ```

pub mod encoder;
pub mod metrics;
pub mod network;
pub mod replay;
pub mod reward;
pub mod selector;
pub mod trainer;

pub use encoder::{FEATURE_SIZE, FeatureVector, StateEncoder};
pub use metrics::{MovingAverage, RoundMetrics, RoundOutcome};
pub use network::{NetworkConfig, ValueNetwork};
pub use replay::{ReplayMemory, Transition};
pub use reward::{HealthPair, RewardConfig, RewardModel};
pub use selector::{ActionSelector, greedy};
pub use trainer::{AgentConfig, DqnTrainer, TrainStats};
