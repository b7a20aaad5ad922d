pub mod agent;
pub mod bot;
pub mod composite_observer;
pub mod config;
pub mod decision_log;
pub mod default_observer;
pub mod error;
pub mod game;
pub mod game_observer;
pub mod protocol;
pub mod roster;
pub mod sequencer;
pub mod transport;

// Re-export commonly used types for convenience
pub use bot::{Bot, RoundPhase, TickReport};
pub use config::BotConfig;
pub use error::{Error, Result};
pub use game::Game;
pub use protocol::{Command, MatchSnapshot, PlayerId};
pub use sequencer::{ActionCatalog, CommandSequencer};
pub use transport::GameConnection;

/// Backend used by the binary: CPU tensors with autodiff on top
pub type TrainingBackend = burn::backend::Autodiff<burn::backend::NdArray>;
