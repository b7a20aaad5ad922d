//! Wire-level data exchanged with the game: buttons, snapshots, commands

pub mod buttons;
pub mod command;
pub mod snapshot;

pub use buttons::{Button, Buttons, toggle};
pub use command::Command;
pub use snapshot::{MatchSnapshot, PlayerId, PlayerState};
