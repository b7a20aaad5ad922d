use serde::{Deserialize, Serialize};

use super::buttons::Buttons;
use super::snapshot::PlayerId;

/// Button command sent back to the game for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    #[serde(rename = "p1")]
    pub player_buttons: Buttons,
    #[serde(rename = "p2")]
    pub player2_buttons: Buttons,
}

impl Command {
    /// Everything released on both ports
    pub fn neutral() -> Self {
        Self::default()
    }

    /// Drive `player` with `frame`; the other port stays neutral
    pub fn for_player(player: PlayerId, frame: Buttons) -> Self {
        match player {
            PlayerId::One => Self {
                player_buttons: frame,
                player2_buttons: Buttons::neutral(),
            },
            PlayerId::Two => Self {
                player_buttons: Buttons::neutral(),
                player2_buttons: frame,
            },
        }
    }
}
