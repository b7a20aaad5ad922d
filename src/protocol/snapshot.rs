use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::buttons::Buttons;
use crate::error::Error;

/// Which controller port the bot is driving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub fn opponent(self) -> PlayerId {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    /// Port the game expects this player's bot to listen on
    pub fn default_port(self) -> u16 {
        match self {
            PlayerId::One => 9999,
            PlayerId::Two => 10000,
        }
    }
}

impl FromStr for PlayerId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(PlayerId::One),
            "2" => Ok(PlayerId::Two),
            other => Err(Error::InvalidPlayer(other.to_string())),
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerId::One => write!(f, "1"),
            PlayerId::Two => write!(f, "2"),
        }
    }
}

/// Per-player part of a snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerState {
    pub character: i32,
    pub health: i32,
    pub x_coord: i32,
    pub y_coord: i32,
    pub jumping: bool,
    pub crouching: bool,
    #[serde(rename = "buttons")]
    pub player_buttons: Buttons,
    pub in_move: bool,
    #[serde(rename = "move")]
    pub move_id: i32,
}

/// Match state delivered by the game every tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchSnapshot {
    #[serde(rename = "p1")]
    pub player1: PlayerState,
    #[serde(rename = "p2")]
    pub player2: PlayerState,
    pub timer: i32,
    pub fight_result: String,
    #[serde(rename = "has_round_started")]
    pub round_started: bool,
    #[serde(rename = "is_round_over")]
    pub round_over: bool,
}

impl MatchSnapshot {
    pub fn player(&self, id: PlayerId) -> &PlayerState {
        match id {
            PlayerId::One => &self.player1,
            PlayerId::Two => &self.player2,
        }
    }

    pub fn opponent_of(&self, id: PlayerId) -> &PlayerState {
        self.player(id.opponent())
    }
}
