//! Runtime configuration read from the environment (after `.env` is loaded)

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::protocol::PlayerId;

pub use crate::agent::{AgentConfig, NetworkConfig, RewardConfig};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_LOG_FILE: &str = "game_dataset.csv";

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub player: PlayerId,
    pub host: String,
    pub port: u16,
    pub log_file: PathBuf,
    pub seed: Option<u64>,
    pub agent: AgentConfig,
    pub reward: RewardConfig,
}

impl BotConfig {
    /// Defaults for everything except the controlled player
    pub fn for_player(player: PlayerId) -> Self {
        Self {
            player,
            host: DEFAULT_HOST.to_string(),
            port: player.default_port(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            seed: None,
            agent: AgentConfig::default(),
            reward: RewardConfig::default(),
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads `FIGHTBOT_*` keys through `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let player = lookup("FIGHTBOT_PLAYER")
            .ok_or_else(|| Error::InvalidConfiguration {
                message: "FIGHTBOT_PLAYER environment variable is required (1 or 2)".to_string(),
            })?
            .parse::<PlayerId>()?;

        let mut config = Self::for_player(player);
        if let Some(host) = lookup("FIGHTBOT_HOST") {
            config.host = host;
        }
        if let Some(port) = parse_var(&lookup, "FIGHTBOT_PORT")? {
            config.port = port;
        }
        if let Some(log_file) = lookup("FIGHTBOT_LOG_FILE") {
            config.log_file = PathBuf::from(log_file);
        }
        config.seed = parse_var(&lookup, "FIGHTBOT_SEED")?;
        if let Some(epsilon) = parse_var::<f64>(&lookup, "FIGHTBOT_EPSILON_START")? {
            if !(0.0..=1.0).contains(&epsilon) {
                return Err(Error::InvalidConfiguration {
                    message: format!("FIGHTBOT_EPSILON_START must be in [0, 1], got {epsilon}"),
                });
            }
            config.agent.epsilon_start = epsilon.max(config.agent.epsilon_min);
        }

        Ok(config)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>> {
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| Error::InvalidConfiguration {
                message: format!("{key} has invalid value '{value}'"),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_player_defaults() {
        let config = BotConfig::from_lookup(lookup(&[("FIGHTBOT_PLAYER", "2")])).unwrap();
        assert_eq!(config.player, PlayerId::Two);
        assert_eq!(config.port, 10000);
        assert_eq!(config.address(), "127.0.0.1:10000");
        assert_eq!(config.log_file, PathBuf::from("game_dataset.csv"));
        assert_eq!(config.seed, None);
        assert_eq!(config.agent.epsilon_start, 1.0);
    }

    #[test]
    fn test_overrides() {
        let config = BotConfig::from_lookup(lookup(&[
            ("FIGHTBOT_PLAYER", "1"),
            ("FIGHTBOT_PORT", "7000"),
            ("FIGHTBOT_HOST", "0.0.0.0"),
            ("FIGHTBOT_SEED", "17"),
            ("FIGHTBOT_EPSILON_START", "0.2"),
        ]))
        .unwrap();
        assert_eq!(config.address(), "0.0.0.0:7000");
        assert_eq!(config.seed, Some(17));
        assert!((config.agent.epsilon_start - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_missing_or_bad_values() {
        assert!(matches!(
            BotConfig::from_lookup(lookup(&[])),
            Err(Error::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            BotConfig::from_lookup(lookup(&[("FIGHTBOT_PLAYER", "3")])),
            Err(Error::InvalidPlayer(_))
        ));
        assert!(matches!(
            BotConfig::from_lookup(lookup(&[
                ("FIGHTBOT_PLAYER", "1"),
                ("FIGHTBOT_PORT", "http")
            ])),
            Err(Error::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            BotConfig::from_lookup(lookup(&[
                ("FIGHTBOT_PLAYER", "1"),
                ("FIGHTBOT_EPSILON_START", "1.5")
            ])),
            Err(Error::InvalidConfiguration { .. })
        ));
    }
}
