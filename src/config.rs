//! Game settings loaded from `snake.toml`.
//!
//! The file is optional: without one every value falls back to its default,
//! and any key left out of the file does the same.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "snake.toml";

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub speed: SpeedConfig,
    pub initial_length: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpeedConfig {
    pub base_tick: Duration,
    pub step: Duration,
    pub min_tick: Duration,
    pub points_per_level: u32,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid setting: {0}")]
    Invalid(String),
}

// ── TOML Schema ──

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    #[serde(default)]
    speed: TomlSpeed,
    #[serde(default)]
    snake: TomlSnake,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct TomlSpeed {
    #[serde(default = "default_base_tick")]
    base_tick_ms: u64,
    #[serde(default = "default_step")]
    step_ms: u64,
    #[serde(default = "default_min_tick")]
    min_tick_ms: u64,
    #[serde(default = "default_points_per_level")]
    points_per_level: u32,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct TomlSnake {
    #[serde(default = "default_initial_length")]
    initial_length: usize,
}

// ── Defaults ──

fn default_base_tick() -> u64 { 50 }
fn default_step() -> u64 { 10 }
fn default_min_tick() -> u64 { 10 } // the ramp would otherwise reach 0 at 50 points
fn default_points_per_level() -> u32 { 10 }
fn default_initial_length() -> usize { 6 }

impl Default for TomlSpeed {
    fn default() -> Self {
        TomlSpeed {
            base_tick_ms: default_base_tick(),
            step_ms: default_step(),
            min_tick_ms: default_min_tick(),
            points_per_level: default_points_per_level(),
        }
    }
}

impl Default for TomlSnake {
    fn default() -> Self {
        TomlSnake {
            initial_length: default_initial_length(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::from_toml(TomlConfig::default())
    }
}

// ── Loading ──

impl GameConfig {
    /// Loads `path` if given, otherwise `snake.toml` from the working directory.
    /// Only a missing default file is tolerated.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    return Ok(GameConfig::default());
                }
                default
            }
        };

        let text = std::fs::read_to_string(&path)
            .map_err(|source| ConfigError::Read { path: path.clone(), source })?;

        GameConfig::parse(&text, &path)
    }

    /// Parses the contents of a config file; `origin` only labels errors.
    pub fn parse(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        let toml_cfg: TomlConfig = toml::from_str(text)
            .map_err(|source| ConfigError::Parse { path: origin.to_path_buf(), source })?;

        let config = GameConfig::from_toml(toml_cfg);
        config.validate()?;
        Ok(config)
    }

    fn from_toml(toml_cfg: TomlConfig) -> Self {
        GameConfig {
            speed: SpeedConfig {
                base_tick: Duration::from_millis(toml_cfg.speed.base_tick_ms),
                step: Duration::from_millis(toml_cfg.speed.step_ms),
                min_tick: Duration::from_millis(toml_cfg.speed.min_tick_ms),
                points_per_level: toml_cfg.speed.points_per_level,
            },
            initial_length: toml_cfg.snake.initial_length,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let speed = &self.speed;

        if speed.min_tick.is_zero() {
            return Err(ConfigError::Invalid("speed.min_tick_ms must be positive".into()));
        }
        if speed.base_tick < speed.min_tick {
            return Err(ConfigError::Invalid(
                "speed.base_tick_ms must not be below speed.min_tick_ms".into(),
            ));
        }
        if speed.points_per_level == 0 {
            return Err(ConfigError::Invalid("speed.points_per_level must be at least 1".into()));
        }
        if self.initial_length == 0 {
            return Err(ConfigError::Invalid("snake.initial_length must be at least 1".into()));
        }

        Ok(())
    }
}
