use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::scoring::ScoringConfig;

/// Score a player needs to count as a top performer
pub const DEFAULT_TOP_THRESHOLD: i64 = 20;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub scoring: Option<ScoringConfig>,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Roster and event files. Relative paths resolve against the config file's directory.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DataConfig {
    #[serde(default = "default_players_path")]
    pub players: PathBuf,
    #[serde(default = "default_events_path")]
    pub events: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            players: default_players_path(),
            events: default_events_path(),
        }
    }
}

fn default_players_path() -> PathBuf {
    PathBuf::from("players.json")
}

fn default_events_path() -> PathBuf {
    PathBuf::from("events.json")
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    #[serde(default = "default_top_threshold")]
    pub top_threshold: i64,
    #[serde(default)]
    pub theme: ThemePreference,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            top_threshold: DEFAULT_TOP_THRESHOLD,
            theme: ThemePreference::default(),
        }
    }
}

fn default_top_threshold() -> i64 {
    DEFAULT_TOP_THRESHOLD
}

/// Starting theme for the TUI; `auto` follows the terminal background
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Auto,
    Light,
    Dark,
}
