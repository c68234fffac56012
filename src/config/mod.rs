pub mod init;
mod schema;

pub use schema::{Config, DataConfig, DisplayConfig, ThemePreference, DEFAULT_TOP_THRESHOLD};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::roster::DataSources;

/// A parsed config together with the directory its relative paths hang off
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub base_dir: PathBuf,
}

impl LoadedConfig {
    /// Resolve the roster/event files, preferring command-line overrides
    pub fn data_sources(&self, players: Option<PathBuf>, events: Option<PathBuf>) -> DataSources {
        DataSources {
            players: players.unwrap_or_else(|| self.base_dir.join(&self.config.data.players)),
            events: events.unwrap_or_else(|| self.base_dir.join(&self.config.data.events)),
        }
    }
}

/// Get the config directory path (~/.config/mvp-board/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("mvp-board"))
}

/// Get the default config file path (~/.config/mvp-board/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Ensure the directory holding `path` exists
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory at {}", dir.display()))?;
        }
    }
    Ok(())
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses default path (~/.config/mvp-board/config.yaml)
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
///
/// A missing default config file is not an error: built-in defaults are used
/// and data paths resolve against the current directory.
pub fn load_config(path: Option<PathBuf>) -> Result<LoadedConfig> {
    let explicit = path.is_some();
    let config_path = match path {
        Some(p) => p,
        None => get_config_path()?,
    };

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        debug!(path = %config_path.display(), "no config file, using defaults");
        return Ok(LoadedConfig {
            config: Config::default(),
            base_dir: PathBuf::from("."),
        });
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config = parse_config(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    let base_dir = config_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    debug!(path = %config_path.display(), "loaded config");

    Ok(LoadedConfig { config, base_dir })
}

pub fn parse_config(content: &str) -> Result<Config> {
    Ok(serde_saphyr::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::ActionCode;
    use std::io::Write;

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
data:
  players: roster/players.json
  events: roster/events.json
scoring:
  points:
    TAKE_WICKET: 25
    HIT_SIX: 3
display:
  top_threshold: 30
  theme: dark
"#;
        let config = parse_config(yaml).unwrap();
        assert_eq!(config.data.players, PathBuf::from("roster/players.json"));
        assert_eq!(config.display.top_threshold, 30);
        assert_eq!(config.display.theme, ThemePreference::Dark);

        let scoring = config.scoring.unwrap();
        assert_eq!(scoring.points.points_for(&ActionCode::from("TAKE_WICKET")), 25);
        assert_eq!(scoring.points.points_for(&ActionCode::from("HIT_FOUR")), 0);
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = parse_config("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.display.top_threshold, DEFAULT_TOP_THRESHOLD);
        assert_eq!(config.display.theme, ThemePreference::Auto);
        assert!(config.scoring.is_none());
    }

    #[test]
    fn test_unknown_fields_rejected() {
        assert!(parse_config("queries: []").is_err());
        assert!(parse_config("display:\n  colour: red").is_err());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config {
            scoring: Some(crate::scoring::ScoringConfig::default()),
            ..Config::default()
        };
        let yaml = serde_saphyr::to_string(&config).unwrap();
        assert_eq!(parse_config(&yaml).unwrap(), config);
    }

    #[test]
    fn test_load_explicit_missing_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(dir.path().join("nope.yaml"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_config_resolves_relative_data_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "data:\n  players: p.json").unwrap();

        let loaded = load_config(Some(path)).unwrap();
        let sources = loaded.data_sources(None, None);

        assert_eq!(sources.players, dir.path().join("p.json"));
        assert_eq!(sources.events, dir.path().join("events.json"));
    }

    #[test]
    fn test_data_source_overrides_win() {
        let loaded = LoadedConfig {
            config: Config::default(),
            base_dir: PathBuf::from("/etc/mvp"),
        };
        let sources = loaded.data_sources(Some(PathBuf::from("mine.json")), None);

        assert_eq!(sources.players, PathBuf::from("mine.json"));
        assert_eq!(sources.events, PathBuf::from("/etc/mvp/events.json"));
    }

    #[test]
    fn test_invalid_yaml_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "display: [unclosed").unwrap();

        let err = load_config(Some(path)).unwrap_err();
        assert!(err.to_string().contains("invalid YAML"));
    }
}
