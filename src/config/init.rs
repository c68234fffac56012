use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::{ensure_parent_dir, get_config_path, Config, DataConfig, DisplayConfig};
use crate::scoring::{default_points, PointTable, ScoringConfig};

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Parse a point value typed at the prompt
pub(crate) fn parse_points(input: &str) -> Result<i64, String> {
    match input.trim().parse::<i64>() {
        Ok(v) if v >= 0 => Ok(v),
        Ok(_) => Err("must be non-negative".to_string()),
        Err(_) => Err("must be a whole number".to_string()),
    }
}

/// Parse a top-performer threshold typed at the prompt
pub(crate) fn parse_threshold(input: &str) -> Result<i64, String> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| "must be a whole number".to_string())
}

/// The config `init` writes when every default is accepted
pub fn default_config() -> Config {
    Config {
        data: DataConfig::default(),
        scoring: Some(ScoringConfig::default()),
        display: DisplayConfig::default(),
    }
}

/// Serialize `config` as YAML and write it atomically to `path`
pub fn write_config(path: &Path, config: &Config) -> Result<()> {
    let yaml = serde_saphyr::to_string(config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    ensure_parent_dir(path)?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save config to {}", path.display()))?;

    Ok(())
}

/// Run the init wizard to create a config file.
///
/// With `accept_defaults` no questions are asked. An existing file is only
/// replaced when `force` is set or the user confirms.
pub fn run_init_wizard(path: Option<PathBuf>, accept_defaults: bool, force: bool) -> Result<()> {
    let config_path = match path {
        Some(p) => p,
        None => get_config_path()?,
    };

    if config_path.exists() && !force {
        if accept_defaults {
            anyhow::bail!(
                "Config already exists at {}. Pass --force to overwrite.",
                config_path.display()
            );
        }
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    let config = if accept_defaults {
        default_config()
    } else {
        prompt_config()?
    };

    write_config(&config_path, &config)?;

    println!("Config written to {}", config_path.display());
    println!("Run `mvp-board` to see the leaderboard.");

    Ok(())
}

fn prompt_config() -> Result<Config> {
    println!();
    println!("MVP Board Configuration");
    println!("=======================");
    println!();

    // 1. Data files
    println!("Player and event files are JSON arrays. Relative paths are resolved next to the config file.");
    let defaults = DataConfig::default();
    let players = prompt_with_default("Players file", &defaults.players.display().to_string())?;
    let events = prompt_with_default("Events file", &defaults.events.display().to_string())?;

    // 2. Points per action
    println!();
    let points = if prompt_yes_no("Configure MVP points? (n accepts defaults)", false)? {
        println!("Actions not listed in the table score 0.");
        let mut table = PointTable::new();
        for (action, default) in default_points().iter() {
            let value = loop {
                let input = prompt_with_default(&format!("  {}", action), &default.to_string())?;
                match parse_points(&input) {
                    Ok(v) => break v,
                    Err(e) => println!("  Invalid: {}. Try again.", e),
                }
            };
            table.insert(action, value);
        }
        table
    } else {
        default_points()
    };

    // 3. Top performers
    println!();
    let top_threshold = loop {
        let input = prompt_with_default(
            "Top performer threshold",
            &DisplayConfig::default().top_threshold.to_string(),
        )?;
        match parse_threshold(&input) {
            Ok(v) => break v,
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    };

    Ok(Config {
        data: DataConfig {
            players: PathBuf::from(players),
            events: PathBuf::from(events),
        },
        scoring: Some(ScoringConfig { points }),
        display: DisplayConfig {
            top_threshold,
            ..DisplayConfig::default()
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;

    #[test]
    fn test_parse_points() {
        assert_eq!(parse_points("20"), Ok(20));
        assert_eq!(parse_points(" 0 "), Ok(0));
        assert!(parse_points("-1").is_err());
        assert!(parse_points("1.5").is_err());
        assert!(parse_points("lots").is_err());
    }

    #[test]
    fn test_parse_threshold_allows_any_integer() {
        assert_eq!(parse_threshold("-5"), Ok(-5));
        assert!(parse_threshold("").is_err());
    }

    #[test]
    fn test_written_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        write_config(&path, &default_config()).unwrap();
        let loaded = load_config(Some(path)).unwrap();

        assert_eq!(loaded.config, default_config());
        assert_eq!(loaded.base_dir, dir.path().join("nested"));
    }

    #[test]
    fn test_init_with_defaults_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "{}").unwrap();

        let err = run_init_wizard(Some(path.clone()), true, false).unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_init_with_force_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "{}").unwrap();

        run_init_wizard(Some(path.clone()), true, true).unwrap();

        let loaded = load_config(Some(path)).unwrap();
        assert!(loaded.config.scoring.is_some());
    }
}
