use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use mvp_board::scoring::{filter_by_threshold, LeaderboardEntry, LeaderboardError, LeaderboardSummary};

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_DATA: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Ranked table for reading
    Table,
    /// Tab-separated rank, score, name, id
    Tsv,
    /// JSON array of players with their scores
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the leaderboard (default if no subcommand)
    List {
        /// Only show top performers (score at or above the threshold)
        #[arg(long)]
        top: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Browse the leaderboard interactively
    Tui,
    /// Write a config file with the default scoring rules
    Init {
        /// Accept all defaults without prompting
        #[arg(short, long)]
        yes: bool,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "mvp-board")]
#[command(about = "MVP leaderboard from match events", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/mvp-board/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Players JSON file (overrides the config)
    #[arg(long, global = true)]
    players: Option<PathBuf>,

    /// Events JSON file (overrides the config)
    #[arg(long, global = true)]
    events: Option<PathBuf>,

    /// Minimum score for a top performer (overrides the config)
    #[arg(long, global = true, allow_negative_numbers = true)]
    threshold: Option<i64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "mvp_board=debug" } else { "mvp_board=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(mvp_board::stderr_buffer::writer)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

/// Everything `list` and `tui` need once config and data have loaded
struct Session {
    config: mvp_board::config::Config,
    scoring: mvp_board::scoring::ScoringConfig,
    sources: mvp_board::roster::DataSources,
    threshold: i64,
    board: Vec<LeaderboardEntry>,
}

/// Load config, validate scoring and build the leaderboard, exiting on failure
fn load_session(
    config_path: Option<PathBuf>,
    players: Option<PathBuf>,
    events: Option<PathBuf>,
    threshold: Option<i64>,
) -> Session {
    let loaded = match mvp_board::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate scoring config at startup
    let scoring = loaded.config.scoring.clone().unwrap_or_default();
    if let Err(errors) = mvp_board::scoring::validate_scoring(&scoring) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    for (action, points) in scoring.points.iter() {
        debug!(action, points, "scoring rule");
    }

    let sources = loaded.data_sources(players, events);
    let threshold = threshold.unwrap_or(loaded.config.display.top_threshold);

    let board = match mvp_board::board::build_leaderboard(&sources, &scoring) {
        Ok(board) => board,
        Err(e) => {
            if let Some(data_err) = e.downcast_ref::<LeaderboardError>() {
                eprintln!("Invalid data: {}", data_err);
            } else {
                eprintln!("Failed to load data: {:#}", e);
            }
            std::process::exit(EXIT_DATA);
        }
    };

    Session {
        config: loaded.config,
        scoring,
        sources,
        threshold,
        board,
    }
}

fn print_list(session: &Session, top: bool, format: OutputFormat, verbose: bool) {
    let shown: Vec<&LeaderboardEntry> = if top {
        filter_by_threshold(&session.board, session.threshold)
    } else {
        session.board.iter().collect()
    };

    match format {
        OutputFormat::Table => {
            let use_colors = mvp_board::output::should_use_colors();
            if verbose && !shown.is_empty() {
                // Verbose mode: one block per player with the breakdown
                for entry in &shown {
                    println!("{}", mvp_board::output::format_entry_detail(entry, use_colors));
                    println!();
                }
            } else {
                println!("{}", mvp_board::output::format_leaderboard_table(&shown, use_colors));
            }
        }
        OutputFormat::Tsv => {
            let tsv = mvp_board::output::format_tsv(&shown);
            if !tsv.is_empty() {
                println!("{}", tsv);
            }
        }
        OutputFormat::Json => match mvp_board::output::format_json(&shown) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize leaderboard: {}", e);
                std::process::exit(EXIT_FAILURE);
            }
        },
    }

    let summary = LeaderboardSummary::from_entries(&session.board);
    info!(
        shown = shown.len(),
        players = summary.players,
        total_points = summary.total_points,
        "done"
    );
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::List {
        top: false,
        format: OutputFormat::Table,
    });
    let start_time = Instant::now();
    let config_path = cli.config.map(PathBuf::from);

    match command {
        Commands::Init { yes, force } => {
            if let Err(e) = mvp_board::config::init::run_init_wizard(config_path, yes, force) {
                eprintln!("Init failed: {:#}", e);
                std::process::exit(EXIT_FAILURE);
            }
        }
        Commands::List { top, format } => {
            let session = load_session(config_path, cli.players, cli.events, cli.threshold);
            print_list(&session, top, format, cli.verbose);
            debug!(elapsed = ?start_time.elapsed(), "list finished");
        }
        Commands::Tui => {
            let session = load_session(config_path, cli.players, cli.events, cli.threshold);

            // Ask the terminal about its background before the TUI takes it over
            let theme = mvp_board::tui::resolve_theme(session.config.display.theme);
            let app = mvp_board::tui::App::new(
                session.board,
                session.sources,
                session.scoring,
                session.threshold,
                theme,
            );

            if let Err(e) = mvp_board::tui::run_tui(app).await {
                eprintln!("TUI error: {:#}", e);
                std::process::exit(EXIT_FAILURE);
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_parses_as_its_own_command() {
        let cli = Cli::try_parse_from(["mvp-board", "init", "--yes", "--force"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Init {
                yes: true,
                force: true
            })
        ));
    }

    #[test]
    fn test_no_subcommand_defaults_to_list() {
        let cli = Cli::try_parse_from(["mvp-board", "--threshold", "-5"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.threshold, Some(-5));
    }

    #[test]
    fn test_list_flags() {
        let cli =
            Cli::try_parse_from(["mvp-board", "list", "--top", "--format", "json"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::List {
                top: true,
                format: OutputFormat::Json
            })
        ));
    }
}
