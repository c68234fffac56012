use anyhow::Result;
use tracing::{debug, info};

use crate::roster::{load_events, load_players, DataSources};
use crate::scoring::{compute_leaderboard, LeaderboardEntry, ScoringConfig};

/// Load the roster and event log, then rank players.
///
/// Called from main.rs for the initial load and from the TUI on reload.
/// Data errors (`LeaderboardError`) stay downcastable through the anyhow chain.
pub fn build_leaderboard(
    sources: &DataSources,
    scoring: &ScoringConfig,
) -> Result<Vec<LeaderboardEntry>> {
    let players = load_players(&sources.players)?;
    let events = load_events(&sources.events)?;

    debug!(
        players = players.len(),
        events = events.len(),
        actions = scoring.points.len(),
        "building leaderboard"
    );

    let board = compute_leaderboard(&players, &events, &scoring.points)?;

    info!(players = board.len(), "leaderboard ready");
    Ok(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::PlayerId;
    use crate::scoring::LeaderboardError;
    use std::fs;
    use std::path::Path;

    fn write_sources(dir: &Path, players: &str, events: &str) -> DataSources {
        let sources = DataSources {
            players: dir.join("players.json"),
            events: dir.join("events.json"),
        };
        fs::write(&sources.players, players).unwrap();
        fs::write(&sources.events, events).unwrap();
        sources
    }

    #[test]
    fn test_build_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let sources = write_sources(
            dir.path(),
            r#"[{"id": 1, "name": "A"}, {"id": 2, "name": "B"}]"#,
            r#"[
                {"id": "e1", "playerId": 2, "action": "HIT_SIX"},
                {"id": "e2", "playerId": 2, "action": "50_RUNS_MILESTONE"},
                {"id": "e3", "playerId": 1, "action": "HIT_FOUR"}
            ]"#,
        );

        let board = build_leaderboard(&sources, &ScoringConfig::default()).unwrap();

        assert_eq!(board.len(), 2);
        assert_eq!(board[0].player.id, PlayerId::Number(2));
        assert_eq!(board[0].score, 17);
        assert_eq!(board[1].score, 1);
    }

    #[test]
    fn test_unknown_player_surfaces_as_leaderboard_error() {
        let dir = tempfile::tempdir().unwrap();
        let sources = write_sources(
            dir.path(),
            r#"[{"id": 1, "name": "A"}]"#,
            r#"[{"id": "e1", "playerId": 2, "action": "HIT_FOUR"}]"#,
        );

        let err = build_leaderboard(&sources, &ScoringConfig::default()).unwrap_err();

        assert_eq!(
            err.downcast_ref::<LeaderboardError>(),
            Some(&LeaderboardError::UnknownPlayerReference {
                event_id: "e1".to_string(),
                player_id: PlayerId::Number(2),
            })
        );
    }

    #[test]
    fn test_string_player_ids_match_numeric_roster() {
        let dir = tempfile::tempdir().unwrap();
        let sources = write_sources(
            dir.path(),
            r#"[{"id": 1, "name": "A"}, {"id": "07", "name": "B"}]"#,
            r#"[
                {"id": "e1", "playerId": "1", "action": "TAKE_WICKET"},
                {"id": "e2", "playerId": "07", "action": "HIT_SIX"}
            ]"#,
        );

        let board = build_leaderboard(&sources, &ScoringConfig::default()).unwrap();

        assert_eq!(board[0].player.id, PlayerId::Number(1));
        assert_eq!(board[0].score, 20);
        assert_eq!(board[1].player.id, PlayerId::Text("07".to_string()));
        assert_eq!(board[1].score, 2);
    }

    #[test]
    fn test_missing_events_file() {
        let dir = tempfile::tempdir().unwrap();
        let sources = DataSources {
            players: dir.path().join("players.json"),
            events: dir.path().join("missing.json"),
        };
        fs::write(&sources.players, "[]").unwrap();

        let err = build_leaderboard(&sources, &ScoringConfig::default()).unwrap_err();
        assert!(err.to_string().contains("Failed to read events file"));
    }
}
