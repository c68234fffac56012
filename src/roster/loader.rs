use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::types::{ActionCode, Event, Player, PlayerId};
use crate::scoring::LeaderboardError;

/// Where the roster and event log are read from
#[derive(Debug, Clone, PartialEq)]
pub struct DataSources {
    pub players: PathBuf,
    pub events: PathBuf,
}

/// Load the player roster from a JSON array file
pub fn load_players(path: &Path) -> Result<Vec<Player>> {
    let records = read_records(path, "players")?;
    let players = players_from_records(records)?;
    debug!(count = players.len(), path = %path.display(), "loaded players");
    Ok(players)
}

/// Load the event log from a JSON array file
pub fn load_events(path: &Path) -> Result<Vec<Event>> {
    let records = read_records(path, "events")?;
    let events = events_from_records(records)?;
    debug!(count = events.len(), path = %path.display(), "loaded events");
    Ok(events)
}

fn read_records(path: &Path, kind: &str) -> Result<Vec<Value>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} file at {}", kind, path.display()))?;

    serde_json::from_str(&content).with_context(|| {
        format!(
            "Failed to parse {} file: expected a JSON array in {}",
            kind,
            path.display()
        )
    })
}

/// Convert raw JSON records into players, rejecting structurally invalid ones.
///
/// `id` and `name` are required. A `score` field is dropped since the score
/// is always derived. Everything else lands in the opaque profile.
pub fn players_from_records(records: Vec<Value>) -> Result<Vec<Player>, LeaderboardError> {
    records
        .into_iter()
        .enumerate()
        .map(|(idx, record)| -> Result<Player, LeaderboardError> {
            let label = format!("players[{}]", idx);
            let mut fields = into_object(record, &label)?;

            let id = fields
                .remove("id")
                .ok_or_else(|| LeaderboardError::malformed(&label, "missing id"))
                .and_then(|v| parse_player_id(v, &label, "id"))?;

            let name = match fields.remove("name") {
                Some(Value::String(s)) if !s.trim().is_empty() => s,
                Some(Value::String(_)) => {
                    return Err(LeaderboardError::malformed(&label, "empty name"))
                }
                Some(_) => return Err(LeaderboardError::malformed(&label, "name must be a string")),
                None => return Err(LeaderboardError::malformed(&label, "missing name")),
            };

            fields.remove("score");

            Ok(Player {
                id,
                name,
                profile: fields,
            })
        })
        .collect()
}

/// Convert raw JSON records into events.
///
/// `playerId` and `action` are required; any action string is accepted,
/// including an empty one, and scores by the point table. Events without an `id` are labelled
/// by their 1-based position so later errors can still point at them.
pub fn events_from_records(records: Vec<Value>) -> Result<Vec<Event>, LeaderboardError> {
    records
        .into_iter()
        .enumerate()
        .map(|(idx, record)| -> Result<Event, LeaderboardError> {
            let label = format!("events[{}]", idx);
            let mut fields = into_object(record, &label)?;

            let id = match fields.remove("id") {
                Some(Value::String(s)) if !s.trim().is_empty() => s,
                Some(Value::Number(n)) => n.to_string(),
                None | Some(Value::Null) | Some(Value::String(_)) => format!("#{}", idx + 1),
                Some(_) => {
                    return Err(LeaderboardError::malformed(
                        &label,
                        "id must be a string or number",
                    ))
                }
            };

            let player_id = fields
                .remove("playerId")
                .ok_or_else(|| LeaderboardError::malformed(&label, "missing playerId"))
                .and_then(|v| parse_player_id(v, &label, "playerId"))?;

            let action = match fields.remove("action") {
                Some(Value::String(s)) => ActionCode::new(s),
                Some(_) => return Err(LeaderboardError::malformed(&label, "action must be a string")),
                None => return Err(LeaderboardError::malformed(&label, "missing action")),
            };

            Ok(Event {
                id,
                player_id,
                action,
            })
        })
        .collect()
}

fn into_object(record: Value, label: &str) -> Result<Map<String, Value>, LeaderboardError> {
    match record {
        Value::Object(fields) => Ok(fields),
        _ => Err(LeaderboardError::malformed(label, "expected a JSON object")),
    }
}

fn parse_player_id(value: Value, label: &str, field: &str) -> Result<PlayerId, LeaderboardError> {
    match value {
        Value::Number(n) => n.as_u64().map(PlayerId::Number).ok_or_else(|| {
            LeaderboardError::malformed(label, format!("{} must be a non-negative integer", field))
        }),
        Value::String(s) if !s.trim().is_empty() => Ok(PlayerId::from(s)),
        Value::String(_) => Err(LeaderboardError::malformed(label, format!("empty {}", field))),
        _ => Err(LeaderboardError::malformed(
            label,
            format!("{} must be a number or string", field),
        )),
    }
}
