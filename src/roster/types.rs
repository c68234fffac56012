use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Player identifier as it appears in the data files: a number or a string.
///
/// A string holding a plain decimal number (`"7"`, not `"07"`) is the same id
/// as the number, so `7` and `"7"` refer to one player.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged, from = "RawPlayerId")]
pub enum PlayerId {
    Number(u64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPlayerId {
    Number(u64),
    Text(String),
}

impl From<RawPlayerId> for PlayerId {
    fn from(raw: RawPlayerId) -> Self {
        match raw {
            RawPlayerId::Number(n) => PlayerId::Number(n),
            RawPlayerId::Text(s) => PlayerId::from(s),
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerId::Number(n) => write!(f, "{}", n),
            PlayerId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for PlayerId {
    fn from(n: u64) -> Self {
        PlayerId::Number(n)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        PlayerId::from(s.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        match s.parse::<u64>() {
            Ok(n) if n.to_string() == s => PlayerId::Number(n),
            _ => PlayerId::Text(s),
        }
    }
}

/// Scoring action recorded against a player, e.g. `HIT_SIX`.
///
/// Any string is accepted; codes missing from the point table score zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionCode(String);

impl ActionCode {
    pub const TAKE_WICKET: &'static str = "TAKE_WICKET";
    pub const FIFTY_RUNS_MILESTONE: &'static str = "50_RUNS_MILESTONE";
    pub const HIT_SIX: &'static str = "HIT_SIX";
    pub const HIT_FOUR: &'static str = "HIT_FOUR";

    pub fn new(code: impl Into<String>) -> Self {
        ActionCode(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActionCode {
    fn from(s: &str) -> Self {
        ActionCode::new(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Any other fields from the roster file (team, role, ...), kept verbatim
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            profile: Map::new(),
        }
    }

    /// Look up a profile field rendered as plain text (strings unquoted)
    pub fn profile_text(&self, key: &str) -> Option<String> {
        self.profile.get(key).map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub id: String,
    #[serde(rename = "playerId")]
    pub player_id: PlayerId,
    pub action: ActionCode,
}

impl Event {
    pub fn new(
        id: impl Into<String>,
        player_id: impl Into<PlayerId>,
        action: impl Into<ActionCode>,
    ) -> Self {
        Self {
            id: id.into(),
            player_id: player_id.into(),
            action: action.into(),
        }
    }
}
