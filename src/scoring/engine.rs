use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use super::config::PointTable;
use super::error::LeaderboardError;
use crate::roster::{ActionCode, Event, Player, PlayerId};

/// How many times a player performed an action and what it earned them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionTally {
    pub count: u32,
    pub points: i64,
}

/// One ranked row: the player's own fields plus the derived score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    #[serde(flatten)]
    pub player: Player,
    pub score: i64,
    /// Per-action breakdown behind `score`
    #[serde(skip)]
    pub actions: BTreeMap<ActionCode, ActionTally>,
}

impl LeaderboardEntry {
    fn new(player: Player) -> Self {
        Self {
            player,
            score: 0,
            actions: BTreeMap::new(),
        }
    }

    fn record(&mut self, action: &ActionCode, points: i64) {
        self.score = self.score.saturating_add(points);
        let tally = self.actions.entry(action.clone()).or_default();
        tally.count = tally.count.saturating_add(1);
        tally.points = tally.points.saturating_add(points);
    }
}

/// Rank players by the points their events earn.
///
/// Every player appears exactly once, players without events score 0, and
/// actions missing from `points` contribute 0. Ordering is by descending score;
/// equal scores keep roster order.
///
/// Fails without producing a partial leaderboard when an event names a player
/// that is not on the roster or when two players share an id.
pub fn compute_leaderboard(
    players: &[Player],
    events: &[Event],
    points: &PointTable,
) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
    // Arena of accumulators in roster order, keyed by player id for lookup
    let mut slots: HashMap<&PlayerId, usize> = HashMap::with_capacity(players.len());
    for (idx, player) in players.iter().enumerate() {
        if slots.insert(&player.id, idx).is_some() {
            return Err(LeaderboardError::malformed(
                format!("players[{}]", idx),
                format!("duplicate player id {}", player.id),
            ));
        }
    }

    let mut entries: Vec<LeaderboardEntry> =
        players.iter().cloned().map(LeaderboardEntry::new).collect();

    for event in events {
        let slot = *slots.get(&event.player_id).ok_or_else(|| {
            LeaderboardError::UnknownPlayerReference {
                event_id: event.id.clone(),
                player_id: event.player_id.clone(),
            }
        })?;

        entries[slot].record(&event.action, points.points_for(&event.action));
    }

    // sort_by is stable, so ties stay in roster order
    entries.sort_by(|a, b| b.score.cmp(&a.score));

    debug!(
        players = entries.len(),
        events = events.len(),
        "computed leaderboard"
    );

    Ok(entries)
}

/// Headline numbers for a leaderboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeaderboardSummary {
    pub players: usize,
    pub total_points: i64,
    pub top_score: Option<i64>,
}

impl LeaderboardSummary {
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a LeaderboardEntry>) -> Self {
        entries
            .into_iter()
            .fold(LeaderboardSummary::default(), |acc, entry| LeaderboardSummary {
                players: acc.players + 1,
                total_points: acc.total_points.saturating_add(entry.score),
                top_score: Some(acc.top_score.map_or(entry.score, |s| s.max(entry.score))),
            })
    }
}
