use crate::roster::PlayerId;

/// Errors surfaced by the leaderboard computation and the data loader.
///
/// Either the whole leaderboard is produced or one of these names the record
/// at fault; there is no partial result.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LeaderboardError {
    #[error("event {event_id} references unknown player {player_id}")]
    UnknownPlayerReference { event_id: String, player_id: PlayerId },

    #[error("malformed record {record}: {reason}")]
    MalformedInput { record: String, reason: String },
}

impl LeaderboardError {
    pub(crate) fn malformed(record: impl Into<String>, reason: impl Into<String>) -> Self {
        LeaderboardError::MalformedInput {
            record: record.into(),
            reason: reason.into(),
        }
    }
}
