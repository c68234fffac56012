use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::roster::ActionCode;

/// Points awarded per action code.
///
/// Partial tables are valid: any action code not listed scores zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct PointTable(BTreeMap<String, i64>);

impl PointTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for tests and defaults
    pub fn with(mut self, action: impl Into<String>, points: i64) -> Self {
        self.insert(action, points);
        self
    }

    pub fn insert(&mut self, action: impl Into<String>, points: i64) {
        self.0.insert(action.into(), points);
    }

    /// Points for an action, 0 when the table does not list it
    pub fn points_for(&self, action: &ActionCode) -> i64 {
        self.0.get(action.as_str()).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, i64)> for PointTable {
    fn from_iter<I: IntoIterator<Item = (K, i64)>>(iter: I) -> Self {
        PointTable(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Scoring section of the config file.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   points:
///     TAKE_WICKET: 20
///     50_RUNS_MILESTONE: 15
///     HIT_SIX: 2
///     HIT_FOUR: 1
/// ```
///
/// A `points` map replaces the defaults wholesale; codes it omits score 0.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    #[serde(default = "default_points")]
    pub points: PointTable,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            points: default_points(),
        }
    }
}

/// The standard MVP points table
pub fn default_points() -> PointTable {
    PointTable::new()
        .with(ActionCode::TAKE_WICKET, 20)
        .with(ActionCode::FIFTY_RUNS_MILESTONE, 15)
        .with(ActionCode::HIT_SIX, 2)
        .with(ActionCode::HIT_FOUR, 1)
}
