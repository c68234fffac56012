pub mod loader;
pub mod types;

pub use loader::{events_from_records, load_events, load_players, players_from_records, DataSources};
pub use types::{ActionCode, Event, Player, PlayerId};
