//! MVP leaderboard: rank players by the points their match events earn.
//!
//! The core is [`scoring::compute_leaderboard`], a pure function over a roster,
//! an event log and a configurable [`scoring::PointTable`]. The rest of the
//! crate loads those inputs from disk and renders the result in the terminal.

pub mod board;
pub mod config;
pub mod output;
pub mod roster;
pub mod scoring;
pub mod stderr_buffer;
pub mod tui;
