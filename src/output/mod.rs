pub mod formatter;

pub use formatter::{
    format_entry_detail, format_json, format_leaderboard_table, format_score, format_tsv,
    should_use_colors, truncate_name,
};
