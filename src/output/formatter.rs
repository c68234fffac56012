use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::scoring::LeaderboardEntry;

const EMPTY_MESSAGE: &str = "No players found.";

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score in compact notation (1.5k, 2.3M, 847) for tight spaces.
/// Ranked rows always show the exact score.
pub fn format_score(score: i64) -> String {
    let value = score as f64;
    let magnitude = value.abs();
    let formatted = if magnitude >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if magnitude >= 1_000.0 {
        format!("{:.1}k", value / 1_000.0)
    } else {
        score.to_string()
    };

    // Trim trailing .0 (e.g., "1.0k" -> "1k")
    formatted
        .replace(".0M", "M")
        .replace(".0k", "k")
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
pub fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format the leaderboard as a ranked table: Rank, Score, Name, Id
/// No headers. Rank is the 1-based position in `entries`.
pub fn format_leaderboard_table(entries: &[&LeaderboardEntry], use_colors: bool) -> String {
    format_table_with_width(entries, use_colors, get_terminal_width())
}

fn format_table_with_width(
    entries: &[&LeaderboardEntry],
    use_colors: bool,
    term_width: Option<usize>,
) -> String {
    if entries.is_empty() {
        return EMPTY_MESSAGE.to_string();
    }

    // Rank: 3 chars ("99."), score: 7 chars, two-space separators
    let rank_width = 3;
    let score_width = 7;
    let separator = "  ";

    entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let rank_str = format!("{:>2}.", idx + 1);
            let score_padded = format!("{:>width$}", entry.score, width = score_width);
            let id_str = format!("#{}", entry.player.id);

            let fixed_width = rank_width + 1 + score_width + separator.len() * 2 + id_str.len();
            let name = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_name(&entry.player.name, width - fixed_width)
                }
                Some(_) => truncate_name(&entry.player.name, 20),
                None => entry.player.name.clone(),
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}",
                    rank_str.dimmed(),
                    score_padded.bold(),
                    separator,
                    name,
                    separator,
                    id_str.dimmed()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}",
                    rank_str, score_padded, separator, name, separator, id_str
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format one entry with its per-action breakdown (for verbose mode)
pub fn format_entry_detail(entry: &LeaderboardEntry, use_colors: bool) -> String {
    let mut lines = Vec::new();

    if use_colors {
        lines.push(format!(
            "{} {}",
            entry.player.name.bold(),
            format!("#{}", entry.player.id).dimmed()
        ));
        lines.push(format!("  Score: {}", entry.score.to_string().yellow()));
    } else {
        lines.push(format!("{} #{}", entry.player.name, entry.player.id));
        lines.push(format!("  Score: {}", entry.score));
    }

    for key in entry.player.profile.keys() {
        let text = entry.player.profile_text(key).unwrap_or_default();
        lines.push(format!("  {}: {}", key, text));
    }

    for (action, tally) in &entry.actions {
        lines.push(format!(
            "  {} x{} = {:+}",
            action, tally.count, tally.points
        ));
    }

    lines.join("\n")
}

/// Format entries as tab-separated values for scripting
/// Columns: rank, score, name, id (no headers, no colors)
pub fn format_tsv(entries: &[&LeaderboardEntry]) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            format!(
                "{}\t{}\t{}\t{}",
                idx + 1,
                entry.score,
                entry.player.name,
                entry.player.id
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format entries as a pretty-printed JSON array of player fields plus score
pub fn format_json(entries: &[&LeaderboardEntry]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(entries)
}
