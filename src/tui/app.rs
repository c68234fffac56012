use ratatui::widgets::TableState;
use std::time::{Duration, Instant};

use crate::roster::DataSources;
use crate::scoring::{filter_by_threshold, LeaderboardEntry, LeaderboardSummary, ScoringConfig};
use crate::tui::theme::{Theme, ThemeColors};

const FLASH_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Help,
    Breakdown,
}

pub struct App {
    /// Last known-good leaderboard, always the full ranked list
    pub entries: Vec<LeaderboardEntry>,
    pub table_state: TableState,
    pub show_top: bool,
    pub top_threshold: i64,
    pub theme: Theme,
    pub input_mode: InputMode,
    pub flash_message: Option<(String, Instant)>,
    pub last_refresh: Instant,
    pub should_quit: bool,
    pub sources: DataSources,
    pub scoring: ScoringConfig,
}

impl App {
    pub fn new(
        entries: Vec<LeaderboardEntry>,
        sources: DataSources,
        scoring: ScoringConfig,
        top_threshold: i64,
        theme: Theme,
    ) -> Self {
        let mut table_state = TableState::default();
        if !entries.is_empty() {
            table_state.select(Some(0));
        }

        Self {
            entries,
            table_state,
            show_top: false,
            top_threshold,
            theme,
            input_mode: InputMode::Normal,
            flash_message: None,
            last_refresh: Instant::now(),
            should_quit: false,
            sources,
            scoring,
        }
    }

    /// Rows currently on screen: everyone, or only top performers
    pub fn visible_entries(&self) -> Vec<&LeaderboardEntry> {
        if self.show_top {
            filter_by_threshold(&self.entries, self.top_threshold)
        } else {
            self.entries.iter().collect()
        }
    }

    pub fn summary(&self) -> LeaderboardSummary {
        LeaderboardSummary::from_entries(&self.entries)
    }

    pub fn colors(&self) -> ThemeColors {
        self.theme.colors()
    }

    pub fn next_row(&mut self) {
        let len = self.visible_entries().len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous_row(&mut self) {
        let len = self.visible_entries().len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => (i - 1).min(len - 1),
        };
        self.table_state.select(Some(i));
    }

    pub fn selected_entry(&self) -> Option<&LeaderboardEntry> {
        let visible = self.visible_entries();
        self.table_state
            .selected()
            .and_then(|i| visible.get(i).copied())
    }

    /// Keep the selection on a valid row after the visible list changes
    fn clamp_selection(&mut self) {
        let len = self.visible_entries().len();
        let selected = match (len, self.table_state.selected()) {
            (0, _) => None,
            (_, Some(i)) => Some(i.min(len - 1)),
            (_, None) => Some(0),
        };
        self.table_state.select(selected);
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.show_flash(format!("{} mode", self.theme.label()));
    }

    pub fn toggle_top_filter(&mut self) {
        self.show_top = !self.show_top;
        self.clamp_selection();
        if self.show_top {
            self.show_flash(format!(
                "Showing top performers (score >= {})",
                self.top_threshold
            ));
        } else {
            self.show_flash("Showing all players".to_string());
        }
    }

    /// Re-read the data files and recompute the leaderboard
    pub fn reload(&mut self) {
        let result = crate::board::build_leaderboard(&self.sources, &self.scoring);
        self.apply_reload(result);
    }

    /// Swap in a fresh leaderboard, or keep the current one and report the failure
    pub fn apply_reload(&mut self, result: anyhow::Result<Vec<LeaderboardEntry>>) {
        match result {
            Ok(entries) => {
                self.entries = entries;
                self.last_refresh = Instant::now();
                self.clamp_selection();
                self.show_flash(format!("Reloaded {} players", self.entries.len()));
            }
            Err(e) => {
                tracing::warn!(error = %format!("{:#}", e), "reload failed");
                self.show_flash(format!("Reload failed: {:#}", e));
            }
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    pub fn update_flash(&mut self) {
        if let Some((_, shown_at)) = &self.flash_message {
            if shown_at.elapsed() >= FLASH_DURATION {
                self.flash_message = None;
            }
        }
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn show_breakdown(&mut self) {
        if self.selected_entry().is_some() {
            self.input_mode = InputMode::Breakdown;
        }
    }

    pub fn dismiss_breakdown(&mut self) {
        self.input_mode = InputMode::Normal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{Event, Player, PlayerId};
    use crate::scoring::{compute_leaderboard, LeaderboardError};
    use std::path::PathBuf;

    fn sample_entries() -> Vec<LeaderboardEntry> {
        let players: Vec<Player> = (1..=4u64)
            .map(|i| Player::new(i, format!("P{}", i)))
            .collect();
        let events = vec![
            Event::new("e1", 1u64, "TAKE_WICKET"),
            Event::new("e2", 1u64, "HIT_SIX"),
            Event::new("e3", 2u64, "TAKE_WICKET"),
            Event::new("e4", 3u64, "HIT_FOUR"),
        ];
        compute_leaderboard(&players, &events, &ScoringConfig::default().points).unwrap()
    }

    fn sample_app() -> App {
        App::new(
            sample_entries(),
            DataSources {
                players: PathBuf::from("players.json"),
                events: PathBuf::from("events.json"),
            },
            ScoringConfig::default(),
            20,
            Theme::Dark,
        )
    }

    #[test]
    fn test_new_selects_first_row() {
        let app = sample_app();
        assert_eq!(app.table_state.selected(), Some(0));
        assert_eq!(app.visible_entries().len(), 4);
        assert_eq!(app.selected_entry().unwrap().score, 22);
    }

    #[test]
    fn test_navigation_wraps() {
        let mut app = sample_app();
        app.previous_row();
        assert_eq!(app.table_state.selected(), Some(3));
        app.next_row();
        assert_eq!(app.table_state.selected(), Some(0));
        app.next_row();
        assert_eq!(app.table_state.selected(), Some(1));
    }

    #[test]
    fn test_toggle_theme() {
        let mut app = sample_app();
        app.toggle_theme();
        assert_eq!(app.theme, Theme::Light);
        assert_eq!(app.flash_message.as_ref().unwrap().0, "Light mode");
        app.toggle_theme();
        assert_eq!(app.theme, Theme::Dark);
    }

    #[test]
    fn test_top_filter_clamps_selection() {
        let mut app = sample_app();
        app.table_state.select(Some(3));

        app.toggle_top_filter();

        let visible = app.visible_entries();
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|e| e.score >= 20));
        assert_eq!(app.table_state.selected(), Some(1));

        app.toggle_top_filter();
        assert_eq!(app.visible_entries().len(), 4);
        assert_eq!(app.flash_message.as_ref().unwrap().0, "Showing all players");
    }

    #[test]
    fn test_top_filter_with_nobody_qualifying() {
        let mut app = sample_app();
        app.top_threshold = 500;
        app.toggle_top_filter();

        assert!(app.visible_entries().is_empty());
        assert_eq!(app.table_state.selected(), None);
        assert!(app.selected_entry().is_none());

        app.next_row();
        assert_eq!(app.table_state.selected(), None);
    }

    #[test]
    fn test_failed_reload_keeps_last_good_board() {
        let mut app = sample_app();
        let before = app.entries.clone();

        app.apply_reload(Err(LeaderboardError::UnknownPlayerReference {
            event_id: "e9".to_string(),
            player_id: PlayerId::Number(99),
        }
        .into()));

        assert_eq!(app.entries, before);
        let flash = &app.flash_message.as_ref().unwrap().0;
        assert!(flash.starts_with("Reload failed"));
        assert!(flash.contains("unknown player 99"));
    }

    #[test]
    fn test_successful_reload_replaces_board() {
        let mut app = sample_app();
        app.table_state.select(Some(3));

        let smaller: Vec<LeaderboardEntry> = sample_entries().into_iter().take(2).collect();
        app.apply_reload(Ok(smaller));

        assert_eq!(app.entries.len(), 2);
        assert_eq!(app.table_state.selected(), Some(1));
        assert_eq!(app.flash_message.as_ref().unwrap().0, "Reloaded 2 players");
    }

    #[test]
    fn test_reload_from_missing_files_fails_gracefully() {
        let mut app = sample_app();
        app.sources = DataSources {
            players: PathBuf::from("/nonexistent/players.json"),
            events: PathBuf::from("/nonexistent/events.json"),
        };

        app.reload();

        assert_eq!(app.entries.len(), 4);
        assert!(app.flash_message.as_ref().unwrap().0.starts_with("Reload failed"));
    }

    #[test]
    fn test_breakdown_needs_selection() {
        let mut app = sample_app();
        app.show_breakdown();
        assert_eq!(app.input_mode, InputMode::Breakdown);
        app.dismiss_breakdown();

        app.table_state.select(None);
        app.show_breakdown();
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_summary_covers_full_board() {
        let mut app = sample_app();
        app.toggle_top_filter();

        let summary = app.summary();
        assert_eq!(summary.players, 4);
        assert_eq!(summary.total_points, 43);
        assert_eq!(summary.top_score, Some(22));
    }
}
