use ratatui::prelude::*;
use ratatui::widgets::{Block, Cell, Clear, Paragraph, Row, Table};
use crate::output::{format_score, truncate_name};
use crate::tui::app::{App, InputMode};
use crate::tui::theme::ThemeColors;

const TITLE: &str = "🏆 MVP Leaderboard";

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let colors = app.colors();

    // Paint the whole screen so light/dark applies everywhere
    frame.render_widget(
        Block::default().style(Style::default().bg(colors.background).fg(colors.foreground)),
        area,
    );

    // Handle very small terminal sizes gracefully
    if area.height < 6 || area.width < 30 {
        let msg = Paragraph::new("Terminal too small")
            .alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Filter(1) + Table(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),  // Title bar
        Constraint::Length(1),  // Filter/theme indicator
        Constraint::Fill(1),    // Leaderboard table
        Constraint::Length(1),  // Status bar
    ])
    .split(area);

    render_title(frame, chunks[0], app, &colors);
    render_view_bar(frame, chunks[1], app, &colors);
    render_table(frame, chunks[2], app, &colors);
    render_status_bar(frame, chunks[3], app, &colors);

    match app.input_mode {
        InputMode::Help => render_help_popup(frame, &colors),
        InputMode::Breakdown => render_breakdown_popup(frame, app, &colors),
        InputMode::Normal => {}
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App, colors: &ThemeColors) {
    frame.render_widget(Paragraph::new(title_line(app, area.width, colors)), area);
}

/// Title on the left, board stats right-aligned by display width
fn title_line(app: &App, width: u16, colors: &ThemeColors) -> Line<'static> {
    let title = Span::styled(TITLE, Style::default().fg(colors.title_color).bold());

    let summary = app.summary();
    let stats = Span::styled(
        format!(
            "{} players, {} pts awarded",
            summary.players,
            format_score(summary.total_points)
        ),
        Style::default().fg(colors.muted),
    );

    let padding_len = (width as usize).saturating_sub(title.width() + stats.width());
    Line::from(vec![title, Span::raw(" ".repeat(padding_len)), stats])
}

fn render_view_bar(frame: &mut Frame, area: Rect, app: &App, colors: &ThemeColors) {
    let view = if app.show_top {
        format!("Top performers (score >= {})", app.top_threshold)
    } else {
        "All players".to_string()
    };

    let line = Line::from(vec![
        Span::styled(view, Style::default().fg(colors.status_key_color).bold()),
        Span::styled(" | ", Style::default().fg(colors.muted)),
        Span::styled(format!("{} mode", app.theme.label()), Style::default().fg(colors.muted)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_table(frame: &mut Frame, area: Rect, app: &mut App, colors: &ThemeColors) {
    let entries = app.visible_entries();

    if entries.is_empty() {
        let message = if app.show_top {
            "No top performers yet"
        } else {
            "No players on the roster"
        };
        let empty_msg = Paragraph::new(message)
            .alignment(Alignment::Center)
            .block(Block::default());
        frame.render_widget(empty_msg, area);
        return;
    }

    // Bars scale against the best score on the whole board
    let max_score = app.entries.iter().map(|e| e.score).max().unwrap_or(0);

    let rows: Vec<Row> = entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let rank = format!("#{}", idx + 1);
            let score_line = score_cell(entry.score, max_score, colors);

            let name = truncate_name(&entry.player.name, 40);
            let team = entry.player.profile_text("team").unwrap_or_default();

            // Alternating row background (odd rows get subtle background)
            let row_style = if idx % 2 == 1 {
                Style::default().bg(colors.row_alt_bg)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(rank).style(Style::default().fg(colors.index_color)),
                Cell::from(score_line),
                Cell::from(name),
                Cell::from(team).style(Style::default().fg(colors.muted)),
            ])
            .style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Length(5),   // Rank: "#99"
        Constraint::Length(17),  // Score + bar: "   120 ████░░░░"
        Constraint::Fill(1),     // Name
        Constraint::Length(16),  // Team, when the roster has one
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["Rank", "Score", "Player", "Team"])
                .style(colors.header_style)
                .bottom_margin(1),
        )
        .row_highlight_style(colors.row_selected);

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App, colors: &ThemeColors) {
    let text = if let Some((ref msg, _)) = app.flash_message {
        let msg_color = if msg.starts_with("Reload failed") {
            colors.flash_error
        } else {
            colors.flash_success
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let count = format!("{} shown", app.visible_entries().len());

        let elapsed = app.last_refresh.elapsed();
        let refresh_time = if elapsed.as_secs() < 60 {
            format!("loaded {}s ago", elapsed.as_secs())
        } else {
            format!("loaded {}m ago", elapsed.as_secs() / 60)
        };

        let hints = [
            ("j/k", ":nav "),
            ("f", if app.show_top { ":show all " } else { ":top performers " }),
            ("t", if app.theme == crate::tui::Theme::Dark { ":light " } else { ":dark " }),
            ("b", ":breakdown "),
            ("r", ":reload "),
            ("?", ":help "),
            ("q", ":quit"),
        ];

        let mut spans = vec![
            Span::styled(count, Style::default().fg(colors.muted)),
            Span::raw(" "),
            Span::styled(refresh_time, Style::default().fg(colors.muted)),
            Span::raw("  "),
        ];
        for (key, label) in hints {
            spans.push(Span::styled(key, Style::default().fg(colors.status_key_color)));
            spans.push(Span::raw(label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(colors.status_bar_bg)),
        area,
    );
}

/// Exact score followed by a bar scaled against the best score
fn score_cell(score: i64, max_score: i64, colors: &ThemeColors) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!("{:>6} ", score),
        Style::default().fg(colors.score_color(score, max_score)).bold(),
    )];
    spans.extend(score_bar(score, max_score, 8, colors).spans);
    Line::from(spans)
}

fn score_bar(score: i64, max_score: i64, width: usize, colors: &ThemeColors) -> Line<'static> {
    let ratio = if max_score > 0 {
        (score.max(0) as f64 / max_score as f64).min(1.0)
    } else {
        0.0
    };
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);

    let bar_color = colors.score_color(score, max_score);

    let mut spans = Vec::new();
    if filled > 0 {
        spans.push(Span::styled("█".repeat(filled), Style::default().fg(bar_color)));
    }
    if empty > 0 {
        spans.push(Span::styled("░".repeat(empty), Style::default().fg(colors.bar_empty)));
    }

    Line::from(spans)
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

fn popup_block<'a>(title: &'a str, colors: &ThemeColors) -> Block<'a> {
    Block::bordered()
        .title(Span::styled(title, colors.popup_title))
        .border_style(Style::default().fg(colors.popup_border))
        .style(Style::default().bg(colors.popup_bg).fg(colors.foreground))
}

fn render_help_popup(frame: &mut Frame, colors: &ThemeColors) {
    let popup_area = centered_rect_fixed(46, 13, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = popup_block(" Keyboard Shortcuts ", colors);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default().fg(colors.status_key_color).bold();
    let shortcuts = [
        ("j / Down      ", "Move down"),
        ("k / Up        ", "Move up"),
        ("f             ", "Toggle top performers"),
        ("t             ", "Toggle light/dark mode"),
        ("b             ", "Show score breakdown"),
        ("r             ", "Reload data files"),
        ("?             ", "Show/hide this help"),
        ("q / Ctrl-c    ", "Quit"),
    ];

    let mut help_lines: Vec<Line> = shortcuts
        .iter()
        .map(|(key, desc)| Line::from(vec![Span::styled(*key, key_style), Span::raw(*desc)]))
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(colors.muted),
    )));

    frame.render_widget(Paragraph::new(help_lines), inner);
}

/// One line per action plus score, spacing and footer rows
fn breakdown_height(action_count: usize) -> u16 {
    u16::try_from(action_count)
        .unwrap_or(u16::MAX)
        .max(1)
        .saturating_add(6)
}

fn render_breakdown_popup(frame: &mut Frame, app: &App, colors: &ThemeColors) {
    let Some(entry) = app.selected_entry() else {
        return;
    };

    let popup_area = centered_rect_fixed(44, breakdown_height(entry.actions.len()), frame.area());
    frame.render_widget(Clear, popup_area);

    let title = format!(" {} ", entry.player.name);
    let block = popup_block(&title, colors);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut lines = vec![
        Line::from(vec![
            Span::raw("Score  "),
            Span::styled(format!(" ⭐ {} ", entry.score), colors.badge_style),
        ]),
        Line::from(""),
    ];

    if entry.actions.is_empty() {
        lines.push(Line::from(Span::styled(
            "No scoring events",
            Style::default().fg(colors.muted),
        )));
    } else {
        for (action, tally) in &entry.actions {
            lines.push(Line::from(vec![
                Span::raw(format!("{:<20}", action.as_str())),
                Span::styled(format!("x{:<4}", tally.count), Style::default().fg(colors.muted)),
                Span::styled(
                    format!("{:>+6}", tally.points),
                    Style::default().fg(colors.score_color(tally.points, entry.score)),
                ),
            ]));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Esc/b: close",
        Style::default().fg(colors.muted),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{DataSources, Event, Player};
    use crate::scoring::{compute_leaderboard, ScoringConfig};
    use crate::tui::Theme;
    use std::path::PathBuf;

    fn sample_app() -> App {
        let players = vec![Player::new(1u64, "A"), Player::new(2u64, "B")];
        let events = vec![Event::new("e1", 1u64, "TAKE_WICKET")];
        let entries =
            compute_leaderboard(&players, &events, &ScoringConfig::default().points).unwrap();
        App::new(
            entries,
            DataSources {
                players: PathBuf::from("players.json"),
                events: PathBuf::from("events.json"),
            },
            ScoringConfig::default(),
            20,
            Theme::Dark,
        )
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_title_fills_width_exactly() {
        let app = sample_app();
        let colors = app.colors();

        let line = title_line(&app, 80, &colors);

        // The trophy is two columns wide
        assert_eq!(line.width(), 80);
        assert!(text(&line).ends_with("2 players, 20 pts awarded"));
    }

    #[test]
    fn test_title_on_narrow_terminal_has_no_padding() {
        let app = sample_app();
        let line = title_line(&app, 10, &app.colors());
        assert!(!text(&line).contains("  "));
    }

    #[test]
    fn test_score_cell_shows_exact_score() {
        let colors = Theme::Dark.colors();
        let line = score_cell(1049, 2000, &colors);
        assert!(text(&line).starts_with("  1049 "));
    }

    #[test]
    fn test_breakdown_height() {
        assert_eq!(breakdown_height(0), 7);
        assert_eq!(breakdown_height(3), 9);
        assert_eq!(breakdown_height(usize::MAX), u16::MAX);
        assert_eq!(breakdown_height(70_000), u16::MAX);
    }
}
