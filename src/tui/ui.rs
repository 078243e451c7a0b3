//! Dashboard rendering and the terminal main loop.

use super::app::DashboardApp;
use super::events::{handle_key_event, Event, EventHandler};
use super::theme::ColorScheme;
use crate::model::MetricKey;
use crate::reports::render_title_detail;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
};
use std::io::{self, stdout};

/// Minimum terminal size the layout is drawn for.
pub const MIN_WIDTH: u16 = 80;
pub const MIN_HEIGHT: u16 = 20;

const SLIDER_WIDTH: usize = 12;

/// Run the dashboard until the user quits.
///
/// Log output is dropped while the alternate screen is active so it cannot
/// tear the layout.
pub fn run_dashboard(app: &mut DashboardApp, tick_rate_ms: u64) -> io::Result<()> {
    tracing::subscriber::with_default(tracing::subscriber::NoSubscriber::default(), || {
        run_terminal(app, tick_rate_ms)
    })
}

fn run_terminal(app: &mut DashboardApp, tick_rate_ms: u64) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(tick_rate_ms);
    let result = event_loop(&mut terminal, app, &events);

    // Restore the terminal even if the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut DashboardApp,
    events: &EventHandler,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            Event::Key(key) => handle_key_event(app, key),
            Event::Resize(_, _) => {}
            Event::Tick => app.tick += 1,
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Main render function
pub fn render(frame: &mut Frame, app: &DashboardApp) {
    let area = frame.area();
    let colors = app.theme.colors();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let warning = Paragraph::new(format!(
            "Terminal too small: {}x{} (need {MIN_WIDTH}x{MIN_HEIGHT})",
            area.width, area.height
        ))
        .style(Style::default().fg(colors.weak));
        frame.render_widget(warning, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(4), // Overview cards
            Constraint::Min(8),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(area);

    render_header(frame, chunks[0], app, &colors);
    render_cards(frame, chunks[1], app, &colors);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(44), Constraint::Min(30)])
        .split(chunks[2]);
    render_weights(frame, body[0], app, &colors);

    if app.show_detail {
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(body[1]);
        render_ranking(frame, right[0], app, &colors);
        render_detail(frame, right[1], app, &colors);
    } else {
        render_ranking(frame, body[1], app, &colors);
    }

    render_footer(frame, chunks[3], app, &colors);
}

fn render_header(frame: &mut Frame, area: Rect, app: &DashboardApp, colors: &ColorScheme) {
    let line = Line::from(vec![
        Span::styled(
            " Franchise Ranker ",
            Style::default().fg(colors.primary).bold(),
        ),
        Span::styled("│ ", Style::default().fg(colors.muted)),
        Span::styled(
            format!("Region: {} ", app.filter().label()),
            Style::default().fg(colors.accent),
        ),
        Span::styled("│ ", Style::default().fg(colors.muted)),
        Span::styled(app.weights().formula(), Style::default().fg(colors.text)),
    ]);
    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(colors.border_style(false)),
    );
    frame.render_widget(header, area);
}

fn card<'a>(title: &'a str, value: String, value_color: Color, colors: &ColorScheme) -> Paragraph<'a> {
    Paragraph::new(Line::from(Span::styled(
        value,
        Style::default().fg(value_color).bold(),
    )))
    .block(
        Block::default()
            .title(Span::styled(title, Style::default().fg(colors.text_muted)))
            .borders(Borders::ALL)
            .border_style(colors.border_style(false)),
    )
}

fn render_cards(frame: &mut Frame, area: Rect, app: &DashboardApp, colors: &ColorScheme) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(area);
    let summary = app.summary();

    let top = match (&summary.top, app.top_name()) {
        (Some(top), Some(name)) => card(
            "Top Candidate",
            format!("{name} ({:.1})", top.score),
            colors.score_color(top.score),
            colors,
        ),
        _ => card("Top Candidate", "-".to_string(), colors.muted, colors),
    };
    frame.render_widget(top, cards[0]);

    frame.render_widget(
        card(
            "Average Score",
            format!("{:.1}", summary.average_score),
            colors.score_color(summary.average_score),
            colors,
        ),
        cards[1],
    );

    frame.render_widget(
        card(
            "Strong Contenders",
            format!(
                "{} of {} (>= {:.0})",
                summary.strong_contenders, summary.title_count, summary.strong_threshold
            ),
            colors.primary,
            colors,
        ),
        cards[2],
    );
}

fn slider(fraction: f64) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * SLIDER_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(SLIDER_WIDTH - filled))
}

fn render_weights(frame: &mut Frame, area: Rect, app: &DashboardApp, colors: &ColorScheme) {
    let focused = app.focused_metric();
    let lines: Vec<Line> = MetricKey::ALL
        .iter()
        .map(|metric| {
            let weight = app.weights()[*metric];
            let is_focused = *metric == focused;
            let label_style = if is_focused {
                Style::default().fg(colors.accent).bold()
            } else {
                Style::default().fg(colors.text)
            };
            Line::from(vec![
                Span::styled(if is_focused { "▶ " } else { "  " }, label_style),
                Span::styled(format!("{:<22}", metric.label()), label_style),
                Span::styled(slider(weight), Style::default().fg(colors.primary)),
                Span::styled(
                    format!(" {:>3.0}%", weight * 100.0),
                    Style::default().fg(colors.text_muted),
                ),
            ])
        })
        .collect();

    let panel = Paragraph::new(lines).block(
        Block::default()
            .title(" Weights ")
            .borders(Borders::ALL)
            .border_style(colors.border_style(true)),
    );
    frame.render_widget(panel, area);
}

fn render_ranking(frame: &mut Frame, area: Rect, app: &DashboardApp, colors: &ColorScheme) {
    let titles = app.catalog().titles();
    let rows: Vec<Row> = app
        .rows()
        .iter()
        .map(|row| {
            let (name, suggestion) = row
                .title(titles)
                .map_or((row.title_id.as_str(), "-"), |t| {
                    (t.name.as_str(), t.headline_suggestion())
                });
            Row::new(vec![
                Cell::from(format!("{:>2}", row.rank)),
                Cell::from(name.to_string()),
                Cell::from(format!("{:>5.1}", row.score))
                    .style(Style::default().fg(colors.score_color(row.score))),
                Cell::from(row.top_driver.label()),
                Cell::from(suggestion.to_string()).style(Style::default().fg(colors.text_muted)),
            ])
        })
        .collect();

    let header = Row::new(vec!["#", "Title", "Score", "Top Driver", "Suggestion"])
        .style(Style::default().fg(colors.primary).bold());

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Min(18),
            Constraint::Length(6),
            Constraint::Length(22),
            Constraint::Min(10),
        ],
    )
    .header(header)
    .row_highlight_style(Style::default().bg(colors.selection).bold())
    .block(
        Block::default()
            .title(format!(" Ranking ({}) ", app.filter()))
            .borders(Borders::ALL)
            .border_style(colors.border_style(false)),
    );

    let mut state = TableState::default().with_selected(Some(app.selected_index()));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_detail(frame: &mut Frame, area: Rect, app: &DashboardApp, colors: &ColorScheme) {
    let text = match (app.selected_title(), app.selected_row()) {
        (Some(title), Some(row)) => render_title_detail(title, row, app.filter(), false),
        _ => "No title selected".to_string(),
    };
    let detail = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(colors.text))
        .block(
            Block::default()
                .title(" Detail ")
                .borders(Borders::ALL)
                .border_style(colors.border_style(false)),
        );
    frame.render_widget(detail, area);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &DashboardApp, colors: &ColorScheme) {
    let text = app.status_message.clone().unwrap_or_else(|| {
        "←/→ adjust  ↑/↓ metric  j/k select  Enter detail  g/G region  r reset  t theme  q quit"
            .to_string()
    });
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(colors.text_muted)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::AppConfig;
    use crate::model::ScoreWeights;
    use ratatui::backend::TestBackend;

    fn draw(app: &DashboardApp, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app() -> DashboardApp {
        DashboardApp::new(
            Catalog::builtin().unwrap(),
            ScoreWeights::default(),
            &AppConfig::default(),
        )
    }

    #[test]
    fn test_render_panels() {
        let app = app();
        let screen = draw(&app, 140, 40);
        assert!(screen.contains("Franchise Ranker"));
        assert!(screen.contains("Top Candidate"));
        assert!(screen.contains("Weights"));
        assert!(screen.contains("Ranking (Global)"));
    }

    #[test]
    fn test_render_detail_panel() {
        let mut app = app();
        app.toggle_detail();
        let screen = draw(&app, 140, 50);
        assert!(screen.contains("Detail"));
        assert!(screen.contains("Score Breakdown"));
    }

    #[test]
    fn test_small_terminal_warning() {
        let app = app();
        let screen = draw(&app, 40, 10);
        assert!(screen.contains("Terminal too small"));
    }

    #[test]
    fn test_slider_fill() {
        assert_eq!(slider(0.0), "░".repeat(SLIDER_WIDTH));
        assert_eq!(slider(1.0), "█".repeat(SLIDER_WIDTH));
    }
}
