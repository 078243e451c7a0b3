//! Event polling and key dispatch for the dashboard.

use super::app::DashboardApp;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Application event
#[derive(Debug)]
pub enum Event {
    /// Key press event
    Key(KeyEvent),
    /// Terminal tick
    Tick,
    /// Resize event
    Resize(u16, u16),
}

/// Event handler
pub struct EventHandler {
    /// Tick rate in milliseconds
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a new event handler
    pub const fn new(tick_rate: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate),
        }
    }

    /// Poll for the next event
    pub fn next(&self) -> Result<Event, std::io::Error> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                // Windows reports both press and release
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(Event::Key(key)),
                CrosstermEvent::Resize(width, height) => Ok(Event::Resize(width, height)),
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_TICK_RATE_MS)
    }
}

/// Handle key events and update app state
pub fn handle_key_event(app: &mut DashboardApp, key: KeyEvent) {
    app.clear_status_message();

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),

        // Weight sliders
        KeyCode::Right | KeyCode::Char('l' | '+') => app.increase_focused(),
        KeyCode::Left | KeyCode::Char('h' | '-') => app.decrease_focused(),
        KeyCode::Down | KeyCode::Tab => app.focus_next(),
        KeyCode::Up | KeyCode::BackTab => app.focus_prev(),
        KeyCode::Char('r') => app.reset_weights(),

        // Ranking table
        KeyCode::Char('j') => app.select_next(),
        KeyCode::Char('k') => app.select_prev(),
        KeyCode::Enter => app.toggle_detail(),

        // Filter and display
        KeyCode::Char('g') => app.next_region(),
        KeyCode::Char('G') => app.prev_region(),
        KeyCode::Char('t') => app.toggle_theme(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::AppConfig;
    use crate::model::{MetricKey, RegionFilter, ScoreWeights};
    use crate::tui::Theme;

    fn app() -> DashboardApp {
        DashboardApp::new(
            Catalog::builtin().unwrap(),
            ScoreWeights::default(),
            &AppConfig::default(),
        )
    }

    fn press(app: &mut DashboardApp, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_quit_keys() {
        let mut a = app();
        press(&mut a, KeyCode::Char('q'));
        assert!(a.should_quit);

        let mut b = app();
        press(&mut b, KeyCode::Esc);
        assert!(b.should_quit);

        let mut c = app();
        handle_key_event(&mut c, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(c.should_quit);
    }

    #[test]
    fn test_arrow_keys_drive_sliders() {
        let mut app = app();
        press(&mut app, KeyCode::Down);
        assert_eq!(app.focused_metric(), MetricKey::RewatchRate);
        let before = app.weights()[MetricKey::RewatchRate];
        press(&mut app, KeyCode::Right);
        assert!(app.weights()[MetricKey::RewatchRate] > before);
        press(&mut app, KeyCode::Char('r'));
        assert!((app.weights()[MetricKey::RewatchRate] - before).abs() < 1e-12);
    }

    #[test]
    fn test_region_and_theme_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('G'));
        assert_eq!(app.filter(), RegionFilter::ALL[6]);
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.filter(), RegionFilter::Global);
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.theme, Theme::Light);
    }

    #[test]
    fn test_selection_and_detail_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.selected_index(), 1);
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.selected_index(), 0);
        press(&mut app, KeyCode::Enter);
        assert!(app.show_detail);
    }
}
