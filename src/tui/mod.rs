//! Interactive ranking dashboard using ratatui.
//!
//! The dashboard owns the UI state (weight vector, filter context, selected
//! title) and re-ranks after every slider move or region change.
//!
//! # Architecture
//!
//! [`DashboardApp`] holds all state and is driven by
//! [`events::handle_key_event`]; [`ui`] only reads it to draw a frame.

mod app;
pub mod events;
pub mod theme;
mod ui;

pub use app::DashboardApp;
pub use events::{handle_key_event, Event, EventHandler};
pub use theme::{ColorScheme, Theme};
pub use ui::{render, run_dashboard, MIN_HEIGHT, MIN_WIDTH};
