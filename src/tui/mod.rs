//! TUI module: Terminal form using Ratatui.
//!
//! A single screen with the survey inputs on the left and the prediction,
//! input summary and WHR caption on the right. Every edit re-runs the
//! estimate.

mod app;
mod styles;
mod ui;

pub use app::App;
pub use styles::Theme;
