// workout-logger-tui/src/app/mod.rs
pub mod actions;
pub mod input;
pub mod navigation_helpers;
pub mod state;

pub use state::{ActiveModal, App, FocusField};
