//! Application state module

mod app_state;
mod editor;
pub mod forms;
mod theme;

pub use app_state::*;
pub use editor::*;
pub use theme::*;
