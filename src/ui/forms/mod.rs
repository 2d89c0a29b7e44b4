//! Form rendering module
//!
//! This module contains UI components for rendering the live form:
//! - `field_renderer`: Field rendering utilities
//! - `preview`: The preview pane with title, fields and submit button

mod field_renderer;
mod preview;

pub use preview::draw as draw_preview;
