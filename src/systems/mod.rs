//! Application systems
//!
//! Window and rendering concerns, kept out of main.rs.

mod render;
mod window;

pub use render::{contrasting_color, header_overlay, RenderError, RenderSystem};
pub use window::{format_title, WindowError, WindowSystem};
