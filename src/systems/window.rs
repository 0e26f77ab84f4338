//! Window management system
//!
//! Handles window creation, cursor capture/release, fullscreen toggle, and title updates.

use std::sync::Arc;
use winit::{
    event_loop::ActiveEventLoop,
    window::{CursorGrabMode, Fullscreen, Window},
};
use crate::config::WindowConfig;

/// Manages the application window and cursor state
pub struct WindowSystem {
    window: Arc<Window>,
    cursor_captured: bool,
    base_title: String,
}

impl WindowSystem {
    /// Create window from config
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<Self, WindowError> {
        let mut attrs = Window::default_attributes()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.width,
                config.height,
            ));

        if config.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| WindowError::CreationFailed(e.to_string()))?,
        );

        Ok(Self {
            window,
            cursor_captured: false,
            base_title: config.title.clone(),
        })
    }

    /// Get window reference (for RenderContext creation)
    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    pub fn is_cursor_captured(&self) -> bool {
        self.cursor_captured
    }

    /// Capture cursor for FPS-style controls
    pub fn capture_cursor(&mut self) -> bool {
        let grab_result = self.window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined));

        if grab_result.is_ok() {
            self.window.set_cursor_visible(false);
            self.cursor_captured = true;
            log::info!("Cursor captured - Escape to release");
            true
        } else {
            log::warn!("Failed to capture cursor");
            false
        }
    }

    pub fn release_cursor(&mut self) {
        if let Err(e) = self.window.set_cursor_grab(CursorGrabMode::None) {
            log::warn!("Failed to release cursor grab: {}", e);
        }
        self.window.set_cursor_visible(true);
        self.cursor_captured = false;
        log::info!("Cursor released");
    }

    pub fn toggle_fullscreen(&self) {
        let new_fullscreen = if self.window.fullscreen().is_some() {
            None
        } else {
            Some(Fullscreen::Borderless(None))
        };
        self.window.set_fullscreen(new_fullscreen);
    }

    /// Show the current slide and frame rate in the title bar
    pub fn update_title(&self, header: &str, index: usize, count: usize, fps: Option<f32>) {
        self.window
            .set_title(&format_title(&self.base_title, header, index, count, fps));
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

/// `"<base> - <header> [n/N] <fps> fps"`, with multi-line headers joined
pub fn format_title(base: &str, header: &str, index: usize, count: usize, fps: Option<f32>) -> String {
    let header = header.split('\n').collect::<Vec<_>>().join(" ");
    let mut title = format!("{} - {} [{}/{}]", base, header, index + 1, count);
    if let Some(fps) = fps {
        title.push_str(&format!(" {:.0} fps", fps));
    }
    title
}

#[derive(Debug)]
pub enum WindowError {
    CreationFailed(String),
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::CreationFailed(msg) => write!(f, "Window creation failed: {}", msg),
        }
    }
}

impl std::error::Error for WindowError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_with_fps() {
        let title = format_title("LearnOpenGL", "2a. Hello Triangle", 2, 20, Some(59.7));
        assert_eq!(title, "LearnOpenGL - 2a. Hello Triangle [3/20] 60 fps");
    }

    #[test]
    fn test_title_without_fps() {
        let title = format_title("LearnOpenGL", "1. Hello Window", 0, 3, None);
        assert_eq!(title, "LearnOpenGL - 1. Hello Window [1/3]");
    }

    #[test]
    fn test_title_joins_multiline_header() {
        let title = format_title("T", "Getting\nstarted", 0, 1, None);
        assert_eq!(title, "T - Getting started [1/1]");
    }

    #[test]
    fn test_window_error_display() {
        let err = WindowError::CreationFailed("no display".into());
        assert_eq!(err.to_string(), "Window creation failed: no display");
    }
}
