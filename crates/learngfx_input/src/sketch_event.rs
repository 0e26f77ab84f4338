//! Input events forwarded to the current slide

use std::path::PathBuf;
use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Input delivered to a slide after the application has taken the keys it
/// reserves for navigation.
#[derive(Debug, Clone, PartialEq)]
pub enum SketchEvent {
    /// A physical key changed state. `repeat` marks presses generated by
    /// holding the key down.
    Key {
        code: KeyCode,
        state: ElementState,
        repeat: bool,
    },
    /// Cursor moved inside the window (window coordinates, Y grows down)
    CursorMoved { x: f64, y: f64 },
    /// Raw pointer motion, only sent while the cursor is captured
    MouseMotion { dx: f64, dy: f64 },
    /// Scroll wheel, in lines
    Scroll { dx: f32, dy: f32 },
    /// A file was dropped onto the window
    FileDropped(PathBuf),
}

impl SketchEvent {
    /// Convenience constructor for a key press
    pub fn pressed(code: KeyCode) -> Self {
        Self::Key { code, state: ElementState::Pressed, repeat: false }
    }

    /// Convenience constructor for an auto-repeated press of a held key
    pub fn repeated(code: KeyCode) -> Self {
        Self::Key { code, state: ElementState::Pressed, repeat: true }
    }

    /// Convenience constructor for a key release
    pub fn released(code: KeyCode) -> Self {
        Self::Key { code, state: ElementState::Released, repeat: false }
    }

    /// Returns the key code if this is a fresh key press (not a repeat)
    pub fn key_pressed(&self) -> Option<KeyCode> {
        match self {
            Self::Key { code, state: ElementState::Pressed, repeat: false } => Some(*code),
            _ => None,
        }
    }
}
