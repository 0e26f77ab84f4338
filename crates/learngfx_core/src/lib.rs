//! Core types for the learngfx slideshow
//!
//! This crate provides the renderer-independent parts of the slideshow:
//!
//! - [`Slide`] - A tutorial demo with an init/update/draw/close lifecycle
//! - [`SlideBase`] - Header, sub-header and color shared by every slide
//! - [`SlideDeck`] - Ordered slides plus the current-slide state machine
//! - [`Color`] - RGBA color with interpolation helpers
//! - [`FrameClock`] / [`FpsCounter`] - Frame timing

mod color;
mod deck;
mod slide;
mod slide_error;
mod time;

pub use color::Color;
pub use deck::{SlideDeck, DeckCommand, DeckError};
pub use slide::{Slide, SlideBase};
pub use slide_error::SlideError;
pub use time::{FrameClock, FrameTime, FpsCounter};

// Re-export commonly used types for convenience
pub use learngfx_input::SketchEvent;
pub use learngfx_math::{Mat4, Vec3};
