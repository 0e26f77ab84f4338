//! The slide lifecycle
//!
//! A slide owns whatever GPU resources its demo needs. The deck drives it
//! through `init` once, then `update`/`draw` every frame while it is the
//! current slide, and `close` once at shutdown. A slide that also reacts to
//! input (a "sketch") overrides [`Slide::handle_event`].

use crate::{Color, FrameTime, SlideError};
use learngfx_input::SketchEvent;

/// Header, sub-header and background color shared by every slide
#[derive(Debug, Clone, PartialEq)]
pub struct SlideBase {
    pub header: String,
    pub sub_header: Option<String>,
    pub color: Color,
}

impl SlideBase {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            sub_header: None,
            color: Color::BLACK,
        }
    }

    /// Builder: set the sub-header
    pub fn with_sub_header(mut self, sub_header: impl Into<String>) -> Self {
        self.sub_header = Some(sub_header.into());
        self
    }

    /// Builder: set the background color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// A single tutorial demo
///
/// `Gpu` is the device context resources are created from and `Frame` is the
/// per-frame render target. Keeping both abstract lets the deck logic live
/// here without depending on the renderer.
pub trait Slide {
    type Gpu;
    type Frame;

    fn base(&self) -> &SlideBase;
    fn base_mut(&mut self) -> &mut SlideBase;

    fn header(&self) -> &str {
        &self.base().header
    }

    fn sub_header(&self) -> Option<&str> {
        self.base().sub_header.as_deref()
    }

    fn color(&self) -> Color {
        self.base().color
    }

    fn set_color(&mut self, color: Color) {
        self.base_mut().color = color;
    }

    /// Create GPU resources. Called once before the first frame.
    fn init(&mut self, gpu: &Self::Gpu) -> Result<(), SlideError>;

    /// Advance animation state
    fn update(&mut self, _time: &FrameTime) {}

    /// Record this slide's draw commands into `frame`
    fn draw(&mut self, gpu: &Self::Gpu, frame: &mut Self::Frame);

    /// Release GPU resources. Called once at shutdown.
    fn close(&mut self) {}

    /// Handle input. Returns true if the event was used.
    ///
    /// Plain slides ignore input.
    fn handle_event(&mut self, _event: &SketchEvent) -> bool {
        false
    }

    /// Whether this slide takes input (mouse capture makes sense)
    fn is_sketch(&self) -> bool {
        false
    }

    /// Whether the header overlay is drawn on top of this slide
    fn draws_header(&self) -> bool {
        true
    }

    /// The deck moved away from this slide
    fn on_exit(&mut self) {}

    /// The surface was resized
    fn resize(&mut self, _gpu: &Self::Gpu, _width: u32, _height: u32) {}
}
