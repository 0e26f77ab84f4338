use learngfx_core::{Slide, SlideBase, SlideError};
use learngfx_render::{FrameTarget, RenderContext};

/// Nothing but the background color
pub struct HelloWindow {
    base: SlideBase,
}

impl HelloWindow {
    pub fn new() -> Self {
        Self {
            base: SlideBase::new("1. Hello Window"),
        }
    }
}

impl Default for HelloWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl Slide for HelloWindow {
    type Gpu = RenderContext;
    type Frame = FrameTarget;

    fn base(&self) -> &SlideBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SlideBase {
        &mut self.base
    }

    fn init(&mut self, _gpu: &RenderContext) -> Result<(), SlideError> {
        Ok(())
    }

    fn draw(&mut self, _gpu: &RenderContext, frame: &mut FrameTarget) {
        frame.clear(self.base.color);
    }
}
