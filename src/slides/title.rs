//! Section title slides

use learngfx_core::{Color, Slide, SlideBase, SlideError};
use learngfx_render::{FrameTarget, RenderContext, TextLine};

const TITLE_X: f32 = 30.0;
const TITLE_Y: f32 = 100.0;
const TITLE_LINE_SPACING: f32 = 60.0;
const TITLE_SCALE: f32 = 0.85;

/// A slide showing only its (possibly multi-line) name
pub struct TitleSlide {
    base: SlideBase,
}

impl TitleSlide {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: SlideBase::new(name),
        }
    }

    /// One overlay line per line of the name
    pub fn lines(&self) -> Vec<TextLine> {
        self.base
            .header
            .lines()
            .enumerate()
            .map(|(i, line)| {
                TextLine::new(line, TITLE_X, TITLE_Y + TITLE_LINE_SPACING * i as f32)
                    .with_scale(TITLE_SCALE)
                    .with_color(Color::WHITE)
            })
            .collect()
    }
}

impl Slide for TitleSlide {
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
        for line in self.lines() {
            frame.text(line);
        }
    }

    fn draws_header(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_lines() {
        let slide = TitleSlide::new("Model\nLoading");
        let lines = slide.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "Model");
        assert_eq!(lines[1].y, 160.0);
        assert_eq!(lines[1].scale, 0.85);
        assert!(!slide.draws_header());
    }
}
