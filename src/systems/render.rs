//! GPU rendering system
//!
//! Owns the render context and the optional text overlay. Each frame the
//! current slide draws first, then its header and any text it queued are
//! drawn on top.

use std::path::Path;
use std::sync::Arc;
use winit::window::Window;
use learngfx_core::Color;
use learngfx_render::{ContextError, GpuDeck, RenderContext, TextLine, TextRenderer};
use crate::config::TextConfig;

/// Header position in pixels from the top-left corner
const HEADER_ORIGIN: (f32, f32) = (30.0, 30.0);
const HEADER_SCALE: f32 = 0.5;
const SUB_HEADER_SCALE: f32 = 0.35;

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// Surface was lost or is outdated (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<wgpu::SurfaceError> for RenderError {
    fn from(e: wgpu::SurfaceError) -> Self {
        match e {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => RenderError::SurfaceLost,
            wgpu::SurfaceError::OutOfMemory => RenderError::OutOfMemory,
            other => RenderError::Other(format!("{:?}", other)),
        }
    }
}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    text: Option<TextRenderer>,
    text_config: TextConfig,
}

impl RenderSystem {
    /// Create the GPU context for `window` and load the overlay font
    ///
    /// A font that fails to load only disables the overlay.
    pub fn new(
        window: Arc<Window>,
        vsync: bool,
        font_path: &Path,
        text_config: TextConfig,
    ) -> Result<Self, ContextError> {
        let context = pollster::block_on(RenderContext::new(window, vsync))?;

        let text = match TextRenderer::from_file(&context, font_path, text_config.size) {
            Ok(text) => Some(text),
            Err(e) => {
                log::warn!("Text overlay disabled: {}", e);
                None
            }
        };

        Ok(Self {
            context,
            text,
            text_config,
        })
    }

    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
    }

    /// Reconfigure after the surface was lost
    pub fn recover(&mut self) {
        self.context.reconfigure();
    }

    /// Render the deck's current slide plus its overlay
    pub fn render_frame(&mut self, deck: &mut GpuDeck) -> Result<(), RenderError> {
        let mut frame = self.context.begin_frame()?;

        let mut overlay = Vec::new();
        match deck.current() {
            Some(slide) => {
                if slide.draws_header() {
                    overlay = header_overlay(
                        slide.header(),
                        slide.sub_header(),
                        self.text_color(slide.color()),
                        self.text_config.size,
                    );
                }
            }
            None => frame.clear(Color::BLACK),
        }

        deck.draw(&self.context, &mut frame);
        overlay.extend(frame.take_overlay());

        if let Some(text) = self.text.as_mut() {
            text.draw(&self.context, &mut frame, &overlay);
        }

        self.context.submit(frame);
        Ok(())
    }

    /// Configured text color, or one that reads on `background`
    fn text_color(&self, background: Color) -> Color {
        self.text_config
            .color
            .unwrap_or_else(|| contrasting_color(background))
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.size.width, self.context.size.height)
    }
}

/// Black on light backgrounds, white on dark ones
pub fn contrasting_color(background: Color) -> Color {
    if background.luminance() > 0.5 {
        Color::BLACK
    } else {
        Color::WHITE
    }
}

/// Header at the top-left and the sub-header, if any, under it
pub fn header_overlay(header: &str, sub_header: Option<&str>, color: Color, px: f32) -> Vec<TextLine> {
    let (x, y) = HEADER_ORIGIN;
    let mut lines = vec![TextLine::new(header, x, y)
        .with_scale(HEADER_SCALE)
        .with_color(color)];
    if let Some(sub) = sub_header {
        let sub_y = y + px * HEADER_SCALE * 1.25;
        lines.push(
            TextLine::new(sub, x, sub_y)
                .with_scale(SUB_HEADER_SCALE)
                .with_color(color),
        );
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_display() {
        assert_eq!(format!("{}", RenderError::SurfaceLost), "Surface lost");
        assert_eq!(format!("{}", RenderError::OutOfMemory), "Out of memory");
        assert_eq!(
            format!("{}", RenderError::Other("test".to_string())),
            "Render error: test"
        );
    }

    #[test]
    fn test_surface_error_mapping() {
        assert!(matches!(RenderError::from(wgpu::SurfaceError::Lost), RenderError::SurfaceLost));
        assert!(matches!(RenderError::from(wgpu::SurfaceError::Outdated), RenderError::SurfaceLost));
        assert!(matches!(RenderError::from(wgpu::SurfaceError::OutOfMemory), RenderError::OutOfMemory));
        assert!(matches!(RenderError::from(wgpu::SurfaceError::Timeout), RenderError::Other(_)));
    }

    #[test]
    fn test_contrasting_color() {
        assert_eq!(contrasting_color(Color::BLACK), Color::WHITE);
        assert_eq!(contrasting_color(Color::WHITE), Color::BLACK);
        assert_eq!(contrasting_color(Color::MAGENTA), Color::WHITE);
    }

    #[test]
    fn test_header_overlay() {
        let lines = header_overlay("2a. Hello Triangle", None, Color::WHITE, 64.0);
        assert_eq!(lines.len(), 1);
        assert_eq!((lines[0].x, lines[0].y), (30.0, 30.0));
        assert_eq!(lines[0].scale, 0.5);
    }

    #[test]
    fn test_header_overlay_with_sub_header() {
        let lines = header_overlay("7. Camera", Some("WASD to move"), Color::BLACK, 64.0);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].text, "WASD to move");
        assert!(lines[1].y > lines[0].y);
        assert!(lines[1].scale < lines[0].scale);
        assert_eq!(lines[1].color, Color::BLACK);
    }
}
