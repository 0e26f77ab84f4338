//! wgpu rendering helpers for the learngfx slides
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, surface and depth buffer
//! - [`frame::FrameTarget`] - One acquired frame handed to a slide's `draw`
//! - [`pipeline::PipelineBuilder`] - Render pipeline boilerplate
//! - [`camera::FlyCamera`] - FPS camera driven by `learngfx_input`
//! - [`text::TextRenderer`] - Header and title overlay
//! - [`model::Model`] - OBJ loading

pub mod camera;
pub mod context;
pub mod frame;
pub mod mesh;
pub mod model;
pub mod pipeline;
pub mod shader;
pub mod text;
pub mod texture;
pub mod uniforms;

pub use camera::FlyCamera;
pub use context::{ContextError, RenderContext, DEPTH_FORMAT};
pub use frame::FrameTarget;
pub use mesh::{Mesh, VertexLayout};
pub use model::{Model, ModelError};
pub use pipeline::{PipelineBuilder, UniformBuffer};
pub use shader::{load_shader, ShaderError, ShaderSource};
pub use text::{TextError, TextLine, TextRenderer};
pub use texture::{Texture, TextureError, TextureOptions};

use learngfx_core::{Slide, SlideDeck, SlideError};

/// A slide drawn with wgpu
pub type GpuSlide = dyn Slide<Gpu = RenderContext, Frame = FrameTarget>;

/// The deck of wgpu slides
pub type GpuDeck = SlideDeck<RenderContext, FrameTarget>;

impl From<ShaderError> for SlideError {
    fn from(e: ShaderError) -> Self {
        SlideError::Shader(e.to_string())
    }
}

impl From<TextureError> for SlideError {
    fn from(e: TextureError) -> Self {
        SlideError::Texture(e.to_string())
    }
}

impl From<ModelError> for SlideError {
    fn from(e: ModelError) -> Self {
        SlideError::Model(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_error_from_shader() {
        let err: SlideError = ShaderError::Compile {
            label: "Triangle".into(),
            message: "bad token".into(),
        }
        .into();
        assert!(matches!(err, SlideError::Shader(ref m) if m.contains("bad token")));
    }

    #[test]
    fn test_slide_error_from_model() {
        let err: SlideError = ModelError::MissingNormals("suit".into()).into();
        assert!(matches!(err, SlideError::Model(ref m) if m.contains("suit")));
    }
}
