//! Two textures on a quad, plus the texture exercises

use bytemuck::{Pod, Zeroable};
use learngfx_core::{Slide, SlideBase, SlideError};
use learngfx_input::SketchEvent;
use learngfx_render::texture::{Filter, Wrap};
use learngfx_render::{
    load_shader, FrameTarget, Mesh, PipelineBuilder, RenderContext, TextureOptions, UniformBuffer,
    VertexLayout,
};
use winit::keyboard::KeyCode;

use crate::slides::common::{textured_quad, TexturePair, QUAD_INDICES};
use crate::slides::SlideSettings;

const SHADER: &str = "textures.wgsl";

/// How much of the face shows through the container
pub const DEFAULT_MIX: f32 = 0.2;
const MIX_STEP: f32 = 0.1;

/// Which variation of the textured quad to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureExercise {
    Mix,
    FlippedFace,
    DoubledUv,
    ZoomedUv,
    CrossFade,
}

impl TextureExercise {
    pub const ALL: [TextureExercise; 5] = [
        TextureExercise::Mix,
        TextureExercise::FlippedFace,
        TextureExercise::DoubledUv,
        TextureExercise::ZoomedUv,
        TextureExercise::CrossFade,
    ];

    pub fn header(self) -> &'static str {
        match self {
            TextureExercise::Mix => "4. Textures",
            TextureExercise::FlippedFace => "4a. Textures Ex1",
            TextureExercise::DoubledUv => "4b. Textures Ex2",
            TextureExercise::ZoomedUv => "4c. Textures Ex3",
            TextureExercise::CrossFade => "4d. Textures Ex4",
        }
    }

    pub fn sub_header(self) -> Option<&'static str> {
        match self {
            TextureExercise::Mix => None,
            TextureExercise::FlippedFace => Some("flip the happy face in the fragment shader"),
            TextureExercise::DoubledUv => {
                Some("scale tex coords by 2 and set nearest filter to see individual pixels")
            }
            TextureExercise::ZoomedUv => Some("scale tex down and test various wrapping"),
            TextureExercise::CrossFade => Some("cross fade textures using up/down arrows"),
        }
    }

    /// Texture coordinate range across the quad
    pub fn uv_range(self) -> (f32, f32) {
        match self {
            TextureExercise::DoubledUv => (0.0, 2.0),
            TextureExercise::ZoomedUv => (0.45, 0.55),
            _ => (0.0, 1.0),
        }
    }

    /// Sampler options for the container and face textures
    pub fn texture_options(self) -> (TextureOptions, TextureOptions) {
        let nearest = TextureOptions::default().with_filter(Filter::Nearest);
        match self {
            TextureExercise::Mix | TextureExercise::FlippedFace => {
                (TextureOptions::default(), TextureOptions::default())
            }
            TextureExercise::DoubledUv => (nearest.with_wrap(Wrap::ClampToEdge), nearest),
            TextureExercise::ZoomedUv => (
                nearest.with_wrap(Wrap::MirrorRepeat),
                nearest.with_wrap(Wrap::ClampToEdge),
            ),
            TextureExercise::CrossFade => (nearest, nearest),
        }
    }

    fn fragment_entry(self) -> &'static str {
        match self {
            TextureExercise::FlippedFace => "fs_flipped",
            _ => "fs_main",
        }
    }
}

/// Matches `Params` in textures.wgsl
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct TextureParams {
    pub mix_value: f32,
    pub _pad: [f32; 3],
}

impl TextureParams {
    pub fn new(mix_value: f32) -> Self {
        Self {
            mix_value,
            _pad: [0.0; 3],
        }
    }
}

struct TexturesGpu {
    pipeline: wgpu::RenderPipeline,
    mesh: Mesh,
    textures: TexturePair,
    params: UniformBuffer<TextureParams>,
}

/// The container with the face mixed on top
pub struct TexturesSlide {
    base: SlideBase,
    settings: SlideSettings,
    exercise: TextureExercise,
    mix_value: f32,
    gpu: Option<TexturesGpu>,
}

impl TexturesSlide {
    pub fn new(settings: &SlideSettings, exercise: TextureExercise) -> Self {
        let mut base = SlideBase::new(exercise.header());
        base.sub_header = exercise.sub_header().map(String::from);
        Self {
            base,
            settings: settings.clone(),
            exercise,
            mix_value: DEFAULT_MIX,
            gpu: None,
        }
    }

    pub fn mix_value(&self) -> f32 {
        self.mix_value
    }
}

impl Slide for TexturesSlide {
    type Gpu = RenderContext;
    type Frame = FrameTarget;

    fn base(&self) -> &SlideBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SlideBase {
        &mut self.base
    }

    fn init(&mut self, gpu: &RenderContext) -> Result<(), SlideError> {
        let (container, face) = self.exercise.texture_options();
        let textures = TexturePair::load(gpu, &self.settings.textures, container, face)?;

        let shader = load_shader(&gpu.device, self.exercise.header(), &self.settings.shader(SHADER))?;
        let layout = VertexLayout::new(8)
            .attribute(0, 3, 0)
            .attribute(1, 3, 3)
            .attribute(2, 2, 6);
        let params = UniformBuffer::new(&gpu.device, "Texture Params", &TextureParams::new(self.mix_value));

        let pipeline = PipelineBuilder::new(self.exercise.header(), &shader)
            .with_entry_points("vs_main", self.exercise.fragment_entry())
            .with_vertex_layout(layout.buffer_layout())
            .with_bind_group_layout(params.layout())
            .with_bind_group_layout(&textures.layout)
            .build(&gpu.device, gpu.surface_format());

        let (min, max) = self.exercise.uv_range();
        let vertices = textured_quad(min, max);
        self.gpu = Some(TexturesGpu {
            pipeline,
            mesh: Mesh::new(&gpu.device, "Textured Quad", &vertices, &layout, Some(&QUAD_INDICES)),
            textures,
            params,
        });
        Ok(())
    }

    fn draw(&mut self, gpu: &RenderContext, frame: &mut FrameTarget) {
        let Some(res) = &self.gpu else {
            frame.clear(self.base.color);
            return;
        };
        res.params.write(&gpu.queue, &TextureParams::new(self.mix_value));

        let mut pass = frame.begin_pass(&self.base.header, Some(self.base.color));
        pass.set_pipeline(&res.pipeline);
        pass.set_bind_group(0, res.params.bind_group(), &[]);
        pass.set_bind_group(1, &res.textures.bind_group, &[]);
        res.mesh.draw(&mut pass);
    }

    fn close(&mut self) {
        self.gpu = None;
    }

    fn handle_event(&mut self, event: &SketchEvent) -> bool {
        if self.exercise != TextureExercise::CrossFade {
            return false;
        }
        let step = match event.key_pressed() {
            Some(KeyCode::ArrowUp) => MIX_STEP,
            Some(KeyCode::ArrowDown) => -MIX_STEP,
            _ => return false,
        };
        self.mix_value = (self.mix_value + step).clamp(0.0, 1.0);
        log::debug!("Mix value: {:.1}", self.mix_value);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_size() {
        assert_eq!(std::mem::size_of::<TextureParams>(), 16);
    }

    #[test]
    fn test_cross_fade_clamps() {
        let mut slide = TexturesSlide::new(&SlideSettings::default(), TextureExercise::CrossFade);
        for _ in 0..20 {
            slide.handle_event(&SketchEvent::pressed(KeyCode::ArrowUp));
        }
        assert_eq!(slide.mix_value(), 1.0);
        for _ in 0..20 {
            slide.handle_event(&SketchEvent::pressed(KeyCode::ArrowDown));
        }
        assert_eq!(slide.mix_value(), 0.0);
    }

    #[test]
    fn test_cross_fade_step() {
        let mut slide = TexturesSlide::new(&SlideSettings::default(), TextureExercise::CrossFade);
        assert!(slide.handle_event(&SketchEvent::pressed(KeyCode::ArrowUp)));
        assert!((slide.mix_value() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_other_exercises_ignore_arrows() {
        let mut slide = TexturesSlide::new(&SlideSettings::default(), TextureExercise::Mix);
        assert!(!slide.handle_event(&SketchEvent::pressed(KeyCode::ArrowUp)));
        assert_eq!(slide.mix_value(), DEFAULT_MIX);
    }

    #[test]
    fn test_doubled_uv_options() {
        let (container, face) = TextureExercise::DoubledUv.texture_options();
        assert_eq!(container.wrap_u, Wrap::ClampToEdge);
        assert_eq!(face.wrap_u, Wrap::Repeat);
        assert_eq!(face.filter, Filter::Nearest);
        assert_eq!(TextureExercise::DoubledUv.uv_range(), (0.0, 2.0));
    }
}
