//! Per-vertex color and the four shader exercises

use bytemuck::{Pod, Zeroable};
use learngfx_core::{FrameTime, Slide, SlideBase, SlideError};
use learngfx_render::{
    load_shader, FrameTarget, Mesh, PipelineBuilder, RenderContext, UniformBuffer, VertexLayout,
};

use crate::slides::SlideSettings;

const SHADER: &str = "shaders.wgsl";

/// Red, green and blue corners
#[rustfmt::skip]
const COLORED_TRIANGLE: [f32; 18] = [
    // positions         // colors
     0.5, -0.5, 0.0,     1.0, 0.0, 0.0,
    -0.5, -0.5, 0.0,     0.0, 1.0, 0.0,
     0.0,  0.5, 0.0,     0.0, 0.0, 1.0,
];

const X_OFFSET: f32 = 0.5;

/// Which variation of the colored triangle to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderExercise {
    VertexColor,
    PulsingUniform,
    UpsideDown,
    Offset,
    PositionAsColor,
}

impl ShaderExercise {
    pub const ALL: [ShaderExercise; 5] = [
        ShaderExercise::VertexColor,
        ShaderExercise::PulsingUniform,
        ShaderExercise::UpsideDown,
        ShaderExercise::Offset,
        ShaderExercise::PositionAsColor,
    ];

    pub fn header(self) -> &'static str {
        match self {
            ShaderExercise::VertexColor => "3a. Shaders",
            ShaderExercise::PulsingUniform => "3b. Shaders Ex1",
            ShaderExercise::UpsideDown => "3c. Shaders Ex2",
            ShaderExercise::Offset => "3d. Shaders Ex3",
            ShaderExercise::PositionAsColor => "3e. Shaders Ex4",
        }
    }

    pub fn sub_header(self) -> Option<&'static str> {
        match self {
            ShaderExercise::VertexColor => Some("color interpolated between vertices"),
            ShaderExercise::PulsingUniform => Some("with a uniform updated every frame"),
            ShaderExercise::UpsideDown => Some("flip the triangle in the vertex shader"),
            ShaderExercise::Offset => Some("horizontal offset set as a uniform"),
            ShaderExercise::PositionAsColor => Some("vertex position output as color"),
        }
    }

    fn entry_points(self) -> (&'static str, &'static str) {
        match self {
            ShaderExercise::VertexColor => ("vs_main", "fs_main"),
            ShaderExercise::PulsingUniform => ("vs_main", "fs_uniform"),
            ShaderExercise::UpsideDown => ("vs_upside_down", "fs_main"),
            ShaderExercise::Offset => ("vs_offset", "fs_main"),
            ShaderExercise::PositionAsColor => ("vs_position_color", "fs_main"),
        }
    }
}

/// Matches `Params` in shaders.wgsl
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ShaderParams {
    pub color: [f32; 4],
    pub x_offset: f32,
    pub _pad: [f32; 3],
}

impl ShaderParams {
    /// Uniform values for `exercise` at `elapsed` seconds
    pub fn at(exercise: ShaderExercise, elapsed: f32) -> Self {
        let green = elapsed.sin() / 2.0 + 0.5;
        Self {
            color: [0.0, green, 0.0, 1.0],
            x_offset: if exercise == ShaderExercise::Offset { X_OFFSET } else { 0.0 },
            _pad: [0.0; 3],
        }
    }
}

struct ShadersGpu {
    pipeline: wgpu::RenderPipeline,
    mesh: Mesh,
    params: UniformBuffer<ShaderParams>,
}

/// A triangle with a color attribute per vertex
pub struct ShadersSlide {
    base: SlideBase,
    settings: SlideSettings,
    exercise: ShaderExercise,
    params: ShaderParams,
    gpu: Option<ShadersGpu>,
}

impl ShadersSlide {
    pub fn new(settings: &SlideSettings, exercise: ShaderExercise) -> Self {
        let mut base = SlideBase::new(exercise.header());
        base.sub_header = exercise.sub_header().map(String::from);
        Self {
            base,
            settings: settings.clone(),
            exercise,
            params: ShaderParams::at(exercise, 0.0),
            gpu: None,
        }
    }

    pub fn params(&self) -> &ShaderParams {
        &self.params
    }
}

impl Slide for ShadersSlide {
    type Gpu = RenderContext;
    type Frame = FrameTarget;

    fn base(&self) -> &SlideBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SlideBase {
        &mut self.base
    }

    fn init(&mut self, gpu: &RenderContext) -> Result<(), SlideError> {
        let shader = load_shader(&gpu.device, self.exercise.header(), &self.settings.shader(SHADER))?;
        let layout = VertexLayout::new(6).attribute(0, 3, 0).attribute(1, 3, 3);
        let params = UniformBuffer::new(&gpu.device, "Shader Params", &self.params);

        let (vs, fs) = self.exercise.entry_points();
        let pipeline = PipelineBuilder::new(self.exercise.header(), &shader)
            .with_entry_points(vs, fs)
            .with_vertex_layout(layout.buffer_layout())
            .with_bind_group_layout(params.layout())
            .build(&gpu.device, gpu.surface_format());

        self.gpu = Some(ShadersGpu {
            pipeline,
            mesh: Mesh::new(&gpu.device, "Colored Triangle", &COLORED_TRIANGLE, &layout, None),
            params,
        });
        Ok(())
    }

    fn update(&mut self, time: &FrameTime) {
        self.params = ShaderParams::at(self.exercise, time.elapsed);
    }

    fn draw(&mut self, gpu: &RenderContext, frame: &mut FrameTarget) {
        let Some(res) = &self.gpu else {
            frame.clear(self.base.color);
            return;
        };
        res.params.write(&gpu.queue, &self.params);

        let mut pass = frame.begin_pass(&self.base.header, Some(self.base.color));
        pass.set_pipeline(&res.pipeline);
        pass.set_bind_group(0, res.params.bind_group(), &[]);
        res.mesh.draw(&mut pass);
    }

    fn close(&mut self) {
        self.gpu = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_size() {
        // vec4 + f32 rounded up to 16-byte alignment
        assert_eq!(std::mem::size_of::<ShaderParams>(), 32);
    }

    #[test]
    fn test_pulsing_green() {
        let p = ShaderParams::at(ShaderExercise::PulsingUniform, 0.0);
        assert_eq!(p.color, [0.0, 0.5, 0.0, 1.0]);
        let p = ShaderParams::at(ShaderExercise::PulsingUniform, std::f32::consts::FRAC_PI_2);
        assert!((p.color[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_offset_only_for_offset_exercise() {
        assert_eq!(ShaderParams::at(ShaderExercise::Offset, 1.0).x_offset, 0.5);
        assert_eq!(ShaderParams::at(ShaderExercise::UpsideDown, 1.0).x_offset, 0.0);
    }

    #[test]
    fn test_headers_in_order() {
        let headers: Vec<_> = ShaderExercise::ALL.iter().map(|e| e.header()).collect();
        assert_eq!(headers[0], "3a. Shaders");
        assert_eq!(headers[4], "3e. Shaders Ex4");
    }

    #[test]
    fn test_update_tracks_time() {
        let mut slide = ShadersSlide::new(&SlideSettings::default(), ShaderExercise::PulsingUniform);
        slide.update(&FrameTime::at(std::f32::consts::PI * 1.5, 0.016));
        assert!(slide.params().color[1].abs() < 1e-6);
    }
}
