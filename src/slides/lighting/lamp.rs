//! Cube mesh, lamp and camera shared by the lighting slides

use learngfx_core::SlideError;
use learngfx_math::{mat4, Mat4, Vec3};
use learngfx_render::uniforms::Transforms;
use learngfx_render::{
    load_shader, FrameTarget, Mesh, PipelineBuilder, RenderContext, UniformBuffer, VertexLayout,
};

use crate::slides::common::{CameraRig, CUBE_NORMALS};
use crate::slides::SlideSettings;

const LAMP_SHADER: &str = "lamp.wgsl";

/// Where the light sits unless a slide moves it
pub const LIGHT_POS: Vec3 = Vec3::new(1.2, 1.0, 2.0);

/// Axis the lit container spins around
pub const SPIN_AXIS: Vec3 = Vec3::new(1.0, 0.3, 0.5);

/// Position and normal, six floats per vertex
pub fn normal_cube_layout() -> VertexLayout {
    VertexLayout::new(6).attribute(0, 3, 0).attribute(1, 3, 3)
}

/// A small cube at `position`
pub fn lamp_model(position: Vec3) -> Mat4 {
    mat4::mul(mat4::translation(position), mat4::scaling(Vec3::splat(0.2)))
}

/// The cube mesh plus a white lamp pipeline drawing it
pub struct LightingRig {
    pub cube: Mesh,
    lamp_pipeline: wgpu::RenderPipeline,
    lamp_transforms: UniformBuffer<Transforms>,
}

impl LightingRig {
    pub fn new(gpu: &RenderContext, settings: &SlideSettings) -> Result<Self, SlideError> {
        let layout = normal_cube_layout();
        let shader = load_shader(&gpu.device, "Lamp", &settings.shader(LAMP_SHADER))?;
        let lamp_transforms = UniformBuffer::new(&gpu.device, "Lamp Transforms", &Transforms::default());

        // Only the position attribute is read; the stride still skips the normal
        let position_only = VertexLayout::new(6).attribute(0, 3, 0);
        let lamp_pipeline = PipelineBuilder::new("Lamp", &shader)
            .with_vertex_layout(position_only.buffer_layout())
            .with_bind_group_layout(lamp_transforms.layout())
            .with_depth_test(true)
            .build(&gpu.device, gpu.surface_format());

        Ok(Self {
            cube: Mesh::new(&gpu.device, "Lit Cube", &CUBE_NORMALS, &layout, None),
            lamp_pipeline,
            lamp_transforms,
        })
    }

    /// Upload the lamp transforms for this frame
    pub fn write_lamp(&self, gpu: &RenderContext, rig: &CameraRig, frame: &FrameTarget, light_pos: Vec3) {
        let transforms = Transforms {
            model: lamp_model(light_pos),
            view: rig.view(),
            projection: rig.projection(frame.aspect_ratio()),
        };
        self.lamp_transforms.write(&gpu.queue, &transforms);
    }

    pub fn draw_lamp(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.lamp_pipeline);
        pass.set_bind_group(0, self.lamp_transforms.bind_group(), &[]);
        self.cube.draw(pass);
    }
}
