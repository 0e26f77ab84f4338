use bytemuck::{Pod, Zeroable};
use learngfx_core::{FrameTime, Slide, SlideBase, SlideError};
use learngfx_input::SketchEvent;
use learngfx_math::{mat4, Mat4, Vec3};
use learngfx_render::uniforms::vec3_padded;
use learngfx_render::{load_shader, FrameTarget, PipelineBuilder, RenderContext, UniformBuffer};

use super::lamp::{normal_cube_layout, LightingRig, LIGHT_POS, SPIN_AXIS};
use crate::slides::common::CameraRig;
use crate::slides::SlideSettings;

const SHADER: &str = "colors.wgsl";

pub const OBJECT_COLOR: Vec3 = Vec3::new(1.0, 0.5, 0.31);
pub const LIGHT_COLOR: Vec3 = Vec3::new(1.0, 0.5, 1.0);

/// Matches `Params` in colors.wgsl
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ColorsParams {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    pub object_color: [f32; 4],
    pub light_color: [f32; 4],
}

struct ColorsGpu {
    lighting: LightingRig,
    pipeline: wgpu::RenderPipeline,
    params: UniformBuffer<ColorsParams>,
}

/// An object reflecting the part of the light's color it doesn't absorb
pub struct Colors {
    base: SlideBase,
    settings: SlideSettings,
    rig: CameraRig,
    model: Mat4,
    gpu: Option<ColorsGpu>,
}

impl Colors {
    pub fn new(settings: &SlideSettings) -> Self {
        Self {
            base: SlideBase::new("1. Colors").with_sub_header("object color times light color"),
            settings: settings.clone(),
            rig: settings.camera_rig(),
            model: mat4::IDENTITY,
            gpu: None,
        }
    }
}

impl Slide for Colors {
    type Gpu = RenderContext;
    type Frame = FrameTarget;

    fn base(&self) -> &SlideBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SlideBase {
        &mut self.base
    }

    fn init(&mut self, gpu: &RenderContext) -> Result<(), SlideError> {
        let lighting = LightingRig::new(gpu, &self.settings)?;
        let shader = load_shader(&gpu.device, "Colors", &self.settings.shader(SHADER))?;
        let params = UniformBuffer::new(&gpu.device, "Colors Params", &ColorsParams::zeroed());
        let layout = normal_cube_layout();

        let pipeline = PipelineBuilder::new("Colors", &shader)
            .with_vertex_layout(layout.buffer_layout())
            .with_bind_group_layout(params.layout())
            .with_depth_test(true)
            .build(&gpu.device, gpu.surface_format());

        self.gpu = Some(ColorsGpu {
            lighting,
            pipeline,
            params,
        });
        Ok(())
    }

    fn update(&mut self, time: &FrameTime) {
        self.rig.update(time.dt);
        self.model = mat4::rotation(time.elapsed, SPIN_AXIS);
    }

    fn draw(&mut self, gpu: &RenderContext, frame: &mut FrameTarget) {
        let Some(res) = &self.gpu else {
            frame.clear(self.base.color);
            return;
        };
        res.params.write(
            &gpu.queue,
            &ColorsParams {
                model: self.model,
                view: self.rig.view(),
                projection: self.rig.projection(frame.aspect_ratio()),
                object_color: vec3_padded(OBJECT_COLOR),
                light_color: vec3_padded(LIGHT_COLOR),
            },
        );
        res.lighting.write_lamp(gpu, &self.rig, frame, LIGHT_POS);

        let mut pass = frame.begin_pass(&self.base.header, Some(self.base.color));
        pass.set_pipeline(&res.pipeline);
        pass.set_bind_group(0, res.params.bind_group(), &[]);
        res.lighting.cube.draw(&mut pass);
        res.lighting.draw_lamp(&mut pass);
    }

    fn close(&mut self) {
        self.gpu = None;
    }

    fn handle_event(&mut self, event: &SketchEvent) -> bool {
        self.rig.handle_event(event)
    }

    fn is_sketch(&self) -> bool {
        true
    }

    fn on_exit(&mut self) {
        self.rig.release();
    }
}
