use bytemuck::{Pod, Zeroable};
use learngfx_core::{FrameTime, Slide, SlideBase, SlideError};
use learngfx_input::SketchEvent;
use learngfx_math::{mat4, Vec3};
use learngfx_render::uniforms::{vec3_padded, LitTransforms};
use learngfx_render::{load_shader, FrameTarget, PipelineBuilder, RenderContext, UniformBuffer};

use super::colors::{LIGHT_COLOR, OBJECT_COLOR};
use super::lamp::{normal_cube_layout, LightingRig};
use crate::slides::common::CameraRig;
use crate::slides::SlideSettings;

const SHADER: &str = "basic_lighting.wgsl";
const ORBIT_RADIUS: f32 = 2.0;
const ORBIT_HEIGHT: f32 = 1.0;

/// Matches `Params` in basic_lighting.wgsl
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct BasicLightingParams {
    pub transforms: LitTransforms,
    pub light_pos: [f32; 4],
    pub view_pos: [f32; 4],
    pub object_color: [f32; 4],
    pub light_color: [f32; 4],
}

/// Light position circling the container
pub fn orbit(elapsed: f32) -> Vec3 {
    Vec3::new(
        ORBIT_RADIUS * elapsed.sin(),
        ORBIT_HEIGHT,
        ORBIT_RADIUS * elapsed.cos(),
    )
}

struct BasicLightingGpu {
    lighting: LightingRig,
    pipeline: wgpu::RenderPipeline,
    params: UniformBuffer<BasicLightingParams>,
}

/// Phong shading with the lamp circling the container
pub struct BasicLighting {
    base: SlideBase,
    settings: SlideSettings,
    rig: CameraRig,
    light_pos: Vec3,
    gpu: Option<BasicLightingGpu>,
}

impl BasicLighting {
    pub fn new(settings: &SlideSettings) -> Self {
        Self {
            base: SlideBase::new("2. Basic Lighting")
                .with_sub_header("ambient, diffuse and specular"),
            settings: settings.clone(),
            rig: settings.camera_rig(),
            light_pos: orbit(0.0),
            gpu: None,
        }
    }

    pub fn light_pos(&self) -> Vec3 {
        self.light_pos
    }
}

impl Slide for BasicLighting {
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
        let shader = load_shader(&gpu.device, "Basic Lighting", &self.settings.shader(SHADER))?;
        let params = UniformBuffer::new(&gpu.device, "Basic Lighting Params", &BasicLightingParams::zeroed());
        let layout = normal_cube_layout();

        let pipeline = PipelineBuilder::new("Basic Lighting", &shader)
            .with_vertex_layout(layout.buffer_layout())
            .with_bind_group_layout(params.layout())
            .with_depth_test(true)
            .build(&gpu.device, gpu.surface_format());

        self.gpu = Some(BasicLightingGpu {
            lighting,
            pipeline,
            params,
        });
        Ok(())
    }

    fn update(&mut self, time: &FrameTime) {
        self.rig.update(time.dt);
        self.light_pos = orbit(time.elapsed);
    }

    fn draw(&mut self, gpu: &RenderContext, frame: &mut FrameTarget) {
        let Some(res) = &self.gpu else {
            frame.clear(self.base.color);
            return;
        };
        let transforms = LitTransforms::new(
            mat4::IDENTITY,
            self.rig.view(),
            self.rig.projection(frame.aspect_ratio()),
        );
        res.params.write(
            &gpu.queue,
            &BasicLightingParams {
                transforms,
                light_pos: vec3_padded(self.light_pos),
                view_pos: vec3_padded(self.rig.camera.position),
                object_color: vec3_padded(OBJECT_COLOR),
                light_color: vec3_padded(LIGHT_COLOR),
            },
        );
        res.lighting.write_lamp(gpu, &self.rig, frame, self.light_pos);

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_size() {
        // Four matrices and four padded vec3s
        assert_eq!(std::mem::size_of::<BasicLightingParams>(), 320);
    }

    #[test]
    fn test_orbit_keeps_radius() {
        for t in [0.0, 0.7, 2.0, 5.5] {
            let p = orbit(t);
            assert_eq!(p.y, ORBIT_HEIGHT);
            assert!(((p.x * p.x + p.z * p.z).sqrt() - ORBIT_RADIUS).abs() < 1e-5);
        }
    }

    #[test]
    fn test_update_moves_light() {
        let mut slide = BasicLighting::new(&SlideSettings::default());
        let start = slide.light_pos();
        slide.update(&FrameTime::at(1.0, 0.016));
        assert_ne!(slide.light_pos(), start);
    }
}
