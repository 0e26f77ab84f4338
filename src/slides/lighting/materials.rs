use bytemuck::{Pod, Zeroable};
use learngfx_core::{FrameTime, Slide, SlideBase, SlideError};
use learngfx_input::SketchEvent;
use learngfx_math::{mat4, Mat4, Vec3};
use learngfx_render::uniforms::{vec3_padded, LitTransforms};
use learngfx_render::{load_shader, FrameTarget, PipelineBuilder, RenderContext, UniformBuffer};

use super::colors::OBJECT_COLOR;
use super::lamp::{normal_cube_layout, LightingRig, LIGHT_POS, SPIN_AXIS};
use crate::slides::common::CameraRig;
use crate::slides::SlideSettings;

const SHADER: &str = "materials.wgsl";

/// Matches `Material` in materials.wgsl
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MaterialUniform {
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    /// `vec3` followed directly by `shininess`
    pub specular: [f32; 3],
    pub shininess: f32,
}

impl MaterialUniform {
    /// Orange plastic-ish container
    pub fn container() -> Self {
        Self {
            ambient: vec3_padded(OBJECT_COLOR),
            diffuse: vec3_padded(OBJECT_COLOR),
            specular: [0.5, 0.5, 0.5],
            shininess: 32.0,
        }
    }
}

/// Matches `Light` in materials.wgsl
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct LightUniform {
    pub position: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
}

impl LightUniform {
    /// Light whose color cycles over time; diffuse is half of it and
    /// ambient a fifth of that
    pub fn at(elapsed: f32) -> Self {
        let color = Vec3::new((elapsed * 2.0).sin(), (elapsed * 0.7).sin(), (elapsed * 1.3).sin());
        let diffuse = color * 0.5;
        let ambient = diffuse * 0.2;
        Self {
            position: vec3_padded(LIGHT_POS),
            ambient: vec3_padded(ambient),
            diffuse: vec3_padded(diffuse),
            specular: vec3_padded(Vec3::ONE),
        }
    }
}

/// Matches `Params` in materials.wgsl
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MaterialParams {
    pub transforms: LitTransforms,
    pub view_pos: [f32; 4],
    pub material: MaterialUniform,
    pub light: LightUniform,
}

struct MaterialsGpu {
    lighting: LightingRig,
    pipeline: wgpu::RenderPipeline,
    params: UniformBuffer<MaterialParams>,
}

/// Material and light properties as uniform structs
pub struct Materials {
    base: SlideBase,
    settings: SlideSettings,
    rig: CameraRig,
    model: Mat4,
    light: LightUniform,
    gpu: Option<MaterialsGpu>,
}

impl Materials {
    pub fn new(settings: &SlideSettings) -> Self {
        Self {
            base: SlideBase::new("3. Materials").with_sub_header("light color changing over time"),
            settings: settings.clone(),
            rig: settings.camera_rig(),
            model: mat4::IDENTITY,
            light: LightUniform::at(0.0),
            gpu: None,
        }
    }
}

impl Slide for Materials {
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
        let shader = load_shader(&gpu.device, "Materials", &self.settings.shader(SHADER))?;
        let params = UniformBuffer::new(&gpu.device, "Material Params", &MaterialParams::zeroed());
        let layout = normal_cube_layout();

        let pipeline = PipelineBuilder::new("Materials", &shader)
            .with_vertex_layout(layout.buffer_layout())
            .with_bind_group_layout(params.layout())
            .with_depth_test(true)
            .build(&gpu.device, gpu.surface_format());

        self.gpu = Some(MaterialsGpu {
            lighting,
            pipeline,
            params,
        });
        Ok(())
    }

    fn update(&mut self, time: &FrameTime) {
        self.rig.update(time.dt);
        self.model = mat4::rotation(time.elapsed, SPIN_AXIS);
        self.light = LightUniform::at(time.elapsed);
    }

    fn draw(&mut self, gpu: &RenderContext, frame: &mut FrameTarget) {
        let Some(res) = &self.gpu else {
            frame.clear(self.base.color);
            return;
        };
        let transforms = LitTransforms::new(
            self.model,
            self.rig.view(),
            self.rig.projection(frame.aspect_ratio()),
        );
        res.params.write(
            &gpu.queue,
            &MaterialParams {
                transforms,
                view_pos: vec3_padded(self.rig.camera.position),
                material: MaterialUniform::container(),
                light: self.light,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_sizes() {
        assert_eq!(std::mem::size_of::<MaterialUniform>(), 48);
        assert_eq!(std::mem::size_of::<LightUniform>(), 64);
        // 256 (matrices) + 16 (view_pos) + 48 + 64
        assert_eq!(std::mem::size_of::<MaterialParams>(), 384);
    }

    #[test]
    fn test_light_color_derivation() {
        let t = 0.4;
        let light = LightUniform::at(t);
        let red = (t * 2.0).sin();
        assert!((light.diffuse[0] - red * 0.5).abs() < 1e-6);
        assert!((light.ambient[0] - red * 0.1).abs() < 1e-6);
        assert_eq!(light.specular, [1.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_light_is_dark_at_start() {
        let light = LightUniform::at(0.0);
        assert_eq!(light.diffuse, [0.0, 0.0, 0.0, 0.0]);
    }
}
