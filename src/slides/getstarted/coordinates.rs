//! Ten spinning cubes, first from a fixed view, then through a fly camera

use bytemuck::{Pod, Zeroable};
use learngfx_core::{FrameTime, Slide, SlideBase, SlideError};
use learngfx_input::SketchEvent;
use learngfx_math::{mat4, radians, Mat4, Vec3};
use learngfx_render::{
    load_shader, FrameTarget, Mesh, PipelineBuilder, RenderContext, TextureOptions, UniformBuffer,
    VertexLayout,
};

use crate::slides::common::{CameraRig, TexturePair, CUBE_POSITIONS, CUBE_TEXTURED};
use crate::slides::SlideSettings;

const SHADER: &str = "coordinates.wgsl";
const CUBE_COUNT: usize = CUBE_POSITIONS.len();

/// Matches `Scene` in coordinates.wgsl
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct CubeScene {
    pub view: Mat4,
    pub projection: Mat4,
    pub models: [Mat4; CUBE_COUNT],
}

impl Default for CubeScene {
    fn default() -> Self {
        Self {
            view: mat4::IDENTITY,
            projection: mat4::IDENTITY,
            models: [mat4::IDENTITY; CUBE_COUNT],
        }
    }
}

/// Model matrices at `elapsed` seconds; cube `i` spins at `i + 1` rad/s
pub fn cube_models(elapsed: f32) -> [Mat4; CUBE_COUNT] {
    let axis = Vec3::new(1.0, 0.3, 0.5);
    let mut models = [mat4::IDENTITY; CUBE_COUNT];
    for (i, (model, position)) in models.iter_mut().zip(CUBE_POSITIONS).enumerate() {
        let angle = elapsed * (i + 1) as f32;
        *model = mat4::mul(mat4::translation(position), mat4::rotation(angle, axis));
    }
    models
}

/// Pipeline, cube mesh and textures shared by both cube slides
struct CubesGpu {
    pipeline: wgpu::RenderPipeline,
    mesh: Mesh,
    textures: TexturePair,
    scene: UniformBuffer<CubeScene>,
}

impl CubesGpu {
    fn new(gpu: &RenderContext, settings: &SlideSettings, label: &str) -> Result<Self, SlideError> {
        let textures = TexturePair::load(
            gpu,
            &settings.textures,
            TextureOptions::default(),
            TextureOptions::default(),
        )?;
        let shader = load_shader(&gpu.device, label, &settings.shader(SHADER))?;
        let layout = VertexLayout::new(5).attribute(0, 3, 0).attribute(1, 2, 3);
        let scene = UniformBuffer::new(&gpu.device, "Cube Scene", &CubeScene::default());

        let pipeline = PipelineBuilder::new(label, &shader)
            .with_vertex_layout(layout.buffer_layout())
            .with_bind_group_layout(scene.layout())
            .with_bind_group_layout(&textures.layout)
            .with_depth_test(true)
            .build(&gpu.device, gpu.surface_format());

        Ok(Self {
            pipeline,
            mesh: Mesh::new(&gpu.device, "Cube", &CUBE_TEXTURED, &layout, None),
            textures,
            scene,
        })
    }

    fn draw(&self, gpu: &RenderContext, frame: &mut FrameTarget, base: &SlideBase, scene: &CubeScene) {
        self.scene.write(&gpu.queue, scene);

        let mut pass = frame.begin_pass(&base.header, Some(base.color));
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, self.scene.bind_group(), &[]);
        pass.set_bind_group(1, &self.textures.bind_group, &[]);
        self.mesh.draw_instances(&mut pass, 0..CUBE_COUNT as u32);
    }
}

// --- 6 ---

/// The cubes seen from a fixed point three units back
pub struct CoordinateSystems {
    base: SlideBase,
    settings: SlideSettings,
    models: [Mat4; CUBE_COUNT],
    gpu: Option<CubesGpu>,
}

impl CoordinateSystems {
    pub fn new(settings: &SlideSettings) -> Self {
        Self {
            base: SlideBase::new("6. Coordinate Systems")
                .with_sub_header("model, view and projection matrices"),
            settings: settings.clone(),
            models: cube_models(0.0),
            gpu: None,
        }
    }
}

impl Slide for CoordinateSystems {
    type Gpu = RenderContext;
    type Frame = FrameTarget;

    fn base(&self) -> &SlideBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SlideBase {
        &mut self.base
    }

    fn init(&mut self, gpu: &RenderContext) -> Result<(), SlideError> {
        self.gpu = Some(CubesGpu::new(gpu, &self.settings, "Coordinate Systems")?);
        Ok(())
    }

    fn update(&mut self, time: &FrameTime) {
        self.models = cube_models(time.elapsed);
    }

    fn draw(&mut self, gpu: &RenderContext, frame: &mut FrameTarget) {
        let Some(cubes) = &self.gpu else {
            frame.clear(self.base.color);
            return;
        };
        let camera = &self.settings.camera;
        let scene = CubeScene {
            view: mat4::translation(Vec3::new(0.0, 0.0, -3.0)),
            projection: mat4::perspective(radians(camera.fov), frame.aspect_ratio(), camera.near, camera.far),
            models: self.models,
        };
        cubes.draw(gpu, frame, &self.base, &scene);
    }

    fn close(&mut self) {
        self.gpu = None;
    }
}

// --- 7 ---

/// The same cubes explored with WASD and the mouse
pub struct CameraSlide {
    base: SlideBase,
    settings: SlideSettings,
    rig: CameraRig,
    models: [Mat4; CUBE_COUNT],
    gpu: Option<CubesGpu>,
}

impl CameraSlide {
    pub fn new(settings: &SlideSettings) -> Self {
        Self {
            base: SlideBase::new("7. Camera")
                .with_sub_header("WASD to move, click to capture the mouse, scroll to zoom, R to reset"),
            settings: settings.clone(),
            rig: settings.camera_rig(),
            models: cube_models(0.0),
            gpu: None,
        }
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }
}

impl Slide for CameraSlide {
    type Gpu = RenderContext;
    type Frame = FrameTarget;

    fn base(&self) -> &SlideBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SlideBase {
        &mut self.base
    }

    fn init(&mut self, gpu: &RenderContext) -> Result<(), SlideError> {
        self.gpu = Some(CubesGpu::new(gpu, &self.settings, "Camera")?);
        Ok(())
    }

    fn update(&mut self, time: &FrameTime) {
        self.rig.update(time.dt);
        self.models = cube_models(time.elapsed);
    }

    fn draw(&mut self, gpu: &RenderContext, frame: &mut FrameTarget) {
        let Some(cubes) = &self.gpu else {
            frame.clear(self.base.color);
            return;
        };
        let scene = CubeScene {
            view: self.rig.view(),
            projection: self.rig.projection(frame.aspect_ratio()),
            models: self.models,
        };
        cubes.draw(gpu, frame, &self.base, &scene);
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
    use winit::keyboard::KeyCode;

    #[test]
    fn test_scene_size() {
        // view + projection + ten models
        assert_eq!(std::mem::size_of::<CubeScene>(), 12 * 64);
    }

    #[test]
    fn test_cube_models_at_start() {
        let models = cube_models(0.0);
        for (model, position) in models.iter().zip(CUBE_POSITIONS) {
            assert_eq!(mat4::transform_point(*model, Vec3::ZERO), position);
        }
    }

    #[test]
    fn test_cubes_spin_at_different_rates() {
        let models = cube_models(0.5);
        let corner = Vec3::new(0.5, 0.5, 0.5);
        let first = mat4::transform_point(models[0], corner) - CUBE_POSITIONS[0];
        let second = mat4::transform_point(models[1], corner) - CUBE_POSITIONS[1];
        assert!((first - second).length() > 1e-3);
    }

    #[test]
    fn test_camera_slide_moves_with_keys() {
        let mut slide = CameraSlide::new(&SlideSettings::default());
        assert!(slide.is_sketch());
        assert!(slide.handle_event(&SketchEvent::pressed(KeyCode::KeyW)));
        slide.update(&FrameTime::at(0.5, 0.5));
        assert!(slide.rig().camera.position.z < 3.0);
    }

    #[test]
    fn test_leaving_camera_slide_stops_movement() {
        let mut slide = CameraSlide::new(&SlideSettings::default());
        slide.handle_event(&SketchEvent::pressed(KeyCode::KeyD));
        slide.on_exit();
        let before = slide.rig().camera.position;
        slide.update(&FrameTime::at(1.0, 0.5));
        assert_eq!(slide.rig().camera.position, before);
    }
}
