//! Geometry and helpers shared by several slides

use std::path::Path;

use learngfx_core::SlideError;
use learngfx_input::{CameraController, SketchEvent};
use learngfx_math::{Mat4, Vec3};
use learngfx_render::camera::{PITCH, YAW};
use learngfx_render::texture::{texture_bind_group, texture_bind_group_layout};
use learngfx_render::{FlyCamera, RenderContext, Texture, TextureOptions};
use winit::keyboard::KeyCode;

use crate::config::{CameraConfig, InputConfig};

pub const CONTAINER_TEXTURE: &str = "container.png";
pub const FACE_TEXTURE: &str = "awesomeface.png";

/// Positions of a single triangle
pub const TRIANGLE: [f32; 9] = [
    -0.5, -0.5, 0.0, //
    0.5, -0.5, 0.0, //
    0.0, 0.5, 0.0,
];

/// Quad corners: top right, bottom right, bottom left, top left
pub const QUAD: [f32; 12] = [
    0.5, 0.5, 0.0, //
    0.5, -0.5, 0.0, //
    -0.5, -0.5, 0.0, //
    -0.5, 0.5, 0.0,
];

pub const QUAD_INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

/// Quad with position, color and texture coordinates spanning `min..max`
pub fn textured_quad(min: f32, max: f32) -> Vec<f32> {
    #[rustfmt::skip]
    let vertices = vec![
        // positions        // colors         // uv
         0.5,  0.5, 0.0,    1.0, 0.0, 0.0,    max, max,
         0.5, -0.5, 0.0,    0.0, 1.0, 0.0,    max, min,
        -0.5, -0.5, 0.0,    0.0, 0.0, 1.0,    min, min,
        -0.5,  0.5, 0.0,    1.0, 1.0, 0.0,    min, max,
    ];
    vertices
}

/// 36 cube vertices with position and texture coordinates
#[rustfmt::skip]
pub const CUBE_TEXTURED: [f32; 180] = [
    -0.5, -0.5, -0.5,  0.0, 0.0,
     0.5, -0.5, -0.5,  1.0, 0.0,
     0.5,  0.5, -0.5,  1.0, 1.0,
     0.5,  0.5, -0.5,  1.0, 1.0,
    -0.5,  0.5, -0.5,  0.0, 1.0,
    -0.5, -0.5, -0.5,  0.0, 0.0,

    -0.5, -0.5,  0.5,  0.0, 0.0,
     0.5, -0.5,  0.5,  1.0, 0.0,
     0.5,  0.5,  0.5,  1.0, 1.0,
     0.5,  0.5,  0.5,  1.0, 1.0,
    -0.5,  0.5,  0.5,  0.0, 1.0,
    -0.5, -0.5,  0.5,  0.0, 0.0,

    -0.5,  0.5,  0.5,  1.0, 0.0,
    -0.5,  0.5, -0.5,  1.0, 1.0,
    -0.5, -0.5, -0.5,  0.0, 1.0,
    -0.5, -0.5, -0.5,  0.0, 1.0,
    -0.5, -0.5,  0.5,  0.0, 0.0,
    -0.5,  0.5,  0.5,  1.0, 0.0,

     0.5,  0.5,  0.5,  1.0, 0.0,
     0.5,  0.5, -0.5,  1.0, 1.0,
     0.5, -0.5, -0.5,  0.0, 1.0,
     0.5, -0.5, -0.5,  0.0, 1.0,
     0.5, -0.5,  0.5,  0.0, 0.0,
     0.5,  0.5,  0.5,  1.0, 0.0,

    -0.5, -0.5, -0.5,  0.0, 1.0,
     0.5, -0.5, -0.5,  1.0, 1.0,
     0.5, -0.5,  0.5,  1.0, 0.0,
     0.5, -0.5,  0.5,  1.0, 0.0,
    -0.5, -0.5,  0.5,  0.0, 0.0,
    -0.5, -0.5, -0.5,  0.0, 1.0,

    -0.5,  0.5, -0.5,  0.0, 1.0,
     0.5,  0.5, -0.5,  1.0, 1.0,
     0.5,  0.5,  0.5,  1.0, 0.0,
     0.5,  0.5,  0.5,  1.0, 0.0,
    -0.5,  0.5,  0.5,  0.0, 0.0,
    -0.5,  0.5, -0.5,  0.0, 1.0,
];

/// 36 cube vertices with position and face normal
#[rustfmt::skip]
pub const CUBE_NORMALS: [f32; 216] = [
    -0.5, -0.5, -0.5,  0.0,  0.0, -1.0,
     0.5, -0.5, -0.5,  0.0,  0.0, -1.0,
     0.5,  0.5, -0.5,  0.0,  0.0, -1.0,
     0.5,  0.5, -0.5,  0.0,  0.0, -1.0,
    -0.5,  0.5, -0.5,  0.0,  0.0, -1.0,
    -0.5, -0.5, -0.5,  0.0,  0.0, -1.0,

    -0.5, -0.5,  0.5,  0.0,  0.0,  1.0,
     0.5, -0.5,  0.5,  0.0,  0.0,  1.0,
     0.5,  0.5,  0.5,  0.0,  0.0,  1.0,
     0.5,  0.5,  0.5,  0.0,  0.0,  1.0,
    -0.5,  0.5,  0.5,  0.0,  0.0,  1.0,
    -0.5, -0.5,  0.5,  0.0,  0.0,  1.0,

    -0.5,  0.5,  0.5, -1.0,  0.0,  0.0,
    -0.5,  0.5, -0.5, -1.0,  0.0,  0.0,
    -0.5, -0.5, -0.5, -1.0,  0.0,  0.0,
    -0.5, -0.5, -0.5, -1.0,  0.0,  0.0,
    -0.5, -0.5,  0.5, -1.0,  0.0,  0.0,
    -0.5,  0.5,  0.5, -1.0,  0.0,  0.0,

     0.5,  0.5,  0.5,  1.0,  0.0,  0.0,
     0.5,  0.5, -0.5,  1.0,  0.0,  0.0,
     0.5, -0.5, -0.5,  1.0,  0.0,  0.0,
     0.5, -0.5, -0.5,  1.0,  0.0,  0.0,
     0.5, -0.5,  0.5,  1.0,  0.0,  0.0,
     0.5,  0.5,  0.5,  1.0,  0.0,  0.0,

    -0.5, -0.5, -0.5,  0.0, -1.0,  0.0,
     0.5, -0.5, -0.5,  0.0, -1.0,  0.0,
     0.5, -0.5,  0.5,  0.0, -1.0,  0.0,
     0.5, -0.5,  0.5,  0.0, -1.0,  0.0,
    -0.5, -0.5,  0.5,  0.0, -1.0,  0.0,
    -0.5, -0.5, -0.5,  0.0, -1.0,  0.0,

    -0.5,  0.5, -0.5,  0.0,  1.0,  0.0,
     0.5,  0.5, -0.5,  0.0,  1.0,  0.0,
     0.5,  0.5,  0.5,  0.0,  1.0,  0.0,
     0.5,  0.5,  0.5,  0.0,  1.0,  0.0,
    -0.5,  0.5,  0.5,  0.0,  1.0,  0.0,
    -0.5,  0.5, -0.5,  0.0,  1.0,  0.0,
];

/// World positions of the ten cubes in the coordinate and camera slides
pub const CUBE_POSITIONS: [Vec3; 10] = [
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(2.0, 5.0, -15.0),
    Vec3::new(-1.5, -2.2, -2.5),
    Vec3::new(-3.8, -2.0, -12.3),
    Vec3::new(2.4, -0.4, -3.5),
    Vec3::new(-1.7, 3.0, -7.5),
    Vec3::new(1.3, -2.0, -2.5),
    Vec3::new(1.5, 2.0, -2.5),
    Vec3::new(1.5, 0.2, -1.5),
    Vec3::new(-1.3, 1.0, -1.5),
];

/// The container and face textures bound as one group
pub struct TexturePair {
    pub layout: wgpu::BindGroupLayout,
    pub bind_group: wgpu::BindGroup,
    _textures: [Texture; 2],
}

impl TexturePair {
    /// Load both images from `dir`, each with its own sampler options
    pub fn load(
        gpu: &RenderContext,
        dir: &Path,
        container: TextureOptions,
        face: TextureOptions,
    ) -> Result<Self, SlideError> {
        let container = Texture::from_file(&gpu.device, &gpu.queue, dir.join(CONTAINER_TEXTURE), container)?;
        let face = Texture::from_file(&gpu.device, &gpu.queue, dir.join(FACE_TEXTURE), face)?;

        let layout = texture_bind_group_layout(&gpu.device, "Texture Pair", 2);
        let bind_group = texture_bind_group(&gpu.device, &layout, "Texture Pair", &[&container, &face]);

        Ok(Self {
            layout,
            bind_group,
            _textures: [container, face],
        })
    }
}

/// A fly camera together with the controller that steers it
pub struct CameraRig {
    pub camera: FlyCamera,
    pub controller: CameraController,
    near: f32,
    far: f32,
}

impl CameraRig {
    pub fn new(camera: &CameraConfig, input: &InputConfig) -> Self {
        let [x, y, z] = camera.start_position;
        let fly = FlyCamera::new(Vec3::new(x, y, z), Vec3::Y, YAW, PITCH)
            .with_speed(input.move_speed)
            .with_sensitivity(input.mouse_sensitivity)
            .with_zoom(camera.fov)
            .with_pitch_limit(camera.pitch_limit);

        Self {
            camera: fly,
            controller: CameraController::new(),
            near: camera.near,
            far: camera.far,
        }
    }

    /// Feed input to the controller. `R` puts the camera back where it started.
    ///
    /// Looking around follows raw motion of the captured cursor only; a free
    /// cursor moving over the window leaves the camera alone.
    pub fn handle_event(&mut self, event: &SketchEvent) -> bool {
        match event {
            SketchEvent::CursorMoved { .. } => false,
            _ if event.key_pressed() == Some(KeyCode::KeyR) => {
                self.camera.reset();
                true
            }
            _ => self.controller.handle_event(event),
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.controller.update(&mut self.camera, dt);
    }

    pub fn view(&self) -> Mat4 {
        self.camera.view_matrix()
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        self.camera.projection_matrix(aspect, self.near, self.far)
    }

    /// Forget held keys and the last cursor position
    pub fn release(&mut self) {
        self.controller.release_all();
        self.controller.reset_mouse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_vertex_counts() {
        assert_eq!(CUBE_TEXTURED.len() / 5, 36);
        assert_eq!(CUBE_NORMALS.len() / 6, 36);
    }

    #[test]
    fn test_cube_normals_are_unit() {
        for v in CUBE_NORMALS.chunks(6) {
            let n = Vec3::new(v[3], v[4], v[5]);
            assert!((n.length() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_textured_quad_uv_range() {
        let quad = textured_quad(0.45, 0.55);
        assert_eq!(quad.len(), 32);
        // Top right, then bottom left uv
        assert_eq!(&quad[6..8], &[0.55, 0.55]);
        assert_eq!(&quad[22..24], &[0.45, 0.45]);
    }

    #[test]
    fn test_camera_rig_reset() {
        let mut rig = CameraRig::new(&CameraConfig::default(), &InputConfig::default());
        rig.camera.position = Vec3::new(10.0, 0.0, 0.0);
        assert!(rig.handle_event(&SketchEvent::pressed(KeyCode::KeyR)));
        assert_eq!(rig.camera.position, Vec3::new(0.0, 0.0, 3.0));
    }

    #[test]
    fn test_camera_rig_reset_restores_configured_fov() {
        let camera = CameraConfig { fov: 30.0, ..CameraConfig::default() };
        let mut rig = CameraRig::new(&camera, &InputConfig::default());
        rig.handle_event(&SketchEvent::Scroll { dx: 0.0, dy: 10.0 });
        rig.update(0.0);
        assert_eq!(rig.camera.zoom, 20.0);
        rig.handle_event(&SketchEvent::pressed(KeyCode::KeyR));
        assert_eq!(rig.camera.zoom, 30.0);
    }

    #[test]
    fn test_camera_rig_held_reset_acts_once() {
        let mut rig = CameraRig::new(&CameraConfig::default(), &InputConfig::default());
        assert!(rig.handle_event(&SketchEvent::pressed(KeyCode::KeyR)));
        rig.camera.position = Vec3::new(5.0, 0.0, 0.0);
        assert!(!rig.handle_event(&SketchEvent::repeated(KeyCode::KeyR)));
        assert_eq!(rig.camera.position, Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_camera_rig_moves_forward() {
        let mut rig = CameraRig::new(&CameraConfig::default(), &InputConfig::default());
        rig.handle_event(&SketchEvent::pressed(KeyCode::KeyW));
        rig.update(1.0);
        // Default yaw looks down -Z
        assert!(rig.camera.position.z < 3.0);

        rig.release();
        let before = rig.camera.position;
        rig.update(1.0);
        assert_eq!(rig.camera.position, before);
    }

    #[test]
    fn test_camera_rig_ignores_free_cursor() {
        let mut rig = CameraRig::new(&CameraConfig::default(), &InputConfig::default());
        let front = rig.camera.front;
        assert!(!rig.handle_event(&SketchEvent::CursorMoved { x: 10.0, y: 10.0 }));
        assert!(!rig.handle_event(&SketchEvent::CursorMoved { x: 400.0, y: 300.0 }));
        rig.update(0.016);
        assert_eq!(rig.camera.front, front);

        assert!(rig.handle_event(&SketchEvent::MouseMotion { dx: 40.0, dy: 0.0 }));
        rig.update(0.016);
        assert_ne!(rig.camera.front, front);
    }
}
