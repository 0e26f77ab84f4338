//! Free-look FPS camera
//!
//! Orientation is kept as yaw and pitch in degrees; the front, right and up
//! vectors are re-derived whenever either changes. Zoom is the vertical field
//! of view used by [`FlyCamera::projection_matrix`].

use learngfx_input::{CameraControl, CameraDirection};
use learngfx_math::{mat4, radians, Mat4, Vec3};

pub const YAW: f32 = -90.0;
pub const PITCH: f32 = 0.0;
pub const SPEED: f32 = 3.0;
pub const SENSITIVITY: f32 = 0.25;
pub const ZOOM: f32 = 45.0;

/// Zoom limits in degrees
pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 45.0;

/// FPS-style camera
#[derive(Debug, Clone, PartialEq)]
pub struct FlyCamera {
    pub position: Vec3,
    pub front: Vec3,
    pub up: Vec3,
    pub right: Vec3,
    pub world_up: Vec3,
    /// Degrees, -90 looks down -Z
    pub yaw: f32,
    /// Degrees
    pub pitch: f32,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    /// Vertical field of view in degrees
    pub zoom: f32,
    pub pitch_limit: f32,
    start: StartPose,
}

/// Where [`FlyCamera::reset`] goes back to
#[derive(Debug, Clone, Copy, PartialEq)]
struct StartPose {
    position: Vec3,
    yaw: f32,
    pitch: f32,
    zoom: f32,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 3.0), Vec3::Y, YAW, PITCH)
    }
}

impl FlyCamera {
    pub fn new(position: Vec3, world_up: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            front: Vec3::new(0.0, 0.0, -1.0),
            up: world_up,
            right: Vec3::X,
            world_up,
            yaw,
            pitch,
            movement_speed: SPEED,
            mouse_sensitivity: SENSITIVITY,
            zoom: ZOOM,
            pitch_limit: 89.0,
            start: StartPose {
                position,
                yaw,
                pitch,
                zoom: ZOOM,
            },
        };
        camera.update_vectors();
        camera
    }

    /// Builder: movement speed in units per second
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.movement_speed = speed;
        self
    }

    /// Builder: degrees per unit of mouse offset
    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.mouse_sensitivity = sensitivity;
        self
    }

    /// Builder: initial field of view in degrees, also restored by `reset`
    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.start.zoom = self.zoom;
        self
    }

    /// Builder: maximum absolute pitch in degrees
    pub fn with_pitch_limit(mut self, limit: f32) -> Self {
        self.pitch_limit = limit;
        self
    }

    /// View matrix looking along `front`
    pub fn view_matrix(&self) -> Mat4 {
        mat4::look_at(self.position, self.position + self.front, self.up)
    }

    /// Perspective projection with `zoom` as the vertical field of view
    pub fn projection_matrix(&self, aspect: f32, near: f32, far: f32) -> Mat4 {
        mat4::perspective(radians(self.zoom), aspect, near, far)
    }

    /// Back to the starting position, orientation and zoom
    pub fn reset(&mut self) {
        let StartPose { position, yaw, pitch, zoom } = self.start;
        self.position = position;
        self.yaw = yaw;
        self.pitch = pitch;
        self.zoom = zoom;
        self.update_vectors();
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (radians(self.yaw), radians(self.pitch));
        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalized();
        self.right = self.front.cross(self.world_up).normalized();
        self.up = self.right.cross(self.front).normalized();
    }
}

impl CameraControl for FlyCamera {
    fn process_keyboard(&mut self, direction: CameraDirection, dt: f32) {
        let velocity = self.movement_speed * dt;
        match direction {
            CameraDirection::Forward => self.position += self.front * velocity,
            CameraDirection::Backward => self.position -= self.front * velocity,
            CameraDirection::Left => self.position -= self.right * velocity,
            CameraDirection::Right => self.position += self.right * velocity,
        }
    }

    fn process_mouse_movement(&mut self, x_offset: f32, y_offset: f32, constrain_pitch: bool) {
        self.yaw += x_offset * self.mouse_sensitivity;
        self.pitch += y_offset * self.mouse_sensitivity;

        if constrain_pitch {
            self.pitch = self.pitch.clamp(-self.pitch_limit, self.pitch_limit);
        }

        self.update_vectors();
    }

    fn process_mouse_scroll(&mut self, y_offset: f32) {
        self.zoom = (self.zoom - y_offset).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    fn position(&self) -> Vec3 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPSILON
    }

    #[test]
    fn test_default_looks_down_negative_z() {
        let camera = FlyCamera::default();
        assert!(vec_approx_eq(camera.front, Vec3::new(0.0, 0.0, -1.0)), "front {:?}", camera.front);
        assert!(vec_approx_eq(camera.right, Vec3::X));
        assert!(vec_approx_eq(camera.up, Vec3::Y));
        assert_eq!(camera.zoom, 45.0);
    }

    #[test]
    fn test_default_view_is_translation() {
        let camera = FlyCamera::default();
        let view = camera.view_matrix();
        let expected = mat4::translation(Vec3::new(0.0, 0.0, -3.0));
        for c in 0..4 {
            for r in 0..4 {
                assert!((view[c][r] - expected[c][r]).abs() < EPSILON);
            }
        }
    }

    #[test]
    fn test_keyboard_moves_at_speed() {
        let mut camera = FlyCamera::default();
        camera.process_keyboard(CameraDirection::Forward, 0.5);
        // speed 3.0 * 0.5s along -Z
        assert!(vec_approx_eq(camera.position, Vec3::new(0.0, 0.0, 1.5)));

        camera.process_keyboard(CameraDirection::Right, 1.0);
        assert!(vec_approx_eq(camera.position, Vec3::new(3.0, 0.0, 1.5)));

        camera.process_keyboard(CameraDirection::Left, 1.0);
        camera.process_keyboard(CameraDirection::Backward, 0.5);
        assert!(vec_approx_eq(camera.position, Vec3::new(0.0, 0.0, 3.0)));
    }

    #[test]
    fn test_mouse_updates_front() {
        let mut camera = FlyCamera::default();
        // 360 * 0.25 = 90 degrees of yaw: -90 -> 0 looks down +X
        camera.process_mouse_movement(360.0, 0.0, true);
        assert!((camera.yaw - 0.0).abs() < EPSILON);
        assert!(vec_approx_eq(camera.front, Vec3::X), "front {:?}", camera.front);
        assert!(vec_approx_eq(camera.right, Vec3::Z));
    }

    #[test]
    fn test_pitch_constrained() {
        let mut camera = FlyCamera::default();
        camera.process_mouse_movement(0.0, 1000.0, true);
        assert_eq!(camera.pitch, 89.0);
        camera.process_mouse_movement(0.0, -2000.0, true);
        assert_eq!(camera.pitch, -89.0);
        // Looking nearly straight down keeps a valid basis
        assert!((camera.up.length() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_pitch_unconstrained() {
        let mut camera = FlyCamera::default();
        camera.process_mouse_movement(0.0, 400.0, false);
        assert_eq!(camera.pitch, 100.0);
    }

    #[test]
    fn test_scroll_zoom_clamped() {
        let mut camera = FlyCamera::default();
        camera.process_mouse_scroll(10.0);
        assert_eq!(camera.zoom, 35.0);
        camera.process_mouse_scroll(100.0);
        assert_eq!(camera.zoom, MIN_ZOOM);
        camera.process_mouse_scroll(-100.0);
        assert_eq!(camera.zoom, MAX_ZOOM);
    }

    #[test]
    fn test_reset() {
        let mut camera = FlyCamera::default();
        camera.process_keyboard(CameraDirection::Forward, 1.0);
        camera.process_mouse_movement(100.0, 50.0, true);
        camera.process_mouse_scroll(5.0);
        camera.reset();
        assert_eq!(camera, FlyCamera::default());
    }

    #[test]
    fn test_reset_restores_configured_zoom() {
        let mut camera = FlyCamera::default().with_zoom(30.0);
        camera.process_mouse_scroll(-10.0);
        assert_eq!(camera.zoom, 40.0);
        camera.reset();
        assert_eq!(camera.zoom, 30.0);
    }

    #[test]
    fn test_builders() {
        let camera = FlyCamera::default()
            .with_speed(5.0)
            .with_sensitivity(0.1)
            .with_zoom(90.0)
            .with_pitch_limit(45.0);
        assert_eq!(camera.movement_speed, 5.0);
        assert_eq!(camera.mouse_sensitivity, 0.1);
        assert_eq!(camera.zoom, MAX_ZOOM);
        assert_eq!(camera.pitch_limit, 45.0);
    }
}
