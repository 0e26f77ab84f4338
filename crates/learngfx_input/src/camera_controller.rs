//! Camera controller for FPS-style free look
//!
//! Controls:
//! - W/S: Forward/backward along the view direction
//! - A/D: Strafe left/right
//! - Mouse: Yaw and pitch
//! - Scroll: Zoom (field of view)

use crate::SketchEvent;
use learngfx_math::Vec3;
use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Direction of a keyboard-driven camera move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraDirection {
    Forward,
    Backward,
    Left,
    Right,
}

/// Camera controller for handling input
///
/// Key state is tracked between frames so movement is smooth and frame-rate
/// independent; mouse and scroll input accumulate until the next
/// [`update`](Self::update).
pub struct CameraController {
    // Movement state
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,

    // Mouse state
    first_mouse: bool,
    last_x: f64,
    last_y: f64,
    pending_x: f32,
    pending_y: f32,
    pending_scroll: f32,

    // Configuration
    pub look_enabled: bool,
    pub constrain_pitch: bool,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraController {
    pub fn new() -> Self {
        Self {
            forward: false,
            backward: false,
            left: false,
            right: false,

            first_mouse: true,
            last_x: 0.0,
            last_y: 0.0,
            pending_x: 0.0,
            pending_y: 0.0,
            pending_scroll: 0.0,

            look_enabled: true,
            constrain_pitch: true,
        }
    }

    /// Process keyboard input
    ///
    /// Returns true if the key is a movement key.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) -> bool {
        let pressed = state == ElementState::Pressed;

        match key {
            KeyCode::KeyW => { self.forward = pressed; true }
            KeyCode::KeyS => { self.backward = pressed; true }
            KeyCode::KeyA => { self.left = pressed; true }
            KeyCode::KeyD => { self.right = pressed; true }
            _ => false,
        }
    }

    /// Process an absolute cursor position
    ///
    /// The first sample only seeds the last position so the camera doesn't
    /// jump when the cursor enters the window. Y is reversed since window
    /// coordinates grow downwards.
    pub fn process_cursor_position(&mut self, x: f64, y: f64) {
        if self.first_mouse {
            self.last_x = x;
            self.last_y = y;
            self.first_mouse = false;
        }

        self.pending_x += (x - self.last_x) as f32;
        self.pending_y += (self.last_y - y) as f32;

        self.last_x = x;
        self.last_y = y;
    }

    /// Process raw mouse motion (captured cursor)
    pub fn process_mouse_motion(&mut self, delta_x: f64, delta_y: f64) {
        self.pending_x += delta_x as f32;
        self.pending_y -= delta_y as f32;
    }

    /// Process vertical scroll, in lines
    pub fn process_scroll(&mut self, delta_y: f32) {
        self.pending_scroll += delta_y;
    }

    /// Route a slide input event to the matching handler
    ///
    /// Returns true if the event was used by the controller.
    pub fn handle_event(&mut self, event: &SketchEvent) -> bool {
        match event {
            SketchEvent::Key { code, state, .. } => self.process_keyboard(*code, *state),
            SketchEvent::CursorMoved { x, y } => {
                self.process_cursor_position(*x, *y);
                true
            }
            SketchEvent::MouseMotion { dx, dy } => {
                self.process_mouse_motion(*dx, *dy);
                true
            }
            SketchEvent::Scroll { dy, .. } => {
                self.process_scroll(*dy);
                true
            }
            SketchEvent::FileDropped(_) => false,
        }
    }

    /// Update the camera based on accumulated input
    ///
    /// Returns the camera position for debug display.
    pub fn update<C: CameraControl>(&mut self, camera: &mut C, dt: f32) -> Vec3 {
        if self.forward {
            camera.process_keyboard(CameraDirection::Forward, dt);
        }
        if self.backward {
            camera.process_keyboard(CameraDirection::Backward, dt);
        }
        if self.left {
            camera.process_keyboard(CameraDirection::Left, dt);
        }
        if self.right {
            camera.process_keyboard(CameraDirection::Right, dt);
        }

        if self.look_enabled && (self.pending_x != 0.0 || self.pending_y != 0.0) {
            camera.process_mouse_movement(self.pending_x, self.pending_y, self.constrain_pitch);
        }

        if self.pending_scroll != 0.0 {
            camera.process_mouse_scroll(self.pending_scroll);
        }

        // Reset pending mouse movement
        self.pending_x = 0.0;
        self.pending_y = 0.0;
        self.pending_scroll = 0.0;

        camera.position()
    }

    /// Forget held keys and pending mouse input
    ///
    /// Called when the owning slide loses focus so a key released elsewhere
    /// doesn't keep the camera moving.
    pub fn release_all(&mut self) {
        self.forward = false;
        self.backward = false;
        self.left = false;
        self.right = false;
        self.reset_mouse();
    }

    /// Re-arm first-mouse handling, e.g. after the cursor was captured
    pub fn reset_mouse(&mut self) {
        self.first_mouse = true;
        self.pending_x = 0.0;
        self.pending_y = 0.0;
        self.pending_scroll = 0.0;
    }

    /// Check if any movement keys are pressed
    pub fn is_moving(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    /// Builder: enable or disable mouse look
    pub fn with_look_enabled(mut self, enabled: bool) -> Self {
        self.look_enabled = enabled;
        self
    }

    /// Builder: enable or disable the pitch clamp
    pub fn with_constrain_pitch(mut self, constrain: bool) -> Self {
        self.constrain_pitch = constrain;
        self
    }
}

/// Trait for camera control
/// Allows the controller to work with different camera implementations
pub trait CameraControl {
    /// Move along `direction` for `dt` seconds at the camera's own speed
    fn process_keyboard(&mut self, direction: CameraDirection, dt: f32);
    /// Apply unscaled mouse offsets (positive y looks up)
    fn process_mouse_movement(&mut self, x_offset: f32, y_offset: f32, constrain_pitch: bool);
    /// Apply a scroll offset to the zoom
    fn process_mouse_scroll(&mut self, y_offset: f32);
    fn position(&self) -> Vec3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingCamera {
        moves: Vec<(CameraDirection, f32)>,
        looks: Vec<(f32, f32, bool)>,
        scrolls: Vec<f32>,
    }

    impl CameraControl for RecordingCamera {
        fn process_keyboard(&mut self, direction: CameraDirection, dt: f32) {
            self.moves.push((direction, dt));
        }
        fn process_mouse_movement(&mut self, x_offset: f32, y_offset: f32, constrain_pitch: bool) {
            self.looks.push((x_offset, y_offset, constrain_pitch));
        }
        fn process_mouse_scroll(&mut self, y_offset: f32) {
            self.scrolls.push(y_offset);
        }
        fn position(&self) -> Vec3 {
            Vec3::ZERO
        }
    }

    #[test]
    fn test_held_keys_move_every_update() {
        let mut controller = CameraController::new();
        let mut camera = RecordingCamera::default();

        assert!(controller.process_keyboard(KeyCode::KeyW, ElementState::Pressed));
        controller.update(&mut camera, 0.016);
        controller.update(&mut camera, 0.016);
        assert_eq!(camera.moves, vec![(CameraDirection::Forward, 0.016); 2]);

        controller.process_keyboard(KeyCode::KeyW, ElementState::Released);
        controller.update(&mut camera, 0.016);
        assert_eq!(camera.moves.len(), 2);
    }

    #[test]
    fn test_non_movement_keys_not_consumed() {
        let mut controller = CameraController::new();
        assert!(!controller.process_keyboard(KeyCode::Space, ElementState::Pressed));
        assert!(!controller.process_keyboard(KeyCode::ArrowUp, ElementState::Pressed));
        assert!(!controller.is_moving());
    }

    #[test]
    fn test_first_mouse_sample_only_seeds() {
        let mut controller = CameraController::new();
        let mut camera = RecordingCamera::default();

        controller.process_cursor_position(400.0, 300.0);
        controller.update(&mut camera, 0.016);
        assert!(camera.looks.is_empty(), "first sample must not rotate the camera");

        controller.process_cursor_position(410.0, 290.0);
        controller.update(&mut camera, 0.016);
        // Moving the cursor up gives a positive y offset
        assert_eq!(camera.looks, vec![(10.0, 10.0, true)]);
    }

    #[test]
    fn test_mouse_motion_accumulates_until_update() {
        let mut controller = CameraController::new();
        let mut camera = RecordingCamera::default();

        controller.process_mouse_motion(2.0, 1.0);
        controller.process_mouse_motion(3.0, 1.0);
        controller.update(&mut camera, 0.016);
        assert_eq!(camera.looks, vec![(5.0, -2.0, true)]);

        // Pending deltas are cleared
        controller.update(&mut camera, 0.016);
        assert_eq!(camera.looks.len(), 1);
    }

    #[test]
    fn test_scroll_forwarded() {
        let mut controller = CameraController::new();
        let mut camera = RecordingCamera::default();

        assert!(controller.handle_event(&SketchEvent::Scroll { dx: 0.0, dy: 1.5 }));
        controller.update(&mut camera, 0.016);
        assert_eq!(camera.scrolls, vec![1.5]);
    }

    #[test]
    fn test_look_disabled() {
        let mut controller = CameraController::new().with_look_enabled(false);
        let mut camera = RecordingCamera::default();

        controller.process_mouse_motion(5.0, 5.0);
        controller.update(&mut camera, 0.016);
        assert!(camera.looks.is_empty());
    }

    #[test]
    fn test_release_all_stops_movement() {
        let mut controller = CameraController::new();
        let mut camera = RecordingCamera::default();

        controller.process_keyboard(KeyCode::KeyA, ElementState::Pressed);
        controller.process_keyboard(KeyCode::KeyD, ElementState::Pressed);
        controller.process_cursor_position(10.0, 10.0);
        assert!(controller.is_moving());

        controller.release_all();
        assert!(!controller.is_moving());

        // First mouse is re-armed after release
        controller.process_cursor_position(500.0, 500.0);
        controller.update(&mut camera, 0.016);
        assert!(camera.moves.is_empty());
        assert!(camera.looks.is_empty());
    }

    #[test]
    fn test_file_drop_not_consumed() {
        let mut controller = CameraController::new();
        assert!(!controller.handle_event(&SketchEvent::FileDropped("model.obj".into())));
    }
}
