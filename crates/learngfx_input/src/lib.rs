//! Input Handling
//!
//! This crate provides the input events slides receive and the
//! FPS-style camera controller used by the camera and lighting slides.

mod camera_controller;
mod sketch_event;

pub use camera_controller::{CameraController, CameraControl, CameraDirection};
pub use sketch_event::SketchEvent;
