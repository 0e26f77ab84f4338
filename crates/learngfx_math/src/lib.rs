//! 3D Mathematics Library
//!
//! Small, dependency-light math used by the tutorial slides.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Mat4`] - 4x4 column-major matrix, laid out like WGSL `mat4x4<f32>`
//!
//! Matrix constructors live in [`mat4`] as free functions so they can be
//! composed with [`mat4::mul`] the same way the shaders compose them.

mod vec3;
pub mod mat4;

pub use vec3::Vec3;
pub use mat4::Mat4;

/// Convert degrees to radians
#[inline]
pub fn radians(degrees: f32) -> f32 {
    degrees.to_radians()
}
