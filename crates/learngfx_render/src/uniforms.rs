//! GPU-compatible uniform blocks shared by several slides
//!
//! These types are designed to match the WGSL struct layouts exactly.
//! `vec3` members are padded to 16 bytes, so they are stored as `[f32; 4]`.

use bytemuck::{Pod, Zeroable};
use learngfx_math::{mat4, Mat4, Vec3};

/// Model, view and projection matrices
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Transforms {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
}

impl Default for Transforms {
    fn default() -> Self {
        Self {
            model: mat4::IDENTITY,
            view: mat4::IDENTITY,
            projection: mat4::IDENTITY,
        }
    }
}

/// A single color
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ColorUniform {
    pub color: [f32; 4],
}

/// Transforms plus the normal matrix for lit geometry
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct LitTransforms {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    /// Inverse-transpose of `model`
    pub normal: Mat4,
}

impl LitTransforms {
    pub fn new(model: Mat4, view: Mat4, projection: Mat4) -> Self {
        Self {
            model,
            view,
            projection,
            normal: mat4::normal_matrix(model),
        }
    }
}

impl Default for LitTransforms {
    fn default() -> Self {
        Self::new(mat4::IDENTITY, mat4::IDENTITY, mat4::IDENTITY)
    }
}

/// Pad a vector to a WGSL `vec3<f32>` slot
pub fn vec3_padded(v: Vec3) -> [f32; 4] {
    [v.x, v.y, v.z, 0.0]
}
