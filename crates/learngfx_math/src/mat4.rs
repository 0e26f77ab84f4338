//! 4x4 Matrix utilities for model, view and projection transforms
//!
//! Matrices are column-major (`m[column][row]`) so they can be uploaded to a
//! WGSL `mat4x4<f32>` uniform without transposing. Clip space follows wgpu:
//! right-handed view space, depth in `[0, 1]`.

use crate::Vec3;

/// 4x4 matrix type (column-major)
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Multiply two 4x4 matrices: result = a * b
///
/// In column-major convention, this applies b first, then a.
#[allow(clippy::needless_range_loop)]
pub fn mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut result = [[0.0f32; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[k][j] * b[i][k];
            }
        }
    }

    result
}

/// Translation matrix
pub fn translation(v: Vec3) -> Mat4 {
    let mut m = IDENTITY;
    m[3][0] = v.x;
    m[3][1] = v.y;
    m[3][2] = v.z;
    m
}

/// Non-uniform scale matrix
pub fn scaling(v: Vec3) -> Mat4 {
    let mut m = IDENTITY;
    m[0][0] = v.x;
    m[1][1] = v.y;
    m[2][2] = v.z;
    m
}

/// Rotation of `angle` radians around `axis` (counter-clockwise when looking
/// down the axis towards the origin).
///
/// The axis does not need to be normalized. A zero axis yields the identity.
pub fn rotation(angle: f32, axis: Vec3) -> Mat4 {
    let a = axis.normalized();
    if a == Vec3::ZERO {
        return IDENTITY;
    }

    let (s, c) = angle.sin_cos();
    let t = 1.0 - c;
    let (x, y, z) = (a.x, a.y, a.z);

    [
        [t * x * x + c, t * x * y + s * z, t * x * z - s * y, 0.0],
        [t * x * y - s * z, t * y * y + c, t * y * z + s * x, 0.0],
        [t * x * z + s * y, t * y * z - s * x, t * z * z + c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Right-handed perspective projection with depth mapped to `[0, 1]`.
///
/// # Arguments
/// * `fov_y` - Vertical field of view in radians
/// * `aspect` - Width / height
/// * `near`, `far` - Positive clip distances
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fov_y * 0.5).tan();
    let range = near - far;

    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, far / range, -1.0],
        [0.0, 0.0, near * far / range, 0.0],
    ]
}

/// Right-handed orthographic projection with depth mapped to `[0, 1]`.
pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    let rl = right - left;
    let tb = top - bottom;
    let fne = far - near;

    [
        [2.0 / rl, 0.0, 0.0, 0.0],
        [0.0, 2.0 / tb, 0.0, 0.0],
        [0.0, 0.0, -1.0 / fne, 0.0],
        [-(right + left) / rl, -(top + bottom) / tb, -near / fne, 1.0],
    ]
}

/// Right-handed view matrix looking from `eye` towards `center`.
///
/// After the transform the camera sits at the origin looking down -Z.
pub fn look_at(eye: Vec3, center: Vec3, up: Vec3) -> Mat4 {
    let f = (center - eye).normalized();
    let s = f.cross(up).normalized();
    let u = s.cross(f);

    [
        [s.x, u.x, -f.x, 0.0],
        [s.y, u.y, -f.y, 0.0],
        [s.z, u.z, -f.z, 0.0],
        [-s.dot(eye), -u.dot(eye), f.dot(eye), 1.0],
    ]
}

/// Transform a point (w = 1) and perform the perspective divide
pub fn transform_point(m: Mat4, v: Vec3) -> Vec3 {
    let x = m[0][0] * v.x + m[1][0] * v.y + m[2][0] * v.z + m[3][0];
    let y = m[0][1] * v.x + m[1][1] * v.y + m[2][1] * v.z + m[3][1];
    let z = m[0][2] * v.x + m[1][2] * v.y + m[2][2] * v.z + m[3][2];
    let w = m[0][3] * v.x + m[1][3] * v.y + m[2][3] * v.z + m[3][3];

    if w != 0.0 && w != 1.0 {
        Vec3::new(x / w, y / w, z / w)
    } else {
        Vec3::new(x, y, z)
    }
}

/// Transpose a matrix
pub fn transpose(m: Mat4) -> Mat4 {
    [
        [m[0][0], m[1][0], m[2][0], m[3][0]],
        [m[0][1], m[1][1], m[2][1], m[3][1]],
        [m[0][2], m[1][2], m[2][2], m[3][2]],
        [m[0][3], m[1][3], m[2][3], m[3][3]],
    ]
}

/// General 4x4 inverse. Returns `None` for singular matrices.
pub fn inverse(m: Mat4) -> Option<Mat4> {
    // Flatten column-major so a[c * 4 + r] = m[c][r]
    let mut a = [0.0f32; 16];
    for c in 0..4 {
        for r in 0..4 {
            a[c * 4 + r] = m[c][r];
        }
    }

    let mut inv = [0.0f32; 16];
    inv[0] = a[5] * a[10] * a[15] - a[5] * a[11] * a[14] - a[9] * a[6] * a[15]
        + a[9] * a[7] * a[14] + a[13] * a[6] * a[11] - a[13] * a[7] * a[10];
    inv[4] = -a[4] * a[10] * a[15] + a[4] * a[11] * a[14] + a[8] * a[6] * a[15]
        - a[8] * a[7] * a[14] - a[12] * a[6] * a[11] + a[12] * a[7] * a[10];
    inv[8] = a[4] * a[9] * a[15] - a[4] * a[11] * a[13] - a[8] * a[5] * a[15]
        + a[8] * a[7] * a[13] + a[12] * a[5] * a[11] - a[12] * a[7] * a[9];
    inv[12] = -a[4] * a[9] * a[14] + a[4] * a[10] * a[13] + a[8] * a[5] * a[14]
        - a[8] * a[6] * a[13] - a[12] * a[5] * a[10] + a[12] * a[6] * a[9];
    inv[1] = -a[1] * a[10] * a[15] + a[1] * a[11] * a[14] + a[9] * a[2] * a[15]
        - a[9] * a[3] * a[14] - a[13] * a[2] * a[11] + a[13] * a[3] * a[10];
    inv[5] = a[0] * a[10] * a[15] - a[0] * a[11] * a[14] - a[8] * a[2] * a[15]
        + a[8] * a[3] * a[14] + a[12] * a[2] * a[11] - a[12] * a[3] * a[10];
    inv[9] = -a[0] * a[9] * a[15] + a[0] * a[11] * a[13] + a[8] * a[1] * a[15]
        - a[8] * a[3] * a[13] - a[12] * a[1] * a[11] + a[12] * a[3] * a[9];
    inv[13] = a[0] * a[9] * a[14] - a[0] * a[10] * a[13] - a[8] * a[1] * a[14]
        + a[8] * a[2] * a[13] + a[12] * a[1] * a[10] - a[12] * a[2] * a[9];
    inv[2] = a[1] * a[6] * a[15] - a[1] * a[7] * a[14] - a[5] * a[2] * a[15]
        + a[5] * a[3] * a[14] + a[13] * a[2] * a[7] - a[13] * a[3] * a[6];
    inv[6] = -a[0] * a[6] * a[15] + a[0] * a[7] * a[14] + a[4] * a[2] * a[15]
        - a[4] * a[3] * a[14] - a[12] * a[2] * a[7] + a[12] * a[3] * a[6];
    inv[10] = a[0] * a[5] * a[15] - a[0] * a[7] * a[13] - a[4] * a[1] * a[15]
        + a[4] * a[3] * a[13] + a[12] * a[1] * a[7] - a[12] * a[3] * a[5];
    inv[14] = -a[0] * a[5] * a[14] + a[0] * a[6] * a[13] + a[4] * a[1] * a[14]
        - a[4] * a[2] * a[13] - a[12] * a[1] * a[6] + a[12] * a[2] * a[5];
    inv[3] = -a[1] * a[6] * a[11] + a[1] * a[7] * a[10] + a[5] * a[2] * a[11]
        - a[5] * a[3] * a[10] - a[9] * a[2] * a[7] + a[9] * a[3] * a[6];
    inv[7] = a[0] * a[6] * a[11] - a[0] * a[7] * a[10] - a[4] * a[2] * a[11]
        + a[4] * a[3] * a[10] + a[8] * a[2] * a[7] - a[8] * a[3] * a[6];
    inv[11] = -a[0] * a[5] * a[11] + a[0] * a[7] * a[9] + a[4] * a[1] * a[11]
        - a[4] * a[3] * a[9] - a[8] * a[1] * a[7] + a[8] * a[3] * a[5];
    inv[15] = a[0] * a[5] * a[10] - a[0] * a[6] * a[9] - a[4] * a[1] * a[10]
        + a[4] * a[2] * a[9] + a[8] * a[1] * a[6] - a[8] * a[2] * a[5];

    let det = a[0] * inv[0] + a[1] * inv[4] + a[2] * inv[8] + a[3] * inv[12];
    if det.abs() < f32::EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;

    let mut result = [[0.0f32; 4]; 4];
    for c in 0..4 {
        for r in 0..4 {
            result[c][r] = inv[c * 4 + r] * inv_det;
        }
    }
    Some(result)
}

/// Matrix that transforms normals for the given model matrix
/// (inverse-transpose). Falls back to the model matrix when it is singular.
pub fn normal_matrix(model: Mat4) -> Mat4 {
    inverse(model).map(transpose).unwrap_or(model)
}
