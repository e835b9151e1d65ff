/// Column-major 4x4 transformation matrices
///
/// A matrix is 16 floats flattened column by column, the layout WebGL's
/// `uniformMatrix4fv` expects, so matrices built here upload without any
/// reshuffling. Element (row r, column c) lives at index `c * 4 + r`.
use crate::vector::Vec4;

/// A 4x4 matrix flattened column-major into 16 floats.
pub type Mat4 = [f32; 16];

pub fn identity() -> Mat4 {
    #[rustfmt::skip]
    let m = [
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ];
    m
}

pub fn translation(x: f32, y: f32, z: f32) -> Mat4 {
    #[rustfmt::skip]
    let m = [
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        x,   y,   z,   1.0,
    ];
    m
}

pub fn scaling(x: f32, y: f32, z: f32) -> Mat4 {
    #[rustfmt::skip]
    let m = [
        x,   0.0, 0.0, 0.0,
        0.0, y,   0.0, 0.0,
        0.0, 0.0, z,   0.0,
        0.0, 0.0, 0.0, 1.0,
    ];
    m
}

/// Rotation about the X axis. Angles are radians; out-of-range values
/// wrap trigonometrically rather than erroring.
pub fn rotation_x(angle: f32) -> Mat4 {
    let (sin, cos) = angle.sin_cos();
    #[rustfmt::skip]
    let m = [
        1.0, 0.0,  0.0, 0.0,
        0.0, cos,  sin, 0.0,
        0.0, -sin, cos, 0.0,
        0.0, 0.0,  0.0, 1.0,
    ];
    m
}

/// Rotation about the Y axis.
pub fn rotation_y(angle: f32) -> Mat4 {
    let (sin, cos) = angle.sin_cos();
    #[rustfmt::skip]
    let m = [
        cos, 0.0, -sin, 0.0,
        0.0, 1.0, 0.0,  0.0,
        sin, 0.0, cos,  0.0,
        0.0, 0.0, 0.0,  1.0,
    ];
    m
}

/// Rotation about the Z axis.
pub fn rotation_z(angle: f32) -> Mat4 {
    let (sin, cos) = angle.sin_cos();
    #[rustfmt::skip]
    let m = [
        cos,  sin, 0.0, 0.0,
        -sin, cos, 0.0, 0.0,
        0.0,  0.0, 1.0, 0.0,
        0.0,  0.0, 0.0, 1.0,
    ];
    m
}

/// Apply a matrix to a homogeneous point, returning the new point.
pub fn transform_point(m: Mat4, p: Vec4) -> Vec4 {
    let [x, y, z, w] = p;
    [
        x * m[0] + y * m[4] + z * m[8] + w * m[12],
        x * m[1] + y * m[5] + z * m[9] + w * m[13],
        x * m[2] + y * m[6] + z * m[10] + w * m[14],
        x * m[3] + y * m[7] + z * m[11] + w * m[15],
    ]
}

/// Multiply `a × b`.
///
/// Each column of `b` is a homogeneous point transformed by `a`; the
/// transformed columns reassemble into the product. This keeps the
/// column convention in one place instead of spreading index arithmetic
/// over a 4x4 loop.
pub fn multiply(a: Mat4, b: Mat4) -> Mat4 {
    let c0 = transform_point(a, [b[0], b[1], b[2], b[3]]);
    let c1 = transform_point(a, [b[4], b[5], b[6], b[7]]);
    let c2 = transform_point(a, [b[8], b[9], b[10], b[11]]);
    let c3 = transform_point(a, [b[12], b[13], b[14], b[15]]);
    [
        c0[0], c0[1], c0[2], c0[3],
        c1[0], c1[1], c1[2], c1[3],
        c2[0], c2[1], c2[2], c2[3],
        c3[0], c3[1], c3[2], c3[3],
    ]
}

/// Left-to-right product of a non-empty slice of matrices.
///
/// A single-element slice returns that matrix unchanged.
///
/// # Panics
///
/// Panics on an empty slice; there is no meaningful product to return
/// and silently substituting identity would hide caller bugs.
pub fn compose(matrices: &[Mat4]) -> Mat4 {
    assert!(!matrices.is_empty(), "compose requires at least one matrix");
    matrices[1..]
        .iter()
        .fold(matrices[0], |acc, m| multiply(acc, *m))
}
