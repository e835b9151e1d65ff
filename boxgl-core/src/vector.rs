/// 3- and 4-component vector utilities
///
/// Vectors are plain ordered arrays so they can be handed to GPU APIs
/// without conversion. All functions are pure and leave their inputs
/// untouched.

/// A point or direction in 3D space.
pub type Vec3 = [f32; 3];

/// A homogeneous point (x, y, z, w).
pub type Vec4 = [f32; 4];

pub fn subtract(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub fn dot(a: Vec3, b: Vec3) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

pub fn length(v: Vec3) -> f32 {
    dot(v, v).sqrt()
}

/// Scale a vector to unit length.
///
/// A zero-length input returns the zero vector rather than dividing by
/// zero. Callers that need a direction must check for this themselves.
pub fn normalize(v: Vec3) -> Vec3 {
    let len = length(v);
    if len == 0.0 {
        return [0.0, 0.0, 0.0];
    }
    [v[0] / len, v[1] / len, v[2] / len]
}

/// Lift a cartesian point into homogeneous coordinates (w = 1).
pub fn cartesian_to_homogeneous(point: Vec3) -> Vec4 {
    [point[0], point[1], point[2], 1.0]
}

/// Project a homogeneous point back into cartesian coordinates.
///
/// Divides by w; a zero w yields infinities per IEEE 754, which is the
/// caller's problem to avoid.
pub fn homogeneous_to_cartesian(point: Vec4) -> Vec3 {
    let w = point[3];
    [point[0] / w, point[1] / w, point[2] / w]
}
