/// Perspective projection and look-at view matrices
use crate::matrix::{identity, Mat4};
use crate::vector::{cross, dot, normalize, subtract, Vec3};

/// OpenGL-style symmetric perspective projection.
///
/// `fov` is the vertical field of view in radians and must lie in
/// (0, pi); `near` and `far` must be positive with `far > near`.
/// Violating these produces a degenerate matrix rather than an error,
/// matching the rest of the math module.
pub fn perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fov / 2.0).tan();
    let range_inv = 1.0 / (near - far);

    #[rustfmt::skip]
    let m = [
        f / aspect, 0.0, 0.0,                          0.0,
        0.0,        f,   0.0,                          0.0,
        0.0,        0.0, (near + far) * range_inv,     -1.0,
        0.0,        0.0, near * far * range_inv * 2.0, 0.0,
    ];
    m
}

/// Build a right-handed view matrix from an eye point, a target, and an
/// up hint.
///
/// Returns `None` when the orthonormal basis cannot be constructed:
/// either `eye == target` (no viewing direction) or `up` is parallel to
/// the viewing axis (the cross product collapses). Callers wanting a
/// best-effort matrix should pick a fallback up vector; see
/// [`Camera::view_matrix`].
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Option<Mat4> {
    let z_axis = normalize(subtract(eye, target));
    if z_axis == [0.0, 0.0, 0.0] {
        return None;
    }
    let x_axis = normalize(cross(up, z_axis));
    if x_axis == [0.0, 0.0, 0.0] {
        return None;
    }
    let y_axis = cross(z_axis, x_axis);

    #[rustfmt::skip]
    let m = [
        x_axis[0], y_axis[0], z_axis[0], 0.0,
        x_axis[1], y_axis[1], z_axis[1], 0.0,
        x_axis[2], y_axis[2], z_axis[2], 0.0,
        -dot(x_axis, eye), -dot(y_axis, eye), -dot(z_axis, eye), 1.0,
    ];
    Some(m)
}

/// Camera configuration for 3D rendering
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        let mut camera = Self {
            position: [0.0, 0.0, 5.0],
            target: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
            fov: std::f32::consts::PI / 4.0, // 45 degrees
            aspect: 1.0,
            near: 0.1,
            far: 100.0,
        };
        camera.set_viewport(width, height);
        camera
    }

    /// Recompute the aspect ratio from viewport dimensions.
    ///
    /// Dimensions are clamped to at least 1 pixel so a minimized window
    /// (height 0) cannot poison the projection with a division by zero.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    /// Place the eye on a circle of `radius` around the target in the
    /// XZ plane, keeping the current height.
    pub fn orbit(&mut self, angle: f32, radius: f32) {
        self.position = [
            self.target[0] + angle.sin() * radius,
            self.position[1],
            self.target[2] + angle.cos() * radius,
        ];
    }

    /// Create the view matrix (camera transformation).
    ///
    /// Falls back when [`look_at`] reports a degenerate basis: an up
    /// hint parallel to the view axis is replaced with the X axis, and
    /// an eye sitting exactly on the target yields the identity view.
    pub fn view_matrix(&self) -> Mat4 {
        look_at(self.position, self.target, self.up)
            .or_else(|| look_at(self.position, self.target, [1.0, 0.0, 0.0]))
            .unwrap_or_else(identity)
    }

    /// Create the projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        perspective(self.fov, self.aspect, self.near, self.far)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::transform_point;
    use std::f32::consts::PI;

    fn approx_eq(a: Mat4, b: Mat4) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-5)
    }

    #[test]
    fn test_perspective_canonical_entries() {
        let near = 1.0;
        let far = 50.0;
        let m = perspective(PI / 2.0, 1.0, near, far);
        assert!((m[10] - (near + far) / (near - far)).abs() < 1e-6);
        assert!((m[11] - -1.0).abs() < 1e-6);
        assert!((m[14] - 2.0 * near * far / (near - far)).abs() < 1e-6);
        assert_eq!(m[15], 0.0);
    }

    #[test]
    fn test_perspective_matches_nalgebra() {
        let m = perspective(PI / 3.0, 16.0 / 9.0, 0.1, 100.0);
        let na = nalgebra::Matrix4::new_perspective(16.0 / 9.0, PI / 3.0, 0.1, 100.0);
        let mut expected = [0.0f32; 16];
        expected.copy_from_slice(na.as_slice());
        assert!(approx_eq(m, expected));
    }

    #[test]
    fn test_look_at_matches_nalgebra() {
        let eye = [1.0, 2.0, 3.0];
        let target = [0.0, 0.0, 0.0];
        let up = [0.0, 1.0, 0.0];
        let m = look_at(eye, target, up).unwrap();
        let na = nalgebra::Matrix4::look_at_rh(
            &nalgebra::Point3::new(eye[0], eye[1], eye[2]),
            &nalgebra::Point3::new(target[0], target[1], target[2]),
            &nalgebra::Vector3::new(up[0], up[1], up[2]),
        );
        let mut expected = [0.0f32; 16];
        expected.copy_from_slice(na.as_slice());
        assert!(approx_eq(m, expected));
    }

    #[test]
    fn test_look_at_moves_target_onto_view_axis() {
        let m = look_at([0.0, 0.0, 5.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]).unwrap();
        let p = transform_point(m, [0.0, 0.0, 0.0, 1.0]);
        // Target lands on the negative Z axis, 5 units out
        assert!((p[0]).abs() < 1e-6);
        assert!((p[1]).abs() < 1e-6);
        assert!((p[2] + 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_look_at_degenerate_eye_equals_target() {
        let eye = [1.0, 1.0, 1.0];
        assert!(look_at(eye, eye, [0.0, 1.0, 0.0]).is_none());
    }

    #[test]
    fn test_look_at_degenerate_parallel_up() {
        // Looking straight down with up = -view axis
        assert!(look_at([0.0, 5.0, 0.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]).is_none());
    }

    #[test]
    fn test_camera_view_matrix_falls_back_on_parallel_up() {
        let mut camera = Camera::new(800, 600);
        camera.position = [0.0, 5.0, 0.0];
        let m = camera.view_matrix();
        assert!(m.iter().all(|v| v.is_finite()));
        assert!(!approx_eq(m, identity()));
    }

    #[test]
    fn test_camera_viewport_clamps_zero_height() {
        let mut camera = Camera::new(800, 600);
        camera.set_viewport(800, 0);
        assert!((camera.aspect - 800.0).abs() < 1e-6);
        assert!(camera.projection_matrix().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_camera_orbit_keeps_radius() {
        let mut camera = Camera::new(800, 600);
        camera.position = [0.0, 0.0, 0.0];
        camera.orbit(1.3, 4.0);
        let d = subtract(camera.position, camera.target);
        assert!((dot(d, d).sqrt() - 4.0).abs() < 1e-5);
    }
}
