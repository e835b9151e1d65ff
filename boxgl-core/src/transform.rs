/// Per-frame animation transforms
///
/// Everything the scene driver computes each frame lives here, away
/// from the GL plumbing, so the composition order and orbit behavior
/// can be tested natively.
use crate::matrix::{compose, rotation_x, rotation_y, scaling, translation, Mat4};
use crate::projection::Camera;

/// Model animation parameters: a cube spinning about Y, tilting about
/// X, scaled down and nudged into place.
#[derive(Debug, Clone, Copy)]
pub struct Spin {
    /// Y rotation in radians per millisecond
    pub spin_rate: f32,
    /// X rotation in radians per millisecond
    pub tilt_rate: f32,
    /// Uniform scale applied before any rotation
    pub scale: f32,
    /// Final translation offset
    pub offset: [f32; 3],
}

impl Default for Spin {
    fn default() -> Self {
        Self {
            spin_rate: 0.0005,
            tilt_rate: 0.0003,
            scale: 0.2,
            offset: [0.0, -0.1, 0.0],
        }
    }
}

impl Spin {
    /// Model matrix at timestamp `now_ms`.
    ///
    /// Composition order is scale, then tilt, then spin, then
    /// translate. Reordering changes the animation: scaling last would
    /// shrink the translation, spinning before tilting wobbles the
    /// tilt axis.
    pub fn model_matrix(&self, now_ms: f32) -> Mat4 {
        compose(&[
            translation(self.offset[0], self.offset[1], self.offset[2]),
            rotation_y(now_ms * self.spin_rate),
            rotation_x(now_ms * self.tilt_rate),
            scaling(self.scale, self.scale, self.scale),
        ])
    }
}

/// Eye animation: a circle around the camera target at fixed radius.
#[derive(Debug, Clone, Copy)]
pub struct Orbit {
    /// Radians per millisecond
    pub rate: f32,
    pub radius: f32,
}

impl Default for Orbit {
    fn default() -> Self {
        Self {
            rate: 0.0005,
            radius: 2.0,
        }
    }
}

impl Orbit {
    pub fn angle(&self, now_ms: f32) -> f32 {
        now_ms * self.rate
    }
}

/// The per-frame matrix triple pushed to the shader program.
#[derive(Debug, Clone, Copy)]
pub struct FrameTransforms {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
}

/// Scene animation state: model spin plus camera orbit.
#[derive(Debug, Clone, Copy, Default)]
pub struct Animation {
    pub spin: Spin,
    pub orbit: Orbit,
}

impl Animation {
    /// Compute the transforms for one frame. Moves the camera along its
    /// orbit as a side effect, then reads view and projection from it.
    pub fn frame(&self, now_ms: f32, camera: &mut Camera) -> FrameTransforms {
        camera.orbit(self.orbit.angle(now_ms), self.orbit.radius);
        FrameTransforms {
            model: self.spin.model_matrix(now_ms),
            view: camera.view_matrix(),
            projection: camera.projection_matrix(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{identity, transform_point};

    #[test]
    fn test_model_matrix_at_time_zero() {
        // At t = 0 both rotations vanish: scale then translate remain
        let spin = Spin::default();
        let p = transform_point(spin.model_matrix(0.0), [1.0, 1.0, 1.0, 1.0]);
        assert!((p[0] - 0.2).abs() < 1e-6);
        assert!((p[1] - 0.1).abs() < 1e-6);
        assert!((p[2] - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_scale_happens_before_translate() {
        let spin = Spin {
            spin_rate: 0.0,
            tilt_rate: 0.0,
            scale: 2.0,
            offset: [1.0, 0.0, 0.0],
        };
        let p = transform_point(spin.model_matrix(1000.0), [1.0, 0.0, 0.0, 1.0]);
        // Scaled to x = 2 and then shifted by 1, not (1 + 1) * 2
        assert!((p[0] - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_spin_rotates_about_y_only() {
        let spin = Spin {
            spin_rate: 0.001,
            tilt_rate: 0.0,
            scale: 1.0,
            offset: [0.0, 0.0, 0.0],
        };
        let p = transform_point(spin.model_matrix(500.0), [0.0, 1.0, 0.0, 1.0]);
        // Points on the Y axis are fixed by a pure Y rotation
        assert!((p[0]).abs() < 1e-6);
        assert!((p[1] - 1.0).abs() < 1e-6);
        assert!((p[2]).abs() < 1e-6);
    }

    #[test]
    fn test_frame_transforms_are_finite() {
        let animation = Animation::default();
        let mut camera = Camera::new(640, 480);
        let frame = animation.frame(16.7, &mut camera);
        for m in [frame.model, frame.view, frame.projection] {
            assert!(m.iter().all(|v| v.is_finite()));
        }
        assert_ne!(frame.view, identity());
    }

    #[test]
    fn test_frame_moves_eye_along_orbit() {
        let animation = Animation::default();
        let mut camera = Camera::new(640, 480);
        animation.frame(0.0, &mut camera);
        let first = camera.position;
        animation.frame(1000.0, &mut camera);
        assert_ne!(first, camera.position);
    }
}
