/// BoxGL Core Library - Matrix math, camera, and cube geometry
///
/// This library provides the stateless core for the spinning-cube
/// renderer: column-major 4x4 matrix construction and composition,
/// perspective and look-at camera matrices, per-frame animation
/// transforms, and the static cube geometry uploaded by the web driver.

pub mod geometry;
pub mod matrix;
pub mod projection;
pub mod transform;
pub mod vector;

// Re-export commonly used types
pub use geometry::CubeGeometry;
pub use matrix::Mat4;
pub use projection::Camera;
pub use transform::{Animation, FrameTransforms, Orbit, Spin};
pub use vector::{Vec3, Vec4};
