/// Static cube geometry for the demo scene
///
/// The cube carries 24 vertices, four per face, so each face can take a
/// flat color without bleeding into its neighbors. Shared cube corners
/// are deliberately duplicated across faces for that reason.

/// Unit corners for each face, counter-clockwise when viewed from
/// outside the cube. Winding is what the driver's back-face culling and
/// depth settings assume; reordering these flips faces inside out.
#[rustfmt::skip]
const FACE_CORNERS: [[[f32; 3]; 4]; 6] = [
    // Front (+Z)
    [[-1.0, -1.0,  1.0], [ 1.0, -1.0,  1.0], [ 1.0,  1.0,  1.0], [-1.0,  1.0,  1.0]],
    // Back (-Z)
    [[-1.0, -1.0, -1.0], [-1.0,  1.0, -1.0], [ 1.0,  1.0, -1.0], [ 1.0, -1.0, -1.0]],
    // Top (+Y)
    [[-1.0,  1.0, -1.0], [-1.0,  1.0,  1.0], [ 1.0,  1.0,  1.0], [ 1.0,  1.0, -1.0]],
    // Bottom (-Y)
    [[-1.0, -1.0, -1.0], [ 1.0, -1.0, -1.0], [ 1.0, -1.0,  1.0], [-1.0, -1.0,  1.0]],
    // Right (+X)
    [[ 1.0, -1.0, -1.0], [ 1.0,  1.0, -1.0], [ 1.0,  1.0,  1.0], [ 1.0, -1.0,  1.0]],
    // Left (-X)
    [[-1.0, -1.0, -1.0], [-1.0, -1.0,  1.0], [-1.0,  1.0,  1.0], [-1.0,  1.0, -1.0]],
];

/// One RGBA color per face, repeated for each of its four vertices.
#[rustfmt::skip]
pub const FACE_COLORS: [[f32; 4]; 6] = [
    [1.0, 1.0, 1.0, 1.0], // Front: white
    [1.0, 0.0, 0.0, 1.0], // Back: red
    [0.0, 1.0, 0.0, 1.0], // Top: green
    [0.0, 0.0, 1.0, 1.0], // Bottom: blue
    [1.0, 1.0, 0.0, 1.0], // Right: yellow
    [1.0, 0.0, 1.0, 1.0], // Left: purple
];

/// Host-side cube geometry, laid out ready for upload: three parallel
/// arrays of vertex positions, per-vertex colors, and triangle indices.
#[derive(Debug, Clone)]
pub struct CubeGeometry {
    /// 24 vertices * 3 components
    pub positions: Vec<f32>,
    /// 24 vertices * 4 components
    pub colors: Vec<f32>,
    /// 6 faces * 2 triangles * 3 indices, each in [0, 23]
    pub indices: Vec<u16>,
}

impl CubeGeometry {
    /// Build a cube of the given edge length centered on the origin.
    pub fn new(size: f32) -> Self {
        let half = size / 2.0;
        let mut positions = Vec::with_capacity(6 * 4 * 3);
        let mut colors = Vec::with_capacity(6 * 4 * 4);
        let mut indices = Vec::with_capacity(6 * 2 * 3);

        for (face, corners) in FACE_CORNERS.iter().enumerate() {
            let base = (face * 4) as u16;
            for corner in corners {
                positions.extend(corner.iter().map(|c| c * half));
                colors.extend_from_slice(&FACE_COLORS[face]);
            }
            // Two triangles fanned from the face's first corner
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self {
            positions,
            colors,
            indices,
        }
    }

    /// The unit cube used by the demo scene.
    pub fn unit() -> Self {
        Self::new(1.0)
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }
}

impl Default for CubeGeometry {
    fn default() -> Self {
        Self::unit()
    }
}
