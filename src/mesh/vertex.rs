//! Per-vertex attributes.

use nalgebra::{Point3, Vector3};

/// The attributes carried by one vertex.
///
/// A vertex has no identity beyond its position in the vertex array; two
/// vertices with equal attributes are still distinct vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in space.
    pub position: Point3<f64>,
    /// RGB color.
    pub color: [u8; 3],
    /// Surface normal. Not required to be unit length.
    pub normal: Vector3<f64>,
    /// Scalar curvature.
    pub curvature: f64,
}

impl Vertex {
    /// Create a vertex at `position` with zeroed attributes.
    pub fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            color: [0; 3],
            normal: Vector3::zeros(),
            curvature: 0.0,
        }
    }

    /// Create a vertex from coordinates.
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }

    /// Set the color.
    pub fn with_color(mut self, color: [u8; 3]) -> Self {
        self.color = color;
        self
    }

    /// Set the normal.
    pub fn with_normal(mut self, normal: Vector3<f64>) -> Self {
        self.normal = normal;
        self
    }

    /// Set the curvature.
    pub fn with_curvature(mut self, curvature: f64) -> Self {
        self.curvature = curvature;
        self
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Self::new(Point3::origin())
    }
}

impl From<Point3<f64>> for Vertex {
    fn from(position: Point3<f64>) -> Self {
        Self::new(position)
    }
}
