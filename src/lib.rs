//! # trimesh
//!
//! Half-edge connectivity for triangle meshes.
//!
//! Given an unordered set of vertices and triangles, trimesh builds a
//! traversable half-edge graph that answers adjacency queries (vertex to
//! vertex, vertex to face, boundary detection) in constant time per step.
//! Boundary edges get synthesized half-edges threaded into closed loops, so
//! one-ring walks behave the same on open and closed meshes.
//!
//! ## Features
//!
//! - **Half-edge data structure**: flat arrays and type-safe indices, no pointers
//! - **Flexible indexing**: 16-bit, 32-bit, or 64-bit indices
//! - **Strict construction**: degenerate, out-of-range, and non-manifold input
//!   is rejected instead of silently repaired
//! - **PLY I/O**: ASCII PLY with color, normal, and curvature attributes
//!
//! ## Building Meshes Programmatically
//!
//! ```
//! use trimesh::prelude::*;
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 2.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 0.0, 0.0),
//! ];
//! let triangles = vec![[0, 1, 2], [2, 1, 3]];
//!
//! let mesh: HalfEdgeMesh = build_from_triangles(&vertices, &triangles).unwrap();
//! assert_eq!(mesh.num_faces(), 2);
//! assert_eq!(mesh.boundary_vertices().len(), 4);
//! ```
//!
//! ## Mesh Traversal
//!
//! ```
//! use trimesh::prelude::*;
//! use nalgebra::Point3;
//!
//! # let vertices = vec![
//! #     Point3::new(0.0, 0.0, 0.0),
//! #     Point3::new(1.0, 0.0, 0.0),
//! #     Point3::new(0.5, 1.0, 0.0),
//! # ];
//! # let mesh: HalfEdgeMesh = build_from_triangles(&vertices, &[[0, 1, 2]]).unwrap();
//! let v = VertexId::new(0);
//! for neighbor in mesh.vertex_vertex_neighbors(v) {
//!     println!("Neighbor: {:?}", neighbor);
//! }
//!
//! let he = mesh.directed_edge_to_halfedge(VertexId::new(0), VertexId::new(1));
//! assert!(he.is_valid());
//! assert_eq!(mesh.halfedge_to_directed_edge(he), (VertexId::new(0), VertexId::new(1)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod io;
pub mod mesh;

pub use error::{MeshError, Result};

/// Prelude module for convenient imports.
///
/// ```
/// use trimesh::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{
        build_from_triangles, to_face_vertex, unordered_edges_from_triangles, BuildOptions,
        EdgeId, FaceId, HalfEdge, HalfEdgeId, HalfEdgeMesh, MeshIndex, UndirectedEdge, Vertex,
        VertexId,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;
