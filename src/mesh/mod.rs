//! Core mesh data structures.
//!
//! This module provides the half-edge representation of a triangle mesh and
//! the functions that construct it from triangle soup.
//!
//! # Overview
//!
//! The primary type is [`HalfEdgeMesh`]. It is built once from three arrays:
//!
//! 1. vertices ([`Vertex`], or anything convertible into one such as
//!    `nalgebra::Point3<f64>`),
//! 2. triangles as `[usize; 3]` vertex indices whose order defines the winding,
//! 3. the undirected edges of those triangles ([`UndirectedEdge`]), usually
//!    from [`unordered_edges_from_triangles`].
//!
//! [`build_from_triangles`] does steps 3 and the build in one call.
//!
//! # Index Types
//!
//! Mesh elements are identified by type-safe index wrappers:
//! - [`VertexId`] - Identifies a vertex
//! - [`HalfEdgeId`] - Identifies a half-edge
//! - [`FaceId`] - Identifies a face
//! - [`EdgeId`] - Identifies an undirected edge
//!
//! These indices are generic over the underlying integer type ([`MeshIndex`] trait),
//! allowing you to choose `u16`, `u32`, or `u64` based on mesh size.
//!
//! # Construction
//!
//! ```
//! use trimesh::mesh::{HalfEdgeMesh, build_from_triangles};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ];
//! let faces = vec![[0, 1, 2]];
//!
//! let mesh: HalfEdgeMesh = build_from_triangles(&vertices, &faces).unwrap();
//! ```

mod builder;
mod edges;
mod halfedge;
mod index;
mod vertex;

pub use builder::{
    build_from_triangles, build_from_triangles_with_options, to_face_vertex, BuildOptions,
};
pub use edges::{unordered_edges_from_triangles, UndirectedEdge};
pub use halfedge::{FaceHalfEdgeIter, HalfEdge, HalfEdgeMesh, VertexHalfEdgeIter};
pub use index::{EdgeId, FaceId, HalfEdgeId, MeshIndex, VertexId};
pub use vertex::Vertex;
