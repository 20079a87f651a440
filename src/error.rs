//! Error types for trimesh.
//!
//! Every fallible operation in the crate returns [`Result`]. Misuse of a built
//! mesh (querying an empty mesh, indexing past the end of an array) is not an
//! error value: it panics, the same way slice indexing does.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur while deriving edges, building a mesh, or reading
/// and writing mesh files.
#[derive(Error, Debug)]
pub enum MeshError {
    /// The triangle list is empty.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// A face references an invalid vertex index.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A face has duplicate vertex indices (degenerate triangle).
    #[error("face {face} is degenerate (has duplicate vertices)")]
    DegenerateFace {
        /// The face index.
        face: usize,
    },

    /// An edge has more than two incident triangle sides.
    #[error("edge ({v0}, {v1}) has more than two incident faces")]
    NonManifoldEdge {
        /// First vertex of the edge.
        v0: usize,
        /// Second vertex of the edge.
        v1: usize,
    },

    /// Two faces traverse the same directed edge.
    #[error("faces {first} and {second} both traverse edge ({v0} -> {v1}); winding is inconsistent")]
    InconsistentOrientation {
        /// Tail of the directed edge.
        v0: usize,
        /// Head of the directed edge.
        v1: usize,
        /// The face that claimed the directed edge first.
        first: usize,
        /// The face that claimed it again.
        second: usize,
    },

    /// A vertex whose one-ring does not form a single fan.
    #[error("vertex {vertex} is non-manifold ({reached} of {outgoing} outgoing half-edges reachable)")]
    NonManifoldVertex {
        /// The vertex index.
        vertex: usize,
        /// Outgoing half-edges reached by walking the one-ring.
        reached: usize,
        /// Total outgoing half-edges at the vertex.
        outgoing: usize,
    },

    /// A vertex with no incident face, when isolated vertices are disallowed.
    #[error("vertex {vertex} is not referenced by any face")]
    IsolatedVertex {
        /// The vertex index.
        vertex: usize,
    },

    /// The same undirected edge was supplied twice.
    #[error("edge ({v0}, {v1}) appears more than once in the edge list")]
    DuplicateEdge {
        /// First vertex of the edge.
        v0: usize,
        /// Second vertex of the edge.
        v1: usize,
    },

    /// A supplied edge is not a side of any face.
    #[error("edge ({v0}, {v1}) is not a side of any face")]
    OrphanEdge {
        /// First vertex of the edge.
        v0: usize,
        /// Second vertex of the edge.
        v1: usize,
    },

    /// A face side has no entry in the supplied edge list.
    #[error("face side ({v0}, {v1}) is missing from the edge list")]
    MissingEdge {
        /// First vertex of the edge.
        v0: usize,
        /// Second vertex of the edge.
        v1: usize,
    },

    /// The mesh has more elements than the chosen index type can address.
    #[error("{count} {what} do not fit in a {bits}-bit mesh index")]
    IndexOverflow {
        /// Which element kind overflowed.
        what: &'static str,
        /// The element count.
        count: usize,
        /// Width of the index type.
        bits: u32,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error loading mesh data.
    #[error("failed to load mesh from {path}: {message}")]
    LoadError {
        /// The file path (`<stream>` for in-memory readers).
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Unsupported file format.
    #[error("unsupported file format: {extension}")]
    UnsupportedFormat {
        /// The file extension.
        extension: String,
    },

    /// Invalid mesh state for the requested operation.
    #[error("invalid mesh state: {0}")]
    InvalidState(String),
}

impl MeshError {
    /// Create a load error for the given path.
    pub fn load<P: Into<PathBuf>, M: Into<String>>(path: P, message: M) -> Self {
        MeshError::LoadError {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MeshError::NonManifoldEdge { v0: 1, v1: 4 };
        assert_eq!(err.to_string(), "edge (1, 4) has more than two incident faces");

        let err = MeshError::IndexOverflow {
            what: "half-edges",
            count: 70_000,
            bits: 16,
        };
        assert!(err.to_string().contains("16-bit"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: MeshError = io.into();
        assert!(matches!(err, MeshError::Io(_)));
    }
}
