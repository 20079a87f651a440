//! Mesh file I/O.
//!
//! # Supported Formats
//!
//! | Format | Extension | Load | Save | Notes |
//! |--------|-----------|------|------|-------|
//! | PLY | `.ply` | ✓ | ✓ | Triangles only; color, normal, curvature |
//!
//! # Usage
//!
//! ```no_run
//! use trimesh::io::{load_mesh, save};
//! use trimesh::mesh::HalfEdgeMesh;
//!
//! let mesh: HalfEdgeMesh = load_mesh("model.ply").unwrap();
//! save(&mesh, "output.ply").unwrap();
//! ```
//!
//! [`ply::load`] returns the raw arrays when the caller wants to inspect or
//! edit them before building.

pub mod ply;

use std::path::Path;

use crate::error::{MeshError, Result};
use crate::mesh::{HalfEdgeMesh, MeshIndex};

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// PLY (Stanford polygon) format.
    Ply,
}

impl Format {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Format> {
        match ext.to_lowercase().as_str() {
            "ply" => Some(Format::Ply),
            _ => None,
        }
    }

    /// Detect format from file path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Format> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Format::from_extension)
    }

    fn require<P: AsRef<Path>>(path: P) -> Result<Format> {
        let path = path.as_ref();
        Format::from_path(path).ok_or_else(|| MeshError::UnsupportedFormat {
            extension: path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("(none)")
                .to_string(),
        })
    }
}

/// Load a file and build its half-edge mesh.
///
/// The format is determined by the file extension.
pub fn load_mesh<P: AsRef<Path>, I: MeshIndex>(path: P) -> Result<HalfEdgeMesh<I>> {
    let path = path.as_ref();
    match Format::require(path)? {
        Format::Ply => ply::load(path)?.build(),
    }
}

/// Save a mesh to a file with automatic format detection.
pub fn save<P: AsRef<Path>, I: MeshIndex>(mesh: &HalfEdgeMesh<I>, path: P) -> Result<()> {
    let path = path.as_ref();
    match Format::require(path)? {
        Format::Ply => ply::save(mesh, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(Format::from_path("a/b/model.ply"), Some(Format::Ply));
        assert_eq!(Format::from_path("MODEL.PLY"), Some(Format::Ply));
        assert_eq!(Format::from_path("model.obj"), None);
        assert_eq!(Format::from_path("model"), None);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = load_mesh::<_, u32>("model.stl").unwrap_err();
        assert!(matches!(
            err,
            MeshError::UnsupportedFormat { ref extension } if extension == "stl"
        ));

        let mesh: HalfEdgeMesh = HalfEdgeMesh::new();
        assert!(matches!(
            save(&mesh, "noext"),
            Err(MeshError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_save_and_load_file() {
        use nalgebra::Point3;

        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let mesh: HalfEdgeMesh =
            crate::mesh::build_from_triangles(&vertices, &[[0, 1, 2]]).unwrap();

        let path = std::env::temp_dir().join(format!("trimesh-io-{}.ply", std::process::id()));
        save(&mesh, &path).unwrap();
        let loaded: HalfEdgeMesh<u16> = load_mesh(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.num_faces(), 1);
        assert_eq!(loaded.num_edges(), 3);
        assert_eq!(loaded.boundary_vertices().len(), 3);
    }
}
