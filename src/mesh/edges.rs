//! Undirected edges implied by a triangle list.

use std::collections::BTreeSet;

use crate::error::{MeshError, Result};

/// An unordered pair of vertex indices.
///
/// The pair is stored canonically with the smaller index first, so `(i, j)`
/// and `(j, i)` compare equal and hash identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UndirectedEdge {
    v: [usize; 2],
}

impl UndirectedEdge {
    /// Create the edge between `a` and `b`.
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            v: if a <= b { [a, b] } else { [b, a] },
        }
    }

    /// The smaller vertex index.
    #[inline]
    pub fn start(&self) -> usize {
        self.v[0]
    }

    /// The larger vertex index.
    #[inline]
    pub fn end(&self) -> usize {
        self.v[1]
    }

    /// Both vertex indices, smaller first.
    #[inline]
    pub fn vertices(&self) -> [usize; 2] {
        self.v
    }
}

impl From<(usize, usize)> for UndirectedEdge {
    fn from((a, b): (usize, usize)) -> Self {
        Self::new(a, b)
    }
}

/// The three directed sides of a triangle, in winding order.
#[inline]
pub(crate) fn triangle_sides(t: &[usize; 3]) -> [(usize, usize); 3] {
    [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])]
}

/// Reject triangles that reference a vertex outside `0..num_vertices` or that
/// repeat a vertex.
pub(crate) fn validate_triangles(num_vertices: usize, triangles: &[[usize; 3]]) -> Result<()> {
    for (fi, tri) in triangles.iter().enumerate() {
        if let Some(&vi) = tri.iter().find(|&&vi| vi >= num_vertices) {
            return Err(MeshError::InvalidVertexIndex { face: fi, vertex: vi });
        }
        if tri[0] == tri[1] || tri[1] == tri[2] || tri[0] == tri[2] {
            return Err(MeshError::DegenerateFace { face: fi });
        }
    }
    Ok(())
}

/// Compute the distinct undirected edges of a triangle list.
///
/// The result is sorted by `(start, end)`, so edge indices are stable for a
/// given triangle list regardless of face order.
///
/// # Errors
/// [`MeshError::InvalidVertexIndex`] if a triangle references a vertex
/// `>= num_vertices`, [`MeshError::DegenerateFace`] if a triangle repeats a
/// vertex.
///
/// # Example
/// ```
/// use trimesh::mesh::unordered_edges_from_triangles;
///
/// let edges = unordered_edges_from_triangles(4, &[[0, 1, 2], [2, 1, 3]]).unwrap();
/// let pairs: Vec<[usize; 2]> = edges.iter().map(|e| e.vertices()).collect();
/// assert_eq!(pairs, vec![[0, 1], [0, 2], [1, 2], [1, 3], [2, 3]]);
/// ```
pub fn unordered_edges_from_triangles(
    num_vertices: usize,
    triangles: &[[usize; 3]],
) -> Result<Vec<UndirectedEdge>> {
    validate_triangles(num_vertices, triangles)?;

    let edges: BTreeSet<UndirectedEdge> = triangles
        .iter()
        .flat_map(triangle_sides)
        .map(UndirectedEdge::from)
        .collect();

    Ok(edges.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order() {
        let a = UndirectedEdge::new(5, 2);
        let b = UndirectedEdge::new(2, 5);
        assert_eq!(a, b);
        assert_eq!(a.start(), 2);
        assert_eq!(a.end(), 5);
    }

    #[test]
    fn test_single_triangle() {
        let edges = unordered_edges_from_triangles(3, &[[2, 0, 1]]).unwrap();
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[0].vertices(), [0, 1]);
        assert_eq!(edges[1].vertices(), [0, 2]);
        assert_eq!(edges[2].vertices(), [1, 2]);
    }

    #[test]
    fn test_shared_edge_collapses() {
        // (1, 2) is traversed as 1->2 and 2->1
        let edges = unordered_edges_from_triangles(4, &[[0, 1, 2], [2, 1, 3]]).unwrap();
        assert_eq!(edges.len(), 5);
    }

    #[test]
    fn test_deterministic_under_face_reordering() {
        let a = unordered_edges_from_triangles(5, &[[0, 1, 2], [0, 2, 3], [0, 3, 4]]).unwrap();
        let b = unordered_edges_from_triangles(5, &[[0, 3, 4], [2, 3, 0], [1, 2, 0]]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_out_of_range() {
        let result = unordered_edges_from_triangles(3, &[[0, 1, 3]]);
        assert!(matches!(
            result,
            Err(MeshError::InvalidVertexIndex { face: 0, vertex: 3 })
        ));
    }

    #[test]
    fn test_rejects_degenerate() {
        let result = unordered_edges_from_triangles(3, &[[0, 1, 2], [1, 1, 2]]);
        assert!(matches!(result, Err(MeshError::DegenerateFace { face: 1 })));
    }

    #[test]
    fn test_empty_input() {
        let edges = unordered_edges_from_triangles(0, &[]).unwrap();
        assert!(edges.is_empty());
    }
}
