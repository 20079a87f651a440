//! Half-edge mesh data structure.
//!
//! This module provides a half-edge (doubly-connected edge list) representation
//! for triangle meshes. Every relation is an index into an array owned by the
//! mesh, so adjacency queries are O(1) per step.
//!
//! # Structure
//!
//! - Each undirected edge is split into two **half-edges** pointing in opposite
//!   directions
//! - Each half-edge knows the vertex it points **to**, its **opposite**, the
//!   **next** half-edge around its face, its **face**, and its undirected **edge**
//! - Each vertex stores one outgoing half-edge
//! - Each face and each undirected edge stores one of its half-edges
//!
//! # Boundary Handling
//!
//! A boundary edge has one real half-edge and one synthesized boundary
//! half-edge whose face is invalid (the outside). Boundary half-edges are
//! linked through `next` into closed loops around each hole. A boundary
//! vertex always stores a boundary half-edge, so walking its one-ring starts
//! at one side of the gap and ends at the other.
//!
//! # Lifecycle
//!
//! A [`HalfEdgeMesh`] is either empty or built. [`HalfEdgeMesh::build`] is
//! the only way in and [`HalfEdgeMesh::clear`] the only way out; between the
//! two the mesh is immutable. Querying an empty mesh is a programming error
//! and panics.

use std::collections::{BTreeMap, BTreeSet};

use nalgebra::Point3;

use super::index::{EdgeId, FaceId, HalfEdgeId, MeshIndex, VertexId};
use super::vertex::Vertex;
use crate::error::{MeshError, Result};

/// A half-edge in the mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalfEdge<I: MeshIndex = u32> {
    /// The vertex this half-edge points to.
    pub to_vertex: VertexId<I>,

    /// The face this half-edge belongs to.
    /// Invalid for boundary half-edges.
    pub face: FaceId<I>,

    /// The undirected edge this half-edge is one side of.
    pub edge: EdgeId<I>,

    /// The half-edge pointing in the reverse direction.
    pub opposite: HalfEdgeId<I>,

    /// The next half-edge around the face, or around the hole for boundary
    /// half-edges.
    pub next: HalfEdgeId<I>,
}

impl<I: MeshIndex> HalfEdge<I> {
    /// Create a new unlinked half-edge.
    pub fn new() -> Self {
        Self {
            to_vertex: VertexId::invalid(),
            face: FaceId::invalid(),
            edge: EdgeId::invalid(),
            opposite: HalfEdgeId::invalid(),
            next: HalfEdgeId::invalid(),
        }
    }

    /// Check if this half-edge is on the boundary.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        !self.face.is_valid()
    }
}

impl<I: MeshIndex> Default for HalfEdge<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// The arrays of a built mesh.
#[derive(Debug, Clone)]
pub(crate) struct Connectivity<I: MeshIndex> {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) halfedges: Vec<HalfEdge<I>>,
    /// One outgoing half-edge per vertex; a boundary one if the vertex has any.
    pub(crate) vertex_halfedges: Vec<HalfEdgeId<I>>,
    pub(crate) face_halfedges: Vec<HalfEdgeId<I>>,
    pub(crate) edge_halfedges: Vec<HalfEdgeId<I>>,
    /// Outgoing half-edges of tolerated non-manifold vertices that the
    /// one-ring walk from their representative does not reach.
    pub(crate) detached_halfedges: BTreeMap<usize, Vec<HalfEdgeId<I>>>,
}

/// A half-edge mesh for triangle meshes.
///
/// # Example
/// ```
/// use trimesh::mesh::{build_from_triangles, HalfEdgeMesh, VertexId};
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 2.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(0.0, 0.0, 0.0),
/// ];
/// let mesh: HalfEdgeMesh = build_from_triangles(&vertices, &[[0, 1, 2], [2, 1, 3]]).unwrap();
///
/// let ring: Vec<usize> = mesh
///     .vertex_vertex_neighbors(VertexId::new(1))
///     .iter()
///     .map(|v| v.index())
///     .collect();
/// assert_eq!(ring, vec![0, 2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct HalfEdgeMesh<I: MeshIndex = u32> {
    pub(crate) connectivity: Option<Connectivity<I>>,
}

impl<I: MeshIndex> Default for HalfEdgeMesh<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: MeshIndex> HalfEdgeMesh<I> {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self { connectivity: None }
    }

    /// Whether [`build`](Self::build) has populated this mesh.
    #[inline]
    pub fn is_built(&self) -> bool {
        self.connectivity.is_some()
    }

    /// Drop all connectivity and return to the empty state.
    pub fn clear(&mut self) {
        self.connectivity = None;
    }

    #[inline]
    fn conn(&self) -> &Connectivity<I> {
        match &self.connectivity {
            Some(c) => c,
            None => panic!("query on an empty mesh; call build() first"),
        }
    }

    // ==================== Accessors ====================

    /// Get the number of vertices (0 for an empty mesh).
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.connectivity.as_ref().map_or(0, |c| c.vertices.len())
    }

    /// Get the number of half-edges, boundary half-edges included.
    #[inline]
    pub fn num_halfedges(&self) -> usize {
        self.connectivity.as_ref().map_or(0, |c| c.halfedges.len())
    }

    /// Get the number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.connectivity.as_ref().map_or(0, |c| c.face_halfedges.len())
    }

    /// Get the number of undirected edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.connectivity.as_ref().map_or(0, |c| c.edge_halfedges.len())
    }

    /// Get a half-edge by ID.
    ///
    /// # Panics
    /// Panics if the mesh is empty or `id` is out of range.
    #[inline]
    pub fn halfedge(&self, id: HalfEdgeId<I>) -> &HalfEdge<I> {
        let c = self.conn();
        match c.halfedges.get(id.index()) {
            Some(he) => he,
            None => panic!(
                "half-edge {:?} out of range (mesh has {})",
                id,
                c.halfedges.len()
            ),
        }
    }

    /// Get a half-edge by ID, or `None` if the mesh is empty or `id` is out
    /// of range.
    #[inline]
    pub fn get_halfedge(&self, id: HalfEdgeId<I>) -> Option<&HalfEdge<I>> {
        self.connectivity.as_ref()?.halfedges.get(id.index())
    }

    /// Get the attributes of a vertex.
    #[inline]
    pub fn vertex(&self, v: VertexId<I>) -> &Vertex {
        &self.conn().vertices[v.index()]
    }

    /// All vertex attributes, in input order.
    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.conn().vertices
    }

    /// Get the position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId<I>) -> &Point3<f64> {
        &self.vertex(v).position
    }

    /// The representative outgoing half-edge of a vertex.
    ///
    /// Invalid for a vertex not used by any face. For a boundary vertex this
    /// is a boundary half-edge.
    #[inline]
    pub fn vertex_halfedge(&self, v: VertexId<I>) -> HalfEdgeId<I> {
        self.conn().vertex_halfedges[v.index()]
    }

    /// The representative half-edge of a face (the one leaving its first vertex).
    #[inline]
    pub fn face_halfedge(&self, f: FaceId<I>) -> HalfEdgeId<I> {
        self.conn().face_halfedges[f.index()]
    }

    /// The representative half-edge of an undirected edge. Never a boundary
    /// half-edge.
    #[inline]
    pub fn edge_halfedge(&self, e: EdgeId<I>) -> HalfEdgeId<I> {
        self.conn().edge_halfedges[e.index()]
    }

    // ==================== Topology Queries ====================

    /// Get the opposite half-edge.
    #[inline]
    pub fn opposite(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).opposite
    }

    /// Get the next half-edge around the face or hole.
    #[inline]
    pub fn next(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).next
    }

    /// Get the vertex a half-edge points to.
    #[inline]
    pub fn to_vertex(&self, he: HalfEdgeId<I>) -> VertexId<I> {
        self.halfedge(he).to_vertex
    }

    /// Get the vertex a half-edge leaves from.
    #[inline]
    pub fn from_vertex(&self, he: HalfEdgeId<I>) -> VertexId<I> {
        self.to_vertex(self.opposite(he))
    }

    /// Get the face of a half-edge (invalid for boundary half-edges).
    #[inline]
    pub fn face_of(&self, he: HalfEdgeId<I>) -> FaceId<I> {
        self.halfedge(he).face
    }

    /// Get the undirected edge a half-edge belongs to.
    #[inline]
    pub fn edge_of(&self, he: HalfEdgeId<I>) -> EdgeId<I> {
        self.halfedge(he).edge
    }

    /// Check if a half-edge is on the boundary.
    #[inline]
    pub fn is_boundary_halfedge(&self, he: HalfEdgeId<I>) -> bool {
        self.halfedge(he).is_boundary()
    }

    /// Check if an undirected edge lies on the boundary.
    #[inline]
    pub fn is_boundary_edge(&self, e: EdgeId<I>) -> bool {
        let he = self.edge_halfedge(e);
        self.is_boundary_halfedge(he) || self.is_boundary_halfedge(self.opposite(he))
    }

    /// The half-edge realising the directed edge `i -> j`.
    ///
    /// Returns an invalid ID if no such half-edge exists, including when `i`
    /// is not a vertex of the mesh. A miss is an ordinary answer, not an error.
    /// Costs O(valence of `i`).
    pub fn directed_edge_to_halfedge(&self, i: VertexId<I>, j: VertexId<I>) -> HalfEdgeId<I> {
        let c = self.conn();
        if i.index() >= c.vertices.len() {
            return HalfEdgeId::invalid();
        }

        if let Some(he) = self.vertex_halfedges(i).find(|&he| self.to_vertex(he) == j) {
            return he;
        }

        // The one-ring only covers one fan of a tolerated non-manifold vertex.
        c.detached_halfedges
            .get(&i.index())
            .and_then(|hes| hes.iter().copied().find(|&he| self.to_vertex(he) == j))
            .unwrap_or_else(HalfEdgeId::invalid)
    }

    /// The directed edge `(tail, head)` realised by a half-edge.
    #[inline]
    pub fn halfedge_to_directed_edge(&self, he: HalfEdgeId<I>) -> (VertexId<I>, VertexId<I>) {
        (self.from_vertex(he), self.to_vertex(he))
    }

    /// Check if a vertex is on the boundary.
    ///
    /// A vertex not used by any face is not on the boundary.
    #[inline]
    pub fn vertex_is_boundary(&self, v: VertexId<I>) -> bool {
        let he = self.vertex_halfedge(v);
        he.is_valid() && self.is_boundary_halfedge(he)
    }

    /// The vertices adjacent to `v`, in one-ring order.
    ///
    /// For an interior vertex this is a closed cycle. For a boundary vertex it
    /// is the open fan, starting across the outgoing boundary edge and ending
    /// across the incoming one.
    pub fn vertex_vertex_neighbors(&self, v: VertexId<I>) -> Vec<VertexId<I>> {
        self.vertex_halfedges(v).map(|he| self.to_vertex(he)).collect()
    }

    /// The faces incident to `v`, in one-ring order.
    pub fn vertex_face_neighbors(&self, v: VertexId<I>) -> Vec<FaceId<I>> {
        self.vertex_halfedges(v)
            .map(|he| self.face_of(he))
            .filter(|f| f.is_valid())
            .collect()
    }

    /// The number of vertices adjacent to `v`.
    pub fn vertex_valence(&self, v: VertexId<I>) -> usize {
        self.vertex_halfedges(v).count()
    }

    /// All vertices touched by a boundary half-edge, ascending.
    pub fn boundary_vertices(&self) -> Vec<VertexId<I>> {
        let set: BTreeSet<VertexId<I>> = self
            .halfedges()
            .filter(|(_, he)| he.is_boundary())
            .map(|(_, he)| he.to_vertex)
            .collect();
        set.into_iter().collect()
    }

    /// The directed edge `(tail, head)` of every boundary half-edge, in
    /// half-edge order. Each boundary edge appears once.
    pub fn boundary_edges(&self) -> Vec<(VertexId<I>, VertexId<I>)> {
        self.halfedges()
            .filter(|(_, he)| he.is_boundary())
            .map(|(id, _)| self.halfedge_to_directed_edge(id))
            .collect()
    }

    /// Get the three vertices of a face in winding order.
    pub fn face_triangle(&self, f: FaceId<I>) -> [VertexId<I>; 3] {
        let he0 = self.face_halfedge(f);
        let he1 = self.next(he0);
        let he2 = self.next(he1);
        [self.to_vertex(he2), self.to_vertex(he0), self.to_vertex(he1)]
    }

    /// Compute the axis-aligned bounding box of the vertex positions.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let vertices = &self.conn().vertices;
        let first = vertices.first()?.position;

        let (min, max) = vertices.iter().fold((first, first), |(mut min, mut max), v| {
            for i in 0..3 {
                min[i] = min[i].min(v.position[i]);
                max[i] = max[i].max(v.position[i]);
            }
            (min, max)
        });

        Some((min, max))
    }

    // ==================== Iteration ====================

    /// Iterate over all vertex IDs.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId<I>> + '_ {
        (0..self.num_vertices()).map(VertexId::new)
    }

    /// Iterate over all half-edge IDs.
    pub fn halfedge_ids(&self) -> impl Iterator<Item = HalfEdgeId<I>> + '_ {
        (0..self.num_halfedges()).map(HalfEdgeId::new)
    }

    /// Iterate over all half-edges with their IDs.
    pub fn halfedges(&self) -> impl Iterator<Item = (HalfEdgeId<I>, &HalfEdge<I>)> + '_ {
        self.conn()
            .halfedges
            .iter()
            .enumerate()
            .map(|(i, he)| (HalfEdgeId::new(i), he))
    }

    /// Iterate over all face IDs.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId<I>> + '_ {
        (0..self.num_faces()).map(FaceId::new)
    }

    /// Iterate over all undirected edge IDs.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId<I>> + '_ {
        (0..self.num_edges()).map(EdgeId::new)
    }

    /// Iterate over the outgoing half-edges of a vertex in one-ring order.
    pub fn vertex_halfedges(&self, v: VertexId<I>) -> VertexHalfEdgeIter<'_, I> {
        VertexHalfEdgeIter::new(self, v)
    }

    /// Iterate over the three half-edges of a face.
    pub fn face_halfedges(&self, f: FaceId<I>) -> FaceHalfEdgeIter<'_, I> {
        FaceHalfEdgeIter::new(self, f)
    }

    // ==================== Validation ====================

    /// Check every connectivity invariant of a built mesh.
    ///
    /// Meshes produced by [`build`](Self::build) always pass; this exists for
    /// tests and for callers that want to assert it cheaply in debug builds.
    pub fn validate(&self) -> Result<()> {
        let c = match &self.connectivity {
            Some(c) => c,
            None => return Err(MeshError::InvalidState("mesh is empty".to_string())),
        };
        let n = c.halfedges.len();
        let fail = |msg: String| Err(MeshError::InvalidState(msg));

        for (id, he) in self.halfedges() {
            if he.opposite.index() >= n || he.next.index() >= n {
                return fail(format!("{:?} has a dangling link", id));
            }
            if self.opposite(he.opposite) != id {
                return fail(format!("{:?} is not the opposite of its opposite", id));
            }
            if he.is_boundary() && self.is_boundary_halfedge(he.opposite) {
                return fail(format!("{:?} and its opposite are both boundary", id));
            }
            if self.edge_of(he.opposite) != he.edge {
                return fail(format!("{:?} and its opposite disagree on their edge", id));
            }
            if self.from_vertex(he.next) != he.to_vertex {
                return fail(format!("{:?} is not followed by a half-edge leaving its head", id));
            }
        }

        for f in self.face_ids() {
            let he = self.face_halfedge(f);
            let cycle: Vec<_> = self.face_halfedges(f).collect();
            if cycle.len() != 3 || self.next(cycle[2]) != he {
                return fail(format!("{:?} is not a 3-cycle", f));
            }
            if cycle.iter().any(|&h| self.face_of(h) != f) {
                return fail(format!("{:?} has a half-edge owned by another face", f));
            }
        }

        for (id, he) in self.halfedges().filter(|(_, he)| he.is_boundary()) {
            let tail = self.from_vertex(id);
            if !self.vertex_is_boundary(tail) {
                return fail(format!("{:?} leaves {:?} whose representative is interior", id, tail));
            }
            if !self.is_boundary_halfedge(he.next) {
                return fail(format!("boundary loop through {:?} leaves the boundary", id));
            }
        }

        for v in self.vertex_ids() {
            let he = self.vertex_halfedge(v);
            if he.is_valid() && self.from_vertex(he) != v {
                return fail(format!("representative of {:?} does not leave it", v));
            }
        }

        for e in self.edge_ids() {
            let he = self.edge_halfedge(e);
            if self.edge_of(he) != e || self.is_boundary_halfedge(he) {
                return fail(format!("representative of {:?} is inconsistent", e));
            }
        }

        Ok(())
    }

    /// Check if the mesh is built and all connectivity is consistent.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Iterator over the outgoing half-edges of a vertex.
///
/// Steps from `he` to `next(opposite(he))` until it returns to the vertex's
/// representative half-edge.
pub struct VertexHalfEdgeIter<'a, I: MeshIndex = u32> {
    mesh: &'a HalfEdgeMesh<I>,
    start: HalfEdgeId<I>,
    current: HalfEdgeId<I>,
    remaining: usize,
    done: bool,
}

impl<'a, I: MeshIndex> VertexHalfEdgeIter<'a, I> {
    fn new(mesh: &'a HalfEdgeMesh<I>, v: VertexId<I>) -> Self {
        let start = mesh.vertex_halfedge(v);
        Self {
            mesh,
            start,
            current: start,
            remaining: mesh.num_halfedges(),
            done: !start.is_valid(),
        }
    }
}

impl<'a, I: MeshIndex> Iterator for VertexHalfEdgeIter<'a, I> {
    type Item = HalfEdgeId<I>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.remaining == 0 {
            panic!("one-ring starting at {:?} does not close", self.start);
        }
        self.remaining -= 1;

        let result = self.current;

        // If he goes v -> w, opposite(he) goes w -> v and the half-edge after
        // it (in its face or hole) leaves v again.
        self.current = self.mesh.next(self.mesh.opposite(self.current));

        if self.current == self.start {
            self.done = true;
        }

        Some(result)
    }
}

/// Iterator over half-edges around a face.
pub struct FaceHalfEdgeIter<'a, I: MeshIndex = u32> {
    mesh: &'a HalfEdgeMesh<I>,
    start: HalfEdgeId<I>,
    current: HalfEdgeId<I>,
    remaining: usize,
}

impl<'a, I: MeshIndex> FaceHalfEdgeIter<'a, I> {
    fn new(mesh: &'a HalfEdgeMesh<I>, f: FaceId<I>) -> Self {
        let start = mesh.face_halfedge(f);
        Self {
            mesh,
            start,
            current: start,
            remaining: if start.is_valid() { 3 } else { 0 },
        }
    }
}

impl<'a, I: MeshIndex> Iterator for FaceHalfEdgeIter<'a, I> {
    type Item = HalfEdgeId<I>;

    fn next(&mut self) -> Option<Self::Item> {
        // Faces are triangles: at most three steps, fewer if the cycle closes early.
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let result = self.current;
        self.current = self.mesh.next(self.current);
        if self.current == self.start {
            self.remaining = 0;
        }

        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::build_from_triangles;

    /// The open quad: two triangles sharing the edge (1, 2).
    fn quad() -> HalfEdgeMesh {
        let vertices = vec![
            Point3::new(0.0, 2.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
        ];
        build_from_triangles(&vertices, &[[0, 1, 2], [2, 1, 3]]).unwrap()
    }

    /// A closed tetrahedron.
    fn tetrahedron() -> HalfEdgeMesh {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, 0.5, 1.0),
        ];
        build_from_triangles(&vertices, &[[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]]).unwrap()
    }

    /// A hexagonal fan around vertex 0, which is interior.
    fn hexagon_fan() -> HalfEdgeMesh {
        let mut vertices = vec![Point3::new(0.0, 0.0, 0.0)];
        for k in 0..6 {
            let a = k as f64 * std::f64::consts::PI / 3.0;
            vertices.push(Point3::new(a.cos(), a.sin(), 0.0));
        }
        let faces: Vec<[usize; 3]> = (0..6).map(|k| [0, 1 + k, 1 + (k + 1) % 6]).collect();
        build_from_triangles(&vertices, &faces).unwrap()
    }

    fn ids(vs: &[VertexId]) -> Vec<usize> {
        vs.iter().map(|v| v.index()).collect()
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = HalfEdgeMesh::<u32>::new();
        assert!(!mesh.is_built());
        assert_eq!(mesh.num_vertices(), 0);
        assert_eq!(mesh.num_halfedges(), 0);
        assert_eq!(mesh.num_faces(), 0);
        assert!(mesh.get_halfedge(HalfEdgeId::new(0)).is_none());
        assert!(!mesh.is_valid());
    }

    #[test]
    #[should_panic(expected = "empty mesh")]
    fn test_query_on_empty_mesh_panics() {
        let mesh = HalfEdgeMesh::<u32>::new();
        mesh.vertex_vertex_neighbors(VertexId::new(0));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_halfedge_out_of_range_panics() {
        let mesh = quad();
        mesh.halfedge(HalfEdgeId::new(10));
    }

    #[test]
    fn test_quad_one_rings() {
        let mesh = quad();
        assert_eq!(ids(&mesh.vertex_vertex_neighbors(VertexId::new(0))), vec![2, 1]);
        assert_eq!(ids(&mesh.vertex_vertex_neighbors(VertexId::new(1))), vec![0, 2, 3]);
        assert_eq!(ids(&mesh.vertex_vertex_neighbors(VertexId::new(2))), vec![3, 1, 0]);
        assert_eq!(ids(&mesh.vertex_vertex_neighbors(VertexId::new(3))), vec![1, 2]);
    }

    #[test]
    fn test_quad_face_neighbors() {
        let mesh = quad();
        let faces = |v: usize| -> Vec<usize> {
            mesh.vertex_face_neighbors(VertexId::new(v))
                .iter()
                .map(|f| f.index())
                .collect()
        };
        assert_eq!(faces(0), vec![0]);
        assert_eq!(faces(1), vec![0, 1]);
        assert_eq!(faces(2), vec![1, 0]);
        assert_eq!(faces(3), vec![1]);
    }

    #[test]
    fn test_quad_boundary() {
        let mesh = quad();
        assert_eq!(ids(&mesh.boundary_vertices()), vec![0, 1, 2, 3]);
        for v in mesh.vertex_ids() {
            assert!(mesh.vertex_is_boundary(v));
        }

        let edges: Vec<(usize, usize)> = mesh
            .boundary_edges()
            .iter()
            .map(|(a, b)| (a.index(), b.index()))
            .collect();
        assert_eq!(edges, vec![(1, 0), (0, 2), (3, 1), (2, 3)]);

        let shared = mesh.edge_of(mesh.directed_edge_to_halfedge(VertexId::new(1), VertexId::new(2)));
        assert!(!mesh.is_boundary_edge(shared));
        assert_eq!(mesh.edge_ids().filter(|&e| mesh.is_boundary_edge(e)).count(), 4);
    }

    #[test]
    fn test_boundary_loop_closes() {
        let mesh = quad();
        let start = mesh.vertex_halfedge(VertexId::new(0));
        let mut he = start;
        let mut loop_vertices = Vec::new();
        for _ in 0..4 {
            assert!(mesh.is_boundary_halfedge(he));
            loop_vertices.push(mesh.to_vertex(he).index());
            he = mesh.next(he);
        }
        assert_eq!(he, start);
        assert_eq!(loop_vertices, vec![2, 3, 1, 0]);
    }

    #[test]
    fn test_tetrahedron_is_closed() {
        let mesh = tetrahedron();
        assert_eq!(mesh.num_halfedges(), 12);
        assert_eq!(mesh.num_edges(), 6);
        assert!(mesh.boundary_vertices().is_empty());
        assert!(mesh.boundary_edges().is_empty());
        for v in mesh.vertex_ids() {
            assert!(!mesh.vertex_is_boundary(v));
            assert_eq!(mesh.vertex_valence(v), 3);
            assert_eq!(mesh.vertex_face_neighbors(v).len(), 3);
        }
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_interior_ring_is_cyclic() {
        let mesh = hexagon_fan();
        let center = VertexId::new(0);
        assert!(!mesh.vertex_is_boundary(center));
        assert_eq!(mesh.vertex_valence(center), 6);

        // Consecutive ring entries are consecutive rim vertices, in one direction.
        let ring = ids(&mesh.vertex_vertex_neighbors(center));
        let step = (ring[1] + 6 - ring[0]) % 6;
        assert!(step == 1 || step == 5);
        for w in ring.windows(2) {
            assert_eq!((w[1] + 6 - w[0]) % 6, step);
        }

        // Every rim vertex is a boundary vertex with valence 3.
        for v in 1..7 {
            let v = VertexId::new(v);
            assert!(mesh.vertex_is_boundary(v));
            assert_eq!(mesh.vertex_valence(v), 3);
            assert_eq!(mesh.vertex_face_neighbors(v).len(), 2);
        }
        assert_eq!(mesh.boundary_vertices().len(), 6);
    }

    #[test]
    fn test_opposite_is_involution() {
        for mesh in [quad(), tetrahedron(), hexagon_fan()] {
            for he in mesh.halfedge_ids() {
                assert_eq!(mesh.opposite(mesh.opposite(he)), he);
            }
        }
    }

    #[test]
    fn test_face_cycles_follow_winding() {
        let mesh = tetrahedron();
        let faces = [[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]];
        for f in mesh.face_ids() {
            let tri = mesh.face_triangle(f);
            assert_eq!(ids(&tri), faces[f.index()].to_vec());

            let he = mesh.face_halfedge(f);
            assert_eq!(mesh.next(mesh.next(mesh.next(he))), he);
            let heads: Vec<usize> = mesh.face_halfedges(f).map(|h| mesh.to_vertex(h).index()).collect();
            assert_eq!(heads.len(), 3);
            assert_eq!(heads[2], faces[f.index()][0]);
        }
    }

    #[test]
    fn test_valence_matches_neighbors() {
        for mesh in [quad(), tetrahedron(), hexagon_fan()] {
            for v in mesh.vertex_ids() {
                assert_eq!(mesh.vertex_valence(v), mesh.vertex_vertex_neighbors(v).len());
            }
        }
    }

    #[test]
    fn test_directed_edge_roundtrip() {
        for mesh in [quad(), tetrahedron(), hexagon_fan()] {
            for he in mesh.halfedge_ids() {
                let (tail, head) = mesh.halfedge_to_directed_edge(he);
                assert_eq!(mesh.directed_edge_to_halfedge(tail, head), he);
            }
        }
    }

    #[test]
    fn test_directed_edge_miss() {
        let mesh = quad();
        // 0 and 3 are not adjacent
        assert!(!mesh.directed_edge_to_halfedge(VertexId::new(0), VertexId::new(3)).is_valid());
        assert!(!mesh.directed_edge_to_halfedge(VertexId::new(9), VertexId::new(0)).is_valid());

        // both directions of an edge exist, one of them on the boundary
        let real = mesh.directed_edge_to_halfedge(VertexId::new(0), VertexId::new(1));
        let outside = mesh.directed_edge_to_halfedge(VertexId::new(1), VertexId::new(0));
        assert!(!mesh.is_boundary_halfedge(real));
        assert!(mesh.is_boundary_halfedge(outside));
        assert_eq!(mesh.opposite(real), outside);
    }

    #[test]
    fn test_clear_returns_to_empty() {
        let mut mesh = quad();
        assert!(mesh.is_built());
        mesh.clear();
        assert!(!mesh.is_built());
        assert_eq!(mesh.num_halfedges(), 0);
    }

    #[test]
    fn test_bounding_box() {
        let mesh = quad();
        let (min, max) = mesh.bounding_box().unwrap();
        assert_eq!(min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(max, Point3::new(1.0, 2.0, 0.0));
    }
}
