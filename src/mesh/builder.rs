//! Mesh construction.
//!
//! Turns a vertex array, a triangle list, and the triangle list's undirected
//! edges into a fully linked [`HalfEdgeMesh`]. Construction is one pass with
//! no partial results: either every invariant holds on the returned mesh, or
//! an error is reported and the mesh stays empty.

use std::collections::{BTreeMap, HashMap, HashSet};

use log::{debug, warn};

use super::edges::{triangle_sides, unordered_edges_from_triangles, validate_triangles, UndirectedEdge};
use super::halfedge::{Connectivity, HalfEdge, HalfEdgeMesh};
use super::index::{check_capacity, EdgeId, FaceId, HalfEdgeId, MeshIndex, VertexId};
use super::vertex::Vertex;
use crate::error::{MeshError, Result};

/// Options controlling which inputs the builder tolerates.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Accept vertices that no triangle references (default: true).
    ///
    /// Such vertices keep their attributes but have no half-edge, no
    /// neighbors, and are not on the boundary.
    pub allow_isolated_vertices: bool,

    /// Accept vertices whose incident faces form more than one fan, such as
    /// two triangles touching at a single corner (default: false).
    ///
    /// When accepted, the one-ring of such a vertex covers only the fan of
    /// its representative half-edge.
    pub allow_nonmanifold_vertices: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            allow_isolated_vertices: true,
            allow_nonmanifold_vertices: false,
        }
    }
}

impl BuildOptions {
    /// Set whether unreferenced vertices are accepted.
    pub fn with_isolated_vertices(mut self, allow: bool) -> Self {
        self.allow_isolated_vertices = allow;
        self
    }

    /// Set whether non-manifold vertices are accepted.
    pub fn with_nonmanifold_vertices(mut self, allow: bool) -> Self {
        self.allow_nonmanifold_vertices = allow;
        self
    }
}

impl<I: MeshIndex> HalfEdgeMesh<I> {
    /// Build the half-edge structure from vertices, triangles, and the
    /// triangles' undirected edges.
    ///
    /// `edges` is normally the output of
    /// [`unordered_edges_from_triangles`](super::unordered_edges_from_triangles);
    /// callers who already have it avoid recomputing it. None of the inputs
    /// are referenced after this returns.
    ///
    /// # Errors
    /// [`MeshError::InvalidState`] if the mesh is already built. Any input
    /// error listed on [`MeshError`]; the mesh is left empty in that case.
    ///
    /// # Example
    /// ```
    /// use trimesh::mesh::{unordered_edges_from_triangles, HalfEdgeMesh, Vertex};
    ///
    /// let vertices = vec![
    ///     Vertex::from_coords(0.0, 0.0, 0.0),
    ///     Vertex::from_coords(1.0, 0.0, 0.0),
    ///     Vertex::from_coords(0.0, 1.0, 0.0),
    /// ];
    /// let triangles = vec![[0, 1, 2]];
    /// let edges = unordered_edges_from_triangles(vertices.len(), &triangles).unwrap();
    ///
    /// let mut mesh: HalfEdgeMesh = HalfEdgeMesh::new();
    /// mesh.build(&vertices, &triangles, &edges).unwrap();
    /// assert_eq!(mesh.num_halfedges(), 6);
    /// ```
    pub fn build<V>(&mut self, vertices: &[V], triangles: &[[usize; 3]], edges: &[UndirectedEdge]) -> Result<()>
    where
        V: Clone + Into<Vertex>,
    {
        self.build_with_options(vertices, triangles, edges, &BuildOptions::default())
    }

    /// [`build`](Self::build) with explicit [`BuildOptions`].
    pub fn build_with_options<V>(
        &mut self,
        vertices: &[V],
        triangles: &[[usize; 3]],
        edges: &[UndirectedEdge],
        options: &BuildOptions,
    ) -> Result<()>
    where
        V: Clone + Into<Vertex>,
    {
        if self.is_built() {
            return Err(MeshError::InvalidState(
                "mesh is already built; call clear() first".to_string(),
            ));
        }

        let vertices: Vec<Vertex> = vertices.iter().cloned().map(Into::into).collect();
        self.connectivity = Some(build_connectivity(vertices, triangles, edges, options)?);
        Ok(())
    }
}

/// Build a half-edge mesh from vertices and triangle faces, deriving the
/// undirected edges on the way.
///
/// # Example
/// ```
/// use trimesh::mesh::{build_from_triangles, HalfEdgeMesh};
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.5, 1.0, 0.0),
/// ];
/// let faces = vec![[0, 1, 2]];
///
/// let mesh: HalfEdgeMesh = build_from_triangles(&vertices, &faces).unwrap();
/// assert_eq!(mesh.num_vertices(), 3);
/// assert_eq!(mesh.num_faces(), 1);
/// ```
pub fn build_from_triangles<I, V>(vertices: &[V], faces: &[[usize; 3]]) -> Result<HalfEdgeMesh<I>>
where
    I: MeshIndex,
    V: Clone + Into<Vertex>,
{
    build_from_triangles_with_options(vertices, faces, &BuildOptions::default())
}

/// [`build_from_triangles`] with explicit [`BuildOptions`].
pub fn build_from_triangles_with_options<I, V>(
    vertices: &[V],
    faces: &[[usize; 3]],
    options: &BuildOptions,
) -> Result<HalfEdgeMesh<I>>
where
    I: MeshIndex,
    V: Clone + Into<Vertex>,
{
    let edges = unordered_edges_from_triangles(vertices.len(), faces)?;
    let mut mesh = HalfEdgeMesh::new();
    mesh.build_with_options(vertices, faces, &edges, options)?;
    Ok(mesh)
}

/// Convert a half-edge mesh back to vertex and triangle arrays.
///
/// Both come back in their original order, and every triangle in its
/// original winding.
pub fn to_face_vertex<I: MeshIndex>(mesh: &HalfEdgeMesh<I>) -> (Vec<Vertex>, Vec<[usize; 3]>) {
    let vertices = mesh.vertices().to_vec();

    let faces: Vec<[usize; 3]> = mesh
        .face_ids()
        .map(|f| {
            let [v0, v1, v2] = mesh.face_triangle(f);
            [v0.index(), v1.index(), v2.index()]
        })
        .collect();

    (vertices, faces)
}

fn build_connectivity<I: MeshIndex>(
    vertices: Vec<Vertex>,
    triangles: &[[usize; 3]],
    edges: &[UndirectedEdge],
    options: &BuildOptions,
) -> Result<Connectivity<I>> {
    if triangles.is_empty() {
        return Err(MeshError::EmptyMesh);
    }
    validate_triangles(vertices.len(), triangles)?;

    // Every boundary edge adds one half-edge, so 3F + E bounds the total.
    check_capacity::<I>("vertices", vertices.len())?;
    check_capacity::<I>("faces", triangles.len())?;
    check_capacity::<I>("edges", edges.len())?;
    check_capacity::<I>("half-edges", 3 * triangles.len() + edges.len())?;

    check_edge_manifold(triangles)?;

    let mut halfedges: Vec<HalfEdge<I>> = Vec::with_capacity(3 * triangles.len() + edges.len());
    let directed = link_faces(triangles, &mut halfedges)?;
    let edge_halfedges = link_opposites(triangles, edges, &directed, &mut halfedges)?;
    drop(directed);

    link_boundary_loops(&mut halfedges)?;

    let (vertex_halfedges, detached_halfedges) =
        assign_vertex_halfedges(vertices.len(), &halfedges, options)?;

    let face_halfedges = (0..triangles.len()).map(|f| HalfEdgeId::new(3 * f)).collect();

    debug!(
        "built half-edge mesh: {} vertices, {} faces, {} edges, {} half-edges ({} boundary)",
        vertices.len(),
        triangles.len(),
        edges.len(),
        halfedges.len(),
        halfedges.len() - 3 * triangles.len()
    );

    Ok(Connectivity {
        vertices,
        halfedges,
        vertex_halfedges,
        face_halfedges,
        edge_halfedges,
        detached_halfedges,
    })
}

/// Reject undirected edges with more than two incident triangle sides.
fn check_edge_manifold(triangles: &[[usize; 3]]) -> Result<()> {
    let mut sides: HashMap<UndirectedEdge, u32> = HashMap::with_capacity(triangles.len() * 2);
    for tri in triangles {
        for (a, b) in triangle_sides(tri) {
            let count = sides.entry(UndirectedEdge::new(a, b)).or_insert(0);
            *count += 1;
            if *count > 2 {
                let [v0, v1] = UndirectedEdge::new(a, b).vertices();
                return Err(MeshError::NonManifoldEdge { v0, v1 });
            }
        }
    }
    Ok(())
}

/// Create three half-edges per face, in winding order, linked into a cycle.
///
/// Face `f` owns half-edges `3f`, `3f + 1` and `3f + 2`; half-edge `3f + k`
/// runs from corner `k` to corner `k + 1`. Returns the map from directed edge
/// to half-edge, which lives only for the duration of the build.
fn link_faces<I: MeshIndex>(
    triangles: &[[usize; 3]],
    halfedges: &mut Vec<HalfEdge<I>>,
) -> Result<HashMap<(usize, usize), usize>> {
    let mut directed: HashMap<(usize, usize), usize> = HashMap::with_capacity(triangles.len() * 3);

    for (fi, tri) in triangles.iter().enumerate() {
        let face_id = FaceId::<I>::new(fi);
        for (k, (a, b)) in triangle_sides(tri).into_iter().enumerate() {
            let he = 3 * fi + k;
            if let Some(&other) = directed.get(&(a, b)) {
                return Err(MeshError::InconsistentOrientation {
                    v0: a,
                    v1: b,
                    first: other / 3,
                    second: fi,
                });
            }
            directed.insert((a, b), he);

            halfedges.push(HalfEdge {
                to_vertex: VertexId::new(b),
                face: face_id,
                next: HalfEdgeId::new(3 * fi + (k + 1) % 3),
                ..HalfEdge::new()
            });
        }
    }

    Ok(directed)
}

/// Pair up the half-edges of every undirected edge, synthesizing a boundary
/// half-edge where only one direction exists.
///
/// Returns the representative half-edge of each edge, always a face half-edge.
fn link_opposites<I: MeshIndex>(
    triangles: &[[usize; 3]],
    edges: &[UndirectedEdge],
    directed: &HashMap<(usize, usize), usize>,
    halfedges: &mut Vec<HalfEdge<I>>,
) -> Result<Vec<HalfEdgeId<I>>> {
    let mut seen: HashSet<UndirectedEdge> = HashSet::with_capacity(edges.len());
    let mut edge_halfedges = Vec::with_capacity(edges.len());

    for (ei, edge) in edges.iter().enumerate() {
        let [i, j] = edge.vertices();
        if !seen.insert(*edge) {
            return Err(MeshError::DuplicateEdge { v0: i, v1: j });
        }
        let edge_id = EdgeId::<I>::new(ei);

        let representative = match (directed.get(&(i, j)), directed.get(&(j, i))) {
            (Some(&h0), Some(&h1)) => {
                halfedges[h0].opposite = HalfEdgeId::new(h1);
                halfedges[h1].opposite = HalfEdgeId::new(h0);
                halfedges[h0].edge = edge_id;
                halfedges[h1].edge = edge_id;
                h0
            }
            (Some(&h), None) | (None, Some(&h)) => {
                // The missing direction runs back to the tail of h.
                let tail = if directed.get(&(i, j)) == Some(&h) { i } else { j };
                let boundary = halfedges.len();
                halfedges.push(HalfEdge {
                    to_vertex: VertexId::new(tail),
                    edge: edge_id,
                    opposite: HalfEdgeId::new(h),
                    ..HalfEdge::new()
                });
                halfedges[h].opposite = HalfEdgeId::new(boundary);
                halfedges[h].edge = edge_id;
                h
            }
            (None, None) => return Err(MeshError::OrphanEdge { v0: i, v1: j }),
        };
        edge_halfedges.push(HalfEdgeId::new(representative));
    }

    for (fi, tri) in triangles.iter().enumerate() {
        for (k, (a, b)) in triangle_sides(tri).into_iter().enumerate() {
            if !halfedges[3 * fi + k].edge.is_valid() {
                return Err(MeshError::MissingEdge { v0: a, v1: b });
            }
        }
    }

    Ok(edge_halfedges)
}

/// Set `next` on every boundary half-edge.
///
/// A boundary half-edge ending at `v` continues with the boundary half-edge
/// leaving `v` on the same fan: starting from its opposite, rotate around `v`
/// across interior edges until the outgoing half-edge is a boundary one.
fn link_boundary_loops<I: MeshIndex>(halfedges: &mut [HalfEdge<I>]) -> Result<()> {
    let total = halfedges.len();
    let first_boundary = halfedges.iter().position(|he| he.is_boundary()).unwrap_or(total);

    for b in first_boundary..total {
        let mut out = halfedges[b].opposite.index();
        let mut steps = 0;
        let next = loop {
            // out leaves v inside a face; the half-edge before it in that face
            // arrives at v, and its opposite leaves v one face further round.
            let incoming = halfedges[halfedges[out].next.index()].next.index();
            out = halfedges[incoming].opposite.index();
            if halfedges[out].is_boundary() {
                break out;
            }
            steps += 1;
            if steps > total {
                return Err(MeshError::InvalidState(format!(
                    "rotation around the head of boundary half-edge {} does not reach the boundary",
                    b
                )));
            }
        };
        halfedges[b].next = HalfEdgeId::new(next);
    }

    Ok(())
}

/// Choose an outgoing half-edge per vertex, preferring boundary ones, and
/// check that walking from it reaches every outgoing half-edge.
///
/// For tolerated non-manifold vertices, also returns the outgoing half-edges
/// the walk missed.
fn assign_vertex_halfedges<I: MeshIndex>(
    num_vertices: usize,
    halfedges: &[HalfEdge<I>],
    options: &BuildOptions,
) -> Result<(Vec<HalfEdgeId<I>>, BTreeMap<usize, Vec<HalfEdgeId<I>>>)> {
    let mut representative: Vec<HalfEdgeId<I>> = vec![HalfEdgeId::invalid(); num_vertices];
    let mut outgoing = vec![0usize; num_vertices];

    for (h, he) in halfedges.iter().enumerate() {
        let tail = halfedges[he.opposite.index()].to_vertex.index();
        outgoing[tail] += 1;
        let current = representative[tail];
        if !current.is_valid() || (he.is_boundary() && !halfedges[current.index()].is_boundary()) {
            representative[tail] = HalfEdgeId::new(h);
        }
    }

    let mut reached_by_walk: BTreeMap<usize, HashSet<usize>> = BTreeMap::new();
    for v in 0..num_vertices {
        let start = representative[v];
        if !start.is_valid() {
            if !options.allow_isolated_vertices {
                return Err(MeshError::IsolatedVertex { vertex: v });
            }
            continue;
        }

        let mut he = start;
        let mut reached = 0;
        let mut walked = Vec::new();
        loop {
            reached += 1;
            walked.push(he.index());
            he = halfedges[halfedges[he.index()].opposite.index()].next;
            if he == start || reached > outgoing[v] {
                break;
            }
        }

        if reached != outgoing[v] {
            if !options.allow_nonmanifold_vertices {
                return Err(MeshError::NonManifoldVertex {
                    vertex: v,
                    reached,
                    outgoing: outgoing[v],
                });
            }
            warn!(
                "vertex {} is non-manifold: one-ring reaches {} of {} outgoing half-edges",
                v, reached, outgoing[v]
            );
            reached_by_walk.insert(v, walked.into_iter().collect());
        }
    }

    let mut detached: BTreeMap<usize, Vec<HalfEdgeId<I>>> = BTreeMap::new();
    if !reached_by_walk.is_empty() {
        for (h, he) in halfedges.iter().enumerate() {
            let tail = halfedges[he.opposite.index()].to_vertex.index();
            if let Some(walked) = reached_by_walk.get(&tail) {
                if !walked.contains(&h) {
                    detached.entry(tail).or_default().push(HalfEdgeId::new(h));
                }
            }
        }
    }

    Ok((representative, detached))
}
