//! PLY (Stanford polygon) format support.
//!
//! Reading accepts ASCII or binary PLY through `ply-rs`. A file without a
//! face element loads as a point cloud with no triangles. The vertex element
//! must carry `x`, `y`, `z`; `red`/`green`/`blue`, `nx`/`ny`/`nz` and
//! `curvature` are picked up when the header declares them, in any order.
//! Attributes the file does not declare are zero-filled.
//!
//! Writing always produces ASCII with the full attribute set, whatever the
//! source file contained, so a read-write cycle of a positions-only file
//! gains zeroed color, normal, and curvature columns.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use nalgebra::{Point3, Vector3};
use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Property};

use crate::error::{MeshError, Result};
use crate::mesh::{build_from_triangles, to_face_vertex, HalfEdgeMesh, MeshIndex, Vertex};

/// Which optional vertex attributes a file declared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VertexAttributes {
    /// Any of `red`, `green`, `blue`.
    pub color: bool,
    /// Any of `nx`, `ny`, `nz`.
    pub normal: bool,
    /// `curvature`.
    pub curvature: bool,
}

impl VertexAttributes {
    /// All optional attributes present, as written by [`save`].
    pub fn all() -> Self {
        Self {
            color: true,
            normal: true,
            curvature: true,
        }
    }
}

/// Vertex and triangle arrays read from a PLY file.
#[derive(Debug, Clone)]
pub struct PlyData {
    /// Vertices in file order.
    pub vertices: Vec<Vertex>,
    /// Triangles in file order.
    pub triangles: Vec<[usize; 3]>,
    /// Optional attributes the file declared.
    pub attributes: VertexAttributes,
}

impl PlyData {
    /// Build a half-edge mesh from the loaded arrays.
    pub fn build<I: MeshIndex>(&self) -> Result<HalfEdgeMesh<I>> {
        build_from_triangles(&self.vertices, &self.triangles)
    }
}

/// Load vertex and triangle arrays from a PLY file.
///
/// # Example
///
/// ```no_run
/// use trimesh::io::ply;
/// use trimesh::mesh::HalfEdgeMesh;
///
/// let data = ply::load("model.ply").unwrap();
/// let mesh: HalfEdgeMesh = data.build().unwrap();
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<PlyData> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    parse(&mut reader, path)
}

/// Read vertex and triangle arrays from any PLY source.
pub fn read<R: Read>(reader: &mut R) -> Result<PlyData> {
    parse(reader, Path::new("<stream>"))
}

fn parse<R: Read>(reader: &mut R, path: &Path) -> Result<PlyData> {
    let parser = Parser::<DefaultElement>::new();
    let ply = parser
        .read_ply(reader)
        .map_err(|e| MeshError::load(path, e.to_string()))?;

    let vertex_def = ply
        .header
        .elements
        .get("vertex")
        .ok_or_else(|| MeshError::load(path, "PLY file has no vertex element"))?;
    let declares = |names: &[&str]| names.iter().any(|n| vertex_def.properties.contains_key(*n));
    let attributes = VertexAttributes {
        color: declares(&["red", "green", "blue"]),
        normal: declares(&["nx", "ny", "nz"]),
        curvature: declares(&["curvature"]),
    };

    let vertex_element = ply
        .payload
        .get("vertex")
        .ok_or_else(|| MeshError::load(path, "PLY file has no vertex element"))?;

    let mut vertices: Vec<Vertex> = Vec::with_capacity(vertex_element.len());
    for (vi, element) in vertex_element.iter().enumerate() {
        let coord = |name: &str| {
            get_float_property(element, name).ok_or_else(|| {
                MeshError::load(path, format!("vertex {} missing {} coordinate", vi, name))
            })
        };
        let mut vertex = Vertex::new(Point3::new(coord("x")?, coord("y")?, coord("z")?));

        let optional = |name: &str| get_float_property(element, name).unwrap_or(0.0);
        if attributes.color {
            vertex.color = [
                to_channel(optional("red")),
                to_channel(optional("green")),
                to_channel(optional("blue")),
            ];
        }
        if attributes.normal {
            vertex.normal = Vector3::new(optional("nx"), optional("ny"), optional("nz"));
        }
        if attributes.curvature {
            vertex.curvature = optional("curvature");
        }
        vertices.push(vertex);
    }

    // A file without a face element is a point cloud.
    let face_element: &[DefaultElement] = ply.payload.get("face").map_or(&[], |f| f.as_slice());

    let mut triangles: Vec<[usize; 3]> = Vec::with_capacity(face_element.len());
    for (fi, face) in face_element.iter().enumerate() {
        let indices = get_list_property(face, "vertex_indices")
            .or_else(|| get_list_property(face, "vertex_index"))
            .ok_or_else(|| {
                MeshError::load(path, format!("face {} missing vertex_indices property", fi))
            })?;

        if indices.len() != 3 {
            return Err(MeshError::load(
                path,
                format!("face {} has {} vertices; only triangles are supported", fi, indices.len()),
            ));
        }

        let mut tri = [0usize; 3];
        for (slot, &index) in tri.iter_mut().zip(&indices) {
            *slot = usize::try_from(index).map_err(|_| {
                MeshError::load(path, format!("face {} has negative vertex index {}", fi, index))
            })?;
        }
        triangles.push(tri);
    }

    Ok(PlyData {
        vertices,
        triangles,
        attributes,
    })
}

fn get_float_property(element: &DefaultElement, name: &str) -> Option<f64> {
    match element.get(name)? {
        Property::Float(v) => Some(*v as f64),
        Property::Double(v) => Some(*v),
        Property::Int(v) => Some(*v as f64),
        Property::UInt(v) => Some(*v as f64),
        Property::Short(v) => Some(*v as f64),
        Property::UShort(v) => Some(*v as f64),
        Property::Char(v) => Some(*v as f64),
        Property::UChar(v) => Some(*v as f64),
        _ => None,
    }
}

fn get_list_property(element: &DefaultElement, name: &str) -> Option<Vec<i64>> {
    match element.get(name)? {
        Property::ListInt(v) => Some(v.iter().map(|&x| x as i64).collect()),
        Property::ListUInt(v) => Some(v.iter().map(|&x| x as i64).collect()),
        Property::ListShort(v) => Some(v.iter().map(|&x| x as i64).collect()),
        Property::ListUShort(v) => Some(v.iter().map(|&x| x as i64).collect()),
        Property::ListChar(v) => Some(v.iter().map(|&x| x as i64).collect()),
        Property::ListUChar(v) => Some(v.iter().map(|&x| x as i64).collect()),
        _ => None,
    }
}

fn to_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Save a mesh to a PLY file (ASCII format).
///
/// # Example
///
/// ```no_run
/// use trimesh::io::ply;
/// use trimesh::mesh::HalfEdgeMesh;
///
/// let mesh: HalfEdgeMesh = ply::load("in.ply").unwrap().build().unwrap();
/// ply::save(&mesh, "output.ply").unwrap();
/// ```
pub fn save<P: AsRef<Path>, I: MeshIndex>(mesh: &HalfEdgeMesh<I>, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write(mesh, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write a mesh as ASCII PLY with position, color, normal, and curvature.
pub fn write<W: Write, I: MeshIndex>(mesh: &HalfEdgeMesh<I>, writer: &mut W) -> Result<()> {
    if !mesh.is_built() {
        return Err(MeshError::InvalidState("cannot write an empty mesh".to_string()));
    }

    let (vertices, faces) = to_face_vertex(mesh);

    // Write header
    writeln!(writer, "ply")?;
    writeln!(writer, "format ascii 1.0")?;
    writeln!(writer, "comment Generated by trimesh")?;
    writeln!(writer, "element vertex {}", vertices.len())?;
    writeln!(writer, "property float x")?;
    writeln!(writer, "property float y")?;
    writeln!(writer, "property float z")?;
    writeln!(writer, "property uchar red")?;
    writeln!(writer, "property uchar green")?;
    writeln!(writer, "property uchar blue")?;
    writeln!(writer, "property float nx")?;
    writeln!(writer, "property float ny")?;
    writeln!(writer, "property float nz")?;
    writeln!(writer, "property float curvature")?;
    writeln!(writer, "element face {}", faces.len())?;
    writeln!(writer, "property list uchar int vertex_indices")?;
    writeln!(writer, "end_header")?;

    for v in &vertices {
        let p = v.position.map(|c| c as f32);
        let n = v.normal.map(|c| c as f32);
        let [r, g, b] = v.color;
        writeln!(
            writer,
            "{} {} {} {} {} {} {} {} {} {}",
            p.x, p.y, p.z, r, g, b, n.x, n.y, n.z, v.curvature as f32
        )?;
    }

    for f in &faces {
        writeln!(writer, "3 {} {} {}", f[0], f[1], f[2])?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::VertexId;
    use std::io::Cursor;

    const POSITIONS_ONLY: &str = "ply
format ascii 1.0
element vertex 4
property float x
property float y
property float z
element face 2
property list uchar int vertex_indices
end_header
0 2 0
0 1 0
1 1 0
0 0 0
3 0 1 2
3 2 1 3
";

    fn read_str(s: &str) -> Result<PlyData> {
        read(&mut Cursor::new(s.as_bytes()))
    }

    #[test]
    fn test_read_positions_only() {
        let data = read_str(POSITIONS_ONLY).unwrap();
        assert_eq!(data.vertices.len(), 4);
        assert_eq!(data.triangles, vec![[0, 1, 2], [2, 1, 3]]);
        assert_eq!(data.attributes, VertexAttributes::default());
        assert_eq!(data.vertices[0].position, Point3::new(0.0, 2.0, 0.0));
        assert_eq!(data.vertices[0].color, [0, 0, 0]);
        assert_eq!(data.vertices[0].curvature, 0.0);

        let mesh: HalfEdgeMesh = data.build().unwrap();
        let ring: Vec<usize> = mesh
            .vertex_vertex_neighbors(VertexId::new(2))
            .iter()
            .map(|v| v.index())
            .collect();
        assert_eq!(ring, vec![3, 1, 0]);
    }

    #[test]
    fn test_read_attributes_in_any_order() {
        let src = "ply
format ascii 1.0
element vertex 3
property float curvature
property float nz
property float x
property uchar blue
property float y
property float z
element face 1
property list uchar int vertex_indices
end_header
0.5 1 0 7 0 0
0.25 1 1 8 0 0
0 1 0 9 1 0
3 0 1 2
";
        let data = read_str(src).unwrap();
        assert!(data.attributes.color);
        assert!(data.attributes.normal);
        assert!(data.attributes.curvature);

        let v1 = &data.vertices[1];
        assert_eq!(v1.position, Point3::new(1.0, 0.0, 0.0));
        assert_eq!(v1.color, [0, 0, 8]);
        assert_eq!(v1.normal, Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(v1.curvature, 0.25);
    }

    #[test]
    fn test_rejects_non_triangle_face() {
        let src = "ply
format ascii 1.0
element vertex 4
property float x
property float y
property float z
element face 1
property list uchar int vertex_indices
end_header
0 0 0
1 0 0
1 1 0
0 1 0
4 0 1 2 3
";
        let err = read_str(src).unwrap_err();
        assert!(err.to_string().contains("only triangles"));
    }

    #[test]
    fn test_rejects_negative_index() {
        let src = POSITIONS_ONLY.replace("3 2 1 3", "3 2 1 -1");
        let err = read_str(&src).unwrap_err();
        assert!(err.to_string().contains("negative vertex index -1"));
    }

    #[test]
    fn test_read_point_cloud() {
        let src = "ply
format ascii 1.0
element vertex 2
property float x
property float y
property float z
end_header
0 0 0
1 2 3
";
        let data = read_str(src).unwrap();
        assert_eq!(data.vertices.len(), 2);
        assert_eq!(data.vertices[1].position, Point3::new(1.0, 2.0, 3.0));
        assert!(data.triangles.is_empty());

        // The arrays load; building connectivity needs triangles.
        let built: Result<HalfEdgeMesh> = data.build();
        assert!(matches!(built, Err(MeshError::EmptyMesh)));
    }

    #[test]
    fn test_missing_vertex_element() {
        let src = "ply
format ascii 1.0
element face 0
property list uchar int vertex_indices
end_header
";
        assert!(matches!(read_str(src), Err(MeshError::LoadError { .. })));
    }

    #[test]
    fn test_write_emits_full_attribute_set() {
        let data = read_str(POSITIONS_ONLY).unwrap();
        let mesh: HalfEdgeMesh = data.build().unwrap();

        let mut out = Vec::new();
        write(&mesh, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("property float curvature"));
        assert!(text.contains("property uchar red"));
        assert!(text.contains("0 2 0 0 0 0 0 0 0 0\n"));
        assert!(text.ends_with("3 2 1 3\n"));

        // Attributes absent on input come back zero-filled but declared.
        let again = read_str(&text).unwrap();
        assert_eq!(again.attributes, VertexAttributes::all());
        assert_eq!(again.vertices, data.vertices);
    }

    #[test]
    fn test_roundtrip_preserves_attributes() {
        let vertices = vec![
            Vertex::from_coords(0.1, 0.2, 0.3)
                .with_color([255, 0, 17])
                .with_normal(Vector3::new(0.0, 0.6, 0.8))
                .with_curvature(-1.5),
            Vertex::from_coords(1.0, 0.0, 0.0).with_color([1, 2, 3]),
            Vertex::from_coords(0.0, 1.0, 0.0).with_curvature(0.125),
            Vertex::from_coords(1.0, 1.0, 0.5),
        ];
        let triangles = vec![[0, 1, 2], [2, 1, 3]];
        let mesh: HalfEdgeMesh = build_from_triangles(&vertices, &triangles).unwrap();

        let mut out = Vec::new();
        write(&mesh, &mut out).unwrap();
        let data = read(&mut Cursor::new(out)).unwrap();

        assert_eq!(data.vertices.len(), vertices.len());
        assert_eq!(data.triangles, triangles);
        for (a, b) in vertices.iter().zip(&data.vertices) {
            assert!((a.position - b.position).norm() < 1e-6);
            assert!((a.normal - b.normal).norm() < 1e-6);
            assert!((a.curvature - b.curvature).abs() < 1e-6);
            assert_eq!(a.color, b.color);
        }
    }

    #[test]
    fn test_write_empty_mesh_fails() {
        let mesh: HalfEdgeMesh = HalfEdgeMesh::new();
        let mut out = Vec::new();
        assert!(matches!(write(&mesh, &mut out), Err(MeshError::InvalidState(_))));
    }
}
