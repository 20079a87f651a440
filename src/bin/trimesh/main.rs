//! trimesh CLI - inspect half-edge connectivity of PLY triangle meshes.
//!
//! Usage: trimesh <COMMAND> [OPTIONS] <INPUT> [OUTPUT]
//!
//! Run `trimesh --help` for available commands. Set `RUST_LOG=debug` to see
//! build summaries.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use trimesh::io;
use trimesh::mesh::{HalfEdgeMesh, MeshIndex, VertexId};

#[derive(Parser)]
#[command(name = "trimesh")]
#[command(author, version, about = "Half-edge triangle mesh CLI", long_about = None)]
struct Cli {
    /// Integer width used for mesh indices
    #[arg(long, value_enum, global = true, default_value = "u32")]
    index: IndexWidth,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display mesh information
    Info {
        /// Input mesh file
        input: PathBuf,
    },

    /// Print vertex one-rings
    Neighbors {
        /// Input mesh file
        input: PathBuf,

        /// Only print the one-ring of this vertex
        #[arg(short, long)]
        vertex: Option<usize>,

        /// Print neighbor positions next to their indices
        #[arg(short, long)]
        positions: bool,
    },

    /// Read, build, and write a mesh with the full attribute set
    Convert {
        /// Input mesh file
        input: PathBuf,

        /// Output mesh file
        output: PathBuf,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum IndexWidth {
    /// 16-bit indices (up to 65534 elements)
    U16,
    /// 32-bit indices
    U32,
    /// 64-bit indices
    U64,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.index {
        IndexWidth::U16 => dispatch::<u16>(cli.command),
        IndexWidth::U32 => dispatch::<u32>(cli.command),
        IndexWidth::U64 => dispatch::<u64>(cli.command),
    }
}

fn dispatch<I: MeshIndex>(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Info { input } => cmd_info::<I>(&input)?,
        Commands::Neighbors {
            input,
            vertex,
            positions,
        } => cmd_neighbors::<I>(&input, vertex, positions)?,
        Commands::Convert { input, output } => cmd_convert::<I>(&input, &output)?,
    }

    Ok(())
}

fn load<I: MeshIndex>(input: &Path) -> Result<HalfEdgeMesh<I>, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let mesh: HalfEdgeMesh<I> = io::load_mesh(input)?;
    info!("Loaded {} in {:.2?}", input.display(), start.elapsed());
    Ok(mesh)
}

fn cmd_info<I: MeshIndex>(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = load::<I>(input)?;

    println!("File: {}", input.display());
    println!("Vertices: {}", mesh.num_vertices());
    println!("Faces: {}", mesh.num_faces());
    println!("Edges: {}", mesh.num_edges());
    println!("Half-edges: {}", mesh.num_halfedges());

    let boundary_edges = mesh.boundary_edges().len();
    let boundary_vertices = mesh.boundary_vertices().len();
    if boundary_edges == 0 {
        println!("Boundary: closed");
    } else {
        println!(
            "Boundary: {} edges, {} vertices",
            boundary_edges, boundary_vertices
        );
    }

    let isolated = mesh
        .vertex_ids()
        .filter(|&v| !mesh.vertex_halfedge(v).is_valid())
        .count();
    if isolated > 0 {
        println!("Isolated vertices: {}", isolated);
    }

    let (min_valence, max_valence) = mesh
        .vertex_ids()
        .map(|v| mesh.vertex_valence(v))
        .fold((usize::MAX, 0), |(lo, hi), n| (lo.min(n), hi.max(n)));
    println!("Valence range: [{}, {}]", min_valence, max_valence);

    if let Some((min, max)) = mesh.bounding_box() {
        println!(
            "Bounding box: ({:.3}, {:.3}, {:.3}) to ({:.3}, {:.3}, {:.3})",
            min.x, min.y, min.z, max.x, max.y, max.z
        );
        let diag = max - min;
        println!("Dimensions: {:.3} x {:.3} x {:.3}", diag.x, diag.y, diag.z);
    }

    Ok(())
}

fn cmd_neighbors<I: MeshIndex>(
    input: &Path,
    vertex: Option<usize>,
    positions: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = load::<I>(input)?;

    let range = match vertex {
        Some(v) if v >= mesh.num_vertices() => {
            return Err(format!(
                "vertex {} out of range (mesh has {} vertices)",
                v,
                mesh.num_vertices()
            )
            .into());
        }
        Some(v) => v..v + 1,
        None => 0..mesh.num_vertices(),
    };

    for vi in range {
        let mut line = format!("neighbors of vertex {}: ", vi);
        for n in mesh.vertex_vertex_neighbors(VertexId::new(vi)) {
            line.push_str(&format!(" {}", n.index()));
            if positions {
                let p = mesh.position(n);
                line.push_str(&format!("( {}, {}, {} )", p.x, p.y, p.z));
            }
        }
        println!("{}", line);
    }

    Ok(())
}

fn cmd_convert<I: MeshIndex>(
    input: &Path,
    output: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = load::<I>(input)?;

    let start = Instant::now();
    io::save(&mesh, output)?;
    info!("Wrote {} in {:.2?}", output.display(), start.elapsed());

    println!(
        "Converted {} -> {} ({} vertices, {} faces)",
        input.display(),
        output.display(),
        mesh.num_vertices(),
        mesh.num_faces()
    );

    Ok(())
}
