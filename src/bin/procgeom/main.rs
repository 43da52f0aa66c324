//! procgeom CLI - tessellate standard surfaces and inspect the result.
//!
//! Usage: procgeom <COMMAND> <NAME> [OPTIONS]
//!
//! Run `procgeom --help` for available commands. Set `RUST_LOG=debug` to see
//! library diagnostics.

use std::f64::consts::PI;
use std::time::Instant;

use clap::{Args, Parser, Subcommand, ValueEnum};

use procgeom::algo::curvature::{compute_curvature, compute_curvature_sequential};
use procgeom::algo::discretize::Resolution;
use procgeom::algo::kdtree::BoundingTree;
use procgeom::algo::modifiers::triangulate;
use procgeom::algo::tessellate::{tessellate_with_options, TessellateOptions};
use procgeom::geom::{Aabb, Bounded};
use procgeom::mesh::{FaceIndices, GridMesh, PolyMesh, Topology, VertexId};
use procgeom::procedural::{surfaces, ParametricSurface};

#[derive(Parser)]
#[command(name = "procgeom")]
#[command(author, version, about = "Procedural geometry CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tessellate a surface and print mesh statistics
    Surface {
        #[command(flatten)]
        grid: GridArgs,

        /// Show curvature statistics
        #[arg(long)]
        curvature: bool,
    },

    /// Print the connectivity of a tessellated surface
    Topology {
        #[command(flatten)]
        grid: GridArgs,

        /// Split every quad into two triangles first
        #[arg(long)]
        triangulate: bool,
    },

    /// Build a bounding tree over the faces of a tessellated surface
    Tree {
        #[command(flatten)]
        grid: GridArgs,

        /// Nodes with fewer faces than this are not split
        #[arg(long, default_value = "8")]
        leaf_size: usize,
    },
}

#[derive(Args)]
struct GridArgs {
    /// Surface to tessellate
    #[arg(value_enum)]
    name: SurfaceName,

    /// Cells along u
    #[arg(short, long, default_value = "32", allow_negative_numbers = true)]
    columns: i64,

    /// Cells along v
    #[arg(short, long, default_value = "32", allow_negative_numbers = true)]
    rows: i64,

    /// Use single-threaded execution (for benchmarking)
    #[arg(long)]
    sequential: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum SurfaceName {
    /// Unit sphere
    Sphere,
    /// Torus with radii 2 and 0.5
    Torus,
    /// Unit square
    Plane,
    /// Unit disc
    Disc,
    /// Open unit cylinder
    Cylinder,
    /// Open unit cone
    Cone,
    /// Trefoil tube
    Trefoil,
    /// Monkey saddle height field
    MonkeySaddle,
    /// Capsule
    Capsule,
}

impl SurfaceName {
    fn surface(self) -> ParametricSurface {
        match self {
            SurfaceName::Sphere => surfaces::sphere(),
            SurfaceName::Torus => surfaces::torus(2.0, 0.5),
            SurfaceName::Plane => surfaces::plane(),
            SurfaceName::Disc => surfaces::disc(),
            SurfaceName::Cylinder => surfaces::cylinder(),
            SurfaceName::Cone => surfaces::cone(1.0),
            SurfaceName::Trefoil => surfaces::trefoil(1.0),
            SurfaceName::MonkeySaddle => surfaces::monkey_saddle(),
            SurfaceName::Capsule => surfaces::capsule(),
        }
    }
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Commands::Surface { grid, curvature } => cmd_surface(&grid, curvature),
        Commands::Topology { grid, triangulate } => cmd_topology(&grid, triangulate),
        Commands::Tree { grid, leaf_size } => cmd_tree(&grid, leaf_size),
    }
}

/// Validate the resolution and tessellate the named surface.
fn build_grid(args: &GridArgs) -> CliResult<GridMesh> {
    let resolution = Resolution::try_from((args.columns, args.rows))?;
    let options = TessellateOptions::new(resolution.columns, resolution.rows)
        .with_parallel(!args.sequential);
    let mode = if args.sequential { "sequential" } else { "parallel" };

    let start = Instant::now();
    let grid = tessellate_with_options(&args.name.surface(), options);
    println!(
        "Tessellated {}x{} cells ({}, {:.2?})",
        resolution.columns,
        resolution.rows,
        mode,
        start.elapsed()
    );
    Ok(grid)
}

fn print_bounds(bounds: &Aabb) {
    if bounds.is_empty() {
        println!("Bounding box: empty");
        return;
    }
    let (min, max) = (bounds.min, bounds.max);
    println!(
        "Bounding box: ({:.3}, {:.3}, {:.3}) to ({:.3}, {:.3}, {:.3})",
        min.x, min.y, min.z, max.x, max.y, max.z
    );
    let diag = bounds.extent();
    println!("Dimensions: {:.3} x {:.3} x {:.3}", diag.x, diag.y, diag.z);
}

fn stats(values: &[f64]) -> (f64, f64, f64) {
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let avg = values.iter().sum::<f64>() / values.len().max(1) as f64;
    (min, max, avg)
}

fn cmd_surface(args: &GridArgs, show_curvature: bool) -> CliResult<()> {
    let grid = build_grid(args)?;
    let mesh = grid.quad_mesh();

    println!("Samples: {} x {}", grid.columns(), grid.rows());
    println!("Vertices: {}", mesh.num_vertices());
    println!("Faces: {}", mesh.num_faces());
    println!("Closed: u={}, v={}", grid.is_closed_u(), grid.is_closed_v());
    println!("Surface area: {:.6}", mesh.area());
    if mesh.has_degenerate_faces() {
        println!("Warning: mesh has degenerate faces");
    }
    print_bounds(&grid.bounds());

    if show_curvature {
        let topology = Topology::build(mesh)?;
        let start = Instant::now();
        let curv = if args.sequential {
            compute_curvature_sequential(&topology)
        } else {
            compute_curvature(&topology)
        };
        let elapsed = start.elapsed();

        let (g_min, g_max, g_avg) = stats(curv.gaussian_values());
        let (m_min, m_max, m_avg) = stats(curv.mean_values());

        println!("\nCurvature ({:.2?}):", elapsed);
        println!("  Gaussian: min={:.4}, max={:.4}, avg={:.4}", g_min, g_max, g_avg);
        println!("  Mean:     min={:.4}, max={:.4}, avg={:.4}", m_min, m_max, m_avg);

        if topology.is_closed() {
            let total: f64 = (0..curv.len())
                .map(VertexId::new)
                .map(|v| curv.gaussian(v) * curv.cell_area(v))
                .sum();
            println!("  Gauss-Bonnet Euler characteristic: {:.2}", total / (2.0 * PI));
        }
    }

    Ok(())
}

fn print_topology<F: FaceIndices>(mesh: &PolyMesh<F>) -> CliResult<()> {
    let start = Instant::now();
    let topology = Topology::build(mesh)?;
    let elapsed = start.elapsed();

    println!("Corners per face: {}", topology.corners_per_face());
    println!("Vertices: {}", topology.num_vertices());
    println!("Faces: {}", topology.num_faces());
    println!("Half-edges: {}", topology.num_half_edges());
    println!("Edges: {}", topology.num_edges());

    let border_edges = topology.border_edges().count();
    let border_faces = topology.border_faces().count();
    if border_edges == 0 {
        println!("Topology: Closed (no border)");
    } else {
        println!(
            "Topology: Open ({} border edges, {} border faces)",
            border_edges, border_faces
        );
    }
    if topology.is_non_manifold() {
        println!("Warning: non-manifold edges detected");
    }

    let euler = topology.num_vertices() as i64 - topology.num_edges() as i64
        + topology.num_faces() as i64;
    println!("Euler characteristic: {}", euler);
    println!("Built in {:.2?}", elapsed);
    Ok(())
}

fn cmd_topology(args: &GridArgs, split: bool) -> CliResult<()> {
    let grid = build_grid(args)?;
    if split {
        print_topology(&triangulate(grid.quad_mesh()))
    } else {
        print_topology(grid.quad_mesh())
    }
}

fn cmd_tree(args: &GridArgs, leaf_size: usize) -> CliResult<()> {
    let grid = build_grid(args)?;
    let mesh = grid.quad_mesh();
    let boxes: Vec<Aabb> = (0..mesh.num_faces())
        .map(|f| Aabb::from_points(mesh.face_points(f)))
        .collect();

    let start = Instant::now();
    let tree = BoundingTree::with_leaf_size(boxes, leaf_size);
    let build_time = start.elapsed();

    println!("Items: {}", tree.len());
    println!("Depth: {}", tree.depth());
    println!("Built in {:.2?}", build_time);
    print_bounds(tree.bounds());

    if !tree.is_empty() {
        // a window a quarter of the size of the whole, around its centre
        let bounds = tree.bounds();
        let half = bounds.extent() / 8.0;
        let center = bounds.center();
        let window = Aabb::new(center - half, center + half);

        let start = Instant::now();
        let hits = tree.query(&window).len();
        println!("Faces near the centre: {} ({:.2?})", hits, start.elapsed());
    }
    Ok(())
}
