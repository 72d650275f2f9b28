//! Single tree generation utility
//!
//! Grows one tree and writes it to stdout as JSON.
//!
//! Usage:
//!     generate_tree [OPTIONS]
//!
//! Options:
//!     -k, --kind <KIND>       Tree kind: broadleaf or pine (default: broadleaf)
//!     --seed <SEED>           Seed for the RNG (default: 12345)
//!     -p, --params <FILE>     JSON preset; keys it omits keep the broadleaf defaults
//!     --summary               Print a one-line summary instead of the mesh
//!     --weld <TOL>            Emit an indexed mesh with corners welded at TOL
//!     -h, --help              Show this help message

use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use serde::Serialize;

use tubetree::core::logging;
use tubetree::mesh::{FoliageProxy, GenerationStats, MaterialColors, MeshOutput, WeldedMesh};
use tubetree::procgen::{self, TreeKind, TreeParams};

fn print_help() {
    eprintln!("generate_tree - Single tree generation utility");
    eprintln!();
    eprintln!("Usage: generate_tree [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("    -k, --kind <KIND>       Tree kind: broadleaf or pine (default: broadleaf)");
    eprintln!("    --seed <SEED>           Seed for the RNG (default: 12345)");
    eprintln!("    -p, --params <FILE>     JSON preset; keys it omits keep the broadleaf defaults");
    eprintln!("    --summary               Print a one-line summary instead of the mesh");
    eprintln!("    --weld <TOL>            Emit an indexed mesh with corners welded at TOL");
    eprintln!("    -h, --help              Show this help message");
    eprintln!();
    eprintln!("Example:");
    eprintln!("    generate_tree --kind pine --seed 7 > pine.json");
    eprintln!("    generate_tree -p presets/willowish.json --summary");
}

#[derive(Debug)]
struct Args {
    kind: Option<TreeKind>,
    seed: u64,
    params_file: Option<PathBuf>,
    summary: bool,
    weld: Option<f64>,
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut kind: Option<TreeKind> = None;
    let mut seed: u64 = 12345;
    let mut params_file: Option<PathBuf> = None;
    let mut summary = false;
    let mut weld: Option<f64> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-k" | "--kind" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --kind".to_string());
                }
                kind = match args[i].to_lowercase().as_str() {
                    "broadleaf" => Some(TreeKind::Broadleaf),
                    "pine" => Some(TreeKind::Pine),
                    other => return Err(format!("Unknown kind: {}. Valid: broadleaf, pine", other)),
                };
            }
            "--seed" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --seed".to_string());
                }
                seed = args[i].parse().map_err(|_| format!("Invalid seed: {}", args[i]))?;
            }
            "-p" | "--params" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --params".to_string());
                }
                params_file = Some(PathBuf::from(&args[i]));
            }
            "--summary" => summary = true,
            "--weld" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --weld".to_string());
                }
                let tolerance = args[i]
                    .parse()
                    .map_err(|_| format!("Invalid weld tolerance: {}", args[i]))?;
                weld = Some(tolerance);
            }
            other => {
                return Err(format!("Unknown option: {}", other));
            }
        }
        i += 1;
    }

    Ok(Args {
        kind,
        seed,
        params_file,
        summary,
        weld,
    })
}

/// Welded trunk plus the untouched foliage, for `--weld`
#[derive(Serialize)]
struct WeldedOutput<'a> {
    mesh: WeldedMesh,
    foliage: &'a [FoliageProxy],
    stats: GenerationStats,
    materials: MaterialColors,
}

/// A preset file overrides the named preset; `--kind` wins over the file's own kind
fn load_params(args: &Args) -> tubetree::Result<TreeParams> {
    let mut params = match &args.params_file {
        Some(path) => {
            log::info!("Loading preset {}", path.display());
            TreeParams::from_json(&fs::read_to_string(path)?)?
        }
        None => TreeParams::from_kind(args.kind.unwrap_or_default()),
    };
    if let Some(kind) = args.kind {
        params.kind = kind;
    }
    Ok(params)
}

fn render(args: &Args, mesh: &MeshOutput) -> tubetree::Result<String> {
    if args.summary {
        return Ok(mesh.summary());
    }

    match args.weld {
        Some(tolerance) => {
            let welded = WeldedOutput {
                mesh: mesh.weld(tolerance),
                foliage: &mesh.foliage,
                stats: mesh.stats,
                materials: mesh.materials,
            };
            log::info!(
                "Welded {} quads into {} vertices",
                welded.mesh.face_count(),
                welded.mesh.vertex_count()
            );
            Ok(serde_json::to_string_pretty(&welded)?)
        }
        None => Ok(serde_json::to_string_pretty(mesh)?),
    }
}

fn run(args: &Args) -> tubetree::Result<String> {
    let params = load_params(args)?;
    log::info!("Growing {:?} tree with seed {}", params.kind, args.seed);

    let start = Instant::now();
    let mesh = procgen::generate(&params, args.seed)?;
    log::info!(
        "Generated {} quads and {} foliage proxies in {:.2}ms",
        mesh.quad_count(),
        mesh.foliage_count(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    render(args, &mesh)
}

fn main() {
    logging::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_help();
            std::process::exit(1);
        }
    };

    match run(&args) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
