//! Print the moves available from one cell of a layered world file.
//!
//! Run: cargo run --bin blockpath-demo -- demo/worlds/ledge.txt --scaffold 4
//! Set RUST_LOG=debug (or trace) to see the model's reasoning.

use std::path::PathBuf;

use blockpath_core::Pos;
use blockpath_demo::{DemoError, Request, expand, parse_config};
use clap::Parser;

/// Expand one search node and list its successor moves.
#[derive(Parser, Debug)]
#[command(name = "blockpath-demo")]
#[command(version)]
struct Args {
    /// Layered world file (`y=N` headers, one glyph per cell)
    world: PathBuf,

    /// Feet cell as x,y,z; defaults to the `@` in the world file
    #[arg(long, value_parser = parse_pos)]
    at: Option<Pos>,

    /// Scaffolding blocks the agent carries
    #[arg(short, long, default_value_t = 0)]
    scaffold: u32,

    /// JSON file overriding movement options
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// World version selecting the block table
    #[arg(long, default_value = "1.16.5")]
    version: String,
}

fn parse_pos(s: &str) -> Result<Pos, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected x,y,z, got {s:?}"));
    };
    let n = |v: &str| v.parse::<i32>().map_err(|e| format!("{v:?}: {e}"));
    Ok(Pos::new(n(*x)?, n(*y)?, n(*z)?))
}

fn run(args: Args) -> Result<(), DemoError> {
    let world = std::fs::read_to_string(&args.world)?;
    let config = match &args.config {
        Some(path) => parse_config(&std::fs::read_to_string(path)?)?,
        None => Default::default(),
    };
    let req = Request {
        version: args.version,
        config,
        at: args.at,
        scaffold: args.scaffold,
    };
    print!("{}", expand(&world, &req)?);
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
