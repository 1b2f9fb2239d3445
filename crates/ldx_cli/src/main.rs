//! `ldx`: lay an LDraw model's bricks out on a ground plate.
//!
//! Run with: cargo run --release --bin ldx -- assets/models/house.mpd
//!
//! The reference database is read from `$LDX_DATABASE` (default
//! `ldraw_db.json`); build it once with `ldx_index`.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use ldx_core::convert::{convert_file, ConvertOptions};
use ldx_core::ground::ShelfPacker;
use ldx_core::ldraw::ReferenceDatabase;

const DATABASE_VAR: &str = "LDX_DATABASE";
const DEFAULT_DATABASE: &str = "ldraw_db.json";
const MODEL_EXTENSIONS: [&str; 2] = ["ldr", "mpd"];

/// The single model path, checked for a supported extension.
fn parse_args(args: &[String]) -> Result<PathBuf> {
    if args.len() != 2 {
        let program = args.first().map(String::as_str).unwrap_or("ldx");
        bail!("Usage: {} <model.ldr|model.mpd>", program);
    }

    let input = PathBuf::from(&args[1]);
    if !has_model_extension(&input) {
        bail!("{} is not an .ldr or .mpd file", input.display());
    }
    Ok(input)
}

fn has_model_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| MODEL_EXTENSIONS.iter().any(|m| m.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

fn database_path() -> PathBuf {
    env::var_os(DATABASE_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE))
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: Vec<String> = env::args().collect();
    let input = parse_args(&args)?;

    let db_path = database_path();
    let database = ReferenceDatabase::load(&db_path)
        .with_context(|| format!("Failed to load reference database {}", db_path.display()))?;

    let conversion = convert_file(&input, &database, &ConvertOptions::default(), &ShelfPacker::default())
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    if conversion.skipped_count() > 0 {
        log::warn!("{} bricks had no geometry and were left out", conversion.skipped_count());
    }

    println!("{}", conversion.output.display());
    println!(
        "Plate {} x {} LDU, {} bricks",
        conversion.layout.width,
        conversion.layout.depth,
        conversion.brick_count()
    );
    Ok(())
}
