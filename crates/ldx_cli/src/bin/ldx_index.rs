// Build the reference database from an LDraw library.
// Run with: cargo run --release --bin ldx_index -- <ldraw-dir> [out.json] [--unofficial]
//
// The library root may also come from $LDRAW_DIR.

use std::env;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use ldx_index::{build_database, IndexConfig};

const LIBRARY_VAR: &str = "LDRAW_DIR";
const DEFAULT_OUTPUT: &str = "ldraw_db.json";
const UNOFFICIAL_FLAG: &str = "--unofficial";

struct Args {
    config: IndexConfig,
    output: PathBuf,
}

fn parse_args(args: &[String], library_var: Option<PathBuf>) -> Result<Args> {
    let include_unofficial = args.iter().skip(1).any(|a| a == UNOFFICIAL_FLAG);
    let positional: Vec<&String> = args.iter().skip(1).filter(|a| *a != UNOFFICIAL_FLAG).collect();

    if let Some(flag) = positional.iter().find(|a| a.starts_with("--")) {
        bail!("Unknown option {}", flag);
    }

    let (root, output) = match (positional.as_slice(), library_var) {
        ([], Some(root)) => (root, PathBuf::from(DEFAULT_OUTPUT)),
        ([root], _) => (PathBuf::from(root), PathBuf::from(DEFAULT_OUTPUT)),
        ([root, out], _) => (PathBuf::from(root), PathBuf::from(out)),
        _ => bail!("Usage: ldx_index <ldraw-dir> [out.json] [{}]", UNOFFICIAL_FLAG),
    };

    Ok(Args {
        config: IndexConfig {
            root,
            include_unofficial,
        },
        output,
    })
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: Vec<String> = env::args().collect();
    let Args { config, output } = parse_args(&args, env::var_os(LIBRARY_VAR).map(PathBuf::from))?;

    let start = Instant::now();
    let database = build_database(&config)
        .with_context(|| format!("Failed to index {}", config.root.display()))?;
    database
        .save(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "{} parts, {} primitives -> {} ({:.1}s)",
        database.part_count(),
        database.primitive_count(),
        output.display(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_positional_root_and_output() {
        let parsed = parse_args(&args(&["ldx_index", "/lib", "db.json", "--unofficial"]), None).unwrap();
        assert_eq!(parsed.config.root, PathBuf::from("/lib"));
        assert!(parsed.config.include_unofficial);
        assert_eq!(parsed.output, PathBuf::from("db.json"));
    }

    #[test]
    fn test_root_from_environment() {
        let parsed = parse_args(&args(&["ldx_index"]), Some(PathBuf::from("/env/ldraw"))).unwrap();
        assert_eq!(parsed.config.root, PathBuf::from("/env/ldraw"));
        assert!(!parsed.config.include_unofficial);
        assert_eq!(parsed.output, PathBuf::from(DEFAULT_OUTPUT));
    }

    #[test]
    fn test_bad_usage() {
        assert!(parse_args(&args(&["ldx_index"]), None).is_err());
        assert!(parse_args(&args(&["ldx_index", "a", "b", "c"]), None).is_err());
        assert!(parse_args(&args(&["ldx_index", "/lib", "--verbose"]), None).is_err());
    }
}
