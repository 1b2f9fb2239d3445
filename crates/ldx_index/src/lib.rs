//! LDX Index - builds the reference database from an LDraw library.
//!
//! Walks `p/` for primitive names and `parts/` for part files, resolves every
//! part's local bounding box in parallel, and collects the results into a
//! [`ReferenceDatabase`]. Sub-parts (`s/`) and texture folders are never
//! indexed; they are only reached through the parts that reference them.
//!
//! # Example
//!
//! ```ignore
//! use ldx_index::{build_database, IndexConfig};
//!
//! let db = build_database(&IndexConfig::new("/usr/share/ldraw"))?;
//! db.save("ldraw_db.json")?;
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use ldx_core::ldraw::{
    normalize_filename, GeometryCache, GeometryResolver, LdrawError, LdrawLibrary, LdrawResult, ReferenceDatabase,
    PARTS_DIR, PRIMITIVES_DIR, UNOFFICIAL_DIR,
};
use ldx_math::{BoundingBox, DMat4};
use rayon::prelude::*;
use thiserror::Error;

/// Directory names skipped during the walk (compared case-insensitively).
pub const SKIPPED_DIRS: [&str; 2] = ["textures", "s"];

/// Errors that can occur while indexing a library.
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("LDraw library not found at {}", .0.display())]
    MissingLibrary(PathBuf),

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("LDraw error: {0}")]
    Ldraw(#[from] LdrawError),
}

/// Result type for indexing.
pub type IndexResult<T> = Result<T, IndexError>;

/// Where and what to index.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// Library root containing `p/` and `parts/`
    pub root: PathBuf,
    /// Also index `UnOfficial/p` and `UnOfficial/parts`
    pub include_unofficial: bool,
}

impl IndexConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            include_unofficial: false,
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new("ldraw")
    }
}

/// A `.dat` file found in the library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryFile {
    /// Database key: path relative to the scanned folder, lowercase, `/`-separated
    pub name: String,
    pub path: PathBuf,
}

/// All `.dat` files under `dir`, sorted by key.
pub fn collect_files(dir: &Path) -> IndexResult<Vec<LibraryFile>> {
    let mut files = Vec::new();
    walk(dir, "", &mut files)?;
    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

fn walk(dir: &Path, prefix: &str, files: &mut Vec<LibraryFile>) -> IndexResult<()> {
    let io_error = |source| IndexError::Io {
        path: dir.to_path_buf(),
        source,
    };

    for entry in fs::read_dir(dir).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        let path = entry.path();
        let file_name = entry.file_name().to_string_lossy().into_owned();

        if path.is_dir() {
            if SKIPPED_DIRS.iter().any(|d| d.eq_ignore_ascii_case(&file_name)) {
                continue;
            }
            walk(&path, &format!("{}{}/", prefix, file_name), files)?;
        } else if is_dat(&path) {
            files.push(LibraryFile {
                name: normalize_filename(&format!("{}{}", prefix, file_name)),
                path,
            });
        }
    }
    Ok(())
}

fn is_dat(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("dat"))
        .unwrap_or(false)
}

/// Scan the library described by `config` and build its reference database.
///
/// Part boxes are resolved on rayon's pool against one shared
/// [`GeometryCache`]; the first failure aborts the build.
pub fn build_database(config: &IndexConfig) -> IndexResult<ReferenceDatabase> {
    if !config.root.is_dir() {
        return Err(IndexError::MissingLibrary(config.root.clone()));
    }

    let mut bases = vec![config.root.clone()];
    if config.include_unofficial {
        bases.push(config.root.join(UNOFFICIAL_DIR));
    }

    let mut db = ReferenceDatabase::new();
    let mut parts = Vec::new();

    for base in &bases {
        let primitives_dir = base.join(PRIMITIVES_DIR);
        let parts_dir = base.join(PARTS_DIR);

        if primitives_dir.is_dir() {
            for file in collect_files(&primitives_dir)? {
                db.insert_primitive(file.name);
            }
        } else {
            log::warn!("No primitives folder at {}", primitives_dir.display());
        }

        if parts_dir.is_dir() {
            parts.extend(collect_files(&parts_dir)?);
        } else {
            log::warn!("No parts folder at {}", parts_dir.display());
        }
    }

    log::info!(
        "Indexing {} parts and {} primitives under {}",
        parts.len(),
        db.primitive_count(),
        config.root.display()
    );

    let library = LdrawLibrary::new(&config.root);
    let cache = GeometryCache::new();
    let resolved = resolve_parts(&library, &cache, &parts)?;

    for (name, bounds) in resolved {
        // Official parts come first and win over unofficial duplicates
        if db.is_part(&name) {
            log::debug!("Skipping duplicate part {}", name);
            continue;
        }
        db.insert_part(name, bounds);
    }

    log::info!(
        "Indexed {} parts ({} cached sub-files)",
        db.part_count(),
        cache.len()
    );
    Ok(db)
}

/// Fan out over `parts`, fan in to `(key, local box)` pairs in input order.
fn resolve_parts(
    library: &LdrawLibrary,
    cache: &GeometryCache,
    parts: &[LibraryFile],
) -> LdrawResult<Vec<(String, BoundingBox)>> {
    let resolver = GeometryResolver::new(library, cache);

    parts
        .par_iter()
        .map(|file| -> LdrawResult<(String, BoundingBox)> {
            let bounds = resolver.resolve_bounding_box(&file.path, &DMat4::IDENTITY)?;
            log::debug!("{}: {:?} .. {:?}", file.name, bounds.min, bounds.max);
            Ok((file.name.clone(), bounds))
        })
        .collect()
}
