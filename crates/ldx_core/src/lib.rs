//! LDX Core - LDraw models to ground-plate bills of materials.
//!
//! This crate provides:
//!
//! - **LDraw support**: document parsing, part bounding boxes, the reference
//!   database and bill-of-materials flattening
//! - **Ground layout**: padded placement requests, rectangle packing and the
//!   `_ground.ldr` writer
//! - **Conversion**: the whole pipeline for one model file
//!
//! # Example
//!
//! ```ignore
//! use ldx_core::convert::{convert_file, ConvertOptions};
//! use ldx_core::ground::ShelfPacker;
//! use ldx_core::ldraw::ReferenceDatabase;
//!
//! let db = ReferenceDatabase::load("ldraw_db.json")?;
//! let conversion = convert_file("house.mpd", &db, &ConvertOptions::default(), &ShelfPacker::default())?;
//! println!("{} bricks -> {}", conversion.brick_count(), conversion.output.display());
//! ```

pub mod convert;
pub mod ground;
pub mod ldraw;

// Re-export commonly used types
pub use convert::{convert_file, ConvertError, ConvertOptions, Conversion};
pub use ground::{GroundLayout, LayoutConfig, LayoutError, Packer, ShelfPacker};
pub use ldraw::{flatten, parse_document_file, FlattenOptions, LdrawError, ModelNode, PartTable, ReferenceDatabase};

/// Fixture library and models under `assets/` at the workspace root.
#[cfg(test)]
pub(crate) mod test_assets {
    use std::path::{Path, PathBuf};

    use ldx_math::{BoundingBox, DVec3};

    use crate::ldraw::ReferenceDatabase;

    pub fn workspace_root() -> PathBuf {
        let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
        manifest.ancestors().nth(2).unwrap_or(manifest).to_path_buf()
    }

    pub fn library_root() -> PathBuf {
        workspace_root().join("assets").join("ldraw")
    }

    pub fn model_path(name: &str) -> PathBuf {
        workspace_root().join("assets").join("models").join(name)
    }

    fn bounds(min: [f64; 3], max: [f64; 3]) -> BoundingBox {
        BoundingBox::new(DVec3::from(min), DVec3::from(max))
    }

    /// What the index build produces for the official fixture library.
    pub fn sample_database() -> ReferenceDatabase {
        let mut db = ReferenceDatabase::new();
        for name in ["4-4cyli.dat", "48/1-4cyli.dat", "stud.dat"] {
            db.insert_primitive(name);
        }
        db.insert_part("3001.dat", bounds([-40.0, -4.0, -20.0], [40.0, 24.0, 20.0]));
        db.insert_part("3003.dat", bounds([-20.0, -4.0, -20.0], [20.0, 24.0, 20.0]));
        db.insert_part("3024.dat", bounds([-10.0, -4.0, -10.0], [10.0, 8.0, 10.0]));
        db
    }
}
