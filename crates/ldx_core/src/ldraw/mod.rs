//! LDraw support for LDX.
//!
//! This module reads LDraw model documents and library files:
//!
//! - [`parser`]: `.ldr` / `.mpd` documents into a tree of named models
//! - [`geometry`]: memoized bounding boxes of library parts
//! - [`flatten`]: model tree into a flat bill of materials
//! - [`database`]: the reference database built offline from a library
//!
//! # Example
//!
//! ```ignore
//! use ldx_core::ldraw::{flatten, parse_document_file, ReferenceDatabase};
//!
//! let db = ReferenceDatabase::load("ldraw_db.json")?;
//! let model = parse_document_file("house.mpd", &db)?;
//! let parts = flatten(model)?;
//! ```

mod error;
mod tokens;
mod types;

pub mod database;
pub mod flatten;
pub mod geometry;
pub mod library;
pub mod parser;

pub use database::ReferenceDatabase;
pub use error::{LdrawError, LdrawResult};
pub use flatten::{flatten, flatten_with, total_count, FlattenOptions};
pub use geometry::{GeometryCache, GeometryResolver};
pub use library::{LdrawLibrary, PartSource, PARTS_DIR, PRIMITIVES_DIR, SEARCH_DIRS, UNOFFICIAL_DIR};
pub use parser::{parse_document, parse_document_file};
pub use types::*;
