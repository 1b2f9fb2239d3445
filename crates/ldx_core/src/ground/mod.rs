//! Ground plate layout for LDX.
//!
//! Every brick instance of a flattened bill of materials is given a padded
//! rectangle on a flat plate, packed, and written out as an LDraw file with
//! all bricks standing upright side by side.
//!
//! - [`layout`]: flattened parts into sized, sorted placement requests
//! - [`pack`]: rectangle packing behind the [`Packer`] trait
//! - [`writer`]: the `_ground.ldr` output file

use std::path::PathBuf;

use thiserror::Error;

pub mod layout;
pub mod pack;
pub mod writer;

pub use layout::{lay_out, padded_extent, placement_requests, GroundLayout, LayoutConfig, PlacedBrick, PlacementRequest};
pub use pack::{PackedLayout, Packer, ShelfPacker};
pub use writer::{brick_line, ground_output_path, save_ground, write_ground, GROUND_SUFFIX};

/// Errors that can occur while laying out or writing a ground plate.
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("request {index} ({width}x{depth}) does not fit a plate {limit} wide")]
    Unplaced {
        index: usize,
        width: i64,
        depth: i64,
        limit: i64,
    },

    #[error("packer placed {placed} of {requested} bricks")]
    Incomplete { placed: usize, requested: usize },

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for layout operations.
pub type LayoutResult<T> = Result<T, LayoutError>;
