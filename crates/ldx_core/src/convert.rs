//! One model file to one ground plate.
//!
//! Pipeline: parse the document, flatten its bill of materials, lay the bricks
//! out on a plate and write the `_ground.ldr` file next to the input.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::ground::{lay_out, save_ground, GroundLayout, LayoutConfig, LayoutError, Packer};
use crate::ldraw::{flatten_with, parse_document_file, total_count, FlattenOptions, LdrawError, ReferenceDatabase};

pub use crate::ground::ground_output_path;

/// Errors that can occur while converting a model.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("LDraw error: {0}")]
    Ldraw(#[from] LdrawError),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
}

/// Result type for conversion.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Conversion settings.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub layout: LayoutConfig,
    pub flatten: FlattenOptions,
    /// Output file; defaults to [`ground_output_path`] of the input
    pub output: Option<PathBuf>,
}

/// A finished conversion.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub output: PathBuf,
    pub layout: GroundLayout,
    /// Bricks in the flattened bill of materials, including any the layout skipped
    pub part_count: u64,
}

impl Conversion {
    pub fn brick_count(&self) -> usize {
        self.layout.brick_count()
    }

    /// Bricks dropped because the database has no geometry for them.
    pub fn skipped_count(&self) -> u64 {
        self.part_count.saturating_sub(self.brick_count() as u64)
    }
}

/// Parse, flatten and lay out `input` without writing anything.
pub fn build_layout<P: AsRef<Path>>(
    input: P,
    database: &ReferenceDatabase,
    options: &ConvertOptions,
    packer: &dyn Packer,
) -> ConvertResult<(GroundLayout, u64)> {
    let input = input.as_ref();
    log::info!("Converting {}", input.display());

    let model = parse_document_file(input, database)?;
    let parts = flatten_with(model, options.flatten)?;
    let part_count = total_count(&parts);

    let layout = lay_out(&parts, database, &options.layout, packer)?;
    Ok((layout, part_count))
}

/// Convert `input` and write the ground plate.
pub fn convert_file<P: AsRef<Path>>(
    input: P,
    database: &ReferenceDatabase,
    options: &ConvertOptions,
    packer: &dyn Packer,
) -> ConvertResult<Conversion> {
    let input = input.as_ref();
    let (layout, part_count) = build_layout(input, database, options, packer)?;

    let output = options
        .output
        .clone()
        .unwrap_or_else(|| ground_output_path(input));
    save_ground(&output, &layout)?;

    Ok(Conversion {
        output,
        layout,
        part_count,
    })
}
