//! Flattened parts into placement requests.

use crate::ldraw::{ColorCode, PartTable, ReferenceDatabase};

use super::pack::Packer;
use super::{LayoutError, LayoutResult};

/// Ground plate spacing.
#[derive(Debug, Clone, Copy)]
pub struct LayoutConfig {
    /// Grid unit in LDU; footprints are rounded up to whole cells plus one
    pub grid: f64,
    /// Multiplier applied to the rounded footprint for sorting clearance
    pub spacing: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            grid: 20.0,
            spacing: 1.5,
        }
    }
}

/// Padded plate extent of a part dimension: `ceil((d + grid) / grid) * grid * spacing`.
pub fn padded_extent(dimension: f64, config: &LayoutConfig) -> i64 {
    (((dimension + config.grid) / config.grid).ceil() * config.grid * config.spacing) as i64
}

/// One brick instance waiting for a spot on the plate.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementRequest {
    /// Library filename (`3001.dat`)
    pub name: String,
    pub color: ColorCode,
    /// Padded extent along X
    pub width: i64,
    /// Padded extent along Z
    pub depth: i64,
    /// Unpadded vertical extent
    pub height: f64,
}

impl PlacementRequest {
    pub fn area(&self) -> i64 {
        self.width * self.depth
    }
}

/// A request with its packed position (plate X, plate Z).
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedBrick {
    pub request: PlacementRequest,
    pub x: i64,
    pub y: i64,
}

/// Every brick instance placed on the plate.
#[derive(Debug, Clone, Default)]
pub struct GroundLayout {
    pub bricks: Vec<PlacedBrick>,
    pub width: i64,
    pub depth: i64,
}

impl GroundLayout {
    pub fn brick_count(&self) -> usize {
        self.bricks.len()
    }
}

/// Expand every flattened part into one request per instance, largest
/// footprint first.
///
/// Parts without geometry in the database (unofficial or custom parts,
/// unresolved inline models) are skipped with a warning.
pub fn placement_requests(
    parts: &PartTable,
    database: &ReferenceDatabase,
    config: &LayoutConfig,
) -> Vec<PlacementRequest> {
    let mut requests = Vec::new();

    for usage in parts.values() {
        let name = format!("{}.dat", usage.id);
        let Some(bounds) = database.part_bounds(&name) else {
            log::warn!("brick not found: {}", name);
            continue;
        };

        let footprint = bounds.footprint();
        let request = PlacementRequest {
            name,
            color: usage.color,
            width: padded_extent(footprint.width, config),
            depth: padded_extent(footprint.depth, config),
            height: footprint.height,
        };
        requests.extend(std::iter::repeat(request).take(usage.count as usize));
    }

    // Stable, so equal areas keep their encounter order
    requests.sort_by(|a, b| b.area().cmp(&a.area()));
    requests
}

/// Build placement requests and hand them to `packer`.
pub fn lay_out(
    parts: &PartTable,
    database: &ReferenceDatabase,
    config: &LayoutConfig,
    packer: &dyn Packer,
) -> LayoutResult<GroundLayout> {
    let requests = placement_requests(parts, database, config);
    let sizes: Vec<(i64, i64)> = requests.iter().map(|r| (r.width, r.depth)).collect();

    let packed = packer.pack(&sizes)?;
    if packed.positions.len() != requests.len() {
        return Err(LayoutError::Incomplete {
            placed: packed.positions.len(),
            requested: requests.len(),
        });
    }

    log::info!("output: {}x{} ({} bricks)", packed.height, packed.width, requests.len());

    Ok(GroundLayout {
        bricks: requests
            .into_iter()
            .zip(packed.positions)
            .map(|(request, (x, y))| PlacedBrick { request, x, y })
            .collect(),
        width: packed.width,
        depth: packed.height,
    })
}
