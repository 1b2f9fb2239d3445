//! Bounding boxes of library files.
//!
//! A part file is measured by scanning its geometry lines and recursively
//! measuring every sub-file it references. Sub-file boxes are cached in the
//! referenced file's own coordinate space, so one cached entry serves every
//! caller regardless of the transform it is placed with.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use ldx_math::{compose, AffineExt, BoundingBox, DMat4};

use super::error::LdrawResult;
use super::library::PartSource;
use super::tokens::{parse_transform, parse_vertices, records, reference_filename};

/// Local-space bounding boxes keyed by resolved file path.
///
/// Safe to share between threads. Two resolutions of the same file racing to
/// publish produce the same box, so the later write is harmless.
#[derive(Debug, Default)]
pub struct GeometryCache {
    boxes: RwLock<HashMap<PathBuf, BoundingBox>>,
}

impl GeometryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached local-space box of `path`.
    pub fn get(&self, path: &Path) -> Option<BoundingBox> {
        self.boxes
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(path)
            .copied()
    }

    /// Store the local-space box of `path`.
    pub fn insert(&self, path: PathBuf, bounds: BoundingBox) {
        self.boxes
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(path, bounds);
    }

    /// Number of cached files.
    pub fn len(&self) -> usize {
        self.boxes.read().unwrap_or_else(|poisoned| poisoned.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Measures library files against a [`PartSource`] and a shared cache.
pub struct GeometryResolver<'a, S: PartSource + ?Sized> {
    source: &'a S,
    cache: &'a GeometryCache,
}

impl<'a, S: PartSource + ?Sized> GeometryResolver<'a, S> {
    pub fn new(source: &'a S, cache: &'a GeometryCache) -> Self {
        Self { source, cache }
    }

    /// Bounding box of `path` placed with `transform`, normalized.
    ///
    /// Type-1 references are measured in their own space (identity), cached,
    /// then placed with `transform * instance`. Lines, triangles and quads
    /// contribute their transformed vertices; optional lines are ignored.
    pub fn resolve_bounding_box(&self, path: &Path, transform: &DMat4) -> LdrawResult<BoundingBox> {
        if let Some(local) = self.cache.get(path) {
            return Ok(transform.transform_box(&local).normalize());
        }

        log::debug!("Measuring {}", path.display());

        let content = self.source.read(path)?;
        let file = path.to_string_lossy();
        let mut bounds = BoundingBox::empty();

        for record in records(&content, &file) {
            let record = record?;

            match record.command() {
                "1" => {
                    // Short references are tolerated and skipped.
                    let Some(name) = reference_filename(&record) else {
                        continue;
                    };

                    let sub_path = self.source.locate(&name)?;
                    let local = self.resolve_bounding_box(&sub_path, &DMat4::IDENTITY)?;
                    self.cache.insert(sub_path, local);

                    let placement = compose(transform, &parse_transform(&file, &record)?);
                    bounds.merge_box(&placement.transform_box(&local));
                }
                "2" => bounds.merge_points(&transform.transform_points(&parse_vertices(&file, &record, 2)?)),
                "3" => bounds.merge_points(&transform.transform_points(&parse_vertices(&file, &record, 3)?)),
                "4" => bounds.merge_points(&transform.transform_points(&parse_vertices(&file, &record, 4)?)),
                _ => {}
            }
        }

        Ok(bounds.normalize())
    }
}
