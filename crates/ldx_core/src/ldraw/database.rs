//! Reference database built offline from an LDraw library.
//!
//! Holds the set of primitive filenames (geometry-only sub-parts that never
//! appear in a bill of materials) and the local-space bounding box of every
//! purchasable part. Keys are lowercase filenames with forward slashes, as
//! referenced from type-1 lines (`3001.dat`, `48/1-4cyli.dat`).
//!
//! The on-disk form is JSON:
//!
//! ```text
//! {
//!   "primitives": ["stud.dat", "4/4-4cyli.dat"],
//!   "parts": { "3001.dat": [[-40, -4, -20], [40, 24, 20]] }
//! }
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::path::Path;

use ldx_math::BoundingBox;
use serde::{Deserialize, Serialize};

use super::error::{LdrawError, LdrawResult};

/// Serialized layout of the database.
#[derive(Serialize, Deserialize, Default)]
struct DatabaseFile {
    primitives: BTreeSet<String>,
    parts: BTreeMap<String, [[f64; 3]; 2]>,
}

/// Lookup tables consulted while parsing and laying out a model.
#[derive(Clone, Debug, Default)]
pub struct ReferenceDatabase {
    primitives: HashSet<String>,
    parts: HashMap<String, BoundingBox>,
}

impl ReferenceDatabase {
    /// Create an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a primitive filename.
    pub fn insert_primitive(&mut self, name: impl Into<String>) {
        self.primitives.insert(name.into());
    }

    /// Register a purchasable part with its local-space bounds.
    pub fn insert_part(&mut self, name: impl Into<String>, bounds: BoundingBox) {
        self.parts.insert(name.into(), bounds);
    }

    /// True if `name` is a primitive.
    pub fn is_primitive(&self, name: &str) -> bool {
        self.primitives.contains(name)
    }

    /// True if `name` is a purchasable part.
    pub fn is_part(&self, name: &str) -> bool {
        self.parts.contains_key(name)
    }

    /// Local-space bounds of a purchasable part.
    pub fn part_bounds(&self, name: &str) -> Option<&BoundingBox> {
        self.parts.get(name)
    }

    /// Number of primitives.
    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    /// Number of purchasable parts.
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Parse a database from its JSON form.
    pub fn from_json(content: &str) -> LdrawResult<Self> {
        let file: DatabaseFile = serde_json::from_str(content)?;
        Ok(Self {
            primitives: file.primitives.into_iter().collect(),
            parts: file
                .parts
                .into_iter()
                .map(|(name, corners)| (name, BoundingBox::from_corners(corners)))
                .collect(),
        })
    }

    /// Serialize the database to JSON. Keys are sorted so the output is stable.
    pub fn to_json(&self) -> LdrawResult<String> {
        let file = DatabaseFile {
            primitives: self.primitives.iter().cloned().collect(),
            parts: self
                .parts
                .iter()
                .map(|(name, bounds)| (name.clone(), bounds.to_corners()))
                .collect(),
        };
        Ok(serde_json::to_string(&file)?)
    }

    /// Load a database file.
    pub fn load<P: AsRef<Path>>(path: P) -> LdrawResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| LdrawError::io(path, e))?;
        let db = Self::from_json(&content)?;

        log::info!(
            "Loaded reference database {}: {} primitives, {} parts",
            path.display(),
            db.primitive_count(),
            db.part_count()
        );
        Ok(db)
    }

    /// Write the database to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> LdrawResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?).map_err(|e| LdrawError::io(path, e))
    }
}
