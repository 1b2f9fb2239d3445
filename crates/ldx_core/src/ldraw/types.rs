//! LDraw model types for the intermediate representation.
//!
//! These types hold a parsed document before it is flattened into a bill of
//! materials.

use std::collections::{BTreeMap, HashMap};

/// LDraw color code. Direct colors (`0x2RRGGBB`) are stored by value.
pub type ColorCode = u32;

/// Color code meaning "use whatever color the containing reference specifies".
pub const INHERIT_COLOR: ColorCode = 16;

/// Aggregation key of a part usage: `"<id>-<color>"`.
pub fn usage_key(id: &str, color: ColorCode) -> String {
    format!("{}-{}", id, color)
}

/// Fold a referenced filename into the form the library is indexed under:
/// lowercase with forward slashes.
pub fn normalize_filename(name: &str) -> String {
    name.replace('\\', "/").to_lowercase()
}

/// Strip the extension from the last path component (`3001.dat` -> `3001`).
pub fn strip_extension(name: &str) -> &str {
    let file_start = name.rfind('/').map_or(0, |i| i + 1);
    match name[file_start..].rfind('.') {
        Some(dot) => &name[..file_start + dot],
        None => name,
    }
}

/// One line of a bill of materials: a part (or inline model) in one color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartUsage {
    /// Part number for library parts, full filename for inline models
    pub id: String,

    /// Color code the part is placed with
    pub color: ColorCode,

    /// Number of placements
    pub count: u32,
}

impl PartUsage {
    pub fn new(id: impl Into<String>, color: ColorCode, count: u32) -> Self {
        Self {
            id: id.into(),
            color,
            count,
        }
    }

    /// Aggregation key of this usage.
    pub fn key(&self) -> String {
        usage_key(&self.id, self.color)
    }
}

/// Usage table keyed by [`usage_key`]. Ordered so every later stage is
/// deterministic.
pub type PartTable = BTreeMap<String, PartUsage>;

/// Add `usage` to `table`, summing counts when the key is already present.
pub fn merge_usage(table: &mut PartTable, usage: PartUsage) {
    let key = usage.key();
    match table.get_mut(&key) {
        Some(existing) => existing.count += usage.count,
        None => {
            table.insert(key, usage);
        }
    }
}

/// A named model: the main document or one inline sub-model.
#[derive(Clone, Debug, Default)]
pub struct ModelNode {
    /// Lowercased model name
    pub name: String,

    /// Part usages of this model
    pub parts: PartTable,

    /// Inline sub-models; only the root document owns any
    pub children: HashMap<String, ModelNode>,
}

impl ModelNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Record one placement of `id` in `color`.
    pub fn add_part(&mut self, id: &str, color: ColorCode) {
        merge_usage(&mut self.parts, PartUsage::new(id, color, 1));
    }

    /// Total number of placements in this model, sub-model references
    /// included.
    pub fn placement_count(&self) -> u64 {
        self.parts.values().map(|p| p.count as u64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_filename() {
        assert_eq!(normalize_filename("S\\3001S01.DAT"), "s/3001s01.dat");
        assert_eq!(normalize_filename("48/1-4Cyli.dat"), "48/1-4cyli.dat");
    }

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension("3001.dat"), "3001");
        assert_eq!(strip_extension("s/3001s01.dat"), "s/3001s01");
        assert_eq!(strip_extension("v1.2/part"), "v1.2/part");
        assert_eq!(strip_extension("noext"), "noext");
    }

    #[test]
    fn test_add_part_aggregates_by_id_and_color() {
        let mut model = ModelNode::new("main.ldr");
        model.add_part("3001", 4);
        model.add_part("3001", 4);
        model.add_part("3001", 1);

        assert_eq!(model.parts.len(), 2);
        assert_eq!(model.parts["3001-4"].count, 2);
        assert_eq!(model.parts["3001-1"].count, 1);
        assert_eq!(model.placement_count(), 3);
    }

    #[test]
    fn test_merge_usage_sums_counts() {
        let mut table = PartTable::new();
        merge_usage(&mut table, PartUsage::new("3003", 7, 2));
        merge_usage(&mut table, PartUsage::new("3003", 7, 5));

        assert_eq!(table["3003-7"], PartUsage::new("3003", 7, 7));
    }
}
