//! Flatten a model tree into a bill of materials.
//!
//! Every usage of an inline sub-model is replaced by the sub-model's own leaf
//! parts. Leaves placed with [`INHERIT_COLOR`] take the color of the usage
//! that placed the sub-model, and leaves that end up with the same part and
//! color are merged.

use std::collections::{HashMap, HashSet};

use super::error::{LdrawError, LdrawResult};
use super::types::{merge_usage, ModelNode, PartTable, PartUsage, INHERIT_COLOR};

/// Flattening options.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlattenOptions {
    /// Multiply a sub-model's leaf counts by the number of times the
    /// referencing usage places it. Off by default: every usage entry of a
    /// sub-model contributes its leaves once.
    pub scale_by_usage: bool,
}

/// Flatten `root` with default options.
pub fn flatten(root: ModelNode) -> LdrawResult<PartTable> {
    flatten_with(root, FlattenOptions::default())
}

/// Flatten `root`, consuming the tree.
///
/// Each inline model is flattened once; its source node is dropped and the
/// resulting leaf table is reused for every later usage. A model that is
/// reached again while it is still being flattened is a cycle and fails with
/// [`LdrawError::ModelCycle`].
pub fn flatten_with(root: ModelNode, options: FlattenOptions) -> LdrawResult<PartTable> {
    let ModelNode { name, parts, children } = root;

    let mut flattener = Flattener {
        pending: children,
        done: HashMap::new(),
        in_progress: HashSet::new(),
        options,
    };
    let flat = flattener.flatten_parts(parts)?;

    log::info!(
        "Flattened {:?}: {} distinct parts, {} bricks",
        name,
        flat.len(),
        total_count(&flat)
    );
    Ok(flat)
}

/// Sum of all counts in a table.
pub fn total_count(table: &PartTable) -> u64 {
    table.values().map(|p| p.count as u64).sum()
}

struct Flattener {
    /// Inline models not flattened yet
    pending: HashMap<String, ModelNode>,
    /// Leaf tables of flattened inline models
    done: HashMap<String, PartTable>,
    /// Inline models currently on the recursion stack
    in_progress: HashSet<String>,
    options: FlattenOptions,
}

impl Flattener {
    fn is_model(&self, id: &str) -> bool {
        self.pending.contains_key(id) || self.done.contains_key(id) || self.in_progress.contains(id)
    }

    /// Build a fresh leaf table from a usage table.
    fn flatten_parts(&mut self, parts: PartTable) -> LdrawResult<PartTable> {
        let mut result = PartTable::new();

        for usage in parts.into_values() {
            if !self.is_model(&usage.id) {
                merge_usage(&mut result, usage);
                continue;
            }

            let leaves = self.flatten_model(&usage.id)?;
            let factor = if self.options.scale_by_usage { usage.count } else { 1 };

            for leaf in leaves.values() {
                let color = if leaf.color == INHERIT_COLOR {
                    usage.color
                } else {
                    leaf.color
                };
                merge_usage(
                    &mut result,
                    PartUsage::new(leaf.id.clone(), color, leaf.count.saturating_mul(factor)),
                );
            }
        }

        Ok(result)
    }

    /// Leaf table of the inline model `name`.
    fn flatten_model(&mut self, name: &str) -> LdrawResult<PartTable> {
        if let Some(leaves) = self.done.get(name) {
            return Ok(leaves.clone());
        }

        let node = match self.pending.remove(name) {
            Some(node) => node,
            None => return Err(LdrawError::ModelCycle(name.to_string())),
        };

        self.in_progress.insert(name.to_string());
        let leaves = self.flatten_parts(node.parts)?;
        self.in_progress.remove(name);

        log::debug!("Inline model {:?} flattens to {} parts", name, leaves.len());
        self.done.insert(name.to_string(), leaves.clone());
        Ok(leaves)
    }
}
