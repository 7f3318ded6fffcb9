//! Forest container and build statistics.

use serde::{Deserialize, Serialize};

use crate::error::{BuildWarning, WarningKind};
use crate::node::TreeNode;

/// Summary statistics for a build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestStats {
    /// Records handed to the build.
    pub input_records: usize,
    /// Nodes present in the output.
    pub nodes: usize,
    /// Top-level nodes.
    pub roots: usize,
    /// Deepest node depth emitted (root = 0).
    pub max_depth: u32,
    /// Records whose declared parent is missing.
    pub orphans: usize,
    /// Distinct records never reached from the root group.
    pub unreachable: usize,
    /// Child links dropped to avoid nesting a node under itself.
    pub cycles_broken: usize,
    /// Records repeating an identifier seen earlier.
    pub duplicate_ids: usize,
    /// Nodes whose children were cut by the depth limit.
    pub truncated: usize,
}

impl ForestStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an emitted node at `depth`.
    pub fn record_node(&mut self, depth: u32) {
        self.nodes += 1;
        if depth == 0 {
            self.roots += 1;
        }
        self.max_depth = self.max_depth.max(depth);
    }

    /// Count a warning under its kind.
    pub fn record_warning(&mut self, kind: WarningKind) {
        match kind {
            WarningKind::Orphan => self.orphans += 1,
            WarningKind::CycleBroken => self.cycles_broken += 1,
            WarningKind::DuplicateId => self.duplicate_ids += 1,
        }
    }

    /// Record a node left childless by the depth limit.
    pub fn record_truncated(&mut self) {
        self.truncated += 1;
    }
}

/// Assembled forest with build metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Forest {
    /// Top-level nodes, sorted by weight ascending.
    pub roots: Vec<TreeNode>,

    /// Summary statistics.
    pub stats: ForestStats,

    /// Conditions absorbed during the build.
    pub warnings: Vec<BuildWarning>,
}

impl Forest {
    /// Create a new forest.
    pub fn new(roots: Vec<TreeNode>, stats: ForestStats, warnings: Vec<BuildWarning>) -> Self {
        Self {
            roots,
            stats,
            warnings,
        }
    }

    /// Get the number of top-level nodes.
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Check if the forest has no nodes.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Check if there were any warnings during the build.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Iterate over warnings of one kind.
    pub fn warnings_of(&self, kind: WarningKind) -> impl Iterator<Item = &BuildWarning> {
        self.warnings.iter().filter(move |w| w.kind == kind)
    }

    /// Discard metadata and keep the top-level nodes.
    pub fn into_roots(self) -> Vec<TreeNode> {
        self.roots
    }
}
