//! Assembled tree nodes.

use compact_str::CompactString;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::key::NodeKey;

/// A single node of an assembled tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Identifier taken from the record.
    pub id: NodeKey,

    /// Parent identifier taken from the record (None = no parent field).
    pub parent_id: Option<NodeKey>,

    /// Display name, if the record had one.
    pub name: Option<CompactString>,

    /// Sort weight among siblings. Used for ordering only.
    pub weight: Option<f64>,

    /// Remaining record fields, in record order.
    pub extra: IndexMap<CompactString, Value>,

    /// Children nodes, sorted by weight ascending.
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a new childless node with no attributes.
    pub fn new(id: impl Into<NodeKey>) -> Self {
        Self {
            id: id.into(),
            parent_id: None,
            name: None,
            weight: None,
            extra: IndexMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<NodeKey>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<CompactString>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_extra(mut self, key: impl Into<CompactString>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self
    }

    /// Get an extra attribute by field name.
    pub fn get_extra(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Get the display name, or an empty string.
    pub fn name_or_empty(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Get the number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Check if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Copy this node without its children.
    pub fn detached(&self) -> Self {
        Self {
            id: self.id.clone(),
            parent_id: self.parent_id.clone(),
            name: self.name.clone(),
            weight: self.weight,
            extra: self.extra.clone(),
            children: Vec::new(),
        }
    }

    /// Count this node and all of its descendants.
    pub fn subtree_size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }

    /// Number of levels below this node (a leaf has height 0).
    pub fn height(&self) -> u32 {
        let mut max = 0;
        let mut stack = vec![(self, 0u32)];
        while let Some((node, depth)) = stack.pop() {
            max = max.max(depth);
            stack.extend(node.children.iter().map(|child| (child, depth + 1)));
        }
        max
    }
}

// Dropping a long parent chain through the derived glue would recurse once
// per level. Unlink descendants onto a heap stack instead.
impl Drop for TreeNode {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}
