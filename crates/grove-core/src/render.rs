//! Serialization of nodes under configured field names.
//!
//! The derived `Serialize` on [`TreeNode`] uses the struct's own field names.
//! The views here instead write each node as a flat object keyed by the
//! [`TreeConfig`] in use, with the children array under `children_key`:
//!
//! ```rust,ignore
//! let json = serde_json::to_string(&ForestView::new(&roots, &config))?;
//! ```
//!
//! Weights only order siblings and are not written.
//!
//! Nested JSON is written one native stack frame group per level, so the
//! views refuse nodes deeper than [`MAX_RENDER_DEPTH`] instead of overflowing
//! the stack. [`to_json_value`] checks the whole forest before writing
//! anything.

use serde::ser::{Error as _, Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Value;

use crate::config::TreeConfig;
use crate::error::{TreeError, TreeResult};
use crate::node::TreeNode;

/// Deepest node depth (root = 0) the JSON views will write.
pub const MAX_RENDER_DEPTH: u32 = 256;

/// A node paired with the config naming its fields.
#[derive(Debug, Clone, Copy)]
pub struct NodeView<'a> {
    node: &'a TreeNode,
    config: &'a TreeConfig,
    level: u32,
}

impl<'a> NodeView<'a> {
    pub fn new(node: &'a TreeNode, config: &'a TreeConfig) -> Self {
        Self {
            node,
            config,
            level: 0,
        }
    }
}

impl Serialize for NodeView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.level > MAX_RENDER_DEPTH {
            return Err(S::Error::custom(format!(
                "tree deeper than {MAX_RENDER_DEPTH} levels"
            )));
        }
        let node = self.node;
        let config = self.config;

        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(&config.id_key, &node.id)?;
        if let Some(parent_id) = &node.parent_id {
            map.serialize_entry(&config.parent_id_key, parent_id)?;
        }
        if let Some(name) = &node.name {
            map.serialize_entry(&config.name_key, name)?;
        }
        for (key, value) in &node.extra {
            if !config.is_reserved(key) {
                map.serialize_entry(key, value)?;
            }
        }
        let children = ForestView {
            nodes: &node.children,
            config,
            level: self.level + 1,
        };
        map.serialize_entry(&config.children_key, &children)?;
        map.end()
    }
}

/// A sibling sequence paired with the config naming its fields.
#[derive(Debug, Clone, Copy)]
pub struct ForestView<'a> {
    nodes: &'a [TreeNode],
    config: &'a TreeConfig,
    level: u32,
}

impl<'a> ForestView<'a> {
    pub fn new(nodes: &'a [TreeNode], config: &'a TreeConfig) -> Self {
        Self {
            nodes,
            config,
            level: 0,
        }
    }
}

impl Serialize for ForestView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.nodes.len()))?;
        for node in self.nodes {
            seq.serialize_element(&NodeView {
                node,
                config: self.config,
                level: self.level,
            })?;
        }
        seq.end()
    }
}

/// Fail with [`TreeError::TooDeep`] if any node sits deeper than
/// [`MAX_RENDER_DEPTH`].
pub fn check_render_depth(nodes: &[TreeNode]) -> TreeResult<()> {
    let depth = nodes.iter().map(TreeNode::height).max().unwrap_or(0);
    if depth > MAX_RENDER_DEPTH {
        return Err(TreeError::TooDeep {
            depth,
            limit: MAX_RENDER_DEPTH,
        });
    }
    Ok(())
}

/// Render nodes into a JSON array value.
pub fn to_json_value(nodes: &[TreeNode], config: &TreeConfig) -> TreeResult<Value> {
    check_render_depth(nodes)?;
    serde_json::to_value(ForestView::new(nodes, config)).map_err(|source| TreeError::Render { source })
}
