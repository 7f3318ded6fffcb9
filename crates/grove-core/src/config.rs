//! Tree assembly configuration types.

use std::collections::HashSet;
use std::path::Path;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::{TreeError, TreeResult};

/// Field names used to read records and to render nodes.
///
/// Setters never check cross-field consistency; [`TreeConfig::validate`]
/// does, and the builder runs it before assembling anything.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into), default)]
#[serde(default)]
pub struct TreeConfig {
    /// Field holding the record identifier.
    pub id_key: String,

    /// Field holding the parent identifier.
    pub parent_id_key: String,

    /// Field holding the display name.
    pub name_key: String,

    /// Field holding the sibling sort weight.
    pub weight_key: String,

    /// Field name for the nested children array when rendering.
    pub children_key: String,

    /// Deepest level that may have children rendered, root = 0 (None = unlimited).
    pub max_depth: Option<u32>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            id_key: "id".to_string(),
            parent_id_key: "parentId".to_string(),
            name_key: "name".to_string(),
            weight_key: "weight".to_string(),
            children_key: "children".to_string(),
            max_depth: None,
        }
    }
}

impl TreeConfig {
    /// Create a new config builder.
    pub fn builder() -> TreeConfigBuilder {
        TreeConfigBuilder::default()
    }

    /// Parse a config from TOML text. Missing fields keep their defaults.
    pub fn from_toml_str(text: &str) -> TreeResult<Self> {
        toml::from_str(text).map_err(|source| TreeError::ConfigParse { source })
    }

    /// Load a config from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> TreeResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| TreeError::io(path, e))?;
        Self::from_toml_str(&text)
    }

    pub fn with_id_key(mut self, key: impl Into<String>) -> Self {
        self.id_key = key.into();
        self
    }

    pub fn with_parent_id_key(mut self, key: impl Into<String>) -> Self {
        self.parent_id_key = key.into();
        self
    }

    pub fn with_name_key(mut self, key: impl Into<String>) -> Self {
        self.name_key = key.into();
        self
    }

    pub fn with_weight_key(mut self, key: impl Into<String>) -> Self {
        self.weight_key = key.into();
        self
    }

    pub fn with_children_key(mut self, key: impl Into<String>) -> Self {
        self.children_key = key.into();
        self
    }

    /// Set or clear the depth limit.
    pub fn with_max_depth(mut self, max_depth: Option<u32>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Get the depth limit (None = unlimited).
    pub fn max_depth(&self) -> Option<u32> {
        self.max_depth
    }

    /// Check whether nodes at `depth` may carry children.
    pub fn allows_children_at(&self, depth: u32) -> bool {
        self.max_depth.is_none_or(|max| depth < max)
    }

    /// Check whether a record field is consumed by the node itself rather
    /// than kept as an extra attribute.
    pub fn is_reserved(&self, field: &str) -> bool {
        self.keys().iter().any(|(_, key)| *key == field)
    }

    /// Check that every key is non-empty and that no two keys collide.
    pub fn validate(&self) -> TreeResult<()> {
        let keys = self.keys();
        let mut seen = HashSet::new();
        for (label, key) in keys {
            if key.is_empty() {
                return Err(TreeError::InvalidConfig {
                    message: format!("{label} cannot be empty"),
                });
            }
            if !seen.insert(key) {
                return Err(TreeError::InvalidConfig {
                    message: format!("{label} \"{key}\" is already used by another field"),
                });
            }
        }
        Ok(())
    }

    fn keys(&self) -> [(&'static str, &str); 5] {
        [
            ("id_key", self.id_key.as_str()),
            ("parent_id_key", self.parent_id_key.as_str()),
            ("name_key", self.name_key.as_str()),
            ("weight_key", self.weight_key.as_str()),
            ("children_key", self.children_key.as_str()),
        ]
    }
}
