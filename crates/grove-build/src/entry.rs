//! Record extraction.

use std::cmp::Ordering;

use compact_str::{CompactString, ToCompactString};
use indexmap::IndexMap;
use serde_json::Value;

use grove_core::{NodeKey, Record, TreeConfig, TreeError, TreeNode, TreeResult};

/// Owned copy of the parts of a record a build needs.
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    pub id: NodeKey,
    pub parent: Option<NodeKey>,
    pub name: Option<CompactString>,
    pub weight: Option<f64>,
    pub extra: IndexMap<CompactString, Value>,
}

impl Entry {
    /// Read a record through the configured keys.
    pub fn from_record<R: Record>(record: &R, config: &TreeConfig, index: usize) -> TreeResult<Self> {
        let id = record
            .get(&config.id_key)
            .and_then(NodeKey::from_value)
            .ok_or_else(|| TreeError::missing_id(index, &config.id_key))?;
        let parent = record.get(&config.parent_id_key).and_then(NodeKey::from_value);
        let name = record.get(&config.name_key).and_then(name_of);
        let weight = record.get(&config.weight_key).and_then(weight_of);
        let extra = record
            .fields()
            .filter(|(key, _)| !config.is_reserved(key))
            .map(|(key, value)| (CompactString::from(key), value.clone()))
            .collect();

        Ok(Self {
            id,
            parent,
            name,
            weight,
            extra,
        })
    }

    /// Take over the attributes of a later record with the same id.
    /// Position and parent stay with the first record.
    pub fn absorb(&mut self, later: Entry) {
        self.name = later.name;
        self.weight = later.weight;
        self.extra = later.extra;
    }

    pub fn into_node(self) -> TreeNode {
        let mut node = TreeNode::new(self.id);
        node.parent_id = self.parent;
        node.name = self.name;
        node.weight = self.weight;
        node.extra = self.extra;
        node
    }
}

fn name_of(value: &Value) -> Option<CompactString> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(CompactString::from(s.as_str())),
        other => Some(other.to_compact_string()),
    }
}

/// Numbers and numeric strings; anything else counts as no weight.
fn weight_of(value: &Value) -> Option<f64> {
    let weight = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    weight.filter(|w| !w.is_nan())
}

/// Ascending by weight; unweighted entries sort after weighted ones.
pub(crate) fn compare_weights(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
