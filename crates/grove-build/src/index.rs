//! Index phase: deduplicate identifiers and group records by parent.

use std::collections::HashMap;
use std::collections::hash_map::Entry as MapEntry;

use grove_core::{BuildWarning, NodeKey};

use crate::entry::{Entry, compare_weights};

/// Records grouped by parent, each group sorted for output.
pub(crate) struct ParentIndex {
    /// One entry per distinct identifier, in first-seen order.
    pub entries: Vec<Entry>,
    /// Entry positions keyed by parent identifier (None = no parent field).
    pub groups: HashMap<Option<NodeKey>, Vec<usize>>,
    /// Entry position of each identifier.
    pub positions: HashMap<NodeKey, usize>,
    /// Duplicate identifier warnings, in input order.
    pub duplicates: Vec<BuildWarning>,
}

impl ParentIndex {
    /// Single pass over the input. A repeated identifier keeps the first
    /// record's position and parent and takes the later record's attributes.
    pub fn new(input: Vec<Entry>) -> Self {
        let mut entries: Vec<Entry> = Vec::with_capacity(input.len());
        let mut positions: HashMap<NodeKey, usize> = HashMap::with_capacity(input.len());
        let mut duplicates = Vec::new();

        for (index, entry) in input.into_iter().enumerate() {
            match positions.entry(entry.id.clone()) {
                MapEntry::Vacant(slot) => {
                    slot.insert(entries.len());
                    entries.push(entry);
                }
                MapEntry::Occupied(slot) => {
                    duplicates.push(BuildWarning::duplicate_id(entry.id.clone(), index));
                    entries[*slot.get()].absorb(entry);
                }
            }
        }

        let mut groups: HashMap<Option<NodeKey>, Vec<usize>> = HashMap::new();
        for (position, entry) in entries.iter().enumerate() {
            groups.entry(entry.parent.clone()).or_default().push(position);
        }
        for group in groups.values_mut() {
            // Stable: equal weights keep input order.
            group.sort_by(|&a, &b| compare_weights(entries[a].weight, entries[b].weight));
        }

        Self {
            entries,
            groups,
            positions,
            duplicates,
        }
    }

    /// Children of the node with identifier `key`, in output order.
    pub fn children_of(&self, key: &NodeKey) -> &[usize] {
        self.group(Some(key))
    }

    /// Records whose parent field equals `parent`.
    pub fn group(&self, parent: Option<&NodeKey>) -> &[usize] {
        self.groups
            .get(&parent.cloned())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Check whether some record carries identifier `key`.
    pub fn contains(&self, key: &NodeKey) -> bool {
        self.positions.contains_key(key)
    }

    /// Orphan warnings, in first-seen order: a declared parent that no record
    /// carries, or a missing parent while roots hang off a concrete sentinel.
    pub fn orphans(&self, root_parent: Option<&NodeKey>) -> Vec<BuildWarning> {
        self.entries
            .iter()
            .filter(|entry| entry.parent.as_ref() != root_parent)
            .filter(|entry| entry.parent.as_ref().is_none_or(|parent| !self.contains(parent)))
            .map(|entry| BuildWarning::orphan(entry.id.clone(), entry.parent.as_ref()))
            .collect()
    }

    /// Count distinct records reachable from the root group, ignoring any
    /// depth limit.
    pub fn reachable(&self, root_parent: Option<&NodeKey>) -> usize {
        let mut seen = vec![false; self.entries.len()];
        let mut stack: Vec<usize> = self.group(root_parent).to_vec();
        let mut count = 0;
        while let Some(position) = stack.pop() {
            if std::mem::replace(&mut seen[position], true) {
                continue;
            }
            count += 1;
            stack.extend(
                self.children_of(&self.entries[position].id)
                    .iter()
                    .filter(|&&child| !seen[child]),
            );
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grove_core::{TreeConfig, WarningKind};
    use serde_json::{Value, json};

    fn index(records: &[Value]) -> ParentIndex {
        let config = TreeConfig::default();
        let entries = records
            .iter()
            .enumerate()
            .map(|(i, r)| Entry::from_record(r, &config, i).unwrap())
            .collect();
        ParentIndex::new(entries)
    }

    fn ids(index: &ParentIndex, group: &[usize]) -> Vec<NodeKey> {
        group.iter().map(|&p| index.entries[p].id.clone()).collect()
    }

    #[test]
    fn test_groups_sorted_by_weight() {
        let idx = index(&[
            json!({"id": 1, "parentId": 0}),
            json!({"id": 2, "parentId": 1, "weight": 2}),
            json!({"id": 3, "parentId": 1, "weight": 1}),
            json!({"id": 4, "parentId": 1}),
            json!({"id": 5, "parentId": 1, "weight": 1}),
        ]);
        let children = idx.children_of(&NodeKey::from(1));
        assert_eq!(
            ids(&idx, children),
            [3, 5, 2, 4].map(NodeKey::from).to_vec()
        );
    }

    #[test]
    fn test_missing_parent_groups_under_none() {
        let idx = index(&[json!({"id": "a"}), json!({"id": "b", "parentId": null})]);
        assert_eq!(idx.group(None).len(), 2);
    }

    #[test]
    fn test_duplicate_ids() {
        let idx = index(&[
            json!({"id": 1, "parentId": 0, "name": "first"}),
            json!({"id": 2, "parentId": 1}),
            json!({"id": 1, "parentId": 2, "name": "second"}),
        ]);

        assert_eq!(idx.entries.len(), 2);
        assert_eq!(idx.duplicates.len(), 1);
        assert_eq!(idx.duplicates[0].kind, WarningKind::DuplicateId);

        let first = &idx.entries[idx.positions[&NodeKey::from(1)]];
        assert_eq!(first.parent, Some(NodeKey::from(0)));
        assert_eq!(first.name.as_deref(), Some("second"));
        assert!(idx.children_of(&NodeKey::from(2)).is_empty());
    }

    #[test]
    fn test_orphans() {
        let idx = index(&[
            json!({"id": 1, "parentId": 0}),
            json!({"id": 4, "parentId": 99}),
            json!({"id": 5}),
        ]);
        let orphans = idx.orphans(Some(&NodeKey::from(0)));
        let keys: Vec<_> = orphans.iter().map(|w| w.key.clone()).collect();
        assert_eq!(keys, [NodeKey::from(4), NodeKey::from(5)]);

        let rootless = idx.orphans(None);
        let keys: Vec<_> = rootless.iter().map(|w| w.key.clone()).collect();
        assert_eq!(keys, [NodeKey::from(1), NodeKey::from(4)]);
    }

    #[test]
    fn test_reachable() {
        let idx = index(&[
            json!({"id": 1, "parentId": 0}),
            json!({"id": 2, "parentId": 1}),
            json!({"id": 3, "parentId": 2}),
            json!({"id": 4, "parentId": 99}),
            json!({"id": 5, "parentId": 4}),
        ]);
        assert_eq!(idx.reachable(Some(&NodeKey::from(0))), 3);
        assert_eq!(idx.reachable(Some(&NodeKey::from(4))), 1);
    }

    #[test]
    fn test_reachable_through_cycle_terminates() {
        let idx = index(&[json!({"id": 1, "parentId": 2}), json!({"id": 2, "parentId": 1})]);
        assert_eq!(idx.reachable(Some(&NodeKey::from(1))), 2);
        assert_eq!(idx.reachable(None), 0);
    }
}
