//! Assembly phase: materialize the indexed records into owned trees.
//!
//! The walk runs on an explicit stack so a long parent chain costs heap,
//! not native stack:
//!
//! 1. Pop a pending record, turn it into a node and register it with its
//!    parent's slot (or as a root).
//! 2. Unless the depth limit is reached, push its sorted children in
//!    reverse so they pop in order.
//! 3. Once every record is placed, fold the slots back to front. Children
//!    always sit in later slots than their parent, so each node is complete
//!    before it moves into its parent.

use grove_core::{BuildWarning, ForestStats, NodeKey, TreeConfig, TreeNode};
use tracing::trace;

use crate::index::ParentIndex;

struct Pending {
    position: usize,
    depth: u32,
    parent: Option<usize>,
}

struct Slot {
    node: Option<TreeNode>,
    position: usize,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// Check whether the record at `position` is `slot` or one of its ancestors.
fn on_path(slots: &[Slot], mut slot: usize, position: usize) -> bool {
    loop {
        if slots[slot].position == position {
            return true;
        }
        match slots[slot].parent {
            Some(parent) => slot = parent,
            None => return false,
        }
    }
}

/// Output of the assembly phase.
pub(crate) struct Assembly {
    pub roots: Vec<TreeNode>,
    pub warnings: Vec<BuildWarning>,
}

/// Build the forest hanging off `root_parent`.
///
/// A record is claimed when it is first scheduled, and the root group is
/// claimed up front. Meeting a claimed child can only happen under the
/// record whose identifier equals `root_parent`: the child is either one of
/// its ancestors (a cycle, dropped and reported) or a root placed already.
pub(crate) fn assemble(
    mut index: ParentIndex,
    root_parent: Option<&NodeKey>,
    config: &TreeConfig,
    stats: &mut ForestStats,
) -> Assembly {
    let mut warnings = Vec::new();
    let mut claimed = vec![false; index.entries.len()];
    let mut stack: Vec<Pending> = Vec::new();

    for &position in index.group(root_parent).iter().rev() {
        claimed[position] = true;
        stack.push(Pending {
            position,
            depth: 0,
            parent: None,
        });
    }

    let keys: Vec<NodeKey> = index.entries.iter().map(|entry| entry.id.clone()).collect();
    let mut entries: Vec<Option<_>> = std::mem::take(&mut index.entries)
        .into_iter()
        .map(Some)
        .collect();
    let mut slots: Vec<Slot> = Vec::with_capacity(entries.len());
    let mut roots: Vec<usize> = Vec::new();

    while let Some(Pending {
        position,
        depth,
        parent,
    }) = stack.pop()
    {
        let Some(entry) = entries[position].take() else {
            continue;
        };
        let id = &keys[position];
        let slot = slots.len();
        slots.push(Slot {
            node: Some(entry.into_node()),
            position,
            parent,
            children: Vec::new(),
        });
        match parent {
            Some(parent) => slots[parent].children.push(slot),
            None => roots.push(slot),
        }
        stats.record_node(depth);

        let children = index.children_of(id);
        if children.is_empty() {
            continue;
        }
        if !config.allows_children_at(depth) {
            trace!(%id, depth, "depth limit reached");
            stats.record_truncated();
            continue;
        }

        let mut scheduled = Vec::with_capacity(children.len());
        for &child in children {
            if std::mem::replace(&mut claimed[child], true) {
                if on_path(&slots, slot, child) {
                    let warning = BuildWarning::cycle_broken(keys[child].clone(), id);
                    trace!(warning = %warning.message, "cycle broken");
                    stats.record_warning(warning.kind);
                    warnings.push(warning);
                } else {
                    trace!(child = %keys[child], "already placed as a root");
                }
                continue;
            }
            scheduled.push(child);
        }
        stack.extend(scheduled.into_iter().rev().map(|child| Pending {
            position: child,
            depth: depth + 1,
            parent: Some(slot),
        }));
    }

    for slot in (0..slots.len()).rev() {
        let children: Vec<TreeNode> = std::mem::take(&mut slots[slot].children)
            .into_iter()
            .filter_map(|child| slots[child].node.take())
            .collect();
        if let Some(node) = slots[slot].node.as_mut() {
            node.children = children;
        }
    }

    Assembly {
        roots: roots
            .into_iter()
            .filter_map(|slot| slots[slot].node.take())
            .collect(),
        warnings,
    }
}
