//! Pruned copies of a forest.

use grove_core::TreeNode;

struct Visited<'a> {
    node: &'a TreeNode,
    parent: Option<usize>,
    /// The node or one of its ancestors matched.
    covered: bool,
}

/// Copy the forest, keeping only nodes that match `predicate` together with
/// their ancestors.
///
/// A matching node keeps its whole subtree, and `predicate` is not called
/// below it. Sibling order is preserved.
pub fn filter(roots: &[TreeNode], mut predicate: impl FnMut(&TreeNode) -> bool) -> Vec<TreeNode> {
    let mut order: Vec<Visited<'_>> = Vec::new();
    let mut stack: Vec<(&TreeNode, Option<usize>)> =
        roots.iter().rev().map(|node| (node, None)).collect();
    while let Some((node, parent)) = stack.pop() {
        let covered = parent.is_some_and(|p| order[p].covered) || predicate(node);
        let index = order.len();
        order.push(Visited {
            node,
            parent,
            covered,
        });
        stack.extend(node.children.iter().rev().map(|child| (child, Some(index))));
    }

    // Pre-order puts every descendant after its ancestor, so one reverse
    // sweep marks the ancestors of each kept node.
    let mut keep = vec![false; order.len()];
    for index in (0..order.len()).rev() {
        keep[index] |= order[index].covered;
        if let (true, Some(parent)) = (keep[index], order[index].parent) {
            keep[parent] = true;
        }
    }

    let mut slots: Vec<Option<TreeNode>> = Vec::with_capacity(order.len());
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); order.len()];
    let mut top = Vec::new();
    for (index, visited) in order.iter().enumerate() {
        if !keep[index] {
            slots.push(None);
            continue;
        }
        slots.push(Some(visited.node.detached()));
        match visited.parent {
            Some(parent) => children[parent].push(index),
            None => top.push(index),
        }
    }

    for index in (0..slots.len()).rev() {
        if let Some(mut node) = slots[index].take() {
            node.children = std::mem::take(&mut children[index])
                .into_iter()
                .filter_map(|child| slots[child].take())
                .collect();
            slots[index] = Some(node);
        }
    }

    top.into_iter()
        .filter_map(|index| slots[index].take())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use grove_core::NodeKey;

    fn forest() -> Vec<TreeNode> {
        vec![
            TreeNode::new(1).with_name("system").with_children(vec![
                TreeNode::new(2)
                    .with_name("users")
                    .with_children(vec![TreeNode::new(4).with_name("add user")]),
                TreeNode::new(3)
                    .with_name("roles")
                    .with_children(vec![TreeNode::new(5).with_name("add role")]),
            ]),
            TreeNode::new(6).with_name("reports"),
        ]
    }

    #[test]
    fn test_keeps_ancestors_of_matches() {
        let kept = filter(&forest(), |node| node.name_or_empty() == "add role");

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, NodeKey::from(1));
        assert_eq!(kept[0].child_count(), 1);
        assert_eq!(kept[0].children[0].id, NodeKey::from(3));
        assert_eq!(kept[0].children[0].children[0].id, NodeKey::from(5));
    }

    #[test]
    fn test_match_keeps_whole_subtree() {
        let mut calls = 0;
        let kept = filter(&forest(), |node| {
            calls += 1;
            node.id == NodeKey::from(1)
        });

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].subtree_size(), 5);
        // Only the two roots are tested.
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_preserves_sibling_order() {
        let kept = filter(&forest(), |node| node.name_or_empty().starts_with("add"));
        let ids: Vec<&NodeKey> = kept[0].children.iter().map(|n| &n.id).collect();
        assert_eq!(ids, [&NodeKey::from(2), &NodeKey::from(3)]);
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(filter(&forest(), |_| false).is_empty());
        assert!(filter(&[], |_| true).is_empty());
    }

    #[test]
    fn test_source_is_untouched() {
        let roots = forest();
        let before = roots.clone();
        let _ = filter(&roots, |node| node.is_leaf());
        assert_eq!(roots, before);
    }
}
