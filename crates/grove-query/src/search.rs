//! Lookup by identifier and ancestor paths.

use grove_core::{NodeKey, TreeNode};

use crate::walk::iter;

/// Find the first node with identifier `key`, in pre-order.
pub fn find<'a>(roots: &'a [TreeNode], key: &NodeKey) -> Option<&'a TreeNode> {
    iter(roots).map(|(_, node)| node).find(|node| node.id == *key)
}

/// Mutable variant of [`find`].
pub fn find_mut<'a>(roots: &'a mut [TreeNode], key: &NodeKey) -> Option<&'a mut TreeNode> {
    let mut stack: Vec<&'a mut TreeNode> = roots.iter_mut().rev().collect();
    while let Some(node) = stack.pop() {
        if node.id == *key {
            return Some(node);
        }
        stack.extend(node.children.iter_mut().rev());
    }
    None
}

/// Nodes from a root down to the node with identifier `key`.
///
/// The node itself is the last element when `include_self` is set. Returns
/// None if no node carries `key`.
pub fn ancestors<'a>(
    roots: &'a [TreeNode],
    key: &NodeKey,
    include_self: bool,
) -> Option<Vec<&'a TreeNode>> {
    let mut path: Vec<&'a TreeNode> = Vec::new();
    for (depth, node) in iter(roots) {
        path.truncate(depth as usize);
        path.push(node);
        if node.id == *key {
            if !include_self {
                path.pop();
            }
            return Some(path);
        }
    }
    None
}

/// Identifiers from a root down to `key`.
pub fn path_ids(roots: &[TreeNode], key: &NodeKey, include_self: bool) -> Option<Vec<NodeKey>> {
    ancestors(roots, key, include_self)
        .map(|path| path.into_iter().map(|node| node.id.clone()).collect())
}

/// Names from a root down to `key`; unnamed nodes are skipped.
pub fn path_names<'a>(
    roots: &'a [TreeNode],
    key: &NodeKey,
    include_self: bool,
) -> Option<Vec<&'a str>> {
    ancestors(roots, key, include_self)
        .map(|path| path.into_iter().filter_map(|node| node.name.as_deref()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forest() -> Vec<TreeNode> {
        vec![TreeNode::new(1).with_name("root").with_children(vec![
            TreeNode::new(2)
                .with_name("a")
                .with_children(vec![TreeNode::new(4).with_name("leaf")]),
            TreeNode::new(3),
        ])]
    }

    #[test]
    fn test_find() {
        let roots = forest();
        assert_eq!(find(&roots, &NodeKey::from(4)).unwrap().name_or_empty(), "leaf");
        assert!(find(&roots, &NodeKey::from(99)).is_none());
    }

    #[test]
    fn test_find_mut() {
        let mut roots = forest();
        find_mut(&mut roots, &NodeKey::from(3)).unwrap().name = Some("b".into());
        assert_eq!(roots[0].children[1].name.as_deref(), Some("b"));
    }

    #[test]
    fn test_ancestors() {
        let roots = forest();
        let path = path_ids(&roots, &NodeKey::from(4), true).unwrap();
        assert_eq!(path, [1, 2, 4].map(NodeKey::from));

        let parents = path_ids(&roots, &NodeKey::from(4), false).unwrap();
        assert_eq!(parents, [1, 2].map(NodeKey::from));

        assert_eq!(path_ids(&roots, &NodeKey::from(1), false), Some(Vec::new()));
        assert_eq!(path_ids(&roots, &NodeKey::from(9), true), None);
    }

    #[test]
    fn test_ancestors_after_sibling_subtree() {
        let roots = forest();
        let path = path_ids(&roots, &NodeKey::from(3), true).unwrap();
        assert_eq!(path, [1, 3].map(NodeKey::from));
    }

    #[test]
    fn test_path_names_skip_unnamed() {
        let roots = forest();
        assert_eq!(
            path_names(&roots, &NodeKey::from(3), true).unwrap(),
            ["root"]
        );
        assert_eq!(
            path_names(&roots, &NodeKey::from(4), true).unwrap(),
            ["root", "a", "leaf"]
        );
    }
}
