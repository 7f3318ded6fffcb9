//! Forest traversal.

use std::collections::VecDeque;
use std::ops::ControlFlow;

use grove_core::TreeNode;

/// Pre-order iterator yielding `(depth, node)`, roots at depth 0.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    stack: Vec<(u32, &'a TreeNode)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (u32, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

/// Breadth-first iterator yielding `(depth, node)`, level by level.
#[derive(Debug, Clone)]
pub struct BreadthFirst<'a> {
    queue: VecDeque<(u32, &'a TreeNode)>,
}

impl<'a> Iterator for BreadthFirst<'a> {
    type Item = (u32, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.queue.pop_front()?;
        self.queue
            .extend(node.children.iter().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

/// Iterate over every node in pre-order.
pub fn iter(roots: &[TreeNode]) -> Iter<'_> {
    Iter {
        stack: roots.iter().rev().map(|node| (0, node)).collect(),
    }
}

/// Iterate over every node level by level.
pub fn iter_breadth_first(roots: &[TreeNode]) -> BreadthFirst<'_> {
    BreadthFirst {
        queue: roots.iter().map(|node| (0, node)).collect(),
    }
}

/// Visit nodes in pre-order until the visitor breaks.
pub fn walk<'a, B>(
    roots: &'a [TreeNode],
    mut visitor: impl FnMut(u32, &'a TreeNode) -> ControlFlow<B>,
) -> ControlFlow<B> {
    for (depth, node) in iter(roots) {
        visitor(depth, node)?;
    }
    ControlFlow::Continue(())
}

/// All nodes in pre-order.
pub fn flatten(roots: &[TreeNode]) -> Vec<&TreeNode> {
    iter(roots).map(|(_, node)| node).collect()
}

/// Total number of nodes.
pub fn count(roots: &[TreeNode]) -> usize {
    iter(roots).count()
}

/// Depth of the deepest node (None for an empty forest).
pub fn height(roots: &[TreeNode]) -> Option<u32> {
    iter(roots).map(|(depth, _)| depth).max()
}
