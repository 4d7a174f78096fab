//! Search tree stored as an arena.
//!
//! Nodes refer to their parent by index; children are never linked, since no
//! strategy walks the tree downwards once a node is created.

use crate::brick::{BrickState, Direction};

/// One discovered brick state and how the search reached it.
#[derive(Clone, Copy, Debug)]
pub struct SearchNode {
    pub state: BrickState,
    /// Arena index of the parent; `None` only for the root.
    pub parent: Option<usize>,
    /// Move taken from the parent; `None` only for the root.
    pub direction: Option<Direction>,
    /// Moves from the root, which is also the path cost `g`.
    pub depth: u32,
}

/// Owns every node created during one search.
#[derive(Debug)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
}

impl SearchTree {
    pub const ROOT: usize = 0;

    pub fn new(root: BrickState) -> Self {
        Self {
            nodes: vec![SearchNode {
                state: root,
                parent: None,
                direction: None,
                depth: 0,
            }],
        }
    }

    /// Adds a child of `parent` and returns its index.
    pub fn push_child(&mut self, parent: usize, direction: Direction, state: BrickState) -> usize {
        let depth = self.nodes[parent].depth + 1;
        self.nodes.push(SearchNode {
            state,
            parent: Some(parent),
            direction: Some(direction),
            depth,
        });
        self.nodes.len() - 1
    }

    #[inline]
    pub fn node(&self, index: usize) -> &SearchNode {
        &self.nodes[index]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Directions from the root to `index`, in move order.
    pub fn path_to(&self, index: usize) -> Vec<Direction> {
        let mut path = Vec::with_capacity(self.nodes[index].depth as usize);
        let mut current = Some(index);
        while let Some(node) = current.map(|i| &self.nodes[i]) {
            path.extend(node.direction);
            current = node.parent;
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_has_empty_path() {
        let tree = SearchTree::new(BrickState::standing(1, 1));
        assert_eq!(tree.len(), 1);
        assert!(tree.path_to(SearchTree::ROOT).is_empty());
        assert_eq!(tree.node(SearchTree::ROOT).depth, 0);
    }

    #[test]
    fn test_path_follows_parent_links() {
        let start = BrickState::standing(1, 1);
        let mut tree = SearchTree::new(start);

        let right = start.roll(Direction::Right);
        let a = tree.push_child(SearchTree::ROOT, Direction::Right, right);
        // a sibling that is not on the returned path
        tree.push_child(SearchTree::ROOT, Direction::Down, start.roll(Direction::Down));
        let b = tree.push_child(a, Direction::Down, right.roll(Direction::Down));

        assert_eq!(tree.node(b).depth, 2);
        assert_eq!(tree.path_to(b), vec![Direction::Right, Direction::Down]);
        assert_eq!(tree.path_to(a), vec![Direction::Right]);
    }
}
