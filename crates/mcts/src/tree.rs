//! Arena-allocated search tree.
//!
//! Using a Vec<SearchNode> with indices provides better cache locality
//! and simpler ownership compared to Rc<RefCell<Node>>. Each child is owned
//! by the arena and listed under exactly one parent.

use crate::node::{NodeId, SearchNode};
use std::fmt::{Debug, Write};
use std::hash::Hash;

/// Arena-allocated search tree.
///
/// Nodes are stored in a contiguous vector and referenced by index.
/// The tree only ever grows: one node per completed iteration.
#[derive(Debug)]
pub struct SearchTree<M: Copy + Eq + Hash> {
    nodes: Vec<SearchNode<M>>,
}

impl<M: Copy + Eq + Hash> SearchTree<M> {
    /// Create a new tree whose root may still expand `root_actions`.
    pub fn new(root_actions: Vec<M>) -> Self {
        Self {
            nodes: vec![SearchNode::root(root_actions)],
        }
    }

    /// Get a reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId does not come from this tree.
    pub fn get(&self, id: NodeId) -> &SearchNode<M> {
        &self.nodes[id.0]
    }

    /// Get a mutable reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId does not come from this tree.
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode<M> {
        &mut self.nodes[id.0]
    }

    /// Add a child of `parent` reached by `action` and register it under
    /// that move. Returns the new child's ID.
    pub fn add_child(&mut self, parent: NodeId, action: M, untried_actions: Vec<M>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(SearchNode::new(parent, action, untried_actions));
        self.get_mut(parent).children.push((action, id));
        id
    }

    /// Walk from `leaf` up to the root (inclusive), adding one visit and
    /// `value` to every node on the way.
    pub fn backpropagate(&mut self, leaf: NodeId, value: f32) {
        let mut current = Some(leaf);

        while let Some(id) = current {
            let node = self.get_mut(id);
            node.visits += 1;
            node.wins += value;
            current = node.parent;
        }
    }

    /// Number of edges between `id` and the root.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.get(id).parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.get(parent).parent;
        }
        depth
    }

    /// Get the number of nodes in the tree, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (never true, the root always exists).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the root node.
    pub fn root(&self) -> &SearchNode<M> {
        self.get(NodeId::ROOT)
    }

    /// Iterate over all nodes with their IDs, in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SearchNode<M>)> {
        self.nodes.iter().enumerate().map(|(i, node)| (NodeId(i), node))
    }
}

impl<M: Copy + Eq + Hash + Debug> SearchTree<M> {
    /// Render the tree as indented text, at most `horizon` levels below the
    /// root, with `indent` spaces per level.
    pub fn render(&self, horizon: usize, indent: usize) -> String {
        let mut out = String::new();
        self.render_node(NodeId::ROOT, 0, horizon, indent, &mut out);
        out
    }

    fn render_node(&self, id: NodeId, level: usize, horizon: usize, indent: usize, out: &mut String) {
        let node = self.get(id);
        let rate = node.win_rate().unwrap_or(0.0);
        let label = match node.parent_action {
            Some(action) => format!("{:?}", action),
            None => "root".to_string(),
        };
        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "{:width$}[{}, win rate = {:.3}, visits = {}, untried = {}]",
            "",
            label,
            rate,
            node.visits,
            node.untried_actions.len(),
            width = level * indent
        );

        if level < horizon {
            for (_, child) in &node.children {
                self.render_node(*child, level + 1, horizon, indent, out);
            }
        }
    }
}
