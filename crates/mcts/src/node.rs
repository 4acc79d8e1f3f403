//! Search node types for tree storage.
//!
//! Uses arena allocation with indices: a node refers to its parent by
//! [`NodeId`], never by an owning pointer, so the tree has no reference cycles.

use std::hash::Hash;

/// Index into the node arena.
///
/// This is a lightweight handle that references a node in the tree.
/// Using indices instead of pointers avoids Rc/RefCell overhead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);

    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node in the search tree.
///
/// Each node stands for the position reached by playing `parent_action`
/// from the parent's position, and accumulates the outcomes of every
/// simulation that passed through it.
#[derive(Clone, Debug)]
pub struct SearchNode<M: Copy + Eq + Hash> {
    /// Parent node (None for root).
    pub parent: Option<NodeId>,

    /// Move that led from the parent to this node (None for root).
    pub parent_action: Option<M>,

    /// Children in expansion order: (move, node_id) pairs.
    pub children: Vec<(M, NodeId)>,

    /// Legal moves at this node not yet expanded into children.
    pub untried_actions: Vec<M>,

    /// Number of simulations that passed through this node.
    pub visits: u32,

    /// Sum of the outcome values backpropagated through this node.
    pub wins: f32,
}

impl<M: Copy + Eq + Hash> SearchNode<M> {
    /// Create an unvisited node reached from `parent` by `action`.
    pub fn new(parent: NodeId, action: M, untried_actions: Vec<M>) -> Self {
        Self {
            parent: Some(parent),
            parent_action: Some(action),
            children: Vec::new(),
            untried_actions,
            visits: 0,
            wins: 0.0,
        }
    }

    /// Create the root node.
    pub fn root(untried_actions: Vec<M>) -> Self {
        Self {
            parent: None,
            parent_action: None,
            children: Vec::new(),
            untried_actions,
            visits: 0,
            wins: 0.0,
        }
    }

    /// Mean outcome (`wins / visits`).
    ///
    /// Returns `None` if the node has never been visited.
    pub fn win_rate(&self) -> Option<f32> {
        if self.visits == 0 {
            None
        } else {
            Some(self.wins / self.visits as f32)
        }
    }

    /// Whether every legal move from this node already has a child.
    pub fn is_fully_expanded(&self) -> bool {
        self.untried_actions.is_empty()
    }

    /// Whether the node has no children yet.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Child reached by `action`, if it has been expanded.
    pub fn child(&self, action: M) -> Option<NodeId> {
        self.children
            .iter()
            .find(|(a, _)| *a == action)
            .map(|(_, id)| *id)
    }
}
