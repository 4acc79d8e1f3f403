//! Final move choice at the root.

use crate::config::{DecisionRule, UctConfig};
use crate::heuristic::select_child;
use crate::node::NodeId;
use crate::tree::SearchTree;
use uct_core::{GameState, Result, UctError};

/// Pick the move to play from a finished search tree.
///
/// `state` must be the root position the tree was built from; the player
/// to move there is the searching agent. Ties go to the root child that
/// was expanded first.
///
/// # Errors
/// Returns `UctError::NoLegalMove` if the root has no children, and
/// propagates `UctError::InvalidState` from heuristic scoring.
pub fn decide<G: GameState>(
    tree: &SearchTree<G::Move>,
    state: &G,
    config: &UctConfig,
) -> Result<G::Move> {
    let root = tree.root();
    if root.children.is_empty() {
        return Err(UctError::NoLegalMove);
    }

    let best = match config.decision_rule {
        DecisionRule::MaxVisits => most_visited(tree),
        DecisionRule::MaxHeuristicScore => {
            select_child(tree, NodeId::ROOT, state, state.player_turn(), config)?
        }
    };

    best.and_then(|id| tree.get(id).parent_action).ok_or(UctError::NoLegalMove)
}

fn most_visited<M: Copy + Eq + std::hash::Hash>(tree: &SearchTree<M>) -> Option<NodeId> {
    let mut best: Option<(NodeId, u32)> = None;
    for &(_, child) in &tree.root().children {
        let visits = tree.get(child).visits;
        match best {
            Some((_, most)) if visits <= most => {}
            _ => best = Some((child, visits)),
        }
    }
    best.map(|(id, _)| id)
}
