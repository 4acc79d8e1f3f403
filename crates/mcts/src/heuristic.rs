//! UCB1-family child scoring.
//!
//! All variants share the exploration term `sqrt(2 * ln(N_parent) / N_child)`
//! and differ only in the exploitation part:
//!
//! - `Vanilla`: `wins / visits`, whoever is to move
//! - `TurnAsymmetric`: `1 - wins / visits` when the opponent is to move
//! - `HeuristicAdjusted`: as `TurnAsymmetric`, plus a tactical adjustment
//!   when the searching agent is to move

use crate::config::{HeuristicVariant, UctConfig};
use crate::node::NodeId;
use crate::tree::SearchTree;
use uct_core::{Axis, GameState, Result, UctError};

/// Score `child` among its siblings. Higher is better.
///
/// `state` is the position at the child's parent, i.e. before the child's
/// move is played; its `player_turn` decides whose objective applies.
///
/// # Errors
/// Returns `UctError::InvalidState` if `child` is the root, or if `child`
/// or its parent has never been visited.
pub fn ucb_score<G: GameState>(
    tree: &SearchTree<G::Move>,
    child: NodeId,
    state: &G,
    agent: G::Player,
    config: &UctConfig,
) -> Result<f32> {
    let node = tree.get(child);
    let parent = node
        .parent
        .ok_or_else(|| UctError::InvalidState("cannot score the root node".to_string()))?;
    let parent_visits = tree.get(parent).visits;

    if node.visits == 0 {
        return Err(UctError::InvalidState(format!(
            "node {} scored before its first visit",
            child.index()
        )));
    }
    if parent_visits == 0 {
        return Err(UctError::InvalidState(format!(
            "parent {} of node {} has no visits",
            parent.index(),
            child.index()
        )));
    }

    let visits = node.visits as f32;
    let win_rate = node.wins / visits;
    let exploration =
        config.exploration_constant * (2.0 * (parent_visits as f32).ln() / visits).sqrt();
    let agent_to_move = state.player_turn() == agent;

    let exploit = match config.heuristic {
        HeuristicVariant::Vanilla => win_rate,
        HeuristicVariant::TurnAsymmetric if agent_to_move => win_rate,
        HeuristicVariant::HeuristicAdjusted if agent_to_move => {
            let action = node.parent_action.ok_or_else(|| {
                UctError::InvalidState(format!("node {} has no parent action", child.index()))
            })?;
            win_rate + tactical_adjustment(state, action, config)
        }
        HeuristicVariant::TurnAsymmetric | HeuristicVariant::HeuristicAdjusted => 1.0 - win_rate,
    };

    Ok(exploit + exploration)
}

/// Tactical bonus for playing `mv` at `state`.
///
/// Adds `completion_bonus` if the move increases the number of resolved
/// scoring units, and subtracts `adjacency_penalty` for every claimed line
/// (per cell and axis) in the configured neighborhood of the move's target.
pub fn tactical_adjustment<G: GameState>(state: &G, mv: G::Move, config: &UctConfig) -> f32 {
    let mut adjust = 0.0;

    let mut after = state.clone();
    after.apply_move(mv);
    if after.resolved_units() > state.resolved_units() {
        adjust += config.completion_bonus;
    }

    if let Some(target) = state.target_cell(mv) {
        for cell in config.neighborhood.around(target) {
            for axis in Axis::ALL {
                if state.is_claimed(cell, axis) {
                    adjust -= config.adjacency_penalty;
                }
            }
        }
    }

    adjust
}

/// Child of `parent` with the highest score; the first one wins ties.
///
/// Returns `Ok(None)` if `parent` has no children.
pub fn select_child<G: GameState>(
    tree: &SearchTree<G::Move>,
    parent: NodeId,
    state: &G,
    agent: G::Player,
    config: &UctConfig,
) -> Result<Option<NodeId>> {
    let mut best: Option<(NodeId, f32)> = None;

    for &(_, child) in &tree.get(parent).children {
        let score = ucb_score(tree, child, state, agent, config)?;
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((child, score)),
        }
    }

    Ok(best.map(|(id, _)| id))
}
