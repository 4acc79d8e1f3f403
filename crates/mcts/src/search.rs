//! UCT search implementation.
//!
//! Every iteration runs four phases on a private clone of the root state:
//! 1. Selection: descend through fully expanded nodes by heuristic score
//! 2. Expansion: add one child for a random untried move
//! 3. Rollout: play uniformly random moves until the game ends
//! 4. Backpropagation: add the outcome to every node on the path

use crate::{
    config::{Budget, OutcomeScale, UctConfig},
    decision::decide,
    heuristic::select_child,
    node::NodeId,
    tree::SearchTree,
};
use rand::seq::SliceRandom;
use rand::Rng;
use std::hash::Hash;
use std::time::{Duration, Instant};
use tracing::{debug, trace};
use uct_core::{GameState, Outcome, Player, Result};

/// Statistics of one root child after a search.
#[derive(Clone, Debug, PartialEq)]
pub struct ChildStats<M> {
    /// Move leading to the child.
    pub action: M,
    /// Simulations through the child.
    pub visits: u32,
    /// Accumulated outcome through the child.
    pub wins: f32,
}

/// Result of a search.
#[derive(Clone, Debug)]
pub struct SearchResult<M: Copy + Eq + Hash> {
    /// Move chosen by the decision rule.
    pub best_move: M,

    /// Completed iterations.
    pub iterations: usize,

    /// Nodes in the tree when the search stopped, root included.
    pub tree_size: usize,

    /// Root children in expansion order.
    pub root_children: Vec<ChildStats<M>>,

    /// Wall-clock time spent searching.
    pub elapsed: Duration,
}

/// UCT searcher.
///
/// Generic over the random number generator `R`, which drives expansion
/// and rollouts. A seeded generator makes searches reproducible.
pub struct Uct<R: Rng> {
    config: UctConfig,
    rng: R,
}

impl<R: Rng> Uct<R> {
    /// Create a new searcher.
    pub fn new(config: UctConfig, rng: R) -> Self {
        Self { config, rng }
    }

    /// The configuration this searcher runs with.
    pub fn config(&self) -> &UctConfig {
        &self.config
    }

    /// Choose a move for the player to move at `state`.
    ///
    /// # Errors
    /// Returns `UctError::NoLegalMove` if no iteration completed or the
    /// root has no legal moves.
    pub fn think<G: GameState>(&mut self, state: &G) -> Result<G::Move> {
        self.search(state).map(|result| result.best_move)
    }

    /// Run a full search from `state` and report the chosen move with the
    /// root statistics. The tree is discarded before returning.
    pub fn search<G: GameState>(&mut self, state: &G) -> Result<SearchResult<G::Move>> {
        let start = Instant::now();
        let (tree, iterations) = self.grow(state)?;
        let best_move = decide(&tree, state, &self.config)?;

        let root_children = tree
            .root()
            .children
            .iter()
            .map(|&(action, id)| {
                let child = tree.get(id);
                ChildStats {
                    action,
                    visits: child.visits,
                    wins: child.wins,
                }
            })
            .collect();

        let elapsed = start.elapsed();
        debug!(
            iterations,
            tree_size = tree.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            best_move = ?best_move,
            "Search complete"
        );

        Ok(SearchResult {
            best_move,
            iterations,
            tree_size: tree.len(),
            root_children,
            elapsed,
        })
    }

    /// Run the configured budget from `state` and return the tree.
    pub fn build_tree<G: GameState>(&mut self, state: &G) -> Result<SearchTree<G::Move>> {
        self.grow(state).map(|(tree, _)| tree)
    }

    fn grow<G: GameState>(&mut self, state: &G) -> Result<(SearchTree<G::Move>, usize)> {
        let agent = state.player_turn();
        let mut tree = SearchTree::new(state.legal_moves());
        let start = Instant::now();
        let mut iterations = 0;

        // The deadline is only checked between iterations.
        while !budget_exhausted(&self.config.budget, iterations, start) {
            self.simulate(&mut tree, state.clone(), agent)?;
            iterations += 1;
        }

        Ok((tree, iterations))
    }

    /// Run one iteration on `state`, a clone of the root position owned by
    /// this iteration alone.
    fn simulate<G: GameState>(
        &mut self,
        tree: &mut SearchTree<G::Move>,
        mut state: G,
        agent: G::Player,
    ) -> Result<NodeId> {
        let leaf = select(tree, &mut state, agent, &self.config)?;
        let node = expand(tree, leaf, &mut state, &mut self.rng);
        rollout(&mut state, &mut self.rng);
        let value = outcome_value(&state, agent, self.config.outcome_scale);
        tree.backpropagate(node, value);

        trace!(
            node = node.index(),
            depth = tree.depth(node),
            value,
            "Iteration complete"
        );

        Ok(node)
    }
}

fn budget_exhausted(budget: &Budget, iterations: usize, start: Instant) -> bool {
    match budget {
        Budget::Iterations(limit) => iterations >= *limit,
        Budget::TimeSeconds(_) => match budget.time_limit() {
            Some(limit) => start.elapsed() >= limit,
            None => true,
        },
    }
}

/// Selection: starting at the root, repeatedly move to the best-scoring
/// child while the current node is fully expanded and has children,
/// applying each traversed move to `state`.
///
/// Returns the first node that still has untried moves or has no children.
pub fn select<G: GameState>(
    tree: &SearchTree<G::Move>,
    state: &mut G,
    agent: G::Player,
    config: &UctConfig,
) -> Result<NodeId> {
    let mut current = NodeId::ROOT;

    loop {
        let node = tree.get(current);
        if !node.is_fully_expanded() || node.is_leaf() {
            return Ok(current);
        }

        let Some(child) = select_child(tree, current, state, agent, config)? else {
            return Ok(current);
        };
        if let Some(action) = tree.get(child).parent_action {
            state.apply_move(action);
        }
        current = child;
    }
}

/// Expansion: draw one untried move of `node` uniformly at random, play it
/// on `state` and add the resulting child.
///
/// Returns `node` itself, unchanged, if it has no untried moves.
pub fn expand<G: GameState, R: Rng>(
    tree: &mut SearchTree<G::Move>,
    node: NodeId,
    state: &mut G,
    rng: &mut R,
) -> NodeId {
    let untried = &mut tree.get_mut(node).untried_actions;
    if untried.is_empty() {
        return node;
    }

    let index = rng.gen_range(0..untried.len());
    let action = untried.remove(index);
    state.apply_move(action);

    tree.add_child(node, action, state.legal_moves())
}

/// Rollout: play uniformly random legal moves until the game ends.
///
/// A non-terminal state without legal moves breaks the game's contract;
/// the rollout stops there.
pub fn rollout<G: GameState, R: Rng>(state: &mut G, rng: &mut R) {
    while !state.is_terminal() {
        let moves = state.legal_moves();
        let Some(&mv) = moves.choose(rng) else {
            break;
        };
        state.apply_move(mv);
    }
}

/// Value of a finished game for `agent` on the given scale.
///
/// A state that never reached an outcome counts as a tie.
pub fn outcome_value<G: GameState>(state: &G, agent: G::Player, scale: OutcomeScale) -> f32 {
    let loss = match scale {
        OutcomeScale::ZeroOneHalf => 0.0,
        OutcomeScale::Symmetric => -1.0,
        OutcomeScale::ScoreDifferential => {
            return state.score(agent) - state.score(agent.opponent());
        }
    };

    match state.outcome() {
        Some(Outcome::Winner(winner)) if winner == agent => 1.0,
        Some(Outcome::Winner(_)) => loss,
        Some(Outcome::Tie) | None => 0.5,
    }
}
