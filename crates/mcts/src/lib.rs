//! UCT (Upper Confidence bounds applied to Trees) search.
//!
//! This crate provides a generic Monte Carlo Tree Search that can be used
//! with any game implementing the `uct_core::GameState` trait.
//!
//! # Features
//!
//! - **Generic**: Works with any `GameState` implementation
//! - **UCB1 Selection**: Vanilla, turn-asymmetric, and heuristic-adjusted
//!   scoring
//! - **Random Rollouts**: Uniform playouts to the end of the game
//! - **Budgets**: Fixed iteration count or wall-clock deadline
//! - **Decision Rules**: Most visited or best scoring root child
//!
//! # Example
//!
//! ```
//! use uct_mcts::{Uct, UctConfig, games::TicTacToe};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let state = TicTacToe::new();
//!
//! let config = UctConfig::with_iterations(200);
//! let rng = ChaCha8Rng::seed_from_u64(42);
//! let mut uct = Uct::new(config, rng);
//!
//! let result = uct.search(&state).expect("empty board has legal moves");
//! println!("Best move: {}", result.best_move);
//! println!("Iterations: {}", result.iterations);
//! ```

pub mod config;
pub mod decision;
pub mod games;
pub mod heuristic;
mod node;
pub mod search;
mod tree;

pub use config::{Budget, DecisionRule, HeuristicVariant, OutcomeScale, UctConfig};
pub use decision::decide;
pub use node::{NodeId, SearchNode};
pub use search::{ChildStats, SearchResult, Uct};
pub use tree::SearchTree;
pub use uct_core::{GameState, Result, UctError};
