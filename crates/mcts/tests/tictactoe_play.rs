//! Tests verifying UCT plays sound tic-tac-toe.
//!
//! With the turn-asymmetric heuristic the search models an opponent that
//! plays against the agent, so it should:
//! - Take an immediate win
//! - Block an immediate loss
//! - Never lose against a random opponent

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use uct_core::Outcome;
use uct_mcts::games::{Mark, TicTacToe, TicTacToeAction};
use uct_mcts::{DecisionRule, GameState, HeuristicVariant, Uct, UctConfig};

/// Create a searcher with the given seed.
fn create_uct(seed: u64, iterations: usize) -> Uct<ChaCha8Rng> {
    let config = UctConfig::with_iterations(iterations).heuristic(HeuristicVariant::TurnAsymmetric);
    Uct::new(config, ChaCha8Rng::seed_from_u64(seed))
}

/// Play one game; `uct_mark` is searched, the other side moves at random.
fn play_against_random(uct_mark: Mark, seed: u64) -> TicTacToe {
    let mut uct = create_uct(seed, 3000);
    let mut rng = ChaCha8Rng::seed_from_u64(seed + 1000);
    let mut state = TicTacToe::new();

    while !state.is_terminal() {
        let mv = if state.player_turn() == uct_mark {
            uct.think(&state).expect("game is not over")
        } else {
            *state.legal_moves().choose(&mut rng).expect("game is not over")
        };
        state.apply_move(mv);
    }
    state
}

#[test]
fn test_takes_immediate_win() {
    // X X _
    // O O _
    // _ _ _
    let state = TicTacToe::from_moves(&[0, 3, 1, 4]);

    for seed in 0..5 {
        let mut uct = create_uct(seed, 2000);
        assert_eq!(uct.think(&state), Ok(TicTacToeAction(2)), "seed {}", seed);
    }
}

#[test]
fn test_blocks_immediate_loss() {
    // X X _
    // _ O _
    // _ _ _
    let state = TicTacToe::from_moves(&[0, 4, 1]);
    assert_eq!(state.player_turn(), Mark::O);

    for seed in 0..5 {
        let mut uct = create_uct(seed, 3000);
        assert_eq!(uct.think(&state), Ok(TicTacToeAction(2)), "seed {}", seed);
    }
}

#[test]
fn test_heuristic_decision_takes_win() {
    let state = TicTacToe::from_moves(&[0, 3, 1, 4]);
    let config = UctConfig::with_iterations(2000)
        .heuristic(HeuristicVariant::TurnAsymmetric)
        .decision_rule(DecisionRule::MaxHeuristicScore);
    let mut uct = Uct::new(config, ChaCha8Rng::seed_from_u64(3));

    assert_eq!(uct.think(&state), Ok(TicTacToeAction(2)));
}

#[test]
fn test_never_loses_as_x() {
    for seed in 0..20 {
        let state = play_against_random(Mark::X, seed);
        assert_ne!(
            state.outcome(),
            Some(Outcome::Winner(Mark::O)),
            "UCT (X) lost game with seed {}. Final state:\n{}",
            seed,
            state
        );
    }
}

#[test]
fn test_never_loses_as_o() {
    for seed in 0..20 {
        let state = play_against_random(Mark::O, seed);
        assert_ne!(
            state.outcome(),
            Some(Outcome::Winner(Mark::X)),
            "UCT (O) lost game with seed {}. Final state:\n{}",
            seed,
            state
        );
    }
}
