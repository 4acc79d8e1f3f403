use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Identity of one of the two players of an alternating-turn game.
pub trait Player: Copy + Eq + Hash + Debug {
    /// The other player.
    fn opponent(self) -> Self;
}

/// Final result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome<P> {
    /// The given player won.
    Winner(P),
    /// Nobody won.
    Tie,
}

/// A board coordinate used by the tactical hooks, `(x, y)`.
pub type Cell = (i32, i32);

/// Orientation of a line anchored at a [`Cell`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Both axes, horizontal first.
    pub const ALL: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];
}

/// The game abstraction consumed by the search.
///
/// A state is a mutable position: the search clones it once per iteration
/// and walks the clone forward with [`GameState::apply_move`]. Cloning must
/// produce an independent deep copy.
///
/// Games must be finite: every sequence of legal moves reaches a terminal
/// state. The search does not bound rollout depth.
pub trait GameState: Clone {
    /// A move (e.g. the cell to mark, the line to draw)
    type Move: Copy + Eq + Hash + Debug;

    /// The player identity
    type Player: Player;

    /// Returns the player to move
    fn player_turn(&self) -> Self::Player;

    /// Returns all legal moves, in a deterministic order.
    /// Non-empty unless the state is terminal.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Applies a legal move in place
    fn apply_move(&mut self, mv: Self::Move);

    /// Returns true once the game has ended
    fn is_terminal(&self) -> bool;

    /// Returns the result of the game:
    /// - `Some(Outcome::Winner(p))` if `p` won
    /// - `Some(Outcome::Tie)` for a tie
    /// - `None` if the game is not terminal
    fn outcome(&self) -> Option<Outcome<Self::Player>>;

    /// Numeric score of `player` at this state.
    ///
    /// Games without a native score report 1.0 for the winner and 0.0
    /// otherwise.
    fn score(&self, player: Self::Player) -> f32 {
        match self.outcome() {
            Some(Outcome::Winner(winner)) if winner == player => 1.0,
            _ => 0.0,
        }
    }

    /// Number of resolved scoring units (e.g. completed boxes) on the board.
    fn resolved_units(&self) -> usize {
        0
    }

    /// The cell a move targets, if the game has a notion of one.
    fn target_cell(&self, _mv: Self::Move) -> Option<Cell> {
        None
    }

    /// Whether a line along `axis` anchored at `cell` has already been claimed.
    /// Coordinates outside the board are never claimed.
    fn is_claimed(&self, _cell: Cell, _axis: Axis) -> bool {
        false
    }
}

/// Shape of the block of cells inspected around a move's target cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Neighborhood {
    /// Offsets `(i, i)` for `i` in `-1..=1`.
    Diagonal,
    /// The full 3x3 block around the cell.
    #[default]
    Moore,
}

impl Neighborhood {
    /// Offsets relative to the target cell, including `(0, 0)`.
    pub fn offsets(self) -> Vec<Cell> {
        match self {
            Neighborhood::Diagonal => (-1..=1).map(|i| (i, i)).collect(),
            Neighborhood::Moore => (-1..=1)
                .flat_map(|dx| (-1..=1).map(move |dy| (dx, dy)))
                .collect(),
        }
    }

    /// Cells around `center` in this neighborhood.
    pub fn around(self, center: Cell) -> Vec<Cell> {
        self.offsets()
            .into_iter()
            .map(|(dx, dy)| (center.0 + dx, center.1 + dy))
            .collect()
    }
}
