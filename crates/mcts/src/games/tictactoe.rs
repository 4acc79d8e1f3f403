//! Tic-tac-toe implementation for search validation.
//!
//! Tic-tac-toe is a solved game where perfect play always results in a draw.
//! This makes it ideal for validating the search:
//! - The search should never lose against a random opponent
//! - The search should take immediate wins and block immediate losses

use std::fmt;
use uct_core::{GameState, Outcome, Player};

/// Tic-tac-toe mark.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Mark {
    X,
    O,
}

impl Player for Mark {
    fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// Tic-tac-toe action (cell index 0-8).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TicTacToeAction(pub u8);

impl TicTacToeAction {
    /// Get the row (0-2).
    pub fn row(self) -> u8 {
        self.0 / 3
    }

    /// Get the column (0-2).
    pub fn col(self) -> u8 {
        self.0 % 3
    }
}

impl fmt::Display for TicTacToeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row(), self.col())
    }
}

/// Tic-tac-toe position.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct TicTacToe {
    /// Board: 9 cells, indexed 0-8 (row-major).
    /// ```text
    /// 0 | 1 | 2
    /// ---------
    /// 3 | 4 | 5
    /// ---------
    /// 6 | 7 | 8
    /// ```
    board: [Option<Mark>; 9],

    /// Mark to move.
    current: Mark,

    /// Cached winner (if any).
    winner: Option<Mark>,
}

impl TicTacToe {
    /// Create a new empty board with X to move.
    pub fn new() -> Self {
        Self {
            board: [None; 9],
            current: Mark::X,
            winner: None,
        }
    }

    /// Play a sequence of cells from the empty board.
    pub fn from_moves(cells: &[u8]) -> Self {
        let mut state = Self::new();
        for &cell in cells {
            state.apply_move(TicTacToeAction(cell));
        }
        state
    }

    /// Get the winner, if any.
    pub fn winner(&self) -> Option<Mark> {
        self.winner
    }

    /// Get the mark at a cell, if any.
    pub fn get(&self, cell: usize) -> Option<Mark> {
        self.board.get(cell).copied().flatten()
    }

    /// Check for a winner on the current board.
    fn check_winner(&self) -> Option<Mark> {
        const LINES: [[usize; 3]; 8] = [
            [0, 1, 2], // top row
            [3, 4, 5], // middle row
            [6, 7, 8], // bottom row
            [0, 3, 6], // left column
            [1, 4, 7], // center column
            [2, 5, 8], // right column
            [0, 4, 8], // main diagonal
            [2, 4, 6], // anti-diagonal
        ];

        for line in LINES {
            if let Some(mark) = self.board[line[0]] {
                if self.board[line[1]] == Some(mark) && self.board[line[2]] == Some(mark) {
                    return Some(mark);
                }
            }
        }
        None
    }

    /// Check if the board is full (draw if no winner).
    fn is_full(&self) -> bool {
        self.board.iter().all(|c| c.is_some())
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            if row > 0 {
                writeln!(f, "-----------")?;
            }
            for col in 0..3 {
                if col > 0 {
                    write!(f, " | ")?;
                }
                match self.board[row * 3 + col] {
                    Some(mark) => write!(f, " {} ", mark)?,
                    None => write!(f, "   ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl GameState for TicTacToe {
    type Move = TicTacToeAction;
    type Player = Mark;

    fn player_turn(&self) -> Mark {
        self.current
    }

    fn legal_moves(&self) -> Vec<TicTacToeAction> {
        if self.winner.is_some() {
            return Vec::new();
        }
        self.board
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(i, _)| TicTacToeAction(i as u8))
            .collect()
    }

    fn apply_move(&mut self, mv: TicTacToeAction) {
        self.board[mv.0 as usize] = Some(self.current);
        self.current = self.current.opponent();
        self.winner = self.check_winner();
    }

    fn is_terminal(&self) -> bool {
        self.winner.is_some() || self.is_full()
    }

    fn outcome(&self) -> Option<Outcome<Mark>> {
        if let Some(winner) = self.winner {
            Some(Outcome::Winner(winner))
        } else if self.is_full() {
            Some(Outcome::Tie)
        } else {
            None // Game not over
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = TicTacToe::new();

        assert_eq!(state.player_turn(), Mark::X);
        assert!(state.winner().is_none());
        assert!(!state.is_terminal());
        assert_eq!(state.outcome(), None);
    }

    #[test]
    fn test_legal_moves_empty_board() {
        let state = TicTacToe::new();
        assert_eq!(state.legal_moves().len(), 9);
    }

    #[test]
    fn test_legal_moves_partial_board() {
        // Play X in center
        let state = TicTacToe::from_moves(&[4]);
        let actions = state.legal_moves();

        assert_eq!(actions.len(), 8);
        assert!(!actions.contains(&TicTacToeAction(4)));
    }

    #[test]
    fn test_apply_move() {
        let mut state = TicTacToe::new();
        state.apply_move(TicTacToeAction(0));

        assert_eq!(state.get(0), Some(Mark::X));
        assert_eq!(state.player_turn(), Mark::O);
    }

    #[test]
    fn test_clone_is_independent() {
        let state = TicTacToe::from_moves(&[0]);
        let mut copy = state.clone();
        copy.apply_move(TicTacToeAction(1));

        assert_eq!(state.get(1), None);
        assert_eq!(copy.get(1), Some(Mark::O));
    }

    #[test]
    fn test_x_wins_top_row() {
        // X plays 0, 1, 2 (top row); O plays 3, 4
        let state = TicTacToe::from_moves(&[0, 3, 1, 4, 2]);

        assert!(state.is_terminal());
        assert_eq!(state.outcome(), Some(Outcome::Winner(Mark::X)));
        assert!(state.legal_moves().is_empty());
        assert_eq!(state.score(Mark::X), 1.0);
        assert_eq!(state.score(Mark::O), 0.0);
    }

    #[test]
    fn test_o_wins_diagonal() {
        // O plays 2, 4, 6 (anti-diagonal); X plays 0, 1, 3
        let state = TicTacToe::from_moves(&[0, 2, 1, 4, 3, 6]);

        assert!(state.is_terminal());
        assert_eq!(state.winner(), Some(Mark::O));
    }

    #[test]
    fn test_draw() {
        // X O X
        // X O O
        // O X X
        let state = TicTacToe::from_moves(&[0, 1, 2, 4, 3, 5, 7, 6, 8]);

        assert!(state.is_terminal());
        assert!(state.winner().is_none());
        assert_eq!(state.outcome(), Some(Outcome::Tie));
        assert_eq!(state.score(Mark::X), 0.0);
    }

    #[test]
    fn test_display() {
        let state = TicTacToe::from_moves(&[0, 4]);

        let display = format!("{}", state);
        assert!(display.contains("X"));
        assert!(display.contains("O"));
    }
}
