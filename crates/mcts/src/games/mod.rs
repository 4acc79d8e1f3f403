//! Game implementations for search validation.
//!
//! These games are used to verify search correctness and to drive the
//! arena binary.

pub mod dots_and_boxes;
pub mod tictactoe;

pub use dots_and_boxes::{DotsAndBoxes, Line, Team};
pub use tictactoe::{Mark, TicTacToe, TicTacToeAction};
