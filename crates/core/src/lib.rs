//! UCT Core - Game abstractions shared by the search and the games
//!
//! This crate provides the [`GameState`] trait that any alternating-turn,
//! perfect-information two-player game implements to be searchable.
//!
//! # Types
//!
//! - [`GameState`] - Trait for game positions
//! - [`Player`] - Two-player identity
//! - [`Outcome`] - Winner or tie of a finished game
//! - [`Neighborhood`], [`Axis`], [`Cell`] - Tactical hook vocabulary

mod error;
mod game;

pub use error::{Result, UctError};
pub use game::{Axis, Cell, GameState, Neighborhood, Outcome, Player};
