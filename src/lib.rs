//! A computer opponent for the generalised board game 'Connect K'
//!
//! Players take turns dropping tokens into the columns of an N×M grid, and the
//! first player to line up K of their own tokens horizontally, vertically or
//! diagonally wins. Any number of players may take part.
//!
//! The agents in this crate do not search the game tree. The strongest one plays
//! a single ply ahead, ranking each column by the threats it creates and blocks.
//!
//! # Basic Usage
//!
//! ```
//! use connectk_ai::{Board, Outcome, Player, Rules, Strategy};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let rules = Rules::new(3, 3, 3, 2)?;
//! let mut board = Board::new(rules.rows, rules.cols)?;
//! let mut rng = fastrand::Rng::with_seed(7);
//!
//! let column = Strategy::Hard.play_turn(&rules, &mut board, Player::FIRST, &mut rng, &mut ())?;
//!
//! assert_eq!(column, 2);
//! assert_eq!(connectk_ai::evaluate(rules.k, &board), Outcome::NotOver);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod config;

pub mod error;

pub mod board;

pub mod lines;

pub mod outcome;

pub mod heuristics;

pub mod strategy;

pub mod game;

pub mod record;

pub mod arena;


pub use board::{Board, Cell, Player, Position};
pub use config::Rules;
pub use error::Error;
pub use game::Game;
pub use outcome::{evaluate, Outcome};
pub use strategy::{ColumnInput, Strategy};

// board copies are the hot path of the hard agent, so keep cells a single byte
const_assert_eq!(std::mem::size_of::<Cell>(), 1);
