use std::fmt;

use crate::board::{Board, Player};
use crate::lines::scan_runs;

/// The state of a game after a move
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Outcome {
    NotOver,
    Draw,
    Winner(Player),
}

impl Outcome {
    pub fn is_over(self) -> bool {
        self != Outcome::NotOver
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::Winner(player) => Some(player),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::NotOver => write!(f, "In progress"),
            Outcome::Draw => write!(f, "Draw!"),
            Outcome::Winner(player) => write!(f, "Player {} wins!", player),
        }
    }
}

/// Checks whether the game on `board` has been won or drawn
///
/// A game checked after every move has at most one winner, so the first run of
/// `k` or more tokens decides it. A full top row with no such run is a draw.
pub fn evaluate(k: usize, board: &Board) -> Outcome {
    if let Some(run) = scan_runs(board).find(|run| run.len() >= k) {
        return Outcome::Winner(run.player);
    }
    if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::NotOver
    }
}
