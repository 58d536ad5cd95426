//! The players that can take a turn

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::board::{Board, Player};
use crate::config::Rules;
use crate::error::{Error, Result};
use crate::heuristics::{best_scored_column, win_or_block};

/// Supplies the column chosen by a human player
pub trait ColumnInput {
    /// Asks `player` for a column, starting at 1
    ///
    /// The returned column is checked against the free columns of `board`
    /// before it is played, implementors should keep asking until it is valid.
    fn read_column(&mut self, board: &Board, player: Player) -> Result<usize>;
}

/// No one to ask, for games played only by the computer
impl ColumnInput for () {
    fn read_column(&mut self, _board: &Board, player: Player) -> Result<usize> {
        Err(Error::NoInput(player))
    }
}

/// How a player picks their moves
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Strategy {
    /// Columns come from a [`ColumnInput`]
    Human,
    /// A random free column
    Easy,
    /// Wins or blocks when it can, otherwise a random free column
    Medium,
    /// Wins or blocks when it can, otherwise the column with the best
    /// [`ColumnScore`](crate::heuristics::ColumnScore)
    Hard,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Human,
        Strategy::Easy,
        Strategy::Medium,
        Strategy::Hard,
    ];

    pub fn is_human(self) -> bool {
        self == Strategy::Human
    }

    /// Plays one turn for `player`, dropping their token into `board`
    ///
    /// Returns the column played, starting at 1.
    pub fn play_turn(
        self,
        rules: &Rules,
        board: &mut Board,
        player: Player,
        rng: &mut fastrand::Rng,
        input: &mut dyn ColumnInput,
    ) -> Result<usize> {
        let free_columns = board.free_columns();
        if free_columns.is_empty() {
            return Err(Error::NoFreeColumns);
        }

        let column = match self {
            Strategy::Human => {
                let column = input.read_column(board, player)?;
                if !free_columns.contains(&column) {
                    return Err(Error::InvalidColumn {
                        column,
                        columns: board.cols(),
                    });
                }
                column
            }
            Strategy::Easy => random_column(&free_columns, rng),
            Strategy::Medium => win_or_block(rules, board, &free_columns, player)
                .unwrap_or_else(|| random_column(&free_columns, rng)),
            Strategy::Hard => win_or_block(rules, board, &free_columns, player)
                .or_else(|| best_scored_column(rules, board, &free_columns, player))
                .unwrap_or(free_columns[0]),
        };

        board.drop(player, column)?;
        debug!("{} player {} dropped a token into column {}", self, player, column);
        Ok(column)
    }
}

fn random_column(free_columns: &[usize], rng: &mut fastrand::Rng) -> usize {
    free_columns[rng.usize(..free_columns.len())]
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Human => "Human",
            Strategy::Easy => "CPU - Easy",
            Strategy::Medium => "CPU - Medium",
            Strategy::Hard => "CPU - Hard",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(name: &str) -> std::result::Result<Self, Self::Err> {
        match name.trim().to_lowercase().as_str() {
            "human" => Ok(Strategy::Human),
            "easy" => Ok(Strategy::Easy),
            "medium" => Ok(Strategy::Medium),
            "hard" => Ok(Strategy::Hard),
            _ => Err(format!(
                "unknown strategy '{}', expected one of human, easy, medium, hard",
                name
            )),
        }
    }
}
