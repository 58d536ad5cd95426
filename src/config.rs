//! Game configuration

use crate::error::{Error, Result};

/// The largest number of players a game can hold, one byte per cell
pub const MAX_PLAYERS: usize = u8::MAX as usize;

/// The shape of a game: board dimensions, line length needed to win and player count
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rules {
    /// The height of the game board in tiles
    pub rows: usize,
    /// The width of the game board in tiles
    pub cols: usize,
    /// The number of tokens in a row required to win
    pub k: usize,
    pub num_players: usize,
}

impl Rules {
    /// Creates a validated set of rules
    pub fn new(rows: usize, cols: usize, k: usize, num_players: usize) -> Result<Self> {
        let rules = Self {
            rows,
            cols,
            k,
            num_players,
        };
        rules.validate()?;
        Ok(rules)
    }

    /// The classic game: 6 rows, 7 columns, 4 in a row, 2 players
    pub fn connect_four() -> Self {
        Self {
            rows: 6,
            cols: 7,
            k: 4,
            num_players: 2,
        }
    }

    /// Checks that a game with these rules can be set up and won by every player
    ///
    /// The player count is capped at [`MAX_PLAYERS`] because a cell stores its
    /// player id in a single byte.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(Error::Config(format!(
                "board must have at least one row and column, got {}x{}",
                self.rows, self.cols
            )));
        }
        if self.k == 0 {
            return Err(Error::Config("K must be at least 1".to_string()));
        }
        if self.num_players == 0 || self.num_players > MAX_PLAYERS {
            return Err(Error::Config(format!(
                "number of players must be between 1 and {}, got {}",
                MAX_PLAYERS, self.num_players
            )));
        }
        if self.k > self.rows.max(self.cols) {
            return Err(Error::Config(format!(
                "it is impossible to get {} in a row on a {}x{} board",
                self.k, self.rows, self.cols
            )));
        }
        let tiles = self.rows.checked_mul(self.cols).ok_or_else(|| {
            Error::Config(format!("a {}x{} board is too large", self.rows, self.cols))
        })?;
        // the last player to move gets the fewest tokens
        if tiles / self.num_players < self.k {
            return Err(Error::Config(format!(
                "it is impossible for every one of {} players to get {} in a row on a {}x{} board",
                self.num_players, self.k, self.rows, self.cols
            )));
        }
        Ok(())
    }

    /// The column closest to the middle scores highest, used to break ties
    ///
    /// Equal to `2 * (cols - |(cols + 1) / 2 - column|)`, doubled to stay in integers
    pub fn centrality(&self, column: usize) -> usize {
        let distance = (self.cols + 1).max(2 * column) - (self.cols + 1).min(2 * column);
        2 * self.cols - distance
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::connect_four()
    }
}
