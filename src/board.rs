use std::convert::TryFrom;
use std::fmt;
use std::num::NonZeroU8;

use crate::error::{Error, Result};

/// A player id, starting at 1
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Player(NonZeroU8);

impl Player {
    pub const FIRST: Player = Player(nonzero_id(1));
    pub const SECOND: Player = Player(nonzero_id(2));

    /// Creates a player from its id, `None` for 0 or ids that don't fit in a cell
    pub fn new(id: usize) -> Option<Self> {
        u8::try_from(id).ok().and_then(NonZeroU8::new).map(Player)
    }

    pub fn id(self) -> usize {
        self.0.get() as usize
    }

    /// The player whose turn follows this one
    pub fn next(self, num_players: usize) -> Player {
        // num_players is capped by MAX_PLAYERS, so the result always fits
        Player::new(self.id() % num_players + 1).unwrap_or(Player::FIRST)
    }

    /// Every other player, in the order they play after this one
    pub fn opponents(self, num_players: usize) -> impl Iterator<Item = Player> {
        let mut opponent = self;
        (1..num_players).map(move |_| {
            opponent = opponent.next(num_players);
            opponent
        })
    }
}

const fn nonzero_id(id: u8) -> NonZeroU8 {
    match NonZeroU8::new(id) {
        Some(id) => id,
        None => panic!("player ids start at 1"),
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single tile of the board, `None` when empty
pub type Cell = Option<Player>;

/// A (row, column) pair, 0-indexed with row 0 at the top of the board
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// A rectangular game board
///
/// Columns are addressed from 1 at the API boundary. Tokens fall to the lowest
/// empty tile of a column, so a column is full exactly when its top tile is taken.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Board {
    cells: Vec<Cell>, // cells are stored left-to-right, top-to-bottom
    rows: usize,
    cols: usize,
}

impl Board {
    /// Creates an empty board
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::MalformedBoard(format!(
                "a board needs at least one row and column, got {}x{}",
                rows, cols
            )));
        }
        Ok(Self {
            cells: vec![None; rows * cols],
            rows,
            cols,
        })
    }

    /// Creates a board from rows of player ids listed top to bottom, 0 for an empty tile
    ///
    /// Gravity is not checked, floating tokens are accepted as given.
    pub fn from_rows<R: AsRef<[usize]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |row| row.as_ref().len());
        let mut board = Self::new(rows.len(), cols)?;

        for (row_index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(Error::MalformedBoard(format!(
                    "row {} has {} tiles, expected {}",
                    row_index,
                    row.len(),
                    cols
                )));
            }
            for (col, &id) in row.iter().enumerate() {
                board.cells[row_index * cols + col] = match id {
                    0 => None,
                    id => Some(Player::new(id).ok_or_else(|| {
                        Error::MalformedBoard(format!("invalid player id {}", id))
                    })?),
                };
            }
        }
        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, position: Position) -> Cell {
        self.cells[position.row * self.cols + position.col]
    }

    /// The tile at a signed coordinate, `None` outside of the board
    pub(crate) fn get_signed(&self, row: isize, col: isize) -> Option<Cell> {
        if row < 0 || col < 0 || row >= self.rows as isize || col >= self.cols as isize {
            None
        } else {
            Some(self.cells[row as usize * self.cols + col as usize])
        }
    }

    /// Every tile, row by row from the top
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The tiles of the top row, left to right
    pub fn top_row(&self) -> &[Cell] {
        &self.cells[..self.cols]
    }

    pub fn playable(&self, column: usize) -> bool {
        column >= 1 && column <= self.cols && self.cells[column - 1].is_none()
    }

    /// The columns that can still take a token, in ascending order, starting at 1
    pub fn free_columns(&self) -> Vec<usize> {
        self.top_row()
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(index, _)| index + 1)
            .collect()
    }

    /// Drops a token into a column, returning the row it landed in
    pub fn drop(&mut self, player: Player, column: usize) -> Result<usize> {
        if column < 1 || column > self.cols {
            return Err(self.invalid_column(column));
        }
        let col = column - 1;
        // search for the lowest empty tile, starting from the bottom
        for row in (0..self.rows).rev() {
            let cell = &mut self.cells[row * self.cols + col];
            if cell.is_none() {
                *cell = Some(player);
                return Ok(row);
            }
        }
        Err(self.invalid_column(column))
    }

    /// Copies the board and drops a token into the copy, leaving `self` untouched
    pub fn copy_and_drop(&self, player: Player, column: usize) -> Result<Self> {
        let mut next = self.clone();
        next.drop(player, column)?;
        Ok(next)
    }

    pub fn is_full(&self) -> bool {
        self.top_row().iter().all(|cell| cell.is_some())
    }

    fn invalid_column(&self, column: usize) -> Error {
        Error::InvalidColumn {
            column,
            columns: self.cols,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            let line: Vec<String> = row
                .iter()
                .map(|cell| cell.map_or_else(|| ".".to_string(), |player| player.to_string()))
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
