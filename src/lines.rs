//! Enumeration of the lines of same-player tokens on a board

use std::mem;

use crate::board::{Board, Cell, Player, Position};

/// One of the four directions a line can be drawn in
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Direction {
    /// →
    Horizontal,
    /// ↓
    Vertical,
    /// ↘
    DiagonalDown,
    /// ↗
    DiagonalUp,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagonalDown,
        Direction::DiagonalUp,
    ];

    /// The (row, column) offset of a single step
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::DiagonalDown => (1, 1),
            Direction::DiagonalUp => (-1, 1),
        }
    }

    /// The next position along this direction, `None` past the edge of the board
    fn step(self, position: Position, board: &Board) -> Option<Position> {
        let (row_diff, col_diff) = self.delta();
        let row = position.row as isize + row_diff;
        let col = position.col as isize + col_diff;
        board.get_signed(row, col)?;
        Some(Position::new(row as usize, col as usize))
    }

    /// The first position of every line in this direction
    fn line_starts(self, board: &Board) -> Vec<Position> {
        let (rows, cols) = (board.rows(), board.cols());
        match self {
            Direction::Horizontal => (0..rows).map(|row| Position::new(row, 0)).collect(),
            Direction::Vertical => (0..cols).map(|col| Position::new(0, col)).collect(),
            // along the top edge, then down the left edge
            Direction::DiagonalDown => (0..cols)
                .map(|col| Position::new(0, col))
                .chain((1..rows).map(|row| Position::new(row, 0)))
                .collect(),
            // along the bottom edge, then up the left edge
            Direction::DiagonalUp => (0..cols)
                .map(|col| Position::new(rows - 1, col))
                .chain((0..rows - 1).map(|row| Position::new(row, 0)))
                .collect(),
        }
    }
}

/// A maximal line of at least 2 tokens belonging to one player
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Run {
    pub player: Player,
    pub direction: Direction,
    /// Positions in traversal order, from one end of the run to the other
    pub positions: Vec<Position>,
}

impl Run {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Returns every run on the board
///
/// Each line of the board is scanned once per direction, so a run is never
/// reported twice and never as a fragment of a longer run. Single tokens are
/// skipped as they can't form part of a win on their own.
pub fn scan_runs(board: &Board) -> Runs<'_> {
    let starts: Vec<(Position, Direction)> = Direction::ALL
        .iter()
        .flat_map(|&direction| {
            direction
                .line_starts(board)
                .into_iter()
                .map(move |start| (start, direction))
        })
        .collect();

    Runs {
        board,
        starts: starts.into_iter(),
        line: None,
    }
}

/// A lazy iterator over the runs of a board, see [`scan_runs`]
pub struct Runs<'a> {
    board: &'a Board,
    starts: std::vec::IntoIter<(Position, Direction)>,
    line: Option<LineScan>,
}

impl Iterator for Runs<'_> {
    type Item = Run;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match &mut self.line {
                Some(line) => match line.advance(self.board) {
                    Some(run) => return Some(run),
                    None => self.line = None,
                },
                None => {
                    let (start, direction) = self.starts.next()?;
                    self.line = Some(LineScan::new(start, direction));
                }
            }
        }
    }
}

// run-length compression of a single line
struct LineScan {
    direction: Direction,
    next: Option<Position>,
    player: Cell,
    positions: Vec<Position>,
}

impl LineScan {
    fn new(start: Position, direction: Direction) -> Self {
        Self {
            direction,
            next: Some(start),
            player: None,
            positions: Vec::new(),
        }
    }

    /// Walks the line until a run ends, `None` once the line is exhausted
    fn advance(&mut self, board: &Board) -> Option<Run> {
        while let Some(position) = self.next {
            self.next = self.direction.step(position, board);

            let cell = board.get(position);
            if cell == self.player {
                self.positions.push(position);
            } else if let Some(run) = self.restart(cell, vec![position]) {
                return Some(run);
            }
        }
        // flush the trailing run
        self.restart(None, Vec::new())
    }

    fn restart(&mut self, player: Cell, positions: Vec<Position>) -> Option<Run> {
        let positions = mem::replace(&mut self.positions, positions);
        let player = mem::replace(&mut self.player, player)?;
        if positions.len() < 2 {
            return None;
        }
        Some(Run {
            player,
            direction: self.direction,
            positions,
        })
    }
}
