//! Recorded games, stored as the sequence of columns played
//!
//! # File Format
//! All integers are big endian.
//!
//! | field        | type      |
//! |--------------|-----------|
//! | magic        | `b"CNK1"` |
//! | rows         | u16       |
//! | columns      | u16       |
//! | K            | u16       |
//! | players      | u8        |
//! | move count   | u32       |
//! | moves        | u16 each  |

use anyhow::{anyhow, Result};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use std::convert::TryFrom;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::{Board, Game, Outcome, Rules};

pub const RECORD_MAGIC: &[u8; 4] = b"CNK1";

/// The rules of a game and every column played in it, starting at 1
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameRecord {
    pub rules: Rules,
    pub columns: Vec<usize>,
}

impl GameRecord {
    pub fn new(rules: Rules, columns: Vec<usize>) -> Self {
        Self { rules, columns }
    }

    /// Records the moves of a game so far
    pub fn from_game(game: &Game) -> Self {
        Self::new(*game.rules(), game.columns().to_vec())
    }

    /// Parses a list of columns separated by commas or whitespace, e.g. `"4, 4, 3"`
    pub fn from_columns<S: AsRef<str>>(rules: Rules, columns: S) -> Result<Self> {
        let columns = columns
            .as_ref()
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|column| !column.is_empty())
            .map(|column| {
                column
                    .parse::<usize>()
                    .map_err(|_| anyhow!("could not parse '{}' as a valid move", column))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(rules, columns))
    }

    /// Plays the recorded columns in order, returning the final board and outcome
    pub fn replay(&self) -> Result<(Board, Outcome)> {
        let mut game = Game::new(self.rules)?;
        for (turn, &column) in self.columns.iter().enumerate() {
            game.play_column(column)
                .map_err(|err| anyhow!("invalid record, move {}: {}", turn + 1, err))?;
        }
        Ok((game.board().clone(), game.state()))
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        writer.write_all(RECORD_MAGIC)?;
        writer.write_u16::<BigEndian>(u16::try_from(self.rules.rows)?)?;
        writer.write_u16::<BigEndian>(u16::try_from(self.rules.cols)?)?;
        writer.write_u16::<BigEndian>(u16::try_from(self.rules.k)?)?;
        writer.write_u8(u8::try_from(self.rules.num_players)?)?;
        writer.write_u32::<BigEndian>(u32::try_from(self.columns.len())?)?;
        for &column in self.columns.iter() {
            writer.write_u16::<BigEndian>(u16::try_from(column)?)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn read_from<R: Read>(mut reader: R) -> Result<Self> {
        let mut magic = [0; 4];
        reader.read_exact(&mut magic)?;
        if &magic != RECORD_MAGIC {
            return Err(anyhow!("not a game record, bad header {:?}", magic));
        }

        let rows = reader.read_u16::<BigEndian>()? as usize;
        let cols = reader.read_u16::<BigEndian>()? as usize;
        let k = reader.read_u16::<BigEndian>()? as usize;
        let num_players = reader.read_u8()? as usize;
        let rules = Rules::new(rows, cols, k, num_players)?;

        let count = reader.read_u32::<BigEndian>()? as usize;
        // a game can't last longer than the board has tiles
        if count > rows * cols {
            return Err(anyhow!(
                "invalid record, {} moves on a board of {} tiles",
                count,
                rows * cols
            ));
        }
        let mut columns = Vec::with_capacity(count);
        for _ in 0..count {
            columns.push(reader.read_u16::<BigEndian>()? as usize);
        }
        Ok(Self::new(rules, columns))
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.write_to(BufWriter::new(File::create(path)?))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::read_from(BufReader::new(File::open(path)?))
    }
}
