//! The turn loop shared by every way of running a game

use log::info;

use crate::board::{Board, Player};
use crate::config::Rules;
use crate::error::{Error, Result};
use crate::outcome::{evaluate, Outcome};
use crate::strategy::{ColumnInput, Strategy};

/// A game in progress
///
/// Players move in turn from 1 to `num_players`, wrapping around. The outcome
/// is re-evaluated after every move, and once it is a draw or a win no further
/// moves are accepted.
#[derive(Clone, Debug)]
pub struct Game {
    rules: Rules,
    board: Board,
    player: Player,
    state: Outcome,
    columns: Vec<usize>,
}

impl Game {
    pub fn new(rules: Rules) -> Result<Self> {
        rules.validate()?;
        Ok(Self {
            rules,
            board: Board::new(rules.rows, rules.cols)?,
            player: Player::FIRST,
            state: Outcome::NotOver,
            columns: Vec::new(),
        })
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> Outcome {
        self.state
    }

    /// The player whose turn it is
    pub fn player(&self) -> Player {
        self.player
    }

    /// Every column played so far, in order, starting at 1
    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    /// Drops a token for the player to move, then checks for the end of the game
    pub fn play_column(&mut self, column: usize) -> Result<Outcome> {
        self.check_playing()?;
        self.board.drop(self.player, column)?;
        Ok(self.finish_turn(column))
    }

    /// Lets `strategy` pick and play the move of the player to move
    ///
    /// Returns the column played. A rejected human column leaves the game as it was.
    pub fn play_turn(
        &mut self,
        strategy: Strategy,
        rng: &mut fastrand::Rng,
        input: &mut dyn ColumnInput,
    ) -> Result<usize> {
        self.check_playing()?;
        let column = strategy.play_turn(&self.rules, &mut self.board, self.player, rng, input)?;
        self.finish_turn(column);
        Ok(column)
    }

    fn check_playing(&self) -> Result<()> {
        if self.state.is_over() {
            Err(Error::GameOver)
        } else {
            Ok(())
        }
    }

    fn finish_turn(&mut self, column: usize) -> Outcome {
        self.columns.push(column);
        self.state = evaluate(self.rules.k, &self.board);
        if self.state.is_over() {
            info!("game over after {} moves: {}", self.columns.len(), self.state);
        }
        self.player = self.player.next(self.rules.num_players);
        self.state
    }
}
