//! Batches of games between computer players, for measuring their strength

use log::info;
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::record::GameRecord;
use crate::{Game, Outcome, Player, Rules, Strategy};

/// The end of one game played in the arena
#[derive(Clone, Debug)]
pub struct MatchResult {
    /// Index of the game within its batch
    pub index: usize,
    pub outcome: Outcome,
    pub record: GameRecord,
}

/// Results over a batch of games
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    /// Number of wins of each player, indexed from player 1
    pub wins: Vec<usize>,
    pub draws: usize,
}

impl Tally {
    pub fn new(num_players: usize) -> Self {
        Self {
            wins: vec![0; num_players],
            draws: 0,
        }
    }

    pub fn games(&self) -> usize {
        self.wins.iter().sum::<usize>() + self.draws
    }

    pub fn wins_of(&self, player: Player) -> usize {
        self.wins.get(player.id() - 1).copied().unwrap_or(0)
    }

    /// The share of games won by `player`, 0 for an empty tally
    pub fn win_rate(&self, player: Player) -> f64 {
        match self.games() {
            0 => 0.0,
            games => self.wins_of(player) as f64 / games as f64,
        }
    }

    fn add(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Winner(player) => self.wins[player.id() - 1] += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::NotOver => {}
        }
    }

    fn merge(mut self, other: Self) -> Self {
        for (wins, other_wins) in self.wins.iter_mut().zip(other.wins) {
            *wins += other_wins;
        }
        self.draws += other.draws;
        self
    }
}

fn check_lineup(rules: &Rules, lineup: &[Strategy]) -> Result<()> {
    if lineup.len() != rules.num_players {
        return Err(Error::Config(format!(
            "{} strategies given for {} players",
            lineup.len(),
            rules.num_players
        )));
    }
    match lineup.iter().position(|strategy| strategy.is_human()) {
        Some(index) => Err(Error::NoInput(
            Player::new(index + 1).unwrap_or(Player::FIRST),
        )),
        None => Ok(()),
    }
}

/// Plays one full game, `lineup[0]` playing as player 1 and so on
pub fn play_match(rules: &Rules, lineup: &[Strategy], rng: &mut fastrand::Rng) -> Result<(Outcome, GameRecord)> {
    check_lineup(rules, lineup)?;
    let mut game = Game::new(*rules)?;
    while !game.state().is_over() {
        let strategy = lineup[game.player().id() - 1];
        game.play_turn(strategy, rng, &mut ())?;
    }
    Ok((game.state(), GameRecord::from_game(&game)))
}

/// Plays `games` games in parallel and counts the results
///
/// Game `i` is seeded with `seed + i`, so a batch always plays out the same way.
/// `on_finish` is called from the worker threads as each game ends.
pub fn run_matches<F>(rules: &Rules, lineup: &[Strategy], games: usize, seed: u64, on_finish: F) -> Result<Tally>
where
    F: Fn(&MatchResult) + Sync,
{
    check_lineup(rules, lineup)?;
    info!(
        "playing {} games of {:?} on a {}x{} board, {} in a row",
        games, lineup, rules.rows, rules.cols, rules.k
    );

    let tally = (0..games)
        .into_par_iter()
        .map(|index| -> Result<Tally> {
            let mut rng = fastrand::Rng::with_seed(seed.wrapping_add(index as u64));
            let (outcome, record) = play_match(rules, lineup, &mut rng)?;
            on_finish(&MatchResult {
                index,
                outcome,
                record,
            });
            let mut tally = Tally::new(rules.num_players);
            tally.add(outcome);
            Ok(tally)
        })
        .try_reduce(|| Tally::new(rules.num_players), |a, b| Ok(a.merge(b)))?;

    info!("finished {} games: {:?}", tally.games(), tally);
    Ok(tally)
}
