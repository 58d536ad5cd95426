use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;

use connectk_ai::arena::run_matches;
use connectk_ai::record::GameRecord;
use connectk_ai::{Error, Game, Player, Rules, Strategy};

mod terminal;
use terminal::*;

/// Connect K: drop tokens into a grid and line up K of your own to win
#[derive(Parser)]
#[command(name = "connectk", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Play a game at the terminal
    Play {
        #[command(flatten)]
        rules: RulesArgs,
        /// One strategy per player (human, easy, medium, hard), asked for when omitted
        #[arg(short, long = "player", value_name = "STRATEGY")]
        players: Vec<Strategy>,
        /// Seed for the computer players
        #[arg(long)]
        seed: Option<u64>,
        /// Wait for enter before each computer move
        #[arg(long)]
        step: bool,
    },
    /// Measure the win rate of one computer player against another
    Bench {
        #[command(flatten)]
        rules: RulesArgs,
        /// The number of games to play
        #[arg(default_value_t = 100)]
        games: usize,
        /// One strategy per player, defaults to medium against hard
        #[arg(short, long = "player", value_name = "STRATEGY")]
        players: Vec<Strategy>,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Save every game the last player lost into this directory
        #[arg(long, value_name = "DIR")]
        save_losses: Option<PathBuf>,
    },
    /// Step through a saved game
    Replay {
        file: PathBuf,
    },
}

#[derive(Args)]
struct RulesArgs {
    /// Number of rows
    #[arg(long, default_value_t = 6)]
    rows: usize,
    /// Number of columns
    #[arg(long, default_value_t = 7)]
    cols: usize,
    /// Number of tokens in a row required to win
    #[arg(short, default_value_t = 4)]
    k: usize,
    /// Number of players
    #[arg(short = 'n', long, default_value_t = 2)]
    num_players: usize,
}

impl RulesArgs {
    fn rules(&self) -> Result<Rules> {
        Ok(Rules::new(self.rows, self.cols, self.k, self.num_players)?)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Play {
            rules,
            players,
            seed,
            step,
        }) => play(rules.rules()?, players, seed, step),
        Some(Command::Bench {
            rules,
            games,
            players,
            seed,
            save_losses,
        }) => bench(rules.rules()?, games, players, seed, save_losses),
        Some(Command::Replay { file }) => replay(file),
        None => play(Rules::connect_four(), Vec::new(), None, false),
    }
}

fn play(rules: Rules, mut players: Vec<Strategy>, seed: Option<u64>, step: bool) -> Result<()> {
    println!("Welcome to Connect {}\n", rules.k);

    // choose the players that weren't given on the command line
    while players.len() < rules.num_players {
        let player = Player::new(players.len() + 1).ok_or_else(|| anyhow!("too many players"))?;
        players.push(choose_strategy(player)?);
    }
    if players.len() > rules.num_players {
        return Err(anyhow!(
            "{} strategies given for {} players",
            players.len(),
            rules.num_players
        ));
    }

    let mut rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
    let mut game = Game::new(rules)?;
    let mut input = StdinInput;
    let mut previous_turns: Vec<(Player, usize)> = Vec::new();

    // game loop
    while !game.state().is_over() {
        clear_screen()?;
        display(&rules, game.board())?;
        for (player, column) in previous_turns.iter() {
            println!("Player {} dropped a piece into column {}", player, column);
        }

        let player = game.player();
        let strategy = players[player.id() - 1];
        if !strategy.is_human() {
            if step {
                pause(&format!("Hit enter for player {} to move", player))?;
            }
            println!("Player {} ({}) is thinking...", player, strategy);
        }

        match game.play_turn(strategy, &mut rng, &mut input) {
            Ok(column) => {
                // only keep the moves made since a human last played
                if strategy.is_human() {
                    previous_turns.clear();
                }
                previous_turns.push((player, column));
            }
            // try the move again
            Err(err @ Error::InvalidColumn { .. }) => println!("{}", err),
            Err(err) => return Err(err.into()),
        }
    }

    clear_screen()?;
    display(&rules, game.board())?;
    for (player, column) in previous_turns.iter() {
        println!("Player {} dropped a piece into column {}", player, column);
    }
    println!("{}", game.state());
    Ok(())
}

fn bench(
    rules: Rules,
    games: usize,
    mut players: Vec<Strategy>,
    seed: u64,
    save_losses: Option<PathBuf>,
) -> Result<()> {
    if players.is_empty() {
        players = vec![Strategy::Medium; rules.num_players];
        if let Some(last) = players.last_mut() {
            *last = Strategy::Hard;
        }
    }
    let last_player = Player::new(rules.num_players).ok_or_else(|| anyhow!("too many players"))?;
    if let Some(dir) = &save_losses {
        fs::create_dir_all(dir)?;
    }

    let start = Instant::now();
    let progress = ProgressBar::new(games as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Playing games: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );

    let losses = Mutex::new(Vec::new());
    let tally = run_matches(&rules, &players, games, seed, |result| {
        if save_losses.is_some() && result.outcome.winner().map_or(false, |winner| winner != last_player) {
            if let Ok(mut losses) = losses.lock() {
                losses.push((result.index, result.record.clone()));
            }
        }
        progress.inc(1);
    })?;
    progress.finish();

    println!(
        "Player {} ({}) won {:.2}% of {} games in {}",
        last_player,
        players[last_player.id() - 1],
        tally.win_rate(last_player) * 100.0,
        tally.games(),
        HumanDuration(start.elapsed())
    );
    for (index, wins) in tally.wins.iter().enumerate() {
        println!("Player {} ({}) wins: {}", index + 1, players[index], wins);
    }
    println!("Draws: {}", tally.draws);

    if let Some(dir) = save_losses {
        let losses = losses
            .into_inner()
            .map_err(|_| anyhow!("a game thread panicked"))?;
        for (index, record) in losses.iter() {
            record.save(dir.join(format!("{}.cnk", index)))?;
        }
        println!("Saved {} losses to {}", losses.len(), dir.display());
    }
    Ok(())
}

fn replay(file: PathBuf) -> Result<()> {
    let record = GameRecord::load(&file)?;
    let rules = record.rules;
    let mut game = Game::new(rules)?;

    let mut previous_turn: Option<(Player, usize)> = None;

    for &column in record.columns.iter() {
        clear_screen()?;
        display(&rules, game.board())?;
        if let Some((player, column)) = previous_turn {
            println!("Player {} dropped a piece into column {}", player, column);
        }
        pause("Hit enter to play the next move")?;
        previous_turn = Some((game.player(), column));
        game.play_column(column)?;
    }

    clear_screen()?;
    display(&rules, game.board())?;
    if let Some((player, column)) = previous_turn {
        println!("Player {} dropped a piece into column {}", player, column);
    }
    println!("{}", game.state());
    Ok(())
}
