//! Threat detection and move ranking for the computer players
//!
//! Nothing here searches deeper than the move being considered and the reply
//! straight after it. Every hypothetical move is played on a copy of the board.

use std::cmp::Ordering;

use log::trace;

use crate::board::{Board, Player, Position};
use crate::config::Rules;
use crate::lines::scan_runs;
use crate::outcome::{evaluate, Outcome};

/// Checks whether a line of tokens has enough open room around it to grow to `k`
///
/// `positions` must hold at least 2 colinear positions in order. Empty tiles are
/// counted forwards from the last position and backwards from the first, stopping
/// at the edge of the board or the first token of any player.
pub fn can_extend_to_k(k: usize, board: &Board, positions: &[Position]) -> bool {
    let (first, second, last) = match positions {
        [first, second, .., last] => (*first, *second, *last),
        [first, second] => (*first, *second, *second),
        _ => return false,
    };
    let row_diff = second.row as isize - first.row as isize;
    let col_diff = second.col as isize - first.col as isize;

    let forward = count_free(board, last, row_diff, col_diff);
    let backward = count_free(board, first, -row_diff, -col_diff);
    forward + backward >= k.saturating_sub(positions.len())
}

fn count_free(board: &Board, from: Position, row_diff: isize, col_diff: isize) -> usize {
    let (mut row, mut col) = (from.row as isize, from.col as isize);
    let mut count = 0;
    loop {
        row += row_diff;
        col += col_diff;
        match board.get_signed(row, col) {
            Some(None) => count += 1,
            _ => return count,
        }
    }
}

/// The first of `columns` that wins the game for `player` straight away
pub fn winning_column(k: usize, board: &Board, columns: &[usize], player: Player) -> Option<usize> {
    columns.iter().copied().find(|&column| {
        board
            .copy_and_drop(player, column)
            .map_or(false, |next| evaluate(k, &next) == Outcome::Winner(player))
    })
}

/// Checks whether `player` could win with their next token
pub fn can_win_now(k: usize, board: &Board, player: Player) -> bool {
    winning_column(k, board, &board.free_columns(), player).is_some()
}

/// Finds a column that wins the game for `player`, or failing that one that stops
/// an opponent from winning on their next turn
///
/// Opponents are checked in the order they play after `player`, so the most
/// urgent threat is blocked first.
pub fn win_or_block(rules: &Rules, board: &Board, free_columns: &[usize], player: Player) -> Option<usize> {
    if let Some(column) = winning_column(rules.k, board, free_columns, player) {
        trace!("player {} can win in column {}", player, column);
        return Some(column);
    }
    player.opponents(rules.num_players).find_map(|opponent| {
        let column = winning_column(rules.k, board, free_columns, opponent)?;
        trace!("player {} blocks player {} in column {}", player, opponent, column);
        Some(column)
    })
}

/// Extendable line counts for one run length
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug)]
pub struct ThreatCount {
    /// Lines the moving player would own after their move
    pub own: usize,
    /// Lines an opponent would own if they took the column instead
    pub opponents: usize,
}

/// A ranking key for a candidate column, higher is better
///
/// # Ordering
/// A column that hands an opponent an immediate win is worse than any other.
/// Otherwise the counts are compared from the longest run length down, and at
/// each length the player's own lines come before the lines denied to opponents.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ColumnScore {
    /// `false` when some opponent could win straight after this move
    pub blocks_immediate_loss: bool,
    /// One entry per run length, from `k - 1` at index 0 down to 2
    pub counts: Vec<ThreatCount>,
}

impl ColumnScore {
    fn losing() -> Self {
        Self {
            blocks_immediate_loss: false,
            counts: Vec::new(),
        }
    }
}

impl Ord for ColumnScore {
    fn cmp(&self, other: &Self) -> Ordering {
        let safety = self.blocks_immediate_loss.cmp(&other.blocks_immediate_loss);
        if safety != Ordering::Equal {
            return safety;
        }
        for (mine, theirs) in self.counts.iter().zip(other.counts.iter()) {
            let ordering = mine
                .own
                .cmp(&theirs.own)
                .then(mine.opponents.cmp(&theirs.opponents));
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        self.counts.len().cmp(&other.counts.len())
    }
}

impl PartialOrd for ColumnScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Scores `player` dropping a token into `column`
///
/// The player's side counts every extendable line of length 2 to `k - 1` they
/// would own after the move. The opponents' side counts the extendable lines of
/// length 3 or more each opponent would own had they played `column` on the
/// current board instead, which is what the move takes away from them. Bare
/// pairs of an opponent are not worth blocking and are left out.
pub fn column_score(rules: &Rules, board: &Board, player: Player, column: usize) -> ColumnScore {
    let k = rules.k;
    let with_move = match board.copy_and_drop(player, column) {
        Ok(next) => next,
        Err(_) => return ColumnScore::losing(),
    };

    let opponents: Vec<Player> = player.opponents(rules.num_players).collect();
    if opponents
        .iter()
        .any(|&opponent| can_win_now(k, &with_move, opponent))
    {
        return ColumnScore::losing();
    }

    let mut counts = vec![ThreatCount::default(); k.saturating_sub(2)];

    for run in scan_runs(&with_move) {
        if run.player == player
            && run.len() < k
            && can_extend_to_k(k, board, &run.positions)
        {
            counts[k - run.len() - 1].own += 1;
        }
    }

    for &opponent in opponents.iter() {
        let with_opponent_move = match board.copy_and_drop(opponent, column) {
            Ok(next) => next,
            Err(_) => continue,
        };
        for run in scan_runs(&with_opponent_move) {
            if run.player == opponent
                && run.len() > 2
                && run.len() < k
                && can_extend_to_k(k, &with_opponent_move, &run.positions)
            {
                counts[k - run.len() - 1].opponents += 1;
            }
        }
    }

    ColumnScore {
        blocks_immediate_loss: true,
        counts,
    }
}

/// Picks the free column with the best score, breaking ties towards the middle
///
/// When several columns are equally good the leftmost one wins.
pub fn best_scored_column(rules: &Rules, board: &Board, free_columns: &[usize], player: Player) -> Option<usize> {
    let mut best: Option<(ColumnScore, usize, usize)> = None;

    for &column in free_columns {
        let score = column_score(rules, board, player, column);
        let centrality = rules.centrality(column);
        trace!(
            "player {} column {}: {:?}, centrality {}",
            player,
            column,
            score,
            centrality
        );

        let better = match &best {
            None => true,
            Some((best_score, best_centrality, _)) => {
                (&score, centrality).cmp(&(best_score, *best_centrality)) == Ordering::Greater
            }
        };
        if better {
            best = Some((score, centrality, column));
        }
    }
    best.map(|(_, _, column)| column)
}
