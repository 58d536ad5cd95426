use anyhow::{anyhow, Result};
use crossterm::{
    cursor::MoveTo,
    style::{style, Attribute, Color, PrintStyledContent},
    terminal::{Clear, ClearType},
    QueueableCommand,
};

use std::io::{stdin, stdout, Write};

use connectk_ai::{Board, ColumnInput, Player, Position, Rules, Strategy};

const PLAYER_COLORS: [Color; 6] = [
    Color::Red,
    Color::Yellow,
    Color::Green,
    Color::Magenta,
    Color::Cyan,
    Color::White,
];

fn player_color(player: Player) -> Color {
    PLAYER_COLORS[(player.id() - 1) % PLAYER_COLORS.len()]
}

pub fn clear_screen() -> Result<()> {
    let mut stdout = stdout();
    stdout.queue(Clear(ClearType::All))?.queue(MoveTo(0, 0))?;
    stdout.flush()?;
    Ok(())
}

/// Draws the board with column numbers on top, each player in their own colour
pub fn display(rules: &Rules, board: &Board) -> Result<()> {
    let mut stdout = stdout();
    // wide enough for the largest column number or player id
    let width = rules.cols.max(rules.num_players).to_string().len();

    let title = format!(" Connect {} ", rules.k);
    stdout.queue(PrintStyledContent(style(title + "\n").attribute(Attribute::Bold)))?;

    let header: String = (1..=board.cols())
        .map(|column| format!("{:>width$} ", column, width = width))
        .collect();
    stdout.queue(PrintStyledContent(style(header + "\n")))?;

    for row in 0..board.rows() {
        for col in 0..board.cols() {
            let tile = match board.get(Position::new(row, col)) {
                Some(player) => style(format!("{:>width$}", player.id(), width = width))
                    .attribute(Attribute::Bold)
                    .on(Color::DarkBlue)
                    .with(player_color(player)),
                None => style(format!("{:>width$}", "O", width = width))
                    .on(Color::DarkBlue)
                    .with(Color::Blue),
            };
            stdout
                .queue(PrintStyledContent(tile))?
                .queue(PrintStyledContent(style(" ".to_string()).on(Color::DarkBlue)))?;
        }
        stdout.queue(PrintStyledContent(style("\n".to_string())))?;
    }
    stdout.flush()?;
    Ok(())
}

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    stdout().flush()?;
    let mut buffer = String::new();
    if stdin().read_line(&mut buffer)? == 0 {
        return Err(anyhow!("end of input"));
    }
    Ok(buffer.trim().to_string())
}

/// Asks which kind of player should take the given seat
pub fn choose_strategy(player: Player) -> Result<Strategy> {
    println!("=============== Player {} ===============", player);
    for (index, strategy) in Strategy::ALL.iter().enumerate() {
        println!("{}. {}", index + 1, strategy);
    }
    loop {
        let answer = prompt("> ")?;
        match answer.parse::<usize>() {
            Ok(choice @ 1..=4) => return Ok(Strategy::ALL[choice - 1]),
            _ => println!("Invalid selection"),
        }
    }
}

/// Waits for the user to hit enter
pub fn pause(message: &str) -> Result<()> {
    prompt(message)?;
    Ok(())
}

/// Reads columns typed at the terminal
pub struct StdinInput;

impl ColumnInput for StdinInput {
    fn read_column(&mut self, board: &Board, player: Player) -> connectk_ai::error::Result<usize> {
        let free_columns = board.free_columns();
        loop {
            let answer = match prompt(&format!(
                "Player {}, please enter the column you would like to drop your piece into: ",
                player
            )) {
                Ok(answer) => answer,
                Err(_) => return Err(connectk_ai::Error::NoInput(player)),
            };
            match answer.parse::<usize>() {
                Ok(column) if free_columns.contains(&column) => return Ok(column),
                Ok(_) => println!("That column is full or out of range, please try again."),
                Err(_) => println!("Invalid number: {}", answer),
            }
        }
    }
}
