//! Line-oriented terminal shell.
//!
//! Reads one command per line: a column number `0`-`6`, `u` (undo),
//! `r` (new game) or `q` (quit). End of input quits.

use std::io::{self, BufRead, Write};

use crate::board::{Board, COLS};
use crate::error::SessionError;
use crate::session::{Command, GameSession, Outcome, SessionIo, TurnReport};

/// [`SessionIo`] over any reader/writer pair.
pub struct TerminalIo<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalIo<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn print_board(&mut self, board: &Board) -> io::Result<()> {
        writeln!(self.output)?;
        write!(self.output, "{board}")?;
        writeln!(self.output)
    }

    fn print_outcome(&mut self, outcome: Outcome) -> io::Result<()> {
        let text = match outcome {
            Outcome::InProgress => return Ok(()),
            Outcome::HumanWon => "You win!",
            Outcome::MachineWon => "The machine wins.",
            Outcome::Draw => "Draw: the board is full.",
        };
        writeln!(self.output, "{text} (r = new game, u = undo, q = quit)")
    }
}

impl TerminalIo<io::StdinLock<'static>, io::Stdout> {
    /// Shell on the process's stdin/stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

/// Parse one input line. `None` for anything unrecognized.
pub fn parse_command(line: &str) -> Option<Command> {
    let word = line.trim().to_ascii_lowercase();
    match word.as_str() {
        "u" | "undo" => Some(Command::Undo),
        "r" | "reset" | "new" => Some(Command::Reset),
        "q" | "quit" | "exit" => Some(Command::Quit),
        other => other.parse::<usize>().ok().map(Command::Drop),
    }
}

impl<R: BufRead, W: Write> SessionIo for TerminalIo<R, W> {
    fn next_command(&mut self, session: &GameSession) -> io::Result<Command> {
        if session.history().is_empty() {
            self.print_board(session.board())?;
        }
        loop {
            write!(self.output, "Your move (0-{}, u, r, q): ", COLS - 1)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(Command::Quit);
            }
            match parse_command(&line) {
                Some(command) => return Ok(command),
                None if line.trim().is_empty() => continue,
                None => writeln!(self.output, "Unrecognized input: {}", line.trim())?,
            }
        }
    }

    fn on_turn(&mut self, session: &GameSession, report: &TurnReport) -> io::Result<()> {
        if let Some(col) = report.ai_col {
            writeln!(self.output, "Machine plays column {col}")?;
        }
        self.print_board(session.board())?;
        self.print_outcome(report.outcome)
    }

    fn on_rejected(&mut self, _session: &GameSession, error: &SessionError) -> io::Result<()> {
        writeln!(self.output, "Rejected: {error}")
    }

    fn on_board_changed(&mut self, session: &GameSession) -> io::Result<()> {
        if !session.history().is_empty() {
            self.print_board(session.board())?;
        }
        Ok(())
    }
}
