//! Game session: the live board, turn order and verdicts.
//!
//! Every presentation shell drives the same [`GameSession`]. The human
//! plays [`Piece::PlayerOne`], the machine [`Piece::PlayerTwo`]. Shells
//! that block on input use [`run_session`] with a [`SessionIo`]; the
//! windowed shell calls [`GameSession::submit_human`] and
//! [`GameSession::apply_machine`] directly so it can search off-thread.

use std::io;

use tracing::{debug, info, instrument, warn};

use crate::board::{Board, Piece, Pos};
use crate::config::AppConfig;
use crate::engine::{apply_move, has_won, is_draw, AIEngine, MoveResult};
use crate::error::SessionError;
use crate::rules::{find_four_positions, WIN_LENGTH};

/// Human side
pub const HUMAN: Piece = Piece::PlayerOne;
/// Machine side
pub const MACHINE: Piece = Piece::PlayerTwo;

/// State of the game after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    HumanWon,
    MachineWon,
    Draw,
}

impl Outcome {
    /// Verdict for `board`.
    pub fn of(board: &Board) -> Self {
        if has_won(board, HUMAN) {
            Outcome::HumanWon
        } else if has_won(board, MACHINE) {
            Outcome::MachineWon
        } else if is_draw(board) {
            Outcome::Draw
        } else {
            Outcome::InProgress
        }
    }

    #[inline]
    pub fn is_over(self) -> bool {
        self != Outcome::InProgress
    }

    /// Winning side, if any
    pub fn winner(self) -> Option<Piece> {
        match self {
            Outcome::HumanWon => Some(HUMAN),
            Outcome::MachineWon => Some(MACHINE),
            Outcome::InProgress | Outcome::Draw => None,
        }
    }
}

/// What happened during one human turn and the machine's reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnReport {
    /// Column the human played; `None` when the machine opened the game
    pub human_col: Option<usize>,
    /// Column the machine answered with, if the game was still running
    pub ai_col: Option<usize>,
    pub outcome: Outcome,
}

/// One game between a human and the engine.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    engine: AIEngine,
    machine_first: bool,
    turn: Piece,
    outcome: Outcome,
    history: Vec<(usize, Piece)>,
    last_result: Option<MoveResult>,
}

impl GameSession {
    /// New game with the human moving first.
    pub fn new(engine: AIEngine) -> Self {
        Self::with_order(engine, false)
    }

    /// New game with an explicit opening side.
    pub fn with_order(engine: AIEngine, machine_first: bool) -> Self {
        Self {
            board: Board::new(),
            engine,
            machine_first,
            turn: if machine_first { MACHINE } else { HUMAN },
            outcome: Outcome::InProgress,
            history: Vec::new(),
            last_result: None,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::with_order(
            AIEngine::from_config(&config.engine),
            config.session.machine_first,
        )
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side to move
    pub fn turn(&self) -> Piece {
        self.turn
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_over()
    }

    pub fn is_human_turn(&self) -> bool {
        !self.is_over() && self.turn == HUMAN
    }

    pub fn is_machine_turn(&self) -> bool {
        !self.is_over() && self.turn == MACHINE
    }

    /// Moves played so far, oldest first
    pub fn history(&self) -> &[(usize, Piece)] {
        &self.history
    }

    /// Statistics of the machine's latest search
    pub fn last_result(&self) -> Option<&MoveResult> {
        self.last_result.as_ref()
    }

    pub fn engine(&self) -> &AIEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut AIEngine {
        &mut self.engine
    }

    /// The four winning cells once somebody has won
    pub fn winning_line(&self) -> Option<[Pos; WIN_LENGTH]> {
        let winner = self.outcome.winner()?;
        find_four_positions(&self.board, winner)
    }

    /// Apply the human's drop. The board is untouched on error.
    #[instrument(skip(self))]
    pub fn submit_human(&mut self, col: usize) -> Result<Outcome, SessionError> {
        if self.is_over() {
            return Err(SessionError::GameOver);
        }
        if self.turn != HUMAN {
            return Err(SessionError::NotHumanTurn);
        }
        self.commit(col, HUMAN)
    }

    /// Apply a machine column computed elsewhere (e.g. on a worker thread).
    #[instrument(skip(self))]
    pub fn apply_machine(&mut self, col: usize) -> Result<Outcome, SessionError> {
        if self.is_over() {
            return Err(SessionError::GameOver);
        }
        if self.turn != MACHINE {
            return Err(SessionError::NotMachineTurn);
        }
        self.commit(col, MACHINE)
    }

    /// Search and play the machine's move. Returns the column played.
    pub fn play_machine(&mut self) -> Result<Option<usize>, SessionError> {
        if self.is_over() {
            return Err(SessionError::GameOver);
        }
        if self.turn != MACHINE {
            return Err(SessionError::NotMachineTurn);
        }
        let result = self.engine.get_move_with_stats(&self.board);
        self.last_result = Some(result);
        match result.column {
            Some(col) => {
                self.commit(col, MACHINE)?;
                Ok(Some(col))
            }
            None => {
                warn!("engine found no column on a running game");
                Ok(None)
            }
        }
    }

    /// Record a search that ran outside the session.
    pub fn record_search(&mut self, result: MoveResult) {
        self.last_result = Some(result);
    }

    /// Human drop followed by the machine's reply, if the game goes on.
    pub fn play_human(&mut self, col: usize) -> Result<TurnReport, SessionError> {
        let outcome = self.submit_human(col)?;
        let ai_col = if outcome.is_over() {
            None
        } else {
            self.play_machine()?
        };
        Ok(TurnReport {
            human_col: Some(col),
            ai_col,
            outcome: self.outcome,
        })
    }

    /// Start over with an empty board and the configured opening side.
    pub fn reset(&mut self) {
        info!("session reset");
        self.board = Board::new();
        self.turn = if self.machine_first { MACHINE } else { HUMAN };
        self.outcome = Outcome::InProgress;
        self.history.clear();
        self.last_result = None;
    }

    /// Take back moves until the human's last drop is undone.
    ///
    /// Returns false when there is no human move to take back.
    pub fn undo(&mut self) -> bool {
        let Some(last_human) = self.history.iter().rposition(|&(_, piece)| piece == HUMAN) else {
            return false;
        };
        while self.history.len() > last_human {
            if let Some((col, _)) = self.history.pop() {
                self.board.undo(col);
            }
        }
        self.turn = HUMAN;
        self.outcome = Outcome::of(&self.board);
        debug!(moves = self.history.len(), "undo");
        true
    }

    fn commit(&mut self, col: usize, piece: Piece) -> Result<Outcome, SessionError> {
        apply_move(&mut self.board, col, piece)?;
        self.history.push((col, piece));
        self.outcome = Outcome::of(&self.board);
        self.turn = piece.opponent();
        if self.outcome.is_over() {
            info!(outcome = ?self.outcome, moves = self.history.len(), "game over");
        }
        Ok(self.outcome)
    }
}

/// Instruction read from a blocking shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Drop a piece in a column
    Drop(usize),
    Undo,
    Reset,
    Quit,
}

/// Move source and verdict sink for a blocking shell.
pub trait SessionIo {
    /// Next instruction from the human. End of input should map to `Quit`.
    fn next_command(&mut self, session: &GameSession) -> io::Result<Command>;

    /// A turn was played (human drop and/or machine reply).
    fn on_turn(&mut self, session: &GameSession, report: &TurnReport) -> io::Result<()>;

    /// A command was refused; the board is unchanged.
    fn on_rejected(&mut self, session: &GameSession, error: &SessionError) -> io::Result<()>;

    /// Board changed without a turn (undo, reset).
    fn on_board_changed(&mut self, session: &GameSession) -> io::Result<()>;
}

/// Drive `session` with `io` until the human quits. Returns the outcome at exit.
///
/// After a finished game only `Undo`, `Reset` and `Quit` do anything;
/// drops are rejected with [`SessionError::GameOver`].
pub fn run_session<I: SessionIo>(session: &mut GameSession, io: &mut I) -> io::Result<Outcome> {
    loop {
        if session.is_machine_turn() {
            match session.play_machine() {
                Ok(ai_col) => {
                    let report = TurnReport {
                        human_col: None,
                        ai_col,
                        outcome: session.outcome(),
                    };
                    io.on_turn(session, &report)?;
                }
                Err(err) => io.on_rejected(session, &err)?,
            }
        }

        match io.next_command(session)? {
            Command::Drop(col) => match session.play_human(col) {
                Ok(report) => io.on_turn(session, &report)?,
                Err(err) => io.on_rejected(session, &err)?,
            },
            Command::Undo => {
                if session.undo() {
                    io.on_board_changed(session)?;
                }
            }
            Command::Reset => {
                session.reset();
                io.on_board_changed(session)?;
            }
            Command::Quit => return Ok(session.outcome()),
        }
    }
}
