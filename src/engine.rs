//! Engine entry points for game sessions and presentation shells
//!
//! The free functions form the whole contract a caller needs: build a
//! board, apply validated moves, test for wins and draws, and ask the
//! search for the machine's column. [`AIEngine`] bundles the search
//! settings loaded from configuration.
//!
//! # Example
//!
//! ```
//! use connect4::{apply_move, choose_move, has_won, new_board, Piece};
//!
//! let mut board = new_board();
//! apply_move(&mut board, 3, Piece::PlayerOne).unwrap();
//!
//! let reply = choose_move(&board, 4).expect("board is not full");
//! apply_move(&mut board, reply, Piece::PlayerTwo).unwrap();
//! assert!(!has_won(&board, Piece::PlayerTwo));
//! ```

use std::time::{Duration, Instant};

use tracing::{debug, instrument};

use crate::board::{Board, Piece, COLS};
use crate::config::EngineConfig;
use crate::error::MoveError;
use crate::eval::{Heuristic, PatternScore};
use crate::rules;
use crate::search::{best_move, SearchResult, Searcher};

/// Empty board for a new game.
#[must_use]
pub fn new_board() -> Board {
    Board::new()
}

/// Drop `piece` into `column` after checking the column is on the board
/// and open. `Piece::Empty` is rejected. On error the board is unchanged.
/// Returns the landing row.
#[instrument(level = "debug", skip(board))]
pub fn apply_move(board: &mut Board, column: usize, piece: Piece) -> Result<usize, MoveError> {
    if column >= COLS {
        return Err(MoveError::InvalidColumn { col: column });
    }
    if !board.is_column_open(column) {
        return Err(MoveError::ColumnFull { col: column });
    }
    board.place(column, piece)
}

/// Whether `piece` has four in a row.
#[must_use]
pub fn has_won(board: &Board, piece: Piece) -> bool {
    rules::has_four_in_a_row(board, piece)
}

/// True iff no column is open and nobody has won.
#[must_use]
pub fn is_draw(board: &Board) -> bool {
    rules::is_draw(board)
}

/// Column the maximizing side (PlayerTwo) should play, searching `depth` plies.
///
/// Returns `None` only when no column is open. A zero depth skips the
/// search and takes the first open column, as does a board where a side
/// already has four (the search does not expand terminal boards).
#[must_use]
pub fn choose_move(board: &Board, depth: u8) -> Option<usize> {
    if depth == 0 {
        return first_open_column(board);
    }
    best_move(board, depth, PatternScore::LOSS, PatternScore::WIN, true)
        .column
        .or_else(|| first_open_column(board))
}

fn first_open_column(board: &Board) -> Option<usize> {
    board.valid_columns().first().copied()
}

/// Result of a move search with statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    /// Chosen column, `None` when the board offers no move
    pub column: Option<usize>,
    /// Minimax value of the position for PlayerTwo
    pub score: i32,
    /// Search depth used
    pub depth: u8,
    /// Number of nodes searched
    pub nodes: u64,
    /// Alpha-beta cutoffs
    pub cutoffs: u64,
    /// Time taken in milliseconds
    pub time_ms: u64,
}

impl MoveResult {
    fn from_search(result: SearchResult, depth: u8, time_ms: u64) -> Self {
        Self {
            column: result.column,
            score: result.score,
            depth,
            nodes: result.stats.nodes,
            cutoffs: result.stats.cutoffs,
            time_ms,
        }
    }

    /// Whether the search proved a forced win for PlayerTwo
    pub fn is_forced_win(&self) -> bool {
        self.score == PatternScore::WIN
    }

    /// Whether the search proved a forced loss for PlayerTwo
    pub fn is_forced_loss(&self) -> bool {
        self.score == PatternScore::LOSS
    }
}

/// Configured move chooser for the automated player.
///
/// # Example
///
/// ```
/// use connect4::{AIEngine, Board, Heuristic};
///
/// let mut engine = AIEngine::with_config(5, Heuristic::Windows, None);
/// let result = engine.get_move_with_stats(&Board::new());
/// assert!(result.column.is_some());
/// assert_eq!(result.depth, 5);
/// ```
#[derive(Debug, Clone)]
pub struct AIEngine {
    searcher: Searcher,
    depth: u8,
    heuristic: Heuristic,
    time_limit: Option<Duration>,
}

impl AIEngine {
    /// Default engine: depth 4, center heuristic, no time limit.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&EngineConfig::default())
    }

    /// Create an engine with explicit settings.
    #[must_use]
    pub fn with_config(depth: u8, heuristic: Heuristic, time_limit_ms: Option<u64>) -> Self {
        let time_limit = time_limit_ms.map(Duration::from_millis);
        let mut searcher = Searcher::new(heuristic);
        if let Some(limit) = time_limit {
            searcher = searcher.with_time_limit(limit);
        }
        Self {
            searcher,
            depth,
            heuristic,
            time_limit,
        }
    }

    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::with_config(config.depth, config.heuristic, config.time_limit_ms)
    }

    /// Column for PlayerTwo on `board`, or `None` if the board is full.
    /// Falls back to the first open column like [`choose_move`].
    pub fn get_move(&mut self, board: &Board) -> Option<usize> {
        self.get_move_with_stats(board).column
    }

    /// Search from PlayerTwo's side and report statistics.
    #[instrument(level = "debug", skip(self, board), fields(depth = self.depth))]
    pub fn get_move_with_stats(&mut self, board: &Board) -> MoveResult {
        let start = Instant::now();
        let result = if self.depth == 0 {
            SearchResult {
                column: first_open_column(board),
                score: self.heuristic.evaluate(board, Piece::PlayerTwo),
                stats: Default::default(),
            }
        } else {
            self.searcher.best_move(
                board,
                self.depth,
                PatternScore::LOSS,
                PatternScore::WIN,
                true,
            )
        };
        let result = SearchResult {
            column: result.column.or_else(|| first_open_column(board)),
            ..result
        };
        let time_ms = start.elapsed().as_millis() as u64;
        let move_result = MoveResult::from_search(result, self.depth, time_ms);
        debug!(
            column = ?move_result.column,
            score = move_result.score,
            nodes = move_result.nodes,
            cutoffs = move_result.cutoffs,
            time_ms,
            "search finished"
        );
        move_result
    }

    /// Set the search depth.
    pub fn set_depth(&mut self, depth: u8) {
        self.depth = depth;
    }

    #[must_use]
    pub fn depth(&self) -> u8 {
        self.depth
    }

    #[must_use]
    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    #[must_use]
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ROWS;

    #[test]
    fn test_apply_move_validates() {
        let mut board = new_board();
        assert_eq!(apply_move(&mut board, 7, Piece::PlayerOne), Err(MoveError::InvalidColumn { col: 7 }));
        for _ in 0..ROWS {
            apply_move(&mut board, 0, Piece::PlayerOne).unwrap();
        }
        let before = board.clone();
        assert_eq!(apply_move(&mut board, 0, Piece::PlayerTwo), Err(MoveError::ColumnFull { col: 0 }));
        assert_eq!(board, before);
    }

    #[test]
    fn test_apply_move_adds_one_piece_in_its_column() {
        let mut board = new_board();
        apply_move(&mut board, 2, Piece::PlayerOne).unwrap();
        apply_move(&mut board, 5, Piece::PlayerTwo).unwrap();
        let before = board.clone();
        assert_eq!(apply_move(&mut board, 2, Piece::PlayerTwo), Ok(1));
        assert_eq!(board.piece_count(), before.piece_count() + 1);
        for col in (0..COLS).filter(|&c| c != 2) {
            assert_eq!(board.column_height(col), before.column_height(col));
        }
    }

    #[test]
    fn test_choose_move_empty_board() {
        for depth in 1..=4 {
            let col = choose_move(&new_board(), depth).expect("column available");
            assert!(col < COLS);
        }
    }

    #[test]
    fn test_choose_move_depth_zero_takes_first_open() {
        let mut board = new_board();
        for _ in 0..ROWS {
            board.place(0, Piece::PlayerOne).unwrap();
        }
        assert_eq!(choose_move(&board, 0), Some(1));
    }

    #[test]
    fn test_apply_move_rejects_empty_piece() {
        let mut board = new_board();
        assert_eq!(apply_move(&mut board, 3, Piece::Empty), Err(MoveError::EmptyPiece { col: 3 }));
        assert_eq!(board.piece_count(), 0);
        assert_eq!(board, new_board());
    }

    #[test]
    fn test_choose_move_on_already_won_board() {
        let mut board = new_board();
        for _ in 0..4 {
            board.place(0, Piece::PlayerOne).unwrap();
        }
        assert!(has_won(&board, Piece::PlayerOne));
        assert_eq!(board.valid_columns().len(), COLS);
        for depth in 0..=4 {
            assert_eq!(choose_move(&board, depth), Some(0), "depth {depth}");
        }
        let mut engine = AIEngine::with_config(4, Heuristic::Center, None);
        let result = engine.get_move_with_stats(&board);
        assert_eq!(result.column, Some(0));
        assert!(result.is_forced_loss());
    }

    #[test]
    fn test_choose_move_none_only_when_full() {
        let mut board = new_board();
        for col in 0..COLS {
            for row in 0..ROWS {
                let piece = if (row / 2 + col) % 2 == 0 { Piece::PlayerOne } else { Piece::PlayerTwo };
                board.place(col, piece).unwrap();
            }
        }
        assert_eq!(choose_move(&board, 3), None);
        assert_eq!(AIEngine::default().get_move(&board), None);
    }

    #[test]
    fn test_engine_wins_when_possible() {
        let mut board = new_board();
        for _ in 0..3 {
            board.place(4, Piece::PlayerTwo).unwrap();
        }
        let mut engine = AIEngine::with_config(4, Heuristic::Center, None);
        let result = engine.get_move_with_stats(&board);
        assert_eq!(result.column, Some(4));
        assert!(result.is_forced_win());
        assert!(!result.is_forced_loss());
    }

    #[test]
    fn test_engine_settings() {
        let mut engine = AIEngine::with_config(3, Heuristic::Windows, Some(250));
        assert_eq!(engine.depth(), 3);
        assert_eq!(engine.heuristic(), Heuristic::Windows);
        assert_eq!(engine.time_limit(), Some(Duration::from_millis(250)));
        engine.set_depth(5);
        assert_eq!(engine.depth(), 5);
    }

    #[test]
    fn test_engine_default_matches_config_default() {
        let engine = AIEngine::default();
        assert_eq!(engine.depth(), EngineConfig::default().depth);
        assert_eq!(engine.heuristic(), Heuristic::Center);
        assert_eq!(engine.time_limit(), None);
    }
}
