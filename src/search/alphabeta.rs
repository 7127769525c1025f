//! Minimax search with alpha-beta pruning
//!
//! PlayerTwo is always the maximizing side. Children are explored in
//! ascending column order on cloned boards, and only a strictly better
//! score replaces the current best, so the lowest column wins any tie.
//!
//! # Example
//!
//! ```
//! use connect4::board::{Board, Piece};
//! use connect4::eval::PatternScore;
//! use connect4::search::Searcher;
//!
//! let mut board = Board::new();
//! for col in 0..3 {
//!     board.place(col, Piece::PlayerTwo).unwrap();
//! }
//!
//! let mut searcher = Searcher::default();
//! let result = searcher.best_move(&board, 4, PatternScore::LOSS, PatternScore::WIN, true);
//! assert_eq!(result.column, Some(3));
//! assert_eq!(result.score, PatternScore::WIN);
//! ```

use std::time::{Duration, Instant};

use crate::board::{Board, Piece};
use crate::eval::{Heuristic, PatternScore};
use crate::rules::has_four_in_a_row;

/// Search statistics for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Positions visited, leaves included
    pub nodes: u64,
    /// Times the remaining siblings were skipped because alpha >= beta
    pub cutoffs: u64,
}

/// Search result: chosen column and its minimax value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Best column, `None` at terminal or depth-exhausted positions
    pub column: Option<usize>,
    /// Minimax value from PlayerTwo's point of view
    pub score: i32,
    pub stats: SearchStats,
}

/// Alpha-beta searcher.
///
/// Holds only configuration and counters; every call works on clones of
/// the board it is given.
#[derive(Debug, Clone, Default)]
pub struct Searcher {
    heuristic: Heuristic,
    time_limit: Option<Duration>,
    deadline: Option<Instant>,
    stopped: bool,
    stats: SearchStats,
}

impl Searcher {
    /// Create a searcher scoring leaves with `heuristic`.
    #[must_use]
    pub fn new(heuristic: Heuristic) -> Self {
        Self {
            heuristic,
            ..Self::default()
        }
    }

    /// Bound each search by wall-clock time.
    ///
    /// Once the limit passes, every unvisited node is scored as a leaf, so
    /// the search still unwinds to a legal column.
    #[must_use]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Run minimax with alpha-beta pruning from `board`.
    ///
    /// A terminal board returns its terminal score without recursing,
    /// whatever `depth` is.
    pub fn best_move(
        &mut self,
        board: &Board,
        depth: u8,
        alpha: i32,
        beta: i32,
        maximizing: bool,
    ) -> SearchResult {
        self.stats = SearchStats::default();
        self.stopped = false;
        self.deadline = self.time_limit.map(|limit| Instant::now() + limit);

        let (column, score) = self.minimax(board, depth, alpha, beta, maximizing);
        SearchResult {
            column,
            score,
            stats: self.stats,
        }
    }

    /// Statistics of the most recent search
    #[must_use]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// True once the deadline has passed. Polled every 1024 nodes; the
    /// root is node 1 and is never cut off.
    #[inline]
    fn check_time(&mut self) -> bool {
        if self.stopped {
            return true;
        }
        if self.stats.nodes & 1023 == 0 {
            if let Some(deadline) = self.deadline {
                if Instant::now() >= deadline {
                    self.stopped = true;
                }
            }
        }
        self.stopped
    }

    fn minimax(
        &mut self,
        board: &Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> (Option<usize>, i32) {
        self.stats.nodes += 1;
        // Polled on every node, leaves included, so no 1024th node is skipped
        let out_of_time = self.check_time();

        let valid_columns = board.valid_columns();
        let two_won = has_four_in_a_row(board, Piece::PlayerTwo);
        let one_won = has_four_in_a_row(board, Piece::PlayerOne);
        let is_terminal = two_won || one_won || valid_columns.is_empty();

        if depth == 0 || is_terminal || out_of_time {
            let score = if two_won {
                PatternScore::WIN
            } else if one_won {
                PatternScore::LOSS
            } else if is_terminal {
                PatternScore::DRAW
            } else {
                self.heuristic.evaluate(board, Piece::PlayerTwo)
            };
            return (None, score);
        }

        let mut column = valid_columns[0];

        if maximizing {
            let mut value = PatternScore::LOSS;
            for &col in &valid_columns {
                let mut child = board.clone();
                // Only open columns are iterated, so the drop cannot fail
                if child.place(col, Piece::PlayerTwo).is_err() {
                    continue;
                }
                let (_, score) = self.minimax(&child, depth - 1, alpha, beta, false);
                if score > value {
                    value = score;
                    column = col;
                }
                alpha = alpha.max(value);
                if alpha >= beta {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
            (Some(column), value)
        } else {
            let mut value = PatternScore::WIN;
            for &col in &valid_columns {
                let mut child = board.clone();
                if child.place(col, Piece::PlayerOne).is_err() {
                    continue;
                }
                let (_, score) = self.minimax(&child, depth - 1, alpha, beta, true);
                if score < value {
                    value = score;
                    column = col;
                }
                beta = beta.min(value);
                if alpha >= beta {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
            (Some(column), value)
        }
    }
}

/// Alpha-beta search with the default center heuristic and no time limit.
pub fn best_move(board: &Board, depth: u8, alpha: i32, beta: i32, maximizing: bool) -> SearchResult {
    Searcher::default().best_move(board, depth, alpha, beta, maximizing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{CENTER_COL, COLS, ROWS};

    /// Exhaustive minimax without pruning, same ordering and tie-break.
    fn plain_minimax(board: &Board, depth: u8, maximizing: bool) -> (Option<usize>, i32) {
        let valid = board.valid_columns();
        let two_won = has_four_in_a_row(board, Piece::PlayerTwo);
        let one_won = has_four_in_a_row(board, Piece::PlayerOne);
        let terminal = two_won || one_won || valid.is_empty();
        if depth == 0 || terminal {
            let score = if two_won {
                PatternScore::WIN
            } else if one_won {
                PatternScore::LOSS
            } else if terminal {
                PatternScore::DRAW
            } else {
                Heuristic::Center.evaluate(board, Piece::PlayerTwo)
            };
            return (None, score);
        }
        let piece = if maximizing { Piece::PlayerTwo } else { Piece::PlayerOne };
        let mut column = valid[0];
        let mut value = if maximizing { PatternScore::LOSS } else { PatternScore::WIN };
        for &col in &valid {
            let mut child = board.clone();
            child.place(col, piece).unwrap();
            let (_, score) = plain_minimax(&child, depth - 1, !maximizing);
            let better = if maximizing { score > value } else { score < value };
            if better {
                value = score;
                column = col;
            }
        }
        (Some(column), value)
    }

    fn full_window(board: &Board, depth: u8, maximizing: bool) -> SearchResult {
        best_move(board, depth, PatternScore::LOSS, PatternScore::WIN, maximizing)
    }

    fn drawn_board() -> Board {
        let mut board = Board::new();
        for col in 0..COLS {
            for row in 0..ROWS {
                let piece = if (row / 2 + col) % 2 == 0 {
                    Piece::PlayerOne
                } else {
                    Piece::PlayerTwo
                };
                board.place(col, piece).unwrap();
            }
        }
        board
    }

    #[test]
    fn test_search_empty_board() {
        let result = full_window(&Board::new(), 4, true);
        let col = result.column.expect("empty board has moves");
        assert!(col < COLS);
        assert!(result.stats.nodes > 1);
    }

    #[test]
    fn test_depth_one_prefers_center() {
        let result = full_window(&Board::new(), 1, true);
        assert_eq!(result.column, Some(CENTER_COL));
        assert_eq!(result.score, 3);
    }

    #[test]
    fn test_search_finds_winning_move() {
        let mut board = Board::new();
        for col in 0..3 {
            board.place(col, Piece::PlayerTwo).unwrap();
        }
        for depth in 1..=5 {
            let result = full_window(&board, depth, true);
            assert_eq!(result.column, Some(3), "depth {depth}");
            assert_eq!(result.score, PatternScore::WIN, "depth {depth}");
        }
    }

    #[test]
    fn test_search_blocks_opponent_win() {
        let mut board = Board::new();
        for col in 0..3 {
            board.place(col, Piece::PlayerOne).unwrap();
        }
        for depth in 2..=5 {
            let result = full_window(&board, depth, true);
            assert_eq!(result.column, Some(3), "depth {depth}");
        }
    }

    #[test]
    fn test_minimizer_takes_its_win() {
        let mut board = Board::new();
        for _ in 0..3 {
            board.place(5, Piece::PlayerOne).unwrap();
        }
        let result = full_window(&board, 3, false);
        assert_eq!(result.column, Some(5));
        assert_eq!(result.score, PatternScore::LOSS);
    }

    #[test]
    fn test_tie_breaks_to_lowest_column() {
        // Center column full without a four: every drop scores the same
        let mut board = Board::new();
        for i in 0..ROWS {
            let piece = if i % 2 == 0 { Piece::PlayerOne } else { Piece::PlayerTwo };
            board.place(CENTER_COL, piece).unwrap();
        }
        let result = full_window(&board, 1, true);
        assert_eq!(result.column, Some(0));
        assert_eq!(result.score, 9);
    }

    #[test]
    fn test_full_board_returns_draw() {
        let board = drawn_board();
        for depth in [0, 1, 4, 8] {
            let result = full_window(&board, depth, true);
            assert_eq!(result.column, None);
            assert_eq!(result.score, PatternScore::DRAW);
            assert_eq!(result.stats.nodes, 1);
        }
    }

    #[test]
    fn test_terminal_board_not_expanded() {
        let mut board = Board::new();
        for _ in 0..4 {
            board.place(0, Piece::PlayerOne).unwrap();
        }
        let result = full_window(&board, 6, true);
        assert_eq!(result.column, None);
        assert_eq!(result.score, PatternScore::LOSS);
    }

    #[test]
    fn test_forced_loss_falls_back_to_first_column() {
        // PlayerOne threatens two cells at once on row 0: 1 and 5
        let mut board = Board::new();
        for col in 2..5 {
            board.place(col, Piece::PlayerOne).unwrap();
        }
        let result = full_window(&board, 2, true);
        assert_eq!(result.score, PatternScore::LOSS);
        assert_eq!(result.column, Some(0));
    }

    #[test]
    fn test_search_does_not_mutate_input() {
        let mut board = Board::new();
        board.place(3, Piece::PlayerOne).unwrap();
        let before = board.clone();
        let _ = full_window(&board, 4, true);
        assert_eq!(board, before);
    }

    #[test]
    fn test_pruning_matches_plain_minimax() {
        // Every position reachable in three plies, searched three plies deep
        let mut positions = vec![(Board::new(), Piece::PlayerOne)];
        let mut layer = positions.clone();
        for _ in 0..3 {
            let mut next = Vec::new();
            for (board, to_move) in &layer {
                for col in board.valid_columns() {
                    let mut child = board.clone();
                    child.place(col, *to_move).unwrap();
                    next.push((child, to_move.opponent()));
                }
            }
            positions.extend(next.iter().cloned());
            layer = next;
        }
        assert_eq!(positions.len(), 1 + 7 + 49 + 343);

        for (board, to_move) in &positions {
            let maximizing = *to_move == Piece::PlayerTwo;
            let pruned = full_window(board, 3, maximizing);
            let plain = plain_minimax(board, 3, maximizing);
            assert_eq!((pruned.column, pruned.score), plain, "board:\n{board}");
        }
    }

    #[test]
    fn test_pruning_matches_plain_minimax_midgame() {
        let mut board = Board::new();
        for (i, col) in [3, 3, 2, 4, 4, 2, 1, 5].into_iter().enumerate() {
            let piece = if i % 2 == 0 { Piece::PlayerOne } else { Piece::PlayerTwo };
            board.place(col, piece).unwrap();
        }
        for depth in 1..=5 {
            let pruned = full_window(&board, depth, true);
            assert_eq!((pruned.column, pruned.score), plain_minimax(&board, depth, true));
        }
    }

    #[test]
    fn test_pruning_skips_nodes() {
        let board = Board::new();
        let result = full_window(&board, 5, true);
        assert!(result.stats.cutoffs > 0);
        // 1 + 7 + 49 + 343 + 2401 + 16807 nodes without pruning
        assert!(result.stats.nodes < 19_608);
    }

    #[test]
    fn test_expired_deadline_still_returns_legal_column() {
        let mut searcher = Searcher::new(Heuristic::Center).with_time_limit(Duration::ZERO);
        let result = searcher.best_move(&Board::new(), 6, PatternScore::LOSS, PatternScore::WIN, true);
        let col = result.column.expect("root always yields a column");
        assert!(col < COLS);
        assert_eq!(searcher.stats(), result.stats);
    }

    #[test]
    fn test_expired_deadline_stops_at_first_poll() {
        // The 1024th node is usually a leaf; it must still trigger the stop.
        // Afterwards each open frame (at most 8) only scores its remaining
        // siblings (at most 6) as leaves.
        let mut searcher = Searcher::new(Heuristic::Center).with_time_limit(Duration::ZERO);
        let result = searcher.best_move(&Board::new(), 8, PatternScore::LOSS, PatternScore::WIN, true);
        assert!(result.column.is_some());
        assert!(result.stats.nodes >= 1024);
        assert!(result.stats.nodes <= 1024 + 8 * 6, "nodes {}", result.stats.nodes);
    }

    #[test]
    fn test_windows_heuristic_still_wins() {
        let mut board = Board::new();
        for _ in 0..3 {
            board.place(6, Piece::PlayerTwo).unwrap();
        }
        let mut searcher = Searcher::new(Heuristic::Windows);
        let result = searcher.best_move(&board, 4, PatternScore::LOSS, PatternScore::WIN, true);
        assert_eq!(result.column, Some(6));
    }
}
