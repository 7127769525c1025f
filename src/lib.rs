//! Connect Four engine with minimax alpha-beta search
//!
//! Six rows by seven columns, pieces drop to the lowest open cell, and the
//! first side with four in a row (horizontal, vertical or diagonal) wins.
//! A full board with no four is a draw.
//!
//! # Architecture
//!
//! - [`board`]: Grid representation with one bitboard per player
//! - [`rules`]: Four-in-a-row and draw detection
//! - [`eval`]: Leaf heuristics
//! - [`search`]: Depth-limited minimax with alpha-beta pruning
//! - [`engine`]: The external contract and the configurable [`AIEngine`]
//! - [`session`]: One human-versus-machine game, shared by every shell
//! - [`ui`] and [`text`]: Desktop and terminal shells
//!
//! # Quick Start
//!
//! ```
//! use connect4::{apply_move, choose_move, has_won, is_draw, new_board, Piece};
//!
//! let mut board = new_board();
//! for col in 0..3 {
//!     apply_move(&mut board, col, Piece::PlayerTwo).unwrap();
//! }
//!
//! // PlayerTwo completes the bottom row
//! assert_eq!(choose_move(&board, 4), Some(3));
//! apply_move(&mut board, 3, Piece::PlayerTwo).unwrap();
//! assert!(has_won(&board, Piece::PlayerTwo));
//! assert!(!is_draw(&board));
//! ```

pub mod board;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod rules;
pub mod search;
pub mod session;
pub mod text;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, Piece, Pos, COLS, ROWS};
pub use config::AppConfig;
pub use engine::{apply_move, choose_move, has_won, is_draw, new_board, AIEngine, MoveResult};
pub use error::{ConfigError, MoveError, SessionError};
pub use eval::Heuristic;
pub use session::{run_session, GameSession, Outcome, TurnReport};
