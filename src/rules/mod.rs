//! Game rules for Connect Four
//!
//! - Win conditions (four in a row in any of the four orientations)
//! - Draw detection (full board, no winner)

pub mod draw;
pub mod win;

// Re-exports for convenient access
pub use draw::is_draw;
pub use win::{check_winner, find_four_positions, has_four_in_a_row, WIN_LENGTH};
