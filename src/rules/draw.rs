//! Draw detection.

use crate::board::Board;

use super::win::check_winner;

/// True iff no column is open and neither side has four in a row.
pub fn is_draw(board: &Board) -> bool {
    board.is_full() && check_winner(board).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Piece, COLS, ROWS};

    /// Fills the board without any four in a row: pieces alternate along
    /// each row and the pattern shifts every two rows.
    fn drawn_board() -> Board {
        let mut board = Board::new();
        for col in 0..COLS {
            for row in 0..ROWS {
                let flip = (row / 2 + col) % 2 == 0;
                let piece = if flip { Piece::PlayerOne } else { Piece::PlayerTwo };
                board.place(col, piece).unwrap();
            }
        }
        board
    }

    #[test]
    fn test_empty_board_not_draw() {
        assert!(!is_draw(&Board::new()));
    }

    #[test]
    fn test_full_board_without_winner_is_draw() {
        let board = drawn_board();
        assert!(board.is_full());
        assert_eq!(check_winner(&board), None);
        assert!(is_draw(&board));
    }
}
