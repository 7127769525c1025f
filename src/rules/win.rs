//! Win condition checking
//!
//! A side wins with four of its pieces in a row horizontally, vertically
//! or on either diagonal. Every length-4 window is visited at most once per
//! orientation, and the scan stops at the first winning window.

use crate::board::{Board, Piece, Pos, COLS, ROWS};

/// Pieces in a row needed to win
pub const WIN_LENGTH: usize = 4;

/// Direction vectors for line checking (row step, col step)
const DIRECTIONS: [(i32, i32); 4] = [
    (0, 1),  // Horizontal
    (1, 0),  // Vertical
    (1, 1),  // Diagonal rising
    (-1, 1), // Diagonal falling
];

/// Check if `piece` has four in a row anywhere on the board
pub fn has_four_in_a_row(board: &Board, piece: Piece) -> bool {
    find_four_positions(board, piece).is_some()
}

/// Find the first winning window for `piece`, if any.
///
/// Windows are enumerated direction by direction, starting cells in
/// row-major order; the same window is never checked twice.
pub fn find_four_positions(board: &Board, piece: Piece) -> Option<[Pos; WIN_LENGTH]> {
    if piece == Piece::Empty {
        return None;
    }
    let span = WIN_LENGTH as i32 - 1;

    for &(dr, dc) in &DIRECTIONS {
        for row in 0..ROWS as i32 {
            for col in 0..COLS as i32 {
                let end_row = row + dr * span;
                let end_col = col + dc * span;
                if !Pos::is_valid(end_row, end_col) {
                    continue;
                }
                let window = window_at(row, col, dr, dc);
                if window.iter().all(|&pos| board.get(pos) == piece) {
                    return Some(window);
                }
            }
        }
    }
    None
}

/// Check for a winner
///
/// Returns `Some(piece)` if either side has four in a row, `None` otherwise.
/// PlayerTwo is checked first; a legal game never has both.
pub fn check_winner(board: &Board) -> Option<Piece> {
    [Piece::PlayerTwo, Piece::PlayerOne]
        .into_iter()
        .find(|&piece| has_four_in_a_row(board, piece))
}

/// Cells of the window starting at (row, col). Caller guarantees it fits.
#[inline]
fn window_at(row: i32, col: i32, dr: i32, dc: i32) -> [Pos; WIN_LENGTH] {
    let mut window = [Pos::new(0, 0); WIN_LENGTH];
    for (i, cell) in window.iter_mut().enumerate() {
        let i = i as i32;
        *cell = Pos::new((row + dr * i) as u8, (col + dc * i) as u8);
    }
    window
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(board: &mut Board, row: u8, col: u8, piece: Piece) {
        match piece {
            Piece::PlayerOne => board.one.set(Pos::new(row, col)),
            Piece::PlayerTwo => board.two.set(Pos::new(row, col)),
            Piece::Empty => {}
        }
    }

    #[test]
    fn test_four_horizontal() {
        let mut board = Board::new();
        for col in 0..4 {
            board.place(col, Piece::PlayerOne).unwrap();
        }
        assert!(has_four_in_a_row(&board, Piece::PlayerOne));
        assert!(!has_four_in_a_row(&board, Piece::PlayerTwo));
    }

    #[test]
    fn test_four_horizontal_right_edge() {
        let mut board = Board::new();
        for col in 3..7 {
            board.place(col, Piece::PlayerTwo).unwrap();
        }
        assert_eq!(
            find_four_positions(&board, Piece::PlayerTwo),
            Some([Pos::new(0, 3), Pos::new(0, 4), Pos::new(0, 5), Pos::new(0, 6)])
        );
    }

    #[test]
    fn test_four_vertical_at_top() {
        let mut board = Board::new();
        board.place(6, Piece::PlayerOne).unwrap();
        board.place(6, Piece::PlayerOne).unwrap();
        for _ in 0..4 {
            board.place(6, Piece::PlayerTwo).unwrap();
        }
        assert!(has_four_in_a_row(&board, Piece::PlayerTwo));
        assert!(!has_four_in_a_row(&board, Piece::PlayerOne));
    }

    #[test]
    fn test_four_diagonal_rising() {
        let mut board = Board::new();
        for i in 0..4u8 {
            set(&mut board, i + 1, i + 2, Piece::PlayerTwo);
        }
        assert!(has_four_in_a_row(&board, Piece::PlayerTwo));
    }

    #[test]
    fn test_four_diagonal_falling() {
        let mut board = Board::new();
        for i in 0..4u8 {
            set(&mut board, 5 - i, i, Piece::PlayerOne);
        }
        assert_eq!(
            find_four_positions(&board, Piece::PlayerOne),
            Some([Pos::new(5, 0), Pos::new(4, 1), Pos::new(3, 2), Pos::new(2, 3)])
        );
    }

    #[test]
    fn test_three_in_row_not_win() {
        let mut board = Board::new();
        for col in 0..3 {
            board.place(col, Piece::PlayerOne).unwrap();
        }
        board.place(3, Piece::PlayerTwo).unwrap();
        board.place(4, Piece::PlayerOne).unwrap();
        assert!(!has_four_in_a_row(&board, Piece::PlayerOne));
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_no_wrap_around_rows() {
        // Cells 4,5,6 of row 0 and cell 0 of row 1 are consecutive indices
        let mut board = Board::new();
        set(&mut board, 0, 4, Piece::PlayerOne);
        set(&mut board, 0, 5, Piece::PlayerOne);
        set(&mut board, 0, 6, Piece::PlayerOne);
        set(&mut board, 1, 0, Piece::PlayerOne);
        assert!(!has_four_in_a_row(&board, Piece::PlayerOne));
    }

    #[test]
    fn test_check_winner() {
        let mut board = Board::new();
        assert_eq!(check_winner(&board), None);
        for _ in 0..4 {
            board.place(1, Piece::PlayerOne).unwrap();
        }
        assert_eq!(check_winner(&board), Some(Piece::PlayerOne));
    }

    #[test]
    fn test_empty_piece_never_wins() {
        let board = Board::new();
        assert!(!has_four_in_a_row(&board, Piece::Empty));
        assert!(find_four_positions(&board, Piece::Empty).is_none());
    }

    #[test]
    fn test_win_invariant_under_clone() {
        // Staircase topped by PlayerTwo: rising diagonal from (0,0) to (3,3)
        let mut board = Board::new();
        for col in [0, 1, 1, 2, 2, 2, 3, 3, 3, 3] {
            let piece = if board.column_height(col) == col {
                Piece::PlayerTwo
            } else {
                Piece::PlayerOne
            };
            board.place(col, piece).unwrap();
        }
        let copy = board.clone();
        for piece in [Piece::PlayerOne, Piece::PlayerTwo] {
            assert_eq!(has_four_in_a_row(&board, piece), has_four_in_a_row(&copy, piece));
        }
        assert!(has_four_in_a_row(&copy, Piece::PlayerTwo));
    }
}
