//! Board structure with gravity-aware drops

use std::fmt;

use super::bitboard::Bitboard;
use super::{Piece, Pos, COLS, ROWS};
use crate::error::MoveError;

/// Game board: one bitboard per player.
///
/// Pieces only ever enter through [`Board::place`], which drops into the
/// lowest empty row, so columns never have gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Board {
    /// PlayerOne pieces
    pub one: Bitboard,
    /// PlayerTwo pieces
    pub two: Bitboard,
}

impl Board {
    pub fn new() -> Self {
        Self {
            one: Bitboard::new(),
            two: Bitboard::new(),
        }
    }

    /// Get piece at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Piece {
        if self.one.get(pos) {
            Piece::PlayerOne
        } else if self.two.get(pos) {
            Piece::PlayerTwo
        } else {
            Piece::Empty
        }
    }

    /// True iff `col` is on the board and its top cell is empty.
    /// Out-of-range columns are reported closed, never clamped.
    #[inline]
    pub fn is_column_open(&self, col: usize) -> bool {
        col < COLS && self.get(Pos::new((ROWS - 1) as u8, col as u8)) == Piece::Empty
    }

    /// Number of pieces stacked in a column
    pub fn column_height(&self, col: usize) -> usize {
        if col >= COLS {
            return 0;
        }
        (0..ROWS)
            .take_while(|&row| self.get(Pos::new(row as u8, col as u8)) != Piece::Empty)
            .count()
    }

    /// First empty row of `col`, scanning up from the floor
    pub fn lowest_open_row(&self, col: usize) -> Result<usize, MoveError> {
        if col >= COLS {
            return Err(MoveError::InvalidColumn { col });
        }
        (0..ROWS)
            .find(|&row| self.get(Pos::new(row as u8, col as u8)) == Piece::Empty)
            .ok_or(MoveError::ColumnFull { col })
    }

    /// Drop `piece` into `col`, returning the row it lands on.
    /// Turn order is not checked here; `Piece::Empty` is rejected.
    pub fn place(&mut self, col: usize, piece: Piece) -> Result<usize, MoveError> {
        let row = self.lowest_open_row(col)?;
        let pos = Pos::new(row as u8, col as u8);
        match piece {
            Piece::PlayerOne => self.one.set(pos),
            Piece::PlayerTwo => self.two.set(pos),
            Piece::Empty => return Err(MoveError::EmptyPiece { col }),
        }
        Ok(row)
    }

    /// Remove the top piece of a column
    pub fn undo(&mut self, col: usize) -> Option<Piece> {
        let height = self.column_height(col);
        if height == 0 {
            return None;
        }
        let pos = Pos::new((height - 1) as u8, col as u8);
        let piece = self.get(pos);
        self.one.clear(pos);
        self.two.clear(pos);
        Some(piece)
    }

    /// Open columns in ascending order
    pub fn valid_columns(&self) -> Vec<usize> {
        (0..COLS).filter(|&col| self.is_column_open(col)).collect()
    }

    /// Total pieces on board
    #[inline]
    pub fn piece_count(&self) -> u32 {
        self.one.count() + self.two.count()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| !self.is_column_open(col))
    }

    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.one.is_empty() && self.two.is_empty()
    }
}

impl fmt::Display for Board {
    /// Renders the top row first, with column numbers underneath.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..ROWS).rev() {
            for col in 0..COLS {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", self.get(Pos::new(row as u8, col as u8)).symbol())?;
            }
            writeln!(f)?;
        }
        for col in 0..COLS {
            if col > 0 {
                write!(f, " ")?;
            }
            write!(f, "{col}")?;
        }
        writeln!(f)
    }
}
