//! Board representation for Connect Four

pub mod bitboard;
pub mod board;


// Re-exports
pub use bitboard::Bitboard;
pub use board::Board;

/// Number of rows (row 0 is the floor)
pub const ROWS: usize = 6;
/// Number of columns
pub const COLS: usize = 7;
pub const TOTAL_CELLS: usize = ROWS * COLS; // 42

/// Center column, the one taking part in the most winning lines
pub const CENTER_COL: usize = COLS / 2;

/// Cell contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Piece {
    #[default]
    Empty,
    /// The human side in a default session
    PlayerOne,
    /// The side the search maximizes for
    PlayerTwo,
}

impl Piece {
    /// Get the other player
    #[inline]
    pub fn opponent(self) -> Piece {
        match self {
            Piece::PlayerOne => Piece::PlayerTwo,
            Piece::PlayerTwo => Piece::PlayerOne,
            Piece::Empty => Piece::Empty,
        }
    }

    /// Single-character symbol used by text rendering
    #[inline]
    pub fn symbol(self) -> char {
        match self {
            Piece::Empty => '.',
            Piece::PlayerOne => 'X',
            Piece::PlayerTwo => 'O',
        }
    }
}

/// Cell address, rows counted bottom-to-top
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!((row as usize) < ROWS && (col as usize) < COLS);
        Self { row, col }
    }

    #[inline]
    pub fn to_index(self) -> usize {
        self.row as usize * COLS + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Self {
        Self {
            row: (idx / COLS) as u8,
            col: (idx % COLS) as u8,
        }
    }

    #[inline]
    pub fn is_valid(row: i32, col: i32) -> bool {
        row >= 0 && row < ROWS as i32 && col >= 0 && col < COLS as i32
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_index().cmp(&other.to_index())
    }
}
