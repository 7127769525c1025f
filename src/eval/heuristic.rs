//! Heuristic evaluation of Connect Four positions
//!
//! The baseline rule counts the evaluated side's pieces in the center
//! column, which takes part in more potential lines than any other column.
//! The window variant adds the classic four-cell window patterns on top.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Piece, Pos, CENTER_COL, COLS, ROWS};
use crate::rules::WIN_LENGTH;

use super::patterns::{window_score, PatternScore};

/// Direction vectors for window scanning (row step, col step)
const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

/// Which leaf evaluation the search uses
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Heuristic {
    /// Center-column control only
    #[default]
    Center,
    /// Center control plus open window patterns
    Windows,
}

impl Heuristic {
    /// Evaluate `board` for `piece`. Never reaches the terminal sentinels.
    #[must_use]
    pub fn evaluate(self, board: &Board, piece: Piece) -> i32 {
        match self {
            Heuristic::Center => score(board, piece),
            Heuristic::Windows => score(board, piece) + evaluate_windows(board, piece),
        }
    }
}

/// Baseline evaluation: own pieces in the center column × 3.
#[must_use]
pub fn score(board: &Board, piece: Piece) -> i32 {
    let count = (0..ROWS)
        .filter(|&row| board.get(Pos::new(row as u8, CENTER_COL as u8)) == piece)
        .count() as i32;
    count * PatternScore::CENTER
}

/// Sum of window pattern scores over every four-cell window on the board.
fn evaluate_windows(board: &Board, piece: Piece) -> i32 {
    let opponent = piece.opponent();
    let span = WIN_LENGTH as i32 - 1;
    let mut total = 0;

    for &(dr, dc) in &DIRECTIONS {
        for row in 0..ROWS as i32 {
            for col in 0..COLS as i32 {
                if !Pos::is_valid(row + dr * span, col + dc * span) {
                    continue;
                }
                let (mut own, mut opp, mut empty) = (0u32, 0u32, 0u32);
                for i in 0..WIN_LENGTH as i32 {
                    let pos = Pos::new((row + dr * i) as u8, (col + dc * i) as u8);
                    match board.get(pos) {
                        p if p == piece => own += 1,
                        p if p == opponent => opp += 1,
                        _ => empty += 1,
                    }
                }
                total += window_score(own, opp, empty);
            }
        }
    }
    total
}
