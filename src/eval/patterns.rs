//! Score constants for Connect Four evaluation
//!
//! Terminal scores sit at the ends of the `i32` range; every heuristic
//! value is far inside them so a proven win or loss always dominates.

/// Pattern scores for evaluation
pub struct PatternScore;

impl PatternScore {
    // Terminal outcomes
    /// Win for the maximizing side (+∞)
    pub const WIN: i32 = i32::MAX;
    /// Win for the minimizing side (-∞)
    pub const LOSS: i32 = -i32::MAX;
    /// Full board, nobody won
    pub const DRAW: i32 = 0;

    /// Per own piece in the center column
    pub const CENTER: i32 = 3;

    // Window patterns (four cells that could become a win)
    /// Three own pieces and one empty cell
    pub const THREE: i32 = 5;
    /// Two own pieces and two empty cells
    pub const TWO: i32 = 2;
    /// Three opponent pieces and one empty cell
    pub const OPPONENT_THREE: i32 = 4;
}

/// Score one four-cell window from the counts of own, opponent and empty cells.
///
/// A window holding both colors can never be completed and is worth nothing.
pub fn window_score(own: u32, opp: u32, empty: u32) -> i32 {
    match (own, opp, empty) {
        (3, 0, 1) => PatternScore::THREE,
        (2, 0, 2) => PatternScore::TWO,
        (0, 3, 1) => -PatternScore::OPPONENT_THREE,
        _ => 0,
    }
}
