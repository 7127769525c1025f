//! Evaluation of non-terminal positions
//!
//! Only reached at depth-exhausted leaves; wins, losses and draws are
//! scored by the search before the heuristic is consulted.

pub mod heuristic;
pub mod patterns;

pub use heuristic::{score, Heuristic};
pub use patterns::{window_score, PatternScore};
