//! Search module for the Connect Four AI
//!
//! Contains the minimax searcher with alpha-beta pruning.

pub mod alphabeta;

pub use alphabeta::{best_move, SearchResult, SearchStats, Searcher};
