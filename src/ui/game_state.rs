//! Game state management for the Connect Four GUI

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::board::Pos;
use crate::engine::MoveResult;
use crate::session::{GameSession, Outcome};

/// Machine computation state
pub enum AiState {
    Idle,
    Thinking {
        receiver: Receiver<MoveResult>,
        start_time: Instant,
    },
}

/// Move timer for tracking thinking time
pub struct MoveTimer {
    pub start_time: Option<Instant>,
    pub last_move_duration: Option<Duration>,
    pub ai_thinking_time: Option<Duration>,
}

impl Default for MoveTimer {
    fn default() -> Self {
        Self {
            start_time: Some(Instant::now()),
            last_move_duration: None,
            ai_thinking_time: None,
        }
    }
}

impl MoveTimer {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) -> Duration {
        let duration = self.elapsed();
        self.last_move_duration = Some(duration);
        self.start_time = None;
        duration
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }

    pub fn set_ai_time(&mut self, duration: Duration) {
        self.ai_thinking_time = Some(duration);
    }
}

/// Session plus the GUI-only bookkeeping around it
pub struct GameState {
    pub session: GameSession,
    pub ai_state: AiState,
    pub move_timer: MoveTimer,
    pub message: Option<String>,
}

impl GameState {
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            ai_state: AiState::Idle,
            move_timer: MoveTimer::default(),
            message: None,
        }
    }

    /// New game. A search still running is abandoned.
    pub fn reset(&mut self) {
        self.session.reset();
        self.ai_state = AiState::Idle;
        self.move_timer = MoveTimer::default();
        self.message = None;
    }

    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    pub fn outcome(&self) -> Outcome {
        self.session.outcome()
    }

    /// Cell of the most recent drop
    pub fn last_move(&self) -> Option<Pos> {
        let &(col, _) = self.session.history().last()?;
        let height = self.session.board().column_height(col);
        Some(Pos::new(height.checked_sub(1)? as u8, col as u8))
    }

    /// Human drop from a click or key press
    pub fn try_drop(&mut self, col: usize) -> Result<(), String> {
        if self.is_ai_thinking() {
            return Err("Machine is thinking".to_string());
        }
        self.session.submit_human(col).map_err(|e| e.to_string())?;
        self.move_timer.stop();
        self.move_timer.start();
        self.message = None;
        Ok(())
    }

    /// Spawn the search on a cloned board if the machine is to move
    pub fn start_ai_thinking(&mut self) {
        if !self.session.is_machine_turn() || self.is_ai_thinking() {
            return;
        }

        let board = *self.session.board();
        let mut engine = self.session.engine().clone();
        let (tx, rx) = channel();

        thread::spawn(move || {
            let result = engine.get_move_with_stats(&board);
            // The receiver is gone if the game was reset meanwhile
            let _ = tx.send(result);
        });

        debug!(depth = self.session.engine().depth(), "search started");
        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Apply the machine's column once the worker has answered
    pub fn check_ai_result(&mut self) {
        let result = match &self.ai_state {
            AiState::Thinking { receiver, start_time } => match receiver.try_recv() {
                Ok(result) => Some((result, start_time.elapsed())),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    warn!("search worker disconnected");
                    self.ai_state = AiState::Idle;
                    self.message = Some("Search failed".to_string());
                    return;
                }
            },
            AiState::Idle => None,
        };

        if let Some((move_result, elapsed)) = result {
            self.ai_state = AiState::Idle;
            self.move_timer.set_ai_time(elapsed);
            self.session.record_search(move_result);

            match move_result.column {
                Some(col) => {
                    if let Err(err) = self.session.apply_machine(col) {
                        self.message = Some(err.to_string());
                    }
                    self.move_timer.start();
                }
                None => self.message = Some("No column left to play".to_string()),
            }
        }
    }

    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    /// Take back the last human move and the reply to it
    pub fn undo(&mut self) {
        if self.is_ai_thinking() {
            return;
        }
        if self.session.undo() {
            self.message = None;
            self.move_timer.start();
        }
    }

    pub fn set_depth(&mut self, depth: u8) {
        self.session.engine_mut().set_depth(depth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::AIEngine;
    use crate::eval::Heuristic;

    fn state() -> GameState {
        GameState::new(GameSession::new(AIEngine::with_config(2, Heuristic::Center, None)))
    }

    fn wait_for_machine(state: &mut GameState) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while state.is_ai_thinking() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
            state.check_ai_result();
        }
    }

    #[test]
    fn test_worker_reply_is_applied() {
        let mut state = state();
        state.try_drop(3).unwrap();
        assert_eq!(state.last_move(), Some(Pos::new(0, 3)));
        state.start_ai_thinking();
        assert!(state.is_ai_thinking());
        assert!(state.try_drop(4).is_err());
        wait_for_machine(&mut state);
        assert!(!state.is_ai_thinking());
        assert_eq!(state.session.board().piece_count(), 2);
        assert!(state.session.last_result().is_some());
        assert!(state.move_timer.ai_thinking_time.is_some());
    }

    #[test]
    fn test_rejected_drop_sets_no_state() {
        let mut state = state();
        let err = state.try_drop(7).unwrap_err();
        assert!(err.contains("column 7"));
        assert!(state.session.board().is_board_empty());
        assert_eq!(state.last_move(), None);
    }

    #[test]
    fn test_reset_abandons_search() {
        let mut state = state();
        state.try_drop(0).unwrap();
        state.start_ai_thinking();
        state.reset();
        assert!(!state.is_ai_thinking());
        assert!(state.session.board().is_board_empty());
    }

    #[test]
    fn test_no_search_on_human_turn() {
        let mut state = state();
        state.start_ai_thinking();
        assert!(!state.is_ai_thinking());
    }
}
