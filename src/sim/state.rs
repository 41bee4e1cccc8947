//! Session state shared by both modes
//!
//! Timer firings and host commands land on the session's queue and are only
//! applied when the owning mode drains it at the top of `update`.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Current phase of a mode's session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Never started, or stopped by the host
    #[default]
    Idle,
    /// Ticking
    Active,
    /// Run ended; terminal until the next `start()`
    GameOver,
}

/// Deferred session mutations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// One wall-clock second passed
    SecondElapsed,
}

/// Timed level-up notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUpBanner {
    pub level: u32,
    pub ticks_remaining: u32,
}

/// Score, lives and lifecycle of one run
#[derive(Debug, Clone, Default)]
pub struct GameSession {
    pub phase: GamePhase,
    pub score: u32,
    pub lives: u8,
    pub level: u32,
    pub game_over_reason: Option<String>,
    pending: VecDeque<SessionCommand>,
}

/// Reason reported when the last life is lost
pub const REASON_NO_LIVES: &str = "No lives left!";
/// Reason reported when the countdown runs out
pub const REASON_TIME_OVER: &str = "Time Over!";

impl GameSession {
    /// Reset to a fresh active run
    pub fn begin(&mut self, lives: u8) {
        self.phase = GamePhase::Active;
        self.score = 0;
        self.lives = lives;
        self.level = 1;
        self.game_over_reason = None;
        self.pending.clear();
    }

    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Active
    }

    /// Host stop: back to idle, pending commands discarded
    pub fn halt(&mut self) {
        if self.phase == GamePhase::Active {
            self.phase = GamePhase::Idle;
        }
        self.pending.clear();
    }

    /// Terminal transition with a display reason
    pub fn end(&mut self, reason: &str) {
        self.phase = GamePhase::GameOver;
        self.game_over_reason = Some(reason.to_string());
        self.pending.clear();
    }

    /// Queue a command; dropped unless the session is active
    pub fn enqueue(&mut self, command: SessionCommand) -> bool {
        if !self.is_active() {
            return false;
        }
        self.pending.push_back(command);
        true
    }

    /// Pop the next queued command
    pub fn next_command(&mut self) -> Option<SessionCommand> {
        self.pending.pop_front()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Remove one life; true if that was the last one
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_resets() {
        let mut session = GameSession::default();
        assert_eq!(session.phase, GamePhase::Idle);
        session.score = 900;
        session.end(REASON_NO_LIVES);
        session.begin(3);
        assert!(session.is_active());
        assert_eq!(session.score, 0);
        assert_eq!(session.lives, 3);
        assert_eq!(session.level, 1);
        assert_eq!(session.game_over_reason, None);
    }

    #[test]
    fn test_queue_only_while_active() {
        let mut session = GameSession::default();
        assert!(!session.enqueue(SessionCommand::SecondElapsed));
        session.begin(3);
        assert!(session.enqueue(SessionCommand::SecondElapsed));
        assert!(session.enqueue(SessionCommand::SecondElapsed));
        assert_eq!(session.pending_len(), 2);

        session.halt();
        assert_eq!(session.phase, GamePhase::Idle);
        assert_eq!(session.pending_len(), 0);
        assert_eq!(session.next_command(), None);
    }

    #[test]
    fn test_halt_keeps_game_over() {
        let mut session = GameSession::default();
        session.begin(1);
        session.end(REASON_TIME_OVER);
        session.halt();
        assert_eq!(session.phase, GamePhase::GameOver);
        assert_eq!(session.game_over_reason.as_deref(), Some(REASON_TIME_OVER));
    }

    #[test]
    fn test_lose_life() {
        let mut session = GameSession::default();
        session.begin(2);
        assert!(!session.lose_life());
        assert!(session.lose_life());
        assert!(session.lose_life());
        assert_eq!(session.lives, 0);
    }
}
