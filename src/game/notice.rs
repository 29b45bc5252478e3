//! One-shot "new high score" notification
//!
//! The notice is keyed on the score crossing the high score that was on
//! record when the session started, so it fires once per session no matter
//! how the score and the recorded high score are updated relative to each
//! other.

use std::time::Duration;

/// How long the notice stays up: 300 ms fade in, 2 s hold, 300 ms fade out
pub const NOTICE_DURATION: Duration = Duration::from_millis(2600);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticePhase {
    Normal,
    Notifying,
}

/// Edge detector for the session's first new record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScoreNotice {
    phase: NoticePhase,
    session_best: u32,
    fired: bool,
}

impl HighScoreNotice {
    /// Arm the notice against the high score on record at session start
    pub fn new(session_best: u32) -> Self {
        Self {
            phase: NoticePhase::Normal,
            session_best,
            fired: false,
        }
    }

    /// Feed the latest score. Returns true on the `Normal -> Notifying`
    /// transition, which happens at most once per session.
    pub fn observe(&mut self, score: u32, game_over: bool, tutorial_done: bool) -> bool {
        if self.fired || game_over || !tutorial_done {
            return false;
        }
        if score > 0 && score > self.session_best {
            self.fired = true;
            self.phase = NoticePhase::Notifying;
            return true;
        }
        false
    }

    /// `Notifying -> Normal`, once the presentation is done showing it
    pub fn dismiss(&mut self) {
        self.phase = NoticePhase::Normal;
    }

    /// Start a new session against the current high score
    pub fn rearm(&mut self, session_best: u32) {
        *self = Self::new(session_best);
    }

    pub fn phase(&self) -> NoticePhase {
        self.phase
    }

    pub fn session_best(&self) -> u32 {
        self.session_best
    }
}
