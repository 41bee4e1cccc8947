//! Per-second session timer
//!
//! Replaces a free-running interval timer with one that is advanced by the
//! frame delta. Firings are reported to the caller, which queues them as
//! session commands instead of mutating state directly.

use crate::consts::MAX_FRAME_DT;

/// Fires once per elapsed wall-clock second while armed
#[derive(Debug, Clone, Default)]
pub struct SecondClock {
    elapsed: f32,
    armed: bool,
}

impl SecondClock {
    /// Start counting from zero
    pub fn arm(&mut self) {
        self.elapsed = 0.0;
        self.armed = true;
    }

    /// Stop counting and discard any partial second
    pub fn cancel(&mut self) {
        self.elapsed = 0.0;
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Advance by `dt` seconds; returns how many whole seconds elapsed
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !self.armed || !dt.is_finite() || dt <= 0.0 {
            return 0;
        }
        self.elapsed += dt.min(MAX_FRAME_DT);
        let mut fired = 0;
        while self.elapsed >= 1.0 {
            self.elapsed -= 1.0;
            fired += 1;
        }
        fired
    }
}
