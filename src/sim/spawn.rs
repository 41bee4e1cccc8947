//! Spawn policy: what to spawn (rarity tables) and when (cadence)

use crate::consts::MAX_FRAME_DT;

/// One row of a cumulative spawn table: rolls below `threshold` select `kind`
/// unless an earlier row already matched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnBand<K> {
    pub threshold: f32,
    pub kind: K,
}

impl<K> SpawnBand<K> {
    pub const fn new(threshold: f32, kind: K) -> Self {
        Self { threshold, kind }
    }
}

/// Map a roll through an ordered table. Rolls past the last threshold
/// select the last row; an empty table selects nothing.
pub fn pick<K: Copy>(table: &[SpawnBand<K>], roll: f32) -> Option<K> {
    table
        .iter()
        .find(|band| roll < band.threshold)
        .or_else(|| table.last())
        .map(|band| band.kind)
}

/// Wall-clock spawn cadence (lane-catch)
#[derive(Debug, Clone)]
pub struct IntervalSpawner {
    pub since_last_ms: f32,
    pub interval_ms: f32,
}

impl IntervalSpawner {
    pub fn new(interval_ms: f32) -> Self {
        Self {
            since_last_ms: 0.0,
            interval_ms,
        }
    }

    /// Accumulate frame time; true when a spawn is due (resets the accumulator)
    pub fn advance(&mut self, dt: f32) -> bool {
        if !dt.is_finite() || dt <= 0.0 {
            return false;
        }
        self.since_last_ms += dt.min(MAX_FRAME_DT) * 1000.0;
        if self.since_last_ms > self.interval_ms {
            self.since_last_ms = 0.0;
            true
        } else {
            false
        }
    }
}

/// Tick-count spawn cadence (runner)
#[derive(Debug, Clone, Default)]
pub struct TickSpawner {
    pub ticks: u32,
}

impl TickSpawner {
    /// Count one tick; true when the count passes `threshold` (resets the count)
    pub fn advance(&mut self, threshold: f32) -> bool {
        self.ticks += 1;
        if self.ticks as f32 > threshold {
            self.ticks = 0;
            true
        } else {
            false
        }
    }
}
