//! Game balance settings
//!
//! Loaded from an optional JSON file; any missing field falls back to its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors raised while reading a settings file
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Lane-catch balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneTuning {
    pub start_lives: u8,
    /// Countdown length and cap for time bonuses (seconds)
    pub max_time: u32,
    /// Spawn interval at level 1 (ms)
    pub base_spawn_interval_ms: f32,
    /// Floor for the spawn interval (ms)
    pub min_spawn_interval_ms: f32,
    /// Interval reduction per level (ms)
    pub spawn_interval_step_ms: f32,
    /// Score needed per level (threshold = level * step)
    pub level_score_step: u32,
    /// Extra fall speed per level
    pub level_speed_bonus: f32,
    /// Seconds added on level up
    pub level_up_time_bonus: u32,
    /// Banner duration in ticks (~2s at 60 Hz)
    pub banner_ticks: u32,
}

impl Default for LaneTuning {
    fn default() -> Self {
        Self {
            start_lives: 3,
            max_time: 60,
            base_spawn_interval_ms: 1500.0,
            min_spawn_interval_ms: 400.0,
            spawn_interval_step_ms: 100.0,
            level_score_step: 500,
            level_speed_bonus: 0.2,
            level_up_time_bonus: 5,
            banner_ticks: 120,
        }
    }
}

impl LaneTuning {
    /// Spawn interval for the given level
    pub fn spawn_interval_ms(&self, level: u32) -> f32 {
        (self.base_spawn_interval_ms - level as f32 * self.spawn_interval_step_ms)
            .max(self.min_spawn_interval_ms)
    }

    /// Hazard probability for the given level
    pub fn hazard_chance(&self, level: u32) -> f32 {
        match level {
            0..=2 => 0.2,
            3..=5 => 0.3,
            _ => 0.4,
        }
    }
}

/// Runner balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerTuning {
    pub start_lives: u8,
    /// Global scroll speed at start (px/tick)
    pub start_speed: f32,
    /// Speed gained on every score milestone
    pub speed_step: f32,
    /// Score milestone that triggers a speed step
    pub speed_milestone: u32,
    /// Score granted by the per-second timer
    pub score_per_second: u32,
    /// Downward acceleration while airborne (px/tick²)
    pub gravity: f32,
    /// Initial upward velocity of a jump (negative is up)
    pub jump_power: f32,
    /// Obstacle cadence: spawn when counter > base - speed * factor
    pub spawn_base_ticks: f32,
    pub spawn_speed_factor: f32,
    /// Probability an obstacle is airborne
    pub air_chance: f64,
    /// Inset applied to both hit boxes before overlap testing
    pub hit_margin: f32,
}

impl Default for RunnerTuning {
    fn default() -> Self {
        Self {
            start_lives: 3,
            start_speed: 5.0,
            speed_step: 0.2,
            speed_milestone: 100,
            score_per_second: 10,
            gravity: 0.8,
            jump_power: -15.0,
            spawn_base_ticks: 150.0,
            spawn_speed_factor: 3.0,
            air_chance: 0.35,
            hit_margin: 15.0,
        }
    }
}

impl RunnerTuning {
    /// Tick count an obstacle spawn waits for at the given speed
    pub fn spawn_threshold(&self, speed: f32) -> f32 {
        self.spawn_base_ticks - speed * self.spawn_speed_factor
    }
}

/// All tunable settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub lane: LaneTuning,
    pub runner: RunnerTuning,
}

impl Settings {
    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read settings from a JSON file
    pub fn read(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::read(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({})", e);
                Self::default()
            }
        }
    }
}
