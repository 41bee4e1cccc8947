//! Twin Arcade - a two-mode arcade simulation engine
//!
//! Core modules:
//! - `sim`: Per-mode simulations (spawning, movement, collisions, scoring)
//! - `dispatcher`: Mode selection and input/tick routing
//! - `audio`: Audio cue boundary (fire-and-forget events)
//! - `settings`: Data-driven game balance

pub mod audio;
pub mod dispatcher;
pub mod settings;
pub mod sim;

pub use audio::{AudioCue, AudioSink, CueTag, LogAudioSink, NullAudioSink};
pub use dispatcher::{ModeDispatcher, ModeError, ModeId, Snapshot};
pub use settings::{LaneTuning, RunnerTuning, Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Host frame rate the per-tick speeds are tuned for
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Longest frame delta the timers account for; longer stalls are dropped
    /// rather than replayed, so a resumed host cannot flood the command queue
    pub const MAX_FRAME_DT: f32 = 5.0;

    /// Playfield size the geometry below is laid out for
    pub const DEFAULT_PLAYFIELD_WIDTH: f32 = 400.0;
    pub const DEFAULT_PLAYFIELD_HEIGHT: f32 = 400.0;

    /// Number of lanes in lane-catch mode
    pub const LANE_COUNT: u8 = 3;
    /// Lane the basket starts in (center)
    pub const CENTER_LANE: u8 = 1;

    /// Basket geometry - sits near the bottom of a 400px playfield
    pub const BASKET_Y: f32 = 350.0;
    pub const BASKET_WIDTH: f32 = 70.0;
    pub const BASKET_HEIGHT: f32 = 35.0;

    /// Falling items are square and enter just above the top edge
    pub const ITEM_SIZE: f32 = 40.0;
    pub const ITEM_SPAWN_Y: f32 = -40.0;

    /// Runner geometry
    pub const RUNNER_X: f32 = 50.0;
    pub const RUNNER_BASE_Y: f32 = 300.0;
    pub const RUNNER_WIDTH: f32 = 60.0;
    pub const RUNNER_HEIGHT: f32 = 90.0;
    pub const RUNNER_DUCK_HEIGHT: f32 = 50.0;
    /// Downward shift of the runner while ducking
    pub const RUNNER_DUCK_DROP: f32 = 40.0;

    /// Obstacle geometry
    pub const OBSTACLE_WIDTH: f32 = 50.0;
    pub const AIR_OBSTACLE_Y: f32 = 180.0;
    pub const AIR_OBSTACLE_HEIGHT: f32 = 40.0;
    pub const GROUND_OBSTACLE_Y: f32 = 330.0;
    pub const GROUND_OBSTACLE_HEIGHT: f32 = 50.0;

    /// Background parallax factor relative to scroll speed
    pub const SCROLL_FACTOR: f32 = 0.5;
}
