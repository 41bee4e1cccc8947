//! Simulation module
//!
//! All gameplay logic lives here. Modes are driven by the host clock:
//! - `dt` in seconds per frame; motion is tuned per tick at 60 Hz
//! - Seeded RNG available for reproducible runs
//! - No rendering, audio synthesis, or platform dependencies

pub mod clock;
pub mod collision;
pub mod entity;
pub mod kinds;
pub mod lane_catch;
pub mod mode;
pub mod runner;
pub mod snapshot;
pub mod spawn;
pub mod state;

pub use clock::SecondClock;
pub use collision::{Contact, aabb_overlap, resolve, tolerant_overlap};
pub use entity::{Entity, EntityKind, Rect};
pub use kinds::{AIR_TABLE, GROUND_TABLE, ItemKind, ObstacleKind, item_table};
pub use lane_catch::{Basket, LaneCatchMode, lane_center};
pub use mode::{GameMode, GameOverReport, InputCommand, LaneCommand};
pub use runner::{Runner, RunnerDodgeMode, VerticalState};
pub use snapshot::{BannerView, EntityView, RenderSnapshot};
pub use spawn::{IntervalSpawner, SpawnBand, TickSpawner, pick};
pub use state::{GamePhase, GameSession, LevelUpBanner, SessionCommand};
