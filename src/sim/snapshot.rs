//! Render-facing, read-only view of a mode

use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityKind, Rect};
use super::runner::VerticalState;
use super::state::GamePhase;
use crate::dispatcher::ModeId;

/// One drawable entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub rect: Rect,
    pub kind: String,
    pub label: String,
}

impl<K: EntityKind> From<&Entity<K>> for EntityView {
    fn from(entity: &Entity<K>) -> Self {
        Self {
            rect: entity.rect(),
            kind: entity.kind.name().to_string(),
            label: entity.kind.label().to_string(),
        }
    }
}

/// Level-up banner state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannerView {
    pub active: bool,
    pub level: u32,
    pub ticks_remaining: u32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub mode: ModeId,
    pub phase: GamePhase,
    pub player: Rect,
    /// Runner posture (None in lane-catch)
    pub player_pose: Option<VerticalState>,
    pub entities: Vec<EntityView>,
    pub score: u32,
    pub lives: u8,
    pub level: u32,
    /// Countdown seconds (lane-catch only)
    pub time_left: Option<u32>,
    pub max_time: Option<u32>,
    pub level_up_banner: Option<BannerView>,
    pub game_over_reason: Option<String>,
    /// Background scroll (runner only)
    pub scroll_offset: Option<f32>,
}
