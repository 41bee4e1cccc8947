//! Collision detection and outcome classification
//!
//! Everything in both modes is an axis-aligned box, so overlap is a strict
//! separating-axis test. Touching edges do not count as a hit.

use super::entity::{Entity, EntityKind, Rect};

/// Outcome of the player touching an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Entity is collected for points
    Collect { points: u32 },
    /// Entity costs the player a life
    Damage,
}

/// Strict AABB overlap
#[inline]
pub fn aabb_overlap(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

/// Overlap after shrinking both boxes by `margin` (forgiving hit boxes)
#[inline]
pub fn tolerant_overlap(a: &Rect, b: &Rect, margin: f32) -> bool {
    aabb_overlap(&a.inset(margin), &b.inset(margin))
}

/// Check the player against one entity and classify the result
pub fn resolve<K: EntityKind>(player: &Rect, entity: &Entity<K>, margin: f32) -> Option<Contact> {
    if !tolerant_overlap(player, &entity.rect(), margin) {
        return None;
    }
    if entity.kind.is_hazard() {
        Some(Contact::Damage)
    } else {
        Some(Contact::Collect {
            points: entity.score_value(),
        })
    }
}
