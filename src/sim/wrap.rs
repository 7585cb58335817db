//! Screen-edge handling: wrap to the opposite side or retire off-screen debris

use glam::Vec2;

use super::state::{Entity, EntityKind};
use crate::consts::screen::{HEIGHT, WIDTH, WRAP_MARGIN};

/// Display area as a vector
#[inline]
pub fn screen_size() -> Vec2 {
    Vec2::new(WIDTH, HEIGHT)
}

/// Move an entity that has fully left the screen to the opposite edge.
/// Each axis is checked independently.
pub fn wrap(entity: &mut Entity, screen: Vec2) {
    let origin = entity.sprite.origin();

    if entity.pos.x - origin.x - WRAP_MARGIN > screen.x {
        entity.pos.x = -WRAP_MARGIN + origin.x;
    } else if entity.pos.x + origin.x + WRAP_MARGIN < 0.0 {
        entity.pos.x = screen.x + WRAP_MARGIN - origin.x;
    }

    if entity.pos.y - origin.y - WRAP_MARGIN > screen.y {
        entity.pos.y = -WRAP_MARGIN + origin.y;
    } else if entity.pos.y + origin.y + WRAP_MARGIN < 0.0 {
        entity.pos.y = screen.y + WRAP_MARGIN - origin.y;
    }
}

/// True if any part of the entity's sprite overlaps the display area
pub fn is_on_screen(entity: &Entity, screen: Vec2) -> bool {
    let top_left = entity.pos - entity.sprite.origin();
    let bottom_right = top_left + entity.sprite.frame_size();
    bottom_right.x > 0.0 && top_left.x < screen.x && bottom_right.y > 0.0 && top_left.y < screen.y
}

/// Apply the per-kind boundary rule
pub fn apply_boundary(entity: &mut Entity, screen: Vec2) {
    if entity.kind.wraps() {
        wrap(entity, screen);
    } else if entity.kind == EntityKind::AsteroidFragment && !is_on_screen(entity, screen) {
        entity.kind = EntityKind::PendingDestruction;
    }
}
