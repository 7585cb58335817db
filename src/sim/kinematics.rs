//! Explicit Euler motion and sprite animation stepping

use super::state::{AttachmentLink, Entity};

/// Advance an entity by one tick
#[inline]
pub fn integrate(entity: &mut Entity) {
    entity.vel += entity.accel;
    entity.pos += entity.vel;
    entity.rotation += entity.rot_speed;
    advance_animation(entity);
}

/// Advance only the animation clock
#[inline]
pub fn advance_animation(entity: &mut Entity) {
    entity.frame_pos += entity.anim_speed;
    if entity.frame_pos > 1.0 {
        entity.frame += 1;
        entity.frame_pos -= 1.0;
    }
}

/// Replay the linked asteroid's motion onto the attached derivative, then integrate
pub fn integrate_linked(entity: &mut Entity, link: &AttachmentLink) {
    entity.vel = link.vel;
    entity.rotation = link.rotation;
    integrate(entity);
}
