//! Collision detection and lifecycle resolution
//!
//! Each live collection is advanced (motion + screen edge) and then tested
//! against Agent 8. Hits change entity kinds, the player phase, and the
//! score/gem counters; nothing is removed here except by the fade-out pass.

use glam::Vec2;

use super::kinematics::integrate;
use super::state::{AttachmentLink, Entity, EntityKind, GameEvent, GameState, PlayerPhase};
use super::wrap::{apply_boundary, is_on_screen};
use crate::assets::{Sound, Sprite};
use crate::consts::{asteroid, fade, gem};

/// Circle overlap test on collision radii
#[inline]
pub fn circles_overlap(a: &Entity, b: &Entity) -> bool {
    let reach = a.radius + b.radius;
    a.pos.distance_squared(b.pos) < reach * reach
}

/// Agent 8 can land on asteroids and be hit by meteors only while free-flying
#[inline]
fn player_is_vulnerable(phase: &PlayerPhase) -> bool {
    !phase.is_dead() && !phase.is_attached()
}

/// Indices of entities of `kind`, taken before any spawning this pass does
fn indices_of(state: &GameState, kind: EntityKind) -> Vec<usize> {
    state
        .entities
        .iter()
        .enumerate()
        .filter(|(_, e)| e.kind == kind)
        .map(|(idx, _)| idx)
        .collect()
}

/// Move and wrap asteroids; landing on one turns it into the attached derivative
pub fn update_asteroids(state: &mut GameState, screen: Vec2) {
    for idx in indices_of(state, EntityKind::Asteroid) {
        let rock = &mut state.entities[idx];
        integrate(rock);
        apply_boundary(rock, screen);

        if player_is_vulnerable(&state.phase)
            && circles_overlap(&state.entities[idx], &state.player)
        {
            attach_to(state, idx);
        }
    }
}

/// Replace the asteroid at `idx` with an attached derivative and pin Agent 8 to it
fn attach_to(state: &mut GameState, idx: usize) {
    let rock = &state.entities[idx];
    let pos = rock.pos;
    let link = AttachmentLink {
        vel: rock.vel,
        rotation: rock.rotation,
    };

    let host = state.spawn_entity(
        EntityKind::AsteroidAttached,
        pos,
        asteroid::ATTACHED_RADIUS,
        Sprite::Asteroid,
    );
    if let Some(derivative) = state.entity_mut(host) {
        derivative.set_sprite(Sprite::Asteroid, asteroid::ANIM_SPEED);
        derivative.vel = link.vel;
        derivative.rotation = link.rotation;
    }
    state.attachment = Some(link);
    state.entities[idx].kind = EntityKind::PendingDestruction;

    // Residual flight motion would otherwise offset the pin every tick
    state.player.vel = Vec2::ZERO;
    state.player.accel = Vec2::ZERO;
    state.player.rot_speed = 0.0;

    state.phase = PlayerPhase::Attached { host };
    log::info!("Agent 8 landed on asteroid {} at ({:.0}, {:.0})", host, pos.x, pos.y);
}

/// Move and wrap meteors; a hit kills Agent 8
pub fn update_meteors(state: &mut GameState, screen: Vec2) {
    for idx in indices_of(state, EntityKind::Meteor) {
        let meteor = &mut state.entities[idx];
        integrate(meteor);
        apply_boundary(meteor, screen);

        if player_is_vulnerable(&state.phase)
            && circles_overlap(&state.entities[idx], &state.player)
        {
            state.entities[idx].kind = EntityKind::PendingDestruction;
            state.emit(GameEvent::StopMusic);
            state.play_sound(Sound::Clang);
            state.phase = PlayerPhase::Dead { ticks: 0 };
            log::info!(
                "Agent 8 hit by a meteor on level {} with score {}",
                state.level,
                state.score
            );
        }
    }
}

/// Move and wrap gems; touching one collects it
pub fn update_gems(state: &mut GameState, screen: Vec2) {
    for idx in indices_of(state, EntityKind::Gem) {
        let stone = &mut state.entities[idx];
        integrate(stone);
        apply_boundary(stone, screen);

        if !state.phase.is_dead() && circles_overlap(&state.entities[idx], &state.player) {
            collect_gem(state, idx);
        }
    }
}

fn collect_gem(state: &mut GameState, idx: usize) {
    state.play_sound(Sound::Reward);
    state.score += gem::SCORE;
    state.remaining_gems = state.remaining_gems.saturating_sub(1);
    state.entities[idx].kind = EntityKind::PendingDestruction;
    log::debug!(
        "Gem collected: score {}, {} left on level {}",
        state.score,
        state.remaining_gems,
        state.level
    );
}

/// Move asteroid fragments; they retire once off-screen
pub fn update_fragments(state: &mut GameState, screen: Vec2) {
    for idx in indices_of(state, EntityKind::AsteroidFragment) {
        let piece = &mut state.entities[idx];
        integrate(piece);
        apply_boundary(piece, screen);
    }
}

/// Slow-animate destroyed entities and drop them once faded or off-screen
pub fn update_destroyed(state: &mut GameState, screen: Vec2) {
    for entity in &mut state.entities {
        if entity.kind == EntityKind::PendingDestruction {
            entity.anim_speed = fade::ANIM_SPEED;
            integrate(entity);
        }
    }
    state.entities.retain(|e| {
        e.kind != EntityKind::PendingDestruction
            || (e.frame < fade::FRAMES && is_on_screen(e, screen))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::wrap::screen_size;

    fn flying_state() -> GameState {
        let mut state = GameState::new();
        state.phase = PlayerPhase::Flying;
        state.player.pos = Vec2::new(400.0, 400.0);
        state
    }

    fn add(state: &mut GameState, kind: EntityKind, pos: Vec2, radius: f32, sprite: Sprite) -> u32 {
        state.spawn_entity(kind, pos, radius, sprite)
    }

    #[test]
    fn overlap_is_strict() {
        let a = Entity::new(1, EntityKind::Gem, Vec2::ZERO, 10.0, Sprite::Gem);
        let mut b = Entity::new(2, EntityKind::Gem, Vec2::new(20.0, 0.0), 10.0, Sprite::Gem);
        assert!(!circles_overlap(&a, &b));
        b.pos.x = 19.9;
        assert!(circles_overlap(&a, &b));
    }

    #[test]
    fn landing_on_asteroid_attaches() {
        let mut state = flying_state();
        let rock = add(
            &mut state,
            EntityKind::Asteroid,
            Vec2::new(450.0, 400.0),
            asteroid::RADIUS,
            Sprite::Asteroid,
        );
        if let Some(e) = state.entity_mut(rock) {
            e.vel = Vec2::new(1.0, 1.0);
            e.rotation = 1.0;
        }
        state.player.vel = Vec2::new(1.0, -2.0);

        update_asteroids(&mut state, screen_size());

        assert_eq!(state.count_of_kind(EntityKind::Asteroid), 0);
        let attached = state.ids_of_kind(EntityKind::AsteroidAttached);
        assert_eq!(attached.len(), 1);
        assert_eq!(state.phase, PlayerPhase::Attached { host: attached[0] });
        assert_eq!(
            state.attachment,
            Some(AttachmentLink {
                vel: Vec2::new(1.0, 1.0),
                rotation: 1.0
            })
        );
        let derivative = state.entity(attached[0]).map(|e| e.pos);
        assert_eq!(derivative, Some(Vec2::new(451.0, 401.0)));
        assert_eq!(state.entity(rock).map(|e| e.kind), Some(EntityKind::PendingDestruction));
        assert_eq!(state.player.vel, Vec2::ZERO);
    }

    #[test]
    fn two_overlapping_asteroids_attach_only_once() {
        let mut state = flying_state();
        add(&mut state, EntityKind::Asteroid, Vec2::new(420.0, 400.0), 100.0, Sprite::Asteroid);
        add(&mut state, EntityKind::Asteroid, Vec2::new(380.0, 400.0), 100.0, Sprite::Asteroid);
        update_asteroids(&mut state, screen_size());
        assert_eq!(state.count_of_kind(EntityKind::AsteroidAttached), 1);
        assert_eq!(state.count_of_kind(EntityKind::Asteroid), 1);
    }

    #[test]
    fn no_attach_while_dead_or_attached() {
        for phase in [PlayerPhase::Dead { ticks: 3 }, PlayerPhase::Attached { host: 99 }] {
            let mut state = flying_state();
            state.phase = phase;
            add(&mut state, EntityKind::Asteroid, Vec2::new(400.0, 400.0), 100.0, Sprite::Asteroid);
            update_asteroids(&mut state, screen_size());
            assert_eq!(state.count_of_kind(EntityKind::Asteroid), 1);
            assert_eq!(state.count_of_kind(EntityKind::AsteroidAttached), 0);
            assert_eq!(state.phase, phase);
        }
    }

    #[test]
    fn meteor_kills_flying_player() {
        let mut state = flying_state();
        let m = add(&mut state, EntityKind::Meteor, Vec2::new(410.0, 400.0), 50.0, Sprite::Meteor);
        update_meteors(&mut state, screen_size());
        assert_eq!(state.phase, PlayerPhase::Dead { ticks: 0 });
        assert_eq!(state.entity(m).map(|e| e.kind), Some(EntityKind::PendingDestruction));
        assert_eq!(state.player.kind, EntityKind::Player);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::StopMusic, GameEvent::PlaySound(Sound::Clang)]
        );
    }

    #[test]
    fn meteor_ignores_attached_player() {
        let mut state = flying_state();
        state.phase = PlayerPhase::Attached { host: 50 };
        add(&mut state, EntityKind::Meteor, Vec2::new(410.0, 400.0), 50.0, Sprite::Meteor);
        update_meteors(&mut state, screen_size());
        assert!(state.phase.is_attached());
        assert_eq!(state.count_of_kind(EntityKind::Meteor), 1);
    }

    #[test]
    fn gem_collected_even_while_attached() {
        let mut state = flying_state();
        state.phase = PlayerPhase::Attached { host: 50 };
        state.remaining_gems = 2;
        add(&mut state, EntityKind::Gem, Vec2::new(400.0, 420.0), gem::RADIUS, Sprite::Gem);
        update_gems(&mut state, screen_size());
        assert_eq!(state.score, gem::SCORE);
        assert_eq!(state.remaining_gems, 1);
        assert_eq!(state.count_of_kind(EntityKind::Gem), 0);
        assert_eq!(state.drain_events(), vec![GameEvent::PlaySound(Sound::Reward)]);
    }

    #[test]
    fn dead_player_cannot_collect() {
        let mut state = flying_state();
        state.phase = PlayerPhase::Dead { ticks: 0 };
        add(&mut state, EntityKind::Gem, Vec2::new(400.0, 400.0), gem::RADIUS, Sprite::Gem);
        update_gems(&mut state, screen_size());
        assert_eq!(state.score, 0);
        assert_eq!(state.count_of_kind(EntityKind::Gem), 1);
    }

    #[test]
    fn fragments_retire_off_screen() {
        let mut state = flying_state();
        let f = add(
            &mut state,
            EntityKind::AsteroidFragment,
            Vec2::new(1400.0, 300.0),
            0.0,
            Sprite::AsteroidPieces,
        );
        if let Some(e) = state.entity_mut(f) {
            e.vel = Vec2::new(16.0, 0.0);
        }
        update_fragments(&mut state, screen_size());
        assert_eq!(state.entity(f).map(|e| e.kind), Some(EntityKind::PendingDestruction));
        update_destroyed(&mut state, screen_size());
        assert!(state.entity(f).is_none());
    }

    #[test]
    fn destroyed_entities_fade_for_ten_frames() {
        let mut state = flying_state();
        let g = add(&mut state, EntityKind::Gem, Vec2::new(600.0, 300.0), gem::RADIUS, Sprite::Gem);
        state.mark_destroyed(g);

        let mut ticks = 0;
        while state.entity(g).is_some() {
            update_destroyed(&mut state, screen_size());
            ticks += 1;
            assert!(ticks < 100, "fade never completed");
        }
        // 0.2 per tick, a frame every ~5 ticks, gone on reaching frame 10
        assert!((45..=65).contains(&ticks), "took {ticks} ticks");
    }
}
