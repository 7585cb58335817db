//! Agent 8's phase machine
//!
//! One dispatch per tick on `GameState::phase`. While attached, the host
//! asteroid is advanced here, before the pin, so Agent 8 never trails it by a
//! frame.

use glam::Vec2;
use std::f32::consts::PI;

use super::kinematics::{advance_animation, integrate, integrate_linked};
use super::spawn::Dice;
use super::state::{EntityId, EntityKind, GameEvent, GameState, PlayerPhase};
use super::tick::TickInput;
use super::wrap::apply_boundary;
use crate::assets::{Sound, Sprite};
use crate::consts::{fragment, gem, player};
use crate::polar_to_cartesian;

/// Run the current phase for one tick
pub fn step_player(state: &mut GameState, input: &TickInput, dice: &mut impl Dice, screen: Vec2) {
    match state.phase {
        PlayerPhase::Appear => appear(state, screen),
        PlayerPhase::Flying => fly(state, input),
        PlayerPhase::Attached { host } => {
            if !crawl(state, host, input, dice, screen) {
                return;
            }
        }
        PlayerPhase::Launching => {
            state.player.set_sprite(Sprite::AgentFly, 1.0);
            state.phase = PlayerPhase::Flying;
        }
        PlayerPhase::Dead { ticks } => {
            spin_down(state, ticks, input);
            return;
        }
    }

    integrate(&mut state.player);
    apply_boundary(&mut state.player, screen);
}

fn appear(state: &mut GameState, screen: Vec2) {
    let agent = &mut state.player;
    agent.vel = player::APPEAR_VELOCITY;
    agent.accel = player::APPEAR_ACCELERATION;
    agent.set_sprite(Sprite::AgentFly, 1.0);
    agent.rotation = player::LEVEL_ROTATION;

    // A third of the way up the screen the player takes over
    if agent.pos.y <= screen.y / 3.0 * 2.0 {
        agent.accel = Vec2::ZERO;
        state.phase = PlayerPhase::Flying;
    }
}

fn fly(state: &mut GameState, input: &TickInput) {
    let agent = &mut state.player;
    agent.set_sprite(Sprite::AgentFly, 1.0);
    agent.rot_speed = 0.0;
    agent.vel = player::FLIGHT_VELOCITY;

    if input.right {
        agent.rot_speed = player::FLIGHT_TURN_RATE;
        agent.vel *= player::FLIGHT_SKEW_RIGHT;
    } else if input.left {
        agent.rot_speed = -player::FLIGHT_TURN_RATE;
        agent.vel *= player::FLIGHT_SKEW_LEFT;
    }
}

/// Advance the attached asteroid with its linked motion and return where it ended up
fn advance_host(state: &mut GameState, host: EntityId, screen: Vec2) -> Option<Vec2> {
    let link = state.attachment?;
    let rock = state
        .entities
        .iter_mut()
        .find(|e| e.id == host && e.kind == EntityKind::AsteroidAttached)?;
    integrate_linked(rock, &link);
    apply_boundary(rock, screen);
    Some(rock.pos)
}

/// Attached phase. Returns false when the host has vanished and the tick was skipped.
fn crawl(
    state: &mut GameState,
    host: EntityId,
    input: &TickInput,
    dice: &mut impl Dice,
    screen: Vec2,
) -> bool {
    let Some(host_pos) = advance_host(state, host, screen) else {
        log::warn!("Attached asteroid {} is gone; Agent 8 drops back into flight", host);
        state.attachment = None;
        state.phase = PlayerPhase::Flying;
        return false;
    };

    state.player.set_sprite(Sprite::AgentCrawlRight, 0.0);

    if !input.left && !input.right && !input.launch {
        state.player.rotation = player::LEVEL_ROTATION;
        state.player.pos = host_pos + player::REST_OFFSET;
    }

    if input.right {
        state.player.set_sprite(Sprite::AgentCrawlRight, player::CRAWL_ANIM_SPEED);
        state.crawl_angle += player::CRAWL_STEP;
        let (adjacent, opposite) = orbit_offset(state.crawl_angle);
        state.player.pos = host_pos + Vec2::new(adjacent, opposite);
        state.player.rotation = state.crawl_angle;
    } else if input.left {
        state.player.set_sprite(Sprite::AgentCrawlLeft, player::CRAWL_ANIM_SPEED);
        state.crawl_angle -= player::CRAWL_STEP;
        let (adjacent, opposite) = orbit_offset(state.crawl_angle);
        state.player.pos = host_pos + Vec2::new(-adjacent, opposite);
        state.player.rotation = player::LEFT_CRAWL_ROTATION_BIAS - state.crawl_angle;
    } else if input.launch {
        launch(state, host, host_pos, dice);
    }
    true
}

/// Whole-pixel offset on the orbit circle (truncated toward zero)
fn orbit_offset(angle: f32) -> (f32, f32) {
    let adjacent = (angle.cos() * player::ORBIT_RADIUS).trunc();
    let opposite = (angle.sin() * player::ORBIT_RADIUS).trunc();
    (adjacent, opposite)
}

/// Kick off the host: burst it into a gem and fragments
fn launch(state: &mut GameState, host: EntityId, at: Vec2, dice: &mut impl Dice) {
    state.player.set_sprite(Sprite::AgentFly, 1.0);
    state.play_sound(Sound::Combust);
    state.play_sound(Sound::Explode);

    let drift = Vec2::new(
        dice.roll_range(-1, 1) as f32 * gem::DRIFT,
        dice.roll_range(-1, 1) as f32 * gem::DRIFT,
    );
    let gem_id = state.spawn_entity(EntityKind::Gem, at, gem::RADIUS, Sprite::Gem);
    if let Some(stone) = state.entity_mut(gem_id) {
        stone.vel = drift;
        stone.rot_speed = gem::SPIN;
    }

    for i in 0..fragment::COUNT {
        let heading = i as f32 * fragment::HEADING_STEP * PI;
        let id = state.spawn_entity(EntityKind::AsteroidFragment, at, 0.0, Sprite::AsteroidPieces);
        if let Some(piece) = state.entity_mut(id) {
            piece.vel = polar_to_cartesian(fragment::SPEED, heading);
            piece.rotation = heading;
            piece.rot_speed = fragment::SPIN;
        }
    }

    state.mark_destroyed(host);
    state.attachment = None;
    state.phase = PlayerPhase::Launching;
    log::debug!("Agent 8 launched off asteroid {} at ({:.0}, {:.0})", host, at.x, at.y);
}

/// Dead phase: spin and damp until the revive input arrives
fn spin_down(state: &mut GameState, ticks: u32, input: &TickInput) {
    let agent = &mut state.player;
    agent.set_sprite(Sprite::AgentDead, 0.95);
    agent.rotation += player::DEATH_SPIN;
    agent.accel *= player::DEATH_DAMPING;
    agent.rotation *= player::DEATH_DAMPING;
    agent.pos += agent.vel;
    advance_animation(agent);

    if input.launch_pressed {
        revive(state);
    } else {
        state.phase = PlayerPhase::Dead {
            ticks: ticks.saturating_add(1),
        };
    }
}

/// Restart the run from a dead player
pub fn revive(state: &mut GameState) {
    let agent = &mut state.player;
    agent.pos = player::SPAWN;
    agent.vel = Vec2::ZERO;
    agent.accel = Vec2::ZERO;
    agent.rot_speed = 0.0;
    agent.rotation = player::LEVEL_ROTATION;
    agent.set_sprite(Sprite::AgentFly, 1.0);

    state.phase = PlayerPhase::Appear;
    state.emit(GameEvent::StartMusic);
    state.clear_hazards_and_gems();
    state.detach();
    state.crawl_angle = 0.0;
    state.reset_progress();
    log::info!("Agent 8 revived; back to level {}", state.level);
}
