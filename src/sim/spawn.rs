//! Hazard spawning
//!
//! Eight fixed slots (four asteroid corners, four meteor edges). Every tick
//! each slot whose level gate is met rolls a d100; on its magic number it
//! spawns once and stays closed until the next level transition.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{EntityKind, GameState, SPAWN_SLOT_COUNT};
use crate::assets::Sprite;
use crate::consts::{SPAWN_DIE_SIDES, asteroid, meteor, screen};

/// Source of the integer draws the simulation needs
pub trait Dice {
    /// Uniform draw in `1..=sides`
    fn roll(&mut self, sides: i32) -> i32;
    /// Uniform draw in `lo..=hi`
    fn roll_range(&mut self, lo: i32, hi: i32) -> i32;
}

impl Dice for Pcg32 {
    fn roll(&mut self, sides: i32) -> i32 {
        self.random_range(1..=sides.max(1))
    }

    fn roll_range(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.random_range(lo..=hi)
    }
}

/// The fixed spawn points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnSlot {
    AsteroidTopLeft,
    AsteroidTopRight,
    AsteroidBottomLeft,
    AsteroidBottomRight,
    MeteorLeft1,
    MeteorRight1,
    MeteorRight2,
    MeteorLeft2,
}

/// Which axis a slot randomises its spawn point along
#[derive(Debug, Clone, Copy, PartialEq)]
enum Span {
    /// Random x in the range, fixed y
    X { lo: i32, hi: i32, y: f32 },
    /// Fixed x, random y in the range
    Y { x: f32, lo: i32, hi: i32 },
}

/// Static description of one slot
#[derive(Debug, Clone, Copy)]
struct SlotDef {
    kind: EntityKind,
    gate: u32,
    magic: i32,
    span: Span,
    vel: Vec2,
    rotation: f32,
}

impl SpawnSlot {
    pub const ALL: [SpawnSlot; SPAWN_SLOT_COUNT] = [
        SpawnSlot::AsteroidTopLeft,
        SpawnSlot::AsteroidTopRight,
        SpawnSlot::AsteroidBottomLeft,
        SpawnSlot::AsteroidBottomRight,
        SpawnSlot::MeteorLeft1,
        SpawnSlot::MeteorRight1,
        SpawnSlot::MeteorRight2,
        SpawnSlot::MeteorLeft2,
    ];

    /// Index into `GameState::slot_available`
    pub fn index(self) -> usize {
        self as usize
    }

    /// Minimum level at which this slot is live
    pub fn gate(self) -> u32 {
        self.def().gate
    }

    /// The d100 face that triggers a spawn
    pub fn magic(self) -> i32 {
        self.def().magic
    }

    pub fn kind(self) -> EntityKind {
        self.def().kind
    }

    fn def(self) -> SlotDef {
        let right = screen::WIDTH as i32;
        let bottom = screen::HEIGHT;
        let corner = asteroid::CORNER_SPAN;
        match self {
            SpawnSlot::AsteroidTopLeft => SlotDef {
                kind: EntityKind::Asteroid,
                gate: 1,
                magic: 19,
                span: Span::X { lo: 0, hi: corner, y: 0.0 },
                vel: Vec2::new(1.0, 1.0),
                rotation: 1.0,
            },
            SpawnSlot::AsteroidTopRight => SlotDef {
                kind: EntityKind::Asteroid,
                gate: 3,
                magic: 23,
                span: Span::X { lo: right - corner, hi: right, y: 0.0 },
                vel: Vec2::new(-1.0, 1.0),
                rotation: 2.5,
            },
            SpawnSlot::AsteroidBottomLeft => SlotDef {
                kind: EntityKind::Asteroid,
                gate: 4,
                magic: 24,
                span: Span::X { lo: 0, hi: corner, y: bottom },
                vel: Vec2::new(1.0, -1.0),
                rotation: 5.5,
            },
            SpawnSlot::AsteroidBottomRight => SlotDef {
                kind: EntityKind::Asteroid,
                gate: 2,
                magic: 42,
                span: Span::X { lo: right - corner, hi: right, y: bottom },
                vel: Vec2::new(-1.0, -1.0),
                rotation: 4.0,
            },
            SpawnSlot::MeteorLeft1 => SlotDef {
                kind: EntityKind::Meteor,
                gate: 1,
                magic: 19,
                span: Span::Y { x: 0.0, lo: 540, hi: 690 },
                vel: Vec2::new(3.0, 0.0),
                rotation: 6.35,
            },
            SpawnSlot::MeteorRight1 => SlotDef {
                kind: EntityKind::Meteor,
                gate: 2,
                magic: 23,
                span: Span::Y { x: 0.0, lo: 70, hi: 240 },
                vel: Vec2::new(-3.0, 0.0),
                rotation: 3.2,
            },
            SpawnSlot::MeteorRight2 => SlotDef {
                kind: EntityKind::Meteor,
                gate: 3,
                magic: 24,
                span: Span::Y { x: 0.0, lo: 400, hi: 520 },
                vel: Vec2::new(-3.0, 0.0),
                rotation: 3.2,
            },
            SpawnSlot::MeteorLeft2 => SlotDef {
                kind: EntityKind::Meteor,
                gate: 4,
                magic: 42,
                span: Span::Y { x: 0.0, lo: 250, hi: 390 },
                vel: Vec2::new(3.0, 0.0),
                rotation: 6.35,
            },
        }
    }
}

/// Run every slot once. Returns how many hazards were created.
pub fn run_spawn_slots(state: &mut GameState, dice: &mut impl Dice) -> usize {
    let mut spawned = 0;
    for slot in SpawnSlot::ALL {
        if try_spawn(state, slot, dice) {
            spawned += 1;
        }
    }
    spawned
}

/// Gate, roll, flag - in that order, so closed-gate slots consume no draws
fn try_spawn(state: &mut GameState, slot: SpawnSlot, dice: &mut impl Dice) -> bool {
    let def = slot.def();
    if state.level < def.gate {
        return false;
    }
    if dice.roll(SPAWN_DIE_SIDES) != def.magic {
        return false;
    }
    if !state.slot_available[slot.index()] {
        return false;
    }

    let pos = match def.span {
        Span::X { lo, hi, y } => Vec2::new(dice.roll_range(lo, hi) as f32, y),
        Span::Y { x, lo, hi } => Vec2::new(x, dice.roll_range(lo, hi) as f32),
    };
    let (radius, sprite, anim_speed) = match def.kind {
        EntityKind::Meteor => (meteor::RADIUS, Sprite::Meteor, meteor::ANIM_SPEED),
        _ => (asteroid::RADIUS, Sprite::Asteroid, asteroid::ANIM_SPEED),
    };

    let id = state.spawn_entity(def.kind, pos, radius, sprite);
    if let Some(entity) = state.entity_mut(id) {
        entity.set_sprite(sprite, anim_speed);
        entity.vel = def.vel;
        entity.rotation = def.rotation;
    }
    state.slot_available[slot.index()] = false;
    log::debug!("Spawned {:?} from {:?} at ({:.0}, {:.0})", def.kind, slot, pos.x, pos.y);
    true
}
