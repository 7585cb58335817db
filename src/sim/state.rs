//! Game state and core simulation types
//!
//! `GameState` is the simulation context: every component receives it
//! explicitly and it is the only owner of entities and progression counters.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::assets::{Sound, Sprite};
use crate::consts::{fade, level, player};

/// Entity id handed out by the store (never reused within a run)
pub type EntityId = u32;

/// Number of spawn slots (4 asteroid corners + 4 meteor edges)
pub const SPAWN_SLOT_COUNT: usize = 8;

/// What an entity is and how the tick treats it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Asteroid,
    /// The asteroid Agent 8 is currently standing on
    AsteroidAttached,
    AsteroidFragment,
    Gem,
    Meteor,
    /// Fading out, removed once the fade completes
    PendingDestruction,
}

impl EntityKind {
    /// Kinds that reappear on the opposite edge when leaving the screen
    pub fn wraps(&self) -> bool {
        matches!(
            self,
            EntityKind::Player
                | EntityKind::Asteroid
                | EntityKind::AsteroidAttached
                | EntityKind::Meteor
                | EntityKind::Gem
        )
    }
}

/// A simulated game object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub accel: Vec2,
    /// Orientation (radians)
    pub rotation: f32,
    /// Radians added to `rotation` each tick
    pub rot_speed: f32,
    pub radius: f32,
    pub sprite: Sprite,
    pub frame: u32,
    /// Progress toward the next animation frame, in [0, 1)
    pub frame_pos: f32,
    pub anim_speed: f32,
}

impl Entity {
    pub fn new(id: EntityId, kind: EntityKind, pos: Vec2, radius: f32, sprite: Sprite) -> Self {
        Self {
            id,
            kind,
            pos,
            vel: Vec2::ZERO,
            accel: Vec2::ZERO,
            rotation: 0.0,
            rot_speed: 0.0,
            radius,
            sprite,
            frame: 0,
            frame_pos: 0.0,
            anim_speed: 1.0,
        }
    }

    /// Swap sprite and animation speed, keeping the current frame
    pub fn set_sprite(&mut self, sprite: Sprite, anim_speed: f32) {
        self.sprite = sprite;
        self.anim_speed = anim_speed;
    }

    /// Draw opacity while fading out: blinks on odd frames, dimming toward zero.
    /// `None` means "skip drawing this frame".
    pub fn fade_alpha(&self) -> Option<f32> {
        if self.kind != EntityKind::PendingDestruction || self.frame % 2 == 0 {
            return None;
        }
        let remaining = fade::FRAMES.saturating_sub(self.frame);
        Some(remaining as f32 / fade::FRAMES as f32)
    }
}

/// Agent 8's behaviour. Exactly one variant holds at any time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlayerPhase {
    /// Dropping in from the bottom of the screen
    Appear,
    /// Free flight with light steering
    Flying,
    /// Standing on an asteroid
    Attached { host: EntityId },
    /// One-tick pass-through after kicking off an asteroid
    Launching,
    /// Hit by a meteor; spinning down until revived
    Dead { ticks: u32 },
}

impl PlayerPhase {
    pub fn is_dead(&self) -> bool {
        matches!(self, PlayerPhase::Dead { .. })
    }

    pub fn is_attached(&self) -> bool {
        matches!(self, PlayerPhase::Attached { .. })
    }
}

/// Motion copied from the asteroid Agent 8 landed on, replayed onto the
/// attached derivative every tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttachmentLink {
    pub vel: Vec2,
    pub rotation: f32,
}

/// Side effects the platform layer has to carry out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PlaySound(Sound),
    StartMusic,
    StopMusic,
}

/// Complete simulation context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seconds accumulated from the frame driver
    pub elapsed: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub level: u32,
    pub score: u32,
    /// Gems still to collect on this level
    pub remaining_gems: u32,
    pub phase: PlayerPhase,
    /// Crawl angle around the attached asteroid (radians, unbounded)
    pub crawl_angle: f32,
    /// Spawn slot availability, indexed by `SpawnSlot::index`
    pub slot_available: [bool; SPAWN_SLOT_COUNT],
    /// Set once the last level is cleared
    pub won: bool,
    pub attachment: Option<AttachmentLink>,
    /// Agent 8 (kept out of `entities` so there is always exactly one)
    pub player: Entity,
    /// Every other entity, in creation order
    pub entities: Vec<Entity>,
    /// Pending side effects, drained by the frame driver
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: EntityId,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Fresh game: Agent 8 at the spawn point, level 1, every slot available
    pub fn new() -> Self {
        let player = Entity::new(
            1,
            EntityKind::Player,
            player::SPAWN,
            player::RADIUS,
            Sprite::AgentFly,
        );
        Self {
            elapsed: 0.0,
            time_ticks: 0,
            level: level::FIRST,
            score: 0,
            remaining_gems: level::FIRST,
            phase: PlayerPhase::Appear,
            crawl_angle: 0.0,
            slot_available: [true; SPAWN_SLOT_COUNT],
            won: false,
            attachment: None,
            player,
            entities: Vec::new(),
            events: Vec::new(),
            next_id: 2,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Create an entity and return its id
    pub fn spawn_entity(
        &mut self,
        kind: EntityKind,
        pos: Vec2,
        radius: f32,
        sprite: Sprite,
    ) -> EntityId {
        let id = self.next_entity_id();
        self.entities.push(Entity::new(id, kind, pos, radius, sprite));
        id
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        if id == self.player.id {
            return Some(&self.player);
        }
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        if id == self.player.id {
            return Some(&mut self.player);
        }
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Ids of every live entity of the given kind, in creation order
    pub fn ids_of_kind(&self, kind: EntityKind) -> Vec<EntityId> {
        if kind == EntityKind::Player {
            return vec![self.player.id];
        }
        self.entities
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.id)
            .collect()
    }

    pub fn count_of_kind(&self, kind: EntityKind) -> usize {
        if kind == EntityKind::Player {
            return 1;
        }
        self.entities.iter().filter(|e| e.kind == kind).count()
    }

    /// Start an entity's fade-out. The player is never destroyed.
    pub fn mark_destroyed(&mut self, id: EntityId) {
        if id == self.player.id {
            return;
        }
        if let Some(entity) = self.entities.iter_mut().find(|e| e.id == id) {
            entity.kind = EntityKind::PendingDestruction;
        }
    }

    /// Drop an entity from the store immediately
    pub fn remove_entity(&mut self, id: EntityId) {
        self.entities.retain(|e| e.id != id);
    }

    /// Fade out every asteroid, meteor and gem
    pub fn clear_hazards_and_gems(&mut self) {
        for entity in &mut self.entities {
            if matches!(
                entity.kind,
                EntityKind::Asteroid | EntityKind::Meteor | EntityKind::Gem
            ) {
                entity.kind = EntityKind::PendingDestruction;
            }
        }
    }

    /// Fade out the attached derivative (if any) and forget its motion
    pub fn detach(&mut self) {
        for entity in &mut self.entities {
            if entity.kind == EntityKind::AsteroidAttached {
                entity.kind = EntityKind::PendingDestruction;
            }
        }
        self.attachment = None;
    }

    pub fn set_all_slots(&mut self, available: bool) {
        self.slot_available = [available; SPAWN_SLOT_COUNT];
    }

    /// Back to level 1 with no score and every slot available
    pub fn reset_progress(&mut self) {
        self.level = level::FIRST;
        self.score = 0;
        self.remaining_gems = self.level;
        self.won = false;
        self.set_all_slots(true);
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn play_sound(&mut self, sound: Sound) {
        self.emit(GameEvent::PlaySound(sound));
    }

    /// Take all pending side effects
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
