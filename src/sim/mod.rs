//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame
//! - Randomness only through `Dice`
//! - Stable iteration order (creation order)
//! - No rendering or platform dependencies; side effects leave as `GameEvent`s

pub mod collision;
pub mod kinematics;
pub mod level;
pub mod player;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod wrap;

pub use collision::circles_overlap;
pub use level::restart;
pub use player::revive;
pub use spawn::{Dice, SpawnSlot};
pub use state::{
    AttachmentLink, Entity, EntityId, EntityKind, GameEvent, GameState, PlayerPhase,
    SPAWN_SLOT_COUNT,
};
pub use tick::{TickInput, tick};
pub use wrap::screen_size;
