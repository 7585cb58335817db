//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation by one frame. Given the same
//! state, input and dice it always produces the same result.

use serde::{Deserialize, Serialize};

use super::collision::{
    update_asteroids, update_destroyed, update_fragments, update_gems, update_meteors,
};
use super::level::update_level;
use super::player::step_player;
use super::spawn::{Dice, run_spawn_slots};
use super::state::GameState;
use super::wrap::screen_size;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Rotate / crawl anticlockwise (held)
    pub left: bool,
    /// Rotate / crawl clockwise (held)
    pub right: bool,
    /// Launch off the asteroid (held)
    pub launch: bool,
    /// Launch went down this frame (revive, replay)
    pub launch_pressed: bool,
    /// Quit requested
    pub quit: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dice: &mut impl Dice) {
    let screen = screen_size();

    step_player(state, input, dice, screen);
    update_level(state, input);
    run_spawn_slots(state, dice);

    update_asteroids(state, screen);
    update_fragments(state, screen);
    update_gems(state, screen);
    update_meteors(state, screen);
    update_destroyed(state, screen);

    state.time_ticks += 1;
}
