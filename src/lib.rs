//! Sky High Spy - a single-screen asteroid-hopping arcade game
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (entities, player phases, spawning, collisions, levels)
//! - `game`: Frame driver facade (`initialize` / `tick` / `shutdown`)
//! - `audio`: Sound event routing to a pluggable playback backend
//! - `hud`: Text overlay model for the renderer
//! - `assets`: Sprite and sound keys
//! - `settings`: Runtime preferences loaded from JSON

pub mod assets;
pub mod audio;
pub mod game;
pub mod hud;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants, grouped per entity kind
pub mod consts {
    /// Nominal tick rate of the frame driver
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Display area
    pub mod screen {
        pub const WIDTH: f32 = 1280.0;
        pub const HEIGHT: f32 = 720.0;
        /// Extra distance past the sprite origin before an entity counts as off-screen
        pub const WRAP_MARGIN: f32 = 50.0;
    }

    /// Agent 8
    pub mod player {
        use glam::Vec2;

        pub const SPAWN: Vec2 = Vec2::new(640.0, 720.0);
        pub const RADIUS: f32 = 20.0;

        pub const APPEAR_VELOCITY: Vec2 = Vec2::new(0.0, -2.0);
        pub const APPEAR_ACCELERATION: Vec2 = Vec2::new(0.0, -0.15);
        /// Level orientation used while appearing and while resting on an asteroid
        pub const LEVEL_ROTATION: f32 = 4.75;

        pub const FLIGHT_VELOCITY: Vec2 = Vec2::new(1.0, -2.0);
        pub const FLIGHT_TURN_RATE: f32 = 0.015;
        pub const FLIGHT_SKEW_RIGHT: Vec2 = Vec2::new(1.5, 0.5);
        pub const FLIGHT_SKEW_LEFT: Vec2 = Vec2::new(-1.5, 0.5);

        /// Resting offset from the attached asteroid's centre
        pub const REST_OFFSET: Vec2 = Vec2::new(20.0, -55.0);
        pub const CRAWL_STEP: f32 = 0.025;
        pub const ORBIT_RADIUS: f32 = 67.0;
        /// Orientation bias of the left-crawl branch (`rotation = bias - accumulator`)
        pub const LEFT_CRAWL_ROTATION_BIAS: f32 = 3.0;
        pub const CRAWL_ANIM_SPEED: f32 = 0.7;

        pub const DEATH_SPIN: f32 = 1.5;
        pub const DEATH_DAMPING: f32 = 0.99;
    }

    /// Asteroids and the attached derivative
    pub mod asteroid {
        pub const RADIUS: f32 = 100.0;
        pub const ATTACHED_RADIUS: f32 = 50.0;
        pub const ANIM_SPEED: f32 = 0.9;
        /// Corner spawn span along the x axis
        pub const CORNER_SPAN: i32 = 150;
    }

    /// Pieces left behind when Agent 8 launches off an asteroid
    pub mod fragment {
        pub const COUNT: usize = 3;
        pub const SPEED: f32 = 16.0;
        pub const SPIN: f32 = 0.1;
        /// Heading step in units of π (three pieces at 0, ⅔π, 4⁄3π)
        pub const HEADING_STEP: f32 = 0.66666;
    }

    /// Collectible gems
    pub mod gem {
        pub const RADIUS: f32 = 25.0;
        pub const SPIN: f32 = 0.05;
        pub const DRIFT: f32 = 0.75;
        pub const SCORE: u32 = 500;
    }

    /// Meteors
    pub mod meteor {
        pub const RADIUS: f32 = 50.0;
        pub const ANIM_SPEED: f32 = 0.95;
    }

    /// Fade-out of destroyed entities
    pub mod fade {
        pub const ANIM_SPEED: f32 = 0.2;
        pub const FRAMES: u32 = 10;
    }

    /// Level progression
    pub mod level {
        pub const FIRST: u32 = 1;
        pub const MAX: u32 = 4;
    }

    /// Sides of the spawn die
    pub const SPAWN_DIE_SIDES: i32 = 100;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
