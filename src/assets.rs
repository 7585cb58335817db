//! Sprite and sound keys shared with the renderer and audio backends
//!
//! Asset loading is done by the platform; the simulation only needs stable
//! keys plus each sprite's frame size. All sprite origins are centred.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Static background image
pub const BACKGROUND: &str = "Data\\Backgrounds\\spr_background.png";

/// Visual key of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sprite {
    AgentFly,
    AgentCrawlRight,
    AgentCrawlLeft,
    AgentDead,
    Asteroid,
    AsteroidPieces,
    Gem,
    Meteor,
}

impl Sprite {
    pub fn key(&self) -> &'static str {
        match self {
            Sprite::AgentFly => "spr_agent8_fly",
            Sprite::AgentCrawlRight => "spr_agent8_right_strip7",
            Sprite::AgentCrawlLeft => "spr_agent8_left_strip7",
            Sprite::AgentDead => "spr_agent8_dead_strip2",
            Sprite::Asteroid => "spr_asteroid_strip2",
            Sprite::AsteroidPieces => "spr_asteroid_pieces_strip3",
            Sprite::Gem => "spr_gem",
            Sprite::Meteor => "spr_meteor_strip2",
        }
    }

    /// Number of animation frames in the strip
    pub fn frame_count(&self) -> u32 {
        match self {
            Sprite::AgentFly | Sprite::Gem => 1,
            Sprite::AgentDead | Sprite::Asteroid | Sprite::Meteor => 2,
            Sprite::AsteroidPieces => 3,
            Sprite::AgentCrawlRight | Sprite::AgentCrawlLeft => 7,
        }
    }

    /// Size of a single frame in pixels
    pub fn frame_size(&self) -> Vec2 {
        match self {
            Sprite::AgentFly | Sprite::AgentDead => Vec2::new(64.0, 64.0),
            Sprite::AgentCrawlRight | Sprite::AgentCrawlLeft => Vec2::new(64.0, 80.0),
            Sprite::Asteroid => Vec2::new(200.0, 200.0),
            Sprite::AsteroidPieces => Vec2::new(96.0, 96.0),
            Sprite::Gem => Vec2::new(50.0, 50.0),
            Sprite::Meteor => Vec2::new(120.0, 100.0),
        }
    }

    /// Pivot of the sprite relative to its top-left corner
    #[inline]
    pub fn origin(&self) -> Vec2 {
        self.frame_size() / 2.0
    }
}

/// Sound keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sound {
    /// Background loop
    Music,
    /// Agent 8 kicks off an asteroid
    Combust,
    /// Asteroid bursts
    Explode,
    /// Gem collected
    Reward,
    /// Agent 8 hit by a meteor
    Clang,
}

impl Sound {
    pub fn key(&self) -> &'static str {
        match self {
            Sound::Music => "snd_music",
            Sound::Combust => "snd_combust",
            Sound::Explode => "snd_explode",
            Sound::Reward => "snd_reward",
            Sound::Clang => "snd_clang",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_centred() {
        let origin = Sprite::Asteroid.origin();
        assert_eq!(origin, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn strip_keys_match_frame_counts() {
        for sprite in [
            Sprite::AgentCrawlRight,
            Sprite::AgentDead,
            Sprite::Asteroid,
            Sprite::AsteroidPieces,
            Sprite::Meteor,
        ] {
            let suffix = format!("strip{}", sprite.frame_count());
            assert!(sprite.key().ends_with(&suffix), "{}", sprite.key());
        }
    }
}
