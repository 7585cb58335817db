//! HUD text overlay model
//!
//! The renderer draws each line centred on its anchor.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{level, screen};
use crate::sim::GameState;

/// Bitmap font sizes available to the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Font {
    Regular,
    Large,
}

impl Font {
    pub fn key(&self) -> &'static str {
        match self {
            Font::Regular => "64px",
            Font::Large => "132px",
        }
    }
}

/// One line of centred text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudLine {
    pub text: String,
    pub font: Font,
    pub pos: Vec2,
}

impl HudLine {
    fn new(text: impl Into<String>, font: Font, x: f32, y: f32) -> Self {
        Self {
            text: text.into(),
            font,
            pos: Vec2::new(x, y),
        }
    }
}

const CONTROLS_HINT: &str = "USE THE ARROW KEYS FOR ROTATION AND THE SPACE BAR TO LAUNCH!";
const WIN_MESSAGE: &str = "CONGRATULATIONS YOU WIN!!!";
const REPLAY_PROMPT: &str = "PRESS THE SPACE BAR TO REPLAY OR THE ESCAPE KEY TO QUIT!";

/// Lines to draw this frame
pub fn hud_lines(state: &GameState) -> Vec<HudLine> {
    let centre_x = screen::WIDTH / 2.0;

    if state.level > level::MAX {
        return vec![
            HudLine::new(WIN_MESSAGE, Font::Large, centre_x, screen::HEIGHT / 2.0),
            HudLine::new(REPLAY_PROMPT, Font::Regular, centre_x, 690.0),
        ];
    }

    vec![
        HudLine::new(format!("LEVEL: {}", state.level), Font::Regular, 100.0, 50.0),
        HudLine::new(
            format!("REMAINING GEMS: {}", state.remaining_gems),
            Font::Large,
            centre_x,
            50.0,
        ),
        HudLine::new(format!("SCORE: {}", state.score), Font::Regular, 1180.0, 50.0),
        HudLine::new(CONTROLS_HINT, Font::Regular, centre_x, 690.0),
    ]
}
