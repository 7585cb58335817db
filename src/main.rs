//! Sky High Spy entry point
//!
//! Headless native driver: loads settings, then lets a scripted autopilot
//! play at a fixed 60 Hz step until `demo_ticks` run out.

use sky_high_spy::audio::LogBackend;
use sky_high_spy::consts::TICKS_PER_SECOND;
use sky_high_spy::sim::{GameState, PlayerPhase, TickInput};
use sky_high_spy::{Game, Settings};

/// Environment variable naming the settings file
const SETTINGS_ENV: &str = "SKY_HIGH_SPY_SETTINGS";

/// Ticks spent crawling before the autopilot kicks off
const CRAWL_TICKS: u64 = 45;
/// Ticks the autopilot waits on the death or win screen
const WAIT_TICKS: u32 = 90;

/// Scripted player: crawl a little, launch, revive after a pause
#[derive(Default)]
struct Autopilot {
    attached_for: u64,
    waiting_for: u32,
}

impl Autopilot {
    fn next_input(&mut self, state: &GameState) -> TickInput {
        let mut input = TickInput::default();

        match state.phase {
            PlayerPhase::Attached { .. } => {
                self.attached_for += 1;
                if self.attached_for > CRAWL_TICKS {
                    input.launch = true;
                    self.attached_for = 0;
                } else {
                    input.right = true;
                }
            }
            PlayerPhase::Dead { ticks } => {
                input.launch_pressed = ticks >= WAIT_TICKS;
            }
            PlayerPhase::Flying => {
                // Weave so the flight path covers more of the screen
                let sway = (state.time_ticks / 120) % 3;
                input.left = sway == 1;
                input.right = sway == 2;
            }
            _ => {}
        }

        if state.won {
            self.waiting_for += 1;
            if self.waiting_for >= WAIT_TICKS {
                input.launch_pressed = true;
                self.waiting_for = 0;
            }
        }

        input
    }
}

fn main() {
    env_logger::init();
    log::info!("Sky High Spy (headless) starting...");

    let settings = match std::env::var(SETTINGS_ENV) {
        Ok(path) => Settings::load(path),
        Err(_) => {
            log::info!("{} not set, using default settings", SETTINGS_ENV);
            Settings::default()
        }
    };
    let demo_ticks = settings.demo_ticks;

    let mut game = Game::initialize(settings, Box::new(LogBackend));
    let mut pilot = Autopilot::default();
    let dt = 1.0 / TICKS_PER_SECOND as f32;

    for n in 0..demo_ticks {
        let mut input = pilot.next_input(game.state());
        input.quit = n + 1 == demo_ticks;
        if game.tick(&input, dt) {
            break;
        }
    }

    for line in game.hud() {
        log::info!("[{}] {}", line.font.key(), line.text);
    }
    game.shutdown();
}
