//! Frame driver facade
//!
//! `Game` owns the simulation state, the seeded RNG and the audio manager.
//! The platform calls `initialize` once, `tick` every frame and `shutdown`
//! on exit.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::assets::BACKGROUND;
use crate::audio::{AudioBackend, AudioManager};
use crate::hud::{HudLine, hud_lines};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, tick};

pub struct Game {
    state: GameState,
    rng: Pcg32,
    audio: AudioManager,
    seed: u64,
}

impl Game {
    /// Create Agent 8, start the music and announce the background
    pub fn initialize(settings: Settings, backend: Box<dyn AudioBackend>) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);

        let mut audio = AudioManager::new(backend);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_music_volume(settings.music_volume);
        audio.set_muted(settings.muted);

        let mut state = GameState::new();
        state.emit(GameEvent::StartMusic);

        let mut game = Self {
            state,
            rng: Pcg32::seed_from_u64(seed),
            audio,
            seed,
        };
        game.flush_events();

        log::info!("Game initialized with seed: {}", seed);
        log::debug!("Background: {}", BACKGROUND);
        game
    }

    /// Run one frame. Returns true when the player asked to quit.
    pub fn tick(&mut self, input: &TickInput, elapsed_seconds: f32) -> bool {
        self.state.elapsed += elapsed_seconds;
        tick(&mut self.state, input, &mut self.rng);
        self.flush_events();
        input.quit
    }

    pub fn shutdown(mut self) {
        self.audio.shutdown();
        log::info!(
            "Shutting down after {} ticks ({:.1}s): level {}, score {}",
            self.state.time_ticks,
            self.state.elapsed,
            self.state.level,
            self.state.score
        );
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn hud(&self) -> Vec<HudLine> {
        hud_lines(&self.state)
    }

    fn flush_events(&mut self) {
        for event in self.state.drain_events() {
            self.audio.handle(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Sound;
    use crate::audio::tests::{Call, RecordingBackend};
    use crate::sim::PlayerPhase;

    fn seeded(seed: u64) -> (Game, RecordingBackend) {
        let backend = RecordingBackend::default();
        let settings = Settings {
            seed: Some(seed),
            ..Default::default()
        };
        (Game::initialize(settings, Box::new(backend.clone())), backend)
    }

    #[test]
    fn initialize_starts_the_music() {
        let (game, backend) = seeded(1);
        assert_eq!(game.seed(), 1);
        assert_eq!(game.state().phase, PlayerPhase::Appear);
        assert!(matches!(backend.0.borrow()[0], Call::Loop(Sound::Music, _)));
        assert!(game.state().events.is_empty());
    }

    #[test]
    fn tick_accumulates_time_and_reports_quit() {
        let (mut game, _) = seeded(2);
        assert!(!game.tick(&TickInput::default(), 1.0 / 60.0));
        assert!(game.tick(&TickInput { quit: true, ..Default::default() }, 1.0 / 60.0));
        assert_eq!(game.state().time_ticks, 2);
        assert!((game.state().elapsed - 2.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn shutdown_stops_the_music() {
        let (game, backend) = seeded(3);
        game.shutdown();
        assert_eq!(backend.0.borrow().last(), Some(&Call::Stop(Sound::Music)));
    }

    #[test]
    fn same_seed_same_game() {
        let (mut a, _) = seeded(77);
        let (mut b, _) = seeded(77);
        for _ in 0..1500 {
            a.tick(&TickInput::default(), 1.0 / 60.0);
            b.tick(&TickInput::default(), 1.0 / 60.0);
        }
        assert_eq!(a.state().entities, b.state().entities);
        assert_eq!(a.hud(), b.hud());
    }
}
