//! Audio routing
//!
//! The simulation only emits `GameEvent`s. `AudioManager` applies volume and
//! mute settings and hands the result to a platform `AudioBackend`.

use crate::assets::Sound;
use crate::sim::GameEvent;

/// Platform playback. Volumes are already mixed down to 0.0 - 1.0.
pub trait AudioBackend {
    /// Fire-and-forget sound effect
    fn play_oneshot(&mut self, sound: Sound, volume: f32);
    /// Start (or restart) the looping background track
    fn start_loop(&mut self, sound: Sound, volume: f32);
    /// Stop the looping background track
    fn stop_loop(&mut self, sound: Sound);
}

/// Backend for headless runs: every request becomes a log line
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play_oneshot(&mut self, sound: Sound, volume: f32) {
        log::debug!("play {} at {:.2}", sound.key(), volume);
    }

    fn start_loop(&mut self, sound: Sound, volume: f32) {
        log::debug!("loop {} at {:.2}", sound.key(), volume);
    }

    fn stop_loop(&mut self, sound: Sound) {
        log::debug!("stop {}", sound.key());
    }
}

/// Starting mix, shared with `Settings::default`
pub const DEFAULT_MASTER_VOLUME: f32 = 0.8;
pub const DEFAULT_SFX_VOLUME: f32 = 1.0;
pub const DEFAULT_MUSIC_VOLUME: f32 = 0.7;

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music_playing: bool,
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            master_volume: DEFAULT_MASTER_VOLUME,
            sfx_volume: DEFAULT_SFX_VOLUME,
            music_volume: DEFAULT_MUSIC_VOLUME,
            muted: false,
            music_playing: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio. A running music loop is re-issued at the new volume.
    pub fn set_muted(&mut self, muted: bool) {
        if self.muted == muted {
            return;
        }
        self.muted = muted;
        if self.music_playing {
            let vol = self.effective_volume(self.music_volume);
            self.backend.start_loop(Sound::Music, vol);
        }
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    /// Mixed volume for one channel
    pub fn effective_volume(&self, channel: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * channel
        }
    }

    /// Carry out one simulation side effect
    pub fn handle(&mut self, event: GameEvent) {
        match event {
            GameEvent::PlaySound(sound) => {
                let vol = self.effective_volume(self.sfx_volume);
                if vol > 0.0 {
                    self.backend.play_oneshot(sound, vol);
                }
            }
            GameEvent::StartMusic => {
                let vol = self.effective_volume(self.music_volume);
                self.backend.start_loop(Sound::Music, vol);
                self.music_playing = true;
            }
            GameEvent::StopMusic => {
                if self.music_playing {
                    self.backend.stop_loop(Sound::Music);
                    self.music_playing = false;
                }
            }
        }
    }

    /// Stop everything still sounding
    pub fn shutdown(&mut self) {
        self.handle(GameEvent::StopMusic);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// What a backend was asked to do
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Call {
        Oneshot(Sound, f32),
        Loop(Sound, f32),
        Stop(Sound),
    }

    /// Backend that records calls into a shared log
    #[derive(Default, Clone)]
    pub(crate) struct RecordingBackend(pub Rc<RefCell<Vec<Call>>>);

    impl AudioBackend for RecordingBackend {
        fn play_oneshot(&mut self, sound: Sound, volume: f32) {
            self.0.borrow_mut().push(Call::Oneshot(sound, volume));
        }

        fn start_loop(&mut self, sound: Sound, volume: f32) {
            self.0.borrow_mut().push(Call::Loop(sound, volume));
        }

        fn stop_loop(&mut self, sound: Sound) {
            self.0.borrow_mut().push(Call::Stop(sound));
        }
    }

    fn manager() -> (AudioManager, Rc<RefCell<Vec<Call>>>) {
        let backend = RecordingBackend::default();
        let calls = backend.0.clone();
        let mut audio = AudioManager::new(Box::new(backend));
        audio.set_master_volume(1.0);
        audio.set_sfx_volume(0.5);
        audio.set_music_volume(0.25);
        (audio, calls)
    }

    #[test]
    fn sounds_use_the_sfx_channel() {
        let (mut audio, calls) = manager();
        audio.handle(GameEvent::PlaySound(Sound::Reward));
        assert_eq!(*calls.borrow(), vec![Call::Oneshot(Sound::Reward, 0.5)]);
    }

    #[test]
    fn music_loop_starts_and_stops_once() {
        let (mut audio, calls) = manager();
        audio.handle(GameEvent::StartMusic);
        assert!(audio.is_music_playing());
        audio.handle(GameEvent::StopMusic);
        audio.handle(GameEvent::StopMusic);
        assert!(!audio.is_music_playing());
        assert_eq!(
            *calls.borrow(),
            vec![Call::Loop(Sound::Music, 0.25), Call::Stop(Sound::Music)]
        );
    }

    #[test]
    fn muted_effects_are_dropped() {
        let (mut audio, calls) = manager();
        audio.set_muted(true);
        audio.handle(GameEvent::PlaySound(Sound::Clang));
        assert!(calls.borrow().is_empty());
        assert_eq!(audio.effective_volume(1.0), 0.0);
    }

    #[test]
    fn unmuting_restores_music_started_while_muted() {
        let (mut audio, calls) = manager();
        audio.set_muted(true);
        audio.handle(GameEvent::StartMusic);
        audio.set_muted(false);
        audio.set_muted(false);
        assert_eq!(
            *calls.borrow(),
            vec![Call::Loop(Sound::Music, 0.0), Call::Loop(Sound::Music, 0.25)]
        );
    }

    #[test]
    fn muting_without_music_touches_nothing() {
        let (mut audio, calls) = manager();
        audio.set_muted(true);
        audio.set_muted(false);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn volumes_are_clamped() {
        let (mut audio, _) = manager();
        audio.set_master_volume(3.0);
        assert_eq!(audio.effective_volume(1.0), 1.0);
        audio.set_master_volume(-1.0);
        assert_eq!(audio.effective_volume(1.0), 0.0);
    }
}
