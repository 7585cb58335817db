//! Level progression: advance when the gems run out, hold the win screen past the last level

use super::state::{GameEvent, GameState, PlayerPhase};
use super::tick::TickInput;
use crate::consts::level;

/// Run the level controller once per tick
pub fn update_level(state: &mut GameState, input: &TickInput) {
    if state.remaining_gems == 0 {
        advance_level(state);
    } else if state.level > level::MAX {
        hold_win(state, input);
    }
}

fn advance_level(state: &mut GameState) {
    state.clear_hazards_and_gems();
    state.level += 1;
    state.remaining_gems = state.level;

    // Past the last level nothing may spawn, starting with this tick
    let next_level_live = state.level <= level::MAX;
    state.set_all_slots(next_level_live);

    if !next_level_live {
        log::info!("All levels cleared with score {}", state.score);
    } else {
        log::info!("Level {} ({} gems), score {}", state.level, state.remaining_gems, state.score);
    }
}

/// Nothing spawns and nothing lingers until the player asks to replay
fn hold_win(state: &mut GameState, input: &TickInput) {
    state.clear_hazards_and_gems();
    state.set_all_slots(false);

    if !state.won {
        state.won = true;
        state.emit(GameEvent::StopMusic);
    }

    if input.launch_pressed {
        restart(state);
    }
}

/// Replay from level 1 after a win. Agent 8 keeps its position and flies in from there.
pub fn restart(state: &mut GameState) {
    state.reset_progress();
    state.detach();
    state.phase = PlayerPhase::Appear;
    state.emit(GameEvent::StartMusic);
    log::info!("Restarting at level {}", state.level);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Sprite;
    use crate::sim::state::EntityKind;
    use glam::Vec2;

    #[test]
    fn empty_gem_count_advances_once() {
        let mut state = GameState::new();
        state.remaining_gems = 0;
        state.set_all_slots(false);
        let rock = state.spawn_entity(EntityKind::Asteroid, Vec2::ZERO, 100.0, Sprite::Asteroid);

        update_level(&mut state, &TickInput::default());
        assert_eq!(state.level, 2);
        assert_eq!(state.remaining_gems, 2);
        assert!(state.slot_available.iter().all(|&a| a));
        assert_eq!(state.entity(rock).map(|e| e.kind), Some(EntityKind::PendingDestruction));

        update_level(&mut state, &TickInput::default());
        assert_eq!(state.level, 2);
    }

    #[test]
    fn clearing_the_last_level_wins() {
        let mut state = GameState::new();
        state.level = level::MAX;
        state.remaining_gems = 0;

        update_level(&mut state, &TickInput::default());
        assert_eq!(state.level, level::MAX + 1);
        assert!(!state.won);
        assert!(state.slot_available.iter().all(|&a| !a));

        update_level(&mut state, &TickInput::default());
        assert!(state.won);
        assert!(state.slot_available.iter().all(|&a| !a));
        assert_eq!(state.drain_events(), vec![GameEvent::StopMusic]);

        // Music stops once, not every tick
        update_level(&mut state, &TickInput::default());
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn win_screen_keeps_the_field_clear() {
        let mut state = GameState::new();
        state.level = level::MAX + 1;
        state.remaining_gems = 5;
        state.won = true;
        let meteor = state.spawn_entity(EntityKind::Meteor, Vec2::ZERO, 50.0, Sprite::Meteor);
        update_level(&mut state, &TickInput::default());
        assert_eq!(state.entity(meteor).map(|e| e.kind), Some(EntityKind::PendingDestruction));
    }

    #[test]
    fn replay_after_win() {
        let mut state = GameState::new();
        state.level = level::MAX + 1;
        state.remaining_gems = 5;
        state.score = 5000;
        state.won = true;
        state.phase = PlayerPhase::Flying;
        state.player.pos = Vec2::new(100.0, 100.0);

        let press = TickInput { launch_pressed: true, ..Default::default() };
        update_level(&mut state, &press);

        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.remaining_gems, 1);
        assert!(!state.won);
        assert!(state.slot_available.iter().all(|&a| a));
        assert_eq!(state.phase, PlayerPhase::Appear);
        assert_eq!(state.player.pos, Vec2::new(100.0, 100.0));
        assert!(state.drain_events().contains(&GameEvent::StartMusic));
    }

    #[test]
    fn mid_level_is_left_alone() {
        let mut state = GameState::new();
        state.level = 3;
        state.remaining_gems = 2;
        state.slot_available[0] = false;
        update_level(&mut state, &TickInput::default());
        assert_eq!(state.level, 3);
        assert!(!state.slot_available[0]);
    }
}
