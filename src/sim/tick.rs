//! Per-frame simulation tick
//!
//! One tick per rendering callback, in a fixed order. Discrete actions
//! (start, pause, fire) are applied first; the rest only runs while playing.

use rand::Rng;

use super::collision::resolve_collisions;
use super::entities::Ufo;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move left held
    pub left: bool,
    /// Move right held
    pub right: bool,
    /// Start/confirm pressed since the last tick
    pub start: bool,
    /// Fire pressed since the last tick
    pub fire: bool,
    /// Pause toggle pressed since the last tick
    pub pause: bool,
}

/// Advance the game by one frame of `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32, rng: &mut impl Rng) {
    // The start tick only sets up the level
    if apply_actions(state, input) || state.phase != GamePhase::Playing {
        return;
    }

    let dt_ms = dt_ms.clamp(0.0, MAX_FRAME_DT_MS);
    state.time_ticks += 1;

    // Player
    state.player.update(input.left, input.right, state.width);

    // Bullets
    let height = state.height;
    state.bullets.retain_mut(|b| b.update(height));
    state.enemy_bullets.retain_mut(|b| b.update(height));

    // Formation
    if let Some(bullet) = state
        .formation
        .advance(dt_ms, state.level, state.width, rng)
    {
        state.enemy_bullets.push(bullet);
    }

    update_ufo(state, dt_ms);

    // Particles
    state.particles.retain_mut(|p| p.update());

    resolve_collisions(state, rng);

    // A collision may already have ended the run
    if state.phase == GamePhase::Playing {
        check_wave_end(state);
    }

    if state.flash_timer > 0.0 {
        state.flash_timer = (state.flash_timer - dt_ms).max(0.0);
    }
}

/// Edge-triggered actions, applied before the frame simulates.
/// Returns true when this tick started a level.
fn apply_actions(state: &mut GameState, input: &TickInput) -> bool {
    if state.phase.accepts_start() {
        // Fire doubles as confirm outside of play
        let started = input.start || input.fire;
        if started {
            state.start();
        }
        return started;
    }

    if input.pause {
        state.toggle_pause();
    }

    if state.phase == GamePhase::Playing && input.fire {
        if let Some(bullet) = state.player.try_shoot() {
            state.bullets.push(bullet);
        }
    }
    false
}

fn update_ufo(state: &mut GameState, dt_ms: f32) {
    state.ufo_timer += dt_ms;
    if state.ufo_timer >= UFO_SPAWN_INTERVAL_MS && state.ufo.is_none() {
        state.ufo = Some(Ufo::default());
        state.ufo_timer = 0.0;
        state.push_event(GameEvent::UfoSpawned);
        log::info!("UFO spawned");
    }

    let width = state.width;
    let exited = state.ufo.as_mut().is_some_and(|ufo| !ufo.update(width));
    if exited {
        state.ufo = None;
    }
}

/// Level clear when the formation is gone, game over when it lands
fn check_wave_end(state: &mut GameState) {
    if state.formation.is_empty() {
        state.level_clear();
        return;
    }

    let landed = state
        .formation
        .lowest_bottom()
        .is_some_and(|bottom| bottom >= state.landing_line());
    if landed {
        log::info!("Invaders landed");
        state.game_over();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::{Bullet, BulletOwner, Player};
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const FRAME_MS: f32 = 1000.0 / 60.0;

    fn start_input() -> TickInput {
        TickInput {
            start: true,
            ..Default::default()
        }
    }

    fn playing_state(rng: &mut Pcg32) -> GameState {
        let mut state = GameState::new(SCREEN_WIDTH, SCREEN_HEIGHT, 0);
        tick(&mut state, &start_input(), FRAME_MS, rng);
        state
    }

    #[test]
    fn test_tick_menu_to_playing() {
        let mut rng = Pcg32::seed_from_u64(12345);
        let mut state = GameState::new(SCREEN_WIDTH, SCREEN_HEIGHT, 0);

        // Tick without start - should stay on the menu
        tick(&mut state, &TickInput::default(), FRAME_MS, &mut rng);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.time_ticks, 0);

        tick(&mut state, &start_input(), FRAME_MS, &mut rng);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.formation.len(), FORMATION_SIZE);
    }

    #[test]
    fn test_start_tick_does_not_simulate() {
        let mut rng = Pcg32::seed_from_u64(21);
        let mut state = GameState::new(SCREEN_WIDTH, SCREEN_HEIGHT, 0);
        let start_right = TickInput {
            start: true,
            right: true,
            ..Default::default()
        };
        tick(&mut state, &start_right, MAX_FRAME_DT_MS, &mut rng);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.ufo_timer, 0.0);
        assert_eq!(state.formation.move_timer, 0.0);
        assert_eq!(
            state.player.pos,
            Player::spawn_point(SCREEN_WIDTH, SCREEN_HEIGHT)
        );

        tick(&mut state, &TickInput::default(), FRAME_MS, &mut rng);
        assert_eq!(state.time_ticks, 1);
        assert_eq!(state.ufo_timer, FRAME_MS);
    }

    #[test]
    fn test_fire_starts_from_menu_without_shooting() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut state = GameState::new(SCREEN_WIDTH, SCREEN_HEIGHT, 0);
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire, FRAME_MS, &mut rng);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.bullets.is_empty());

        tick(&mut state, &fire, FRAME_MS, &mut rng);
        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn test_tick_pause() {
        let mut rng = Pcg32::seed_from_u64(12345);
        let mut state = playing_state(&mut rng);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };

        tick(&mut state, &pause, FRAME_MS, &mut rng);
        assert_eq!(state.phase, GamePhase::Paused);

        // Frozen while paused
        let before_ticks = state.time_ticks;
        let before_x = state.formation.invaders[0].pos.x;
        let hold_right = TickInput {
            right: true,
            fire: true,
            ..Default::default()
        };
        for _ in 0..200 {
            tick(&mut state, &hold_right, 50.0, &mut rng);
        }
        assert_eq!(state.time_ticks, before_ticks);
        assert_eq!(state.formation.invaders[0].pos.x, before_x);
        assert!(state.bullets.is_empty());

        // Unpause
        tick(&mut state, &pause, FRAME_MS, &mut rng);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, before_ticks + 1);
    }

    #[test]
    fn test_start_ignored_while_paused() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut state = playing_state(&mut rng);
        state.toggle_pause();
        tick(&mut state, &start_input(), FRAME_MS, &mut rng);
        assert_eq!(state.phase, GamePhase::Paused);
    }

    #[test]
    fn test_player_clamped_on_left_input() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut state = playing_state(&mut rng);
        state.player.pos.x = 0.0;
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        tick(&mut state, &left, FRAME_MS, &mut rng);
        assert_eq!(state.player.pos.x, 0.0);
    }

    #[test]
    fn test_out_of_bounds_bullet_removed() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut state = playing_state(&mut rng);
        state.enemy_bullets.push(Bullet::new(
            Vec2::new(20.0, SCREEN_HEIGHT + 25.0),
            Vec2::new(0.0, ENEMY_BULLET_SPEED),
            BulletOwner::Enemy,
        ));
        tick(&mut state, &TickInput::default(), 1.0, &mut rng);
        assert!(state.enemy_bullets.is_empty());
    }

    #[test]
    fn test_ufo_spawns_after_interval() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut state = playing_state(&mut rng);
        // Keep the formation out of the way and silent
        state.formation.invaders.truncate(1);
        state.formation.shoot_timer = f32::MIN;

        state.ufo_timer = UFO_SPAWN_INTERVAL_MS - 1.0;
        tick(&mut state, &TickInput::default(), 1.0, &mut rng);
        let ufo = state.ufo.as_ref().expect("ufo spawned");
        assert_eq!(ufo.pos, Vec2::new(UFO_SPAWN_X + UFO_SPEED, UFO_SPAWN_Y));
        assert_eq!(state.ufo_timer, 0.0);
        assert!(state.events().contains(&GameEvent::UfoSpawned));
    }

    #[test]
    fn test_ufo_despawns_past_right_edge() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut state = playing_state(&mut rng);
        state.ufo = Some(Ufo {
            pos: Vec2::new(SCREEN_WIDTH + UFO_EXIT_MARGIN, UFO_SPAWN_Y),
        });
        tick(&mut state, &TickInput::default(), 1.0, &mut rng);
        assert!(state.ufo.is_none());
    }

    #[test]
    fn test_single_ufo_at_a_time() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut state = playing_state(&mut rng);
        state.ufo = Some(Ufo::default());
        state.ufo_timer = UFO_SPAWN_INTERVAL_MS * 2.0;
        tick(&mut state, &TickInput::default(), 1.0, &mut rng);
        assert_eq!(state.ufo.as_ref().map(|u| u.pos.x), Some(UFO_SPAWN_X + UFO_SPEED));
        assert!(state.ufo_timer > UFO_SPAWN_INTERVAL_MS);
    }

    #[test]
    fn test_last_invader_clears_level() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut state = playing_state(&mut rng);
        state.formation.invaders.clear();
        tick(&mut state, &TickInput::default(), FRAME_MS, &mut rng);
        assert_eq!(state.phase, GamePhase::LevelClear);
        assert_eq!(state.score, 300);
    }

    #[test]
    fn test_landing_invaders_end_run() {
        let mut rng = Pcg32::seed_from_u64(6);
        let mut state = playing_state(&mut rng);
        let landing = state.landing_line();
        state.formation.invaders[0].pos = Vec2::new(20.0, landing - INVADER_HEIGHT);
        tick(&mut state, &TickInput::default(), 1.0, &mut rng);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_flash_timer_decays() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut state = playing_state(&mut rng);
        state.flash_timer = FLASH_DURATION_MS;
        tick(&mut state, &TickInput::default(), 100.0, &mut rng);
        assert_eq!(state.flash_timer, FLASH_DURATION_MS - 100.0);
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), 100.0, &mut rng);
        }
        assert_eq!(state.flash_timer, 0.0);
    }

    #[test]
    fn test_frame_delta_is_clamped() {
        let mut rng = Pcg32::seed_from_u64(8);
        let mut state = playing_state(&mut rng);
        state.ufo_timer = 0.0;
        tick(&mut state, &TickInput::default(), 60_000.0, &mut rng);
        assert!(state.ufo.is_none());
        assert_eq!(state.ufo_timer, MAX_FRAME_DT_MS);
    }

    #[test]
    fn test_determinism() {
        // Two runs with the same seed and inputs produce identical results
        let mut rng1 = Pcg32::seed_from_u64(99999);
        let mut rng2 = Pcg32::seed_from_u64(99999);
        let mut state1 = GameState::new(SCREEN_WIDTH, SCREEN_HEIGHT, 0);
        let mut state2 = GameState::new(SCREEN_WIDTH, SCREEN_HEIGHT, 0);

        let inputs = [
            start_input(),
            TickInput {
                left: true,
                fire: true,
                ..Default::default()
            },
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for frame in 0..2000 {
            let input = &inputs[frame % inputs.len()];
            tick(&mut state1, input, FRAME_MS, &mut rng1);
            tick(&mut state2, input, FRAME_MS, &mut rng2);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.lives, state2.lives);
        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.formation.invaders, state2.formation.invaders);
        assert_eq!(state1.enemy_bullets, state2.enemy_bullets);
    }
}
