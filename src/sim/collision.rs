//! Collision engine
//!
//! Pairwise rectangle overlap across entity groups, resolved in a fixed order
//! once per tick after movement. A consumed bullet takes no further part in
//! the frame.

use rand::Rng;

use super::entities::{Barrier, Bullet};
use super::state::{GamePhase, GameState};

/// Run every collision pass in order
pub fn resolve_collisions(state: &mut GameState, rng: &mut impl Rng) {
    player_bullets_vs_invaders(state, rng);
    player_bullets_vs_ufo(state, rng);
    bullets_vs_barriers(&mut state.bullets, &mut state.barriers);
    enemy_bullets_vs_player(state, rng);
    bullets_vs_barriers(&mut state.enemy_bullets, &mut state.barriers);
    invaders_vs_player(state);
}

/// Each bullet destroys at most one invader. Both lists are scanned from the
/// back, so the newest bullet and the last invader in formation order win ties.
fn player_bullets_vs_invaders(state: &mut GameState, rng: &mut impl Rng) {
    let mut i = state.bullets.len();
    while i > 0 {
        i -= 1;
        let bullet = state.bullets[i].rect();
        let hit = state
            .formation
            .invaders
            .iter()
            .rposition(|inv| bullet.overlaps(&inv.rect()));

        if let Some(j) = hit {
            let invader = state.formation.invaders.remove(j);
            state.bullets.remove(i);
            state.destroy_invader(invader, rng);
        }
    }
}

fn player_bullets_vs_ufo(state: &mut GameState, rng: &mut impl Rng) {
    let Some(ufo) = state.ufo.as_ref().map(|u| u.rect()) else {
        return;
    };
    if let Some(i) = state.bullets.iter().rposition(|b| b.rect().overlaps(&ufo)) {
        state.bullets.remove(i);
        state.destroy_ufo(rng);
    }
}

/// Bullets chip the first barrier whose intact cell lies under their tip
fn bullets_vs_barriers(bullets: &mut Vec<Bullet>, barriers: &mut [Barrier]) {
    bullets.retain(|bullet| {
        match barriers.iter_mut().find(|b| b.hit_test(bullet.pos)) {
            Some(barrier) => {
                barrier.take_damage(bullet.pos);
                false
            }
            None => true,
        }
    });
}

fn enemy_bullets_vs_player(state: &mut GameState, rng: &mut impl Rng) {
    let mut i = 0;
    while i < state.enemy_bullets.len() {
        if state.enemy_bullets[i].rect().overlaps(&state.player.rect()) {
            state.enemy_bullets.remove(i);
            state.player_hit(rng);
        } else {
            i += 1;
        }
    }
}

/// An invader touching the ship ends the run immediately
fn invaders_vs_player(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        return;
    }
    let player = state.player.rect();
    if state
        .formation
        .invaders
        .iter()
        .any(|inv| inv.rect().overlaps(&player))
    {
        log::info!("Invader reached the player");
        state.game_over();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::entities::{BulletOwner, Invader, InvaderKind, Ufo};
    use crate::sim::state::GameEvent;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn playing_state() -> GameState {
        let mut state = GameState::new(SCREEN_WIDTH, SCREEN_HEIGHT, 0);
        state.start();
        state.drain_events();
        state
    }

    fn player_bullet(x: f32, y: f32) -> Bullet {
        Bullet::new(
            Vec2::new(x, y),
            Vec2::new(0.0, -PLAYER_BULLET_SPEED),
            BulletOwner::Player,
        )
    }

    fn enemy_bullet(x: f32, y: f32) -> Bullet {
        Bullet::new(
            Vec2::new(x, y),
            Vec2::new(0.0, ENEMY_BULLET_SPEED),
            BulletOwner::Enemy,
        )
    }

    #[test]
    fn test_bullet_destroys_one_invader() {
        let mut state = playing_state();
        let mut rng = Pcg32::seed_from_u64(1);
        // Two overlapping invaders under one bullet
        state.formation.invaders = vec![
            Invader::new(Vec2::new(100.0, 100.0), InvaderKind::Small),
            Invader::new(Vec2::new(105.0, 100.0), InvaderKind::Medium),
        ];
        state.bullets.push(player_bullet(110.0, 110.0));

        resolve_collisions(&mut state, &mut rng);

        assert!(state.bullets.is_empty());
        assert_eq!(state.formation.len(), 1);
        assert_eq!(state.formation.invaders[0].kind, InvaderKind::Small);
        assert_eq!(state.score, 20);
        assert_eq!(state.particles.len(), EXPLOSION_PARTICLES);
    }

    #[test]
    fn test_newest_bullet_claims_shared_invader() {
        let mut state = playing_state();
        let mut rng = Pcg32::seed_from_u64(1);
        state.formation.invaders =
            vec![Invader::new(Vec2::new(100.0, 100.0), InvaderKind::Small)];
        state.bullets.push(player_bullet(105.0, 105.0));
        state.bullets.push(player_bullet(115.0, 105.0));

        resolve_collisions(&mut state, &mut rng);

        assert!(state.formation.is_empty());
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].pos.x, 105.0);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_each_bullet_scores_independently() {
        let mut state = playing_state();
        let mut rng = Pcg32::seed_from_u64(1);
        // Top-row invaders at x=100 and x=150
        state.bullets.push(player_bullet(110.0, 110.0));
        state.bullets.push(player_bullet(160.0, 110.0));

        resolve_collisions(&mut state, &mut rng);

        assert!(state.bullets.is_empty());
        assert_eq!(state.formation.len(), FORMATION_SIZE - 2);
        assert_eq!(state.score, 60);
    }

    #[test]
    fn test_bullet_hits_ufo() {
        let mut state = playing_state();
        let mut rng = Pcg32::seed_from_u64(4);
        state.ufo = Some(Ufo {
            pos: Vec2::new(300.0, 50.0),
        });
        state.bullets.push(player_bullet(310.0, 60.0));

        resolve_collisions(&mut state, &mut rng);

        assert!(state.ufo.is_none());
        assert!(state.bullets.is_empty());
        assert!((100..=499).contains(&state.score));
        assert!(
            state
                .events()
                .iter()
                .any(|e| matches!(e, GameEvent::UfoDestroyed { .. }))
        );
    }

    #[test]
    fn test_player_bullet_chips_barrier() {
        let mut state = playing_state();
        let mut rng = Pcg32::seed_from_u64(1);
        let barrier = state.barriers[1].clone();
        let impact = barrier.rect().center();
        state.bullets.push(player_bullet(impact.x, impact.y));

        resolve_collisions(&mut state, &mut rng);

        assert!(state.bullets.is_empty());
        assert!(state.barriers[1].intact_count() < barrier.intact_count());
        assert_eq!(state.barriers[0].intact_count(), barrier.intact_count());
    }

    #[test]
    fn test_bullet_passes_through_destroyed_cells() {
        let mut state = playing_state();
        let mut rng = Pcg32::seed_from_u64(1);
        // Notch cell (row 3, col 2) is already gone
        let notch = state.barriers[0].pos + Vec2::new(25.0, 35.0);
        state.bullets.push(player_bullet(notch.x, notch.y));

        resolve_collisions(&mut state, &mut rng);

        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn test_enemy_bullet_hits_player() {
        let mut state = playing_state();
        let mut rng = Pcg32::seed_from_u64(1);
        state.player.pos.x = 100.0;
        state.enemy_bullets.push(enemy_bullet(110.0, 540.0));

        resolve_collisions(&mut state, &mut rng);

        assert!(state.enemy_bullets.is_empty());
        assert_eq!(state.lives, 2);
        assert_eq!(state.flash_timer, FLASH_DURATION_MS);
        assert_eq!(state.player.pos, Vec2::new(400.0, 540.0));
    }

    #[test]
    fn test_enemy_bullet_on_last_life_ends_run() {
        let mut state = playing_state();
        let mut rng = Pcg32::seed_from_u64(1);
        state.lives = 1;
        state.enemy_bullets.push(enemy_bullet(410.0, 540.0));
        state.enemy_bullets.push(enemy_bullet(415.0, 545.0));

        resolve_collisions(&mut state, &mut rng);

        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.enemy_bullets.is_empty());
    }

    #[test]
    fn test_enemy_bullet_chips_barrier() {
        let mut state = playing_state();
        let mut rng = Pcg32::seed_from_u64(1);
        let top_left = state.barriers[2].pos + Vec2::new(1.0, 1.0);
        state.enemy_bullets.push(enemy_bullet(top_left.x, top_left.y));

        resolve_collisions(&mut state, &mut rng);

        assert!(state.enemy_bullets.is_empty());
        assert!(!state.barriers[2].is_intact(0, 0));
        assert!(!state.barriers[2].is_intact(1, 1));
    }

    #[test]
    fn test_invader_touching_player_ends_run() {
        let mut state = playing_state();
        let mut rng = Pcg32::seed_from_u64(1);
        state.formation.invaders[0].pos = state.player.pos;

        resolve_collisions(&mut state, &mut rng);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_misses_leave_everything_intact() {
        let mut state = playing_state();
        let mut rng = Pcg32::seed_from_u64(1);
        state.bullets.push(player_bullet(20.0, 300.0));
        state.enemy_bullets.push(enemy_bullet(20.0, 320.0));

        resolve_collisions(&mut state, &mut rng);

        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.enemy_bullets.len(), 1);
        assert_eq!(state.formation.len(), FORMATION_SIZE);
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, GamePhase::Playing);
    }
}
