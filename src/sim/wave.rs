//! Wave controller
//!
//! Lays out the invader formation and drives it: synchronized lateral steps,
//! descent on edge hits, speed scaling by remaining count and random fire.

use glam::Vec2;
use rand::Rng;

use super::entities::{Bullet, BulletOwner, Invader, InvaderKind};
use crate::consts::*;

/// Lateral direction of the formation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum March {
    #[default]
    Right,
    Left,
}

impl March {
    fn sign(self) -> f32 {
        match self {
            March::Right => 1.0,
            March::Left => -1.0,
        }
    }

    fn reversed(self) -> Self {
        match self {
            March::Right => March::Left,
            March::Left => March::Right,
        }
    }
}

/// The invader grid and its movement/fire timers
#[derive(Debug, Clone)]
pub struct Formation {
    pub invaders: Vec<Invader>,
    pub direction: March,
    /// Time accumulated toward the next step (ms)
    pub move_timer: f32,
    /// Current step interval (ms), shrinks as invaders are destroyed
    pub move_interval: f32,
    /// Time accumulated toward the next shot (ms)
    pub shoot_timer: f32,
}

impl Default for Formation {
    fn default() -> Self {
        Self::empty()
    }
}

impl Formation {
    /// A formation with no invaders (menu screen)
    pub fn empty() -> Self {
        Self {
            invaders: Vec::new(),
            direction: March::Right,
            move_timer: 0.0,
            move_interval: BASE_MOVE_INTERVAL_MS,
            shoot_timer: 0.0,
        }
    }

    /// The full 5x11 starting grid
    pub fn spawn() -> Self {
        let mut invaders = Vec::with_capacity(FORMATION_SIZE);
        for row in 0..FORMATION_ROWS {
            for col in 0..FORMATION_COLS {
                let pos = Vec2::new(
                    FORMATION_ORIGIN_X + col as f32 * FORMATION_SPACING_X,
                    FORMATION_ORIGIN_Y + row as f32 * FORMATION_SPACING_Y,
                );
                invaders.push(Invader::new(pos, InvaderKind::for_row(row)));
            }
        }

        let mut formation = Self {
            invaders,
            ..Self::empty()
        };
        formation.update_speed();
        formation
    }

    pub fn is_empty(&self) -> bool {
        self.invaders.is_empty()
    }

    pub fn len(&self) -> usize {
        self.invaders.len()
    }

    /// Advance timers by `dt_ms`; step the formation and fire when due.
    /// Returns an enemy bullet if one was fired this tick.
    pub fn advance(
        &mut self,
        dt_ms: f32,
        level: u32,
        screen_width: f32,
        rng: &mut impl Rng,
    ) -> Option<Bullet> {
        if self.invaders.is_empty() {
            return None;
        }

        self.move_timer += dt_ms;
        if self.move_timer >= self.move_interval {
            self.step(screen_width);
            self.move_timer = 0.0;
        }

        self.shoot_timer += dt_ms;
        if self.shoot_timer >= shoot_interval(level) {
            self.shoot_timer = 0.0;
            return self.fire(rng);
        }

        None
    }

    /// One movement step: descend and reverse on an edge hit, otherwise slide
    pub fn step(&mut self, screen_width: f32) {
        let right_bound = screen_width - FORMATION_EDGE_MARGIN;
        let hit_edge = self.invaders.iter().any(|inv| match self.direction {
            March::Right => inv.pos.x >= right_bound,
            March::Left => inv.pos.x <= FORMATION_EDGE_MARGIN,
        });

        if hit_edge {
            self.direction = self.direction.reversed();
            for invader in &mut self.invaders {
                invader.pos.y += INVADER_STEP_Y;
            }
            log::debug!("Formation edge hit, now marching {:?}", self.direction);
        } else {
            let dx = self.direction.sign() * INVADER_STEP_X;
            for invader in &mut self.invaders {
                invader.pos.x += dx;
            }
        }

        self.update_speed();
    }

    /// Recompute the step interval from the remaining invader count
    pub fn update_speed(&mut self) {
        self.move_interval = move_interval(self.invaders.len());
    }

    /// Pick a random shooter and spawn a downward bullet from it
    fn fire(&self, rng: &mut impl Rng) -> Option<Bullet> {
        if self.invaders.is_empty() {
            return None;
        }
        let shooter = &self.invaders[rng.random_range(0..self.invaders.len())];
        Some(Bullet::new(
            Vec2::new(shooter.pos.x, shooter.pos.y + ENEMY_BULLET_OFFSET_Y),
            Vec2::new(0.0, ENEMY_BULLET_SPEED),
            BulletOwner::Enemy,
        ))
    }

    /// Lowest bottom edge across the formation
    pub fn lowest_bottom(&self) -> Option<f32> {
        self.invaders
            .iter()
            .map(|inv| inv.rect().bottom())
            .reduce(f32::max)
    }
}

/// Step interval for a given number of remaining invaders (ms)
pub fn move_interval(remaining: usize) -> f32 {
    let factor = (remaining as f32 / FORMATION_SIZE as f32).max(MIN_MOVE_FACTOR);
    BASE_MOVE_INTERVAL_MS * factor
}

/// Enemy fire interval for a level (ms)
pub fn shoot_interval(level: u32) -> f32 {
    (BASE_SHOOT_INTERVAL_MS - level as f32 * SHOOT_INTERVAL_STEP_MS).max(MIN_SHOOT_INTERVAL_MS)
}
