//! Entity models and their per-entity update rules
//!
//! Entities are plain data owned by `GameState`. None of them reference each
//! other; cross-entity rules live in `wave` and `collision`.

use glam::Vec2;

use super::rect::Rect;
use crate::consts::*;

/// The player's ship
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    /// Ticks remaining until the next shot is allowed
    pub shoot_cooldown: u32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            shoot_cooldown: 0,
        }
    }

    /// Spawn point for a playfield of the given size
    pub fn spawn_point(screen_width: f32, screen_height: f32) -> Vec2 {
        Vec2::new(screen_width / 2.0, screen_height - PLAYER_SPAWN_OFFSET_Y)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    /// Apply held movement input, keep the ship on screen and tick the cooldown
    pub fn update(&mut self, left: bool, right: bool, screen_width: f32) {
        if left {
            self.pos.x -= PLAYER_SPEED;
        }
        if right {
            self.pos.x += PLAYER_SPEED;
        }
        self.pos.x = self.pos.x.clamp(0.0, (screen_width - PLAYER_WIDTH).max(0.0));

        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
    }

    /// Fire a bullet if the cooldown has elapsed
    pub fn try_shoot(&mut self) -> Option<Bullet> {
        if self.shoot_cooldown > 0 {
            return None;
        }
        self.shoot_cooldown = PLAYER_SHOOT_COOLDOWN;
        Some(Bullet::new(
            Vec2::new(self.pos.x + PLAYER_WIDTH / 2.0, self.pos.y),
            Vec2::new(0.0, -PLAYER_BULLET_SPEED),
            BulletOwner::Player,
        ))
    }
}

/// Invader category, decided by formation row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvaderKind {
    Small,
    Medium,
    /// Top row, shaped like a miniature saucer
    UfoType,
}

impl InvaderKind {
    pub fn for_row(row: usize) -> Self {
        match row {
            0 => InvaderKind::UfoType,
            1 | 2 => InvaderKind::Medium,
            _ => InvaderKind::Small,
        }
    }

    pub fn points(&self) -> u32 {
        match self {
            InvaderKind::Small => 10,
            InvaderKind::Medium => 20,
            InvaderKind::UfoType => 30,
        }
    }
}

/// A member of the invader formation. Movement is commanded by `Formation`.
#[derive(Debug, Clone, PartialEq)]
pub struct Invader {
    pub pos: Vec2,
    pub kind: InvaderKind,
}

impl Invader {
    pub fn new(pos: Vec2, kind: InvaderKind) -> Self {
        Self { pos, kind }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, INVADER_WIDTH, INVADER_HEIGHT)
    }
}

/// A destructible shield made of 10x10 cells
#[derive(Debug, Clone, PartialEq)]
pub struct Barrier {
    pub pos: Vec2,
    /// `cells[row][col]`, true while the cell is intact. Never restored.
    cells: [[bool; BARRIER_COLS]; BARRIER_ROWS],
}

impl Barrier {
    /// Build a barrier centred horizontally on `center_x` with its top at `top`
    pub fn new(center_x: f32, top: f32) -> Self {
        let mut cells = [[true; BARRIER_COLS]; BARRIER_ROWS];
        // Notch in the bottom row
        cells[BARRIER_ROWS - 1][2] = false;
        cells[BARRIER_ROWS - 1][3] = false;

        Self {
            pos: Vec2::new(center_x - BARRIER_WIDTH / 2.0, top),
            cells,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, BARRIER_WIDTH, BARRIER_HEIGHT)
    }

    pub fn is_intact(&self, row: usize, col: usize) -> bool {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }

    pub fn intact_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| **c).count()
    }

    /// Iterate intact cells as (row, col)
    pub fn intact_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cols)| {
            cols.iter()
                .enumerate()
                .filter(|(_, intact)| **intact)
                .map(move |(col, _)| (row, col))
        })
    }

    /// Grid coordinates (col, row) of the cell under a point, unclipped
    fn cell_coords(&self, p: Vec2) -> (i32, i32) {
        let local = (p - self.pos) / BARRIER_CELL;
        (local.x.floor() as i32, local.y.floor() as i32)
    }

    fn in_grid(col: i32, row: i32) -> bool {
        (0..BARRIER_COLS as i32).contains(&col) && (0..BARRIER_ROWS as i32).contains(&row)
    }

    /// True if the point lies within the barrier and the cell under it is intact
    pub fn hit_test(&self, p: Vec2) -> bool {
        if !self.rect().contains_point(p) {
            return false;
        }
        let (col, row) = self.cell_coords(p);
        Self::in_grid(col, row) && self.cells[row as usize][col as usize]
    }

    /// Destroy the 3x3 block of cells centred on the impact point, clipped to
    /// the grid. Returns how many intact cells were destroyed.
    pub fn take_damage(&mut self, impact: Vec2) -> usize {
        let (col, row) = self.cell_coords(impact);
        let mut destroyed = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                let (c, r) = (col + dx, row + dy);
                if !Self::in_grid(c, r) {
                    continue;
                }
                let cell = &mut self.cells[r as usize][c as usize];
                if *cell {
                    *cell = false;
                    destroyed += 1;
                }
            }
        }
        destroyed
    }
}

/// Who fired a bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Enemy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub owner: BulletOwner,
}

impl Bullet {
    pub fn new(pos: Vec2, vel: Vec2, owner: BulletOwner) -> Self {
        Self { pos, vel, owner }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, BULLET_WIDTH, BULLET_HEIGHT)
    }

    /// Move by velocity. Returns false once the bullet has left the vertical bounds.
    pub fn update(&mut self, screen_height: f32) -> bool {
        self.pos += self.vel;
        self.pos.y > -BULLET_CULL_MARGIN && self.pos.y < screen_height + BULLET_CULL_MARGIN
    }
}

/// The bonus mystery ship crossing the top of the screen
#[derive(Debug, Clone, PartialEq)]
pub struct Ufo {
    pub pos: Vec2,
}

impl Default for Ufo {
    fn default() -> Self {
        Self {
            pos: Vec2::new(UFO_SPAWN_X, UFO_SPAWN_Y),
        }
    }
}

impl Ufo {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, UFO_WIDTH, UFO_HEIGHT)
    }

    /// Move right. Returns false once past the right edge.
    pub fn update(&mut self, screen_width: f32) -> bool {
        self.pos.x += UFO_SPEED;
        self.pos.x <= screen_width + UFO_EXIT_MARGIN
    }
}

/// A particle for explosion visuals (no gameplay effect)
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks remaining
    pub life: u32,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            life: PARTICLE_LIFE,
        }
    }

    /// Remaining life as a 0-1 fraction, for fading
    pub fn alpha(&self) -> f32 {
        self.life as f32 / PARTICLE_LIFE as f32
    }

    /// Advance one tick. Returns false once expired.
    pub fn update(&mut self) -> bool {
        self.pos += self.vel;
        self.life = self.life.saturating_sub(1);
        self.life > 0
    }
}
