//! Shape generation for entities
//!
//! Every sprite is a handful of filled rectangles, positioned relative to the
//! entity's top-left corner.

use glam::Vec2;

use super::colors;
use crate::consts::{BARRIER_CELL, PLAYER_WIDTH};
use crate::sim::{Barrier, Bullet, BulletOwner, Invader, InvaderKind, Particle, Player, Ufo};

/// Size of a particle dot
const PARTICLE_SIZE: f32 = 2.0;

/// A filled rectangle in screen space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRect {
    pub pos: Vec2,
    pub size: Vec2,
    pub color: [f32; 4],
}

impl DrawRect {
    pub fn new(x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
            color,
        }
    }
}

/// Offset a list of (x, y, w, h) parts by `origin`
fn parts(origin: Vec2, parts: &[(f32, f32, f32, f32)], color: [f32; 4]) -> Vec<DrawRect> {
    parts
        .iter()
        .map(|&(x, y, w, h)| DrawRect::new(origin.x + x, origin.y + y, w, h, color))
        .collect()
}

/// Turret on a wide base
pub fn player(player: &Player) -> Vec<DrawRect> {
    parts(
        player.pos,
        &[(15.0, 0.0, 10.0, 15.0), (0.0, 15.0, PLAYER_WIDTH, 5.0)],
        colors::PLAYER,
    )
}

pub fn invader_color(kind: InvaderKind) -> [f32; 4] {
    match kind {
        InvaderKind::Small => colors::INVADER_SMALL,
        InvaderKind::Medium => colors::INVADER_MEDIUM,
        InvaderKind::UfoType => colors::INVADER_UFO_TYPE,
    }
}

pub fn invader(invader: &Invader) -> Vec<DrawRect> {
    let color = invader_color(invader.kind);
    match invader.kind {
        // Round saucer silhouette
        InvaderKind::UfoType => parts(
            invader.pos,
            &[(5.0, 5.0, 20.0, 10.0), (10.0, 0.0, 10.0, 20.0)],
            color,
        ),
        InvaderKind::Small | InvaderKind::Medium => parts(
            invader.pos,
            &[
                (0.0, 5.0, 30.0, 10.0),
                (5.0, 0.0, 20.0, 5.0),
                (10.0, 15.0, 10.0, 5.0),
            ],
            color,
        ),
    }
}

/// One square per intact cell
pub fn barrier(barrier: &Barrier) -> Vec<DrawRect> {
    barrier
        .intact_cells()
        .map(|(row, col)| {
            DrawRect::new(
                barrier.pos.x + col as f32 * BARRIER_CELL,
                barrier.pos.y + row as f32 * BARRIER_CELL,
                BARRIER_CELL,
                BARRIER_CELL,
                colors::BARRIER,
            )
        })
        .collect()
}

pub fn bullet(bullet: &Bullet) -> DrawRect {
    let rect = bullet.rect();
    let color = match bullet.owner {
        BulletOwner::Player => colors::PLAYER_BULLET,
        BulletOwner::Enemy => colors::ENEMY_BULLET,
    };
    DrawRect {
        pos: rect.pos,
        size: rect.size,
        color,
    }
}

pub fn ufo(ufo: &Ufo) -> Vec<DrawRect> {
    parts(
        ufo.pos,
        &[
            (5.0, 5.0, 30.0, 10.0),
            (10.0, 0.0, 20.0, 5.0),
            (15.0, 15.0, 10.0, 5.0),
        ],
        colors::UFO,
    )
}

/// Dot fading out with remaining life
pub fn particle(particle: &Particle) -> DrawRect {
    let mut color = colors::PARTICLE;
    color[3] = particle.alpha();
    DrawRect::new(
        particle.pos.x,
        particle.pos.y,
        PARTICLE_SIZE,
        PARTICLE_SIZE,
        color,
    )
}
