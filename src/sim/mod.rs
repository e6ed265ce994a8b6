//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only enters through the per-tick frame delta
//! - Randomness only through the injected `Rng`
//! - Stable iteration order (formation order, spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entities;
pub mod rect;
pub mod state;
pub mod tick;
pub mod wave;

pub use collision::resolve_collisions;
pub use entities::{Barrier, Bullet, BulletOwner, Invader, InvaderKind, Particle, Player, Ufo};
pub use rect::Rect;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
pub use wave::{Formation, March, move_interval, shoot_interval};
