//! Space Invaders - a retro arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, formation, collisions, game state)
//! - `renderer`: Frame composition over a narrow draw interface (Canvas2D on web)
//! - `platform`: Keyboard input and persistent key/value storage
//! - `session`: Frame driver tying simulation, input, storage and overlays together
//! - `ui`: HUD and overlay notifications

pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod ui;

pub use highscores::HighScore;
pub use session::Session;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Default playfield dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Longest frame delta fed to the simulation (ms)
    pub const MAX_FRAME_DT_MS: f32 = 100.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 20.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Distance of the player spawn point above the bottom edge
    pub const PLAYER_SPAWN_OFFSET_Y: f32 = 60.0;
    /// Ticks between player shots
    pub const PLAYER_SHOOT_COOLDOWN: u32 = 10;
    pub const STARTING_LIVES: u32 = 3;

    /// Bullets
    pub const BULLET_WIDTH: f32 = 3.0;
    pub const BULLET_HEIGHT: f32 = 8.0;
    pub const PLAYER_BULLET_SPEED: f32 = 7.0;
    pub const ENEMY_BULLET_SPEED: f32 = 3.0;
    /// Bullets are dropped once this far outside the vertical bounds
    pub const BULLET_CULL_MARGIN: f32 = 20.0;

    /// Invader formation
    pub const INVADER_WIDTH: f32 = 30.0;
    pub const INVADER_HEIGHT: f32 = 20.0;
    pub const FORMATION_ROWS: usize = 5;
    pub const FORMATION_COLS: usize = 11;
    pub const FORMATION_SIZE: usize = FORMATION_ROWS * FORMATION_COLS;
    pub const FORMATION_ORIGIN_X: f32 = 100.0;
    pub const FORMATION_ORIGIN_Y: f32 = 100.0;
    pub const FORMATION_SPACING_X: f32 = 50.0;
    pub const FORMATION_SPACING_Y: f32 = 40.0;
    /// Horizontal step per move tick
    pub const INVADER_STEP_X: f32 = 25.0;
    /// Descent on edge hit
    pub const INVADER_STEP_Y: f32 = 20.0;
    /// Invaders turn around when this close to either side
    pub const FORMATION_EDGE_MARGIN: f32 = 50.0;
    /// Game over once an invader's bottom edge is this close to the bottom
    pub const INVADER_LANDING_MARGIN: f32 = 100.0;
    /// Enemy bullets spawn this far below the shooter's top edge
    pub const ENEMY_BULLET_OFFSET_Y: f32 = 20.0;

    /// Formation timing (ms)
    pub const BASE_MOVE_INTERVAL_MS: f32 = 1000.0;
    /// Fastest the formation may move, as a fraction of the base interval
    pub const MIN_MOVE_FACTOR: f32 = 0.3;
    pub const BASE_SHOOT_INTERVAL_MS: f32 = 2000.0;
    pub const SHOOT_INTERVAL_STEP_MS: f32 = 100.0;
    pub const MIN_SHOOT_INTERVAL_MS: f32 = 500.0;

    /// Barriers
    pub const BARRIER_COUNT: usize = 4;
    pub const BARRIER_WIDTH: f32 = 60.0;
    pub const BARRIER_HEIGHT: f32 = 40.0;
    pub const BARRIER_ROWS: usize = 4;
    pub const BARRIER_COLS: usize = 6;
    pub const BARRIER_CELL: f32 = 10.0;
    /// Barrier top edge above the bottom of the screen
    pub const BARRIER_OFFSET_Y: f32 = 200.0;

    /// Mystery ship
    pub const UFO_WIDTH: f32 = 40.0;
    pub const UFO_HEIGHT: f32 = 20.0;
    pub const UFO_SPEED: f32 = 2.0;
    pub const UFO_SPAWN_X: f32 = -50.0;
    pub const UFO_SPAWN_Y: f32 = 50.0;
    /// Despawn once this far past the right edge
    pub const UFO_EXIT_MARGIN: f32 = 50.0;
    pub const UFO_SPAWN_INTERVAL_MS: f32 = 20_000.0;
    pub const UFO_BONUS_MIN: u32 = 100;
    /// Exclusive upper bound of the random part of the UFO bonus
    pub const UFO_BONUS_SPREAD: u32 = 400;
    pub const UFO_BONUS_DISPLAY_MS: f32 = 2000.0;

    /// Particles
    pub const PARTICLE_LIFE: u32 = 30;
    pub const EXPLOSION_PARTICLES: usize = 8;
    pub const EXPLOSION_MIN_SPEED: f32 = 2.0;
    pub const EXPLOSION_SPEED_SPREAD: f32 = 3.0;

    /// Effects and scoring
    pub const FLASH_DURATION_MS: f32 = 500.0;
    pub const LEVEL_BONUS_PER_LIFE: u32 = 100;
}
