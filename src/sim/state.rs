//! Game state and lifecycle
//!
//! `GameState` is the single owner of every entity. Phase transitions and
//! score/lives/level bookkeeping happen here; the per-frame order lives in `tick`.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::entities::{Barrier, Bullet, Invader, InvaderKind, Particle, Player, Ufo};
use super::wave::Formation;
use crate::consts::*;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Title screen, waiting for start
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Simulation frozen
    Paused,
    /// Run ended; start begins a new run
    GameOver,
    /// Formation destroyed; start begins the next level
    LevelClear,
}

impl GamePhase {
    /// Phases in which the start input begins play
    pub fn accepts_start(&self) -> bool {
        matches!(
            self,
            GamePhase::Menu | GamePhase::GameOver | GamePhase::LevelClear
        )
    }
}

/// Notable things that happened during a tick, drained by the session
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    LevelStarted { level: u32 },
    ScoreChanged { score: u32 },
    HighScoreBeaten { high_score: u32 },
    InvaderDestroyed { kind: InvaderKind, points: u32 },
    UfoSpawned,
    UfoDestroyed { bonus: u32 },
    PlayerHit { lives: u32 },
    LevelCleared { bonus: u32 },
    GameOver { final_score: u32 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Playfield size
    pub width: f32,
    pub height: f32,
    pub phase: GamePhase,
    pub score: u32,
    pub high_score: u32,
    pub lives: u32,
    /// Current level (1-based)
    pub level: u32,
    pub player: Player,
    pub formation: Formation,
    pub barriers: Vec<Barrier>,
    /// Player bullets
    pub bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub ufo: Option<Ufo>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Time accumulated toward the next UFO spawn (ms)
    pub ufo_timer: f32,
    /// Remaining hit flash (ms)
    pub flash_timer: f32,
    /// Simulated ticks in the current level
    pub time_ticks: u64,
    events: Vec<GameEvent>,
}

impl GameState {
    /// A fresh session on the menu screen
    pub fn new(width: f32, height: f32, high_score: u32) -> Self {
        Self {
            width,
            height,
            phase: GamePhase::Menu,
            score: 0,
            high_score,
            lives: STARTING_LIVES,
            level: 1,
            player: Player::new(Player::spawn_point(width, height)),
            formation: Formation::empty(),
            barriers: Vec::new(),
            bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            ufo: None,
            particles: Vec::new(),
            ufo_timer: 0.0,
            flash_timer: 0.0,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events recorded since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from != to {
            self.phase = to;
            self.push_event(GameEvent::PhaseChanged { from, to });
        }
    }

    /// Handle the start input. No-op unless the phase accepts start.
    pub fn start(&mut self) {
        match self.phase {
            GamePhase::GameOver => {
                self.score = 0;
                self.lives = STARTING_LIVES;
                self.level = 1;
                self.push_event(GameEvent::ScoreChanged { score: 0 });
            }
            GamePhase::LevelClear => {
                self.level += 1;
            }
            GamePhase::Menu => {}
            GamePhase::Playing | GamePhase::Paused => return,
        }

        self.spawn_level();
        self.set_phase(GamePhase::Playing);
        self.push_event(GameEvent::LevelStarted { level: self.level });
        log::info!(
            "Level {} started (score {}, lives {})",
            self.level,
            self.score,
            self.lives
        );
    }

    /// Rebuild every entity collection and zero all timers
    pub fn spawn_level(&mut self) {
        self.player = Player::new(Player::spawn_point(self.width, self.height));
        self.formation = Formation::spawn();

        let spacing = self.width / (BARRIER_COUNT as f32 + 1.0);
        let top = self.height - BARRIER_OFFSET_Y;
        self.barriers = (1..=BARRIER_COUNT)
            .map(|i| Barrier::new(spacing * i as f32, top))
            .collect();

        self.bullets.clear();
        self.enemy_bullets.clear();
        self.particles.clear();
        self.ufo = None;

        self.ufo_timer = 0.0;
        self.flash_timer = 0.0;
        self.time_ticks = 0;
    }

    /// Toggle between playing and paused. Other phases ignore the input.
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing => self.set_phase(GamePhase::Paused),
            GamePhase::Paused => self.set_phase(GamePhase::Playing),
            _ => {}
        }
    }

    /// Add points, raising the high score when beaten
    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        self.push_event(GameEvent::ScoreChanged { score: self.score });
        if self.score > self.high_score {
            self.high_score = self.score;
            self.push_event(GameEvent::HighScoreBeaten {
                high_score: self.high_score,
            });
        }
    }

    /// Score an invader and blow it up
    pub fn destroy_invader(&mut self, invader: Invader, rng: &mut impl Rng) {
        let points = invader.kind.points();
        self.add_score(points);
        self.spawn_explosion(invader.rect().center(), rng);
        self.push_event(GameEvent::InvaderDestroyed {
            kind: invader.kind,
            points,
        });
    }

    /// Destroy the UFO (if present) and award a random bonus. Returns the bonus.
    pub fn destroy_ufo(&mut self, rng: &mut impl Rng) -> Option<u32> {
        let ufo = self.ufo.take()?;
        let bonus = UFO_BONUS_MIN + rng.random_range(0..UFO_BONUS_SPREAD);
        self.add_score(bonus);
        self.spawn_explosion(ufo.rect().center(), rng);
        self.push_event(GameEvent::UfoDestroyed { bonus });
        log::info!("UFO destroyed for {} points", bonus);
        Some(bonus)
    }

    /// The player was shot: lose a life, flash, and respawn or end the run
    pub fn player_hit(&mut self, rng: &mut impl Rng) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.lives = self.lives.saturating_sub(1);
        self.flash_timer = FLASH_DURATION_MS;
        self.spawn_explosion(self.player.rect().center(), rng);
        self.push_event(GameEvent::PlayerHit { lives: self.lives });

        if self.lives == 0 {
            self.game_over();
        } else {
            self.player.pos = Player::spawn_point(self.width, self.height);
        }
    }

    /// End the run. Idempotent.
    pub fn game_over(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.set_phase(GamePhase::GameOver);
        self.push_event(GameEvent::GameOver {
            final_score: self.score,
        });
        log::info!("Game over at level {} with score {}", self.level, self.score);
    }

    /// All invaders destroyed: award the per-life bonus
    pub fn level_clear(&mut self) {
        let bonus = self.lives * LEVEL_BONUS_PER_LIFE;
        self.set_phase(GamePhase::LevelClear);
        self.add_score(bonus);
        self.push_event(GameEvent::LevelCleared { bonus });
        log::info!("Level {} cleared, bonus {}", self.level, bonus);
    }

    /// Burst of particles radiating from a point
    pub fn spawn_explosion(&mut self, center: Vec2, rng: &mut impl Rng) {
        for i in 0..EXPLOSION_PARTICLES {
            let angle = i as f32 / EXPLOSION_PARTICLES as f32 * TAU;
            let speed = EXPLOSION_MIN_SPEED + rng.random::<f32>() * EXPLOSION_SPEED_SPREAD;
            let vel = Vec2::new(angle.cos(), angle.sin()) * speed;
            self.particles.push(Particle::new(center, vel));
        }
    }

    /// Y coordinate an invader's bottom edge must reach to land
    pub fn landing_line(&self) -> f32 {
        self.height - INVADER_LANDING_MARGIN
    }
}
