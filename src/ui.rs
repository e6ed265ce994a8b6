//! HUD and overlay notifications
//!
//! The simulation never touches the page. `Hud` turns drained `GameEvent`s
//! and state changes into calls on an `Overlay` sink (the DOM on the web).

use crate::consts::UFO_BONUS_DISPLAY_MS;
use crate::sim::{GameEvent, GamePhase, GameState};

/// Numbers shown in the HUD bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudStats {
    pub score: u32,
    pub high_score: u32,
    pub lives: u32,
    pub level: u32,
}

impl HudStats {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: state.score,
            high_score: state.high_score,
            lives: state.lives,
            level: state.level,
        }
    }
}

/// Screen overlays outside the canvas
pub trait Overlay {
    fn set_stats(&mut self, stats: &HudStats);
    fn set_menu_visible(&mut self, visible: bool);
    fn set_pause_visible(&mut self, visible: bool);
    fn show_game_over(&mut self, final_score: u32);
    fn show_level_clear(&mut self, bonus: u32);
    /// Hide both the game-over and level-clear panels
    fn hide_results(&mut self);
    fn show_ufo_bonus(&mut self, points: u32);
    fn hide_ufo_bonus(&mut self);
}

/// Keeps the overlay in step with the game
#[derive(Debug, Clone, Default)]
pub struct Hud {
    last_stats: Option<HudStats>,
    /// Remaining UFO bonus display time (ms)
    ufo_bonus_timer: f32,
}

impl Hud {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial overlay state for a fresh session
    pub fn init(&mut self, state: &GameState, overlay: &mut impl Overlay) {
        overlay.set_menu_visible(state.phase == GamePhase::Menu);
        overlay.set_pause_visible(false);
        overlay.hide_results();
        overlay.hide_ufo_bonus();
        self.ufo_bonus_timer = 0.0;
        self.push_stats(state, overlay);
    }

    /// Apply one frame's events, then refresh stats if anything moved
    pub fn sync(&mut self, state: &GameState, events: &[GameEvent], overlay: &mut impl Overlay) {
        for event in events {
            match *event {
                GameEvent::PhaseChanged { from, to } => match to {
                    GamePhase::Playing if from.accepts_start() => {
                        overlay.set_menu_visible(false);
                        overlay.hide_results();
                        overlay.set_pause_visible(false);
                    }
                    GamePhase::Playing => overlay.set_pause_visible(false),
                    GamePhase::Paused => overlay.set_pause_visible(true),
                    GamePhase::Menu | GamePhase::GameOver | GamePhase::LevelClear => {}
                },
                GameEvent::GameOver { final_score } => overlay.show_game_over(final_score),
                GameEvent::LevelCleared { bonus } => overlay.show_level_clear(bonus),
                GameEvent::UfoDestroyed { bonus } => {
                    overlay.show_ufo_bonus(bonus);
                    self.ufo_bonus_timer = UFO_BONUS_DISPLAY_MS;
                }
                _ => {}
            }
        }

        self.push_stats(state, overlay);
    }

    /// Count down the UFO bonus popup by frame time
    pub fn advance(&mut self, dt_ms: f32, overlay: &mut impl Overlay) {
        if self.ufo_bonus_timer <= 0.0 {
            return;
        }
        self.ufo_bonus_timer -= dt_ms;
        if self.ufo_bonus_timer <= 0.0 {
            self.ufo_bonus_timer = 0.0;
            overlay.hide_ufo_bonus();
        }
    }

    pub fn ufo_bonus_visible(&self) -> bool {
        self.ufo_bonus_timer > 0.0
    }

    fn push_stats(&mut self, state: &GameState, overlay: &mut impl Overlay) {
        let stats = HudStats::from_state(state);
        if self.last_stats != Some(stats) {
            overlay.set_stats(&stats);
            self.last_stats = Some(stats);
        }
    }
}

/// Overlay that records calls, for tests and headless runs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingOverlay {
    pub stats: Option<HudStats>,
    pub stats_updates: usize,
    pub menu_visible: bool,
    pub pause_visible: bool,
    pub game_over: Option<u32>,
    pub level_clear: Option<u32>,
    pub ufo_bonus: Option<u32>,
}

impl Overlay for RecordingOverlay {
    fn set_stats(&mut self, stats: &HudStats) {
        self.stats = Some(*stats);
        self.stats_updates += 1;
    }

    fn set_menu_visible(&mut self, visible: bool) {
        self.menu_visible = visible;
    }

    fn set_pause_visible(&mut self, visible: bool) {
        self.pause_visible = visible;
    }

    fn show_game_over(&mut self, final_score: u32) {
        self.game_over = Some(final_score);
    }

    fn show_level_clear(&mut self, bonus: u32) {
        self.level_clear = Some(bonus);
    }

    fn hide_results(&mut self) {
        self.game_over = None;
        self.level_clear = None;
    }

    fn show_ufo_bonus(&mut self, points: u32) {
        self.ufo_bonus = Some(points);
    }

    fn hide_ufo_bonus(&mut self) {
        self.ufo_bonus = None;
    }
}
