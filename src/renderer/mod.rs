//! Frame rendering
//!
//! `draw_frame` reads the game state and emits filled rectangles and text
//! through a `Renderer`. It never mutates the simulation. The browser
//! backend is a Canvas2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use shapes::DrawRect;

use crate::settings::Settings;
use crate::sim::{GamePhase, GameState};

/// Color constants (RGBA, 0-1)
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const PLAYER: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const BARRIER: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const INVADER_SMALL: [f32; 4] = [1.0, 0.267, 0.267, 1.0]; // #ff4444
    pub const INVADER_MEDIUM: [f32; 4] = [1.0, 1.0, 0.267, 1.0]; // #ffff44
    pub const INVADER_UFO_TYPE: [f32; 4] = [0.267, 1.0, 0.267, 1.0]; // #44ff44
    pub const UFO: [f32; 4] = [1.0, 0.267, 1.0, 1.0]; // #ff44ff
    pub const PLAYER_BULLET: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const ENEMY_BULLET: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const PARTICLE: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const HIT_FLASH: [f32; 4] = [1.0, 0.267, 0.267, 0.3];
    pub const MENU_TEXT: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
}

/// Drawing surface. Text is centered on `x`.
pub trait Renderer {
    fn clear(&mut self, color: [f32; 4]);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]);
    fn fill_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: [f32; 4]);

    fn draw_rect(&mut self, rect: &DrawRect) {
        self.fill_rect(rect.pos.x, rect.pos.y, rect.size.x, rect.size.y, rect.color);
    }
}

pub const TITLE: &str = "SPACE INVADERS";
pub const START_PROMPT: &str = "Press SPACE to Start";
pub const CONTROLS_HELP: &str = "← → to move, SPACE to fire, P to pause";

/// Draw one frame of `state`
pub fn draw_frame(state: &GameState, settings: &Settings, renderer: &mut impl Renderer) {
    renderer.clear(colors::BACKGROUND);

    if state.phase == GamePhase::Menu {
        draw_menu(state, renderer);
        return;
    }

    if state.flash_timer > 0.0 && settings.effective_screen_flash() {
        renderer.fill_rect(0.0, 0.0, state.width, state.height, colors::HIT_FLASH);
    }

    for rect in shapes::player(&state.player) {
        renderer.draw_rect(&rect);
    }
    for invader in &state.formation.invaders {
        for rect in shapes::invader(invader) {
            renderer.draw_rect(&rect);
        }
    }
    for barrier in &state.barriers {
        for rect in shapes::barrier(barrier) {
            renderer.draw_rect(&rect);
        }
    }
    for bullet in state.bullets.iter().chain(&state.enemy_bullets) {
        renderer.draw_rect(&shapes::bullet(bullet));
    }
    if let Some(ufo) = &state.ufo {
        for rect in shapes::ufo(ufo) {
            renderer.draw_rect(&rect);
        }
    }
    if settings.particles {
        for particle in &state.particles {
            renderer.draw_rect(&shapes::particle(particle));
        }
    }
}

fn draw_menu(state: &GameState, renderer: &mut impl Renderer) {
    let cx = state.width / 2.0;
    let cy = state.height / 2.0;
    renderer.fill_text(TITLE, cx, cy - 100.0, 48.0, colors::MENU_TEXT);
    renderer.fill_text(START_PROMPT, cx, cy + 50.0, 24.0, colors::MENU_TEXT);
    renderer.fill_text(CONTROLS_HELP, cx, cy + 100.0, 16.0, colors::MENU_TEXT);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear([f32; 4]),
    Rect(DrawRect),
    Text { text: String, x: f32, y: f32 },
}

/// Renderer that keeps every call, for tests and headless runs
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub commands: Vec<DrawCommand>,
}

impl RecordingRenderer {
    pub fn rects(&self) -> impl Iterator<Item = &DrawRect> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Rect(r) => Some(r),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self, color: [f32; 4]) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
        self.commands
            .push(DrawCommand::Rect(DrawRect::new(x, y, w, h, color)));
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, _size: f32, _color: [f32; 4]) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
        });
    }
}
