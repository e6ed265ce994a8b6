//! Frame driver
//!
//! A `Session` owns one game and everything around it: keyboard state, RNG,
//! persistent store and overlay sink. The host calls `frame` once per
//! rendering callback and `render` right after.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::{MAX_FRAME_DT_MS, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::highscores::HighScore;
use crate::platform::{InputState, KeyValueStore};
use crate::renderer::{Renderer, colors, draw_frame};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, tick};
use crate::ui::{Hud, Overlay};

/// Frames averaged by the FPS counter
const FPS_WINDOW: usize = 60;

/// Rolling FPS over the last `FPS_WINDOW` frame deltas
#[derive(Debug, Clone)]
struct FpsCounter {
    frame_times: [f32; FPS_WINDOW],
    index: usize,
    filled: usize,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; FPS_WINDOW],
            index: 0,
            filled: 0,
        }
    }
}

impl FpsCounter {
    fn push(&mut self, dt_ms: f32) {
        self.frame_times[self.index] = dt_ms;
        self.index = (self.index + 1) % FPS_WINDOW;
        self.filled = (self.filled + 1).min(FPS_WINDOW);
    }

    fn fps(&self) -> u32 {
        let total: f32 = self.frame_times[..self.filled].iter().sum();
        if total <= 0.0 {
            return 0;
        }
        (self.filled as f32 * 1000.0 / total).round() as u32
    }
}

/// One running game with its collaborators
pub struct Session<S: KeyValueStore, O: Overlay> {
    state: GameState,
    input: InputState,
    settings: Settings,
    high_score: HighScore,
    hud: Hud,
    store: S,
    overlay: O,
    rng: Pcg32,
    last_time: Option<f64>,
    fps: FpsCounter,
}

impl<S: KeyValueStore, O: Overlay> Session<S, O> {
    /// Load persisted data and show the menu
    pub fn new(store: S, mut overlay: O, seed: u64) -> Self {
        let high_score = HighScore::load(&store);
        let settings = Settings::load(&store);
        let state = GameState::new(SCREEN_WIDTH, SCREEN_HEIGHT, high_score.value);

        let mut hud = Hud::new();
        hud.init(&state, &mut overlay);

        log::info!("Session ready (seed {})", seed);

        Self {
            state,
            input: InputState::new(),
            settings,
            high_score,
            hud,
            store,
            overlay,
            rng: Pcg32::seed_from_u64(seed),
            last_time: None,
            fps: FpsCounter::default(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// End the session, handing back the store
    pub fn into_store(self) -> S {
        self.store
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings and persist them
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.settings.save(&mut self.store);
    }

    pub fn high_score(&self) -> u32 {
        self.high_score.value
    }

    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn fps(&self) -> u32 {
        self.fps.fps()
    }

    /// Pause if a run is in progress (window blur, tab hidden)
    pub fn auto_pause(&mut self) {
        self.input.release_all();
        if self.state.phase == GamePhase::Playing {
            self.input.request_pause();
            log::info!("Auto-paused");
        }
    }

    /// Run one tick for a rendering callback at `now_ms`
    pub fn frame(&mut self, now_ms: f64) {
        let elapsed = (now_ms - self.last_time.unwrap_or(0.0)).max(0.0) as f32;
        self.last_time = Some(now_ms);
        // FPS sees real frame time, the simulation a clamped step
        self.fps.push(elapsed);
        let dt_ms = elapsed.min(MAX_FRAME_DT_MS);

        let input = self.input.snapshot();
        tick(&mut self.state, &input, dt_ms, &mut self.rng);

        let events = self.state.drain_events();
        self.hud.sync(&self.state, &events, &mut self.overlay);
        for event in &events {
            if let GameEvent::HighScoreBeaten { high_score } = *event {
                if self.high_score.record(high_score) {
                    self.high_score.save(&mut self.store);
                }
            }
        }
        self.hud.advance(dt_ms, &mut self.overlay);
    }

    /// Draw the current frame
    pub fn render(&self, renderer: &mut impl Renderer) {
        draw_frame(&self.state, &self.settings, renderer);
        if self.settings.show_fps {
            let text = format!("FPS: {}", self.fps());
            renderer.fill_text(&text, self.state.width - 50.0, 20.0, 14.0, colors::MENU_TEXT);
        }
    }
}
