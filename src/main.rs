//! Space Invaders entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement};

    use space_invaders::Session;
    use space_invaders::platform::LocalStore;
    use space_invaders::renderer::CanvasRenderer;
    use space_invaders::ui::{HudStats, Overlay};

    /// Overlay backed by DOM elements toggled with the `hidden` class
    struct DomOverlay {
        document: Document,
    }

    impl DomOverlay {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_visible(&self, id: &str, visible: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let classes = el.class_list();
                let _ = if visible {
                    classes.remove_1("hidden")
                } else {
                    classes.add_1("hidden")
                };
            }
        }
    }

    impl Overlay for DomOverlay {
        fn set_stats(&mut self, stats: &HudStats) {
            self.set_text("score", &stats.score.to_string());
            self.set_text("hi-score", &stats.high_score.to_string());
            self.set_text("lives", &stats.lives.to_string());
            self.set_text("level", &stats.level.to_string());
        }

        fn set_menu_visible(&mut self, visible: bool) {
            self.set_visible("menu", visible);
        }

        fn set_pause_visible(&mut self, visible: bool) {
            self.set_visible("pause-screen", visible);
        }

        fn show_game_over(&mut self, final_score: u32) {
            self.set_text("final-score", &final_score.to_string());
            self.set_visible("game-over", true);
        }

        fn show_level_clear(&mut self, bonus: u32) {
            self.set_text("level-bonus", &bonus.to_string());
            self.set_visible("level-clear", true);
        }

        fn hide_results(&mut self) {
            self.set_visible("game-over", false);
            self.set_visible("level-clear", false);
        }

        fn show_ufo_bonus(&mut self, points: u32) {
            self.set_text("ufo-points", &points.to_string());
            self.set_visible("ufo-bonus", true);
        }

        fn hide_ufo_bonus(&mut self) {
            self.set_visible("ufo-bonus", false);
        }
    }

    /// Game instance holding the session and its canvas
    struct Game {
        session: Session<LocalStore, DomOverlay>,
        renderer: CanvasRenderer,
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Space Invaders starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let renderer = match CanvasRenderer::new(&canvas) {
            Ok(r) => r,
            Err(e) => {
                log::error!("Failed to initialize renderer: {}", e);
                return;
            }
        };

        let seed = js_sys::Date::now() as u64;
        let overlay = DomOverlay {
            document: document.clone(),
        };
        let session = Session::new(LocalStore::open(), overlay, seed);
        let game = Rc::new(RefCell::new(Game { session, renderer }));

        setup_input_handlers(game.clone());
        setup_auto_pause(game.clone());

        log::info!("Starting game loop");
        request_animation_frame(game);
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let code = event.code();
                if game.borrow_mut().session.input_mut().key_down(&code) {
                    // Keep Space and the arrows from scrolling the page
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                game.borrow_mut().session.input_mut().key_up(&event.code());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            let Game { session, renderer } = &mut *g;
            session.frame(time);
            session.render(renderer);
        }

        request_animation_frame(game);
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().session.auto_pause();
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().session.auto_pause();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Space Invaders (native) starting...");
    log::info!("The game runs in the browser - build for wasm32 and serve it with `trunk serve`");

    // Headless smoke run: start a game and let it play untouched for ten seconds
    use space_invaders::Session;
    use space_invaders::platform::MemoryStore;
    use space_invaders::ui::RecordingOverlay;

    let mut session = Session::new(MemoryStore::new(), RecordingOverlay::default(), 0);
    session.input_mut().key_down("Enter");
    for frame in 1..=600 {
        session.frame(frame as f64 * 1000.0 / 60.0);
    }
    let state = session.state();
    log::info!(
        "After 600 frames: phase {:?}, score {}, lives {}, {} invaders left",
        state.phase,
        state.score,
        state.lives,
        state.formation.len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
