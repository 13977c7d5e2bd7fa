//! Gatehop entry point
//!
//! Web: wires the canvas, score labels, overlay and input events to the game
//! and drives it with requestAnimationFrame.
//! Native: plays one headless autopilot run and reports the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, Element, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent, Window,
    };

    use gatehop::render::{CanvasRenderer, build_scene};
    use gatehop::sim::GamePhase;
    use gatehop::{Frame, FrameHandle, FrameScheduler, Game, GameConfig, GameView};

    type FrameCallback = Closure<dyn FnMut(f64)>;
    type WebGame = Game<RafScheduler, WebView>;

    /// requestAnimationFrame-backed frame driver.
    ///
    /// The callback is installed once the game exists; it only ever holds a
    /// weak reference back to the game.
    struct RafScheduler {
        window: Window,
        callback: Rc<RefCell<Option<FrameCallback>>>,
    }

    impl FrameScheduler for RafScheduler {
        fn request_frame(&mut self) -> Option<FrameHandle> {
            let callback = self.callback.borrow();
            let callback = callback.as_ref()?;
            match self
                .window
                .request_animation_frame(callback.as_ref().unchecked_ref())
            {
                Ok(id) => Some(FrameHandle(id)),
                Err(e) => {
                    log::warn!("requestAnimationFrame failed: {:?}", e);
                    None
                }
            }
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            if let Err(e) = self.window.cancel_animation_frame(handle.0) {
                log::warn!("cancelAnimationFrame failed: {:?}", e);
            }
        }
    }

    /// Canvas + DOM labels + game-over overlay
    struct WebView {
        renderer: CanvasRenderer,
        score_el: Option<Element>,
        best_el: Option<Element>,
        start_btn: Option<Element>,
        overlay: Option<Element>,
        overlay_title: Option<Element>,
        overlay_text: Option<Element>,
    }

    impl WebView {
        fn new(document: &Document, renderer: CanvasRenderer) -> Self {
            Self {
                renderer,
                score_el: document.get_element_by_id("score"),
                best_el: document.get_element_by_id("best"),
                start_btn: document.get_element_by_id("start-btn"),
                overlay: document.get_element_by_id("overlay"),
                overlay_title: document.get_element_by_id("overlay-title"),
                overlay_text: document.get_element_by_id("overlay-text"),
            }
        }
    }

    impl GameView for WebView {
        fn render(&mut self, frame: &Frame<'_>) {
            if let Err(e) = self.renderer.draw(&build_scene(frame)) {
                log::warn!("Render error: {:?}", e);
            }
        }

        fn score_changed(&mut self, score: u32, best: u32) {
            if let Some(el) = &self.score_el {
                el.set_text_content(Some(&score.to_string()));
            }
            if let Some(el) = &self.best_el {
                el.set_text_content(Some(&best.to_string()));
            }
        }

        fn phase_changed(&mut self, phase: GamePhase, _score: u32) {
            match phase {
                GamePhase::Playing => {
                    if let Some(el) = &self.overlay {
                        let _ = el.class_list().add_1("hidden");
                    }
                    if let Some(btn) = &self.start_btn {
                        btn.set_text_content(Some("Restart"));
                    }
                }
                GamePhase::Over => {
                    if let Some(el) = &self.overlay_title {
                        el.set_text_content(Some("Game Over"));
                    }
                    if let Some(el) = &self.overlay_text {
                        el.set_text_content(Some("Click or press space to try again."));
                    }
                    if let Some(el) = &self.overlay {
                        let _ = el.class_list().remove_1("hidden");
                    }
                }
                GamePhase::Idle => {}
            }
        }
    }

    /// Defaults overridden by an optional inline JSON block, sized to the canvas
    fn load_config(document: &Document, width: f32, height: f32) -> GameConfig {
        let base = document
            .get_element_by_id("game-config")
            .and_then(|el| el.text_content())
            .and_then(|json| match GameConfig::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded game config overrides");
                    Some(config)
                }
                Err(e) => {
                    log::warn!("Ignoring game config: {}", e);
                    None
                }
            })
            .unwrap_or_default();

        let config = base.with_playfield(width, height);
        match config.validate() {
            Ok(()) => config,
            Err(e) => {
                log::warn!("Canvas size unusable ({}), using defaults", e);
                GameConfig::default()
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Gatehop starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let config = load_config(&document, canvas.width() as f32, canvas.height() as f32);
        let renderer = CanvasRenderer::new(&canvas).expect("Failed to get 2d context");
        let view = WebView::new(&document, renderer);

        let callback = Rc::new(RefCell::new(None));
        let scheduler = RafScheduler {
            window: window.clone(),
            callback: callback.clone(),
        };

        let seed = js_sys::Date::now() as u64;
        let game: Rc<RefCell<WebGame>> =
            Rc::new(RefCell::new(Game::new(config, seed, scheduler, view)));
        log::info!("Game initialized with seed: {}", seed);

        {
            let game = Rc::downgrade(&game);
            *callback.borrow_mut() = Some(Closure::new(move |_time: f64| {
                if let Some(game) = game.upgrade() {
                    game.borrow_mut().on_frame();
                }
            }));
        }

        setup_input_handlers(&window, &canvas, game.clone());
        setup_start_button(&document, game);

        log::info!("Gatehop ready");
    }

    fn setup_input_handlers(window: &Window, canvas: &HtmlCanvasElement, game: Rc<RefCell<WebGame>>) {
        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                match event.code().as_str() {
                    "Space" | "ArrowUp" => {
                        event.prevent_default();
                        game.borrow_mut().flap();
                    }
                    "KeyI" => {
                        let mut g = game.borrow_mut();
                        let enabled = !g.autopilot();
                        g.set_autopilot(enabled);
                    }
                    _ => {}
                }
            });
            let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().flap();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().flap();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_button(document: &Document, game: Rc<RefCell<WebGame>>) {
        let Some(btn) = document.get_element_by_id("start-btn") else {
            log::warn!("No start button found");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().start();
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use gatehop::sim::GamePhase;
    use gatehop::{Frame, GameView};

    /// Logs score and phase changes; draws nothing
    #[derive(Default)]
    pub struct LogView {
        pub frames: u64,
    }

    impl GameView for LogView {
        fn render(&mut self, _frame: &Frame<'_>) {
            self.frames += 1;
        }

        fn score_changed(&mut self, score: u32, best: u32) {
            log::debug!("Score {} (best {})", score, best);
        }

        fn phase_changed(&mut self, phase: GamePhase, score: u32) {
            log::info!("Phase -> {:?} at score {}", phase, score);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use gatehop::consts::DEFAULT_SEED;
    use gatehop::{Game, GameConfig, ManualScheduler};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // gatehop [seed] [max_ticks]
    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED);
    let max_ticks: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(100_000);

    log::info!("Gatehop (native) headless autopilot run, seed {}", seed);
    log::info!("The playable version runs in the browser - build for wasm32 and serve with `trunk serve`");

    let mut game = Game::new(
        GameConfig::default(),
        seed,
        ManualScheduler::new(),
        headless::LogView::default(),
    );
    game.set_autopilot(true);
    game.start();
    game.pump(max_ticks);

    let outcome = match game.scoreboard().last_score() {
        Some(score) => format!("crashed with score {}", score),
        None => format!("still flying at score {}", game.score()),
    };
    println!(
        "seed {}: {} after {} ticks ({} frames drawn)",
        seed,
        outcome,
        game.run().ticks,
        game.view().frames
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
