//! Sky Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent};

    use sky_dash::platform::assets::load_images;
    use sky_dash::renderer::CanvasRenderer;
    use sky_dash::sim::{Key, Viewport};
    use sky_dash::{Session, Tuning};

    /// Game instance holding all state
    struct Game {
        session: Session,
        renderer: Option<CanvasRenderer>,
        canvas: HtmlCanvasElement,
        /// Whether an animation frame is currently scheduled
        loop_running: bool,
    }

    impl Game {
        fn viewport(&self) -> Viewport {
            Viewport::new(self.canvas.width() as f32, self.canvas.height() as f32)
        }

        /// Match the canvas backing store to the window
        fn fit_canvas(&self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let width = window.inner_width().ok().and_then(|v| v.as_f64());
            let height = window.inner_height().ok().and_then(|v| v.as_f64());
            if let (Some(w), Some(h)) = (width, height) {
                self.canvas.set_width(w as u32);
                self.canvas.set_height(h as u32);
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Sky Dash starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .query_selector("canvas")?
            .ok_or("no canvas")?
            .dyn_into()?;

        let tuning = Tuning::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            session: Session::new(tuning, seed),
            renderer: None,
            canvas: canvas.clone(),
            loop_running: false,
        }));
        game.borrow().fit_canvas();

        let images = {
            let game = game.clone();
            load_images(Rc::new(move || on_asset_done(&game)))?
        };
        game.borrow_mut().renderer = Some(CanvasRenderer::new(&canvas, images)?);

        setup_input_handlers(game.clone())?;
        setup_resize(game.clone())?;
        setup_restart_button(game)?;

        log::info!("Waiting for assets (seed {})", seed);
        Ok(())
    }

    fn on_asset_done(game: &Rc<RefCell<Game>>) {
        let started = {
            let mut g = game.borrow_mut();
            let viewport = g.viewport();
            g.session.asset_loaded(viewport)
        };
        if started {
            set_loading_visible(false);
            start_loop(game.clone());
        }
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_code(&event.code()) {
                    event.prevent_default();
                    game.borrow_mut().session.key_down(key);
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_code(&event.code()) {
                    game.borrow_mut().session.key_up(key);
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_resize(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow().fit_canvas();
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn start_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if g.loop_running {
                return;
            }
            g.loop_running = true;
        }
        request_animation_frame(game);
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_going = {
            let mut g = game.borrow_mut();
            let g = &mut *g;
            let viewport = g.viewport();
            match g.session.frame(viewport, time) {
                Some(frame) => {
                    if let Some(renderer) = g.renderer.as_mut() {
                        renderer.render(&frame.draw);
                    }
                    !frame.is_game_over()
                }
                None => false,
            }
        };

        if keep_going {
            request_animation_frame(game);
        } else {
            game.borrow_mut().loop_running = false;
            set_game_over_visible(true);
        }
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("no document")?;

        if let Some(btn) = document.query_selector(".game-over .btn")? {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                let restarted = {
                    let mut g = game.borrow_mut();
                    let viewport = g.viewport();
                    g.session.restart(seed, viewport)
                };
                if restarted {
                    set_game_over_visible(false);
                    start_loop(game.clone());
                }
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn set_game_over_visible(visible: bool) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Ok(Some(modal)) = document.query_selector(".game-over") {
            let classes = modal.class_list();
            let _ = if visible {
                classes.add_1("show")
            } else {
                classes.remove_1("show")
            };
        }
        if let Some(btn) = document
            .query_selector(".game-over .btn")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            btn.set_hidden(!visible);
        }
    }

    fn set_loading_visible(visible: bool) {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("loading"))
        {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Sky Dash (native) starting...");
    log::info!("Native mode runs a headless demo - use `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(12345);
    headless::run(sky_dash::Tuning::load(), seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted session without a browser: run right, hop once a second
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use sky_dash::consts::{FRAME_MS, HEADLESS_HEIGHT, HEADLESS_WIDTH};
    use sky_dash::sim::{GameEvent, Key, Viewport};
    use sky_dash::{Session, SessionPhase, Tuning};

    /// Two minutes of frames at 60 Hz
    const MAX_FRAMES: u32 = 60 * 120;
    const HOP_EVERY: u32 = 60;

    pub fn run(tuning: Tuning, seed: u64) {
        let viewport = Viewport::new(HEADLESS_WIDTH, HEADLESS_HEIGHT);
        let mut session = Session::new(tuning, seed);
        for _ in 0..session.tuning().asset_count {
            session.asset_loaded(viewport);
        }
        session.key_down(Key::Right);

        for frame in 0..MAX_FRAMES {
            match frame % HOP_EVERY {
                0 => session.key_down(Key::Jump),
                1 => session.key_up(Key::Jump),
                _ => {}
            }
            let Some(out) = session.frame(viewport, frame as f64 * FRAME_MS) else {
                break;
            };
            for event in out.events {
                match event {
                    GameEvent::SpeedUp { distance } => {
                        log::info!("Frame {}: speed-up at distance {}", frame, distance)
                    }
                    GameEvent::GameOver { distance } => {
                        log::info!("Frame {}: game over at distance {}", frame, distance)
                    }
                }
            }
        }

        let Some(state) = session.state() else {
            log::warn!("No game was started");
            return;
        };
        if session.phase() == SessionPhase::Running {
            log::info!("Survived all {} frames", MAX_FRAMES);
        }
        log::info!(
            "Distance {}, platform speed {:.2}, floor speed {:.2}",
            state.difficulty.distance,
            state.difficulty.platform_speed,
            state.difficulty.floor_speed
        );
        match serde_json::to_string(&state.player) {
            Ok(json) => log::debug!("Final player: {}", json),
            Err(e) => log::warn!("Could not snapshot player: {}", e),
        }
    }
}
