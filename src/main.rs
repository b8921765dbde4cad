//! Capsule Invaders entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use capsule_invaders::Settings;
    use capsule_invaders::renderer::CanvasRenderer;
    use capsule_invaders::sim::{InputSnapshot, Session};

    const PLAYER_SHEET: &str = "assets/capsule.png";
    const ENEMY_SHEET: &str = "assets/invader.png";

    /// Game instance holding all state
    struct Game {
        session: Session,
        input: InputSnapshot,
        renderer: CanvasRenderer,
        /// A frame callback is scheduled
        running: bool,
    }

    impl Game {
        /// Run one simulation tick and draw the result
        fn frame(&mut self, now: f64) -> bool {
            let over = self.session.tick(&mut self.input, now);
            self.renderer.begin_frame();
            self.session.render(&mut self.renderer);
            over
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.session.score().to_string()));
            }
            if let Some(el) = document.query_selector("#hud-wave .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.session.wave().to_string()));
            }
        }
    }

    fn now() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    /// Show the game-over overlay with the final score, or hide it
    fn set_game_over_overlay(final_score: Option<u64>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document.get_element_by_id("game-over") {
            let class = if final_score.is_some() { "" } else { "hidden" };
            let _ = el.set_attribute("class", class);
        }
        if let (Some(el), Some(score)) = (document.get_element_by_id("final-score"), final_score) {
            el.set_text_content(Some(&score.to_string()));
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger already set: {e}").into());
        }

        log::info!("Capsule Invaders starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let settings = Settings::default();
        canvas.set_width(settings.playfield.width as u32);
        canvas.set_height(settings.playfield.height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2d context unavailable")?
            .dyn_into()?;
        let renderer = CanvasRenderer::new(
            ctx,
            settings.playfield.width as f64,
            settings.playfield.height as f64,
            PLAYER_SHEET,
            ENEMY_SHEET,
        )?;

        let seed = js_sys::Date::now() as u64;
        let session = Session::new(settings, seed, now()).map_err(|e| e.to_string())?;
        let game = Rc::new(RefCell::new(Game {
            session,
            input: InputSnapshot::default(),
            renderer,
            running: true,
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_keyboard(game.clone())?;
        setup_restart_button(game.clone())?;
        set_game_over_overlay(None);

        request_animation_frame(game);
        log::info!("Capsule Invaders running!");
        Ok(())
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Key down: set intents
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.input.left = true,
                    "ArrowRight" => g.input.right = true,
                    " " => g.input.fire = true,
                    _ => return,
                }
                event.prevent_default();
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up: clear intents
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.input.left = false,
                    "ArrowRight" => g.input.right = false,
                    " " => g.input.fire = false,
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window, game loop stopped");
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
        let final_score = {
            let mut g = game.borrow_mut();
            let over = g.frame(time);
            g.update_hud();
            g.running = !over;
            over.then(|| g.session.score())
        };

        // Stop scheduling frames once the swarm gets through
        if final_score.is_some() {
            set_game_over_overlay(final_score);
            return;
        }
        request_animation_frame(game);
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("no document")?;

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let resume = {
                    let mut g = game.borrow_mut();
                    g.session.restart(now());
                    g.input = InputSnapshot::default();
                    g.update_hud();
                    let resume = !g.running;
                    g.running = true;
                    resume
                };
                set_game_over_overlay(None);
                if resume {
                    request_animation_frame(game.clone());
                }
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    env_logger::init();
    log::info!("Capsule Invaders (native) starting...");
    log::info!("Native mode runs a headless demo - serve the wasm build for the playable version");

    let settings = match std::env::args().nth(1) {
        Some(path) => match load_settings(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Could not load settings from {}: {}", path, e);
                return std::process::ExitCode::FAILURE;
            }
        },
        None => capsule_invaders::Settings::default(),
    };

    match headless_demo(settings) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Demo failed: {}", e);
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn load_settings(path: &str) -> Result<capsule_invaders::Settings, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(capsule_invaders::Settings::from_json(&json)?)
}

/// Autopilot: chase the nearest live enemy and fire every few frames
#[cfg(not(target_arch = "wasm32"))]
fn headless_demo(settings: capsule_invaders::Settings) -> capsule_invaders::Result<()> {
    use capsule_invaders::sim::{InputSnapshot, Session};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_TICKS: u64 = 60 * 60 * 5;
    const FIRE_EVERY: u64 = 6;

    let mut session = Session::new(settings, 2024, 0.0)?;
    let mut input = InputSnapshot::default();
    let mut now = 0.0;

    while session.ticks() < MAX_TICKS {
        let player_x = session.player().body.center_x();
        let target = session
            .enemies()
            .iter()
            .filter(|e| !e.is_hit())
            .map(|e| e.body.center_x())
            .min_by(|a, b| (a - player_x).abs().total_cmp(&(b - player_x).abs()));

        input.left = target.is_some_and(|x| x < player_x - 2.0);
        input.right = target.is_some_and(|x| x > player_x + 2.0);
        input.fire = session.ticks() % FIRE_EVERY == 0;

        if session.tick(&mut input, now) {
            break;
        }
        now += FRAME_MS;
    }

    let outcome = if session.is_game_over() { "invaded" } else { "survived" };
    log::info!(
        "Demo {} after {} ticks: wave {}, score {}",
        outcome,
        session.ticks(),
        session.wave(),
        session.score()
    );
    println!(
        "{outcome}: wave {} score {} ({} ticks)",
        session.wave(),
        session.score(),
        session.ticks()
    );
    Ok(())
}
