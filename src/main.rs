//! Stealth Arena entry point
//!
//! Handles platform-specific initialization and runs the frame driver.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, KeyboardEvent, MouseEvent};

    use glam::Vec2;
    use stealth_arena::assets::{AssetError, SpriteAtlas, SpriteKind};
    use stealth_arena::platform::InputState;
    use stealth_arena::renderer::{DrawCmd, build_frame};
    use stealth_arena::sim::{GameEvent, GameState, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: InputState,
        atlas: SpriteAtlas,
        ctx: CanvasRenderingContext2d,
        player_img: HtmlImageElement,
        enemy_img: HtmlImageElement,
        /// Set after a draw failure so the log is not flooded every frame
        draw_error_logged: bool,
    }

    impl Game {
        fn frame(&mut self, time: f64) {
            let now_ms = time.max(0.0) as u64;
            let input = self.input.take_tick_input();
            if input.restart {
                log::info!("Restart requested");
            }
            tick(&mut self.state, &input, now_ms);

            for event in self.state.drain_events() {
                if let GameEvent::PlayerDied { score } = event {
                    log::info!("Player died with score {}", score);
                }
            }

            match self.paint(now_ms) {
                Ok(()) => self.draw_error_logged = false,
                Err(e) => {
                    if !self.draw_error_logged {
                        log::warn!("Draw error: {:?}", e);
                        self.draw_error_logged = true;
                    }
                }
            }
        }

        fn image(&self, kind: SpriteKind) -> &HtmlImageElement {
            match kind {
                SpriteKind::Player => &self.player_img,
                SpriteKind::Enemy => &self.enemy_img,
            }
        }

        /// Replay the draw list onto the canvas
        fn paint(&self, now_ms: u64) -> Result<(), JsValue> {
            let ctx = &self.ctx;
            let list = build_frame(&self.state, &self.atlas, now_ms);

            for cmd in list.iter() {
                match cmd {
                    DrawCmd::Clear { width, height } => {
                        ctx.clear_rect(0.0, 0.0, *width as f64, *height as f64);
                    }
                    DrawCmd::Circle {
                        center,
                        radius,
                        color,
                        alpha,
                    } => {
                        ctx.set_global_alpha(*alpha as f64);
                        ctx.set_fill_style_str(color);
                        ctx.begin_path();
                        ctx.arc(
                            center.x as f64,
                            center.y as f64,
                            *radius as f64,
                            0.0,
                            std::f64::consts::TAU,
                        )?;
                        ctx.fill();
                        ctx.set_global_alpha(1.0);
                    }
                    DrawCmd::Sprite {
                        kind,
                        center,
                        offset,
                        size,
                        alpha,
                        scale,
                    } => {
                        ctx.save();
                        ctx.set_global_alpha(*alpha as f64);
                        ctx.translate(center.x as f64, center.y as f64)?;
                        ctx.scale(*scale as f64, *scale as f64)?;
                        ctx.draw_image_with_html_image_element_and_dw_and_dh(
                            self.image(*kind),
                            -*offset as f64,
                            -*offset as f64,
                            *size as f64,
                            *size as f64,
                        )?;
                        ctx.restore();
                    }
                    DrawCmd::Placeholder {
                        center,
                        radius,
                        color,
                        alpha,
                        scale,
                        ..
                    } => {
                        ctx.save();
                        ctx.set_global_alpha(*alpha as f64);
                        ctx.set_fill_style_str(color);
                        ctx.begin_path();
                        ctx.arc(
                            center.x as f64,
                            center.y as f64,
                            (*radius * *scale) as f64,
                            0.0,
                            std::f64::consts::TAU,
                        )?;
                        ctx.fill();
                        ctx.restore();
                    }
                    DrawCmd::Text {
                        text,
                        pos,
                        font,
                        color,
                    } => {
                        ctx.set_fill_style_str(color);
                        ctx.set_font(font);
                        ctx.fill_text(text, pos.x as f64, pos.y as f64)?;
                    }
                }
            }
            Ok(())
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Stealth Arena starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let tuning = stealth_arena::Tuning::default();
        canvas.set_width(tuning.arena_width as u32);
        canvas.set_height(tuning.arena_height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let now_ms = window.performance().map(|p| p.now()).unwrap_or(0.0) as u64;
        let player_img = HtmlImageElement::new().expect("image element");
        let enemy_img = HtmlImageElement::new().expect("image element");

        let game = Rc::new(RefCell::new(Game {
            state: GameState::with_tuning(seed, tuning, now_ms),
            input: InputState::new(),
            atlas: SpriteAtlas::new(),
            ctx,
            player_img: player_img.clone(),
            enemy_img: enemy_img.clone(),
            draw_error_logged: false,
        }));

        log::info!("Game initialized with seed: {}", seed);

        load_sprite(&player_img, SpriteKind::Player, game.clone());
        load_sprite(&enemy_img, SpriteKind::Enemy, game.clone());

        setup_input_handlers(&canvas, game.clone());
        setup_restart_button(game.clone());

        request_animation_frame(game);

        log::info!("Stealth Arena running!");
    }

    /// Start an async image load; the atlas flips to Ready or Failed later
    fn load_sprite(img: &HtmlImageElement, kind: SpriteKind, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let loaded = img.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let (w, h) = (loaded.natural_width(), loaded.natural_height());
                // Failure is already logged and recorded in the atlas
                let _ = game.borrow_mut().atlas.mark_loaded(kind, w, h);
            });
            img.set_onload(Some(closure.as_ref().unchecked_ref()));
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let err = AssetError::LoadFailed {
                    path: kind.path().to_string(),
                };
                game.borrow_mut().atlas.mark_failed(kind, err);
            });
            img.set_onerror(Some(closure.as_ref().unchecked_ref()));
            closure.forget();
        }
        img.set_src(kind.path());
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                let mut g = game.borrow_mut();
                if key == "i" {
                    g.input.autopilot = !g.input.autopilot;
                    log::info!("Autopilot: {}", g.input.autopilot);
                    return;
                }
                g.input.key_down(&key);
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.key());
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click - translate client coordinates by the canvas origin
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                let client = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                let origin = Vec2::new(rect.left() as f32, rect.top() as f32);
                game.borrow_mut().input.click(client, origin);
            });
            let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("restartBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.request_restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("No restart button found");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use stealth_arena::assets::SpriteAtlas;
    use stealth_arena::consts::FRAME_MS;
    use stealth_arena::platform::{Clock, InputState, ManualClock};
    use stealth_arena::renderer::build_frame;
    use stealth_arena::sim::{GameEvent, GameState, tick};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Stealth Arena (native, headless) starting...");

    let seed = env_u64("ARENA_SEED").unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    let frames = env_u64("ARENA_FRAMES").unwrap_or(3600);

    let clock = ManualClock::new(0);
    let mut state = GameState::new(seed, clock.now_ms());
    log::info!("Seed {}, {} frames", seed, frames);
    log::info!("Tuning: {}", serde_json::to_string(&state.tuning)?);

    let atlas = SpriteAtlas::ready();
    let mut input = InputState::new();
    input.autopilot = true;
    let mut draw_commands = 0usize;

    for _ in 0..frames {
        clock.advance(FRAME_MS);
        let now_ms = clock.now_ms();
        tick(&mut state, &input.take_tick_input(), now_ms);

        for event in state.drain_events() {
            match event {
                GameEvent::PlayerDied { score } => log::info!("Player died at {}ms, score {}", now_ms, score),
                GameEvent::PlayerHit { health } => log::debug!("Player hit, health {}", health),
                other => log::trace!("{:?}", other),
            }
        }

        draw_commands += build_frame(&state, &atlas, now_ms).commands.len();
    }

    let summary = serde_json::json!({
        "seed": seed,
        "frames": frames,
        "elapsed_ms": clock.now_ms(),
        "score": state.score,
        "health": state.player.health,
        "enemies": state.enemies.len(),
        "bullets": state.bullets.len(),
        "enemy_bullets": state.enemy_bullets.len(),
        "particles": state.particles.len(),
        "draw_commands": draw_commands,
    });
    log::info!("Run finished: {}", serde_json::to_string(&summary)?);
    Ok(())
}

/// Read a u64 from the environment; unparsable values are ignored with a warning
#[cfg(not(target_arch = "wasm32"))]
fn env_u64(name: &str) -> Option<u64> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("Ignoring {}={:?}: {}", name, raw, e);
            None
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
