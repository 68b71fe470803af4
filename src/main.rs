//! Duel Pong entry point
//!
//! On the web: builds the canvas, wires input and runs the frame loop.
//! Natively: plays a headless match with the autopilot and prints a summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use duel_pong::consts::*;
    use duel_pong::input::pointer_to_paddle_x;
    use duel_pong::renderer::FieldRenderState;
    use duel_pong::sim::{Autopilot, Side};
    use duel_pong::{DevicePreset, FrameOutcome, FrameScheduler, Settings};

    /// Game instance holding all state
    struct Game {
        scheduler: FrameScheduler,
        render_state: Option<FieldRenderState>,
        settings: Settings,
        canvas: HtmlCanvasElement,
        /// Game-over overlay while it is shown
        overlay: Option<Element>,
        /// Idle/demo mode: the autopilot steers the player paddle
        autopilot: Option<Autopilot>,
    }

    impl Game {
        /// Translate a pointer position and feed the input port
        fn pointer_moved(&mut self, client_x: f32) {
            let rect = self.canvas.get_bounding_client_rect();
            let x = pointer_to_paddle_x(client_x, rect.left() as f32, rect.width() as f32);
            self.scheduler.set_player_paddle_x(x);
            if self.settings.hide_cursor {
                let _ = self.canvas.style().set_property("cursor", "none");
            }
        }

        /// Draw and step one frame
        fn frame(&mut self) -> FrameOutcome {
            if let Some(pilot) = self.autopilot.as_mut() {
                let x = pilot.target_x(self.scheduler.state());
                self.scheduler.set_player_paddle_x(x);
            }
            match self.render_state.as_mut() {
                Some(render_state) => self.scheduler.run_frame(render_state),
                None => self.scheduler.step(),
            }
        }
    }

    /// Pick the preset for the next match (read once per match)
    fn detect_preset(settings: &Settings) -> DevicePreset {
        if let Some(preset) = settings.preset_override {
            return preset;
        }
        let Some(window) = web_sys::window() else {
            return DevicePreset::default();
        };
        match window.match_media(&settings.compact_media_query()) {
            Ok(Some(query)) if query.matches() => DevicePreset::Compact,
            Ok(Some(_)) => DevicePreset::Standard,
            _ => {
                let width = window
                    .inner_width()
                    .ok()
                    .and_then(|w| w.as_f64())
                    .unwrap_or(f64::from(FIELD_WIDTH) * 2.0);
                settings.resolve_preset(width)
            }
        }
    }

    fn create_canvas(document: &Document, dpr: f64) -> Result<HtmlCanvasElement, JsValue> {
        let canvas: HtmlCanvasElement = document
            .create_element("canvas")?
            .dyn_into()
            .map_err(JsValue::from)?;
        canvas.set_id("canvas");
        canvas.set_width((f64::from(FIELD_WIDTH) * dpr) as u32);
        canvas.set_height((f64::from(FIELD_HEIGHT) * dpr) as u32);

        let style = canvas.style();
        style.set_property("width", &format!("{}px", FIELD_WIDTH))?;
        style.set_property("max-width", "100%")?;
        style.set_property("aspect-ratio", &format!("{} / {}", FIELD_WIDTH, FIELD_HEIGHT))?;
        Ok(canvas)
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialised".into());
        }

        log::info!("Duel Pong starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };
        let Some(body) = document.body() else {
            log::error!("No body");
            return;
        };

        let canvas = match create_canvas(&document, window.device_pixel_ratio()) {
            Ok(canvas) => canvas,
            Err(e) => {
                log::error!("Failed to create canvas: {:?}", e);
                return;
            }
        };
        if let Err(e) = body.append_child(&canvas) {
            log::error!("Failed to attach canvas: {:?}", e);
            return;
        }

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {}", e);
                return;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state =
            match FieldRenderState::new(surface, &adapter, canvas.width(), canvas.height()).await {
                Ok(render_state) => render_state,
                Err(e) => {
                    log::error!("Failed to create device: {}", e);
                    return;
                }
            };

        let settings = Settings::load();
        let preset = detect_preset(&settings);

        let game = Rc::new(RefCell::new(Game {
            scheduler: FrameScheduler::new(),
            render_state: Some(render_state),
            settings,
            canvas: canvas.clone(),
            overlay: None,
            autopilot: None,
        }));
        game.borrow_mut().scheduler.start_match(preset);

        setup_input_handlers(&canvas, game.clone());
        setup_keyboard(game.clone());

        request_animation_frame(game);

        log::info!("Duel Pong running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().pointer_moved(event.client_x() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    game.borrow_mut().pointer_moved(touch.client_x() as f32);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut g = game.borrow_mut();
            match event.key().as_str() {
                "i" | "I" => {
                    g.autopilot = match g.autopilot.take() {
                        Some(_) => None,
                        None => Some(Autopilot::new(js_sys::Date::now() as u64)),
                    };
                    log::info!("Idle mode: {}", g.autopilot.is_some());
                }
                "p" | "P" => {
                    let preset = g.settings.cycle_preset_override();
                    g.settings.save();
                    log::info!(
                        "Preset override: {} (applies next match)",
                        preset.map(|p| p.as_str()).unwrap_or("Auto")
                    );
                }
                _ => {}
            }
        });
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let outcome = game.borrow_mut().frame();
        match outcome {
            FrameOutcome::Continue => request_animation_frame(game),
            FrameOutcome::MatchOver(winner) => show_game_over(game, winner),
            FrameOutcome::Halted => {}
        }
    }

    fn build_game_over(document: &Document, winner: Side) -> Result<(Element, Element), JsValue> {
        let container = document.create_element("div")?;
        container.class_list().add_1("game-over-container")?;

        let title = document.create_element("h1")?;
        title.set_text_content(Some(&format!("{} Wins!", winner.label())));

        let button = document.create_element("button")?;
        button.set_text_content(Some("Play Again"));

        container.append_child(&title)?;
        container.append_child(&button)?;
        Ok((container, button))
    }

    /// Hide the playfield and offer a rematch
    fn show_game_over(game: Rc<RefCell<Game>>, winner: Side) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let (container, button) = match build_game_over(&document, winner) {
            Ok(parts) => parts,
            Err(e) => {
                log::error!("Failed to build game-over screen: {:?}", e);
                return;
            }
        };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                rematch(game.clone());
            });
            let _ =
                button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let mut g = game.borrow_mut();
        g.canvas.set_hidden(true);
        if let Some(body) = document.body() {
            let _ = body.append_child(&container);
        }
        g.overlay = Some(container);
    }

    /// "Play Again": restore the playfield and restart the loop
    fn rematch(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            let preset = detect_preset(&g.settings);
            if !g.scheduler.request_rematch(preset).success {
                return;
            }
            if let Some(overlay) = g.overlay.take() {
                overlay.remove();
            }
            g.canvas.set_hidden(false);
        }
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use serde::Serialize;

    use duel_pong::renderer::RenderSink;
    use duel_pong::sim::{Autopilot, GeometryState};
    use duel_pong::{DevicePreset, FrameScheduler};

    /// Upper bound so a stalemate can't spin forever
    const MAX_FRAMES: u64 = 2_000_000;

    /// Stands in for the display: logs the field every few seconds of play
    #[derive(Default)]
    struct TraceSink {
        frames: u64,
    }

    impl RenderSink for TraceSink {
        fn render(&mut self, state: &GeometryState) {
            self.frames += 1;
            if self.frames % 600 == 0 {
                log::trace!(
                    "frame {}: ball ({:.1}, {:.1}) vel ({:.2}, {:.2}) paddles {:.1}/{:.1}",
                    self.frames,
                    state.ball.pos.x,
                    state.ball.pos.y,
                    state.velocity.x,
                    state.velocity.y,
                    state.player_paddle.x,
                    state.opponent_paddle.x
                );
            }
        }
    }

    #[derive(Debug, Serialize)]
    struct MatchSummary {
        seed: u64,
        preset: DevicePreset,
        winner: Option<&'static str>,
        player: u32,
        opponent: u32,
        frames: u64,
    }

    pub fn run(seed: u64, preset: DevicePreset) {
        let mut scheduler = FrameScheduler::new();
        let mut sink = TraceSink::default();
        let mut pilot = Autopilot::new(seed);

        scheduler.start_match(preset);
        let winner = scheduler.run_until_over(&mut sink, MAX_FRAMES, |s| {
            let x = pilot.target_x(s.state());
            s.set_player_paddle_x(x);
        });

        let summary = MatchSummary {
            seed,
            preset,
            winner: winner.map(|w| w.label()),
            player: scheduler.state().scores.player,
            opponent: scheduler.state().scores.opponent,
            frames: scheduler.frames(),
        };
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Could not serialize summary: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use duel_pong::{DevicePreset, Settings};

    env_logger::init();
    log::info!("Duel Pong (native) starting headless autopilot match...");
    log::info!("Run with `trunk serve` for the playable web version");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5eed);
    let preset = args
        .next()
        .and_then(|s| DevicePreset::from_str(&s))
        .unwrap_or_else(|| Settings::load().resolve_preset(1280.0));

    headless::run(seed, preset);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
