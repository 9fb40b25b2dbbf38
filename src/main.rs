//! Rock Raft entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{EventTarget, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use glam::Vec2;
    use rock_raft::audio::{MUSIC_URL, MusicPlayer};
    use rock_raft::platform::{AssetGate, Direction, InputEvent, Key};
    use rock_raft::renderer::{RenderState, scene};
    use rock_raft::ui::{GameOverLayout, Label};
    use rock_raft::{Driver, Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        driver: Driver,
        render_state: Option<RenderState>,
        music: MusicPlayer,
        settings: Settings,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(driver: Driver, settings: Settings) -> Self {
            let music = MusicPlayer::new(MUSIC_URL);
            music.set_volume(settings.effective_music_volume());
            Self {
                driver,
                render_state: None,
                music,
                settings,
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Feed one input event and act on any music change right away
        /// (playback must start inside the gesture handler)
        fn input(&mut self, event: InputEvent) {
            self.driver.handle_input(event);
            self.apply_music();
        }

        fn apply_music(&mut self) {
            for command in self.driver.soundtrack.drain_commands() {
                self.music.apply(command);
            }
        }

        fn toggle_mute(&mut self) {
            self.settings.muted = !self.settings.muted;
            self.music.set_volume(self.settings.effective_music_volume());
            self.settings.save();
            log::info!("Music muted: {}", self.settings.muted);
        }

        fn toggle_fps(&mut self) {
            self.settings.show_fps = !self.settings.show_fps;
            self.settings.save();
        }

        /// Advance the driver by the time since the previous frame
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                time - self.last_time
            } else {
                0.0
            };
            self.last_time = time;

            for event in self.driver.frame(dt) {
                log::debug!("{:?}", event);
            }
            self.apply_music();

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = scene::build(&self.driver.state, self.driver.tuning());
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let state = &self.driver.state;

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&state.score.to_string()));
            }

            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "hud-item");
                    if let Some(val) = document.query_selector("#hud-fps .hud-value").ok().flatten()
                    {
                        val.set_text_content(Some(&self.fps.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hud-item hidden");
                }
            }

            if let Some(el) = document.get_element_by_id("game-over") {
                if state.is_game_over() {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&state.score.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Rock Raft starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element");
            return;
        };

        let tuning = Tuning::default();
        if let Err(err) = tuning.validate() {
            log::error!("Invalid tuning: {}", err);
            return;
        }

        // Backing store matches the field aspect, scaled for the display
        let dpr = window.device_pixel_ratio();
        let width = (f64::from(tuning.field_width) * dpr) as u32;
        let height = (f64::from(tuning.field_height) * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let field = (tuning.field_width, tuning.field_height);
        let seed = js_sys::Date::now() as u64;
        let driver = Driver::new(tuning, seed, AssetGate::new(["renderer"]));
        let game = Rc::new(RefCell::new(Game::new(driver, Settings::load())));

        setup_music_loading(&game.borrow().music);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(err) => {
                log::error!("Failed to create surface: {}", err);
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
            Err(err) => {
                log::error!("Failed to get adapter: {}", err);
                return;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height, field).await {
            Ok(render_state) => {
                let mut g = game.borrow_mut();
                g.render_state = Some(render_state);
                g.driver.mark_asset_loaded("renderer");
            }
            Err(err) => {
                log::error!("Failed to create device: {}", err);
                return;
            }
        }

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        place_labels(&document, game.borrow().driver.layout(), field);

        setup_keyboard(&window, game.clone());
        setup_canvas_taps(&canvas, field, game.clone());
        setup_arrow_buttons(&document, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Rock Raft running!");
    }

    /// Pin the HUD text over the canvas where the overlay shapes are drawn
    fn place_labels(document: &web_sys::Document, layout: &GameOverLayout, field: (f32, f32)) {
        let field = Vec2::new(field.0, field.1);
        for label in std::iter::once(Label::score()).chain(layout.labels()) {
            match document.get_element_by_id(label.element_id) {
                Some(el) => {
                    let _ = el.set_attribute("style", &label.css(field));
                }
                None => log::warn!("Missing #{} label", label.element_id),
            }
        }
    }

    /// Attach a listener that lives for the rest of the page
    fn listen(target: &EventTarget, kind: &str, handler: impl FnMut(web_sys::Event) + 'static) {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
        let _ = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Music streams in on its own and never holds up the game; it only
    /// matters once a gesture unlocks playback
    fn setup_music_loading(music: &MusicPlayer) {
        let Some(element) = music.element() else {
            return;
        };

        listen(element, "canplaythrough", |_event| {
            log::info!("Music ready: {}", MUSIC_URL);
        });
        listen(element, "error", |_event| {
            log::warn!("Failed to load {} - playing without music", MUSIC_URL);
        });
    }

    fn setup_keyboard(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            listen(window, "keydown", move |event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let code = event.code();
                let key = Key::from_code(&code);
                if key != Key::Other {
                    event.prevent_default();
                }

                let mut g = game.borrow_mut();
                match code.as_str() {
                    "KeyM" => g.toggle_mute(),
                    "KeyF" => g.toggle_fps(),
                    _ => {}
                }
                g.input(InputEvent::KeyDown(key));
            });
        }

        listen(window, "keyup", move |event| {
            if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                game.borrow_mut()
                    .input(InputEvent::KeyUp(Key::from_code(&event.code())));
            }
        });
    }

    /// Map a point in CSS pixels relative to the canvas into field coordinates
    fn to_field(canvas: &HtmlCanvasElement, field: (f32, f32), x: f32, y: f32) -> Vec2 {
        let w = canvas.client_width().max(1) as f32;
        let h = canvas.client_height().max(1) as f32;
        Vec2::new(x * field.0 / w, y * field.1 / h)
    }

    fn setup_canvas_taps(canvas: &HtmlCanvasElement, field: (f32, f32), game: Rc<RefCell<Game>>) {
        // Mouse click
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            listen(canvas, "click", move |event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    let point = to_field(
                        &canvas_clone,
                        field,
                        event.offset_x() as f32,
                        event.offset_y() as f32,
                    );
                    game.borrow_mut().input(InputEvent::FieldTap(point));
                }
            });
        }

        // Touch. Only the game-over screen claims it (and suppresses the
        // synthetic click); during play the page keeps its own gestures.
        let canvas_clone = canvas.clone();
        listen(canvas, "touchstart", move |event| {
            if game.borrow().driver.captures_field_taps() {
                event.prevent_default();
            }
            let Some(touch) = event
                .dyn_ref::<TouchEvent>()
                .and_then(|event| event.touches().get(0))
            else {
                return;
            };
            let rect = canvas_clone.get_bounding_client_rect();
            let x = touch.client_x() as f32 - rect.left() as f32;
            let y = touch.client_y() as f32 - rect.top() as f32;
            let point = to_field(&canvas_clone, field, x, y);
            game.borrow_mut().input(InputEvent::FieldTap(point));
        });
    }

    fn setup_arrow_buttons(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        for (id, direction) in [("left-btn", Direction::Left), ("right-btn", Direction::Right)] {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing #{} button", id);
                continue;
            };

            for kind in ["touchstart", "mousedown"] {
                let game = game.clone();
                listen(&btn, kind, move |event| {
                    event.prevent_default();
                    game.borrow_mut().input(InputEvent::ButtonDown(direction));
                });
            }

            for kind in ["touchend", "mouseup", "mouseleave"] {
                let game = game.clone();
                listen(&btn, kind, move |_event| {
                    game.borrow_mut().input(InputEvent::ButtonUp(direction));
                });
            }
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
            g.update(time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

/// Headless demo: the autopilot plays a few seeded rounds
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use rock_raft::platform::{AssetGate, InputEvent, Key};
    use rock_raft::sim::{GameEvent, autopilot};
    use rock_raft::{Driver, Tuning};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_FRAMES_PER_ROUND: u32 = 60 * 60 * 5;
    const ROUNDS: u32 = 3;

    env_logger::init();
    log::info!("Rock Raft (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(42);

    let tuning = match std::env::var("ROCK_RAFT_TUNING") {
        Ok(path) => match std::fs::read_to_string(&path) {
            Ok(json) => match Tuning::from_json(&json) {
                Ok(tuning) => tuning,
                Err(err) => {
                    log::error!("{}: {}", path, err);
                    std::process::exit(1);
                }
            },
            Err(err) => {
                log::error!("Cannot read {}: {}", path, err);
                std::process::exit(1);
            }
        },
        Err(_) => Tuning::default(),
    };

    let mut driver = Driver::new(tuning, seed, AssetGate::new(Vec::<String>::new()));

    for round in 1..=ROUNDS {
        let mut frames = 0;
        let mut spawned = 0;
        while driver.state.is_playing() && frames < MAX_FRAMES_PER_ROUND {
            let intent = autopilot(&driver.state, driver.tuning());
            driver.input_mut().set_intent(intent);
            for event in driver.frame(FRAME_MS) {
                log::debug!("{:?}", event);
                if matches!(event, GameEvent::RockSpawned { .. }) {
                    spawned += 1;
                }
            }
            frames += 1;
        }

        let seconds = f64::from(frames) * FRAME_MS / 1000.0;
        println!(
            "Round {}: score {} ({} rocks spawned, {:.1}s)",
            round, driver.state.score, spawned, seconds
        );

        if !driver.state.is_game_over() {
            println!("Autopilot survived the round limit, stopping");
            break;
        }
        driver.handle_input(InputEvent::KeyDown(Key::Other));
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
