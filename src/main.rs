//! Retro Racer entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use anyhow::{Context, Result, anyhow};
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use retro_racer::renderer::{RenderState, Vertex, shapes};
    use retro_racer::sim::{Keys, WorldState};
    use retro_racer::{FrameLoop, HudReadout, ManualClock, Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        world: WorldState,
        frame_loop: FrameLoop,
        clock: ManualClock,
        keys: Keys,
        settings: Settings,
        /// Draw distance from tuning, before the quality cap
        requested_draw_distance: usize,
        render_state: Option<RenderState>,
        vertices: Vec<Vertex>,
        canvas: HtmlCanvasElement,
        /// A frame callback is queued; never queue a second one
        raf_pending: bool,
    }

    impl Game {
        fn new(mut tuning: Tuning, settings: Settings, canvas: HtmlCanvasElement) -> Self {
            let requested_draw_distance = tuning.draw_distance;
            tuning.draw_distance = settings.effective_draw_distance(requested_draw_distance);
            Self {
                world: WorldState::new(tuning),
                frame_loop: FrameLoop::new(),
                clock: ManualClock::default(),
                keys: Keys::empty(),
                settings,
                requested_draw_distance,
                render_state: None,
                vertices: Vec::new(),
                canvas,
                raf_pending: false,
            }
        }

        /// One rAF tick: update, render, HUD
        fn frame(&mut self, time_ms: f64) {
            self.clock.set(time_ms / 1000.0);
            let Some(viewport) = self.render_state.as_ref().map(|r| r.viewport()) else {
                return;
            };
            if self
                .frame_loop
                .step(&self.clock, &mut self.world, self.keys, viewport)
                .is_none()
            {
                return;
            }

            shapes::draw_list(self.frame_loop.draw_list(), &mut self.vertices);
            if let Some(render_state) = self.render_state.as_mut() {
                match render_state.render(&self.vertices) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }

            if self.settings.show_hud {
                update_hud(&HudReadout::from_state(&self.world));
            }
        }

        /// Re-derive canvas size; projection constants follow from the viewport
        fn resize(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let dpr = window.device_pixel_ratio();
            let width = (self.canvas.client_width() as f64 * dpr) as u32;
            let height = (self.canvas.client_height() as f64 * dpr) as u32;
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            if let Some(render_state) = self.render_state.as_mut() {
                render_state.resize(width, height);
            }
        }

        /// Step the quality preset, persist it and re-cap the draw distance
        fn cycle_quality(&mut self) {
            let quality = self.settings.cycle_quality();
            self.settings.save();
            self.world.tuning.draw_distance = self
                .settings
                .effective_draw_distance(self.requested_draw_distance);
            log::info!(
                "Quality {:?}: drawing {} segments",
                quality,
                self.world.tuning.draw_distance
            );
        }

        fn restart(&mut self) {
            self.world.reset();
            self.keys = Keys::empty();
            log::info!("Run restarted");
        }
    }

    /// Write HUD values into the DOM
    fn update_hud(hud: &HudReadout) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let fields = [
            ("hud-speed", hud.speed_text()),
            ("hud-distance", hud.distance_text()),
            ("hud-time", hud.time_text()),
        ];
        for (id, text) in fields {
            if let Some(el) = document.get_element_by_id(id) {
                el.set_text_content(Some(&text));
            }
        }
    }

    /// Optional tuning overrides embedded in the page as JSON
    fn load_tuning(document: &web_sys::Document) -> Tuning {
        let Some(el) = document.get_element_by_id("tuning") else {
            return Tuning::default();
        };
        let json = el.text_content().unwrap_or_default();
        match Tuning::from_json_str(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning overrides: {:#}", e);
                Tuning::default()
            }
        }
    }

    pub async fn run() -> Result<()> {
        let window = web_sys::window().context("no window")?;
        let document = window.document().context("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .context("no canvas")?
            .dyn_into()
            .map_err(|_| anyhow!("#canvas is not a canvas element"))?;

        let settings = Settings::load();
        let tuning = load_tuning(&document);

        let game = Rc::new(RefCell::new(Game::new(tuning, settings, canvas.clone())));
        game.borrow_mut().resize();
        let (width, height) = (canvas.width(), canvas.height());

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
            .context("failed to create surface")?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to get adapter")?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(game.clone())?;
        setup_resize_handler(game.clone())?;

        game.borrow_mut().frame_loop.start();
        request_animation_frame(game);
        log::info!("Retro Racer running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<()> {
        let window = web_sys::window().context("no window")?;

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if let Some(direction) = Keys::from_key_name(&key) {
                    event.prevent_default();
                    game.borrow_mut().keys.insert(direction);
                    return;
                }
                match key.as_str() {
                    "Escape" => {
                        let resume = {
                            let mut g = game.borrow_mut();
                            g.frame_loop.toggle();
                            g.frame_loop.is_active() && !g.raf_pending
                        };
                        // The loop stops re-arming itself while paused
                        if resume {
                            request_animation_frame(game.clone());
                        }
                    }
                    "r" | "R" => game.borrow_mut().restart(),
                    "q" | "Q" => game.borrow_mut().cycle_quality(),
                    _ => {}
                }
            });
            window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
                .map_err(|e| anyhow!("keydown listener: {:?}", e))?;
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(direction) = Keys::from_key_name(&event.key()) {
                    game.borrow_mut().keys.remove(direction);
                }
            });
            window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())
                .map_err(|e| anyhow!("keyup listener: {:?}", e))?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_resize_handler(game: Rc<RefCell<Game>>) -> Result<()> {
        let window = web_sys::window().context("no window")?;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().resize();
        });
        window
            .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
            .map_err(|e| anyhow!("resize listener: {:?}", e))?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        game.borrow_mut().raf_pending = true;
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let active = {
            let mut g = game.borrow_mut();
            g.raf_pending = false;
            g.frame(time);
            g.frame_loop.is_active()
        };
        if active {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Retro Racer starting...");
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:#}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless drive: hold the throttle around the default track in real time and log the HUD
#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use retro_racer::sim::{Keys, Viewport, WorldState};
    use retro_racer::{FrameLoop, HudReadout, InstantClock, Settings, Tuning};

    env_logger::init();
    log::info!("Retro Racer (native) starting...");
    log::info!("Native mode runs headless - run with `trunk serve` for the web version");

    let mut tuning = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading tuning file {path}"))?;
            Tuning::from_json_str(&json).with_context(|| format!("parsing tuning file {path}"))?
        }
        None => Tuning::default(),
    };
    let settings = Settings::load();
    tuning.draw_distance = settings.effective_draw_distance(tuning.draw_distance);

    let mut world = WorldState::new(tuning);
    let mut frame_loop = FrameLoop::new();
    let clock = InstantClock::default();
    let viewport = Viewport::new(1280.0, 720.0);
    frame_loop.start();

    const FRAME: std::time::Duration = std::time::Duration::from_micros(16_667);
    const SECONDS: u32 = 20;
    for frame in 0..SECONDS * 60 {
        // Weave a little on the second half to exercise steering
        let mut keys = Keys::UP;
        if frame > SECONDS * 30 && (frame / 90) % 2 == 0 {
            keys |= Keys::LEFT;
        }
        let report = frame_loop
            .step(&clock, &mut world, keys, viewport)
            .context("frame loop stopped unexpectedly")?;
        std::thread::sleep(FRAME);

        if frame % 60 == 0 {
            log::info!(
                "{} | x {:+.2} | {} segments visible",
                HudReadout::from_state(&world),
                world.player_x,
                report.visible_segments
            );
        }
    }

    println!("{}", HudReadout::from_state(&world));
    Ok(())
}
