//! Pocket Arcade entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use pocket_arcade::platform::{KeyAction, LocalStore, SwipeTracker, key_action};
    use pocket_arcade::renderer::{CanvasPainter, balloon_scene, runner_scene};
    use pocket_arcade::sim::{
        BalloonInput, BalloonState, FixedStep, GameEvent, GamePhase, RunnerInput, RunnerState,
    };
    use pocket_arcade::{GameKind, HighScore, Settings, Viewport};

    /// The cabinet's current game
    enum Cabinet {
        Runner(RunnerState),
        Balloon {
            state: BalloonState,
            high_score: HighScore,
        },
    }

    /// Game instance holding all state
    struct Game {
        kind: GameKind,
        cabinet: Cabinet,
        settings: Settings,
        store: LocalStore,
        painter: CanvasPainter,
        canvas: HtmlCanvasElement,
        clock: FixedStep,
        last_time: f64,
        runner_input: RunnerInput,
        balloon_input: BalloonInput,
        swipe: SwipeTracker,
        /// Touch screens also emit emulated mouse clicks; ignore those
        touch_seen: bool,
    }

    impl Game {
        fn new(kind: GameKind, settings: Settings, store: LocalStore, canvas: HtmlCanvasElement, painter: CanvasPainter) -> Self {
            let viewport = viewport_for(kind);
            size_canvas(&canvas, viewport);
            let cabinet = new_cabinet(kind, &settings, &store, viewport);
            // Distance is a runner stat, the best score a balloon one
            set_hidden("distance-item", kind != GameKind::LaneRunner);
            set_hidden("best-item", kind == GameKind::LaneRunner);
            Self {
                kind,
                cabinet,
                swipe: SwipeTracker::new(settings.swipe_threshold),
                runner_input: RunnerInput {
                    autopilot: settings.autopilot,
                    ..Default::default()
                },
                balloon_input: BalloonInput {
                    autopilot: settings.autopilot,
                    ..Default::default()
                },
                settings,
                store,
                painter,
                canvas,
                clock: FixedStep::default(),
                last_time: 0.0,
                touch_seen: false,
            }
        }

        /// Run simulation ticks and react to what happened
        fn update(&mut self, dt: f32) {
            match &mut self.cabinet {
                Cabinet::Runner(state) => {
                    self.clock.advance(state, &mut self.runner_input, dt);
                    for event in state.drain_events() {
                        match event {
                            GameEvent::Scored { total, .. } => set_text("score", &total.to_string()),
                            GameEvent::GameOver { score } => show_game_over(score),
                            _ => {}
                        }
                    }
                }
                Cabinet::Balloon { state, high_score } => {
                    self.clock.advance(state, &mut self.balloon_input, dt);
                    for event in state.drain_events() {
                        match event {
                            GameEvent::Started => set_text("score", "0"),
                            GameEvent::Scored { total, .. } => set_text("score", &total.to_string()),
                            GameEvent::GameOver { score } => {
                                if high_score.submit(score, &mut self.store) {
                                    log::info!("New record: {}", score);
                                }
                                show_game_over(score);
                            }
                            _ => {}
                        }
                    }
                }
            }
        }

        /// Render the current frame
        fn render(&self) {
            let cmds = match &self.cabinet {
                Cabinet::Runner(state) => runner_scene(state),
                Cabinet::Balloon { state, .. } => balloon_scene(state),
            };
            self.painter.paint(&cmds);
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            match &self.cabinet {
                Cabinet::Runner(state) => {
                    set_text("distance", &format!("{:.2}", state.distance));
                }
                Cabinet::Balloon { state, high_score } => {
                    set_text("high-score", &high_score.best().to_string());
                    set_hidden("start-screen", state.phase != GamePhase::Idle);
                    set_hidden("game-over", state.phase != GamePhase::GameOver);
                }
            }
        }

        fn on_key(&mut self, key: &str) {
            match (key_action(key), &self.cabinet) {
                (Some(KeyAction::Shift(shift)), Cabinet::Runner(_)) => self.runner_input.shift = Some(shift),
                (Some(KeyAction::Tap), Cabinet::Balloon { .. }) => self.balloon_input.tap = true,
                _ => {}
            }
        }

        fn on_touch_start(&mut self, x: f32) {
            self.touch_seen = true;
            match self.cabinet {
                Cabinet::Runner(_) => self.swipe.begin(x),
                Cabinet::Balloon { .. } => self.balloon_input.tap = true,
            }
        }

        fn on_touch_end(&mut self, x: f32) {
            if let Cabinet::Runner(_) = self.cabinet {
                if let Some(shift) = self.swipe.end(x) {
                    self.runner_input.shift = Some(shift);
                }
            }
        }

        fn on_click(&mut self) {
            if self.touch_seen {
                return;
            }
            if let Cabinet::Balloon { .. } = self.cabinet {
                self.balloon_input.tap = true;
            }
        }

        fn on_resize(&mut self) {
            let viewport = viewport_for(self.kind);
            if let Cabinet::Balloon { state, .. } = &mut self.cabinet {
                size_canvas(&self.canvas, viewport);
                state.resize(viewport);
            }
        }

        /// Reset game state for restart
        fn restart(&mut self) {
            match &mut self.cabinet {
                Cabinet::Runner(state) => {
                    let seed = js_sys::Date::now() as u64;
                    *state = RunnerState::with_tuning(seed, state.viewport, self.settings.tuning.runner.clone());
                }
                Cabinet::Balloon { state, .. } => state.restart(),
            }
            self.clock.reset();
            self.runner_input.shift = None;
            self.balloon_input.tap = false;
            set_text("score", "0");
            set_hidden("game-over", true);
        }
    }

    fn new_cabinet(kind: GameKind, settings: &Settings, store: &LocalStore, viewport: Viewport) -> Cabinet {
        let seed = js_sys::Date::now() as u64;
        match kind.balloon_variant() {
            None => Cabinet::Runner(RunnerState::with_tuning(seed, viewport, settings.tuning.runner.clone())),
            Some(variant) => Cabinet::Balloon {
                state: BalloonState::with_tuning(seed, viewport, variant, settings.tuning.balloon.clone()),
                high_score: HighScore::load(store, variant),
            },
        }
    }

    /// Runner keeps a phone-shaped road; balloons fill the window
    fn viewport_for(kind: GameKind) -> Viewport {
        let window = web_sys::window().expect("no window");
        let inner = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
        let width = inner(window.inner_width());
        let height = inner(window.inner_height());
        match kind {
            GameKind::LaneRunner => Viewport::portrait_for_window(height),
            _ => Viewport::new(width, height),
        }
    }

    fn size_canvas(canvas: &HtmlCanvasElement, viewport: Viewport) {
        canvas.set_width(viewport.width as u32);
        canvas.set_height(viewport.height as u32);
    }

    fn set_text(id: &str, text: &str) {
        let document = web_sys::window().and_then(|w| w.document());
        if let Some(el) = document.and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(id: &str, hidden: bool) {
        let document = web_sys::window().and_then(|w| w.document());
        if let Some(el) = document.and_then(|d| d.get_element_by_id(id)) {
            let classes = el.class_list();
            let _ = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
        }
    }

    fn show_game_over(score: u64) {
        set_text("final-score", &score.to_string());
        set_hidden("game-over", false);
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Pocket Arcade starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let painter = CanvasPainter::new(&canvas).expect("no 2d context");

        let mut store = LocalStore::open();
        let mut settings = Settings::load(&store);

        // `#runner`, `#balloon` or `#balloon-circle` picks the game and
        // becomes the default for the next visit
        let kind = window
            .location()
            .hash()
            .ok()
            .and_then(|h| GameKind::from_str(&h))
            .unwrap_or(settings.game);
        if kind != settings.game {
            settings.game = kind;
            settings.save(&mut store);
        }
        log::info!("Loading {}", kind.as_str());

        let game = Rc::new(RefCell::new(Game::new(kind, settings, store, canvas.clone(), painter)));
        set_hidden("game-over", true);

        setup_input_handlers(&canvas, game.clone());
        setup_restart_button(game.clone());
        setup_resize(game.clone());

        request_animation_frame(game);

        log::info!("Pocket Arcade running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().on_key(&event.key());
            });
            let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start: swipe origin or tap
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    game.borrow_mut().on_touch_start(touch.client_x() as f32);
                }
            });
            let _ = canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end: finish swipe
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.changed_touches().get(0) {
                    game.borrow_mut().on_touch_end(touch.client_x() as f32);
                }
            });
            let _ = canvas.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse click
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().on_click();
            });
            let _ = canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("restartButton") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().restart();
                log::info!("Game restarted");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().on_resize();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
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
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                pocket_arcade::consts::SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
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
    log::info!("Pocket Arcade (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - serve the wasm build to play");

    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless attract mode: each game plays itself for a minute of game time
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use pocket_arcade::consts::SIM_DT;
    use pocket_arcade::platform::MemoryStore;
    use pocket_arcade::sim::{
        BalloonInput, BalloonState, BalloonVariant, FixedStep, GameEvent, GamePhase, RunnerInput,
        RunnerState, Simulation,
    };
    use pocket_arcade::{HighScore, Viewport};

    const DEMO_TICKS: u32 = 60 * 60;

    fn drive<S: Simulation>(sim: &mut S, input: &mut S::Input, mut done: impl FnMut(&mut S) -> bool) -> u64 {
        let mut clock = FixedStep::default();
        for _ in 0..DEMO_TICKS {
            clock.advance(sim, input, SIM_DT);
            if done(sim) {
                break;
            }
        }
        clock.ticks()
    }

    pub fn run() {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let viewport = Viewport::default();

        let mut runner = RunnerState::new(seed, viewport);
        let mut input = RunnerInput {
            autopilot: true,
            ..Default::default()
        };
        let ticks = drive(&mut runner, &mut input, |s| s.phase == GamePhase::GameOver);
        println!(
            "Lane runner: score {}, {:.2} km in {} ticks",
            runner.score, runner.distance, ticks
        );

        let mut store = MemoryStore::new();
        for variant in [BalloonVariant::Rect, BalloonVariant::Circle] {
            let mut high_score = HighScore::load(&store, variant);
            let mut balloon = BalloonState::new(seed, viewport, variant);
            let mut input = BalloonInput {
                autopilot: true,
                ..Default::default()
            };
            let mut flaps = 0;
            let ticks = drive(&mut balloon, &mut input, |s| {
                let events = s.drain_events();
                flaps += events.iter().filter(|e| matches!(e, GameEvent::Flap)).count();
                events.iter().any(|e| matches!(e, GameEvent::GameOver { .. }))
            });
            let record = high_score.submit(balloon.score, &mut store);
            println!(
                "Balloon flight ({}): score {} in {} ticks, {} flaps{}",
                variant.as_str(),
                balloon.score,
                ticks,
                flaps,
                if record { " - new high score" } else { "" }
            );
        }
    }
}
