//! Apple Breakout entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        AddEventListenerOptions, Document, HtmlCanvasElement, HtmlImageElement, MouseEvent,
        TouchEvent, Window,
    };

    use apple_breakout::audio::AudioManager;
    use apple_breakout::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
    use apple_breakout::platform::{FrameId, Platform};
    use apple_breakout::renderer::{BALL_IMAGE_SRC, CanvasSurface};
    use apple_breakout::sim::GamePhase;
    use apple_breakout::{Session, Settings, Snapshot, StartupError};

    const CANVAS_ID: &str = "canvas";

    /// Pointer and touch listeners. Built once, attached for the lifetime of
    /// a session.
    struct InputListeners {
        canvas: HtmlCanvasElement,
        mouse_move: Closure<dyn FnMut(MouseEvent)>,
        touch_move: Closure<dyn FnMut(TouchEvent)>,
        attached: bool,
    }

    impl InputListeners {
        fn new(canvas: &HtmlCanvasElement, game: &Rc<RefCell<Game>>) -> Self {
            let mouse_move = {
                let game = game.clone();
                let canvas = canvas.clone();
                Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                    let Ok(mut g) = game.try_borrow_mut() else {
                        return;
                    };
                    let left = canvas.get_bounding_client_rect().left() as f32;
                    g.session.pointer_moved(event.client_x() as f32, left);
                })
            };

            let touch_move = {
                let game = game.clone();
                let canvas = canvas.clone();
                Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    let Some(touch) = event.touches().get(0) else {
                        return;
                    };
                    let Ok(mut g) = game.try_borrow_mut() else {
                        return;
                    };
                    let left = canvas.get_bounding_client_rect().left() as f32;
                    g.session.pointer_moved(touch.client_x() as f32, left);
                })
            };

            Self {
                canvas: canvas.clone(),
                mouse_move,
                touch_move,
                attached: false,
            }
        }

        fn attach(&mut self) {
            if self.attached {
                return;
            }
            let _ = self.canvas.add_event_listener_with_callback(
                "mousemove",
                self.mouse_move.as_ref().unchecked_ref(),
            );
            // Non-passive so preventDefault can stop page scrolling
            let options = AddEventListenerOptions::new();
            options.set_passive(false);
            let _ = self
                .canvas
                .add_event_listener_with_callback_and_add_event_listener_options(
                    "touchmove",
                    self.touch_move.as_ref().unchecked_ref(),
                    &options,
                );
            self.attached = true;
        }

        fn detach(&mut self) {
            if !self.attached {
                return;
            }
            let _ = self.canvas.remove_event_listener_with_callback(
                "mousemove",
                self.mouse_move.as_ref().unchecked_ref(),
            );
            let _ = self.canvas.remove_event_listener_with_callback(
                "touchmove",
                self.touch_move.as_ref().unchecked_ref(),
            );
            self.attached = false;
        }
    }

    /// Browser implementation of the host platform
    struct WebPlatform {
        window: Window,
        surface: CanvasSurface,
        audio: AudioManager,
        frame_callback: Option<Closure<dyn FnMut(f64)>>,
        /// Id of the outstanding rAF request, handed back to the session
        /// when the callback fires
        requested: Option<FrameId>,
        input: Option<InputListeners>,
    }

    impl Platform for WebPlatform {
        type Surface = CanvasSurface;
        type Audio = AudioManager;

        fn surface(&mut self) -> &mut CanvasSurface {
            &mut self.surface
        }

        fn audio(&mut self) -> &mut AudioManager {
            &mut self.audio
        }

        fn request_frame(&mut self) -> Option<FrameId> {
            let callback = self.frame_callback.as_ref()?;
            match self
                .window
                .request_animation_frame(callback.as_ref().unchecked_ref())
            {
                Ok(id) => {
                    self.requested = Some(id);
                    Some(id)
                }
                Err(e) => {
                    log::warn!("requestAnimationFrame failed: {:?}", e);
                    None
                }
            }
        }

        fn cancel_frame(&mut self, frame: FrameId) {
            if self.requested == Some(frame) {
                self.requested = None;
            }
            if let Err(e) = self.window.cancel_animation_frame(frame) {
                log::warn!("cancelAnimationFrame({}) failed: {:?}", frame, e);
            }
        }

        fn attach_input(&mut self) {
            if let Some(input) = &mut self.input {
                input.attach();
            }
        }

        fn detach_input(&mut self) {
            if let Some(input) = &mut self.input {
                input.detach();
            }
        }
    }

    /// DOM overlays: instructions, game over, win
    struct Shell {
        document: Document,
        canvas: HtmlCanvasElement,
        last: Option<Snapshot>,
    }

    impl Shell {
        fn new(document: Document, canvas: HtmlCanvasElement) -> Self {
            Self {
                document,
                canvas,
                last: None,
            }
        }

        fn set_visible(&self, id: &str, visible: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.class_list().toggle_with_force("hidden", !visible);
            }
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        /// Update overlays. Cheap when nothing changed.
        fn update(&mut self, snapshot: Snapshot) {
            if self.last == Some(snapshot) {
                return;
            }
            self.last = Some(snapshot);

            let score = snapshot.score.to_string();
            self.set_visible("instructions", snapshot.phase == GamePhase::NotStarted);
            self.set_visible("game-over", snapshot.phase == GamePhase::Lost);
            self.set_visible("game-won", snapshot.phase == GamePhase::Won);
            match snapshot.phase {
                GamePhase::Lost => self.set_text("final-score", &score),
                GamePhase::Won => self.set_text("won-score", &score),
                _ => {}
            }

            let _ = self
                .canvas
                .class_list()
                .toggle_with_force("blurred", snapshot.phase != GamePhase::Playing);
        }
    }

    /// Game instance holding all state
    struct Game {
        session: Session,
        platform: WebPlatform,
        shell: Shell,
    }

    impl Game {
        fn start(&mut self) {
            self.session.start_game(&mut self.platform);
            self.shell.update(self.session.snapshot());
        }

        fn restart(&mut self) {
            self.session.restart_game(&mut self.platform);
            self.shell.update(self.session.snapshot());
        }

        fn frame(&mut self) {
            let Some(frame) = self.platform.requested.take() else {
                return;
            };
            self.session.on_frame(&mut self.platform, frame);
            self.shell.update(self.session.snapshot());
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"logger already initialised".into());
        }

        log::info!("Apple Breakout starting...");

        if let Err(e) = start().await {
            log::error!("Startup failed: {}", e);
            show_startup_error(&e);
        }
    }

    async fn start() -> Result<(), StartupError> {
        let window = web_sys::window().ok_or(StartupError::NoWindow)?;
        let document = window.document().ok_or(StartupError::NoDocument)?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| StartupError::CanvasNotFound(CANVAS_ID.into()))?
            .dyn_into()
            .map_err(|_| StartupError::CanvasNotFound(CANVAS_ID.into()))?;
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);

        let ball_image = load_image(BALL_IMAGE_SRC).await?;
        let surface = CanvasSurface::new(&canvas, ball_image)?;

        let settings = Settings::load();
        let audio = AudioManager::new(&settings);

        let game = Rc::new(RefCell::new(Game {
            session: Session::new(settings),
            platform: WebPlatform {
                window,
                surface,
                audio,
                frame_callback: None,
                requested: None,
                input: None,
            },
            shell: Shell::new(document.clone(), canvas.clone()),
        }));

        // Callbacks hold the game, so they are installed after it exists
        let frame_callback = {
            let game = game.clone();
            Closure::<dyn FnMut(f64)>::new(move |_time: f64| match game.try_borrow_mut() {
                Ok(mut g) => g.frame(),
                Err(_) => log::warn!("Frame skipped: game busy"),
            })
        };
        let listeners = InputListeners::new(&canvas, &game);
        {
            let mut g = game.borrow_mut();
            g.platform.frame_callback = Some(frame_callback);
            g.platform.input = Some(listeners);
            let snapshot = g.session.snapshot();
            g.shell.update(snapshot);
        }

        on_click(&document, "start-btn", &game, Game::start);
        on_click(&document, "restart-btn", &game, Game::restart);
        on_click(&document, "play-again-btn", &game, Game::restart);

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.class_list().add_1("hidden");
        }

        log::info!("Apple Breakout ready");
        Ok(())
    }

    async fn load_image(src: &str) -> Result<HtmlImageElement, StartupError> {
        let image = HtmlImageElement::new()?;
        image.set_src(src);
        JsFuture::from(image.decode())
            .await
            .map_err(|e| StartupError::asset(src, e))?;
        Ok(image)
    }

    fn on_click(document: &Document, id: &str, game: &Rc<RefCell<Game>>, action: fn(&mut Game)) {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("Button #{} not found", id);
            return;
        };
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            if let Ok(mut g) = game.try_borrow_mut() {
                action(&mut g);
            }
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn show_startup_error(error: &StartupError) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document.get_element_by_id("startup-error") {
            el.set_text_content(Some(&error.to_string()));
            let _ = el.class_list().remove_1("hidden");
        }
        if let Some(el) = document.get_element_by_id("loading") {
            let _ = el.class_list().add_1("hidden");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use apple_breakout::platform::HeadlessPlatform;
    use apple_breakout::platform::headless::autoplay;
    use apple_breakout::{Session, Settings};

    /// Roughly three minutes at 60 Hz
    const DEMO_FRAMES: u64 = 60 * 60 * 3;

    env_logger::init();
    log::info!("Apple Breakout (native) starting...");
    log::info!("Native mode runs a headless autoplay demo - build for wasm32 to play");

    let mut session = Session::new(Settings::load());
    let mut platform = HeadlessPlatform::new();
    session.start_game(&mut platform);

    let snapshot = autoplay(&mut session, &mut platform, DEMO_FRAMES);
    session.teardown(&mut platform);

    println!(
        "Autoplay finished: phase {:?}, score {}, lives {}, bricks left {}",
        snapshot.phase,
        snapshot.score,
        snapshot.lives,
        session.state().bricks_remaining()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
