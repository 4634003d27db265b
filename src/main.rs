//! Prize Wheel entry point
//!
//! Wires the browser page to the wheel engine and runs the spin animation loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_wheel {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::DVec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, Element, HtmlButtonElement, HtmlCanvasElement, HtmlTextAreaElement,
        KeyboardEvent, MouseEvent,
    };

    use prize_wheel::WheelSettings;
    use prize_wheel::audio::{AudioManager, SoundEffect, TickCadence};
    use prize_wheel::consts::*;
    use prize_wheel::effects::{
        self, CONFETTI_LIFETIME_MS, SPARKLE_LIFETIME_MS, SparkleTimer,
    };
    use prize_wheel::renderer::CanvasWheel;
    use prize_wheel::wheel::{FrameStatus, KeyAction, PinCapture, WheelEngine, WheelHooks};

    /// Presentation side of the wheel: drawing, sound, sparkles
    struct WheelView {
        canvas: CanvasWheel,
        audio: AudioManager,
        settings: WheelSettings,
        ticks: TickCadence,
        sparkles: SparkleTimer,
        fx_rng: Pcg32,
    }

    impl WheelHooks for WheelView {
        fn render(&mut self, rotation: f64, entries: &[String], highlight: Option<usize>) {
            self.canvas.draw(rotation, entries, highlight);
        }

        fn spin_complete(&mut self, _winner: &str, _index: usize) {
            self.audio.stop_whoosh();
        }
    }

    impl WheelView {
        /// Ticks and sparkles for one spinning frame
        fn frame_effects(&mut self, document: &Document, time: f64) {
            if self.settings.sound && self.ticks.poll(time) {
                self.audio.play(SoundEffect::Tick);
            }
            if self.settings.sparkles && self.sparkles.due(time) {
                spawn_sparkles(document, self.canvas.canvas(), &mut self.fx_rng);
            }
        }
    }

    /// Page state holding the engine and its view
    struct App {
        engine: WheelEngine,
        view: WheelView,
        pin_capture: PinCapture,
        document: Document,
        names_input: Option<HtmlTextAreaElement>,
        spin_btn: Option<HtmlButtonElement>,
    }

    impl App {
        /// Rebuild the entries from the textarea and redraw at rest
        fn refresh_entries(&mut self) {
            let text = self
                .names_input
                .as_ref()
                .map(|input| input.value())
                .unwrap_or_default();
            self.engine.set_entries_from_text(&text);
            self.engine.redraw(&mut self.view);
            self.update_spin_button();
        }

        fn update_spin_button(&self) {
            if let Some(btn) = &self.spin_btn {
                btn.set_disabled(!self.engine.can_spin());
            }
        }

        /// Kick off a spin; false if the engine refused
        fn start_spin(&mut self) -> bool {
            match self.engine.request_spin() {
                Ok(_) => {
                    self.view.audio.play(SoundEffect::Click);
                    if self.view.settings.sound {
                        self.view.audio.start_whoosh();
                    }
                    self.view.ticks = TickCadence::new();
                    self.view.sparkles.reset();
                    let _ = self.view.canvas.canvas().class_list().add_1("spinning");
                    self.update_spin_button();
                    true
                }
                Err(e) => {
                    log::debug!("Spin ignored: {}", e);
                    false
                }
            }
        }

        /// Advance one animation frame
        fn step(&mut self, time: f64) -> FrameStatus {
            let status = self.engine.advance(time, &mut self.view);
            if matches!(status, FrameStatus::Spinning { .. }) {
                self.view.frame_effects(&self.document, time);
            }
            status
        }

        /// Wheel has stopped: unlock controls, sync the textarea if the winner left
        fn on_spin_finished(&mut self) {
            let _ = self.view.canvas.canvas().class_list().remove_1("spinning");
            if self.engine.settings().remove_winner_after_spin {
                if let Some(input) = &self.names_input {
                    input.set_value(&self.engine.entries().join("\n"));
                }
                self.engine.redraw(&mut self.view);
            }
            self.update_spin_button();
        }

        /// Banner, modal, fanfare, shake and confetti
        fn show_winner(&mut self, winner: &str) {
            let document = &self.document;

            if let Some(banner) = document.get_element_by_id("winnerDisplay") {
                banner.set_text_content(Some(&format!("🎊 Winner: {}! 🎊", winner)));
                let _ = banner.class_list().add_1("show");
                set_timeout(WINNER_BANNER_MS, move || {
                    let _ = banner.class_list().remove_1("show");
                });
            }

            if let Some(name) = document.get_element_by_id("winnerNamePopup") {
                name.set_text_content(Some(winner));
            }
            if let Some(modal) = document.get_element_by_id("winnerModal") {
                let _ = modal.class_list().add_1("show");
            }

            if self.view.settings.sound {
                self.view.audio.play(SoundEffect::Fanfare);
            }

            if let Some(container) = document.query_selector(".wheel-container").ok().flatten() {
                let _ = container.set_attribute("style", "animation: shake 0.5s ease-in-out");
                set_timeout(SHAKE_MS, move || {
                    let _ = container.remove_attribute("style");
                });
            }

            if self.view.settings.confetti {
                let colors = self.view.settings.theme.confetti_colors();
                spawn_confetti(document, &effects::confetti_burst(&mut self.view.fx_rng, colors));
            }

            log::info!("Winner revealed");
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Prize Wheel starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document - nothing to attach to");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("wheelCanvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #wheelCanvas element");
            return;
        };

        let settings = WheelSettings::from_page(canvas.get_attribute("data-settings").as_deref());

        let Some(wheel_canvas) = CanvasWheel::new(canvas.clone(), settings.theme) else {
            log::error!("Canvas 2D context unavailable");
            return;
        };

        let seed = js_sys::Date::now() as u64;
        let view = WheelView {
            canvas: wheel_canvas,
            audio: AudioManager::new(settings.effective_volume()),
            settings: settings.clone(),
            ticks: TickCadence::new(),
            sparkles: SparkleTimer::new(),
            fx_rng: Pcg32::seed_from_u64(seed.wrapping_add(1)),
        };

        let app = Rc::new(RefCell::new(App {
            engine: WheelEngine::new(settings, seed),
            view,
            pin_capture: PinCapture::new(),
            names_input: document
                .get_element_by_id("names")
                .and_then(|el| el.dyn_into::<HtmlTextAreaElement>().ok()),
            spin_btn: document
                .get_element_by_id("spinBtn")
                .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok()),
            document: document.clone(),
        }));

        log::info!("Wheel initialized with seed: {}", seed);

        app.borrow_mut().refresh_entries();

        setup_entry_handlers(&document, app.clone());
        setup_spin_button(app.clone());
        setup_pin_gestures(&canvas, app.clone());
        setup_modal(&document, app.clone());

        log::info!("Prize Wheel ready!");
    }

    fn setup_entry_handlers(document: &Document, app: Rc<RefCell<App>>) {
        // Update wheel automatically as user types
        if let Some(input) = document.get_element_by_id("names") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().refresh_entries();
            });
            let _ = input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Form submit does the same without reloading the page
        if let Some(form) = document.get_element_by_id("namesForm") {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                event.prevent_default();
                app.borrow_mut().refresh_entries();
            });
            let _ = form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_spin_button(app: Rc<RefCell<App>>) {
        let btn = app.borrow().spin_btn.clone();
        let Some(btn) = btn else {
            log::warn!("No #spinBtn element");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let started = app.borrow_mut().start_spin();
            if started {
                request_animation_frame(app.clone());
            }
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_pin_gestures(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Double-click a segment to pin it
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                if rect.width() <= 0.0 || rect.height() <= 0.0 {
                    return;
                }
                // CSS pixels -> canvas pixels
                let scale_x = canvas_clone.width() as f64 / rect.width();
                let scale_y = canvas_clone.height() as f64 / rect.height();
                let point = DVec2::new(
                    (event.client_x() as f64 - rect.left()) * scale_x,
                    (event.client_y() as f64 - rect.top()) * scale_y,
                );

                let mut a = app.borrow_mut();
                let geometry = a.view.canvas.geometry();
                let _ = a.engine.pin_at(geometry.offset_of(point), geometry.radius);
            });
            let _ = canvas
                .add_event_listener_with_callback("dblclick", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Ctrl+Alt+N, type part of a name, Enter
        {
            let Some(window) = web_sys::window() else { return };
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                let action = a
                    .pin_capture
                    .handle_key(&event.key(), event.ctrl_key(), event.alt_key());
                if action.swallows_key() {
                    event.prevent_default();
                }
                if let KeyAction::Committed(query) = action {
                    let _ = a.engine.force_next_winner(&query);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_modal(document: &Document, app: Rc<RefCell<App>>) {
        let Some(modal) = document.get_element_by_id("winnerModal") else {
            return;
        };

        for selector in [".close-modal", ".modal-close-btn"] {
            if let Some(btn) = document.query_selector(selector).ok().flatten() {
                let modal = modal.clone();
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    app.borrow().view.audio.play(SoundEffect::Click);
                    let _ = modal.class_list().remove_1("show");
                });
                let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        // Close when clicking the backdrop
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let target = event.target().and_then(|t| t.dyn_into::<Element>().ok());
            if target.as_ref() == Some(&modal) {
                let _ = modal.class_list().remove_1("show");
            }
        });
        let _ = window.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            spin_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn spin_loop(app: Rc<RefCell<App>>, time: f64) {
        let status = app.borrow_mut().step(time);
        match status {
            FrameStatus::Spinning { .. } => request_animation_frame(app),
            FrameStatus::Finished { winner, .. } => {
                app.borrow_mut().on_spin_finished();
                set_timeout(REVEAL_DELAY_MS, move || {
                    app.borrow_mut().show_winner(&winner);
                });
            }
            FrameStatus::Idle => {}
        }
    }

    fn set_timeout(ms: i32, f: impl FnOnce() + 'static) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(f);
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            ms,
        );
        closure.forget();
    }

    fn spawn_confetti(document: &Document, pieces: &[effects::ConfettiPiece]) {
        let Some(body) = document.body() else { return };
        for piece in pieces {
            let Ok(el) = document.create_element("div") else { continue };
            el.set_class_name("confetti");
            let _ = el.set_attribute(
                "style",
                &format!(
                    "position: fixed; left: {:.2}%; top: -10px; background-color: {}; \
                     animation-delay: {:.2}s; animation-duration: {:.2}s; z-index: 9999;",
                    piece.left_percent, piece.color, piece.delay_s, piece.duration_s
                ),
            );
            if body.append_child(&el).is_ok() {
                set_timeout(CONFETTI_LIFETIME_MS, move || el.remove());
            }
        }
    }

    fn spawn_sparkles(document: &Document, canvas: &HtmlCanvasElement, rng: &mut Pcg32) {
        let Some(container) = document.query_selector(".wheel-container").ok().flatten() else {
            return;
        };
        let rect = canvas.get_bounding_client_rect();
        let container_rect = container.get_bounding_client_rect();
        let origin = DVec2::new(
            rect.left() - container_rect.left() + rect.width() / 2.0,
            rect.top() - container_rect.top() + rect.height() / 2.0,
        );

        for sparkle in effects::sparkle_ring(rng, rect.width() / 2.0) {
            let Ok(el) = document.create_element("div") else { continue };
            el.set_class_name("sparkle");
            let pos = origin + sparkle.pos;
            let _ = el.set_attribute(
                "style",
                &format!(
                    "left: {:.1}px; top: {:.1}px; --tx: {:.1}px; --ty: {:.1}px;",
                    pos.x, pos.y, sparkle.drift.x, sparkle.drift.y
                ),
            );
            if container.append_child(&el).is_ok() {
                set_timeout(SPARKLE_LIFETIME_MS, move || el.remove());
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_wheel::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Prize Wheel (native) starting...");
    log::info!("The wheel UI needs a browser - run with `trunk serve` for the web version");

    println!("\nRunning a scripted spin...");
    demo_spin();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Logs every stage of a spin instead of drawing it
#[cfg(not(target_arch = "wasm32"))]
struct LogHooks {
    frames: usize,
}

#[cfg(not(target_arch = "wasm32"))]
impl prize_wheel::WheelHooks for LogHooks {
    fn render(&mut self, rotation: f64, _entries: &[String], highlight: Option<usize>) {
        self.frames += 1;
        log::trace!("frame {} rotation {:.4} highlight {:?}", self.frames, rotation, highlight);
    }

    fn spin_complete(&mut self, winner: &str, index: usize) {
        log::info!("Spin complete after {} frames: {} (segment {})", self.frames, winner, index);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn demo_spin() {
    use prize_wheel::wheel::geometry::segment_under_pointer;
    use prize_wheel::{FrameStatus, WheelEngine, WheelSettings};

    let mut engine = WheelEngine::new(WheelSettings::default(), 2024);
    let entries = engine.set_entries_from_text("Alice\nBob\nCarol\nDave\nEve").len();

    if let Err(e) = engine.request_spin() {
        eprintln!("Spin refused: {}", e);
        return;
    }

    let mut hooks = LogHooks { frames: 0 };
    let mut now = 0.0;
    loop {
        match engine.advance(now, &mut hooks) {
            FrameStatus::Spinning { .. } => now += 1000.0 / 60.0,
            FrameStatus::Finished { winner, index } => {
                if segment_under_pointer(engine.rotation(), entries) != index {
                    log::warn!("Pointer disagrees with the reported winner");
                }
                println!("✓ Winner: {} (rested at {:.3} rad)", winner, engine.rotation());
                break;
            }
            FrameStatus::Idle => break,
        }
    }
}
