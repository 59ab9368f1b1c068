//! Word Pop entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlButtonElement, HtmlInputElement};

    use word_pop::platform::web::BrowserTimers;
    use word_pop::renderer::DomRenderer;
    use word_pop::sim::{FloaterKey, GameEvent, RoundPhase};
    use word_pop::{Game, Settings, Theme};

    type WebGame = Game<DomRenderer, BrowserTimers>;

    fn current_document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", hidden);
        }
    }

    fn set_start_enabled(document: &Document, enabled: bool) {
        if let Some(btn) = document
            .get_element_by_id("start-btn")
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
        {
            btn.set_disabled(!enabled);
        }
    }

    /// Settings from an inline `<script id="game-config" type="application/json">`
    fn load_settings(document: &Document) -> Settings {
        match document
            .get_element_by_id("game-config")
            .and_then(|el| el.text_content())
        {
            Some(json) if !json.trim().is_empty() => Settings::from_json_or_default(&json),
            _ => {
                log::info!("Using default settings");
                Settings::default()
            }
        }
    }

    fn apply_theme(document: &Document, theme: Theme) {
        if let Some(body) = document.body() {
            let classes = body.class_list();
            for t in Theme::ALL {
                let _ = classes.remove_1(&t.class_name());
            }
            let _ = classes.add_1(&theme.class_name());
        }
        if let Ok(buttons) = document.query_selector_all("[data-theme]") {
            for i in 0..buttons.length() {
                if let Some(btn) = buttons.get(i).and_then(|n| n.dyn_into::<web_sys::Element>().ok()) {
                    let active = btn.get_attribute("data-theme").as_deref() == Some(theme.as_str());
                    let _ = btn.class_list().toggle_with_force("active", active);
                }
            }
        }
    }

    /// Push HUD values and round transitions into the page
    fn sync_ui(game: &mut WebGame) {
        let Some(document) = current_document() else {
            return;
        };

        for event in game.drain_events() {
            match event {
                GameEvent::RoundStarted => {
                    set_start_enabled(&document, false);
                    set_hidden(&document, "overlay", true);
                    set_hidden(&document, "intro-overlay", true);
                }
                GameEvent::RoundEnded(summary) => {
                    set_start_enabled(&document, true);
                    set_text(&document, "overlay-title", "Time!");
                    set_text(
                        &document,
                        "overlay-detail",
                        &format!(
                            "Words: {} | Score: {} | Best streak: {}",
                            summary.popped, summary.score, summary.best_streak
                        ),
                    );
                    set_hidden(&document, "overlay", false);
                }
                GameEvent::RoundStopped => {
                    set_start_enabled(&document, true);
                    set_hidden(&document, "overlay", true);
                }
                _ => {}
            }
        }

        let hud = game.hud();
        set_text(&document, "score", &hud.score.to_string());
        set_text(&document, "popped-count", &hud.popped.to_string());
        set_text(&document, "streak", &hud.streak.to_string());
        set_text(&document, "timer", &format!("{}s", hud.time_left));
        set_text(&document, "active-count", &hud.active_count.to_string());
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Word Pop starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let settings = load_settings(&document);
        let renderer = DomRenderer::new(&document).expect("page is missing #playfield or #frame");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(
            settings,
            seed,
            renderer,
            BrowserTimers::new(),
        )));
        {
            let weak = Rc::downgrade(&game);
            game.borrow_mut().timers_mut().bind(move |task| {
                if let Some(game) = weak.upgrade() {
                    let mut g = game.borrow_mut();
                    g.run_task(task);
                    sync_ui(&mut g);
                }
            });
        }
        {
            let g = game.borrow();
            log::info!("Game initialized with seed: {}", g.seed());
            apply_theme(&document, g.settings().theme);
        }
        setup_round_buttons(&document, game.clone());
        setup_entry_form(&document, game.clone());
        setup_pin_toggles(&document, game.clone());
        setup_theme_buttons(&document, game.clone());
        setup_resize(game.clone());
        setup_intro(&document);

        sync_ui(&mut game.borrow_mut());

        // Start game loop
        request_animation_frame(game);

        log::info!("Word Pop running!");
    }

    fn on_click(document: &Document, id: &str, handler: impl FnMut() + 'static) {
        let Some(btn) = document.get_element_by_id(id) else {
            return;
        };
        let mut handler = handler;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| handler());
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Focus the entry box. Takes the `Rc` because `focus()` fires the
    /// input's focus listener synchronously, which borrows the game itself.
    fn focus_input(game: &Rc<RefCell<WebGame>>) {
        let input = game.borrow().renderer().input().cloned();
        if let Some(input) = input {
            let _ = input.focus();
        }
    }

    fn setup_round_buttons(document: &Document, game: Rc<RefCell<WebGame>>) {
        {
            let game = game.clone();
            on_click(document, "start-btn", move || {
                {
                    let mut g = game.borrow_mut();
                    g.start();
                    sync_ui(&mut g);
                }
                focus_input(&game);
            });
        }
        {
            let game = game.clone();
            on_click(document, "stop-btn", move || {
                let mut g = game.borrow_mut();
                g.stop();
                sync_ui(&mut g);
            });
        }
        on_click(document, "restart-btn", move || {
            {
                let mut g = game.borrow_mut();
                g.restart();
                sync_ui(&mut g);
            }
            focus_input(&game);
        });
    }

    fn setup_entry_form(document: &Document, game: Rc<RefCell<WebGame>>) {
        let Some(input) = document
            .get_element_by_id("word-input")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            log::warn!("No #word-input on the page; typing disabled");
            return;
        };

        if let Some(form) = document.get_element_by_id("entry-form") {
            let game = game.clone();
            let input = input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                event.prevent_default();
                let text = input.value();
                input.set_value("");
                let mut g = game.borrow_mut();
                g.submit(&text);
                sync_ui(&mut g);
            });
            let _ = form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Select leftover text on focus so the next word overwrites it
        {
            let target = input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let running = game
                    .try_borrow()
                    .is_ok_and(|g| g.phase() == RoundPhase::Running);
                if running {
                    target.select();
                }
            });
            let _ = input.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_pin_toggles(document: &Document, game: Rc<RefCell<WebGame>>) {
        let Ok(toggles) = document.query_selector_all(".pin-toggle input") else {
            return;
        };
        for i in 0..toggles.length() {
            let Some(toggle) = toggles
                .get(i)
                .and_then(|n| n.dyn_into::<HtmlInputElement>().ok())
            else {
                continue;
            };
            let Some(key) = toggle
                .get_attribute("data-floater")
                .and_then(|k| FloaterKey::from_str(&k))
            else {
                continue;
            };
            let game = game.clone();
            let target = toggle.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().set_pinned(key, target.checked());
            });
            let _ = toggle.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_theme_buttons(document: &Document, game: Rc<RefCell<WebGame>>) {
        let Ok(buttons) = document.query_selector_all("[data-theme]") else {
            return;
        };
        for i in 0..buttons.length() {
            let Some(btn) = buttons.get(i).and_then(|n| n.dyn_into::<web_sys::Element>().ok()) else {
                continue;
            };
            let Some(theme) = btn.get_attribute("data-theme").and_then(|t| Theme::from_str(&t)) else {
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let current = {
                    let mut g = game.borrow_mut();
                    g.set_theme(theme);
                    g.settings().theme
                };
                if let Some(document) = current_document() {
                    apply_theme(&document, current);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(game: Rc<RefCell<WebGame>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().resize();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_intro(document: &Document) {
        on_click(document, "intro-close", || {
            if let Some(document) = current_document() {
                set_hidden(&document, "intro-overlay", true);
            }
        });
    }

    fn request_animation_frame(game: Rc<RefCell<WebGame>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window; game loop stopped");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<WebGame>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.frame(time);
            sync_ui(&mut g);
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
    use word_pop::platform::VirtualTimers;
    use word_pop::renderer::Headless;
    use word_pop::sim::{GameEvent, RoundPhase};
    use word_pop::{Game, Settings};

    env_logger::init();
    log::info!("Word Pop (native) starting...");
    log::info!("Native mode plays one headless round - run with `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Settings::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Could not read {path}: {e}; using default settings");
                Settings::default()
            }
        },
        None => Settings::default(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0x5EED);

    let mut game = Game::new(settings, seed, Headless::default(), VirtualTimers::new());
    log::info!("Headless round with seed {} ({}s)", game.seed(), game.settings().round_seconds);
    game.start();

    // Auto-typist: one attempt every 1.5s, every fifth one a typo
    let frame_ms = 1000.0 / 60.0;
    let mut now = 0.0;
    let mut last_attempt = 0.0;
    let mut attempts = 0u32;
    while game.phase() == RoundPhase::Running {
        now += frame_ms;
        while let Some(task) = game.timers_mut().pop_due(now) {
            game.run_task(task);
        }
        game.frame(now);

        if now - last_attempt >= 1500.0 {
            last_attempt = now;
            attempts += 1;
            let guess = if attempts % 5 == 0 {
                "typo".to_string()
            } else {
                game.round
                    .active()
                    .next()
                    .map(|w| w.text.to_uppercase())
                    .unwrap_or_default()
            };
            game.submit(&guess);
        }
    }

    for event in game.drain_events() {
        if let GameEvent::RoundEnded(summary) = event {
            println!(
                "\nTime! Words: {} | Score: {} | Best streak: {}",
                summary.popped, summary.score, summary.best_streak
            );
        }
    }
}
