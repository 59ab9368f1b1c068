//! DOM renderer
//!
//! Words are absolutely positioned `<span class="word">` children of the
//! playfield, moved with CSS transforms. Floaters are existing panels.

use std::collections::HashMap;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, HtmlInputElement};

use super::Renderer;
use crate::sim::{Bounds, FloaterKey, WordId};

/// How long the input shakes after a miss (ms)
const SHAKE_MS: i32 = 180;

pub struct DomRenderer {
    document: Document,
    playfield: HtmlElement,
    frame: HtmlElement,
    input: Option<HtmlInputElement>,
    words: HashMap<WordId, HtmlElement>,
    floaters: HashMap<FloaterKey, HtmlElement>,
}

fn translate(el: &HtmlElement, pos: Vec2) {
    let _ = el
        .style()
        .set_property("transform", &format!("translate({}px, {}px)", pos.x, pos.y));
}

/// Run `f` on the next animation frame
fn next_frame(f: impl FnOnce() + 'static) {
    if let Some(window) = web_sys::window() {
        let cb = Closure::once_into_js(f);
        let _ = window.request_animation_frame(cb.unchecked_ref());
    }
}

impl DomRenderer {
    /// Look up the page elements. `None` if the playfield or frame is missing.
    pub fn new(document: &Document) -> Option<Self> {
        let by_id = |id: &str| -> Option<HtmlElement> {
            document.get_element_by_id(id)?.dyn_into::<HtmlElement>().ok()
        };
        let by_selector = |sel: &str| -> Option<HtmlElement> {
            document
                .query_selector(sel)
                .ok()
                .flatten()?
                .dyn_into::<HtmlElement>()
                .ok()
        };

        let playfield = by_id("playfield")?;
        let frame = by_id("frame")?;
        let input = document
            .get_element_by_id("word-input")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());

        let floaters = [
            (FloaterKey::Hero, ".hero"),
            (FloaterKey::Stats, ".stats"),
            (FloaterKey::Controls, ".game-controls"),
        ]
        .into_iter()
        .filter_map(|(key, sel)| Some((key, by_selector(sel)?)))
        .collect();

        Some(Self {
            document: document.clone(),
            playfield,
            frame,
            input,
            words: HashMap::new(),
            floaters,
        })
    }

    pub fn input(&self) -> Option<&HtmlInputElement> {
        self.input.as_ref()
    }
}

impl Renderer for DomRenderer {
    fn playfield(&self) -> Bounds {
        let rect = self.playfield.get_bounding_client_rect();
        Bounds::new(rect.width() as f32, rect.height() as f32)
    }

    fn viewport(&self) -> Bounds {
        Bounds::new(
            self.frame.client_width() as f32,
            self.frame.client_height() as f32,
        )
    }

    fn create_word(&mut self, id: WordId, text: &str) -> Vec2 {
        let Some(el) = self
            .document
            .create_element("span")
            .ok()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return Vec2::ZERO;
        };
        el.set_class_name("word spawn");
        el.set_text_content(Some(text));
        let _ = el.set_attribute("data-id", &id.to_string());
        let _ = self.playfield.append_child(&el);

        let rect = el.get_bounding_client_rect();
        let size = Vec2::new(rect.width() as f32, rect.height() as f32);

        let spawned = el.clone();
        next_frame(move || {
            let _ = spawned.class_list().remove_1("spawn");
        });
        self.words.insert(id, el);
        size
    }

    fn place_word(&mut self, id: WordId, pos: Vec2) {
        if let Some(el) = self.words.get(&id) {
            translate(el, pos);
        }
    }

    fn pop_word(&mut self, id: WordId) {
        if let Some(el) = self.words.get(&id) {
            let _ = el.class_list().add_1("popping");
        }
    }

    fn remove_word(&mut self, id: WordId) {
        if let Some(el) = self.words.remove(&id) {
            el.remove();
        }
    }

    fn flash_invalid(&mut self) {
        let Some(input) = self.input.clone() else {
            return;
        };
        let _ = input.class_list().add_1("shake");
        if let Some(window) = web_sys::window() {
            let cb = Closure::once_into_js(move || {
                let _ = input.class_list().remove_1("shake");
            });
            let _ = window
                .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), SHAKE_MS);
        }
    }

    fn floater_size(&self, key: FloaterKey) -> Vec2 {
        self.floaters
            .get(&key)
            .map(|el| {
                let rect = el.get_bounding_client_rect();
                Vec2::new(rect.width() as f32, rect.height() as f32)
            })
            .unwrap_or(Vec2::ZERO)
    }

    fn place_floater(&mut self, key: FloaterKey, pos: Vec2) {
        if let Some(el) = self.floaters.get(&key) {
            translate(el, pos);
        }
    }
}
