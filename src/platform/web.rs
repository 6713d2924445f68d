//! Browser embedding
//!
//! JS owns the canvas, the animation frame loop and pointer normalization;
//! it calls into `WebGame` once per frame and once per pointer event.
//! Events and snapshots cross the boundary as JSON strings.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::sim::{GameEvent, GameState};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("Fruit Slicer core loaded");
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn events_json(events: &[GameEvent]) -> Result<String, JsValue> {
    serde_json::to_string(events).map_err(to_js)
}

#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
}

#[wasm_bindgen]
impl WebGame {
    /// Create a game for a canvas. `tuning_json` may override any tuning field.
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: f32,
        height: f32,
        seed: u64,
        tuning_json: Option<String>,
    ) -> Result<WebGame, JsValue> {
        let tuning = match tuning_json {
            Some(json) => Tuning::from_json(&json).map_err(to_js)?,
            None => Tuning::default(),
        };
        let tuning = tuning.with_canvas(width, height);
        tuning.validate().map_err(to_js)?;
        log::info!("Game created: {}x{}, seed {}", width, height, seed);
        Ok(Self {
            state: GameState::new(tuning, seed),
        })
    }

    pub fn start(&mut self) {
        self.state.start();
    }

    /// One tick at the given wall-clock time; returns emitted events as JSON
    pub fn advance(&mut self, now: f64) -> Result<String, JsValue> {
        events_json(&self.state.advance(now))
    }

    /// One tick at the browser's current time
    pub fn advance_now(&mut self) -> Result<String, JsValue> {
        self.advance(js_sys::Date::now())
    }

    pub fn begin_stroke(&mut self, x: f32, y: f32) {
        self.state.begin_stroke(Vec2::new(x, y), js_sys::Date::now());
    }

    pub fn move_stroke(&mut self, x: f32, y: f32) -> Result<String, JsValue> {
        let events = self
            .state
            .move_stroke_to(Vec2::new(x, y), js_sys::Date::now());
        events_json(&events)
    }

    pub fn end_stroke(&mut self) {
        self.state.end_stroke();
    }

    pub fn snapshot(&self) -> Result<String, JsValue> {
        self.state.snapshot().to_json().map_err(to_js)
    }

    pub fn score(&self) -> f64 {
        self.state.score() as f64
    }

    pub fn lives(&self) -> u8 {
        self.state.lives()
    }

    pub fn multiplier(&self) -> u32 {
        self.state.multiplier()
    }
}
