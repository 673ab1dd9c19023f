//! Browser bindings
//!
//! The page rasterizes the level image into a canvas, reads its RGBA pixels
//! and hands them to `WebRace`. After that it calls `frame` from its
//! `requestAnimationFrame` loop and draws whatever `snapshot` returns.

use wasm_bindgen::prelude::*;

use crate::session::{RacePhase, RaceSession};
use crate::settings::RaceSettings;
use crate::sim::WalkabilityMap;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // A second init (e.g. hot reload) keeps the first logger
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Goal Rush module loaded");
}

/// A race driven by the page's animation loop
#[wasm_bindgen]
pub struct WebRace {
    session: RaceSession,
}

#[wasm_bindgen]
impl WebRace {
    /// Build a race from canvas pixels
    ///
    /// `settings_json` may be empty for the default race. Without a `seed`
    /// the current time is used.
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: u32,
        height: u32,
        rgba: &[u8],
        settings_json: &str,
        seed: Option<f64>,
    ) -> Result<WebRace, JsValue> {
        let settings = if settings_json.trim().is_empty() {
            RaceSettings::default()
        } else {
            RaceSettings::from_json(settings_json).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        let map = WalkabilityMap::from_rgba(width, height, rgba)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let seed = seed.unwrap_or_else(js_sys::Date::now) as u64;
        log::info!("Race seeded with {}", seed);

        Ok(WebRace {
            session: RaceSession::new(map, &settings, seed),
        })
    }

    /// Advance one animation frame; returns true once the race is over
    pub fn frame(&mut self, dt_secs: f32) -> bool {
        self.session.frame(dt_secs);
        self.session.phase() == RacePhase::Finished
    }

    /// Seconds left before the start
    pub fn countdown(&self) -> u32 {
        self.session.countdown()
    }

    /// Countdown roster lines, one per racer
    pub fn roster(&self) -> Vec<String> {
        self.session.roster_lines()
    }

    /// Win message once there is a winner
    pub fn banner(&self) -> Option<String> {
        self.session.banner()
    }

    /// Current frame as JSON
    pub fn snapshot(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.snapshot()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
