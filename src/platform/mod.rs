//! Browser bindings
//!
//! Thin wasm-bindgen surface so a JS presentation layer can drive a session.
//! World state and events cross the boundary as JSON.

use wasm_bindgen::prelude::*;

use crate::settings::Settings;
use crate::sim::{LevelPlan, Phase, Session, TickInput, tick};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_ok() {
        log::info!("Neon Dash core loaded");
    }
}

/// Session handle owned by JS
#[wasm_bindgen]
pub struct WebSession {
    inner: Session,
}

#[wasm_bindgen]
impl WebSession {
    /// `plan` is "procedural", "designs", or an ASCII map used for every level.
    /// `settings_json` may be empty for the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(settings_json: &str, seed: u64, plan: &str) -> Result<WebSession, JsError> {
        let settings = if settings_json.trim().is_empty() {
            Settings::default()
        } else {
            Settings::from_json(settings_json)?
        };
        let plan = match plan {
            "procedural" => LevelPlan::Procedural,
            "designs" => LevelPlan::Designs,
            map => LevelPlan::Custom(map.to_string()),
        };
        Ok(Self {
            inner: Session::new(settings, seed, plan)?,
        })
    }

    pub fn tick(&mut self, jump: bool, pause: bool, dt: f32) {
        tick(&mut self.inner, &TickInput { jump, pause }, dt);
    }

    pub fn restart(&mut self) {
        self.inner.restart();
    }

    /// Events queued since the last call
    pub fn drain_events_json(&mut self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.inner.drain_events())?)
    }

    pub fn level_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.inner.level)?)
    }

    pub fn actor_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.inner.actor)?)
    }

    pub fn phase(&self) -> String {
        match self.inner.phase {
            Phase::Playing => "playing",
            Phase::Paused => "paused",
            Phase::GameOver => "game_over",
            Phase::LevelComplete => "level_complete",
        }
        .to_string()
    }

    pub fn level_number(&self) -> u32 {
        self.inner.level_number
    }

    pub fn score(&self) -> u64 {
        self.inner.total_score()
    }

    pub fn distance(&self) -> f32 {
        self.inner.distance
    }
}
