use std::sync::Arc;

use wasm_bindgen::prelude::*;

use crate::domain::content::ContentRegistry;
use crate::simulation::Simulator;

use super::records;

/// Particle core as seen from JS: records in, mutated records out
#[wasm_bindgen]
pub struct World {
    sim: Simulator,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl World {
    /// Built-in content, default tuning
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            sim: Simulator::with_defaults(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 {
        self.sim.frame()
    }

    /// Replace the type table with a JSON content bundle
    pub fn load_content_bundle_json(&mut self, json: &str) -> Result<(), JsValue> {
        let registry = ContentRegistry::from_bundle_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("content bundle loaded: {} types", registry.element_count() - 1);
        self.sim.set_content(Arc::new(registry));
        Ok(())
    }

    pub fn content_manifest_json(&self) -> String {
        self.sim.content().manifest_json()
    }

    /// Advance one tick over a JSON array of particle records
    pub fn simulate_json(&mut self, json: &str) -> Result<String, JsValue> {
        records::simulate_json(&mut self.sim, json).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Enable or disable per-tick stats (adds timing overhead when enabled)
    pub fn enable_stats(&mut self, enabled: bool) {
        self.sim.enable_stats(enabled);
    }

    /// Last tick's stats as JSON (zeros when disabled)
    pub fn last_stats_json(&self) -> String {
        self.sim.stats().to_json()
    }
}
