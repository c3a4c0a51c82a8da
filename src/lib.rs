//! Sandpit Engine - particle interaction core for the 3D sandbox
//!
//! Each tick the host hands over its particle records; the core applies
//! temperature, phase changes, lifetimes and neighbor reactions in place and
//! hands them back. Motion belongs to the host's physics integrator.
//!
//! Architecture:
//! - core/          - math
//! - domain/        - element ids, particle record, content registry
//! - spatial/       - hash grid for neighbor queries
//! - systems/       - thermal model, reactions, transition engine
//! - simulation/    - per-tick coordinator
//! - api/           - JSON records and the wasm facade

pub mod core;
pub mod spatial;
pub mod domain;
pub mod systems;
pub mod simulation;
pub mod api;

// Short paths used throughout the crate
pub use spatial::grid;
pub use domain::elements;
pub use systems::reactions;
pub use systems::temperature;
pub use systems::transitions;

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    // A logger installed by an earlier call wins
    if console_log::init_with_level(log::Level::Info).is_ok() {
        log::info!("Sandpit engine {} initialized", env!("CARGO_PKG_VERSION"));
    }
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use api::wasm::World;
pub use crate::core::Vec3;
pub use domain::content::{ContentError, ContentRegistry};
pub use domain::particle::Particle;
pub use simulation::{ConfigError, Region, SimConfig, Simulator, StepStats};

// Export built-in element ids for JS
#[wasm_bindgen]
pub fn el_none() -> u8 { domain::elements::EL_NONE }
#[wasm_bindgen]
pub fn el_sand() -> u8 { domain::elements::EL_SAND }
#[wasm_bindgen]
pub fn el_water() -> u8 { domain::elements::EL_WATER }
#[wasm_bindgen]
pub fn el_steam() -> u8 { domain::elements::EL_STEAM }
#[wasm_bindgen]
pub fn el_fire() -> u8 { domain::elements::EL_FIRE }
#[wasm_bindgen]
pub fn el_wood() -> u8 { domain::elements::EL_WOOD }
#[wasm_bindgen]
pub fn el_stone() -> u8 { domain::elements::EL_STONE }
#[wasm_bindgen]
pub fn el_smoke() -> u8 { domain::elements::EL_SMOKE }
#[wasm_bindgen]
pub fn el_lava() -> u8 { domain::elements::EL_LAVA }
