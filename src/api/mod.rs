//! API - host-facing surface
//!
//! - `records`: JSON particle records exchanged with the JS renderer
//! - `wasm`: wasm-bindgen `World` facade

pub mod records;
pub mod wasm;

pub use records::{simulate_json, ParticleRecord};
