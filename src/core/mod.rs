//! Core - small shared building blocks
//!
//! - `Vec3`: position/velocity math

mod vec3;

pub use vec3::Vec3;
