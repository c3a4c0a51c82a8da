//! Domain - particle types, the particle record and the content registry

pub mod content;
pub mod elements;
pub mod particle;
