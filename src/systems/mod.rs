//! Systems - per-tick rules applied by the simulation coordinator

pub mod reactions;
pub mod temperature;
pub mod transitions;
