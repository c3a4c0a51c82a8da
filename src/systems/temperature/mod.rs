//! Temperature System - ambient drift and pairwise heat exchange
//!
//! - Heat sources gain a fixed amount per tick, everything else cools
//!   passively toward (never below) the ambient floor
//! - Leaving the comfort band shortens a particle's life
//! - Pairwise exchange is weighted by heat capacity: the particle with the
//!   larger capacity changes temperature more slowly

use crate::domain::content::ContentRegistry;
use crate::domain::particle::{Particle, AMBIENT_TEMPERATURE};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThermalConfig {
    /// Passive cooling floor, °C
    pub ambient_temperature: f32,
    /// °C lost per tick by non-sources
    pub cooling_rate: f32,
    /// °C gained per tick by heat sources
    pub heat_source_gain: f32,
    /// Fraction of the temperature gap closed per exchange
    pub transfer_rate: f32,
    pub comfort_min: f32,
    pub comfort_max: f32,
    /// Lifetime lost per tick outside the comfort band
    pub extreme_lifetime_penalty: i32,
}

impl Default for ThermalConfig {
    fn default() -> Self {
        Self {
            ambient_temperature: AMBIENT_TEMPERATURE,
            cooling_rate: 0.1,
            heat_source_gain: 5.0,
            transfer_rate: 0.1,
            comfort_min: 0.0,
            comfort_max: 100.0,
            extreme_lifetime_penalty: 10,
        }
    }
}

/// Per-tick drift toward ambient (or away from it for heat sources)
pub fn apply_ambient_effects(particle: &mut Particle, config: &ThermalConfig) {
    if particle.heat_source {
        particle.temperature += config.heat_source_gain;
    } else {
        particle.temperature -= config.cooling_rate;
    }
    particle.temperature = particle.temperature.max(config.ambient_temperature);

    if particle.temperature < config.comfort_min || particle.temperature > config.comfort_max {
        particle.lifetime = particle.lifetime.saturating_sub(config.extreme_lifetime_penalty);
    }
}

/// Exchange heat between a pair. Returns false when either side has no
/// heat capacity (or both are zero) and nothing moved.
pub fn transfer_heat(
    content: &ContentRegistry,
    config: &ThermalConfig,
    a: &mut Particle,
    b: &mut Particle,
) -> bool {
    let (Some(ca), Some(cb)) = (content.heat_capacity(a.element), content.heat_capacity(b.element)) else {
        return false;
    };
    let total = ca + cb;
    if total <= 0.0 {
        return false;
    }

    let flow = (a.temperature - b.temperature) * config.transfer_rate;
    a.temperature -= flow * (cb / total);
    b.temperature += flow * (ca / total);
    true
}
