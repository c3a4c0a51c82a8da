use crate::core::Vec3;
use crate::domain::content::ContentRegistry;
use crate::domain::particle::Particle;

use super::SimConfig;

/// Bring a live particle to a fully defined state before it enters the grid.
/// Returns true when anything was repaired.
pub(super) fn ensure_defaults(
    content: &ContentRegistry,
    config: &SimConfig,
    particle: &mut Particle,
    index: usize,
) -> bool {
    let mut repaired = false;

    if !particle.position.is_finite() {
        log::warn!(
            "particle {}: non-finite position {:?}, moved to origin",
            index,
            particle.position.to_array()
        );
        particle.position = Vec3::ZERO;
        repaired = true;
    }

    if !content.is_valid_element_id(particle.element) {
        let fallback = content.fallback_id();
        log::warn!(
            "particle {}: unknown type id {}, treating as {}",
            index,
            particle.element,
            content.key_of(fallback)
        );
        particle.element = fallback;
        repaired = true;
    }

    repair_non_finite(config, particle, index) || repaired
}

/// Reset temperature/velocity that are NaN or infinite
pub(super) fn repair_non_finite(config: &SimConfig, particle: &mut Particle, index: usize) -> bool {
    let mut repaired = false;

    if !particle.temperature.is_finite() {
        log::warn!(
            "particle {}: temperature {} reset to ambient",
            index,
            particle.temperature
        );
        particle.temperature = config.thermal.ambient_temperature;
        repaired = true;
    }

    if !particle.velocity.is_finite() {
        log::warn!("particle {}: non-finite velocity reset to zero", index);
        particle.velocity = Vec3::ZERO;
        repaired = true;
    }

    repaired
}
