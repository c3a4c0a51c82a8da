//! Particle - the mutable simulation unit handed in by the host each tick

use crate::core::Vec3;
use crate::elements::{is_particle, ElementId, EL_NONE};

/// Ambient temperature in °C; also the passive cooling floor
pub const AMBIENT_TEMPERATURE: f32 = 20.0;
/// Ticks a freshly spawned particle lives
pub const DEFAULT_LIFETIME: i32 = 100;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub element: ElementId,
    /// Owned by the external physics integrator; never moved here
    pub position: Vec3,
    /// °C
    pub temperature: f32,
    /// Countdown in ticks, expires at <= 0
    pub lifetime: i32,
    pub velocity: Vec3,
    /// Gains heat every tick instead of cooling
    pub heat_source: bool,
}

impl Particle {
    pub fn new(element: ElementId, position: Vec3) -> Self {
        Self {
            element,
            position,
            temperature: AMBIENT_TEMPERATURE,
            lifetime: DEFAULT_LIFETIME,
            velocity: Vec3::ZERO,
            heat_source: false,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_lifetime(mut self, lifetime: i32) -> Self {
        self.lifetime = lifetime;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn as_heat_source(mut self) -> Self {
        self.heat_source = true;
        self
    }

    /// Carries the "none" sentinel and will be dropped
    #[inline]
    pub fn is_expired(&self) -> bool {
        !is_particle(self.element)
    }

    #[inline]
    pub fn expire(&mut self) {
        self.element = EL_NONE;
    }
}

/// Borrow two distinct particles mutably
pub fn pair_mut(particles: &mut [Particle], a: usize, b: usize) -> (&mut Particle, &mut Particle) {
    debug_assert_ne!(a, b, "pair_mut: a particle cannot interact with itself");
    if a < b {
        let (lo, hi) = particles.split_at_mut(b);
        (&mut lo[a], &mut hi[0])
    } else {
        let (lo, hi) = particles.split_at_mut(a);
        (&mut hi[0], &mut lo[b])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{EL_FIRE, EL_SAND, EL_WATER};

    #[test]
    fn new_particle_uses_ambient_defaults() {
        let p = Particle::new(EL_SAND, Vec3::ZERO);
        assert_eq!(p.temperature, AMBIENT_TEMPERATURE);
        assert_eq!(p.lifetime, DEFAULT_LIFETIME);
        assert_eq!(p.velocity, Vec3::ZERO);
        assert!(!p.heat_source);
        assert!(!p.is_expired());
    }

    #[test]
    fn expire_sets_sentinel() {
        let mut p = Particle::new(EL_SAND, Vec3::ZERO);
        p.expire();
        assert!(p.is_expired());
        assert_eq!(p.element, EL_NONE);
    }

    #[test]
    fn pair_mut_returns_requested_order() {
        let mut ps = vec![
            Particle::new(EL_SAND, Vec3::ZERO),
            Particle::new(EL_WATER, Vec3::ZERO),
            Particle::new(EL_FIRE, Vec3::ZERO),
        ];
        let (a, b) = pair_mut(&mut ps, 2, 0);
        assert_eq!(a.element, EL_FIRE);
        assert_eq!(b.element, EL_SAND);
        let (a, b) = pair_mut(&mut ps, 1, 2);
        assert_eq!(a.element, EL_WATER);
        assert_eq!(b.element, EL_FIRE);
    }
}
