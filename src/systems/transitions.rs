//! Transition Engine - per-particle state machine, evaluated in a fixed order
//!
//! 1. Phase change from temperature (boil -> steam, melt -> lava)
//! 2. Lifetime countdown, expiry ends the particle's turn
//! 3. Neighbor interactions: heat transfer, then the registry rule,
//!    then the chemical reaction table
//!
//! Phase changes run first so later interaction checks in the same tick see
//! the new type.

use crate::domain::content::ContentRegistry;
use crate::domain::particle::Particle;
use crate::temperature::{transfer_heat, ThermalConfig};

/// Counts for one particle's interaction pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InteractionTally {
    pub pairs: u32,
    pub heat_exchanges: u32,
    pub rules_applied: u32,
    pub reactions_applied: u32,
}

/// Step 1. Both thresholds are read from the type the particle had on entry;
/// when both are exceeded melting wins. Returns true if the type changed.
pub fn apply_phase_transition(content: &ContentRegistry, particle: &mut Particle) -> bool {
    let pc = content.phase_change(particle.element);
    let mut next = particle.element;

    if let Some((boiling_point, steam)) = pc.boil {
        if particle.temperature > boiling_point {
            next = steam;
        }
    }
    if let Some((melting_point, lava)) = pc.melt {
        if particle.temperature > melting_point {
            next = lava;
        }
    }

    if next != particle.element {
        particle.element = next;
        true
    } else {
        false
    }
}

/// Step 2. Returns true when the particle expired this tick.
pub fn tick_lifetime(particle: &mut Particle) -> bool {
    particle.lifetime = particle.lifetime.saturating_sub(1);
    if particle.lifetime <= 0 {
        particle.expire();
        true
    } else {
        false
    }
}

/// Step 3 for one (particle, neighbor) pair
pub fn interact(
    content: &ContentRegistry,
    thermal: &ThermalConfig,
    particle: &mut Particle,
    neighbor: &mut Particle,
    tally: &mut InteractionTally,
) {
    tally.pairs += 1;

    if transfer_heat(content, thermal, particle, neighbor) {
        tally.heat_exchanges += 1;
    }

    // Types as seen before this pair's rule ran; the reaction table is
    // keyed on them independently of what the rule did.
    let (a_type, b_type) = (particle.element, neighbor.element);

    if let Some(rule) = content.interaction(a_type, b_type) {
        if rule.apply(content, particle, neighbor) {
            tally.rules_applied += 1;
        }
    }

    if let Some(reaction) = content.reaction(a_type, b_type) {
        if reaction.apply(a_type, particle, neighbor) {
            tally.reactions_applied += 1;
        }
    }
}
