//! Reactions - Data-Driven Pairwise Interaction System
//!
//! Two layers, both plain data looked up by type id:
//! - `Rule`: directed, keyed by (particle type -> neighbor type), one `Effect`
//!   on one side of the pair
//! - `ChemicalReaction`: keyed by the unordered pair, retypes the reactant side
//!
//! Lookups are O(1) through `PairTable`, a dense id x id table.

mod table;

pub use table::PairTable;

use serde::{Deserialize, Serialize};

use crate::domain::content::ContentRegistry;
use crate::domain::particle::Particle;
use crate::elements::ElementId;

/// Which particle of an interacting pair an effect lands on
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// The particle being updated
    #[default]
    #[serde(rename = "self")]
    Source,
    /// The particle found nearby
    #[serde(rename = "neighbor")]
    Neighbor,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    ScaleVelocity { factor: f32 },
    AdjustTemperature { delta: f32 },
    SetLifetime { value: i32 },
    /// Retype, optionally only when hotter than `above`
    Retype { becomes: ElementId, above: Option<f32> },
    /// Retype once hotter than the affected particle type's ignition point
    Ignite { becomes: ElementId },
}

impl Effect {
    /// Returns true when the effect fired
    pub fn apply(&self, content: &ContentRegistry, particle: &mut Particle) -> bool {
        match *self {
            Effect::ScaleVelocity { factor } => {
                particle.velocity *= factor;
                true
            }
            Effect::AdjustTemperature { delta } => {
                particle.temperature += delta;
                true
            }
            Effect::SetLifetime { value } => {
                particle.lifetime = value;
                true
            }
            Effect::Retype { becomes, above } => {
                if above.map_or(true, |t| particle.temperature > t) {
                    particle.element = becomes;
                    true
                } else {
                    false
                }
            }
            Effect::Ignite { becomes } => match content.resolve(particle.element).ignition_point {
                Some(point) if particle.temperature > point => {
                    particle.element = becomes;
                    true
                }
                _ => false,
            },
        }
    }
}

/// Registry-driven interaction rule
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rule {
    pub target: Side,
    pub effect: Effect,
}

impl Rule {
    pub fn on_source(effect: Effect) -> Self {
        Self { target: Side::Source, effect }
    }

    pub fn on_neighbor(effect: Effect) -> Self {
        Self { target: Side::Neighbor, effect }
    }

    pub fn apply(&self, content: &ContentRegistry, source: &mut Particle, neighbor: &mut Particle) -> bool {
        let particle = match self.target {
            Side::Source => source,
            Side::Neighbor => neighbor,
        };
        if particle.is_expired() {
            return false;
        }
        self.effect.apply(content, particle)
    }
}

/// Chemical reaction between an unordered pair of types.
/// Only the reactant side transforms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChemicalReaction {
    pub reactant: ElementId,
    pub partner: ElementId,
    pub becomes: ElementId,
    pub temperature_delta: f32,
    /// Reactant must be hotter than this
    pub above: Option<f32>,
}

impl ChemicalReaction {
    /// `a_type` is the type `a` carried when the pair was looked up, so a rule
    /// that already retyped `a` earlier in the same interaction does not flip
    /// which side reacts.
    pub fn apply(&self, a_type: ElementId, a: &mut Particle, b: &mut Particle) -> bool {
        let reactant = if a_type == self.reactant { a } else { b };
        if reactant.is_expired() {
            return false;
        }
        if let Some(threshold) = self.above {
            if !(reactant.temperature > threshold) {
                return false;
            }
        }
        reactant.element = self.becomes;
        reactant.temperature += self.temperature_delta;
        true
    }
}

/// Unordered-pair view over a `PairTable`
#[derive(Clone, Debug)]
pub struct ReactionTable {
    table: PairTable<ChemicalReaction>,
    len: usize,
}

impl ReactionTable {
    pub fn new(element_count: usize) -> Self {
        Self { table: PairTable::new(element_count), len: 0 }
    }

    /// Register under both orders; returns the reaction it replaced
    pub fn insert(&mut self, reaction: ChemicalReaction) -> Option<ChemicalReaction> {
        let previous = self.table.insert(reaction.reactant, reaction.partner, reaction);
        self.table.insert(reaction.partner, reaction.reactant, reaction);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    #[inline]
    pub fn get(&self, a: ElementId, b: ElementId) -> Option<&ChemicalReaction> {
        self.table.get(a, b)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
