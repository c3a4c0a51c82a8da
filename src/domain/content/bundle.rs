//! JSON content bundles
//!
//! ```json
//! {
//!   "types": [{ "key": "sand", "density": 1.5, "heatCapacity": 0.2,
//!               "meltingPoint": 1700, "color": "#e6c229" }],
//!   "interactions": [{ "type": "sand", "neighbor": "water", "target": "self",
//!                      "effect": { "kind": "scaleVelocity", "factor": 0.9 } }],
//!   "reactions": [{ "reactant": "water", "partner": "fire", "becomes": "steam",
//!                   "temperatureDelta": -20 }]
//! }
//! ```

use std::collections::HashMap;

use serde::Deserialize;

use crate::elements::{
    parse_color, ElementId, ParticleType, PhysicalState, EL_NONE, FALLBACK_KEY, NONE_KEY,
};
use crate::reactions::{ChemicalReaction, Effect, PairTable, ReactionTable, Rule, Side};

use super::{key_map, none_placeholder, ContentError, ContentRegistry};

impl ContentRegistry {
    /// Replace the built-in table with a bundle. Rule and reaction targets may
    /// name "none" to destroy a particle.
    pub fn from_bundle_json(json: &str) -> Result<Self, ContentError> {
        let bundle: BundleRoot = serde_json::from_str(json)?;
        Self::from_bundle(bundle)
    }

    fn from_bundle(bundle: BundleRoot) -> Result<Self, ContentError> {
        // +1 for the "none" slot
        let count = bundle.types.len() + 1;
        if count > (ElementId::MAX as usize) + 1 {
            return Err(ContentError::TooManyTypes(bundle.types.len()));
        }

        let mut types = Vec::with_capacity(count);
        types.push(none_placeholder());
        for t in bundle.types.into_iter() {
            let props = t.into_props()?;
            if types.iter().any(|existing: &ParticleType| existing.key == props.key) {
                return Err(ContentError::DuplicateKey(props.key));
            }
            types.push(props);
        }

        let key_to_id = key_map(&types);
        let fallback = key_to_id
            .get(FALLBACK_KEY)
            .copied()
            .ok_or(ContentError::MissingFallback(FALLBACK_KEY))?;

        let mut rules = PairTable::new(count);
        for i in bundle.interactions.into_iter() {
            let context = format!("interaction {} -> {}", i.element, i.neighbor);
            let source = lookup(&key_to_id, &i.element, &context)?;
            let neighbor = lookup(&key_to_id, &i.neighbor, &context)?;
            if source == EL_NONE || neighbor == EL_NONE {
                return Err(ContentError::ReservedKey(NONE_KEY.to_string()));
            }
            let effect = i.effect.resolve(&key_to_id, &context)?;
            let rule = Rule { target: i.target, effect };
            if rules.insert(source, neighbor, rule).is_some() {
                return Err(ContentError::DuplicateInteraction {
                    element: i.element,
                    neighbor: i.neighbor,
                });
            }
        }

        let mut reactions = ReactionTable::new(count);
        for r in bundle.reactions.into_iter() {
            let context = format!("reaction {} + {}", r.reactant, r.partner);
            let reactant = lookup(&key_to_id, &r.reactant, &context)?;
            let partner = lookup(&key_to_id, &r.partner, &context)?;
            if reactant == EL_NONE || partner == EL_NONE {
                return Err(ContentError::ReservedKey(NONE_KEY.to_string()));
            }
            let reaction = ChemicalReaction {
                reactant,
                partner,
                becomes: lookup(&key_to_id, &r.becomes, &context)?,
                temperature_delta: finite(&context, "temperatureDelta", r.temperature_delta)?,
                above: r.above.map(|v| finite(&context, "above", v)).transpose()?,
            };
            if reactions.insert(reaction).is_some() {
                return Err(ContentError::DuplicateReaction {
                    reactant: r.reactant,
                    partner: r.partner,
                });
            }
        }

        Ok(Self::assemble(types, key_to_id, fallback, rules, reactions))
    }
}

fn lookup(
    key_to_id: &HashMap<String, ElementId>,
    key: &str,
    context: &str,
) -> Result<ElementId, ContentError> {
    key_to_id
        .get(key)
        .copied()
        .ok_or_else(|| ContentError::UnknownType {
            context: context.to_string(),
            key: key.to_string(),
        })
}

fn finite(key: &str, field: &'static str, value: f64) -> Result<f32, ContentError> {
    let v = value as f32;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ContentError::NonFinite { key: key.to_string(), field })
    }
}

fn non_negative(key: &str, field: &'static str, value: f64) -> Result<f32, ContentError> {
    let v = finite(key, field, value)?;
    if v < 0.0 {
        return Err(ContentError::Negative { key: key.to_string(), field });
    }
    Ok(v)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BundleRoot {
    types: Vec<BundleType>,
    #[serde(default)]
    interactions: Vec<BundleInteraction>,
    #[serde(default)]
    reactions: Vec<BundleReaction>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BundleType {
    key: String,
    density: f64,
    #[serde(default)]
    heat_capacity: Option<f64>,
    #[serde(default)]
    melting_point: Option<f64>,
    #[serde(default)]
    boiling_point: Option<f64>,
    #[serde(default)]
    ignition_point: Option<f64>,
    color: String,
    #[serde(default)]
    state: PhysicalState,
}

impl BundleType {
    fn into_props(self) -> Result<ParticleType, ContentError> {
        if self.key.is_empty() {
            return Err(ContentError::EmptyKey);
        }
        if self.key == NONE_KEY {
            return Err(ContentError::ReservedKey(self.key));
        }
        let key = self.key.as_str();
        let color = parse_color(&self.color).ok_or_else(|| ContentError::InvalidColor {
            key: self.key.clone(),
            value: self.color.clone(),
        })?;

        Ok(ParticleType {
            density: finite(key, "density", self.density)?,
            heat_capacity: self
                .heat_capacity
                .map(|v| non_negative(key, "heatCapacity", v))
                .transpose()?,
            melting_point: self.melting_point.map(|v| finite(key, "meltingPoint", v)).transpose()?,
            boiling_point: self.boiling_point.map(|v| finite(key, "boilingPoint", v)).transpose()?,
            ignition_point: self
                .ignition_point
                .map(|v| finite(key, "ignitionPoint", v))
                .transpose()?,
            color,
            state: self.state,
            key: self.key,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BundleInteraction {
    #[serde(rename = "type")]
    element: String,
    neighbor: String,
    #[serde(default)]
    target: Side,
    effect: BundleEffect,
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
enum BundleEffect {
    ScaleVelocity { factor: f64 },
    AdjustTemperature { delta: f64 },
    SetLifetime { value: i32 },
    Retype {
        becomes: String,
        #[serde(default)]
        above: Option<f64>,
    },
    Ignite { becomes: String },
}

impl BundleEffect {
    fn resolve(
        self,
        key_to_id: &HashMap<String, ElementId>,
        context: &str,
    ) -> Result<Effect, ContentError> {
        Ok(match self {
            BundleEffect::ScaleVelocity { factor } => Effect::ScaleVelocity {
                factor: finite(context, "factor", factor)?,
            },
            BundleEffect::AdjustTemperature { delta } => Effect::AdjustTemperature {
                delta: finite(context, "delta", delta)?,
            },
            BundleEffect::SetLifetime { value } => Effect::SetLifetime { value },
            BundleEffect::Retype { becomes, above } => Effect::Retype {
                becomes: lookup(key_to_id, &becomes, context)?,
                above: above.map(|v| finite(context, "above", v)).transpose()?,
            },
            BundleEffect::Ignite { becomes } => Effect::Ignite {
                becomes: lookup(key_to_id, &becomes, context)?,
            },
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BundleReaction {
    reactant: String,
    partner: String,
    becomes: String,
    #[serde(default)]
    temperature_delta: f64,
    #[serde(default)]
    above: Option<f64>,
}
