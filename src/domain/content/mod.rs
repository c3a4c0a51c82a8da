//! Content Registry - the particle type table every system reads from
//!
//! Built once (built-in table or a JSON content bundle) and shared as
//! `Arc<ContentRegistry>`; nothing mutates it while ticks run.
//!
//! - Unknown ids and keys resolve to the fallback type ("sand")
//! - Interaction rules: `PairTable<Rule>` keyed (type -> neighbor type)
//! - Chemical reactions: `ReactionTable` keyed by the unordered pair

use std::collections::HashMap;

use serde::Serialize;

use crate::elements::{
    ElementId, ParticleType, PhaseChange, PhysicalState, EL_NONE, FALLBACK_KEY, LAVA_KEY,
    NONE_KEY, STEAM_KEY,
};
use crate::reactions::{ChemicalReaction, PairTable, ReactionTable, Rule};

mod builtin;
mod bundle;
mod error;

pub use error::ContentError;

#[derive(Clone, Debug)]
pub struct ContentRegistry {
    types: Vec<ParticleType>,
    phase_changes: Vec<PhaseChange>,
    rules: PairTable<Rule>,
    reactions: ReactionTable,
    key_to_id: HashMap<String, ElementId>,
    fallback: ElementId,
}

impl Default for ContentRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ContentRegistry {
    /// `types[0]` must be the "none" placeholder and `fallback` a valid id
    fn assemble(
        types: Vec<ParticleType>,
        key_to_id: HashMap<String, ElementId>,
        fallback: ElementId,
        rules: PairTable<Rule>,
        reactions: ReactionTable,
    ) -> Self {
        let steam = key_to_id.get(STEAM_KEY).copied().unwrap_or_else(|| {
            log::debug!("no \"{}\" type registered; boiling falls back to {}", STEAM_KEY, FALLBACK_KEY);
            fallback
        });
        let lava = key_to_id.get(LAVA_KEY).copied().unwrap_or_else(|| {
            log::debug!("no \"{}\" type registered; melting falls back to {}", LAVA_KEY, FALLBACK_KEY);
            fallback
        });

        let phase_changes = types
            .iter()
            .enumerate()
            .map(|(idx, props)| {
                if idx == EL_NONE as usize {
                    PhaseChange::default()
                } else {
                    PhaseChange::for_type(props, steam, lava)
                }
            })
            .collect();

        Self {
            types,
            phase_changes,
            rules,
            reactions,
            key_to_id,
            fallback,
        }
    }

    /// Number of ids in use, including the "none" sentinel
    pub fn element_count(&self) -> usize {
        self.types.len()
    }

    pub fn is_valid_element_id(&self, id: ElementId) -> bool {
        (id as usize) < self.types.len()
    }

    pub fn fallback_id(&self) -> ElementId {
        self.fallback
    }

    /// Type definition for `id`; unknown ids get the fallback type
    pub fn resolve(&self, id: ElementId) -> &ParticleType {
        self.types
            .get(id as usize)
            .unwrap_or(&self.types[self.fallback as usize])
    }

    pub fn id_by_key(&self, key: &str) -> Option<ElementId> {
        self.key_to_id.get(key).copied()
    }

    /// Id for a type tag; unknown or empty tags resolve to the fallback type
    pub fn id_or_default(&self, key: &str) -> ElementId {
        match self.id_by_key(key) {
            Some(id) => id,
            None => {
                log::debug!("unknown particle type {:?}, treating as {}", key, FALLBACK_KEY);
                self.fallback
            }
        }
    }

    pub fn key_of(&self, id: ElementId) -> &str {
        &self.resolve(id).key
    }

    #[inline]
    pub fn heat_capacity(&self, id: ElementId) -> Option<f32> {
        self.resolve(id).heat_capacity
    }

    pub fn phase_change(&self, id: ElementId) -> PhaseChange {
        self.phase_changes
            .get(id as usize)
            .copied()
            .unwrap_or_else(|| self.phase_changes[self.fallback as usize])
    }

    /// Rule keyed by (particle type -> neighbor type)
    #[inline]
    pub fn interaction(&self, source: ElementId, neighbor: ElementId) -> Option<&Rule> {
        self.rules.get(source, neighbor)
    }

    #[inline]
    pub fn reaction(&self, a: ElementId, b: ElementId) -> Option<&ChemicalReaction> {
        self.reactions.get(a, b)
    }

    pub fn reactions(&self) -> &ReactionTable {
        &self.reactions
    }

    /// Ids, keys and colors for the UI palette
    pub fn manifest_json(&self) -> String {
        let types = self
            .types
            .iter()
            .enumerate()
            .map(|(idx, t)| ManifestType {
                id: idx as ElementId,
                key: &t.key,
                color: t.color_hex(),
                state: t.state,
                density: t.density,
                hidden: idx == EL_NONE as usize,
            })
            .collect();
        let interactions = self
            .rules
            .iter()
            .map(|(a, b, _)| ManifestPair {
                element: self.key_of(a),
                neighbor: self.key_of(b),
            })
            .collect();
        let out = ContentManifest {
            format_version: 1,
            fallback: self.key_of(self.fallback),
            types,
            interactions,
            reactions: self.reactions.len(),
        };
        serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
    }
}

fn none_placeholder() -> ParticleType {
    ParticleType::new(NONE_KEY, 0.0, 0x000000)
}

fn key_map(types: &[ParticleType]) -> HashMap<String, ElementId> {
    types
        .iter()
        .enumerate()
        .map(|(idx, t)| (t.key.clone(), idx as ElementId))
        .collect()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ContentManifest<'a> {
    format_version: u32,
    fallback: &'a str,
    types: Vec<ManifestType<'a>>,
    interactions: Vec<ManifestPair<'a>>,
    reactions: usize,
}

#[derive(Serialize)]
struct ManifestType<'a> {
    id: ElementId,
    key: &'a str,
    color: String,
    state: PhysicalState,
    density: f32,
    hidden: bool,
}

#[derive(Serialize)]
struct ManifestPair<'a> {
    #[serde(rename = "type")]
    element: &'a str,
    neighbor: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{EL_FIRE, EL_LAVA, EL_SAND, EL_SMOKE, EL_STEAM, EL_STONE, EL_WATER, EL_WOOD};

    #[test]
    fn builtin_ids_match_constants() {
        let c = ContentRegistry::builtin();
        assert_eq!(c.element_count(), 9);
        assert_eq!(c.id_by_key("none"), Some(EL_NONE));
        assert_eq!(c.id_by_key("sand"), Some(EL_SAND));
        assert_eq!(c.id_by_key("water"), Some(EL_WATER));
        assert_eq!(c.id_by_key("steam"), Some(EL_STEAM));
        assert_eq!(c.id_by_key("fire"), Some(EL_FIRE));
        assert_eq!(c.id_by_key("wood"), Some(EL_WOOD));
        assert_eq!(c.id_by_key("stone"), Some(EL_STONE));
        assert_eq!(c.id_by_key("smoke"), Some(EL_SMOKE));
        assert_eq!(c.id_by_key("lava"), Some(EL_LAVA));
    }

    #[test]
    fn unknown_tags_fall_back_to_sand() {
        let c = ContentRegistry::builtin();
        assert_eq!(c.id_or_default("plasma-goo"), EL_SAND);
        assert_eq!(c.id_or_default(""), EL_SAND);
        assert_eq!(c.resolve(200).key, "sand");
        assert_eq!(c.key_of(250), "sand");
    }

    #[test]
    fn smoke_does_not_exchange_heat() {
        let c = ContentRegistry::builtin();
        assert_eq!(c.heat_capacity(EL_SMOKE), None);
        assert_eq!(c.heat_capacity(EL_WATER), Some(4.186));
    }

    #[test]
    fn phase_changes_point_at_steam_and_lava() {
        let c = ContentRegistry::builtin();
        assert_eq!(c.phase_change(EL_WATER).boil, Some((100.0, EL_STEAM)));
        assert_eq!(c.phase_change(EL_SAND).melt, Some((1700.0, EL_LAVA)));
        assert_eq!(c.phase_change(EL_FIRE), PhaseChange::default());
        // Unknown id behaves like sand
        assert_eq!(c.phase_change(99), c.phase_change(EL_SAND));
    }

    #[test]
    fn manifest_lists_every_type() {
        let c = ContentRegistry::builtin();
        let v: serde_json::Value = serde_json::from_str(&c.manifest_json()).unwrap();
        assert_eq!(v["formatVersion"], 1);
        assert_eq!(v["fallback"], "sand");
        assert_eq!(v["types"].as_array().unwrap().len(), 9);
        assert_eq!(v["types"][0]["hidden"], true);
        assert_eq!(v["types"][2]["key"], "water");
        assert_eq!(v["types"][2]["color"], "#4287f5");
        assert_eq!(v["types"][2]["state"], "liquid");
        assert_eq!(v["reactions"], 4);
        assert!(!v["interactions"].as_array().unwrap().is_empty());
    }
}
