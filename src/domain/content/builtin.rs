use crate::elements::{
    ElementId, ParticleType, PhysicalState, EL_FIRE, EL_LAVA, EL_SAND, EL_SMOKE, EL_STEAM,
    EL_STONE, EL_WATER, EL_WOOD,
};
use crate::reactions::{ChemicalReaction, Effect, PairTable, ReactionTable, Rule};

use super::{key_map, none_placeholder, ContentRegistry};

impl ContentRegistry {
    /// Built-in table: sand, water, steam, fire, wood, stone, smoke, lava.
    /// Ids follow the `EL_*` constants.
    pub fn builtin() -> Self {
        let types = vec![
            none_placeholder(),
            ParticleType::new("sand", 1.5, 0xe6c229)
                .with_heat_capacity(0.2)
                .with_melting_point(1700.0),
            ParticleType::new("water", 1.0, 0x4287f5)
                .with_heat_capacity(4.186)
                .with_boiling_point(100.0)
                .with_state(PhysicalState::Liquid),
            ParticleType::new("steam", 0.6, 0xffffff)
                .with_heat_capacity(2.0)
                .with_state(PhysicalState::Gas),
            ParticleType::new("fire", 0.1, 0xff4500)
                .with_heat_capacity(1.0)
                .with_state(PhysicalState::Plasma),
            ParticleType::new("wood", 0.5, 0x8b4513)
                .with_heat_capacity(1.76)
                .with_ignition_point(260.0),
            ParticleType::new("stone", 2.5, 0x808080)
                .with_heat_capacity(0.8)
                .with_melting_point(1200.0),
            // No heat capacity: smoke never exchanges heat
            ParticleType::new("smoke", 0.2, 0x808080).with_state(PhysicalState::Gas),
            ParticleType::new("lava", 2.2, 0xcf1020)
                .with_heat_capacity(1.0)
                .with_state(PhysicalState::Liquid),
        ];
        let count = types.len();

        let mut rules = PairTable::new(count);
        for (source, neighbor, rule) in builtin_rules() {
            rules.insert(source, neighbor, rule);
        }

        let mut reactions = ReactionTable::new(count);
        for reaction in builtin_reactions() {
            reactions.insert(reaction);
        }

        let key_to_id = key_map(&types);
        Self::assemble(types, key_to_id, EL_SAND, rules, reactions)
    }
}

fn builtin_rules() -> [(ElementId, ElementId, Rule); 6] {
    [
        // Sand gets slightly compacted by water
        (EL_SAND, EL_WATER, Rule::on_source(Effect::ScaleVelocity { factor: 0.9 })),
        // Water starts to evaporate near fire
        (EL_WATER, EL_FIRE, Rule::on_source(Effect::Retype { becomes: EL_STEAM, above: Some(80.0) })),
        // Steam cools fire down
        (EL_STEAM, EL_FIRE, Rule::on_neighbor(Effect::AdjustTemperature { delta: -10.0 })),
        (EL_WOOD, EL_FIRE, Rule::on_source(Effect::Ignite { becomes: EL_FIRE })),
        // Fire spreads heat into wood
        (EL_FIRE, EL_WOOD, Rule::on_neighbor(Effect::AdjustTemperature { delta: 20.0 })),
        // Water smothers fire
        (EL_FIRE, EL_WATER, Rule::on_source(Effect::SetLifetime { value: 0 })),
    ]
}

fn builtin_reactions() -> [ChemicalReaction; 4] {
    [
        ChemicalReaction {
            reactant: EL_WOOD,
            partner: EL_FIRE,
            becomes: EL_FIRE,
            temperature_delta: 50.0,
            above: None,
        },
        ChemicalReaction {
            reactant: EL_WATER,
            partner: EL_FIRE,
            becomes: EL_STEAM,
            temperature_delta: -20.0,
            above: None,
        },
        ChemicalReaction {
            reactant: EL_STONE,
            partner: EL_FIRE,
            becomes: EL_LAVA,
            temperature_delta: 0.0,
            above: Some(1000.0),
        },
        ChemicalReaction {
            reactant: EL_SAND,
            partner: EL_FIRE,
            becomes: EL_SMOKE,
            temperature_delta: 0.0,
            above: Some(600.0),
        },
    ]
}
