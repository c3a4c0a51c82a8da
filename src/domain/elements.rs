//! Element Definitions - type ids and per-type physical properties
//!
//! Type tags are interned to small integer ids by the content registry.
//! Id 0 is reserved for the "none" sentinel: a particle carrying it has
//! expired and is dropped at the next tick boundary.

use serde::{Deserialize, Serialize};

pub type ElementId = u8;

pub const EL_NONE: ElementId = 0;
pub const EL_SAND: ElementId = 1;
pub const EL_WATER: ElementId = 2;
pub const EL_STEAM: ElementId = 3;
pub const EL_FIRE: ElementId = 4;
pub const EL_WOOD: ElementId = 5;
pub const EL_STONE: ElementId = 6;
pub const EL_SMOKE: ElementId = 7;
pub const EL_LAVA: ElementId = 8;

/// Key of the sentinel type
pub const NONE_KEY: &str = "none";
/// Key every unknown tag resolves to
pub const FALLBACK_KEY: &str = "sand";
/// Boiling target
pub const STEAM_KEY: &str = "steam";
/// Melting target
pub const LAVA_KEY: &str = "lava";

#[inline]
pub fn is_particle(id: ElementId) -> bool {
    id != EL_NONE
}

/// Matter state, passed through to the renderer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhysicalState {
    #[default]
    Solid,
    Liquid,
    Gas,
    Plasma,
}

/// Registry entry. Immutable once the registry is built.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleType {
    pub key: String,
    /// Mass proxy
    pub density: f32,
    /// `None` means the type never exchanges heat
    pub heat_capacity: Option<f32>,
    pub melting_point: Option<f32>,
    pub boiling_point: Option<f32>,
    pub ignition_point: Option<f32>,
    /// 0xRRGGBB
    pub color: u32,
    pub state: PhysicalState,
}

impl ParticleType {
    pub fn new(key: &str, density: f32, color: u32) -> Self {
        Self {
            key: key.to_string(),
            density,
            heat_capacity: None,
            melting_point: None,
            boiling_point: None,
            ignition_point: None,
            color,
            state: PhysicalState::Solid,
        }
    }

    pub fn with_heat_capacity(mut self, heat_capacity: f32) -> Self {
        self.heat_capacity = Some(heat_capacity);
        self
    }

    pub fn with_melting_point(mut self, temp: f32) -> Self {
        self.melting_point = Some(temp);
        self
    }

    pub fn with_boiling_point(mut self, temp: f32) -> Self {
        self.boiling_point = Some(temp);
        self
    }

    pub fn with_ignition_point(mut self, temp: f32) -> Self {
        self.ignition_point = Some(temp);
        self
    }

    pub fn with_state(mut self, state: PhysicalState) -> Self {
        self.state = state;
        self
    }

    /// Color as a CSS hex string
    pub fn color_hex(&self) -> String {
        format!("#{:06x}", self.color & 0x00FF_FFFF)
    }
}

/// Temperature-driven retype targets, resolved to ids at registry build time
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PhaseChange {
    /// (boiling point, target)
    pub boil: Option<(f32, ElementId)>,
    /// (melting point, target)
    pub melt: Option<(f32, ElementId)>,
}

impl PhaseChange {
    pub fn for_type(props: &ParticleType, steam: ElementId, lava: ElementId) -> Self {
        Self {
            boil: props.boiling_point.map(|t| (t, steam)),
            melt: props.melting_point.map(|t| (t, lava)),
        }
    }
}

/// Parse "#rrggbb" / "rrggbb"
pub fn parse_color(s: &str) -> Option<u32> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_color_accepts_css_hex() {
        assert_eq!(parse_color("#e6c229"), Some(0xe6c229));
        assert_eq!(parse_color("FF4500"), Some(0xff4500));
        assert_eq!(parse_color("#fff"), None);
        assert_eq!(parse_color("#gggggg"), None);
        assert_eq!(parse_color("+fffff"), None);
    }

    #[test]
    fn phase_change_follows_thresholds() {
        let water = ParticleType::new("water", 1.0, 0).with_boiling_point(100.0);
        let pc = PhaseChange::for_type(&water, EL_STEAM, EL_LAVA);
        assert_eq!(pc.boil, Some((100.0, EL_STEAM)));
        assert_eq!(pc.melt, None);
    }
}
