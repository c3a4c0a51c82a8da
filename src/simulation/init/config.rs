use thiserror::Error;

use crate::domain::particle::DEFAULT_LIFETIME;
use crate::spatial::grid::DEFAULT_CELL_SIZE;
use crate::temperature::ThermalConfig;

/// Fixed tuning constants for one simulator
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimConfig {
    /// Spatial grid cell edge; must cover `interaction_radius`
    pub cell_size: f32,
    pub interaction_radius: f32,
    /// Lifetime given to records that arrive without one
    pub default_lifetime: i32,
    pub thermal: ThermalConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            interaction_radius: DEFAULT_CELL_SIZE,
            default_lifetime: DEFAULT_LIFETIME,
            thermal: ThermalConfig::default(),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("grid cell size must be positive and finite, got {0}")]
    InvalidCellSize(f32),

    #[error("interaction radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("interaction radius {radius} exceeds grid cell size {cell_size}")]
    RadiusExceedsCell { radius: f32, cell_size: f32 },

    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidRate { name: &'static str, value: f32 },

    #[error("comfort band [{min}, {max}] is empty or not finite")]
    InvalidComfortBand { min: f32, max: f32 },

    #[error("{name} must be positive, got {value}")]
    InvalidLifetime { name: &'static str, value: i32 },
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(ConfigError::InvalidCellSize(self.cell_size));
        }
        if !(self.interaction_radius.is_finite() && self.interaction_radius > 0.0) {
            return Err(ConfigError::InvalidRadius(self.interaction_radius));
        }
        if self.interaction_radius > self.cell_size {
            return Err(ConfigError::RadiusExceedsCell {
                radius: self.interaction_radius,
                cell_size: self.cell_size,
            });
        }
        if self.default_lifetime <= 0 {
            return Err(ConfigError::InvalidLifetime {
                name: "default_lifetime",
                value: self.default_lifetime,
            });
        }

        let t = &self.thermal;
        if !t.ambient_temperature.is_finite() {
            return Err(ConfigError::InvalidRate {
                name: "ambient_temperature",
                value: t.ambient_temperature,
            });
        }
        for (name, value) in [
            ("cooling_rate", t.cooling_rate),
            ("heat_source_gain", t.heat_source_gain),
            ("transfer_rate", t.transfer_rate),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidRate { name, value });
            }
        }
        if t.transfer_rate > 1.0 {
            // Past 1.0 an exchange overshoots and the pair swaps places
            return Err(ConfigError::InvalidRate { name: "transfer_rate", value: t.transfer_rate });
        }
        if !(t.comfort_min.is_finite() && t.comfort_max.is_finite() && t.comfort_min <= t.comfort_max) {
            return Err(ConfigError::InvalidComfortBand { min: t.comfort_min, max: t.comfort_max });
        }
        if t.extreme_lifetime_penalty < 0 {
            return Err(ConfigError::InvalidLifetime {
                name: "extreme_lifetime_penalty",
                value: t.extreme_lifetime_penalty,
            });
        }
        Ok(())
    }
}
