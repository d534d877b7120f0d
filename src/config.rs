//! Engine configuration.
//!
//! Loaded once at game start. The unit catalog uses the game's own
//! `unitInformation` layout so the configuration the engine sends can be fed
//! in unchanged.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::grid::Geometry;
use crate::tactics::Lane;
use crate::units::{UnitCatalog, UnitType};

/// Knobs for the fixed tactic schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Launch lane for the swarm burst on odd turns.
    pub swarm_lane: Lane,
}

/// Complete configuration of the decision engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Board thresholds.
    pub geometry: Geometry,
    /// Per-type unit attributes.
    #[serde(rename = "unitInformation")]
    pub units: UnitCatalog,
    /// Tactic schedule options.
    pub strategy: StrategyConfig,
}

impl EngineConfig {
    /// Parse and validate a JSON configuration.
    ///
    /// Missing sections fall back to the standard game configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Json`] for malformed input and
    /// [`EngineError::InvalidConfig`] if validation fails.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Io`] if the file cannot be read, otherwise the
    /// errors of [`EngineConfig::from_json`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Validate configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] for inconsistent geometry or a
    /// non-positive cost, and [`EngineError::MissingAttribute`] if a structure
    /// lacks a max integrity or the destructor lacks a damage value.
    pub fn validate(&self) -> Result<()> {
        self.geometry.validate()?;

        for unit in UnitType::ALL {
            let cost = self.units.cost(unit);
            if !cost.is_finite() || cost <= 0.0 {
                return Err(EngineError::InvalidConfig(format!(
                    "unit {} must have a positive cost, got {cost}",
                    self.units.shorthand(unit)
                )));
            }
            if unit.is_structure() {
                self.units.max_integrity(unit)?;
            }
        }
        self.units.damage(UnitType::Destructor)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_json_yields_defaults() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.strategy.swarm_lane, Lane::Left);
    }

    #[test]
    fn test_partial_geometry_and_lane() {
        let config = EngineConfig::from_json(
            r#"{"geometry": {"left_divider": 7}, "strategy": {"swarm_lane": "right"}}"#,
        )
        .unwrap();
        assert_eq!(config.geometry.left_divider, 7);
        assert_eq!(config.geometry.right_divider, 19);
        assert_eq!(config.strategy.swarm_lane, Lane::Right);
    }

    #[test]
    fn test_unit_information_section() {
        let json = r#"{"unitInformation": [
            {"shorthand": "FF", "stability": 60, "cost": 1},
            {"shorthand": "EF", "stability": 30, "cost": 4},
            {"shorthand": "DF", "stability": 75, "damage": 4, "cost": 3},
            {"shorthand": "PI", "damage": 1, "cost": 1},
            {"shorthand": "EI", "damage": 3, "cost": 3},
            {"shorthand": "SI", "damage": 20, "cost": 1}
        ]}"#;
        let config = EngineConfig::from_json(json).unwrap();
        assert_eq!(config.units, UnitCatalog::default());
    }

    #[test]
    fn test_zero_cost_rejected() {
        let mut info = UnitCatalog::default().to_unit_information();
        info[3].cost = 0.0;
        let config = EngineConfig {
            units: UnitCatalog::from_unit_information(&info).unwrap(),
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_structure_without_stability_rejected() {
        let mut info = UnitCatalog::default().to_unit_information();
        info[1].stability = None;
        let config = EngineConfig {
            units: UnitCatalog::from_unit_information(&info).unwrap(),
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(EngineError::MissingAttribute {
                unit: UnitType::Encryptor,
                ..
            })
        ));
    }

    #[test]
    fn test_bad_geometry_rejected() {
        let err = EngineConfig::from_json(r#"{"geometry": {"half_divider": 0}}"#).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }
}
