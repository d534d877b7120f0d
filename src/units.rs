//! Unit archetypes and the static per-type attribute table.
//!
//! The game describes its six unit types as an ordered `unitInformation`
//! list. The position in that list fixes the archetype, so shorthands are
//! resolved once into [`UnitType`] when the catalog is loaded and never
//! compared as strings again.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Number of unit types the game defines.
pub const UNIT_TYPE_COUNT: usize = 6;

/// Closed enumeration of unit archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum UnitType {
    /// Cheap, sturdy wall piece that absorbs damage.
    #[serde(rename = "FF")]
    Filter = 0,
    /// Support structure that shields friendly mobile units passing nearby.
    #[serde(rename = "EF")]
    Encryptor = 1,
    /// Damage-dealing defensive turret.
    #[serde(rename = "DF")]
    Destructor = 2,
    /// Cheap, fast mobile unit deployed in swarms.
    #[serde(rename = "PI")]
    Ping = 3,
    /// Heavy, long-range mobile unit.
    #[serde(rename = "EI")]
    Emp = 4,
    /// Mobile unit that hunts enemy mobile units.
    #[serde(rename = "SI")]
    Scrambler = 5,
}

impl UnitType {
    /// All unit types in catalog order.
    pub const ALL: [UnitType; UNIT_TYPE_COUNT] = [
        UnitType::Filter,
        UnitType::Encryptor,
        UnitType::Destructor,
        UnitType::Ping,
        UnitType::Emp,
        UnitType::Scrambler,
    ];

    /// Position of this type in the catalog.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether the unit is a stationary structure or a transient mobile unit.
    #[must_use]
    pub const fn category(self) -> UnitCategory {
        match self {
            UnitType::Filter | UnitType::Encryptor | UnitType::Destructor => {
                UnitCategory::Structure
            }
            UnitType::Ping | UnitType::Emp | UnitType::Scrambler => UnitCategory::Mobile,
        }
    }

    /// Check if this type is a structure.
    #[must_use]
    pub const fn is_structure(self) -> bool {
        matches!(self.category(), UnitCategory::Structure)
    }

    /// The resource pool this type is paid from.
    #[must_use]
    pub const fn pool(self) -> Pool {
        self.category().pool()
    }

    /// Shorthand the game uses for this type unless configured otherwise.
    #[must_use]
    pub const fn default_shorthand(self) -> &'static str {
        match self {
            UnitType::Filter => "FF",
            UnitType::Encryptor => "EF",
            UnitType::Destructor => "DF",
            UnitType::Ping => "PI",
            UnitType::Emp => "EI",
            UnitType::Scrambler => "SI",
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_shorthand())
    }
}

/// Broad unit category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitCategory {
    /// Stationary, persists between turns with integrity.
    Structure,
    /// Consumed on deployment, no persisted integrity.
    Mobile,
}

impl UnitCategory {
    /// The resource pool units of this category are paid from.
    #[must_use]
    pub const fn pool(self) -> Pool {
        match self {
            UnitCategory::Structure => Pool::Structure,
            UnitCategory::Mobile => Pool::Mobile,
        }
    }
}

/// One of the two independent resource pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pool {
    /// Structure points, spent on structures.
    Structure,
    /// Mobile-unit points, spent on mobile units.
    Mobile,
}

/// One entry of the game's `unitInformation` list, as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitInfo {
    /// Short identifier, e.g. `"FF"`.
    pub shorthand: String,
    /// Maximum integrity (structures only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stability: Option<f64>,
    /// Damage value (damage-dealing units only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<f64>,
    /// Point cost, paid from the pool of the unit's category.
    pub cost: f64,
}

/// Resolved attributes of a single unit type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitSpec {
    /// The type these attributes belong to.
    pub unit: UnitType,
    /// Maximum integrity for structures.
    pub max_integrity: Option<f64>,
    /// Static damage value.
    pub damage: Option<f64>,
    /// Point cost.
    pub cost: f64,
}

/// Static per-type lookup table, resolved once at configuration load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<UnitInfo>", into = "Vec<UnitInfo>")]
pub struct UnitCatalog {
    shorthands: [String; UNIT_TYPE_COUNT],
    specs: [UnitSpec; UNIT_TYPE_COUNT],
}

impl UnitCatalog {
    /// Build the catalog from the game's ordered `unitInformation` list.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] if the list does not hold exactly
    /// one entry per unit type or two entries share a shorthand.
    pub fn from_unit_information(entries: &[UnitInfo]) -> Result<Self> {
        if entries.len() != UNIT_TYPE_COUNT {
            return Err(EngineError::InvalidConfig(format!(
                "unitInformation must list {UNIT_TYPE_COUNT} unit types, found {}",
                entries.len()
            )));
        }

        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|e| e.shorthand == entry.shorthand) {
                return Err(EngineError::InvalidConfig(format!(
                    "duplicate unit shorthand {:?}",
                    entry.shorthand
                )));
            }
        }

        Ok(Self::build(entries))
    }

    /// Build from a list already known to hold one entry per unit type.
    fn build(entries: &[UnitInfo]) -> Self {
        let shorthands = UnitType::ALL.map(|unit| entries[unit.index()].shorthand.clone());
        let specs = UnitType::ALL.map(|unit| {
            let entry = &entries[unit.index()];
            UnitSpec {
                unit,
                max_integrity: entry.stability,
                damage: entry.damage,
                cost: entry.cost,
            }
        });

        Self { shorthands, specs }
    }

    /// Attributes of a unit type.
    #[must_use]
    pub fn spec(&self, unit: UnitType) -> UnitSpec {
        self.specs[unit.index()]
    }

    /// Point cost of a unit type.
    #[must_use]
    pub fn cost(&self, unit: UnitType) -> f64 {
        self.specs[unit.index()].cost
    }

    /// Configured shorthand of a unit type.
    #[must_use]
    pub fn shorthand(&self, unit: UnitType) -> &str {
        &self.shorthands[unit.index()]
    }

    /// Maximum integrity of a structure type.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MissingAttribute`] if no positive stability is
    /// configured for the type.
    pub fn max_integrity(&self, unit: UnitType) -> Result<f64> {
        match self.specs[unit.index()].max_integrity {
            Some(value) if value > 0.0 => Ok(value),
            _ => Err(EngineError::MissingAttribute {
                unit,
                attribute: "stability",
            }),
        }
    }

    /// Static damage value of a damage-dealing type.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MissingAttribute`] if no damage is configured.
    pub fn damage(&self, unit: UnitType) -> Result<f64> {
        self.specs[unit.index()]
            .damage
            .ok_or(EngineError::MissingAttribute {
                unit,
                attribute: "damage",
            })
    }

    /// Resolve a configured shorthand to its unit type.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownUnitType`] if no type uses the shorthand.
    pub fn resolve(&self, shorthand: &str) -> Result<UnitType> {
        UnitType::ALL
            .into_iter()
            .find(|unit| self.shorthands[unit.index()] == shorthand)
            .ok_or_else(|| EngineError::UnknownUnitType(shorthand.to_string()))
    }

    /// Convert back to the ordered wire list.
    #[must_use]
    pub fn to_unit_information(&self) -> Vec<UnitInfo> {
        UnitType::ALL
            .iter()
            .map(|unit| {
                let spec = self.spec(*unit);
                UnitInfo {
                    shorthand: self.shorthands[unit.index()].clone(),
                    stability: spec.max_integrity,
                    damage: spec.damage,
                    cost: spec.cost,
                }
            })
            .collect()
    }
}

impl Default for UnitCatalog {
    fn default() -> Self {
        let entry = |unit: UnitType, stability, damage, cost| UnitInfo {
            shorthand: unit.default_shorthand().to_string(),
            stability,
            damage,
            cost,
        };
        let defaults = [
            entry(UnitType::Filter, Some(60.0), None, 1.0),
            entry(UnitType::Encryptor, Some(30.0), None, 4.0),
            entry(UnitType::Destructor, Some(75.0), Some(4.0), 3.0),
            entry(UnitType::Ping, None, Some(1.0), 1.0),
            entry(UnitType::Emp, None, Some(3.0), 3.0),
            entry(UnitType::Scrambler, None, Some(20.0), 1.0),
        ];

        Self::build(&defaults)
    }
}

impl TryFrom<Vec<UnitInfo>> for UnitCatalog {
    type Error = EngineError;

    fn try_from(entries: Vec<UnitInfo>) -> Result<Self> {
        Self::from_unit_information(&entries)
    }
}

impl From<UnitCatalog> for Vec<UnitInfo> {
    fn from(catalog: UnitCatalog) -> Self {
        catalog.to_unit_information()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_follow_catalog_order() {
        assert!(UnitType::Filter.is_structure());
        assert!(UnitType::Encryptor.is_structure());
        assert!(UnitType::Destructor.is_structure());
        assert_eq!(UnitType::Ping.category(), UnitCategory::Mobile);
        assert_eq!(UnitType::Emp.pool(), Pool::Mobile);
        assert_eq!(UnitType::Filter.pool(), Pool::Structure);
    }

    #[test]
    fn test_default_catalog_lookups() {
        let catalog = UnitCatalog::default();
        assert_eq!(catalog.resolve("DF").unwrap(), UnitType::Destructor);
        assert!((catalog.max_integrity(UnitType::Filter).unwrap() - 60.0).abs() < 1e-9);
        assert!((catalog.damage(UnitType::Destructor).unwrap() - 4.0).abs() < 1e-9);
        assert!((catalog.cost(UnitType::Emp) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_mobile_unit_has_no_max_integrity() {
        let catalog = UnitCatalog::default();
        let err = catalog.max_integrity(UnitType::Ping).unwrap_err();
        assert!(matches!(
            err,
            EngineError::MissingAttribute {
                unit: UnitType::Ping,
                attribute: "stability"
            }
        ));
    }

    #[test]
    fn test_unknown_shorthand_rejected() {
        let catalog = UnitCatalog::default();
        assert!(matches!(
            catalog.resolve("XX"),
            Err(EngineError::UnknownUnitType(s)) if s == "XX"
        ));
    }

    #[test]
    fn test_custom_shorthands_resolve_by_position() {
        let mut info = UnitCatalog::default().to_unit_information();
        info[0].shorthand = "WALL".to_string();
        let catalog = UnitCatalog::from_unit_information(&info).unwrap();
        assert_eq!(catalog.resolve("WALL").unwrap(), UnitType::Filter);
        assert_eq!(catalog.shorthand(UnitType::Filter), "WALL");
        assert!(catalog.resolve("FF").is_err());
    }

    #[test]
    fn test_wrong_entry_count_rejected() {
        let mut info = UnitCatalog::default().to_unit_information();
        info.pop();
        assert!(matches!(
            UnitCatalog::from_unit_information(&info),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_duplicate_shorthand_rejected() {
        let mut info = UnitCatalog::default().to_unit_information();
        info[1].shorthand = "FF".to_string();
        assert!(UnitCatalog::from_unit_information(&info).is_err());
    }

    #[test]
    fn test_catalog_json_round_trip_through_wire_list() {
        let json = serde_json::to_string(&UnitCatalog::default()).unwrap();
        assert!(json.starts_with('['));
        let parsed: UnitCatalog = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, UnitCatalog::default());
    }
}
