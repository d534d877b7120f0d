//! Error types for the decision engine.
//!
//! Geometry and configuration errors are fatal for the turn being processed.
//! Placement rejections are not errors at all: they only lower the count
//! returned by the placement executor.

use thiserror::Error;

use crate::grid::Region;
use crate::units::UnitType;

/// Errors raised while configuring the engine or processing a decision turn.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A cell lies outside the board the classifier was configured for.
    #[error("cell ({x}, {y}) cannot be classified: outside the {size}x{size} board")]
    UnclassifiableCell {
        /// Column of the offending cell.
        x: u16,
        /// Row of the offending cell.
        y: u16,
        /// Side length of the configured board.
        size: u16,
    },

    /// The configured geometry leaves a region without any cells.
    #[error("region {0} contains no cells under the configured geometry")]
    EmptyRegion(Region),

    /// A unit shorthand that does not appear in the unit catalog.
    #[error("unknown unit type: {0:?}")]
    UnknownUnitType(String),

    /// A unit type is missing an attribute the metrics pass needs.
    #[error("unit type {unit} has no {attribute} configured")]
    MissingAttribute {
        /// The unit type being looked up.
        unit: UnitType,
        /// Name of the missing attribute.
        attribute: &'static str,
    },

    /// A mobile unit type appeared where only structures are allowed.
    #[error("unit type {0} is not a structure")]
    NotAStructure(UnitType),

    /// A turn snapshot from the engine is malformed.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O failure while reading configuration or engine input.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON in configuration or engine input.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type used throughout the engine.
pub type Result<T> = std::result::Result<T, EngineError>;
