// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Rampart: a turn-based tactical decision engine for a two-sided tower
//! defense grid game.
//!
//! Once per decision turn the engine:
//! - Scores the eight board regions by strength and danger
//! - Runs a fixed schedule of defensive tactics
//! - Spends the mobile pool on a burst chosen by turn parity
//!
//! Between turns it collects breach events from action frames.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │    Turn Scheduler    Breach Log     │
//! ├─────────────────────────────────────┤
//! │  Tactic Library → Placement Executor│
//! ├─────────────────────────────────────┤
//! │  Metrics Engine    Resource Ledger  │
//! ├─────────────────────────────────────┤
//! │   Grid Model (region classifier)    │
//! └─────────────────────────────────────┘
//! ```

pub mod breach;
pub mod config;
pub mod error;
pub mod grid;
pub mod ledger;
pub mod metrics;
pub mod snapshot;
pub mod tactics;
pub mod turn;
pub mod units;

pub use error::{EngineError, Result};

// Re-export key types at crate root for convenience
pub use breach::{BreachLog, BreachReport};
pub use config::{EngineConfig, StrategyConfig};
pub use grid::{Cell, Geometry, Region, RegionTable};
pub use ledger::{ArenaBoard, Placement, PlacementOracle, ResourceLedger};
pub use metrics::{RegionMetrics, RegionScore};
pub use snapshot::{ActionFrame, Balances, Owner, TurnSnapshot, Unit};
pub use tactics::{Lane, Tactic, TacticOutcome, place_greedy};
pub use turn::{Tactician, TurnPhase, TurnReport};
pub use units::{UnitCatalog, UnitType};
