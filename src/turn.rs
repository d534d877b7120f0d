//! Turn scheduler.
//!
//! One decision turn walks a fixed state machine:
//!
//! ```text
//! IDLE → METRICS → DEFENSE → OFFENSE → CLEANUP → IDLE
//! ```
//!
//! METRICS drains the breach log and scores every region. DEFENSE runs
//! [`DEFENSE_ORDER`]. OFFENSE picks a burst by turn parity. CLEANUP closes
//! the per-turn context into a [`TurnReport`].
//!
//! Everything scoped to a single turn lives in a private context that is
//! dropped when the turn ends, so nothing but the breach log survives
//! between turns.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::breach::{BreachLog, BreachReport};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::grid::RegionTable;
use crate::ledger::{Placement, PlacementOracle, Rejections, ResourceLedger};
use crate::metrics::{self, RegionMetrics};
use crate::snapshot::{ActionFrame, Balances, TurnSnapshot};
use crate::tactics::{ColumnParity, Lane, Tactic, TacticOutcome};
use crate::units::{UnitCatalog, UnitType};

/// Phase of the decision-turn state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnPhase {
    /// Waiting for the next snapshot.
    Idle,
    /// Draining breaches and scoring regions.
    Metrics,
    /// Running the defensive tactics.
    Defense,
    /// Running the parity-selected burst.
    Offense,
    /// Closing the turn.
    Cleanup,
}

impl TurnPhase {
    /// The phase that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            TurnPhase::Idle => TurnPhase::Metrics,
            TurnPhase::Metrics => TurnPhase::Defense,
            TurnPhase::Defense => TurnPhase::Offense,
            TurnPhase::Offense => TurnPhase::Cleanup,
            TurnPhase::Cleanup => TurnPhase::Idle,
        }
    }
}

/// Defensive tactics in execution order.
///
/// Corners go first. The wall and its reinforcement are then built in
/// alternating column halves, so a budget that runs out midway still leaves
/// an evenly spread line.
pub const DEFENSE_ORDER: [Tactic; 6] = [
    Tactic::ProtectCorners(None),
    Tactic::BuildWall(Some(ColumnParity::Even)),
    Tactic::ReinforceWall(Some(ColumnParity::Odd)),
    Tactic::BuildWall(Some(ColumnParity::Odd)),
    Tactic::ReinforceWall(Some(ColumnParity::Even)),
    Tactic::BoostAttackers,
];

/// The offensive burst for a turn: heavy on even turns, swarm on odd ones.
#[must_use]
pub const fn offense_for_turn(turn: u32, lane: Lane) -> Tactic {
    if turn % 2 == 0 {
        Tactic::HeavyBurst
    } else {
        Tactic::SwarmBurst(lane)
    }
}

/// State owned by one decision turn.
struct TurnContext<'a, O> {
    ledger: ResourceLedger<'a, O>,
    metrics: RegionMetrics,
    breaches: BreachReport,
    outcomes: Vec<TacticOutcome>,
}

impl<'a, O: PlacementOracle> TurnContext<'a, O> {
    fn new(catalog: &'a UnitCatalog, balances: Balances, oracle: &'a mut O) -> Self {
        Self {
            ledger: ResourceLedger::new(catalog, balances, oracle),
            metrics: RegionMetrics::default(),
            breaches: BreachReport::default(),
            outcomes: Vec::with_capacity(DEFENSE_ORDER.len() + 1),
        }
    }

    fn run(&mut self, tactic: Tactic) {
        let outcome = tactic.execute(&mut self.ledger);
        self.outcomes.push(outcome);
    }

    /// Whether structure points were left on the table while cells were
    /// refused as illegal.
    fn stalled(&self) -> bool {
        self.ledger.rejections().illegal > 0
            && UnitType::ALL
                .into_iter()
                .filter(|unit| unit.is_structure())
                .any(|unit| self.ledger.can_afford(unit))
    }

    fn into_report(self, turn: u32, offense: Tactic) -> TurnReport {
        let rejections = self.ledger.rejections();
        let remaining = self.ledger.balances();
        TurnReport {
            turn,
            offense,
            metrics: self.metrics,
            breaches: self.breaches,
            outcomes: self.outcomes,
            placements: self.ledger.into_placements(),
            rejections,
            remaining,
        }
    }
}

/// Everything decided during one turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnReport {
    /// Turn number of the snapshot.
    pub turn: u32,
    /// Burst chosen for the offense phase.
    pub offense: Tactic,
    /// Region scores at the start of the turn.
    pub metrics: RegionMetrics,
    /// Breaches observed since the previous turn.
    pub breaches: BreachReport,
    /// Tactic outcomes in execution order.
    pub outcomes: Vec<TacticOutcome>,
    /// Accepted placements in request order.
    pub placements: Vec<Placement>,
    /// Rejected placement attempts.
    pub rejections: Rejections,
    /// Balances left after all tactics ran.
    pub remaining: Balances,
}

impl TurnReport {
    /// Total number of units placed.
    #[must_use]
    pub fn placed_count(&self) -> usize {
        self.placements.len()
    }

    /// Outcome of the first run of a tactic, if it ran.
    #[must_use]
    pub fn outcome(&self, tactic: Tactic) -> Option<&TacticOutcome> {
        self.outcomes.iter().find(|outcome| outcome.tactic == tactic)
    }
}

/// The decision engine for one game.
///
/// Holds the configuration, the precomputed region table and the breach log
/// that spans turn intervals.
#[derive(Debug, Clone)]
pub struct Tactician {
    config: EngineConfig,
    regions: RegionTable,
    breaches: BreachLog,
}

impl Tactician {
    /// Create an engine for a game.
    ///
    /// # Errors
    ///
    /// Returns the configuration's validation error, or
    /// [`crate::EngineError::EmptyRegion`] if the geometry leaves a region
    /// without cells.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let regions = RegionTable::build(config.geometry)?;
        let breaches = BreachLog::new(config.geometry.half_divider);
        Ok(Self {
            config,
            regions,
            breaches,
        })
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The precomputed region table.
    #[must_use]
    pub fn regions(&self) -> &RegionTable {
        &self.regions
    }

    /// Breaches recorded since the last decision turn.
    #[must_use]
    pub fn pending_breaches(&self) -> &BreachReport {
        self.breaches.pending()
    }

    /// Record the breaches of an action frame.
    pub fn on_action_frame(&mut self, frame: &ActionFrame) {
        if !frame.breaches.is_empty() {
            debug!(breaches = frame.breaches.len(), "action frame");
        }
        self.breaches.record_frame(frame);
    }

    /// Run one decision turn.
    ///
    /// Placements go through `oracle`; the accepted ones are listed in the
    /// report in the order they were requested.
    ///
    /// # Errors
    ///
    /// Returns an error if the metrics pass fails, e.g. for a structure
    /// standing off the board. No placement has been attempted at that point,
    /// and the breaches drained for the turn are discarded.
    pub fn on_turn<O: PlacementOracle>(
        &mut self,
        snapshot: &TurnSnapshot,
        oracle: &mut O,
    ) -> Result<TurnReport> {
        let turn = snapshot.turn;
        let offense = offense_for_turn(turn, self.config.strategy.swarm_lane);
        let mut ctx = TurnContext::new(&self.config.units, snapshot.balances, oracle);

        let mut phase = TurnPhase::Idle;
        loop {
            phase = phase.next();
            debug!(turn, ?phase, "entering phase");
            match phase {
                TurnPhase::Idle => break,
                TurnPhase::Metrics => {
                    ctx.breaches = self.breaches.drain_and_reset();
                    ctx.metrics = metrics::analyze(&self.regions, &self.config.units, snapshot)?;
                }
                TurnPhase::Defense => {
                    for tactic in DEFENSE_ORDER {
                        ctx.run(tactic);
                    }
                }
                TurnPhase::Offense => ctx.run(offense),
                TurnPhase::Cleanup => {
                    if ctx.stalled() {
                        warn!(
                            turn,
                            structure_points = ctx.ledger.balances().structure_points,
                            illegal = ctx.ledger.rejections().illegal,
                            "structure points left unspent"
                        );
                    }
                    info!(
                        turn,
                        %offense,
                        placed = ctx.ledger.placements().len(),
                        own_breaches = ctx.breaches.own.len(),
                        enemy_breaches = ctx.breaches.enemy.len(),
                        "turn complete"
                    );
                }
            }
        }

        Ok(ctx.into_report(turn, offense))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EngineError;
    use crate::grid::{Cell, Geometry};
    use crate::ledger::ArenaBoard;
    use crate::snapshot::{Owner, Unit};

    fn tactician() -> Tactician {
        Tactician::new(EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_phase_cycle_returns_to_idle() {
        let mut phase = TurnPhase::Idle;
        let mut seen = Vec::new();
        for _ in 0..5 {
            phase = phase.next();
            seen.push(phase);
        }
        assert_eq!(
            seen,
            vec![
                TurnPhase::Metrics,
                TurnPhase::Defense,
                TurnPhase::Offense,
                TurnPhase::Cleanup,
                TurnPhase::Idle
            ]
        );
    }

    #[test]
    fn test_offense_branch_by_parity() {
        assert_eq!(offense_for_turn(0, Lane::Left), Tactic::HeavyBurst);
        assert_eq!(offense_for_turn(4, Lane::Right), Tactic::HeavyBurst);
        assert_eq!(offense_for_turn(7, Lane::Right), Tactic::SwarmBurst(Lane::Right));
    }

    #[test]
    fn test_outcomes_follow_defense_order() {
        let mut engine = tactician();
        let snapshot = TurnSnapshot::new(1, Balances::new(0.0, 0.0));
        let mut board = ArenaBoard::new(Geometry::STANDARD);
        let report = engine.on_turn(&snapshot, &mut board).unwrap();

        let order: Vec<Tactic> = report.outcomes.iter().map(|o| o.tactic).collect();
        let mut expected = DEFENSE_ORDER.to_vec();
        expected.push(Tactic::SwarmBurst(Lane::Left));
        assert_eq!(order, expected);
        assert_eq!(report.placed_count(), 0);
    }

    #[test]
    fn test_breaches_reported_once() {
        let mut engine = tactician();
        engine.on_action_frame(&ActionFrame {
            breaches: vec![Cell::new(5, 8), Cell::new(20, 20)],
        });
        assert_eq!(engine.pending_breaches().len(), 2);

        let mut board = ArenaBoard::new(Geometry::STANDARD);
        let snapshot = TurnSnapshot::new(2, Balances::default());
        let first = engine.on_turn(&snapshot, &mut board).unwrap();
        assert_eq!(first.breaches.own, vec![Cell::new(5, 8)]);
        assert_eq!(first.breaches.enemy, vec![Cell::new(20, 20)]);
        assert!(engine.pending_breaches().is_empty());

        let second = engine.on_turn(&TurnSnapshot::new(3, Balances::default()), &mut board);
        assert!(second.unwrap().breaches.is_empty());
    }

    #[test]
    fn test_off_board_structure_aborts_before_placing() {
        let mut engine = tactician();
        engine.on_action_frame(&ActionFrame {
            breaches: vec![Cell::new(5, 8)],
        });
        let snapshot = TurnSnapshot::new(2, Balances::new(30.0, 30.0)).with_structure(Unit::new(
            UnitType::Filter,
            Owner::Me,
            Cell::new(28, 3),
            60.0,
        ));
        let mut board = ArenaBoard::new(Geometry::STANDARD);
        let err = engine.on_turn(&snapshot, &mut board).unwrap_err();
        assert!(matches!(err, EngineError::UnclassifiableCell { x: 28, y: 3, .. }));
        assert!(board.deployed_mobile().is_empty());
        assert!(!board.is_occupied(Cell::new(0, 13)));
        assert!(engine.pending_breaches().is_empty());
    }

    #[test]
    fn test_report_serializes() {
        let mut engine = tactician();
        let mut board = ArenaBoard::new(Geometry::STANDARD);
        let report = engine
            .on_turn(&TurnSnapshot::new(2, Balances::new(1.0, 3.0)), &mut board)
            .unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["offense"], "heavy_burst");
        assert_eq!(json["outcomes"][0]["tactic"], "protect_corners");
        assert_eq!(json["placements"][0]["unit"], "FF");
        assert_eq!(json["placements"][0]["cell"], serde_json::json!([0, 13]));
    }
}
