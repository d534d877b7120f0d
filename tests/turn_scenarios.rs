//! Full decision-turn scenarios on the standard board.
//!
//! Run with: cargo test --release turn_scenarios

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use rampart::snapshot::Owner;
use rampart::tactics::{ColumnParity, REINFORCE_ROW, WALL_ROW};
use rampart::{
    ArenaBoard, Balances, Cell, EngineConfig, Geometry, Lane, Placement, ResourceLedger,
    StrategyConfig, Tactic, Tactician, TurnReport, TurnSnapshot, Unit, UnitCatalog, UnitType,
    place_greedy,
};

fn engine() -> Tactician {
    Tactician::new(EngineConfig::default()).unwrap()
}

fn play(engine: &mut Tactician, snapshot: &TurnSnapshot) -> TurnReport {
    let mut board = ArenaBoard::from_snapshot(Geometry::STANDARD, snapshot);
    engine.on_turn(snapshot, &mut board).unwrap()
}

fn cells_of(report: &TurnReport, unit: UnitType) -> Vec<Cell> {
    report
        .placements
        .iter()
        .filter(|p| p.unit == unit)
        .map(|p| p.cell)
        .collect()
}

fn wall_columns(report: &TurnReport, unit: UnitType, row: u16) -> Vec<u16> {
    let mut columns: Vec<u16> = cells_of(report, unit)
        .into_iter()
        .filter(|c| c.y == row)
        .map(|c| c.x)
        .collect();
    columns.sort_unstable();
    columns
}

#[test]
fn test_even_turn_with_ample_resources() {
    let mut engine = engine();
    let report = play(&mut engine, &TurnSnapshot::new(2, Balances::new(200.0, 30.0)));

    assert_eq!(report.offense, Tactic::HeavyBurst);

    // Corners: six filters and four destructors.
    let corners = report.outcome(Tactic::ProtectCorners(None)).unwrap();
    assert_eq!((corners.attempted, corners.placed), (10, 10));

    // The two wall passes interleave into a full row.
    let even = report
        .outcome(Tactic::BuildWall(Some(ColumnParity::Even)))
        .unwrap();
    assert_eq!(even.placed, 10);
    let expected: Vec<u16> = (3..25).filter(|x| *x != 13 && *x != 14).collect();
    assert_eq!(wall_columns(&report, UnitType::Filter, WALL_ROW), expected);
    assert_eq!(wall_columns(&report, UnitType::Destructor, REINFORCE_ROW), expected);

    // Even columns go down first.
    let first_wall: Vec<Cell> = report
        .placements
        .iter()
        .filter(|p| p.cell.y == WALL_ROW && p.unit == UnitType::Filter)
        .take(10)
        .map(|p| p.cell)
        .collect();
    assert!(first_wall.iter().all(|c| c.x % 2 == 0));

    // The two front support cells are already taken by the reinforcement row.
    let boost = report.outcome(Tactic::BoostAttackers).unwrap();
    assert_eq!((boost.attempted, boost.placed), (6, 4));
    assert_eq!(
        cells_of(&report, UnitType::Encryptor),
        vec![
            Cell::new(12, 9),
            Cell::new(15, 9),
            Cell::new(12, 8),
            Cell::new(15, 8)
        ]
    );

    // Ten EMPs alternating between the two launch cells.
    let emps = cells_of(&report, UnitType::Emp);
    assert_eq!(emps.len(), 10);
    for (i, cell) in emps.iter().enumerate() {
        let expected = if i % 2 == 0 { Cell::new(8, 5) } else { Cell::new(19, 5) };
        assert_eq!(*cell, expected);
    }
    assert!(report.remaining.mobile_points.abs() < 1e-9);

    // 6 + 20 filters, 4 + 20 destructors, 4 encryptors.
    assert!((report.remaining.structure_points - (200.0 - 26.0 - 72.0 - 16.0)).abs() < 1e-9);
}

#[test]
fn test_odd_turn_swarm_on_left_lane() {
    let mut engine = engine();
    let report = play(&mut engine, &TurnSnapshot::new(3, Balances::new(0.0, 7.5)));

    assert_eq!(report.offense, Tactic::SwarmBurst(Lane::Left));
    let pings = cells_of(&report, UnitType::Ping);
    assert_eq!(pings.len(), 7);
    assert!(pings.iter().all(|c| *c == Cell::new(11, 2)));
    assert!(cells_of(&report, UnitType::Emp).is_empty());
}

#[test]
fn test_odd_turn_swarm_on_configured_lane() {
    let config = EngineConfig {
        strategy: StrategyConfig {
            swarm_lane: Lane::Right,
        },
        ..EngineConfig::default()
    };
    let mut engine = Tactician::new(config).unwrap();
    let report = play(&mut engine, &TurnSnapshot::new(5, Balances::new(0.0, 4.0)));
    let pings = cells_of(&report, UnitType::Ping);
    assert_eq!(pings, vec![Cell::new(16, 2); 4]);
}

#[test]
fn test_single_point_builds_one_wall_cell() {
    let catalog = UnitCatalog::default();
    let mut board = ArenaBoard::new(Geometry::STANDARD);
    let mut ledger = ResourceLedger::new(&catalog, Balances::new(1.0, 0.0), &mut board);

    let outcome = Tactic::BuildWall(None).execute(&mut ledger);
    assert_eq!(outcome.attempted, 20);
    assert_eq!(outcome.placed, 1);
    assert_eq!(outcome.rejected(), 19);
    assert_eq!(ledger.rejections().unaffordable, 19);
    assert_eq!(
        ledger.placements(),
        &[Placement {
            unit: UnitType::Filter,
            cell: Cell::new(3, 11)
        }]
    );
}

#[test]
fn test_place_greedy_twenty_cell_row_with_one_point() {
    let catalog = UnitCatalog::default();
    let mut board = ArenaBoard::new(Geometry::STANDARD);
    let mut ledger = ResourceLedger::new(&catalog, Balances::new(1.0, 0.0), &mut board);
    let row: Vec<Cell> = (3..25)
        .filter(|x| *x != 13 && *x != 14)
        .map(|x| Cell::new(x, 11))
        .collect();
    assert_eq!(place_greedy(&mut ledger, UnitType::Filter, &row), 1);
    assert!(board.is_occupied(Cell::new(3, 11)));
    assert!(!board.is_occupied(Cell::new(4, 11)));
}

#[test]
fn test_partial_budget_keeps_alternating_wall() {
    let mut engine = engine();
    // Corners cost 18, the even wall half 10.
    let report = play(&mut engine, &TurnSnapshot::new(2, Balances::new(28.0, 0.0)));

    let wall = wall_columns(&report, UnitType::Filter, WALL_ROW);
    assert_eq!(wall, vec![4, 6, 8, 10, 12, 16, 18, 20, 22, 24]);
    assert!(wall_columns(&report, UnitType::Destructor, REINFORCE_ROW).is_empty());
    assert!(report.remaining.structure_points.abs() < 1e-9);
}

#[test]
fn test_existing_structures_are_skipped() {
    let mut engine = engine();
    let snapshot = TurnSnapshot::new(2, Balances::new(200.0, 0.0))
        .with_structure(Unit::new(UnitType::Filter, Owner::Me, Cell::new(4, 11), 60.0))
        .with_structure(Unit::new(UnitType::Destructor, Owner::Me, Cell::new(0, 13), 75.0));
    let report = play(&mut engine, &snapshot);

    let corners = report.outcome(Tactic::ProtectCorners(None)).unwrap();
    assert_eq!(corners.placed, 9);
    let even = report
        .outcome(Tactic::BuildWall(Some(ColumnParity::Even)))
        .unwrap();
    assert_eq!(even.placed, 9);
    assert!(report.rejections.illegal >= 4);
}

#[test]
fn test_metrics_reflect_snapshot() {
    let mut engine = engine();
    let snapshot = TurnSnapshot::new(1, Balances::default()).with_structure(Unit::new(
        UnitType::Destructor,
        Owner::Opponent,
        Cell::new(13, 20),
        75.0,
    ));
    let report = play(&mut engine, &snapshot);
    let score = report.metrics[rampart::Region::EnemyBack];
    assert!((score.strength - 1.0 / 90.0).abs() < 1e-12);
    assert!((score.danger - 4.0 / 90.0).abs() < 1e-12);
}

#[test]
fn test_consecutive_turns_alternate_offense() {
    let mut engine = engine();
    let offenses: Vec<Tactic> = (0..4)
        .map(|turn| play(&mut engine, &TurnSnapshot::new(turn, Balances::new(0.0, 3.0))).offense)
        .collect();
    assert_eq!(
        offenses,
        vec![
            Tactic::HeavyBurst,
            Tactic::SwarmBurst(Lane::Left),
            Tactic::HeavyBurst,
            Tactic::SwarmBurst(Lane::Left)
        ]
    );
}
