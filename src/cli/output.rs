//! Output formatting utilities for CLI.

use rampart::grid::Side;
use rampart::{Geometry, Region, RegionTable, TurnReport, UnitCatalog};
use serde::Serialize;

/// JSON-serializable summary of a `play` session.
#[derive(Debug, Default, Serialize)]
pub(super) struct JsonPlaySummary {
    /// Decision turns processed.
    pub(super) turns: usize,
    /// Action frames processed.
    pub(super) frames: usize,
    /// Units placed over all turns.
    pub(super) placed: usize,
}

impl JsonPlaySummary {
    /// Account for one decided turn.
    pub(super) fn add_turn(&mut self, report: &TurnReport) {
        self.turns += 1;
        self.placed += report.placed_count();
    }
}

/// Format a turn report as human-readable text.
pub(super) fn format_report(report: &TurnReport, catalog: &UnitCatalog) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Turn {} (offense: {})\n",
        report.turn, report.offense
    ));
    output.push_str(&format!(
        "  Breaches: {} own, {} enemy\n",
        report.breaches.own.len(),
        report.breaches.enemy.len()
    ));

    output.push_str("  Tactics:\n");
    for outcome in &report.outcomes {
        let name = outcome.tactic.to_string();
        output.push_str(&format!(
            "    {name:<24} {:>3}/{:<3}\n",
            outcome.placed, outcome.attempted
        ));
    }

    output.push_str(&format!("  Placements: {}\n", report.placed_count()));
    for placement in &report.placements {
        output.push_str(&format!(
            "    {} {}\n",
            catalog.shorthand(placement.unit),
            placement.cell
        ));
    }

    output.push_str(&format!(
        "  Rejected: {} unaffordable, {} illegal\n",
        report.rejections.unaffordable, report.rejections.illegal
    ));
    output.push_str(&format!(
        "  Remaining: {:.1} structure, {:.1} mobile\n",
        report.remaining.structure_points, report.remaining.mobile_points
    ));

    output.push_str("  Regions:\n");
    for (region, score) in report.metrics.iter() {
        output.push_str(&format!(
            "    {:<12} strength {:.4}  danger {:.4}\n",
            region.name(),
            score.strength,
            score.danger
        ));
    }

    output
}

/// Map character of a region: own regions lower case, enemy upper case.
fn region_char(region: Region) -> char {
    let c = match region {
        Region::OwnBack | Region::EnemyBack => 'b',
        Region::OwnFront | Region::EnemyFront => 'f',
        Region::OwnLeft | Region::EnemyLeft => 'l',
        Region::OwnRight | Region::EnemyRight => 'r',
    };
    match region.side() {
        Side::Own => c,
        Side::Enemy => c.to_ascii_uppercase(),
    }
}

/// Format the region table as cell counts plus a board map.
///
/// The map is drawn with the enemy half on top. Cells outside the playable
/// arena are dotted; own deployment edges are marked `*`.
pub(super) fn format_regions(table: &RegionTable) -> String {
    let geometry: Geometry = *table.geometry();
    let mut output = String::new();

    output.push_str(&format!(
        "Board {0}x{0} (half {1}, columns ..={2} left, >={3} right)\n\n",
        geometry.arena_size, geometry.half_divider, geometry.left_divider, geometry.right_divider
    ));

    for region in Region::ALL {
        output.push_str(&format!(
            "  {} {:<12} {:>4} cells\n",
            region_char(region),
            region.name(),
            table.cell_count(region)
        ));
    }
    output.push('\n');

    for y in (0..geometry.arena_size).rev() {
        output.push_str(&format!("{y:>3} "));
        for x in 0..geometry.arena_size {
            let cell = rampart::Cell::new(x, y);
            let c = if geometry.is_own_edge(cell) {
                '*'
            } else if !geometry.in_arena(cell) {
                '.'
            } else {
                table.classify(cell).map_or('?', region_char)
            };
            output.push(c);
        }
        output.push('\n');
    }

    output
}
