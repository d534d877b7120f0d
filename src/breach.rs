//! Breach observer.
//!
//! Action frames arrive between two decision turns. Each breach is bucketed
//! by the half it landed in and held until the next decision turn drains the
//! log.

use serde::Serialize;

use crate::grid::Cell;
use crate::snapshot::ActionFrame;

/// Breaches accumulated over one turn interval.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BreachReport {
    /// Breaches on the own half, in arrival order.
    pub own: Vec<Cell>,
    /// Breaches on the enemy half, in arrival order.
    pub enemy: Vec<Cell>,
}

impl BreachReport {
    /// Total number of breaches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.own.len() + self.enemy.len()
    }

    /// Check if no breach was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.own.is_empty() && self.enemy.is_empty()
    }
}

/// Append-only breach buckets, drained once per decision turn.
#[derive(Debug, Clone)]
pub struct BreachLog {
    half_divider: u16,
    pending: BreachReport,
}

impl BreachLog {
    /// Create an empty log for a board split at `half_divider`.
    #[must_use]
    pub fn new(half_divider: u16) -> Self {
        Self {
            half_divider,
            pending: BreachReport::default(),
        }
    }

    /// Record one breach.
    pub fn record_breach(&mut self, cell: Cell) {
        if cell.y < self.half_divider {
            self.pending.own.push(cell);
        } else {
            self.pending.enemy.push(cell);
        }
    }

    /// Record every breach of an action frame.
    pub fn record_frame(&mut self, frame: &ActionFrame) {
        for &cell in &frame.breaches {
            self.record_breach(cell);
        }
    }

    /// Take the accumulated breaches, leaving both buckets empty.
    #[must_use]
    pub fn drain_and_reset(&mut self) -> BreachReport {
        std::mem::take(&mut self.pending)
    }

    /// Breaches recorded since the last drain.
    #[must_use]
    pub fn pending(&self) -> &BreachReport {
        &self.pending
    }
}
