//! Placement executor and tactic library.
//!
//! Every tactic reduces to one or more `(unit type, ordered cells)` plans fed
//! through [`place_greedy`], the only placement primitive.

mod executor;
mod library;

pub use executor::{PlacementPlan, place_greedy};
pub use library::{ColumnParity, Flank, Lane, REINFORCE_ROW, Tactic, TacticOutcome, WALL_ROW};
