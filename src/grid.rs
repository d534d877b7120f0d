//! Board geometry for the decision engine.
//!
//! - Cells on a fixed square board
//! - The eight-way region classifier and its precomputed region table
//! - The diamond-shaped playable arena inside the square board

mod arena;
mod cell;
mod region;

pub use cell::Cell;
pub use region::{Geometry, MAX_ARENA_SIZE, REGION_COUNT, Region, RegionTable, Side, Zone};
