//! Region metrics: strength and danger per region.
//!
//! Both scores are density-normalised: the sum over a region's structures is
//! divided by the number of cells in the region, not by the number of units.
//!
//! - Strength = Σ integrity / max integrity, over every structure
//! - Danger = Σ (integrity / max integrity) × damage, over destructors only
//!
//! Structures are re-bucketed by region on every call. Units move and die
//! between turns, so no assignment is ever carried over.

use std::array;
use std::iter::Zip;
use std::ops::Index;
use std::slice;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::Result;
use crate::grid::{REGION_COUNT, Region, RegionTable};
use crate::snapshot::{TurnSnapshot, Unit};
use crate::units::{UnitCatalog, UnitType};

/// One value per region, indexable by [`Region`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PerRegion<T>([T; REGION_COUNT]);

impl<T> PerRegion<T> {
    /// Build by evaluating `f` for every region in index order.
    #[must_use]
    pub fn from_fn(mut f: impl FnMut(Region) -> T) -> Self {
        Self(Region::ALL.map(&mut f))
    }

    /// Iterate over regions and their values.
    pub fn iter(&self) -> Iter<'_, T> {
        Region::ALL.into_iter().zip(self.0.iter())
    }
}

/// Iterator over `(region, value)` pairs of a [`PerRegion`].
pub type Iter<'a, T> = Zip<array::IntoIter<Region, REGION_COUNT>, slice::Iter<'a, T>>;

impl<'a, T> IntoIterator for &'a PerRegion<T> {
    type Item = (Region, &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Index<Region> for PerRegion<T> {
    type Output = T;

    fn index(&self, region: Region) -> &T {
        &self.0[region.index()]
    }
}

impl<T: Serialize> Serialize for PerRegion<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(REGION_COUNT))?;
        for (region, value) in self.iter() {
            map.serialize_entry(region.name(), value)?;
        }
        map.end()
    }
}

/// Strength and danger of a single region.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize)]
pub struct RegionScore {
    /// Density-normalised relative integrity of all structures.
    pub strength: f64,
    /// Density-normalised expected damage output of destructors.
    pub danger: f64,
}

/// Strength and danger for every region, recomputed each turn.
pub type RegionMetrics = PerRegion<RegionScore>;

/// Live structures bucketed by the region they stand in.
#[derive(Debug, Clone)]
pub struct RegionAssignment<'a> {
    units: [Vec<&'a Unit>; REGION_COUNT],
}

impl<'a> RegionAssignment<'a> {
    /// Structures standing in a region.
    #[must_use]
    pub fn units(&self, region: Region) -> &[&'a Unit] {
        &self.units[region.index()]
    }
}

/// Classify every live structure once and bucket it by region.
///
/// # Errors
///
/// Returns [`crate::EngineError::UnclassifiableCell`] if a structure stands
/// off the configured board.
pub fn assign_structures<'a>(
    table: &RegionTable,
    snapshot: &'a TurnSnapshot,
) -> Result<RegionAssignment<'a>> {
    let mut units: [Vec<&'a Unit>; REGION_COUNT] = std::array::from_fn(|_| Vec::new());
    for unit in &snapshot.structures {
        let region = table.classify(unit.cell)?;
        units[region.index()].push(unit);
    }
    Ok(RegionAssignment { units })
}

/// Relative integrity of a structure, in `[0, ∞)`.
fn relative_integrity(catalog: &UnitCatalog, unit: &Unit) -> Result<f64> {
    Ok(unit.integrity.max(0.0) / catalog.max_integrity(unit.unit_type)?)
}

/// Divide a per-region sum by the region's cell count.
#[allow(clippy::cast_precision_loss)]
fn per_cell(table: &RegionTable, region: Region, total: f64) -> f64 {
    total / table.cell_count(region) as f64
}

/// Compute the strength score of every region.
///
/// # Errors
///
/// Returns [`crate::EngineError::UnclassifiableCell`] for off-board
/// structures and [`crate::EngineError::MissingAttribute`] if a structure type
/// has no max integrity configured.
pub fn compute_strength(
    table: &RegionTable,
    catalog: &UnitCatalog,
    snapshot: &TurnSnapshot,
) -> Result<PerRegion<f64>> {
    let assignment = assign_structures(table, snapshot)?;
    let mut strength = [0.0; REGION_COUNT];

    for region in Region::ALL {
        let mut total = 0.0;
        for unit in assignment.units(region) {
            total += relative_integrity(catalog, unit)?;
        }
        strength[region.index()] = per_cell(table, region, total);
    }

    Ok(PerRegion(strength))
}

/// Compute the danger score of every region.
///
/// # Errors
///
/// Returns [`crate::EngineError::UnclassifiableCell`] for off-board
/// structures and [`crate::EngineError::MissingAttribute`] if the destructor
/// has no max integrity or damage configured.
pub fn compute_danger(
    table: &RegionTable,
    catalog: &UnitCatalog,
    snapshot: &TurnSnapshot,
) -> Result<PerRegion<f64>> {
    let assignment = assign_structures(table, snapshot)?;
    let mut danger = [0.0; REGION_COUNT];

    for region in Region::ALL {
        let mut total = 0.0;
        for unit in assignment.units(region) {
            if unit.unit_type == UnitType::Destructor {
                total += relative_integrity(catalog, unit)? * catalog.damage(unit.unit_type)?;
            }
        }
        danger[region.index()] = per_cell(table, region, total);
    }

    Ok(PerRegion(danger))
}

/// Compute strength and danger for every region.
///
/// # Errors
///
/// Propagates the errors of [`compute_strength`] and [`compute_danger`].
pub fn analyze(
    table: &RegionTable,
    catalog: &UnitCatalog,
    snapshot: &TurnSnapshot,
) -> Result<RegionMetrics> {
    let strength = compute_strength(table, catalog, snapshot)?;
    let danger = compute_danger(table, catalog, snapshot)?;
    Ok(PerRegion::from_fn(|region| RegionScore {
        strength: strength[region],
        danger: danger[region],
    }))
}
