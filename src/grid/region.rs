//! Region classifier.
//!
//! Every cell of the square board maps to exactly one of eight regions: the
//! side (own half or enemy half) crossed with a zone (back, front, left or
//! right). The zone split uses a central column band: cells left of the band
//! are `Left`, cells right of it are `Right`, and cells inside it are split
//! into `Back` and `Front` by a per-side row divider. The three column tests
//! exhaust every column, so classification can only fail for cells that lie
//! off the board.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::grid::Cell;

/// Number of regions.
pub const REGION_COUNT: usize = 8;

/// Largest board side length accepted by [`Geometry::validate`].
pub const MAX_ARENA_SIZE: u16 = 256;

/// Which half of the board a cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The acting side's half.
    Own,
    /// The opponent's half.
    Enemy,
}

/// Position of a region within its half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    /// Central band, towards the side's own edge.
    Back,
    /// Central band, towards the half divider.
    Front,
    /// Columns at or left of the left divider.
    Left,
    /// Columns at or right of the right divider.
    Right,
}

/// One of the eight named regions of the board.
///
/// Left and right are always from the acting side's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Region {
    /// Own half, central band, behind the front divider.
    OwnBack = 0,
    /// Own half, central band, ahead of the front divider.
    OwnFront = 1,
    /// Own half, left columns.
    OwnLeft = 2,
    /// Own half, right columns.
    OwnRight = 3,
    /// Enemy half, central band, behind the enemy's front divider.
    EnemyBack = 4,
    /// Enemy half, central band, ahead of the enemy's front divider.
    EnemyFront = 5,
    /// Enemy half, left columns.
    EnemyLeft = 6,
    /// Enemy half, right columns.
    EnemyRight = 7,
}

impl Region {
    /// All regions in index order.
    pub const ALL: [Region; REGION_COUNT] = [
        Region::OwnBack,
        Region::OwnFront,
        Region::OwnLeft,
        Region::OwnRight,
        Region::EnemyBack,
        Region::EnemyFront,
        Region::EnemyLeft,
        Region::EnemyRight,
    ];

    /// Combine a side and a zone.
    #[must_use]
    pub const fn new(side: Side, zone: Zone) -> Self {
        match (side, zone) {
            (Side::Own, Zone::Back) => Region::OwnBack,
            (Side::Own, Zone::Front) => Region::OwnFront,
            (Side::Own, Zone::Left) => Region::OwnLeft,
            (Side::Own, Zone::Right) => Region::OwnRight,
            (Side::Enemy, Zone::Back) => Region::EnemyBack,
            (Side::Enemy, Zone::Front) => Region::EnemyFront,
            (Side::Enemy, Zone::Left) => Region::EnemyLeft,
            (Side::Enemy, Zone::Right) => Region::EnemyRight,
        }
    }

    /// Dense index in `0..REGION_COUNT`.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The half this region lies in.
    #[must_use]
    pub const fn side(self) -> Side {
        match self {
            Region::OwnBack | Region::OwnFront | Region::OwnLeft | Region::OwnRight => Side::Own,
            _ => Side::Enemy,
        }
    }

    /// The zone of this region within its half.
    #[must_use]
    pub const fn zone(self) -> Zone {
        match self {
            Region::OwnBack | Region::EnemyBack => Zone::Back,
            Region::OwnFront | Region::EnemyFront => Zone::Front,
            Region::OwnLeft | Region::EnemyLeft => Zone::Left,
            Region::OwnRight | Region::EnemyRight => Zone::Right,
        }
    }

    /// Upper-case name, e.g. `OWN_BACK`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Region::OwnBack => "OWN_BACK",
            Region::OwnFront => "OWN_FRONT",
            Region::OwnLeft => "OWN_LEFT",
            Region::OwnRight => "OWN_RIGHT",
            Region::EnemyBack => "ENEMY_BACK",
            Region::EnemyFront => "ENEMY_FRONT",
            Region::EnemyLeft => "ENEMY_LEFT",
            Region::EnemyRight => "ENEMY_RIGHT",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed board thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geometry {
    /// Side length of the square board.
    pub arena_size: u16,
    /// Rows below this belong to the own half.
    pub half_divider: u16,
    /// Columns at or below this are `Left`.
    pub left_divider: u16,
    /// Columns at or above this are `Right`.
    pub right_divider: u16,
    /// Own-half rows at or below this are `Back`.
    pub own_front_back_divider: u16,
    /// Enemy-half rows at or above this are `Back`.
    pub enemy_front_back_divider: u16,
}

impl Geometry {
    /// The standard 28×28 board.
    pub const STANDARD: Geometry = Geometry {
        arena_size: 28,
        half_divider: 14,
        left_divider: 8,
        right_divider: 19,
        own_front_back_divider: 8,
        enemy_front_back_divider: 19,
    };

    /// Validate the thresholds against each other.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] describing the first
    /// inconsistent threshold.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(EngineError::InvalidConfig(msg));

        if !(2..=MAX_ARENA_SIZE).contains(&self.arena_size) {
            return invalid(format!(
                "arena_size ({}) must lie inside 2..={MAX_ARENA_SIZE}",
                self.arena_size
            ));
        }
        if self.half_divider == 0 || self.half_divider >= self.arena_size {
            return invalid(format!(
                "half_divider ({}) must lie inside 1..{}",
                self.half_divider, self.arena_size
            ));
        }
        if self.right_divider <= self.left_divider.saturating_add(1)
            || self.right_divider >= self.arena_size
        {
            return invalid(format!(
                "column band {}..{} must be non-empty and inside the board",
                self.left_divider, self.right_divider
            ));
        }
        if self.half_divider <= self.own_front_back_divider.saturating_add(1) {
            return invalid(format!(
                "own_front_back_divider ({}) must leave front rows below half_divider ({})",
                self.own_front_back_divider, self.half_divider
            ));
        }
        if self.enemy_front_back_divider <= self.half_divider
            || self.enemy_front_back_divider >= self.arena_size
        {
            return invalid(format!(
                "enemy_front_back_divider ({}) must lie inside {}..{}",
                self.enemy_front_back_divider,
                self.half_divider + 1,
                self.arena_size
            ));
        }

        Ok(())
    }

    /// Check if a cell lies on the square board.
    #[must_use]
    pub const fn contains(&self, cell: Cell) -> bool {
        cell.x < self.arena_size && cell.y < self.arena_size
    }

    /// The half a cell's row belongs to.
    #[must_use]
    pub const fn side_of(&self, cell: Cell) -> Side {
        if cell.y < self.half_divider {
            Side::Own
        } else {
            Side::Enemy
        }
    }

    /// Classify a cell into its region.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnclassifiableCell`] if the cell lies off the
    /// board; every on-board cell classifies.
    pub fn classify(&self, cell: Cell) -> Result<Region> {
        if !self.contains(cell) {
            return Err(EngineError::UnclassifiableCell {
                x: cell.x,
                y: cell.y,
                size: self.arena_size,
            });
        }

        let side = self.side_of(cell);
        let zone = if cell.x <= self.left_divider {
            Zone::Left
        } else if cell.x >= self.right_divider {
            Zone::Right
        } else {
            let back = match side {
                Side::Own => cell.y <= self.own_front_back_divider,
                Side::Enemy => cell.y >= self.enemy_front_back_divider,
            };
            if back { Zone::Back } else { Zone::Front }
        };

        Ok(Region::new(side, zone))
    }

    /// Iterate over every cell of the square board, column by column.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        let size = self.arena_size;
        (0..size).flat_map(move |x| (0..size).map(move |y| Cell::new(x, y)))
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Cells of every region, precomputed once per geometry.
///
/// The per-region cell count is the denominator of the region metrics.
#[derive(Debug, Clone)]
pub struct RegionTable {
    geometry: Geometry,
    cells: [Vec<Cell>; REGION_COUNT],
}

impl RegionTable {
    /// Classify every board cell and bucket it by region.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnclassifiableCell`] if any board cell fails to
    /// classify and [`EngineError::EmptyRegion`] if a region ends up with no
    /// cells.
    pub fn build(geometry: Geometry) -> Result<Self> {
        let mut cells: [Vec<Cell>; REGION_COUNT] = std::array::from_fn(|_| Vec::new());

        for cell in geometry.cells() {
            let region = geometry.classify(cell)?;
            cells[region.index()].push(cell);
        }

        if let Some(region) = Region::ALL.into_iter().find(|r| cells[r.index()].is_empty()) {
            return Err(EngineError::EmptyRegion(region));
        }

        Ok(Self { geometry, cells })
    }

    /// The geometry this table was built from.
    #[must_use]
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Classify a cell with this table's geometry.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnclassifiableCell`] for off-board cells.
    pub fn classify(&self, cell: Cell) -> Result<Region> {
        self.geometry.classify(cell)
    }

    /// Cells assigned to a region.
    #[must_use]
    pub fn cells(&self, region: Region) -> &[Cell] {
        &self.cells[region.index()]
    }

    /// Number of cells assigned to a region. Never zero.
    #[must_use]
    pub fn cell_count(&self, region: Region) -> usize {
        self.cells[region.index()].len()
    }
}
