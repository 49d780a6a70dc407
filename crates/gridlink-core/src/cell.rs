//! The [`Cell`] record: one traversable unit of a grid.

use crate::geom::{Point, Vec2};

/// Group value matching every mask: all bits set.
pub const ANY_GROUP: u32 = u32::MAX;

/// Largest number of per-side cost overrides a cell carries.
pub const MAX_SIDES: usize = 8;

/// A grid cell and the fields pathfinding reads.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    /// Dense index, equal to the cell's slot in its grid.
    pub index: usize,
    /// Column/row on box and hex grids. Irregular cells store their index
    /// in `x`.
    pub coord: Point,
    /// World-space centroid.
    pub center: Vec2,
    /// Outline of an irregular cell. Empty on box and hex grids.
    pub polygon: Vec<Vec2>,
    pub can_cross: bool,
    /// Traversal class bitmask.
    pub group: u32,
    /// Uniform cost of entering the cell.
    pub cross_cost: f32,
    /// Per-side overrides of `cross_cost`, indexed by the side of the step
    /// entering the cell.
    pub side_costs: Option<[f32; MAX_SIDES]>,
    pub visible: bool,
}

impl Cell {
    /// A crossable, visible cell in every group with unit cost.
    pub fn new(index: usize, coord: Point, center: Vec2) -> Self {
        Self {
            index,
            coord,
            center,
            polygon: Vec::new(),
            can_cross: true,
            group: ANY_GROUP,
            cross_cost: 1.0,
            side_costs: None,
            visible: true,
        }
    }

    /// Set crossability (builder).
    #[inline]
    pub fn with_can_cross(mut self, can_cross: bool) -> Self {
        self.can_cross = can_cross;
        self
    }

    /// Set the group bitmask (builder).
    #[inline]
    pub fn with_group(mut self, group: u32) -> Self {
        self.group = group;
        self
    }

    /// Set the uniform cross cost (builder).
    #[inline]
    pub fn with_cross_cost(mut self, cost: f32) -> Self {
        self.cross_cost = cost;
        self
    }

    /// Cost of entering this cell through `side`.
    ///
    /// Falls back to `cross_cost` when no override exists for that side.
    #[inline]
    pub fn side_cost(&self, side: usize) -> f32 {
        match &self.side_costs {
            Some(costs) if side < MAX_SIDES => costs[side],
            _ => self.cross_cost,
        }
    }

    /// Override the cost of entering through `side`. Other sides keep the
    /// uniform cost. Sides beyond [`MAX_SIDES`] are ignored.
    pub fn set_side_cost(&mut self, side: usize, cost: f32) {
        if side >= MAX_SIDES {
            return;
        }
        let uniform = self.cross_cost;
        let costs = self.side_costs.get_or_insert([uniform; MAX_SIDES]);
        costs[side] = cost;
    }

    /// Whether the cell belongs to `mask`: any shared bit, or the exact
    /// value when `exact` is set.
    #[inline]
    pub fn in_group(group: u32, mask: u32, exact: bool) -> bool {
        if exact { group == mask } else { group & mask != 0 }
    }
}
