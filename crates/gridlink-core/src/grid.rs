//! The [`CellGrid`] cell store: a topology plus its dense set of cells.
//!
//! Cells are addressed by index. On box and hex grids the index of the cell
//! at column `x`, row `y` is `y * columns + x`. Slots may be empty (absent
//! cells); lookups on an empty slot return `None`.

use crate::cell::{Cell, MAX_SIDES};
use crate::clearance::ClearanceCache;
use crate::error::GridError;
use crate::geom::{Point, Range, Vec2};
use crate::topology::{Layout, Topology};

/// One entry of a cell's neighbourhood.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Neighbor {
    pub index: usize,
    /// Side of the step, in the topology's direction order. On irregular
    /// grids this is the position in the adjacency list.
    pub side: usize,
    pub diagonal: bool,
}

/// Input record for [`CellGrid::irregular`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IrregularCell {
    pub center: Vec2,
    pub polygon: Vec<Vec2>,
    pub neighbors: Vec<usize>,
}

impl IrregularCell {
    /// A cell outlined by `polygon`, centred on the polygon's centroid.
    pub fn from_polygon(polygon: Vec<Vec2>, neighbors: Vec<usize>) -> Self {
        Self {
            center: Vec2::centroid(&polygon).unwrap_or_default(),
            polygon,
            neighbors,
        }
    }

    /// A cell with no outline. It can be searched but never resolved from a
    /// world point.
    pub fn at(center: Vec2, neighbors: Vec<usize>) -> Self {
        Self {
            center,
            polygon: Vec::new(),
            neighbors,
        }
    }
}

/// A grid of cells with a fixed topology.
#[derive(Clone, Debug)]
pub struct CellGrid {
    topology: Topology,
    columns: i32,
    rows: i32,
    layout: Layout,
    cells: Vec<Option<Cell>>,
    adjacency: Vec<Vec<usize>>,
    step_span: f32,
    pub(crate) clearance: ClearanceCache,
}

impl CellGrid {
    /// Square-cell grid with every cell crossable at unit cost.
    pub fn boxed(columns: i32, rows: i32) -> Self {
        Self::regular(Topology::Box, columns, rows)
    }

    /// Pointy-top hex grid (odd rows offset right).
    pub fn hex_pointy_top(columns: i32, rows: i32) -> Self {
        Self::regular(Topology::HexPointyTop, columns, rows)
    }

    /// Flat-top hex grid (odd columns offset down).
    pub fn hex_flat_top(columns: i32, rows: i32) -> Self {
        Self::regular(Topology::HexFlatTop, columns, rows)
    }

    pub(crate) fn regular(topology: Topology, columns: i32, rows: i32) -> Self {
        let columns = columns.max(0);
        let rows = rows.max(0);
        let layout = Layout::default();
        let cells = Range::new(0, 0, columns, rows)
            .iter()
            .enumerate()
            .map(|(i, p)| Some(Cell::new(i, p, topology.center(&layout, p))))
            .collect::<Vec<_>>();
        let len = cells.len();
        Self {
            topology,
            columns,
            rows,
            layout,
            cells,
            adjacency: Vec::new(),
            step_span: 1.0,
            clearance: ClearanceCache::new(len),
        }
    }

    /// Irregular grid from explicit cells and adjacency.
    ///
    /// Adjacency must be symmetric, must not list the cell itself and must
    /// only name existing cells.
    pub fn irregular(input: Vec<IrregularCell>) -> Result<Self, GridError> {
        let len = input.len();
        for (i, c) in input.iter().enumerate() {
            for &n in &c.neighbors {
                if n >= len {
                    return Err(GridError::NeighborOutOfRange {
                        cell: i,
                        neighbor: n,
                    });
                }
                if n == i {
                    return Err(GridError::SelfNeighbor(i));
                }
                if !input[n].neighbors.contains(&i) {
                    return Err(GridError::AsymmetricAdjacency {
                        cell: i,
                        neighbor: n,
                    });
                }
            }
        }

        let mut cells = Vec::with_capacity(len);
        let mut adjacency = Vec::with_capacity(len);
        for (i, c) in input.into_iter().enumerate() {
            let mut cell = Cell::new(i, Point::new(i as i32, 0), c.center);
            cell.polygon = c.polygon;
            cells.push(Some(cell));
            adjacency.push(c.neighbors);
        }

        let mut grid = Self {
            topology: Topology::Irregular,
            columns: len as i32,
            rows: 1,
            layout: Layout::default(),
            cells,
            adjacency,
            step_span: 0.0,
            clearance: ClearanceCache::new(len),
        };
        grid.step_span = grid.longest_step();
        Ok(grid)
    }

    /// Largest centroid distance between two adjacent present cells.
    fn longest_step(&self) -> f32 {
        let mut longest = 0.0f32;
        for (i, list) in self.adjacency.iter().enumerate() {
            let Some(a) = self.cell(i) else {
                continue;
            };
            for &n in list {
                if let Some(b) = self.cell(n) {
                    longest = longest.max(a.center.distance(b.center));
                }
            }
        }
        longest
    }

    /// Place the grid in world space, recomputing box and hex centres
    /// (builder). Irregular cells keep their own centres.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        if self.topology != Topology::Irregular {
            let topology = self.topology;
            for cell in self.cells.iter_mut().flatten() {
                cell.center = topology.center(&layout, cell.coord);
            }
        }
        self
    }

    // -----------------------------------------------------------------------
    // Shape
    // -----------------------------------------------------------------------

    #[inline]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    #[inline]
    pub fn columns(&self) -> i32 {
        self.columns
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Number of cell slots, including absent ones.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// World distance covered by one step, in the units the heuristics
    /// measure. 1 on box and hex grids; on irregular grids the longest
    /// centroid distance between neighbours (0 when no cells are adjacent).
    #[inline]
    pub fn step_span(&self) -> f32 {
        self.step_span
    }

    /// Coordinate span of a box or hex grid.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.columns, self.rows)
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// The cell at `index`, or `None` if out of range or absent.
    #[inline]
    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index).and_then(Option::as_ref)
    }

    /// Iterator over the present cells in index order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().flatten()
    }

    /// Index of the slot at column/row `coord` on a box or hex grid.
    #[inline]
    pub fn index_of(&self, coord: Point) -> Option<usize> {
        if self.topology == Topology::Irregular || !self.bounds().contains(coord) {
            return None;
        }
        Some((coord.y * self.columns + coord.x) as usize)
    }

    /// The present cell containing the world point `p`.
    pub fn cell_at(&self, p: Vec2) -> Option<usize> {
        match self.topology {
            Topology::Irregular => self
                .cells()
                .find(|c| p.in_polygon(&c.polygon))
                .map(|c| c.index),
            t => {
                let coord = t.coord_at(&self.layout, p)?;
                let i = self.index_of(coord)?;
                self.cell(i).map(|c| c.index)
            }
        }
    }

    /// Number of neighbour slots a cell has when none are missing.
    pub fn full_neighborhood(&self, index: usize, diagonals: bool) -> usize {
        match self.topology {
            Topology::Box if diagonals => 8,
            Topology::Box => 4,
            Topology::HexPointyTop | Topology::HexFlatTop => 6,
            Topology::Irregular => self.adjacency.get(index).map_or(0, Vec::len),
        }
    }

    /// Append the present neighbours of `index` into `buf`. The caller
    /// clears `buf` before calling.
    ///
    /// `diagonals` only affects box grids.
    pub fn neighbors(&self, index: usize, diagonals: bool, buf: &mut Vec<Neighbor>) {
        let Some(cell) = self.cell(index) else {
            return;
        };
        if self.topology == Topology::Irregular {
            for (side, &n) in self.adjacency[index].iter().enumerate() {
                if self.cell(n).is_some() {
                    buf.push(Neighbor {
                        index: n,
                        side,
                        diagonal: false,
                    });
                }
            }
            return;
        }
        let coord = cell.coord;
        for (side, &off) in self.topology.offsets(coord).iter().enumerate() {
            let diagonal = self.topology.is_diagonal_side(side);
            if diagonal && !diagonals {
                continue;
            }
            let Some(ni) = self.index_of(coord + off) else {
                continue;
            };
            if self.cell(ni).is_some() {
                buf.push(Neighbor {
                    index: ni,
                    side,
                    diagonal,
                });
            }
        }
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    fn cell_mut(&mut self, index: usize) -> Option<&mut Cell> {
        self.cells.get_mut(index).and_then(Option::as_mut)
    }

    /// Set crossability. Returns `false` if the cell is absent.
    pub fn set_can_cross(&mut self, index: usize, can_cross: bool) -> bool {
        let Some(cell) = self.cell_mut(index) else {
            return false;
        };
        if cell.can_cross != can_cross {
            cell.can_cross = can_cross;
            self.clearance.mark_dirty();
        }
        true
    }

    /// Set the group bitmask. Returns `false` if the cell is absent.
    pub fn set_group(&mut self, index: usize, group: u32) -> bool {
        let Some(cell) = self.cell_mut(index) else {
            return false;
        };
        if cell.group != group {
            cell.group = group;
            self.clearance.mark_dirty();
        }
        true
    }

    /// Set visibility. Returns `false` if the cell is absent.
    pub fn set_visible(&mut self, index: usize, visible: bool) -> bool {
        let Some(cell) = self.cell_mut(index) else {
            return false;
        };
        cell.visible = visible;
        true
    }

    /// Set the uniform cross cost, dropping any per-side overrides.
    /// Returns `false` if the cell is absent.
    pub fn set_cross_cost(&mut self, index: usize, cost: f32) -> bool {
        let Some(cell) = self.cell_mut(index) else {
            return false;
        };
        cell.cross_cost = cost;
        cell.side_costs = None;
        true
    }

    /// Override the cost of entering `index` through `side`. Returns
    /// `false` if the cell is absent or `side` is out of range.
    pub fn set_side_cost(&mut self, index: usize, side: usize, cost: f32) -> bool {
        if side >= MAX_SIDES {
            return false;
        }
        let Some(cell) = self.cell_mut(index) else {
            return false;
        };
        cell.set_side_cost(side, cost);
        true
    }

    /// Remove a cell, leaving an empty slot.
    pub fn remove_cell(&mut self, index: usize) -> Option<Cell> {
        let removed = self.cells.get_mut(index)?.take();
        if removed.is_some() {
            self.clearance.mark_dirty();
        }
        removed
    }

    /// Put `cell` back into the slot named by its index. Returns `false`
    /// if the index is out of range.
    pub fn insert_cell(&mut self, cell: Cell) -> bool {
        let Some(slot) = self.cells.get_mut(cell.index) else {
            return false;
        };
        *slot = Some(cell);
        self.clearance.mark_dirty();
        if self.topology == Topology::Irregular {
            self.step_span = self.longest_step();
        }
        true
    }

    /// Force the next clearance query to rebuild the whole cache.
    #[inline]
    pub fn mark_clearance_dirty(&mut self) {
        self.clearance.mark_dirty();
    }
}
