//! **gridlink-core**: the cell store behind gridlink's pathfinding.
//!
//! This crate provides the data a search reads: geometry primitives, cell
//! records, grid topologies (box, pointy/flat hex, irregular polygons),
//! adjacency, world-point lookup and the grid-wide clearance cache.

pub mod ascii;
pub mod cell;
pub mod clearance;
pub mod error;
pub mod geom;
pub mod grid;
pub mod topology;

pub use cell::{ANY_GROUP, Cell, MAX_SIDES};
pub use clearance::UNBOUNDED_CLEARANCE;
pub use error::GridError;
pub use geom::{Point, Range, Vec2};
pub use grid::{CellGrid, IrregularCell, Neighbor};
pub use topology::{Layout, Topology};

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn topology_and_layout_round_trip() {
        let layout = Layout::new(Vec2::new(4.0, -2.5), 3.0);
        let json = serde_json::to_string(&(Topology::HexFlatTop, layout)).unwrap();
        let back: (Topology, Layout) = serde_json::from_str(&json).unwrap();
        assert_eq!(back, (Topology::HexFlatTop, layout));
    }

    #[test]
    fn cell_round_trip() {
        let mut cell = Cell::new(7, Point::new(1, 2), Vec2::new(1.5, 2.5)).with_group(0b101);
        cell.set_side_cost(3, 4.0);
        let json = serde_json::to_string(&cell).unwrap();
        let back: Cell = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cell);
    }
}
