use std::fmt;

use crate::geom::Point;
use crate::topology::Topology;

/// Errors raised while building a [`CellGrid`](crate::CellGrid) from
/// external data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The map text contained no rows.
    EmptyMap,
    /// A map row differs in width from the first row.
    InconsistentSize { row: i32, expected: i32, found: i32 },
    /// A map character with no cell meaning.
    InvalidRune { ch: char, pos: Point },
    /// The constructor cannot build grids of this shape.
    UnsupportedTopology(Topology),
    /// An adjacency list names a cell that does not exist.
    NeighborOutOfRange { cell: usize, neighbor: usize },
    /// An adjacency list names its own cell.
    SelfNeighbor(usize),
    /// `cell` lists `neighbor`, but not the other way around.
    AsymmetricAdjacency { cell: usize, neighbor: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMap => f.write_str("grid map is empty"),
            Self::InconsistentSize {
                row,
                expected,
                found,
            } => write!(
                f,
                "grid map row {row} has width {found}, expected {expected}"
            ),
            Self::InvalidRune { ch, pos } => {
                write!(f, "grid map contains invalid rune \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::UnsupportedTopology(t) => write!(f, "unsupported topology {t:?}"),
            Self::NeighborOutOfRange { cell, neighbor } => {
                write!(f, "cell {cell} lists missing neighbour {neighbor}")
            }
            Self::SelfNeighbor(cell) => write!(f, "cell {cell} lists itself as a neighbour"),
            Self::AsymmetricAdjacency { cell, neighbor } => write!(
                f,
                "cell {cell} lists neighbour {neighbor}, which does not list it back"
            ),
        }
    }
}

impl std::error::Error for GridError {}
