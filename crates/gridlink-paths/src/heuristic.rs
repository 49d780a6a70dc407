use gridlink_core::{Cell, CellGrid, Point, Topology};

const SQRT_2_MINUS_1: f32 = std::f32::consts::SQRT_2 - 1.0;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// Octile distance: diagonal steps cost √2, straight steps 1.
#[inline]
pub fn octile(a: Point, b: Point) -> f32 {
    let dx = (a.x - b.x).abs() as f32;
    let dy = (a.y - b.y).abs() as f32;
    dx.max(dy) + SQRT_2_MINUS_1 * dx.min(dy)
}

/// Distance estimate guiding the search towards the destination.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heuristic {
    #[default]
    Euclidean,
    /// Squared euclidean distance. Cheaper, but overestimates and so
    /// trades optimality for speed.
    EuclideanNoSqrt,
    Manhattan,
    Chebyshev,
    /// Octile distance on box grids.
    DiagonalShortcut,
}

impl Heuristic {
    /// Estimate the cost from `from` to `to` on `grid`, in steps.
    ///
    /// Box grids measure in columns/rows, hex grids in hex steps (or
    /// unit-spaced centres for the euclidean variants). Irregular grids
    /// measure between world centroids, divided by the grid's
    /// [`step_span`](CellGrid::step_span) so that one step counts as at
    /// most 1. With step costs of at least 1, `Euclidean` never
    /// overestimates on any topology.
    pub fn estimate(self, grid: &CellGrid, from: &Cell, to: &Cell) -> f32 {
        let topology = grid.topology();
        match topology {
            Topology::Box => self.on_box(from.coord, to.coord),
            Topology::HexPointyTop | Topology::HexFlatTop => match self {
                Self::Euclidean => topology
                    .unit_center(from.coord)
                    .distance(topology.unit_center(to.coord)),
                Self::EuclideanNoSqrt => topology
                    .unit_center(from.coord)
                    .distance_squared(topology.unit_center(to.coord)),
                Self::Manhattan | Self::Chebyshev | Self::DiagonalShortcut => {
                    topology.hex_distance(from.coord, to.coord) as f32
                }
            },
            Topology::Irregular => {
                let span = grid.step_span();
                if span <= 0.0 {
                    return 0.0;
                }
                let dx = (from.center.x - to.center.x).abs() / span;
                let dy = (from.center.y - to.center.y).abs() / span;
                match self {
                    Self::Euclidean => (dx * dx + dy * dy).sqrt(),
                    Self::EuclideanNoSqrt => dx * dx + dy * dy,
                    Self::Manhattan => dx + dy,
                    Self::Chebyshev => dx.max(dy),
                    Self::DiagonalShortcut => dx.max(dy) + SQRT_2_MINUS_1 * dx.min(dy),
                }
            }
        }
    }

    fn on_box(self, a: Point, b: Point) -> f32 {
        match self {
            Self::Euclidean => {
                let dx = (a.x - b.x) as f32;
                let dy = (a.y - b.y) as f32;
                (dx * dx + dy * dy).sqrt()
            }
            Self::EuclideanNoSqrt => {
                let dx = (a.x - b.x) as f32;
                let dy = (a.y - b.y) as f32;
                dx * dx + dy * dy
            }
            Self::Manhattan => manhattan(a, b) as f32,
            Self::Chebyshev => chebyshev(a, b) as f32,
            Self::DiagonalShortcut => octile(a, b),
        }
    }
}
