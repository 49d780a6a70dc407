//! Grid shapes: the [`Topology`] tag, world [`Layout`] and the per-shape
//! adjacency and coordinate rules.
//!
//! Hex grids use offset coordinates: pointy-top grids shove odd rows half a
//! cell to the right ("odd-r"), flat-top grids shove odd columns half a
//! cell down ("odd-q"). Distances are computed in axial coordinates.

use crate::geom::{Point, Vec2};

const SQRT_3: f32 = 1.732_050_8;

/// The shape of a grid's cells and how they connect.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Topology {
    /// Square cells, 4 edge neighbours plus 4 optional diagonals.
    #[default]
    Box,
    /// Hexagons with a vertex pointing up; odd rows are offset.
    HexPointyTop,
    /// Hexagons with an edge on top; odd columns are offset.
    HexFlatTop,
    /// Arbitrary polygons with explicit adjacency lists.
    Irregular,
}

/// Box directions, clockwise from north. Odd entries are diagonals.
const BOX_STEPS: [Point; 8] = [
    Point::new(0, -1),
    Point::new(1, -1),
    Point::new(1, 0),
    Point::new(1, 1),
    Point::new(0, 1),
    Point::new(-1, 1),
    Point::new(-1, 0),
    Point::new(-1, -1),
];

// E, NE, NW, W, SW, SE
const POINTY_EVEN_ROW: [Point; 6] = [
    Point::new(1, 0),
    Point::new(0, -1),
    Point::new(-1, -1),
    Point::new(-1, 0),
    Point::new(-1, 1),
    Point::new(0, 1),
];
const POINTY_ODD_ROW: [Point; 6] = [
    Point::new(1, 0),
    Point::new(1, -1),
    Point::new(0, -1),
    Point::new(-1, 0),
    Point::new(0, 1),
    Point::new(1, 1),
];

// SE, NE, N, NW, SW, S
const FLAT_EVEN_COL: [Point; 6] = [
    Point::new(1, 0),
    Point::new(1, -1),
    Point::new(0, -1),
    Point::new(-1, -1),
    Point::new(-1, 0),
    Point::new(0, 1),
];
const FLAT_ODD_COL: [Point; 6] = [
    Point::new(1, 1),
    Point::new(1, 0),
    Point::new(0, -1),
    Point::new(-1, 0),
    Point::new(-1, 1),
    Point::new(0, 1),
];

impl Topology {
    /// Whether this is one of the two hexagonal shapes.
    #[inline]
    pub fn is_hex(self) -> bool {
        matches!(self, Self::HexPointyTop | Self::HexFlatTop)
    }

    /// Coordinate offsets of the neighbours of `coord`, indexed by side.
    ///
    /// Box grids return all eight directions; callers filter diagonals
    /// with [`is_diagonal_side`](Self::is_diagonal_side). Irregular grids
    /// have no offsets.
    pub fn offsets(self, coord: Point) -> &'static [Point] {
        match self {
            Self::Box => &BOX_STEPS,
            Self::HexPointyTop if coord.y & 1 == 0 => &POINTY_EVEN_ROW,
            Self::HexPointyTop => &POINTY_ODD_ROW,
            Self::HexFlatTop if coord.x & 1 == 0 => &FLAT_EVEN_COL,
            Self::HexFlatTop => &FLAT_ODD_COL,
            Self::Irregular => &[],
        }
    }

    /// Whether `side` is a diagonal step. Only box grids have diagonals.
    #[inline]
    pub fn is_diagonal_side(self, side: usize) -> bool {
        self == Self::Box && side % 2 == 1
    }

    /// Axial `(q, r)` coordinates of a hex cell. Box and irregular
    /// coordinates are returned unchanged.
    pub fn axial(self, coord: Point) -> Point {
        match self {
            Self::HexPointyTop => {
                Point::new(coord.x - (coord.y - (coord.y & 1)) / 2, coord.y)
            }
            Self::HexFlatTop => {
                Point::new(coord.x, coord.y - (coord.x - (coord.x & 1)) / 2)
            }
            Self::Box | Self::Irregular => coord,
        }
    }

    fn from_axial(self, axial: Point) -> Point {
        match self {
            Self::HexPointyTop => {
                Point::new(axial.x + (axial.y - (axial.y & 1)) / 2, axial.y)
            }
            Self::HexFlatTop => {
                Point::new(axial.x, axial.y + (axial.x - (axial.x & 1)) / 2)
            }
            Self::Box | Self::Irregular => axial,
        }
    }

    /// Number of steps between two hex cells.
    pub fn hex_distance(self, a: Point, b: Point) -> i32 {
        let a = self.axial(a);
        let b = self.axial(b);
        let dq = a.x - b.x;
        let dr = a.y - b.y;
        (dq.abs() + dr.abs() + (dq + dr).abs()) / 2
    }

    /// Cell centre in units where adjacent edge neighbours are 1 apart.
    pub fn unit_center(self, coord: Point) -> Vec2 {
        let x = coord.x as f32;
        let y = coord.y as f32;
        match self {
            Self::HexPointyTop => Vec2::new(x + 0.5 * (coord.y & 1) as f32, y * SQRT_3 / 2.0),
            Self::HexFlatTop => Vec2::new(x * SQRT_3 / 2.0, y + 0.5 * (coord.x & 1) as f32),
            Self::Box | Self::Irregular => Vec2::new(x, y),
        }
    }

    /// World-space centre of the cell at `coord`.
    ///
    /// Box cell `(0, 0)` spans `[origin, origin + cell_size)`; hex cell
    /// `(0, 0)` is centred on the origin with circumradius `cell_size`.
    pub fn center(self, layout: &Layout, coord: Point) -> Vec2 {
        match self {
            Self::Box => {
                let c = Vec2::new(coord.x as f32 + 0.5, coord.y as f32 + 0.5);
                layout.origin + c * layout.cell_size
            }
            Self::HexPointyTop | Self::HexFlatTop => {
                layout.origin + self.unit_center(coord) * (SQRT_3 * layout.cell_size)
            }
            Self::Irregular => layout.origin,
        }
    }

    /// Grid coordinate containing the world point `p`. The result may lie
    /// outside the grid; irregular grids resolve points by polygon instead.
    pub fn coord_at(self, layout: &Layout, p: Vec2) -> Option<Point> {
        if layout.cell_size <= 0.0 {
            return None;
        }
        let local = (p - layout.origin) * (1.0 / layout.cell_size);
        match self {
            Self::Box => Some(Point::new(local.x.floor() as i32, local.y.floor() as i32)),
            Self::HexPointyTop => {
                let q = SQRT_3 / 3.0 * local.x - local.y / 3.0;
                let r = 2.0 / 3.0 * local.y;
                Some(self.from_axial(axial_round(q, r)))
            }
            Self::HexFlatTop => {
                let q = 2.0 / 3.0 * local.x;
                let r = -local.x / 3.0 + SQRT_3 / 3.0 * local.y;
                Some(self.from_axial(axial_round(q, r)))
            }
            Self::Irregular => None,
        }
    }
}

/// Round fractional axial coordinates to the nearest hex.
fn axial_round(q: f32, r: f32) -> Point {
    let s = -q - r;
    let mut rq = q.round();
    let mut rr = r.round();
    let rs = s.round();
    let dq = (rq - q).abs();
    let dr = (rr - r).abs();
    let ds = (rs - s).abs();
    if dq > dr && dq > ds {
        rq = -rr - rs;
    } else if dr > ds {
        rr = -rq - rs;
    }
    Point::new(rq as i32, rr as i32)
}

/// Placement of a grid in world space.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layout {
    pub origin: Vec2,
    /// Side length for box cells, circumradius for hex cells.
    pub cell_size: f32,
}

impl Layout {
    pub const fn new(origin: Vec2, cell_size: f32) -> Self {
        Self { origin, cell_size }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            origin: Vec2::ZERO,
            cell_size: 1.0,
        }
    }
}
