//! Map generation and text rendering shared by the demos.
//!
//! Demonstrates: cave generation on box and hex grids, per-cell costs,
//! clearance-limited searches and portal routing between grids.

use std::collections::HashSet;

use gridlink_core::{CellGrid, GridError, Point, Topology};
use rand::Rng;

/// Fraction of cells that start as walls before smoothing.
const WALL_DENSITY: f64 = 0.38;
/// Fraction of open cells that become cost-3 mud.
const MUD_DENSITY: f64 = 0.12;

/// A cave map on `topology`: random noise, one cellular-automaton pass,
/// a scatter of expensive cells and a solid border. The four corners are
/// always open. A non-positive size is [`GridError::EmptyMap`].
pub fn cave<R: Rng>(
    rng: &mut R,
    topology: Topology,
    width: i32,
    height: i32,
) -> Result<CellGrid, GridError> {
    if width <= 0 || height <= 0 {
        return Err(GridError::EmptyMap);
    }
    let w = width as usize;
    let h = height as usize;
    let mut wall: Vec<bool> = (0..w * h).map(|_| rng.random_bool(WALL_DENSITY)).collect();

    // 4-5 rule: a cell becomes a wall when most of its 3x3 block is wall.
    let prev = wall.clone();
    for y in 0..h {
        for x in 0..w {
            let mut count = 0;
            for dy in -1i32..=1 {
                for dx in -1i32..=1 {
                    let nx = x as i32 + dx;
                    let ny = y as i32 + dy;
                    let outside = nx < 0 || ny < 0 || nx >= width || ny >= height;
                    if outside || prev[ny as usize * w + nx as usize] {
                        count += 1;
                    }
                }
            }
            wall[y * w + x] = count >= 5;
        }
    }

    for corner in [0, w - 1, w * (h - 1), w * h - 1] {
        wall[corner] = false;
    }

    let mut text = String::with_capacity(w * h + h);
    for y in 0..h {
        for x in 0..w {
            let ch = if wall[y * w + x] {
                '#'
            } else if rng.random_bool(MUD_DENSITY) {
                '3'
            } else {
                '.'
            };
            text.push(ch);
        }
        text.push('\n');
    }
    CellGrid::from_ascii(topology, &text)
}

/// Draw `grid` as text, marking the cells of `path` with `*` and the cells
/// in `marks` with their own character.
///
/// Odd rows of pointy-top hex grids are indented by one column; other
/// topologies are drawn as a plain rectangle. Irregular grids have no
/// rectangle and render as an empty string.
pub fn render(grid: &CellGrid, path: &[usize], marks: &[(usize, char)]) -> String {
    if grid.topology() == Topology::Irregular {
        return String::new();
    }
    let on_path: HashSet<usize> = path.iter().copied().collect();
    let mut out = String::new();
    for y in 0..grid.rows() {
        if grid.topology() == Topology::HexPointyTop && y % 2 == 1 {
            out.push(' ');
        }
        for x in 0..grid.columns() {
            let cell = grid
                .index_of(Point::new(x, y))
                .and_then(|i| grid.cell(i));
            let ch = match cell {
                None => ' ',
                Some(c) => {
                    if let Some(&(_, m)) = marks.iter().find(|(i, _)| *i == c.index) {
                        m
                    } else if on_path.contains(&c.index) {
                        '*'
                    } else if !c.can_cross {
                        '#'
                    } else if !c.visible {
                        '?'
                    } else if c.cross_cost > 1.0 {
                        '~'
                    } else {
                        '.'
                    }
                }
            };
            out.push(ch);
            if grid.topology() == Topology::HexPointyTop {
                out.push(' ');
            }
        }
        out.push('\n');
    }
    out
}

/// The open cell nearest to `coord` in row-major scan order, searching
/// outward ring by ring.
pub fn nearest_open(grid: &CellGrid, coord: Point) -> Option<usize> {
    let reach = grid.columns().max(grid.rows());
    for r in 0..=reach {
        for dy in -r..=r {
            for dx in -r..=r {
                if dx.abs() != r && dy.abs() != r {
                    continue;
                }
                let open = grid
                    .index_of(coord.shift(dx, dy))
                    .and_then(|i| grid.cell(i))
                    .filter(|c| c.can_cross);
                if let Some(c) = open {
                    return Some(c.index);
                }
            }
        }
    }
    None
}
