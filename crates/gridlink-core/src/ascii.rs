//! Building grids from ASCII maps.
//!
//! Each character is one cell, rows separated by `'\n'`:
//!
//! | Char | Cell |
//! |---|---|
//! | `.` | crossable, cost 1 |
//! | `#` | not crossable |
//! | `1`–`9` | crossable with that cost |
//! | `?` | crossable but not visible |
//! | `-` | no cell (empty slot) |
//!
//! Leading and trailing whitespace of the whole text is trimmed; each
//! line is trimmed of trailing `'\r'`.

use crate::error::GridError;
use crate::geom::Point;
use crate::grid::CellGrid;
use crate::topology::Topology;

enum Rune {
    Free(f32),
    Wall,
    Hidden,
    Hole,
}

fn rune(ch: char) -> Option<Rune> {
    match ch {
        '.' => Some(Rune::Free(1.0)),
        '#' => Some(Rune::Wall),
        '?' => Some(Rune::Hidden),
        '-' => Some(Rune::Hole),
        '1'..='9' => ch.to_digit(10).map(|d| Rune::Free(d as f32)),
        _ => None,
    }
}

impl CellGrid {
    /// Parse an ASCII map into a box or hex grid.
    pub fn from_ascii(topology: Topology, text: &str) -> Result<Self, GridError> {
        if topology == Topology::Irregular {
            return Err(GridError::UnsupportedTopology(topology));
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(GridError::EmptyMap);
        }

        let lines: Vec<&str> = text.lines().map(|l| l.trim_end_matches('\r')).collect();
        let width = lines[0].chars().count() as i32;
        let mut runes = Vec::with_capacity(lines.len() * width as usize);
        for (y, line) in lines.iter().enumerate() {
            let found = line.chars().count() as i32;
            if found != width {
                return Err(GridError::InconsistentSize {
                    row: y as i32,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in line.chars().enumerate() {
                let r = rune(ch).ok_or(GridError::InvalidRune {
                    ch,
                    pos: Point::new(x as i32, y as i32),
                })?;
                runes.push(r);
            }
        }

        let mut grid = CellGrid::regular(topology, width, lines.len() as i32);
        for (i, r) in runes.into_iter().enumerate() {
            match r {
                Rune::Free(cost) => {
                    grid.set_cross_cost(i, cost);
                }
                Rune::Wall => {
                    grid.set_can_cross(i, false);
                }
                Rune::Hidden => {
                    grid.set_visible(i, false);
                }
                Rune::Hole => {
                    grid.remove_cell(i);
                }
            }
        }
        grid.mark_clearance_dirty();
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP: &str = "
..#.
.3#?
..-.
";

    #[test]
    fn parse_cells() {
        let g = CellGrid::from_ascii(Topology::Box, MAP).unwrap();
        assert_eq!(g.columns(), 4);
        assert_eq!(g.rows(), 3);
        assert!(!g.cell(2).unwrap().can_cross);
        assert_eq!(g.cell(5).unwrap().cross_cost, 3.0);
        assert!(!g.cell(7).unwrap().visible);
        assert!(g.cell(10).is_none());
        assert!(g.cell(11).unwrap().can_cross);
    }

    #[test]
    fn hex_map() {
        let g = CellGrid::from_ascii(Topology::HexFlatTop, "...\n...").unwrap();
        assert_eq!(g.topology(), Topology::HexFlatTop);
        assert_eq!(g.cell_count(), 6);
    }

    #[test]
    fn inconsistent_size_error() {
        let err = CellGrid::from_ascii(Topology::Box, "...\n....").unwrap_err();
        assert_eq!(
            err,
            GridError::InconsistentSize {
                row: 1,
                expected: 3,
                found: 4
            }
        );
    }

    #[test]
    fn invalid_rune_error() {
        let err = CellGrid::from_ascii(Topology::Box, "..\n.x").unwrap_err();
        assert_eq!(
            err,
            GridError::InvalidRune {
                ch: 'x',
                pos: Point::new(1, 1)
            }
        );
        assert!(err.to_string().contains("(1, 1)"));
    }

    #[test]
    fn rejects_empty_and_irregular() {
        assert_eq!(
            CellGrid::from_ascii(Topology::Box, "  \n ").unwrap_err(),
            GridError::EmptyMap
        );
        assert!(matches!(
            CellGrid::from_ascii(Topology::Irregular, "..."),
            Err(GridError::UnsupportedTopology(_))
        ));
    }
}
