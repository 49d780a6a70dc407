//! A* pathfinding over box, hex and irregular grids.
//!
//! This crate searches the cell stores from `gridlink-core`:
//!
//! - **A\*** shortest-path search on one grid ([`Grid::find_path_with`])
//! - **Crossability policies** that relax `can_cross` for the start, end or
//!   interior cells ([`CanCrossCheckType`])
//! - **Clearance**, group masks, visibility and per-cell cost rules
//!   ([`PathOptions`])
//! - **Cross-grid routing** through weighted portals ([`MultiGridRouter`])
//!
//! A [`Grid`] owns its [`PathFinder`], which keeps its scratch buffers
//! between queries so that repeated searches do not reallocate.
//!
//! # Example
//!
//! ```
//! use gridlink_core::{CellGrid, Topology};
//! use gridlink_paths::{Grid, PathOptions};
//!
//! let cells = CellGrid::from_ascii(Topology::Box, "...\n.#.\n...").unwrap();
//! let mut grid = Grid::new(cells);
//! let path = grid.find_path_with(0, 8, &PathOptions::default());
//! assert_eq!(path.last(), Some(8));
//! assert_eq!(path.cost, 4.0);
//! ```

mod config;
mod finder;
mod grid;
mod heuristic;
mod options;
mod router;
mod traversal;

pub use config::FinderConfig;
pub use finder::{GridPath, PathFinder};
pub use grid::Grid;
pub use heuristic::{Heuristic, chebyshev, manhattan, octile};
pub use options::{CanCrossCheckType, CellCostFn, PathOptions};
pub use router::{GridId, MultiGridRouter, PortalEnd, Route};
pub use traversal::{Role, is_traversable};

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_round_trip() {
        let config = FinderConfig::default()
            .with_heuristic(Heuristic::Manhattan)
            .with_diagonals(true);
        let json = serde_json::to_string(&config).unwrap();
        let back: FinderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let back: FinderConfig = serde_json::from_str(r#"{"diagonals":true}"#).unwrap();
        assert!(back.diagonals);
        assert_eq!(back.max_steps, FinderConfig::default().max_steps);

        let opts: PathOptions = serde_json::from_str(r#"{"min_clearance":3}"#).unwrap();
        assert_eq!(opts.min_clearance, 3);
        assert!(opts.max_cell_cross_cost.is_infinite());
        assert!(opts.include_invisible_cells);
    }

    #[test]
    fn options_skip_unbounded_cost_and_callback() {
        let opts = PathOptions::default()
            .with_can_cross_check(CanCrossCheckType::IgnoreEnd)
            .with_cell_cost(|_, _| 1.0);
        let json = serde_json::to_string(&opts).unwrap();
        assert!(!json.contains("max_cell_cross_cost"));
        assert!(!json.contains("cell_cost"));
        let back: PathOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back.can_cross_check, CanCrossCheckType::IgnoreEnd);
        assert!(back.cell_cost.is_none());
    }

    #[test]
    fn route_round_trip() {
        let route = Route {
            steps: vec![
                PortalEnd::new(GridId(0), 3),
                PortalEnd::new(GridId(1), 0),
            ],
            cost: 6.5,
        };
        let json = serde_json::to_string(&route).unwrap();
        let back: Route = serde_json::from_str(&json).unwrap();
        assert_eq!(back, route);

        let path = GridPath {
            cells: vec![1, 2],
            cost: 2.0,
        };
        let back: GridPath = serde_json::from_str(&serde_json::to_string(&path).unwrap()).unwrap();
        assert_eq!(back, path);
    }
}
