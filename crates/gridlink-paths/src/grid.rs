//! The per-grid entry point: a [`CellGrid`] with its search engine and
//! defaults.

use gridlink_core::CellGrid;

use crate::config::FinderConfig;
use crate::finder::{GridPath, PathFinder};
use crate::options::PathOptions;

/// A searchable grid.
///
/// Bundles the cell store, the grid-wide [`FinderConfig`] and a reusable
/// [`PathFinder`]. Searches take `&mut self` because they may rebuild the
/// clearance cache and reuse scratch buffers.
pub struct Grid {
    cells: CellGrid,
    config: FinderConfig,
    finder: PathFinder,
}

impl Grid {
    pub fn new(cells: CellGrid) -> Self {
        Self {
            cells,
            config: FinderConfig::default(),
            finder: PathFinder::new(),
        }
    }

    /// Replace the grid-wide settings (builder).
    pub fn with_config(mut self, config: FinderConfig) -> Self {
        self.config = config;
        self
    }

    #[inline]
    pub fn cells(&self) -> &CellGrid {
        &self.cells
    }

    /// Mutable access to the cell store. Its setters keep the clearance
    /// cache consistent.
    #[inline]
    pub fn cells_mut(&mut self) -> &mut CellGrid {
        &mut self.cells
    }

    #[inline]
    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    #[inline]
    pub fn config_mut(&mut self) -> &mut FinderConfig {
        &mut self.config
    }

    /// Fresh options with every field at its default: no cap overrides,
    /// any group, the `Default` crossability policy, cell costs honoured,
    /// invisible cells included, clearance 1, no per-cell cost limit and no
    /// callback.
    #[inline]
    pub fn default_options(&self) -> PathOptions {
        PathOptions::default()
    }

    /// Find a path with default options.
    pub fn find_path(&mut self, start: usize, end: usize) -> GridPath {
        self.find_path_with(start, end, &PathOptions::default())
    }

    /// Find a path from `start` to `end`.
    ///
    /// The returned cells exclude `start` and end with `end`. An empty path
    /// with zero cost means no route exists under `opts`.
    pub fn find_path_with(&mut self, start: usize, end: usize, opts: &PathOptions) -> GridPath {
        if start == end {
            return GridPath::default();
        }
        if opts.min_clearance > 1 {
            self.cells
                .refresh_clearance(opts.group_mask, opts.group_mask_exact);
        }
        self.finder
            .find_path(&self.cells, &self.config, start, end, opts)
    }

    /// Number of cells expanded by the last search.
    #[inline]
    pub fn last_expanded(&self) -> usize {
        self.finder.last_expanded()
    }
}

impl From<CellGrid> for Grid {
    fn from(cells: CellGrid) -> Self {
        Self::new(cells)
    }
}
