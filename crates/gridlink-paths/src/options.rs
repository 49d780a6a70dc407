//! Per-query search options.

use std::fmt;
use std::sync::Arc;

use gridlink_core::{ANY_GROUP, CellGrid};

/// Additional cost for entering a cell, called with the grid and the cell
/// index each time the search evaluates that cell. Any user data the
/// callback needs is captured by the closure.
pub type CellCostFn = Arc<dyn Fn(&CellGrid, usize) -> f32 + Send + Sync>;

/// How a search treats the `can_cross` flag of the start, end and
/// intermediate cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CanCrossCheckType {
    /// Every cell must be crossable, endpoints included.
    #[default]
    Default,
    /// Crossability is ignored for every cell.
    IgnoreAllCells,
    /// Start and end count as crossable and as members of the group mask.
    IgnoreStartAndEnd,
    /// The start counts as crossable and in the mask; the end must be
    /// crossable.
    IgnoreStart,
    /// The end counts as crossable and in the mask; the start must be
    /// crossable.
    IgnoreEnd,
    /// Intermediate cells are not checked; start and end must be crossable.
    IgnoreAllExceptStartAndEnd,
}

/// Options for one search. Build with [`Default`] and the `with_*` methods.
///
/// Values are independent per call: nothing here is shared between
/// searches, so a callback may itself run searches.
#[derive(Clone)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PathOptions {
    /// Cap on accumulated cost; 0 uses the grid's default.
    pub max_search_cost: f32,
    /// Cap on route length in cells; 0 uses the grid's default.
    pub max_steps: usize,
    pub group_mask: u32,
    /// Require `group == group_mask` instead of a shared bit.
    pub group_mask_exact: bool,
    pub can_cross_check: CanCrossCheckType,
    /// Treat every cell as costing 1.
    pub ignore_cell_costs: bool,
    pub include_invisible_cells: bool,
    pub min_clearance: u16,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "is_unbounded"))]
    pub max_cell_cross_cost: f32,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub cell_cost: Option<CellCostFn>,
}

#[cfg(feature = "serde")]
fn is_unbounded(v: &f32) -> bool {
    v.is_infinite()
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            max_search_cost: 0.0,
            max_steps: 0,
            group_mask: ANY_GROUP,
            group_mask_exact: false,
            can_cross_check: CanCrossCheckType::Default,
            ignore_cell_costs: false,
            include_invisible_cells: true,
            min_clearance: 1,
            max_cell_cross_cost: f32::INFINITY,
            cell_cost: None,
        }
    }
}

impl fmt::Debug for PathOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathOptions")
            .field("max_search_cost", &self.max_search_cost)
            .field("max_steps", &self.max_steps)
            .field("group_mask", &format_args!("{:#x}", self.group_mask))
            .field("group_mask_exact", &self.group_mask_exact)
            .field("can_cross_check", &self.can_cross_check)
            .field("ignore_cell_costs", &self.ignore_cell_costs)
            .field("include_invisible_cells", &self.include_invisible_cells)
            .field("min_clearance", &self.min_clearance)
            .field("max_cell_cross_cost", &self.max_cell_cross_cost)
            .field("cell_cost", &self.cell_cost.as_ref().map(|_| ".."))
            .finish()
    }
}

impl PathOptions {
    /// Cap the accumulated cost (builder).
    pub fn with_max_search_cost(mut self, cost: f32) -> Self {
        self.max_search_cost = cost;
        self
    }

    /// Cap the route length (builder).
    pub fn with_max_steps(mut self, steps: usize) -> Self {
        self.max_steps = steps;
        self
    }

    /// Restrict the search to a group mask (builder).
    pub fn with_group_mask(mut self, mask: u32, exact: bool) -> Self {
        self.group_mask = mask;
        self.group_mask_exact = exact;
        self
    }

    /// Set the crossability policy (builder).
    pub fn with_can_cross_check(mut self, check: CanCrossCheckType) -> Self {
        self.can_cross_check = check;
        self
    }

    /// Treat every cell as costing 1 (builder).
    pub fn with_ignore_cell_costs(mut self, ignore: bool) -> Self {
        self.ignore_cell_costs = ignore;
        self
    }

    /// Allow or forbid invisible cells (builder).
    pub fn with_include_invisible_cells(mut self, include: bool) -> Self {
        self.include_invisible_cells = include;
        self
    }

    /// Require a minimum clearance; values below 1 are raised to 1
    /// (builder). Start and end cells whose crossability the policy
    /// overrides are exempt; interior cells are always checked.
    pub fn with_min_clearance(mut self, clearance: u16) -> Self {
        self.min_clearance = clearance.max(1);
        self
    }

    /// Skip cells whose cost exceeds `cost` (builder).
    pub fn with_max_cell_cross_cost(mut self, cost: f32) -> Self {
        self.max_cell_cross_cost = cost;
        self
    }

    /// Add a per-cell cost callback (builder).
    pub fn with_cell_cost<F>(mut self, f: F) -> Self
    where
        F: Fn(&CellGrid, usize) -> f32 + Send + Sync + 'static,
    {
        self.cell_cost = Some(Arc::new(f));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let o = PathOptions::default();
        assert_eq!(o.max_search_cost, 0.0);
        assert_eq!(o.max_steps, 0);
        assert_eq!(o.group_mask, ANY_GROUP);
        assert_eq!(o.can_cross_check, CanCrossCheckType::Default);
        assert!(!o.ignore_cell_costs);
        assert!(o.include_invisible_cells);
        assert_eq!(o.min_clearance, 1);
        assert!(o.max_cell_cross_cost.is_infinite());
        assert!(o.cell_cost.is_none());
    }

    #[test]
    fn builders_set_fields() {
        let o = PathOptions::default()
            .with_group_mask(0b100, true)
            .with_min_clearance(0)
            .with_cell_cost(|_, i| i as f32);
        assert_eq!(o.group_mask, 0b100);
        assert!(o.group_mask_exact);
        assert_eq!(o.min_clearance, 1);
        let grid = CellGrid::boxed(1, 1);
        let f = o.cell_cost.as_ref().unwrap();
        assert_eq!(f(&grid, 3), 3.0);
        assert!(format!("{o:?}").contains("0x4"));
    }
}
