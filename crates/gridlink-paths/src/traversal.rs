//! The traversal predicate: whether a search may enter a cell.
//!
//! Crossability overrides are decided here from the cell's role in the
//! query. Cells are never modified.

use gridlink_core::{Cell, CellGrid};

use crate::options::{CanCrossCheckType, PathOptions};

/// Where a cell sits in the current query.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Role {
    Start,
    End,
    Interior,
}

impl CanCrossCheckType {
    /// Whether `can_cross` is disregarded for a cell in `role`.
    pub fn ignores_crossability(self, role: Role) -> bool {
        match self {
            Self::Default => false,
            Self::IgnoreAllCells => true,
            Self::IgnoreStartAndEnd => role != Role::Interior,
            Self::IgnoreStart => role == Role::Start,
            Self::IgnoreEnd => role == Role::End,
            Self::IgnoreAllExceptStartAndEnd => role == Role::Interior,
        }
    }

    /// Whether a cell in `role` is treated as a member of the group mask.
    fn widens_group(self, role: Role) -> bool {
        match self {
            Self::IgnoreStartAndEnd => role != Role::Interior,
            Self::IgnoreStart => role == Role::Start,
            Self::IgnoreEnd => role == Role::End,
            Self::Default | Self::IgnoreAllCells | Self::IgnoreAllExceptStartAndEnd => false,
        }
    }

    /// Whether a query between `start` and `end` may run at all.
    pub fn admits(self, start: &Cell, end: &Cell) -> bool {
        (start.can_cross || self.ignores_crossability(Role::Start))
            && (end.can_cross || self.ignores_crossability(Role::End))
    }
}

/// Whether the search may enter `cell`.
///
/// Checks crossability under the policy, group membership, clearance and
/// visibility. Cost limits are checked by the search itself.
pub fn is_traversable(grid: &CellGrid, cell: &Cell, role: Role, opts: &PathOptions) -> bool {
    let policy = opts.can_cross_check;
    let ignore_cross = policy.ignores_crossability(role);
    if !cell.can_cross && !ignore_cross {
        return false;
    }

    let group = if policy.widens_group(role) {
        cell.group | opts.group_mask
    } else {
        cell.group
    };
    if !Cell::in_group(group, opts.group_mask, opts.group_mask_exact) {
        return false;
    }

    // Overridden endpoints are exempt; interior cells always need room.
    let exempt = ignore_cross && role != Role::Interior;
    if opts.min_clearance > 1 && !exempt {
        let clearance = grid.clearance(cell.index).unwrap_or(0);
        if clearance < opts.min_clearance {
            return false;
        }
    }

    cell.visible || opts.include_invisible_cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridlink_core::ANY_GROUP;

    fn opts(check: CanCrossCheckType) -> PathOptions {
        PathOptions::default().with_can_cross_check(check)
    }

    #[test]
    fn policy_table() {
        use CanCrossCheckType::*;
        use Role::*;
        let cases = [
            (Default, [false, false, false]),
            (IgnoreAllCells, [true, true, true]),
            (IgnoreStartAndEnd, [true, true, false]),
            (IgnoreStart, [true, false, false]),
            (IgnoreEnd, [false, true, false]),
            (IgnoreAllExceptStartAndEnd, [false, false, true]),
        ];
        for (policy, expected) in cases {
            let got = [Start, End, Interior].map(|r| policy.ignores_crossability(r));
            assert_eq!(got, expected, "{policy:?}");
        }
    }

    #[test]
    fn admits_follows_policy() {
        let grid = CellGrid::boxed(2, 1);
        let open = grid.cell(0).unwrap().clone();
        let wall = open.clone().with_can_cross(false);
        assert!(!CanCrossCheckType::Default.admits(&wall, &open));
        assert!(CanCrossCheckType::IgnoreStart.admits(&wall, &open));
        assert!(!CanCrossCheckType::IgnoreStart.admits(&open, &wall));
        assert!(CanCrossCheckType::IgnoreEnd.admits(&open, &wall));
        assert!(CanCrossCheckType::IgnoreStartAndEnd.admits(&wall, &wall));
        assert!(!CanCrossCheckType::IgnoreAllExceptStartAndEnd.admits(&wall, &open));
    }

    #[test]
    fn endpoint_group_is_widened_by_mask() {
        let grid = CellGrid::boxed(2, 1);
        let cell = grid.cell(1).unwrap().clone().with_group(0b01);
        let masked = |check| opts(check).with_group_mask(0b10, false);
        assert!(!is_traversable(&grid, &cell, Role::End, &masked(CanCrossCheckType::Default)));
        assert!(is_traversable(&grid, &cell, Role::End, &masked(CanCrossCheckType::IgnoreEnd)));
        assert!(!is_traversable(
            &grid,
            &cell,
            Role::Interior,
            &masked(CanCrossCheckType::IgnoreEnd)
        ));
    }

    #[test]
    fn visibility_and_clearance() {
        let mut grid = CellGrid::boxed(3, 3);
        grid.set_visible(4, false);
        let hidden = grid.cell(4).unwrap().clone();
        let o = PathOptions::default();
        assert!(is_traversable(&grid, &hidden, Role::Interior, &o));
        let o = o.with_include_invisible_cells(false);
        assert!(!is_traversable(&grid, &hidden, Role::Interior, &o));

        grid.refresh_clearance(ANY_GROUP, false);
        let edge = grid.cell(0).unwrap().clone();
        let centre = grid.cell(4).unwrap().clone();
        let wide = PathOptions::default().with_min_clearance(2);
        assert!(!is_traversable(&grid, &edge, Role::Interior, &wide));
        assert!(is_traversable(&grid, &centre, Role::Interior, &wide));
    }

    #[test]
    fn clearance_exemption_covers_endpoints_only() {
        let mut grid = CellGrid::boxed(3, 3);
        grid.refresh_clearance(ANY_GROUP, false);
        let edge = grid.cell(0).unwrap().clone();
        for check in [
            CanCrossCheckType::IgnoreAllCells,
            CanCrossCheckType::IgnoreAllExceptStartAndEnd,
        ] {
            let wide = opts(check).with_min_clearance(2);
            assert!(!is_traversable(&grid, &edge, Role::Interior, &wide), "{check:?}");
        }
        let wide = opts(CanCrossCheckType::IgnoreAllCells).with_min_clearance(2);
        assert!(is_traversable(&grid, &edge, Role::End, &wide));
        assert!(is_traversable(&grid, &edge, Role::Start, &wide));
        let wide = opts(CanCrossCheckType::IgnoreAllExceptStartAndEnd).with_min_clearance(2);
        assert!(!is_traversable(&grid, &edge, Role::End, &wide));
    }
}
