//! Routing across independent grids joined by weighted portals.
//!
//! A [`MultiGridRouter`] owns a list of [`Grid`]s and a symmetric map of
//! portal connections between cells of different grids. A cross-grid query
//! tries every portal leaving the start grid, runs the per-grid searches on
//! either side and recurses through intermediate grids, keeping the
//! cheapest complete route.

use std::collections::{BTreeMap, BTreeSet};

use gridlink_core::Vec2;

use crate::finder::GridPath;
use crate::grid::Grid;
use crate::options::PathOptions;

/// Position of a grid in its router, in registration order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridId(pub usize);

/// A cell in a specific grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PortalEnd {
    pub grid: GridId,
    pub cell: usize,
}

impl PortalEnd {
    #[inline]
    pub const fn new(grid: GridId, cell: usize) -> Self {
        Self { grid, cell }
    }
}

/// A cross-grid route: the visited cells after the start, ending with the
/// destination, plus the total cost. Empty with zero cost when no route
/// exists.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub steps: Vec<PortalEnd>,
    pub cost: f32,
}

impl Route {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    fn within(grid: GridId, path: GridPath) -> Self {
        Self {
            steps: path
                .cells
                .into_iter()
                .map(|cell| PortalEnd::new(grid, cell))
                .collect(),
            cost: path.cost,
        }
    }
}

/// Composes per-grid searches through declared portals.
#[derive(Default)]
pub struct MultiGridRouter {
    grids: Vec<Grid>,
    connections: BTreeMap<(PortalEnd, PortalEnd), f32>,
}

impl MultiGridRouter {
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Grids
    // -----------------------------------------------------------------------

    /// Register a grid. Ids are assigned in registration order.
    pub fn add_grid(&mut self, grid: Grid) -> GridId {
        self.grids.push(grid);
        GridId(self.grids.len() - 1)
    }

    #[inline]
    pub fn grid(&self, id: GridId) -> Option<&Grid> {
        self.grids.get(id.0)
    }

    #[inline]
    pub fn grid_mut(&mut self, id: GridId) -> Option<&mut Grid> {
        self.grids.get_mut(id.0)
    }

    #[inline]
    pub fn grid_count(&self) -> usize {
        self.grids.len()
    }

    /// The first grid, in registration order, with a cell containing `p`.
    pub fn resolve(&self, p: Vec2) -> Option<PortalEnd> {
        self.grids.iter().enumerate().find_map(|(i, g)| {
            g.cells()
                .cell_at(p)
                .map(|cell| PortalEnd::new(GridId(i), cell))
        })
    }

    // -----------------------------------------------------------------------
    // Connections
    // -----------------------------------------------------------------------

    /// Link two cells with a portal of the given cost, in both directions.
    /// Replaces any existing cost for the pair. Negative costs are clamped
    /// to 0.
    pub fn add_connection(&mut self, a: PortalEnd, b: PortalEnd, cost: f32) {
        let cost = cost.max(0.0);
        self.connections.insert((a, b), cost);
        self.connections.insert((b, a), cost);
    }

    /// Link the cells under two world points.
    ///
    /// Returns `false` unless both points resolve to cells and those cells
    /// lie in different grids.
    pub fn add_connection_at(&mut self, a: Vec2, b: Vec2, cost: f32) -> bool {
        match (self.resolve(a), self.resolve(b)) {
            (Some(ea), Some(eb)) if ea.grid != eb.grid => {
                self.add_connection(ea, eb, cost);
                true
            }
            _ => false,
        }
    }

    /// Remove the portal between `a` and `b`. Returns whether it existed.
    pub fn remove_connection(&mut self, a: PortalEnd, b: PortalEnd) -> bool {
        let ab = self.connections.remove(&(a, b)).is_some();
        let ba = self.connections.remove(&(b, a)).is_some();
        ab || ba
    }

    /// Cost of the portal from `a` to `b`, if declared.
    pub fn connection_cost(&self, a: PortalEnd, b: PortalEnd) -> Option<f32> {
        self.connections.get(&(a, b)).copied()
    }

    /// Number of directed portal entries (two per symmetric connection).
    #[inline]
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Remove every portal.
    pub fn clear_connections(&mut self) {
        self.connections.clear();
    }

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    /// Find the cheapest route from `start` to `end`.
    ///
    /// Within one grid this is a plain per-grid search. Across grids every
    /// portal leaving the start grid is tried; `opts` applies to each
    /// per-grid leg, and `opts.max_search_cost` additionally rejects any
    /// portal whose first leg alone exceeds it (the cap is not applied to
    /// the route total). Among routes of exactly equal cost the first found
    /// wins; that order follows the portal map and is not part of the
    /// contract.
    pub fn find_path(&mut self, start: PortalEnd, end: PortalEnd, opts: &PathOptions) -> Route {
        if self.grid(start.grid).is_none() || self.grid(end.grid).is_none() {
            return Route::default();
        }
        if start.grid == end.grid {
            return self
                .leg(start.grid, start.cell, end.cell, opts)
                .map(|p| Route::within(start.grid, p))
                .unwrap_or_default();
        }
        let mut chain = BTreeSet::from([start]);
        let route = self.route_from(start, end, opts, &mut chain);
        match &route {
            Some(r) => log::debug!(
                "route {start:?} -> {end:?}: {} steps, cost {}",
                r.len(),
                r.cost
            ),
            None => log::debug!("no route {start:?} -> {end:?}"),
        }
        route.unwrap_or_default()
    }

    /// Per-grid leg. A leg from a cell to itself is a valid zero-cost
    /// path; any other empty result means the leg is impossible.
    fn leg(&mut self, grid: GridId, from: usize, to: usize, opts: &PathOptions) -> Option<GridPath> {
        let g = self.grids.get_mut(grid.0)?;
        if from == to {
            return g.cells().cell(from).map(|_| GridPath::default());
        }
        let path = g.find_path_with(from, to, opts);
        (!path.is_empty()).then_some(path)
    }

    /// Best route from `from` to `end` leaving `from.grid` through a
    /// portal. `chain` holds the start cell and every portal endpoint on
    /// the route being extended. A portal is skipped when it would arrive
    /// on a cell already in the chain; leaving from one is fine, so a
    /// cell entered through one portal may exit through another.
    fn route_from(
        &mut self,
        from: PortalEnd,
        end: PortalEnd,
        opts: &PathOptions,
        chain: &mut BTreeSet<PortalEnd>,
    ) -> Option<Route> {
        let portals: Vec<(PortalEnd, PortalEnd, f32)> = self
            .connections
            .iter()
            .filter(|((src, _), _)| src.grid == from.grid)
            .map(|(&(src, dst), &cost)| (src, dst, cost))
            .collect();

        let mut best: Option<Route> = None;
        for (src, dst, portal_cost) in portals {
            if chain.contains(&dst) {
                log::debug!("skipping portal {src:?} -> {dst:?}: already on this route");
                continue;
            }

            let Some(first) = self.leg(from.grid, from.cell, src.cell, opts) else {
                continue;
            };
            if opts.max_search_cost > 0.0 && first.cost > opts.max_search_cost {
                continue;
            }

            let rest = if dst.grid == end.grid {
                match self.leg(dst.grid, dst.cell, end.cell, opts) {
                    Some(p) => Route::within(dst.grid, p),
                    None => continue,
                }
            } else {
                let added_src = chain.insert(src);
                chain.insert(dst);
                let found = self.route_from(dst, end, opts, chain);
                if added_src {
                    chain.remove(&src);
                }
                chain.remove(&dst);
                match found {
                    Some(r) => r,
                    None => continue,
                }
            };

            let total = first.cost + portal_cost + rest.cost;
            if best.as_ref().is_none_or(|b| total < b.cost) {
                let mut steps = Vec::with_capacity(first.len() + 1 + rest.len());
                steps.extend(first.cells.iter().map(|&c| PortalEnd::new(from.grid, c)));
                steps.push(dst);
                steps.extend(rest.steps);
                best = Some(Route { steps, cost: total });
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridlink_core::{CellGrid, Layout, Topology};

    fn router_with(grids: Vec<CellGrid>) -> (MultiGridRouter, Vec<GridId>) {
        let mut r = MultiGridRouter::new();
        let ids = grids.into_iter().map(|g| r.add_grid(Grid::new(g))).collect();
        (r, ids)
    }

    fn end(grid: GridId, cell: usize) -> PortalEnd {
        PortalEnd::new(grid, cell)
    }

    #[test]
    fn same_grid_delegates() {
        let (mut r, ids) = router_with(vec![CellGrid::boxed(3, 2)]);
        let route = r.find_path(end(ids[0], 0), end(ids[0], 5), &PathOptions::default());
        assert_eq!(route.len(), 3);
        assert_eq!(route.cost, 3.0);
        assert!(route.steps.iter().all(|s| s.grid == ids[0]));
        assert_eq!(route.steps.last(), Some(&end(ids[0], 5)));
    }

    #[test]
    fn cost_composes_across_two_grids() {
        let (mut r, ids) = router_with(vec![CellGrid::boxed(2, 2), CellGrid::boxed(2, 2)]);
        let (g1, g2) = (ids[0], ids[1]);
        r.add_connection(end(g1, 3), end(g2, 0), 2.0);

        let route = r.find_path(end(g1, 0), end(g2, 3), &PathOptions::default());
        // intra(G1: 0 -> 3) = 2, portal = 2, intra(G2: 0 -> 3) = 2
        assert_eq!(route.cost, 6.0);
        assert_eq!(route.steps.first().map(|s| s.grid), Some(g1));
        assert_eq!(route.steps.last(), Some(&end(g2, 3)));
        assert!(route.steps.contains(&end(g2, 0)));
        assert!(!route.steps.contains(&end(g1, 0)));
    }

    #[test]
    fn cheapest_portal_wins() {
        let (mut r, ids) = router_with(vec![CellGrid::boxed(4, 1), CellGrid::boxed(4, 1)]);
        let (a, b) = (ids[0], ids[1]);
        // Near portal, expensive; far portal, cheap.
        r.add_connection(end(a, 1), end(b, 1), 10.0);
        r.add_connection(end(a, 3), end(b, 3), 1.0);
        let route = r.find_path(end(a, 0), end(b, 0), &PathOptions::default());
        // via far: 3 + 1 + 3 = 7; via near: 1 + 10 + 1 = 12
        assert_eq!(route.cost, 7.0);
        assert!(route.steps.contains(&end(b, 3)));
    }

    #[test]
    fn portal_on_start_and_end_cells() {
        let (mut r, ids) = router_with(vec![CellGrid::boxed(2, 1), CellGrid::boxed(2, 1)]);
        r.add_connection(end(ids[0], 0), end(ids[1], 1), 2.5);
        let route = r.find_path(end(ids[0], 0), end(ids[1], 1), &PathOptions::default());
        assert_eq!(route.steps, vec![end(ids[1], 1)]);
        assert_eq!(route.cost, 2.5);
    }

    #[test]
    fn routes_through_an_intermediate_grid() {
        let (mut r, ids) = router_with(vec![
            CellGrid::boxed(3, 1),
            CellGrid::hex_pointy_top(3, 1),
            CellGrid::boxed(3, 1),
        ]);
        r.add_connection(end(ids[0], 2), end(ids[1], 0), 1.0);
        r.add_connection(end(ids[1], 2), end(ids[2], 0), 1.0);
        let route = r.find_path(end(ids[0], 0), end(ids[2], 2), &PathOptions::default());
        // 2 + 1 + 2 + 1 + 2
        assert_eq!(route.cost, 8.0);
        let grids: Vec<usize> = route.steps.iter().map(|s| s.grid.0).collect();
        assert_eq!(grids, vec![0, 0, 1, 1, 1, 2, 2, 2]);
    }

    #[test]
    fn route_passes_through_a_hub_cell() {
        let (mut r, ids) = router_with(vec![
            CellGrid::boxed(2, 1),
            CellGrid::boxed(3, 1),
            CellGrid::boxed(2, 1),
        ]);
        let (a, b, c) = (ids[0], ids[1], ids[2]);
        // b1 is entered from a and left towards c.
        r.add_connection(end(a, 1), end(b, 1), 1.0);
        r.add_connection(end(b, 1), end(c, 0), 1.0);
        let route = r.find_path(end(a, 0), end(c, 1), &PathOptions::default());
        assert_eq!(route.cost, 4.0);
        assert_eq!(route.steps, vec![end(a, 1), end(b, 1), end(c, 0), end(c, 1)]);

        // Same hub, reached back from c.
        let back = r.find_path(end(c, 1), end(a, 0), &PathOptions::default());
        assert_eq!(back.cost, 4.0);
        assert_eq!(back.steps, vec![end(c, 0), end(b, 1), end(a, 1), end(a, 0)]);
    }

    #[test]
    fn cyclic_portals_terminate() {
        let (mut r, ids) = router_with(vec![
            CellGrid::boxed(3, 3),
            CellGrid::boxed(3, 3),
            CellGrid::boxed(3, 3),
            CellGrid::boxed(3, 3),
        ]);
        let (a, b, c, d) = (ids[0], ids[1], ids[2], ids[3]);
        // A dense ring between a, b and c; d is unreachable.
        for (x, y) in [(a, b), (b, c), (c, a)] {
            for cell in [0, 8] {
                r.add_connection(end(x, cell), end(y, cell), 1.0);
            }
        }
        let route = r.find_path(end(a, 0), end(d, 0), &PathOptions::default());
        assert!(route.is_empty());
        assert_eq!(route.cost, 0.0);

        let route = r.find_path(end(a, 0), end(c, 8), &PathOptions::default());
        assert_eq!(route.cost, 1.0 + 0.0 + 4.0);
    }

    #[test]
    fn clear_connections_disconnects() {
        let (mut r, ids) = router_with(vec![CellGrid::boxed(2, 2), CellGrid::boxed(2, 2)]);
        r.add_connection(end(ids[0], 3), end(ids[1], 0), 2.0);
        assert_eq!(r.connection_count(), 2);
        assert!(!r.find_path(end(ids[0], 0), end(ids[1], 3), &PathOptions::default()).is_empty());

        r.clear_connections();
        let route = r.find_path(end(ids[0], 0), end(ids[1], 3), &PathOptions::default());
        assert!(route.is_empty());
        assert_eq!(route.cost, 0.0);
    }

    #[test]
    fn connections_are_symmetric_and_overwritten() {
        let (mut r, ids) = router_with(vec![CellGrid::boxed(2, 2), CellGrid::boxed(2, 2)]);
        let (p, q) = (end(ids[0], 1), end(ids[1], 2));
        r.add_connection(p, q, 4.0);
        assert_eq!(r.connection_cost(q, p), Some(4.0));
        r.add_connection(q, p, 1.5);
        assert_eq!(r.connection_cost(p, q), Some(1.5));
        assert_eq!(r.connection_count(), 2);
        assert!(r.remove_connection(q, p));
        assert_eq!(r.connection_cost(p, q), None);
        assert!(!r.remove_connection(p, q));
    }

    #[test]
    fn first_leg_cap_skips_far_portals() {
        let (mut r, ids) = router_with(vec![CellGrid::boxed(6, 1), CellGrid::boxed(6, 1)]);
        r.add_connection(end(ids[0], 5), end(ids[1], 0), 1.0);
        let capped = PathOptions::default().with_max_search_cost(3.0);
        assert!(r.find_path(end(ids[0], 0), end(ids[1], 0), &capped).is_empty());

        // The cap bounds each leg, not the total.
        let (mut r, ids) = router_with(vec![CellGrid::boxed(4, 1), CellGrid::boxed(4, 1)]);
        r.add_connection(end(ids[0], 3), end(ids[1], 0), 5.0);
        let route = r.find_path(end(ids[0], 0), end(ids[1], 3), &capped);
        assert_eq!(route.cost, 3.0 + 5.0 + 3.0);
    }

    #[test]
    fn point_connections_need_two_distinct_grids() {
        let mut r = MultiGridRouter::new();
        let left = r.add_grid(Grid::new(CellGrid::boxed(2, 2)));
        let right = r.add_grid(Grid::new(
            CellGrid::boxed(2, 2).with_layout(Layout::new(Vec2::new(10.0, 0.0), 1.0)),
        ));
        let hex = r.add_grid(Grid::new(
            CellGrid::from_ascii(Topology::HexFlatTop, "..\n..")
                .unwrap()
                .with_layout(Layout::new(Vec2::new(0.0, 20.0), 1.0)),
        ));

        assert!(r.add_connection_at(Vec2::new(1.5, 0.5), Vec2::new(10.5, 1.5), 3.0));
        assert_eq!(r.connection_cost(end(left, 1), end(right, 2)), Some(3.0));

        assert!(r.add_connection_at(Vec2::new(0.5, 0.5), Vec2::new(0.0, 20.0), 1.0));
        assert_eq!(r.connection_cost(end(hex, 0), end(left, 0)), Some(1.0));

        // Same grid, and a point outside every grid.
        assert!(!r.add_connection_at(Vec2::new(0.5, 0.5), Vec2::new(1.5, 1.5), 1.0));
        assert!(!r.add_connection_at(Vec2::new(0.5, 0.5), Vec2::new(50.0, 50.0), 1.0));
        assert_eq!(r.connection_count(), 4);
    }

    #[test]
    fn first_registered_grid_wins_on_overlap() {
        let mut r = MultiGridRouter::new();
        let under = r.add_grid(Grid::new(CellGrid::boxed(4, 4)));
        let _over = r.add_grid(Grid::new(CellGrid::boxed(4, 4)));
        assert_eq!(r.resolve(Vec2::new(1.5, 1.5)), Some(end(under, 5)));
    }

    #[test]
    fn unknown_grid_ids_yield_empty_routes() {
        let (mut r, ids) = router_with(vec![CellGrid::boxed(2, 2)]);
        let route = r.find_path(end(ids[0], 0), end(GridId(9), 0), &PathOptions::default());
        assert!(route.is_empty());
    }
}
