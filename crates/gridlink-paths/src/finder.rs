//! A* search over a [`CellGrid`].

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use gridlink_core::{CellGrid, Neighbor};

use crate::config::FinderConfig;
use crate::options::PathOptions;
use crate::traversal::{Role, is_traversable};

/// Result of a single-grid search.
///
/// `cells` runs from the first step after the start to the destination;
/// the start itself is never included. Failure is an empty path with zero
/// cost.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPath {
    pub cells: Vec<usize>,
    pub cost: f32,
}

impl GridPath {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// The destination cell, if the search succeeded.
    #[inline]
    pub fn last(&self) -> Option<usize> {
        self.cells.last().copied()
    }
}

// ---------------------------------------------------------------------------
// Search nodes
// ---------------------------------------------------------------------------

const NO_PARENT: usize = usize::MAX;

#[derive(Clone)]
struct Node {
    g: f32,
    steps: usize,
    parent: usize,
    generation: u32,
    open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0.0,
            steps: 0,
            parent: NO_PARENT,
            generation: 0,
            open: false,
        }
    }
}

/// Heap entry: lowest `f` first, then lowest `h`, then earliest pushed.
#[derive(Clone, Copy)]
struct NodeRef {
    idx: usize,
    f: f32,
    h: f32,
    seq: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap pops the greatest.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.h.total_cmp(&self.h))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NodeRef {}

// ---------------------------------------------------------------------------
// PathFinder
// ---------------------------------------------------------------------------

/// Reusable A* engine.
///
/// Owns its node array and neighbour buffer so that repeated searches do
/// not allocate after warm-up. Nodes are invalidated lazily by bumping a
/// generation counter instead of clearing the array.
#[derive(Default)]
pub struct PathFinder {
    nodes: Vec<Node>,
    generation: u32,
    nbuf: Vec<Neighbor>,
    open: BinaryHeap<NodeRef>,
    expanded: usize,
}

impl PathFinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cells expanded by the last search.
    #[inline]
    pub fn last_expanded(&self) -> usize {
        self.expanded
    }

    fn next_generation(&mut self, len: usize) -> u32 {
        if self.nodes.len() < len {
            self.nodes.resize(len, Node::default());
        }
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: stale stamps could collide with new ones.
            for n in self.nodes.iter_mut() {
                n.generation = 0;
            }
            self.generation = 1;
        }
        self.generation
    }

    /// Find the cheapest path from `start` to `end` on `grid`.
    ///
    /// Returns an empty path when `start == end`, either index is out of
    /// range or absent, the crossability policy rejects an endpoint, or
    /// no route exists within the cost and step caps.
    ///
    /// The grid's clearance cache must be current when
    /// `opts.min_clearance > 1`; [`Grid`](crate::Grid) takes care of that.
    pub fn find_path(
        &mut self,
        grid: &CellGrid,
        config: &FinderConfig,
        start: usize,
        end: usize,
        opts: &PathOptions,
    ) -> GridPath {
        self.expanded = 0;
        if start == end {
            return GridPath::default();
        }
        let (Some(start_cell), Some(end_cell)) = (grid.cell(start), grid.cell(end)) else {
            return GridPath::default();
        };
        if !opts.can_cross_check.admits(start_cell, end_cell) {
            return GridPath::default();
        }

        let max_cost = if opts.max_search_cost > 0.0 {
            opts.max_search_cost
        } else {
            config.max_search_cost
        };
        let max_steps = if opts.max_steps > 0 {
            opts.max_steps
        } else {
            config.max_steps
        };
        let heuristic = config.heuristic;

        let cur_gen = self.next_generation(grid.cell_count());
        let mut seq: u64 = 0;

        {
            let node = &mut self.nodes[start];
            node.g = 0.0;
            node.steps = 0;
            node.parent = NO_PARENT;
            node.generation = cur_gen;
            node.open = true;
        }
        let h0 = heuristic.estimate(grid, start_cell, end_cell);
        let mut open = std::mem::take(&mut self.open);
        open.clear();
        open.push(NodeRef {
            idx: start,
            f: h0,
            h: h0,
            seq,
        });

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let found = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search false;
            };
            let ci = current.idx;

            // Skip stale entries.
            if self.nodes[ci].generation != cur_gen || !self.nodes[ci].open {
                continue;
            }
            if ci == end {
                break 'search true;
            }

            self.nodes[ci].open = false;
            self.expanded += 1;
            let current_g = self.nodes[ci].g;
            let current_steps = self.nodes[ci].steps;

            nbuf.clear();
            grid.neighbors(ci, config.diagonals, &mut nbuf);

            for nb in nbuf.iter() {
                let ni = nb.index;
                if ni == start {
                    continue;
                }
                let Some(cell) = grid.cell(ni) else {
                    continue;
                };
                let role = if ni == end { Role::End } else { Role::Interior };
                if !is_traversable(grid, cell, role, opts) {
                    continue;
                }

                let mut cost = if opts.ignore_cell_costs {
                    1.0
                } else {
                    cell.side_cost(nb.side)
                };
                if let Some(extra) = &opts.cell_cost {
                    cost += extra(grid, ni);
                }
                let cost = cost.max(0.0);
                if cost > opts.max_cell_cross_cost {
                    continue;
                }

                let step = if nb.diagonal {
                    cost * config.diagonal_cost
                } else {
                    cost
                };
                let tentative_g = current_g + step;
                let steps = current_steps + 1;
                if tentative_g > max_cost || steps > max_steps {
                    continue;
                }

                let n = &mut self.nodes[ni];
                if n.generation == cur_gen {
                    if tentative_g >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                }

                n.g = tentative_g;
                n.steps = steps;
                n.parent = ci;
                n.open = true;

                let h = heuristic.estimate(grid, cell, end_cell);
                seq += 1;
                open.push(NodeRef {
                    idx: ni,
                    f: tentative_g + h,
                    h,
                    seq,
                });
            }
        };

        self.nbuf = nbuf;
        self.open = open;

        if !found {
            log::trace!(
                "no path {start} -> {end} ({} cells expanded)",
                self.expanded
            );
            return GridPath::default();
        }

        // Walk predecessors back to (but excluding) the start.
        let mut cells = Vec::with_capacity(self.nodes[end].steps);
        let mut ci = end;
        while ci != start && ci != NO_PARENT {
            cells.push(ci);
            ci = self.nodes[ci].parent;
        }
        cells.reverse();
        let cost = self.nodes[end].g;
        log::trace!(
            "path {start} -> {end}: {} cells, cost {cost}, {} expanded",
            cells.len(),
            self.expanded
        );
        GridPath { cells, cost }
    }
}
