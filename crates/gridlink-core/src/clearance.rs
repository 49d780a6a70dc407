//! Grid-wide clearance cache.
//!
//! A cell's clearance is the radius of free space around it: 0 for blocked
//! cells, 1 for free cells touching a blocked cell or the grid border, and
//! `1 + min(neighbour clearance)` elsewhere. Box grids measure over the
//! 8-neighbourhood, so clearance `k` means a free square of side `2k - 1`
//! centred on the cell.
//!
//! The cache is rebuilt wholesale when stale; there is no per-cell
//! dependency tracking.

use std::collections::VecDeque;

use crate::cell::{ANY_GROUP, Cell};
use crate::grid::CellGrid;

/// Clearance of free cells that never reach a blocked cell or border.
pub const UNBOUNDED_CLEARANCE: u16 = u16::MAX;

#[derive(Clone, Debug)]
pub(crate) struct ClearanceCache {
    values: Vec<u16>,
    dirty: bool,
    mask: u32,
    exact: bool,
}

impl ClearanceCache {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            values: vec![0; len],
            dirty: true,
            mask: ANY_GROUP,
            exact: false,
        }
    }

    #[inline]
    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    #[inline]
    fn is_valid_for(&self, mask: u32, exact: bool) -> bool {
        !self.dirty && self.mask == mask && self.exact == exact
    }
}

impl CellGrid {
    /// Whether the cache must be rebuilt before serving `mask`.
    #[inline]
    pub fn clearance_is_stale(&self, group_mask: u32, exact: bool) -> bool {
        !self.clearance.is_valid_for(group_mask, exact)
    }

    /// Cached clearance of `index`, or `None` while the cache is dirty or
    /// the cell is absent.
    pub fn clearance(&self, index: usize) -> Option<u16> {
        if self.clearance.dirty {
            return None;
        }
        self.cell(index)?;
        self.clearance.values.get(index).copied()
    }

    /// Rebuild the cache for `group_mask` if it is stale. Returns whether a
    /// rebuild happened.
    pub fn refresh_clearance(&mut self, group_mask: u32, exact: bool) -> bool {
        if !self.clearance_is_stale(group_mask, exact) {
            return false;
        }
        let values = self.compute_clearance(group_mask, exact);
        log::debug!(
            "clearance rebuilt: {} cells, mask {:#x}, exact {}",
            values.len(),
            group_mask,
            exact
        );
        self.clearance = ClearanceCache {
            values,
            dirty: false,
            mask: group_mask,
            exact,
        };
        true
    }

    fn compute_clearance(&self, mask: u32, exact: bool) -> Vec<u16> {
        let len = self.cell_count();
        let free = |i: usize| {
            self.cell(i)
                .is_some_and(|c| c.can_cross && Cell::in_group(c.group, mask, exact))
        };

        let mut values = vec![0u16; len];
        let mut queue: VecDeque<usize> = VecDeque::new();
        let mut nbuf = Vec::with_capacity(8);

        // Seed: free cells on the edge of free space.
        for i in 0..len {
            if !free(i) {
                continue;
            }
            nbuf.clear();
            self.neighbors(i, true, &mut nbuf);
            let border = nbuf.len() < self.full_neighborhood(i, true);
            if border || nbuf.iter().any(|n| !free(n.index)) {
                values[i] = 1;
                queue.push_back(i);
            } else {
                values[i] = UNBOUNDED_CLEARANCE;
            }
        }

        while let Some(ci) = queue.pop_front() {
            let next = values[ci].saturating_add(1).min(UNBOUNDED_CLEARANCE - 1);
            nbuf.clear();
            self.neighbors(ci, true, &mut nbuf);
            for n in nbuf.iter() {
                if values[n.index] == UNBOUNDED_CLEARANCE {
                    values[n.index] = next;
                    queue.push_back(n.index);
                }
            }
        }

        values
    }
}
