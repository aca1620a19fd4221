use bit_set::BitSet;
use log::debug;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::cells::{Cell, SEARCH_DIRECTIONS};
use crate::errors::*;
use crate::grid::Grid;
use crate::maze::{validate_endpoints, Maze};
use crate::pathing::{empty_blocked_set, BlockedSet, Path};

/// Enumeration stops once this many paths have been collected.
pub const MAX_ENUMERATED_PATHS: usize = 2000;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum EnumerationStatus {
    /// Every simple path was found. An empty set means there is no path at all.
    Complete,
    /// `MAX_ENUMERATED_PATHS` were collected; more may exist.
    LimitReached,
    /// The caller's cancel flag was raised before the search finished.
    Cancelled,
}

/// Simple paths between two cells, shortest first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathSet {
    paths: Vec<Path>,
    status: EnumerationStatus,
}

impl PathSet {
    #[inline]
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Path> {
        self.paths.get(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    #[inline]
    pub fn status(&self) -> EnumerationStatus {
        self.status
    }

    /// True when the search stopped early, so the set may be missing paths.
    pub fn is_partial(&self) -> bool {
        self.status != EnumerationStatus::Complete
    }

    pub fn iter(&self) -> std::slice::Iter<Path> {
        self.paths.iter()
    }
}

/// Every simple path from the maze's start to its end, up to `MAX_ENUMERATED_PATHS`.
pub fn all_paths(maze: &Maze) -> PathSet {
    all_paths_with(maze, &empty_blocked_set(), None)
}

/// `all_paths` avoiding `blocked` cells and checking `cancel` before each new branch.
///
/// The cost grows exponentially with open area, so callers wanting to stay responsive should
/// run this on another thread and raise `cancel` to stop it.
pub fn all_paths_with(maze: &Maze, blocked: &BlockedSet, cancel: Option<&AtomicBool>) -> PathSet {
    enumerate(maze.grid(), maze.start(), maze.end(), blocked, cancel_check(cancel))
}

/// `all_paths_with` for any pair of cells; fails if they are not distinct passages.
pub fn all_paths_between(grid: &Grid,
                         start: Cell,
                         end: Cell,
                         blocked: &BlockedSet,
                         cancel: Option<&AtomicBool>)
                         -> Result<PathSet> {
    validate_endpoints(grid, start, end)?;
    Ok(enumerate(grid, start, end, blocked, cancel_check(cancel)))
}

fn cancel_check(cancel: Option<&AtomicBool>) -> impl FnMut() -> bool + '_ {
    move || cancel.map_or(false, |flag| flag.load(Ordering::Relaxed))
}

/// A cell on the path under construction and the next direction to try from it.
struct Frame {
    cell: Cell,
    index: usize,
    next_direction: usize,
}

// Depth first search with an explicit stack so deep paths cannot overflow the thread stack.
// Directions are tried in `SEARCH_DIRECTIONS` order, which fixes the discovery order.
// `cancelled` is polled before each new branch.
fn enumerate<F>(grid: &Grid, start: Cell, end: Cell, blocked: &BlockedSet, mut cancelled: F) -> PathSet
    where F: FnMut() -> bool
{
    let mut paths: Vec<Path> = Vec::new();
    let mut status = EnumerationStatus::Complete;

    let mut on_path = BitSet::with_capacity(grid.size());
    let mut path = vec![start];
    let mut stack = Vec::new();
    if let Some(index) = grid.index(start) {
        on_path.insert(index);
        stack.push(Frame { cell: start, index, next_direction: 0 });
    }

    while let Some(frame) = stack.last_mut() {
        if paths.len() >= MAX_ENUMERATED_PATHS {
            status = EnumerationStatus::LimitReached;
            break;
        }

        if frame.next_direction == SEARCH_DIRECTIONS.len() {
            on_path.remove(frame.index);
            stack.pop();
            path.pop();
            continue;
        }

        let direction = SEARCH_DIRECTIONS[frame.next_direction];
        frame.next_direction += 1;

        let candidate = match frame.cell.neighbour(direction) {
            Some(c) => c,
            None => continue,
        };
        let candidate_index = match grid.index(candidate) {
            Some(i) if grid.is_passage(candidate) && !blocked.contains(&candidate) => i,
            _ => continue,
        };
        if on_path.contains(candidate_index) {
            continue;
        }

        if cancelled() {
            status = EnumerationStatus::Cancelled;
            break;
        }

        path.push(candidate);
        if candidate == end {
            paths.push(path.clone());
            path.pop();
        } else {
            on_path.insert(candidate_index);
            stack.push(Frame { cell: candidate, index: candidate_index, next_direction: 0 });
        }
    }

    // Stable, so equal lengths stay in discovery order.
    paths.sort_by_key(Vec::len);
    debug!("Enumerated {} paths from {} to {}: {:?}", paths.len(), start, end, status);

    PathSet { paths, status }
}
