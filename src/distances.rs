use smallvec::SmallVec;
use std::cmp;

use crate::cells::Cell;
use crate::grid::Grid;
use crate::maze::Maze;
use crate::pathing::BlockedSet;
use crate::utils::{fnv_hashmap, FnvHashMap};

/// Breadth first step counts from one start cell to every passage reachable from it.
#[derive(Debug, Clone)]
pub struct Distances {
    start: Cell,
    distances: FnvHashMap<Cell, u32>,
    max_distance: u32,
}

impl Distances {
    pub fn for_maze(maze: &Maze, start: Cell, blocked: &BlockedSet) -> Option<Distances> {
        Distances::for_grid(maze.grid(), start, blocked)
    }

    /// Flood fill outwards from `start`, never entering walls or blocked cells.
    /// Returns None if `start` is not a passage of the grid.
    pub fn for_grid(grid: &Grid, start: Cell, blocked: &BlockedSet) -> Option<Distances> {
        if !grid.is_passage(start) {
            return None;
        }

        let mut distances = fnv_hashmap(grid.size());
        distances.insert(start, 0);
        let mut max = 0;

        // Unit steps mean the first distance recorded for a cell is already its shortest,
        // so the map doubles as the visited set and the frontier can be a plain vec.
        let mut frontier = vec![start];
        while !frontier.is_empty() {
            let mut new_frontier = vec![];
            for cell in &frontier {
                let distance_to_cell = distances[cell];
                max = cmp::max(max, distance_to_cell);

                for neighbour in grid.open_neighbours(*cell) {
                    if blocked.contains(&neighbour) || distances.contains_key(&neighbour) {
                        continue;
                    }
                    distances.insert(neighbour, distance_to_cell + 1);
                    new_frontier.push(neighbour);
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start,
            distances,
            max_distance: max,
        })
    }

    #[inline]
    pub fn start(&self) -> Cell {
        self.start
    }

    #[inline]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    /// None if `cell` cannot be reached.
    #[inline]
    pub fn distance_to(&self, cell: Cell) -> Option<u32> {
        self.distances.get(&cell).cloned()
    }

    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }

    /// Every cell at the maximum distance, sorted.
    pub fn furthest_points(&self) -> SmallVec<[Cell; 8]> {
        let mut furthest = self.distances
            .iter()
            .filter(|&(_, &d)| d == self.max_distance)
            .map(|(&c, _)| c)
            .collect::<SmallVec<[Cell; 8]>>();
        furthest.sort();
        furthest
    }
}
