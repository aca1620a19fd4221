use log::debug;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::cells::Cell;
use crate::errors::*;
use crate::grid::Grid;
use crate::maze::{validate_endpoints, Maze};
use crate::utils::{fnv_hashmap, fnv_hashset, FnvHashMap, FnvHashSet};

/// Cells from start to end inclusive, each one orthogonal step from the last.
pub type Path = Vec<Cell>;

/// Cells a search must treat as walls on top of the grid's own walls.
pub type BlockedSet = FnvHashSet<Cell>;

pub fn empty_blocked_set() -> BlockedSet {
    fnv_hashset(0)
}

/// One visit of a cell during a single A* call. Nodes live in that call's arena and refer to
/// their predecessor by arena index.
#[derive(Debug, Copy, Clone)]
struct SearchNode {
    position: Cell,
    g: u32,
    h: u32,
    predecessor: Option<usize>,
}

impl SearchNode {
    #[inline]
    fn f(&self) -> u32 {
        self.g + self.h
    }
}

#[derive(Debug, Eq, PartialEq)]
struct OpenEntry {
    f: u32,
    node: usize,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap pops the smallest f first.
        other.f.cmp(&self.f)
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// State of one A* call. Dropped as a whole when the call returns, found or not.
struct AStar<'a> {
    grid: &'a Grid,
    blocked: &'a BlockedSet,
    goal: Cell,
    nodes: Vec<SearchNode>,
    best: FnvHashMap<Cell, usize>,
    open: BinaryHeap<OpenEntry>,
}

impl<'a> AStar<'a> {
    fn new(grid: &'a Grid, blocked: &'a BlockedSet, goal: Cell) -> AStar<'a> {
        AStar {
            grid,
            blocked,
            goal,
            nodes: Vec::new(),
            best: fnv_hashmap(grid.size()),
            open: BinaryHeap::new(),
        }
    }

    fn record(&mut self, position: Cell, g: u32, predecessor: Option<usize>) {
        let index = self.nodes.len();
        let node = SearchNode {
            position,
            g,
            h: position.manhattan_distance(self.goal),
            predecessor,
        };
        self.nodes.push(node);
        self.best.insert(position, index);
        self.open.push(OpenEntry { f: node.f(), node: index });
    }

    fn run(mut self, start: Cell) -> Option<Path> {
        self.record(start, 0, None);

        while let Some(OpenEntry { node: current, .. }) = self.open.pop() {
            let SearchNode { position, g, .. } = self.nodes[current];

            // Superseded by a cheaper route found after this entry was queued.
            if self.best.get(&position) != Some(&current) {
                continue;
            }

            if position == self.goal {
                let path = self.path_to(current);
                debug!("A* reached {} in {} steps using {} search nodes",
                       self.goal, path.len() - 1, self.nodes.len());
                return Some(path);
            }

            for next in self.grid.open_neighbours(position) {
                if self.blocked.contains(&next) {
                    continue;
                }
                let tentative_g = g + 1;
                let improves = match self.best.get(&next) {
                    Some(&known) => tentative_g < self.nodes[known].g,
                    None => true,
                };
                if improves {
                    self.record(next, tentative_g, Some(current));
                }
            }
        }

        debug!("A* found no route to {} after {} search nodes", self.goal, self.nodes.len());
        None
    }

    fn path_to(&self, node: usize) -> Path {
        let mut path = Vec::new();
        let mut cursor = Some(node);
        while let Some(index) = cursor {
            let n = &self.nodes[index];
            path.push(n.position);
            cursor = n.predecessor;
        }
        path.reverse();
        path
    }
}

/// Shortest route from the maze's start to its end, avoiding walls and `blocked` cells.
///
/// `Ok(None)` means no route exists; an `Err` means the endpoints themselves were invalid.
pub fn find_path(maze: &Maze, blocked: &BlockedSet) -> Result<Option<Path>> {
    shortest_path(maze.grid(), maze.start(), maze.end(), blocked)
}

/// A* search with the Manhattan distance heuristic over 4-connected unit cost moves.
///
/// `start` and `end` must be distinct in bounds passages. Blocked cells are never entered,
/// so a blocked `end` is unreachable, while a blocked `start` only matters as a place to leave.
/// The order among equally promising cells is unspecified; only the route length is.
pub fn shortest_path(grid: &Grid, start: Cell, end: Cell, blocked: &BlockedSet) -> Result<Option<Path>> {
    validate_endpoints(grid, start, end)?;
    Ok(AStar::new(grid, blocked, end).run(start))
}

/// True if `path` is a simple route of adjacent passage cells from `start` to `end`.
pub fn is_valid_path(grid: &Grid, path: &[Cell], start: Cell, end: Cell) -> bool {
    if path.first() != Some(&start) || path.last() != Some(&end) {
        return false;
    }
    let mut seen = fnv_hashset(path.len());
    let all_open_and_unique = path.iter().all(|&c| grid.is_passage(c) && seen.insert(c));
    all_open_and_unique && path.windows(2).all(|pair| pair[0].is_adjacent(pair[1]))
}
