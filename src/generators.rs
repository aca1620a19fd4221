use bit_set::BitSet;
use log::{debug, warn};
use rand::Rng;

use crate::cells::{Cell, CellSmallVec};
use crate::errors::*;
use crate::grid::{CellState, Grid};
use crate::maze::Maze;
use crate::units::{ColumnsCount, RowsCount};

/// Something the generator had to patch up to produce a usable maze.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GenerationWarning {
    /// The start was the only passage, so this cell next to it was opened as the end.
    ForcedEnd(Cell),
}

#[derive(Clone, Debug)]
pub struct GeneratedMaze {
    pub maze: Maze,
    pub warning: Option<GenerationWarning>,
}

/// Apply the randomized Prim's maze generation algorithm to a fresh all wall grid.
///
/// The dimensions are forced odd and at least 3 (see `Grid::new`). Passages are the cells with
/// odd x and y, joined through the wall cell between two of them, so the result is a spanning
/// tree: exactly one simple route between any two passages.
///
/// The frontier holds wall cells two steps from the carved area. Each round removes a random
/// frontier cell, links it to a random carved cell two steps away by opening the midpoint,
/// and adds that cell's own wall cells two steps away to the frontier.
///
/// The start is `(1,1)` and the end the `(cols-2, rows-2)` corner cell where possible.
/// Output depends only on `rng`, so a seeded generator reproduces the maze.
pub fn prim<R: Rng>(rows: RowsCount, columns: ColumnsCount, rng: &mut R) -> Result<GeneratedMaze> {
    let mut grid = Grid::new(rows, columns);
    let start = choose_start(&grid);

    carve_spanning_tree(&mut grid, start, rng);
    let (end, warning) = choose_end(&mut grid, start)?;

    let maze = Maze::new(grid, start, end)?;
    debug!("Generated {:?} with start {} and end {}", maze.grid(), start, end);
    Ok(GeneratedMaze { maze, warning })
}

// `Grid::new` never makes a side shorter than 3, so `(1,1)` is always inside.
fn choose_start(grid: &Grid) -> Cell {
    let start = Cell::new(1, 1);
    debug_assert!(grid.is_in_bounds(start), "grid smaller than 3x3: {:?}", grid);
    start
}

fn carve_spanning_tree<R: Rng>(grid: &mut Grid, start: Cell, rng: &mut R) {
    let mut frontier = Vec::new();
    let mut in_frontier = BitSet::with_capacity(grid.size());

    grid.set_state(start, CellState::Passage);
    extend_frontier(grid, start, &mut frontier, &mut in_frontier);

    while !frontier.is_empty() {
        let cell = frontier.swap_remove(rng.gen_range(0..frontier.len()));

        let carved = grid.neighbours_at_distance(cell, 2)
            .into_iter()
            .filter(|&n| grid.is_passage(n))
            .collect::<CellSmallVec>();
        if carved.is_empty() {
            continue;
        }

        let link = carved[rng.gen_range(0..carved.len())];
        grid.set_state(cell, CellState::Passage);
        grid.set_state(cell.midpoint(link), CellState::Passage);
        extend_frontier(grid, cell, &mut frontier, &mut in_frontier);
    }
}

fn extend_frontier(grid: &Grid, from: Cell, frontier: &mut Vec<Cell>, in_frontier: &mut BitSet) {
    for cell in grid.neighbours_at_distance(from, 2) {
        if !grid.is_wall(cell) {
            continue;
        }
        if let Some(index) = grid.index(cell) {
            if in_frontier.insert(index) {
                frontier.push(cell);
            }
        }
    }
}

fn choose_end(grid: &mut Grid, start: Cell) -> Result<(Cell, Option<GenerationWarning>)> {
    let corner = Cell::new(grid.columns().0 as u32 - 2, grid.rows().0 as u32 - 2);
    if corner != start && grid.is_passage(corner) {
        return Ok((corner, None));
    }

    if let Some(last_passage) = grid.passages().rev().find(|&c| c != start) {
        return Ok((last_passage, None));
    }

    // Only reachable on the smallest grids, where the start is the lone odd/odd cell.
    let forced = *grid.neighbours(start).first().ok_or(ErrorKind::NoPassage)?;
    grid.set_state(forced, CellState::Passage);
    warn!("Maze has no passage for the end point, opened {} next to the start {}", forced, start);
    Ok((forced, Some(GenerationWarning::ForcedEnd(forced))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distances::Distances;
    use crate::utils::fnv_hashset;
    use quickcheck::quickcheck;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    fn generate(rows: usize, columns: usize, seed: u64) -> GeneratedMaze {
        let mut rng = XorShiftRng::seed_from_u64(seed);
        prim(RowsCount(rows), ColumnsCount(columns), &mut rng).unwrap()
    }

    fn is_odd_odd(c: Cell) -> bool {
        c.x % 2 == 1 && c.y % 2 == 1
    }

    #[test]
    fn same_seed_same_maze() {
        let a = generate(21, 31, 99);
        let b = generate(21, 31, 99);
        assert_eq!(a.maze, b.maze);
    }

    #[test]
    fn dimensions_are_sanitized() {
        let generated = generate(10, 8, 1);
        let grid = generated.maze.grid();
        assert_eq!(grid.rows(), RowsCount(9));
        assert_eq!(grid.columns(), ColumnsCount(7));
    }

    #[test]
    fn default_endpoints() {
        let generated = generate(11, 15, 5);
        assert_eq!(generated.maze.start(), Cell::new(1, 1));
        assert_eq!(generated.maze.end(), Cell::new(13, 9));
        assert_eq!(generated.warning, None);
    }

    #[test]
    fn every_odd_odd_cell_is_carved_and_no_even_even_cell_is() {
        let generated = generate(15, 21, 3);
        let grid = generated.maze.grid();
        for c in grid.iter() {
            if is_odd_odd(c) {
                assert!(grid.is_passage(c), "{} should be carved", c);
            }
            if c.x % 2 == 0 && c.y % 2 == 0 {
                assert!(grid.is_wall(c), "{} should be a wall", c);
            }
        }
    }

    #[test]
    fn passages_form_a_spanning_tree() {
        let generated = generate(17, 13, 11);
        let maze = &generated.maze;
        let grid = maze.grid();

        // A tree over the k odd/odd cells opens exactly k - 1 connecting walls.
        let nodes = grid.iter().filter(|&c| is_odd_odd(c)).count();
        assert_eq!(grid.passage_count(), 2 * nodes - 1);

        let distances = Distances::for_maze(maze, maze.start(), &fnv_hashset(0)).unwrap();
        assert!(grid.passages().all(|c| distances.distance_to(c).is_some()));
    }

    #[test]
    fn border_stays_walled() {
        let generated = generate(9, 9, 8);
        let grid = generated.maze.grid();
        for c in grid.iter() {
            if c.x == 0 || c.y == 0 || c.x == 8 || c.y == 8 {
                assert!(grid.is_wall(c));
            }
        }
    }

    #[test]
    fn smallest_maze_forces_an_end_next_to_the_start() {
        let generated = generate(3, 3, 0);
        assert_eq!(generated.maze.start(), Cell::new(1, 1));
        assert_eq!(generated.maze.end(), Cell::new(1, 2));
        assert_eq!(generated.warning, Some(GenerationWarning::ForcedEnd(Cell::new(1, 2))));
        assert!(generated.maze.grid().is_passage(Cell::new(1, 2)));
    }

    #[test]
    fn degenerate_requests_still_start_at_one_one() {
        for &(rows, columns) in &[(0, 0), (1, 7), (2, 2), (7, 1)] {
            let generated = generate(rows, columns, 5);
            assert_eq!(generated.maze.start(), Cell::new(1, 1));
            assert!(generated.maze.grid().rows().0 >= 3);
            assert!(generated.maze.grid().columns().0 >= 3);
        }
    }

    #[test]
    fn thin_mazes_use_the_corner_end() {
        let generated = generate(3, 9, 2);
        assert_eq!(generated.maze.end(), Cell::new(7, 1));
        assert_eq!(generated.warning, None);
    }

    #[test]
    fn quickcheck_generated_endpoints_are_distinct_passages() {
        fn p(rows: u8, columns: u8, seed: u64) -> bool {
            let generated = generate(rows as usize % 40, columns as usize % 40, seed);
            let maze = &generated.maze;
            maze.grid().is_passage(maze.start()) && maze.grid().is_passage(maze.end()) &&
            maze.start() != maze.end()
        }
        quickcheck(p as fn(u8, u8, u64) -> bool)
    }
}
