use error_chain::bail;
use std::cmp;
use std::fmt;

use crate::cells::{Cell, CellSmallVec, SEARCH_DIRECTIONS};
use crate::errors::*;
use crate::units::{ColumnsCount, RowsCount};

/// Largest number of rows or columns a grid may have.
pub const MAX_DIMENSION: usize = 100;

/// Smallest number of rows or columns `Grid::new` will produce.
pub const MIN_GENERATED_DIMENSION: usize = 3;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellState {
    Wall,
    Passage,
}

impl CellState {
    /// The character used for this state in the maze text format.
    #[inline]
    pub fn as_char(self) -> char {
        match self {
            CellState::Passage => '0',
            CellState::Wall => '1',
        }
    }

    #[inline]
    pub fn from_char(c: char) -> Option<CellState> {
        match c {
            '0' => Some(CellState::Passage),
            '1' => Some(CellState::Wall),
            _ => None,
        }
    }
}

/// Rectangular array of wall/passage cells stored row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    rows: RowsCount,
    columns: ColumnsCount,
    cells: Vec<CellState>,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: rows: {:?}, columns: {:?}, passages: {}",
               self.rows, self.columns, self.passage_count())
    }
}

/// Clamp a requested dimension to the maximum, drop an even value to the odd value below it
/// and floor the result at 3.
pub fn sanitize_dimension(requested: usize) -> usize {
    let clamped = cmp::min(requested, MAX_DIMENSION);
    let odd = if clamped % 2 == 0 { clamped.saturating_sub(1) } else { clamped };
    cmp::max(odd, MIN_GENERATED_DIMENSION)
}

impl Grid {
    /// An all wall grid with odd dimensions of at least 3, ready for maze generation.
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Grid {
        let rows = sanitize_dimension(rows.0);
        let columns = sanitize_dimension(columns.0);
        Grid {
            rows: RowsCount(rows),
            columns: ColumnsCount(columns),
            cells: vec![CellState::Wall; rows * columns],
        }
    }

    /// A grid of exactly the requested size with every cell set to `state`.
    ///
    /// Each dimension must be in `1..=MAX_DIMENSION`.
    pub fn filled(rows: RowsCount, columns: ColumnsCount, state: CellState) -> Result<Grid> {
        let (RowsCount(r), ColumnsCount(c)) = (rows, columns);
        if r == 0 || c == 0 {
            bail!(ErrorKind::InvalidDimensions(r, c));
        }
        if r > MAX_DIMENSION || c > MAX_DIMENSION {
            bail!(ErrorKind::MazeTooLarge(r, c, MAX_DIMENSION));
        }
        Ok(Grid {
            rows,
            columns,
            cells: vec![state; r * c],
        })
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_in_bounds(&self, cell: Cell) -> bool {
        (cell.x as usize) < self.columns.0 && (cell.y as usize) < self.rows.0
    }

    /// Convert a cell to its row-major index in `0..size()`.
    /// Returns None if the cell is outside the grid.
    #[inline]
    pub fn index(&self, cell: Cell) -> Option<usize> {
        if self.is_in_bounds(cell) {
            Some(cell.y as usize * self.columns.0 + cell.x as usize)
        } else {
            None
        }
    }

    #[inline]
    fn cell_at_index(&self, index: usize) -> Cell {
        Cell::new((index % self.columns.0) as u32, (index / self.columns.0) as u32)
    }

    #[inline]
    pub fn state(&self, cell: Cell) -> Option<CellState> {
        self.index(cell).map(|i| self.cells[i])
    }

    /// False for walls and for any cell outside the grid.
    #[inline]
    pub fn is_passage(&self, cell: Cell) -> bool {
        self.state(cell) == Some(CellState::Passage)
    }

    #[inline]
    pub fn is_wall(&self, cell: Cell) -> bool {
        self.state(cell) == Some(CellState::Wall)
    }

    /// Returns true if the cell was in bounds and therefore updated.
    pub fn set_state(&mut self, cell: Cell, state: CellState) -> bool {
        match self.index(cell) {
            Some(i) => {
                self.cells[i] = state;
                true
            }
            None => false,
        }
    }

    /// In bounds cells `steps` away in each search direction (South, East, North, West).
    pub fn neighbours_at_distance(&self, cell: Cell, steps: u32) -> CellSmallVec {
        SEARCH_DIRECTIONS.iter()
            .filter_map(|&dir| cell.offset(dir, steps))
            .filter(|&c| self.is_in_bounds(c))
            .collect()
    }

    /// Cells to the South, East, North and West that lie inside the grid, whatever their state.
    #[inline]
    pub fn neighbours(&self, cell: Cell) -> CellSmallVec {
        self.neighbours_at_distance(cell, 1)
    }

    /// Neighbouring passage cells.
    pub fn open_neighbours(&self, cell: Cell) -> CellSmallVec {
        self.neighbours(cell)
            .into_iter()
            .filter(|&c| self.is_passage(c))
            .collect()
    }

    /// All cells in row-major order. Reversible, for scanning back from the bottom right.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Cell> + '_ {
        (0..self.size()).map(move |i| self.cell_at_index(i))
    }

    pub fn passages(&self) -> impl DoubleEndedIterator<Item = Cell> + '_ {
        self.iter().filter(move |&c| self.is_passage(c))
    }

    pub fn passage_count(&self) -> usize {
        self.cells.iter().filter(|&&s| s == CellState::Passage).count()
    }
}

/// Writes the two symbol text format, one line per row.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.columns.0) {
            let line: String = row.iter().map(|s| s.as_char()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    fn gc(x: u32, y: u32) -> Cell {
        Cell::new(x, y)
    }

    #[test]
    fn new_grid_dimensions_are_odd_and_at_least_three() {
        let g = Grid::new(RowsCount(10), ColumnsCount(7));
        assert_eq!(g.rows(), RowsCount(9));
        assert_eq!(g.columns(), ColumnsCount(7));

        let tiny = Grid::new(RowsCount(0), ColumnsCount(2));
        assert_eq!(tiny.rows(), RowsCount(3));
        assert_eq!(tiny.columns(), ColumnsCount(3));

        let huge = Grid::new(RowsCount(500), ColumnsCount(100));
        assert_eq!(huge.rows(), RowsCount(99));
        assert_eq!(huge.columns(), ColumnsCount(99));
    }

    #[test]
    fn new_grid_is_all_wall() {
        let g = Grid::new(RowsCount(5), ColumnsCount(5));
        assert!(g.iter().all(|c| g.is_wall(c)));
        assert_eq!(g.passage_count(), 0);
    }

    #[test]
    fn filled_rejects_bad_dimensions() {
        assert!(Grid::filled(RowsCount(0), ColumnsCount(4), CellState::Wall).is_err());
        let err = Grid::filled(RowsCount(101), ColumnsCount(4), CellState::Wall).unwrap_err();
        match *err.kind() {
            ErrorKind::MazeTooLarge(101, 4, _) => {}
            ref other => panic!("unexpected {:?}", other),
        }
        let g = Grid::filled(RowsCount(2), ColumnsCount(4), CellState::Passage).unwrap();
        assert_eq!(g.size(), 8);
        assert_eq!(g.passage_count(), 8);
    }

    #[test]
    fn out_of_bounds_queries_are_rejected() {
        let mut g = Grid::filled(RowsCount(3), ColumnsCount(4), CellState::Passage).unwrap();
        assert!(g.is_in_bounds(gc(3, 2)));
        assert!(!g.is_in_bounds(gc(4, 0)));
        assert!(!g.is_in_bounds(gc(0, 3)));
        assert!(!g.is_passage(gc(4, 0)));
        assert!(!g.is_wall(gc(4, 0)));
        assert_eq!(g.state(gc(0, 3)), None);
        assert!(!g.set_state(gc(10, 10), CellState::Wall));
        assert_eq!(g.passage_count(), 12);
    }

    #[test]
    fn set_state_updates_only_that_cell() {
        let mut g = Grid::new(RowsCount(3), ColumnsCount(3));
        assert!(g.set_state(gc(1, 2), CellState::Passage));
        assert!(g.is_passage(gc(1, 2)));
        assert_eq!(g.passages().collect::<Vec<_>>(), vec![gc(1, 2)]);
    }

    #[test]
    fn neighbours_follow_search_order_and_bounds() {
        let g = Grid::new(RowsCount(5), ColumnsCount(5));
        assert_eq!(g.neighbours(gc(2, 2)).to_vec(),
                   vec![gc(2, 3), gc(3, 2), gc(2, 1), gc(1, 2)]);
        assert_eq!(g.neighbours(gc(0, 0)).to_vec(), vec![gc(0, 1), gc(1, 0)]);
        assert_eq!(g.neighbours_at_distance(gc(1, 1), 2).to_vec(), vec![gc(1, 3), gc(3, 1)]);
        assert_eq!(g.neighbours(gc(4, 4)).to_vec(), vec![gc(4, 3), gc(3, 4)]);
    }

    #[test]
    fn iteration_is_row_major() {
        let g = Grid::filled(RowsCount(2), ColumnsCount(3), CellState::Wall).unwrap();
        let cells = g.iter().collect::<Vec<_>>();
        assert_eq!(cells,
                   vec![gc(0, 0), gc(1, 0), gc(2, 0), gc(0, 1), gc(1, 1), gc(2, 1)]);
        assert_eq!(g.iter().rev().next(), Some(gc(2, 1)));
        assert_eq!(g.index(gc(1, 1)), Some(4));
    }

    #[test]
    fn display_writes_text_format() {
        let mut g = Grid::filled(RowsCount(2), ColumnsCount(3), CellState::Wall).unwrap();
        g.set_state(gc(0, 0), CellState::Passage);
        g.set_state(gc(2, 1), CellState::Passage);
        assert_eq!(g.to_string(), "011\n110\n");
    }

    #[test]
    fn quickcheck_sanitized_dimensions() {
        fn p(n: usize) -> bool {
            let d = sanitize_dimension(n);
            d % 2 == 1 && d >= MIN_GENERATED_DIMENSION && d <= MAX_DIMENSION
        }
        quickcheck(p as fn(usize) -> bool)
    }
}
