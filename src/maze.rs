//! A grid with a validated start and end cell, and the two symbol text format it is saved in.
//!
//! Text format: one line per row, every line the same length, `'0'` for a passage and `'1'`
//! for a wall. At most `MAX_DIMENSION` rows and columns.

use error_chain::bail;
use log::debug;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::cells::Cell;
use crate::errors::*;
use crate::grid::{CellState, Grid, MAX_DIMENSION};
use crate::units::{ColumnsCount, RowsCount};

/// Which end of the route an edit applies to.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Endpoint {
    Start,
    End,
}

/// Invariant: `start` and `end` are distinct passage cells inside `grid`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    grid: Grid,
    start: Cell,
    end: Cell,
}

/// Fails unless `cell` is an in bounds passage of `grid`.
pub fn validate_passage(grid: &Grid, cell: Cell) -> Result<()> {
    match grid.state(cell) {
        None => bail!(ErrorKind::OutOfBounds(cell)),
        Some(CellState::Wall) => bail!(ErrorKind::OnWall(cell)),
        Some(CellState::Passage) => Ok(()),
    }
}

/// Validation shared by every search entry point.
pub fn validate_endpoints(grid: &Grid, start: Cell, end: Cell) -> Result<()> {
    validate_passage(grid, start)?;
    validate_passage(grid, end)?;
    if start == end {
        bail!(ErrorKind::StartEqualsEnd(start));
    }
    Ok(())
}

impl Maze {
    pub fn new(grid: Grid, start: Cell, end: Cell) -> Result<Maze> {
        validate_endpoints(&grid, start, end)?;
        Ok(Maze { grid, start, end })
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn start(&self) -> Cell {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Cell {
        self.end
    }

    pub fn endpoint(&self, which: Endpoint) -> Cell {
        match which {
            Endpoint::Start => self.start,
            Endpoint::End => self.end,
        }
    }

    /// Move the start or end. The maze is left untouched if the new cell is out of bounds,
    /// a wall, or the other endpoint.
    pub fn set_endpoint(&mut self, which: Endpoint, cell: Cell) -> Result<()> {
        validate_passage(&self.grid, cell)?;
        let other = match which {
            Endpoint::Start => self.end,
            Endpoint::End => self.start,
        };
        if cell == other {
            bail!(ErrorKind::StartEqualsEnd(cell));
        }
        match which {
            Endpoint::Start => self.start = cell,
            Endpoint::End => self.end = cell,
        }
        Ok(())
    }

    #[inline]
    pub fn set_start(&mut self, cell: Cell) -> Result<()> {
        self.set_endpoint(Endpoint::Start, cell)
    }

    #[inline]
    pub fn set_end(&mut self, cell: Cell) -> Result<()> {
        self.set_endpoint(Endpoint::End, cell)
    }

    /// Parse the text format. The start is `(0,0)` and the end the bottom right corner unless
    /// those are walls, in which case the first passage scanning forwards from the top left
    /// (start) or backwards from the bottom right (end) is used instead.
    pub fn from_text(text: &str) -> Result<Maze> {
        let grid = parse_grid(text)?;

        let default_start = Cell::new(0, 0);
        let default_end = Cell::new(grid.columns().0 as u32 - 1, grid.rows().0 as u32 - 1);

        let start = if grid.is_passage(default_start) {
            default_start
        } else {
            grid.passages().next().ok_or(ErrorKind::NoPassage)?
        };
        let end = if grid.is_passage(default_end) {
            default_end
        } else {
            grid.passages().next_back().ok_or(ErrorKind::NoPassage)?
        };

        let maze = Maze::new(grid, start, end)?;
        debug!("Loaded {:?} with start {} and end {}", maze.grid, maze.start, maze.end);
        Ok(maze)
    }

    /// The text format, one `\n` terminated line per row.
    pub fn to_text(&self) -> String {
        self.grid.to_string()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Maze> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .chain_err(|| format!("Failed to read maze file {}", path.display()))?;
        Maze::from_text(&text)
            .chain_err(|| format!("Failed to load maze file {}", path.display()))
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_text())
            .chain_err(|| format!("Failed to write maze file {}", path.display()))
    }
}

impl FromStr for Maze {
    type Err = Error;

    fn from_str(s: &str) -> Result<Maze> {
        Maze::from_text(s)
    }
}

fn parse_grid(text: &str) -> Result<Grid> {
    let mut lines: Vec<&str> = text.lines().map(str::trim).collect();
    while lines.last().map_or(false, |line| line.is_empty()) {
        lines.pop();
    }
    if lines.is_empty() {
        bail!(ErrorKind::MazeFormat(1, String::from("no maze rows")));
    }

    let rows = lines.len();
    let columns = lines[0].chars().count();
    if rows > MAX_DIMENSION || columns > MAX_DIMENSION {
        bail!(ErrorKind::MazeTooLarge(rows, columns, MAX_DIMENSION));
    }

    let mut grid = Grid::filled(RowsCount(rows), ColumnsCount(columns), CellState::Wall)
        .chain_err(|| ErrorKind::MazeFormat(1, String::from("blank line")))?;

    for (y, line) in lines.iter().enumerate() {
        let line_number = y + 1;
        let length = line.chars().count();
        if length != columns {
            bail!(ErrorKind::MazeFormat(line_number,
                                        format!("expected {} cells, found {}", columns, length)));
        }
        for (x, c) in line.chars().enumerate() {
            let state = CellState::from_char(c).ok_or_else(|| {
                ErrorKind::MazeFormat(line_number, format!("unexpected character {:?}", c))
            })?;
            grid.set_state(Cell::new(x as u32, y as u32), state);
        }
    }

    Ok(grid)
}
