//! Newtypes that keep grid row and column counts from being mixed up with each other or
//! with cell coordinates.

use std::fmt;

/// Number of rows in a grid, its height.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct RowsCount(pub usize);

/// Number of columns in a grid, its width.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct ColumnsCount(pub usize);

impl fmt::Display for RowsCount {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} rows", self.0)
    }
}

impl fmt::Display for ColumnsCount {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} columns", self.0)
    }
}
