// error_chain! creates the Error, ErrorKind, ResultExt and Result types.
// Result is a typedef of std `Result` with our own `Error`, and the From conversions
// let `?` work for io errors.
use error_chain::error_chain;

use crate::cells::Cell;

error_chain! {

    foreign_links {
        Io(::std::io::Error);
    }

    errors {
        MazeFormat(line: usize, reason: String) {
            description("malformed maze text")
            display("malformed maze text at line {}: {}", line, reason)
        }
        MazeTooLarge(rows: usize, columns: usize, max: usize) {
            description("maze dimensions too large")
            display("maze of {} rows by {} columns exceeds the {}x{} maximum", rows, columns, max, max)
        }
        InvalidDimensions(rows: usize, columns: usize) {
            description("invalid grid dimensions")
            display("invalid grid dimensions {} rows by {} columns", rows, columns)
        }
        NoPassage {
            description("maze has no passage cells")
            display("maze has no passage cells")
        }
        OutOfBounds(cell: Cell) {
            description("cell outside the grid")
            display("cell {} is outside the grid", cell)
        }
        OnWall(cell: Cell) {
            description("cell is a wall")
            display("cell {} is a wall", cell)
        }
        StartEqualsEnd(cell: Cell) {
            description("start and end are the same cell")
            display("start and end are both {}", cell)
        }
    }
}
