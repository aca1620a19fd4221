//! **grid_mazes** generates perfect mazes on a wall/passage grid, finds shortest routes through
//! them, enumerates alternative routes and plays a route back one cell at a time.

pub mod cells;
pub mod distances;
pub mod enumeration;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod maze;
pub mod pathing;
pub mod playback;
pub mod session;
pub mod units;
mod utils;
