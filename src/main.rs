use docopt::Docopt;
use grid_mazes::{
    cells::Cell,
    distances::Distances,
    enumeration::{self, EnumerationStatus},
    generators::{self, GenerationWarning},
    maze::Maze,
    pathing::{self, empty_blocked_set, BlockedSet},
    session::MazeSession,
    units::{ColumnsCount, RowsCount},
};
use itertools::Itertools;
use log::{info, warn};
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use serde_derive::Deserialize;
use std::{thread, time::Duration};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Grid mazes

Usage:
    mazes_driver -h | --help
    mazes_driver generate [--rows=<n> --cols=<n> --seed=<s> --out=<path> --solve]
    mazes_driver solve <maze-file> [--block=<cell>...] [--animate --delay-ms=<ms>]
    mazes_driver enumerate <maze-file> [--block=<cell>...] [--show=<n>]

Options:
    -h --help           Show this screen.
    --rows=<n>          Rows in a generated maze, made odd and kept within 3..100 [default: 21].
    --cols=<n>          Columns in a generated maze, made odd and kept within 3..100 [default: 21].
    --seed=<s>          Seed for the maze generator. A random seed is chosen and logged if not given.
    --out=<path>        Save the generated maze to this file instead of printing it.
    --solve             Also print the shortest path through the generated maze.
    --block=<cell>      Treat the passage at x,y as a wall while searching. Repeatable.
    --animate           Reveal the found path one cell at a time.
    --delay-ms=<ms>     Pause between revealed cells when animating [default: 60].
    --show=<n>          Print the first n enumerated paths [default: 3].

Set RUST_LOG (e.g. RUST_LOG=grid_mazes=debug) to see the library's logging.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    cmd_generate: bool,
    cmd_solve: bool,
    cmd_enumerate: bool,
    arg_maze_file: String,
    flag_rows: usize,
    flag_cols: usize,
    flag_seed: Option<u64>,
    flag_out: String,
    flag_solve: bool,
    flag_block: Vec<String>,
    flag_animate: bool,
    flag_delay_ms: u64,
    flag_show: usize,
}

mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::grid_mazes::errors::Error, ::grid_mazes::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    // The fmt subscriber also captures records from the `log` facade the library uses.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    if args.cmd_generate {
        generate(&args)
    } else if args.cmd_solve {
        solve(&args)
    } else if args.cmd_enumerate {
        enumerate(&args)
    } else {
        Ok(())
    }
}

fn generate(args: &MazeArgs) -> Result<()> {

    let seed = args.flag_seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!("Generating with seed {}", seed);
    let mut rng = XorShiftRng::seed_from_u64(seed);

    let generated = generators::prim(RowsCount(args.flag_rows), ColumnsCount(args.flag_cols), &mut rng)?;
    if let Some(GenerationWarning::ForcedEnd(cell)) = generated.warning {
        warn!("Maze too small for a distinct end, opened {} as the end", cell);
    }
    let maze = generated.maze;

    if !args.flag_out.is_empty() {
        maze.save(&args.flag_out)
            .chain_err(|| format!("Failed to save maze to {}", args.flag_out))?;
        println!("Saved maze of {} by {} to {}", maze.grid().rows(), maze.grid().columns(), args.flag_out);
    }

    if args.flag_solve {
        let none = empty_blocked_set();
        let path = pathing::find_path(&maze, &none)?;
        println!("{}", render(&maze, path.as_ref().map_or(&[][..], |p| &p[..]), &none));
        print_route_summary(&maze, path.as_ref(), &none);
    } else if args.flag_out.is_empty() {
        print!("{}", maze.to_text());
    }

    Ok(())
}

fn solve(args: &MazeArgs) -> Result<()> {

    let mut session = MazeSession::new(load_maze(&args.arg_maze_file)?);
    for cell in parse_blocked(&args.flag_block)? {
        session.block(cell);
    }

    if !args.flag_animate {
        let path = session.shortest_path()?;
        println!("{}", render(session.maze(), path.as_ref().map_or(&[][..], |p| &p[..]), session.blocked()));
        print_route_summary(session.maze(), path.as_ref(), session.blocked());
        return Ok(());
    }

    let path = session.find_path()?;
    if path.is_none() {
        println!("{}", render(session.maze(), &[], session.blocked()));
    }
    let delay = Duration::from_millis(args.flag_delay_ms);
    while !session.playback().is_finished() {
        let revealed = session.advance_playback().revealed.to_vec();
        println!("{}", render(session.maze(), &revealed, session.blocked()));
        thread::sleep(delay);
    }
    print_route_summary(session.maze(), path.as_ref(), session.blocked());

    Ok(())
}

fn enumerate(args: &MazeArgs) -> Result<()> {

    let maze = load_maze(&args.arg_maze_file)?;
    let blocked = parse_blocked(&args.flag_block)?.into_iter().collect::<BlockedSet>();

    let set = enumeration::all_paths_with(&maze, &blocked, None);
    match set.status() {
        EnumerationStatus::Complete => println!("{} paths from {} to {}", set.len(), maze.start(), maze.end()),
        EnumerationStatus::LimitReached => {
            println!("Stopped after {} paths from {} to {}, more may exist",
                     set.len(),
                     maze.start(),
                     maze.end())
        }
        EnumerationStatus::Cancelled => println!("Enumeration cancelled after {} paths", set.len()),
    }
    if set.is_empty() {
        return Ok(());
    }

    let lengths = set.iter().map(Vec::len).dedup_with_count().map(|(n, len)| format!("{}x{}", n, len)).join(", ");
    println!("Path lengths (count x cells): {}", lengths);

    for (i, path) in set.iter().take(args.flag_show).enumerate() {
        println!("\nPath {} of {}, {} cells", i + 1, set.len(), path.len());
        println!("{}", render(&maze, path, &blocked));
    }

    Ok(())
}

fn load_maze(file: &str) -> Result<Maze> {
    let maze = Maze::load(file).chain_err(|| format!("Failed to load maze from {}", file))?;
    info!("Loaded maze of {} by {} from {}", maze.grid().rows(), maze.grid().columns(), file);
    Ok(maze)
}

/// Cells are given as `x,y`.
fn parse_blocked(cells: &[String]) -> Result<Vec<Cell>> {
    cells.iter().map(|text| parse_cell(text)).collect()
}

fn parse_cell(text: &str) -> Result<Cell> {
    let coordinates = text.split(',')
        .map(|part| part.trim().parse::<u32>())
        .collect::<::std::result::Result<Vec<u32>, _>>()
        .chain_err(|| format!("Invalid cell '{}', expected x,y", text))?;
    match coordinates[..] {
        [x, y] => Ok(Cell::new(x, y)),
        _ => Err(format!("Invalid cell '{}', expected x,y", text).into()),
    }
}

/// The maze as text: `#` walls, spaces for passages, `S`/`E` endpoints, `.` path cells and `x`
/// blocked cells.
fn render(maze: &Maze, path: &[Cell], blocked: &BlockedSet) -> String {
    let grid = maze.grid();
    let on_path = path.iter().cloned().collect::<BlockedSet>();

    (0..grid.rows().0 as u32)
        .map(|y| {
            (0..grid.columns().0 as u32)
                .map(|x| {
                    let cell = Cell::new(x, y);
                    if cell == maze.start() {
                        'S'
                    } else if cell == maze.end() {
                        'E'
                    } else if grid.is_wall(cell) {
                        '#'
                    } else if blocked.contains(&cell) {
                        'x'
                    } else if on_path.contains(&cell) {
                        '.'
                    } else {
                        ' '
                    }
                })
                .join("")
        })
        .join("\n")
}

fn print_route_summary(maze: &Maze, path: Option<&pathing::Path>, blocked: &BlockedSet) {
    match path {
        Some(path) => println!("Shortest path: {} cells, {} steps", path.len(), path.len() - 1),
        None => println!("No path from {} to {}", maze.start(), maze.end()),
    }

    if let Some(distances) = Distances::for_maze(maze, maze.start(), blocked) {
        let furthest = distances.furthest_points().iter().join(" ");
        println!("Reachable from start: {} of {} passages, furthest {} steps at {}",
                 distances.reachable_count(),
                 maze.grid().passage_count(),
                 distances.max(),
                 furthest);
    }
}
