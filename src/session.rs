//! The state an interactive maze front end keeps between user actions.
//!
//! A session owns the current maze, the cells the user has blocked, the most recent search
//! results and the playback of whichever path is being shown. Replacing the maze or moving an
//! endpoint throws the old results away. Drawing, input and dialogs stay with the front end,
//! which reads everything it needs through the accessors here.

use log::info;
use rand::Rng;
use std::path::Path as FsPath;

use crate::cells::Cell;
use crate::enumeration::{all_paths_with, PathSet};
use crate::errors::*;
use crate::generators::{self, GenerationWarning};
use crate::maze::{Endpoint, Maze};
use crate::pathing::{empty_blocked_set, find_path, BlockedSet, Path};
use crate::playback::{PlaybackSequencer, PlaybackStep};
use crate::units::{ColumnsCount, RowsCount};

/// Result of asking for the next enumerated path.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum NextPath {
    /// Path `index` (0 based) of `total` is now playing back.
    Showing { index: usize, total: usize },
    /// The last of `total` paths is already showing.
    Exhausted { total: usize },
    /// Start and end are not connected.
    NoPaths,
}

#[derive(Debug)]
pub struct MazeSession {
    maze: Maze,
    blocked: BlockedSet,
    found: Option<Path>,
    path_set: Option<PathSet>,
    path_index: Option<usize>,
    playback: PlaybackSequencer,
}

impl MazeSession {
    pub fn new(maze: Maze) -> MazeSession {
        MazeSession {
            maze,
            blocked: empty_blocked_set(),
            found: None,
            path_set: None,
            path_index: None,
            playback: PlaybackSequencer::new(),
        }
    }

    #[inline]
    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    #[inline]
    pub fn blocked(&self) -> &BlockedSet {
        &self.blocked
    }

    /// The path from the last `shortest_path` or `find_path` call, if it found one.
    #[inline]
    pub fn found_path(&self) -> Option<&Path> {
        self.found.as_ref()
    }

    #[inline]
    pub fn path_set(&self) -> Option<&PathSet> {
        self.path_set.as_ref()
    }

    /// Index into `path_set` of the path being shown by `next_path`.
    #[inline]
    pub fn path_index(&self) -> Option<usize> {
        self.path_index
    }

    #[inline]
    pub fn playback(&self) -> &PlaybackSequencer {
        &self.playback
    }

    /// Replace the maze with a freshly generated one.
    pub fn regenerate<R: Rng>(&mut self,
                              rows: RowsCount,
                              columns: ColumnsCount,
                              rng: &mut R)
                              -> Result<Option<GenerationWarning>> {
        let generated = generators::prim(rows, columns, rng)?;
        self.replace_maze(generated.maze);
        info!("Maze generated");
        Ok(generated.warning)
    }

    /// Replace the maze with one parsed from text. On failure the current maze is kept.
    pub fn load_text(&mut self, text: &str) -> Result<()> {
        let maze = Maze::from_text(text)?;
        self.replace_maze(maze);
        info!("Maze loaded");
        Ok(())
    }

    pub fn load_file<P: AsRef<FsPath>>(&mut self, path: P) -> Result<()> {
        let maze = Maze::load(path)?;
        self.replace_maze(maze);
        info!("Maze loaded");
        Ok(())
    }

    fn replace_maze(&mut self, maze: Maze) {
        self.maze = maze;
        self.clear_paths();
    }

    /// Move the start or end. Results found for the old endpoints are dropped.
    pub fn set_endpoint(&mut self, which: Endpoint, cell: Cell) -> Result<()> {
        self.maze.set_endpoint(which, cell)?;
        self.clear_results();
        info!("{:?} point set to {}", which, cell);
        Ok(())
    }

    /// Treat `cell` as a wall in later searches. Returns false if it was already blocked.
    /// Results found with the old blocked set are dropped.
    pub fn block(&mut self, cell: Cell) -> bool {
        let changed = self.blocked.insert(cell);
        if changed {
            self.clear_results();
        }
        changed
    }

    pub fn unblock(&mut self, cell: Cell) -> bool {
        let changed = self.blocked.remove(&cell);
        if changed {
            self.clear_results();
        }
        changed
    }

    /// Forget blocked cells, search results and playback.
    pub fn clear_paths(&mut self) {
        self.blocked.clear();
        self.clear_results();
    }

    fn clear_results(&mut self) {
        self.found = None;
        self.path_set = None;
        self.path_index = None;
        self.playback.clear();
    }

    /// Search for the shortest route and keep it as the found path, without playback.
    pub fn shortest_path(&mut self) -> Result<Option<Path>> {
        self.clear_results();
        self.found = find_path(&self.maze, &self.blocked)?;
        match self.found {
            Some(ref path) => info!("Found the shortest path, {} cells", path.len()),
            None => info!("No path between {} and {}", self.maze.start(), self.maze.end()),
        }
        Ok(self.found.clone())
    }

    /// `shortest_path`, then start playing the route back.
    pub fn find_path(&mut self) -> Result<Option<Path>> {
        let found = self.shortest_path()?;
        if let Some(ref path) = found {
            self.playback.start(path.clone());
        }
        Ok(found)
    }

    /// Step through every path from start to end, shortest first, playing each one back.
    ///
    /// The first call enumerates the paths; later calls move on to the next one until the
    /// set is used up.
    pub fn next_path(&mut self) -> NextPath {
        let shown = match self.path_set {
            Some(ref set) => self.path_index.map(|index| (index, set.len())),
            None => None,
        };

        let next_index = match shown {
            Some((index, total)) => {
                if index + 1 >= total {
                    info!("Already showing the last path of {}", total);
                    return NextPath::Exhausted { total };
                }
                index + 1
            }
            None => {
                self.clear_results();
                let set = all_paths_with(&self.maze, &self.blocked, None);
                if set.is_empty() {
                    info!("No path between {} and {}", self.maze.start(), self.maze.end());
                    return NextPath::NoPaths;
                }
                self.path_set = Some(set);
                0
            }
        };

        let picked = self.path_set
            .as_ref()
            .and_then(|set| set.get(next_index).map(|path| (path.clone(), set.len())));
        let (path, total) = match picked {
            Some(picked) => picked,
            None => return NextPath::NoPaths,
        };
        info!("Showing path {} of {}, {} cells", next_index + 1, total, path.len());
        self.path_index = Some(next_index);
        self.playback.start(path);
        NextPath::Showing { index: next_index, total }
    }

    /// Reveal the next cell of whichever path is playing back.
    pub fn advance_playback(&mut self) -> PlaybackStep {
        self.playback.advance()
    }
}
