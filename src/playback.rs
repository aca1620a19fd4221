use crate::cells::Cell;
use crate::pathing::Path;

/// What one `advance` call produced: the cells revealed so far and whether the whole
/// path is now showing.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub struct PlaybackStep<'a> {
    pub revealed: &'a [Cell],
    pub finished: bool,
}

/// Reveals a found path one cell at a time.
///
/// There is no timing in here: whatever drives the display (a timer, a frame loop, a key press)
/// calls `advance` at its own pace.
#[derive(Debug, Default, Clone)]
pub struct PlaybackSequencer {
    path: Path,
    cursor: usize,
    revealed: Vec<Cell>,
}

impl PlaybackSequencer {
    pub fn new() -> PlaybackSequencer {
        PlaybackSequencer::default()
    }

    /// Begin revealing `path` from its first cell, dropping any reveal in progress.
    pub fn start(&mut self, path: Path) {
        self.revealed = Vec::with_capacity(path.len());
        self.path = path;
        self.cursor = 0;
    }

    /// Reveal the next cell. Once everything is revealed further calls change nothing.
    pub fn advance(&mut self) -> PlaybackStep {
        if let Some(&cell) = self.path.get(self.cursor) {
            self.revealed.push(cell);
            self.cursor += 1;
        }
        PlaybackStep {
            revealed: &self.revealed,
            finished: self.is_finished(),
        }
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.path.len()
    }

    #[inline]
    pub fn revealed(&self) -> &[Cell] {
        &self.revealed
    }

    /// The full path being revealed.
    #[inline]
    pub fn path(&self) -> &[Cell] {
        &self.path
    }

    /// Forget the path and everything revealed.
    pub fn clear(&mut self) {
        self.start(Vec::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    fn line(length: u32) -> Path {
        (0..length).map(|x| Cell::new(x, 0)).collect()
    }

    #[test]
    fn empty_path_is_finished_immediately() {
        let mut playback = PlaybackSequencer::new();
        playback.start(Vec::new());
        assert!(playback.is_finished());
        let step = playback.advance();
        assert!(step.finished);
        assert!(step.revealed.is_empty());
    }

    #[test]
    fn new_sequencer_has_nothing_to_show() {
        let mut playback = PlaybackSequencer::new();
        assert!(playback.is_finished());
        assert!(playback.advance().revealed.is_empty());
    }

    #[test]
    fn reveals_one_cell_per_advance() {
        let path = line(3);
        let mut playback = PlaybackSequencer::new();
        playback.start(path.clone());

        let first = playback.advance();
        assert_eq!(first.revealed, &path[..1]);
        assert!(!first.finished);

        assert_eq!(playback.advance().revealed, &path[..2]);

        let last = playback.advance();
        assert_eq!(last.revealed, &path[..]);
        assert!(last.finished);

        let after = playback.advance();
        assert_eq!(after.revealed, &path[..]);
        assert!(after.finished);
    }

    #[test]
    fn restarting_discards_the_previous_reveal() {
        let mut playback = PlaybackSequencer::new();
        playback.start(line(5));
        playback.advance();
        playback.advance();

        let other = vec![Cell::new(9, 9), Cell::new(9, 8)];
        playback.start(other.clone());
        assert!(playback.revealed().is_empty());
        assert_eq!(playback.path(), &other[..]);
        assert_eq!(playback.advance().revealed, &other[..1]);
    }

    #[test]
    fn clear_forgets_everything() {
        let mut playback = PlaybackSequencer::new();
        playback.start(line(4));
        playback.advance();
        playback.clear();
        assert!(playback.is_finished());
        assert!(playback.revealed().is_empty());
        assert!(playback.path().is_empty());
    }

    #[test]
    fn quickcheck_k_advances_reveal_a_k_cell_path() {
        fn p(length: u8) -> bool {
            let path = line(length as u32);
            let mut playback = PlaybackSequencer::new();
            playback.start(path.clone());
            for i in 1..=path.len() {
                if playback.is_finished() {
                    return false;
                }
                let step = playback.advance();
                if step.revealed != &path[..i] || step.finished != (i == path.len()) {
                    return false;
                }
            }
            playback.is_finished()
        }
        quickcheck(p as fn(u8) -> bool)
    }
}
