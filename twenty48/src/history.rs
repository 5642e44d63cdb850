use crate::Grid;

/// The state saved before a move, to be restored by a rollback.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Checkpoint {
    pub grid: Grid,
    pub score: u64,
}

/// The undo stack.
///
/// Entries are copies, so changing the live grid after a push never affects
/// what was saved. There is no depth limit.
#[derive(Clone, Debug, Default)]
pub struct History {
    checkpoints: Vec<Checkpoint>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, grid: &Grid, score: u64) {
        self.checkpoints.push(Checkpoint { grid: *grid, score });
    }

    pub fn pop(&mut self) -> Option<Checkpoint> {
        self.checkpoints.pop()
    }

    /// The most recent checkpoint.
    pub fn peek(&self) -> Option<&Checkpoint> {
        self.checkpoints.last()
    }

    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    pub fn clear(&mut self) {
        self.checkpoints.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile;

    #[test]
    fn checkpoints_are_independent_of_the_live_grid() {
        let mut history = History::new();
        let mut grid = Grid::default();
        grid.set(0, 0, tile!(2));
        history.push(&grid, 10);

        grid.set(0, 0, tile!(4));
        grid.set(3, 3, tile!(8));

        let checkpoint = history.pop().unwrap();
        assert_eq!(checkpoint.grid.get(0, 0), tile!(2));
        assert!(checkpoint.grid.get(3, 3).is_empty());
        assert_eq!(checkpoint.score, 10);
    }

    #[test]
    fn last_in_first_out() {
        let mut history = History::new();
        history.push(&Grid::default(), 1);
        history.push(&Grid::default(), 2);
        assert_eq!(history.peek().map(|c| c.score), Some(2));
        assert_eq!(history.pop().map(|c| c.score), Some(2));
        assert_eq!(history.pop().map(|c| c.score), Some(1));
        assert_eq!(history.pop(), None);
        assert!(history.is_empty());
    }
}
