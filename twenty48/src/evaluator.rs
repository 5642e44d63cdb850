use tracing::debug;

use crate::{Direction, GameState};

/// How good a move looked when it was tried out.
///
/// Moves are ranked by the number of empty cells they leave, then by the
/// score they reach. A move that changes nothing gets the sentinel `(-1, 0)`,
/// which ranks below every real move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveEfficiency {
    pub direction: Direction,
    pub empty_tiles: i32,
    pub score: u64,
}

impl MoveEfficiency {
    pub fn invalid(direction: Direction) -> Self {
        Self {
            direction,
            empty_tiles: -1,
            score: 0,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.empty_tiles >= 0
    }

    /// The key that moves are compared by. Larger is better.
    pub fn rank(&self) -> (i32, u64) {
        (self.empty_tiles, self.score)
    }
}

/// Picks the best move. On ties, the one that comes first wins.
pub fn best_move(candidates: &[MoveEfficiency]) -> Option<MoveEfficiency> {
    let mut best: Option<MoveEfficiency> = None;
    for &candidate in candidates {
        match best {
            Some(b) if b.rank() >= candidate.rank() => {}
            _ => best = Some(candidate),
        }
    }
    best
}

/// A move that has been played on the live game, but can still be taken back.
///
/// A trial ends either with [`Self::commit()`], which keeps the move, or with
/// [`Self::abort()`], which rolls it back. Dropping a trial aborts it.
///
/// Aborting restores the grid and score. Like any rollback, it does not
/// lower the game's largest tile.
pub struct Trial<'a> {
    game: &'a mut GameState,
    direction: Direction,
    /// History length before the move was played
    depth: usize,
    open: bool,
}

impl<'a> Trial<'a> {
    fn begin(game: &'a mut GameState, direction: Direction) -> Self {
        let depth = game.history.len();
        game.apply(direction);
        Self {
            game,
            direction,
            depth,
            open: true,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The game as it is with the move applied.
    pub fn game(&self) -> &GameState {
        self.game
    }

    /// Does the grid differ from the checkpoint saved for this move?
    pub fn changed(&self) -> bool {
        self.game
            .history
            .peek()
            .map_or(false, |checkpoint| checkpoint.grid != self.game.grid)
    }

    pub fn efficiency(&self) -> MoveEfficiency {
        if self.changed() {
            let empty_tiles = i32::try_from(self.game.grid.num_empty()).unwrap_or(i32::MAX);
            MoveEfficiency {
                direction: self.direction,
                empty_tiles,
                score: self.game.score,
            }
        } else {
            MoveEfficiency::invalid(self.direction)
        }
    }

    /// Keeps the move, including its history entry.
    pub fn commit(mut self) {
        self.game.refresh_flags();
        self.open = false;
    }

    pub fn abort(mut self) {
        self.rewind();
        self.open = false;
    }

    fn rewind(&mut self) {
        while self.game.history.len() > self.depth {
            self.game.restore_last();
        }
    }
}

impl<'a> Drop for Trial<'a> {
    fn drop(&mut self) {
        if self.open {
            self.rewind();
        }
    }
}

impl GameState {
    /// Plays `direction` tentatively. See [`Trial`].
    pub fn begin_trial(&mut self, direction: Direction) -> Trial<'_> {
        Trial::begin(self, direction)
    }

    /// Tries out `direction` and rolls it back again.
    ///
    /// Note that this consumes randomness for the spawned tile.
    pub fn move_efficiency(&mut self, direction: Direction) -> MoveEfficiency {
        let trial = self.begin_trial(direction);
        let efficiency = trial.efficiency();
        trial.abort();
        efficiency
    }

    /// Tries out every direction, in the order of [`Direction::ALL`].
    pub fn evaluate_moves(&mut self) -> [MoveEfficiency; 4] {
        Direction::ALL.map(|direction| self.move_efficiency(direction))
    }

    /// Plays the direction that leaves the most empty cells, breaking ties by
    /// score and then by the order of [`Direction::ALL`].
    ///
    /// If no direction changes the grid, the first one is played anyway.
    pub fn auto_move(&mut self) -> Direction {
        let efficiencies = self.evaluate_moves();
        let direction = best_move(&efficiencies)
            .map(|best| best.direction)
            .unwrap_or(Direction::Left);
        debug!(?efficiencies, %direction, "Auto move");
        self.begin_trial(direction).commit();
        direction
    }
}
