use rand::rngs::StdRng;
use rand::Rng;
use tracing::trace;

use crate::{Direction, GameView, Grid, History, Tile};

/// The tile whose creation wins the game, unless configured otherwise.
pub const DEFAULT_WINNING_TILE: Tile = Tile(2048);

/// The complete state of one game, plus the random source for spawning tiles.
///
/// All randomness comes from the [`StdRng`] handed in at construction, so a
/// game is reproducible from its seed.
#[derive(Clone, Debug)]
pub struct GameState {
    pub(crate) grid: Grid,
    pub(crate) score: u64,
    /// The largest tile ever created by a merge in this game.
    ///
    /// Rollbacks leave this alone.
    max_tile: Tile,
    pub(crate) history: History,
    won: bool,
    lost: bool,
    winning_tile: Tile,
    pub(crate) rng: StdRng,
}

impl GameState {
    /// Starts a new game with two random tiles.
    pub fn new(rng: StdRng) -> Self {
        Self::with_winning_tile(rng, DEFAULT_WINNING_TILE)
    }

    /// Starts a new game that is won by creating `winning_tile` instead of 2048.
    ///
    /// Panics if `winning_tile` is empty.
    pub fn with_winning_tile(rng: StdRng, winning_tile: Tile) -> Self {
        assert!(!winning_tile.is_empty(), "The winning tile must not be empty");
        let mut state = Self {
            grid: Grid::default(),
            score: 0,
            max_tile: Tile::EMPTY,
            history: History::new(),
            won: false,
            lost: false,
            winning_tile,
            rng,
        };
        state.reset();
        state
    }

    /// Continues from an arbitrary position with a score of zero.
    ///
    /// The largest tile on the grid counts as already created.
    pub fn from_grid(grid: Grid, rng: StdRng) -> Self {
        let mut state = Self::new(rng);
        state.grid = grid;
        state.max_tile = grid.max_tile();
        state.refresh_flags();
        state
    }

    /// Clears everything and places two random tiles on an empty grid.
    pub fn reset(&mut self) {
        self.grid = Grid::default();
        self.score = 0;
        self.max_tile = Tile::EMPTY;
        self.history.clear();
        self.won = false;
        self.lost = false;
        self.grid.spawn_tile(&mut self.rng);
        self.grid.spawn_tile(&mut self.rng);
    }

    /// Slides the tiles in `direction`, spawns a tile if anything changed,
    /// and updates the won and lost flags.
    ///
    /// The move is saved in the history even if nothing changed.
    /// Returns whether the grid changed.
    pub fn play(&mut self, direction: Direction) -> bool {
        let changed = self.apply(direction);
        self.refresh_flags();
        trace!(%direction, changed, score = self.score, "Played move");
        changed
    }

    /// Undoes the most recent move. Does nothing if there is no history.
    ///
    /// The largest tile and the won flag stay as they are.
    /// Returns whether there was anything to undo.
    pub fn rollback(&mut self) -> bool {
        let restored = self.restore_last();
        self.lost = !self.grid.can_move();
        restored
    }

    /// Plays a uniformly chosen direction.
    pub fn random_move(&mut self) -> Direction {
        let direction = Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())];
        self.play(direction);
        direction
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Row-major tile values, `0` meaning empty.
    pub fn values(&self) -> [[u32; crate::GRID_SIZE]; crate::GRID_SIZE] {
        self.grid.values()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn max_tile(&self) -> Tile {
        self.max_tile
    }

    pub fn winning_tile(&self) -> Tile {
        self.winning_tile
    }

    /// Has the winning tile been created?
    ///
    /// Checked as `max_tile >= winning_tile`. Merges only double, so the
    /// largest tile passes through the winning value and this equals an
    /// equality check on a fresh game. It also stays set after a rollback,
    /// until the next reset.
    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn is_lost(&self) -> bool {
        self.lost
    }

    pub fn can_move(&self) -> bool {
        self.grid.can_move()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn view(&self, applied: bool) -> GameView {
        GameView {
            grid: self.grid,
            score: self.score,
            max_tile: self.max_tile.value(),
            won: self.won,
            lost: self.lost,
            applied,
        }
    }

    pub(crate) fn mark_lost(&mut self) {
        self.lost = true;
    }

    /// The move itself, without touching the won and lost flags.
    pub(crate) fn apply(&mut self, direction: Direction) -> bool {
        // Saved once per move, before the grid is rotated for sliding
        self.save_state();
        let outcome = self.grid.slide(direction);
        self.score += outcome.points;
        self.max_tile = self.max_tile.max(outcome.highest_merge);
        if outcome.changed {
            self.grid.spawn_tile(&mut self.rng);
        }
        outcome.changed
    }

    /// Pushes a copy of the grid and the score onto the history.
    ///
    /// Every move does this on its own, exactly once.
    pub fn save_state(&mut self) {
        self.history.push(&self.grid, self.score);
    }

    /// Pops the latest checkpoint into the live grid and score, without
    /// touching any flags.
    pub(crate) fn restore_last(&mut self) -> bool {
        match self.history.pop() {
            Some(checkpoint) => {
                self.grid = checkpoint.grid;
                self.score = checkpoint.score;
                true
            }
            None => false,
        }
    }

    pub(crate) fn refresh_flags(&mut self) {
        self.lost = !self.grid.can_move();
        self.won |= self.max_tile >= self.winning_tile;
    }
}
