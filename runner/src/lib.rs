mod game;
mod recording;
mod strategy;
mod summary;
pub use game::*;
pub use recording::*;
pub use strategy::*;
pub use summary::*;

/// Everything that stays the same across the games of one run.
pub struct Config {
    pub rng: rand::rngs::StdRng,
    pub recorder: Option<recording::Recorder>,
    pub strategy: Strategy,
    pub winning_tile: twenty48::Tile,
    /// Games still going after this many applied commands are stopped.
    pub max_moves: usize,
}
