pub use errors::*;
pub use evaluator::*;
pub use game::*;
pub use grid::*;
pub use history::*;
pub use protocol_types::*;
pub use tile::*;
pub use turn::*;

#[cfg(test)]
mod arbitrary;
mod errors;
mod evaluator;
mod game;
mod grid;
mod history;
mod protocol_types;
mod tile;
mod turn;
