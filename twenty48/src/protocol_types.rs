use serde::{Deserialize, Serialize};

use crate::{Command, Grid};

/// One of the four logical moves.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// All directions, in the order in which auto-play evaluates them.
    ///
    /// On ties, auto-play prefers directions that come earlier in this list.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// How many clockwise quarter turns to apply before and after sliding left,
    /// so that sliding left is equivalent to sliding in this direction.
    pub(crate) fn quarter_turns(self) -> (usize, usize) {
        match self {
            Direction::Left => (0, 0),
            Direction::Right => (2, 2),
            Direction::Up => (3, 1),
            Direction::Down => (1, 3),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        };
        write!(f, "{}", name)
    }
}

/// Request sent to a game host, one JSON object per line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Start a fresh game.
    Reset,
    /// Slide all tiles in one direction.
    Move { direction: Direction },
    /// Undo the last move.
    Rollback,
    /// Slide in a uniformly chosen direction.
    RandomMove,
    /// Let the built-in heuristic pick the direction.
    AutoMove,
    /// Only report the current state.
    View,
    /// The host should shut down. There is no response.
    Bye,
}

impl Request {
    /// The game command this request stands for, if any.
    pub fn command(&self) -> Option<Command> {
        match *self {
            Request::Reset => Some(Command::Reset),
            Request::Move { direction } => Some(Command::Move(direction)),
            Request::Rollback => Some(Command::Rollback),
            Request::RandomMove => Some(Command::RandomMove),
            Request::AutoMove => Some(Command::AutoMove),
            Request::View | Request::Bye => None,
        }
    }
}

/// Everything a renderer needs to draw the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    /// Row-major tile values, `0` for empty cells.
    pub grid: Grid,
    pub score: u64,
    pub max_tile: u32,
    pub won: bool,
    pub lost: bool,
    /// Whether the last command was carried out. Always `true` for plain views.
    pub applied: bool,
}
