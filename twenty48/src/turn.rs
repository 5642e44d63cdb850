use serde::{Deserialize, Serialize};

use crate::{Direction, GameState};

/// A single input to the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Reset,
    Move(Direction),
    Rollback,
    RandomMove,
    AutoMove,
}

/// Summarizes the outcome of a command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    /// The game is already won or lost. Only a reset is accepted then.
    Suppressed,
}

/// Carries out one command the way an interactive front end would.
///
/// A reset is always accepted. Everything else is only carried out while the
/// game is neither won nor lost; before deciding, a grid on which nothing can
/// move is marked as lost.
pub fn execute_command(state: &mut GameState, command: Command) -> CommandOutcome {
    match command {
        Command::Reset => state.reset(),
        _ if !still_playing(state) => return CommandOutcome::Suppressed,
        Command::Move(direction) => {
            state.play(direction);
        }
        Command::Rollback => {
            state.rollback();
        }
        Command::RandomMove => {
            state.random_move();
        }
        Command::AutoMove => {
            state.auto_move();
        }
    }
    CommandOutcome::Applied
}

/// Marks a stuck grid as lost, then says whether the game is still going.
fn still_playing(state: &mut GameState) -> bool {
    if !state.can_move() {
        state.mark_lost();
    }
    !state.is_won() && !state.is_lost()
}
