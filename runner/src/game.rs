use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;
use twenty48::{execute_command, CommandOutcome, GameState, Tile};

use crate::Config;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    Won,
    Lost,
    /// The game was stopped after [`Config::max_moves`] commands.
    MoveLimitReached,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameReport {
    pub result: GameResult,
    pub score: u64,
    pub max_tile: Tile,
    pub moves: usize,
    /// Seed of the game's own random source, for replaying it.
    pub seed: u64,
}

/// Plays one game until it is won, lost, or runs into the move limit.
///
/// Returns an error only when the recording cannot be written.
pub fn play_game(config: &mut Config) -> anyhow::Result<GameReport> {
    let seed: u64 = config.rng.gen();
    let mut state = GameState::with_winning_tile(StdRng::seed_from_u64(seed), config.winning_tile);
    let command = config.strategy.command();

    let mut moves = 0;
    let result = loop {
        if state.is_won() {
            break GameResult::Won;
        }
        if moves >= config.max_moves {
            break GameResult::MoveLimitReached;
        }
        match execute_command(&mut state, command) {
            CommandOutcome::Applied => {
                moves += 1;
                if let Some(recorder) = &mut config.recorder {
                    recorder.store_step(command, state.view(true));
                }
            }
            // Only happens once the game is over
            CommandOutcome::Suppressed => {
                if state.is_won() {
                    break GameResult::Won;
                }
                break GameResult::Lost;
            }
        }
    };

    if let Some(recorder) = &mut config.recorder {
        let path = recorder.write_game_recording(seed)?;
        debug!(path = %path.display(), "Wrote game recording");
    }

    Ok(GameReport {
        result,
        score: state.score(),
        max_tile: state.max_tile(),
        moves,
        seed,
    })
}
