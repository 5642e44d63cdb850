use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use twenty48::{Command, GameView};

pub struct Recorder {
    num: usize,
    directory: PathBuf,
    steps: Vec<RecordedStep>,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            steps: Vec::new(),
        })
    }

    pub fn store_step(&mut self, command: Command, view: GameView) {
        self.steps.push(RecordedStep { command, view });
    }

    /// Writes the steps stored since the last call to `game_<num>.json` and
    /// returns the path of that file.
    pub fn write_game_recording(&mut self, seed: u64) -> anyhow::Result<PathBuf> {
        let filepath = self.directory.join(format!("game_{:0>6}.json", self.num));
        let writer = BufWriter::new(File::create(&filepath)?);
        let recording = GameRecording {
            seed,
            steps: std::mem::take(&mut self.steps),
        };
        serde_json::to_writer_pretty(writer, &recording)?;
        self.num += 1;
        Ok(filepath)
    }
}

#[derive(Serialize, Deserialize)]
pub struct GameRecording {
    /// Seed of the game's own random source.
    pub seed: u64,
    pub steps: Vec<RecordedStep>,
}

#[derive(Serialize, Deserialize)]
pub struct RecordedStep {
    pub command: Command,
    /// The state after the command.
    pub view: GameView,
}
