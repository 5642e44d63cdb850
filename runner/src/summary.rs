use std::collections::BTreeMap;

use crate::{GameReport, GameResult};

/// Aggregated results over many games.
#[derive(Default, Debug)]
pub struct Summary {
    pub won: usize,
    pub lost: usize,
    pub stopped: usize,
    pub total_score: u64,
    pub best_score: u64,
    /// How many games ended with each largest tile.
    pub max_tiles: BTreeMap<u32, usize>,
}

impl Summary {
    pub fn record(&mut self, report: &GameReport) {
        match report.result {
            GameResult::Won => self.won += 1,
            GameResult::Lost => self.lost += 1,
            GameResult::MoveLimitReached => self.stopped += 1,
        }
        self.total_score += report.score;
        self.best_score = self.best_score.max(report.score);
        *self.max_tiles.entry(report.max_tile.value()).or_insert(0) += 1;
    }

    pub fn num_games(&self) -> usize {
        self.won + self.lost + self.stopped
    }

    pub fn average_score(&self) -> f64 {
        if self.num_games() == 0 {
            0.0
        } else {
            self.total_score as f64 / self.num_games() as f64
        }
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let num_games = self.num_games().max(1) as f32;
        writeln!(
            f,
            "End result over {} games:\n- {} won ({:.1}%)\n- {} lost\n- {} stopped at the move limit",
            self.num_games(),
            self.won,
            self.won as f32 / num_games * 100.0,
            self.lost,
            self.stopped
        )?;
        writeln!(
            f,
            "Average score {:.1}, best score {}",
            self.average_score(),
            self.best_score
        )?;
        writeln!(f, "Largest tile reached:")?;
        for (tile, count) in self.max_tiles.iter().rev() {
            writeln!(
                f,
                " {:>6} | {:5.1}% ({})",
                tile,
                *count as f32 / num_games * 100.0,
                count
            )?;
        }
        Ok(())
    }
}
