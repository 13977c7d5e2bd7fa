//! Score tracking for the current session
//!
//! Only the best score survives between runs, and only in memory.

use serde::{Deserialize, Serialize};

/// Session best score plus a tally of finished runs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    best: u32,
    runs_finished: u32,
    last_score: Option<u32>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn runs_finished(&self) -> u32 {
        self.runs_finished
    }

    /// Final score of the most recent finished run
    pub fn last_score(&self) -> Option<u32> {
        self.last_score
    }

    /// Whether `score` would beat the current best
    pub fn is_new_best(&self, score: u32) -> bool {
        score > self.best
    }

    /// Record a finished run; returns true if it set a new best
    pub fn finish_run(&mut self, score: u32) -> bool {
        let new_best = self.is_new_best(score);
        self.best = self.best.max(score);
        self.runs_finished += 1;
        self.last_score = Some(score);
        new_best
    }
}
