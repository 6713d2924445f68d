//! Score and life bookkeeping
//!
//! Every event the core emits passes through `Scoreboard::apply` before it
//! reaches the embedder, so score and lives never drift from the event log.

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState};

/// Per-run counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub fruits_sliced: u32,
    pub powerups_sliced: u32,
    pub fruits_missed: u32,
    pub bombs: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub score: u64,
    pub lives: u8,
    /// Highest final score seen by this process
    pub best_score: u64,
    pub stats: SessionStats,
}

impl Scoreboard {
    pub fn new(lives: u8) -> Self {
        Self {
            score: 0,
            lives,
            best_score: 0,
            stats: SessionStats::default(),
        }
    }

    /// Fresh run; best score carries over
    pub fn reset(&mut self, lives: u8) {
        self.score = 0;
        self.lives = lives;
        self.stats = SessionStats::default();
    }

    pub fn apply(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Sliced { points, .. } => {
                self.score = self.score.saturating_add(u64::from(*points));
                self.stats.fruits_sliced += 1;
            }
            GameEvent::PowerupSliced { .. } => self.stats.powerups_sliced += 1,
            GameEvent::LifeLost { .. } => {
                self.lives = self.lives.saturating_sub(1);
                self.stats.fruits_missed += 1;
            }
            GameEvent::GameEnded { final_score } => {
                self.best_score = self.best_score.max(*final_score);
            }
            GameEvent::PowerupExpired { .. } => {}
        }
    }

    pub fn is_out_of_lives(&self) -> bool {
        self.lives == 0
    }
}

impl GameState {
    /// Record an event on the scoreboard and queue it for the embedder
    pub(crate) fn emit(&mut self, events: &mut Vec<GameEvent>, event: GameEvent) {
        self.scoreboard.apply(&event);
        events.push(event);
    }

    pub fn best_score(&self) -> u64 {
        self.scoreboard.best_score
    }
}
