//! Read-only view for renderers
//!
//! Taking a snapshot never touches the simulation, so two snapshots between
//! the same pair of ticks are identical.

use serde::{Deserialize, Serialize};

use super::scoring::SessionStats;
use super::state::{ActivePowerup, Fruit, GamePhase, GameState, Particle, Powerup, SlashTrail};

/// Heads-up display numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u64,
    pub best_score: u64,
    pub lives: u8,
    pub multiplier: u32,
    pub phase: GamePhase,
    pub stats: SessionStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub hud: Hud,
    pub fruits: Vec<Fruit>,
    pub powerups: Vec<Powerup>,
    pub particles: Vec<Particle>,
    pub trails: Vec<SlashTrail>,
    pub effects: Vec<ActivePowerup>,
    pub canvas: (f32, f32),
}

impl Snapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl GameState {
    pub fn hud(&self) -> Hud {
        Hud {
            score: self.scoreboard.score,
            best_score: self.scoreboard.best_score,
            lives: self.scoreboard.lives,
            multiplier: self.multiplier(),
            phase: self.phase,
            stats: self.scoreboard.stats,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            hud: self.hud(),
            fruits: self.fruits.clone(),
            powerups: self.powerups.clone(),
            particles: self.particles.clone(),
            trails: self.trails.clone(),
            effects: self.effects.active().to_vec(),
            canvas: (self.tuning.canvas_width, self.tuning.canvas_height),
        }
    }
}
