//! Per-tick schedule and run lifecycle
//!
//! One `tick` per display refresh: expire effects, integrate at the
//! resulting time scale, roll spawns, then check for game over.

use super::effects::expire;
use super::integrate::integrate;
use super::spawn::{try_spawn_fruit, try_spawn_powerup};
use super::state::{GameEvent, GamePhase, GameState};

impl GameState {
    /// Begin a fresh run from NotStarted or Ended (restarts a run in progress too)
    pub fn start(&mut self) {
        self.clear_field();
        self.scoreboard.reset(self.tuning.starting_lives);
        self.time_ticks = 0;
        self.phase = GamePhase::Playing;
        log::info!(
            "Run started with {} lives (best {})",
            self.scoreboard.lives,
            self.scoreboard.best_score
        );
    }

    /// Advance one tick at wall-clock `now` (ms)
    pub fn advance(&mut self, now: f64) -> Vec<GameEvent> {
        tick(self, now)
    }
}

/// Advance the game state by one tick
///
/// Does nothing outside `Playing`. The game-over check runs in the same
/// tick that takes the last life.
pub fn tick(state: &mut GameState, now: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Playing {
        return events;
    }
    assert!(now.is_finite(), "non-finite timestamp {now}");

    state.time_ticks += 1;

    expire(state, now, &mut events);

    let time_scale = state.effects.time_scale(&state.tuning);
    events.extend(integrate(state, time_scale, now));

    try_spawn_fruit(state);
    try_spawn_powerup(state);

    if state.scoreboard.is_out_of_lives() {
        state.phase = GamePhase::Ended;
        state.stroke = None;
        let final_score = state.scoreboard.score;
        state.emit(&mut events, GameEvent::GameEnded { final_score });
        log::info!(
            "Run ended after {} ticks: score {}, sliced {}, missed {}",
            state.time_ticks,
            final_score,
            state.scoreboard.stats.fruits_sliced,
            state.scoreboard.stats.fruits_missed
        );
    }

    events
}
