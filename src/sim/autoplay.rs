//! Idle/demo pilot
//!
//! Plays through the public stroke commands only, so a demo run exercises
//! the same path as a real pointer.

use glam::Vec2;

use super::state::{Fruit, GameEvent, GamePhase, GameState};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Autopilot {
    /// Swipe once every this many ticks
    pub swipe_every: u64,
    /// Half-length of each swipe (px)
    pub reach: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            swipe_every: 20,
            reach: 60.0,
        }
    }
}

impl Autopilot {
    /// The whole, visible fruit closest to falling out (falling and lowest)
    pub fn target<'a>(&self, state: &'a GameState) -> Option<&'a Fruit> {
        let bottom = state.tuning.canvas_height;
        state
            .fruits
            .iter()
            .filter(|f| !f.sliced && f.pos.y < bottom)
            .max_by(|a, b| {
                let danger_a = (a.vel.y > 0.0, a.pos.y);
                let danger_b = (b.vel.y > 0.0, b.pos.y);
                danger_a
                    .partial_cmp(&danger_b)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    /// Swipe across the target on this tick if it is time to
    pub fn drive(&self, state: &mut GameState, now: f64) -> Vec<GameEvent> {
        if state.phase != GamePhase::Playing
            || self.swipe_every == 0
            || !state.time_ticks.is_multiple_of(self.swipe_every)
        {
            return Vec::new();
        }
        let Some(center) = self.target(state).map(|f| f.pos) else {
            return Vec::new();
        };

        // Alternate swipe direction for variety
        let sign = if (state.time_ticks / self.swipe_every).is_multiple_of(2) {
            1.0
        } else {
            -1.0
        };
        let dir = Vec2::new(sign, -0.3).normalize() * self.reach;

        state.begin_stroke(center - dir, now);
        let events = state.move_stroke(center - dir, center + dir, now);
        state.end_stroke();
        events
    }
}
