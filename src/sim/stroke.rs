//! Pointer/touch stroke commands
//!
//! Input arrives already in canvas space. A stroke is press → moves →
//! release; only moves during a held stroke can slice.

use glam::Vec2;

use super::slice::test_slice;
use super::state::{GameEvent, GamePhase, GameState, SlashTrail};

impl GameState {
    /// Press: start a stroke at `point`
    pub fn begin_stroke(&mut self, point: Vec2, now: f64) {
        if self.phase != GamePhase::Playing {
            return;
        }
        assert!(point.is_finite(), "non-finite stroke point {point}");
        self.stroke = Some(point);
        self.trails.clear();
        self.trails.push(SlashTrail {
            points: vec![point],
            timestamp: now,
        });
    }

    /// Move from `prev` to `curr`; slices whatever the segment crosses.
    /// No-op unless a stroke is held.
    pub fn move_stroke(&mut self, prev: Vec2, curr: Vec2, now: f64) -> Vec<GameEvent> {
        if self.phase != GamePhase::Playing || self.stroke.is_none() {
            return Vec::new();
        }
        let events = test_slice(self, prev, curr, now);
        self.extend_trails(curr, now);
        self.stroke = Some(curr);
        events
    }

    /// Move from the last known stroke position to `curr`
    pub fn move_stroke_to(&mut self, curr: Vec2, now: f64) -> Vec<GameEvent> {
        match self.stroke {
            Some(prev) => self.move_stroke(prev, curr, now),
            None => Vec::new(),
        }
    }

    /// Release: the trail fades out on its own
    pub fn end_stroke(&mut self) {
        self.stroke = None;
    }

    /// Append `point` to every trail and open a new one, within the configured limits
    fn extend_trails(&mut self, point: Vec2, now: f64) {
        let max_points = self.tuning.trail_points;
        for trail in &mut self.trails {
            trail.points.push(point);
            if trail.points.len() > max_points {
                let excess = trail.points.len() - max_points;
                trail.points.drain(..excess);
            }
        }
        self.trails.push(SlashTrail {
            points: vec![point],
            timestamp: now,
        });
        if self.trails.len() > self.tuning.max_trails {
            let excess = self.trails.len() - self.tuning.max_trails;
            self.trails.drain(..excess);
        }
    }
}
