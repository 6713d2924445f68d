//! Power-up effects
//!
//! Timed effects modulate the whole simulation: Freeze and Slow scale every
//! kinematic delta, Double scales slice points. Bomb has no duration and
//! resolves on the spot.

use serde::{Deserialize, Serialize};

use super::slice::spawn_burst;
use super::state::{ActivePowerup, EntityKind, GameEvent, GameState, PowerupKind};
use crate::tuning::Tuning;

/// Set of running timed power-ups, at most one entry per kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Effects {
    active: Vec<ActivePowerup>,
}

impl Effects {
    pub fn active(&self) -> &[ActivePowerup] {
        &self.active
    }

    pub fn get(&self, kind: PowerupKind) -> Option<&ActivePowerup> {
        self.active.iter().find(|p| p.kind == kind)
    }

    pub fn is_active(&self, kind: PowerupKind) -> bool {
        self.get(kind).is_some()
    }

    /// Start or refresh a timed effect. Refreshing replaces the end time.
    pub fn insert(&mut self, kind: PowerupKind, end_time: f64) {
        self.active.retain(|p| p.kind != kind);
        self.active.push(ActivePowerup { kind, end_time });
    }

    /// Drop effects whose end time has passed, returning their kinds
    pub fn purge(&mut self, now: f64) -> Vec<PowerupKind> {
        let mut expired = Vec::new();
        self.active.retain(|p| {
            if p.end_time <= now {
                expired.push(p.kind);
                false
            } else {
                true
            }
        });
        expired
    }

    /// Kinematic scale for this tick. Freeze beats Slow.
    pub fn time_scale(&self, tuning: &Tuning) -> f32 {
        if self.is_active(PowerupKind::Freeze) {
            0.0
        } else if self.is_active(PowerupKind::Slow) {
            tuning.slow_time_scale
        } else {
            1.0
        }
    }

    pub fn multiplier(&self, tuning: &Tuning) -> u32 {
        if self.is_active(PowerupKind::Double) {
            tuning.double_multiplier
        } else {
            1
        }
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}

/// Duration of a timed power-up; `None` for Bomb
pub fn duration_ms(tuning: &Tuning, kind: PowerupKind) -> Option<f64> {
    match kind {
        PowerupKind::Slow => Some(tuning.durations.slow_ms),
        PowerupKind::Double => Some(tuning.durations.double_ms),
        PowerupKind::Freeze => Some(tuning.durations.freeze_ms),
        PowerupKind::Bomb => None,
    }
}

/// Drop effects that ran out by `now`, emitting `PowerupExpired` for each
pub(crate) fn expire(state: &mut GameState, now: f64, events: &mut Vec<GameEvent>) {
    for kind in state.effects.purge(now) {
        log::debug!("{} expired", kind.name());
        state.emit(events, GameEvent::PowerupExpired { kind });
    }
}

/// Apply a power-up, returning any events it produced
///
/// Stale effects are expired first, so a Double that ran out between ticks
/// does not double a bomb's payout.
pub fn activate(state: &mut GameState, kind: PowerupKind, now: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    expire(state, now, &mut events);
    match duration_ms(&state.tuning, kind) {
        Some(duration) => {
            log::debug!("{} active until {}", kind.name(), now + duration);
            state.effects.insert(kind, now + duration);
        }
        None => detonate_bomb(state, now, &mut events),
    }
    events
}

/// Slice every live fruit at once
fn detonate_bomb(state: &mut GameState, now: f64, events: &mut Vec<GameEvent>) {
    let points = state
        .tuning
        .base_slice_value
        .saturating_mul(state.multiplier());
    let mut hits = Vec::new();
    for fruit in state.fruits.iter_mut().filter(|f| !f.sliced) {
        fruit.mark_sliced(now);
        hits.push((fruit.id, fruit.kind, fruit.pos));
    }
    log::debug!("Bomb sliced {} fruit", hits.len());

    state.scoreboard.stats.bombs += 1;
    for (id, kind, pos) in hits {
        spawn_burst(state, pos, kind.color());
        state.emit(
            events,
            GameEvent::Sliced {
                id,
                kind,
                points,
                at: now,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Fruit, FruitKind, GamePhase};
    use glam::Vec2;

    fn playing() -> GameState {
        let mut state = GameState::new(Tuning::default(), 3);
        state.phase = GamePhase::Playing;
        state
    }

    fn add_fruit(state: &mut GameState, x: f32) -> u32 {
        let id = state.next_entity_id();
        state.fruits.push(Fruit::new(
            id,
            FruitKind::Apple,
            Vec2::new(x, 300.0),
            Vec2::ZERO,
            40.0,
        ));
        id
    }

    #[test]
    fn test_refresh_not_stack() {
        let mut state = playing();
        activate(&mut state, PowerupKind::Double, 1000.0);
        activate(&mut state, PowerupKind::Double, 4000.0);

        let doubles: Vec<_> = state
            .effects()
            .iter()
            .filter(|p| p.kind == PowerupKind::Double)
            .collect();
        assert_eq!(doubles.len(), 1);
        assert_eq!(doubles[0].end_time, 14000.0);
    }

    #[test]
    fn test_freeze_dominates_slow() {
        let tuning = Tuning::default();
        let mut effects = Effects::default();
        effects.insert(PowerupKind::Slow, 10_000.0);
        assert_eq!(effects.time_scale(&tuning), 0.3);
        effects.insert(PowerupKind::Freeze, 10_000.0);
        assert_eq!(effects.time_scale(&tuning), 0.0);
    }

    #[test]
    fn test_multiplier_follows_double() {
        let tuning = Tuning::default();
        let mut effects = Effects::default();
        assert_eq!(effects.multiplier(&tuning), 1);
        effects.insert(PowerupKind::Double, 500.0);
        assert_eq!(effects.multiplier(&tuning), 2);
        effects.purge(500.0);
        assert_eq!(effects.multiplier(&tuning), 1);
    }

    #[test]
    fn test_purge_is_inclusive_of_end_time() {
        let mut effects = Effects::default();
        effects.insert(PowerupKind::Slow, 1000.0);
        effects.insert(PowerupKind::Freeze, 2000.0);

        assert!(effects.purge(999.0).is_empty());
        assert_eq!(effects.purge(1000.0), vec![PowerupKind::Slow]);
        assert_eq!(effects.active().len(), 1);
    }

    #[test]
    fn test_durations_per_kind() {
        let mut state = playing();
        activate(&mut state, PowerupKind::Slow, 0.0);
        activate(&mut state, PowerupKind::Freeze, 0.0);
        assert_eq!(state.effects.get(PowerupKind::Slow).unwrap().end_time, 8000.0);
        assert_eq!(state.effects.get(PowerupKind::Freeze).unwrap().end_time, 6000.0);
    }

    #[test]
    fn test_bomb_mass_slice() {
        let mut state = playing();
        state.effects.insert(PowerupKind::Double, 60_000.0);
        for x in [100.0, 300.0, 500.0] {
            add_fruit(&mut state, x);
        }

        let events = activate(&mut state, PowerupKind::Bomb, 2000.0);

        assert!(state.fruits.iter().all(|f| f.sliced && f.slice_time == Some(2000.0)));
        assert_eq!(events.len(), 3);
        assert!(events
            .iter()
            .all(|e| matches!(e, GameEvent::Sliced { points: 20, .. })));
        assert!(!state.effects.is_active(PowerupKind::Bomb));
        assert_eq!(state.effects().len(), 1);
        assert_eq!(state.score(), 60);
        assert_eq!(state.particles.len(), 3 * state.tuning.particles_per_slice);
    }

    #[test]
    fn test_bomb_skips_already_sliced() {
        let mut state = playing();
        add_fruit(&mut state, 100.0);
        add_fruit(&mut state, 200.0);
        state.fruits[0].mark_sliced(10.0);

        let events = activate(&mut state, PowerupKind::Bomb, 50.0);
        assert_eq!(events.len(), 1);
        assert_eq!(state.fruits[0].slice_time, Some(10.0));
    }

    #[test]
    fn test_lapsed_double_does_not_boost_bomb() {
        let mut state = playing();
        state.effects.insert(PowerupKind::Double, 10_000.0);
        let id = add_fruit(&mut state, 100.0);

        let events = activate(&mut state, PowerupKind::Bomb, 10_500.0);
        assert_eq!(
            events,
            vec![
                GameEvent::PowerupExpired {
                    kind: PowerupKind::Double
                },
                GameEvent::Sliced {
                    id,
                    kind: FruitKind::Apple,
                    points: 10,
                    at: 10_500.0,
                },
            ]
        );
        assert!(state.effects().is_empty());
        assert_eq!(state.score(), 10);
    }

    #[test]
    fn test_activation_expires_other_stale_effects() {
        let mut state = playing();
        state.effects.insert(PowerupKind::Freeze, 500.0);
        let events = activate(&mut state, PowerupKind::Slow, 800.0);
        assert_eq!(
            events,
            vec![GameEvent::PowerupExpired {
                kind: PowerupKind::Freeze
            }]
        );
        assert_eq!(state.effects().len(), 1);
        assert!(state.effects.is_active(PowerupKind::Slow));
    }

    #[test]
    fn test_huge_slice_value_saturates() {
        let mut state = playing();
        state.tuning.base_slice_value = u32::MAX;
        state.effects.insert(PowerupKind::Double, 1e9);
        add_fruit(&mut state, 100.0);
        let events = activate(&mut state, PowerupKind::Bomb, 0.0);
        assert!(matches!(events[0], GameEvent::Sliced { points: u32::MAX, .. }));
    }
}
