//! Swept slice detection
//!
//! A pointer move is tested as the whole segment travelled since the last
//! sample, not just its end point, so a fast blade cannot skip over a fruit
//! between two samples.

use glam::Vec2;
use rand::Rng;

use super::effects;
use super::state::{EntityKind, GameEvent, GameState, Particle};

/// Closest point to `point` on segment `a..b`, or `None` for a zero-length segment
pub fn closest_point_on_segment(point: Vec2, a: Vec2, b: Vec2) -> Option<Vec2> {
    let line_vec = b - a;
    let line_len_sq = line_vec.length_squared();
    if line_len_sq == 0.0 {
        return None;
    }

    let t = ((point - a).dot(line_vec) / line_len_sq).clamp(0.0, 1.0);
    Some(a + line_vec * t)
}

/// Whether segment `a..b` passes strictly inside the circle
pub fn segment_hits_circle(a: Vec2, b: Vec2, center: Vec2, radius: f32) -> bool {
    closest_point_on_segment(center, a, b)
        .map(|closest| closest.distance(center) < radius)
        .unwrap_or(false)
}

/// Emit a burst of particles at `pos`
pub(crate) fn spawn_burst(state: &mut GameState, pos: Vec2, color: u32) {
    for _ in 0..state.tuning.particles_per_slice {
        if state.particles.len() >= state.tuning.max_particles {
            break;
        }
        let vel = Vec2::new(
            (state.rng.random::<f32>() - 0.5) * 8.0,
            (state.rng.random::<f32>() - 0.5) * 8.0,
        );
        let max_life = state.rng.random::<f32>() * 25.0 + 15.0;
        state.particles.push(Particle {
            pos,
            vel,
            life: max_life,
            max_life,
            color,
        });
    }
}

/// Slice everything the blade crossed between `prev` and `curr`.
///
/// Every qualifying entity is sliced in insertion order, fruit first. Stale
/// effects are expired first; points then use the multiplier in force when
/// the call starts, so a Double sliced in the same sweep only pays out from
/// the next move on.
pub fn test_slice(state: &mut GameState, prev: Vec2, curr: Vec2, now: f64) -> Vec<GameEvent> {
    assert!(
        prev.is_finite() && curr.is_finite(),
        "non-finite blade segment {prev} -> {curr}"
    );
    assert!(now.is_finite(), "non-finite timestamp {now}");

    let mut events = Vec::new();
    if (curr - prev).length_squared() == 0.0 {
        return events;
    }

    effects::expire(state, now, &mut events);
    let points = state
        .tuning
        .base_slice_value
        .saturating_mul(state.multiplier());

    let mut fruit_hits = Vec::new();
    for fruit in state.fruits.iter_mut().filter(|f| !f.sliced) {
        if segment_hits_circle(prev, curr, fruit.pos, fruit.radius()) {
            fruit.mark_sliced(now);
            fruit_hits.push((fruit.id, fruit.kind, fruit.pos));
        }
    }

    let mut powerup_hits = Vec::new();
    for powerup in state.powerups.iter_mut().filter(|p| !p.sliced) {
        if segment_hits_circle(prev, curr, powerup.pos, powerup.radius()) {
            powerup.mark_sliced(now);
            powerup_hits.push((powerup.id, powerup.kind, powerup.pos));
        }
    }

    for (id, kind, pos) in fruit_hits {
        spawn_burst(state, pos, kind.color());
        state.emit(
            &mut events,
            GameEvent::Sliced {
                id,
                kind,
                points,
                at: now,
            },
        );
    }

    for (id, kind, pos) in powerup_hits {
        spawn_burst(state, pos, kind.color());
        state.emit(&mut events, GameEvent::PowerupSliced { id, kind, at: now });
        events.extend(effects::activate(state, kind, now));
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Fruit, FruitKind, GamePhase, Powerup, PowerupKind};
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn state_with_fruit(pos: Vec2, size: f32) -> GameState {
        let mut state = GameState::new(Tuning::default(), 11);
        state.phase = GamePhase::Playing;
        let id = state.next_entity_id();
        state
            .fruits
            .push(Fruit::new(id, FruitKind::Watermelon, pos, Vec2::ZERO, size));
        state
    }

    #[test]
    fn test_stroke_through_center_slices() {
        let mut state = state_with_fruit(Vec2::new(100.0, 100.0), 40.0);
        let events = test_slice(
            &mut state,
            Vec2::new(80.0, 100.0),
            Vec2::new(120.0, 100.0),
            500.0,
        );

        assert!(state.fruits[0].sliced);
        assert_eq!(state.fruits[0].slice_time, Some(500.0));
        assert_eq!(
            events,
            vec![GameEvent::Sliced {
                id: state.fruits[0].id,
                kind: FruitKind::Watermelon,
                points: 10,
                at: 500.0,
            }]
        );
        assert_eq!(state.particles.len(), 12);
        assert!(state.particles.iter().all(|p| p.color == 0x00ff44));
    }

    #[test]
    fn test_distant_stroke_misses() {
        let mut state = state_with_fruit(Vec2::new(100.0, 100.0), 40.0);
        let events = test_slice(
            &mut state,
            Vec2::new(80.0, 200.0),
            Vec2::new(120.0, 200.0),
            500.0,
        );
        assert!(events.is_empty());
        assert!(!state.fruits[0].sliced);
    }

    #[test]
    fn test_swept_detection_between_samples() {
        let mut state = state_with_fruit(Vec2::new(100.0, 100.0), 40.0);
        let prev = Vec2::new(0.0, 100.0);
        let curr = Vec2::new(200.0, 100.0);
        assert!(prev.distance(state.fruits[0].pos) > 20.0);
        assert!(curr.distance(state.fruits[0].pos) > 20.0);

        test_slice(&mut state, prev, curr, 0.0);
        assert!(state.fruits[0].sliced);
    }

    #[test]
    fn test_tangent_stroke_does_not_slice() {
        // Distance exactly equals the radius
        let mut state = state_with_fruit(Vec2::new(100.0, 100.0), 40.0);
        test_slice(
            &mut state,
            Vec2::new(0.0, 120.0),
            Vec2::new(200.0, 120.0),
            0.0,
        );
        assert!(!state.fruits[0].sliced);
    }

    #[test]
    fn test_zero_length_move_is_ignored() {
        let mut state = state_with_fruit(Vec2::new(100.0, 100.0), 40.0);
        let events = test_slice(&mut state, Vec2::new(100.0, 100.0), Vec2::new(100.0, 100.0), 0.0);
        assert!(events.is_empty());
        assert!(!state.fruits[0].sliced);
    }

    #[test]
    fn test_endpoint_clamping() {
        // Segment ends well before the fruit; the infinite line would hit it
        let mut state = state_with_fruit(Vec2::new(300.0, 100.0), 40.0);
        test_slice(&mut state, Vec2::new(0.0, 100.0), Vec2::new(100.0, 100.0), 0.0);
        assert!(!state.fruits[0].sliced);
    }

    #[test]
    fn test_all_qualifying_fruit_slice_in_order() {
        let mut state = state_with_fruit(Vec2::new(300.0, 100.0), 40.0);
        let id = state.next_entity_id();
        state.fruits.push(Fruit::new(
            id,
            FruitKind::Apple,
            Vec2::new(100.0, 105.0),
            Vec2::ZERO,
            40.0,
        ));

        let events = test_slice(&mut state, Vec2::new(0.0, 100.0), Vec2::new(400.0, 100.0), 0.0);
        let ids: Vec<u32> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::Sliced { id, .. } => Some(*id),
                _ => None,
            })
            .collect();
        assert_eq!(ids, vec![state.fruits[0].id, state.fruits[1].id]);
        assert_eq!(state.score(), 20);
    }

    #[test]
    fn test_sliced_fruit_is_not_sliced_again() {
        let mut state = state_with_fruit(Vec2::new(100.0, 100.0), 40.0);
        test_slice(&mut state, Vec2::new(80.0, 100.0), Vec2::new(120.0, 100.0), 0.0);
        let events = test_slice(&mut state, Vec2::new(120.0, 100.0), Vec2::new(80.0, 100.0), 10.0);
        assert!(events.is_empty());
        assert_eq!(state.fruits[0].slice_time, Some(0.0));
        assert_eq!(state.score(), 10);
    }

    #[test]
    fn test_double_multiplier_applies() {
        let mut state = state_with_fruit(Vec2::new(100.0, 100.0), 40.0);
        state.effects.insert(PowerupKind::Double, 10_000.0);
        let events = test_slice(&mut state, Vec2::new(80.0, 100.0), Vec2::new(120.0, 100.0), 0.0);
        assert!(matches!(events[0], GameEvent::Sliced { points: 20, .. }));
    }

    #[test]
    fn test_lapsed_double_pays_single() {
        let mut state = state_with_fruit(Vec2::new(100.0, 100.0), 40.0);
        state.effects.insert(PowerupKind::Double, 10_000.0);
        let events = test_slice(
            &mut state,
            Vec2::new(80.0, 100.0),
            Vec2::new(120.0, 100.0),
            10_000.0,
        );
        assert_eq!(
            events[0],
            GameEvent::PowerupExpired {
                kind: PowerupKind::Double
            }
        );
        assert!(matches!(events[1], GameEvent::Sliced { points: 10, .. }));
        assert!(state.effects().is_empty());
        assert_eq!(state.score(), 10);
    }

    #[test]
    fn test_powerup_slice_activates_effect() {
        let mut state = GameState::new(Tuning::default(), 5);
        state.phase = GamePhase::Playing;
        let id = state.next_entity_id();
        state.powerups.push(Powerup::new(
            id,
            PowerupKind::Freeze,
            Vec2::new(50.0, 50.0),
            Vec2::ZERO,
            30.0,
        ));

        let events = test_slice(&mut state, Vec2::new(0.0, 50.0), Vec2::new(100.0, 50.0), 100.0);
        assert_eq!(
            events,
            vec![GameEvent::PowerupSliced {
                id,
                kind: PowerupKind::Freeze,
                at: 100.0
            }]
        );
        assert_eq!(state.effects.get(PowerupKind::Freeze).unwrap().end_time, 6100.0);
        assert_eq!(state.particles.len(), 12);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_bomb_powerup_slices_remaining_fruit() {
        let mut state = state_with_fruit(Vec2::new(600.0, 600.0), 40.0);
        let id = state.next_entity_id();
        state.powerups.push(Powerup::new(
            id,
            PowerupKind::Bomb,
            Vec2::new(50.0, 50.0),
            Vec2::ZERO,
            30.0,
        ));

        let events = test_slice(&mut state, Vec2::new(0.0, 50.0), Vec2::new(100.0, 50.0), 0.0);
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], GameEvent::PowerupSliced { .. }));
        assert!(matches!(events[1], GameEvent::Sliced { points: 10, .. }));
        assert!(state.fruits[0].sliced);
        assert!(state.effects().is_empty());
    }

    #[test]
    fn test_particle_cap() {
        let mut state = state_with_fruit(Vec2::new(100.0, 100.0), 40.0);
        state.tuning.max_particles = 5;
        test_slice(&mut state, Vec2::new(80.0, 100.0), Vec2::new(120.0, 100.0), 0.0);
        assert_eq!(state.particles.len(), 5);
    }

    #[test]
    #[should_panic(expected = "non-finite")]
    fn test_non_finite_point_panics() {
        let mut state = state_with_fruit(Vec2::new(100.0, 100.0), 40.0);
        test_slice(&mut state, Vec2::new(f32::NAN, 0.0), Vec2::new(1.0, 0.0), 0.0);
    }

    proptest! {
        #[test]
        fn prop_segment_through_center_always_hits(
            cx in 50.0f32..950.0,
            cy in 50.0f32..650.0,
            angle in 0.0f32..std::f32::consts::TAU,
            reach in 1.0f32..300.0,
            size in 10.0f32..80.0,
        ) {
            let center = Vec2::new(cx, cy);
            let dir = Vec2::from_angle(angle);
            prop_assert!(segment_hits_circle(center - dir * reach, center + dir * reach, center, size / 2.0));
        }

        #[test]
        fn prop_segment_outside_radius_never_hits(
            cx in 50.0f32..950.0,
            cy in 50.0f32..650.0,
            angle in 0.0f32..std::f32::consts::TAU,
            reach in 1.0f32..300.0,
            offset in 1.0f32..200.0,
            size in 10.0f32..80.0,
        ) {
            let center = Vec2::new(cx, cy);
            let dir = Vec2::from_angle(angle);
            let normal = dir.perp();
            let mid = center + normal * (size / 2.0 + offset);
            prop_assert!(!segment_hits_circle(mid - dir * reach, mid + dir * reach, center, size / 2.0));
        }
    }
}
