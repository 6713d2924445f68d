//! Per-tick kinematics
//!
//! Semi-implicit Euler in tick units: position moves with the velocity from
//! the start of the tick, then gravity updates velocity. Everything is
//! scaled by the power-up time scale except particle life.

use super::state::{Airborne, EntityKind, FruitKind, GameEvent, GameState};
use crate::tuning::Tuning;

/// Move one entity and bounce it off the side walls
fn step<K: EntityKind>(entity: &mut Airborne<K>, tuning: &Tuning, dt_scale: f32) {
    entity.pos.y += entity.vel.y * dt_scale;
    entity.vel.y += tuning.gravity * dt_scale;
    entity.pos.x += entity.vel.x * dt_scale;
    entity.rotation += entity.rotation_speed * dt_scale;

    let radius = entity.radius();
    if entity.pos.x < radius {
        entity.pos.x = radius;
        entity.vel.x = entity.vel.x.abs() * tuning.wall_damping;
    } else if entity.pos.x > tuning.canvas_width - radius {
        entity.pos.x = tuning.canvas_width - radius;
        entity.vel.x = -entity.vel.x.abs() * tuning.wall_damping;
    }
}

/// Why an entity left the live set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exit {
    Decayed,
    /// Fell below the cull line, carrying whether it was still whole
    Dropped { whole: bool },
}

fn exit_reason<K: EntityKind>(entity: &Airborne<K>, tuning: &Tuning, now: f64) -> Option<Exit> {
    if entity.is_decayed(now, tuning.decay_ms) {
        Some(Exit::Decayed)
    } else if entity.pos.y > tuning.canvas_height + tuning.offscreen_margin {
        Some(Exit::Dropped {
            whole: !entity.sliced,
        })
    } else {
        None
    }
}

/// Advance a live set, returning whole entities that dropped out and cost a life
fn advance_set<K: EntityKind>(
    set: &mut Vec<Airborne<K>>,
    tuning: &Tuning,
    dt_scale: f32,
    now: f64,
) -> Vec<(u32, K)> {
    let mut dropped = Vec::new();
    set.retain_mut(|entity| {
        step(entity, tuning, dt_scale);
        match exit_reason(entity, tuning, now) {
            None => true,
            Some(Exit::Dropped { whole: true }) if K::COSTS_LIFE => {
                dropped.push((entity.id, entity.kind));
                false
            }
            Some(_) => false,
        }
    });
    dropped
}

/// Advance every entity, particle and trail by one tick
pub fn integrate(state: &mut GameState, dt_scale: f32, now: f64) -> Vec<GameEvent> {
    assert!(
        (0.0..=1.0).contains(&dt_scale),
        "time scale {dt_scale} outside 0..=1"
    );
    assert!(now.is_finite(), "non-finite timestamp {now}");

    let missed: Vec<(u32, FruitKind)> =
        advance_set(&mut state.fruits, &state.tuning, dt_scale, now);
    advance_set(&mut state.powerups, &state.tuning, dt_scale, now);

    let particle_gravity = state.tuning.gravity * state.tuning.particle_gravity_factor;
    state.particles.retain_mut(|p| {
        p.pos += p.vel * dt_scale;
        p.vel.y += particle_gravity * dt_scale;
        p.life -= 1.0;
        p.life > 0.0
    });

    let ttl = state.tuning.trail_ttl_ms;
    state.trails.retain(|t| now - t.timestamp < ttl);

    let mut events = Vec::new();
    for (id, kind) in missed {
        let lives_left = state.lives().saturating_sub(1);
        state.emit(
            &mut events,
            GameEvent::LifeLost {
                id,
                kind,
                lives_left,
            },
        );
    }
    events
}
