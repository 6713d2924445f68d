//! Stochastic spawning
//!
//! Each tick rolls once for a fruit and once for a power-up. Launch
//! parameters are tuned so a full arc peaks inside the field.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Airborne, EntityKind, FruitKind, GameState, PowerupKind};
use crate::tuning::{LaunchProfile, Tuning};

/// Uniform in `-max..max`, or 0 for a zero-width range
fn symmetric(rng: &mut Pcg32, max: f32) -> f32 {
    if max > 0.0 {
        rng.random_range(-max..max)
    } else {
        0.0
    }
}

/// Uniform in `lo..hi`, or `lo` when the range is empty
fn span(rng: &mut Pcg32, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}

/// Roll launch kinematics for one entity
fn launch<K: EntityKind>(
    rng: &mut Pcg32,
    tuning: &Tuning,
    profile: &LaunchProfile,
    id: u32,
    kind: K,
) -> Airborne<K> {
    let size = span(rng, profile.size_min, profile.size_max);
    let margin = size / 2.0 + profile.edge_padding;
    let x = if tuning.canvas_width > 2.0 * margin {
        rng.random_range(margin..=tuning.canvas_width - margin)
    } else {
        tuning.canvas_width / 2.0
    };
    let pos = Vec2::new(x, tuning.canvas_height + tuning.spawn_depth);
    let vel = Vec2::new(
        symmetric(rng, profile.max_vx),
        span(rng, profile.vy_min, profile.vy_max),
    );

    let mut entity = Airborne::new(id, kind, pos, vel, size);
    entity.rotation_speed = symmetric(rng, profile.max_spin);
    entity
}

/// Maybe launch a fruit; returns its id on success
pub fn try_spawn_fruit(state: &mut GameState) -> Option<u32> {
    if !state.rng.random_bool(state.tuning.fruit_spawn_chance) {
        return None;
    }
    let kind = FruitKind::ALL[state.rng.random_range(0..FruitKind::ALL.len())];
    let id = state.next_entity_id();
    let fruit = launch(&mut state.rng, &state.tuning, &state.tuning.fruit_launch, id, kind);
    log::trace!("Spawned {} #{} at x={:.0}", kind.name(), id, fruit.pos.x);
    state.fruits.push(fruit);
    Some(id)
}

/// Maybe launch a power-up; returns its id on success
pub fn try_spawn_powerup(state: &mut GameState) -> Option<u32> {
    if !state.rng.random_bool(state.tuning.powerup_spawn_chance) {
        return None;
    }
    let kind = PowerupKind::ALL[state.rng.random_range(0..PowerupKind::ALL.len())];
    let id = state.next_entity_id();
    let powerup = launch(
        &mut state.rng,
        &state.tuning,
        &state.tuning.powerup_launch,
        id,
        kind,
    );
    log::trace!("Spawned {} #{} at x={:.0}", kind.name(), id, powerup.pos.x);
    state.powerups.push(powerup);
    Some(id)
}
