//! Tick-driven simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Wall-clock time is passed in, never read
//! - Seeded RNG only
//! - Stable iteration order (insertion order of the live sets)
//! - No rendering or platform dependencies

pub mod autoplay;
pub mod effects;
pub mod integrate;
pub mod scoring;
pub mod slice;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod stroke;
pub mod tick;

pub use autoplay::Autopilot;
pub use effects::{Effects, activate};
pub use integrate::integrate;
pub use scoring::{Scoreboard, SessionStats};
pub use slice::{closest_point_on_segment, segment_hits_circle, test_slice};
pub use snapshot::{Hud, Snapshot};
pub use spawn::{try_spawn_fruit, try_spawn_powerup};
pub use state::{
    ActivePowerup, Airborne, EntityKind, Fruit, FruitKind, GameEvent, GamePhase, GameState,
    Particle, Powerup, PowerupKind, SlashTrail,
};
pub use tick::tick;
