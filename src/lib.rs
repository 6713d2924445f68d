//! Fruit Slicer - simulation core for a slicing arcade game
//!
//! Core modules:
//! - `sim`: Tick-driven simulation (kinematics, swept slicing, power-ups, game state)
//! - `tuning`: Data-driven game balance
//! - `platform`: Browser embedding (wasm32 only)

pub mod platform;
pub mod sim;
pub mod tuning;

pub use sim::{GameEvent, GamePhase, GameState, Snapshot};
pub use tuning::{Tuning, TuningError, TuningPreset};

/// Default balance constants (see `Tuning` for the runtime table)
pub mod consts {
    /// Nominal tick length at display refresh cadence (ms)
    pub const TICK_MS: f64 = 1000.0 / 60.0;

    /// Play field
    pub const DEFAULT_CANVAS_WIDTH: f32 = 1000.0;
    pub const DEFAULT_CANVAS_HEIGHT: f32 = 700.0;
    /// Spawned entities start this far below the visible field
    pub const SPAWN_DEPTH: f32 = 50.0;

    /// Downward acceleration (px/tick²)
    pub const GRAVITY: f32 = 0.3;
    /// Particles fall slower than fruit
    pub const PARTICLE_GRAVITY_FACTOR: f32 = 0.3;
    /// Horizontal speed kept after hitting a side wall
    pub const WALL_DAMPING: f32 = 0.8;

    /// Sliced entities stay visible this long (ms)
    pub const DECAY_MS: f64 = 1000.0;
    /// Cull line below the bottom edge
    pub const OFFSCREEN_MARGIN: f32 = 100.0;

    pub const STARTING_LIVES: u8 = 5;
    pub const BASE_SLICE_VALUE: u32 = 10;
    pub const SLOW_TIME_SCALE: f32 = 0.3;

    /// Particle burst per slice
    pub const PARTICLES_PER_SLICE: usize = 12;
    pub const MAX_PARTICLES: usize = 600;

    /// Slash trail limits
    pub const TRAIL_POINTS: usize = 8;
    pub const MAX_TRAILS: usize = 3;
    pub const TRAIL_TTL_MS: f64 = 300.0;
}
