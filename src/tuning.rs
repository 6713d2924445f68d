//! Data-driven game balance
//!
//! Every number the simulation reads lives here so embedders can swap the
//! whole table at once (presets) or load one from JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Named balance presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TuningPreset {
    /// Dense spawns, the arcade default
    #[default]
    Baseline,
    /// Roughly half the spawn pressure
    Relaxed,
}

impl TuningPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            TuningPreset::Baseline => "Baseline",
            TuningPreset::Relaxed => "Relaxed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "baseline" | "default" => Some(TuningPreset::Baseline),
            "relaxed" | "easy" => Some(TuningPreset::Relaxed),
            _ => None,
        }
    }

    /// Per-tick spawn probabilities `(fruit, powerup)`
    pub fn spawn_chances(&self) -> (f64, f64) {
        match self {
            TuningPreset::Baseline => (0.025, 0.004),
            TuningPreset::Relaxed => (0.015, 0.002),
        }
    }
}

/// Launch kinematics for one family of entities
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaunchProfile {
    /// Smallest diameter (inclusive)
    pub size_min: f32,
    /// Largest diameter (exclusive, equal to `size_min` for a fixed size)
    pub size_max: f32,
    /// Extra clearance from the side walls on top of the radius
    pub edge_padding: f32,
    /// Horizontal speed is drawn from `±max_vx` (px/tick)
    pub max_vx: f32,
    /// Fastest upward launch (most negative, px/tick)
    pub vy_min: f32,
    /// Slowest upward launch (px/tick)
    pub vy_max: f32,
    /// Spin is drawn from `±max_spin` (rad/tick)
    pub max_spin: f32,
}

impl LaunchProfile {
    pub const FRUIT: Self = Self {
        size_min: 35.0,
        size_max: 50.0,
        edge_padding: 20.0,
        max_vx: 1.0,
        vy_min: -18.0,
        vy_max: -10.0,
        max_spin: 0.075,
    };

    pub const POWERUP: Self = Self {
        size_min: 30.0,
        size_max: 30.0,
        edge_padding: 15.0,
        max_vx: 0.75,
        vy_min: -14.0,
        vy_max: -8.0,
        max_spin: 0.05,
    };
}

/// Timed power-up durations (ms)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerupDurations {
    pub slow_ms: f64,
    pub double_ms: f64,
    pub freeze_ms: f64,
}

impl Default for PowerupDurations {
    fn default() -> Self {
        Self {
            slow_ms: 8000.0,
            double_ms: 10000.0,
            freeze_ms: 6000.0,
        }
    }
}

/// Complete simulation tuning table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub preset: TuningPreset,

    // === Field ===
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Spawning ===
    pub fruit_spawn_chance: f64,
    pub powerup_spawn_chance: f64,
    /// Entities start this far below the bottom edge
    pub spawn_depth: f32,
    pub fruit_launch: LaunchProfile,
    pub powerup_launch: LaunchProfile,

    // === Physics ===
    /// Downward acceleration (px/tick²)
    pub gravity: f32,
    /// Gravity multiplier for particles
    pub particle_gravity_factor: f32,
    /// Horizontal speed kept after a wall bounce
    pub wall_damping: f32,

    // === Lifecycle ===
    /// Sliced entities linger this long before removal (ms)
    pub decay_ms: f64,
    /// Entities below `canvas_height + offscreen_margin` are culled
    pub offscreen_margin: f32,

    // === Scoring ===
    pub starting_lives: u8,
    pub base_slice_value: u32,

    // === Power-ups ===
    pub durations: PowerupDurations,
    /// Time scale while Slow is active
    pub slow_time_scale: f32,
    /// Score multiplier while Double is active
    pub double_multiplier: u32,

    // === Cosmetics ===
    pub particles_per_slice: usize,
    pub max_particles: usize,
    pub trail_points: usize,
    pub max_trails: usize,
    pub trail_ttl_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::from_preset(TuningPreset::Baseline)
    }
}

impl Tuning {
    /// Build the tuning table for a preset
    pub fn from_preset(preset: TuningPreset) -> Self {
        let (fruit_spawn_chance, powerup_spawn_chance) = preset.spawn_chances();
        Self {
            preset,
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            fruit_spawn_chance,
            powerup_spawn_chance,
            spawn_depth: SPAWN_DEPTH,
            fruit_launch: LaunchProfile::FRUIT,
            powerup_launch: LaunchProfile::POWERUP,
            gravity: GRAVITY,
            particle_gravity_factor: PARTICLE_GRAVITY_FACTOR,
            wall_damping: WALL_DAMPING,
            decay_ms: DECAY_MS,
            offscreen_margin: OFFSCREEN_MARGIN,
            starting_lives: STARTING_LIVES,
            base_slice_value: BASE_SLICE_VALUE,
            durations: PowerupDurations::default(),
            slow_time_scale: SLOW_TIME_SCALE,
            double_multiplier: 2,
            particles_per_slice: PARTICLES_PER_SLICE,
            max_particles: MAX_PARTICLES,
            trail_points: TRAIL_POINTS,
            max_trails: MAX_TRAILS,
            trail_ttl_ms: TRAIL_TTL_MS,
        }
    }

    /// Switch spawn pressure to another preset, keeping everything else
    pub fn apply_preset(&mut self, preset: TuningPreset) {
        let (fruit, powerup) = preset.spawn_chances();
        self.preset = preset;
        self.fruit_spawn_chance = fruit;
        self.powerup_spawn_chance = powerup;
    }

    /// Same table on a different canvas
    pub fn with_canvas(mut self, width: f32, height: f32) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self
    }

    /// Parse and validate a JSON tuning table. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json).map_err(TuningError::Json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        serde_json::to_string_pretty(self).map_err(TuningError::Json)
    }

    /// Reject tables the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.canvas_width > 0.0 && self.canvas_height > 0.0)
            || !self.canvas_width.is_finite()
            || !self.canvas_height.is_finite()
        {
            return Err(TuningError::InvalidCanvas {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        for (field, value) in [
            ("fruit_spawn_chance", self.fruit_spawn_chance),
            ("powerup_spawn_chance", self.powerup_spawn_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(TuningError::ProbabilityOutOfRange { field, value });
            }
        }
        if !(0.0..=1.0).contains(&self.slow_time_scale) {
            return Err(TuningError::TimeScaleOutOfRange(self.slow_time_scale));
        }
        for (field, profile) in [
            ("fruit_launch", &self.fruit_launch),
            ("powerup_launch", &self.powerup_launch),
        ] {
            let sane = profile.size_min > 0.0
                && profile.size_max >= profile.size_min
                && profile.max_vx >= 0.0
                && profile.max_spin >= 0.0
                && profile.vy_min <= profile.vy_max;
            if !sane {
                return Err(TuningError::InvalidLaunchProfile { field });
            }
        }
        for (field, value) in [
            ("slow_ms", self.durations.slow_ms),
            ("double_ms", self.durations.double_ms),
            ("freeze_ms", self.durations.freeze_ms),
            ("decay_ms", self.decay_ms),
            ("trail_ttl_ms", self.trail_ttl_ms),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(TuningError::NegativeDuration { field, value });
            }
        }
        if self.starting_lives == 0 {
            return Err(TuningError::NoLives);
        }
        Ok(())
    }
}

/// Why a tuning table was rejected
#[derive(Debug)]
pub enum TuningError {
    /// Malformed JSON on load, or a table serde could not write
    Json(serde_json::Error),
    InvalidCanvas { width: f32, height: f32 },
    ProbabilityOutOfRange { field: &'static str, value: f64 },
    TimeScaleOutOfRange(f32),
    InvalidLaunchProfile { field: &'static str },
    NegativeDuration { field: &'static str, value: f64 },
    NoLives,
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "tuning json: {err}"),
            Self::InvalidCanvas { width, height } => {
                write!(f, "canvas must be positive and finite, got {width}x{height}")
            }
            Self::ProbabilityOutOfRange { field, value } => {
                write!(f, "{field} must be within 0..=1, got {value}")
            }
            Self::TimeScaleOutOfRange(scale) => {
                write!(f, "slow_time_scale must be within 0..=1, got {scale}")
            }
            Self::InvalidLaunchProfile { field } => write!(f, "{field} has inverted ranges"),
            Self::NegativeDuration { field, value } => {
                write!(f, "{field} must be a non-negative duration, got {value}")
            }
            Self::NoLives => write!(f, "starting_lives must be at least 1"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}
