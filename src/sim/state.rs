//! Game state and core simulation types
//!
//! Everything a tick or a stroke can touch lives in `GameState`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::Effects;
use super::scoring::Scoreboard;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start action
    #[default]
    NotStarted,
    /// Active gameplay
    Playing,
    /// Out of lives, waiting for a restart
    Ended,
}

/// Behavior shared by fruit and power-up kinds
pub trait EntityKind: Copy + PartialEq + std::fmt::Debug {
    /// Particle/display color (0xRRGGBB)
    fn color(&self) -> u32;
    /// Whether letting this fall off the field costs a life
    const COSTS_LIFE: bool;
}

/// Fruit catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FruitKind {
    Apple,
    Orange,
    Banana,
    Watermelon,
    Pineapple,
    Strawberry,
    Grapes,
    Peach,
}

impl FruitKind {
    pub const ALL: [FruitKind; 8] = [
        FruitKind::Apple,
        FruitKind::Orange,
        FruitKind::Banana,
        FruitKind::Watermelon,
        FruitKind::Pineapple,
        FruitKind::Strawberry,
        FruitKind::Grapes,
        FruitKind::Peach,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FruitKind::Apple => "apple",
            FruitKind::Orange => "orange",
            FruitKind::Banana => "banana",
            FruitKind::Watermelon => "watermelon",
            FruitKind::Pineapple => "pineapple",
            FruitKind::Strawberry => "strawberry",
            FruitKind::Grapes => "grapes",
            FruitKind::Peach => "peach",
        }
    }
}

impl EntityKind for FruitKind {
    fn color(&self) -> u32 {
        match self {
            FruitKind::Apple => 0xff4444,
            FruitKind::Orange => 0xff8800,
            FruitKind::Banana => 0xffff00,
            FruitKind::Watermelon => 0x00ff44,
            FruitKind::Pineapple => 0xffaa00,
            FruitKind::Strawberry => 0xff0044,
            FruitKind::Grapes => 0x8800ff,
            FruitKind::Peach => 0xffaa88,
        }
    }

    const COSTS_LIFE: bool = true;
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerupKind {
    /// Slow motion
    Slow,
    /// Double points
    Double,
    /// Slices every fruit on the field at once
    Bomb,
    /// Stops all motion
    Freeze,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 4] = [
        PowerupKind::Slow,
        PowerupKind::Double,
        PowerupKind::Bomb,
        PowerupKind::Freeze,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PowerupKind::Slow => "Slow Motion",
            PowerupKind::Double => "Double Points",
            PowerupKind::Bomb => "Bomb",
            PowerupKind::Freeze => "Freeze",
        }
    }

    /// Bomb fires instantly, the rest run on a timer
    pub fn is_timed(&self) -> bool {
        !matches!(self, PowerupKind::Bomb)
    }
}

impl EntityKind for PowerupKind {
    fn color(&self) -> u32 {
        match self {
            PowerupKind::Slow => 0x4444ff,
            PowerupKind::Double => 0xffaa00,
            PowerupKind::Bomb => 0xff0000,
            PowerupKind::Freeze => 0x00aaff,
        }
    }

    const COSTS_LIFE: bool = false;
}

/// Something launched into the field that can be sliced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airborne<K> {
    pub id: u32,
    pub kind: K,
    pub pos: Vec2,
    pub vel: Vec2,
    pub rotation: f32,
    pub rotation_speed: f32,
    /// Diameter (px)
    pub size: f32,
    pub sliced: bool,
    /// Wall-clock ms of the slice
    pub slice_time: Option<f64>,
}

pub type Fruit = Airborne<FruitKind>;
pub type Powerup = Airborne<PowerupKind>;

impl<K: EntityKind> Airborne<K> {
    pub fn new(id: u32, kind: K, pos: Vec2, vel: Vec2, size: f32) -> Self {
        Self {
            id,
            kind,
            pos,
            vel,
            rotation: 0.0,
            rotation_speed: 0.0,
            size,
            sliced: false,
            slice_time: None,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    pub fn color(&self) -> u32 {
        self.kind.color()
    }

    pub fn mark_sliced(&mut self, now: f64) {
        self.sliced = true;
        self.slice_time = Some(now);
    }

    /// Sliced longer ago than the decay window
    pub fn is_decayed(&self, now: f64, decay_ms: f64) -> bool {
        match (self.sliced, self.slice_time) {
            (true, Some(at)) => now - at > decay_ms,
            _ => false,
        }
    }

    /// Render opacity: 1 while whole, fading to 0 over the decay window
    pub fn opacity(&self, now: f64, decay_ms: f64) -> f32 {
        match self.slice_time {
            Some(at) if self.sliced && decay_ms > 0.0 => {
                (1.0 - (now - at) / decay_ms).clamp(0.0, 1.0) as f32
            }
            _ => 1.0,
        }
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks left
    pub life: f32,
    pub max_life: f32,
    pub color: u32,
}

impl Particle {
    /// Remaining life as 0-1 (for fading)
    pub fn alpha(&self) -> f32 {
        if self.max_life <= 0.0 {
            0.0
        } else {
            (self.life / self.max_life).clamp(0.0, 1.0)
        }
    }
}

/// Recent pointer positions for the blade effect (oldest first)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlashTrail {
    pub points: Vec<Vec2>,
    pub timestamp: f64,
}

/// A running timed power-up
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivePowerup {
    pub kind: PowerupKind,
    pub end_time: f64,
}

impl ActivePowerup {
    pub fn remaining_ms(&self, now: f64) -> f64 {
        (self.end_time - now).max(0.0)
    }
}

/// What the core reports back to its embedder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A fruit was sliced (by the blade or a bomb)
    Sliced {
        id: u32,
        kind: FruitKind,
        points: u32,
        at: f64,
    },
    /// A power-up was sliced; its effect has already been applied
    PowerupSliced { id: u32, kind: PowerupKind, at: f64 },
    /// A timed power-up ran out
    PowerupExpired { kind: PowerupKind },
    /// An unsliced fruit fell off the field
    LifeLost {
        id: u32,
        kind: FruitKind,
        lives_left: u8,
    },
    /// The run is over
    GameEnded { final_score: u64 },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Balance table
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Score, lives and session counters
    pub scoreboard: Scoreboard,
    /// Timed power-ups
    pub effects: Effects,
    /// Live fruit in insertion order
    pub fruits: Vec<Fruit>,
    /// Live power-ups in insertion order
    pub powerups: Vec<Powerup>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Blade trails (not gameplay-affecting)
    pub trails: Vec<SlashTrail>,
    /// Last pointer position while a stroke is held
    pub stroke: Option<Vec2>,
    /// Ticks advanced since the last start
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create an idle game; call `start` to play
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let lives = tuning.starting_lives;
        Self {
            tuning,
            seed,
            phase: GamePhase::NotStarted,
            scoreboard: Scoreboard::new(lives),
            effects: Effects::default(),
            fruits: Vec::new(),
            powerups: Vec::new(),
            particles: Vec::new(),
            trails: Vec::new(),
            stroke: None,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID (wraps after `u32::MAX`)
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Drop every entity, effect and stroke (score/lives untouched)
    pub(crate) fn clear_field(&mut self) {
        self.fruits.clear();
        self.powerups.clear();
        self.particles.clear();
        self.trails.clear();
        self.effects.clear();
        self.stroke = None;
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.scoreboard.score
    }

    pub fn lives(&self) -> u8 {
        self.scoreboard.lives
    }

    /// Score multiplier currently in force
    pub fn multiplier(&self) -> u32 {
        self.effects.multiplier(&self.tuning)
    }

    pub fn fruits(&self) -> &[Fruit] {
        &self.fruits
    }

    pub fn powerups(&self) -> &[Powerup] {
        &self.powerups
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn trails(&self) -> &[SlashTrail] {
        &self.trails
    }

    pub fn effects(&self) -> &[ActivePowerup] {
        self.effects.active()
    }

    pub fn is_stroking(&self) -> bool {
        self.stroke.is_some()
    }
}
