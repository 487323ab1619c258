//! Ball Destruction - a turret arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, arena state)
//! - `session`: Game loop policy (shot counting, win/lose evaluation)
//! - `clock`: Fixed timestep scheduling
//! - `autopilot`: Demo mode that plays the game
//! - `audio`: Sound cue sink
//! - `settings`: Data-driven configuration

pub mod audio;
pub mod autopilot;
pub mod clock;
pub mod error;
pub mod session;
pub mod settings;
pub mod sim;

pub use audio::{AudioManager, CueSink, SoundCue};
pub use error::ConfigError;
pub use session::{GamePhase, LossReason, Session, TickInput, TickSummary};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation tick period (milliseconds)
    pub const TICK_MS: u64 = 30;
    /// One step of a descend/shrink transition (milliseconds)
    pub const ANIM_STEP_MS: u64 = 10;
    /// Maximum ticks run per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Arena dimensions
    pub const ARENA_WIDTH: i32 = 700;
    pub const ARENA_HEIGHT: i32 = 500;

    /// Turret geometry, relative to the arena's bottom-center
    pub const TURRET_BASE_WIDTH: i32 = 70;
    pub const TURRET_BASE_HEIGHT: i32 = 30;
    pub const TURRET_BASE_RISE: i32 = 45; // base top = arena height - 45
    pub const TURRET_GUN_WIDTH: i32 = 22;
    pub const TURRET_GUN_HEIGHT: i32 = 80;
    pub const TURRET_GUN_RISE: i32 = 100; // gun top = arena height - 100
    /// Horizontal turret travel per tick while a direction is held
    pub const TURRET_STEP: i32 = 10;

    /// Projectile defaults
    pub const PROJECTILE_SIZE: i32 = 15;
    pub const PROJECTILE_SPEED: i32 = 5;
    /// Projectiles spawn centered on the muzzle, half their size above it
    pub const MUZZLE_OFFSET: i32 = 7;

    /// Session ends once more than this many shots were fired
    pub const SHOT_LIMIT: u32 = 10;
    /// Score needed to win when the shots run out
    pub const WIN_SCORE: u32 = 800;

    /// Auto-spawn countdown is rolled uniformly in [0, SPAWN_INTERVAL_MAX)
    pub const SPAWN_INTERVAL_MAX: u32 = 300;
    /// Speed magnitude gained after each completed descent
    pub const BOUNCE_SPEEDUP: f32 = 0.3;

    /// Big enemy preset
    pub const BIG_SIZE: i32 = 56;
    pub const BIG_SPEED: f32 = 4.0;
    pub const BIG_SHRINK: i32 = 28;
    pub const BIG_POINTS: u32 = 100;
    pub const BIG_SPAWN_BOUNDS: i32 = 100;

    /// Small enemy preset
    pub const SMALL_SIZE: i32 = 30;
    pub const SMALL_SPEED: f32 = 6.0;
    pub const SMALL_SHRINK: i32 = 30;
    pub const SMALL_POINTS: u32 = 150;
    pub const SMALL_SPAWN_BOUNDS: i32 = 50;
}

/// Number of whole animation steps that fit in one tick
#[inline]
pub fn steps_per_tick(tick_ms: u64, anim_step_ms: u64) -> u32 {
    if anim_step_ms == 0 {
        return 0;
    }
    (tick_ms / anim_step_ms) as u32
}
