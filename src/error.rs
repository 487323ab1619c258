//! Configuration errors
//!
//! Invalid construction parameters fail fast here instead of producing a
//! degenerate arena or an empty random range later on.

use std::path::PathBuf;

use thiserror::Error;

use crate::sim::EnemyKind;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("arena {width}x{height} is too small, need at least {min_width}x{min_height} for the turret")]
    ArenaTooSmall {
        width: i32,
        height: i32,
        min_width: i32,
        min_height: i32,
    },

    #[error("{kind:?} spawn bounds {width}x{height} leave no room for a {size}px enemy")]
    DegenerateSpawnBounds {
        kind: EnemyKind,
        width: i32,
        height: i32,
        size: i32,
    },

    #[error("{kind:?} spawn bounds {width}x{height} exceed the {arena_width}x{arena_height} arena")]
    SpawnBoundsOutsideArena {
        kind: EnemyKind,
        width: i32,
        height: i32,
        arena_width: i32,
        arena_height: i32,
    },

    #[error("tick period must be positive")]
    ZeroTick,

    #[error("animation step of {step_ms}ms does not fit in a {tick_ms}ms tick")]
    AnimationStep { step_ms: u64, tick_ms: u64 },

    #[error("spawn interval must be positive")]
    ZeroSpawnInterval,

    #[error("{name} volume {value} is outside 0.0..=1.0")]
    Volume { name: &'static str, value: f32 },

    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings: {0}")]
    Parse(#[from] serde_json::Error),
}
