//! Game settings
//!
//! Defaults reproduce the stock game. A JSON file can override any subset
//! of fields; everything is validated before an arena is built.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::EnemyKind;

/// Arena dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaSettings {
    pub width: i32,
    pub height: i32,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

/// Tick cadence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingSettings {
    /// Simulation tick period
    pub tick_ms: u64,
    /// Duration of one descend/shrink animation step
    pub anim_step_ms: u64,
    /// Maximum ticks run per rendered frame
    pub max_substeps: u32,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            anim_step_ms: ANIM_STEP_MS,
            max_substeps: MAX_SUBSTEPS,
        }
    }
}

/// Enemy spawn area, anchored at the arena's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnSettings {
    /// Big enemies spawn with their top-left inside `[0, w - size) x [0, h - size)`
    pub big_bounds: [i32; 2],
    pub small_bounds: [i32; 2],
    /// Exclusive upper bound of the auto-spawn countdown roll
    pub interval_max: u32,
}

impl Default for SpawnSettings {
    fn default() -> Self {
        Self {
            big_bounds: [BIG_SPAWN_BOUNDS; 2],
            small_bounds: [SMALL_SPAWN_BOUNDS; 2],
            interval_max: SPAWN_INTERVAL_MAX,
        }
    }
}

impl SpawnSettings {
    pub fn bounds_for(&self, kind: EnemyKind) -> [i32; 2] {
        match kind {
            EnemyKind::Big => self.big_bounds,
            EnemyKind::Small => self.small_bounds,
        }
    }
}

/// Sound preferences
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

/// All game settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub arena: ArenaSettings,
    pub timing: TimingSettings,
    pub spawn: SpawnSettings,
    pub audio: AudioSettings,
    /// Fixed run seed; a fresh one is picked when absent
    pub seed: Option<u64>,
}

impl Settings {
    /// Parse settings from a JSON string and validate them
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file and validate them
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Animation steps advanced per tick
    pub fn anim_steps_per_tick(&self) -> u32 {
        crate::steps_per_tick(self.timing.tick_ms, self.timing.anim_step_ms)
    }

    /// Check every construction parameter
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ArenaSettings { width, height } = self.arena;
        let min_width = TURRET_BASE_WIDTH;
        let min_height = TURRET_GUN_RISE + MUZZLE_OFFSET + 1;
        if width < min_width || height < min_height {
            return Err(ConfigError::ArenaTooSmall {
                width,
                height,
                min_width,
                min_height,
            });
        }

        if self.timing.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        if self.anim_steps_per_tick() == 0 {
            return Err(ConfigError::AnimationStep {
                step_ms: self.timing.anim_step_ms,
                tick_ms: self.timing.tick_ms,
            });
        }

        if self.spawn.interval_max == 0 {
            return Err(ConfigError::ZeroSpawnInterval);
        }
        for kind in [EnemyKind::Big, EnemyKind::Small] {
            let [w, h] = self.spawn.bounds_for(kind);
            let size = kind.size();
            if w <= size || h <= size {
                return Err(ConfigError::DegenerateSpawnBounds {
                    kind,
                    width: w,
                    height: h,
                    size,
                });
            }
            if w > width || h > height {
                return Err(ConfigError::SpawnBoundsOutsideArena {
                    kind,
                    width: w,
                    height: h,
                    arena_width: width,
                    arena_height: height,
                });
            }
        }

        for (name, value) in [
            ("master", self.audio.master_volume),
            ("sfx", self.audio.sfx_volume),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Volume { name, value });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.anim_steps_per_tick(), 3);
        assert_eq!(settings.arena.width, 700);
        assert_eq!(settings.spawn.big_bounds, [100, 100]);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7, "audio": { "muted": true } }"#)
            .expect("valid settings");
        assert_eq!(settings.seed, Some(7));
        assert!(settings.audio.muted);
        assert_eq!(settings.audio.master_volume, 0.8);
        assert_eq!(settings.timing.tick_ms, 30);
    }

    #[test]
    fn test_spawn_bounds_must_exceed_enemy_size() {
        let mut settings = Settings::default();
        settings.spawn.big_bounds = [56, 100];
        let err = settings.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DegenerateSpawnBounds {
                kind: EnemyKind::Big,
                size: 56,
                ..
            }
        ));
        assert!(err.to_string().contains("56x100"));
    }

    #[test]
    fn test_spawn_bounds_must_fit_arena() {
        let mut settings = Settings::default();
        settings.spawn.small_bounds = [800, 50];
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::SpawnBoundsOutsideArena {
                kind: EnemyKind::Small,
                ..
            })
        ));
    }

    #[test]
    fn test_arena_must_hold_turret() {
        let mut settings = Settings::default();
        settings.arena.width = 40;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::ArenaTooSmall { .. })
        ));
    }

    #[test]
    fn test_timing_rules() {
        let mut settings = Settings::default();
        settings.timing.anim_step_ms = 40;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::AnimationStep { step_ms: 40, tick_ms: 30 })
        ));

        settings.timing.tick_ms = 0;
        assert!(matches!(settings.validate(), Err(ConfigError::ZeroTick)));
    }

    #[test]
    fn test_volume_range() {
        let mut settings = Settings::default();
        settings.audio.sfx_volume = 1.5;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::Volume { name: "sfx", .. })
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
