//! Arena state
//!
//! The arena exclusively owns every entity collection and the score.
//! Entities never reference each other; interactions go through the
//! collision pass in `collision.rs`.

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::enemy::{Enemy, EnemyKind};
use super::geom::Rgb;
use super::projectile::Projectile;
use super::snapshot::Snapshot;
use super::turret::Turret;
use crate::audio::SoundCue;
use crate::error::ConfigError;
use crate::settings::{Settings, SpawnSettings};

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Play a sound cue
    Cue(SoundCue),
    EnemySpawned { id: u32, kind: EnemyKind },
    EnemyHit { id: u32, points: u32 },
    EnemyDefeated { id: u32 },
    EnemyBounced { id: u32 },
    /// Sank below the arena floor without reaching the gun
    EnemyEscaped { id: u32 },
    ProjectileFired { id: u32 },
    ProjectileExpired { id: u32 },
    TurretStruck { enemy_id: u32 },
}

/// The simulation arena
#[derive(Debug, Clone)]
pub struct Arena {
    pub width: i32,
    pub height: i32,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Cumulative score
    pub score: u32,
    /// Projectiles fired this session
    pub shots_fired: u32,
    pub turret: Turret,
    /// Live enemies, in spawn order
    pub enemies: Vec<Enemy>,
    /// Live projectiles, in firing order
    pub projectiles: Vec<Projectile>,
    /// Defeated enemies finishing their shrink animation (visual only)
    pub fading: Vec<Enemy>,
    /// Kind of the next auto-spawned enemy
    pub next_spawn: EnemyKind,
    /// Ticks left until the next auto-spawn
    pub spawn_countdown: u32,
    /// Events queued since the last drain
    pub events: Vec<GameEvent>,
    anim_steps: u32,
    spawn: SpawnSettings,
    rng: Pcg32,
    next_id: u32,
}

impl Arena {
    /// Build a validated arena with one Big and one Small enemy
    pub fn new(settings: &Settings, seed: u64) -> Result<Self, ConfigError> {
        settings.validate()?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let turret_color = Rgb::random(&mut rng);
        let next_spawn = if rng.random_bool(0.5) {
            EnemyKind::Big
        } else {
            EnemyKind::Small
        };

        let mut arena = Self {
            width: settings.arena.width,
            height: settings.arena.height,
            seed,
            time_ticks: 0,
            score: 0,
            shots_fired: 0,
            turret: Turret::new(settings.arena.width, settings.arena.height, turret_color),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            fading: Vec::new(),
            next_spawn,
            spawn_countdown: 0,
            events: Vec::new(),
            anim_steps: settings.anim_steps_per_tick(),
            spawn: settings.spawn,
            rng,
            next_id: 1,
        };

        arena.spawn_enemy(EnemyKind::Big);
        arena.spawn_enemy(EnemyKind::Small);
        arena.reroll_spawn_countdown();

        log::debug!(
            "Arena {}x{} ready (seed {}, next spawn {:?} in {} ticks)",
            arena.width,
            arena.height,
            seed,
            arena.next_spawn,
            arena.spawn_countdown
        );
        Ok(arena)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Animation steps advanced per tick
    pub fn anim_steps_per_tick(&self) -> u32 {
        self.anim_steps
    }

    /// Spawn an enemy at a random position inside its kind's spawn bounds
    pub fn spawn_enemy(&mut self, kind: EnemyKind) -> u32 {
        let [w, h] = self.spawn.bounds_for(kind);
        let size = kind.size();
        // Bounds are validated to be strictly larger than the enemy
        let pos = IVec2::new(
            self.rng.random_range(0..w - size),
            self.rng.random_range(0..h - size),
        );
        let color = Rgb::random(&mut self.rng);
        let id = self.next_entity_id();
        self.enemies.push(Enemy::new(id, kind, pos, color));
        self.events.push(GameEvent::EnemySpawned { id, kind });
        id
    }

    /// Fire a projectile from the turret's muzzle
    pub fn fire(&mut self) -> u32 {
        let color = Rgb::random(&mut self.rng);
        let id = self.next_entity_id();
        self.projectiles
            .push(Projectile::new(id, self.turret.muzzle(), color));
        self.shots_fired += 1;
        self.events.push(GameEvent::ProjectileFired { id });
        self.events.push(GameEvent::Cue(SoundCue::Fired));
        id
    }

    /// Count down to the next auto-spawn, spawning when it reaches zero.
    ///
    /// A roll of `r` spawns again `r` ticks later (at least one).
    pub fn update_spawner(&mut self) {
        self.spawn_countdown = self.spawn_countdown.saturating_sub(1);
        if self.spawn_countdown > 0 {
            return;
        }
        let kind = self.next_spawn;
        self.spawn_enemy(kind);
        self.next_spawn = kind.toggled();
        self.reroll_spawn_countdown();
    }

    fn reroll_spawn_countdown(&mut self) {
        self.spawn_countdown = self.rng.random_range(0..self.spawn.interval_max);
    }

    /// Look up a live enemy by id
    pub fn enemy(&self, id: u32) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Render snapshot of the current state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }
}
