//! Read-only render snapshot
//!
//! Everything an external renderer needs for one frame, detached from the
//! arena so it can be handed across threads or serialized.

use serde::{Deserialize, Serialize};

use super::enemy::EnemyKind;
use super::geom::{Rect, Rgb};
use super::state::Arena;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurretView {
    pub base: Rect,
    pub gun: Rect,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u32,
    pub kind: EnemyKind,
    pub bounds: Rect,
    pub color: Rgb,
    /// Already defeated, only drawn until its shrink finishes
    pub fading: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: u32,
    pub bounds: Rect,
    pub color: Rgb,
}

/// One frame of renderable state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub score: u32,
    pub shots_fired: u32,
    pub arena_width: i32,
    pub arena_height: i32,
    pub turret: TurretView,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
}

impl Snapshot {
    pub fn capture(arena: &Arena) -> Self {
        let live = arena.enemies.iter().map(|e| (e, false));
        let fading = arena.fading.iter().map(|e| (e, true));
        Self {
            tick: arena.time_ticks,
            score: arena.score,
            shots_fired: arena.shots_fired,
            arena_width: arena.width,
            arena_height: arena.height,
            turret: TurretView {
                base: arena.turret.base,
                gun: arena.turret.gun,
                color: arena.turret.color,
            },
            enemies: live
                .chain(fading)
                .map(|(e, fading)| EnemyView {
                    id: e.id,
                    kind: e.kind,
                    bounds: e.bounds,
                    color: e.color,
                    fading,
                })
                .collect(),
            projectiles: arena
                .projectiles
                .iter()
                .map(|p| ProjectileView {
                    id: p.id,
                    bounds: p.bounds,
                    color: p.color,
                })
                .collect(),
        }
    }
}
