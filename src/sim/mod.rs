//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only, transitions advance inside the tick
//! - Seeded RNG only
//! - Stable iteration order (collection order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod enemy;
pub mod geom;
pub mod projectile;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod turret;

pub use collision::{CollisionReport, resolve_collisions};
pub use enemy::{Descent, Enemy, EnemyKind, HitResult, Shrink};
pub use geom::{Rect, Rgb};
pub use projectile::Projectile;
pub use snapshot::{EnemyView, ProjectileView, Snapshot, TurretView};
pub use state::{Arena, GameEvent};
pub use tick::{TickReport, tick};
pub use turret::{Direction, Turret};
