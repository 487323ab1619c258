//! Collision detection and response
//!
//! One pass per tick, enemies in collection order, projectiles in
//! collection order for each enemy. Nothing is removed while scanning:
//! spent projectiles and defeated enemies are marked in side tables and
//! the collections are compacted once the scan is over, so a hit can never
//! shift indices under the loop.

use super::enemy::HitResult;
use super::state::{Arena, GameEvent};

/// Summary of one collision pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// An enemy reached the turret; the session is lost
    pub turret_struck: bool,
    /// Projectile hits registered
    pub hits: u32,
    /// Points awarded this pass
    pub points: u32,
    /// Enemies defeated this pass
    pub defeated: Vec<u32>,
}

/// Resolve projectile/enemy and enemy/turret contacts
///
/// A spent projectile cannot hit a second enemy, and a defeated enemy is
/// not tested against the remaining projectiles. A surviving enemy can
/// take several hits in one pass.
pub fn resolve_collisions(arena: &mut Arena) -> CollisionReport {
    let mut report = CollisionReport::default();
    let mut spent = vec![false; arena.projectiles.len()];
    let mut defeated = vec![false; arena.enemies.len()];

    'enemies: for (i, enemy) in arena.enemies.iter_mut().enumerate() {
        if arena.turret.is_struck_by(&enemy.bounds) {
            log::info!("Enemy {} struck the turret", enemy.id);
            arena
                .events
                .push(GameEvent::TurretStruck { enemy_id: enemy.id });
            report.turret_struck = true;
            break 'enemies;
        }

        for (j, projectile) in arena.projectiles.iter().enumerate() {
            if spent[j] || !projectile.bounds.intersects(&enemy.bounds) {
                continue;
            }

            spent[j] = true;
            let points = enemy.kind.points();
            arena.score += points;
            report.hits += 1;
            report.points += points;
            arena.events.push(GameEvent::EnemyHit {
                id: enemy.id,
                points,
            });
            log::debug!(
                "Projectile {} hit {:?} enemy {} (+{}, target size {})",
                projectile.id,
                enemy.kind,
                enemy.id,
                points,
                enemy.target_size - enemy.kind.shrink_amount()
            );

            if enemy.register_hit() == HitResult::Defeated {
                defeated[i] = true;
                report.defeated.push(enemy.id);
                arena.events.push(GameEvent::EnemyDefeated { id: enemy.id });
                continue 'enemies;
            }
        }
    }

    // Compact after the scan
    if defeated.iter().any(|&d| d) {
        let enemies = std::mem::take(&mut arena.enemies);
        for (enemy, gone) in enemies.into_iter().zip(defeated) {
            if gone {
                arena.fading.push(enemy);
            } else {
                arena.enemies.push(enemy);
            }
        }
    }
    if spent.iter().any(|&s| s) {
        let mut flags = spent.into_iter();
        arena
            .projectiles
            .retain(|_| !flags.next().unwrap_or(false));
    }

    report
}
