//! Fixed timestep simulation tick
//!
//! Order within a tick:
//! 1. collision pass (may end the session, score, shrink, remove)
//! 2. movement (turret, enemies, projectiles)
//! 3. transitions (descend/shrink steps for live and fading enemies)
//! 4. drop enemies below the floor
//! 5. auto-spawn countdown

use super::collision::{CollisionReport, resolve_collisions};
use super::state::{Arena, GameEvent};

/// What one tick did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Tick index after this tick
    pub tick: u64,
    /// Score after this tick
    pub score: u32,
    pub collisions: CollisionReport,
    /// Enemies that bounced off a wall this tick
    pub bounces: u32,
    /// Projectiles removed for leaving the arena
    pub expired: u32,
}

/// Advance the arena by one fixed tick
///
/// When an enemy strikes the turret the tick stops right after the
/// collision pass; nothing else moves.
pub fn tick(arena: &mut Arena) -> TickReport {
    arena.time_ticks += 1;

    let collisions = resolve_collisions(arena);
    if collisions.turret_struck {
        return TickReport {
            tick: arena.time_ticks,
            score: arena.score,
            collisions,
            ..Default::default()
        };
    }

    // --- MOVEMENT ---
    arena.turret.advance(arena.width);

    let mut bounces = 0;
    for enemy in &mut arena.enemies {
        if enemy.advance(arena.width) {
            bounces += 1;
            arena.events.push(GameEvent::EnemyBounced { id: enemy.id });
            log::trace!("Enemy {} bounced, speed now {:.1}", enemy.id, enemy.speed);
        }
    }

    // Out-of-bounds is judged on the position from before this tick's move
    let mut expired = 0;
    let height = arena.height;
    let events = &mut arena.events;
    arena.projectiles.retain_mut(|projectile| {
        if projectile.out_of_bounds(height) {
            expired += 1;
            events.push(GameEvent::ProjectileExpired { id: projectile.id });
            return false;
        }
        projectile.advance();
        true
    });

    // --- TRANSITIONS ---
    let steps = arena.anim_steps_per_tick();
    for enemy in arena.enemies.iter_mut().chain(arena.fading.iter_mut()) {
        if let Some(cue) = enemy.advance_transitions(steps) {
            arena.events.push(GameEvent::Cue(cue));
        }
    }
    arena.fading.retain(|enemy| enemy.shrink.is_some());

    // Enemies that sank below the arena floor can no longer reach the gun
    let height = arena.height;
    let events = &mut arena.events;
    arena.enemies.retain(|enemy| {
        if enemy.bounds.top() < height {
            return true;
        }
        log::debug!("Enemy {} left the arena", enemy.id);
        events.push(GameEvent::EnemyEscaped { id: enemy.id });
        false
    });

    // --- SPAWN ---
    arena.update_spawner();

    TickReport {
        tick: arena.time_ticks,
        score: arena.score,
        collisions,
        bounces,
        expired,
    }
}

#[cfg(test)]
mod tests {
    use glam::IVec2;

    use super::*;
    use crate::audio::SoundCue;
    use crate::settings::Settings;
    use crate::sim::enemy::{Enemy, EnemyKind};
    use crate::sim::geom::Rgb;
    use crate::sim::projectile::Projectile;

    /// Arena with no enemies and auto-spawn pushed far out
    fn quiet_arena() -> Arena {
        let mut arena = Arena::new(&Settings::default(), 12345).expect("valid settings");
        arena.enemies.clear();
        arena.spawn_countdown = 10_000;
        arena.drain_events();
        arena
    }

    fn add_enemy(arena: &mut Arena, kind: EnemyKind, x: i32, y: i32) -> u32 {
        let id = arena.next_entity_id();
        arena
            .enemies
            .push(Enemy::new(id, kind, IVec2::new(x, y), Rgb::default()));
        id
    }

    fn add_projectile(arena: &mut Arena, x: i32, y: i32) -> u32 {
        let id = arena.next_entity_id();
        arena
            .projectiles
            .push(Projectile::new(id, IVec2::new(x, y), Rgb::default()));
        id
    }

    #[test]
    fn test_scenario_single_hit() {
        let mut arena = quiet_arena();
        let enemy = add_enemy(&mut arena, EnemyKind::Big, 300, 200);
        add_projectile(&mut arena, 300, 195);

        let report = tick(&mut arena);
        assert_eq!(report.score, 100);
        assert_eq!(report.collisions.hits, 1);
        assert!(arena.projectiles.is_empty());

        let enemy = arena.enemy(enemy).expect("still alive");
        assert_eq!(enemy.target_size, 28);
        // Three animation steps played this tick
        assert_eq!(enemy.bounds.size, IVec2::splat(53));
        assert_eq!(enemy.bounds.left(), 300 + 4 + 2);
    }

    #[test]
    fn test_projectile_expires_tick_after_leaving() {
        let mut arena = quiet_arena();
        let id = add_projectile(&mut arena, 10, 3);

        tick(&mut arena);
        assert_eq!(arena.projectiles[0].bounds.top(), -2);

        let report = tick(&mut arena);
        assert_eq!(report.expired, 1);
        assert!(arena.projectiles.is_empty());
        assert!(arena.events.contains(&GameEvent::ProjectileExpired { id }));
    }

    #[test]
    fn test_projectile_at_top_is_removed_without_moving() {
        let mut arena = quiet_arena();
        add_projectile(&mut arena, 10, 0);
        add_projectile(&mut arena, 40, 500);
        let keep = add_projectile(&mut arena, 70, 250);

        tick(&mut arena);
        assert_eq!(arena.projectiles.len(), 1);
        assert_eq!(arena.projectiles[0].id, keep);
        assert_eq!(arena.projectiles[0].bounds.top(), 245);
    }

    #[test]
    fn test_bounce_schedules_one_descent() {
        let mut arena = quiet_arena();
        let id = add_enemy(&mut arena, EnemyKind::Big, 0, 50);
        arena.enemies[0].speed = -4.0;

        let report = tick(&mut arena);
        assert_eq!(report.bounces, 1);
        let enemy = arena.enemy(id).expect("alive");
        assert!(enemy.speed > 0.0);
        assert_eq!(enemy.bounces, 1);
        assert_eq!(enemy.descent.map(|d| d.steps_remaining), Some(56 - 3));
        assert_eq!(enemy.bounds.top(), 53);

        let report = tick(&mut arena);
        assert_eq!(report.bounces, 0);
        assert_eq!(arena.enemy(id).map(|e| e.bounces), Some(1));
    }

    #[test]
    fn test_defeated_enemy_fades_then_plays_cue() {
        let mut arena = quiet_arena();
        let id = add_enemy(&mut arena, EnemyKind::Small, 100, 100);
        add_projectile(&mut arena, 105, 105);

        tick(&mut arena);
        assert!(arena.enemy(id).is_none());
        assert_eq!(arena.fading.len(), 1);

        // 30 steps at 3 per tick
        for _ in 0..9 {
            tick(&mut arena);
        }
        assert!(arena.fading.is_empty());
        assert!(arena.events.contains(&GameEvent::Cue(SoundCue::Defeated)));
        assert!(!arena.events.contains(&GameEvent::Cue(SoundCue::Hit)));
    }

    #[test]
    fn test_turret_strike_freezes_tick() {
        let mut arena = quiet_arena();
        add_enemy(&mut arena, EnemyKind::Big, 320, 380);
        let projectile = add_projectile(&mut arena, 10, 250);

        let report = tick(&mut arena);
        assert!(report.collisions.turret_struck);
        assert_eq!(arena.projectiles[0].id, projectile);
        assert_eq!(arena.projectiles[0].bounds.top(), 250);
    }

    #[test]
    fn test_base_contact_does_not_end_tick() {
        let mut arena = quiet_arena();
        let id = add_enemy(&mut arena, EnemyKind::Big, 260, 440);
        arena.enemies[0].speed = 0.0;
        assert!(!arena.enemies[0].bounds.intersects(&arena.turret.gun));
        assert!(arena.enemies[0].bounds.intersects(&arena.turret.base));
        let projectile = add_projectile(&mut arena, 10, 250);

        let report = tick(&mut arena);
        assert!(!report.collisions.turret_struck);
        assert!(arena.enemy(id).is_some());
        // The rest of the tick ran
        assert_eq!(arena.projectiles[0].id, projectile);
        assert_eq!(arena.projectiles[0].bounds.top(), 245);
    }

    #[test]
    fn test_enemy_below_floor_is_dropped() {
        let mut arena = quiet_arena();
        let sunk = add_enemy(&mut arena, EnemyKind::Small, 100, 500);
        let edge = add_enemy(&mut arena, EnemyKind::Small, 200, 499);

        tick(&mut arena);
        assert!(arena.enemy(sunk).is_none());
        assert!(arena.enemy(edge).is_some());
        assert!(arena.events.contains(&GameEvent::EnemyEscaped { id: sunk }));
    }

    #[test]
    fn test_spawn_runs_each_tick() {
        let mut arena = quiet_arena();
        arena.spawn_countdown = 0;
        tick(&mut arena);
        assert_eq!(arena.enemies.len(), 1);
        assert!(
            arena
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::EnemySpawned { .. }))
        );
    }

    #[test]
    fn test_determinism() {
        // Two arenas with the same seed should produce identical results
        let mut a = Arena::new(&Settings::default(), 99999).expect("valid");
        let mut b = Arena::new(&Settings::default(), 99999).expect("valid");

        for n in 0..400 {
            if n % 37 == 0 {
                a.fire();
                b.fire();
            }
            tick(&mut a);
            tick(&mut b);
        }

        assert_eq!(a.score, b.score);
        assert_eq!(a.enemies.len(), b.enemies.len());
        for (x, y) in a.enemies.iter().zip(&b.enemies) {
            assert_eq!(x.bounds, y.bounds);
        }
    }
}
