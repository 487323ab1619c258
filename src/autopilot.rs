//! Idle/demo mode - an AI that plays the game
//!
//! Tracks the most dangerous enemy (the one lowest on screen), leads it by
//! the projectile's flight time, and fires only when lined up and no other
//! projectile is in flight so the limited shots are not wasted.

use crate::session::TickInput;
use crate::sim::{Arena, Enemy};

/// Horizontal slack (pixels) between gun center and predicted target
const AIM_TOLERANCE: i32 = 6;

/// Demo player
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    /// Ticks to wait before the next shot is allowed
    cooldown: u32,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick the intents for the next tick
    pub fn decide(&mut self, arena: &Arena) -> TickInput {
        self.cooldown = self.cooldown.saturating_sub(1);

        let Some(target) = most_dangerous(arena) else {
            return TickInput::default();
        };

        let gun_x = arena.turret.gun.center_x();
        let aim_x = predict_x(arena, target);
        let offset = aim_x - gun_x;

        let in_flight = !arena.projectiles.is_empty();
        let fire = offset.abs() <= AIM_TOLERANCE && !in_flight && self.cooldown == 0;
        if fire {
            self.cooldown = 10;
            log::trace!("Autopilot firing at enemy {}", target.id);
        }

        TickInput {
            move_left: offset < -AIM_TOLERANCE,
            move_right: offset > AIM_TOLERANCE,
            fire,
        }
    }
}

/// Lowest enemy on screen, ties broken by collection order
fn most_dangerous(arena: &Arena) -> Option<&Enemy> {
    arena
        .enemies
        .iter()
        .max_by(|a, b| a.bounds.bottom().cmp(&b.bounds.bottom()).then(b.id.cmp(&a.id)))
}

/// Where the target's center will be when a shot fired now reaches it,
/// folded back into the arena to account for wall bounces
fn predict_x(arena: &Arena, target: &Enemy) -> i32 {
    let muzzle_y = arena.turret.muzzle().y;
    let distance = (muzzle_y - target.bounds.center_y()).max(0);
    let speed = crate::consts::PROJECTILE_SPEED.max(1);
    let flight_ticks = distance / speed;

    let half = target.bounds.width() / 2;
    let lo = half;
    let hi = (arena.width - half).max(lo + 1);
    let span = hi - lo;

    let travel = (target.speed as i32) * flight_ticks;
    let raw = target.bounds.center_x() + travel - lo;
    // Reflect into [0, span]
    let period = 2 * span;
    let folded = raw.rem_euclid(period);
    let within = if folded > span { period - folded } else { folded };
    lo + within
}
