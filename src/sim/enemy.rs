//! Bouncing circular enemies
//!
//! Two kinds share one movement/collision routine parameterized by the
//! kind's preset. Visual transitions (descend after a bounce, shrink after a
//! hit) are per-enemy state machines advanced from the main tick, never
//! from a side task.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::geom::{Rect, Rgb};
use crate::audio::SoundCue;
use crate::consts::*;

/// Enemy size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Big,
    Small,
}

impl EnemyKind {
    /// Initial width and height
    pub fn size(self) -> i32 {
        match self {
            EnemyKind::Big => BIG_SIZE,
            EnemyKind::Small => SMALL_SIZE,
        }
    }

    /// Initial speed magnitude (pixels per tick)
    pub fn base_speed(self) -> f32 {
        match self {
            EnemyKind::Big => BIG_SPEED,
            EnemyKind::Small => SMALL_SPEED,
        }
    }

    /// Size lost per projectile hit
    pub fn shrink_amount(self) -> i32 {
        match self {
            EnemyKind::Big => BIG_SHRINK,
            EnemyKind::Small => SMALL_SHRINK,
        }
    }

    /// Score awarded per hit
    pub fn points(self) -> u32 {
        match self {
            EnemyKind::Big => BIG_POINTS,
            EnemyKind::Small => SMALL_POINTS,
        }
    }

    /// The other kind (auto-spawn alternates)
    pub fn toggled(self) -> Self {
        match self {
            EnemyKind::Big => EnemyKind::Small,
            EnemyKind::Small => EnemyKind::Big,
        }
    }
}

/// In-flight descend transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descent {
    /// Pixels left to drop
    pub steps_remaining: i32,
    /// Speed-ups to apply once the drop completes (one per bounce)
    pub boosts: u32,
}

/// In-flight shrink transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shrink {
    /// Size the animation converges to (never below zero)
    pub target: i32,
    /// Steps taken so far; the enemy is nudged on even steps to stay centered
    pub frame: u32,
}

/// Result of registering a projectile hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitResult {
    /// Enemy survives with a smaller target size
    Damaged,
    /// Target size reached zero; enemy leaves the authoritative collection
    Defeated,
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    /// Current (animated) bounds, used for movement and collisions
    pub bounds: Rect,
    /// Signed horizontal speed (pixels per tick, truncated when applied)
    pub speed: f32,
    pub color: Rgb,
    /// Authoritative size once all pending shrinks have played out
    pub target_size: i32,
    /// Number of wall bounces so far
    pub bounces: u32,
    pub descent: Option<Descent>,
    pub shrink: Option<Shrink>,
}

impl Enemy {
    pub fn new(id: u32, kind: EnemyKind, pos: IVec2, color: Rgb) -> Self {
        let size = kind.size();
        Self {
            id,
            kind,
            bounds: Rect::new(pos.x, pos.y, size, size),
            speed: kind.base_speed(),
            color,
            target_size: size,
            bounces: 0,
            descent: None,
            shrink: None,
        }
    }

    /// Advance one tick of horizontal travel. Returns true on a wall bounce.
    ///
    /// The proposed position is always applied; a bounce only flips the
    /// direction and schedules a descent.
    pub fn advance(&mut self, arena_width: i32) -> bool {
        let proposed = self.bounds.pos.x + self.speed as i32;
        let bounced = proposed + self.bounds.width() > arena_width || proposed < 0;
        if bounced {
            self.speed = -self.speed;
            self.bounces += 1;
            self.schedule_descent();
        }
        self.bounds.pos.x = proposed;
        bounced
    }

    /// Queue a drop of exactly one enemy height
    fn schedule_descent(&mut self) {
        let height = self.bounds.height().max(0);
        match &mut self.descent {
            Some(descent) => {
                descent.steps_remaining += height;
                descent.boosts += 1;
            }
            None => {
                self.descent = Some(Descent {
                    steps_remaining: height,
                    boosts: 1,
                });
            }
        }
    }

    /// Apply a projectile hit: lower the target size and start shrinking
    pub fn register_hit(&mut self) -> HitResult {
        self.target_size -= self.kind.shrink_amount();
        let target = self.target_size.max(0);
        match &mut self.shrink {
            Some(shrink) => shrink.target = target,
            None => self.shrink = Some(Shrink { target, frame: 0 }),
        }
        if self.target_size <= 0 {
            HitResult::Defeated
        } else {
            HitResult::Damaged
        }
    }

    /// True once a hit has brought the target size to zero
    pub fn is_defeated(&self) -> bool {
        self.target_size <= 0
    }

    /// True while any transition is still playing
    pub fn is_animating(&self) -> bool {
        self.descent.is_some() || self.shrink.is_some()
    }

    /// Advance transitions by `steps` animation steps.
    ///
    /// Returns the cue to play when a shrink finishes on this call.
    pub fn advance_transitions(&mut self, steps: u32) -> Option<SoundCue> {
        let mut cue = None;
        for _ in 0..steps {
            self.step_descent();
            if let Some(finished) = self.step_shrink() {
                cue = Some(finished);
            }
            if !self.is_animating() {
                break;
            }
        }
        cue
    }

    fn step_descent(&mut self) {
        let Some(descent) = &mut self.descent else {
            return;
        };
        if descent.steps_remaining > 0 {
            self.bounds.pos.y += 1;
            descent.steps_remaining -= 1;
        }
        if descent.steps_remaining <= 0 {
            let boost = BOUNCE_SPEEDUP * descent.boosts as f32;
            // Speed-up keeps the current direction of travel
            if self.speed >= 0.0 {
                self.speed += boost;
            } else {
                self.speed -= boost;
            }
            self.descent = None;
        }
    }

    fn step_shrink(&mut self) -> Option<SoundCue> {
        let shrink = self.shrink.as_mut()?;
        let size = &mut self.bounds.size;
        if size.x > shrink.target || size.y > shrink.target {
            if shrink.frame % 2 == 0 {
                self.bounds.pos += IVec2::ONE;
            }
            size.x = (size.x - 1).max(shrink.target);
            size.y = (size.y - 1).max(shrink.target);
            shrink.frame += 1;
        }
        if size.x <= shrink.target && size.y <= shrink.target {
            self.shrink = None;
            return Some(if self.target_size <= 0 {
                SoundCue::Defeated
            } else {
                SoundCue::Hit
            });
        }
        None
    }
}
