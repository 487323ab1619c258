//! The player's turret: a base with a gun on top

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::geom::{Rect, Rgb};
use crate::consts::*;

/// Horizontal movement intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

/// The player turret
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turret {
    pub base: Rect,
    pub gun: Rect,
    pub color: Rgb,
    moving_left: bool,
    moving_right: bool,
}

impl Turret {
    /// Turret centered at the bottom of an arena of the given size
    pub fn new(arena_width: i32, arena_height: i32, color: Rgb) -> Self {
        Self {
            base: Rect::new(
                arena_width / 2 - TURRET_BASE_WIDTH / 2,
                arena_height - TURRET_BASE_RISE,
                TURRET_BASE_WIDTH,
                TURRET_BASE_HEIGHT,
            ),
            gun: Rect::new(
                arena_width / 2 - TURRET_GUN_WIDTH / 2,
                arena_height - TURRET_GUN_RISE,
                TURRET_GUN_WIDTH,
                TURRET_GUN_HEIGHT,
            ),
            color,
            moving_left: false,
            moving_right: false,
        }
    }

    /// Set or clear one direction flag. Both may be held; they cancel.
    pub fn set_direction(&mut self, direction: Direction, active: bool) {
        match direction {
            Direction::Left => self.moving_left = active,
            Direction::Right => self.moving_right = active,
        }
    }

    pub fn is_moving(&self, direction: Direction) -> bool {
        match direction {
            Direction::Left => self.moving_left,
            Direction::Right => self.moving_right,
        }
    }

    /// Net horizontal delta for this tick
    pub fn delta(&self) -> i32 {
        let mut delta = 0;
        if self.moving_left {
            delta -= TURRET_STEP;
        }
        if self.moving_right {
            delta += TURRET_STEP;
        }
        delta
    }

    /// Translate by the held direction, then clamp to the arena walls
    pub fn advance(&mut self, arena_width: i32) {
        let delta = IVec2::new(self.delta(), 0);
        self.base.translate(delta);
        self.gun.translate(delta);

        if self.base.left() <= 0 {
            self.base.pos.x = 0;
            self.gun.pos.x = self.base.width() / 2 - self.gun.width() / 2;
        }
        if self.base.right() >= arena_width {
            self.base.pos.x = arena_width - self.base.width();
            self.gun.pos.x = arena_width - self.base.width() / 2 - self.gun.width() / 2;
        }
    }

    /// Spawn point for a new projectile: centered over the gun, just above it
    pub fn muzzle(&self) -> IVec2 {
        IVec2::new(
            self.gun.left() + self.gun.width() / 2 - MUZZLE_OFFSET,
            self.gun.top() - MUZZLE_OFFSET,
        )
    }

    /// Whether `rect` touches the gun. The base is not part of the hitbox.
    pub fn is_struck_by(&self, rect: &Rect) -> bool {
        rect.intersects(&self.gun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turret() -> Turret {
        Turret::new(700, 500, Rgb::default())
    }

    #[test]
    fn test_initial_layout() {
        let t = turret();
        assert_eq!(t.base, Rect::new(315, 455, 70, 30));
        assert_eq!(t.gun, Rect::new(339, 400, 22, 80));
        assert_eq!(t.muzzle(), IVec2::new(343, 393));
    }

    #[test]
    fn test_directions_cancel() {
        let mut t = turret();
        t.set_direction(Direction::Left, true);
        t.set_direction(Direction::Right, true);
        assert_eq!(t.delta(), 0);
        t.advance(700);
        assert_eq!(t.base.left(), 315);

        t.set_direction(Direction::Right, false);
        assert_eq!(t.delta(), -10);
        t.advance(700);
        assert_eq!(t.base.left(), 305);
        assert_eq!(t.gun.left(), 329);
    }

    #[test]
    fn test_clamps_at_left_wall() {
        let mut t = turret();
        t.set_direction(Direction::Left, true);
        for _ in 0..100 {
            t.advance(700);
        }
        assert_eq!(t.base.left(), 0);
        assert_eq!(t.gun.left(), 35 - 11);
    }

    #[test]
    fn test_clamps_at_right_wall() {
        let mut t = turret();
        t.set_direction(Direction::Right, true);
        for _ in 0..100 {
            t.advance(700);
        }
        assert_eq!(t.base.right(), 700);
        assert_eq!(t.gun.left(), 700 - 35 - 11);
    }

    #[test]
    fn test_struck_only_by_gun() {
        let t = turret();
        assert!(t.is_struck_by(&Rect::new(330, 380, 30, 30)));
        // Overlaps the base beside the gun
        assert!(!t.is_struck_by(&Rect::new(290, 450, 30, 30)));
        assert!(!t.is_struck_by(&Rect::new(360, 455, 20, 20)));
        assert!(!t.is_struck_by(&Rect::new(0, 0, 56, 56)));
    }
}
