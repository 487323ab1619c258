//! Projectiles fired from the turret

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::geom::{Rect, Rgb};
use crate::consts::*;

/// A projectile entity travelling straight up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub bounds: Rect,
    /// Upward speed (pixels per tick)
    pub speed: i32,
    pub color: Rgb,
}

impl Projectile {
    pub fn new(id: u32, pos: IVec2, color: Rgb) -> Self {
        Self {
            id,
            bounds: Rect::new(pos.x, pos.y, PROJECTILE_SIZE, PROJECTILE_SIZE),
            speed: PROJECTILE_SPEED,
            color,
        }
    }

    /// At or beyond either vertical bound of the arena
    pub fn out_of_bounds(&self, arena_height: i32) -> bool {
        let y = self.bounds.top();
        y <= 0 || y >= arena_height
    }

    /// Move one tick upward
    pub fn advance(&mut self) {
        self.bounds.pos.y -= self.speed;
    }
}
