//! Combat primitives - projectiles, bounds, damage

use uuid::Uuid;

use crate::util::time::tick_delta;

use super::Side;

/// Simulation bounds (projectiles outside are destroyed)
pub const ARENA_WIDTH: f32 = 800.0;
pub const ARENA_HEIGHT: f32 = 600.0;

/// Fixed bounding boxes
pub const PLAYER_SIZE: (f32, f32) = (64.0, 64.0);
pub const PROJECTILE_SIZE: (f32, f32) = (16.0, 8.0);

/// Baseline stats, restored when ability effects wear off
pub const BASE_MOVE_SPEED: f32 = 300.0;
pub const BASE_PROJECTILE_SPEED: f32 = 600.0;
pub const BASE_DAMAGE: u32 = 10;
pub const MAX_HEALTH: u32 = 100;

/// Active projectile
///
/// Local-side shots travel toward positive x, remote-side shots toward
/// the local player at negative x.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: Uuid,
    pub side: Side,
    pub x: f32,
    pub y: f32,
    pub vel_x: f32,
    pub damage: u32,
}

impl Projectile {
    pub fn spawn(side: Side, x: f32, y: f32, damage: u32, speed_mult: f32) -> Self {
        let magnitude = BASE_PROJECTILE_SPEED * speed_mult;
        let vel_x = match side {
            Side::Local => magnitude,
            Side::Remote => -magnitude,
        };
        Self {
            id: Uuid::new_v4(),
            side,
            x,
            y,
            vel_x,
            damage,
        }
    }

    /// Advance one tick; returns false once the projectile left the arena
    pub fn advance(&mut self) -> bool {
        self.x += self.vel_x * tick_delta();
        (0.0..=ARENA_WIDTH).contains(&self.x)
    }

    /// Overlap check against a player box at (px, py)
    pub fn hits_player(&self, px: f32, py: f32) -> bool {
        rects_overlap(
            self.x,
            self.y,
            PROJECTILE_SIZE.0,
            PROJECTILE_SIZE.1,
            px,
            py,
            PLAYER_SIZE.0,
            PLAYER_SIZE.1,
        )
    }
}

#[allow(clippy::too_many_arguments)]
fn rects_overlap(ax: f32, ay: f32, aw: f32, ah: f32, bx: f32, by: f32, bw: f32, bh: f32) -> bool {
    ax < bx + bw && bx < ax + aw && ay < by + bh && by < ay + ah
}

/// Apply damage to health, returns (new_health, is_dead)
pub fn apply_damage(health: u32, damage: u32) -> (u32, bool) {
    let new_health = health.saturating_sub(damage);
    (new_health, new_health == 0)
}

/// Cap a reported health value into the valid range
pub fn clamp_health(health: u32) -> u32 {
    health.min(MAX_HEALTH)
}
