//! The thrown projectile and its flight integration

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::character::Player;
use crate::consts::{GRAVITY, SPIN_RATE, TIME_SCALE};

/// The single projectile, reused for every throw
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    /// Cosmetic spin (radians)
    pub rotation: f32,
    pub velocity: Vec2,
}

impl Projectile {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            rotation: 0.0,
            velocity: Vec2::ZERO,
        }
    }

    /// Put the projectile back in a hand, at rest
    pub fn reset_to(&mut self, hand: Vec2) {
        self.pos = hand;
        self.rotation = 0.0;
        self.velocity = Vec2::ZERO;
    }

    /// Advance by `dt` milliseconds of flight thrown by `player`
    ///
    /// Explicit Euler: gravity is applied to velocity before position.
    pub fn step(&mut self, player: Player, dt: f32) {
        let multiplier = dt / TIME_SCALE;

        self.velocity.y -= GRAVITY * multiplier;
        self.pos += self.velocity * multiplier;

        // Each side spins the opposite way
        self.rotation += player.side() * SPIN_RATE * multiplier;
    }
}
