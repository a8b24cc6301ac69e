//! Game state and core simulation types
//!
//! One `GameState` describes a whole round. It is rebuilt from scratch on
//! every new game and mutated in place otherwise.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::character::{GrabArea, Player, Silhouette, arm_poses, grab_area, position_character};
use super::city::City;
use super::projectile::Projectile;
use super::viewport::{Viewport, compute_scale};
use crate::consts::MIN_BUILDING_COUNT;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Current player is dragging out a throw
    Aiming,
    /// Projectile is flying
    InFlight,
    /// Someone was hit; waits for a new game
    Celebrating,
}

/// A permanent hole blown into the skyline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlastCrater {
    pub center: Vec2,
}

/// Angle/speed panel for one player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AimReadout {
    /// Degrees above the horizontal
    pub angle: i32,
    pub speed: i32,
}

impl AimReadout {
    /// Readout for a screen-space drag (Y down)
    pub fn from_drag(drag: Vec2) -> Self {
        let hypotenuse = drag.length();
        if hypotenuse <= f32::EPSILON {
            return Self::default();
        }
        let angle = (drag.y / hypotenuse).clamp(-1.0, 1.0).asin().to_degrees();
        Self {
            angle: angle.round() as i32,
            speed: hypotenuse.round() as i32,
        }
    }
}

/// Complete round state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub current_player: Player,
    /// Set when a throw hits the opponent
    pub winner: Option<Player>,
    pub projectile: Projectile,
    pub city: City,
    /// Impact points, in the order they were made
    pub craters: Vec<BlastCrater>,
    pub viewport: Viewport,
    /// World units to pixels
    pub scale: f32,
    /// Indexed by `Player::index`
    pub readouts: [AimReadout; 2],
}

impl GameState {
    /// A fresh round on `city`, player one aiming
    ///
    /// # Panics
    ///
    /// If `city` has fewer than `MIN_BUILDING_COUNT` buildings. Cities from
    /// `generate_city` always have enough.
    pub fn new(city: City, viewport: Viewport) -> Self {
        assert!(
            city.buildings.len() >= MIN_BUILDING_COUNT,
            "city needs at least {} buildings, got {}",
            MIN_BUILDING_COUNT,
            city.buildings.len()
        );
        let hand = position_character(Player::One, &city.buildings);
        let scale = compute_scale(viewport.width, city.last_building()).unwrap_or(1.0);
        Self {
            phase: GamePhase::Aiming,
            current_player: Player::One,
            winner: None,
            projectile: Projectile::new(hand),
            city,
            craters: Vec::new(),
            viewport,
            scale,
            readouts: [AimReadout::default(); 2],
        }
    }

    /// Recompute the scale from the current viewport and city
    pub fn refresh_scale(&mut self) -> bool {
        match compute_scale(self.viewport.width, self.city.last_building()) {
            Some(scale) => {
                self.scale = scale;
                true
            }
            None => false,
        }
    }

    /// Right edge of the playfield in world units
    #[inline]
    pub fn world_width(&self) -> f32 {
        self.viewport.world_width(self.scale)
    }

    /// Throwing hand of a player
    pub fn hand_position(&self, player: Player) -> Vec2 {
        position_character(player, &self.city.buildings)
    }

    /// Platform top-center of a player
    pub fn character_origin(&self, player: Player) -> Vec2 {
        self.city.platform(player).top_center()
    }

    /// A player's silhouette, posed for the current phase
    pub fn silhouette(&self, player: Player) -> Silhouette {
        let poses = arm_poses(
            player,
            self.phase,
            self.current_player,
            self.projectile.velocity,
        );
        Silhouette::new(self.character_origin(player), poses)
    }

    /// Screen-space drag handle around the current player's hand
    pub fn grab_area(&self) -> GrabArea {
        grab_area(self.hand_position(self.current_player), self.scale)
    }

    pub fn readout(&self, player: Player) -> AimReadout {
        self.readouts[player.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::city::generate_city;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn state() -> GameState {
        let mut rng = Pcg32::seed_from_u64(42);
        GameState::new(generate_city(&mut rng, 11, 8), Viewport::default())
    }

    #[test]
    fn test_new_round() {
        let s = state();
        assert_eq!(s.phase, GamePhase::Aiming);
        assert_eq!(s.current_player, Player::One);
        assert!(s.winner.is_none());
        assert!(s.craters.is_empty());
        assert_eq!(s.projectile.pos, s.hand_position(Player::One));
        assert_eq!(s.projectile.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_scale_spans_viewport() {
        let s = state();
        assert!((s.scale * s.city.total_width() - s.viewport.width).abs() < 1e-2);
        assert!((s.world_width() - s.city.total_width()).abs() < 1e-2);
    }

    #[test]
    fn test_readout_from_drag() {
        let r = AimReadout::from_drag(Vec2::new(-50.0, 80.0));
        assert_eq!(r, AimReadout { angle: 58, speed: 94 });

        // Dragging upward aims below the horizontal
        let r = AimReadout::from_drag(Vec2::new(30.0, -40.0));
        assert_eq!(r, AimReadout { angle: -53, speed: 50 });

        assert_eq!(AimReadout::from_drag(Vec2::ZERO), AimReadout::default());
    }

    #[test]
    #[should_panic(expected = "buildings")]
    fn test_new_rejects_tiny_city() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut city = generate_city(&mut rng, 0, 8);
        city.buildings.truncate(2);
        GameState::new(city, Viewport::default());
    }

    #[test]
    fn test_grab_area_follows_current_player() {
        let mut s = state();
        let one = s.grab_area();
        s.current_player = Player::Two;
        let two = s.grab_area();
        assert!(two.left > one.left);
    }
}
