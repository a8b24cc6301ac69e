//! Players, their characters and the character silhouette
//!
//! A character is never stored: it is derived from the platform building
//! every time it is needed. Silhouette coordinates are relative to the
//! platform's top-center, Y-up.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::city::Building;
use super::sdf::{polygon_contains, sd_quadratic_stroke};
use super::state::GamePhase;
use crate::consts::*;

/// One of the two throwers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// The other player
    #[inline]
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// 1-based number shown to humans
    #[inline]
    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    /// 0-based slot for per-player arrays
    #[inline]
    pub fn index(self) -> usize {
        self.number() as usize - 1
    }

    /// -1 for the left player, +1 for the right player
    #[inline]
    pub fn side(self) -> f32 {
        match self {
            Player::One => -1.0,
            Player::Two => 1.0,
        }
    }
}

/// Platform building for a player
///
/// Buildings must hold at least `MIN_BUILDING_COUNT` entries.
pub fn platform(player: Player, buildings: &[Building]) -> &Building {
    &buildings[super::city::platform_index(player, buildings.len())]
}

/// Hand offset from the platform top-center
#[inline]
pub fn hand_offset(player: Player) -> Vec2 {
    Vec2::new(player.side() * HAND_OFFSET_X, HAND_OFFSET_Y)
}

/// World position of a player's throwing hand
pub fn position_character(player: Player, buildings: &[Building]) -> Vec2 {
    platform(player, buildings).top_center() + hand_offset(player)
}

/// Screen-space drag handle around the resting projectile
///
/// Measured in pixels from the viewport's bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrabArea {
    pub left: f32,
    pub bottom: f32,
    pub size: f32,
}

impl GrabArea {
    /// Whether a screen point (measured from the bottom-left) is on the handle
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left
            && x <= self.left + self.size
            && y >= self.bottom
            && y <= self.bottom + self.size
    }
}

pub fn grab_area(hand: Vec2, scale: f32) -> GrabArea {
    GrabArea {
        left: hand.x * scale - GRAB_AREA_RADIUS,
        bottom: hand.y * scale - GRAB_AREA_RADIUS,
        size: GRAB_AREA_RADIUS * 2.0,
    }
}

/// Body outline, closed implicitly back to the first point
pub const BODY_OUTLINE: [Vec2; 12] = [
    Vec2::new(0.0, 15.0),
    Vec2::new(-7.0, 0.0),
    Vec2::new(-20.0, 0.0),
    Vec2::new(-17.0, 18.0),
    Vec2::new(-20.0, 44.0),
    Vec2::new(-11.0, 77.0),
    Vec2::new(0.0, 84.0),
    Vec2::new(11.0, 77.0),
    Vec2::new(20.0, 44.0),
    Vec2::new(17.0, 18.0),
    Vec2::new(20.0, 0.0),
    Vec2::new(7.0, 0.0),
];

/// Shoulder height and half-width
const SHOULDER: Vec2 = Vec2::new(14.0, 50.0);

/// Which arm, seen from the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arm {
    Left,
    Right,
}

impl Arm {
    #[inline]
    fn side(self) -> f32 {
        match self {
            Arm::Left => -1.0,
            Arm::Right => 1.0,
        }
    }

    /// The arm on the outer side of a player's platform, which does the throwing
    #[inline]
    pub fn throwing(player: Player) -> Self {
        match player {
            Player::One => Arm::Left,
            Player::Two => Arm::Right,
        }
    }
}

/// Arm posture
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArmPose {
    /// Hanging down beside the body
    Resting,
    /// Held up at hand height
    Raised,
    /// Pulled back against the aim drag, following the projectile marker
    Aiming { velocity: Vec2 },
}

/// A limb as a quadratic curve, relative to the character origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmCurve {
    pub start: Vec2,
    pub control: Vec2,
    pub end: Vec2,
}

impl ArmPose {
    /// Curve for this pose on the given arm
    pub fn curve(self, arm: Arm) -> ArmCurve {
        let side = arm.side();
        let start = Vec2::new(side * SHOULDER.x, SHOULDER.y);
        let (control, end) = match self {
            ArmPose::Resting => (Vec2::new(side * 44.0, 45.0), Vec2::new(side * 28.0, 12.0)),
            ArmPose::Raised => (
                Vec2::new(side * 44.0, 63.0),
                Vec2::new(side * HAND_OFFSET_X, HAND_OFFSET_Y),
            ),
            ArmPose::Aiming { velocity } => (
                Vec2::new(side * 44.0, 63.0),
                Vec2::new(side * HAND_OFFSET_X, HAND_OFFSET_Y) - velocity / AIM_PULLBACK_DIVISOR,
            ),
        };
        ArmCurve {
            start,
            control,
            end,
        }
    }
}

/// Arm poses of `player`, given the round situation
///
/// Returns `[left, right]`.
pub fn arm_poses(
    player: Player,
    phase: GamePhase,
    current: Player,
    aim_velocity: Vec2,
) -> [ArmPose; 2] {
    match phase {
        GamePhase::Aiming if player == current => {
            let aiming = ArmPose::Aiming {
                velocity: aim_velocity,
            };
            match Arm::throwing(player) {
                Arm::Left => [aiming, ArmPose::Resting],
                Arm::Right => [ArmPose::Resting, aiming],
            }
        }
        GamePhase::Celebrating if player == current => [ArmPose::Raised, ArmPose::Raised],
        _ => [ArmPose::Resting, ArmPose::Resting],
    }
}

/// A posed character anchored in the world
#[derive(Debug, Clone, PartialEq)]
pub struct Silhouette {
    /// Platform top-center
    pub origin: Vec2,
    pub arms: [ArmCurve; 2],
}

impl Silhouette {
    pub fn new(origin: Vec2, poses: [ArmPose; 2]) -> Self {
        Self {
            origin,
            arms: [poses[0].curve(Arm::Left), poses[1].curve(Arm::Right)],
        }
    }

    /// Body outline in world coordinates
    pub fn body(&self) -> [Vec2; 12] {
        BODY_OUTLINE.map(|p| p + self.origin)
    }

    /// Whether a world point lies on the body or within either arm stroke
    pub fn contains(&self, point: Vec2) -> bool {
        let local = point - self.origin;
        if polygon_contains(&BODY_OUTLINE, local) {
            return true;
        }
        self.arms.iter().any(|arm| {
            sd_quadratic_stroke(local, arm.start, arm.control, arm.end, ARM_STROKE_WIDTH) <= 0.0
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_buildings() -> Vec<Building> {
        (0..8)
            .map(|i| Building {
                x: i as f32 * 104.0,
                width: 100.0,
                height: 50.0,
                lights: Vec::new(),
            })
            .collect()
    }

    #[test]
    fn test_player_helpers() {
        assert_eq!(Player::One.opponent(), Player::Two);
        assert_eq!(Player::Two.opponent(), Player::One);
        assert_eq!(Player::One.index(), 0);
        assert_eq!(Player::Two.number(), 2);
    }

    #[test]
    fn test_hand_positions() {
        let buildings = flat_buildings();
        // buildings[1]: x=104, center 154
        assert_eq!(position_character(Player::One, &buildings), Vec2::new(126.0, 157.0));
        // buildings[6]: x=624, center 674
        assert_eq!(position_character(Player::Two, &buildings), Vec2::new(702.0, 157.0));
    }

    #[test]
    fn test_grab_area() {
        let area = grab_area(Vec2::new(100.0, 200.0), 0.5);
        assert_eq!(area.left, 35.0);
        assert_eq!(area.bottom, 85.0);
        assert!(area.contains(50.0, 100.0));
        assert!(!area.contains(10.0, 100.0));
    }

    #[test]
    fn test_body_hit() {
        let s = Silhouette::new(Vec2::new(500.0, 100.0), [ArmPose::Resting; 2]);
        // Chest
        assert!(s.contains(Vec2::new(500.0, 150.0)));
        // Above the head
        assert!(!s.contains(Vec2::new(500.0, 190.0)));
        // Gap between the legs
        assert!(!s.contains(Vec2::new(500.0, 105.0)));
    }

    #[test]
    fn test_arm_stroke_hit() {
        let s = Silhouette::new(Vec2::ZERO, [ArmPose::Resting; 2]);
        // Resting hands end at (±28, 12)
        assert!(s.contains(Vec2::new(-28.0, 12.0)));
        assert!(s.contains(Vec2::new(28.0, 12.0)));
        // Far outside the reach of either arm
        assert!(!s.contains(Vec2::new(60.0, 12.0)));
    }

    #[test]
    fn test_raised_arm_reaches_hand_height() {
        let resting = Silhouette::new(Vec2::ZERO, [ArmPose::Resting; 2]);
        let raised = Silhouette::new(Vec2::ZERO, [ArmPose::Raised; 2]);
        let hand = Vec2::new(-HAND_OFFSET_X, HAND_OFFSET_Y);
        assert!(raised.contains(hand));
        assert!(!resting.contains(hand));
    }

    #[test]
    fn test_poses_by_phase() {
        let v = Vec2::new(50.0, 80.0);
        let [l, r] = arm_poses(Player::One, GamePhase::Aiming, Player::One, v);
        assert_eq!(l, ArmPose::Aiming { velocity: v });
        assert_eq!(r, ArmPose::Resting);

        let [l, r] = arm_poses(Player::Two, GamePhase::Aiming, Player::Two, v);
        assert_eq!(l, ArmPose::Resting);
        assert_eq!(r, ArmPose::Aiming { velocity: v });

        // The waiting player rests
        assert_eq!(
            arm_poses(Player::Two, GamePhase::Aiming, Player::One, v),
            [ArmPose::Resting; 2]
        );
        assert_eq!(
            arm_poses(Player::Two, GamePhase::InFlight, Player::One, v),
            [ArmPose::Resting; 2]
        );
        assert_eq!(
            arm_poses(Player::One, GamePhase::Celebrating, Player::One, v),
            [ArmPose::Raised; 2]
        );
    }

    #[test]
    fn test_aiming_arm_follows_marker() {
        let v = Vec2::new(62.5, 0.0);
        let curve = ArmPose::Aiming { velocity: v }.curve(Arm::Left);
        assert_eq!(curve.end, Vec2::new(-38.0, HAND_OFFSET_Y));
    }
}
