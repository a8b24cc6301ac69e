//! Collision detection for a single simulation sub-step
//!
//! Checks run in priority order: playfield bounds, buildings (carving
//! craters), then the opponent's silhouette.

use glam::Vec2;

use super::city::Building;
use super::character::Silhouette;
use super::sdf::sd_circle;
use super::state::{BlastCrater, GameState};
use crate::consts::{BLAST_CRATER_RADIUS, PROJECTILE_MARGIN};

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Collision {
    /// Still flying
    None,
    /// Left the playfield through the bottom or a side
    BoundsMiss,
    /// Struck a building; a crater was carved at `crater`
    BuildingHit { crater: Vec2 },
    /// Struck the opponent
    CharacterHit,
}

impl Collision {
    /// Whether the throw ended without hitting anyone
    #[inline]
    pub fn is_miss(&self) -> bool {
        matches!(self, Collision::BoundsMiss | Collision::BuildingHit { .. })
    }
}

/// Outcome of the building test
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BuildingContact {
    /// Not touching any building
    Clear,
    /// Touching a building but inside an existing crater
    ThroughCrater,
    /// Fresh impact, crater recorded
    Impact(Vec2),
}

/// Off the bottom, left or right edge of the playfield
///
/// The sky is open: a projectile may leave through the top and fall back.
pub fn out_of_bounds(pos: Vec2, world_width: f32) -> bool {
    pos.y < 0.0 || pos.x < 0.0 || pos.x > world_width
}

/// Whether the projectile overlaps a building's rectangle
#[inline]
pub fn touches_building(pos: Vec2, building: &Building) -> bool {
    pos.x + PROJECTILE_MARGIN > building.x
        && pos.x - PROJECTILE_MARGIN < building.right()
        && pos.y - PROJECTILE_MARGIN < building.height
}

/// Whether `pos` falls inside an existing crater
pub fn inside_crater(pos: Vec2, craters: &[BlastCrater]) -> bool {
    craters
        .iter()
        .any(|crater| sd_circle(pos, crater.center, BLAST_CRATER_RADIUS) < 0.0)
}

/// Test the first building the projectile touches, carving a crater on impact
///
/// Only the first touched building (in x order) decides the outcome.
pub fn check_building_hit(
    pos: Vec2,
    buildings: &[Building],
    craters: &mut Vec<BlastCrater>,
) -> BuildingContact {
    let Some(building) = buildings.iter().find(|b| touches_building(pos, b)) else {
        return BuildingContact::Clear;
    };

    if inside_crater(pos, craters) {
        log::debug!(
            "Passing through crater at ({:.1}, {:.1}) over building at x={:.1}",
            pos.x,
            pos.y,
            building.x
        );
        return BuildingContact::ThroughCrater;
    }

    craters.push(BlastCrater { center: pos });
    log::debug!("New crater at ({:.1}, {:.1})", pos.x, pos.y);
    BuildingContact::Impact(pos)
}

/// Test the projectile against a character silhouette
#[inline]
pub fn check_character_hit(pos: Vec2, target: &Silhouette) -> bool {
    target.contains(pos)
}

/// Run every check for the current projectile position
pub fn check_collision(state: &mut GameState) -> Collision {
    let pos = state.projectile.pos;

    if out_of_bounds(pos, state.world_width()) {
        return Collision::BoundsMiss;
    }

    if let BuildingContact::Impact(crater) =
        check_building_hit(pos, &state.city.buildings, &mut state.craters)
    {
        return Collision::BuildingHit { crater };
    }

    let target = state.silhouette(state.current_player.opponent());
    if check_character_hit(pos, &target) {
        return Collision::CharacterHit;
    }

    Collision::None
}
