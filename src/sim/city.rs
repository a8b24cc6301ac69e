//! Procedural skyline generation
//!
//! The city is laid out left to right along the ground (`y = 0`), each
//! building starting `BUILDING_GAP` after the previous one ends.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::character::Player;
use crate::consts::*;
use crate::settings::LightIndexing;

/// Decorative building drawn behind the playfield (never collides)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundBuilding {
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

/// Collidable foreground building
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub x: f32,
    pub width: f32,
    pub height: f32,
    /// Window light cells (`LIGHTS_PER_BUILDING` long)
    pub lights: Vec<bool>,
}

/// A single lit window, in world coordinates (bottom-left corner)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Building {
    /// Right edge in world units
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Center of the roof, where a character stands
    #[inline]
    pub fn top_center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.x + self.width / 2.0, self.height)
    }

    /// Window rows, counted down from the roof
    pub fn floors(&self) -> usize {
        ((self.height - WINDOW_GAP) / (WINDOW_HEIGHT + WINDOW_GAP))
            .ceil()
            .max(0.0) as usize
    }

    /// Windows per row
    pub fn rooms_per_floor(&self) -> usize {
        ((self.width - WINDOW_GAP) / (WINDOW_WIDTH + WINDOW_GAP))
            .floor()
            .max(0.0) as usize
    }

    /// Whether the window at (floor, room) is lit
    pub fn is_lit(&self, floor: usize, room: usize, indexing: LightIndexing) -> bool {
        let rooms = self.rooms_per_floor();
        let index = match indexing {
            LightIndexing::PerRoom => floor * rooms + room,
            LightIndexing::Legacy => floor * rooms + floor,
        };
        self.lights.get(index).copied().unwrap_or(false)
    }

    /// All lit windows of this building
    pub fn lit_windows(&self, indexing: LightIndexing) -> Vec<Window> {
        let rooms = self.rooms_per_floor();
        let mut windows = Vec::new();
        for floor in 0..self.floors() {
            for room in 0..rooms {
                if !self.is_lit(floor, room, indexing) {
                    continue;
                }
                let top = self.height - WINDOW_GAP - floor as f32 * (WINDOW_HEIGHT + WINDOW_GAP);
                windows.push(Window {
                    x: self.x + WINDOW_GAP + room as f32 * (WINDOW_WIDTH + WINDOW_GAP),
                    y: top - WINDOW_HEIGHT,
                    width: WINDOW_WIDTH,
                    height: WINDOW_HEIGHT,
                });
            }
        }
        windows
    }
}

/// The whole skyline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub background: Vec<BackgroundBuilding>,
    pub buildings: Vec<Building>,
}

impl City {
    /// Index of the building a player stands on
    pub fn platform_index(&self, player: Player) -> usize {
        platform_index(player, self.buildings.len())
    }

    /// Building a player stands on
    ///
    /// Expects at least `MIN_BUILDING_COUNT` buildings; panics on fewer than two.
    pub fn platform(&self, player: Player) -> &Building {
        &self.buildings[self.platform_index(player)]
    }

    /// Rightmost foreground building
    ///
    /// Panics on an empty city.
    pub fn last_building(&self) -> &Building {
        &self.buildings[self.buildings.len() - 1]
    }

    /// Distance from the left edge of the world to the end of the last building
    pub fn total_width(&self) -> f32 {
        self.last_building().right()
    }
}

/// Platform index for a player in a city of `count` buildings:
/// second from the left for player one, second from the right for player two
#[inline]
pub fn platform_index(player: Player, count: usize) -> usize {
    match player {
        Player::One => 1,
        Player::Two => count.saturating_sub(2),
    }
}

fn sample<R: Rng + ?Sized>(rng: &mut R, (min, max): (f32, f32)) -> f32 {
    rng.random_range(min..max)
}

/// Generate a fresh city
///
/// `building_count` is raised to `MIN_BUILDING_COUNT` so both platforms exist.
pub fn generate_city<R: Rng + ?Sized>(
    rng: &mut R,
    background_count: usize,
    building_count: usize,
) -> City {
    let building_count = if building_count < MIN_BUILDING_COUNT {
        log::warn!(
            "City needs at least {} buildings, got {}",
            MIN_BUILDING_COUNT,
            building_count
        );
        MIN_BUILDING_COUNT
    } else {
        building_count
    };

    let mut background: Vec<BackgroundBuilding> = Vec::with_capacity(background_count);
    for _ in 0..background_count {
        let x = background
            .last()
            .map(|prev| prev.x + prev.width + BUILDING_GAP)
            .unwrap_or(BACKGROUND_FIRST_X);
        let width = sample(rng, BACKGROUND_WIDTH_RANGE);
        let height = sample(rng, BACKGROUND_HEIGHT_RANGE);
        background.push(BackgroundBuilding { x, width, height });
    }

    let platforms = [
        platform_index(Player::One, building_count),
        platform_index(Player::Two, building_count),
    ];

    let mut buildings: Vec<Building> = Vec::with_capacity(building_count);
    for index in 0..building_count {
        let x = buildings
            .last()
            .map(|prev| prev.right() + BUILDING_GAP)
            .unwrap_or(0.0);
        let width = sample(rng, BUILDING_WIDTH_RANGE);
        let height = if platforms.contains(&index) {
            sample(rng, PLATFORM_HEIGHT_RANGE)
        } else {
            sample(rng, BUILDING_HEIGHT_RANGE)
        };
        let lights = (0..LIGHTS_PER_BUILDING)
            .map(|_| rng.random_bool(LIGHT_ON_PROBABILITY))
            .collect();
        buildings.push(Building {
            x,
            width,
            height,
            lights,
        });
    }

    log::debug!(
        "Generated city: {} background, {} buildings, {:.1} wide",
        background.len(),
        buildings.len(),
        buildings.last().map(Building::right).unwrap_or(0.0)
    );

    City {
        background,
        buildings,
    }
}
