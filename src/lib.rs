//! Gorillas - two-player artillery over a procedurally generated skyline
//!
//! Core modules:
//! - `sim`: City generation, projectile physics, collisions, turn state machine
//! - `scene`: Read-only draw list and HUD model built from the game state
//! - `settings`: User preferences (city size, window lights, aim preview)

pub mod scene;
pub mod settings;
pub mod sim;

pub use settings::{LightIndexing, Settings};

/// Game configuration constants (world units unless noted)
pub mod consts {
    /// Horizontal gap between neighbouring buildings
    pub const BUILDING_GAP: f32 = 4.0;

    /// Background (decorative) skyline
    pub const BACKGROUND_BUILDING_COUNT: usize = 11;
    pub const BACKGROUND_FIRST_X: f32 = 30.0;
    pub const BACKGROUND_WIDTH_RANGE: (f32, f32) = (60.0, 110.0);
    pub const BACKGROUND_HEIGHT_RANGE: (f32, f32) = (80.0, 350.0);

    /// Foreground (collidable) skyline
    pub const BUILDING_COUNT: usize = 8;
    /// Fewest buildings that keep the two platforms on different roofs
    pub const MIN_BUILDING_COUNT: usize = 4;
    pub const BUILDING_WIDTH_RANGE: (f32, f32) = (80.0, 130.0);
    pub const BUILDING_HEIGHT_RANGE: (f32, f32) = (40.0, 400.0);
    /// Platforms stay low so the character on top stays in frame
    pub const PLATFORM_HEIGHT_RANGE: (f32, f32) = (30.0, 150.0);

    /// Window lights
    pub const LIGHTS_PER_BUILDING: usize = 50;
    pub const LIGHT_ON_PROBABILITY: f64 = 0.33;
    pub const WINDOW_WIDTH: f32 = 10.0;
    pub const WINDOW_HEIGHT: f32 = 12.0;
    pub const WINDOW_GAP: f32 = 20.0;

    /// Hand position relative to the platform top-center
    pub const HAND_OFFSET_X: f32 = 28.0;
    pub const HAND_OFFSET_Y: f32 = 107.0;

    /// Physics (time in milliseconds, normalized by `TIME_SCALE`)
    pub const TIME_SCALE: f32 = 200.0;
    pub const GRAVITY: f32 = 20.0;
    pub const SPIN_RATE: f32 = 5.0;
    /// Collision checks per animation frame
    pub const HIT_DETECTION_SUBSTEPS: u32 = 10;

    /// Half-size of the projectile used for building contact
    pub const PROJECTILE_MARGIN: f32 = 4.0;
    pub const BLAST_CRATER_RADIUS: f32 = 18.0;

    /// Character limbs
    pub const ARM_STROKE_WIDTH: f32 = 18.0;
    /// Drag distance to arm/marker displacement ratio while aiming
    pub const AIM_PULLBACK_DIVISOR: f32 = 6.25;

    /// Screen-space radius (pixels) of the drag handle around the projectile
    pub const GRAB_AREA_RADIUS: f32 = 15.0;
}
