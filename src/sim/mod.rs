//! Simulation module
//!
//! All gameplay logic lives here:
//! - World space is Y-up with the ground at `y = 0`
//! - Time is in milliseconds
//! - No rendering or platform dependencies

pub mod character;
pub mod city;
pub mod collision;
pub mod projectile;
pub mod sdf;
pub mod state;
pub mod tick;
pub mod viewport;

pub use character::{Arm, ArmCurve, ArmPose, GrabArea, Player, Silhouette, position_character};
pub use city::{BackgroundBuilding, Building, City, Window, generate_city};
pub use collision::{BuildingContact, Collision, check_building_hit, check_collision};
pub use projectile::Projectile;
pub use state::{AimReadout, BlastCrater, GamePhase, GameState};
pub use tick::{FlightToken, FrameOutcome, GameStateMachine, TickOutcome};
pub use viewport::{Viewport, compute_scale};
