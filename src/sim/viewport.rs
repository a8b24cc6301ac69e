//! Viewport size and the world-to-pixel scale

use serde::{Deserialize, Serialize};

use super::city::Building;

/// Drawable area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// `None` unless both sides are positive and finite
    pub fn new(width: f32, height: f32) -> Option<Self> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        (valid(width) && valid(height)).then_some(Self { width, height })
    }

    /// Visible world width at `scale`
    #[inline]
    pub fn world_width(&self, scale: f32) -> f32 {
        self.width / scale
    }

    /// Visible world height at `scale`
    #[inline]
    pub fn world_height(&self, scale: f32) -> f32 {
        self.height / scale
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Scale that fits the city exactly into the viewport width
///
/// Returns `None` for a degenerate viewport or city, leaving the caller's
/// previous scale in place.
pub fn compute_scale(viewport_width: f32, last_building: &Building) -> Option<f32> {
    let city_width = last_building.x + last_building.width;
    if !(viewport_width.is_finite() && viewport_width > 0.0 && city_width > 0.0) {
        return None;
    }
    Some(viewport_width / city_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn last(x: f32, width: f32) -> Building {
        Building {
            x,
            width,
            height: 100.0,
            lights: Vec::new(),
        }
    }

    #[test]
    fn test_scale_fits_city() {
        let scale = compute_scale(1000.0, &last(700.0, 100.0)).unwrap();
        assert!((scale - 1.25).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(compute_scale(0.0, &last(700.0, 100.0)), None);
        assert_eq!(compute_scale(-5.0, &last(700.0, 100.0)), None);
        assert_eq!(compute_scale(f32::NAN, &last(700.0, 100.0)), None);
        assert_eq!(compute_scale(800.0, &last(0.0, 0.0)), None);
    }

    #[test]
    fn test_viewport_validation() {
        assert!(Viewport::new(800.0, 600.0).is_some());
        assert!(Viewport::new(0.0, 600.0).is_none());
        assert!(Viewport::new(800.0, -1.0).is_none());
        assert!(Viewport::new(f32::INFINITY, 600.0).is_none());
    }

    #[test]
    fn test_world_extent() {
        let vp = Viewport::new(800.0, 600.0).unwrap();
        assert_eq!(vp.world_width(2.0), 400.0);
        assert_eq!(vp.world_height(2.0), 300.0);
    }
}
