//! Shape primitives for the draw list
//!
//! Coordinates are world units, Y-up. The painter applies the flip and scale.

use glam::Vec2;

/// CSS color string
pub type Color = &'static str;

pub mod palette {
    use super::Color;

    pub const SKY_HORIZON: Color = "#ff9933";
    pub const SKY_ZENITH: Color = "#e5892d";
    pub const MOON: Color = "rgba(255, 255, 255, 0.6)";
    pub const BACKGROUND_BUILDING: Color = "#46af7d";
    pub const BUILDING: Color = "#286448";
    pub const WINDOW: Color = "#e5892d";
    pub const CHARACTER: Color = "black";
    pub const FACE: Color = "lightgray";
    pub const AIM_MARKER: Color = "red";
    pub const TRAJECTORY: Color = "rgba(255, 255, 255, 0.7)";
    pub const BANANA: Color = "green";
}

/// An open path to be stroked
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Path {
    Line { from: Vec2, to: Vec2 },
    Quadratic { start: Vec2, control: Vec2, end: Vec2 },
}

/// One drawable item
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Axis-aligned rectangle from its bottom-left corner
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    /// Filled closed polygon
    Polygon { points: Vec<Vec2>, color: Color },
    /// Stroked path, optionally dashed as `[dash, gap]`
    Stroke {
        path: Path,
        width: f32,
        color: Color,
        dash: Option<[f32; 2]>,
    },
    /// The spinning thrown banana
    Banana { center: Vec2, rotation: f32 },
}

/// Banana outline relative to its center: a start point and two quadratic
/// segments (control, end) closing back on the start
pub const BANANA_OUTLINE: (Vec2, [(Vec2, Vec2); 2]) = (
    Vec2::new(-8.0, -2.0),
    [
        (Vec2::new(0.0, 12.0), Vec2::new(8.0, -2.0)),
        (Vec2::new(0.0, 2.0), Vec2::new(-8.0, -2.0)),
    ],
);

/// Filled rectangle from the ground up
#[inline]
pub fn ground_rect(x: f32, width: f32, height: f32, color: Color) -> Shape {
    Shape::Rect {
        x,
        y: 0.0,
        width,
        height,
        color,
    }
}

#[inline]
pub fn circle(center: Vec2, radius: f32, color: Color) -> Shape {
    Shape::Circle {
        center,
        radius,
        color,
    }
}

#[inline]
pub fn stroke(path: Path, width: f32, color: Color) -> Shape {
    Shape::Stroke {
        path,
        width,
        color,
        dash: None,
    }
}
