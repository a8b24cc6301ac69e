//! Distance functions for silhouette hit testing
//!
//! Negative distance means the point is inside the shape.

use glam::Vec2;

/// Samples used to flatten a quadratic curve into line segments
pub const CURVE_SAMPLES: usize = 32;

/// Signed distance to a circle
#[inline]
pub fn sd_circle(p: Vec2, center: Vec2, radius: f32) -> f32 {
    (p - center).length() - radius
}

/// Unsigned distance from a point to a line segment
pub fn sd_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return (p - a).length();
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).length()
}

/// Even-odd containment test for a closed polygon
pub fn polygon_contains(points: &[Vec2], p: Vec2) -> bool {
    if points.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Point on a quadratic Bézier curve at parameter `t` in [0, 1]
#[inline]
pub fn quadratic_point(start: Vec2, control: Vec2, end: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    start * (u * u) + control * (2.0 * u * t) + end * (t * t)
}

/// Signed distance to a stroked quadratic curve of the given width
///
/// The curve is flattened into `CURVE_SAMPLES` segments, which is well below
/// the stroke width for limb-sized curves.
pub fn sd_quadratic_stroke(p: Vec2, start: Vec2, control: Vec2, end: Vec2, width: f32) -> f32 {
    let mut prev = start;
    let mut dist = f32::MAX;
    for i in 1..=CURVE_SAMPLES {
        let t = i as f32 / CURVE_SAMPLES as f32;
        let point = quadratic_point(start, control, end, t);
        dist = dist.min(sd_segment(p, prev, point));
        prev = point;
    }
    dist - width * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Vec2> {
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ]
    }

    #[test]
    fn test_circle_distance() {
        assert!((sd_circle(Vec2::new(3.0, 4.0), Vec2::ZERO, 5.0)).abs() < 0.001);
        assert!(sd_circle(Vec2::new(1.0, 0.0), Vec2::ZERO, 5.0) < 0.0);
    }

    #[test]
    fn test_segment_distance_clamps_to_endpoints() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        assert!((sd_segment(Vec2::new(5.0, 3.0), a, b) - 3.0).abs() < 0.001);
        assert!((sd_segment(Vec2::new(13.0, 4.0), a, b) - 5.0).abs() < 0.001);
        // Degenerate segment
        assert!((sd_segment(Vec2::new(3.0, 4.0), a, a) - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_polygon_contains() {
        let sq = square();
        assert!(polygon_contains(&sq, Vec2::new(5.0, 5.0)));
        assert!(!polygon_contains(&sq, Vec2::new(15.0, 5.0)));
        assert!(!polygon_contains(&sq, Vec2::new(5.0, -1.0)));
        assert!(!polygon_contains(&sq[..2], Vec2::new(5.0, 0.0)));
    }

    #[test]
    fn test_quadratic_endpoints() {
        let (s, c, e) = (Vec2::ZERO, Vec2::new(5.0, 10.0), Vec2::new(10.0, 0.0));
        assert_eq!(quadratic_point(s, c, e, 0.0), s);
        assert_eq!(quadratic_point(s, c, e, 1.0), e);
        // Apex of a symmetric curve sits halfway to the control point
        let mid = quadratic_point(s, c, e, 0.5);
        assert!((mid - Vec2::new(5.0, 5.0)).length() < 0.001);
    }

    #[test]
    fn test_quadratic_stroke() {
        let (s, c, e) = (Vec2::ZERO, Vec2::new(5.0, 10.0), Vec2::new(10.0, 0.0));
        // On the curve: well inside an 18-wide stroke
        assert!(sd_quadratic_stroke(Vec2::new(5.0, 5.0), s, c, e, 18.0) < -8.0);
        // 8 units above the apex: inside the stroke
        assert!(sd_quadratic_stroke(Vec2::new(5.0, 13.0), s, c, e, 18.0) < 0.0);
        // 10 units above the apex: outside
        assert!(sd_quadratic_stroke(Vec2::new(5.0, 15.0), s, c, e, 18.0) > 0.0);
    }
}
