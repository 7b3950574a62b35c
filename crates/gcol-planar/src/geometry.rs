//! Floating point predicates used to validate a straight-line drawing.
//!
//! All comparisons use the fixed tolerance [`EPSILON`]. This is a pragmatic
//! approximation rather than a robust predicate, so drawings that are within
//! the tolerance of being degenerate may be classified either way.

use gcol_core::errors::GcolError;
use gcol_core::geometry_error;

/// Tolerance for collinearity and boundary tests.
pub const EPSILON: f64 = 1e-9;

/// A point in the plane.
pub type Point = (f64, f64);

/// A segment between two points.
pub type Segment = (Point, Point);

/// Compass bearing of `to` seen from `from`, in degrees within `[0, 360)`.
///
/// The angle is rounded to eight decimals so two edges that are parallel up
/// to rounding noise compare equal and are reported as tied.
pub fn bearing(from: Point, to: Point) -> f64 {
    let degrees = (to.1 - from.1).atan2(to.0 - from.0).to_degrees();
    let rounded = (degrees * 1e8).round() / 1e8;
    if rounded < 0.0 {
        rounded + 360.0
    } else {
        rounded
    }
}

fn area2(a: Point, b: Point, c: Point) -> f64 {
    (b.0 - a.0) * (c.1 - a.1) - (c.0 - a.0) * (b.1 - a.1)
}

/// Returns whether two segments cross.
///
/// Segments sharing exactly one endpoint never cross. Touching and collinear
/// overlaps are reported as crossings.
pub fn segments_cross(first: Segment, second: Segment) -> bool {
    let ((x1, y1), (x2, y2)) = first;
    let ((x3, y3), (x4, y4)) = second;
    let shared = [first.0, first.1]
        .iter()
        .filter(|p| **p == second.0 || **p == second.1)
        .count();
    if shared == 1 {
        return false;
    }

    let c_area = area2(first.0, first.1, second.0);
    let d_area = area2(first.0, first.1, second.1);
    let within = |lo: f64, hi: f64, v: f64| lo.min(hi) - EPSILON < v && v < lo.max(hi) + EPSILON;

    if c_area.abs() < EPSILON {
        if (x3 - x1).abs() < EPSILON {
            if within(y1, y2, y3) {
                return true;
            }
        } else if within(x1, x2, x3) {
            return true;
        }
        if d_area.abs() > EPSILON {
            return false;
        }
    }
    if d_area.abs() < EPSILON {
        if (x4 - x1).abs() < EPSILON {
            if within(y1, y2, y4) {
                return true;
            }
        } else if within(x1, x2, x4) {
            return true;
        }
        if c_area.abs() > EPSILON {
            return false;
        }
        // Both endpoints collinear with `first` but outside it: the second
        // segment crosses only if it straddles the first segment's start.
        return if (x3 - x1).abs() < EPSILON {
            (y1 < y3) != (y1 < y4)
        } else {
            (x1 < x3) != (x1 < x4)
        };
    }
    if (c_area > 0.0) == (d_area > 0.0) {
        return false;
    }
    let a_area = area2(second.0, second.1, first.0);
    let b_area = area2(second.0, second.1, first.1);
    (a_area > 0.0) != (b_area > 0.0)
}

/// Twice the signed shoelace area of a closed polygon. Positive when the
/// vertices run counterclockwise.
pub fn signed_area2(polygon: &[Point]) -> f64 {
    let n = polygon.len();
    (0..n)
        .map(|i| {
            let (x1, y1) = polygon[i];
            let (x2, y2) = polygon[(i + 1) % n];
            x1 * y2 - y1 * x2
        })
        .sum()
}

/// Returns whether the polygon runs clockwise. Zero-area polygons are
/// degenerate and rejected.
pub fn is_clockwise(polygon: &[Point]) -> Result<bool, GcolError> {
    let area = signed_area2(polygon);
    if area == 0.0 {
        return Err(geometry_error("degenerate-face", "traced face encloses zero area")
            .with_context("vertices", polygon.len()));
    }
    Ok(area < 0.0)
}
