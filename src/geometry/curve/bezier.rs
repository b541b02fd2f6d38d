use crate::error::{ArgumentError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Curve, CurveDomain};

/// A cubic Bezier curve with absolute control points.
///
/// `P(t) = (1-t)^3 p0 + 3(1-t)^2 t p1 + 3(1-t) t^2 p2 + t^3 p3`, `t` in `[0, 1]`.
#[derive(Debug, Clone)]
pub struct CubicBezier {
    points: [Point3; 4],
}

impl CubicBezier {
    /// Creates a curve from its start, two control points and end.
    #[must_use]
    pub fn new(start: Point3, ctrl1: Point3, ctrl2: Point3, end: Point3) -> Self {
        Self {
            points: [start, ctrl1, ctrl2, end],
        }
    }

    /// Returns the four defining points in `start, ctrl1, ctrl2, end` order.
    #[must_use]
    pub fn points(&self) -> &[Point3; 4] {
        &self.points
    }

    fn derivative(&self, t: f64) -> Vector3 {
        let [p0, p1, p2, p3] = &self.points;
        let u = 1.0 - t;
        (p1 - p0) * (3.0 * u * u) + (p2 - p1) * (6.0 * u * t) + (p3 - p2) * (3.0 * t * t)
    }
}

impl Curve for CubicBezier {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        let [p0, p1, p2, p3] = &self.points;
        let u = 1.0 - t;
        let b0 = u * u * u;
        let b1 = 3.0 * u * u * t;
        let b2 = 3.0 * u * t * t;
        let b3 = t * t * t;
        Ok(Point3::from(
            p0.coords * b0 + p1.coords * b1 + p2.coords * b2 + p3.coords * b3,
        ))
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        let mut d = self.derivative(t);
        if d.norm() < TOLERANCE {
            // Coincident control point; fall back to the chord towards the far end.
            d = if t < 0.5 {
                self.points[2] - self.points[0]
            } else {
                self.points[3] - self.points[1]
            };
        }
        let len = d.norm();
        if len < TOLERANCE {
            return Err(ArgumentError::ZeroVector.into());
        }
        Ok(d / len)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::unit()
    }

    fn is_closed(&self) -> bool {
        (self.points[3] - self.points[0]).norm() < TOLERANCE
    }
}
