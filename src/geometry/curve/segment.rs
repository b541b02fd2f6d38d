use crate::error::{ArgumentError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Curve, CurveDomain};

/// A bounded straight segment between two points.
///
/// The parametric form is: `P(t) = start + t * (end - start)`, `t` in `[0, 1]`.
#[derive(Debug, Clone)]
pub struct Segment {
    start: Point3,
    end: Point3,
}

impl Segment {
    /// Creates a new segment.
    #[must_use]
    pub fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    /// Returns the start point.
    #[must_use]
    pub fn start(&self) -> &Point3 {
        &self.start
    }

    /// Returns the end point.
    #[must_use]
    pub fn end(&self) -> &Point3 {
        &self.end
    }

    /// Returns the segment length.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }
}

impl Curve for Segment {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        Ok(self.start + (self.end - self.start) * t)
    }

    fn tangent(&self, _t: f64) -> Result<Vector3> {
        let delta = self.end - self.start;
        let len = delta.norm();
        if len < TOLERANCE {
            return Err(ArgumentError::ZeroVector.into());
        }
        Ok(delta / len)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::unit()
    }

    fn is_closed(&self) -> bool {
        false
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn length_3_4_5() {
        let s = Segment::new(Point3::origin(), Point3::new(3.0, 4.0, 0.0));
        assert!((s.length() - 5.0).abs() < TOLERANCE);
    }

    #[test]
    fn evaluate_midpoint() {
        let s = Segment::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 4.0, 6.0));
        let p = s.evaluate(0.5).unwrap();
        assert!((p - Point3::new(1.0, 2.0, 3.0)).norm() < TOLERANCE);
    }

    #[test]
    fn degenerate_segment_has_no_tangent() {
        let s = Segment::new(Point3::origin(), Point3::origin());
        assert!(s.tangent(0.0).is_err());
    }
}
