mod arc;
mod bezier;
mod segment;

pub use arc::{Arc, Direction};
pub use bezier::CubicBezier;
pub use segment::Segment;

use crate::error::Result;
use crate::math::{Point3, Vector3};

/// Parameter domain for a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl CurveDomain {
    /// Creates a new curve domain.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }

    /// The unit domain `[0, 1]` shared by segments and Bezier curves.
    #[must_use]
    pub fn unit() -> Self {
        Self::new(0.0, 1.0)
    }

    /// Maps `s` in `[0, 1]` linearly onto this domain.
    #[must_use]
    pub fn lerp(&self, s: f64) -> f64 {
        self.t_min + (self.t_max - self.t_min) * s
    }
}

/// Trait for parametric curves in 3D space.
pub trait Curve {
    /// Evaluates the curve at parameter `t`, returning the 3D point.
    ///
    /// # Errors
    ///
    /// Returns an error if evaluation fails.
    fn evaluate(&self, t: f64) -> Result<Point3>;

    /// Computes the unit tangent vector at parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if the tangent is degenerate.
    fn tangent(&self, t: f64) -> Result<Vector3>;

    /// Returns the parameter domain of the curve.
    fn domain(&self) -> CurveDomain;

    /// Returns whether the curve is closed.
    fn is_closed(&self) -> bool;

    /// Flattens the curve into `segments + 1` evenly parameterised points.
    ///
    /// # Errors
    ///
    /// Returns an error if any evaluation fails.
    #[allow(clippy::cast_precision_loss)]
    fn sample(&self, segments: usize) -> Result<Vec<Point3>> {
        let domain = self.domain();
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| self.evaluate(domain.lerp(i as f64 / segments as f64)))
            .collect()
    }
}
