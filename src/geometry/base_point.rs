use std::fmt;

use crate::math::{grade_direction, precision_eq, Point3, Vector3};

/// Construction cursor from which new track geometry is laid out.
///
/// `alpha` is the heading in degrees (0 = `+y`, 90 = `+x`) and `gradient`
/// the grade in per mille. Track factories advance `point` (and `alpha` for
/// curves) to the end of the piece they create, so consecutive calls on the
/// same base point build a connected chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasePoint {
    /// Absolute position.
    pub point: Point3,
    /// Heading in degrees.
    pub alpha: f64,
    /// Grade in per mille.
    pub gradient: f64,
}

impl BasePoint {
    /// Creates a new base point.
    #[must_use]
    pub fn new(point: Point3, alpha: f64, gradient: f64) -> Self {
        Self {
            point,
            alpha,
            gradient,
        }
    }

    /// Direction of travel with unit horizontal length and the grade as
    /// vertical component.
    #[must_use]
    pub fn direction(&self) -> Vector3 {
        grade_direction(self.alpha, self.gradient)
    }
}

impl PartialEq for BasePoint {
    fn eq(&self, other: &Self) -> bool {
        precision_eq(&self.point, &other.point)
            && (self.alpha - other.alpha).abs() < 0.005
            && (self.gradient - other.gradient).abs() < 0.005
    }
}

impl fmt::Display for BasePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BasePoint[point=({:.3}, {:.3}, {:.3}),alpha={:.2},gradient={:.2}]",
            self.point.x, self.point.y, self.point.z, self.alpha, self.gradient
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_model_precision() {
        let bp = BasePoint::new(Point3::new(1.0, 2.5, -0.125_4), 15.0, 22.0);
        assert_eq!(
            bp.to_string(),
            "BasePoint[point=(1.000, 2.500, -0.125),alpha=15.00,gradient=22.00]"
        );
    }

    #[test]
    fn equality_at_model_precision() {
        let a = BasePoint::new(Point3::new(1.000_1, 0.0, 0.0), 10.0, 0.0);
        let b = BasePoint::new(Point3::new(1.000_2, 0.0, 0.0), 10.001, 0.0);
        assert_eq!(a, b);
        assert_ne!(a, BasePoint::new(Point3::new(1.0, 0.0, 0.0), 11.0, 0.0));
    }

    #[test]
    fn direction_has_unit_horizontal_length() {
        let bp = BasePoint::new(Point3::origin(), 37.0, 15.0);
        let d = bp.direction();
        assert!((d.xy().norm() - 1.0).abs() < 1e-12);
        assert!((d.z - 0.015).abs() < 1e-12);
    }
}
