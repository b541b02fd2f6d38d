use std::fmt;
use std::str::FromStr;

use crate::error::{ArgumentError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Curve, CurveDomain};

/// Side a curve turns towards, seen in the direction of travel.
///
/// `Right` increases the heading, `Left` decreases it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Sign applied to the swept angle when updating a heading.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    /// Maps the editor's `left` flag onto a direction.
    #[must_use]
    pub fn from_left(left: bool) -> Self {
        if left {
            Self::Left
        } else {
            Self::Right
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = ArgumentError;

    /// `0` is left and `1` is right, matching the order of the selection list.
    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Left),
            1 => Ok(Self::Right),
            other => Err(ArgumentError::UnknownDirection(other.to_string())),
        }
    }
}

impl FromStr for Direction {
    type Err = ArgumentError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "l" => Ok(Self::Left),
            "right" | "r" => Ok(Self::Right),
            _ => Err(ArgumentError::UnknownDirection(s.to_owned())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// A circular track arc with a constant grade.
///
/// Defined by a center, radius, normal axis and a reference direction for
/// the zero angle. The horizontal projection sweeps from `0` to `sweep`
/// radians around the normal axis while the height grows linearly with the
/// angle:
///
/// `P(t) = center + r cos(t) ref_dir + r sin(t) binormal + t rise_per_radian z`
#[derive(Debug, Clone)]
pub struct Arc {
    center: Point3,
    radius: f64,
    normal: Vector3,
    ref_dir: Vector3,
    sweep: f64,
    rise_per_radian: f64,
}

impl Arc {
    /// Creates a new arc.
    ///
    /// # Arguments
    ///
    /// * `center` - Center of the arc circle
    /// * `radius` - Radius (must be positive)
    /// * `normal` - Normal vector defining the arc plane
    /// * `ref_dir` - Reference direction for angle = 0 (must be perpendicular to normal)
    /// * `sweep` - Swept angle in radians
    /// * `rise_per_radian` - Height gained along the normal per radian swept
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive, the normal is zero-length,
    /// or the reference direction is not perpendicular to the normal.
    pub fn new(
        center: Point3,
        radius: f64,
        normal: Vector3,
        ref_dir: Vector3,
        sweep: f64,
        rise_per_radian: f64,
    ) -> Result<Self> {
        if !(radius > TOLERANCE && radius.is_finite()) {
            return Err(ArgumentError::NonPositive {
                parameter: "radius",
                value: radius,
            }
            .into());
        }

        let normal_len = normal.norm();
        if normal_len < TOLERANCE {
            return Err(ArgumentError::ZeroVector.into());
        }
        let normal = normal / normal_len;

        let ref_len = ref_dir.norm();
        if ref_len < TOLERANCE {
            return Err(ArgumentError::ZeroVector.into());
        }
        let ref_dir = ref_dir / ref_len;

        if normal.dot(&ref_dir).abs() > TOLERANCE {
            return Err(ArgumentError::NotPerpendicular.into());
        }

        Ok(Self {
            center,
            radius,
            normal,
            ref_dir,
            sweep,
            rise_per_radian,
        })
    }

    /// Builds the arc leaving `start` with heading `alpha_deg` and grade
    /// `gradient` (per mille), turning towards `direction`.
    ///
    /// The center of curvature lies `radius` away from `start`, perpendicular
    /// to the heading on the turn side.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive.
    pub fn from_heading(
        start: &Point3,
        alpha_deg: f64,
        gradient: f64,
        radius: f64,
        sweep: f64,
        direction: Direction,
    ) -> Result<Self> {
        let alpha = alpha_deg.to_radians();
        let right = Vector3::new(alpha.cos(), -alpha.sin(), 0.0);
        let to_center = right * direction.sign();
        let center = start + to_center * radius;
        // Right turns run clockwise seen from above.
        let normal = Vector3::z() * -direction.sign();
        Self::new(
            center,
            radius,
            normal,
            -to_center,
            sweep,
            radius * gradient / 1000.0,
        )
    }

    /// Returns the center of the arc.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    /// Returns the radius of the arc.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the normal vector of the arc plane.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Returns the swept angle in radians.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.sweep
    }

    /// Returns the arc length of the horizontal projection.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.radius * self.sweep.abs()
    }

    /// Derivative of `P(t)`, not normalised.
    ///
    /// Divided by the radius it has unit horizontal length and a vertical
    /// component equal to the grade.
    #[must_use]
    pub fn derivative(&self, t: f64) -> Vector3 {
        let binormal = self.binormal();
        self.ref_dir * (-self.radius * t.sin())
            + binormal * (self.radius * t.cos())
            + Vector3::z() * self.rise_per_radian
    }

    /// Computes the second axis direction (perpendicular to both normal and `ref_dir`).
    fn binormal(&self) -> Vector3 {
        self.normal.cross(&self.ref_dir)
    }
}

impl Curve for Arc {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        let binormal = self.binormal();
        let x = self.radius * t.cos();
        let y = self.radius * t.sin();
        Ok(self.center
            + self.ref_dir * x
            + binormal * y
            + Vector3::z() * (self.rise_per_radian * t))
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        let tangent = self.derivative(t);
        let len = tangent.norm();
        if len < TOLERANCE {
            return Err(ArgumentError::ZeroVector.into());
        }
        Ok(tangent / len)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, self.sweep)
    }

    fn is_closed(&self) -> bool {
        (self.sweep.abs() - std::f64::consts::TAU).abs() < TOLERANCE && self.rise_per_radian == 0.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn quarter_turn_right_from_north_ends_east() {
        let arc =
            Arc::from_heading(&Point3::origin(), 0.0, 0.0, 10.0, FRAC_PI_2, Direction::Right)
                .unwrap();
        let end = arc.evaluate(FRAC_PI_2).unwrap();
        assert_abs_diff_eq!(end.x, 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(end.y, 10.0, epsilon = 1e-9);

        let t = arc.tangent(FRAC_PI_2).unwrap();
        assert_abs_diff_eq!(t.x, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(t.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn quarter_turn_left_from_north_ends_west() {
        let arc = Arc::from_heading(&Point3::origin(), 0.0, 0.0, 10.0, FRAC_PI_2, Direction::Left)
            .unwrap();
        let end = arc.evaluate(FRAC_PI_2).unwrap();
        assert_abs_diff_eq!(end.x, -10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(end.y, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn grade_lifts_end_by_length_times_grade() {
        let arc =
            Arc::from_heading(&Point3::origin(), 30.0, 10.0, 100.0, 0.5, Direction::Right).unwrap();
        let end = arc.evaluate(0.5).unwrap();
        assert_abs_diff_eq!(end.z, arc.length() * 0.01, epsilon = 1e-9);
        assert_abs_diff_eq!(arc.derivative(0.0).z / arc.radius(), 0.01, epsilon = 1e-12);
    }

    #[test]
    fn starts_at_start_point() {
        let start = Point3::new(5.0, -3.0, 2.0);
        let arc = Arc::from_heading(&start, 123.0, 4.0, 250.0, 0.3, Direction::Left).unwrap();
        let p = arc.evaluate(0.0).unwrap();
        assert!((p - start).norm() < 1e-9);
    }

    #[test]
    fn zero_radius_is_rejected() {
        let result = Arc::from_heading(&Point3::origin(), 0.0, 0.0, 0.0, 1.0, Direction::Left);
        assert!(result.is_err());
    }

    #[test]
    fn direction_parsing() {
        assert_eq!(Direction::try_from(0u8).unwrap(), Direction::Left);
        assert_eq!(Direction::try_from(1u8).unwrap(), Direction::Right);
        assert!(Direction::try_from(2u8).is_err());
        assert_eq!("Right".parse::<Direction>().unwrap(), Direction::Right);
        assert!("straight".parse::<Direction>().is_err());
    }

    #[test]
    fn left_flag_maps_to_direction() {
        assert_eq!(Direction::from_left(false), Direction::Right);
        assert_eq!(Direction::from_left(true), Direction::Left);
        // An unset flag increases the heading.
        assert!(Direction::from_left(false).sign() > 0.0);
    }
}
