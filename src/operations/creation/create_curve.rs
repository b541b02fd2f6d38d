use std::f64::consts::TAU;

use crate::error::{ArgumentError, Result};
use crate::geometry::{Arc, BasePoint, Curve, Direction, TrackPath};
use crate::math::{grade_direction, Vector3};
use crate::scenery::Track;

use super::{normalize_name, require_positive};

/// A curved track together with the raw tangent vectors of its Bezier
/// representation.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveTrack {
    /// The created track, always of Bezier kind.
    pub track: Track,
    /// `ctrl1 - start`.
    pub v1: Vector3,
    /// `ctrl2 - end`, pointing back along the track.
    pub v2: Vector3,
}

impl CurveTrack {
    /// Discards the tangent vectors.
    #[must_use]
    pub fn into_track(self) -> Track {
        self.track
    }
}

/// Lays a circular curve of a given arc length and radius from a base point.
///
/// The arc is stored as a cubic Bezier whose control points sit on the start
/// and end tangents at `4/3 * tan(θ/4) * radius`, `θ = length / radius`.
/// `length` is the horizontal arc length; the grade lifts the end point by
/// `length * gradient / 1000`.
pub struct CreateCurve {
    length: f64,
    radius: f64,
    direction: Direction,
    name: Option<String>,
}

impl CreateCurve {
    /// Creates a new `CreateCurve` operation.
    #[must_use]
    pub fn new(length: f64, radius: f64, direction: Direction) -> Self {
        Self {
            length,
            radius,
            direction,
            name: None,
        }
    }

    /// Labels the created track. Blank names are ignored.
    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = normalize_name(Some(name));
        self
    }

    /// Executes the operation, advancing `base.point` to the end of the
    /// curve and turning `base.alpha` by the swept angle. The grade is left
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the length or radius is not positive, or the
    /// curve sweeps a full turn or more; `base` is untouched in that case.
    pub fn execute(&self, base: &mut BasePoint) -> Result<CurveTrack> {
        let (path, alpha, v1, v2) = self.geometry(base)?;
        base.point = path.back();
        base.alpha = alpha;
        Ok(CurveTrack {
            track: Track {
                name: self.name.clone(),
                path,
            },
            v1,
            v2,
        })
    }

    /// Computes the path without moving the base point.
    pub(crate) fn path_from(&self, base: &BasePoint) -> Result<TrackPath> {
        Ok(self.geometry(base)?.0)
    }

    fn geometry(&self, base: &BasePoint) -> Result<(TrackPath, f64, Vector3, Vector3)> {
        require_positive("length", self.length)?;
        require_positive("radius", self.radius)?;
        let sweep = self.length / self.radius;
        if sweep >= TAU {
            return Err(ArgumentError::FullTurn {
                degrees: sweep.to_degrees(),
            }
            .into());
        }

        let arc = Arc::from_heading(
            &base.point,
            base.alpha,
            base.gradient,
            self.radius,
            sweep,
            self.direction,
        )?;
        let start = base.point;
        let end = arc.evaluate(sweep)?;
        let alpha = (base.alpha + self.direction.sign() * sweep.to_degrees()).rem_euclid(360.0);

        let handle = 4.0 / 3.0 * (sweep / 4.0).tan() * self.radius;
        let v1 = grade_direction(base.alpha, base.gradient) * handle;
        let v2 = -grade_direction(alpha, base.gradient) * handle;

        let path = TrackPath::Bezier {
            start,
            ctrl1: start + v1,
            ctrl2: end + v2,
            end,
        };
        Ok((path, alpha, v1, v2))
    }
}
