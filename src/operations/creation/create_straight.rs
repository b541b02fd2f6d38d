use crate::error::Result;
use crate::geometry::{BasePoint, TrackPath};
use crate::math::{Point3, Vector3};
use crate::scenery::Track;

use super::{normalize_name, require_positive};

/// Lays a straight track from a base point.
///
/// `length` is measured along the slope: with `φ = atan(gradient / 1000)`
/// the end point is `point + length * (cos φ sin α, cos φ cos α, sin φ)`.
pub struct CreateStraight {
    length: f64,
    name: Option<String>,
}

impl CreateStraight {
    /// Creates a new `CreateStraight` operation.
    #[must_use]
    pub fn new(length: f64) -> Self {
        Self { length, name: None }
    }

    /// Labels the created track. Blank names are ignored.
    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = normalize_name(Some(name));
        self
    }

    /// Executes the operation, advancing `base.point` to the end of the
    /// new track. Heading and grade are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the length is not positive; `base` is untouched
    /// in that case.
    pub fn execute(&self, base: &mut BasePoint) -> Result<Track> {
        let path = self.path_from(base)?;
        base.point = path.back();
        Ok(Track {
            name: self.name.clone(),
            path,
        })
    }

    /// Computes the path without moving the base point.
    pub(crate) fn path_from(&self, base: &BasePoint) -> Result<TrackPath> {
        require_positive("length", self.length)?;
        let start = base.point;
        Ok(TrackPath::Straight {
            start,
            end: straight_end(&start, base.alpha, base.gradient, self.length),
        })
    }
}

fn straight_end(start: &Point3, alpha_deg: f64, gradient: f64, length: f64) -> Point3 {
    let slope = (gradient / 1000.0).atan();
    let alpha = alpha_deg.to_radians();
    let horizontal = length * slope.cos();
    start
        + Vector3::new(
            horizontal * alpha.sin(),
            horizontal * alpha.cos(),
            length * slope.sin(),
        )
}
