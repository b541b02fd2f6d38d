use crate::error::Result;
use crate::geometry::{TrackPath, DEFAULT_SEGMENTS};
use crate::scenery::{Scenery, TrackId};

/// Computes the length of a track.
pub struct TrackLength {
    track: TrackId,
}

impl TrackLength {
    /// Creates a new `TrackLength` query.
    #[must_use]
    pub fn new(track: TrackId) -> Self {
        Self { track }
    }

    /// Executes the query, returning the track length.
    ///
    /// Straight tracks are measured exactly; Bezier tracks are measured
    /// along a polyline of [`DEFAULT_SEGMENTS`] segments.
    ///
    /// # Errors
    ///
    /// Returns an error if the track is not found.
    pub fn execute(&self, scenery: &Scenery) -> Result<f64> {
        let track = scenery.track(self.track)?;
        path_length(&track.path)
    }
}

/// Length of a path, see [`TrackLength::execute`].
///
/// # Errors
///
/// Returns an error if sampling the path fails.
pub fn path_length(path: &TrackPath) -> Result<f64> {
    let points = path.sample(DEFAULT_SEGMENTS)?;
    Ok(points.windows(2).map(|w| (w[1] - w[0]).norm()).sum())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{BasePoint, Direction};
    use crate::math::Point3;
    use crate::operations::creation::{CreateCurve, CreateStraight};
    use crate::scenery::Track;

    #[test]
    fn straight_length_3_4_5() {
        let mut scenery = Scenery::new();
        let id = scenery
            .add_track(Track::new(TrackPath::Straight {
                start: Point3::origin(),
                end: Point3::new(3.0, 4.0, 0.0),
            }))
            .unwrap();
        let len = TrackLength::new(id).execute(&scenery).unwrap();
        assert!((len - 5.0).abs() < 1e-10);
    }

    #[test]
    fn created_straight_has_requested_length() {
        let mut base = BasePoint::new(Point3::origin(), 33.0, 12.0);
        let track = CreateStraight::new(58.651).execute(&mut base).unwrap();
        assert!((path_length(&track.path).unwrap() - 58.651).abs() < 1e-9);
    }

    #[test]
    fn level_curve_length_is_close_to_arc_length() {
        let mut base = BasePoint::new(Point3::origin(), 0.0, 0.0);
        let arc_length = 300.0 * 55f64.to_radians();
        let curve = CreateCurve::new(arc_length, 300.0, Direction::Left)
            .execute(&mut base)
            .unwrap();
        let len = path_length(&curve.track.path).unwrap();
        assert!((len - arc_length).abs() / arc_length < 1e-3);
    }

    #[test]
    fn removed_track_is_not_found() {
        let mut scenery = Scenery::new();
        let id = scenery
            .add_track(Track::new(TrackPath::Straight {
                start: Point3::origin(),
                end: Point3::new(1.0, 0.0, 0.0),
            }))
            .unwrap();
        scenery.remove_track(id).unwrap();
        assert!(TrackLength::new(id).execute(&scenery).is_err());
    }
}
