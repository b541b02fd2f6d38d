use crate::error::Result;
use crate::geometry::DEFAULT_SEGMENTS;
use crate::math::Point3;
use crate::scenery::Scenery;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb {
    fn from_point(p: Point3) -> Self {
        Self { min: p, max: p }
    }

    fn include(&mut self, p: &Point3) {
        self.min = self.min.inf(p);
        self.max = self.max.sup(p);
    }
}

/// Computes the axis-aligned bounding box of everything laid in a scenery.
///
/// Curves are bounded by their flattened polyline rather than by their
/// control points.
#[derive(Default)]
pub struct BoundingBox;

impl BoundingBox {
    /// Creates a new `BoundingBox` query.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the query, returning `None` for an empty scenery.
    ///
    /// # Errors
    ///
    /// Returns an error if sampling a path fails.
    pub fn execute(&self, scenery: &Scenery) -> Result<Option<Aabb>> {
        let mut bounds: Option<Aabb> = None;
        let mut include = |p: &Point3| match bounds.as_mut() {
            Some(aabb) => aabb.include(p),
            None => bounds = Some(Aabb::from_point(*p)),
        };

        for (_, track) in scenery.tracks() {
            track.path.sample(DEFAULT_SEGMENTS)?.iter().for_each(&mut include);
        }
        for (_, switch) in scenery.switches() {
            include(&switch.position);
            for branch in [&switch.straight, &switch.diverted] {
                branch.sample(DEFAULT_SEGMENTS)?.iter().for_each(&mut include);
            }
        }
        Ok(bounds)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::TrackPath;
    use crate::scenery::{Switch, Track};

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn empty_scenery_has_no_bounds() {
        assert!(BoundingBox::new().execute(&Scenery::new()).unwrap().is_none());
    }

    #[test]
    fn bounds_cover_tracks_and_switches() {
        let mut scenery = Scenery::new();
        scenery
            .add_track(Track::new(TrackPath::Straight {
                start: p(-5.0, 0.0, 1.0),
                end: p(10.0, 3.0, 2.0),
            }))
            .unwrap();
        scenery
            .add_switch(Switch::new(
                TrackPath::Straight {
                    start: p(0.0, 0.0, 0.0),
                    end: p(0.0, -20.0, 0.0),
                },
                TrackPath::Straight {
                    start: p(0.0, 0.0, 0.0),
                    end: p(2.0, -20.0, 0.0),
                },
                p(0.0, 0.0, 0.0),
            ))
            .unwrap();

        let aabb = BoundingBox::new().execute(&scenery).unwrap().unwrap();
        assert_eq!(aabb.min, p(-5.0, -20.0, 0.0));
        assert_eq!(aabb.max, p(10.0, 3.0, 2.0));
    }

    #[test]
    fn curve_bounds_ignore_control_points() {
        let mut scenery = Scenery::new();
        scenery
            .add_track(Track::new(TrackPath::Bezier {
                start: p(0.0, 0.0, 0.0),
                ctrl1: p(0.0, 10.0, 0.0),
                ctrl2: p(0.0, 10.0, 0.0),
                end: p(0.0, 0.0, 0.0),
            }))
            .unwrap();
        let aabb = BoundingBox::new().execute(&scenery).unwrap().unwrap();
        assert!((aabb.max.y - 7.5).abs() < 1e-9);
    }
}
