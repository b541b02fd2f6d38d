use std::fmt;

use crate::error::{FormatError, ModelError, Result};
use crate::math::{precision_eq, Point3, Vector3};

use super::curve::{CubicBezier, Curve, Segment};

/// Number of segments a Bezier path is flattened into by default.
pub const DEFAULT_SEGMENTS: usize = 32;

/// Shape of a track path. The discriminant is the on-disk kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PathKind {
    Straight = 0,
    Bezier = 1,
}

impl PathKind {
    /// Both kinds, in on-disk list order.
    pub const ALL: [PathKind; 2] = [PathKind::Straight, PathKind::Bezier];

    /// Number of points a path of this kind is defined by.
    #[must_use]
    pub fn point_count(self) -> usize {
        match self {
            Self::Straight => 2,
            Self::Bezier => 4,
        }
    }

    /// On-disk tag byte.
    #[must_use]
    pub fn tag(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for PathKind {
    type Error = FormatError;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Straight),
            1 => Ok(Self::Bezier),
            other => Err(FormatError::UnknownKind(other)),
        }
    }
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Straight => f.write_str("straight"),
            Self::Bezier => f.write_str("bezier"),
        }
    }
}

/// Geometry of a single track piece.
///
/// Bezier control points are absolute positions.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackPath {
    Straight {
        start: Point3,
        end: Point3,
    },
    Bezier {
        start: Point3,
        ctrl1: Point3,
        ctrl2: Point3,
        end: Point3,
    },
}

impl TrackPath {
    /// Builds a path of `kind` from its points in `start, [ctrl1, ctrl2,] end`
    /// order. Returns `None` if the point count does not match the kind.
    #[must_use]
    pub fn from_points(kind: PathKind, points: &[Point3]) -> Option<Self> {
        match (kind, points) {
            (PathKind::Straight, &[start, end]) => Some(Self::Straight { start, end }),
            (PathKind::Bezier, &[start, ctrl1, ctrl2, end]) => Some(Self::Bezier {
                start,
                ctrl1,
                ctrl2,
                end,
            }),
            _ => None,
        }
    }

    /// Returns the path kind.
    #[must_use]
    pub fn kind(&self) -> PathKind {
        match self {
            Self::Straight { .. } => PathKind::Straight,
            Self::Bezier { .. } => PathKind::Bezier,
        }
    }

    /// Returns the defining points in on-disk order.
    #[must_use]
    pub fn points(&self) -> Vec<Point3> {
        match *self {
            Self::Straight { start, end } => vec![start, end],
            Self::Bezier {
                start,
                ctrl1,
                ctrl2,
                end,
            } => vec![start, ctrl1, ctrl2, end],
        }
    }

    /// Start point.
    #[must_use]
    pub fn front(&self) -> Point3 {
        match *self {
            Self::Straight { start, .. } | Self::Bezier { start, .. } => start,
        }
    }

    /// End point.
    #[must_use]
    pub fn back(&self) -> Point3 {
        match *self {
            Self::Straight { end, .. } | Self::Bezier { end, .. } => end,
        }
    }

    /// Raw tangent vectors `(v1, v2)` at the start and at the end.
    ///
    /// For Bezier paths these are `ctrl1 - start` and `ctrl2 - end`, for
    /// straight paths `end - start` and `start - end`.
    #[must_use]
    pub fn control_vectors(&self) -> (Vector3, Vector3) {
        match *self {
            Self::Straight { start, end } => (end - start, start - end),
            Self::Bezier {
                start,
                ctrl1,
                ctrl2,
                end,
            } => (ctrl1 - start, ctrl2 - end),
        }
    }

    /// The same geometry traversed from the other end.
    #[must_use]
    pub fn reversed(&self) -> Self {
        match *self {
            Self::Straight { start, end } => Self::Straight {
                start: end,
                end: start,
            },
            Self::Bezier {
                start,
                ctrl1,
                ctrl2,
                end,
            } => Self::Bezier {
                start: end,
                ctrl1: ctrl2,
                ctrl2: ctrl1,
                end: start,
            },
        }
    }

    /// Endpoint opposite to `entry`.
    ///
    /// # Errors
    ///
    /// Returns an error if `entry` is neither endpoint.
    pub fn exit(&self, entry: &Point3) -> Result<Point3> {
        Ok(self.oriented_from(entry)?.back())
    }

    /// The path oriented so that it starts at `entry`.
    ///
    /// # Errors
    ///
    /// Returns an error if `entry` is neither endpoint.
    pub fn oriented_from(&self, entry: &Point3) -> Result<Self> {
        if precision_eq(entry, &self.front()) {
            return Ok(self.clone());
        }
        if precision_eq(entry, &self.back()) {
            return Ok(self.reversed());
        }
        Err(ModelError::UnknownEntry {
            x: entry.x,
            y: entry.y,
            z: entry.z,
        }
        .into())
    }

    /// Returns whether `point` is one of the endpoints at model precision.
    #[must_use]
    pub fn has_endpoint(&self, point: &Point3) -> bool {
        precision_eq(point, &self.front()) || precision_eq(point, &self.back())
    }

    /// Flattens the path into a polyline. Straight paths always yield their
    /// two endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if curve evaluation fails.
    pub fn sample(&self, segments: usize) -> Result<Vec<Point3>> {
        match *self {
            Self::Straight { start, end } => Segment::new(start, end).sample(1),
            Self::Bezier {
                start,
                ctrl1,
                ctrl2,
                end,
            } => CubicBezier::new(start, ctrl1, ctrl2, end).sample(segments),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn bezier() -> TrackPath {
        TrackPath::Bezier {
            start: p(0.0, 0.0, 0.0),
            ctrl1: p(0.0, 1.0, 0.0),
            ctrl2: p(1.0, 2.0, 0.0),
            end: p(2.0, 2.0, 0.0),
        }
    }

    #[test]
    fn point_count_matches_kind() {
        for path in [
            TrackPath::Straight {
                start: p(0.0, 0.0, 0.0),
                end: p(1.0, 0.0, 0.0),
            },
            bezier(),
        ] {
            assert_eq!(path.points().len(), path.kind().point_count());
        }
    }

    #[test]
    fn from_points_rejects_wrong_count() {
        let pts = [p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0)];
        assert!(TrackPath::from_points(PathKind::Straight, &pts).is_none());
        assert!(TrackPath::from_points(PathKind::Bezier, &pts).is_none());
        assert_eq!(
            TrackPath::from_points(PathKind::Bezier, &bezier().points()),
            Some(bezier())
        );
    }

    #[test]
    fn kind_tags() {
        assert_eq!(PathKind::try_from(1u8).unwrap(), PathKind::Bezier);
        assert_eq!(PathKind::try_from(7u8), Err(FormatError::UnknownKind(7)));
    }

    #[test]
    fn reversed_swaps_control_points() {
        let r = bezier().reversed();
        assert_eq!(r.front(), p(2.0, 2.0, 0.0));
        assert_eq!(r.points()[1], p(1.0, 2.0, 0.0));
        assert_eq!(r.reversed(), bezier());
    }

    #[test]
    fn exit_from_either_end() {
        let path = bezier();
        assert_eq!(path.exit(&p(0.0, 0.0, 0.0)).unwrap(), p(2.0, 2.0, 0.0));
        assert_eq!(path.exit(&p(2.000_1, 2.0, 0.0)).unwrap(), p(0.0, 0.0, 0.0));
        assert!(path.exit(&p(1.0, 1.0, 0.0)).is_err());
    }

    #[test]
    fn sample_bezier_hits_both_ends() {
        let pts = bezier().sample(DEFAULT_SEGMENTS).unwrap();
        assert_eq!(pts.len(), DEFAULT_SEGMENTS + 1);
        assert!((pts[0] - p(0.0, 0.0, 0.0)).norm() < 1e-12);
        assert!((pts[DEFAULT_SEGMENTS] - p(2.0, 2.0, 0.0)).norm() < 1e-12);
    }
}
