use crate::error::Result;
use crate::geometry::{PathKind, TrackPath};
use crate::math::Point3;

slotmap::new_key_type! {
    /// Unique identifier for a track in a scenery.
    pub struct TrackId;
}

/// A single piece of plain track.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Optional label, unique among the tracks of a scenery.
    pub name: Option<String>,
    /// Geometry of the track.
    pub path: TrackPath,
}

impl Track {
    /// Creates an unnamed track.
    #[must_use]
    pub fn new(path: TrackPath) -> Self {
        Self { name: None, path }
    }

    /// Creates a named track.
    #[must_use]
    pub fn named(name: impl Into<String>, path: TrackPath) -> Self {
        Self {
            name: Some(name.into()),
            path,
        }
    }

    /// Returns the path kind.
    #[must_use]
    pub fn kind(&self) -> PathKind {
        self.path.kind()
    }

    /// Positions the track connects at, start first.
    #[must_use]
    pub fn endpoints(&self) -> [Point3; 2] {
        [self.path.front(), self.path.back()]
    }

    /// Endpoint reached when entering the track at `entry`.
    ///
    /// # Errors
    ///
    /// Returns an error if `entry` is not an endpoint of this track.
    pub fn exit(&self, entry: &Point3) -> Result<Point3> {
        self.path.exit(entry)
    }

    /// Path followed when entering the track at `entry`.
    ///
    /// # Errors
    ///
    /// Returns an error if `entry` is not an endpoint of this track.
    pub fn path_from(&self, entry: &Point3) -> Result<TrackPath> {
        self.path.oriented_from(entry)
    }
}
