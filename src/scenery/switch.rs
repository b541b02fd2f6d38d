use crate::error::{ModelError, Result};
use crate::geometry::TrackPath;
use crate::math::{precision_eq, Point3};

slotmap::new_key_type! {
    /// Unique identifier for a switch in a scenery.
    pub struct SwitchId;
}

/// Branch a switch currently routes traffic from its origin onto.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SwitchState {
    #[default]
    Straight,
    Diverted,
}

/// A turnout: two branches leaving one shared origin.
///
/// Each branch is independently straight or Bezier; the pair of kinds
/// selects one of four on-disk record shapes (see [`Switch::shape_index`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Switch {
    /// Optional label, unique among the switches of a scenery.
    pub name: Option<String>,
    /// Through branch.
    pub straight: TrackPath,
    /// Diverging branch.
    pub diverted: TrackPath,
    /// Shared origin of both branches.
    pub position: Point3,
    /// Current routing. Not persisted.
    pub state: SwitchState,
}

impl Switch {
    /// Creates an unnamed switch set to the straight branch.
    #[must_use]
    pub fn new(straight: TrackPath, diverted: TrackPath, position: Point3) -> Self {
        Self {
            name: None,
            straight,
            diverted,
            position,
            state: SwitchState::Straight,
        }
    }

    /// Index of the on-disk record shape: `straight.kind + diverted.kind * 2`.
    #[must_use]
    pub fn shape_index(&self) -> u8 {
        self.straight.kind().tag() + self.diverted.kind().tag() * 2
    }

    /// Branch selected by the current state.
    #[must_use]
    pub fn active_branch(&self) -> &TrackPath {
        match self.state {
            SwitchState::Straight => &self.straight,
            SwitchState::Diverted => &self.diverted,
        }
    }

    /// Endpoint reached when entering the switch at `entry`.
    ///
    /// Entering at the origin follows the active branch; entering at a
    /// branch end always leads back to the origin.
    ///
    /// # Errors
    ///
    /// Returns an error if `entry` is not an endpoint of either branch.
    pub fn exit(&self, entry: &Point3) -> Result<Point3> {
        Ok(self.path_from(entry)?.back())
    }

    /// Path followed when entering the switch at `entry`.
    ///
    /// # Errors
    ///
    /// Returns an error if `entry` is not an endpoint of either branch.
    pub fn path_from(&self, entry: &Point3) -> Result<TrackPath> {
        if self.is_origin(entry) {
            return Ok(self.active_branch().clone());
        }
        [&self.straight, &self.diverted]
            .into_iter()
            .find(|branch| branch.has_endpoint(entry))
            .ok_or(ModelError::UnknownEntry {
                x: entry.x,
                y: entry.y,
                z: entry.z,
            })?
            .oriented_from(entry)
    }

    /// Positions the switch connects at: the origin (start of the through
    /// branch), then the through and diverging ends.
    #[must_use]
    pub fn endpoints(&self) -> [Point3; 3] {
        [
            self.straight.front(),
            self.straight.back(),
            self.diverted.back(),
        ]
    }

    /// Returns whether `point` is the origin or a branch end.
    #[must_use]
    pub fn has_endpoint(&self, point: &Point3) -> bool {
        self.is_origin(point)
            || self.straight.has_endpoint(point)
            || self.diverted.has_endpoint(point)
    }

    // `position` may carry more precision than the stored branch points.
    fn is_origin(&self, point: &Point3) -> bool {
        precision_eq(point, &self.position)
            || precision_eq(point, &self.straight.front())
            || precision_eq(point, &self.diverted.front())
    }
}
