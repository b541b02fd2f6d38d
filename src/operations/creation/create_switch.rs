use crate::error::{ArgumentError, Result};
use crate::geometry::{BasePoint, Direction, TrackPath};
use crate::scenery::Switch;

use super::{normalize_name, require_positive, CreateCurve, CreateStraight};

/// Shape of one switch branch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BranchShape {
    Straight {
        length: f64,
    },
    Curve {
        length: f64,
        radius: f64,
        direction: Direction,
    },
}

impl BranchShape {
    fn validate(&self) -> std::result::Result<(), ArgumentError> {
        match *self {
            Self::Straight { length } => require_positive("length", length),
            Self::Curve { length, radius, .. } => {
                require_positive("length", length)?;
                require_positive("radius", radius)
            }
        }
    }

    fn path_from(&self, base: &BasePoint) -> Result<TrackPath> {
        match *self {
            Self::Straight { length } => CreateStraight::new(length).path_from(base),
            Self::Curve {
                length,
                radius,
                direction,
            } => CreateCurve::new(length, radius, direction).path_from(base),
        }
    }
}

/// Builds a named switch whose two branches leave the base point.
///
/// Each branch is laid from its own copy of the base point, so the caller's
/// cursor is never moved and the branches do not influence each other.
pub struct CreateSwitch {
    name: String,
    straight: BranchShape,
    diverted: BranchShape,
}

impl CreateSwitch {
    /// Creates a new `CreateSwitch` operation.
    #[must_use]
    pub fn new(name: &str, straight: BranchShape, diverted: BranchShape) -> Self {
        Self {
            name: name.to_owned(),
            straight,
            diverted,
        }
    }

    /// A common turnout: a straight through branch of `length` and a curved
    /// diverging branch of the same arc length.
    #[must_use]
    pub fn turnout(name: &str, length: f64, radius: f64, direction: Direction) -> Self {
        Self::new(
            name,
            BranchShape::Straight { length },
            BranchShape::Curve {
                length,
                radius,
                direction,
            },
        )
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or any branch parameter is not
    /// positive. All parameters are checked before geometry is computed.
    pub fn execute(&self, base: &BasePoint) -> Result<Switch> {
        let name = normalize_name(Some(&self.name)).ok_or(ArgumentError::EmptyName)?;
        self.straight.validate()?;
        self.diverted.validate()?;

        let (straight_base, diverted_base) = (*base, *base);
        let straight = self.straight.path_from(&straight_base)?;
        let diverted = self.diverted.path_from(&diverted_base)?;

        let mut switch = Switch::new(straight, diverted, base.point);
        switch.name = Some(name);
        Ok(switch)
    }
}
