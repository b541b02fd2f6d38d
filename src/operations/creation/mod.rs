mod create_curve;
mod create_straight;
mod create_switch;

pub use create_curve::{CreateCurve, CurveTrack};
pub use create_straight::CreateStraight;
pub use create_switch::{BranchShape, CreateSwitch};

use crate::error::ArgumentError;

/// Rejects zero, negative and non-finite shape parameters.
fn require_positive(parameter: &'static str, value: f64) -> Result<(), ArgumentError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ArgumentError::NonPositive { parameter, value })
    }
}

/// Blank labels are treated as absent.
fn normalize_name(name: Option<&str>) -> Option<String> {
    name.map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
}
