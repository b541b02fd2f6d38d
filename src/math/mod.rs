mod precision;

pub use precision::{precision_eq, round_point, round_to_precision, PRECISION_DIGITS};

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Horizontal unit direction of a heading given in degrees.
///
/// Headings are measured from `+y` towards `+x`, so `0` points north and
/// `90` points east.
#[must_use]
pub fn heading_direction(alpha_deg: f64) -> Vector3 {
    let alpha = alpha_deg.to_radians();
    Vector3::new(alpha.sin(), alpha.cos(), 0.0)
}

/// Direction of travel with unit horizontal length and a vertical component
/// equal to the grade (per mille divided by 1000).
#[must_use]
pub fn grade_direction(alpha_deg: f64, gradient: f64) -> Vector3 {
    let mut dir = heading_direction(alpha_deg);
    dir.z = gradient / 1000.0;
    dir
}
