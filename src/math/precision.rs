use super::Point3;

/// Number of fractional digits model comparisons are carried out at.
pub const PRECISION_DIGITS: i32 = 3;

/// Rounds `value` to [`PRECISION_DIGITS`] fractional digits.
#[must_use]
pub fn round_to_precision(value: f64) -> f64 {
    let scale = 10f64.powi(PRECISION_DIGITS);
    (value * scale).round() / scale
}

/// Rounds every coordinate of `point`.
#[must_use]
pub fn round_point(point: &Point3) -> Point3 {
    point.map(round_to_precision)
}

/// Compares two points at model precision.
#[must_use]
pub fn precision_eq(a: &Point3, b: &Point3) -> bool {
    round_point(a) == round_point(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_three_digits() {
        assert!((round_to_precision(6.335_545) - 6.336).abs() < f64::EPSILON);
        assert!((round_to_precision(-2.153_346) + 2.153).abs() < f64::EPSILON);
    }

    #[test]
    fn rounded_values_match_decimal_literals() {
        assert_eq!(round_to_precision(48.032_464), 48.032);
        assert_eq!(round_to_precision(1.290_009), 1.29);
    }

    #[test]
    fn precision_eq_ignores_sub_millimetre_noise() {
        let a = Point3::new(1.000_1, 2.0, 3.0);
        let b = Point3::new(1.000_4, 2.000_2, 2.999_9);
        assert!(precision_eq(&a, &b));
        assert!(!precision_eq(&a, &Point3::new(1.002, 2.0, 3.0)));
    }
}
