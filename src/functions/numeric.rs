/// Denominators closer to zero than this make `Divide` return 1.0.
pub const DIVISION_EPSILON: f64 = 1e-12;

/// Protected division: a zero denominator yields 1.0 instead of inf/NaN.
pub fn protected_div(numerator: f64, denominator: f64) -> f64 {
    if denominator.abs() < DIVISION_EPSILON {
        1.0
    } else {
        numerator / denominator
    }
}

/// Clamp `value` between two bounds given in either order; NaN anywhere yields NaN.
pub fn clamp_between(value: f64, a: f64, b: f64) -> f64 {
    if value.is_nan() || a.is_nan() || b.is_nan() {
        return f64::NAN;
    }
    value.max(a.min(b)).min(a.max(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protected_div() {
        assert_eq!(protected_div(6.0, 3.0), 2.0);
        assert_eq!(protected_div(6.0, 0.0), 1.0);
        assert_eq!(protected_div(6.0, -0.0), 1.0);
    }

    #[test]
    fn test_clamp_between_accepts_swapped_bounds() {
        assert_eq!(clamp_between(5.0, 0.0, 2.0), 2.0);
        assert_eq!(clamp_between(5.0, 2.0, 0.0), 2.0);
        assert_eq!(clamp_between(-1.0, 2.0, 0.0), 0.0);
        assert!(clamp_between(f64::NAN, 0.0, 1.0).is_nan());
        assert!(clamp_between(0.5, f64::NAN, 1.0).is_nan());
    }
}
