//! Clamping of raw signals into the unit range

/// Default experience cap in years
pub const DEFAULT_EXPERIENCE_CAP: f64 = 10.0;

/// Map years of experience onto [0, 1], saturating at `cap`.
///
/// Zero, negative and non-finite inputs all map to 0.0, as does a cap that
/// is not a positive finite number.
pub fn normalize_experience(years: f64, cap: f64) -> f64 {
    if !years.is_finite() || years <= 0.0 {
        return 0.0;
    }
    if !cap.is_finite() || cap <= 0.0 {
        return 0.0;
    }

    (years / cap).min(1.0)
}

/// Clamp an arbitrary score into [0, 1]. NaN maps to 0.0.
pub fn normalize_unit(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }

    value.clamp(0.0, 1.0)
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experience_is_capped() {
        assert_eq!(normalize_experience(25.0, DEFAULT_EXPERIENCE_CAP), 1.0);
        assert_eq!(normalize_experience(10.0, DEFAULT_EXPERIENCE_CAP), 1.0);
        assert!((normalize_experience(5.0, DEFAULT_EXPERIENCE_CAP) - 0.5).abs() < 1e-12);
        assert!((normalize_experience(3.0, 6.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_experience_rejects_negative_and_non_finite() {
        assert_eq!(normalize_experience(-3.0, DEFAULT_EXPERIENCE_CAP), 0.0);
        assert_eq!(normalize_experience(0.0, DEFAULT_EXPERIENCE_CAP), 0.0);
        assert_eq!(normalize_experience(f64::NAN, DEFAULT_EXPERIENCE_CAP), 0.0);
        assert_eq!(normalize_experience(f64::INFINITY, DEFAULT_EXPERIENCE_CAP), 0.0);
        assert_eq!(normalize_experience(4.0, 0.0), 0.0);
    }

    #[test]
    fn test_unit_clamp() {
        assert_eq!(normalize_unit(1.7), 1.0);
        assert_eq!(normalize_unit(-0.2), 0.0);
        assert_eq!(normalize_unit(0.42), 0.42);
        assert_eq!(normalize_unit(f64::NAN), 0.0);
        assert_eq!(normalize_unit(f64::INFINITY), 1.0);
        assert_eq!(normalize_unit(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(7.400000000000001), 7.4);
        assert_eq!(round2(3.14159), 3.14);
        assert_eq!(round2(0.0), 0.0);
    }
}
