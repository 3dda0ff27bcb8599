// Math utilities and helper functions

/// Clamp a value between min and max
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Fraction `current / max` clamped to `[0, 1]`.
///
/// Counters are allowed to run past their bounds (health can go negative for a
/// tick), so anything shown on screen goes through this first.
pub fn clamped_ratio(current: i32, max: i32) -> f32 {
    if max <= 0 {
        return 0.0;
    }
    clamp(current as f32 / max as f32, 0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(15.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp(-3, 0, 8), 0);
    }

    #[test]
    fn test_clamped_ratio() {
        assert_relative_eq!(clamped_ratio(4, 8), 0.5);
        assert_relative_eq!(clamped_ratio(8, 8), 1.0);
        assert_relative_eq!(clamped_ratio(-2, 8), 0.0);
        assert_relative_eq!(clamped_ratio(12, 8), 1.0);
    }

    #[test]
    fn test_clamped_ratio_zero_max() {
        assert_eq!(clamped_ratio(3, 0), 0.0);
    }
}
