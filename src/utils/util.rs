//! # Utility Module
//!
//! Small numeric helpers used while reading configuration.

/// Restricts a chance value to the closed unit interval.
///
/// `NaN` maps to zero so a malformed configuration disables the branch it
/// controls instead of poisoning every draw.
///
/// # Examples
///
/// ```
/// use dungeon_forge::utils::util::clamp_probability;
///
/// assert_eq!(clamp_probability(0.25), 0.25);
/// assert_eq!(clamp_probability(-1.0), 0.0);
/// assert_eq!(clamp_probability(3.0), 1.0);
/// ```
pub fn clamp_probability(value: f64) -> f64 {
    if value.is_nan() || value < 0.0 {
        0.0
    } else if value > 1.0 {
        1.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_within_bounds() {
        assert_eq!(clamp_probability(0.5), 0.5);
    }

    #[test]
    fn test_clamp_below_bounds() {
        assert_eq!(clamp_probability(-0.1), 0.0);
    }

    #[test]
    fn test_clamp_above_bounds() {
        assert_eq!(clamp_probability(1.5), 1.0);
    }

    #[test]
    fn test_clamp_nan() {
        assert_eq!(clamp_probability(f64::NAN), 0.0);
    }
}
