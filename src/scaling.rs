//! Scaling and clamping primitives
//!
//! Every engineering-unit value that ends up on the wire passes through
//! [`scale_and_clamp`], the single chokepoint for value-to-register
//! conversion. The function is total: out-of-range results are substituted
//! with the nearest register bound and logged, never raised as errors.
//!
//! Range validation against the configured machine envelope happens before
//! scaling via [`validate_and_clamp`]. Tool numbers are the deliberate
//! exception: [`is_valid_tool_number`] is a boolean check, and an
//! out-of-range tool number causes the tool mapping to be dropped entirely
//! rather than clamped.

use log::warn;

use crate::config::ValidationRule;

/// Maximum value representable in a 16-bit holding register
pub const REGISTER_MAX: u16 = u16::MAX;

/// Scale an engineering-unit value and clamp it into register range
///
/// Computes `round(value * scale_factor)` using round-half-away-from-zero
/// (`f64::round` semantics) and clamps *after* rounding:
///
/// - a negative rounded result returns 0
/// - a rounded result above 65535 returns 65535
/// - a non-finite input (NaN or infinity) returns 0
///
/// Every substitution is logged as a warning. This function never fails.
pub fn scale_and_clamp(value: f64, scale_factor: f64) -> u16 {
    let scaled = value * scale_factor;
    if !scaled.is_finite() {
        warn!(
            "non-finite scaled value ({} x {}), substituting 0",
            value, scale_factor
        );
        return 0;
    }

    let rounded = scaled.round();
    if rounded < 0.0 {
        warn!(
            "scaled value {} below register range, clamping to 0",
            rounded
        );
        0
    } else if rounded > REGISTER_MAX as f64 {
        warn!(
            "scaled value {} above register range, clamping to {}",
            rounded, REGISTER_MAX
        );
        REGISTER_MAX
    } else {
        rounded as u16
    }
}

/// Clamp a decimal value into a configured validation range
///
/// Applied before scaling for positions, feed rate, and spindle speed.
/// When `clamp_negative_to_zero` is set, negative values go straight to 0;
/// otherwise values below `min` are raised to `min` and values above `max`
/// lowered to `max`. In-range values pass through unchanged. Substitutions
/// are logged, never raised.
pub fn validate_and_clamp(value: f64, rule: &ValidationRule) -> f64 {
    if rule.clamp_negative_to_zero && value < 0.0 {
        warn!("value {} is negative, clamping to 0", value);
        0.0
    } else if value < rule.min {
        warn!("value {} below minimum {}, clamping", value, rule.min);
        rule.min
    } else if value > rule.max {
        warn!("value {} above maximum {}, clamping", value, rule.max);
        rule.max
    } else {
        value
    }
}

/// Boolean range check for tool numbers
///
/// Tool numbers are never clamped: a tool outside the configured magazine
/// range selects nothing, so the caller skips the mapping instead of
/// substituting a different tool.
pub fn is_valid_tool_number(value: f64, rule: &ValidationRule) -> bool {
    value >= rule.min && value <= rule.max
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_in_range() {
        assert_eq!(scale_and_clamp(50.0, 1000.0), 50_000);
        assert_eq!(scale_and_clamp(1500.0, 10.0), 15_000);
        assert_eq!(scale_and_clamp(0.0, 1000.0), 0);
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(scale_and_clamp(1.5, 1.0), 2);
        assert_eq!(scale_and_clamp(2.5, 1.0), 3);
        assert_eq!(scale_and_clamp(0.4999, 1.0), 0);
    }

    #[test]
    fn test_clamp_above_register_range() {
        // 997.6mm at x1000 is 997600, beyond a 16-bit register
        assert_eq!(scale_and_clamp(997.6, 1000.0), REGISTER_MAX);
    }

    #[test]
    fn test_clamp_below_zero() {
        assert_eq!(scale_and_clamp(-5.0, 1000.0), 0);
    }

    #[test]
    fn test_non_finite_substituted() {
        assert_eq!(scale_and_clamp(f64::NAN, 1.0), 0);
        assert_eq!(scale_and_clamp(f64::INFINITY, 1.0), 0);
        assert_eq!(scale_and_clamp(1.0, f64::NAN), 0);
    }

    #[test]
    fn test_monotonic_under_same_scale() {
        let samples = [-10.0, -0.1, 0.0, 0.5, 1.0, 100.0, 65535.0, 70_000.0];
        for scale in [0.5, 1.0, 10.0, 1000.0] {
            for pair in samples.windows(2) {
                assert!(
                    scale_and_clamp(pair[0], scale) <= scale_and_clamp(pair[1], scale),
                    "not monotonic for {:?} at scale {}",
                    pair,
                    scale
                );
            }
        }
    }

    #[test]
    fn test_validate_and_clamp() {
        let rule = ValidationRule::new(10.0, 100.0, false);
        assert_eq!(validate_and_clamp(50.0, &rule), 50.0);
        assert_eq!(validate_and_clamp(5.0, &rule), 10.0);
        assert_eq!(validate_and_clamp(150.0, &rule), 100.0);
        // without the zero flag, negatives clamp up to min
        assert_eq!(validate_and_clamp(-5.0, &rule), 10.0);
    }

    #[test]
    fn test_validate_clamp_negative_to_zero() {
        let rule = ValidationRule::new(10.0, 100.0, true);
        assert_eq!(validate_and_clamp(-5.0, &rule), 0.0);
        // non-negative values still honour min
        assert_eq!(validate_and_clamp(5.0, &rule), 10.0);
    }

    #[test]
    fn test_tool_number_check_is_boolean() {
        let rule = ValidationRule::new(1.0, 99.0, false);
        assert!(is_valid_tool_number(1.0, &rule));
        assert!(is_valid_tool_number(99.0, &rule));
        assert!(!is_valid_tool_number(0.0, &rule));
        assert!(!is_valid_tool_number(100.0, &rule));
    }
}
