//! Common utility functions for money and percentage display.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use sugarret_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Expresses a fractional rate as a percentage, e.g. `0.12` as `12`.
///
/// ```
/// use rust_decimal_macros::dec;
/// use sugarret_core::calculations::common::as_percent;
///
/// assert_eq!(as_percent(dec!(0.125)), dec!(12.5));
/// ```
pub fn as_percent(rate: Decimal) -> Decimal {
    (rate * Decimal::ONE_HUNDRED).normalize()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(5600.004)), dec!(5600.00));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(42.445)), dec!(42.45));
    }

    #[test]
    fn round_half_up_handles_negative_values() {
        assert_eq!(round_half_up(dec!(-0.005)), dec!(-0.01));
    }

    #[test]
    fn round_half_up_preserves_whole_amounts() {
        assert_eq!(round_half_up(dec!(7100)), dec!(7100));
    }

    // =========================================================================
    // as_percent tests
    // =========================================================================

    #[test]
    fn as_percent_scales_by_one_hundred() {
        assert_eq!(as_percent(dec!(0.20)), dec!(20));
    }

    #[test]
    fn as_percent_handles_zero() {
        assert_eq!(as_percent(dec!(0)), dec!(0));
    }
}
