//! Shared numeric helpers for the KPI calculations.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use roi_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(1.066666)), dec!(1.07));
/// assert_eq!(round_half_up(dec!(28.845)), dec!(28.85));
/// assert_eq!(round_half_up(dec!(-0.125)), dec!(-0.13));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps `value` into the closed interval [0, 1].
///
/// ```
/// use rust_decimal_macros::dec;
/// use roi_core::calculations::common::clamp_fraction;
///
/// assert_eq!(clamp_fraction(dec!(1.2)), dec!(1));
/// assert_eq!(clamp_fraction(dec!(-0.1)), dec!(0));
/// assert_eq!(clamp_fraction(dec!(0.42)), dec!(0.42));
/// ```
pub fn clamp_fraction(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, Decimal::ONE)
}

/// Returns `true` when `value` lies in [0, 1].
pub fn is_fraction(value: Decimal) -> bool {
    value >= Decimal::ZERO && value <= Decimal::ONE
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
        assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
    }

    #[test]
    fn round_half_up_handles_negative_values() {
        assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
    }

    #[test]
    fn round_half_up_handles_zero() {
        assert_eq!(round_half_up(dec!(0.00)), dec!(0.00));
    }

    // =========================================================================
    // fraction helper tests
    // =========================================================================

    #[test]
    fn clamp_fraction_keeps_bounds() {
        assert_eq!(clamp_fraction(dec!(0)), dec!(0));
        assert_eq!(clamp_fraction(dec!(1)), dec!(1));
    }

    #[test]
    fn is_fraction_includes_both_ends() {
        assert!(is_fraction(dec!(0)));
        assert!(is_fraction(dec!(1)));
        assert!(!is_fraction(dec!(1.01)));
        assert!(!is_fraction(dec!(-0.01)));
    }
}
