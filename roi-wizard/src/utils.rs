use roi_core::Currency;
use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid number '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Strips whitespace, thousands separators and any leading currency symbol.
fn normalize_decimal_input(s: &str) -> String {
    let trimmed = s.trim();
    let unsigned = Currency::all()
        .iter()
        .find_map(|c| trimmed.strip_prefix(c.symbol()))
        .unwrap_or(trimmed);
    unsigned.trim().replace(',', "")
}

/// Parses a string into a [`Decimal`].
///
/// Handles comma as thousands separator and a leading currency symbol
/// (e.g. `"€60,000"`). Empty input is treated as 0.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::debug!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Parses a fraction written either as a decimal (`0.6`) or a percentage
/// (`60%`).
pub fn parse_fraction(s: &str) -> Result<Decimal, ParseDecimalError> {
    match s.trim().strip_suffix('%') {
        Some(percent) => Ok(parse_decimal(percent)? / Decimal::ONE_HUNDRED),
        None => parse_decimal(s),
    }
}

/// Formats a fraction as a percentage for prompts (`0.6` → `"60%"`).
///
/// Out-of-range values are shown saturated rather than rejected; the
/// validator reports them.
pub fn fraction_display(value: Decimal) -> String {
    format!("{}%", value.saturating_mul(Decimal::ONE_HUNDRED).normalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn parse_decimal_accepts_comma_thousands_separator() {
        assert_eq!(parse_decimal("1,234.56").unwrap(), dec!(1234.56));
        assert_eq!(parse_decimal("1,234,567.89").unwrap(), dec!(1234567.89));
    }

    #[test]
    fn parse_decimal_strips_currency_symbols() {
        assert_eq!(parse_decimal("€60,000").unwrap(), dec!(60000));
        assert_eq!(parse_decimal("A$ 95,000").unwrap(), dec!(95000));
        assert_eq!(parse_decimal("$12").unwrap(), dec!(12));
    }

    #[test]
    fn parse_decimal_trim_whitespace() {
        assert_eq!(parse_decimal("  123.45  ").unwrap(), dec!(123.45));
    }

    #[test]
    fn parse_decimal_empty_treated_as_zero() {
        assert_eq!(parse_decimal("").unwrap(), Decimal::ZERO);
        assert_eq!(parse_decimal("   ").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn parse_decimal_invalid_returns_error() {
        assert!(parse_decimal("abc").is_err());
    }

    #[test]
    fn parse_fraction_accepts_percentages() {
        assert_eq!(parse_fraction("60%").unwrap(), dec!(0.6));
        assert_eq!(parse_fraction(" 100 % ").unwrap(), dec!(1));
        assert_eq!(parse_fraction("0.25").unwrap(), dec!(0.25));
    }

    #[test]
    fn fraction_display_drops_trailing_zeros() {
        assert_eq!(fraction_display(dec!(0.60)), "60%");
        assert_eq!(fraction_display(dec!(0.855)), "85.5%");
    }

    #[test]
    fn fraction_display_saturates_huge_values() {
        assert_eq!(
            fraction_display(Decimal::MAX),
            format!("{}%", Decimal::MAX)
        );
        assert_eq!(
            fraction_display(Decimal::MIN),
            format!("{}%", Decimal::MIN)
        );
    }
}
