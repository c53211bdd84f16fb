//! Display currencies and money formatting.
//!
//! The wizard works in exactly one currency at a time. Amounts are always
//! rendered as whole units with the currency symbol in front and `,` as the
//! thousands separator:
//!
//! ```
//! use rust_decimal_macros::dec;
//! use roi_core::{Currency, format_money};
//!
//! assert_eq!(format_money(dec!(1234.6), Currency::Eur), "€1,235");
//! assert_eq!(format_money(dec!(999), Currency::Gbp), "£999");
//! assert_eq!(format_money(dec!(1500000), Currency::Aud), "A$1,500,000");
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a string is not one of the supported ISO codes.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported currency '{0}' (expected one of EUR, USD, GBP, AUD)")]
pub struct ParseCurrencyError(pub String);

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Eur,
    Usd,
    Gbp,
    Aud,
}

impl Currency {
    pub fn all() -> &'static [Currency] {
        &[Currency::Eur, Currency::Usd, Currency::Gbp, Currency::Aud]
    }

    /// ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Eur => "EUR",
            Self::Usd => "USD",
            Self::Gbp => "GBP",
            Self::Aud => "AUD",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Eur => "€",
            Self::Usd => "$",
            Self::Gbp => "£",
            Self::Aud => "A$",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Eur => "Euro",
            Self::Usd => "US Dollar",
            Self::Gbp => "British Pound",
            Self::Aud => "Australian Dollar",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ParseCurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Currency::all()
            .iter()
            .copied()
            .find(|c| c.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| ParseCurrencyError(code.to_string()))
    }
}

/// Rounds to whole units, midpoint away from zero.
pub fn round_to_units(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds `value` to whole units and groups the digits in threes.
///
/// ```
/// use rust_decimal_macros::dec;
/// use roi_core::format_grouped;
///
/// assert_eq!(format_grouped(dec!(7800)), "7,800");
/// assert_eq!(format_grouped(dec!(-1234567.5)), "-1,234,568");
/// ```
pub fn format_grouped(value: Decimal) -> String {
    let rounded = round_to_units(value);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < Decimal::ZERO {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Formats a monetary amount for display in `currency`.
///
/// The amount is rounded to the nearest whole unit before rendering; the
/// sign, if any, precedes the symbol (`-€1,235`).
pub fn format_money(
    amount: Decimal,
    currency: Currency,
) -> String {
    let grouped = format_grouped(amount);
    match grouped.strip_prefix('-') {
        Some(magnitude) => format!("-{}{}", currency.symbol(), magnitude),
        None => format!("{}{}", currency.symbol(), grouped),
    }
}

/// Optional conversion table.
///
/// Each entry is the number of units of that currency per one unit of a
/// shared pivot, so any pair with both rates present can be converted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExchangeRates {
    rates: BTreeMap<Currency, Decimal>,
}

impl ExchangeRates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rate(
        mut self,
        currency: Currency,
        rate: Decimal,
    ) -> Self {
        self.rates.insert(currency, rate);
        self
    }

    pub fn rate(
        &self,
        currency: Currency,
    ) -> Option<Decimal> {
        self.rates.get(&currency).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Currency, Decimal)> + '_ {
        self.rates.iter().map(|(c, r)| (*c, *r))
    }

    /// Converts `amount` from one currency to another.
    ///
    /// Returns `None` when either rate is missing or not positive.
    pub fn convert(
        &self,
        amount: Decimal,
        from: Currency,
        to: Currency,
    ) -> Option<Decimal> {
        if from == to {
            return Some(amount);
        }
        let from_rate = self.rate(from).filter(|r| *r > Decimal::ZERO)?;
        let to_rate = self.rate(to).filter(|r| *r > Decimal::ZERO)?;
        amount.checked_mul(to_rate)?.checked_div(from_rate)
    }
}
