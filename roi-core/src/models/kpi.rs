use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Months needed for savings to cover the training cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "months", rename_all = "camelCase")]
pub enum Payback {
    Months(Decimal),
    /// Savings are zero, so the cost is never recovered.
    NotApplicable,
}

impl Payback {
    pub fn months(&self) -> Option<Decimal> {
        match self {
            Self::Months(m) => Some(*m),
            Self::NotApplicable => None,
        }
    }

    pub fn is_applicable(&self) -> bool {
        matches!(self, Self::Months(_))
    }
}

impl fmt::Display for Payback {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Months(m) => {
                let rounded = m.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
                write!(f, "{rounded:.2} months")
            }
            Self::NotApplicable => f.write_str("not applicable"),
        }
    }
}

/// Headline metrics shown at the summary step.
///
/// Always derived from an [`InputAggregate`](super::InputAggregate); never
/// edited on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiResult {
    pub hours_saved_per_year: Decimal,
    pub annual_savings_amount: Decimal,
    pub payback: Payback,
    /// Qualitative indicator in [0, 1].
    pub retention_impact_score: Decimal,
    pub training_cost: Decimal,
    /// `(savings - cost) / cost` over the first year, `None` when free.
    pub first_year_roi: Option<Decimal>,
}

impl KpiResult {
    /// Retention impact as a whole percentage.
    pub fn retention_percent(&self) -> Decimal {
        (self.retention_impact_score * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    }

    /// First-year ROI as a whole percentage.
    pub fn first_year_roi_percent(&self) -> Option<Decimal> {
        self.first_year_roi.map(|roi| {
            roi.saturating_mul(Decimal::ONE_HUNDRED)
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn payback_displays_two_decimals() {
        assert_eq!(
            Payback::Months(dec!(1.0666666666)).to_string(),
            "1.07 months"
        );
        assert_eq!(Payback::Months(dec!(3)).to_string(), "3.00 months");
    }

    #[test]
    fn not_applicable_payback_displays_sentinel() {
        assert_eq!(Payback::NotApplicable.to_string(), "not applicable");
        assert_eq!(Payback::NotApplicable.months(), None);
    }

    #[test]
    fn retention_percent_rounds_score() {
        let result = KpiResult {
            hours_saved_per_year: dec!(0),
            annual_savings_amount: dec!(0),
            payback: Payback::NotApplicable,
            retention_impact_score: dec!(0.1685),
            training_cost: dec!(0),
            first_year_roi: None,
        };

        assert_eq!(result.retention_percent(), dec!(17));
        assert_eq!(result.first_year_roi_percent(), None);
    }
}
