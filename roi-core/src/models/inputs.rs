use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Currency, Preset, Priority};

/// Every value the user supplies across the wizard steps.
///
/// Monetary values are expressed in `currency`. A fresh aggregate starts
/// with the [`Preset::Average`] defaults applied and nothing else filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputAggregate {
    /// Number of people receiving training. Must be a positive whole number.
    pub team_size: Decimal,

    /// Average annual salary per person.
    pub avg_salary: Decimal,

    /// Hours per person per week that AI tooling can save.
    pub hours_per_week: Decimal,

    /// Fraction of the available saving actually realised.
    pub adoption_rate: Decimal,

    /// Fraction by which the soft (retention) benefit is discounted.
    pub confidence_discount: Decimal,

    /// Label of the last preset applied. Field overrides keep the label.
    pub preset: Option<Preset>,

    pub selected_priorities: BTreeSet<Priority>,

    pub currency: Currency,
}

impl InputAggregate {
    pub fn new(currency: Currency) -> Self {
        let mut inputs = Self {
            team_size: Decimal::ZERO,
            avg_salary: Decimal::ZERO,
            hours_per_week: Decimal::ZERO,
            adoption_rate: Decimal::ZERO,
            confidence_discount: Decimal::ZERO,
            preset: None,
            selected_priorities: BTreeSet::new(),
            currency,
        };
        inputs.apply_preset(Preset::default());
        inputs
    }

    /// Overwrites the preset-controlled fields with `preset`'s defaults.
    ///
    /// Re-selecting a preset, including the current one, always re-applies
    /// its defaults and discards manual overrides of those fields.
    pub fn apply_preset(
        &mut self,
        preset: Preset,
    ) {
        let defaults = preset.defaults();
        self.adoption_rate = defaults.adoption_rate;
        self.hours_per_week = defaults.hours_saved_per_week;
        self.confidence_discount = defaults.confidence_discount;
        self.preset = Some(preset);
    }

    /// Returns `true` when the preset-controlled fields still match the
    /// defaults of the selected preset.
    pub fn matches_preset(&self) -> bool {
        self.preset.is_some_and(|p| {
            let d = p.defaults();
            d.adoption_rate == self.adoption_rate
                && d.hours_saved_per_week == self.hours_per_week
                && d.confidence_discount == self.confidence_discount
        })
    }
}

impl Default for InputAggregate {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn new_aggregate_is_average_preset_defaulted() {
        let inputs = InputAggregate::new(Currency::Usd);

        assert_eq!(inputs.preset, Some(Preset::Average));
        assert_eq!(inputs.adoption_rate, dec!(0.60));
        assert_eq!(inputs.hours_per_week, dec!(4));
        assert_eq!(inputs.team_size, Decimal::ZERO);
        assert!(inputs.selected_priorities.is_empty());
        assert_eq!(inputs.currency, Currency::Usd);
    }

    #[test]
    fn applying_same_preset_twice_is_idempotent() {
        let mut once = InputAggregate::default();
        once.apply_preset(Preset::Aggressive);
        let mut twice = once.clone();
        twice.apply_preset(Preset::Aggressive);

        assert_eq!(once, twice);
    }

    #[test]
    fn override_keeps_label_until_preset_reselected() {
        let mut inputs = InputAggregate::default();
        inputs.apply_preset(Preset::Low);
        inputs.adoption_rate = dec!(0.9);

        assert_eq!(inputs.preset, Some(Preset::Low));
        assert!(!inputs.matches_preset());

        inputs.apply_preset(Preset::Low);

        assert_eq!(inputs.adoption_rate, dec!(0.30));
        assert!(inputs.matches_preset());
    }

    #[test]
    fn switching_preset_is_last_write_wins() {
        let mut inputs = InputAggregate::default();
        inputs.apply_preset(Preset::Aggressive);
        inputs.apply_preset(Preset::Low);

        assert_eq!(inputs.preset, Some(Preset::Low));
        assert_eq!(inputs.hours_per_week, dec!(2));
        assert_eq!(inputs.confidence_discount, dec!(0.50));
    }
}
