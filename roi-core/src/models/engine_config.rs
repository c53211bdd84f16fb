use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Currency, ExchangeRates};

/// Errors reported by [`EngineConfig::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineConfigError {
    /// Training cost must be zero or more.
    #[error("training cost value must be non-negative, got {0}")]
    NegativeTrainingCost(Decimal),

    /// The hourly-rate divisor must be positive.
    #[error("annual working hours must be positive, got {0}")]
    InvalidAnnualWorkingHours(Decimal),

    /// Every configured exchange rate must be positive.
    #[error("exchange rate for {currency} must be positive, got {rate}")]
    InvalidExchangeRate { currency: Currency, rate: Decimal },
}

/// How the one-off training cost is derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrainingCostMode {
    /// `training_cost_value` is the total cost.
    #[default]
    Flat,
    /// `training_cost_value` is multiplied by the team size.
    PerHead,
}

/// Settings supplied once when a wizard session starts.
///
/// These are not part of the user-editable steps.
///
/// ```
/// use rust_decimal_macros::dec;
/// use roi_core::{EngineConfig, TrainingCostMode};
///
/// let config = EngineConfig {
///     training_cost_mode: TrainingCostMode::PerHead,
///     training_cost_value: dec!(400),
///     ..EngineConfig::default()
/// };
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.training_cost(dec!(50)), dec!(20000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub training_cost_mode: TrainingCostMode,

    /// Flat total or per-person cost, in the active currency.
    pub training_cost_value: Decimal,

    /// Paid hours per year used to turn a salary into an hourly rate.
    pub annual_working_hours: Decimal,

    /// Currency the wizard starts in.
    pub default_currency: Currency,

    /// When non-empty, switching currency converts monetary inputs.
    pub exchange_rates: ExchangeRates,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            training_cost_mode: TrainingCostMode::Flat,
            training_cost_value: dec!(20000),
            annual_working_hours: dec!(2080),
            default_currency: Currency::Eur,
            exchange_rates: ExchangeRates::default(),
        }
    }
}

impl EngineConfig {
    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`EngineConfigError`] if:
    /// - `training_cost_value` is negative
    /// - `annual_working_hours` is not positive
    /// - any exchange rate is not positive
    pub fn validate(&self) -> Result<(), EngineConfigError> {
        if self.training_cost_value < Decimal::ZERO {
            return Err(EngineConfigError::NegativeTrainingCost(
                self.training_cost_value,
            ));
        }

        if self.annual_working_hours <= Decimal::ZERO {
            return Err(EngineConfigError::InvalidAnnualWorkingHours(
                self.annual_working_hours,
            ));
        }

        if let Some((currency, rate)) = self
            .exchange_rates
            .iter()
            .find(|(_, rate)| *rate <= Decimal::ZERO)
        {
            return Err(EngineConfigError::InvalidExchangeRate { currency, rate });
        }

        Ok(())
    }

    /// Total training cost for a team of `team_size` people.
    pub fn training_cost(
        &self,
        team_size: Decimal,
    ) -> Decimal {
        match self.training_cost_mode {
            TrainingCostMode::Flat => self.training_cost_value,
            TrainingCostMode::PerHead => self.training_cost_value.saturating_mul(team_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(EngineConfig::default().validate(), Ok(()));
    }

    #[test]
    fn flat_cost_ignores_team_size() {
        let config = EngineConfig::default();

        assert_eq!(config.training_cost(dec!(1)), dec!(20000));
        assert_eq!(config.training_cost(dec!(500)), dec!(20000));
    }

    #[test]
    fn negative_training_cost_is_rejected() {
        let config = EngineConfig {
            training_cost_value: dec!(-1),
            ..EngineConfig::default()
        };

        assert_eq!(
            config.validate(),
            Err(EngineConfigError::NegativeTrainingCost(dec!(-1)))
        );
    }

    #[test]
    fn zero_working_hours_is_rejected() {
        let config = EngineConfig {
            annual_working_hours: Decimal::ZERO,
            ..EngineConfig::default()
        };

        assert_eq!(
            config.validate(),
            Err(EngineConfigError::InvalidAnnualWorkingHours(Decimal::ZERO))
        );
    }

    #[test]
    fn non_positive_exchange_rate_is_rejected() {
        let config = EngineConfig {
            exchange_rates: ExchangeRates::new()
                .with_rate(Currency::Usd, dec!(1))
                .with_rate(Currency::Gbp, dec!(0)),
            ..EngineConfig::default()
        };

        assert_eq!(
            config.validate(),
            Err(EngineConfigError::InvalidExchangeRate {
                currency: Currency::Gbp,
                rate: dec!(0),
            })
        );
    }

    #[test]
    fn config_deserializes_from_toml() {
        let config: EngineConfig = toml::from_str(
            r#"
            training_cost_mode = "perHead"
            training_cost_value = 350
            default_currency = "GBP"

            [exchange_rates]
            USD = 1
            GBP = 0.8
            "#,
        )
        .unwrap();

        assert_eq!(config.training_cost_mode, TrainingCostMode::PerHead);
        assert_eq!(config.training_cost_value, dec!(350));
        assert_eq!(config.annual_working_hours, dec!(2080));
        assert_eq!(config.default_currency, Currency::Gbp);
        assert_eq!(config.exchange_rates.rate(Currency::Gbp), Some(dec!(0.8)));
    }
}
