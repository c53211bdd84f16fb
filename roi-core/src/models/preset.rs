use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown preset '{0}' (expected low, average or aggressive)")]
pub struct ParsePresetError(pub String);

/// Named assumption bundle, ordered from most to least conservative.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Low,
    #[default]
    Average,
    Aggressive,
}

/// Default values a preset writes into the editable inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetDefaults {
    pub adoption_rate: Decimal,
    pub hours_saved_per_week: Decimal,
    pub confidence_discount: Decimal,
}

impl Preset {
    pub fn all() -> &'static [Preset] {
        &[Preset::Low, Preset::Average, Preset::Aggressive]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Average => "Average",
            Self::Aggressive => "Aggressive",
        }
    }

    pub fn defaults(&self) -> PresetDefaults {
        match self {
            Self::Low => PresetDefaults {
                adoption_rate: dec!(0.30),
                hours_saved_per_week: dec!(2),
                confidence_discount: dec!(0.50),
            },
            Self::Average => PresetDefaults {
                adoption_rate: dec!(0.60),
                hours_saved_per_week: dec!(4),
                confidence_discount: dec!(0.70),
            },
            Self::Aggressive => PresetDefaults {
                adoption_rate: dec!(0.85),
                hours_saved_per_week: dec!(6),
                confidence_discount: dec!(0.90),
            },
        }
    }
}

/// Pure lookup of the defaults bound to `preset`.
pub fn apply_preset(preset: Preset) -> PresetDefaults {
    preset.defaults()
}

impl fmt::Display for Preset {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Preset {
    type Err = ParsePresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Preset::all()
            .iter()
            .copied()
            .find(|p| p.label().eq_ignore_ascii_case(name))
            .ok_or_else(|| ParsePresetError(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn presets_are_ordered_by_aggressiveness() {
        assert!(Preset::Low < Preset::Average);
        assert!(Preset::Average < Preset::Aggressive);
    }

    #[test]
    fn more_aggressive_presets_never_lower_any_default() {
        for pair in Preset::all().windows(2) {
            let (lower, higher) = (pair[0].defaults(), pair[1].defaults());
            assert!(lower.adoption_rate <= higher.adoption_rate);
            assert!(lower.hours_saved_per_week <= higher.hours_saved_per_week);
            assert!(lower.confidence_discount <= higher.confidence_discount);
        }
    }

    #[test]
    fn defaults_stay_within_fraction_bounds() {
        for preset in Preset::all() {
            let d = preset.defaults();
            assert!(d.adoption_rate >= Decimal::ZERO && d.adoption_rate <= Decimal::ONE);
            assert!(d.confidence_discount >= Decimal::ZERO && d.confidence_discount <= Decimal::ONE);
            assert!(d.hours_saved_per_week > Decimal::ZERO);
        }
    }

    #[test]
    fn apply_preset_is_a_pure_lookup() {
        assert_eq!(apply_preset(Preset::Low), apply_preset(Preset::Low));
        assert_eq!(apply_preset(Preset::Average).adoption_rate, dec!(0.60));
    }

    #[test]
    fn preset_parses_label_case_insensitively() {
        assert_eq!("AGGRESSIVE".parse::<Preset>(), Ok(Preset::Aggressive));
        assert_eq!("low".parse::<Preset>(), Ok(Preset::Low));
        assert!("medium".parse::<Preset>().is_err());
    }
}
