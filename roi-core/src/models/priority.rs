//! Benefit categories and their relative weights.
//!
//! A user picks one or more [`Priority`] values; their raw weights are
//! normalized so the selected subset sums to exactly one. The normalized
//! weight of [`Priority::Retention`] scales the retention-impact KPI.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown priority '{0}'")]
pub struct ParsePriorityError(pub String);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Priority {
    TimeSaved,
    Quality,
    Retention,
    Innovation,
}

impl Priority {
    pub fn all() -> &'static [Priority] {
        &[
            Priority::TimeSaved,
            Priority::Quality,
            Priority::Retention,
            Priority::Innovation,
        ]
    }

    /// Relative weight before normalization. Always positive.
    pub fn weight(&self) -> Decimal {
        match self {
            Self::TimeSaved => Decimal::from(3),
            Self::Quality => Decimal::TWO,
            Self::Retention => Decimal::TWO,
            Self::Innovation => Decimal::ONE,
        }
    }

    /// Short machine name, also accepted by [`FromStr`].
    pub fn key(&self) -> &'static str {
        match self {
            Self::TimeSaved => "time",
            Self::Quality => "quality",
            Self::Retention => "retention",
            Self::Innovation => "innovation",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::TimeSaved => "Time saved",
            Self::Quality => "Work quality",
            Self::Retention => "Staff retention",
            Self::Innovation => "Innovation",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Priority::all()
            .iter()
            .copied()
            .find(|p| {
                p.key().eq_ignore_ascii_case(name)
                    || p.label().eq_ignore_ascii_case(name)
                    || (*p == Priority::TimeSaved && name.eq_ignore_ascii_case("timesaved"))
            })
            .ok_or_else(|| ParsePriorityError(name.to_string()))
    }
}

/// Weights of a non-empty selection, summing to exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedWeights {
    weights: BTreeMap<Priority, Decimal>,
}

impl NormalizedWeights {
    /// Normalized weight of `priority`; zero when it is not selected.
    pub fn weight(
        &self,
        priority: Priority,
    ) -> Decimal {
        self.weights.get(&priority).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Priority, Decimal)> + '_ {
        self.weights.iter().map(|(p, w)| (*p, *w))
    }

    pub fn total(&self) -> Decimal {
        self.weights.values().copied().sum()
    }
}

/// Normalizes the weights of the selected priorities.
///
/// Returns `None` for an empty selection; an empty selection is invalid
/// rather than zero-weighted. The last category in the selection absorbs
/// the division remainder so the total is exactly one.
///
/// ```
/// use std::collections::BTreeSet;
/// use rust_decimal_macros::dec;
/// use roi_core::{Priority, select_priorities};
///
/// let selected = BTreeSet::from([Priority::TimeSaved, Priority::Retention]);
/// let weights = select_priorities(&selected).unwrap();
///
/// assert_eq!(weights.weight(Priority::TimeSaved), dec!(0.6));
/// assert_eq!(weights.weight(Priority::Retention), dec!(0.4));
/// assert_eq!(weights.weight(Priority::Quality), dec!(0));
/// ```
pub fn select_priorities(selected: &BTreeSet<Priority>) -> Option<NormalizedWeights> {
    let last = *selected.iter().next_back()?;
    let total: Decimal = selected.iter().map(Priority::weight).sum();

    let mut weights = BTreeMap::new();
    let mut assigned = Decimal::ZERO;
    for priority in selected.iter().copied().filter(|p| *p != last) {
        let share = (priority.weight() / total).normalize();
        assigned += share;
        weights.insert(priority, share);
    }
    weights.insert(last, Decimal::ONE - assigned);

    Some(NormalizedWeights { weights })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn empty_selection_has_no_weights() {
        assert_eq!(select_priorities(&BTreeSet::new()), None);
    }

    #[test]
    fn single_selection_gets_full_weight() {
        let weights = select_priorities(&BTreeSet::from([Priority::Quality])).unwrap();

        assert_eq!(weights.weight(Priority::Quality), Decimal::ONE);
        assert_eq!(weights.weight(Priority::Retention), Decimal::ZERO);
    }

    #[test]
    fn full_selection_is_proportional_to_raw_weights() {
        let all: BTreeSet<_> = Priority::all().iter().copied().collect();
        let weights = select_priorities(&all).unwrap();

        assert_eq!(weights.weight(Priority::TimeSaved), dec!(0.375));
        assert_eq!(weights.weight(Priority::Quality), dec!(0.25));
        assert_eq!(weights.weight(Priority::Retention), dec!(0.25));
        assert_eq!(weights.weight(Priority::Innovation), dec!(0.125));
    }

    #[test]
    fn repeating_fractions_still_sum_to_exactly_one() {
        let selected = BTreeSet::from([Priority::Quality, Priority::Innovation]);
        let weights = select_priorities(&selected).unwrap();

        assert_eq!(weights.total(), Decimal::ONE);
        assert!(weights.weight(Priority::Quality) > weights.weight(Priority::Innovation));
    }

    #[test]
    fn every_raw_weight_is_positive() {
        assert!(Priority::all().iter().all(|p| p.weight() > Decimal::ZERO));
    }

    #[test]
    fn priority_parses_key_and_label() {
        assert_eq!("retention".parse::<Priority>(), Ok(Priority::Retention));
        assert_eq!("Work quality".parse::<Priority>(), Ok(Priority::Quality));
        assert_eq!("TimeSaved".parse::<Priority>(), Ok(Priority::TimeSaved));
        assert!("speed".parse::<Priority>().is_err());
    }
}
