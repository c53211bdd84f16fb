//! KPI calculations for the training ROI wizard.
//!
//! The engine is a pure projection of an [`InputAggregate`](crate::InputAggregate):
//! it holds no state beyond its configuration and never mutates its input.

pub mod common;
pub mod roi;

pub use roi::{RoiCalculator, WEEKS_PER_YEAR};
