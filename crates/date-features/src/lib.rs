//! Calendar Feature Derivation
//!
//! Derives integer calendar columns (year, quarter, week of year, day of
//! week, weekend flag, ...) from the time index of univariate, multivariate
//! and panel frames, with fit/transform semantics.

mod config;
mod error;
mod feature;
mod frequency;
mod scope;
mod transformer;

pub use crate::config::{DateFeaturesConfig, ENV_PREFIX};
pub use error::{DateFeaturesError, Result};
pub use feature::Feature;
pub use frequency::Frequency;
pub use scope::FeatureScope;
pub use transformer::DateTimeFeatures;

pub use time_frame::{Granularity, TimeIndexedFrame};
