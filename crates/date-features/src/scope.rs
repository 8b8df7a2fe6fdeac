//! Feature Scopes

use crate::error::DateFeaturesError;
use crate::feature::Feature;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time_frame::Granularity;

/// Features of the minimal scope, canonical order
const MINIMAL: &[Feature] = &[
    Feature::Year,
    Feature::MonthOfYear,
    Feature::DayOfWeek,
    Feature::HourOfDay,
    Feature::MinuteOfHour,
    Feature::SecondOfMinute,
    Feature::MillisecondOfSecond,
];

/// Named preset of calendar features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureScope {
    #[default]
    Minimal,
    Comprehensive,
}

impl FeatureScope {
    pub fn name(self) -> &'static str {
        match self {
            FeatureScope::Minimal => "minimal",
            FeatureScope::Comprehensive => "comprehensive",
        }
    }

    /// Scope members in canonical order
    pub fn features(self) -> &'static [Feature] {
        match self {
            FeatureScope::Minimal => MINIMAL,
            FeatureScope::Comprehensive => &Feature::ALL,
        }
    }

    /// Scope members not finer than `cadence`; everything when unknown
    pub fn resolve(self, cadence: Option<Granularity>) -> Vec<Feature> {
        self.features()
            .iter()
            .copied()
            .filter(|f| cadence.map_or(true, |c| !f.granularity().is_finer_than(c)))
            .collect()
    }
}

impl fmt::Display for FeatureScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FeatureScope {
    type Err = DateFeaturesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minimal" => Ok(FeatureScope::Minimal),
            "comprehensive" => Ok(FeatureScope::Comprehensive),
            other => Err(DateFeaturesError::Configuration(format!(
                "unknown feature_scope '{other}', expected 'minimal' or 'comprehensive'"
            ))),
        }
    }
}
