//! Calendar feature transformer

use crate::config::DateFeaturesConfig;
use crate::error::{DateFeaturesError, Result};
use crate::feature::Feature;
use crate::frequency::Frequency;
use crate::scope::FeatureScope;
use std::collections::HashSet;
use time_frame::{Column, Granularity, Group, TimeIndex, TimeIndexedFrame};
use tracing::{debug, warn};

/// How the output features are chosen
#[derive(Debug, Clone, PartialEq)]
enum Selection {
    /// Exactly these features, in this order
    Manual(Vec<Feature>),
    /// A scope, filtered by the sampling cadence
    Scope(FeatureScope),
}

/// Derives calendar columns from the time index of a frame
///
/// Construction validates the configuration; `fit` only checks the index,
/// so the same instance can transform any number of frames.
#[derive(Debug, Clone)]
pub struct DateTimeFeatures {
    config: DateFeaturesConfig,
    ts_freq: Option<Frequency>,
    selection: Selection,
    /// Manually selected features finer than `ts_freq`
    granularity_warnings: Vec<Feature>,
}

impl DateTimeFeatures {
    /// Create a deriver, rejecting unknown scopes, features or frequencies
    pub fn new(config: DateFeaturesConfig) -> Result<Self> {
        let scope: FeatureScope = config.feature_scope.parse()?;
        let ts_freq = config
            .ts_freq
            .as_deref()
            .map(str::parse::<Frequency>)
            .transpose()?;

        let selection = match &config.manual_selection {
            Some(names) => Selection::Manual(parse_manual_selection(names)?),
            None => Selection::Scope(scope),
        };

        let granularity_warnings = match (&selection, ts_freq) {
            (Selection::Manual(features), Some(freq)) => features
                .iter()
                .copied()
                .filter(|f| f.granularity().is_finer_than(freq.granularity()))
                .collect(),
            _ => Vec::new(),
        };

        debug!(
            "DateTimeFeatures configured: selection={:?}, ts_freq={:?}, keep_original_columns={}",
            selection, ts_freq, config.keep_original_columns
        );

        Ok(Self {
            config,
            ts_freq,
            selection,
            granularity_warnings,
        })
    }

    pub fn config(&self) -> &DateFeaturesConfig {
        &self.config
    }

    /// Parsed `ts_freq`, if one was configured
    pub fn ts_freq(&self) -> Option<Frequency> {
        self.ts_freq
    }

    /// Manually selected features that resolve time more finely than `ts_freq`
    pub fn granularity_warnings(&self) -> &[Feature] {
        &self.granularity_warnings
    }

    /// Features `transform` would emit for `data`, in output order
    pub fn output_features(&self, data: &TimeIndexedFrame) -> Vec<Feature> {
        self.resolve_features(data, &data.groups())
    }

    /// Check that `data` has a time-like index; no state is stored
    pub fn fit(&self, data: &TimeIndexedFrame) -> Result<()> {
        ensure_time_index(data)?;
        debug!(
            "DateTimeFeatures fit on {} rows ({} index)",
            data.len(),
            data.index().kind()
        );
        Ok(())
    }

    /// Derive the calendar columns for every row of `data`
    pub fn transform(&self, data: &TimeIndexedFrame) -> Result<TimeIndexedFrame> {
        let timestamps = data.index().to_timestamps().ok_or_else(|| unsupported(data))?;

        let groups = data.groups();
        let features = self.resolve_features(data, &groups);

        if let Some(freq) = self.ts_freq {
            for feature in &self.granularity_warnings {
                warn!(
                    "Feature '{}' is finer than ts_freq ({}); it is kept but may be constant",
                    feature, freq
                );
            }
        }

        debug!(
            "Deriving {} calendar features for {} rows in {} group(s)",
            features.len(),
            data.len(),
            groups.len()
        );

        let mut values: Vec<Vec<i64>> = vec![vec![0; data.len()]; features.len()];
        for group in &groups {
            for &row in &group.rows {
                let at = &timestamps[row];
                for (column, feature) in values.iter_mut().zip(&features) {
                    column[row] = feature.compute(at);
                }
            }
        }

        let mut columns = if self.config.keep_original_columns {
            data.columns().to_vec()
        } else {
            Vec::with_capacity(features.len())
        };
        columns.extend(
            features
                .iter()
                .zip(values)
                .map(|(feature, column)| Column::int(feature.name(), column)),
        );

        Ok(data.with_columns(columns)?)
    }

    /// `fit` followed by `transform`
    pub fn fit_transform(&self, data: &TimeIndexedFrame) -> Result<TimeIndexedFrame> {
        self.fit(data)?;
        self.transform(data)
    }

    fn resolve_features(&self, data: &TimeIndexedFrame, groups: &[Group]) -> Vec<Feature> {
        match &self.selection {
            Selection::Manual(features) => features.clone(),
            Selection::Scope(scope) => {
                let cadence = self
                    .ts_freq
                    .map(|f| f.granularity())
                    .or_else(|| infer_cadence(data, groups));
                scope.resolve(cadence)
            }
        }
    }
}

fn parse_manual_selection(names: &[String]) -> Result<Vec<Feature>> {
    if names.is_empty() {
        return Err(DateFeaturesError::Configuration(
            "manual_selection must name at least one feature".to_string(),
        ));
    }
    let mut seen = HashSet::new();
    names
        .iter()
        .map(|name| {
            let feature: Feature = name.parse()?;
            if !seen.insert(feature) {
                return Err(DateFeaturesError::Configuration(format!(
                    "feature '{feature}' selected more than once"
                )));
            }
            Ok(feature)
        })
        .collect()
}

/// Cadence shared by every group, `None` when any group is ambiguous or
/// groups disagree
fn infer_cadence(data: &TimeIndexedFrame, groups: &[Group]) -> Option<Granularity> {
    let cadence = if data.is_panel() {
        let mut cadences = groups
            .iter()
            .map(|g| data.index().select(&g.rows).infer_granularity());
        let first = cadences.next()??;
        cadences.all(|c| c == Some(first)).then_some(first)
    } else {
        data.index().infer_granularity()
    };
    debug!("Inferred cadence: {:?}", cadence);
    cadence
}

fn ensure_time_index(data: &TimeIndexedFrame) -> Result<()> {
    match data.index() {
        TimeIndex::Timestamp(_) | TimeIndex::Period(_) => Ok(()),
        TimeIndex::Integer(_) => Err(unsupported(data)),
    }
}

fn unsupported(data: &TimeIndexedFrame) -> DateFeaturesError {
    DateFeaturesError::UnsupportedIndex(format!(
        "{} index cannot be converted to timestamps",
        data.index().kind()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn daily_frame(n: usize) -> TimeIndexedFrame {
        let start = NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let index = TimeIndex::date_range(start, Duration::days(1), n).unwrap();
        TimeIndexedFrame::new(index, vec![Column::float("y", vec![1.0; n])]).unwrap()
    }

    #[test]
    fn test_rejects_unknown_scope_even_with_manual_selection() {
        let config = DateFeaturesConfig::manual(["year"]).with_feature_scope("efficient");
        assert!(matches!(
            DateTimeFeatures::new(config),
            Err(DateFeaturesError::Configuration(_))
        ));
    }

    #[test]
    fn test_exposes_config_and_parsed_ts_freq() {
        let config = DateFeaturesConfig::comprehensive().with_ts_freq("2QS-JAN");
        let deriver = DateTimeFeatures::new(config.clone()).unwrap();
        assert_eq!(deriver.config(), &config);
        let freq = deriver.ts_freq().unwrap();
        assert_eq!((freq.multiple, freq.granularity()), (2, Granularity::Quarter));

        let inferred = DateTimeFeatures::new(DateFeaturesConfig::minimal()).unwrap();
        assert_eq!(inferred.ts_freq(), None);
    }

    #[test]
    fn test_rejects_unknown_frequency() {
        let config = DateFeaturesConfig::default().with_ts_freq("fortnightly");
        assert!(matches!(
            DateTimeFeatures::new(config),
            Err(DateFeaturesError::Configuration(_))
        ));
    }

    #[test]
    fn test_rejects_empty_and_duplicate_manual_selection() {
        let empty = DateFeaturesConfig::manual(Vec::<String>::new());
        assert!(DateTimeFeatures::new(empty).is_err());

        let duplicate = DateFeaturesConfig::manual(["year", "year"]);
        let err = DateTimeFeatures::new(duplicate).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_granularity_warnings_only_with_ts_freq() {
        let with_freq = DateTimeFeatures::new(
            DateFeaturesConfig::manual(["year", "second_of_minute"]).with_ts_freq("M"),
        )
        .unwrap();
        assert_eq!(with_freq.granularity_warnings(), &[Feature::SecondOfMinute]);

        let without =
            DateTimeFeatures::new(DateFeaturesConfig::manual(["year", "second_of_minute"]))
                .unwrap();
        assert!(without.granularity_warnings().is_empty());
    }

    #[test]
    fn test_scope_uses_inferred_cadence() {
        let deriver = DateTimeFeatures::new(DateFeaturesConfig::minimal()).unwrap();
        assert_eq!(
            deriver.output_features(&daily_frame(7)),
            vec![Feature::Year, Feature::MonthOfYear, Feature::DayOfWeek]
        );
    }

    #[test]
    fn test_scope_unfiltered_when_cadence_is_ambiguous() {
        let deriver = DateTimeFeatures::new(DateFeaturesConfig::comprehensive()).unwrap();
        assert_eq!(deriver.output_features(&daily_frame(1)), Feature::ALL.to_vec());
    }

    #[test]
    fn test_explicit_ts_freq_wins_over_inference() {
        let deriver =
            DateTimeFeatures::new(DateFeaturesConfig::minimal().with_ts_freq("H")).unwrap();
        assert_eq!(
            deriver.output_features(&daily_frame(7)),
            vec![
                Feature::Year,
                Feature::MonthOfYear,
                Feature::DayOfWeek,
                Feature::HourOfDay
            ]
        );
    }

    #[test]
    fn test_transform_without_fit() {
        let deriver = DateTimeFeatures::new(DateFeaturesConfig::manual(["day_of_month"])).unwrap();
        let out = deriver.transform(&daily_frame(3)).unwrap();
        assert_eq!(out.column_names(), vec!["day_of_month"]);
        assert_eq!(
            out.column("day_of_month").unwrap().data.as_int(),
            Some(&[1, 2, 3][..])
        );
    }

    #[test]
    fn test_kept_column_clashing_with_feature_name() {
        let start = NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let index = TimeIndex::date_range(start, Duration::days(1), 2).unwrap();
        let frame = TimeIndexedFrame::new(index, vec![Column::int("year", vec![1, 2])]).unwrap();

        let deriver = DateTimeFeatures::new(
            DateFeaturesConfig::manual(["year"]).with_keep_original_columns(true),
        )
        .unwrap();
        assert!(matches!(
            deriver.transform(&frame),
            Err(DateFeaturesError::Frame(_))
        ));
    }
}
