//! Deriver configuration

use crate::error::{DateFeaturesError, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix, e.g. `DATE_FEATURES_TS_FREQ=W`
pub const ENV_PREFIX: &str = "DATE_FEATURES";

/// Calendar feature configuration
///
/// Names are kept as strings so that configuration loaded from files or the
/// environment is checked in one place, when the deriver is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateFeaturesConfig {
    /// Sampling frequency alias ("Y", "Q", "M", "W", "D", "H", "T", "S", "L", ...)
    pub ts_freq: Option<String>,

    /// "minimal" or "comprehensive"; ignored when `manual_selection` is set
    pub feature_scope: String,

    /// Explicit feature names, output in this order
    pub manual_selection: Option<Vec<String>>,

    /// Keep the input value columns ahead of the derived ones
    pub keep_original_columns: bool,
}

impl Default for DateFeaturesConfig {
    fn default() -> Self {
        Self {
            ts_freq: None,
            feature_scope: "minimal".to_string(),
            manual_selection: None,
            keep_original_columns: false,
        }
    }
}

impl DateFeaturesConfig {
    /// Minimal scope, no frequency filter
    pub fn minimal() -> Self {
        Self::default()
    }

    /// Comprehensive scope, no frequency filter
    pub fn comprehensive() -> Self {
        Self {
            feature_scope: "comprehensive".to_string(),
            ..Default::default()
        }
    }

    /// Explicit feature list
    pub fn manual<I, S>(features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::default().with_manual_selection(features)
    }

    pub fn with_ts_freq(mut self, freq: impl Into<String>) -> Self {
        self.ts_freq = Some(freq.into());
        self
    }

    pub fn with_feature_scope(mut self, scope: impl Into<String>) -> Self {
        self.feature_scope = scope.into();
        self
    }

    pub fn with_manual_selection<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.manual_selection = Some(features.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_keep_original_columns(mut self, keep: bool) -> Self {
        self.keep_original_columns = keep;
        self
    }

    /// Load from a TOML document, overridden by `DATE_FEATURES_*` variables
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Self::load(File::from_str(toml, FileFormat::Toml))
    }

    /// Load from a file (format by extension), overridden by `DATE_FEATURES_*` variables
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::load(File::from(path.as_ref()))
    }

    fn load<S>(source: S) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        Config::builder()
            .add_source(source)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("manual_selection"),
            )
            .build()
            .and_then(Config::try_deserialize)
            .map_err(|e| DateFeaturesError::Configuration(e.to_string()))
    }
}
