//! Feature Derivation Error Types

use thiserror::Error;
use time_frame::FrameError;

/// Result alias for calendar feature operations
pub type Result<T> = std::result::Result<T, DateFeaturesError>;

/// Errors raised by calendar feature derivation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DateFeaturesError {
    /// Invalid scope, feature name or frequency alias
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Row index carries no timestamps
    #[error("Unsupported index: {0}")]
    UnsupportedIndex(String),

    /// Output frame could not be assembled
    #[error(transparent)]
    Frame(#[from] FrameError),
}
