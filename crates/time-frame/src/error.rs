//! Frame Error Types

use thiserror::Error;

/// Errors while assembling or slicing a frame
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrameError {
    /// A column or key set does not match the index length
    #[error("{name} has {got} rows, expected {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    /// Two columns share the same name
    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    /// Panel frame declared without any key column
    #[error("Panel frames need at least one group key column")]
    EmptyGroupKeys,

    /// Range builder could not produce the requested index
    #[error("Invalid range: {0}")]
    InvalidRange(String),
}
