//! Time-Indexed Frames
//!
//! Provides the tabular container consumed by calendar feature derivation:
//! a timestamp or period row index, typed value columns, and optional panel
//! group keys.

mod error;
mod frame;
mod granularity;
mod index;

pub use error::FrameError;
pub use frame::{Column, ColumnData, Group, GroupKeys, TimeIndexedFrame};
pub use granularity::Granularity;
pub use index::{Period, TimeIndex};
