//! Row Index Types

use crate::error::FrameError;
use crate::granularity::Granularity;
use chrono::{DateTime, Datelike, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A span of one calendar unit, identified by its start
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    unit: Granularity,
    start: NaiveDateTime,
}

impl Period {
    /// The period of `unit` that contains `at`
    pub fn new(unit: Granularity, at: NaiveDateTime) -> Result<Self, FrameError> {
        let start = unit.floor(at).ok_or_else(|| {
            FrameError::InvalidRange(format!("{unit} containing {at} starts out of range"))
        })?;
        Ok(Self { unit, start })
    }

    /// Period unit
    pub fn unit(&self) -> Granularity {
        self.unit
    }

    /// Start timestamp of the period
    pub fn to_timestamp(&self) -> NaiveDateTime {
        self.start
    }

    /// The following period, `None` past the representable range
    pub fn succ(&self) -> Option<Period> {
        self.unit.advance(self.start, 1).map(|start| Period {
            unit: self.unit,
            start,
        })
    }
}

/// Row index of a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TimeIndex {
    /// Wall-clock timestamps
    Timestamp(Vec<NaiveDateTime>),
    /// Calendar periods
    Period(Vec<Period>),
    /// Plain positional labels with no time meaning
    Integer(Vec<i64>),
}

impl TimeIndex {
    /// Index from timezone-aware UTC timestamps
    pub fn from_utc(timestamps: &[DateTime<Utc>]) -> Self {
        TimeIndex::Timestamp(timestamps.iter().map(|t| t.naive_utc()).collect())
    }

    /// `periods` timestamps starting at `start`, spaced by `step`
    pub fn date_range(
        start: NaiveDateTime,
        step: Duration,
        periods: usize,
    ) -> Result<Self, FrameError> {
        if step <= Duration::zero() {
            return Err(FrameError::InvalidRange(format!(
                "step must be positive, got {step}"
            )));
        }
        let mut timestamps = Vec::with_capacity(periods);
        let mut current = start;
        for i in 0..periods {
            if i > 0 {
                current = current.checked_add_signed(step).ok_or_else(|| {
                    FrameError::InvalidRange(format!("timestamp overflow after {i} periods"))
                })?;
            }
            timestamps.push(current);
        }
        Ok(TimeIndex::Timestamp(timestamps))
    }

    /// `periods` consecutive periods of `unit`, the first containing `start`
    pub fn period_range(
        unit: Granularity,
        start: NaiveDateTime,
        periods: usize,
    ) -> Result<Self, FrameError> {
        let mut out = Vec::with_capacity(periods);
        let mut current = Period::new(unit, start)?;
        for i in 0..periods {
            if i > 0 {
                current = current.succ().ok_or_else(|| {
                    FrameError::InvalidRange(format!("period overflow after {i} periods"))
                })?;
            }
            out.push(current);
        }
        Ok(TimeIndex::Period(out))
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        match self {
            TimeIndex::Timestamp(v) => v.len(),
            TimeIndex::Period(v) => v.len(),
            TimeIndex::Integer(v) => v.len(),
        }
    }

    /// Check if the index has no rows
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short name of the index type
    pub fn kind(&self) -> &'static str {
        match self {
            TimeIndex::Timestamp(_) => "timestamp",
            TimeIndex::Period(_) => "period",
            TimeIndex::Integer(_) => "integer",
        }
    }

    /// Row timestamps, with periods mapped to their start; `None` for
    /// indexes that carry no time
    pub fn to_timestamps(&self) -> Option<Vec<NaiveDateTime>> {
        match self {
            TimeIndex::Timestamp(v) => Some(v.clone()),
            TimeIndex::Period(v) => Some(v.iter().map(Period::to_timestamp).collect()),
            TimeIndex::Integer(_) => None,
        }
    }

    /// Sub-index holding `rows`, in the order given
    pub fn select(&self, rows: &[usize]) -> TimeIndex {
        match self {
            TimeIndex::Timestamp(v) => TimeIndex::Timestamp(rows.iter().map(|&r| v[r]).collect()),
            TimeIndex::Period(v) => TimeIndex::Period(rows.iter().map(|&r| v[r]).collect()),
            TimeIndex::Integer(v) => TimeIndex::Integer(rows.iter().map(|&r| v[r]).collect()),
        }
    }

    /// Sampling cadence of the index, `None` when it cannot be told apart
    ///
    /// Period indexes report their shared unit. Timestamp indexes need at
    /// least two rows and either a whole number of months between every
    /// pair of rows (same day of month or all month ends, same time of day)
    /// or one constant fixed-length step.
    pub fn infer_granularity(&self) -> Option<Granularity> {
        match self {
            TimeIndex::Period(periods) => {
                let unit = periods.first()?.unit();
                periods.iter().all(|p| p.unit() == unit).then_some(unit)
            }
            TimeIndex::Timestamp(timestamps) => {
                if timestamps.len() < 2 {
                    return None;
                }
                calendar_step(timestamps).or_else(|| fixed_step(timestamps))
            }
            TimeIndex::Integer(_) => None,
        }
    }
}

fn calendar_step(timestamps: &[NaiveDateTime]) -> Option<Granularity> {
    let first = timestamps.first()?;
    if timestamps.iter().any(|t| t.time() != first.time()) {
        return None;
    }
    let same_day = timestamps.iter().all(|t| t.day() == first.day());
    // the last representable date is a December 31st
    let month_ends = timestamps
        .iter()
        .all(|t| t.date().succ_opt().map_or(true, |next| next.day() == 1));
    if !same_day && !month_ends {
        return None;
    }

    let month_number = |t: &NaiveDateTime| i64::from(t.year()) * 12 + i64::from(t.month0());
    let step = month_number(&timestamps[1]) - month_number(first);
    if step <= 0
        || timestamps
            .windows(2)
            .any(|w| month_number(&w[1]) - month_number(&w[0]) != step)
    {
        return None;
    }

    Some(if step % 12 == 0 {
        Granularity::Year
    } else if step % 3 == 0 {
        Granularity::Quarter
    } else {
        Granularity::Month
    })
}

fn fixed_step(timestamps: &[NaiveDateTime]) -> Option<Granularity> {
    let step = timestamps[1] - timestamps[0];
    if timestamps.windows(2).any(|w| w[1] - w[0] != step) {
        return None;
    }
    Granularity::from_fixed_step(step)
}
