//! Calendar Granularity

use chrono::{Datelike, Days, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Calendar unit, ordered from coarsest to finest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Year,
    Quarter,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
}

impl Granularity {
    /// All units, coarse to fine
    pub const ALL: [Granularity; 9] = [
        Granularity::Year,
        Granularity::Quarter,
        Granularity::Month,
        Granularity::Week,
        Granularity::Day,
        Granularity::Hour,
        Granularity::Minute,
        Granularity::Second,
        Granularity::Millisecond,
    ];

    /// Lowercase unit name
    pub fn name(self) -> &'static str {
        match self {
            Granularity::Year => "year",
            Granularity::Quarter => "quarter",
            Granularity::Month => "month",
            Granularity::Week => "week",
            Granularity::Day => "day",
            Granularity::Hour => "hour",
            Granularity::Minute => "minute",
            Granularity::Second => "second",
            Granularity::Millisecond => "millisecond",
        }
    }

    /// Whether `self` resolves time more finely than `other`
    pub fn is_finer_than(self, other: Granularity) -> bool {
        self > other
    }

    /// Length in milliseconds for units that have a fixed length
    pub fn fixed_millis(self) -> Option<i64> {
        match self {
            Granularity::Week => Some(7 * 86_400_000),
            Granularity::Day => Some(86_400_000),
            Granularity::Hour => Some(3_600_000),
            Granularity::Minute => Some(60_000),
            Granularity::Second => Some(1_000),
            Granularity::Millisecond => Some(1),
            Granularity::Year | Granularity::Quarter | Granularity::Month => None,
        }
    }

    /// Coarsest fixed-length unit that divides `step` exactly
    pub fn from_fixed_step(step: Duration) -> Option<Granularity> {
        let millis = step.num_milliseconds();
        if millis <= 0 || Duration::milliseconds(millis) != step {
            return None;
        }
        Granularity::ALL.into_iter().find(|unit| {
            unit.fixed_millis()
                .map(|len| millis % len == 0)
                .unwrap_or(false)
        })
    }

    /// Start of the unit containing `at`, `None` when that start lies
    /// before the first representable date
    pub fn floor(self, at: NaiveDateTime) -> Option<NaiveDateTime> {
        let date = at.date();
        match self {
            Granularity::Year => date.with_ordinal(1).map(midnight),
            Granularity::Quarter => {
                NaiveDate::from_ymd_opt(date.year(), date.month0() / 3 * 3 + 1, 1).map(midnight)
            }
            Granularity::Month => date.with_day(1).map(midnight),
            Granularity::Week => date
                .checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))
                .map(midnight),
            Granularity::Day => Some(midnight(date)),
            Granularity::Hour => date.and_hms_opt(at.hour(), 0, 0),
            Granularity::Minute => date.and_hms_opt(at.hour(), at.minute(), 0),
            Granularity::Second => at.with_nanosecond(0),
            Granularity::Millisecond => at.with_nanosecond(at.nanosecond() / 1_000_000 * 1_000_000),
        }
    }

    /// Move `at` forward by `count` units, `None` on overflow
    pub fn advance(self, at: NaiveDateTime, count: u32) -> Option<NaiveDateTime> {
        match self {
            Granularity::Year => at.checked_add_months(Months::new(count.checked_mul(12)?)),
            Granularity::Quarter => at.checked_add_months(Months::new(count.checked_mul(3)?)),
            Granularity::Month => at.checked_add_months(Months::new(count)),
            fixed => {
                let len = fixed.fixed_millis()?;
                at.checked_add_signed(Duration::milliseconds(len.checked_mul(i64::from(count))?))
            }
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}
