//! Calendar Feature Vocabulary

use crate::error::DateFeaturesError;
use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time_frame::Granularity;

/// A derivable calendar attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Year,
    QuarterOfYear,
    MonthOfYear,
    WeekOfYear,
    DayOfYear,
    MonthOfQuarter,
    WeekOfQuarter,
    DayOfQuarter,
    WeekOfMonth,
    DayOfMonth,
    DayOfWeek,
    HourOfDay,
    HourOfWeek,
    MinuteOfHour,
    SecondOfMinute,
    MillisecondOfSecond,
    IsWeekend,
}

impl Feature {
    /// Every feature, in canonical output order
    pub const ALL: [Feature; 17] = [
        Feature::Year,
        Feature::QuarterOfYear,
        Feature::MonthOfYear,
        Feature::WeekOfYear,
        Feature::DayOfYear,
        Feature::MonthOfQuarter,
        Feature::WeekOfQuarter,
        Feature::DayOfQuarter,
        Feature::WeekOfMonth,
        Feature::DayOfMonth,
        Feature::DayOfWeek,
        Feature::HourOfDay,
        Feature::HourOfWeek,
        Feature::MinuteOfHour,
        Feature::SecondOfMinute,
        Feature::MillisecondOfSecond,
        Feature::IsWeekend,
    ];

    /// Output column name
    pub fn name(self) -> &'static str {
        match self {
            Feature::Year => "year",
            Feature::QuarterOfYear => "quarter_of_year",
            Feature::MonthOfYear => "month_of_year",
            Feature::WeekOfYear => "week_of_year",
            Feature::DayOfYear => "day_of_year",
            Feature::MonthOfQuarter => "month_of_quarter",
            Feature::WeekOfQuarter => "week_of_quarter",
            Feature::DayOfQuarter => "day_of_quarter",
            Feature::WeekOfMonth => "week_of_month",
            Feature::DayOfMonth => "day_of_month",
            Feature::DayOfWeek => "day_of_week",
            Feature::HourOfDay => "hour_of_day",
            Feature::HourOfWeek => "hour_of_week",
            Feature::MinuteOfHour => "minute_of_hour",
            Feature::SecondOfMinute => "second_of_minute",
            Feature::MillisecondOfSecond => "millisecond_of_second",
            Feature::IsWeekend => "is_weekend",
        }
    }

    /// Finest calendar unit the feature resolves
    pub fn granularity(self) -> Granularity {
        match self {
            Feature::Year => Granularity::Year,
            Feature::QuarterOfYear => Granularity::Quarter,
            Feature::MonthOfYear | Feature::MonthOfQuarter => Granularity::Month,
            Feature::WeekOfYear | Feature::WeekOfQuarter | Feature::WeekOfMonth => {
                Granularity::Week
            }
            Feature::DayOfYear
            | Feature::DayOfQuarter
            | Feature::DayOfMonth
            | Feature::DayOfWeek
            | Feature::IsWeekend => Granularity::Day,
            Feature::HourOfDay | Feature::HourOfWeek => Granularity::Hour,
            Feature::MinuteOfHour => Granularity::Minute,
            Feature::SecondOfMinute => Granularity::Second,
            Feature::MillisecondOfSecond => Granularity::Millisecond,
        }
    }

    /// Value of the feature at `at`
    pub fn compute(self, at: &NaiveDateTime) -> i64 {
        let value = match self {
            Feature::Year => return i64::from(at.year()),
            Feature::QuarterOfYear => at.month0() / 3 + 1,
            Feature::MonthOfYear => at.month(),
            Feature::WeekOfYear => at.iso_week().week(),
            Feature::DayOfYear => at.ordinal(),
            Feature::MonthOfQuarter => at.month0() % 3 + 1,
            Feature::WeekOfQuarter => (day_of_quarter(at) - 1) / 7 + 1,
            Feature::DayOfQuarter => day_of_quarter(at),
            Feature::WeekOfMonth => at.day0() / 7 + 1,
            Feature::DayOfMonth => at.day(),
            Feature::DayOfWeek => at.weekday().number_from_monday(),
            Feature::HourOfDay => at.hour(),
            Feature::HourOfWeek => at.weekday().num_days_from_monday() * 24 + at.hour(),
            Feature::MinuteOfHour => at.minute(),
            // leap seconds are folded into the last regular second
            Feature::SecondOfMinute => at.second(),
            Feature::MillisecondOfSecond => (at.nanosecond() / 1_000_000).min(999),
            Feature::IsWeekend => u32::from(at.weekday().number_from_monday() >= 6),
        };
        i64::from(value)
    }
}

/// 1-based day within the quarter
fn day_of_quarter(at: &NaiveDateTime) -> u32 {
    // quarter starts are always representable
    Granularity::Quarter
        .floor(*at)
        .map_or(at.ordinal(), |start| at.ordinal() - start.ordinal0())
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = DateFeaturesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| {
                DateFeaturesError::Configuration(format!(
                    "unknown feature '{s}', expected one of: {}",
                    Feature::ALL.map(Feature::name).join(", ")
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32, ms: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_milli_opt(h, mi, s, ms)
            .unwrap()
    }

    #[test]
    fn test_names_round_trip() {
        for feature in Feature::ALL {
            assert_eq!(feature.name().parse::<Feature>().unwrap(), feature);
        }
    }

    #[test]
    fn test_unknown_name() {
        let err = "fortnight_of_year".parse::<Feature>().unwrap_err();
        assert!(matches!(err, DateFeaturesError::Configuration(_)));
        assert!(err.to_string().contains("fortnight_of_year"));
    }

    #[test]
    fn test_all_features_at_one_instant() {
        // Thursday 2023-08-17 13:45:12.345
        let t = at(2023, 8, 17, 13, 45, 12, 345);
        let expected = [
            (Feature::Year, 2023),
            (Feature::QuarterOfYear, 3),
            (Feature::MonthOfYear, 8),
            (Feature::WeekOfYear, 33),
            (Feature::DayOfYear, 229),
            (Feature::MonthOfQuarter, 2),
            (Feature::WeekOfQuarter, 7),
            (Feature::DayOfQuarter, 48),
            (Feature::WeekOfMonth, 3),
            (Feature::DayOfMonth, 17),
            (Feature::DayOfWeek, 4),
            (Feature::HourOfDay, 13),
            (Feature::HourOfWeek, 85),
            (Feature::MinuteOfHour, 45),
            (Feature::SecondOfMinute, 12),
            (Feature::MillisecondOfSecond, 345),
            (Feature::IsWeekend, 0),
        ];
        for (feature, value) in expected {
            assert_eq!(feature.compute(&t), value, "{feature}");
        }
    }

    #[test]
    fn test_weekend_and_weekday_numbering() {
        // 2000-01-01 is a Saturday
        let sat = at(2000, 1, 1, 0, 0, 0, 0);
        let sun = at(2000, 1, 2, 0, 0, 0, 0);
        let mon = at(2000, 1, 3, 0, 0, 0, 0);
        assert_eq!(Feature::DayOfWeek.compute(&sat), 6);
        assert_eq!(Feature::DayOfWeek.compute(&sun), 7);
        assert_eq!(Feature::DayOfWeek.compute(&mon), 1);
        assert_eq!(Feature::IsWeekend.compute(&sat), 1);
        assert_eq!(Feature::IsWeekend.compute(&sun), 1);
        assert_eq!(Feature::IsWeekend.compute(&mon), 0);
    }

    #[test]
    fn test_hour_of_week_on_sunday() {
        let t = at(2023, 1, 1, 5, 0, 0, 0);
        assert_eq!(Feature::HourOfWeek.compute(&t), 149);
    }

    #[test]
    fn test_iso_week_at_year_boundary() {
        // 2021-01-01 belongs to ISO week 53 of 2020
        assert_eq!(Feature::WeekOfYear.compute(&at(2021, 1, 1, 0, 0, 0, 0)), 53);
        assert_eq!(Feature::WeekOfYear.compute(&at(2021, 1, 4, 0, 0, 0, 0)), 1);
    }

    #[test]
    fn test_quarter_positions() {
        let end_of_q1_leap = at(2024, 3, 31, 0, 0, 0, 0);
        assert_eq!(Feature::DayOfQuarter.compute(&end_of_q1_leap), 91);
        assert_eq!(Feature::WeekOfQuarter.compute(&end_of_q1_leap), 13);
        assert_eq!(Feature::MonthOfQuarter.compute(&end_of_q1_leap), 3);

        let start_of_q4 = at(2023, 10, 1, 0, 0, 0, 0);
        assert_eq!(Feature::DayOfQuarter.compute(&start_of_q4), 1);
        assert_eq!(Feature::WeekOfQuarter.compute(&start_of_q4), 1);
        assert_eq!(Feature::QuarterOfYear.compute(&start_of_q4), 4);
    }

    #[test]
    fn test_day_of_quarter_ignores_leap_day_outside_quarter() {
        // Q2 starts on ordinal 92 in 2024 and 91 in 2023 and 1900
        assert_eq!(Feature::DayOfQuarter.compute(&at(2024, 4, 1, 0, 0, 0, 0)), 1);
        assert_eq!(Feature::DayOfQuarter.compute(&at(2023, 6, 30, 0, 0, 0, 0)), 91);
        assert_eq!(Feature::DayOfQuarter.compute(&at(1900, 3, 31, 0, 0, 0, 0)), 90);
        assert_eq!(Feature::DayOfQuarter.compute(&at(2000, 3, 31, 0, 0, 0, 0)), 91);
    }

    #[test]
    fn test_week_of_month() {
        assert_eq!(Feature::WeekOfMonth.compute(&at(2023, 5, 7, 0, 0, 0, 0)), 1);
        assert_eq!(Feature::WeekOfMonth.compute(&at(2023, 5, 8, 0, 0, 0, 0)), 2);
        assert_eq!(Feature::WeekOfMonth.compute(&at(2023, 5, 31, 0, 0, 0, 0)), 5);
    }
}
