//! Sampling Frequency Aliases

use crate::error::DateFeaturesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time_frame::Granularity;

/// Alias table: (alias, unit)
const ALIASES: &[(&str, Granularity)] = &[
    ("Y", Granularity::Year),
    ("A", Granularity::Year),
    ("YS", Granularity::Year),
    ("AS", Granularity::Year),
    ("YE", Granularity::Year),
    ("BA", Granularity::Year),
    ("BY", Granularity::Year),
    ("BAS", Granularity::Year),
    ("BYS", Granularity::Year),
    ("y", Granularity::Year),
    ("Q", Granularity::Quarter),
    ("QS", Granularity::Quarter),
    ("QE", Granularity::Quarter),
    ("BQ", Granularity::Quarter),
    ("BQS", Granularity::Quarter),
    ("q", Granularity::Quarter),
    ("M", Granularity::Month),
    ("MS", Granularity::Month),
    ("ME", Granularity::Month),
    ("BM", Granularity::Month),
    ("BMS", Granularity::Month),
    ("SM", Granularity::Month),
    ("SMS", Granularity::Month),
    ("W", Granularity::Week),
    ("w", Granularity::Week),
    ("D", Granularity::Day),
    ("B", Granularity::Day),
    ("C", Granularity::Day),
    ("d", Granularity::Day),
    ("H", Granularity::Hour),
    ("BH", Granularity::Hour),
    ("h", Granularity::Hour),
    ("T", Granularity::Minute),
    ("min", Granularity::Minute),
    ("S", Granularity::Second),
    ("s", Granularity::Second),
    ("L", Granularity::Millisecond),
    ("ms", Granularity::Millisecond),
];

/// Nominal spacing between rows, e.g. `"W"`, `"15T"`, `"A-DEC"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frequency {
    pub multiple: u32,
    pub unit: Granularity,
}

impl Frequency {
    pub fn new(unit: Granularity) -> Self {
        Self { multiple: 1, unit }
    }

    /// Calendar unit used for granularity filtering
    pub fn granularity(&self) -> Granularity {
        self.unit
    }
}

impl From<Granularity> for Frequency {
    fn from(unit: Granularity) -> Self {
        Self::new(unit)
    }
}

impl FromStr for Frequency {
    type Err = DateFeaturesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DateFeaturesError::Configuration(format!("unknown frequency alias '{s}'"));

        let trimmed = s.trim();
        // anchors such as "W-SUN" or "A-DEC" do not change the unit
        let base = trimmed.split('-').next().unwrap_or(trimmed);
        let digits = base.chars().take_while(char::is_ascii_digit).count();
        let (count, alias) = base.split_at(digits);

        let multiple = if count.is_empty() {
            1
        } else {
            count.parse::<u32>().map_err(|_| invalid())?
        };
        if multiple == 0 {
            return Err(invalid());
        }

        ALIASES
            .iter()
            .find(|(name, _)| *name == alias)
            .map(|&(_, unit)| Frequency { multiple, unit })
            .ok_or_else(invalid)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.multiple == 1 {
            write!(f, "{}", self.unit)
        } else {
            write!(f, "{} x {}", self.multiple, self.unit)
        }
    }
}
