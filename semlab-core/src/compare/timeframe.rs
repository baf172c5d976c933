//! Trailing comparison windows, measured back from the newest data point.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// A trailing window for the comparison chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Timeframe {
    M1,
    #[default]
    M3,
    Y1,
    Y2,
    Y3,
    Ytd,
}

impl Timeframe {
    /// All windows, in the order the dashboard offers them.
    pub const ALL: [Timeframe; 6] = [
        Timeframe::M1,
        Timeframe::M3,
        Timeframe::Y1,
        Timeframe::Y2,
        Timeframe::Y3,
        Timeframe::Ytd,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Timeframe::M1 => "1M",
            Timeframe::M3 => "3M",
            Timeframe::Y1 => "1Y",
            Timeframe::Y2 => "2Y",
            Timeframe::Y3 => "3Y",
            Timeframe::Ytd => "YTD",
        }
    }

    /// Window start for a series whose newest point is `latest` (inclusive).
    ///
    /// YTD starts on January 1 of `latest`'s year. The month windows use
    /// calendar subtraction with day-of-month clamping: subtracting from a
    /// month-end date lands on the last valid day of the target month.
    pub fn start_from(self, latest: NaiveDate) -> NaiveDate {
        match self {
            Timeframe::Ytd => NaiveDate::from_ymd_opt(latest.year(), 1, 1).unwrap(),
            _ => latest
                .checked_sub_months(Months::new(self.months_back()))
                .unwrap_or(latest),
        }
    }

    fn months_back(self) -> u32 {
        match self {
            Timeframe::M1 => 1,
            Timeframe::M3 => 3,
            Timeframe::Y1 => 12,
            Timeframe::Y2 => 24,
            Timeframe::Y3 => 36,
            Timeframe::Ytd => 0,
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "1M" => Ok(Timeframe::M1),
            "3M" => Ok(Timeframe::M3),
            "1Y" => Ok(Timeframe::Y1),
            "2Y" => Ok(Timeframe::Y2),
            "3Y" => Ok(Timeframe::Y3),
            "YTD" => Ok(Timeframe::Ytd),
            other => Err(format!(
                "unknown timeframe '{other}' (expected 1M, 3M, 1Y, 2Y, 3Y, or YTD)"
            )),
        }
    }
}
