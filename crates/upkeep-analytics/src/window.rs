//! # Time Windows
//!
//! Resolves a symbolic range token against an explicit "now".
//!
//! | token | start                         |
//! |-------|-------------------------------|
//! | `7d`  | now − 7 days                  |
//! | `30d` | now − 30 days                 |
//! | `90d` | now − 90 days                 |
//! | `6m`  | now − 6 calendar months       |
//! | `1y`  | now − 12 calendar months      |
//! | `all` | 2000-01-01T00:00:00Z          |
//!
//! Calendar months clamp to the end of a shorter month (Aug 31 − 6 months
//! is Feb 28 or 29). A record is in-window when its timestamp is at or
//! after the start; there is no upper bound.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, Months};
use serde::{Deserialize, Serialize};
use upkeep_core::Timestamp;

use crate::error::AnalyticsError;

/// Unix seconds of 2000-01-01T00:00:00Z.
const ALL_TIME_START_SECS: i64 = 946_684_800;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateRange {
    #[serde(rename = "7d")]
    Days7,
    #[serde(rename = "30d")]
    #[default]
    Days30,
    #[serde(rename = "90d")]
    Days90,
    #[serde(rename = "6m")]
    Months6,
    #[serde(rename = "1y")]
    Year1,
    #[serde(rename = "all")]
    All,
}

impl DateRange {
    pub const ALL: [DateRange; 6] = [
        Self::Days7,
        Self::Days30,
        Self::Days90,
        Self::Months6,
        Self::Year1,
        Self::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Days7 => "7d",
            Self::Days30 => "30d",
            Self::Days90 => "90d",
            Self::Months6 => "6m",
            Self::Year1 => "1y",
            Self::All => "all",
        }
    }

    /// The earliest included instant for a window ending at `now`.
    pub fn start(&self, now: Timestamp) -> Timestamp {
        let all = all_time_start();
        let now = *now.as_datetime();
        let start = match self {
            Self::Days7 => Some(now - Duration::days(7)),
            Self::Days30 => Some(now - Duration::days(30)),
            Self::Days90 => Some(now - Duration::days(90)),
            Self::Months6 => now.checked_sub_months(Months::new(6)),
            Self::Year1 => now.checked_sub_months(Months::new(12)),
            Self::All => return all,
        };
        start.map_or(all, Timestamp::from_utc)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateRange {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| AnalyticsError::UnknownRange(s.to_string()))
    }
}

fn all_time_start() -> Timestamp {
    Timestamp::from_epoch_secs(ALL_TIME_START_SECS).unwrap_or_else(Timestamp::now)
}

/// A resolved range: the token plus the concrete bounds it produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    pub range: DateRange,
    pub start: Timestamp,
    pub now: Timestamp,
}

impl TimeWindow {
    pub fn resolve(range: DateRange, now: Timestamp) -> Self {
        Self {
            range,
            start: range.start(now),
            now,
        }
    }

    pub fn contains(&self, at: &Timestamp) -> bool {
        *at >= self.start
    }
}
