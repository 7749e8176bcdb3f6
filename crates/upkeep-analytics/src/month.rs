//! # Month Keys
//!
//! Trend and spending series bucket work orders by calendar month of
//! `createdAt`, computed in UTC. A [`MonthKey`] displays as `"Mon YY"`
//! (`"Nov 23"`) but orders by `(year, month)`, so `Nov 23` sorts before
//! `Feb 24` regardless of insertion or lexical order.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};
use upkeep_core::Timestamp;

use crate::error::AnalyticsError;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    year: i32,
    /// 1-based.
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn of(at: &Timestamp) -> Self {
        Self::of_date(at.date())
    }

    pub fn of_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = MONTH_ABBREVIATIONS[(self.month as usize).saturating_sub(1) % 12];
        write!(f, "{name} {:02}", self.year.rem_euclid(100))
    }
}

/// Parses `"Mon YY"`, reading the year as `20YY`.
impl FromStr for MonthKey {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AnalyticsError::InvalidMonthKey(s.to_string());
        let (name, yy) = s.trim().split_once(' ').ok_or_else(invalid)?;
        let month = MONTH_ABBREVIATIONS
            .iter()
            .position(|m| m.eq_ignore_ascii_case(name))
            .ok_or_else(invalid)?;
        if yy.len() != 2 {
            return Err(invalid());
        }
        let yy: i32 = yy.parse().map_err(|_| invalid())?;
        Self::new(2000 + yy, month as u32 + 1).ok_or_else(invalid)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
