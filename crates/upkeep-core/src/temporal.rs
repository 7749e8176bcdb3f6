//! # Instants
//!
//! [`Timestamp`] is the instant type behind `createdAt` on work orders and
//! notes and `uploadedAt` on attachments. It is always UTC, whole seconds,
//! and renders as `YYYY-MM-DDTHH:MM:SSZ`.
//!
//! Calendar-only fields (hire date, last inspection, maintenance record
//! dates) are plain `chrono::NaiveDate` and serialize as `YYYY-MM-DD`.
//!
//! Collections written by older clients carry millisecond precision
//! (`2024-03-01T09:30:00.000Z`) and occasionally a non-UTC offset. Both are
//! accepted and folded into the canonical form on read.

use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::error::UpkeepError;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// A UTC instant with the sub-second part dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "DateTime<Utc>")]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Wall-clock now. Production code asks a [`Clock`](crate::Clock) instead.
    pub fn now() -> Self {
        Self::from_utc(Utc::now())
    }

    pub fn from_utc(at: DateTime<Utc>) -> Self {
        Self(at.trunc_subsecs(0))
    }

    /// Read an RFC 3339 instant in any offset.
    ///
    /// # Errors
    ///
    /// A validation error naming the rejected text.
    pub fn parse(text: &str) -> Result<Self, UpkeepError> {
        DateTime::parse_from_rfc3339(text)
            .map(|at| Self::from_utc(at.with_timezone(&Utc)))
            .map_err(|e| UpkeepError::validation(format!("Invalid timestamp {text:?}: {e}")))
    }

    /// `None` outside chrono's representable range.
    pub fn from_epoch_secs(secs: i64) -> Option<Self> {
        DateTime::from_timestamp(secs, 0).map(Self)
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    pub fn epoch_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// The UTC calendar day.
    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// Hours from `earlier` to `self`; negative when `earlier` is later.
    pub fn hours_since(&self, earlier: &Timestamp) -> f64 {
        (self.0 - earlier.0).num_milliseconds() as f64 / MILLIS_PER_HOUR
    }

    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(at: DateTime<Utc>) -> Self {
        Self::from_utc(at)
    }
}
