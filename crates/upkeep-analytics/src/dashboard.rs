//! # Dashboard Stats
//!
//! The four headline numbers. These are not windowed; they describe the
//! collections as they stand.

use chrono::{DateTime, Months, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use upkeep_core::Timestamp;
use upkeep_store::Snapshot;

/// Inspections older than this many months count as compliance issues.
const INSPECTION_INTERVAL_MONTHS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub properties: usize,
    /// Orders pending or in progress.
    pub active_maintenance: usize,
    pub total_warranties: u64,
    pub compliance_issues: usize,
}

/// The instant before which an inspection is overdue: `now` moved back
/// three calendar months, time of day kept.
pub fn inspection_cutoff(now: &DateTime<Utc>) -> DateTime<Utc> {
    now.checked_sub_months(Months::new(INSPECTION_INTERVAL_MONTHS))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// An inspection date stands for midnight UTC of that day.
fn is_overdue(last_inspection: NaiveDate, cutoff: &DateTime<Utc>) -> bool {
    last_inspection.and_time(NaiveTime::MIN).and_utc() < *cutoff
}

pub fn dashboard(snapshot: &Snapshot, now: Timestamp) -> DashboardStats {
    let cutoff = inspection_cutoff(now.as_datetime());
    DashboardStats {
        properties: snapshot.properties.len(),
        active_maintenance: snapshot
            .work_orders
            .iter()
            .filter(|wo| wo.status.is_open())
            .count(),
        total_warranties: snapshot
            .properties
            .iter()
            .map(|p| u64::from(p.warranties))
            .sum(),
        compliance_issues: snapshot
            .properties
            .iter()
            .filter(|p| is_overdue(p.last_inspection, &cutoff))
            .count(),
    }
}
