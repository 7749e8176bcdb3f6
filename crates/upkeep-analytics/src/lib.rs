//! # upkeep-analytics — Aggregation Engine
//!
//! Read-only, time-windowed views derived from a [`Snapshot`] of the
//! three collections. Nothing here writes back to a store.
//!
//! ## Views
//!
//! - [`analytics()`]: maintenance trend, contractor leaderboard, key metrics.
//! - [`dashboard()`]: property count, open orders, warranties, overdue
//!   inspections.
//! - [`build_reports()`]: the maintenance, property, personnel and
//!   financial report views.
//! - [`export()`]: one report view as a CSV [`ExportDocument`].
//!
//! ## Purity
//!
//! Every view takes "now" explicitly, through a resolved [`TimeWindow`] or a
//! [`Timestamp`](upkeep_core::Timestamp). Given the same snapshot and the
//! same instant, a view is always the same.
//!
//! ## Attribution
//!
//! A work order belongs to a person when its `assigneeId` is theirs or,
//! lacking one, when `assignedTo` equals their full name. Two people who
//! share a name therefore both receive such orders.
//!
//! [`Snapshot`]: upkeep_store::Snapshot

pub mod analytics;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod metrics;
pub mod month;
pub mod reports;
pub mod window;

#[cfg(test)]
mod testing;

pub use analytics::{analytics, AnalyticsView, ContractorPerformance, KeyMetrics};
pub use dashboard::{dashboard, DashboardStats};
pub use error::AnalyticsError;
pub use export::{export, export_filename, ExportDocument};
pub use metrics::{MonthlyAmount, MonthlyCount};
pub use month::MonthKey;
pub use reports::{
    build_reports, CategoryBreakdown, FinancialReport, PersonnelReport, PropertyReport,
    ReportData, ReportKind,
};
pub use window::{DateRange, TimeWindow};
