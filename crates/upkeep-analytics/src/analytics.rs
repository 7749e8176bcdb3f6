//! # Analytics View
//!
//! The analytics screen: maintenance trend, contractor leaderboard, and
//! four key metrics. The trend and the key metrics cover in-window work
//! orders only. The leaderboard counts every work order on record.
//!
//! Key metrics are rounded for display: response hours and completion
//! rate to one decimal, money to cents.

use serde::Serialize;
use upkeep_core::{Personnel, WorkOrder};
use upkeep_store::Snapshot;

use crate::metrics::{self, MonthlyCount};
use crate::window::TimeWindow;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractorPerformance {
    pub name: String,
    pub rating: f64,
    /// Completed orders attributed to this contractor, regardless of window.
    pub jobs: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyMetrics {
    pub average_response_hours: f64,
    pub completion_rate: f64,
    /// Mean actual cost of completed orders that recorded one.
    pub average_cost: f64,
    pub total_spending: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsView {
    pub window: TimeWindow,
    pub maintenance_trends: Vec<MonthlyCount>,
    pub contractor_performance: Vec<ContractorPerformance>,
    pub key_metrics: KeyMetrics,
}

/// Work orders created inside `window`, in stored order.
pub fn in_window<'a>(orders: &'a [WorkOrder], window: &TimeWindow) -> Vec<&'a WorkOrder> {
    orders
        .iter()
        .filter(|wo| window.contains(&wo.created_at))
        .collect()
}

/// Contractors ranked by completed jobs, most first. Ties keep personnel
/// order.
pub fn contractor_performance(
    personnel: &[Personnel],
    orders: &[&WorkOrder],
) -> Vec<ContractorPerformance> {
    let mut ranked: Vec<ContractorPerformance> = personnel
        .iter()
        .filter(|p| p.is_contractor())
        .map(|p| ContractorPerformance {
            name: p.full_name(),
            rating: p.rating,
            jobs: orders
                .iter()
                .filter(|wo| wo.is_completed() && wo.is_assigned_to(p))
                .count(),
        })
        .collect();
    ranked.sort_by(|a, b| b.jobs.cmp(&a.jobs));
    ranked
}

pub fn analytics(snapshot: &Snapshot, window: &TimeWindow) -> AnalyticsView {
    let orders = in_window(&snapshot.work_orders, window);
    let every: Vec<&WorkOrder> = snapshot.work_orders.iter().collect();
    tracing::debug!(range = %window.range, orders = orders.len(), "analytics computed");
    AnalyticsView {
        window: *window,
        maintenance_trends: metrics::monthly_counts(orders.iter().copied()),
        contractor_performance: contractor_performance(&snapshot.personnel, &every),
        key_metrics: KeyMetrics {
            average_response_hours: metrics::round1(metrics::average_response_hours(
                orders.iter().copied(),
            )),
            completion_rate: metrics::completion_rate(orders.iter().copied()),
            average_cost: metrics::round2(metrics::average_completed_cost(orders.iter().copied())),
            total_spending: metrics::round2(metrics::total_spending(orders.iter().copied())),
        },
    }
}
