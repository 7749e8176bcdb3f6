//! # Metrics
//!
//! Scalar KPIs and month-bucketed series over a set of work orders. Every
//! function is total: an empty input yields zero or an empty series, never
//! `NaN`.

use std::collections::BTreeMap;

use serde::Serialize;
use upkeep_core::WorkOrder;

use crate::month::MonthKey;

/// One bar of the maintenance trend chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyCount {
    pub month: MonthKey,
    pub count: usize,
}

/// One row of the monthly spending series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyAmount {
    pub month: MonthKey,
    pub amount: f64,
}

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to whole cents.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Sum starting from positive zero. `Iterator::sum` on an empty `f64`
/// iterator yields `-0.0`, which renders as `-0`.
pub fn total(values: impl IntoIterator<Item = f64>) -> f64 {
    values.into_iter().fold(0.0, |acc, v| acc + v)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        total(values.iter().copied()) / values.len() as f64
    }
}

/// Percentage of orders that are completed, one decimal; 0 when empty.
pub fn completion_rate<'a>(orders: impl IntoIterator<Item = &'a WorkOrder>) -> f64 {
    let (total, completed) = orders.into_iter().fold((0usize, 0usize), |(t, c), wo| {
        (t + 1, c + usize::from(wo.is_completed()))
    });
    if total == 0 {
        return 0.0;
    }
    round1(completed as f64 / total as f64 * 100.0)
}

/// Mean hours from creation to the start-of-work note over completed
/// orders. An order without such a note counts as zero hours.
pub fn average_response_hours<'a>(orders: impl IntoIterator<Item = &'a WorkOrder>) -> f64 {
    let hours: Vec<f64> = orders
        .into_iter()
        .filter(|wo| wo.is_completed())
        .map(WorkOrder::response_hours)
        .collect();
    mean(&hours)
}

/// Mean actual cost over completed orders with a non-zero actual cost.
pub fn average_completed_cost<'a>(orders: impl IntoIterator<Item = &'a WorkOrder>) -> f64 {
    let costs: Vec<f64> = orders
        .into_iter()
        .filter(|wo| wo.is_completed() && wo.actual() != 0.0)
        .map(WorkOrder::actual)
        .collect();
    mean(&costs)
}

/// Sum of actual cost over completed orders.
pub fn total_spending<'a>(orders: impl IntoIterator<Item = &'a WorkOrder>) -> f64 {
    total(
        orders
            .into_iter()
            .filter(|wo| wo.is_completed())
            .map(WorkOrder::actual),
    )
}

/// Order count per creation month, oldest month first.
pub fn monthly_counts<'a>(orders: impl IntoIterator<Item = &'a WorkOrder>) -> Vec<MonthlyCount> {
    let mut buckets: BTreeMap<MonthKey, usize> = BTreeMap::new();
    for wo in orders {
        *buckets.entry(MonthKey::of(&wo.created_at)).or_default() += 1;
    }
    buckets
        .into_iter()
        .map(|(month, count)| MonthlyCount { month, count })
        .collect()
}

/// Actual cost summed per creation month, oldest month first.
pub fn monthly_amounts<'a>(orders: impl IntoIterator<Item = &'a WorkOrder>) -> Vec<MonthlyAmount> {
    let mut buckets: BTreeMap<MonthKey, f64> = BTreeMap::new();
    for wo in orders {
        *buckets.entry(MonthKey::of(&wo.created_at)).or_default() += wo.actual();
    }
    buckets
        .into_iter()
        .map(|(month, amount)| MonthlyAmount { month, amount })
        .collect()
}
