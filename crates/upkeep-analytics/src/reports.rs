//! # Report Views
//!
//! The four report kinds derived from one snapshot and one window:
//!
//! - **maintenance**: in-window work orders, stored order.
//! - **property**: every property with its in-window work orders.
//! - **personnel**: every person with their in-window orders, completion
//!   rate, and mean response time.
//! - **financial**: totals, per-category breakdown (first-seen order), and
//!   monthly spending over completed in-window orders.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use upkeep_core::{Personnel, Property, WorkOrder};
use upkeep_store::Snapshot;

use crate::analytics::in_window;
use crate::error::AnalyticsError;
use crate::metrics::{self, MonthlyAmount};
use crate::window::TimeWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Maintenance,
    Property,
    Personnel,
    Financial,
}

impl ReportKind {
    pub const ALL: [ReportKind; 4] = [
        Self::Maintenance,
        Self::Property,
        Self::Personnel,
        Self::Financial,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Maintenance => "maintenance",
            Self::Property => "property",
            Self::Personnel => "personnel",
            Self::Financial => "financial",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| AnalyticsError::UnknownReportKind(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyReport {
    #[serde(flatten)]
    pub property: Property,
    pub work_orders: Vec<WorkOrder>,
}

impl PropertyReport {
    /// Actual cost summed over this property's in-window orders.
    pub fn total_cost(&self) -> f64 {
        metrics::total(self.work_orders.iter().map(WorkOrder::actual))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonnelReport {
    #[serde(flatten)]
    pub person: Personnel,
    pub work_orders: Vec<WorkOrder>,
    pub completion_rate: f64,
    pub average_response_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub estimated: f64,
    pub actual: f64,
    pub count: usize,
}

impl CategoryBreakdown {
    pub fn variance(&self) -> f64 {
        self.actual - self.estimated
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialReport {
    pub total_estimated: f64,
    pub total_actual: f64,
    /// `total_actual - total_estimated`.
    pub variance: f64,
    pub by_category: Vec<CategoryBreakdown>,
    pub monthly_spending: Vec<MonthlyAmount>,
}

impl FinancialReport {
    pub fn category(&self, name: &str) -> Option<&CategoryBreakdown> {
        self.by_category.iter().find(|c| c.category == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportData {
    pub window: TimeWindow,
    pub maintenance: Vec<WorkOrder>,
    pub property: Vec<PropertyReport>,
    pub personnel: Vec<PersonnelReport>,
    pub financial: FinancialReport,
}

pub fn property_report(properties: &[Property], orders: &[&WorkOrder]) -> Vec<PropertyReport> {
    properties
        .iter()
        .map(|property| PropertyReport {
            property: property.clone(),
            work_orders: orders
                .iter()
                .filter(|wo| wo.property_id == property.id)
                .map(|wo| (*wo).clone())
                .collect(),
        })
        .collect()
}

/// Same-name people each receive every order assigned to that name.
pub fn personnel_report(personnel: &[Personnel], orders: &[&WorkOrder]) -> Vec<PersonnelReport> {
    personnel
        .iter()
        .map(|person| {
            let mine: Vec<&WorkOrder> = orders
                .iter()
                .copied()
                .filter(|wo| wo.is_assigned_to(person))
                .collect();
            PersonnelReport {
                person: person.clone(),
                completion_rate: metrics::completion_rate(mine.iter().copied()),
                average_response_hours: metrics::average_response_hours(mine.iter().copied()),
                work_orders: mine.into_iter().cloned().collect(),
            }
        })
        .collect()
}

pub fn financial_report(orders: &[&WorkOrder]) -> FinancialReport {
    let completed: Vec<&WorkOrder> = orders.iter().copied().filter(|wo| wo.is_completed()).collect();
    let total_estimated = metrics::total(completed.iter().map(|wo| wo.estimated()));
    let total_actual = metrics::total(completed.iter().map(|wo| wo.actual()));

    let mut by_category: Vec<CategoryBreakdown> = Vec::new();
    for wo in &completed {
        match by_category.iter_mut().find(|c| c.category == wo.category) {
            Some(entry) => {
                entry.estimated += wo.estimated();
                entry.actual += wo.actual();
                entry.count += 1;
            }
            None => by_category.push(CategoryBreakdown {
                category: wo.category.clone(),
                estimated: wo.estimated(),
                actual: wo.actual(),
                count: 1,
            }),
        }
    }

    FinancialReport {
        total_estimated,
        total_actual,
        variance: total_actual - total_estimated,
        by_category,
        monthly_spending: metrics::monthly_amounts(completed.iter().copied()),
    }
}

/// Derive every report view for `window`.
pub fn build_reports(snapshot: &Snapshot, window: &TimeWindow) -> ReportData {
    let orders = in_window(&snapshot.work_orders, window);
    tracing::debug!(range = %window.range, orders = orders.len(), "reports derived");
    ReportData {
        window: *window,
        maintenance: orders.iter().map(|wo| (*wo).clone()).collect(),
        property: property_report(&snapshot.properties, &orders),
        personnel: personnel_report(&snapshot.personnel, &orders),
        financial: financial_report(&orders),
    }
}
