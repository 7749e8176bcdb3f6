//! # CSV Export
//!
//! Serializes a report view into the fixed-column CSV each report kind
//! downloads as. Every field is double-quoted, numbers included, and an
//! embedded `"` is doubled. Rows are joined by `\n` with no trailing
//! newline. The financial export appends a `Monthly Summary` table after
//! a blank line.

use serde::Serialize;
use upkeep_core::WorkOrder;

use crate::reports::{
    FinancialReport, PersonnelReport, PropertyReport, ReportData, ReportKind,
};
use crate::window::DateRange;

pub const MAINTENANCE_HEADER: &str =
    "ID,Title,Status,Priority,Category,Created,Due Date,Estimated Cost,Actual Cost";
pub const PROPERTY_HEADER: &str =
    "Property,Address,City,State,Active Tasks,Total Tasks,Last Inspection,Total Cost";
pub const PERSONNEL_HEADER: &str =
    "Name,Role,Completion Rate,Average Response (hrs),Active Tasks,Completed Tasks,Rating";
pub const FINANCIAL_HEADER: &str = "Category,Estimated Cost,Actual Cost,Variance,Number of Orders";
pub const MONTHLY_SUMMARY_HEADER: &str = "Monthly Summary\nMonth,Amount";

/// A rendered export, ready to be written or downloaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportDocument {
    pub filename: String,
    pub content: String,
}

/// `{kind}-report-{range}.csv`
pub fn export_filename(kind: ReportKind, range: DateRange) -> String {
    format!("{kind}-report-{range}.csv")
}

fn quote(field: impl ToString) -> String {
    format!("\"{}\"", field.to_string().replace('"', "\"\""))
}

fn row(fields: Vec<String>) -> String {
    fields.join(",")
}

fn table(header: &str, rows: Vec<String>) -> String {
    let mut out = String::from(header);
    out.push('\n');
    out.push_str(&rows.join("\n"));
    out
}

fn maintenance_row(wo: &WorkOrder) -> String {
    row(vec![
        quote(&wo.id),
        quote(&wo.title),
        quote(wo.status),
        quote(wo.priority),
        quote(&wo.category),
        quote(wo.created_at),
        quote(&wo.due_date),
        quote(wo.estimated()),
        quote(wo.actual()),
    ])
}

fn property_row(report: &PropertyReport) -> String {
    let p = &report.property;
    row(vec![
        quote(&p.id),
        quote(&p.address),
        quote(&p.city),
        quote(&p.state),
        quote(p.maintenance_tasks),
        quote(report.work_orders.len()),
        quote(p.last_inspection),
        quote(report.total_cost()),
    ])
}

fn personnel_row(report: &PersonnelReport) -> String {
    let p = &report.person;
    row(vec![
        quote(p.full_name()),
        quote(p.role()),
        quote(format!("{:.1}%", report.completion_rate)),
        quote(format!("{:.1}", report.average_response_hours)),
        quote(p.active_work_orders),
        quote(p.completed_work_orders),
        quote(p.rating),
    ])
}

fn financial_content(f: &FinancialReport) -> String {
    let categories = f
        .by_category
        .iter()
        .map(|c| {
            row(vec![
                quote(&c.category),
                quote(c.estimated),
                quote(c.actual),
                quote(c.variance()),
                quote(c.count),
            ])
        })
        .collect();
    let months = f
        .monthly_spending
        .iter()
        .map(|m| row(vec![quote(m.month), quote(m.amount)]))
        .collect();
    format!(
        "{}\n\n{}",
        table(FINANCIAL_HEADER, categories),
        table(MONTHLY_SUMMARY_HEADER, months)
    )
}

/// Render one report kind from `data` as CSV.
pub fn render(kind: ReportKind, data: &ReportData) -> String {
    match kind {
        ReportKind::Maintenance => table(
            MAINTENANCE_HEADER,
            data.maintenance.iter().map(maintenance_row).collect(),
        ),
        ReportKind::Property => {
            table(PROPERTY_HEADER, data.property.iter().map(property_row).collect())
        }
        ReportKind::Personnel => table(
            PERSONNEL_HEADER,
            data.personnel.iter().map(personnel_row).collect(),
        ),
        ReportKind::Financial => financial_content(&data.financial),
    }
}

pub fn export(kind: ReportKind, data: &ReportData) -> ExportDocument {
    ExportDocument {
        filename: export_filename(kind, data.window.range),
        content: render(kind, data),
    }
}
