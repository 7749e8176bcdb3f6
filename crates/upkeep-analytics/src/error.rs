//! Errors for symbolic inputs to the aggregation engine.

use thiserror::Error;
use upkeep_core::UpkeepError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("Date range must be one of 7d, 30d, 90d, 6m, 1y, all")]
    UnknownRange(String),

    #[error("Report kind must be maintenance, property, personnel, or financial")]
    UnknownReportKind(String),

    #[error("Month must look like \"Nov 23\"")]
    InvalidMonthKey(String),
}

/// A bad token is caller input, so it surfaces as a validation failure.
impl From<AnalyticsError> for UpkeepError {
    fn from(err: AnalyticsError) -> Self {
        UpkeepError::validation(err.to_string())
    }
}
