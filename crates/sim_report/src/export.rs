//! Run persistence: transactions, per-service summaries, and money figures.
//!
//! This module provides functions to export a finished run to CSV and JSON.
//! Column sets match the console report; undefined statistics are written as
//! "N/A" rather than NaN.

use std::path::Path;

use sim_core::pricing::FinancialSummary;
use sim_core::statistics::ServiceSummary;
use sim_core::telemetry::TransactionRecord;

#[path = "export/csv.rs"]
mod csv;
#[path = "export/json.rs"]
mod json;
#[path = "export/writer_utils.rs"]
mod writer_utils;

/// Consolidated run summary for JSON export.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RunSummary {
    pub horizon_minutes: u64,
    pub num_customers: usize,
    pub services: Vec<ServiceSummary>,
    pub financials: FinancialSummary,
}

/// Write the post-warm-up transaction log as CSV.
///
/// # Errors
///
/// Returns an error if file creation or CSV writing fails.
pub fn write_transactions_csv(
    transactions: &[TransactionRecord],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = writer_utils::create_output_file(path)?;
    csv::write_transactions_impl(transactions, file)
}

/// Write one summary row per service as CSV.
///
/// # Errors
///
/// Returns an error if the summary slice is empty or CSV writing fails.
pub fn write_service_summary_csv(
    summaries: &[ServiceSummary],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    writer_utils::ensure_not_empty(summaries)?;
    let file = writer_utils::create_output_file(path)?;
    csv::write_service_summary_impl(summaries, file)
}

/// Write the cost/revenue/profit row as CSV.
///
/// # Errors
///
/// Returns an error if file creation or CSV writing fails.
pub fn write_financials_csv(
    financials: &FinancialSummary,
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = writer_utils::create_output_file(path)?;
    csv::write_financials_impl(financials, file)
}

/// Write the consolidated run summary as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if file creation or JSON serialization fails.
pub fn write_run_summary_json(
    summary: &RunSummary,
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = writer_utils::create_output_file(path)?;
    json::write_run_summary_impl(summary, file)
}
