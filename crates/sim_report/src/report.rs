//! Fixed-width console tables for the end-of-run report.

use sim_core::pricing::FinancialSummary;
use sim_core::statistics::ServiceSummary;

fn na_or(value: Option<f64>, width: usize) -> String {
    match value {
        Some(v) => format!("{v:>width$.4}"),
        None => format!("{:>width$}", "N/A"),
    }
}

/// Render the per-service queueing results as a fixed-width table.
pub fn render_service_table(summaries: &[ServiceSummary]) -> String {
    let mut out = String::new();
    out.push_str("---  SERVICE QUEUEING RESULTS  ---\n");
    out.push_str(&format!(
        "{:<12} {:>8} {:>10} {:>14} {:>12} {:>10} {:>12} {:>12} {:>12}\n",
        "Service",
        "Cost",
        "Accounts",
        "AvgInQueue",
        "QueueUtil%",
        "NumDelays",
        "ProbDelay",
        "AvgDelay",
        "MaxDelay",
    ));
    out.push_str(&"-".repeat(110));
    out.push('\n');
    for s in summaries {
        out.push_str(&format!(
            "{:<12} {:>7.2}$ {:>10} {} {:>12.4} {:>10} {} {} {:>12}\n",
            s.name,
            s.monthly_cost,
            s.capacity,
            na_or(s.mean_queue_length, 14),
            s.queue_utilization_pct,
            s.num_delays,
            na_or(s.prob_delay, 12),
            na_or(s.avg_delay, 12),
            s.max_delay,
        ));
    }
    out
}

/// Render the cost/revenue/profit block.
pub fn render_financials(financials: &FinancialSummary) -> String {
    format!(
        "---  COST & REVENUE RESULTS  ---\n\
         Cost:    ${:.2}\n\
         Revenue: ${:.2}\n\
         Profit:  ${:.2}\n",
        financials.total_cost, financials.revenue, financials.profit
    )
}
