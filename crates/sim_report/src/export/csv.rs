use sim_core::calendar::format_datetime;
use sim_core::pricing::FinancialSummary;
use sim_core::statistics::ServiceSummary;
use sim_core::telemetry::TransactionRecord;

fn na_or<F>(value: Option<f64>, fmt: F) -> String
where
    F: FnOnce(f64) -> String,
{
    value.map(fmt).unwrap_or_else(|| "N/A".to_string())
}

pub(crate) fn write_transactions_impl(
    transactions: &[TransactionRecord],
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_writer(file);

    wtr.write_record([
        "customer_id",
        "service_name",
        "arrival",
        "departure",
        "minutes_in_service",
        "minutes_in_queue",
    ])?;

    for record in transactions {
        wtr.write_record([
            &record.customer_id.to_string(),
            &record.service_name,
            &format_datetime(record.arrival_time),
            &format_datetime(record.depart_time),
            &record.service_minutes.to_string(),
            &record.queue_minutes.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

pub(crate) fn write_service_summary_impl(
    summaries: &[ServiceSummary],
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_writer(file);

    wtr.write_record([
        "service_name",
        "monthly_cost",
        "capacity",
        "mean_queue_length",
        "queue_utilization_pct",
        "num_delays",
        "prob_delay",
        "avg_delay_minutes",
        "max_delay_minutes",
    ])?;

    for summary in summaries {
        wtr.write_record([
            &summary.name,
            &format!("{:.2}", summary.monthly_cost),
            &summary.capacity.to_string(),
            &na_or(summary.mean_queue_length, |v| format!("{v:.4}")),
            &format!("{:.4}", summary.queue_utilization_pct),
            &summary.num_delays.to_string(),
            &na_or(summary.prob_delay, |v| format!("{v:.4}")),
            &na_or(summary.avg_delay, |v| format!("{v:.4}")),
            &summary.max_delay.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

pub(crate) fn write_financials_impl(
    financials: &FinancialSummary,
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_writer(file);

    wtr.write_record(["total_cost", "revenue", "profit"])?;
    wtr.write_record([
        &format!("{:.2}", financials.total_cost),
        &format!("{:.2}", financials.revenue),
        &format!("{:.2}", financials.profit),
    ])?;

    wtr.flush()?;
    Ok(())
}
