use crate::export::RunSummary;

pub(crate) fn write_run_summary_impl(
    summary: &RunSummary,
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    serde_json::to_writer_pretty(file, summary)?;
    Ok(())
}
