//! Run one simulation with the default streaming catalog and write the
//! transaction log, service summary, and money figures to an output
//! directory.
//!
//! Flags: `--seed <u64>`, `--months <n>`, `--customers <n>`,
//! `--out <dir>` (default `output_files`), `--trace`.

use std::error::Error;
use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};

use sim_core::calendar::format_datetime;
use sim_core::pricing::financial_summary;
use sim_core::scenario::ScenarioParams;
use sim_core::simulation::Simulation;
use sim_core::statistics::{summarize, ServiceSummary};

use sim_report::export::{
    write_financials_csv, write_run_summary_json, write_service_summary_csv,
    write_transactions_csv, RunSummary,
};
use sim_report::report::{render_financials, render_service_table};
use sim_report::trace::TracePrinter;

#[derive(Debug)]
struct CliOptions {
    seed: Option<u64>,
    months: Option<u64>,
    customers: Option<usize>,
    out_dir: PathBuf,
    trace: bool,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            seed: None,
            months: None,
            customers: None,
            out_dir: PathBuf::from("output_files"),
            trace: false,
        }
    }
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--trace" => options.trace = true,
            "--seed" => {
                let value = args.next().ok_or("--seed requires a value")?;
                options.seed = Some(value.parse().map_err(|_| "invalid --seed value")?);
            }
            "--months" => {
                let value = args.next().ok_or("--months requires a value")?;
                options.months = Some(value.parse().map_err(|_| "invalid --months value")?);
            }
            "--customers" => {
                let value = args.next().ok_or("--customers requires a value")?;
                options.customers =
                    Some(value.parse().map_err(|_| "invalid --customers value")?);
            }
            "--out" => {
                let value = args.next().ok_or("--out requires a value")?;
                options.out_dir = PathBuf::from(value);
            }
            other => return Err(format!("unknown flag: {other}")),
        }
    }
    Ok(options)
}

fn progress_bar(horizon: u64) -> ProgressBar {
    let bar = ProgressBar::new(horizon);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} minutes ({eta})")
            .unwrap()
            .progress_chars("#>-"),
    );
    bar
}

fn main() -> Result<(), Box<dyn Error>> {
    let options = parse_args(std::env::args().skip(1))?;

    let mut params = ScenarioParams::default();
    if let Some(seed) = options.seed {
        params = params.with_seed(seed);
    }
    if let Some(months) = options.months {
        params = params.with_num_months(months);
    }
    if let Some(customers) = options.customers {
        params = params.with_num_customers(customers);
    }

    std::fs::create_dir_all(&options.out_dir)?;

    let mut sim = Simulation::new(params.clone());
    let bar = progress_bar(sim.horizon());

    if options.trace {
        let printer = TracePrinter::new(
            params.services.iter().map(|s| s.name.clone()).collect(),
        );
        while sim.step_with_hook(&mut |event| printer.print(event)) {
            bar.inc(1);
        }
    } else {
        while sim.step() {
            bar.inc(1);
        }
    }
    bar.finish_with_message("run complete");

    println!(
        "\nThe last customer entered the system at: {}",
        format_datetime(sim.warmup_end())
    );

    let sys_time = sim.now();
    let summaries: Vec<ServiceSummary> = sim
        .services()
        .iter()
        .map(|service| summarize(service, sys_time))
        .collect();
    let financials = financial_summary(
        &params.services,
        params.num_customers,
        params.monthly_fee,
        params.num_months,
    );

    println!("\n{}", render_financials(&financials));
    println!("{}", render_service_table(&summaries));

    write_transactions_csv(
        &sim.telemetry().transactions,
        options.out_dir.join("transactions.csv"),
    )?;
    write_service_summary_csv(&summaries, options.out_dir.join("servicedata.csv"))?;
    write_financials_csv(&financials, options.out_dir.join("costdata.csv"))?;
    write_run_summary_json(
        &RunSummary {
            horizon_minutes: sim.horizon(),
            num_customers: params.num_customers,
            services: summaries,
            financials,
        },
        options.out_dir.join("run_summary.json"),
    )?;

    println!("Wrote output files to {}", options.out_dir.display());
    Ok(())
}
