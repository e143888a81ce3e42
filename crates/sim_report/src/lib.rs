//! Reporting and persistence for simulation runs.
//!
//! Everything in this crate is a thin shell around `sim_core`: formatting
//! transaction logs and summary tables, writing them to CSV/JSON, and
//! optionally echoing live trace lines while a run advances. Nothing here
//! affects simulation outcomes.
//!
//! # Modules
//!
//! - [`export`]: CSV and JSON persistence of transactions and summaries
//! - [`report`]: fixed-width console tables
//! - [`trace`]: colored live-transaction printer

pub mod export;
pub mod report;
pub mod trace;
