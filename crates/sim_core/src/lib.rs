//! Minute-resolution simulation of customers sharing capacity-limited
//! streaming subscriptions.
//!
//! A fixed population of customers circulates between competing streaming
//! services. Each service has a finite number of accounts; customers arriving
//! at a full service wait in a FIFO overflow queue until a departure frees a
//! slot. Departing customers immediately re-enter the population as future
//! arrivals, so the population size stays constant for the whole horizon.
//!
//! # Quick start
//!
//! ```no_run
//! use sim_core::scenario::ScenarioParams;
//! use sim_core::simulation::Simulation;
//! use sim_core::statistics::summarize;
//!
//! let params = ScenarioParams::default().with_seed(42);
//! let mut sim = Simulation::new(params);
//! sim.run_to_completion();
//!
//! for service in sim.services() {
//!     let summary = summarize(service, sim.now());
//!     println!("{}: {} delays", summary.name, summary.num_delays);
//! }
//! ```
//!
//! # Architecture
//!
//! - [`distributions`]: seeded samplers for service choice, viewing duration,
//!   and time-of-day-conditioned re-engagement
//! - [`customers`]: the customer arena and lifecycle state machine
//! - [`services`]: per-service capacity, overflow queue, and counters
//! - [`simulation`]: the minute-tick driver loop
//! - [`statistics`] / [`pricing`]: post-run estimators and money figures

pub mod calendar;
pub mod clock;
pub mod customers;
pub mod distributions;
pub mod pricing;
pub mod scenario;
pub mod services;
pub mod simulation;
pub mod statistics;
pub mod telemetry;
