//! Post-run estimators derived from the per-service counters.
//!
//! A statistic whose denominator never accumulated (a service that never
//! queued anyone, or never admitted anyone) is undefined rather than NaN;
//! summaries carry it as `None` and sinks render it as "N/A".

use thiserror::Error;

use crate::services::StreamingService;

/// A statistic whose denominator is zero for this run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("statistic {statistic} is undefined: {denominator} is zero")]
pub struct UndefinedStatistic {
    /// Name of the statistic that could not be computed.
    pub statistic: &'static str,
    /// Name of the zero denominator.
    pub denominator: &'static str,
}

impl UndefinedStatistic {
    pub fn new(statistic: &'static str, denominator: &'static str) -> Self {
        Self {
            statistic,
            denominator,
        }
    }
}

/// Little's Law estimate of the mean number of customers waiting in a
/// service's queue: arrival rate of delayed customers times mean wait.
pub fn littles_law(sys_time: u64, num_delays: u64, avg_delay: f64) -> f64 {
    let lambda = num_delays as f64 / sys_time as f64;
    lambda * avg_delay
}

/// One row of the per-service summary table. Undefined statistics are
/// `None` and serialize as nulls / empty cells.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ServiceSummary {
    pub name: String,
    pub monthly_cost: f64,
    pub capacity: usize,
    /// Little's Law estimate of mean queue occupancy; `None` when the
    /// service never recorded a delay.
    pub mean_queue_length: Option<f64>,
    pub queue_utilization_pct: f64,
    pub num_delays: u64,
    /// `None` when the service never admitted a customer.
    pub prob_delay: Option<f64>,
    /// `None` when the service never recorded a delay.
    pub avg_delay: Option<f64>,
    pub max_delay: u64,
}

/// Derive the summary row for one service after a run of `sys_time` minutes.
pub fn summarize(service: &StreamingService, sys_time: u64) -> ServiceSummary {
    let avg_delay = service.avg_delay().ok();
    ServiceSummary {
        name: service.name().to_string(),
        monthly_cost: service.config.monthly_cost,
        capacity: service.config.capacity,
        mean_queue_length: avg_delay
            .map(|avg| littles_law(sys_time, service.num_delays(), avg)),
        queue_utilization_pct: service.queue_utilization(sys_time),
        num_delays: service.num_delays(),
        prob_delay: service.prob_delay().ok(),
        avg_delay,
        max_delay: service.max_delay(),
    }
}
