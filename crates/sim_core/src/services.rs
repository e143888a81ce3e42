//! Streaming services: finite account capacity, FIFO overflow queues, and
//! the counters the post-run statistics are derived from.

use std::collections::{HashSet, VecDeque};

use crate::customers::{Customer, CustomerId, CustomerState};
use crate::statistics::UndefinedStatistic;

/// Static configuration for one streaming service.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ServiceConfig {
    pub name: String,
    /// Monthly cost of one account.
    pub monthly_cost: f64,
    /// Number of accounts, i.e. the maximum number of concurrently active
    /// customers.
    pub capacity: usize,
    /// Weight of this service in the customer choice distribution.
    pub choice_weight: f64,
}

impl ServiceConfig {
    pub fn new(name: &str, monthly_cost: f64, capacity: usize, choice_weight: f64) -> Self {
        Self {
            name: name.to_string(),
            monthly_cost,
            capacity,
            choice_weight,
        }
    }
}

/// Outcome of an admission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmitOutcome {
    /// A free account was available; the customer departs at this minute.
    Served { depart_time: u64 },
    /// The service was at capacity; the customer joined the overflow queue.
    Queued,
}

/// One streaming service's run-state: the active handle set, the overflow
/// queue, and accumulated delay counters.
#[derive(Debug)]
pub struct StreamingService {
    pub config: ServiceConfig,
    active: HashSet<CustomerId>,
    queue: VecDeque<CustomerId>,
    /// Promotions that experienced a non-zero wait.
    num_delays: u64,
    /// Sum of wait minutes across all promotions.
    total_delay: u64,
    /// Largest single wait observed.
    max_delay: u64,
    /// Minutes at which the queue still had occupants immediately after a
    /// promotion; proxy for queue utilization.
    time_in_queue: u64,
    /// All admissions into the active set, direct and promoted.
    num_admissions: u64,
}

impl StreamingService {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config,
            active: HashSet::new(),
            queue: VecDeque::new(),
            num_delays: 0,
            total_delay: 0,
            max_delay: 0,
            time_in_queue: 0,
            num_admissions: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_active(&self, id: CustomerId) -> bool {
        self.active.contains(&id)
    }

    pub fn is_queued(&self, id: CustomerId) -> bool {
        self.queue.contains(&id)
    }

    /// Admit a customer at `now`: into the active set if an account is free,
    /// otherwise onto the back of the overflow queue. Never fails.
    pub fn admit(&mut self, customer: &mut Customer, now: u64) -> AdmitOutcome {
        if self.active.len() < self.config.capacity {
            let depart_time = now + customer.service_time;
            self.active.insert(customer.id);
            customer.state = CustomerState::Active;
            customer.depart_time = Some(depart_time);
            self.num_admissions += 1;
            AdmitOutcome::Served { depart_time }
        } else {
            self.queue.push_back(customer.id);
            customer.state = CustomerState::Queued;
            customer.time_of_queue = now;
            AdmitOutcome::Queued
        }
    }

    /// Remove a departing customer from the active set. The caller is
    /// responsible for reinitializing the customer and for promoting the
    /// queue front via [`pop_waiting`](Self::pop_waiting) /
    /// [`admit_after_wait`](Self::admit_after_wait).
    pub fn release(&mut self, customer: &Customer) {
        self.active.remove(&customer.id);
    }

    /// Pop the front of the overflow queue, strictly FIFO.
    pub fn pop_waiting(&mut self) -> Option<CustomerId> {
        self.queue.pop_front()
    }

    /// Admit a customer just popped from the queue into the slot freed by a
    /// departure. Records its wait in the delay counters and counts residual
    /// queue occupancy. The customer must carry a freshly sampled
    /// `service_time`; capacity is not re-checked because the slot has just
    /// been vacated.
    pub fn admit_after_wait(&mut self, customer: &mut Customer, now: u64) {
        let delay = now - customer.time_of_queue;
        customer.delay_time = delay;
        self.total_delay += delay;
        if delay > 0 {
            self.num_delays += 1;
        }
        if delay > self.max_delay {
            self.max_delay = delay;
        }
        self.active.insert(customer.id);
        customer.state = CustomerState::Active;
        customer.depart_time = Some(now + customer.service_time);
        self.num_admissions += 1;
        if !self.queue.is_empty() {
            self.time_in_queue += 1;
        }
    }

    pub fn num_delays(&self) -> u64 {
        self.num_delays
    }

    pub fn total_delay(&self) -> u64 {
        self.total_delay
    }

    pub fn max_delay(&self) -> u64 {
        self.max_delay
    }

    pub fn time_in_queue(&self) -> u64 {
        self.time_in_queue
    }

    pub fn num_admissions(&self) -> u64 {
        self.num_admissions
    }

    /// Probability that an admission to this service involved a wait:
    /// `num_delays / num_admissions`.
    pub fn prob_delay(&self) -> Result<f64, UndefinedStatistic> {
        if self.num_admissions == 0 {
            return Err(UndefinedStatistic::new("prob_delay", "num_admissions"));
        }
        Ok(self.num_delays as f64 / self.num_admissions as f64)
    }

    /// Mean wait in minutes across delayed promotions:
    /// `total_delay / num_delays`.
    pub fn avg_delay(&self) -> Result<f64, UndefinedStatistic> {
        if self.num_delays == 0 {
            return Err(UndefinedStatistic::new("avg_delay", "num_delays"));
        }
        Ok(self.total_delay as f64 / self.num_delays as f64)
    }

    /// Percentage of simulated minutes at which the queue had residual
    /// occupancy at a promotion event.
    pub fn queue_utilization(&self, sys_time: u64) -> f64 {
        if sys_time == 0 {
            return 0.0;
        }
        self.time_in_queue as f64 * 100.0 / sys_time as f64
    }
}
