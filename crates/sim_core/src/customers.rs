//! The customer population: lifecycle state machine and arena storage.
//!
//! Customers are created once at simulation start and live in a
//! [`CustomerPool`] arena addressed by integer handle. Services never hold
//! references to customers, only handles, so there is no aliasing between
//! the pool and the per-service active sets and queues.

use crate::distributions::VariateProvider;

/// Stable handle into the [`CustomerPool`]. Assigned once, never reused
/// within a run.
pub type CustomerId = usize;

/// Where a customer currently is.
///
/// Exactly one of these holds at any simulated minute: either the customer
/// is waiting for its next arrival tick, parked in one service's overflow
/// queue, or actively using one service's account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerState {
    /// Scheduled for a future arrival, not attached to any service.
    Unscheduled,
    /// Waiting in the overflow queue of `chosen_service`.
    Queued,
    /// Occupying an account of `chosen_service` until `depart_time`.
    Active,
}

/// One customer record. Reinitialized in place on every departure so the
/// population recirculates for the whole horizon.
#[derive(Debug, Clone)]
pub struct Customer {
    pub id: CustomerId,
    pub state: CustomerState,
    /// Index of the service this customer will use (or is using) next.
    pub chosen_service: usize,
    /// Absolute minute of the next (or most recent) arrival.
    pub arrival_time: u64,
    /// Length of the viewing session once admitted, in minutes.
    pub service_time: u64,
    /// Absolute departure minute; `None` until service begins.
    pub depart_time: Option<u64>,
    /// Minute this customer entered an overflow queue. Only meaningful
    /// while [`CustomerState::Queued`].
    pub time_of_queue: u64,
    /// Minutes spent queued before the current admission. Only meaningful
    /// after a promotion; zero for customers admitted directly.
    pub delay_time: u64,
}

impl Customer {
    /// Create a customer with freshly sampled choice, arrival, and duration.
    /// `stagger` offsets the first arrival so the initial population does
    /// not pile onto the same minutes.
    pub fn new(id: CustomerId, provider: &mut VariateProvider, stagger: u64) -> Self {
        Self {
            id,
            state: CustomerState::Unscheduled,
            chosen_service: provider.choose_service(),
            arrival_time: provider.arrival_after(0) + stagger,
            service_time: provider.service_duration(),
            depart_time: None,
            time_of_queue: 0,
            delay_time: 0,
        }
    }

    /// Recirculation: turn a departing customer back into a future arrival
    /// with a new service choice, arrival time, and session length.
    ///
    /// The arrival is clamped to at least `now + 1`: the driver's scan has
    /// already passed this customer for the current minute, so an arrival at
    /// `now` would never be observed.
    pub fn reinitialize(&mut self, now: u64, provider: &mut VariateProvider) {
        self.state = CustomerState::Unscheduled;
        self.chosen_service = provider.choose_service();
        self.arrival_time = provider.arrival_after(now).max(now + 1);
        self.service_time = provider.service_duration();
        self.depart_time = None;
        self.delay_time = 0;
    }
}

/// Arena of customer records. The driver owns the pool exclusively; services
/// refer to customers by [`CustomerId`] only.
#[derive(Debug)]
pub struct CustomerPool {
    customers: Vec<Customer>,
}

impl CustomerPool {
    /// Build the initial population. Customer `i` is staggered by `i`
    /// minutes on top of its sampled first arrival.
    pub fn build(count: usize, provider: &mut VariateProvider) -> Self {
        let customers = (0..count)
            .map(|id| Customer::new(id, provider, id as u64))
            .collect();
        Self { customers }
    }

    /// Wrap an explicit population. Records must be indexed by their own
    /// `id` (customer `i` at position `i`).
    pub fn from_customers(customers: Vec<Customer>) -> Self {
        debug_assert!(customers.iter().enumerate().all(|(i, c)| c.id == i));
        Self { customers }
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    pub fn get(&self, id: CustomerId) -> &Customer {
        &self.customers[id]
    }

    pub fn get_mut(&mut self, id: CustomerId) -> &mut Customer {
        &mut self.customers[id]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Customer> {
        self.customers.iter()
    }

    /// Minute at which the last customer of the initial population first
    /// arrives. Used as the warm-up end: transaction output before this
    /// point is suppressed.
    pub fn last_initial_arrival(&self) -> u64 {
        self.customers
            .iter()
            .map(|c| c.arrival_time)
            .max()
            .unwrap_or(0)
    }
}
