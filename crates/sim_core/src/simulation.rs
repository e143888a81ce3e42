//! The simulation driver: advances the minute clock and routes arrivals and
//! departures into the services.
//!
//! Each step scans the whole population once. A customer whose arrival
//! minute has come is admitted to its chosen service (or queued if the
//! service is full); a customer whose departure minute has come is released,
//! the front of that service's queue is promoted into the freed slot, and
//! the departing customer is reinitialized as a brand-new future arrival.

use crate::clock::SimulationClock;
use crate::customers::{CustomerId, CustomerPool, CustomerState};
use crate::distributions::VariateProvider;
use crate::scenario::ScenarioParams;
use crate::services::{AdmitOutcome, StreamingService};
use crate::telemetry::{SimTelemetry, TransactionRecord};

/// One observable simulation event, for live tracing. Emitting these has no
/// effect on the run's outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEvent {
    /// Customer entered a service directly.
    Admitted {
        customer: CustomerId,
        service: usize,
        time: u64,
        depart_time: u64,
    },
    /// Service was full; customer joined its overflow queue.
    Queued {
        customer: CustomerId,
        service: usize,
        time: u64,
    },
    /// Customer left a service, freeing a slot.
    Released {
        customer: CustomerId,
        service: usize,
        time: u64,
    },
    /// Queued customer moved into a freed slot after `delay` minutes.
    Promoted {
        customer: CustomerId,
        service: usize,
        time: u64,
        delay: u64,
    },
}

/// Driver state for one run. Owns the clock, the customer arena, the
/// services, and the sampler bundle; everything is advanced synchronously by
/// [`step`](Self::step).
#[derive(Debug)]
pub struct Simulation {
    params: ScenarioParams,
    clock: SimulationClock,
    provider: VariateProvider,
    pool: CustomerPool,
    services: Vec<StreamingService>,
    telemetry: SimTelemetry,
    warmup_end: u64,
}

impl Simulation {
    pub fn new(params: ScenarioParams) -> Self {
        let mut provider = params.build_provider();
        let pool = params.build_population(&mut provider);
        let services = params.build_services();
        let warmup_end = pool.last_initial_arrival();
        Self {
            clock: SimulationClock::new(params.horizon()),
            provider,
            pool,
            services,
            telemetry: SimTelemetry::default(),
            warmup_end,
            params,
        }
    }

    /// Assemble a driver from pre-built parts. Intended for crafting exact
    /// populations in tests and scenario tooling.
    pub fn from_parts(
        params: ScenarioParams,
        provider: VariateProvider,
        pool: CustomerPool,
        services: Vec<StreamingService>,
    ) -> Self {
        let warmup_end = pool.last_initial_arrival();
        Self {
            clock: SimulationClock::new(params.horizon()),
            provider,
            pool,
            services,
            telemetry: SimTelemetry::default(),
            warmup_end,
            params,
        }
    }

    pub fn params(&self) -> &ScenarioParams {
        &self.params
    }

    /// Current simulated minute. Equals the horizon once the run finishes.
    pub fn now(&self) -> u64 {
        self.clock.now()
    }

    pub fn horizon(&self) -> u64 {
        self.clock.horizon()
    }

    /// Minute the last initial customer first arrives; transaction records
    /// before this point are suppressed.
    pub fn warmup_end(&self) -> u64 {
        self.warmup_end
    }

    pub fn is_finished(&self) -> bool {
        self.clock.is_finished()
    }

    pub fn services(&self) -> &[StreamingService] {
        &self.services
    }

    pub fn pool(&self) -> &CustomerPool {
        &self.pool
    }

    pub fn telemetry(&self) -> &SimTelemetry {
        &self.telemetry
    }

    /// Total admissions across all services, direct and promoted.
    pub fn total_admissions(&self) -> u64 {
        self.services.iter().map(|s| s.num_admissions()).sum()
    }

    /// Process one simulated minute. Returns `false` once the horizon has
    /// been reached.
    pub fn step(&mut self) -> bool {
        self.step_with_hook(&mut |_| {})
    }

    /// Process one simulated minute, invoking `hook` for every event.
    pub fn step_with_hook<F>(&mut self, hook: &mut F) -> bool
    where
        F: FnMut(&TraceEvent),
    {
        if self.clock.is_finished() {
            return false;
        }
        let now = self.clock.now();
        for id in 0..self.pool.len() {
            self.process_arrival(id, now, hook);
            self.process_departure(id, now, hook);
        }
        let _ = self.clock.tick();
        true
    }

    /// Run the remaining horizon with no trace output.
    pub fn run_to_completion(&mut self) {
        while self.step() {}
    }

    /// Run the remaining horizon, invoking `hook` for every event.
    pub fn run_with_hook<F>(&mut self, mut hook: F)
    where
        F: FnMut(&TraceEvent),
    {
        while self.step_with_hook(&mut hook) {}
    }

    fn process_arrival<F>(&mut self, id: CustomerId, now: u64, hook: &mut F)
    where
        F: FnMut(&TraceEvent),
    {
        let customer = self.pool.get(id);
        if customer.state != CustomerState::Unscheduled || customer.arrival_time != now {
            return;
        }
        let customer = self.pool.get_mut(id);
        let service_idx = customer.chosen_service;
        match self.services[service_idx].admit(customer, now) {
            AdmitOutcome::Served { depart_time } => hook(&TraceEvent::Admitted {
                customer: id,
                service: service_idx,
                time: now,
                depart_time,
            }),
            AdmitOutcome::Queued => hook(&TraceEvent::Queued {
                customer: id,
                service: service_idx,
                time: now,
            }),
        }
    }

    fn process_departure<F>(&mut self, id: CustomerId, now: u64, hook: &mut F)
    where
        F: FnMut(&TraceEvent),
    {
        let customer = self.pool.get(id);
        if customer.state != CustomerState::Active || customer.depart_time != Some(now) {
            return;
        }
        let service_idx = customer.chosen_service;
        self.services[service_idx].release(customer);
        hook(&TraceEvent::Released {
            customer: id,
            service: service_idx,
            time: now,
        });

        let customer = self.pool.get(id);
        if now >= self.warmup_end {
            self.telemetry.record(TransactionRecord {
                customer_id: id,
                service_name: self.services[service_idx].name().to_string(),
                arrival_time: customer.arrival_time,
                depart_time: now,
                service_minutes: customer.service_time,
                queue_minutes: customer.delay_time,
            });
        } else {
            self.telemetry.record_suppressed();
        }

        // A slot just freed: promote the queue front, with a fresh session
        // length sampled at promotion time.
        if let Some(waiting_id) = self.services[service_idx].pop_waiting() {
            let fresh_session = self.provider.service_duration();
            let waiting = self.pool.get_mut(waiting_id);
            waiting.service_time = fresh_session;
            self.services[service_idx].admit_after_wait(waiting, now);
            let delay = waiting.delay_time;
            hook(&TraceEvent::Promoted {
                customer: waiting_id,
                service: service_idx,
                time: now,
                delay,
            });
        }

        // Recirculation: the departer becomes a brand-new future arrival.
        let customer = self.pool.get_mut(id);
        customer.reinitialize(now, &mut self.provider);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customers::Customer;
    use crate::services::ServiceConfig;

    fn two_service_params() -> ScenarioParams {
        ScenarioParams::default()
            .with_num_customers(2)
            .with_num_months(1)
            .with_services(vec![
                ServiceConfig::new("A", 9.99, 1, 1.0),
                ServiceConfig::new("B", 9.99, 1, 0.0),
            ])
            .with_seed(42)
    }

    fn crafted_customer(
        id: CustomerId,
        chosen_service: usize,
        arrival_time: u64,
        service_time: u64,
    ) -> Customer {
        Customer {
            id,
            state: CustomerState::Unscheduled,
            chosen_service,
            arrival_time,
            service_time,
            depart_time: None,
            time_of_queue: 0,
            delay_time: 0,
        }
    }

    /// Capacity-1 contention: A admitted at 0, B queued at 0, A departs at
    /// 100, B promoted with delay 100 and a fresh session, A reinitialized.
    #[test]
    fn contention_scenario_admits_queues_and_promotes() {
        let params = two_service_params();
        let provider = params.build_provider();
        let pool = CustomerPool::from_customers(vec![
            crafted_customer(0, 0, 0, 100),
            crafted_customer(1, 0, 0, 50),
        ]);
        let services = params.build_services();
        let mut sim = Simulation::from_parts(params, provider, pool, services);

        let mut events = Vec::new();
        while sim.now() <= 100 {
            sim.step_with_hook(&mut |event| events.push(*event));
        }

        assert_eq!(
            events[0],
            TraceEvent::Admitted {
                customer: 0,
                service: 0,
                time: 0,
                depart_time: 100
            }
        );
        assert_eq!(
            events[1],
            TraceEvent::Queued {
                customer: 1,
                service: 0,
                time: 0
            }
        );
        assert_eq!(
            events[2],
            TraceEvent::Released {
                customer: 0,
                service: 0,
                time: 100
            }
        );
        assert_eq!(
            events[3],
            TraceEvent::Promoted {
                customer: 1,
                service: 0,
                time: 100,
                delay: 100
            }
        );

        let promoted = sim.pool().get(1);
        assert_eq!(promoted.state, CustomerState::Active);
        assert_eq!(promoted.delay_time, 100);
        // Fresh session sampled at promotion, not the original 50 minutes.
        assert!((30..=180).contains(&promoted.service_time));
        assert_eq!(
            promoted.depart_time,
            Some(100 + promoted.service_time)
        );

        let departed = sim.pool().get(0);
        assert_eq!(departed.state, CustomerState::Unscheduled);
        assert!(departed.arrival_time > 100);
        assert!(departed.depart_time.is_none());

        let service = &sim.services()[0];
        assert_eq!(service.num_delays(), 1);
        assert_eq!(service.max_delay(), 100);
        assert_eq!(service.active_count(), 1);
    }

    #[test]
    fn transactions_before_warmup_are_suppressed() {
        let params = two_service_params();
        let provider = params.build_provider();
        // Customer 1 first arrives at minute 300, so releases before then
        // fall inside the warm-up period.
        let pool = CustomerPool::from_customers(vec![
            crafted_customer(0, 0, 0, 100),
            crafted_customer(1, 1, 300, 50),
        ]);
        let services = params.build_services();
        let mut sim = Simulation::from_parts(params, provider, pool, services);
        assert_eq!(sim.warmup_end(), 300);

        while sim.now() <= 100 {
            sim.step();
        }
        assert!(sim.telemetry().transactions.is_empty());
        assert_eq!(sim.telemetry().suppressed_releases, 1);
    }

    #[test]
    fn recorded_transaction_carries_the_stay() {
        let params = two_service_params();
        let provider = params.build_provider();
        let pool = CustomerPool::from_customers(vec![
            crafted_customer(0, 0, 0, 100),
            crafted_customer(1, 1, 0, 50),
        ]);
        let services = params.build_services();
        let mut sim = Simulation::from_parts(params, provider, pool, services);

        while sim.now() <= 100 {
            sim.step();
        }

        let transactions = &sim.telemetry().transactions;
        // Both initial stays end by minute 100; recirculated customers may
        // already have added more.
        assert!(transactions.len() >= 2);
        let stay = transactions
            .iter()
            .find(|t| t.customer_id == 0)
            .expect("customer 0 release recorded");
        assert_eq!(stay.service_name, "A");
        assert_eq!(stay.arrival_time, 0);
        assert_eq!(stay.depart_time, 100);
        assert_eq!(stay.service_minutes, 100);
        assert_eq!(stay.queue_minutes, 0);
    }

    #[test]
    fn run_always_covers_the_full_horizon() {
        let params = ScenarioParams::default()
            .with_num_customers(10)
            .with_num_months(1)
            .with_seed(1);
        let horizon = params.horizon();
        let mut sim = Simulation::new(params);
        let mut steps = 0u64;
        while sim.step() {
            steps += 1;
        }
        assert_eq!(steps, horizon);
        assert_eq!(sim.now(), horizon);
        assert!(sim.is_finished());
        assert!(!sim.step(), "no ticks past the horizon");
    }

    #[test]
    fn total_admissions_reconciles_with_releases_and_active_customers() {
        let params = ScenarioParams::default()
            .with_num_customers(100)
            .with_num_months(1)
            .with_seed(7);
        let mut sim = Simulation::new(params);
        sim.run_to_completion();

        let releases =
            sim.telemetry().transactions.len() as u64 + sim.telemetry().suppressed_releases;
        let still_active: u64 = sim.services().iter().map(|s| s.active_count() as u64).sum();
        assert_eq!(sim.total_admissions(), releases + still_active);
    }
}
