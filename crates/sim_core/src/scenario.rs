//! Scenario setup: the service catalog and run parameters.

use crate::clock::MINUTES_PER_MONTH;
use crate::customers::CustomerPool;
use crate::distributions::{ServiceDurationDistribution, VariateProvider};
use crate::services::{ServiceConfig, StreamingService};

/// Default number of subscribers sharing the service pool.
const DEFAULT_NUM_CUSTOMERS: usize = 10_000;

/// Default flat monthly fee each subscriber pays us.
const DEFAULT_MONTHLY_FEE: f64 = 20.0;

/// Default horizon in months.
const DEFAULT_NUM_MONTHS: u64 = 2;

/// The default service catalog: market-share-weighted streaming services
/// with their monthly account cost and purchased account capacity.
pub fn default_catalog() -> Vec<ServiceConfig> {
    vec![
        ServiceConfig::new("Netflix", 9.99, 300, 0.30),
        ServiceConfig::new("Disney+", 11.99, 200, 0.20),
        ServiceConfig::new("CraveTv", 9.99, 200, 0.20),
        ServiceConfig::new("Prime", 9.99, 200, 0.20),
        ServiceConfig::new("Paramount+", 9.99, 50, 0.05),
        ServiceConfig::new("AppleTv+", 8.99, 50, 0.05),
    ]
}

/// Parameters for one simulation run.
#[derive(Debug, Clone)]
pub struct ScenarioParams {
    pub num_customers: usize,
    pub services: Vec<ServiceConfig>,
    /// Flat monthly fee each subscriber pays.
    pub monthly_fee: f64,
    pub num_months: u64,
    /// Viewing session length bounds.
    pub session: ServiceDurationDistribution,
    /// Random seed for reproducibility (optional; if `None`, seeds from
    /// entropy).
    pub seed: Option<u64>,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            num_customers: DEFAULT_NUM_CUSTOMERS,
            services: default_catalog(),
            monthly_fee: DEFAULT_MONTHLY_FEE,
            num_months: DEFAULT_NUM_MONTHS,
            session: ServiceDurationDistribution::default(),
            seed: None,
        }
    }
}

impl ScenarioParams {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_num_customers(mut self, num_customers: usize) -> Self {
        self.num_customers = num_customers;
        self
    }

    pub fn with_num_months(mut self, num_months: u64) -> Self {
        self.num_months = num_months;
        self
    }

    pub fn with_services(mut self, services: Vec<ServiceConfig>) -> Self {
        self.services = services;
        self
    }

    pub fn with_monthly_fee(mut self, monthly_fee: f64) -> Self {
        self.monthly_fee = monthly_fee;
        self
    }

    /// Full horizon in simulated minutes.
    pub fn horizon(&self) -> u64 {
        self.num_months * MINUTES_PER_MONTH
    }

    /// Choice weights in catalog order.
    pub fn choice_weights(&self) -> Vec<f64> {
        self.services.iter().map(|s| s.choice_weight).collect()
    }

    /// Build the sampler bundle for this scenario.
    pub fn build_provider(&self) -> VariateProvider {
        VariateProvider::new(&self.choice_weights(), self.session, self.seed)
    }

    /// Instantiate run-state for every configured service.
    pub fn build_services(&self) -> Vec<StreamingService> {
        self.services
            .iter()
            .cloned()
            .map(StreamingService::new)
            .collect()
    }

    /// Build the initial customer population.
    pub fn build_population(&self, provider: &mut VariateProvider) -> CustomerPool {
        CustomerPool::build(self.num_customers, provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_weights_cover_the_unit_interval() {
        let total: f64 = default_catalog().iter().map(|s| s.choice_weight).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn default_horizon_is_two_months_of_minutes() {
        let params = ScenarioParams::default();
        assert_eq!(params.horizon(), 2 * 60 * 24 * 31);
    }

    #[test]
    fn build_population_matches_configured_size() {
        let params = ScenarioParams::default()
            .with_num_customers(123)
            .with_seed(5);
        let mut provider = params.build_provider();
        let pool = params.build_population(&mut provider);
        assert_eq!(pool.len(), 123);
        let services = params.build_services();
        assert_eq!(services.len(), 6);
        for customer in pool.iter() {
            assert!(customer.chosen_service < services.len());
        }
    }
}
