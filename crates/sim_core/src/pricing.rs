//! Cost, revenue, and profit for a run.

use serde::Serialize;

use crate::services::ServiceConfig;

/// Aggregate money figures over the whole horizon.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FinancialSummary {
    /// What we pay the streaming services: sum over the catalog of
    /// `monthly_cost * capacity`, times the number of months.
    pub total_cost: f64,
    /// What subscribers pay us: `num_customers * monthly_fee * num_months`.
    pub revenue: f64,
    pub profit: f64,
}

pub fn financial_summary(
    catalog: &[ServiceConfig],
    num_customers: usize,
    monthly_fee: f64,
    num_months: u64,
) -> FinancialSummary {
    let total_cost: f64 = catalog
        .iter()
        .map(|service| service.monthly_cost * service.capacity as f64)
        .sum::<f64>()
        * num_months as f64;
    let revenue = num_customers as f64 * monthly_fee * num_months as f64;
    FinancialSummary {
        total_cost,
        revenue,
        profit: revenue - total_cost,
    }
}
