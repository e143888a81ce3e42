//! Run telemetry: the transaction log recorded after the warm-up period.

use serde::Serialize;

use crate::customers::CustomerId;

/// One completed stay at a service, recorded at release time.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionRecord {
    pub customer_id: CustomerId,
    pub service_name: String,
    /// Minute the customer arrived at the service.
    pub arrival_time: u64,
    /// Minute the customer departed.
    pub depart_time: u64,
    /// Minutes spent actively using the service.
    pub service_minutes: u64,
    /// Minutes spent in the overflow queue before this stay.
    pub queue_minutes: u64,
}

/// Accumulated telemetry for one run.
#[derive(Debug, Default)]
pub struct SimTelemetry {
    /// Transactions recorded after the warm-up period, in release order.
    pub transactions: Vec<TransactionRecord>,
    /// Releases suppressed because they fell inside the warm-up period.
    pub suppressed_releases: u64,
}

impl SimTelemetry {
    pub fn record(&mut self, record: TransactionRecord) {
        self.transactions.push(record);
    }

    pub fn record_suppressed(&mut self) {
        self.suppressed_releases += 1;
    }
}
