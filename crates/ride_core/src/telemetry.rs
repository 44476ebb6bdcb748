//! Telemetry: queue-length samples, cycle records, and completed customers.
//!
//! Wait and sojourn times are accumulated incrementally as batches complete;
//! [crate::stats] turns the collected data into a [crate::stats::SimulationResult].

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::customer::Customer;

/// Queue length right after an arrival or a cycle start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueSample {
    pub timestamp_ms: u64,
    pub length: usize,
}

/// One departure of the ride.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleRecord {
    pub cycle: u64,
    pub start_ms: u64,
    pub boarded: usize,
}

/// One customer whose ride has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedCustomerRecord {
    pub customer_id: u64,
    pub cycle: u64,
    pub arrival_ms: u64,
    pub service_start_ms: u64,
    pub service_end_ms: u64,
}

impl CompletedCustomerRecord {
    /// Time from arrival to boarding.
    pub fn wait_ms(&self) -> u64 {
        self.service_start_ms.saturating_sub(self.arrival_ms)
    }

    /// Time from arrival to the end of the ride.
    pub fn sojourn_ms(&self) -> u64 {
        self.service_end_ms.saturating_sub(self.arrival_ms)
    }
}

#[derive(Debug, Default, Resource)]
pub struct RideTelemetry {
    pub queue_samples: Vec<QueueSample>,
    pub cycles: Vec<CycleRecord>,
    pub completed: Vec<CompletedCustomerRecord>,
    wait_sum_ms: u128,
    wait_min_ms: Option<u64>,
    wait_max_ms: u64,
    sojourn_sum_ms: u128,
    sojourn_max_ms: u64,
}

impl RideTelemetry {
    pub fn record_queue_sample(&mut self, timestamp_ms: u64, length: usize) {
        self.queue_samples.push(QueueSample {
            timestamp_ms,
            length,
        });
    }

    pub fn record_cycle(&mut self, cycle: u64, start_ms: u64, boarded: usize) {
        self.cycles.push(CycleRecord {
            cycle,
            start_ms,
            boarded,
        });
    }

    /// Finalize a customer whose batch has completed. Customers that never
    /// boarded are ignored.
    pub fn record_completion(&mut self, customer: &Customer, cycle: u64) {
        let (Some(start), Some(end)) = (customer.service_start_ms, customer.service_end_ms) else {
            return;
        };
        let record = CompletedCustomerRecord {
            customer_id: customer.id,
            cycle,
            arrival_ms: customer.arrival_ms,
            service_start_ms: start,
            service_end_ms: end,
        };
        let wait = record.wait_ms();
        let sojourn = record.sojourn_ms();
        self.wait_sum_ms += wait as u128;
        self.wait_max_ms = self.wait_max_ms.max(wait);
        self.wait_min_ms = Some(self.wait_min_ms.map_or(wait, |min| min.min(wait)));
        self.sojourn_sum_ms += sojourn as u128;
        self.sojourn_max_ms = self.sojourn_max_ms.max(sojourn);
        self.completed.push(record);
    }

    pub fn served_count(&self) -> usize {
        self.completed.len()
    }

    pub fn mean_wait_ms(&self) -> f64 {
        mean_of(self.wait_sum_ms, self.completed.len())
    }

    pub fn min_wait_ms(&self) -> u64 {
        self.wait_min_ms.unwrap_or(0)
    }

    pub fn max_wait_ms(&self) -> u64 {
        self.wait_max_ms
    }

    pub fn mean_sojourn_ms(&self) -> f64 {
        mean_of(self.sojourn_sum_ms, self.completed.len())
    }

    pub fn max_sojourn_ms(&self) -> u64 {
        self.sojourn_max_ms
    }
}

fn mean_of(sum: u128, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}
