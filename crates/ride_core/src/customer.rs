use serde::{Deserialize, Serialize};

/// A visitor, from arrival at the queue until the end of their ride.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Sequence number, starting at 1 in arrival order.
    pub id: u64,
    pub arrival_ms: u64,
    /// Set when the customer boards.
    pub service_start_ms: Option<u64>,
    /// Set together with `service_start_ms`: start plus one cycle.
    pub service_end_ms: Option<u64>,
}

impl Customer {
    pub fn new(id: u64, arrival_ms: u64) -> Self {
        Self {
            id,
            arrival_ms,
            service_start_ms: None,
            service_end_ms: None,
        }
    }

    pub fn board(&mut self, now_ms: u64, cycle_duration_ms: u64) {
        debug_assert!(now_ms >= self.arrival_ms, "boarding before arrival");
        self.service_start_ms = Some(now_ms);
        self.service_end_ms = Some(now_ms + cycle_duration_ms);
    }

    pub fn wait_ms(&self) -> Option<u64> {
        self.service_start_ms
            .map(|start| start.saturating_sub(self.arrival_ms))
    }

    pub fn sojourn_ms(&self) -> Option<u64> {
        self.service_end_ms
            .map(|end| end.saturating_sub(self.arrival_ms))
    }
}

/// Customers boarded together for one cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub cycle: u64,
    pub start_ms: u64,
    pub end_ms: u64,
    pub customers: Vec<Customer>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}
