//! Periodic batch server: the ride departs every `cycle_duration_ms` on a fixed
//! timetable, carrying whoever is at the head of the queue (up to capacity).
//!
//! The server never waits for the ride to fill. Cycle `k` starts at exactly
//! `k * cycle_duration_ms`, and an empty queue just means an empty departure.

use std::collections::VecDeque;

use bevy_ecs::prelude::Resource;

use crate::customer::{Batch, Customer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServerState {
    /// No batch in flight.
    #[default]
    WaitingNextCycle,
    /// At least one batch is riding.
    InService,
}

#[derive(Debug, Resource)]
pub struct BatchServer {
    capacity: usize,
    cycle_duration_ms: u64,
    state: ServerState,
    in_flight: VecDeque<Batch>,
    cycles_started: u64,
    non_empty_cycles: u64,
    boarded_total: u64,
}

impl BatchServer {
    pub fn new(capacity: usize, cycle_duration_ms: u64) -> Self {
        Self {
            capacity,
            cycle_duration_ms,
            state: ServerState::default(),
            in_flight: VecDeque::new(),
            cycles_started: 0,
            non_empty_cycles: 0,
            boarded_total: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn cycle_duration_ms(&self) -> u64 {
        self.cycle_duration_ms
    }

    pub fn state(&self) -> ServerState {
        self.state
    }

    /// Timetabled start of cycle `index`.
    pub fn cycle_start_time(&self, index: u64) -> u64 {
        index * self.cycle_duration_ms
    }

    /// Start cycle `index` at `now_ms` with the customers just boarded.
    /// Returns the time at which the batch completes.
    pub fn start_cycle(&mut self, index: u64, now_ms: u64, customers: Vec<Customer>) -> u64 {
        let end_ms = now_ms + self.cycle_duration_ms;
        self.cycles_started += 1;
        if !customers.is_empty() {
            self.non_empty_cycles += 1;
        }
        self.boarded_total += customers.len() as u64;
        self.in_flight.push_back(Batch {
            cycle: index,
            start_ms: now_ms,
            end_ms,
            customers,
        });
        self.state = ServerState::InService;
        end_ms
    }

    /// Remove the batch of cycle `index` from flight.
    pub fn complete_cycle(&mut self, index: u64) -> Option<Batch> {
        let position = self.in_flight.iter().position(|b| b.cycle == index)?;
        let batch = self.in_flight.remove(position);
        if self.in_flight.is_empty() {
            self.state = ServerState::WaitingNextCycle;
        }
        batch
    }

    pub fn in_flight(&self) -> impl Iterator<Item = &Batch> {
        self.in_flight.iter()
    }

    pub fn cycles_started(&self) -> u64 {
        self.cycles_started
    }

    pub fn non_empty_cycles(&self) -> u64 {
        self.non_empty_cycles
    }

    pub fn boarded_total(&self) -> u64 {
        self.boarded_total
    }
}
