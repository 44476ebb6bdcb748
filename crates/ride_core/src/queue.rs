//! FIFO waiting line in front of the ride. Unbounded: it only empties as fast
//! as cycles board.

use std::collections::VecDeque;

use bevy_ecs::prelude::Resource;

use crate::customer::Customer;

#[derive(Debug, Default, Resource)]
pub struct RideQueue {
    waiting: VecDeque<Customer>,
}

impl RideQueue {
    pub fn push_back(&mut self, customer: Customer) {
        self.waiting.push_back(customer);
    }

    /// Remove up to `capacity` customers from the head, in arrival order, and
    /// mark them as boarded at `now_ms`.
    pub fn board(&mut self, capacity: usize, now_ms: u64, cycle_duration_ms: u64) -> Vec<Customer> {
        let count = capacity.min(self.waiting.len());
        self.waiting
            .drain(..count)
            .map(|mut customer| {
                customer.board(now_ms, cycle_duration_ms);
                customer
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Customer> {
        self.waiting.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue_with(n: u64) -> RideQueue {
        let mut queue = RideQueue::default();
        for id in 1..=n {
            queue.push_back(Customer::new(id, id * 1_000));
        }
        queue
    }

    #[test]
    fn board_takes_head_in_arrival_order() {
        let mut queue = queue_with(5);
        let boarded = queue.board(3, 10_000, 276_000);
        let ids: Vec<u64> = boarded.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(boarded
            .iter()
            .all(|c| c.service_start_ms == Some(10_000) && c.service_end_ms == Some(286_000)));
        assert_eq!(queue.iter().map(|c| c.id).collect::<Vec<_>>(), vec![4, 5]);
    }

    #[test]
    fn board_with_short_queue_takes_everyone() {
        let mut queue = queue_with(2);
        assert_eq!(queue.board(20, 5_000, 276_000).len(), 2);
        assert!(queue.is_empty());
        assert!(queue.board(20, 281_000, 276_000).is_empty());
    }
}
