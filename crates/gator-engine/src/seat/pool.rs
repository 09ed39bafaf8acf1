//! Min-heap of free seat numbers.

use gator_core::types::SeatId;

use crate::heap;

/// Pool of created, currently unassigned seats.
///
/// The smallest free seat is always handed out first.
#[derive(Debug, Clone, Default)]
pub struct SeatPool {
    seats: Vec<SeatId>,
}

impl SeatPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pool holding seats `1..=count`.
    pub fn with_range(count: i64) -> Self {
        // Ascending input is already a valid min-heap.
        Self {
            seats: (1..=count).map(SeatId).collect(),
        }
    }

    /// Return a seat to the pool.
    pub fn insert(&mut self, seat: SeatId) {
        debug_assert!(!self.contains(seat), "seat {seat} is already free");
        self.seats.push(seat);
        let last = self.seats.len() - 1;
        heap::sift_up(&mut self.seats, last);
    }

    /// Remove and return the smallest free seat.
    pub fn extract_min(&mut self) -> Option<SeatId> {
        heap::remove_at(&mut self.seats, 0)
    }

    /// The smallest free seat, without removing it.
    pub fn peek_min(&self) -> Option<SeatId> {
        self.seats.first().copied()
    }

    /// Number of free seats.
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    /// Whether no seat is free.
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Whether `seat` is currently free. Linear scan.
    pub fn contains(&self, seat: SeatId) -> bool {
        self.seats.contains(&seat)
    }

    /// Free seats in heap order (not sorted).
    pub fn iter(&self) -> impl Iterator<Item = SeatId> + '_ {
        self.seats.iter().copied()
    }

    /// Drop every free seat.
    pub fn clear(&mut self) {
        self.seats.clear();
    }
}
