//! Waitlist entries and their service order.

use std::cmp::{Ordering, Reverse};

use serde::{Deserialize, Serialize};

use gator_core::types::{Priority, UserId};

/// A user waiting for a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistEntry {
    /// The waiting user.
    pub user: UserId,
    /// Caller-supplied priority; higher is served first.
    pub priority: Priority,
    /// Enqueue sequence number; earlier arrivals win priority ties.
    pub arrival: u64,
}

impl WaitlistEntry {
    /// Heap key: the smallest key is served next.
    fn rank(&self) -> (Reverse<Priority>, u64, UserId) {
        (Reverse(self.priority), self.arrival, self.user)
    }
}

impl Ord for WaitlistEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for WaitlistEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
