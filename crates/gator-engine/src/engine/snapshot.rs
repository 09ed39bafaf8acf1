//! Point-in-time counts of the seat allocation.

use serde::{Deserialize, Serialize};

/// Snapshot of the seat pool, reservations, and waitlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    /// Highest seat number created so far.
    pub total_seats: i64,
    /// Seats in the free pool.
    pub available: usize,
    /// Seats held by users.
    pub reserved: usize,
    /// Users waiting for a seat.
    pub waitlisted: usize,
}
