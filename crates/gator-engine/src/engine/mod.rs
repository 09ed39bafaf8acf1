//! The reservation engine: seat pool, waitlist, and reservation index
//! orchestrated so every seat is either free or held by exactly one user.

pub mod audit;
pub mod snapshot;

use tracing::{debug, info, warn};

use gator_core::config::DEFAULT_MAX_SEATS;
use gator_core::events::{StatusLine, StatusReport};
use gator_core::types::{Priority, SeatId, UserId};

use crate::index::ReservationIndex;
use crate::seat::SeatPool;
use crate::waitlist::WaitQueue;

pub use snapshot::PoolSnapshot;

/// Allocates seats to users and promotes waitlisted users as seats free up.
///
/// Every operation runs to completion, including all promotions, and
/// reports what happened as a [`StatusReport`]. Rejected requests leave
/// the engine untouched.
///
/// The total seat count never exceeds the seat limit; seat counts that
/// would pass it are rejected like non-positive ones.
#[derive(Debug, Clone)]
pub struct ReservationEngine {
    /// Highest seat number created so far.
    total_seats: i64,
    /// Ceiling on `total_seats`.
    seat_limit: i64,
    pool: SeatPool,
    waitlist: WaitQueue,
    index: ReservationIndex,
}

impl ReservationEngine {
    /// Create an engine with no seats and the default seat limit.
    pub fn new() -> Self {
        Self::with_seat_limit(DEFAULT_MAX_SEATS)
    }

    /// Create an engine with no seats that will never hold more than `seat_limit`.
    pub fn with_seat_limit(seat_limit: i64) -> Self {
        Self {
            total_seats: 0,
            seat_limit,
            pool: SeatPool::new(),
            waitlist: WaitQueue::new(),
            index: ReservationIndex::new(),
        }
    }

    /// Create seats `1..=seat_count`.
    ///
    /// Calling this again resets the engine: every reservation and waitlist
    /// entry is dropped before the new seats are created.
    pub fn initialize(&mut self, seat_count: i64) -> StatusReport {
        if seat_count <= 0 || seat_count > self.seat_limit {
            warn!(seat_count, seat_limit = self.seat_limit, "Rejected seat count");
            return StatusLine::InvalidSeatCount.into();
        }

        if self.total_seats > 0 || !self.waitlist.is_empty() {
            warn!(
                previous_seats = self.total_seats,
                reserved = self.index.len(),
                waitlisted = self.waitlist.len(),
                "Re-initializing, dropping existing reservations and waitlist"
            );
        }

        self.index.clear();
        self.waitlist.clear();
        self.pool = SeatPool::with_range(seat_count);
        self.total_seats = seat_count;
        info!(seat_count, "Seats initialized");

        StatusLine::SeatsInitialized { count: seat_count }.into()
    }

    /// Report the number of free seats and waiting users.
    pub fn status(&self) -> StatusReport {
        StatusLine::Availability {
            available: self.pool.len(),
            waitlisted: self.waitlist.len(),
        }
        .into()
    }

    /// Give `user` the lowest free seat, or waitlist them at `priority`.
    pub fn reserve(&mut self, user: UserId, priority: Priority) -> StatusReport {
        if let Some(seat) = self.index.find(user) {
            debug!(user = %user, seat = %seat, "User already holds a seat");
            return StatusLine::SeatReserved { user, seat }.into();
        }
        if self.waitlist.contains(user) {
            debug!(user = %user, "User is already waitlisted");
            return StatusLine::Waitlisted { user }.into();
        }

        match self.pool.extract_min() {
            Some(seat) => {
                self.index.insert(user, seat);
                debug!(user = %user, seat = %seat, "Seat reserved");
                StatusLine::SeatReserved { user, seat }.into()
            }
            None => {
                let entry = self.waitlist.enqueue(user, priority);
                debug!(
                    user = %user,
                    priority,
                    arrival = entry.arrival,
                    waitlisted = self.waitlist.len(),
                    "No free seat, user waitlisted"
                );
                StatusLine::Waitlisted { user }.into()
            }
        }
    }

    /// Cancel the reservation of `user` on `seat`.
    ///
    /// The vacated seat goes straight to the next waitlisted user when
    /// there is one; otherwise it returns to the pool.
    pub fn cancel(&mut self, seat: SeatId, user: UserId) -> StatusReport {
        match self.index.find(user) {
            None => {
                debug!(user = %user, "Cancel without reservation");
                StatusLine::NoReservation { user }.into()
            }
            Some(held) if held != seat => {
                debug!(user = %user, seat = %seat, held = %held, "Cancel for a seat not held");
                StatusLine::SeatMismatch { user, seat }.into()
            }
            Some(_) => {
                self.index.delete(user);
                debug!(user = %user, seat = %seat, "Reservation canceled");
                let mut report = StatusReport::single(StatusLine::Canceled { user });
                self.fill_seat(seat, &mut report);
                report
            }
        }
    }

    /// Take `user` off the waitlist.
    pub fn exit_waitlist(&mut self, user: UserId) -> StatusReport {
        match self.waitlist.remove(user) {
            Some(_) => {
                debug!(user = %user, "User left the waitlist");
                StatusLine::LeftWaitlist { user }.into()
            }
            None => StatusLine::NotWaitlisted { user }.into(),
        }
    }

    /// Change the waitlist priority of `user`; their arrival order is kept.
    pub fn update_priority(&mut self, user: UserId, priority: Priority) -> StatusReport {
        if self.waitlist.update_priority(user, priority) {
            debug!(user = %user, priority, "Waitlist priority updated");
            StatusLine::PriorityUpdated { user, priority }.into()
        } else {
            StatusLine::PriorityNotUpdated { user }.into()
        }
    }

    /// Create `count` new seats numbered after the current highest seat.
    ///
    /// New seats are handed to waitlisted users in ascending seat order;
    /// the rest join the pool.
    pub fn add_seats(&mut self, count: i64) -> StatusReport {
        let Some(new_total) = (count > 0)
            .then(|| self.total_seats.checked_add(count))
            .flatten()
            .filter(|&total| total <= self.seat_limit)
        else {
            warn!(
                count,
                total_seats = self.total_seats,
                seat_limit = self.seat_limit,
                "Rejected seat addition"
            );
            return StatusLine::InvalidSeatCount.into();
        };

        let first = self.total_seats + 1;
        self.total_seats = new_total;
        info!(count, total_seats = new_total, "Seats added");

        let mut report = StatusReport::single(StatusLine::SeatsAdded { count });
        for raw in first..=new_total {
            self.fill_seat(SeatId(raw), &mut report);
        }
        report
    }

    /// List every reservation in ascending seat order.
    pub fn print_reservations(&self) -> StatusReport {
        if self.index.is_empty() {
            return StatusLine::NoReservations.into();
        }
        self.index
            .ordered_by_seat()
            .into_iter()
            .map(|(seat, user)| StatusLine::Reservation { seat, user })
            .collect()
    }

    /// Drop every reservation and waitlist entry of users in `lo..=hi`.
    ///
    /// Freed seats are then offered to the remaining waitlist in the order
    /// they were released, which is ascending original user id.
    pub fn release_seats(&mut self, lo: UserId, hi: UserId) -> StatusReport {
        if lo > hi {
            warn!(lo = %lo, hi = %hi, "Rejected inverted user range");
            return StatusLine::InvalidRange.into();
        }

        let mut released = Vec::new();
        for (user, seat) in self.index.range(lo, hi) {
            self.index.delete(user);
            released.push(seat);
        }
        let dropped = self.waitlist.remove_range(lo, hi);
        info!(
            lo = %lo,
            hi = %hi,
            seats = released.len(),
            waitlist_entries = dropped.len(),
            "User range released"
        );

        let mut report = StatusReport::single(StatusLine::RangeReleased { lo, hi });
        for seat in released {
            self.fill_seat(seat, &mut report);
        }
        report
    }

    /// Acknowledge termination. The engine itself stays usable.
    pub fn quit(&self) -> StatusReport {
        StatusLine::Terminated.into()
    }

    /// Highest seat number created so far.
    pub fn total_seats(&self) -> i64 {
        self.total_seats
    }

    /// Ceiling on the total seat count.
    pub fn seat_limit(&self) -> i64 {
        self.seat_limit
    }

    /// Number of free seats.
    pub fn available(&self) -> usize {
        self.pool.len()
    }

    /// Number of waiting users.
    pub fn waitlisted(&self) -> usize {
        self.waitlist.len()
    }

    /// Number of active reservations.
    pub fn reserved(&self) -> usize {
        self.index.len()
    }

    /// Seat held by `user`, if any.
    pub fn seat_of(&self, user: UserId) -> Option<SeatId> {
        self.index.find(user)
    }

    /// Whether `user` is on the waitlist.
    pub fn is_waitlisted(&self, user: UserId) -> bool {
        self.waitlist.contains(user)
    }

    /// Counts describing the current allocation.
    pub fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            total_seats: self.total_seats,
            available: self.pool.len(),
            reserved: self.index.len(),
            waitlisted: self.waitlist.len(),
        }
    }

    /// Promote the next waitlisted user into `seat`, or free it.
    fn fill_seat(&mut self, seat: SeatId, report: &mut StatusReport) {
        match self.waitlist.dequeue_next() {
            Some(next) => {
                let inserted = self.index.insert(next.user, seat);
                debug_assert!(inserted, "waitlisted user {} already held a seat", next.user);
                info!(
                    user = %next.user,
                    seat = %seat,
                    priority = next.priority,
                    "Waitlisted user promoted"
                );
                report.push(StatusLine::SeatReserved {
                    user: next.user,
                    seat,
                });
            }
            None => self.pool.insert(seat),
        }
    }
}

impl Default for ReservationEngine {
    fn default() -> Self {
        Self::new()
    }
}
