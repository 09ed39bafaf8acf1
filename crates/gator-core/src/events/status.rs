//! Individual status lines and their wire wording.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Priority, SeatId, UserId};

/// One line of engine output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StatusLine {
    /// Seats `1..=count` were created by `Initialize`.
    SeatsInitialized {
        /// Number of seats created.
        count: i64,
    },
    /// Seat count passed to `Initialize` or `AddSeats` was not positive.
    InvalidSeatCount,
    /// Current pool and waitlist sizes.
    Availability {
        /// Seats in the free pool.
        available: usize,
        /// Entries in the waitlist.
        waitlisted: usize,
    },
    /// A user was assigned a seat, directly or by promotion.
    SeatReserved {
        /// The user now holding the seat.
        user: UserId,
        /// The assigned seat.
        seat: SeatId,
    },
    /// No seat was free; the user joined the waitlist.
    Waitlisted {
        /// The waitlisted user.
        user: UserId,
    },
    /// A reservation was canceled.
    Canceled {
        /// The user who gave up the seat.
        user: UserId,
    },
    /// Cancel for a user holding no seat.
    NoReservation {
        /// The requesting user.
        user: UserId,
    },
    /// Cancel naming a seat the user does not hold.
    SeatMismatch {
        /// The requesting user.
        user: UserId,
        /// The seat named in the request.
        seat: SeatId,
    },
    /// A user left the waitlist.
    LeftWaitlist {
        /// The removed user.
        user: UserId,
    },
    /// The user was not on the waitlist.
    NotWaitlisted {
        /// The requesting user.
        user: UserId,
    },
    /// A waitlisted user's priority changed.
    PriorityUpdated {
        /// The waitlisted user.
        user: UserId,
        /// The new priority.
        priority: Priority,
    },
    /// Priority update for a user not on the waitlist.
    PriorityNotUpdated {
        /// The requesting user.
        user: UserId,
    },
    /// New seats were appended by `AddSeats`.
    SeatsAdded {
        /// Number of seats added.
        count: i64,
    },
    /// `PrintReservations` found nothing to list.
    NoReservations,
    /// One `PrintReservations` entry.
    Reservation {
        /// The reserved seat.
        seat: SeatId,
        /// The holder.
        user: UserId,
    },
    /// Reservations and waitlist entries of a user range were dropped.
    RangeReleased {
        /// Lowest user id, inclusive.
        lo: UserId,
        /// Highest user id, inclusive.
        hi: UserId,
    },
    /// `ReleaseSeats` with `lo > hi`.
    InvalidRange,
    /// `Quit` acknowledgment.
    Terminated,
}

impl StatusLine {
    /// Whether this line reports a refused request (no state changed).
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::InvalidSeatCount
                | Self::InvalidRange
                | Self::NoReservation { .. }
                | Self::SeatMismatch { .. }
                | Self::NotWaitlisted { .. }
                | Self::PriorityNotUpdated { .. }
        )
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SeatsInitialized { count } => {
                write!(f, "{count} Seats are made available for reservation")
            }
            Self::InvalidSeatCount => {
                write!(f, "Invalid input. Please provide a valid number of seats.")
            }
            Self::Availability {
                available,
                waitlisted,
            } => write!(
                f,
                "Total Seats Available: {available}, Waitlist: {waitlisted}"
            ),
            Self::SeatReserved { user, seat } => write!(f, "User {user} reserved seat {seat}"),
            Self::Waitlisted { user } => write!(f, "User {user} is added to the waiting list"),
            Self::Canceled { user } => write!(f, "User {user} canceled their reservation"),
            Self::NoReservation { user } => write!(f, "User {user} has no reservation to cancel"),
            Self::SeatMismatch { user, seat } => write!(
                f,
                "User {user} has no reservation for seat {seat} to cancel"
            ),
            Self::LeftWaitlist { user } => {
                write!(f, "User {user} is removed from the waiting list")
            }
            Self::NotWaitlisted { user } => write!(f, "User {user} is not in waitlist"),
            Self::PriorityUpdated { user, priority } => {
                write!(f, "User {user} priority has been updated to {priority}")
            }
            Self::PriorityNotUpdated { user } => write!(f, "User {user} priority is not updated"),
            Self::SeatsAdded { count } => write!(
                f,
                "Additional {count} Seats are made available for reservation"
            ),
            Self::NoReservations => write!(f, "No reservations to print."),
            Self::Reservation { seat, user } => write!(f, "Seat {seat}, User {user}"),
            Self::RangeReleased { lo, hi } => write!(
                f,
                "Reservations of the Users in the range [{lo}, {hi}] are released"
            ),
            Self::InvalidRange => {
                write!(f, "Invalid input. Please provide a valid range of users.")
            }
            Self::Terminated => write!(f, "Program Terminated!!"),
        }
    }
}
