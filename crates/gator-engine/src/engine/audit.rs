//! Consistency audit across the pool, waitlist, and reservation index.
//!
//! Detects drift between the three structures: a seat that is both free
//! and reserved, a seat that is neither, or a user that holds a seat while
//! still waiting for one.

use std::collections::BTreeSet;

use tracing::error;

use gator_core::error::AppError;
use gator_core::result::AppResult;

use super::ReservationEngine;

impl ReservationEngine {
    /// Verify every allocation invariant, returning the first violation found.
    pub fn audit(&self) -> AppResult<()> {
        self.audit_inner().inspect_err(|e| {
            error!(error = %e, "Reservation engine invariant violated");
        })
    }

    fn audit_inner(&self) -> AppResult<()> {
        self.index.validate()?;

        let in_range = |raw: i64| (1..=self.total_seats).contains(&raw);

        let mut free = BTreeSet::new();
        for seat in self.pool.iter() {
            if !in_range(seat.get()) {
                return Err(AppError::internal(format!(
                    "free seat {seat} was never created"
                )));
            }
            if !free.insert(seat) {
                return Err(AppError::internal(format!("seat {seat} is free twice")));
            }
        }

        let mut held = BTreeSet::new();
        for (user, seat) in self.index.iter_by_user() {
            if !in_range(seat.get()) {
                return Err(AppError::internal(format!(
                    "user {user} holds seat {seat} which was never created"
                )));
            }
            if !held.insert(seat) {
                return Err(AppError::internal(format!(
                    "seat {seat} is reserved by more than one user"
                )));
            }
            if free.contains(&seat) {
                return Err(AppError::internal(format!(
                    "seat {seat} is both free and reserved by user {user}"
                )));
            }
        }

        let accounted = (free.len() + held.len()) as i64;
        if accounted != self.total_seats {
            return Err(AppError::internal(format!(
                "{accounted} seats accounted for out of {}",
                self.total_seats
            )));
        }

        let mut waiting = BTreeSet::new();
        for entry in self.waitlist.iter() {
            if !waiting.insert(entry.user) {
                return Err(AppError::internal(format!(
                    "user {} is waitlisted twice",
                    entry.user
                )));
            }
            if self.index.contains(entry.user) {
                return Err(AppError::internal(format!(
                    "user {} holds a seat while waitlisted",
                    entry.user
                )));
            }
        }

        if !self.pool.is_empty() && !self.waitlist.is_empty() {
            return Err(AppError::internal(format!(
                "{} seats are free while {} users wait",
                self.pool.len(),
                self.waitlist.len()
            )));
        }

        Ok(())
    }
}
