//! Shared test helpers for integration tests.

#![allow(dead_code)]

use gator_core::types::{SeatId, UserId};
use gator_engine::ReservationEngine;

/// Engine with `seats` seats, already initialized.
pub fn engine_with_seats(seats: i64) -> ReservationEngine {
    let mut engine = ReservationEngine::new();
    engine.initialize(seats);
    engine
}

/// Reserve for each `(user, priority)` pair, returning each report's text.
pub fn reserve_all(engine: &mut ReservationEngine, requests: &[(i64, i64)]) -> Vec<String> {
    requests
        .iter()
        .map(|&(user, priority)| engine.reserve(UserId(user), priority).to_string())
        .collect()
}

/// `(seat, user)` pairs currently reserved, in seat order.
pub fn reservations(engine: &ReservationEngine) -> Vec<(i64, i64)> {
    engine
        .print_reservations()
        .lines()
        .iter()
        .filter_map(|line| match line {
            gator_core::events::StatusLine::Reservation { seat, user } => {
                Some((seat.get(), user.get()))
            }
            _ => None,
        })
        .collect()
}

/// Shorthand for a seat id.
pub fn seat(raw: i64) -> SeatId {
    SeatId(raw)
}

/// Shorthand for a user id.
pub fn user(raw: i64) -> UserId {
    UserId(raw)
}
