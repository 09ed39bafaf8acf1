//! Integration tests for seat allocation, waitlist promotion, and range release.

mod helpers;

use helpers::{engine_with_seats, reservations, reserve_all, seat, user};

#[test]
fn test_initial_reservations_and_waitlist() {
    let mut engine = engine_with_seats(2);
    let out = reserve_all(&mut engine, &[(1, 1), (2, 1), (3, 2)]);
    assert_eq!(
        out,
        vec![
            "User 1 reserved seat 1",
            "User 2 reserved seat 2",
            "User 3 is added to the waiting list",
        ]
    );
    engine.audit().expect("consistent");
}

#[test]
fn test_cancel_hands_seat_to_sole_waiter() {
    let mut engine = engine_with_seats(2);
    reserve_all(&mut engine, &[(1, 1), (2, 1), (3, 2)]);

    assert_eq!(
        engine.cancel(seat(1), user(1)).to_string(),
        "User 1 canceled their reservation\nUser 3 reserved seat 1"
    );
    assert_eq!(reservations(&engine), vec![(1, 3), (2, 2)]);
    assert_eq!(engine.waitlisted(), 0);
}

#[test]
fn test_raised_priority_is_promoted_first() {
    let mut engine = engine_with_seats(1);
    reserve_all(&mut engine, &[(1, 1), (3, 2)]);
    assert_eq!(
        engine.update_priority(user(3), 5).to_string(),
        "User 3 priority has been updated to 5"
    );
    reserve_all(&mut engine, &[(4, 4)]);

    assert_eq!(
        engine.cancel(seat(1), user(1)).to_string(),
        "User 1 canceled their reservation\nUser 3 reserved seat 1"
    );
    assert!(engine.is_waitlisted(user(4)));
}

#[test]
fn test_waitlist_promotes_by_priority_then_arrival() {
    let mut engine = engine_with_seats(1);
    reserve_all(&mut engine, &[(100, 0), (1, 2), (2, 5), (3, 2), (4, 5), (5, 1)]);

    let mut promoted = Vec::new();
    let mut holder = user(100);
    for _ in 0..5 {
        let report = engine.cancel(seat(1), holder);
        assert_eq!(report.len(), 2, "seat 1 should be reassigned");
        let next = reservations(&engine)[0].1;
        promoted.push(next);
        holder = user(next);
    }
    assert_eq!(promoted, vec![2, 4, 1, 3, 5]);
}

#[test]
fn test_round_trip_returns_seat_to_pool() {
    let mut engine = engine_with_seats(3);
    let before = engine.available();
    reserve_all(&mut engine, &[(7, 0)]);
    assert_eq!(engine.available(), before - 1);

    engine.cancel(seat(1), user(7));
    assert_eq!(engine.available(), before);
    assert_eq!(
        engine.status().to_string(),
        "Total Seats Available: 3, Waitlist: 0"
    );
}

#[test]
fn test_cancel_already_canceled_changes_nothing() {
    let mut engine = engine_with_seats(1);
    reserve_all(&mut engine, &[(1, 0)]);
    engine.cancel(seat(1), user(1));
    let before = engine.snapshot();

    assert_eq!(
        engine.cancel(seat(1), user(1)).to_string(),
        "User 1 has no reservation to cancel"
    );
    assert_eq!(engine.snapshot(), before);
}

#[test]
fn test_release_reassigns_in_release_order_not_seat_order() {
    let mut engine = engine_with_seats(2);
    // User 2 gets seat 1, user 1 gets seat 2.
    reserve_all(&mut engine, &[(2, 0), (1, 0), (10, 3), (11, 2)]);

    assert_eq!(
        engine.release_seats(user(1), user(2)).to_string(),
        "Reservations of the Users in the range [1, 2] are released\n\
         User 10 reserved seat 2\n\
         User 11 reserved seat 1"
    );
    assert_eq!(reservations(&engine), vec![(1, 11), (2, 10)]);
    engine.audit().expect("consistent");
}

#[test]
fn test_release_without_waiters_frees_seats() {
    let mut engine = engine_with_seats(4);
    reserve_all(&mut engine, &[(1, 0), (2, 0), (3, 0), (4, 0)]);

    assert_eq!(
        engine.release_seats(user(2), user(3)).to_string(),
        "Reservations of the Users in the range [2, 3] are released"
    );
    assert_eq!(engine.available(), 2);
    assert_eq!(
        reserve_all(&mut engine, &[(9, 0)]),
        vec!["User 9 reserved seat 2"]
    );
}

#[test]
fn test_add_seats_serves_waitlist_then_pool() {
    let mut engine = engine_with_seats(1);
    reserve_all(&mut engine, &[(1, 0), (2, 1), (3, 3)]);

    assert_eq!(
        engine.add_seats(3).to_string(),
        "Additional 3 Seats are made available for reservation\n\
         User 3 reserved seat 2\n\
         User 2 reserved seat 3"
    );
    assert_eq!(
        engine.status().to_string(),
        "Total Seats Available: 1, Waitlist: 0"
    );
    assert_eq!(
        reserve_all(&mut engine, &[(4, 0)]),
        vec!["User 4 reserved seat 4"]
    );
}

#[test]
fn test_errors_leave_engine_usable() {
    let mut engine = engine_with_seats(1);
    let before = engine.snapshot();

    assert!(engine.initialize(-1).is_rejection());
    assert!(engine.add_seats(0).is_rejection());
    assert!(engine.release_seats(user(5), user(1)).is_rejection());
    assert!(engine.exit_waitlist(user(5)).is_rejection());
    assert!(engine.update_priority(user(5), 1).is_rejection());
    assert!(engine.cancel(seat(1), user(5)).is_rejection());
    assert_eq!(engine.snapshot(), before);

    assert_eq!(
        reserve_all(&mut engine, &[(5, 0)]),
        vec!["User 5 reserved seat 1"]
    );
}

#[test]
fn test_seat_disjointness_under_churn() {
    let mut engine = engine_with_seats(20);
    for round in 0..30_i64 {
        for u in 0..25 {
            engine.reserve(user(round * 100 + u), (u * 7) % 5);
        }
        engine.release_seats(user(round * 100), user(round * 100 + 11));
        if round % 4 == 0 {
            engine.add_seats(2);
        }
        engine.audit().expect("consistent");

        let snapshot = engine.snapshot();
        assert_eq!(
            (snapshot.available + snapshot.reserved) as i64,
            snapshot.total_seats
        );
    }
}

#[test]
fn test_oversized_seat_counts_are_rejected_without_state_change() {
    let mut engine = gator_engine::ReservationEngine::new();
    assert_eq!(
        engine.initialize(i64::MAX).to_string(),
        "Invalid input. Please provide a valid number of seats."
    );
    assert_eq!(
        engine.initialize(100_000_000_000).to_string(),
        "Invalid input. Please provide a valid number of seats."
    );

    engine.initialize(2);
    reserve_all(&mut engine, &[(1, 0), (2, 0), (3, 4)]);
    let before = engine.snapshot();
    assert_eq!(
        engine.add_seats(i64::MAX).to_string(),
        "Invalid input. Please provide a valid number of seats."
    );
    let limit = engine.seat_limit();
    assert_eq!(
        engine.add_seats(limit).to_string(),
        "Invalid input. Please provide a valid number of seats."
    );
    assert_eq!(engine.snapshot(), before);
    assert!(engine.is_waitlisted(user(3)));
    engine.audit().expect("consistent");
}
