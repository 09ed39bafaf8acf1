//! Balanced ordered index of active reservations, keyed by user id.

mod node;
pub mod tree;

pub use tree::ReservationIndex;
