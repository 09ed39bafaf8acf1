//! Core type definitions used across the GatorTicket workspace.

pub mod id;

pub use id::{SeatId, UserId};

/// Waitlist priority. Higher values are served first.
pub type Priority = i64;
