//! # gator-engine
//!
//! Seat allocation engine for GatorTicket.
//!
//! ## Modules
//!
//! - `seat`: min-heap pool of free seats
//! - `waitlist`: priority waitlist with arbitrary removal and re-keying
//! - `index`: red-black tree of active reservations keyed by user
//! - `engine`: the reservation engine orchestrating the three
//! - `script`: command-script parsing and batch execution

pub mod engine;
mod heap;
pub mod index;
pub mod script;
pub mod seat;
pub mod waitlist;

pub use engine::{PoolSnapshot, ReservationEngine};
pub use index::ReservationIndex;
pub use script::{Command, ScriptError, ScriptRunner, Transcript};
pub use seat::SeatPool;
pub use waitlist::{WaitQueue, WaitlistEntry};
