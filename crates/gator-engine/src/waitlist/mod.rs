//! Priority waitlist of users waiting for a seat.

pub mod entry;
pub mod queue;

pub use entry::WaitlistEntry;
pub use queue::WaitQueue;
