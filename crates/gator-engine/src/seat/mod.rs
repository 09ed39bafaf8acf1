//! Free seat management.

pub mod pool;

pub use pool::SeatPool;
