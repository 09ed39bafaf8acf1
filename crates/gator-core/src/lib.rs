//! # gator-core
//!
//! Core crate for GatorTicket. Contains typed identifiers, configuration
//! schemas, the status lines reported by the reservation engine, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other GatorTicket crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
