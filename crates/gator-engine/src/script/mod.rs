//! Batch command scripts: one `Name(args)` command per line.
//!
//! Each line parses into a [`Command`] that maps onto exactly one
//! [`ReservationEngine`](crate::engine::ReservationEngine) call. The
//! [`ScriptRunner`] applies a whole script and collects the status lines.

pub mod command;
pub mod error;
pub mod runner;

pub use command::{Command, ParsedLine, parse_script};
pub use error::ScriptError;
pub use runner::{ScriptRunner, Transcript, output_path_for};
