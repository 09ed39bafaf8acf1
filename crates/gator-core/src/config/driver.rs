//! Batch driver configuration.

use serde::{Deserialize, Serialize};

/// Default ceiling on the number of seats an engine may create.
pub const DEFAULT_MAX_SEATS: i64 = 10_000_000;

/// Settings for executing command scripts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Appended to the input file stem to name the output file.
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,
    /// Abort the run on the first malformed line instead of skipping it.
    #[serde(default)]
    pub stop_on_parse_error: bool,
    /// Audit engine invariants after every command.
    #[serde(default)]
    pub verify_invariants: bool,
    /// Also print the transcript to stdout once the run finishes.
    #[serde(default)]
    pub echo: bool,
    /// Highest total seat count `Initialize` and `AddSeats` may reach.
    #[serde(default = "default_max_seats")]
    pub max_seats: i64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            output_suffix: default_output_suffix(),
            stop_on_parse_error: false,
            verify_invariants: false,
            echo: false,
            max_seats: default_max_seats(),
        }
    }
}

fn default_output_suffix() -> String {
    "_output_file".to_string()
}

fn default_max_seats() -> i64 {
    DEFAULT_MAX_SEATS
}
