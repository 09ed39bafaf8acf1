//! Applies a command script to a reservation engine.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use gator_core::config::DriverConfig;
use gator_core::error::AppError;
use gator_core::events::StatusLine;
use gator_core::result::AppResult;

use super::command::parse_script;
use crate::engine::ReservationEngine;

/// Output of a script run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    /// Every status line, in order.
    pub lines: Vec<StatusLine>,
    /// Commands applied to the engine.
    pub commands_executed: usize,
    /// Malformed lines skipped.
    pub skipped: usize,
    /// Whether the script reached `Quit()`.
    pub terminated: bool,
}

impl fmt::Display for Transcript {
    /// Each status line followed by a newline, as written to the output file.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Executes scripts against an owned engine.
#[derive(Debug, Clone)]
pub struct ScriptRunner {
    engine: ReservationEngine,
    options: DriverConfig,
}

impl ScriptRunner {
    /// Create a runner around a fresh engine capped at `options.max_seats`.
    pub fn new(options: DriverConfig) -> Self {
        Self {
            engine: ReservationEngine::with_seat_limit(options.max_seats),
            options,
        }
    }

    /// The engine, for inspection after a run.
    pub fn engine(&self) -> &ReservationEngine {
        &self.engine
    }

    /// Apply every command of `script` in order, stopping after `Quit()`.
    ///
    /// Malformed lines are skipped with a warning unless
    /// `stop_on_parse_error` is set. With `verify_invariants`, the engine is
    /// audited after each command and the run fails on the first violation.
    pub fn run(&mut self, script: &str) -> AppResult<Transcript> {
        let mut transcript = Transcript::default();

        for parsed in parse_script(script) {
            let parsed = match parsed {
                Ok(parsed) => parsed,
                Err(e) if self.options.stop_on_parse_error => return Err(e.into()),
                Err(e) => {
                    warn!(error = %e, "Skipping malformed line");
                    transcript.skipped += 1;
                    continue;
                }
            };

            let report = parsed.command.apply(&mut self.engine);
            debug!(line = parsed.line, command = %parsed.command, status = %report, "Command applied");
            transcript.commands_executed += 1;

            if self.options.verify_invariants {
                self.engine.audit().map_err(|e| {
                    AppError::internal(format!(
                        "line {} ({}): {}",
                        parsed.line, parsed.command, e.message
                    ))
                })?;
            }

            transcript.lines.extend(report.into_lines());

            if parsed.command.is_quit() {
                transcript.terminated = true;
                break;
            }
        }

        info!(
            commands = transcript.commands_executed,
            skipped = transcript.skipped,
            terminated = transcript.terminated,
            "Script finished"
        );
        Ok(transcript)
    }
}

impl Default for ScriptRunner {
    fn default() -> Self {
        Self::new(DriverConfig::default())
    }
}

/// Output file for `input`: same directory, `<stem><suffix>.txt`.
pub fn output_path_for(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}{suffix}.txt"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_stops_after_quit() {
        let mut runner = ScriptRunner::default();
        let transcript = runner
            .run("Initialize(1)\nQuit()\nReserve(1, 1)\n")
            .expect("run");
        assert!(transcript.terminated);
        assert_eq!(transcript.commands_executed, 2);
        assert_eq!(
            transcript.to_string(),
            "1 Seats are made available for reservation\nProgram Terminated!!\n"
        );
        assert_eq!(runner.engine().reserved(), 0);
    }

    #[test]
    fn test_malformed_lines_are_skipped_by_default() {
        let mut runner = ScriptRunner::default();
        let transcript = runner.run("Initialize(1)\nNope(1)\nAvailable()\n").expect("run");
        assert_eq!(transcript.skipped, 1);
        assert!(!transcript.terminated);
        assert_eq!(
            transcript.to_string(),
            "1 Seats are made available for reservation\nTotal Seats Available: 1, Waitlist: 0\n"
        );
    }

    #[test]
    fn test_stop_on_parse_error() {
        let mut runner = ScriptRunner::new(DriverConfig {
            stop_on_parse_error: true,
            ..Default::default()
        });
        let err = runner.run("Initialize(1)\nReserve(1)\n").expect_err("must fail");
        assert_eq!(err.kind, gator_core::error::ErrorKind::Validation);
        assert!(err.message.contains("line 2"), "{}", err.message);
    }

    #[test]
    fn test_max_seats_caps_initialize_and_add_seats() {
        let mut runner = ScriptRunner::new(DriverConfig {
            max_seats: 3,
            ..Default::default()
        });
        let transcript = runner
            .run("Initialize(9223372036854775807)\nInitialize(2)\nAddSeats(2)\nAddSeats(1)\nAvailable()")
            .expect("run");
        assert_eq!(
            transcript.to_string(),
            "Invalid input. Please provide a valid number of seats.\n\
             2 Seats are made available for reservation\n\
             Invalid input. Please provide a valid number of seats.\n\
             Additional 1 Seats are made available for reservation\n\
             Total Seats Available: 3, Waitlist: 0\n"
        );
        assert_eq!(runner.engine().seat_limit(), 3);
    }

    #[test]
    fn test_echo_leaves_transcript_to_caller() {
        let script = "Initialize(1)\nReserve(4, 0)\nQuit()";
        let quiet = ScriptRunner::default().run(script).expect("run");
        let echoed = ScriptRunner::new(DriverConfig {
            echo: true,
            ..Default::default()
        })
        .run(script)
        .expect("run");
        assert_eq!(echoed, quiet);
        assert_eq!(
            echoed.to_string(),
            "1 Seats are made available for reservation\nUser 4 reserved seat 1\nProgram Terminated!!\n"
        );
    }

    #[test]
    fn test_verify_invariants_passes_on_valid_script() {
        let mut runner = ScriptRunner::new(DriverConfig {
            verify_invariants: true,
            ..Default::default()
        });
        let transcript = runner
            .run("Initialize(2)\nReserve(1, 1)\nReserve(2, 1)\nReserve(3, 2)\nCancel(1, 1)\nQuit()")
            .expect("run");
        assert_eq!(transcript.lines.len(), 7);
    }

    #[test]
    fn test_output_path_for() {
        assert_eq!(
            output_path_for(Path::new("cases/test1.txt"), "_output_file"),
            PathBuf::from("cases/test1_output_file.txt")
        );
        assert_eq!(
            output_path_for(Path::new("input"), "_out"),
            PathBuf::from("input_out.txt")
        );
    }
}
