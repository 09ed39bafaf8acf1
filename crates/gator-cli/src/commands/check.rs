//! Script validation command.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use gator_core::error::AppError;
use gator_engine::script::parse_script;

/// Arguments for `check`
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Command script to parse
    pub script: PathBuf,
}

/// One parsed line, as listed by `check`
#[derive(Debug, Serialize, Tabled)]
struct CheckRow {
    /// 1-based line number
    #[tabled(rename = "Line")]
    line: usize,
    /// Canonical command text or the parse error
    #[tabled(rename = "Command")]
    command: String,
    /// Whether the line parsed
    #[tabled(rename = "Valid")]
    valid: bool,
}

/// Execute `check`; exits 1 when any line is malformed
pub async fn execute(args: &CheckArgs, format: OutputFormat) -> Result<i32, AppError> {
    let script = super::read_script(&args.script).await?;

    let rows: Vec<CheckRow> = parse_script(&script)
        .into_iter()
        .map(|parsed| match parsed {
            Ok(parsed) => CheckRow {
                line: parsed.line,
                command: parsed.command.to_string(),
                valid: true,
            },
            Err(e) => CheckRow {
                line: error_line(&e),
                command: e.to_string(),
                valid: false,
            },
        })
        .collect();

    output::print_list(&rows, format);

    let invalid = rows.iter().filter(|row| !row.valid).count();
    if invalid > 0 {
        output::print_error(&format!("{} malformed lines", invalid));
        Ok(1)
    } else {
        if format == OutputFormat::Table {
            output::print_success(&format!("{} commands parsed", rows.len()));
        }
        Ok(0)
    }
}

fn error_line(err: &gator_engine::ScriptError) -> usize {
    match err {
        gator_engine::ScriptError::AtLine { line, .. } => *line,
        _ => 0,
    }
}
