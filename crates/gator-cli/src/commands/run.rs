//! Script execution command.

use std::path::PathBuf;

use clap::Args;

use crate::output::{self, OutputFormat};
use gator_core::error::AppError;
use gator_engine::script::{ScriptRunner, output_path_for};

/// Arguments for `run`
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Command script to execute
    pub script: PathBuf,

    /// Output file (defaults to `<stem><output_suffix>.txt` next to the script)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the transcript to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,

    /// Audit engine invariants after every command
    #[arg(long)]
    pub verify: bool,

    /// Print final pool counts
    #[arg(long)]
    pub summary: bool,
}

/// Execute `run`
pub async fn execute(
    args: &RunArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<i32, AppError> {
    let config = super::load_config(config_path)?;
    let mut options = config.driver;
    options.verify_invariants |= args.verify;

    let script = super::read_script(&args.script).await?;
    tracing::debug!(
        script = %args.script.display(),
        bytes = script.len(),
        verify = options.verify_invariants,
        "Running script"
    );
    let mut runner = ScriptRunner::new(options.clone());
    let transcript = runner.run(&script)?;

    if args.stdout {
        match format {
            OutputFormat::Table => print!("{}", transcript),
            OutputFormat::Json => output::print_json(&transcript.lines),
        }
    } else {
        let out_path = args
            .output
            .clone()
            .unwrap_or_else(|| output_path_for(&args.script, &options.output_suffix));
        let body = match format {
            OutputFormat::Table => transcript.to_string(),
            OutputFormat::Json => serde_json::to_string_pretty(&transcript.lines)?,
        };
        tokio::fs::write(&out_path, body).await?;
        if options.echo {
            print!("{}", transcript);
        }
        output::print_success(&format!(
            "{} commands executed, transcript written to '{}'",
            transcript.commands_executed,
            out_path.display()
        ));
    }

    if transcript.skipped > 0 {
        output::print_warning(&format!("{} malformed lines skipped", transcript.skipped));
    }

    if args.summary {
        let snapshot = runner.engine().snapshot();
        match format {
            OutputFormat::Table => {
                println!("Pool Status:");
                output::print_kv("Total Seats", &snapshot.total_seats.to_string());
                output::print_kv("Available", &snapshot.available.to_string());
                output::print_kv("Reserved", &snapshot.reserved.to_string());
                output::print_kv("Waitlisted", &snapshot.waitlisted.to_string());
                output::print_kv("Terminated", &transcript.terminated.to_string());
            }
            OutputFormat::Json => output::print_json(&snapshot),
        }
    }

    Ok(0)
}
