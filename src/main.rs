//! GatorTicket batch driver.
//!
//! `gator-ticket <test_case_file>` runs every command in the file and
//! writes the status lines to `<stem>_output_file.txt` beside it.

use std::path::{Path, PathBuf};

use tracing_subscriber::{EnvFilter, fmt};

use gator_core::config::AppConfig;
use gator_core::error::AppError;
use gator_engine::script::{ScriptRunner, output_path_for};

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        println!("Check the usage. It should be of the form: gator-ticket <test_case_fname>");
        std::process::exit(1);
    }

    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config, Path::new(&args[1])).await {
        tracing::error!("Run failed: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("GATOR_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());
    AppConfig::load(&config_path)
}

/// Initialize tracing/logging on stderr
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        "compact" => {
            fmt()
                .compact()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

/// Run the script at `input` and write its transcript
async fn run(config: AppConfig, input: &Path) -> Result<PathBuf, AppError> {
    tracing::info!("Starting GatorTicket v{}", env!("CARGO_PKG_VERSION"));

    let script = tokio::fs::read_to_string(input).await?;
    let output = output_path_for(input, &config.driver.output_suffix);

    let echo = config.driver.echo;
    let mut runner = ScriptRunner::new(config.driver);
    let transcript = runner.run(&script)?;

    tokio::fs::write(&output, transcript.to_string()).await?;
    if echo {
        print!("{transcript}");
    }
    tracing::info!(
        output = %output.display(),
        lines = transcript.lines.len(),
        "Transcript written"
    );

    Ok(output)
}
