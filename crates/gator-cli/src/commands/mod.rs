//! CLI command definitions and dispatch.

pub mod check;
pub mod config;
pub mod run;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use gator_core::config::AppConfig;
use gator_core::error::AppError;

/// GatorTicket: seat reservation engine with a priority waitlist
#[derive(Debug, Parser)]
#[command(name = "gator-cli", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a command script and write its status transcript
    Run(run::RunArgs),
    /// Parse a command script without running it
    Check(check::CheckArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command, returning the process exit code
    pub async fn execute(&self) -> Result<i32, AppError> {
        match &self.command {
            Commands::Run(args) => run::execute(args, &self.config, self.format).await,
            Commands::Check(args) => check::execute(args, self.format).await,
            Commands::Config(args) => config::execute(args, &self.config, self.format).await,
        }
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path)
}

/// Helper: read a script file
pub async fn read_script(path: &std::path::Path) -> Result<String, AppError> {
    tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::with_source(
            gator_core::error::ErrorKind::Storage,
            format!("Failed to read script '{}': {}", path.display(), e),
            e,
        )
    })
}
