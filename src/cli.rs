//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation.

use clap::Parser;
use std::path::PathBuf;

/// SalaryDash - salary dataset aggregation service
///
/// Loads a delimited salary dataset once and serves yearly and
/// job-title summaries over HTTP, or prints them as a report.
///
/// Examples:
///   salarydash --data salaries.csv
///   salarydash --data salaries.csv --port 8080
///   salarydash --data salaries.csv --print --year 2023
///   salarydash --data salaries.csv --print --format json --output summary.json
///   salarydash --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to the salary dataset
    ///
    /// Defaults to the config file value, or salaries.csv.
    #[arg(short, long, value_name = "FILE", env = "SALARYDASH_DATA")]
    pub data: Option<PathBuf>,

    /// Field delimiter of the dataset (single ASCII character)
    #[arg(long, value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// Address to bind the HTTP server to
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, value_name = "PORT", env = "SALARYDASH_PORT")]
    pub port: Option<u16>,

    /// Disable permissive CORS headers
    #[arg(long)]
    pub no_cors: bool,

    /// Path to configuration file
    ///
    /// If not specified, looks for .salarydash.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Print summaries and exit instead of starting the server
    #[arg(long)]
    pub print: bool,

    /// Year to break down by job title (with --print)
    #[arg(long, value_name = "YEAR", requires = "print")]
    pub year: Option<String>,

    /// Output format for --print (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Write the --print report to a file instead of stdout
    #[arg(short, long, value_name = "FILE", requires = "print")]
    pub output: Option<PathBuf>,

    /// Generate a default .salarydash.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for printed reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.port == Some(0) {
            return Err("Port must be between 1 and 65535".to_string());
        }

        if let Some(delimiter) = self.delimiter {
            crate::dataset::delimiter_byte(delimiter).map_err(|e| e.to_string())?;
        }

        if let Some(ref data) = self.data {
            if data.is_dir() {
                return Err(format!("Dataset path is a directory: {}", data.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
