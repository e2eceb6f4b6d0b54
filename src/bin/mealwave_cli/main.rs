// ABOUTME: mealwave-cli - command-line front end for the mealwave engine
// ABOUTME: Reads JSON input files and prints wave, threshold and plan results as JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Plan the remaining meals of the day
//! mealwave-cli plan --input plan.json
//!
//! # Model the insulin waves of a day's meals
//! mealwave-cli wave --input day.json
//!
//! # Compute personalized thresholds from history
//! mealwave-cli thresholds --input history.json --verbose
//! ```

mod commands;

use clap::{Parser, Subcommand};
use mealwave::config::MealwaveConfig;
use mealwave::errors::{AppError, ErrorResponse};
use mealwave::logging::LoggingConfig;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};

#[derive(Parser)]
#[command(
    name = "mealwave-cli",
    about = "Mealwave insulin-wave meal timing CLI",
    long_about = "Plan meals around modelled insulin waves, inspect waves and compute personalized thresholds."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Plan the remaining meals of the day
    Plan {
        /// JSON file with current time, budgets, profile and history
        #[arg(long)]
        input: PathBuf,
    },

    /// Model the insulin wave of every meal in a day
    Wave {
        /// JSON file with the day record and optional profile
        #[arg(long)]
        input: PathBuf,
    },

    /// Compute personalized thresholds from day history
    Thresholds {
        /// JSON file with history and optional profile
        #[arg(long)]
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = LoggingConfig::for_cli(cli.verbose).init() {
        eprintln!("Logging disabled: {e}");
    }

    let config = match MealwaveConfig::from_env() {
        Ok(config) => config,
        Err(e) => return report(AppError::from(e)),
    };

    let result = match cli.command {
        Command::Plan { input } => commands::plan(&config, &input).await,
        Command::Wave { input } => commands::wave(&config, &input).await,
        Command::Thresholds { input } => commands::thresholds(&config, &input).await,
    };

    match result.and_then(|value| Ok(serde_json::to_string_pretty(&value)?)) {
        Ok(output) => {
            println!("{output}");
            debug!("Command completed");
            ExitCode::SUCCESS
        }
        Err(e) => report(e),
    }
}

/// Print an error envelope to stderr and fail
fn report(err: AppError) -> ExitCode {
    error!(code = ?err.code, "{err}");
    let response = ErrorResponse::from(err);
    match serde_json::to_string_pretty(&response) {
        Ok(body) => eprintln!("{body}"),
        Err(e) => eprintln!("{}: {e}", response.error.message),
    }
    ExitCode::FAILURE
}
