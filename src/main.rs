//! OMNIS - school assistant robot answer pipeline.
//!
//! This is the main entry point for the robot's question-answering CLI.

use clap::Parser;
use std::process::ExitCode;

mod assistant;
mod cli;
mod config;
mod credentials;
mod diagnose;
mod error;
mod logging;
mod providers;
mod rules;
mod speech;

use cli::Commands;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging; the guard keeps the file appender alive.
    let _guard = match logging::init() {
        Ok((guard, _log_dir)) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Parse command line arguments
    let args = Commands::parse();

    // Run the command
    match args.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
