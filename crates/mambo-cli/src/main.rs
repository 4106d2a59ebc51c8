//! Mambo CLI - signed access to the Mambo API.
//!
//! Provides commands for:
//! - `request`: Send a signed request and print the JSON response
//! - `sign`: Show the signature base string and header for a URL
//! - `verify`: Check an OAuth-signed request against the configured keys

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{RequestArgs, SignArgs, VerifyArgs};
use output::Output;

/// Mambo API client.
#[derive(Parser)]
#[command(name = "mambo", version, about)]
struct Cli {
    /// Log requests and signing details.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a signed API request.
    Request(RequestArgs),
    /// Sign a URL and print the OAuth details.
    Sign(SignArgs),
    /// Verify an OAuth-signed request.
    Verify(VerifyArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Request(args) => args.execute(),
        Commands::Sign(args) => args.execute(),
        Commands::Verify(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
