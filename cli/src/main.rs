//! # Scaffold Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! Entry point of the Scaffold CLI. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the command handlers
//!
//! ## Examples
//!
//! ```bash
//! # Get help
//! scaffold --help
//!
//! # Generate docker files with debug logging
//! scaffold -vv docker init
//!
//! # Show the options a schema declares
//! scaffold schema path/to/schema.json
//! ```
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command groups (docker, schema)
mod common; // Shared utilities (fs, process)
mod core; // Core infrastructure (errors, config, schema, templating, workspace)

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "scaffold",
    about = "Scaffold: schema-driven project generators",
    long_about = "Generates project files from templates, with generator options declared\n\
                  as JSON Schema and resolved from the command line.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// All available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    #[command(alias = "d")]
    Docker(commands::docker::DockerArgs),
    Schema(commands::schema::SchemaArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Docker(args) => commands::docker::handle_docker(args).await,
        Commands::Schema(args) => commands::schema::handle_schema(args).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
