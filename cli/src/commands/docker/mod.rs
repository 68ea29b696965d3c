//! # Scaffold Docker Command Group
//!
//! File: cli/src/commands/docker/mod.rs
//!
//! ## Overview
//!
//! Entry point and router for `scaffold docker <action>`. Before any action
//! runs, the command checks that the `docker` executable is installed
//! (skippable with `--skip-docker-check`, `SCAFFOLD_SKIP_DOCKER_CHECK=true`
//! or `docker.skip_cli_check` in the configuration).
//!
//! ## Architecture
//!
//! - `DockerArgs`: clap arguments of the command group.
//! - `DockerAction`: the actions (`init`, `push`, `deploy`).
//! - `handle_docker`: runs the CLI check and dispatches.
//! - `init`: the generator behind `docker init`.
//! - `options`: generator options derived from the embedded schema.
//! - `help`: usage output.
//!
//! Only `init` generates anything today; `push` and `deploy` print help.
//!
//! ## Examples
//!
//! ```bash
//! # Show actions and generator options
//! scaffold docker
//!
//! # Add docker files for the default project
//! scaffold docker init
//!
//! # Preview files for another project and environment
//! scaffold docker init --dry-run -- staging --project web
//! ```
//!
use crate::common::process;
use crate::core::config;
use crate::core::error::Result;
use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{debug, info, warn};

mod help;
mod init;
mod options;

/// # Docker Command Arguments (`DockerArgs`)
#[derive(Parser, Debug)]
pub struct DockerArgs {
    /// The action to run. Without one, help is printed.
    #[arg(value_enum)]
    action: Option<DockerAction>,

    /// Print the planned file changes without writing anything.
    #[arg(long, short = 'd')]
    dry_run: bool,

    /// Overwrite generated files that already exist.
    #[arg(long, short = 'f')]
    force: bool,

    /// Do not check for the `docker` executable.
    #[arg(long, env = "SCAFFOLD_SKIP_DOCKER_CHECK")]
    skip_docker_check: bool,

    /// Render templates from this directory instead of the built-in ones.
    #[arg(long, env = "SCAFFOLD_DOCKER_TEMPLATES")]
    templates_dir: Option<PathBuf>,

    /// Generator options, given after `--` (see `scaffold docker` for the list).
    #[arg(last = true)]
    generator_args: Vec<String>,
}

/// Actions of `scaffold docker`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockerAction {
    /// Generate Docker files for an application project.
    Init,
    /// Push the project image to its registry.
    Push,
    /// Deploy the project to its docker machine.
    Deploy,
}

impl DockerAction {
    pub fn name(self) -> &'static str {
        match self {
            DockerAction::Init => "init",
            DockerAction::Push => "push",
            DockerAction::Deploy => "deploy",
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            DockerAction::Init => {
                "Generates Dockerfile, compose files and nginx config for an application project."
            }
            DockerAction::Push => "Pushes the project image to its registry (not available yet).",
            DockerAction::Deploy => "Deploys the project to its docker machine (not available yet).",
        }
    }
}

/// # Handle Docker Command (`handle_docker`)
///
/// Loads configuration, verifies the Docker CLI and dispatches the action.
pub async fn handle_docker(args: DockerArgs) -> Result<()> {
    let cfg = config::load_config().context("Failed to load scaffold configuration")?;

    if args.skip_docker_check || cfg.docker.skip_cli_check() {
        debug!("Skipping Docker CLI check.");
    } else {
        process::require_docker_cli().await?;
    }

    match args.action {
        Some(DockerAction::Init) => {
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            let request = init::InitRequest {
                cwd,
                generator_args: args.generator_args,
                templates_dir: args.templates_dir,
                force: args.force,
            };
            init::handle_init(request, &cfg, args.dry_run).await
        }
        Some(action) => {
            warn!("The docker '{}' action is not available yet.", action.name());
            help::print_help(Some(action))
        }
        None => {
            info!("No docker action given; printing help.");
            help::print_help(None)
        }
    }
}
