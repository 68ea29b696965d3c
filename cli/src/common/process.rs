//! # Scaffold Process Utilities (`common::process`)
//!
//! File: cli/src/common/process.rs
//!
//! ## Overview
//!
//! Checks for external executables the generators depend on. A command is
//! considered present when it can be spawned at all; its exit status does
//! not matter. Only an OS "not found" error means it is missing.
//!
//! ```rust
//! if !process::command_exists("docker").await? {
//!     // ...
//! }
//! ```
//!
use crate::core::error::{Result, ScaffoldError};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, error, info};

/// Where users are pointed when the Docker CLI is missing.
pub const DOCKER_INSTALL_URL: &str = "https://docs.docker.com/install/";

/// Returns whether `cmd_name` can be executed from `PATH`.
///
/// Runs `<cmd_name> --version` with all output discarded.
///
/// # Errors
///
/// Spawning failures other than "not found" (e.g. permission denied) are
/// returned as errors.
pub async fn command_exists(cmd_name: &str) -> Result<bool> {
    let version_flag = "--version";
    debug!("Running check: {} {}", cmd_name, version_flag);

    let status = Command::new(cmd_name)
        .arg(version_flag)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await;

    match status {
        Ok(status) => {
            debug!(
                "Check command '{} {}' executed with status: {}",
                cmd_name, version_flag, status
            );
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("Command '{}' not found (ErrorKind::NotFound).", cmd_name);
            Ok(false)
        }
        Err(e) => {
            error!(
                "Error executing check command '{} {}': {}",
                cmd_name, version_flag, e
            );
            Err(anyhow::Error::new(e).context(format!(
                "Failed to execute command check for '{}'",
                cmd_name
            )))
        }
    }
}

/// Fails with `Docker-CLI is missing!` unless the `docker` executable exists.
pub async fn require_docker_cli() -> Result<()> {
    if command_exists("docker").await? {
        info!("Docker CLI found.");
        return Ok(());
    }
    eprintln!("\nDocker-CLI is available on {}", DOCKER_INSTALL_URL);
    anyhow::bail!(ScaffoldError::MissingCommand {
        name: "Docker-CLI".to_string(),
    })
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_command_exists_logic() {
        // `sh` is present on every platform the tests run on.
        let sh_exists = command_exists("sh").await.unwrap_or(false);
        assert!(sh_exists, "'sh' should be found in PATH for test execution");

        let non_existent_cmd = "nonexistent_scaffold_test_command_98765";
        let missing = command_exists(non_existent_cmd).await.unwrap();
        assert!(!missing);
    }
}
