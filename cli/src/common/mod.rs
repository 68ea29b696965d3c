//! # Scaffold Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared utilities used by the command modules, kept apart from
//! command-specific logic (`commands::`) and core infrastructure (`core::`).
//!
//! - **`fs`**: file writes and `FilePlan`, the pending-change list behind `--dry-run`.
//! - **`process`**: checks for external executables such as `docker`.
//!

/// Utilities for filesystem operations (I/O, change plans).
pub mod fs;
/// Utilities for checking external executables.
pub mod process;
