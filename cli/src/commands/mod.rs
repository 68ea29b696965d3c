//! # Scaffold Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! Aggregates the top-level command groups of the Scaffold CLI so `main.rs`
//! can route to them.
//!
//! ## Command Groups
//!
//! - `docker`: Docker scaffolding for workspace projects (`init`, `push`, `deploy`)
//! - `schema`: Lists the options a JSON Schema file declares
//!
//! Each group defines its own clap arguments and an async handler.
//!

/// Command group for generating Docker files for a workspace project.
pub mod docker;
/// Command that shows the options derived from a JSON Schema file.
pub mod schema;
