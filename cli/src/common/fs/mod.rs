//! # Scaffold Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Filesystem helpers used by generators:
//!
//! - **`io`**: directory creation and byte writes with path context in errors.
//! - **`plan`**: `FilePlan`, the list of pending file changes that a
//!   generator builds before anything is written (dry-run and overwrite
//!   checks live here).
//!
//! ```rust
//! use crate::common::fs::plan::FilePlan;
//!
//! let mut plan = FilePlan::new(&workspace_root);
//! plan.create(project_root.join("Dockerfile"), content, force)?;
//! if dry_run { for line in plan.summary() { println!("{}", line); } } else { plan.commit()?; }
//! ```
//!

/// Basic file I/O operations (`ensure_dir_exists`, `write_bytes_to_file`).
pub mod io;
/// Pending file changes (`FilePlan`).
pub mod plan;
