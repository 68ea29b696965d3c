//! # Scaffold Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the core infrastructure used by the command
//! modules:
//! - `config`: Configuration loading, merging, and validation
//! - `error`: Error types and the shared `Result` alias
//! - `schema`: JSON Schema to command-line option extraction
//! - `templating`: Tera rendering of generator templates
//! - `workspace`: Reading and patching the workspace and `package.json` files
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{Result, ScaffoldError}; // For error handling
//! use crate::core::schema; // For turning generator schemas into options
//! ```
//!
pub mod config;
pub mod error;
pub mod schema;
pub mod templating;
pub mod workspace;
