//! # Scaffold Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types shared by the scaffold commands.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `ScaffoldError`: A custom error enum using `thiserror` for specific error types
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! Most handlers return `Result<T>` and attach context with `anyhow::Context`.
//! Pure components that callers may want to match on (the schema option
//! extractor) return `std::result::Result<T, ScaffoldError>` instead.
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! if project.is_none() {
//!     anyhow::bail!(ScaffoldError::Workspace("Project is not defined in this workspace.".into()));
//! }
//!
//! // Matching on a schema parse failure
//! match schema::convert(text, true) {
//!     Err(ScaffoldError::SchemaParse { .. }) => println!("invalid schema"),
//!     other => { /* ... */ }
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for the scaffold application.
#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Invalid schema: {source}")]
    SchemaParse {
        #[from]
        source: serde_json::Error,
    },

    #[error("Invalid schema: the root of a schema must be a JSON object.")]
    SchemaNotObject,

    #[error("Workspace error: {0}")]
    Workspace(String),

    #[error("Template rendering error: {source}")]
    Template {
        #[from]
        source: tera::Error,
    },

    #[error("Argument parsing error: {0}")]
    ArgumentParsing(String),

    #[error("Option ({name}) is required.")]
    MissingOption { name: String },

    #[error("Path \"{path}\" already exists.")]
    FileExists { path: String },

    #[error("{name} is missing!")]
    MissingCommand { name: String },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
