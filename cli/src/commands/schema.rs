//! # Scaffold Schema Command
//!
//! File: cli/src/commands/schema.rs
//!
//! ## Overview
//!
//! Implements `scaffold schema <FILE>`, which shows the command-line options
//! a JSON Schema file declares, as the generators would register them.
//!
//! ## Examples
//!
//! ```bash
//! # Table of root-level options
//! scaffold schema generator/schema.json
//!
//! # Every property, nested ones included, as JSON
//! scaffold schema generator/schema.json --nested --json
//! ```
//!
//! Example output:
//!
//! ```text
//! Name         | Aliases | Type   | Default | Description
//! -------------+---------+--------+---------+----------------------
//! name         | n       | string |         | Name
//! port         |         | number | 8000    | Port (required)
//!
//! Found 2 option(s).
//! ```
//!
use crate::core::error::Result;
use crate::core::schema::{self, OptionDescriptor};
use anyhow::Context;
use clap::Parser;
use serde_json::Value;
use std::{fs, path::PathBuf};
use tracing::info;

/// # Schema Command Arguments (`SchemaArgs`)
#[derive(Parser, Debug)]
pub struct SchemaArgs {
    /// Path of the JSON Schema file.
    file: PathBuf,

    /// Include properties nested in objects and array items.
    #[arg(long)]
    nested: bool,

    /// Print the options as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

/// # Handle Schema Command (`handle_schema`)
pub async fn handle_schema(args: SchemaArgs) -> Result<()> {
    info!("Reading schema from {}", args.file.display());
    let text = fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read schema file '{}'", args.file.display()))?;
    let options = schema::convert(&text, !args.nested)?;

    if args.json {
        let rendered =
            serde_json::to_string_pretty(&options).context("Failed to serialize options")?;
        println!("{}", rendered);
    } else {
        print!("{}", render_table(&options));
    }
    Ok(())
}

fn default_label(option: &OptionDescriptor) -> String {
    match &option.default {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

fn render_table(options: &[OptionDescriptor]) -> String {
    if options.is_empty() {
        return "No options found in schema.\n".to_string();
    }

    let headers = ["Name", "Aliases", "Type", "Default", "Description"];
    let rows: Vec<[String; 5]> = options
        .iter()
        .map(|option| {
            let mut description = option.description.clone();
            if option.required {
                description.push_str(" (required)");
            }
            if option.hidden {
                description.push_str(" (hidden)");
            }
            [
                option.name.clone(),
                option.aliases.as_deref().unwrap_or_default().join(", "),
                option.kind.clone(),
                default_label(option),
                description,
            ]
        })
        .collect();

    let mut widths = headers.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let format_row = |cells: &[String]| {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&format_row(&headers.map(String::from)));
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    out.push('\n');
    for row in &rows {
        out.push_str(&format_row(row));
        out.push('\n');
    }
    out.push_str(&format!("\nFound {} option(s).\n", rows.len()));
    out
}
