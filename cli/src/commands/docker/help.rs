//! # Scaffold Docker Help
//!
//! File: cli/src/commands/docker/help.rs
//!
//! Prints usage for `scaffold docker`: the available actions and the
//! generator options derived from the docker schema. Hidden options are
//! left out.
//!
use super::options;
use super::DockerAction;
use crate::core::error::Result;
use crate::core::schema::OptionDescriptor;
use clap::ValueEnum;
use serde_json::Value;

/// Prints help for the docker command, or for one action.
pub fn print_help(action: Option<DockerAction>) -> Result<()> {
    let descriptors = options::generator_options()?;
    print!("{}", render_help(action, &descriptors));
    Ok(())
}

pub(super) fn render_help(action: Option<DockerAction>, descriptors: &[OptionDescriptor]) -> String {
    let mut out = String::new();
    match action {
        Some(action) => {
            out.push_str(&format!(
                "usage: scaffold docker {} [--dry-run] [--force] [-- <environment> [options]]\n",
                action.name()
            ));
        }
        None => {
            out.push_str("usage: scaffold docker <action> [--dry-run] [--force] [-- [options]]\n\n");
            out.push_str("Available actions:\n");
            for action in DockerAction::value_variants() {
                out.push_str(&format!("    {:<8} {}\n", action.name(), action.summary()));
            }
        }
    }

    out.push_str("\nGenerator options for 'init' (pass them after `--`):\n");
    let rows: Vec<(String, String)> = descriptors
        .iter()
        .filter(|d| !d.hidden)
        .map(|d| (flag_label(d), describe(d)))
        .collect();
    let width = rows.iter().map(|(flag, _)| flag.len()).max().unwrap_or(0);
    for (flag, text) in rows {
        out.push_str(&format!("  {:<width$}  {}\n", flag, text, width = width));
    }

    out.push_str("\nRun 'scaffold docker --help' for the command's own flags.\n");
    out
}

fn flag_label(descriptor: &OptionDescriptor) -> String {
    let mut label = format!("--{}", descriptor.name);
    if let Some(aliases) = &descriptor.aliases {
        for alias in aliases {
            label.push_str(&format!(", -{}", alias));
        }
    }
    if descriptor.kind != "boolean" && !descriptor.kind.is_empty() {
        label.push_str(&format!(" <{}>", descriptor.kind));
    }
    label
}

fn describe(descriptor: &OptionDescriptor) -> String {
    let mut text = descriptor.description.clone();
    if descriptor.required {
        text.push_str(" (required)");
    }
    match &descriptor.default {
        Some(Value::String(s)) => text.push_str(&format!(" [default: {}]", s)),
        Some(other) => text.push_str(&format!(" [default: {}]", other)),
        None => {}
    }
    text
}
