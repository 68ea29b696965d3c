//! # Docker Generator Options
//!
//! File: cli/src/commands/docker/options.rs
//!
//! ## Overview
//!
//! The Docker generator declares its options in an embedded JSON Schema
//! (`schema.json`). This module:
//! - derives the option list from that schema with `core::schema::convert`
//! - parses the raw generator arguments (everything after `--`) against
//!   that list
//! - decodes the result into the typed [`DockerOptions`]
//!
//! ## Argument syntax
//!
//! ```text
//! scaffold docker init -- staging --project bar --image-name=web -sp 8080 --use-image
//! ```
//!
//! - `--name value`, `--name=value`, `-alias value`
//! - names match ignoring case, `-` and `_`, so `--image-name` == `--imageName`
//! - boolean options need no value; `--no-use-image`, `--use-image=false` or
//!   `--use-image false` unset them
//! - bare words are positional and feed `{"$source": "argv"}` smart defaults
//!
//! A value for an option is taken, in order, from: the command line, its
//! smart default, the configuration file, the schema `default`.
//!
use crate::core::error::{Result, ScaffoldError};
use crate::core::schema::{self, OptionDescriptor};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use tracing::{debug, trace};

/// Schema describing the options of `scaffold docker init`.
pub const DOCKER_SCHEMA: &str = include_str!("schema.json");

/// Options surfaced by the Docker generator schema (root properties only).
pub fn generator_options() -> Result<Vec<OptionDescriptor>> {
    schema::convert(DOCKER_SCHEMA, true).context("Built-in docker schema is invalid")
}

/// Context used to evaluate smart defaults.
#[derive(Debug, Default, Clone)]
pub struct SmartDefaultContext {
    /// Project used for `{"$source": "projectName"}`.
    pub default_project: Option<String>,
}

/// Typed options of the Docker generator.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DockerOptions {
    pub project: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub environment: String,
    #[serde(default)]
    pub image_name: String,
    #[serde(default)]
    pub machine_name: String,
    #[serde(default)]
    pub use_image: bool,
    #[serde(default)]
    pub image_org: Option<String>,
    pub image_registry: String,
    pub service_port: u16,
    #[serde(default)]
    pub service_name: String,
}

impl DockerOptions {
    /// Decodes resolved options; empty image and service names fall back to
    /// the project name.
    pub fn from_resolved(resolved: Map<String, Value>) -> Result<DockerOptions> {
        let mut options: DockerOptions = serde_json::from_value(Value::Object(resolved))
            .map_err(|e| ScaffoldError::ArgumentParsing(e.to_string()))
            .context("Invalid docker generator options")?;
        if options.image_name.is_empty() {
            options.image_name = options.project.clone();
        }
        if options.service_name.is_empty() {
            options.service_name = options.project.clone();
        }
        Ok(options)
    }

    /// `registry/org/name`, leaving out the org when none is set.
    pub fn image_reference(&self) -> String {
        let registry = self.image_registry.trim_end_matches('/');
        match self.image_org.as_deref().filter(|org| !org.is_empty()) {
            Some(org) => format!("{}/{}/{}", registry, org, self.image_name),
            None => format!("{}/{}", registry, self.image_name),
        }
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

fn find_descriptor<'a>(
    descriptors: &'a [OptionDescriptor],
    flag: &str,
) -> Option<&'a OptionDescriptor> {
    let wanted = normalize(flag);
    descriptors.iter().find(|d| {
        normalize(&d.name) == wanted
            || d.aliases
                .as_deref()
                .is_some_and(|aliases| aliases.iter().any(|a| normalize(a) == wanted))
    })
}

fn parse_bool(option: &str, raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => anyhow::bail!(ScaffoldError::ArgumentParsing(format!(
            "Option '{}' expects a boolean, got '{}'.",
            option, raw
        ))),
    }
}

/// Converts a raw command-line value according to the option's schema type.
fn typed_value(descriptor: &OptionDescriptor, raw: &str) -> Result<Value> {
    let invalid = |expected: &str| {
        ScaffoldError::ArgumentParsing(format!(
            "Option '{}' expects {}, got '{}'.",
            descriptor.name, expected, raw
        ))
    };
    let value = match descriptor.kind.as_str() {
        "boolean" => Value::Bool(parse_bool(&descriptor.name, raw)?),
        "integer" => Value::from(raw.parse::<i64>().map_err(|_| invalid("an integer"))?),
        "number" => {
            if let Ok(integer) = raw.parse::<i64>() {
                Value::from(integer)
            } else {
                let float = raw.parse::<f64>().map_err(|_| invalid("a number"))?;
                Number::from_f64(float)
                    .map(Value::Number)
                    .ok_or_else(|| invalid("a finite number"))?
            }
        }
        _ => Value::String(raw.to_string()),
    };
    Ok(value)
}

fn smart_default(
    descriptor: &OptionDescriptor,
    positionals: &[String],
    context: &SmartDefaultContext,
) -> Option<Value> {
    let smart = descriptor.smart_default.as_ref()?;
    match smart.get("$source").and_then(Value::as_str) {
        Some("argv") => {
            let index = smart.get("index").and_then(Value::as_u64).unwrap_or(0) as usize;
            let raw = positionals.get(index)?;
            typed_value(descriptor, raw).ok()
        }
        Some("projectName") => context.default_project.clone().map(Value::String),
        other => {
            debug!(
                "Ignoring unsupported smart default source {:?} for option '{}'",
                other, descriptor.name
            );
            None
        }
    }
}

/// Resolves generator arguments into an option map keyed by option name.
///
/// `configured` holds defaults from the configuration file, keyed by option
/// name.
///
/// # Errors
///
/// Unknown options, missing or mistyped values, and `required` options that
/// are still unset after defaults.
pub fn resolve(
    args: &[String],
    descriptors: &[OptionDescriptor],
    configured: &Map<String, Value>,
    context: &SmartDefaultContext,
) -> Result<Map<String, Value>> {
    let mut explicit: Map<String, Value> = Map::new();
    let mut positionals: Vec<String> = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let flag = match arg.strip_prefix("--").or_else(|| arg.strip_prefix('-')) {
            Some(flag) if !flag.is_empty() && arg != "-" => flag,
            _ => {
                positionals.push(arg.clone());
                continue;
            }
        };
        let (flag, inline) = match flag.split_once('=') {
            Some((flag, value)) => (flag, Some(value)),
            None => (flag, None),
        };

        let (descriptor, negated) = match find_descriptor(descriptors, flag) {
            Some(descriptor) => (descriptor, false),
            None => match flag.strip_prefix("no-").and_then(|f| find_descriptor(descriptors, f)) {
                Some(descriptor) if descriptor.kind == "boolean" && inline.is_none() => {
                    (descriptor, true)
                }
                _ => anyhow::bail!(ScaffoldError::ArgumentParsing(format!(
                    "Unknown option: '{}'",
                    arg
                ))),
            },
        };

        let value = if descriptor.kind == "boolean" {
            match inline {
                Some(raw) => Value::Bool(parse_bool(&descriptor.name, raw)?),
                None if negated => Value::Bool(false),
                None => {
                    // `--use-image false`: a boolean word right after the flag is its value.
                    let next = iter
                        .as_slice()
                        .first()
                        .and_then(|raw| parse_bool(&descriptor.name, raw).ok());
                    if next.is_some() {
                        iter.next();
                    }
                    Value::Bool(next.unwrap_or(true))
                }
            }
        } else {
            let raw = match inline {
                Some(raw) => raw,
                None => iter.next().map(String::as_str).ok_or_else(|| {
                    ScaffoldError::ArgumentParsing(format!(
                        "Option '{}' requires a value.",
                        descriptor.name
                    ))
                })?,
            };
            typed_value(descriptor, raw)?
        };
        trace!("Parsed option {} = {}", descriptor.name, value);
        explicit.insert(descriptor.name.clone(), value);
    }

    let mut resolved = Map::new();
    for descriptor in descriptors {
        let value = explicit
            .remove(&descriptor.name)
            .or_else(|| smart_default(descriptor, &positionals, context))
            .or_else(|| configured.get(&descriptor.name).cloned())
            .or_else(|| descriptor.default.clone());
        match value {
            Some(value) => {
                resolved.insert(descriptor.name.clone(), value);
            }
            None if descriptor.required => {
                anyhow::bail!(ScaffoldError::MissingOption {
                    name: descriptor.name.clone(),
                });
            }
            None => {}
        }
    }
    debug!("Resolved generator options: {:?}", resolved);
    Ok(resolved)
}
