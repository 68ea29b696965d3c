//! # Scaffold Workspace Files
//!
//! File: cli/src/core/workspace.rs
//!
//! ## Overview
//!
//! A workspace is a directory whose root holds a JSON workspace file
//! (`scaffold.json` by default) describing its projects:
//!
//! ```json
//! {
//!   "version": 1,
//!   "defaultProject": "bar",
//!   "projects": {
//!     "bar": {
//!       "root": "",
//!       "projectType": "application",
//!       "architect": { "build": { "options": {}, "configurations": {} } }
//!     }
//!   }
//! }
//! ```
//!
//! The document is kept as an untyped `serde_json::Value` so that fields this
//! tool does not know about survive a read/patch/write cycle unchanged (key
//! order included, thanks to `preserve_order`). Typed accessors cover the
//! parts generators need.
//!
use crate::core::error::{Result, ScaffoldError};
use anyhow::{anyhow, Context};
use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A loaded workspace file.
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Directory containing the workspace file.
    pub root: PathBuf,
    /// Full path of the workspace file.
    pub path: PathBuf,
    pub document: Value,
}

impl Workspace {
    /// Searches `start` and its ancestors for `file_name` and loads it.
    pub fn discover(start: &Path, file_name: &str) -> Result<Workspace> {
        let mut dir = Some(start);
        while let Some(current) = dir {
            let candidate = current.join(file_name);
            if candidate.is_file() {
                return Workspace::load(&candidate);
            }
            dir = current.parent();
        }
        Err(anyhow!(ScaffoldError::Workspace(format!(
            "Could not find a workspace file ({}) in '{}' or any parent directory.",
            file_name,
            start.display()
        ))))
    }

    /// Loads a workspace file from an explicit path.
    pub fn load(path: &Path) -> Result<Workspace> {
        info!("Loading workspace from: {}", path.display());
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read workspace file {:?}", path))?;
        let document: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse workspace file {:?}", path))?;
        if !document.is_object() {
            anyhow::bail!(ScaffoldError::Workspace(format!(
                "Workspace file {:?} must contain a JSON object.",
                path
            )));
        }
        let root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(Workspace {
            root,
            path: path.to_path_buf(),
            document,
        })
    }

    /// The named project, if the workspace defines it.
    pub fn project(&self, name: &str) -> Option<&Map<String, Value>> {
        self.document
            .get("projects")
            .and_then(|projects| projects.get(name))
            .and_then(Value::as_object)
    }

    pub fn project_mut(&mut self, name: &str) -> Option<&mut Map<String, Value>> {
        self.document
            .get_mut("projects")
            .and_then(|projects| projects.get_mut(name))
            .and_then(Value::as_object_mut)
    }

    /// `defaultProject`, or the only project when there is exactly one.
    pub fn default_project(&self) -> Option<String> {
        if let Some(name) = self.document.get("defaultProject").and_then(Value::as_str) {
            return Some(name.to_string());
        }
        let projects = self.document.get("projects")?.as_object()?;
        if projects.len() == 1 {
            projects.keys().next().cloned()
        } else {
            None
        }
    }

    /// Absolute directory of a project (`<workspace root>/<project.root>`).
    pub fn project_root(&self, name: &str) -> Option<PathBuf> {
        let project = self.project(name)?;
        let root = project.get("root").and_then(Value::as_str).unwrap_or("");
        Some(self.root.join(root))
    }

    /// The workspace file as written back: two-space indentation, key order kept.
    pub fn to_pretty_string(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.document).context("Failed to serialize workspace")
    }
}

/// The project's targets: `targets` when present, otherwise `architect`.
pub fn project_targets_mut(project: &mut Map<String, Value>) -> Option<&mut Map<String, Value>> {
    let key = if project.contains_key("targets") {
        "targets"
    } else {
        "architect"
    };
    project.get_mut(key).and_then(Value::as_object_mut)
}

/// Returns `package.json` content with `scripts.<name>` set to `value`, or
/// `None` when the file is absent.
pub fn add_package_json_script(
    package_json: &Path,
    name: &str,
    value: &str,
) -> Result<Option<String>> {
    if !package_json.is_file() {
        debug!("No package.json at {:?}", package_json);
        return Ok(None);
    }
    let content = fs::read_to_string(package_json)
        .with_context(|| format!("Failed to read {:?}", package_json))?;
    let mut document: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {:?}", package_json))?;
    let Some(root) = document.as_object_mut() else {
        anyhow::bail!(ScaffoldError::Workspace(format!(
            "{:?} must contain a JSON object.",
            package_json
        )));
    };
    let scripts = root.entry("scripts").or_insert_with(|| json!({}));
    let Some(scripts) = scripts.as_object_mut() else {
        anyhow::bail!(ScaffoldError::Workspace(format!(
            "\"scripts\" in {:?} must be an object.",
            package_json
        )));
    };
    scripts.insert(name.to_string(), Value::String(value.to_string()));
    let rendered =
        serde_json::to_string_pretty(&document).context("Failed to serialize package.json")?;
    Ok(Some(rendered))
}
