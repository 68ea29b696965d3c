//! # Scaffold Template System
//!
//! File: cli/src/core/templating.rs
//!
//! ## Overview
//!
//! This module renders generator templates with the Tera engine. Rendering
//! only produces [`RenderedFile`]s in memory; generators decide whether and
//! where to write them, which lets `--dry-run` and overwrite checks happen
//! before anything touches the disk.
//!
//! ## Architecture
//!
//! Two sources are supported:
//! - **Built-in templates**: `(path, content)` pairs compiled into the binary.
//! - **Template directories**: a directory walked recursively. Files whose
//!   name ends with one of the template extensions (`.tera`, `.template`,
//!   `.tmpl`, case-insensitive) are rendered and lose the extension; all
//!   other files are copied verbatim. `.git` directories are skipped.
//!
//! In both cases the relative path itself may contain Tera expressions, e.g.
//! `docker-compose.{{ environment }}.yml`.
//!
//! Templates are rendered without HTML autoescaping since the outputs are
//! Dockerfiles, YAML and nginx configuration.
//!
use crate::core::error::{Result, ScaffoldError};
use anyhow::{anyhow, Context};
use std::fs;
use std::path::{Path, PathBuf};
use tera::Tera;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Extensions that mark a file in a template directory as a template.
pub const TEMPLATE_EXTENSIONS: [&str; 3] = [".tera", ".template", ".tmpl"];

/// A file produced by rendering, relative to the generation root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub relative_path: PathBuf,
    pub content: Vec<u8>,
}

fn render_str(template: &str, context: &tera::Context, origin: &str) -> Result<String> {
    Tera::one_off(template, context, false).map_err(|e| {
        anyhow!(ScaffoldError::Template { source: e })
            .context(format!("Tera rendering failed for template '{}'", origin))
    })
}

/// Renders a relative path template. Paths without `{{` are returned as is.
fn render_path(path: &str, context: &tera::Context) -> Result<PathBuf> {
    if !path.contains("{{") {
        return Ok(PathBuf::from(path));
    }
    let rendered = render_str(path, context, path)?;
    if rendered.trim().is_empty() {
        anyhow::bail!(ScaffoldError::Template {
            source: tera::Error::msg(format!("Path template '{}' rendered to nothing", path)),
        });
    }
    Ok(PathBuf::from(rendered))
}

/// Renders built-in `(path, content)` templates.
pub fn render_templates(
    templates: &[(&str, &str)],
    context: &tera::Context,
) -> Result<Vec<RenderedFile>> {
    let mut rendered = Vec::with_capacity(templates.len());
    for (path, content) in templates {
        let relative_path = render_path(path, context)?;
        let output = render_str(content, context, path)?;
        debug!("Rendered built-in template '{}' -> '{}'", path, relative_path.display());
        rendered.push(RenderedFile {
            relative_path,
            content: output.into_bytes(),
        });
    }
    Ok(rendered)
}

/// Renders every file below `source_dir`.
///
/// # Errors
///
/// Fails when the directory cannot be read, a file cannot be read, or a
/// template does not render.
pub fn render_template_directory(
    source_dir: &Path,
    context: &tera::Context,
    template_extensions: &[&str],
) -> Result<Vec<RenderedFile>> {
    info!(
        "Rendering templates from directory '{}'",
        source_dir.display()
    );
    if !source_dir.is_dir() {
        anyhow::bail!(ScaffoldError::FileSystem(format!(
            "Template directory '{}' does not exist or is not a directory",
            source_dir.display()
        )));
    }

    let mut rendered = Vec::new();
    let walker = WalkDir::new(source_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.file_name() != ".git");
    for entry_result in walker {
        let entry = entry_result.with_context(|| {
            format!(
                "Failed to walk template directory '{}'",
                source_dir.display()
            )
        })?;
        if !entry.file_type().is_file() {
            if !entry.file_type().is_dir() {
                warn!(
                    "Skipping unsupported file system entry type at '{}'",
                    entry.path().display()
                );
            }
            continue;
        }
        let src_path = entry.path();
        let Ok(relative_path) = src_path.strip_prefix(source_dir) else {
            warn!(
                "Could not determine relative path for '{}' based on '{}'",
                src_path.display(),
                source_dir.display()
            );
            continue;
        };
        let relative = relative_path.to_string_lossy().replace('\\', "/");
        let lowercase = relative.to_lowercase();
        let matching_ext = template_extensions
            .iter()
            .find(|ext| lowercase.ends_with(&ext.to_lowercase()));

        let file = if let Some(ext) = matching_ext {
            let template_content = fs::read_to_string(src_path).with_context(|| {
                format!("Failed to read template file '{}'", src_path.display())
            })?;
            let stripped = &relative[..relative.len() - ext.len()];
            let output = render_str(&template_content, context, &src_path.display().to_string())?;
            debug!("Rendered template file: {}", src_path.display());
            RenderedFile {
                relative_path: render_path(stripped, context)?,
                content: output.into_bytes(),
            }
        } else {
            let content = fs::read(src_path)
                .with_context(|| format!("Failed to read file '{}'", src_path.display()))?;
            debug!("Copying non-template file: {}", src_path.display());
            RenderedFile {
                relative_path: render_path(&relative, context)?,
                content,
            }
        };
        rendered.push(file);
    }
    info!("Rendered {} file(s) from template directory.", rendered.len());
    Ok(rendered)
}
