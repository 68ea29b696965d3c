//! # Scaffold File Change Plans
//!
//! File: cli/src/common/fs/plan.rs
//!
//! ## Overview
//!
//! Generators never write directly. They record every file they want to
//! create or update in a [`FilePlan`]; once the plan is complete it is either
//! printed (`--dry-run`) or committed. A failure while planning, such as a
//! generated file that already exists without `--force`, therefore leaves
//! the disk untouched.
//!
//! ## Output
//!
//! Each change is reported as one line, relative to the plan's base directory:
//!
//! ```text
//! CREATE Dockerfile (512 bytes)
//! OVERWRITE nginx.conf (230 bytes)
//! UPDATE scaffold.json (1024 bytes)
//! ```
//!
use crate::common::fs::io;
use crate::core::error::{Result, ScaffoldError};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What committing a change does to the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// A new file.
    Create,
    /// A generated file replacing an existing one (`--force`).
    Overwrite,
    /// An existing file patched in place (workspace, package.json).
    Update,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ChangeKind::Create => "CREATE",
            ChangeKind::Overwrite => "OVERWRITE",
            ChangeKind::Update => "UPDATE",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone)]
pub struct FileChange {
    pub path: PathBuf,
    pub content: Vec<u8>,
    pub kind: ChangeKind,
}

/// An ordered set of pending file changes.
#[derive(Debug)]
pub struct FilePlan {
    base: PathBuf,
    changes: Vec<FileChange>,
}

impl FilePlan {
    /// `base` is only used to display paths.
    pub fn new(base: &Path) -> Self {
        FilePlan {
            base: base.to_path_buf(),
            changes: Vec::new(),
        }
    }

    /// Plans a generated file. An existing file is an error unless `overwrite`.
    pub fn create(&mut self, path: PathBuf, content: Vec<u8>, overwrite: bool) -> Result<()> {
        let kind = if path.exists() {
            if !overwrite {
                anyhow::bail!(ScaffoldError::FileExists {
                    path: self.display_path(&path),
                });
            }
            ChangeKind::Overwrite
        } else {
            ChangeKind::Create
        };
        self.push(FileChange {
            path,
            content,
            kind,
        });
        Ok(())
    }

    /// Plans new content for an existing file.
    pub fn update(&mut self, path: PathBuf, content: Vec<u8>) {
        self.push(FileChange {
            path,
            content,
            kind: ChangeKind::Update,
        });
    }

    fn push(&mut self, change: FileChange) {
        // A later change to the same path replaces the earlier one.
        if let Some(existing) = self.changes.iter_mut().find(|c| c.path == change.path) {
            debug!("Replacing planned change for {:?}", change.path);
            existing.content = change.content;
            return;
        }
        self.changes.push(change);
    }

    pub fn changes(&self) -> &[FileChange] {
        &self.changes
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    fn display_path(&self, path: &Path) -> String {
        pathdiff::diff_paths(path, &self.base)
            .unwrap_or_else(|| path.to_path_buf())
            .to_string_lossy()
            .replace('\\', "/")
    }

    /// One `KIND path (N bytes)` line per change.
    pub fn summary(&self) -> Vec<String> {
        self.changes
            .iter()
            .map(|change| {
                format!(
                    "{} {} ({} bytes)",
                    change.kind,
                    self.display_path(&change.path),
                    change.content.len()
                )
            })
            .collect()
    }

    /// Writes every change to disk, in plan order.
    pub fn commit(self) -> Result<()> {
        for change in &self.changes {
            io::write_bytes_to_file(&change.path, &change.content)?;
        }
        info!("Committed {} file change(s).", self.changes.len());
        Ok(())
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_plan_summary_and_commit() -> Result<()> {
        let base = tempdir()?;
        fs::write(base.path().join("scaffold.json"), "{}")?;

        let mut plan = FilePlan::new(base.path());
        plan.create(base.path().join("Dockerfile"), b"FROM node".to_vec(), false)?;
        plan.update(base.path().join("scaffold.json"), b"{\"a\": 1}".to_vec());

        assert_eq!(
            plan.summary(),
            vec![
                "CREATE Dockerfile (9 bytes)".to_string(),
                "UPDATE scaffold.json (8 bytes)".to_string(),
            ]
        );
        assert!(!base.path().join("Dockerfile").exists());

        plan.commit()?;
        assert_eq!(fs::read_to_string(base.path().join("Dockerfile"))?, "FROM node");
        assert_eq!(
            fs::read_to_string(base.path().join("scaffold.json"))?,
            "{\"a\": 1}"
        );
        Ok(())
    }

    #[test]
    fn test_existing_file_requires_overwrite() -> Result<()> {
        let base = tempdir()?;
        let target = base.path().join("app/nginx.conf");
        fs::create_dir_all(target.parent().unwrap())?;
        fs::write(&target, "old")?;

        let mut plan = FilePlan::new(base.path());
        let err = plan.create(target.clone(), b"new".to_vec(), false).unwrap_err();
        assert_eq!(err.to_string(), "Path \"app/nginx.conf\" already exists.");
        assert!(plan.is_empty());

        plan.create(target.clone(), b"new".to_vec(), true)?;
        assert_eq!(plan.changes()[0].kind, ChangeKind::Overwrite);
        Ok(())
    }

    #[test]
    fn test_same_path_planned_twice_keeps_last_content() -> Result<()> {
        let base = tempdir()?;
        let mut plan = FilePlan::new(base.path());
        plan.create(base.path().join("a"), b"1".to_vec(), false)?;
        plan.create(base.path().join("a"), b"22".to_vec(), false)?;
        assert_eq!(plan.changes().len(), 1);
        assert_eq!(plan.changes()[0].content, b"22");
        Ok(())
    }
}
