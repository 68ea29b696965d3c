//! # Scaffold Configuration Management
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads the scaffold configuration. Settings come from two
//! optional TOML files:
//! - the user file `config.toml` in the platform config directory
//!   (e.g. `~/.config/scaffold/config.toml` on Linux)
//! - a project file `.scaffold.toml` found in the current directory or an
//!   ancestor (the search stops at a directory containing `.git`)
//!
//! Project settings win over user settings field by field. Every field is
//! optional in the files; a value set explicitly in the project file wins
//! even when it equals the built-in default. Accessors such as
//! [`WorkspaceConfig::file`] apply the defaults.
//!
//! ## Example
//!
//! ```toml
//! [workspace]
//! file = "scaffold.json"
//!
//! [docker]
//! environment = "staging"
//! image_registry = "registry.example.com"
//! templates_dir = "~/.config/scaffold/docker-templates"
//! compose_command = "docker compose up -d --build"
//! ```
//!
use crate::core::error::{Result, ScaffoldError};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub workspace: WorkspaceConfig,
    #[serde(default)]
    pub docker: DockerConfig,
}

/// Where the workspace file lives.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct WorkspaceConfig {
    /// File name searched for from the current directory upwards.
    #[serde(rename = "file")]
    pub file_name: Option<String>,
}

impl WorkspaceConfig {
    /// The workspace file name, `scaffold.json` unless configured.
    pub fn file(&self) -> &str {
        self.file_name.as_deref().unwrap_or(DEFAULT_WORKSPACE_FILE)
    }
}

/// Defaults and behavior of `scaffold docker`.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct DockerConfig {
    /// Environment used when `--environment` is not given.
    pub environment: Option<String>,
    /// Registry used when `--image-registry` is not given.
    pub image_registry: Option<String>,
    /// Organization used when `--image-org` is not given.
    pub image_org: Option<String>,
    /// Directory of templates replacing the built-in ones (can use ~).
    pub templates_dir: Option<String>,
    /// Value of the `docker` script added to `package.json`.
    pub compose_command: Option<String>,
    /// Skip the check for the `docker` executable.
    pub skip_cli_check: Option<bool>,
}

impl DockerConfig {
    pub fn compose_command(&self) -> &str {
        self.compose_command
            .as_deref()
            .unwrap_or(DEFAULT_COMPOSE_COMMAND)
    }

    pub fn skip_cli_check(&self) -> bool {
        self.skip_cli_check.unwrap_or(false)
    }
}

const DEFAULT_WORKSPACE_FILE: &str = "scaffold.json";
const DEFAULT_COMPOSE_COMMAND: &str = "docker-compose up -d --build";

const PROJECT_CONFIG_FILENAME: &str = ".scaffold.toml";

/// Loads, merges, expands and validates the configuration.
pub fn load_config() -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config()?;
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    expand_config_paths(&mut merged_config);
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("dev", "Scaffold", "scaffold") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.scaffold.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project_cfg = match project {
        Some(p) => p,
        None => return user,
    };
    let mut merged = Config::default();
    merged.workspace.file_name = project_cfg
        .workspace
        .file_name
        .or(user.workspace.file_name);
    merged.docker.environment = project_cfg.docker.environment.or(user.docker.environment);
    merged.docker.image_registry = project_cfg
        .docker
        .image_registry
        .or(user.docker.image_registry);
    merged.docker.image_org = project_cfg.docker.image_org.or(user.docker.image_org);
    merged.docker.templates_dir = project_cfg
        .docker
        .templates_dir
        .or(user.docker.templates_dir);
    merged.docker.compose_command = project_cfg
        .docker
        .compose_command
        .or(user.docker.compose_command);
    merged.docker.skip_cli_check = project_cfg
        .docker
        .skip_cli_check
        .or(user.docker.skip_cli_check);
    merged
}

fn expand_config_paths(config: &mut Config) {
    if let Some(dir) = &mut config.docker.templates_dir {
        *dir = shellexpand::tilde(dir.as_str()).into_owned();
        debug!("Expanded docker templates directory: {}", dir);
    }
}

fn validate_config(config: &Config) -> Result<()> {
    if config.workspace.file().trim().is_empty() {
        return Err(anyhow!(ScaffoldError::Config(
            "Workspace file name cannot be empty.".to_string()
        )));
    }
    if let Some(dir) = &config.docker.templates_dir {
        let dir = PathBuf::from(dir);
        if !dir.is_dir() {
            return Err(anyhow!(ScaffoldError::Config(format!(
                "Configured docker templates directory '{}' is not a directory.",
                dir.display()
            ))));
        }
    }
    if config.docker.compose_command().trim().is_empty() {
        return Err(anyhow!(ScaffoldError::Config(
            "docker.compose_command cannot be empty.".to_string()
        )));
    }
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_deserialize_basic_toml() {
        let toml_content = r#"
            [workspace]
            file = "angular.json"

            [docker]
            environment = "staging"
            image_registry = "registry.example.com"
            templates_dir = "~/tmpl"
        "#;

        let config: Config = toml::from_str(toml_content).expect("Failed to parse TOML");

        assert_eq!(config.workspace.file(), "angular.json");
        assert_eq!(config.docker.environment.as_deref(), Some("staging"));
        assert_eq!(
            config.docker.image_registry.as_deref(),
            Some("registry.example.com")
        );
        assert_eq!(config.docker.image_org, None);
        assert_eq!(config.docker.templates_dir.as_deref(), Some("~/tmpl")); // Not yet expanded
        assert_eq!(config.docker.compose_command(), DEFAULT_COMPOSE_COMMAND);
        assert!(!config.docker.skip_cli_check());
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: std::result::Result<Config, _> = toml::from_str("[docker]\nregistry = \"x\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_project_over_user() {
        let user: Config = toml::from_str(
            r#"
            [docker]
            environment = "prod"
            image_org = "acme"
            compose_command = "docker compose up"
        "#,
        )
        .unwrap();
        let project: Config = toml::from_str(
            r#"
            [workspace]
            file = "workspace.json"
            [docker]
            environment = "qa"
        "#,
        )
        .unwrap();

        let merged = merge_configs(user, Some(project));
        assert_eq!(merged.workspace.file(), "workspace.json");
        assert_eq!(merged.docker.environment.as_deref(), Some("qa"));
        assert_eq!(merged.docker.image_org.as_deref(), Some("acme"));
        assert_eq!(merged.docker.compose_command(), "docker compose up");
    }

    #[test]
    fn test_merge_without_project_keeps_user() {
        let mut user = Config::default();
        user.docker.skip_cli_check = Some(true);
        let merged = merge_configs(user, None);
        assert!(merged.docker.skip_cli_check());
        assert_eq!(merged.workspace.file(), "scaffold.json");
    }

    #[test]
    fn test_explicit_project_values_win_even_when_default() {
        let user: Config = toml::from_str(
            r#"
            [workspace]
            file = "workspace.json"
            [docker]
            compose_command = "docker compose up"
            skip_cli_check = true
        "#,
        )
        .unwrap();
        let project: Config = toml::from_str(
            r#"
            [workspace]
            file = "scaffold.json"
            [docker]
            compose_command = "docker-compose up -d --build"
            skip_cli_check = false
        "#,
        )
        .unwrap();

        let merged = merge_configs(user, Some(project));
        assert_eq!(merged.workspace.file(), "scaffold.json");
        assert_eq!(merged.docker.compose_command(), DEFAULT_COMPOSE_COMMAND);
        assert!(!merged.docker.skip_cli_check());
    }

    #[test]
    fn test_unset_project_values_fall_back_to_user() {
        let user: Config = toml::from_str("[docker]\nskip_cli_check = true\n").unwrap();
        let project: Config = toml::from_str("[docker]\nenvironment = \"qa\"\n").unwrap();
        let merged = merge_configs(user, Some(project));
        assert!(merged.docker.skip_cli_check());
        assert_eq!(merged.docker.environment.as_deref(), Some("qa"));
    }

    #[test]
    fn test_path_expansion() {
        let mut config = Config::default();
        config.docker.templates_dir = Some("~/docker_tmpl".to_string());
        expand_config_paths(&mut config);

        let home_dir = dirs::home_dir().unwrap();
        assert_eq!(
            config.docker.templates_dir.as_deref(),
            Some(home_dir.join("docker_tmpl").to_string_lossy().as_ref())
        );
    }

    #[test]
    fn test_validate_config() {
        let temp_dir = tempdir().unwrap();
        let mut config = Config::default();
        assert!(validate_config(&config).is_ok());

        config.docker.templates_dir = Some(temp_dir.path().to_string_lossy().into_owned());
        assert!(validate_config(&config).is_ok());

        config.docker.templates_dir = Some(
            temp_dir
                .path()
                .join("missing")
                .to_string_lossy()
                .into_owned(),
        );
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("is not a directory"));

        let mut config = Config::default();
        config.workspace.file_name = Some("  ".to_string());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_find_project_config_path() {
        let temp_dir = tempdir().unwrap();
        let nested = temp_dir.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir(temp_dir.path().join(".git")).unwrap();
        assert_eq!(find_project_config_path(&nested), None);

        let config_path = temp_dir.path().join("a").join(PROJECT_CONFIG_FILENAME);
        fs::write(&config_path, "[docker]\n").unwrap();
        assert_eq!(find_project_config_path(&nested), Some(config_path));
    }
}
