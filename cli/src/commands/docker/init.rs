//! # Scaffold Docker Init Action
//!
//! File: cli/src/commands/docker/init.rs
//!
//! ## Overview
//!
//! Implements `scaffold docker init`, which adds Docker support to an
//! application project of the current workspace:
//!
//! - `Dockerfile`, `.dockerignore`, `docker-compose.yml`,
//!   `docker-compose.<environment>.yml` and `nginx.conf` in the project root
//! - a `docker` build configuration in the workspace file
//! - a `docker` script in the workspace `package.json` (when present)
//!
//! ## Architecture
//!
//! 1. Load the workspace and resolve the generator options (`options.rs`).
//! 2. Validate the project (must exist, be an `application`, have targets).
//! 3. Render the templates, built-in or from a configured directory.
//! 4. Record every file into a `FilePlan`; existing generated files abort
//!    the run unless `--force`.
//! 5. Print the plan; commit it unless `--dry-run`.
//!
//! ## Examples
//!
//! ```bash
//! scaffold docker init
//! scaffold docker init --dry-run -- staging --project web --service-port 8080
//! ```
//!
use super::options::{self, DockerOptions, SmartDefaultContext};
use crate::common::fs::plan::FilePlan;
use crate::core::config::Config;
use crate::core::error::{Result, ScaffoldError};
use crate::core::templating::{self, RenderedFile, TEMPLATE_EXTENSIONS};
use crate::core::workspace::{add_package_json_script, project_targets_mut, Workspace};
use anyhow::{anyhow, Context};
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Built-in templates: `(path relative to the project root, template)`.
const BUILTIN_TEMPLATES: [(&str, &str); 5] = [
    ("Dockerfile", include_str!("../../../templates/docker/Dockerfile.tera")),
    (".dockerignore", include_str!("../../../templates/docker/dockerignore.tera")),
    (
        "docker-compose.yml",
        include_str!("../../../templates/docker/docker-compose.yml.tera"),
    ),
    (
        "docker-compose.{{ environment }}.yml",
        include_str!("../../../templates/docker/docker-compose.env.yml.tera"),
    ),
    ("nginx.conf", include_str!("../../../templates/docker/nginx.conf.tera")),
];

/// Inputs of one `init` run besides the configuration.
#[derive(Debug, Clone, Default)]
pub struct InitRequest {
    /// Directory the workspace search starts from.
    pub cwd: PathBuf,
    /// Raw arguments given after `--`.
    pub generator_args: Vec<String>,
    /// Overrides `docker.templates_dir` from the configuration.
    pub templates_dir: Option<PathBuf>,
    pub force: bool,
}

/// Handles `scaffold docker init`.
pub async fn handle_init(request: InitRequest, cfg: &Config, dry_run: bool) -> Result<()> {
    info!("Handling docker init command...");
    let plan = plan_init(&request, cfg)?;

    if plan.is_empty() {
        println!("Nothing to do.");
        return Ok(());
    }
    for line in plan.summary() {
        println!("{}", line);
    }
    if dry_run {
        println!("\nNOTE: The \"--dry-run\" option means no changes were made.");
        return Ok(());
    }
    plan.commit().context("Failed to write docker files")?;
    Ok(())
}

/// Computes every file change of an `init` run without touching the disk.
pub fn plan_init(request: &InitRequest, cfg: &Config) -> Result<FilePlan> {
    let mut workspace = Workspace::discover(&request.cwd, cfg.workspace.file())?;

    let descriptors = options::generator_options()?;
    let context = SmartDefaultContext {
        default_project: workspace.default_project(),
    };
    let resolved = options::resolve(
        &request.generator_args,
        &descriptors,
        &configured_defaults(cfg),
        &context,
    )?;
    let options = DockerOptions::from_resolved(resolved)?;
    info!(
        "Adding docker support to project '{}' for environment '{}'",
        options.project, options.environment
    );

    let project = workspace.project(&options.project).ok_or_else(|| {
        anyhow!(ScaffoldError::Workspace(
            "Project is not defined in this workspace.".to_string()
        ))
    })?;
    let project_type = project.get("projectType").and_then(Value::as_str);
    if project_type != Some("application") {
        anyhow::bail!(ScaffoldError::Workspace(
            "Docker requires a project type of \"application\".".to_string()
        ));
    }
    let project_root = workspace
        .project_root(&options.project)
        .unwrap_or_else(|| workspace.root.clone());

    let templates_dir = request
        .templates_dir
        .clone()
        .or_else(|| cfg.docker.templates_dir.as_ref().map(PathBuf::from));
    let files = render_docker_files(
        &options,
        &project_root,
        &workspace.root,
        templates_dir.as_deref(),
    )?;

    let mut plan = FilePlan::new(&workspace.root);
    for file in files {
        plan.create(project_root.join(&file.relative_path), file.content, request.force)?;
    }

    update_workspace_config(&mut workspace, &options)?;
    plan.update(workspace.path.clone(), workspace.to_pretty_string()?.into_bytes());

    let package_json = workspace.root.join("package.json");
    let scripts = add_package_json_script(&package_json, "docker", cfg.docker.compose_command())?;
    match scripts {
        Some(content) => plan.update(package_json, content.into_bytes()),
        None => warn!(
            "No package.json found at {}; skipping the docker script.",
            package_json.display()
        ),
    }

    Ok(plan)
}

/// Generator defaults coming from the `[docker]` configuration section.
fn configured_defaults(cfg: &Config) -> Map<String, Value> {
    let mut configured = Map::new();
    let entries = [
        ("environment", &cfg.docker.environment),
        ("imageRegistry", &cfg.docker.image_registry),
        ("imageOrg", &cfg.docker.image_org),
    ];
    for (name, value) in entries {
        if let Some(value) = value {
            configured.insert(name.to_string(), Value::String(value.clone()));
        }
    }
    configured
}

fn render_docker_files(
    options: &DockerOptions,
    project_root: &Path,
    workspace_root: &Path,
    templates_dir: Option<&Path>,
) -> Result<Vec<RenderedFile>> {
    let mut context = tera::Context::from_serialize(options)
        .map_err(|e| anyhow!(ScaffoldError::Template { source: e }))
        .context("Failed to create Tera context from docker options")?;
    let relative_root = pathdiff::diff_paths(project_root, workspace_root)
        .unwrap_or_default()
        .to_string_lossy()
        .replace('\\', "/");
    context.insert("projectRoot", &relative_root);
    context.insert("imageReference", &options.image_reference());
    context.insert(
        "generatedOn",
        &chrono::Local::now().format("%Y-%m-%d").to_string(),
    );
    // Templates that check `{% if imageOrg %}` need the key even when unset.
    if options.image_org.is_none() {
        context.insert("imageOrg", &"");
    }

    match templates_dir {
        Some(dir) => {
            info!("Using docker templates from '{}'", dir.display());
            templating::render_template_directory(dir, &context, &TEMPLATE_EXTENSIONS)
        }
        None => {
            debug!("Using built-in docker templates");
            templating::render_templates(&BUILTIN_TEMPLATES, &context)
        }
    }
}

/// Writes the `docker` configuration into the project's build target.
///
/// An existing `build.configurations.docker` gains (or replaces) the entry
/// for the current environment. Otherwise a new docker configuration is
/// created, under `build.configurations` when that exists and under `build`
/// itself when it does not.
fn update_workspace_config(workspace: &mut Workspace, options: &DockerOptions) -> Result<()> {
    debug!("updating workspace file.");
    let project = workspace.project_mut(&options.project).ok_or_else(|| {
        anyhow!(ScaffoldError::Workspace(
            "Project is not defined in this workspace.".to_string()
        ))
    })?;
    let targets = project_targets_mut(project).ok_or_else(|| {
        anyhow!(ScaffoldError::Workspace(
            "Target is not defined for this project.".to_string()
        ))
    })?;
    let build = targets
        .get_mut("build")
        .and_then(Value::as_object_mut)
        .ok_or_else(|| {
            anyhow!(ScaffoldError::Workspace(
                "Build target is not defined for this project.".to_string()
            ))
        })?;

    let environment_options = json!({
        "machineName": options.machine_name,
        "isImageDeploy": false,
        "serviceName": options.service_name,
    });

    let existing = build
        .get("configurations")
        .and_then(|configurations| configurations.get("docker"))
        .and_then(Value::as_object)
        .cloned();
    let docker = match existing {
        Some(mut docker) => {
            let environments = docker
                .entry("environments")
                .or_insert_with(|| json!({}));
            if !environments.is_object() {
                *environments = json!({});
            }
            if let Some(environments) = environments.as_object_mut() {
                environments.insert(options.environment.clone(), environment_options);
            }
            Value::Object(docker)
        }
        None => {
            let mut environments = Map::new();
            environments.insert(options.environment.clone(), environment_options);
            json!({
                "imageName": options.image_name,
                "registryAddress": options.image_registry,
                "environments": environments,
            })
        }
    };

    let use_configurations = !options.environment.is_empty()
        && build.get("configurations").is_some_and(Value::is_object);
    let apply_to = if use_configurations {
        build
            .get_mut("configurations")
            .and_then(Value::as_object_mut)
            .ok_or_else(|| anyhow!("build.configurations disappeared while updating"))?
    } else {
        build
    };
    apply_to.insert("docker".to_string(), docker);
    Ok(())
}
