//! API Facade for the application.
//!
//! Each function loads configuration, builds the context with the production
//! adapters, and runs one command.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::adapters::{DialoguerPrompter, ProcessCommandRunner, TemplateSource};
use crate::app::commands::{collect, doctor, plan, render, templates};
use crate::app::config::load_config;
use crate::app::AppContext;
use crate::domain::{Answers, Manifest};
use crate::services::launch_manifest;

pub use crate::app::commands::doctor::{DoctorOutcome, ToolCheck};
pub use crate::app::commands::plan::PlanOptions;
pub use crate::app::commands::render::{RenderOptions, RenderOutcome};
pub use crate::app::commands::templates::{TemplateFileStatus, TemplateListing};
pub use crate::domain::{AppError, RolePlan};
pub use crate::services::{LaunchResult, LaunchStatus};

/// Create an `AppContext` from the applicable configuration file.
fn create_context(
    config_path: Option<&Path>,
) -> Result<AppContext<TemplateSource, ProcessCommandRunner>, AppError> {
    let config = load_config(config_path)?;
    let templates = TemplateSource::from_config(&config.templates)?;
    info!(templates = %templates.describe(), "context ready");
    Ok(AppContext::new(config, templates, ProcessCommandRunner::new()))
}

/// Assign roles to `domains` without rendering.
pub fn plan(domains: &[String], options: &PlanOptions) -> Result<RolePlan, AppError> {
    plan::execute(domains, options)
}

#[derive(Debug, Clone, Default)]
pub struct RenderRequest {
    /// Answers file; prompts interactively when absent.
    pub answers_file: Option<PathBuf>,
    pub output_root: Option<PathBuf>,
}

#[derive(Debug)]
pub struct RenderRun {
    pub outcome: RenderOutcome,
    /// Whether the operator asked to be offered launches.
    pub launch_requested: bool,
}

/// Collect answers and render every applicable group.
pub fn render(config_path: Option<&Path>, request: &RenderRequest) -> Result<RenderRun, AppError> {
    let ctx = create_context(config_path)?;

    let (answers, plan) = match &request.answers_file {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|err| {
                AppError::config_error(format!(
                    "Failed to read answers file {}: {}",
                    path.display(),
                    err
                ))
            })?;
            let answers = Answers::parse_toml(&content)?;
            let plan = answers.role_plan()?;
            (answers, plan)
        }
        None => collect::collect_answers(&DialoguerPrompter::new(), ctx.config())?,
    };

    let options = RenderOptions { output_root: request.output_root.clone() };
    let outcome = render::execute(&ctx, &plan, &answers, &options)?;
    Ok(RenderRun { outcome, launch_requested: answers.launch })
}

/// Offer each descriptor in `manifest` to the container engine.
pub fn launch(config_path: Option<&Path>, manifest: &Manifest) -> Result<Vec<LaunchResult>, AppError> {
    let ctx = create_context(config_path)?;
    launch_manifest(manifest, &ctx.config().commands.compose, ctx.runner(), &DialoguerPrompter::new())
}

/// Template files of the active store and their placeholders.
pub fn templates(config_path: Option<&Path>) -> Result<(String, Vec<TemplateListing>), AppError> {
    let ctx = create_context(config_path)?;
    let listings = templates::execute(ctx.templates())?;
    Ok((ctx.templates().describe(), listings))
}

/// Check availability of the configured external programs.
pub fn doctor(config_path: Option<&Path>) -> Result<DoctorOutcome, AppError> {
    let ctx = create_context(config_path)?;
    doctor::execute(ctx.config(), ctx.runner())
}
