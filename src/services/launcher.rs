use std::path::PathBuf;

use tracing::info;

use crate::domain::{AppError, Manifest};
use crate::ports::{CommandRunner, Prompter};

/// What happened to one manifest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchStatus {
    Launched,
    Declined,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchResult {
    pub path: PathBuf,
    pub status: LaunchStatus,
}

/// Offer each descriptor to the container engine, confirming every launch.
///
/// A missing engine aborts before anything is prompted.
pub fn launch_manifest(
    manifest: &Manifest,
    compose: &[String],
    runner: &impl CommandRunner,
    prompter: &impl Prompter,
) -> Result<Vec<LaunchResult>, AppError> {
    if manifest.is_empty() {
        return Ok(Vec::new());
    }
    let program =
        compose.first().ok_or_else(|| AppError::config_error("commands.compose is empty"))?;
    if !runner.is_available(program) {
        return Err(AppError::CommandNotFound(program.clone()));
    }

    let mut results = Vec::with_capacity(manifest.len());
    for entry in manifest.entries() {
        let path = entry.path.display().to_string();
        let status = if prompter.confirm(&format!("Launch {} ({})?", entry.group, path), true)? {
            let mut argv = compose.to_vec();
            argv.extend(["-f".to_string(), path.clone(), "up".to_string(), "-d".to_string()]);
            runner.run(&argv)?;
            info!(descriptor = %path, "launched");
            LaunchStatus::Launched
        } else {
            LaunchStatus::Declined
        };
        results.push(LaunchResult { path: entry.path.clone(), status });
    }
    Ok(results)
}
