//! Configuration file discovery.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::{AppError, BootstrapConfig, parse_config_content};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "VPSBOOT_CONFIG";

/// Resolve which config file applies, if any.
///
/// Order: explicit path, `$VPSBOOT_CONFIG`, `$HOME/.config/vpsboot/config.toml`
/// when it exists. Explicit and environment paths must exist.
pub fn config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>, AppError> {
    if let Some(path) = explicit {
        return require_file(path.to_path_buf()).map(Some);
    }
    if let Some(path) = env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return require_file(PathBuf::from(path)).map(Some);
    }
    Ok(env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(".config/vpsboot/config.toml"))
        .filter(|path| path.is_file()))
}

/// Load the applicable configuration, falling back to defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<BootstrapConfig, AppError> {
    match config_path(explicit)? {
        Some(path) => {
            debug!(path = %path.display(), "loading configuration");
            let content = fs::read_to_string(&path)?;
            parse_config_content(&content).map_err(|err| match err {
                AppError::Configuration(msg) => {
                    AppError::Configuration(format!("{}: {}", path.display(), msg))
                }
                other => other,
            })
        }
        None => Ok(BootstrapConfig::default()),
    }
}

fn require_file(path: PathBuf) -> Result<PathBuf, AppError> {
    if !path.is_file() {
        return Err(AppError::config_error(format!("Config file not found: {}", path.display())));
    }
    Ok(path)
}
