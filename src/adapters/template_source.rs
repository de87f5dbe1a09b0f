use std::path::PathBuf;

use crate::adapters::{EmbeddedTemplateStore, FilesystemTemplateStore};
use crate::domain::{AppError, TemplateSpec, TemplatesConfig};
use crate::ports::TemplateStore;

/// The template store selected by configuration.
///
/// A configured directory replaces the embedded families entirely; families
/// it lacks are skipped at render time.
#[derive(Debug, Clone)]
pub enum TemplateSource {
    Embedded(EmbeddedTemplateStore),
    Directory(FilesystemTemplateStore),
}

impl TemplateSource {
    pub fn from_config(config: &TemplatesConfig) -> Result<Self, AppError> {
        match &config.dir {
            Some(dir) => Self::directory(dir.clone()),
            None => Ok(TemplateSource::Embedded(EmbeddedTemplateStore::new())),
        }
    }

    fn directory(dir: PathBuf) -> Result<Self, AppError> {
        if !dir.is_dir() {
            return Err(AppError::config_error(format!(
                "templates.dir is not a directory: {}",
                dir.display()
            )));
        }
        Ok(TemplateSource::Directory(FilesystemTemplateStore::new(dir)))
    }

    pub fn describe(&self) -> String {
        match self {
            TemplateSource::Embedded(_) => "embedded".to_string(),
            TemplateSource::Directory(store) => store.root().display().to_string(),
        }
    }
}

impl TemplateStore for TemplateSource {
    fn load(&self, path: &str) -> Result<TemplateSpec, AppError> {
        match self {
            TemplateSource::Embedded(store) => store.load(path),
            TemplateSource::Directory(store) => store.load(path),
        }
    }

    fn list(&self) -> Vec<String> {
        match self {
            TemplateSource::Embedded(store) => store.list(),
            TemplateSource::Directory(store) => store.list(),
        }
    }
}
