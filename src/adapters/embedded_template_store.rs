use include_dir::{Dir, DirEntry, include_dir};

use crate::domain::{AppError, TemplateSpec};
use crate::ports::TemplateStore;

static TEMPLATES_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/templates");

/// Template families compiled into the binary.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedTemplateStore;

impl EmbeddedTemplateStore {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateStore for EmbeddedTemplateStore {
    fn load(&self, path: &str) -> Result<TemplateSpec, AppError> {
        let file =
            TEMPLATES_DIR.get_file(path).ok_or_else(|| AppError::MissingTemplate(path.to_string()))?;
        let text = file.contents_utf8().ok_or_else(|| {
            AppError::config_error(format!("Embedded template is not UTF-8: {}", path))
        })?;
        Ok(TemplateSpec::new(path, text))
    }

    fn list(&self) -> Vec<String> {
        let mut paths = Vec::new();
        collect_paths(&TEMPLATES_DIR, &mut paths);
        paths.sort();
        paths
    }
}

fn collect_paths(dir: &'static Dir, paths: &mut Vec<String>) {
    for entry in dir.entries() {
        match entry {
            DirEntry::File(file) => paths.push(file.path().to_string_lossy().replace('\\', "/")),
            DirEntry::Dir(subdir) => collect_paths(subdir, paths),
        }
    }
}
