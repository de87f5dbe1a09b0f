use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::domain::{AppError, TemplateSpec};
use crate::ports::TemplateStore;

/// Template families read from a directory with the embedded layout.
#[derive(Debug, Clone)]
pub struct FilesystemTemplateStore {
    root: PathBuf,
}

impl FilesystemTemplateStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateStore for FilesystemTemplateStore {
    fn load(&self, path: &str) -> Result<TemplateSpec, AppError> {
        let relative = Path::new(path);
        if relative.components().any(|c| !matches!(c, Component::Normal(_))) {
            return Err(AppError::config_error(format!("Invalid template path: {}", path)));
        }
        match fs::read_to_string(self.root.join(relative)) {
            Ok(text) => Ok(TemplateSpec::new(path, text)),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(AppError::MissingTemplate(path.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn list(&self) -> Vec<String> {
        let mut paths = Vec::new();
        collect_paths(&self.root, &self.root, &mut paths);
        paths.sort();
        paths
    }
}

fn collect_paths(base: &Path, dir: &Path, paths: &mut Vec<String>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_paths(base, &path, paths);
        } else if let Ok(relative) = path.strip_prefix(base) {
            paths.push(relative.to_string_lossy().replace('\\', "/"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn loads_and_lists_override_templates() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("cdn")).unwrap();
        fs::write(dir.path().join("cdn/nginx.conf"), "listen {{CDN_PORT}};").unwrap();

        let store = FilesystemTemplateStore::new(dir.path().to_path_buf());
        let template = store.load("cdn/nginx.conf").unwrap();
        assert_eq!(template.source, "cdn/nginx.conf");
        assert_eq!(template.text, "listen {{CDN_PORT}};");
        assert_eq!(store.list(), vec!["cdn/nginx.conf"]);
    }

    #[test]
    fn absent_file_is_missing_template() {
        let dir = TempDir::new().unwrap();
        let store = FilesystemTemplateStore::new(dir.path().to_path_buf());
        assert!(matches!(store.load("cdn/xray.json"), Err(AppError::MissingTemplate(_))));
    }

    #[test]
    fn rejects_escaping_paths() {
        let dir = TempDir::new().unwrap();
        let store = FilesystemTemplateStore::new(dir.path().to_path_buf());
        assert!(matches!(store.load("../etc/passwd"), Err(AppError::Configuration(_))));
    }
}
