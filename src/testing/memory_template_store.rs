use std::collections::BTreeMap;

use crate::domain::{AppError, TemplateSpec};
use crate::ports::TemplateStore;

/// In-memory template store for tests.
#[derive(Debug, Default)]
pub struct MemoryTemplateStore {
    templates: BTreeMap<String, String>,
}

#[allow(dead_code)]
impl MemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: &str, text: &str) -> Self {
        self.templates.insert(path.to_string(), text.to_string());
        self
    }

    /// Copy of every embedded template except `skip`.
    pub fn embedded_without(skip: &[&str]) -> Self {
        use crate::adapters::EmbeddedTemplateStore;

        let embedded = EmbeddedTemplateStore::new();
        let mut store = Self::new();
        for path in embedded.list() {
            if skip.contains(&path.as_str()) {
                continue;
            }
            let template = embedded.load(&path).expect("embedded template");
            store.templates.insert(path, template.text);
        }
        store
    }
}

impl TemplateStore for MemoryTemplateStore {
    fn load(&self, path: &str) -> Result<TemplateSpec, AppError> {
        self.templates
            .get(path)
            .map(|text| TemplateSpec::new(path, text.clone()))
            .ok_or_else(|| AppError::MissingTemplate(path.to_string()))
    }

    fn list(&self) -> Vec<String> {
        self.templates.keys().cloned().collect()
    }
}
