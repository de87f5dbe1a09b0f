use crate::domain::{AppError, TemplateSpec};

/// Port for reading static template families.
pub trait TemplateStore {
    /// Load a template by store-relative path such as `cdn/xray.json`.
    ///
    /// Fails with `AppError::MissingTemplate` when the file is absent.
    fn load(&self, path: &str) -> Result<TemplateSpec, AppError>;

    /// All template paths in the store, sorted.
    fn list(&self) -> Vec<String>;
}
