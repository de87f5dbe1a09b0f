//! Listing of the template families known to the active store.

use crate::domain::{AppError, TemplateGroup};
use crate::ports::TemplateStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateListing {
    pub group: TemplateGroup,
    pub files: Vec<TemplateFileStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFileStatus {
    pub path: String,
    /// Placeholder keys, or `None` when the store lacks the file.
    pub placeholders: Option<Vec<String>>,
}

impl TemplateListing {
    /// A group renders only when every one of its files is present.
    pub fn is_complete(&self) -> bool {
        self.files.iter().all(|file| file.placeholders.is_some())
    }
}

pub fn execute(store: &impl TemplateStore) -> Result<Vec<TemplateListing>, AppError> {
    TemplateGroup::ALL
        .into_iter()
        .map(|group| {
            let files = group
                .files()
                .iter()
                .map(|file| {
                    let path = group.template_path(file);
                    let placeholders = match store.load(&path) {
                        Ok(template) => Some(template.placeholders().into_iter().collect()),
                        Err(AppError::MissingTemplate(_)) => None,
                        Err(err) => return Err(err),
                    };
                    Ok(TemplateFileStatus { path, placeholders })
                })
                .collect::<Result<Vec<_>, AppError>>()?;
            Ok(TemplateListing { group, files })
        })
        .collect()
}
