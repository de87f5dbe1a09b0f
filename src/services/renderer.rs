use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::domain::{
    AppError, GeneratedArtifact, RenderContext, TemplateGroup, TemplateSpec, render,
};
use crate::ports::TemplateStore;

/// Render `template` and write it to `destination`, creating parent
/// directories and overwriting any existing file.
pub fn render_to_file(
    template: &TemplateSpec,
    context: &RenderContext,
    destination: &Path,
) -> Result<GeneratedArtifact, AppError> {
    let content = render(template, context);
    for key in template.placeholders() {
        if context.get(&key).is_none() {
            warn!(template = %template.source, key = %key, "placeholder left unresolved");
        }
    }
    if let Some(problem) = syntax_problem(destination, &content) {
        warn!(path = %destination.display(), %problem, "rendered file does not parse");
    }
    write_artifact(destination, content)
}

/// Parse YAML and JSON output by extension; other formats are not checked.
pub fn syntax_problem(destination: &Path, content: &str) -> Option<String> {
    match destination.extension().and_then(|ext| ext.to_str()) {
        Some("yml" | "yaml") => {
            serde_yaml::from_str::<serde_yaml::Value>(content).err().map(|e| e.to_string())
        }
        Some("json") => {
            serde_json::from_str::<serde_json::Value>(content).err().map(|e| e.to_string())
        }
        _ => None,
    }
}

/// Write non-template output (key files, summaries) with the same semantics as
/// [`render_to_file`].
pub fn write_artifact(destination: &Path, content: String) -> Result<GeneratedArtifact, AppError> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(destination, &content)?;
    debug!(path = %destination.display(), bytes = content.len(), "wrote artifact");
    Ok(GeneratedArtifact { destination: destination.to_path_buf(), content })
}

/// Renders whole template families into `<out_dir>/<family>/`.
pub struct GroupRenderer<'a, S: TemplateStore> {
    store: &'a S,
    out_dir: PathBuf,
}

impl<'a, S: TemplateStore> GroupRenderer<'a, S> {
    pub fn new(store: &'a S, out_dir: PathBuf) -> Self {
        Self { store, out_dir }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Output path for a file of `group`.
    pub fn destination(&self, group: TemplateGroup, file: &str) -> PathBuf {
        self.out_dir.join(group.family()).join(file)
    }

    /// Render every file of `group`, descriptor first.
    ///
    /// All templates are loaded before anything is written, so a missing
    /// template leaves the group's output untouched.
    pub fn render_group(
        &self,
        group: TemplateGroup,
        context: &RenderContext,
    ) -> Result<Vec<GeneratedArtifact>, AppError> {
        let loaded = self.load_group(group)?;
        self.write_group(&loaded, context)
    }

    /// Load every template of `group` without writing anything.
    pub fn load_group(&self, group: TemplateGroup) -> Result<LoadedGroup, AppError> {
        let templates = group
            .files()
            .iter()
            .map(|file| Ok((*file, self.store.load(&group.template_path(file))?)))
            .collect::<Result<Vec<_>, AppError>>()?;
        Ok(LoadedGroup { group, templates })
    }

    /// Render and write a group loaded by [`GroupRenderer::load_group`].
    pub fn write_group(
        &self,
        loaded: &LoadedGroup,
        context: &RenderContext,
    ) -> Result<Vec<GeneratedArtifact>, AppError> {
        loaded
            .templates
            .iter()
            .map(|(file, template)| {
                render_to_file(template, context, &self.destination(loaded.group, file))
            })
            .collect()
    }
}

/// Templates of one family, loaded and ready to render.
#[derive(Debug)]
pub struct LoadedGroup {
    group: TemplateGroup,
    templates: Vec<(&'static str, TemplateSpec)>,
}

impl LoadedGroup {
    pub fn group(&self) -> TemplateGroup {
        self.group
    }
}
