use crate::domain::BootstrapConfig;
use crate::ports::{CommandRunner, TemplateStore};

/// Application context holding dependencies for command execution.
pub struct AppContext<S: TemplateStore, R: CommandRunner> {
    config: BootstrapConfig,
    templates: S,
    runner: R,
}

impl<S: TemplateStore, R: CommandRunner> AppContext<S, R> {
    /// Create a new application context.
    pub fn new(config: BootstrapConfig, templates: S, runner: R) -> Self {
        Self { config, templates, runner }
    }

    /// Loaded tool configuration.
    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    /// Get a reference to the template store.
    pub fn templates(&self) -> &S {
        &self.templates
    }

    /// Get a reference to the external command runner.
    pub fn runner(&self) -> &R {
        &self.runner
    }
}
