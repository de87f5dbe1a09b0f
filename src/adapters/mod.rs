pub mod dialoguer_prompter;
pub mod embedded_template_store;
pub mod filesystem_template_store;
pub mod process_command_runner;
pub mod template_source;

pub use dialoguer_prompter::DialoguerPrompter;
pub use embedded_template_store::EmbeddedTemplateStore;
pub use filesystem_template_store::FilesystemTemplateStore;
pub use process_command_runner::ProcessCommandRunner;
pub use template_source::TemplateSource;
