mod command_runner;
mod prompter;
mod template_store;

pub use command_runner::CommandRunner;
pub use prompter::Prompter;
pub use template_store::TemplateStore;
