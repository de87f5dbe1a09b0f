mod memory_template_store;
mod recording_command_runner;
mod scripted_prompter;

pub use memory_template_store::MemoryTemplateStore;
pub use recording_command_runner::RecordingCommandRunner;
pub use scripted_prompter::ScriptedPrompter;
