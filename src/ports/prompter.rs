use crate::domain::AppError;

/// Port for interactive operator input. Every call blocks until answered.
pub trait Prompter {
    /// Free-text answer. An empty answer is returned as-is unless `default` is set.
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String, AppError>;

    /// Yes/no answer.
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool, AppError>;
}
