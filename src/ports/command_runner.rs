use crate::domain::AppError;

/// Port for invoking external programs. Each call runs exactly once.
pub trait CommandRunner {
    /// Run `argv` and return trimmed stdout.
    ///
    /// Fails with `AppError::CommandNotFound` when the program cannot be spawned
    /// and `AppError::CommandFailed` on a non-zero exit.
    fn run(&self, argv: &[String]) -> Result<String, AppError>;

    /// Whether `program` resolves on `PATH`.
    fn is_available(&self, program: &str) -> bool;
}
