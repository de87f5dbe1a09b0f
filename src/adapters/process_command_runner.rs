use std::env;
use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::domain::AppError;
use crate::ports::CommandRunner;

/// Runs external programs with `std::process::Command`.
#[derive(Debug, Clone, Default)]
pub struct ProcessCommandRunner;

impl ProcessCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessCommandRunner {
    fn run(&self, argv: &[String]) -> Result<String, AppError> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| AppError::config_error("Cannot run an empty command"))?;
        let command_line = argv.join(" ");
        debug!(command = %command_line, "running external command");

        let output = Command::new(program).args(args).output().map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                AppError::CommandNotFound(program.clone())
            } else {
                AppError::CommandFailed { command: command_line.clone(), details: e.to_string() }
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(AppError::CommandFailed {
                command: command_line,
                details: if stderr.is_empty() { output.status.to_string() } else { stderr },
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn is_available(&self, program: &str) -> bool {
        if program.contains('/') {
            return Path::new(program).is_file();
        }
        env::var_os("PATH")
            .map(|paths| env::split_paths(&paths).any(|dir| dir.join(program).is_file()))
            .unwrap_or(false)
    }
}
