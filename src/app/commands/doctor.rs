//! Availability checks for the external programs a run may invoke.

use crate::domain::{AppError, BootstrapConfig};
use crate::ports::CommandRunner;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCheck {
    pub purpose: &'static str,
    pub program: String,
    pub available: bool,
}

#[derive(Debug, Clone)]
pub struct DoctorOutcome {
    pub checks: Vec<ToolCheck>,
    pub exit_code: i32,
}

pub fn execute(config: &BootstrapConfig, runner: &impl CommandRunner) -> Result<DoctorOutcome, AppError> {
    let mut checks = Vec::new();
    for (purpose, argv) in
        [("container engine", &config.commands.compose), ("keypair generator", &config.commands.keypair)]
    {
        let program = argv
            .first()
            .ok_or_else(|| AppError::config_error(format!("no command configured for the {}", purpose)))?;
        checks.push(ToolCheck {
            purpose,
            program: program.clone(),
            available: runner.is_available(program),
        });
    }

    // A missing generator only degrades to placeholder keys.
    let exit_code = if checks[0].available { 0 } else { 1 };
    Ok(DoctorOutcome { checks, exit_code })
}
