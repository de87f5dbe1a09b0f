//! Doctor command implementation.

use std::path::Path;

use crate::domain::AppError;

pub fn run_doctor(config: Option<&Path>) -> Result<i32, AppError> {
    let outcome = crate::app::api::doctor(config)?;

    for check in &outcome.checks {
        if check.available {
            println!("✅ {} found: {}", check.purpose, check.program);
        } else {
            println!("⚠️  {} not found: {}", check.purpose, check.program);
        }
    }
    Ok(outcome.exit_code)
}
