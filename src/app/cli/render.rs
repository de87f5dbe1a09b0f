//! Render command implementation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::app::api::{LaunchStatus, RenderRequest};
use crate::domain::AppError;

pub fn run_render(
    config: Option<&Path>,
    answers: Option<PathBuf>,
    output: Option<PathBuf>,
    no_launch: bool,
) -> Result<(), AppError> {
    let request = RenderRequest { answers_file: answers, output_root: output };
    let run = crate::app::api::render(config, &request)?;
    let outcome = &run.outcome;

    println!(
        "✅ Rendered {} deployment descriptor(s) for {} in {}/",
        outcome.manifest.len(),
        outcome.plan,
        outcome.run_dir.display()
    );
    for (i, path) in outcome.manifest.paths().enumerate() {
        println!("  {}. {}", i + 1, path.display());
    }
    for skip in outcome.reported_skips() {
        println!("⚠️  Skipped {} group: {}", skip.group, skip.error);
    }
    if let Some(keypair) = outcome.keypair.as_ref().filter(|k| k.is_placeholder()) {
        println!(
            "⚠️  Reality keypair is a placeholder ({}); replace it before launching",
            keypair.public_key
        );
    }
    let generated = outcome.generated_value_count();
    if generated > 0 {
        println!("  Generated {} value(s); they are marked in the summary", generated);
    }

    println!("\n{}", fs::read_to_string(&outcome.summary_path)?.trim_end());
    println!("\n✅ Summary written to {}", outcome.summary_path.display());

    if no_launch || !run.launch_requested || outcome.manifest.is_empty() {
        return Ok(());
    }
    let results = crate::app::api::launch(config, &outcome.manifest)?;
    let launched = results.iter().filter(|r| r.status == LaunchStatus::Launched).count();
    println!("✅ Launched {} of {} descriptor(s)", launched, results.len());
    Ok(())
}
