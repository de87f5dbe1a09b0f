//! Templates command implementation.

use std::path::Path;

use crate::domain::AppError;

pub fn run_templates(config: Option<&Path>) -> Result<(), AppError> {
    let (source, listings) = crate::app::api::templates(config)?;

    println!("Template families ({}):", source);
    for listing in listings {
        let marker = if listing.is_complete() { "✅" } else { "⚠️ " };
        println!("{} {} - {}", marker, listing.group.family(), listing.group.display_name());
        for file in &listing.files {
            match &file.placeholders {
                Some(keys) if keys.is_empty() => println!("  • {}", file.path),
                Some(keys) => println!("  • {} ({})", file.path, keys.join(", ")),
                None => println!("  • {} (missing)", file.path),
            }
        }
    }
    Ok(())
}
