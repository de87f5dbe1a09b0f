//! Plan command implementation.

use crate::app::api::PlanOptions;
use crate::domain::AppError;

pub fn run_plan(
    domains: &[String],
    role: Option<String>,
    cdn: Option<String>,
    direct: Option<String>,
) -> Result<(), AppError> {
    let plan = crate::app::api::plan(domains, &PlanOptions { role, cdn, direct })?;

    println!("✅ Role plan: {}", plan);
    println!("  CDN domain:     {}", plan.cdn_domain().unwrap_or("-"));
    println!("  Direct domain:  {}", plan.direct_domain().unwrap_or("-"));
    println!("  Primary domain: {}", plan.primary_domain());
    println!("  Domains args:   {}", plan.domains_args());
    Ok(())
}
