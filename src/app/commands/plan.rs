//! Role assignment without rendering anything.

use crate::domain::{AppError, DomainSet, RolePlan, assign_roles};

#[derive(Debug, Clone, Default)]
pub struct PlanOptions {
    /// Role for a single domain.
    pub role: Option<String>,
    pub cdn: Option<String>,
    pub direct: Option<String>,
}

pub fn execute(domains: &[String], options: &PlanOptions) -> Result<RolePlan, AppError> {
    let domains = DomainSet::new(domains)?;
    assign_roles(&domains, options.role.as_deref(), options.cdn.as_deref(), options.direct.as_deref())
}
