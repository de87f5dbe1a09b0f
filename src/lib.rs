//! vpsboot: assign CDN/direct roles to domains and render tunnel-stack deployment descriptors.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    DoctorOutcome, LaunchResult, LaunchStatus, PlanOptions, RenderOptions, RenderOutcome,
    RenderRequest, RenderRun, TemplateListing,
};
pub use domain::{
    AppError, Answers, BootstrapConfig, DomainSet, Manifest, RenderContext, RolePlan,
    TemplateGroup, TemplateSpec, assign_roles, render,
};
pub use services::render_to_file;
