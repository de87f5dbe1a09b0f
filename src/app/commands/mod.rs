pub mod collect;
pub mod doctor;
pub mod plan;
pub mod render;
pub mod templates;
