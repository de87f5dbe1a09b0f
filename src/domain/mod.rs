pub mod answers;
pub mod bootstrap_config;
pub mod credentials;
pub mod domains;
pub mod error;
pub mod groups;
pub mod keypair;
pub mod manifest;
pub mod role_plan;
pub mod template;

pub use answers::{
    Answers, CdnAnswers, ClientAnswers, DirectAnswers, HealthCheckAnswers, UserAnswers, split_list,
};
pub use bootstrap_config::{
    BootstrapConfig, CommandsConfig, CredentialsConfig, OutputConfig, ProxyConfig, TemplatesConfig,
    parse_config_content,
};
pub use credentials::{
    ClientCredential, ClientCredentialSet, ClientIdSet, CredentialRequest, UserCredential,
    UserPassSet,
};
pub use domains::DomainSet;
pub use error::AppError;
pub use groups::{DESCRIPTOR_FILE, TemplateGroup};
pub use keypair::{KeySource, Keypair, REPLACE_ME_SENTINEL};
pub use manifest::{GeneratedArtifact, Manifest, ManifestEntry, SkippedGroup};
pub use role_plan::{RoleChoice, RolePlan, assign_roles};
pub use template::{RenderContext, TemplateSpec, render};
