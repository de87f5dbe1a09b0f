//! Operator answers collected by prompts or read from an answers file.

use serde::Deserialize;

use crate::domain::{AppError, CredentialRequest, DomainSet, RolePlan, assign_roles};

/// Everything the render step needs from the operator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Answers {
    pub domains: Vec<String>,
    /// Role for a single domain: `cdn` (default) or `direct`.
    #[serde(default)]
    pub role: Option<String>,
    /// CDN domain when two or more domains are entered.
    #[serde(default)]
    pub cdn_domain: Option<String>,
    /// Direct domain when two or more domains are entered.
    #[serde(default)]
    pub direct_domain: Option<String>,
    /// ACME registration email.
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub cdn: CdnAnswers,
    #[serde(default)]
    pub direct: DirectAnswers,
    #[serde(default)]
    pub healthcheck: HealthCheckAnswers,
    /// Offer to launch each rendered descriptor.
    #[serde(default)]
    pub launch: bool,
}

impl Answers {
    pub fn parse_toml(content: &str) -> Result<Self, AppError> {
        Ok(toml::from_str(content)?)
    }

    pub fn domain_set(&self) -> Result<DomainSet, AppError> {
        DomainSet::new(&self.domains)
    }

    pub fn role_plan(&self) -> Result<RolePlan, AppError> {
        assign_roles(
            &self.domain_set()?,
            self.role.as_deref(),
            self.cdn_domain.as_deref(),
            self.direct_domain.as_deref(),
        )
    }
}

/// Client identifiers for one transport.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientAnswers {
    #[serde(default = "default_count")]
    pub count: usize,
    /// Supplied identifiers; missing or blank slots are generated.
    #[serde(default)]
    pub ids: Vec<String>,
}

impl Default for ClientAnswers {
    fn default() -> Self {
        Self { count: default_count(), ids: Vec::new() }
    }
}

impl ClientAnswers {
    pub fn request(&self) -> CredentialRequest {
        CredentialRequest::with_supplied(self.count, self.ids.clone())
    }
}

/// Username/password pairs for one transport.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserAnswers {
    #[serde(default = "default_count")]
    pub count: usize,
    #[serde(default)]
    pub usernames: Vec<String>,
    #[serde(default)]
    pub passwords: Vec<String>,
}

impl Default for UserAnswers {
    fn default() -> Self {
        Self { count: default_count(), usernames: Vec::new(), passwords: Vec::new() }
    }
}

impl UserAnswers {
    pub fn request(&self) -> CredentialRequest {
        CredentialRequest::with_supplied(self.count, self.usernames.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CdnAnswers {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub clients: ClientAnswers,
    /// Websocket path; the configured default applies when absent.
    #[serde(default)]
    pub ws_path: Option<String>,
}

impl Default for CdnAnswers {
    fn default() -> Self {
        Self { enabled: true, clients: ClientAnswers::default(), ws_path: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DirectAnswers {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub reality: ClientAnswers,
    #[serde(default)]
    pub vision: ClientAnswers,
    #[serde(default)]
    pub hysteria2: UserAnswers,
    /// Path prefix the vision inbound falls back on.
    #[serde(default = "default_path_prefix")]
    pub path_prefix: String,
    /// `host:port` that unauthenticated reality traffic is forwarded to.
    #[serde(default = "default_fallback")]
    pub fallback: String,
    /// Server names the reality inbound accepts.
    #[serde(default = "default_server_names")]
    pub server_names: Vec<String>,
    /// Accepted short IDs; an empty string lets clients omit the field.
    #[serde(default = "default_short_ids")]
    pub short_ids: Vec<String>,
    #[serde(default)]
    pub private_key: Option<String>,
    #[serde(default)]
    pub public_key: Option<String>,
}

impl Default for DirectAnswers {
    fn default() -> Self {
        Self {
            enabled: true,
            reality: ClientAnswers::default(),
            vision: ClientAnswers::default(),
            hysteria2: UserAnswers::default(),
            path_prefix: default_path_prefix(),
            fallback: default_fallback(),
            server_names: default_server_names(),
            short_ids: default_short_ids(),
            private_key: None,
            public_key: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HealthCheckAnswers {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub url: String,
}

/// Split a comma-separated answer, trimming entries. Empty entries are kept.
pub fn split_list(input: &str) -> Vec<String> {
    input.split(',').map(|item| item.trim().to_string()).collect()
}

fn default_true() -> bool {
    true
}

fn default_count() -> usize {
    1
}

pub(crate) fn default_path_prefix() -> String {
    "/".to_string()
}

pub(crate) fn default_fallback() -> String {
    "www.microsoft.com:443".to_string()
}

pub(crate) fn default_server_names() -> Vec<String> {
    vec!["www.microsoft.com".to_string()]
}

pub(crate) fn default_short_ids() -> Vec<String> {
    vec![String::new()]
}
