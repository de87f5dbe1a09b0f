//! Tool configuration loaded from `config.toml`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::AppError;

/// Top-level configuration. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BootstrapConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub templates: TemplatesConfig,
    #[serde(default)]
    pub proxy: ProxyConfig,
    #[serde(default)]
    pub credentials: CredentialsConfig,
    #[serde(default)]
    pub commands: CommandsConfig,
}

impl BootstrapConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.output.validate()?;
        self.proxy.validate()?;
        self.credentials.validate()?;
        self.commands.validate()?;
        Ok(())
    }
}

/// Where rendered files land.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Base directory; the primary domain is appended.
    #[serde(default = "default_output_root")]
    pub root: PathBuf,
    /// Summary file name, relative to the run directory.
    #[serde(default = "default_summary_file")]
    pub summary_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { root: default_output_root(), summary_file: default_summary_file() }
    }
}

impl OutputConfig {
    fn validate(&self) -> Result<(), AppError> {
        if self.summary_file.trim().is_empty() {
            return Err(AppError::config_error("output.summary_file must not be empty"));
        }
        Ok(())
    }
}

/// Optional on-disk template directory replacing the embedded set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplatesConfig {
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Proxy ports and TLS locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProxyConfig {
    #[serde(default = "default_ws_path")]
    pub ws_path: String,
    /// Public port of the CDN reverse proxy when it owns 443.
    #[serde(default = "default_cdn_port")]
    pub cdn_port: u16,
    /// Port the CDN reverse proxy moves to when the SNI router owns 443.
    #[serde(default = "default_cdn_port_behind_sni")]
    pub cdn_port_behind_sni: u16,
    /// Directory holding `<domain>/fullchain.pem` and `<domain>/privkey.pem`.
    #[serde(default = "default_cert_live_dir")]
    pub cert_live_dir: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            ws_path: default_ws_path(),
            cdn_port: default_cdn_port(),
            cdn_port_behind_sni: default_cdn_port_behind_sni(),
            cert_live_dir: default_cert_live_dir(),
        }
    }
}

impl ProxyConfig {
    fn validate(&self) -> Result<(), AppError> {
        if self.cdn_port == 0 || self.cdn_port_behind_sni == 0 {
            return Err(AppError::config_error("proxy ports must be greater than 0"));
        }
        if self.cdn_port == self.cdn_port_behind_sni {
            return Err(AppError::config_error(
                "proxy.cdn_port and proxy.cdn_port_behind_sni must differ",
            ));
        }
        if !self.ws_path.starts_with('/') {
            return Err(AppError::config_error("proxy.ws_path must start with '/'"));
        }
        Ok(())
    }

    pub fn tls_cert(&self, domain: &str) -> String {
        format!("{}/{}/fullchain.pem", self.cert_live_dir.trim_end_matches('/'), domain)
    }

    pub fn tls_key(&self, domain: &str) -> String {
        format!("{}/{}/privkey.pem", self.cert_live_dir.trim_end_matches('/'), domain)
    }
}

/// Credential generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CredentialsConfig {
    /// Flow tag attached to direct-transport clients.
    #[serde(default = "default_flow")]
    pub flow: String,
    /// Random bytes per generated password.
    #[serde(default = "default_password_bytes")]
    pub password_bytes: usize,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self { flow: default_flow(), password_bytes: default_password_bytes() }
    }
}

impl CredentialsConfig {
    fn validate(&self) -> Result<(), AppError> {
        if self.password_bytes == 0 {
            return Err(AppError::config_error(
                "credentials.password_bytes must be greater than 0",
            ));
        }
        if self.flow.trim().is_empty() {
            return Err(AppError::config_error("credentials.flow must not be empty"));
        }
        Ok(())
    }
}

/// External programs, as argv prefixes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandsConfig {
    #[serde(default = "default_keypair_command")]
    pub keypair: Vec<String>,
    #[serde(default = "default_compose_command")]
    pub compose: Vec<String>,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self { keypair: default_keypair_command(), compose: default_compose_command() }
    }
}

impl CommandsConfig {
    fn validate(&self) -> Result<(), AppError> {
        if self.keypair.is_empty() {
            return Err(AppError::config_error("commands.keypair must not be empty"));
        }
        if self.compose.is_empty() {
            return Err(AppError::config_error("commands.compose must not be empty"));
        }
        Ok(())
    }
}

fn default_output_root() -> PathBuf {
    PathBuf::from("vpsboot-out")
}

fn default_summary_file() -> String {
    "credentials-summary.txt".to_string()
}

fn default_ws_path() -> String {
    "/ws".to_string()
}

fn default_cdn_port() -> u16 {
    443
}

fn default_cdn_port_behind_sni() -> u16 {
    6443
}

fn default_cert_live_dir() -> String {
    "/etc/letsencrypt/live".to_string()
}

fn default_flow() -> String {
    "xtls-rprx-vision".to_string()
}

fn default_password_bytes() -> usize {
    16
}

fn default_keypair_command() -> Vec<String> {
    vec!["xray".to_string(), "x25519".to_string()]
}

fn default_compose_command() -> Vec<String> {
    vec!["docker".to_string(), "compose".to_string()]
}

/// Parse configuration from string content.
pub fn parse_config_content(content: &str) -> Result<BootstrapConfig, AppError> {
    let config: BootstrapConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}
