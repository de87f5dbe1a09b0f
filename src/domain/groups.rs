//! Deployable template families, in rendering order.

use std::fmt;

/// File name of the compose descriptor inside every family.
pub const DESCRIPTOR_FILE: &str = "docker-compose.yml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TemplateGroup {
    Certificate,
    Cdn,
    Direct,
    HealthCheck,
}

impl TemplateGroup {
    pub const ALL: [TemplateGroup; 4] = [
        TemplateGroup::Certificate,
        TemplateGroup::Cdn,
        TemplateGroup::Direct,
        TemplateGroup::HealthCheck,
    ];

    /// Directory name shared by the template store and the output tree.
    pub fn family(self) -> &'static str {
        match self {
            TemplateGroup::Certificate => "cert",
            TemplateGroup::Cdn => "cdn",
            TemplateGroup::Direct => "direct",
            TemplateGroup::HealthCheck => "healthcheck",
        }
    }

    pub fn from_family(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|group| group.family() == name)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            TemplateGroup::Certificate => "Certificate issuance",
            TemplateGroup::Cdn => "CDN (reverse proxy + websocket tunnel)",
            TemplateGroup::Direct => "Direct (SNI router + reality/vision/hysteria2)",
            TemplateGroup::HealthCheck => "Health check",
        }
    }

    /// Files rendered for this group, descriptor first.
    pub fn files(self) -> &'static [&'static str] {
        match self {
            TemplateGroup::Certificate => &[DESCRIPTOR_FILE],
            TemplateGroup::Cdn => &[DESCRIPTOR_FILE, "nginx.conf", "xray.json"],
            TemplateGroup::Direct => {
                &[DESCRIPTOR_FILE, "sni-router.conf", "xray.json", "hysteria2.yaml"]
            }
            TemplateGroup::HealthCheck => &[DESCRIPTOR_FILE],
        }
    }

    /// Template store path, e.g. `cdn/nginx.conf`.
    pub fn template_path(self, file: &str) -> String {
        format!("{}/{}", self.family(), file)
    }
}

impl fmt::Display for TemplateGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.family())
    }
}
