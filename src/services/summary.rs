//! Human-readable run summary listing descriptors, credentials and key files.

use std::fs;
use std::path::Path;

use chrono::Local;
use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;

use crate::domain::{
    AppError, ClientIdSet, GeneratedArtifact, Keypair, Manifest, RolePlan, SkippedGroup,
    UserPassSet,
};
use crate::services::renderer::write_artifact;

static SUMMARY_TEMPLATE: &str = include_str!("../assets/summary/credentials-summary.txt.j2");

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub generated_at: String,
    pub run_dir: String,
    pub plan: PlanView,
    pub manifest: Vec<String>,
    pub credential_sets: Vec<CredentialReport>,
    pub keypair: Option<KeypairReport>,
    pub skipped: Vec<SkipReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanView {
    pub cdn: Option<String>,
    pub direct: Option<String>,
    pub primary: String,
    pub domains_args: String,
}

impl From<&RolePlan> for PlanView {
    fn from(plan: &RolePlan) -> Self {
        Self {
            cdn: plan.cdn_domain().map(str::to_string),
            direct: plan.direct_domain().map(str::to_string),
            primary: plan.primary_domain().to_string(),
            domains_args: plan.domains_args(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialReport {
    pub label: String,
    pub entries: Vec<CredentialLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialLine {
    pub value: String,
    pub generated: bool,
}

impl CredentialReport {
    pub fn from_clients(set: &ClientIdSet) -> Self {
        Self {
            label: set.label().to_string(),
            entries: set
                .entries()
                .iter()
                .map(|c| CredentialLine { value: c.id.clone(), generated: c.generated })
                .collect(),
        }
    }

    pub fn from_users(set: &UserPassSet) -> Self {
        Self {
            label: set.label().to_string(),
            entries: set
                .entries()
                .iter()
                .map(|u| CredentialLine {
                    value: format!("{}:{}", u.username, u.password),
                    generated: u.generated,
                })
                .collect(),
        }
    }

    pub fn generated_count(&self) -> usize {
        self.entries.iter().filter(|e| e.generated).count()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct KeypairReport {
    pub source: String,
    pub public_key: String,
    pub file: String,
}

impl KeypairReport {
    pub fn new(pair: &Keypair, file: &Path) -> Self {
        Self {
            source: pair.source.label().to_string(),
            public_key: pair.public_key.clone(),
            file: file.display().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SkipReport {
    pub group: String,
    pub reason: String,
}

impl From<&SkippedGroup> for SkipReport {
    fn from(skip: &SkippedGroup) -> Self {
        Self { group: skip.group.family().to_string(), reason: skip.error.to_string() }
    }
}

impl RunSummary {
    pub fn new(
        plan: &RolePlan,
        run_dir: &Path,
        manifest: &Manifest,
        credential_sets: Vec<CredentialReport>,
        keypair: Option<KeypairReport>,
        skipped: &[SkippedGroup],
    ) -> Self {
        Self {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S %z").to_string(),
            run_dir: run_dir.display().to_string(),
            plan: PlanView::from(plan),
            manifest: manifest.paths().map(|p| p.display().to_string()).collect(),
            credential_sets,
            keypair,
            skipped: skipped.iter().filter(|s| !s.is_silent()).map(SkipReport::from).collect(),
        }
    }

    pub fn render(&self) -> Result<String, AppError> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.add_template("summary", SUMMARY_TEMPLATE).map_err(|err| {
            AppError::config_error(format!("Failed to load summary template: {}", err))
        })?;
        env.get_template("summary")
            .map_err(|err| {
                AppError::config_error(format!("Failed to access summary template: {}", err))
            })?
            .render(self)
            .map_err(|err| AppError::config_error(format!("Failed to render summary: {}", err)))
    }

    /// Render and write with owner-only permissions; the summary holds secrets.
    pub fn write(&self, destination: &Path) -> Result<GeneratedArtifact, AppError> {
        let artifact = write_artifact(destination, self.render()?)?;
        restrict_permissions(destination)?;
        Ok(artifact)
    }
}

/// Owner read/write only.
pub fn restrict_permissions(path: &Path) -> Result<(), AppError> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }
    #[cfg(not(unix))]
    let _ = fs::metadata(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::domain::{CredentialRequest, TemplateGroup};
    use tempfile::TempDir;

    fn plan() -> RolePlan {
        RolePlan::Both { cdn: "a.com".into(), direct: "b.com".into() }
    }

    #[test]
    fn marks_generated_values() {
        let request = CredentialRequest::with_supplied(2, vec!["kept-id".into()]);
        let clients = ClientIdSet::clients("cdn clients", &request, None).unwrap();
        let report = CredentialReport::from_clients(&clients);
        assert_eq!(report.generated_count(), 1);

        let mut manifest = Manifest::new();
        manifest.push(TemplateGroup::Cdn, PathBuf::from("/out/cdn/docker-compose.yml"));
        let summary =
            RunSummary::new(&plan(), Path::new("/out"), &manifest, vec![report], None, &[]);
        let text = summary.render().unwrap();

        assert!(text.contains("cdn: a.com"));
        assert!(text.contains("certificate flags: -d a.com -d b.com"));
        assert!(text.contains("1. /out/cdn/docker-compose.yml"));
        assert!(text.contains("  - kept-id\n"));
        assert_eq!(text.matches("[generated]\n").count(), 1);
        assert!(!text.contains("[reality keypair]"));
    }

    #[test]
    fn lists_keypair_file_and_visible_skips() {
        let pair = Keypair::fallback();
        let keypair = KeypairReport::new(&pair, Path::new("/out/direct/reality-keypair.txt"));
        let skipped = vec![
            SkippedGroup {
                group: TemplateGroup::HealthCheck,
                error: AppError::MissingRequiredInput("health-check URL".into()),
            },
            SkippedGroup {
                group: TemplateGroup::Cdn,
                error: AppError::MissingTemplate("cdn/xray.json".into()),
            },
        ];
        let summary = RunSummary::new(
            &plan(),
            Path::new("/out"),
            &Manifest::new(),
            Vec::new(),
            Some(keypair),
            &skipped,
        );
        let text = summary.render().unwrap();

        assert!(text.contains("key file: /out/direct/reality-keypair.txt"));
        assert!(text.contains("placeholder (replace before use)"));
        assert!(text.contains("healthcheck: Missing required input: health-check URL"));
        assert!(!text.contains("cdn/xray.json"));
        assert!(text.contains("(none)"));
    }

    #[cfg(unix)]
    #[test]
    fn written_summary_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("summary.txt");
        let summary =
            RunSummary::new(&plan(), dir.path(), &Manifest::new(), Vec::new(), None, &[]);
        summary.write(&dest).unwrap();

        let mode = fs::metadata(&dest).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
