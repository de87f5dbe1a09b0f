//! Group-by-group rendering of a run's deployment descriptors.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use url::Url;

use crate::app::AppContext;
use crate::domain::{
    Answers, AppError, ClientIdSet, DESCRIPTOR_FILE, GeneratedArtifact, KeySource, Keypair,
    Manifest, RenderContext, RolePlan, SkippedGroup, TemplateGroup, UserPassSet,
};
use crate::ports::{CommandRunner, TemplateStore};
use crate::services::summary::restrict_permissions;
use crate::services::{
    CredentialReport, GroupRenderer, KeypairReport, LoadedGroup, RunSummary, resolve_keypair,
    write_artifact,
};

/// Port the CDN tunnel server listens on inside its compose network.
pub const CDN_TUNNEL_PORT: u16 = 10000;
/// Loopback port of the reality inbound behind the SNI router.
pub const REALITY_PORT: u16 = 8443;
/// Loopback port of the TLS vision inbound behind the SNI router.
pub const VISION_PORT: u16 = 9443;
/// Seconds between health-check pings.
pub const HEALTHCHECK_INTERVAL_SECS: u32 = 300;
/// Key file written next to the direct group's descriptors.
pub const KEYPAIR_FILE: &str = "reality-keypair.txt";

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Overrides `output.root` from the configuration.
    pub output_root: Option<PathBuf>,
}

#[derive(Debug)]
pub struct RenderOutcome {
    pub plan: RolePlan,
    pub run_dir: PathBuf,
    pub manifest: Manifest,
    pub artifacts: Vec<GeneratedArtifact>,
    pub skipped: Vec<SkippedGroup>,
    pub credentials: Vec<CredentialReport>,
    pub keypair: Option<Keypair>,
    pub summary_path: PathBuf,
}

impl RenderOutcome {
    /// Skips worth reporting to the operator.
    pub fn reported_skips(&self) -> impl Iterator<Item = &SkippedGroup> {
        self.skipped.iter().filter(|skip| !skip.is_silent())
    }

    /// Credentials and keys this run made up rather than received.
    pub fn generated_value_count(&self) -> usize {
        let keys = self.keypair.as_ref().is_some_and(|k| k.source != KeySource::Supplied);
        self.credentials.iter().map(CredentialReport::generated_count).sum::<usize>()
            + usize::from(keys)
    }
}

/// Output of one successfully rendered group.
#[derive(Default)]
struct GroupOutput {
    artifacts: Vec<GeneratedArtifact>,
    credentials: Vec<CredentialReport>,
    keypair: Option<(Keypair, PathBuf)>,
}

/// Accumulates results across groups for one run.
struct RunState {
    manifest: Manifest,
    artifacts: Vec<GeneratedArtifact>,
    skipped: Vec<SkippedGroup>,
    credentials: Vec<CredentialReport>,
    keypair: Option<(Keypair, PathBuf)>,
}

impl RunState {
    fn new() -> Self {
        Self {
            manifest: Manifest::new(),
            artifacts: Vec::new(),
            skipped: Vec::new(),
            credentials: Vec::new(),
            keypair: None,
        }
    }

    /// Keep a group's output, or record a recoverable failure and move on.
    fn record(
        &mut self,
        group: TemplateGroup,
        result: Result<GroupOutput, AppError>,
    ) -> Result<(), AppError> {
        match result {
            Ok(output) => {
                if let Some(descriptor) = output
                    .artifacts
                    .iter()
                    .find(|a| a.destination.file_name() == Some(OsStr::new(DESCRIPTOR_FILE)))
                {
                    self.manifest.push(group, descriptor.destination.clone());
                }
                info!(group = %group, files = output.artifacts.len(), "rendered group");
                self.artifacts.extend(output.artifacts);
                self.credentials.extend(output.credentials);
                if output.keypair.is_some() {
                    self.keypair = output.keypair;
                }
                Ok(())
            }
            Err(error) if error.is_group_recoverable() => {
                if matches!(error, AppError::MissingTemplate(_)) {
                    debug!(group = %group, %error, "template missing; group skipped");
                } else {
                    warn!(group = %group, %error, "group skipped");
                }
                self.skipped.push(SkippedGroup { group, error });
                Ok(())
            }
            Err(error) => Err(error),
        }
    }
}

/// Everything a group needs besides its own answers.
struct Stage<'a, S: TemplateStore, R: CommandRunner> {
    ctx: &'a AppContext<S, R>,
    renderer: GroupRenderer<'a, S>,
    shared: RenderContext,
    cdn_enabled: bool,
    direct_enabled: bool,
}

/// CDN inputs checked and resolved before any group is written.
struct CdnInputs<'p> {
    domain: &'p str,
    clients: ClientIdSet,
    ws_path: String,
    templates: LoadedGroup,
}

/// Direct inputs checked and resolved before any group is written.
struct DirectInputs<'p> {
    domain: &'p str,
    reality: ClientIdSet,
    vision: ClientIdSet,
    users: UserPassSet,
    path_prefix: String,
    fallback: String,
    masquerade_host: String,
    server_names: Vec<String>,
    short_ids: Vec<String>,
    keypair: Keypair,
    templates: LoadedGroup,
}

/// Render every applicable group for `plan` and write the run summary.
///
/// Group order: certificate, CDN, direct, health check. The CDN and direct
/// inputs are resolved up front so the CDN listen port reflects whether the
/// direct group will really be written. Recoverable errors skip only their
/// group; filesystem and command failures abort the run.
pub fn execute<S: TemplateStore, R: CommandRunner>(
    ctx: &AppContext<S, R>,
    plan: &RolePlan,
    answers: &Answers,
    options: &RenderOptions,
) -> Result<RenderOutcome, AppError> {
    let config = ctx.config();
    let root = options.output_root.clone().unwrap_or_else(|| config.output.root.clone());
    let run_dir = root.join(plan.primary_domain());

    // One certificate lineage, named after the primary domain, serves every group.
    let primary = plan.primary_domain();
    let mut stage = Stage {
        ctx,
        renderer: GroupRenderer::new(ctx.templates(), run_dir.clone()),
        shared: RenderContext::new()
            .with("PRIMARY_DOMAIN", primary)
            .with("DOMAINS_ARGS", plan.domains_args())
            .with("EMAIL", answers.email.trim())
            .with("TLS_CERT", config.proxy.tls_cert(primary))
            .with("TLS_KEY", config.proxy.tls_key(primary)),
        cdn_enabled: false,
        direct_enabled: false,
    };
    info!(plan = %plan, run_dir = %run_dir.display(), "rendering");

    let cdn = plan
        .cdn_domain()
        .filter(|_| answers.cdn.enabled)
        .map(|domain| prepare_cdn(&stage, domain, answers));
    let direct = plan
        .direct_domain()
        .filter(|_| answers.direct.enabled)
        .map(|domain| prepare_direct(&stage, domain, answers));
    stage.cdn_enabled = matches!(cdn, Some(Ok(_)));
    stage.direct_enabled = matches!(direct, Some(Ok(_)));

    let mut state = RunState::new();
    state.record(TemplateGroup::Certificate, certificate_group(&stage, answers))?;
    if let Some(inputs) = cdn {
        state.record(TemplateGroup::Cdn, inputs.and_then(|inputs| cdn_group(&stage, inputs)))?;
    }
    if let Some(inputs) = direct {
        state.record(
            TemplateGroup::Direct,
            inputs.and_then(|inputs| direct_group(&stage, plan, inputs)),
        )?;
    }
    if answers.healthcheck.enabled {
        state.record(TemplateGroup::HealthCheck, healthcheck_group(&stage, answers))?;
    }

    let summary_path = run_dir.join(&config.output.summary_file);
    let keypair_report = state.keypair.as_ref().map(|(pair, file)| KeypairReport::new(pair, file));
    RunSummary::new(
        plan,
        &run_dir,
        &state.manifest,
        state.credentials.clone(),
        keypair_report,
        &state.skipped,
    )
    .write(&summary_path)?;

    Ok(RenderOutcome {
        plan: plan.clone(),
        run_dir,
        manifest: state.manifest,
        artifacts: state.artifacts,
        skipped: state.skipped,
        credentials: state.credentials,
        keypair: state.keypair.map(|(pair, _)| pair),
        summary_path,
    })
}

fn certificate_group<S: TemplateStore, R: CommandRunner>(
    stage: &Stage<'_, S, R>,
    answers: &Answers,
) -> Result<GroupOutput, AppError> {
    if answers.email.trim().is_empty() {
        return Err(AppError::MissingRequiredInput("certificate registration email".to_string()));
    }
    let artifacts = stage.renderer.render_group(TemplateGroup::Certificate, &stage.shared)?;
    Ok(GroupOutput { artifacts, ..GroupOutput::default() })
}

fn prepare_cdn<'p, S: TemplateStore, R: CommandRunner>(
    stage: &Stage<'_, S, R>,
    domain: &'p str,
    answers: &Answers,
) -> Result<CdnInputs<'p>, AppError> {
    let proxy = &stage.ctx.config().proxy;
    let clients = ClientIdSet::clients("cdn clients", &answers.cdn.clients.request(), None)?;
    let ws_path = normalize_path(
        answers.cdn.ws_path.as_deref().filter(|p| !p.trim().is_empty()).unwrap_or(&proxy.ws_path),
    );
    let templates = stage.renderer.load_group(TemplateGroup::Cdn)?;
    Ok(CdnInputs { domain, clients, ws_path, templates })
}

fn cdn_group<S: TemplateStore, R: CommandRunner>(
    stage: &Stage<'_, S, R>,
    inputs: CdnInputs<'_>,
) -> Result<GroupOutput, AppError> {
    let proxy = &stage.ctx.config().proxy;
    let port = if stage.direct_enabled { proxy.cdn_port_behind_sni } else { proxy.cdn_port };

    let context = stage.shared.layered(
        &RenderContext::new()
            .with("CDN_DOMAIN", inputs.domain)
            .with("CDN_PORT", port.to_string())
            .with("CDN_TUNNEL_PORT", CDN_TUNNEL_PORT.to_string())
            .with("WS_PATH", inputs.ws_path)
            .with("CDN_CLIENTS", inputs.clients.to_json()?),
    );
    let artifacts = stage.renderer.write_group(&inputs.templates, &context)?;
    Ok(GroupOutput {
        artifacts,
        credentials: vec![CredentialReport::from_clients(&inputs.clients)],
        keypair: None,
    })
}

fn prepare_direct<'p, S: TemplateStore, R: CommandRunner>(
    stage: &Stage<'_, S, R>,
    domain: &'p str,
    answers: &Answers,
) -> Result<DirectInputs<'p>, AppError> {
    let config = stage.ctx.config();
    let direct = &answers.direct;
    let flow = Some(config.credentials.flow.as_str());

    let reality = ClientIdSet::clients("reality clients", &direct.reality.request(), flow)?;
    let vision = ClientIdSet::clients("vision clients", &direct.vision.request(), flow)?;
    let users = UserPassSet::users(
        "hysteria2 users",
        &direct.hysteria2.request(),
        &direct.hysteria2.passwords,
        config.credentials.password_bytes,
    )?;

    let (fallback, masquerade_host) = parse_fallback(&direct.fallback)?;
    let server_names: Vec<String> = direct
        .server_names
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if server_names.is_empty() {
        return Err(AppError::MissingRequiredInput("reality server names".to_string()));
    }
    let short_ids = short_ids(&direct.short_ids)?;
    let templates = stage.renderer.load_group(TemplateGroup::Direct)?;

    let keypair = resolve_keypair(
        stage.ctx.runner(),
        &config.commands.keypair,
        direct.private_key.as_deref(),
        direct.public_key.as_deref(),
    )?;

    Ok(DirectInputs {
        domain,
        reality,
        vision,
        users,
        path_prefix: normalize_path(&direct.path_prefix),
        fallback,
        masquerade_host,
        server_names,
        short_ids,
        keypair,
        templates,
    })
}

fn direct_group<S: TemplateStore, R: CommandRunner>(
    stage: &Stage<'_, S, R>,
    plan: &RolePlan,
    inputs: DirectInputs<'_>,
) -> Result<GroupOutput, AppError> {
    let sni_cdn_route = match plan.cdn_domain().filter(|_| stage.cdn_enabled) {
        Some(cdn) => {
            format!("{} 127.0.0.1:{};", cdn, stage.ctx.config().proxy.cdn_port_behind_sni)
        }
        None => "# no CDN domain routed".to_string(),
    };

    let keypair = inputs.keypair;
    let context = stage.shared.layered(
        &RenderContext::new()
            .with("DIRECT_DOMAIN", inputs.domain)
            .with("SNI_CDN_ROUTE", sni_cdn_route)
            .with("REALITY_PORT", REALITY_PORT.to_string())
            .with("VISION_PORT", VISION_PORT.to_string())
            .with("REALITY_CLIENTS", inputs.reality.to_json()?)
            .with("VISION_CLIENTS", inputs.vision.to_json()?)
            .with("HY2_USERPASS", inputs.users.to_json_map()?)
            .with("PATH_PREFIX", inputs.path_prefix)
            .with("FALLBACK_TARGET", inputs.fallback)
            .with("MASQUERADE_HOST", inputs.masquerade_host)
            .with("REALITY_SERVER_NAMES", serde_json::to_string(&inputs.server_names)?)
            .with("REALITY_SHORT_IDS", serde_json::to_string(&inputs.short_ids)?)
            .with("REALITY_PRIVATE_KEY", keypair.private_key.as_str())
            .with("REALITY_PUBLIC_KEY", keypair.public_key.as_str()),
    );
    let mut artifacts = stage.renderer.write_group(&inputs.templates, &context)?;

    let key_file = stage.renderer.destination(TemplateGroup::Direct, KEYPAIR_FILE);
    artifacts.push(write_keypair(&keypair, &key_file)?);

    Ok(GroupOutput {
        artifacts,
        credentials: vec![
            CredentialReport::from_clients(&inputs.reality),
            CredentialReport::from_clients(&inputs.vision),
            CredentialReport::from_users(&inputs.users),
        ],
        keypair: Some((keypair, key_file)),
    })
}

fn healthcheck_group<S: TemplateStore, R: CommandRunner>(
    stage: &Stage<'_, S, R>,
    answers: &Answers,
) -> Result<GroupOutput, AppError> {
    let url = answers.healthcheck.url.trim();
    if url.is_empty() {
        return Err(AppError::MissingRequiredInput("health-check URL".to_string()));
    }
    let parsed = Url::parse(url)
        .map_err(|err| AppError::InvalidUrl { value: url.to_string(), details: err.to_string() })?;
    // The URL is embedded in a single-quoted shell word.
    if parsed.as_str().contains('\'') {
        return Err(AppError::InvalidUrl {
            value: url.to_string(),
            details: "single quotes are not allowed".to_string(),
        });
    }

    let context = stage.shared.layered(
        &RenderContext::new()
            .with("HEALTHCHECK_URL", parsed.as_str())
            .with("HEALTHCHECK_INTERVAL_SECS", HEALTHCHECK_INTERVAL_SECS.to_string()),
    );
    let artifacts = stage.renderer.render_group(TemplateGroup::HealthCheck, &context)?;
    Ok(GroupOutput { artifacts, ..GroupOutput::default() })
}

fn write_keypair(pair: &Keypair, destination: &Path) -> Result<GeneratedArtifact, AppError> {
    let content = format!(
        "# source: {}\nprivate_key: {}\npublic_key: {}\n",
        pair.source.label(),
        pair.private_key,
        pair.public_key
    );
    let artifact = write_artifact(destination, content)?;
    restrict_permissions(destination)?;
    Ok(artifact)
}

/// Split `host:port`; the port must be numeric.
fn parse_fallback(value: &str) -> Result<(String, String), AppError> {
    let value = value.trim();
    let invalid = || AppError::MissingRequiredInput(format!("fallback target host:port (got '{}')", value));
    let (host, port) = value.rsplit_once(':').ok_or_else(invalid)?;
    if host.is_empty() || port.parse::<u16>().is_err() {
        return Err(invalid());
    }
    Ok((value.to_string(), host.trim_matches(|c| c == '[' || c == ']').to_string()))
}

/// Reality short IDs: hex, even length, at most 16 characters. Empty entries are kept.
fn short_ids(values: &[String]) -> Result<Vec<String>, AppError> {
    if values.is_empty() {
        return Ok(vec![String::new()]);
    }
    values
        .iter()
        .map(|value| {
            let value = value.trim();
            let valid = value.len() <= 16
                && value.len() % 2 == 0
                && value.chars().all(|c| c.is_ascii_hexdigit());
            if valid {
                Ok(value.to_string())
            } else {
                Err(AppError::InvalidChoice {
                    value: value.to_string(),
                    expected: "a short ID of even-length hex, at most 16 characters".to_string(),
                })
            }
        })
        .collect()
}

fn normalize_path(path: &str) -> String {
    let path = path.trim();
    if path.starts_with('/') { path.to_string() } else { format!("/{}", path) }
}
