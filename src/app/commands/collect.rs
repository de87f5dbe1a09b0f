//! Interactive collection of render answers.

use tracing::warn;

use crate::domain::{
    Answers, AppError, BootstrapConfig, CdnAnswers, ClientAnswers, DirectAnswers, DomainSet,
    HealthCheckAnswers, RolePlan, UserAnswers, assign_roles, split_list,
};
use crate::ports::Prompter;

/// Ask for domains and roles, then only the parameters of the enabled roles.
pub fn collect_answers(
    prompter: &impl Prompter,
    config: &BootstrapConfig,
) -> Result<(Answers, RolePlan), AppError> {
    let domains_input = prompter.input("Domains (space separated)", None)?;
    let domains = DomainSet::parse(&domains_input)?;

    let mut answers = Answers {
        domains: domains.iter().map(str::to_string).collect(),
        launch: true,
        ..Answers::default()
    };

    if domains.len() == 1 {
        let role = prompter
            .input(&format!("Role for {} (cdn/direct)", domains.first()), Some("cdn"))?;
        answers.role = Some(role);
    } else {
        answers.cdn_domain = non_empty(prompter.input("Domain for the CDN role (blank to skip)", None)?);
        answers.direct_domain =
            non_empty(prompter.input("Domain for the direct role (blank to skip)", None)?);
    }

    let plan = assign_roles(
        &domains,
        answers.role.as_deref(),
        answers.cdn_domain.as_deref(),
        answers.direct_domain.as_deref(),
    )?;

    answers.email = prompter.input("Email for certificate registration", None)?.trim().to_string();

    answers.cdn = match plan.cdn_domain() {
        Some(domain) if prompter.confirm(&format!("Deploy the CDN group for {}?", domain), true)? => {
            collect_cdn(prompter, config)?
        }
        _ => CdnAnswers { enabled: false, ..CdnAnswers::default() },
    };

    answers.direct = match plan.direct_domain() {
        Some(domain)
            if prompter.confirm(&format!("Deploy the direct group for {}?", domain), true)? =>
        {
            collect_direct(prompter)?
        }
        _ => DirectAnswers { enabled: false, ..DirectAnswers::default() },
    };

    answers.healthcheck = if prompter.confirm("Render the health-check group?", false)? {
        HealthCheckAnswers { enabled: true, url: prompter.input("Health-check URL", None)? }
    } else {
        HealthCheckAnswers::default()
    };

    Ok((answers, plan))
}

fn collect_cdn(prompter: &impl Prompter, config: &BootstrapConfig) -> Result<CdnAnswers, AppError> {
    let clients = collect_clients(prompter, "CDN client")?;
    let ws_path = prompter.input("Websocket path", Some(&config.proxy.ws_path))?;
    Ok(CdnAnswers { enabled: true, clients, ws_path: non_empty(ws_path) })
}

fn collect_direct(prompter: &impl Prompter) -> Result<DirectAnswers, AppError> {
    let defaults = DirectAnswers::default();

    let reality = collect_clients(prompter, "Reality client")?;
    let vision = collect_clients(prompter, "Vision client")?;
    let hysteria2 = collect_users(prompter)?;

    let path_prefix = prompter.input("Path prefix", Some(&defaults.path_prefix))?;
    let fallback = prompter.input("Fallback target (host:port)", Some(&defaults.fallback))?;
    let server_names = prompter.input(
        "Reality server names (comma separated)",
        Some(&defaults.server_names.join(",")),
    )?;
    let short_ids =
        prompter.input("Reality short IDs (comma separated, empty entry allowed)", None)?;

    let private_key = non_empty(prompter.input("Reality private key (blank to generate)", None)?);
    let public_key = match private_key {
        Some(_) => non_empty(prompter.input("Reality public key", None)?),
        None => None,
    };

    Ok(DirectAnswers {
        enabled: true,
        reality,
        vision,
        hysteria2,
        path_prefix,
        fallback,
        server_names: split_list(&server_names).into_iter().filter(|s| !s.is_empty()).collect(),
        short_ids: split_list(&short_ids),
        private_key,
        public_key,
    })
}

fn collect_clients(prompter: &impl Prompter, label: &str) -> Result<ClientAnswers, AppError> {
    let count = prompt_count(prompter, &format!("Number of {}s", label))?;
    let ids = (1..=count)
        .map(|n| prompter.input(&format!("{} {} UUID (blank to generate)", label, n), None))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ClientAnswers { count, ids })
}

fn collect_users(prompter: &impl Prompter) -> Result<UserAnswers, AppError> {
    let count = prompt_count(prompter, "Number of Hysteria2 users")?;
    let mut usernames = Vec::with_capacity(count);
    let mut passwords = Vec::with_capacity(count);
    for n in 1..=count {
        let default_name = format!("user{}", n);
        usernames.push(prompter.input(&format!("Hysteria2 user {} name", n), Some(&default_name))?);
        passwords
            .push(prompter.input(&format!("Hysteria2 user {} password (blank to generate)", n), None)?);
    }
    Ok(UserAnswers { count, usernames, passwords })
}

/// Ask until the answer is a whole number. Zero is returned as-is and skips
/// the group later.
fn prompt_count(prompter: &impl Prompter, prompt: &str) -> Result<usize, AppError> {
    let mut question = prompt.to_string();
    loop {
        let value = prompter.input(&question, Some("1"))?;
        match value.trim().parse::<usize>() {
            Ok(count) => return Ok(count),
            Err(_) => {
                warn!(value = %value, "count is not a whole number; asking again");
                question = format!("{} (whole number, got '{}')", prompt, value.trim());
            }
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}
