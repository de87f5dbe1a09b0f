//! CDN/direct role assignment for entered domains.

use std::fmt;

use serde::Serialize;

use crate::domain::{AppError, DomainSet};

/// Transport role a single domain is asked to serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleChoice {
    Cdn,
    Direct,
}

impl RoleChoice {
    /// Parse a prompt answer. Blank defaults to CDN.
    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "cdn" => Ok(RoleChoice::Cdn),
            "direct" => Ok(RoleChoice::Direct),
            _ => Err(AppError::InvalidChoice {
                value: value.to_string(),
                expected: "'cdn' or 'direct'".to_string(),
            }),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RoleChoice::Cdn => "cdn",
            RoleChoice::Direct => "direct",
        }
    }
}

/// Which domain terminates TLS at the edge proxy and which at the origin.
///
/// Built once per run and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RolePlan {
    Cdn { cdn: String },
    Direct { direct: String },
    Both { cdn: String, direct: String },
}

impl RolePlan {
    pub fn cdn_domain(&self) -> Option<&str> {
        match self {
            RolePlan::Cdn { cdn } | RolePlan::Both { cdn, .. } => Some(cdn),
            RolePlan::Direct { .. } => None,
        }
    }

    pub fn direct_domain(&self) -> Option<&str> {
        match self {
            RolePlan::Direct { direct } | RolePlan::Both { direct, .. } => Some(direct),
            RolePlan::Cdn { .. } => None,
        }
    }

    /// Domain used to namespace generated paths.
    pub fn primary_domain(&self) -> &str {
        match self {
            RolePlan::Cdn { cdn } | RolePlan::Both { cdn, .. } => cdn,
            RolePlan::Direct { direct } => direct,
        }
    }

    /// Assigned domains, deduplicated, CDN first.
    pub fn domains(&self) -> Vec<&str> {
        let mut domains: Vec<&str> = Vec::with_capacity(2);
        for domain in [self.cdn_domain(), self.direct_domain()].into_iter().flatten() {
            if !domains.contains(&domain) {
                domains.push(domain);
            }
        }
        domains
    }

    /// `-d <domain>` flags for the certificate issuer.
    pub fn domains_args(&self) -> String {
        self.domains().iter().map(|d| format!("-d {}", d)).collect::<Vec<_>>().join(" ")
    }
}

impl fmt::Display for RolePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cdn={} direct={}",
            self.cdn_domain().unwrap_or("-"),
            self.direct_domain().unwrap_or("-")
        )
    }
}

/// Resolve entered domains and role answers into a [`RolePlan`].
///
/// With one domain only `single_choice` is consulted. With two or more,
/// `cdn_pick` and `direct_pick` are independent and a blank pick skips that role.
pub fn assign_roles(
    domains: &DomainSet,
    single_choice: Option<&str>,
    cdn_pick: Option<&str>,
    direct_pick: Option<&str>,
) -> Result<RolePlan, AppError> {
    if domains.len() == 1 {
        let domain = domains.first().to_string();
        return match RoleChoice::parse(single_choice.unwrap_or_default())? {
            RoleChoice::Cdn => Ok(RolePlan::Cdn { cdn: domain }),
            RoleChoice::Direct => Ok(RolePlan::Direct { direct: domain }),
        };
    }

    let cdn = resolve_pick(domains, cdn_pick)?;
    let direct = resolve_pick(domains, direct_pick)?;

    match (cdn, direct) {
        (Some(cdn), Some(direct)) if cdn == direct => Err(AppError::InvalidChoice {
            value: cdn,
            expected: "different domains for the CDN and direct roles".to_string(),
        }),
        (Some(cdn), Some(direct)) => Ok(RolePlan::Both { cdn, direct }),
        (Some(cdn), None) => Ok(RolePlan::Cdn { cdn }),
        (None, Some(direct)) => Ok(RolePlan::Direct { direct }),
        (None, None) => Err(AppError::NoRoleSelected),
    }
}

fn resolve_pick(domains: &DomainSet, pick: Option<&str>) -> Result<Option<String>, AppError> {
    let Some(pick) = pick.map(str::trim).filter(|p| !p.is_empty()) else {
        return Ok(None);
    };
    if !domains.contains(pick) {
        return Err(AppError::DomainNotListed {
            domain: pick.to_string(),
            available: domains.to_string(),
        });
    }
    Ok(Some(pick.to_string()))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn set(domains: &[&str]) -> DomainSet {
        DomainSet::new(domains).unwrap()
    }

    #[test]
    fn single_domain_direct() {
        let plan = assign_roles(&set(&["example.com"]), Some("direct"), None, None).unwrap();
        assert_eq!(plan.direct_domain(), Some("example.com"));
        assert_eq!(plan.cdn_domain(), None);
        assert_eq!(plan.domains_args(), "-d example.com");
        assert_eq!(plan.primary_domain(), "example.com");
    }

    #[test]
    fn single_domain_defaults_to_cdn() {
        let plan = assign_roles(&set(&["example.com"]), None, None, None).unwrap();
        assert_eq!(plan, RolePlan::Cdn { cdn: "example.com".into() });

        let plan = assign_roles(&set(&["example.com"]), Some(" CDN "), None, None).unwrap();
        assert_eq!(plan.cdn_domain(), Some("example.com"));
    }

    #[test]
    fn single_domain_rejects_unknown_choice() {
        let err = assign_roles(&set(&["example.com"]), Some("both"), None, None).unwrap_err();
        assert!(matches!(err, AppError::InvalidChoice { .. }));
    }

    #[test]
    fn two_domains_both_roles() {
        let plan =
            assign_roles(&set(&["a.com", "b.com"]), None, Some("a.com"), Some("b.com")).unwrap();
        assert_eq!(plan.cdn_domain(), Some("a.com"));
        assert_eq!(plan.direct_domain(), Some("b.com"));
        assert_eq!(plan.domains_args(), "-d a.com -d b.com");
        assert_eq!(plan.primary_domain(), "a.com");
    }

    #[test]
    fn two_domains_unlisted_pick() {
        let err = assign_roles(&set(&["a.com", "b.com"]), None, Some("c.com"), None).unwrap_err();
        assert!(matches!(err, AppError::DomainNotListed { ref domain, .. } if domain == "c.com"));
    }

    #[test]
    fn substring_domains_are_not_members() {
        let err = assign_roles(&set(&["xa.com", "b.com"]), None, Some("a.com"), None).unwrap_err();
        assert!(matches!(err, AppError::DomainNotListed { .. }));
    }

    #[test]
    fn two_domains_skip_one_role() {
        let plan = assign_roles(&set(&["a.com", "b.com"]), None, Some(""), Some("b.com")).unwrap();
        assert_eq!(plan, RolePlan::Direct { direct: "b.com".into() });
        assert_eq!(plan.primary_domain(), "b.com");
    }

    #[test]
    fn two_domains_no_role() {
        let err = assign_roles(&set(&["a.com", "b.com"]), None, None, Some("  ")).unwrap_err();
        assert!(matches!(err, AppError::NoRoleSelected));
    }

    #[test]
    fn two_domains_same_pick_for_both_roles() {
        let err =
            assign_roles(&set(&["a.com", "b.com"]), None, Some("a.com"), Some("a.com")).unwrap_err();
        assert!(matches!(err, AppError::InvalidChoice { .. }));
    }

    fn domain_strategy() -> impl Strategy<Value = String> {
        "[a-z]{1,6}\\.(com|net|org)"
    }

    proptest! {
        #[test]
        fn assigned_roles_reference_entered_domains(
            domains in prop::collection::vec(domain_strategy(), 1..5),
            single in prop::option::of(prop::sample::select(vec!["", "cdn", "direct"])),
            cdn_idx in prop::option::of(0usize..5),
            direct_idx in prop::option::of(0usize..5),
        ) {
            let set = DomainSet::new(&domains).unwrap();
            let cdn_pick = cdn_idx.and_then(|i| domains.get(i)).map(String::as_str);
            let direct_pick = direct_idx.and_then(|i| domains.get(i)).map(String::as_str);

            match assign_roles(&set, single, cdn_pick, direct_pick) {
                Ok(plan) => {
                    prop_assert!(plan.cdn_domain().is_some() || plan.direct_domain().is_some());
                    for domain in plan.domains() {
                        prop_assert!(set.contains(domain));
                    }
                    if let RolePlan::Both { cdn, direct } = &plan {
                        prop_assert_ne!(cdn, direct);
                    }
                    let primary_flag = format!("-d {}", plan.primary_domain());
                    prop_assert!(
                        plan.domains_args().contains(&primary_flag),
                        "domains args lack the primary domain flag"
                    );
                }
                Err(AppError::NoRoleSelected) => {
                    prop_assert!(set.len() > 1);
                    prop_assert!(cdn_pick.is_none() && direct_pick.is_none());
                }
                Err(AppError::InvalidChoice { .. }) => {
                    prop_assert!(set.len() > 1);
                    prop_assert_eq!(cdn_pick, direct_pick);
                }
                Err(e) => prop_assert!(false, "Unexpected error: {:?}", e),
            }
        }

        #[test]
        fn unlisted_pick_always_fails(
            domains in prop::collection::vec(domain_strategy(), 2..5),
            stranger in "[a-z]{7,9}\\.io",
            as_cdn in any::<bool>(),
        ) {
            let set = DomainSet::new(&domains).unwrap();
            let result = if as_cdn {
                assign_roles(&set, None, Some(&stranger), None)
            } else {
                assign_roles(&set, None, None, Some(&stranger))
            };
            prop_assert!(
                matches!(result, Err(AppError::DomainNotListed { .. })),
                "expected DomainNotListed"
            );
        }
    }
}
