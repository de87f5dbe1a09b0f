use proptest::prelude::*;
use std::fs;
use tempfile::TempDir;
use vpsboot::{
    AppError, DomainSet, RenderContext, RolePlan, TemplateSpec, assign_roles, render,
    render_to_file,
};

#[test]
fn three_domains_pick_roles_by_exact_name() {
    let domains = DomainSet::parse("a.com b.com c.com").unwrap();
    let plan = assign_roles(&domains, None, Some("c.com"), Some("a.com")).unwrap();
    assert_eq!(plan, RolePlan::Both { cdn: "c.com".into(), direct: "a.com".into() });
    assert_eq!(plan.primary_domain(), "c.com");
    assert_eq!(plan.domains_args(), "-d c.com -d a.com");

    let err = assign_roles(&domains, None, Some("A.COM"), None).unwrap_err();
    assert!(matches!(err, AppError::DomainNotListed { .. }));
}

#[test]
fn render_leaves_unknown_keys_and_does_not_rescan() {
    let template = TemplateSpec::new("t", "{{A}} {{UNKNOWN}} {{B}}");
    let context = RenderContext::new().with("A", "{{B}}").with("B", "b");
    assert_eq!(render(&template, &context), "{{B}} {{UNKNOWN}} b");
}

#[test]
fn render_to_file_writes_through_public_api() {
    let dir = TempDir::new().unwrap();
    let dest = dir.path().join("nested/out.conf");
    let template = TemplateSpec::new("t", "listen {{PORT}};");

    let artifact =
        render_to_file(&template, &RenderContext::new().with("PORT", "443"), &dest).unwrap();

    assert_eq!(artifact.content, "listen 443;");
    assert_eq!(fs::read_to_string(&dest).unwrap(), "listen 443;");
}

proptest! {
    #[test]
    fn two_listed_picks_always_yield_both(a in "[a-z]{1,8}\\.com", b in "[a-z]{1,8}\\.net") {
        let domains = DomainSet::new([a.as_str(), b.as_str()]).unwrap();
        let plan = assign_roles(&domains, None, Some(&a), Some(&b)).unwrap();
        prop_assert_eq!(plan.cdn_domain(), Some(a.as_str()));
        prop_assert_eq!(plan.direct_domain(), Some(b.as_str()));
        prop_assert_eq!(plan.domains_args(), format!("-d {} -d {}", a, b));
    }
}
