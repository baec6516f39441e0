mod support;

use ingest::{
    DomainResolver, KnownDomains, MxResolver, ProviderClassifier, ProviderConfig, ResolveError,
    StaticMxTable,
};
use support::{CountingResolver, FailingResolver, ME, msg};

#[test]
fn provider_domain_substring_skips_the_resolver() {
    let resolver = CountingResolver::new(&[]);
    let classifier = ProviderClassifier::new(ProviderConfig::default(), &resolver);

    assert!(classifier.is_provider_hosted("Someone <someone@GMAIL.com>"));
    assert_eq!(resolver.calls(), 0);
}

#[test]
fn custom_domains_are_delegated_to_the_resolver() {
    let resolver = CountingResolver::new(&["calblueprint.org"]);
    let classifier = ProviderClassifier::new(ProviderConfig::default(), &resolver);

    assert!(classifier.is_provider_hosted("Team <team@calblueprint.org>"));
    assert!(!classifier.is_provider_hosted("w@example.com"));
    assert_eq!(resolver.calls(), 2);
}

#[test]
fn any_hosted_recipient_makes_the_header_hosted() {
    let classifier = support::known(&["calblueprint.org"]);
    assert!(classifier.is_provider_hosted("w@example.com, team@calblueprint.org"));
    assert!(!classifier.is_provider_hosted("w@example.com, x@example.net"));
    assert!(!classifier.is_provider_hosted("undisclosed-recipients:;"));
}

#[test]
fn resolver_failure_fails_open_to_not_hosted() {
    let classifier = ProviderClassifier::new(ProviderConfig::default(), FailingResolver);
    assert!(!classifier.is_provider_hosted("w@example.com"));
    assert!(classifier.is_provider_hosted("x@gmail.com"));
}

#[test]
fn classification_is_idempotent() {
    let classifier = support::known(&["calblueprint.org"]);
    let header = "team@calblueprint.org";
    let first = classifier.is_provider_hosted(header);
    for _ in 0..3 {
        assert_eq!(classifier.is_provider_hosted(header), first);
    }
}

#[test]
fn batch_resolves_each_counterparty_domain_once() {
    let resolver = CountingResolver::new(&["calblueprint.org"]);
    let classifier = ProviderClassifier::new(ProviderConfig::default(), &resolver);
    let messages = vec![
        msg("a@calblueprint.org", ME),
        msg("b@calblueprint.org", ME),
        msg("c@example.net", ME),
        msg(ME, "d@example.net"),
        msg("x@gmail.com", ME),
        msg("stranger@elsewhere.io", "other@elsewhere.io"),
    ];

    let batch = classifier.for_batch(ME, &messages);

    assert_eq!(batch.resolved_domains(), 2);
    assert_eq!(resolver.calls(), 2);
    assert!(batch.is_provider_hosted("b@calblueprint.org"));
    assert!(!batch.is_provider_hosted("d@example.net"));
    assert_eq!(resolver.calls(), 2);
    let asked = resolver.asked.lock().expect("asked lock");
    assert!(!asked.iter().any(|domain| domain == "elsewhere.io"));
}

#[test]
fn mx_resolver_checks_primary_host_for_marker() {
    let table = StaticMxTable::new([
        ("calblueprint.org", vec!["ASPMX.L.GOOGLE.COM", "alt1.aspmx.l.google.com"]),
        ("example.com", vec!["mx.example.com", "backup.google.com"]),
        ("nomx.org", Vec::<&str>::new()),
    ]);
    let resolver = MxResolver::new(table, "google.com");

    assert_eq!(resolver.is_provider_hosted("calblueprint.org"), Ok(true));
    assert_eq!(resolver.is_provider_hosted("example.com"), Ok(false));
    assert_eq!(resolver.is_provider_hosted("nomx.org"), Ok(false));
    assert_eq!(
        resolver.is_provider_hosted("unknown.net"),
        Err(ResolveError::UnknownDomain("unknown.net".to_string()))
    );
}

#[test]
fn known_domains_match_case_insensitively() {
    let resolver = KnownDomains::new(["CalBlueprint.org"]);
    assert_eq!(resolver.is_provider_hosted("calblueprint.ORG"), Ok(true));
    assert_eq!(resolver.is_provider_hosted("example.com"), Ok(false));
}
