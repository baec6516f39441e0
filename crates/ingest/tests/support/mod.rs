#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use ingest::{DomainResolver, KnownDomains, ProviderClassifier, ProviderConfig, ResolveError};
use mailstats_core::Message;

pub const ME: &str = "me@example.com";

pub fn msg(from: &str, to: &str) -> Message {
    Message::new(from, to)
}

pub fn known(domains: &[&str]) -> ProviderClassifier<KnownDomains> {
    ProviderClassifier::new(
        ProviderConfig::default(),
        KnownDomains::new(domains.iter().copied()),
    )
}

/// Counts lookups and records which domains were asked about.
#[derive(Default)]
pub struct CountingResolver {
    pub hosted: Vec<String>,
    pub calls: AtomicUsize,
    pub asked: Mutex<Vec<String>>,
}

impl CountingResolver {
    pub fn new(hosted: &[&str]) -> Self {
        Self {
            hosted: hosted.iter().map(|domain| domain.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DomainResolver for CountingResolver {
    fn is_provider_hosted(&self, domain: &str) -> Result<bool, ResolveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.asked
            .lock()
            .expect("asked lock")
            .push(domain.to_string());
        Ok(self.hosted.iter().any(|hosted| hosted == domain))
    }
}

pub struct FailingResolver;

impl DomainResolver for FailingResolver {
    fn is_provider_hosted(&self, domain: &str) -> Result<bool, ResolveError> {
        Err(ResolveError::Lookup {
            domain: domain.to_string(),
            message: "verification service unavailable".to_string(),
        })
    }
}
