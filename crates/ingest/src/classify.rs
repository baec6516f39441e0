use std::collections::{HashMap, HashSet};

use mailstats_core::{Message, contains_address, domain_of, extract_addresses};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::ResolveError;

/// Answers whether a domain's mail is served by the tracked provider.
pub trait DomainResolver: Send + Sync {
    fn is_provider_hosted(&self, domain: &str) -> Result<bool, ResolveError>;
}

impl<R: DomainResolver + ?Sized> DomainResolver for &R {
    fn is_provider_hosted(&self, domain: &str) -> Result<bool, ResolveError> {
        (**self).is_provider_hosted(domain)
    }
}

impl<R: DomainResolver + ?Sized> DomainResolver for Box<R> {
    fn is_provider_hosted(&self, domain: &str) -> Result<bool, ResolveError> {
        (**self).is_provider_hosted(domain)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Substring that marks an address as provider-hosted without a lookup.
    pub domain: String,
    /// Substring the primary MX host must contain for a custom domain.
    pub mx_marker: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            domain: "gmail.com".to_string(),
            mx_marker: "google.com".to_string(),
        }
    }
}

pub struct ProviderClassifier<R> {
    provider: ProviderConfig,
    resolver: R,
}

impl<R: DomainResolver> ProviderClassifier<R> {
    pub fn new(provider: ProviderConfig, resolver: R) -> Self {
        Self { provider, resolver }
    }

    fn matches_provider_domain(&self, header: &str) -> bool {
        contains_address(header, &self.provider.domain)
    }

    /// Resolver failures count as "not hosted".
    pub fn resolve_domain(&self, domain: &str) -> bool {
        match self.resolver.is_provider_hosted(domain) {
            Ok(hosted) => hosted,
            Err(err) => {
                debug!(domain, error = %err, "domain resolution failed; treating as not hosted");
                false
            }
        }
    }

    /// True when any address in `header` is served by the provider.
    pub fn is_provider_hosted(&self, header: &str) -> bool {
        if self.matches_provider_domain(header) {
            return true;
        }
        counterparty_domains(header)
            .iter()
            .any(|domain| self.resolve_domain(domain))
    }

    /// Resolves each distinct counterparty domain of `messages` once, in
    /// parallel, and answers later questions from that table.
    pub fn for_batch(&self, self_address: &str, messages: &[Message]) -> BatchClassifier<'_, R> {
        let mut domains = HashSet::new();
        for message in messages {
            let Some(header) = counterparty_header(self_address, message) else {
                continue;
            };
            if self.matches_provider_domain(header) {
                continue;
            }
            domains.extend(counterparty_domains(header));
        }
        let answers = domains
            .into_par_iter()
            .map(|domain| {
                let hosted = self.resolve_domain(&domain);
                (domain, hosted)
            })
            .collect::<HashMap<_, _>>();
        debug!(domains = answers.len(), "resolved batch domains");
        BatchClassifier {
            classifier: self,
            answers,
        }
    }
}

pub struct BatchClassifier<'a, R> {
    classifier: &'a ProviderClassifier<R>,
    answers: HashMap<String, bool>,
}

impl<R: DomainResolver> BatchClassifier<'_, R> {
    pub fn is_provider_hosted(&self, header: &str) -> bool {
        if self.classifier.matches_provider_domain(header) {
            return true;
        }
        counterparty_domains(header).iter().any(|domain| {
            match self.answers.get(domain) {
                Some(hosted) => *hosted,
                None => self.classifier.resolve_domain(domain),
            }
        })
    }

    pub fn resolved_domains(&self) -> usize {
        self.answers.len()
    }
}

/// The header whose hosting decides the category of `message`, if any.
fn counterparty_header<'m>(self_address: &str, message: &'m Message) -> Option<&'m str> {
    if contains_address(&message.to, self_address) {
        Some(&message.from)
    } else if contains_address(&message.from, self_address) {
        Some(&message.to)
    } else {
        None
    }
}

fn counterparty_domains(header: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    extract_addresses(header)
        .iter()
        .filter_map(|address| domain_of(address))
        .filter(|domain| seen.insert(domain.clone()))
        .collect()
}
