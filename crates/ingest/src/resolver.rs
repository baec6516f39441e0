use std::collections::{HashMap, HashSet};

use crate::classify::DomainResolver;
use crate::types::ResolveError;

/// Source of MX host names for a domain, highest priority first.
pub trait MxLookup: Send + Sync {
    fn mx_hosts(&self, domain: &str) -> Result<Vec<String>, ResolveError>;
}

/// Treats a domain as hosted when its primary MX host contains `marker`.
pub struct MxResolver<L> {
    lookup: L,
    marker: String,
}

impl<L: MxLookup> MxResolver<L> {
    pub fn new(lookup: L, marker: impl Into<String>) -> Self {
        Self {
            lookup,
            marker: marker.into().to_ascii_lowercase(),
        }
    }
}

impl<L: MxLookup> DomainResolver for MxResolver<L> {
    fn is_provider_hosted(&self, domain: &str) -> Result<bool, ResolveError> {
        let hosts = self.lookup.mx_hosts(domain)?;
        Ok(hosts
            .first()
            .is_some_and(|host| host.to_ascii_lowercase().contains(&self.marker)))
    }
}

/// MX data configured ahead of time instead of looked up live.
#[derive(Debug, Clone, Default)]
pub struct StaticMxTable {
    hosts: HashMap<String, Vec<String>>,
}

impl StaticMxTable {
    pub fn new<I, D, H>(entries: I) -> Self
    where
        I: IntoIterator<Item = (D, Vec<H>)>,
        D: Into<String>,
        H: Into<String>,
    {
        let hosts = entries
            .into_iter()
            .map(|(domain, hosts)| {
                (
                    domain.into().to_ascii_lowercase(),
                    hosts.into_iter().map(Into::into).collect(),
                )
            })
            .collect();
        Self { hosts }
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}

impl MxLookup for StaticMxTable {
    fn mx_hosts(&self, domain: &str) -> Result<Vec<String>, ResolveError> {
        self.hosts
            .get(&domain.to_ascii_lowercase())
            .cloned()
            .ok_or_else(|| ResolveError::UnknownDomain(domain.to_string()))
    }
}

/// Fixed allow-list of hosted domains.
#[derive(Debug, Clone, Default)]
pub struct KnownDomains {
    domains: HashSet<String>,
}

impl KnownDomains {
    pub fn new<I, D>(domains: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<String>,
    {
        Self {
            domains: domains
                .into_iter()
                .map(|domain| domain.into().to_ascii_lowercase())
                .collect(),
        }
    }
}

impl DomainResolver for KnownDomains {
    fn is_provider_hosted(&self, domain: &str) -> Result<bool, ResolveError> {
        Ok(self.domains.contains(&domain.to_ascii_lowercase()))
    }
}
