mod ingest;
mod stats;

use std::sync::Arc;

use ::ingest::{
    DomainResolver, KnownDomains, MxResolver, ProviderClassifier, ResolveError, StaticMxTable,
};
use mailstats_db::{Db, RecordStore};

use crate::app::AppConfig;
use crate::error::{AppError, Result};

pub use self::ingest::IngestService;
pub use stats::StatsService;

type SharedConfig = Arc<AppConfig>;
type SharedClassifier = Arc<ProviderClassifier<ConfiguredResolver>>;

/// Service registry for app-level operations.
#[derive(Clone)]
pub struct AppServices {
    pub stats: StatsService,
    pub ingest: IngestService,
}

impl AppServices {
    pub fn new(config: &AppConfig) -> Self {
        let shared = Arc::new(config.clone());
        let classifier = Arc::new(ProviderClassifier::new(
            config.provider.clone(),
            ConfiguredResolver::from_config(config),
        ));
        Self {
            stats: StatsService::new(shared.clone()),
            ingest: IngestService::new(shared, classifier),
        }
    }
}

/// Known domains first, then the configured MX table.
pub struct ConfiguredResolver {
    known: KnownDomains,
    mx: MxResolver<StaticMxTable>,
}

impl ConfiguredResolver {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            known: KnownDomains::new(config.known_domains.iter().cloned()),
            mx: MxResolver::new(
                StaticMxTable::new(config.mx_hosts.clone()),
                config.provider.mx_marker.clone(),
            ),
        }
    }
}

impl DomainResolver for ConfiguredResolver {
    fn is_provider_hosted(&self, domain: &str) -> std::result::Result<bool, ResolveError> {
        if self.known.is_provider_hosted(domain)? {
            return Ok(true);
        }
        self.mx.is_provider_hosted(domain)
    }
}

fn open_store(config: &SharedConfig) -> Result<RecordStore<Db>> {
    Ok(RecordStore::new(Db::open(&config.db_path)?))
}

fn resolve_account(config: &SharedConfig, account: Option<&str>) -> Result<String> {
    let account = account
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(config.account.as_str());
    if account.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "no account given and none configured".to_string(),
        ));
    }
    Ok(account.to_string())
}
