use std::collections::BTreeMap;
use std::path::PathBuf;

use ingest::ProviderConfig;
use mailstats_db::Db;

use crate::error::{AppError, Result};
use crate::services::AppServices;

/// Everything the services need, built once at startup and passed down.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub db_path: PathBuf,
    /// The mailbox whose traffic is classified; default for reads.
    pub account: String,
    pub provider: ProviderConfig,
    /// Domains known to be provider-hosted without an MX check.
    pub known_domains: Vec<String>,
    /// Static MX table, domain to hosts in priority order.
    pub mx_hosts: BTreeMap<String, Vec<String>>,
}

impl AppConfig {
    pub fn new(db_path: PathBuf, account: impl Into<String>) -> Self {
        Self {
            db_path,
            account: account.into(),
            provider: ProviderConfig::default(),
            known_domains: Vec::new(),
            mx_hosts: BTreeMap::new(),
        }
    }
}

/// Application state shared by the CLI and the HTTP server.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub services: AppServices,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let services = AppServices::new(&config);
        Self { config, services }
    }

    pub fn setup_db(&self) -> Result<()> {
        let mut db = self.open_db()?;
        db.migrate()
            .map_err(|err| AppError::Message(format!("initialize db: {}", err)))?;
        Ok(())
    }

    pub fn open_db(&self) -> Result<Db> {
        Ok(Db::open(&self.config.db_path)?)
    }
}
