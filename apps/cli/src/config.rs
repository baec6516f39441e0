use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ingest::ProviderConfig;
use serde::{Deserialize, Serialize};

const CONFIG_DIR_NAME: &str = "mailstats";
const CONFIG_FILE_NAME: &str = "config.toml";
const DEFAULT_PORT: u16 = 3846;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub port: u16,
    pub account: String,
    pub log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_path: Option<PathBuf>,
    pub known_domains: Vec<String>,
    pub provider: ProviderConfig,
    /// Domain to MX hosts, highest priority first.
    pub mx: BTreeMap<String, Vec<String>>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            account: String::new(),
            log_level: "info".to_string(),
            db_path: None,
            known_domains: Vec::new(),
            provider: ProviderConfig::default(),
            mx: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: CliConfig,
    pub file: PathBuf,
    pub created: bool,
}

pub fn load_or_create(explicit: Option<&Path>) -> Result<ConfigLoad> {
    let file = match explicit {
        Some(path) => path.to_path_buf(),
        None => config_dir()?.join(CONFIG_FILE_NAME),
    };

    if file.exists() {
        let contents = fs::read_to_string(&file)
            .with_context(|| format!("read config {}", file.display()))?;
        let config = parse(&contents).with_context(|| format!("parse config {}", file.display()))?;
        return Ok(ConfigLoad {
            config,
            file,
            created: false,
        });
    }

    if let Some(dir) = file.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create config dir {}", dir.display()))?;
    }
    let config = CliConfig::default();
    let contents = toml::to_string_pretty(&config).context("serialize config")?;
    fs::write(&file, contents).with_context(|| format!("write config {}", file.display()))?;

    Ok(ConfigLoad {
        config,
        file,
        created: true,
    })
}

pub fn parse(contents: &str) -> Result<CliConfig> {
    Ok(toml::from_str(contents)?)
}

fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("resolve config directory")?;
    Ok(base.join(CONFIG_DIR_NAME))
}
