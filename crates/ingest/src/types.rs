use std::io;
use std::path::PathBuf;

use mailstats_core::CounterSet;
use serde::Serialize;

/// Summary of one hourly ingest run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestStats {
    pub account: String,
    pub hour: i64,
    pub messages: usize,
    pub duplicates: usize,
    pub unaddressed: usize,
    pub counters: CounterSet,
    pub issues: Vec<IngestIssue>,
}

/// Non-fatal issues encountered while reading a message source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestIssue {
    pub file_path: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("no MX data for domain {0}")]
    UnknownDomain(String),
    #[error("lookup for {domain} failed: {message}")]
    Lookup { domain: String, message: String },
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("message source unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("hour {0} is not aligned to an hour boundary")]
    InvalidHour(i64),
    #[error("source error: {0}")]
    Source(#[from] SourceError),
    #[error("store error: {0}")]
    Store(#[from] mailstats_db::StoreError),
}

pub type Result<T> = std::result::Result<T, IngestError>;
