use std::path::Path;

use ingest::{IngestStats, JsonlMessageSource, MessageSource, SourceMessage, VecMessageSource};

use crate::error::Result;
use crate::services::{SharedClassifier, SharedConfig, open_store};
use crate::util::time::current_hour;

#[derive(Clone)]
pub struct IngestService {
    config: SharedConfig,
    classifier: SharedClassifier,
}

impl IngestService {
    pub(super) fn new(config: SharedConfig, classifier: SharedClassifier) -> Self {
        Self { config, classifier }
    }

    /// Aggregates the configured account for `hour`, or for the last complete
    /// hour when none is given.
    pub fn run<S: MessageSource + ?Sized>(
        &self,
        source: &S,
        hour: Option<i64>,
    ) -> Result<IngestStats> {
        let hour = hour.unwrap_or_else(current_hour);
        let store = open_store(&self.config)?;
        Ok(ingest::ingest_hour(
            &store,
            source,
            &*self.classifier,
            &self.config.account,
            hour,
        )?)
    }

    pub fn run_path(&self, path: &Path, hour: Option<i64>) -> Result<IngestStats> {
        self.run(&JsonlMessageSource::new(path), hour)
    }

    pub fn run_messages(
        &self,
        messages: Vec<SourceMessage>,
        hour: Option<i64>,
    ) -> Result<IngestStats> {
        self.run(&VecMessageSource::new(messages), hour)
    }
}
