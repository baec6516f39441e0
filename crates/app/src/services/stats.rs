use mailstats_core::{StatsRecord, TimeSeries};
use serde_json::Value;

use crate::config::HourRangeParams;
use crate::error::Result;
use crate::services::{SharedConfig, open_store, resolve_account};
use crate::util::time::resolve_hour_range;

#[derive(Clone)]
pub struct StatsService {
    config: SharedConfig,
}

impl StatsService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    pub fn read_one(&self, account: Option<&str>, hour: i64) -> Result<StatsRecord> {
        let account = resolve_account(&self.config, account)?;
        Ok(open_store(&self.config)?.read_one(&account, hour)?)
    }

    /// Like `read_one`, for an hour that arrived as untyped JSON.
    pub fn read_one_value(
        &self,
        account: Option<&str>,
        hour: Option<&Value>,
    ) -> Result<StatsRecord> {
        let account = resolve_account(&self.config, account)?;
        Ok(open_store(&self.config)?.read_one_value(&account, hour)?)
    }

    pub fn range(&self, account: Option<&str>, params: &HourRangeParams) -> Result<TimeSeries> {
        let account = resolve_account(&self.config, account)?;
        let (start, end) = resolve_hour_range(params)?;
        Ok(open_store(&self.config)?.range(&account, start, end)?)
    }

    pub fn write(&self, record: &StatsRecord) -> Result<()> {
        Ok(open_store(&self.config)?.write(record)?)
    }

    pub fn write_value(&self, value: &Value) -> Result<StatsRecord> {
        Ok(open_store(&self.config)?.write_value(value)?)
    }
}
