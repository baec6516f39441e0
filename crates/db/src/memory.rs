use std::collections::HashMap;
use std::sync::RwLock;

use mailstats_core::StatsRecord;

use crate::error::{DbError, Result};
use crate::table::StatsTable;

/// Process-local table. Partition queries come back in hash order, like an
/// unordered scan.
#[derive(Debug, Default)]
pub struct MemoryTable {
    rows: RwLock<HashMap<(String, i64), StatsRecord>>,
}

impl MemoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.read().map(|rows| rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> DbError {
    DbError::Backend("memory table lock poisoned".to_string())
}

impl StatsTable for MemoryTable {
    fn get(&self, account: &str, hour: i64) -> Result<Option<StatsRecord>> {
        let rows = self.rows.read().map_err(|_| poisoned())?;
        Ok(rows.get(&(account.to_string(), hour)).cloned())
    }

    fn put(&self, record: &StatsRecord) -> Result<()> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        rows.insert((record.account.clone(), record.hour), record.clone());
        Ok(())
    }

    fn query_partition(&self, account: &str, start: i64, end: i64) -> Result<Vec<StatsRecord>> {
        let rows = self.rows.read().map_err(|_| poisoned())?;
        Ok(rows
            .values()
            .filter(|record| record.account == account && record.hour >= start && record.hour <= end)
            .cloned()
            .collect())
    }
}
