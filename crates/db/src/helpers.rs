use mailstats_core::{CounterSet, StatsRecord};
use rusqlite::Row;

use crate::error::{DbError, Result};

pub(crate) const RECORD_COLUMNS: &str = "account, hour, to_me_from_gmail, to_me_from_non_gmail, \
     from_me_to_gmail, from_me_to_non_gmail, is_deleted";

pub(crate) fn row_to_record(row: &Row<'_>) -> std::result::Result<StatsRecord, rusqlite::Error> {
    Ok(StatsRecord {
        account: row.get(0)?,
        hour: row.get(1)?,
        counters: CounterSet {
            to_me_from_gmail: row.get::<_, i64>(2)? as u64,
            to_me_from_non_gmail: row.get::<_, i64>(3)? as u64,
            from_me_to_gmail: row.get::<_, i64>(4)? as u64,
            from_me_to_non_gmail: row.get::<_, i64>(5)? as u64,
        },
        is_deleted: row.get(6)?,
    })
}

pub(crate) fn counter_to_sql(value: u64) -> Result<i64> {
    i64::try_from(value)
        .map_err(|_| DbError::Backend(format!("counter {} does not fit the stats table", value)))
}
