use mailstats_core::StatsRecord;
use rusqlite::{OptionalExtension, params};

use crate::Db;
use crate::error::Result;
use crate::helpers::{RECORD_COLUMNS, counter_to_sql, row_to_record};

/// The three primitives a backing store must offer: get by key, upsert by
/// key, and fetch a partition slice by sort-key bounds.
///
/// `query_partition` bounds are inclusive. Implementations may return rows in
/// any order and must not truncate.
pub trait StatsTable {
    fn get(&self, account: &str, hour: i64) -> Result<Option<StatsRecord>>;
    fn put(&self, record: &StatsRecord) -> Result<()>;
    fn query_partition(&self, account: &str, start: i64, end: i64) -> Result<Vec<StatsRecord>>;
}

impl<T: StatsTable + ?Sized> StatsTable for &T {
    fn get(&self, account: &str, hour: i64) -> Result<Option<StatsRecord>> {
        (**self).get(account, hour)
    }

    fn put(&self, record: &StatsRecord) -> Result<()> {
        (**self).put(record)
    }

    fn query_partition(&self, account: &str, start: i64, end: i64) -> Result<Vec<StatsRecord>> {
        (**self).query_partition(account, start, end)
    }
}

impl StatsTable for Db {
    fn get(&self, account: &str, hour: i64) -> Result<Option<StatsRecord>> {
        let sql = format!(
            "SELECT {RECORD_COLUMNS} FROM hourly_stats WHERE account = ?1 AND hour = ?2"
        );
        Ok(self
            .conn
            .query_row(&sql, params![account, hour], row_to_record)
            .optional()?)
    }

    fn put(&self, record: &StatsRecord) -> Result<()> {
        let counters = &record.counters;
        self.conn.execute(
            r#"
            INSERT INTO hourly_stats (
              account, hour, to_me_from_gmail, to_me_from_non_gmail,
              from_me_to_gmail, from_me_to_non_gmail, is_deleted
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(account, hour) DO UPDATE SET
              to_me_from_gmail = excluded.to_me_from_gmail,
              to_me_from_non_gmail = excluded.to_me_from_non_gmail,
              from_me_to_gmail = excluded.from_me_to_gmail,
              from_me_to_non_gmail = excluded.from_me_to_non_gmail,
              is_deleted = excluded.is_deleted
            "#,
            params![
                record.account,
                record.hour,
                counter_to_sql(counters.to_me_from_gmail)?,
                counter_to_sql(counters.to_me_from_non_gmail)?,
                counter_to_sql(counters.from_me_to_gmail)?,
                counter_to_sql(counters.from_me_to_non_gmail)?,
                record.is_deleted,
            ],
        )?;
        Ok(())
    }

    fn query_partition(&self, account: &str, start: i64, end: i64) -> Result<Vec<StatsRecord>> {
        let sql = format!(
            r#"
            SELECT {RECORD_COLUMNS}
            FROM hourly_stats
            WHERE account = ?1 AND hour BETWEEN ?2 AND ?3
            ORDER BY hour ASC
            "#
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![account, start, end], row_to_record)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

impl Db {
    pub fn count_records(&self, account: &str) -> Result<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM hourly_stats WHERE account = ?1",
            params![account],
            |row| row.get(0),
        )?;
        Ok(count.max(0) as u64)
    }

    pub fn list_accounts(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT account FROM hourly_stats ORDER BY account ASC")?;
        let rows = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(rows)
    }
}
