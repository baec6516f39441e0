mod error;
mod helpers;
mod memory;
mod migrations;
mod range;
mod store;
mod table;

use std::path::Path;
use std::time::Duration;

use rusqlite::Connection;

pub use error::{DbError, Result, StoreError, StoreResult};
pub use memory::MemoryTable;
pub use range::range_query;
pub use store::{MAX_COUNTER, RecordStore, parse_hour, record_from_value};
pub use table::StatsTable;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-backed stats table.
pub struct Db {
    conn: Connection,
}

impl Db {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "temp_store", "MEMORY")?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }
}
