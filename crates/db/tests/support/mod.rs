#![allow(dead_code)]

use std::path::PathBuf;

use mailstats_core::{CounterSet, StatsRecord};
use mailstats_db::{Db, RecordStore};
use tempfile::TempDir;

pub struct TestDb {
    pub _dir: TempDir,
    pub db: Db,
    pub path: PathBuf,
}

pub fn setup_db() -> TestDb {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("test.sqlite");
    let mut db = Db::open(&path).expect("open db");
    db.migrate().expect("migrate db");
    TestDb {
        _dir: dir,
        db,
        path,
    }
}

pub fn store(test_db: &TestDb) -> RecordStore<&Db> {
    RecordStore::new(&test_db.db)
}

pub fn counters(values: [u64; 4]) -> CounterSet {
    CounterSet {
        to_me_from_gmail: values[0],
        to_me_from_non_gmail: values[1],
        from_me_to_gmail: values[2],
        from_me_to_non_gmail: values[3],
    }
}

pub fn make_record(account: &str, hour: i64, values: [u64; 4]) -> StatsRecord {
    StatsRecord::new(account, hour, counters(values))
}
