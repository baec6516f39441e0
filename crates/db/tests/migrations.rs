mod support;

use mailstats_core::StatsRecord;
use mailstats_db::{Db, StatsTable};
use support::make_record;

#[test]
fn migrate_is_idempotent_and_keeps_rows() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("migrate.sqlite");
    {
        let mut db = Db::open(&path).expect("open db");
        assert!(!db.has_stats_table().expect("table check"));
        db.migrate().expect("migrate");
        db.put(&make_record("a", 3_600, [1, 2, 3, 4])).expect("put");
    }

    let mut db = Db::open(&path).expect("reopen db");
    db.migrate().expect("migrate again");
    assert!(db.has_stats_table().expect("table check"));
    let record: StatsRecord = db.get("a", 3_600).expect("get").expect("record");
    assert_eq!(record.counters.from_me_to_non_gmail, 4);
}

#[test]
fn in_memory_db_supports_the_table_primitives() {
    let mut db = Db::open_in_memory().expect("open");
    db.migrate().expect("migrate");
    db.put(&make_record("a", 7_200, [0, 0, 0, 1])).expect("put");
    db.put(&make_record("a", 3_600, [0, 0, 1, 0])).expect("put");

    let rows = db.query_partition("a", 0, 7_200).expect("query");
    assert_eq!(rows.len(), 2);
    assert_eq!(db.list_accounts().expect("accounts"), vec!["a".to_string()]);
}
