mod support;

use mailstats_core::Category;
use mailstats_db::{MemoryTable, RecordStore, StoreError, range_query};
use support::{make_record, setup_db, store};

#[test]
fn range_returns_aligned_columns_in_hour_order() {
    let test_db = setup_db();
    let store = store(&test_db);
    store
        .write(&make_record("a", 7_200, [5, 6, 7, 8]))
        .expect("write later hour");
    store
        .write(&make_record("a", 3_600, [1, 2, 3, 4]))
        .expect("write earlier hour");

    let series = store.range("a", 3_600, 7_200).expect("range");

    assert_eq!(series.account, "a");
    assert_eq!(series.hours, vec![3_600, 7_200]);
    assert_eq!(series.to_me_from_gmail, vec![1, 5]);
    assert_eq!(series.to_me_from_non_gmail, vec![2, 6]);
    assert_eq!(series.from_me_to_gmail, vec![3, 7]);
    assert_eq!(series.from_me_to_non_gmail, vec![4, 8]);
}

#[test]
fn range_bounds_are_inclusive_and_scoped_to_account() {
    let test_db = setup_db();
    let store = store(&test_db);
    for hour in [0, 3_600, 7_200, 10_800] {
        store
            .write(&make_record("a", hour, [1, 0, 0, 0]))
            .expect("write a");
    }
    store
        .write(&make_record("b", 3_600, [9, 9, 9, 9]))
        .expect("write b");

    let series = store.range("a", 3_600, 7_200).expect("range");
    assert_eq!(series.hours, vec![3_600, 7_200]);
    assert_eq!(series.to_me_from_gmail, vec![1, 1]);
}

#[test]
fn empty_range_is_not_found() {
    let test_db = setup_db();
    let store = store(&test_db);
    store
        .write(&make_record("a", 3_600, [1, 0, 0, 0]))
        .expect("write");

    let err = store.range("a", 7_200, 36_000).expect_err("empty");
    assert!(matches!(err, StoreError::RangeNotFound { start: 7_200, .. }));
    assert!(store.range("nobody", 0, 36_000).expect_err("no account").is_not_found());
}

#[test]
fn reversed_range_is_rejected_before_querying() {
    let table = MemoryTable::new();
    let err = range_query(&table, "a", 7_200, 3_600).expect_err("reversed");
    assert!(err.is_validation());
}

#[test]
fn unordered_backend_still_yields_sorted_series() {
    let store = RecordStore::new(MemoryTable::new());
    let hours = [36_000, 3_600, 18_000, 7_200, 28_800, 10_800, 14_400];
    for hour in hours {
        store
            .write(&make_record("a", hour, [(hour / 3_600) as u64, 0, 0, 1]))
            .expect("write");
    }

    let series = store.range("a", 0, 36_000).expect("range");

    let mut expected = hours.to_vec();
    expected.sort();
    assert_eq!(series.hours, expected);
    for (index, hour) in series.hours.iter().enumerate() {
        assert_eq!(series.to_me_from_gmail[index], (*hour / 3_600) as u64);
        for category in Category::ALL {
            assert_eq!(series.column(category).len(), series.hours.len());
        }
    }
}
