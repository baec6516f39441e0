use mailstats_core::TimeSeries;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::table::StatsTable;

/// Every record for `account` with `start <= hour <= end`, as aligned columns
/// in ascending hour order.
pub fn range_query<T: StatsTable + ?Sized>(
    table: &T,
    account: &str,
    start: i64,
    end: i64,
) -> StoreResult<TimeSeries> {
    if start > end {
        return Err(StoreError::Validation(format!(
            "range start {} is after end {}",
            start, end
        )));
    }
    let records = table.query_partition(account, start, end)?;
    debug!(account, start, end, matched = records.len(), "range query");
    if records.is_empty() {
        return Err(StoreError::RangeNotFound {
            account: account.to_string(),
            start,
            end,
        });
    }
    Ok(TimeSeries::from_records(account, records))
}
