use mailstats_core::{Category, CounterSet, StatsRecord, TimeSeries, is_hour_aligned};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::range::range_query;
use crate::table::StatsTable;

/// Validated read/write access to hourly records. Every operation is a single
/// call into the backing table; retries are left to callers.
pub struct RecordStore<T> {
    table: T,
}

impl<T: StatsTable> RecordStore<T> {
    pub fn new(table: T) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &T {
        &self.table
    }

    /// Upserts `record` under `(account, hour)`. Nothing is written when the
    /// record fails validation.
    pub fn write(&self, record: &StatsRecord) -> StoreResult<()> {
        validate_record(record)?;
        self.table.put(record)?;
        info!(
            account = %record.account,
            hour = record.hour,
            total = record.counters.total(),
            "stats record saved"
        );
        Ok(())
    }

    pub fn write_value(&self, value: &Value) -> StoreResult<StatsRecord> {
        let record = record_from_value(value)?;
        self.write(&record)?;
        Ok(record)
    }

    pub fn read_one(&self, account: &str, hour: i64) -> StoreResult<StatsRecord> {
        debug!(account, hour, "fetching stats record");
        self.table
            .get(account, hour)?
            .ok_or_else(|| StoreError::NotFound {
                account: account.to_string(),
                hour,
            })
    }

    /// `hour` is `None` when the caller's request had no hour at all.
    pub fn read_one_value(&self, account: &str, hour: Option<&Value>) -> StoreResult<StatsRecord> {
        let hour = hour_from_value(hour)?;
        self.read_one(account, hour)
    }

    pub fn range(&self, account: &str, start: i64, end: i64) -> StoreResult<TimeSeries> {
        range_query(&self.table, account, start, end)
    }
}

/// Largest counter the backing column can hold.
pub const MAX_COUNTER: u64 = i64::MAX as u64;

fn validate_record(record: &StatsRecord) -> StoreResult<()> {
    if record.account.trim().is_empty() {
        return Err(StoreError::Validation("account must not be empty".to_string()));
    }
    if !is_hour_aligned(record.hour) {
        return Err(StoreError::Validation(format!(
            "hour {} is not aligned to an hour boundary",
            record.hour
        )));
    }
    for category in Category::ALL {
        let value = record.counters.get(category);
        if value > MAX_COUNTER {
            return Err(StoreError::Validation(format!(
                "{} is {}, above the maximum of {}",
                category.as_str(),
                value,
                MAX_COUNTER
            )));
        }
    }
    Ok(())
}

/// Parses an hour given as text, e.g. from a command line or query string.
pub fn parse_hour(value: &str) -> StoreResult<i64> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| StoreError::Validation(format!("hour must be an integer, got {:?}", value)))
}

/// Builds a record from an untyped JSON object, checking the key fields and
/// their types first.
pub fn record_from_value(value: &Value) -> StoreResult<StatsRecord> {
    let object = value.as_object().ok_or_else(|| {
        StoreError::Validation(format!("record must be an object, got {}", type_name(value)))
    })?;
    let hour = hour_from_value(object.get("hour"))?;
    let account = match object.get("account") {
        Some(Value::String(account)) if !account.trim().is_empty() => account.clone(),
        Some(Value::String(_)) => {
            return Err(StoreError::Validation("account must not be empty".to_string()));
        }
        Some(other) => {
            return Err(StoreError::Validation(format!(
                "account has type {}",
                type_name(other)
            )));
        }
        None => return Err(StoreError::Validation("missing 'account' attribute".to_string())),
    };
    let counters = CounterSet {
        to_me_from_gmail: counter_from_object(object, "toMeFromGmail")?,
        to_me_from_non_gmail: counter_from_object(object, "toMeFromNonGmail")?,
        from_me_to_gmail: counter_from_object(object, "fromMeToGmail")?,
        from_me_to_non_gmail: counter_from_object(object, "fromMeToNonGmail")?,
    };
    let is_deleted = match object.get("isDeleted") {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(other) => {
            return Err(StoreError::Validation(format!(
                "isDeleted has type {}",
                type_name(other)
            )));
        }
    };
    Ok(StatsRecord {
        account,
        hour,
        counters,
        is_deleted,
    })
}

fn hour_from_value(value: Option<&Value>) -> StoreResult<i64> {
    match value {
        None => Err(StoreError::Validation("missing 'hour' attribute".to_string())),
        Some(Value::Number(number)) => number.as_i64().ok_or_else(|| {
            StoreError::Validation(format!("hour must be an integer, got {}", number))
        }),
        Some(other) => Err(StoreError::Validation(format!(
            "hour has type {}",
            type_name(other)
        ))),
    }
}

fn counter_from_object(object: &Map<String, Value>, key: &str) -> StoreResult<u64> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(number)) => match number.as_u64() {
            Some(value) if value <= MAX_COUNTER => Ok(value),
            Some(value) => Err(StoreError::Validation(format!(
                "{} is {}, above the maximum of {}",
                key, value, MAX_COUNTER
            ))),
            None => Err(StoreError::Validation(format!(
                "{} must be a non-negative integer, got {}",
                key, number
            ))),
        },
        Some(other) => Err(StoreError::Validation(format!(
            "{} has type {}",
            key,
            type_name(other)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
