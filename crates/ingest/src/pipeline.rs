use std::collections::HashSet;

use mailstats_core::{HourWindow, Message, StatsRecord, is_hour_aligned};
use mailstats_db::{RecordStore, StatsTable};
use tracing::info;

use crate::aggregate::aggregate_with_report;
use crate::classify::{DomainResolver, ProviderClassifier};
use crate::source::{MessageSource, SourceMessage};
use crate::types::{IngestError, IngestStats, Result};

/// Aggregates one account's messages for the window starting at `hour` and
/// upserts the resulting record. Re-running an hour overwrites it.
pub fn ingest_hour<T, S, R>(
    store: &RecordStore<T>,
    source: &S,
    classifier: &ProviderClassifier<R>,
    account: &str,
    hour: i64,
) -> Result<IngestStats>
where
    T: StatsTable,
    S: MessageSource + ?Sized,
    R: DomainResolver,
{
    if !is_hour_aligned(hour) {
        return Err(IngestError::InvalidHour(hour));
    }
    let window = HourWindow { start: hour };
    let batch = source.fetch(account, window)?;
    let (messages, duplicates) = dedupe_by_id(batch.messages);

    let report = aggregate_with_report(account, &messages, classifier);
    let record = StatsRecord::new(account, hour, report.counters);
    store.write(&record)?;

    info!(
        account,
        hour,
        messages = messages.len(),
        duplicates,
        unaddressed = report.unaddressed,
        issues = batch.issues.len(),
        "hour ingested"
    );
    Ok(IngestStats {
        account: account.to_string(),
        hour,
        messages: messages.len(),
        duplicates,
        unaddressed: report.unaddressed,
        counters: report.counters,
        issues: batch.issues,
    })
}

/// Inbox and sent listings both contain mail sent to oneself.
fn dedupe_by_id(messages: Vec<SourceMessage>) -> (Vec<Message>, usize) {
    let mut seen = HashSet::new();
    let mut duplicates = 0usize;
    let mut unique = Vec::with_capacity(messages.len());
    for message in messages {
        if let Some(id) = message.id.as_deref()
            && !seen.insert(id.to_string())
        {
            duplicates += 1;
            continue;
        }
        unique.push(message.to_message());
    }
    (unique, duplicates)
}
