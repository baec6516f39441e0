mod aggregate;
mod classify;
mod pipeline;
mod resolver;
mod source;
mod types;

pub use aggregate::{AggregateReport, aggregate, aggregate_with_report, classify_message};
pub use classify::{BatchClassifier, DomainResolver, ProviderClassifier, ProviderConfig};
pub use pipeline::ingest_hour;
pub use resolver::{KnownDomains, MxLookup, MxResolver, StaticMxTable};
pub use source::{JsonlMessageSource, MessageSource, SourceBatch, SourceMessage, VecMessageSource};
pub use types::{IngestError, IngestIssue, IngestStats, ResolveError, Result, SourceError};
