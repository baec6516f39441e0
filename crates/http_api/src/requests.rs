use ingest::SourceMessage;
use mailstats_app::HourBound;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct StatsReadRequest {
    pub account: Option<String>,
    /// Left untyped so a missing or wrongly typed hour is reported as
    /// invalid input rather than as a body parse failure.
    pub hour: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct StatsRangeRequest {
    pub account: Option<String>,
    pub start: Option<HourBound>,
    pub end: Option<HourBound>,
}

#[derive(Debug, Deserialize)]
pub struct IngestRequest {
    pub hour: Option<i64>,
    #[serde(default)]
    pub messages: Vec<SourceMessage>,
}
