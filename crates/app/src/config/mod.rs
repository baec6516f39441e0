use serde::{Deserialize, Serialize};

/// An hour boundary as a client may send it: Unix seconds, or text holding
/// either digits or an RFC 3339 timestamp.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum HourBound {
    Unix(i64),
    Text(String),
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct HourRangeParams {
    pub start: Option<HourBound>,
    pub end: Option<HourBound>,
}
