use serde::{Deserialize, Serialize};

pub const HOUR_SECONDS: i64 = 3600;

/// One mail message as seen by the classifier. Both headers are free text and
/// may carry display names or several comma-separated recipients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub from: String,
    pub to: String,
}

impl Message {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    ToMeFromGmail,
    ToMeFromNonGmail,
    FromMeToGmail,
    FromMeToNonGmail,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::ToMeFromGmail,
        Category::ToMeFromNonGmail,
        Category::FromMeToGmail,
        Category::FromMeToNonGmail,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::ToMeFromGmail => "toMeFromGmail",
            Category::ToMeFromNonGmail => "toMeFromNonGmail",
            Category::FromMeToGmail => "fromMeToGmail",
            Category::FromMeToNonGmail => "fromMeToNonGmail",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterSet {
    pub to_me_from_gmail: u64,
    pub to_me_from_non_gmail: u64,
    pub from_me_to_gmail: u64,
    pub from_me_to_non_gmail: u64,
}

impl CounterSet {
    pub fn record(&mut self, category: Category) {
        let slot = match category {
            Category::ToMeFromGmail => &mut self.to_me_from_gmail,
            Category::ToMeFromNonGmail => &mut self.to_me_from_non_gmail,
            Category::FromMeToGmail => &mut self.from_me_to_gmail,
            Category::FromMeToNonGmail => &mut self.from_me_to_non_gmail,
        };
        *slot = slot.saturating_add(1);
    }

    pub fn get(&self, category: Category) -> u64 {
        match category {
            Category::ToMeFromGmail => self.to_me_from_gmail,
            Category::ToMeFromNonGmail => self.to_me_from_non_gmail,
            Category::FromMeToGmail => self.from_me_to_gmail,
            Category::FromMeToNonGmail => self.from_me_to_non_gmail,
        }
    }

    pub fn total(&self) -> u64 {
        Category::ALL.iter().map(|category| self.get(*category)).sum()
    }
}

impl FromIterator<Category> for CounterSet {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        let mut counters = CounterSet::default();
        for category in iter {
            counters.record(category);
        }
        counters
    }
}

/// Aggregate counters for one account over one hour window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsRecord {
    pub account: String,
    pub hour: i64,
    #[serde(flatten)]
    pub counters: CounterSet,
    #[serde(default)]
    pub is_deleted: bool,
}

impl StatsRecord {
    pub fn new(account: impl Into<String>, hour: i64, counters: CounterSet) -> Self {
        Self {
            account: account.into(),
            hour,
            counters,
            is_deleted: false,
        }
    }
}

/// Column-oriented view of a run of hourly records. Every metric column is
/// aligned index-for-index with `hours`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeries {
    pub account: String,
    pub hours: Vec<i64>,
    pub to_me_from_gmail: Vec<u64>,
    pub to_me_from_non_gmail: Vec<u64>,
    pub from_me_to_gmail: Vec<u64>,
    pub from_me_to_non_gmail: Vec<u64>,
}

impl TimeSeries {
    pub fn from_records(account: impl Into<String>, mut records: Vec<StatsRecord>) -> Self {
        records.sort_by_key(|record| record.hour);
        let len = records.len();
        let mut series = TimeSeries {
            account: account.into(),
            hours: Vec::with_capacity(len),
            to_me_from_gmail: Vec::with_capacity(len),
            to_me_from_non_gmail: Vec::with_capacity(len),
            from_me_to_gmail: Vec::with_capacity(len),
            from_me_to_non_gmail: Vec::with_capacity(len),
        };
        for record in records {
            series.hours.push(record.hour);
            series.to_me_from_gmail.push(record.counters.to_me_from_gmail);
            series
                .to_me_from_non_gmail
                .push(record.counters.to_me_from_non_gmail);
            series.from_me_to_gmail.push(record.counters.from_me_to_gmail);
            series
                .from_me_to_non_gmail
                .push(record.counters.from_me_to_non_gmail);
        }
        series
    }

    pub fn len(&self) -> usize {
        self.hours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }

    pub fn column(&self, category: Category) -> &[u64] {
        match category {
            Category::ToMeFromGmail => &self.to_me_from_gmail,
            Category::ToMeFromNonGmail => &self.to_me_from_non_gmail,
            Category::FromMeToGmail => &self.from_me_to_gmail,
            Category::FromMeToNonGmail => &self.from_me_to_non_gmail,
        }
    }
}

/// Half-open window `[start, start + 3600)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourWindow {
    pub start: i64,
}

impl HourWindow {
    pub fn containing(ts: i64) -> Self {
        Self {
            start: hour_floor(ts),
        }
    }

    /// Exclusive end, or `None` for the last hour before `i64::MAX`.
    pub fn end(&self) -> Option<i64> {
        self.start.checked_add(HOUR_SECONDS)
    }

    pub fn contains(&self, ts: i64) -> bool {
        ts >= self.start
            && ts
                .checked_sub(self.start)
                .is_some_and(|offset| offset < HOUR_SECONDS)
    }
}

pub fn hour_floor(ts: i64) -> i64 {
    ts.div_euclid(HOUR_SECONDS) * HOUR_SECONDS
}

pub fn is_hour_aligned(hour: i64) -> bool {
    hour.rem_euclid(HOUR_SECONDS) == 0
}

/// Start of the most recent hour that has fully elapsed at `now`.
/// At 19:10 this is 18:00, covering 18:00..19:00.
pub fn last_complete_hour(now: i64) -> i64 {
    hour_floor(now) - HOUR_SECONDS
}

pub fn contains_address(header: &str, address: &str) -> bool {
    let address = address.trim();
    if address.is_empty() {
        return false;
    }
    header
        .to_ascii_lowercase()
        .contains(&address.to_ascii_lowercase())
}

/// Bare addresses found in a header such as `"Jane <jane@x.org>, bob@y.com"`.
pub fn extract_addresses(header: &str) -> Vec<String> {
    header
        .split(',')
        .filter_map(|part| {
            let part = part.trim();
            let candidate = match (part.rfind('<'), part.rfind('>')) {
                (Some(open), Some(close)) if open < close => &part[open + 1..close],
                _ => part,
            };
            let candidate = candidate.trim().trim_matches('"');
            if candidate.contains('@') {
                Some(candidate.to_string())
            } else {
                None
            }
        })
        .collect()
}

pub fn domain_of(address: &str) -> Option<String> {
    let (_, domain) = address.rsplit_once('@')?;
    let domain = domain.trim().trim_end_matches('>').trim();
    if domain.is_empty() {
        return None;
    }
    Some(domain.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(hour: i64, to_me_from_gmail: u64) -> StatsRecord {
        StatsRecord::new(
            "a",
            hour,
            CounterSet {
                to_me_from_gmail,
                to_me_from_non_gmail: 1,
                from_me_to_gmail: 2,
                from_me_to_non_gmail: 3,
            },
        )
    }

    #[test]
    fn hour_helpers_align_to_boundaries() {
        assert_eq!(hour_floor(7_199), 3_600);
        assert_eq!(hour_floor(7_200), 7_200);
        assert_eq!(hour_floor(-1), -3_600);
        assert!(is_hour_aligned(1_604_707_200));
        assert!(!is_hour_aligned(1_604_707_201));
        // 19:10 -> 18:00
        assert_eq!(last_complete_hour(19 * 3_600 + 600), 18 * 3_600);
    }

    #[test]
    fn hour_window_is_half_open() {
        let window = HourWindow::containing(3_700);
        assert_eq!(window.start, 3_600);
        assert!(window.contains(3_600));
        assert!(window.contains(7_199));
        assert!(!window.contains(7_200));
        assert_eq!(window.end(), Some(7_200));
    }

    #[test]
    fn hour_window_at_the_top_of_the_range_does_not_overflow() {
        let start = hour_floor(i64::MAX);
        let window = HourWindow { start };
        assert!(is_hour_aligned(start));
        assert_eq!(window.end(), None);
        assert!(window.contains(start));
        assert!(window.contains(i64::MAX));
        assert!(!window.contains(start - 1));

        let bottom = HourWindow::containing(i64::MIN + HOUR_SECONDS);
        assert!(bottom.contains(bottom.start));
        assert!(!bottom.contains(i64::MAX));
    }

    #[test]
    fn counter_set_totals_every_category() {
        let counters: CounterSet = [
            Category::ToMeFromGmail,
            Category::ToMeFromGmail,
            Category::FromMeToNonGmail,
        ]
        .into_iter()
        .collect();
        assert_eq!(counters.to_me_from_gmail, 2);
        assert_eq!(counters.from_me_to_non_gmail, 1);
        assert_eq!(counters.total(), 3);
    }

    #[test]
    fn time_series_sorts_and_keeps_columns_aligned() {
        let series = TimeSeries::from_records("a", vec![record(7_200, 9), record(3_600, 4)]);
        assert_eq!(series.hours, vec![3_600, 7_200]);
        assert_eq!(series.to_me_from_gmail, vec![4, 9]);
        for category in Category::ALL {
            assert_eq!(series.column(category).len(), series.len());
        }
    }

    #[test]
    fn stats_record_serializes_flat_camel_case() {
        let value = serde_json::to_value(record(3_600, 2)).expect("serialize");
        assert_eq!(value["account"], "a");
        assert_eq!(value["hour"], 3_600);
        assert_eq!(value["toMeFromGmail"], 2);
        assert_eq!(value["fromMeToNonGmail"], 3);
        assert_eq!(value["isDeleted"], false);
    }

    #[test]
    fn address_helpers_handle_display_names() {
        let header = "\"Jane Doe\" <Jane@Example.ORG>, bob@gmail.com, undisclosed-recipients:;";
        assert_eq!(
            extract_addresses(header),
            vec!["Jane@Example.ORG".to_string(), "bob@gmail.com".to_string()]
        );
        assert_eq!(domain_of("Jane@Example.ORG").as_deref(), Some("example.org"));
        assert_eq!(domain_of("nobody"), None);
        assert!(contains_address(header, "jane@example.org"));
        assert!(!contains_address(header, ""));
    }
}
