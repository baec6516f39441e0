use mailstats_core::{Category, CounterSet, Message, contains_address};
use rayon::prelude::*;
use serde::Serialize;

use crate::classify::{DomainResolver, ProviderClassifier};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AggregateReport {
    pub counters: CounterSet,
    /// Messages that named the account in neither header. They are counted
    /// under `FromMeToNonGmail` along with real outbound mail.
    pub unaddressed: usize,
}

/// First matching rule wins:
/// to me from hosted, to me, from me to hosted, everything else.
pub fn classify_message(
    self_address: &str,
    message: &Message,
    hosted: impl Fn(&str) -> bool,
) -> Category {
    if contains_address(&message.to, self_address) {
        if hosted(&message.from) {
            Category::ToMeFromGmail
        } else {
            Category::ToMeFromNonGmail
        }
    } else if contains_address(&message.from, self_address) && hosted(&message.to) {
        Category::FromMeToGmail
    } else {
        Category::FromMeToNonGmail
    }
}

pub fn aggregate<R: DomainResolver>(
    self_address: &str,
    messages: &[Message],
    classifier: &ProviderClassifier<R>,
) -> CounterSet {
    aggregate_with_report(self_address, messages, classifier).counters
}

pub fn aggregate_with_report<R: DomainResolver>(
    self_address: &str,
    messages: &[Message],
    classifier: &ProviderClassifier<R>,
) -> AggregateReport {
    let batch = classifier.for_batch(self_address, messages);
    let tagged = messages
        .par_iter()
        .map(|message| {
            let category =
                classify_message(self_address, message, |header| batch.is_provider_hosted(header));
            let addressed = contains_address(&message.to, self_address)
                || contains_address(&message.from, self_address);
            (category, addressed)
        })
        .collect::<Vec<_>>();

    let mut report = AggregateReport::default();
    for (category, addressed) in tagged {
        report.counters.record(category);
        if !addressed {
            report.unaddressed += 1;
        }
    }
    report
}
