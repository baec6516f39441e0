mod support;

use ingest::{aggregate, aggregate_with_report, classify_message};
use mailstats_core::{Category, CounterSet};
use support::{ME, known, msg};

#[test]
fn one_message_per_category() {
    let classifier = known(&[]);
    let messages = vec![
        msg("x@gmail.com", ME),
        msg("y@example.com", ME),
        msg(ME, "z@gmail.com"),
        msg(ME, "w@example.com"),
    ];

    let counters = aggregate(ME, &messages, &classifier);

    assert_eq!(
        counters,
        CounterSet {
            to_me_from_gmail: 1,
            to_me_from_non_gmail: 1,
            from_me_to_gmail: 1,
            from_me_to_non_gmail: 1,
        }
    );
}

#[test]
fn inbound_rules_take_precedence_over_outbound() {
    let self_sent = msg(ME, ME);
    assert_eq!(
        classify_message(ME, &self_sent, |_| false),
        Category::ToMeFromNonGmail
    );
    assert_eq!(
        classify_message(ME, &self_sent, |_| true),
        Category::ToMeFromGmail
    );
}

#[test]
fn headers_with_display_names_and_case_still_match() {
    let message = msg("\"Me\" <Me@Example.com>", "Pat <pat@calblueprint.org>");
    let hosted = |header: &str| header.contains("calblueprint.org");
    assert_eq!(classify_message(ME, &message, hosted), Category::FromMeToGmail);
}

#[test]
fn unaddressed_messages_fall_into_the_catch_all() {
    let classifier = known(&[]);
    let messages = vec![msg("a@gmail.com", "b@gmail.com"), msg(ME, "c@example.org")];

    let report = aggregate_with_report(ME, &messages, &classifier);

    assert_eq!(report.counters.from_me_to_non_gmail, 2);
    assert_eq!(report.unaddressed, 1);
    assert_eq!(report.counters.total(), 2);
}

#[test]
fn totals_match_batch_size_and_are_deterministic() {
    let classifier = known(&["calblueprint.org"]);
    let counterparts = [
        "x@gmail.com",
        "team@calblueprint.org",
        "y@example.com",
        "Someone <s@example.net>",
    ];
    let mut messages = Vec::new();
    for (index, counterpart) in counterparts.iter().cycle().take(103).enumerate() {
        match index % 3 {
            0 => messages.push(msg(counterpart, ME)),
            1 => messages.push(msg(ME, counterpart)),
            _ => messages.push(msg(counterpart, "list@example.org")),
        }
    }
    let snapshot = messages.clone();

    let first = aggregate(ME, &messages, &classifier);
    let second = aggregate(ME, &messages, &classifier);

    assert_eq!(first.total(), messages.len() as u64);
    assert_eq!(first, second);
    assert_eq!(messages, snapshot);
}

#[test]
fn empty_batch_yields_zero_counters() {
    let classifier = known(&[]);
    let counters = aggregate(ME, &[], &classifier);
    assert_eq!(counters, CounterSet::default());
}
