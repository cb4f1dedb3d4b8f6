//! Edge case tests for chatsift
//!
//! These tests cover boundary conditions of the parser, classifier and
//! reporter that the per-module unit tests don't reach.

use chatsift::classifier::Classifier;
use chatsift::config::{FilterConfiguration, ScoreWeights, StructuralPatterns};
use chatsift::parser::parse;
use chatsift::pipeline::{annotate, process};
use chatsift::report::{NO_IMPORTANT_MESSAGES, render_report};
use chrono::{Datelike, Timelike};

fn bare_config() -> FilterConfiguration {
    let mut config = FilterConfiguration::empty();
    config.structural_patterns = StructuralPatterns::none_enabled();
    config
}

// =========================================================================
// Parser
// =========================================================================

#[test]
fn test_two_continuation_lines_make_three_line_body() {
    let messages = parse("05/06/24, 07:30 - Ana: line one\nline two\nline three");
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].body.lines().count(), 3);
    assert_eq!(messages[0].body, "line one\nline two\nline three");
}

#[test]
fn test_year_is_two_thousand_plus() {
    let messages = parse("31/12/99, 23:59 - Ana: last\n01/01/00, 00:00 - Bo: first");
    assert_eq!(messages[0].timestamp.year(), 2099);
    assert_eq!(messages[1].timestamp.year(), 2000);
}

#[test]
fn test_hour_and_minute_captured() {
    let messages = parse("05/06/24, 07:30 - Ana: hi");
    let ts = messages[0].timestamp;
    assert_eq!((ts.day(), ts.month(), ts.hour(), ts.minute()), (5, 6, 7, 30));
}

#[test]
fn test_unicode_senders_and_bodies() {
    let messages = parse("05/06/24, 07:30 - Иван Петров: Привет 🎉\n  日本語の行  ");
    assert_eq!(messages[0].sender, "Иван Петров");
    assert_eq!(messages[0].body, "Привет 🎉\n日本語の行");
}

#[test]
fn test_prefix_before_timestamp_still_starts_message() {
    let messages = parse("\u{200e}05/06/24, 07:30 - Ana: hi");
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].sender, "Ana");
}

#[test]
fn test_only_noise_lines() {
    let messages = parse("export header\n\n   \nmore header");
    assert!(messages.is_empty());
}

// =========================================================================
// Classifier
// =========================================================================

#[test]
fn test_keyword_with_only_blank_and_one_valid_word() {
    let config = bare_config().with_category("important", ["", "urgent"]);
    let classifier = Classifier::new(&config).unwrap();

    assert_eq!(classifier.classify("x", "no match here").score, 0.0);
    assert_eq!(classifier.classify("x", "urgent").score, 3.0);
}

#[test]
fn test_empty_categories_and_senders_never_fail() {
    let config = bare_config();
    let classifier = Classifier::new(&config).unwrap();
    let result = classifier.classify("", "");
    assert_eq!(result.score, 0.0);
    assert!(result.categories.is_empty());
}

#[test]
fn test_same_keyword_in_two_categories_counts_in_both() {
    let config = bare_config()
        .with_category("scholar", ["lab"])
        .with_category("places", ["lab"]);
    let classifier = Classifier::new(&config).unwrap();
    let result = classifier.classify("x", "lab today");
    assert_eq!(result.score, 6.0);
    assert_eq!(result.categories, vec!["scholar", "places"]);
}

#[test]
fn test_multi_word_keyword() {
    let config = bare_config().with_category("event", ["open day"]);
    let classifier = Classifier::new(&config).unwrap();
    assert_eq!(classifier.classify("x", "Open Day on friday").score, 3.0);
    assert_eq!(classifier.classify("x", "open  day").score, 0.0);
}

#[test]
fn test_keyword_matching_spans_continuation_lines() {
    let config = bare_config().with_category("important", ["urgent"]);
    let messages = annotate("05/06/24, 07:30 - Ana: hello\nthis is urgent", &config).unwrap();
    assert_eq!(messages[0].score, 3.0);
}

#[test]
fn test_sender_match_is_substring() {
    let config = bare_config().with_trusted_senders(["it"]);
    let classifier = Classifier::new(&config).unwrap();
    // "Smith" contains "it"; substring matching is intended
    assert!(classifier.is_trusted("Smith"));
    assert!(!classifier.is_trusted("Ana"));
}

#[test]
fn test_threshold_boundary_in_pipeline() {
    let text = "05/06/24, 07:30 - Ana: urgent";
    let at = bare_config()
        .with_category("important", ["urgent"])
        .with_weights(ScoreWeights::new(3.0, 2.0, 2.0, 3.0));
    assert_eq!(process(text, &at).unwrap().important_count, 1);

    let above = bare_config()
        .with_category("important", ["urgent"])
        .with_weights(ScoreWeights::new(3.0, 2.0, 2.0, 3.0001));
    assert_eq!(process(text, &above).unwrap().important_count, 0);
}

#[test]
fn test_scores_are_not_capped() {
    let words = ["a1", "a2", "a3", "a4", "a5", "a6", "a7", "a8", "a9", "a10"];
    let config = bare_config().with_category("many", words);
    let classifier = Classifier::new(&config).unwrap();
    assert_eq!(classifier.classify("x", &words.join(" ")).score, 30.0);
}

// =========================================================================
// Reporter
// =========================================================================

#[test]
fn test_zero_important_report_has_no_structure() {
    let result = process("05/06/24, 07:30 - Ana: hi", &bare_config()).unwrap();
    assert_eq!(result.report, NO_IMPORTANT_MESSAGES);
    assert!(!result.report.contains('='));
    assert!(!result.report.ends_with('\n'));
}

#[test]
fn test_multi_category_rendering_identical_in_each_section() {
    let config = bare_config()
        .with_category("a", ["alpha"])
        .with_category("b", ["beta"]);
    let messages = annotate("05/06/24, 07:30 - Ana: alpha beta\nsecond line", &config).unwrap();
    let report = render_report(&messages);

    let block = "6/5/2024, 7:30:00 AM - Ana (score: 6):\nalpha beta\nsecond line\n\n";
    assert_eq!(report.matches(block).count(), 2);
    assert!(report.contains("A (1 messages):"));
    assert!(report.contains("B (1 messages):"));
}

#[test]
fn test_report_separators() {
    let config = bare_config().with_category("a", ["alpha"]);
    let messages = annotate("05/06/24, 07:30 - Ana: alpha alpha", &config)
        .unwrap()
        .into_iter()
        .map(|mut m| {
            m.important = true;
            m
        })
        .collect::<Vec<_>>();
    let report = render_report(&messages);
    let lines: Vec<&str> = report.lines().collect();

    assert_eq!(lines[0], "IMPORTANT MESSAGES:");
    assert_eq!(lines[1], "");
    assert_eq!(lines[2], "Found 1 important messages");
    assert_eq!(lines[3], "=".repeat(60));
    assert_eq!(lines[4], "");
    assert_eq!(lines[5], "A (1 messages):");
    assert_eq!(lines[6], format!(" {}", "-".repeat(40)));
    assert_eq!(lines[7], "6/5/2024, 7:30:00 AM - Ana (score: 3):");
    assert_eq!(lines[8], "alpha alpha");
    assert_eq!(lines[9], "");
    assert_eq!(lines[10], "=".repeat(60));
    assert!(report.ends_with(&format!("{}\n\n", "=".repeat(60))));
}
