use std::num::NonZeroU32;

use content_domain::{difficulty, reading_time, summarize, trim_content, word_count, ContentType, Difficulty, DomainError};
use serde_json::json;

#[test]
fn test_word_count_splits_on_runs_of_whitespace() {
    assert_eq!(word_count("  Buy milk\teggs\n\nbread and   cheese "), 6);
    assert_eq!(word_count("short"), 1);
    assert_eq!(word_count("   "), 0);
}

#[test]
fn test_byte_order_mark_separates_words() {
    assert_eq!(word_count("a\u{FEFF}b c d e"), 5);
    assert_eq!(trim_content("\u{FEFF} hello world \u{FEFF}"), "hello world");
    assert_eq!(word_count("\u{FEFF}"), 0);
}

#[test]
fn test_content_type_parsing_and_serde() {
    assert_eq!("blog".parse::<ContentType>().unwrap(), ContentType::Blog);
    assert!("poem".parse::<ContentType>().is_err());
    assert_eq!(ContentType::default(), ContentType::Article);
    assert_eq!(serde_json::to_value(ContentType::Social).unwrap(), json!("social"));
    assert_eq!(serde_json::to_value(Difficulty::Medium).unwrap(), json!("medium"));
}

#[test]
fn test_scenario_c_metrics() {
    let wpm = NonZeroU32::new(200).unwrap();
    assert_eq!((difficulty(120), reading_time(120, wpm)), (Difficulty::Medium, 1));
    assert_eq!((difficulty(350), reading_time(350, wpm)), (Difficulty::Hard, 2));
    assert_eq!(reading_time(0, wpm), 1);
}

#[test]
fn test_summary_detail_line_only_above_threshold() {
    let short = summarize("Buy milk eggs bread and cheese", ContentType::Article, 6, 1, 50);
    assert_eq!(short, "Buy milk eggs bread and cheese.");

    let at_threshold = summarize("One. Two.", ContentType::Blog, 50, 1, 50);
    assert_eq!(at_threshold, "One.");

    let long = summarize("First sentence here. Then more.", ContentType::Blog, 51, 1, 50);
    assert_eq!(long,
               "First sentence here. This blog contains 51 words and takes approximately 1 minute(s) to read.");
}

#[test]
fn test_domain_error_codes_and_details() {
    let e = DomainError::ContentTooShort { word_count: 1, min_words: 5 };
    assert_eq!(e.code(), "content_too_short");
    assert_eq!(e.details(), json!({"wordCount": 1, "minWords": 5}));
    assert_eq!(e.to_string(), "Content too short: 1 words");
    assert_eq!(DomainError::InvalidContent("x".into()).code(), "invalid_content");
}
