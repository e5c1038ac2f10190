//! Integration tests for the formatters

use chrono::{Duration, TimeZone, Utc};
use sveltool::{
    capitalize, format_currency, format_date, format_number, format_relative_time,
    format_relative_time_from, title_case, truncate_text, DateFormatOptions, Error,
    FormatOptions,
};

#[test]
fn test_relative_time_against_wall_clock() {
    let now = Utc::now();
    assert_eq!(
        format_relative_time(now - Duration::seconds(90)).unwrap(),
        "1 minute ago"
    );
    assert_eq!(
        format_relative_time(now - Duration::seconds(3700)).unwrap(),
        "1 hour ago"
    );
    assert_eq!(
        format_relative_time((now - Duration::days(3)).timestamp_millis()).unwrap(),
        "3 days ago"
    );
}

#[test]
fn test_relative_time_pluralization() {
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    let cases = vec![
        (45, "45 seconds ago"),
        (60, "1 minute ago"),
        (120, "2 minutes ago"),
        (86_400, "1 day ago"),
        (2_592_000, "1 month ago"),
        (3 * 2_592_000, "3 months ago"),
        (2 * 31_536_000, "2 years ago"),
    ];

    for (secs, expected) in cases {
        let then = now - Duration::seconds(secs);
        assert_eq!(
            format_relative_time_from(then, now).unwrap(),
            expected,
            "Wrong bucket for {} seconds",
            secs
        );
    }
}

#[test]
fn test_relative_time_from_iso_string() {
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    assert_eq!(
        format_relative_time_from("2025-06-01T11:00:00Z", now).unwrap(),
        "1 hour ago"
    );
    assert!(matches!(
        format_relative_time_from("yesterday", now),
        Err(Error::InvalidDate(_))
    ));
}

#[test]
fn test_truncate_text_examples() {
    assert_eq!(truncate_text("hello world", 5).unwrap(), "he...");
    assert_eq!(truncate_text("hi", 5).unwrap(), "hi");
    assert!(truncate_text("hello", 0).is_err());
}

#[test]
fn test_casing() {
    assert_eq!(capitalize("rAY selector"), "Ray selector");
    assert_eq!(title_case("graph sELECTOR question"), "Graph Selector Question");
}

#[test]
fn test_currency_across_locales() {
    let cases = vec![
        ("en-US", "USD", "$1,234.50"),
        ("en-GB", "GBP", "£1,234.50"),
        ("de-DE", "EUR", "1.234,50\u{a0}€"),
        ("es-ES", "EUR", "1234,50\u{a0}€"),
        ("fr-FR", "EUR", "1\u{202f}234,50\u{a0}€"),
        ("ja-JP", "JPY", "￥1,234.50"),
        ("en-GB", "USD", "US$1,234.50"),
        ("de-DE", "USD", "1.234,50\u{a0}$"),
        ("fr-FR", "USD", "1\u{202f}234,50\u{a0}$US"),
    ];

    for (locale, currency, expected) in cases {
        let options = FormatOptions::default()
            .with_locale(locale)
            .with_currency(currency);
        assert_eq!(
            format_currency(1234.5, &options).unwrap(),
            expected,
            "Wrong rendering for {}/{}",
            locale,
            currency
        );
    }
}

#[test]
fn test_number_and_date_defaults() {
    assert_eq!(
        format_number(9_876_543.21, &FormatOptions::default()).unwrap(),
        "9,876,543"
    );
    assert_eq!(
        format_date("2023-12-25", &DateFormatOptions::default()).unwrap(),
        "December 25, 2023"
    );
}
