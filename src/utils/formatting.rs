//! Value formatting utilities
//!
//! Functions for rendering numbers, currency amounts, dates and text in
//! human-readable form. Number rendering follows the conventions in
//! [`locale`](super::locale); dates are rendered in US English, in UTC.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use std::iter;

use super::locale::{
    is_alphabetic_symbol, Currency, Locale, SymbolPlacement, DEFAULT_CURRENCY, DEFAULT_LOCALE,
};
use crate::error::{Error, Result};

/// Fraction digits used by [`format_currency`] when none are requested
pub const DEFAULT_CURRENCY_PRECISION: u32 = 2;

/// Fraction digits used by [`format_number`] when none are requested
pub const DEFAULT_NUMBER_PRECISION: u32 = 0;

/// Marker appended by [`truncate_text`]
const ELLIPSIS: &str = "...";

const NBSP: char = '\u{A0}';

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Relative-time buckets, largest first
const INTERVALS: [(&str, i64); 7] = [
    ("year", 31_536_000),
    ("month", 2_592_000),
    ("week", 604_800),
    ("day", 86_400),
    ("hour", 3_600),
    ("minute", 60),
    ("second", 1),
];

/// Options for number and currency formatting
///
/// Every field is optional; absent fields fall back to `en-US`, `USD` and
/// the per-function default precision.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// Locale tag, e.g. `de-DE`
    pub locale: Option<String>,
    /// ISO 4217 currency code, e.g. `EUR`
    pub currency: Option<String>,
    /// Exact number of fraction digits
    pub precision: Option<u32>,
}

impl FormatOptions {
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }

    fn resolve_locale(&self) -> Result<Locale> {
        Locale::parse(self.locale.as_deref().unwrap_or(DEFAULT_LOCALE))
    }
}

/// Formats a number as a currency amount
///
/// Both the minimum and maximum fraction digits are pinned to the requested
/// precision, so `5` renders as `$5.00` rather than `$5`.
///
/// # Arguments
/// - `amount` - The amount to format
/// - `options` - Locale, currency and precision overrides
///
/// # Returns
/// The formatted amount, e.g. `$1,234.56` or `1.234,56 €`
///
/// # Errors
/// Returns an error if the locale or currency code is not supported.
pub fn format_currency(amount: f64, options: &FormatOptions) -> Result<String> {
    let locale = options.resolve_locale()?;
    let currency = Currency::parse(options.currency.as_deref().unwrap_or(DEFAULT_CURRENCY))?;
    let precision = options.precision.unwrap_or(DEFAULT_CURRENCY_PRECISION) as usize;

    let sign = sign_of(amount);
    let body = render_magnitude(amount, &locale, precision);

    let symbol = locale.symbol_for(&currency);

    let formatted = match locale.symbol_placement {
        SymbolPlacement::Prefix if is_alphabetic_symbol(symbol) => {
            format!("{sign}{symbol}{NBSP}{body}")
        }
        SymbolPlacement::Prefix => format!("{sign}{symbol}{body}"),
        SymbolPlacement::Suffix => format!("{sign}{body}{NBSP}{symbol}"),
    };
    Ok(formatted)
}

/// Formats a number with locale-specific grouping
///
/// # Errors
/// Returns an error if the locale is not supported.
pub fn format_number(amount: f64, options: &FormatOptions) -> Result<String> {
    let locale = options.resolve_locale()?;
    let precision = options.precision.unwrap_or(DEFAULT_NUMBER_PRECISION) as usize;
    Ok(format!(
        "{}{}",
        sign_of(amount),
        render_magnitude(amount, &locale, precision)
    ))
}

fn sign_of(amount: f64) -> &'static str {
    if amount.is_sign_negative() && !amount.is_nan() {
        "-"
    } else {
        ""
    }
}

/// Renders `|amount|` with grouping and exactly `precision` fraction digits
fn render_magnitude(amount: f64, locale: &Locale, precision: usize) -> String {
    if amount.is_nan() {
        return "NaN".to_string();
    }
    if amount.is_infinite() {
        return "∞".to_string();
    }

    let (integer, fraction) = round_shortest_half_away(amount.abs(), precision);
    let mut rendered = group_digits(&integer, locale);
    if precision > 0 {
        rendered.push(locale.decimal_separator);
        rendered.push_str(&fraction);
    }
    rendered
}

/// Rounds a non-negative finite float to `precision` fraction digits
///
/// Ties round away from zero, judged on the exact binary value of the float.
/// `2.675` is stored as `2.67499999...` and so rounds down to `2.67`.
/// Returns the integer and fraction digit strings.
pub(crate) fn round_half_away(value: f64, precision: usize) -> (String, String) {
    round_decimal(&format!("{:.*}", precision + 64, value), precision)
}

/// Rounds a non-negative finite float to `precision` fraction digits
///
/// Ties round away from zero, judged on the shortest decimal that reads back
/// as the same float, so `2.675` rounds up to `2.68` and `1.005` to `1.01`.
pub(crate) fn round_shortest_half_away(value: f64, precision: usize) -> (String, String) {
    round_decimal(&value.to_string(), precision)
}

/// Rounds a plain decimal string (`123.456`, no sign or exponent)
fn round_decimal(decimal: &str, precision: usize) -> (String, String) {
    let (integer, fraction) = decimal.split_once('.').unwrap_or((decimal, ""));

    let mut digits: Vec<u8> = integer
        .bytes()
        .chain(fraction.bytes().chain(iter::repeat(b'0')).take(precision))
        .collect();

    let round_up = fraction.as_bytes().get(precision).is_some_and(|d| *d >= b'5');
    if round_up {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let split = digits.len() - precision;
    let fraction_digits = digits.split_off(split);
    (
        String::from_utf8_lossy(&digits).into_owned(),
        String::from_utf8_lossy(&fraction_digits).into_owned(),
    )
}

fn group_digits(integer: &str, locale: &Locale) -> String {
    let len = integer.len();
    if !locale.groups(len) {
        return integer.to_string();
    }
    let separator = locale.group_separator;
    let mut grouped = String::with_capacity(len + len / 3 * separator.len_utf8());
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }
    grouped
}

/// A date accepted by the date formatters
///
/// Mirrors the three shapes callers hand in: a timestamp value, an ISO-like
/// string, or milliseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    Instant(DateTime<Utc>),
    Text(String),
    EpochMillis(i64),
}

impl From<DateTime<Utc>> for DateInput {
    fn from(value: DateTime<Utc>) -> Self {
        DateInput::Instant(value)
    }
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        DateInput::Text(value.to_string())
    }
}

impl From<String> for DateInput {
    fn from(value: String) -> Self {
        DateInput::Text(value)
    }
}

impl From<i64> for DateInput {
    fn from(value: i64) -> Self {
        DateInput::EpochMillis(value)
    }
}

impl DateInput {
    /// Resolves the input to a UTC instant
    ///
    /// Strings are tried as RFC 3339, then as a zone-less date-time, then as
    /// a bare `YYYY-MM-DD` date. Zone-less values are taken as UTC.
    ///
    /// # Errors
    /// Returns `Error::InvalidDate` when the input cannot be interpreted.
    pub fn resolve(&self) -> Result<DateTime<Utc>> {
        match self {
            DateInput::Instant(instant) => Ok(*instant),
            DateInput::EpochMillis(millis) => Utc
                .timestamp_millis_opt(*millis)
                .single()
                .ok_or_else(|| Error::InvalidDate(millis.to_string())),
            DateInput::Text(text) => parse_date_text(text.trim())
                .ok_or_else(|| Error::InvalidDate(text.clone())),
        }
    }
}

fn parse_date_text(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, pattern) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Width of a numeric date field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericStyle {
    /// `5`, `2024`
    Numeric,
    /// `05`, `24`
    TwoDigit,
}

/// Rendering of the month field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthStyle {
    Numeric,
    TwoDigit,
    /// `January`
    Long,
    /// `Jan`
    Short,
    /// `J`
    Narrow,
}

/// Rendering of the weekday field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Long,
    Short,
    Narrow,
}

/// Field selection for [`format_date`]
///
/// Fields left as `None` keep their defaults: year numeric, month long,
/// day numeric, no weekday and no time of day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateFormatOptions {
    pub weekday: Option<TextStyle>,
    pub year: Option<NumericStyle>,
    pub month: Option<MonthStyle>,
    pub day: Option<NumericStyle>,
    pub hour: Option<NumericStyle>,
    pub minute: Option<NumericStyle>,
    pub second: Option<NumericStyle>,
    /// 12-hour clock with AM/PM; defaults to true
    pub hour12: Option<bool>,
}

impl DateFormatOptions {
    fn with_defaults(&self) -> Self {
        Self {
            year: self.year.or(Some(NumericStyle::Numeric)),
            month: self.month.or(Some(MonthStyle::Long)),
            day: self.day.or(Some(NumericStyle::Numeric)),
            ..*self
        }
    }
}

/// Formats a date in US English
///
/// Caller options override the defaults field by field, so asking for a
/// short month keeps the default day and year.
///
/// # Arguments
/// - `date` - A `DateTime<Utc>`, an ISO-like string, or epoch milliseconds
/// - `options` - Per-field rendering overrides
///
/// # Returns
/// The rendered date, e.g. `January 5, 2024`
///
/// # Errors
/// Returns `Error::InvalidDate` if the date cannot be interpreted.
pub fn format_date(date: impl Into<DateInput>, options: &DateFormatOptions) -> Result<String> {
    let instant = date.into().resolve()?;
    let options = options.with_defaults();

    let day = options.day.map(|style| numeric(instant.day(), style));
    let year = options.year.map(|style| match style {
        NumericStyle::Numeric => instant.year().to_string(),
        NumericStyle::TwoDigit => format!("{:02}", instant.year().rem_euclid(100)),
    });
    let month_index = instant.month0() as usize;

    let (mut rendered, time_joiner) = match options.month {
        Some(style @ (MonthStyle::Long | MonthStyle::Short | MonthStyle::Narrow)) => {
            let name = MONTH_NAMES[month_index];
            let mut text = match style {
                MonthStyle::Short => name[..3].to_string(),
                MonthStyle::Narrow => name[..1].to_string(),
                _ => name.to_string(),
            };
            if let Some(day) = &day {
                text.push(' ');
                text.push_str(day);
            }
            if let Some(year) = &year {
                text.push_str(if day.is_some() { ", " } else { " " });
                text.push_str(year);
            }
            (text, " at ")
        }
        month => {
            let month = month.map(|style| match style {
                MonthStyle::TwoDigit => format!("{:02}", instant.month()),
                _ => instant.month().to_string(),
            });
            let parts: Vec<String> = [month, day, year].into_iter().flatten().collect();
            (parts.join("/"), ", ")
        }
    };

    if let Some(style) = options.weekday {
        let name = WEEKDAY_NAMES[instant.weekday().num_days_from_sunday() as usize];
        let name = match style {
            TextStyle::Long => name,
            TextStyle::Short => &name[..3],
            TextStyle::Narrow => &name[..1],
        };
        rendered = format!("{name}, {rendered}");
    }

    if let Some(time) = render_time(&instant, &options) {
        rendered.push_str(time_joiner);
        rendered.push_str(&time);
    }

    Ok(rendered)
}

fn numeric(value: u32, style: NumericStyle) -> String {
    match style {
        NumericStyle::Numeric => value.to_string(),
        NumericStyle::TwoDigit => format!("{:02}", value),
    }
}

fn render_time(instant: &DateTime<Utc>, options: &DateFormatOptions) -> Option<String> {
    if options.hour.is_none() && options.minute.is_none() && options.second.is_none() {
        return None;
    }

    let hour12 = options.hour12.unwrap_or(true);
    let mut parts = Vec::with_capacity(3);
    if let Some(style) = options.hour {
        let hour = match (hour12, instant.hour() % 12) {
            (true, 0) => 12,
            (true, h) => h,
            (false, _) => instant.hour(),
        };
        parts.push(numeric(hour, style));
    }
    if options.minute.is_some() {
        parts.push(format!("{:02}", instant.minute()));
    }
    if options.second.is_some() {
        parts.push(format!("{:02}", instant.second()));
    }

    let mut time = parts.join(":");
    if hour12 && options.hour.is_some() {
        time.push_str(if instant.hour() < 12 { " AM" } else { " PM" });
    }
    Some(time)
}

/// Describes how long ago a date was, e.g. `3 days ago`
///
/// # Errors
/// Returns `Error::InvalidDate` if the date cannot be interpreted.
pub fn format_relative_time(date: impl Into<DateInput>) -> Result<String> {
    format_relative_time_from(date, Utc::now())
}

/// Describes how long before `now` a date was
///
/// Picks the largest unit with a whole count of at least one. Dates less
/// than a second old, and dates in the future, are `just now`.
///
/// # Errors
/// Returns `Error::InvalidDate` if the date cannot be interpreted.
pub fn format_relative_time_from(
    date: impl Into<DateInput>,
    now: DateTime<Utc>,
) -> Result<String> {
    let then = date.into().resolve()?;
    let elapsed_secs = (now - then).num_milliseconds().div_euclid(1000);

    for (label, seconds) in INTERVALS {
        let count = elapsed_secs.div_euclid(seconds);
        if count >= 1 {
            let plural = if count > 1 { "s" } else { "" };
            return Ok(format!("{count} {label}{plural} ago"));
        }
    }

    Ok("just now".to_string())
}

/// Shortens text to at most `max_length` characters
///
/// Text that already fits is returned unchanged. Longer text keeps its first
/// `max_length - 3` characters followed by `...`.
///
/// # Errors
/// Returns `Error::InvalidArgument` when `max_length` is below 3, since the
/// ellipsis alone would not fit.
pub fn truncate_text(text: &str, max_length: usize) -> Result<String> {
    if max_length < ELLIPSIS.len() {
        return Err(Error::invalid_argument(format!(
            "max_length must be at least {}, got {}",
            ELLIPSIS.len(),
            max_length
        )));
    }

    if text.chars().count() <= max_length {
        return Ok(text.to_string());
    }

    let mut truncated: String = text.chars().take(max_length - ELLIPSIS.len()).collect();
    truncated.push_str(ELLIPSIS);
    Ok(truncated)
}

/// Uppercases the first character and lowercases the rest
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
    }
}

/// Capitalizes every word
///
/// A word starts at an alphanumeric character or underscore and runs to the
/// next whitespace, so `hello-WORLD` becomes `Hello-world`.
///
/// Alphanumeric means Unicode alphanumeric, not just ASCII: `élan` becomes
/// `Élan` where an ASCII-only `\w` word boundary would skip the accented
/// letter and leave it lowercase.
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut word = String::new();

    for c in text.chars() {
        if !word.is_empty() {
            if c.is_whitespace() {
                result.push_str(&capitalize(&word));
                word.clear();
                result.push(c);
            } else {
                word.push(c);
            }
        } else if c.is_alphanumeric() || c == '_' {
            word.push(c);
        } else {
            result.push(c);
        }
    }

    if !word.is_empty() {
        result.push_str(&capitalize(&word));
    }
    result
}
