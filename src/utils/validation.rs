//! Input validation
//!
//! Validators for common form fields. Every validator returns a
//! [`ValidationResult`]; malformed input is reported through its error
//! list and never as an `Err` or a panic.

use serde::Serialize;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use super::value::Value;

/// Minimum password length used when callers have no policy of their own
pub const DEFAULT_PASSWORD_MIN_LENGTH: usize = 8;

/// Field name used in messages when none is given
pub const DEFAULT_FIELD_NAME: &str = "Field";

const PASSWORD_SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex")
});

/// Outcome of a validator
///
/// Serializes as `{"isValid": bool, "errors": [...]}`. The flag is derived
/// from the error list, so a result is valid exactly when it has no errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    is_valid: bool,
    errors: Vec<String>,
}

impl ValidationResult {
    /// Builds a result from the accumulated error messages
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// A result with no errors
    pub fn valid() -> Self {
        Self::from_errors(Vec::new())
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Error messages in the order the rules were checked
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }

    /// Combines two results, keeping the errors of `self` first
    ///
    /// Useful for validating a whole form field by field.
    pub fn merge(self, other: ValidationResult) -> Self {
        let mut errors = self.errors;
        errors.extend(other.errors);
        Self::from_errors(errors)
    }
}

/// Whether a value counts as filled in for [`validate_required`]
///
/// Absent values, empty strings, empty sequences and `Value::Null` are
/// missing; everything else, including zero and `false`, is present.
pub trait Presence {
    fn is_present(&self) -> bool;
}

impl Presence for str {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl Presence for String {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> Presence for [T] {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> Presence for Vec<T> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Presence> Presence for Option<T> {
    fn is_present(&self) -> bool {
        self.as_ref().is_some_and(Presence::is_present)
    }
}

impl<T: Presence + ?Sized> Presence for &T {
    fn is_present(&self) -> bool {
        (**self).is_present()
    }
}

impl Presence for Value {
    fn is_present(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Text(text) => !text.is_empty(),
            Value::Sequence(items) => !items.is_empty(),
            _ => true,
        }
    }
}

macro_rules! always_present {
    ($($ty:ty),*) => {
        $(impl Presence for $ty {
            fn is_present(&self) -> bool {
                true
            }
        })*
    };
}

always_present!(bool, char, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// Validates an email address
///
/// Checks for a non-empty value of the shape `local@domain.tld` with no
/// whitespace.
pub fn validate_email(email: &str) -> ValidationResult {
    let mut errors = Vec::new();

    if email.is_empty() {
        errors.push("Email is required".to_string());
    } else if !EMAIL_REGEX.is_match(email) {
        errors.push("Email format is invalid".to_string());
    }

    ValidationResult::from_errors(errors)
}

/// Validates password strength
///
/// A missing password reports only that it is required. Otherwise each rule
/// (length, uppercase, lowercase, digit, special character) is checked
/// independently and every failure is reported.
///
/// # Arguments
/// - `password` - The candidate password
/// - `min_length` - Minimum number of characters, see [`DEFAULT_PASSWORD_MIN_LENGTH`]
pub fn validate_password(password: &str, min_length: usize) -> ValidationResult {
    let mut errors = Vec::new();

    if password.is_empty() {
        errors.push("Password is required".to_string());
        return ValidationResult::from_errors(errors);
    }

    if password.chars().count() < min_length {
        errors.push(format!(
            "Password must be at least {} characters long",
            min_length
        ));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one number".to_string());
    }
    if !password.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c)) {
        errors.push("Password must contain at least one special character".to_string());
    }

    ValidationResult::from_errors(errors)
}

/// Validates a North American phone number
///
/// Formatting characters are ignored. The remaining digits must number 10,
/// or 11 with a leading country code of `1`.
pub fn validate_phone_number(phone: &str) -> ValidationResult {
    let mut errors = Vec::new();

    if phone.is_empty() {
        errors.push("Phone number is required".to_string());
    } else {
        let cleaned: String = phone.chars().filter(char::is_ascii_digit).collect();

        if cleaned.len() != 10 && cleaned.len() != 11 {
            errors.push("Phone number must be 10 or 11 digits".to_string());
        } else if cleaned.len() == 11 && !cleaned.starts_with('1') {
            errors.push("11-digit phone number must start with 1".to_string());
        }
    }

    ValidationResult::from_errors(errors)
}

/// Validates an absolute URL using WHATWG parsing rules
pub fn validate_url(url: &str) -> ValidationResult {
    let mut errors = Vec::new();

    if url.is_empty() {
        errors.push("URL is required".to_string());
    } else if Url::parse(url).is_err() {
        errors.push("URL format is invalid".to_string());
    }

    ValidationResult::from_errors(errors)
}

/// Validates that a value is filled in
///
/// # Arguments
/// - `value` - Anything implementing [`Presence`]
/// - `field_name` - Name used in the message, see [`DEFAULT_FIELD_NAME`]
pub fn validate_required<T: Presence + ?Sized>(value: &T, field_name: &str) -> ValidationResult {
    let mut errors = Vec::new();

    if !value.is_present() {
        errors.push(format!("{} is required", field_name));
    }

    ValidationResult::from_errors(errors)
}

/// Validates the character count of a string
///
/// The bounds are checked independently; an empty value is not treated
/// specially.
pub fn validate_length(
    value: &str,
    min: Option<usize>,
    max: Option<usize>,
    field_name: &str,
) -> ValidationResult {
    let mut errors = Vec::new();
    let length = value.chars().count();

    if let Some(min) = min.filter(|min| length < *min) {
        errors.push(format!(
            "{} must be at least {} characters long",
            field_name, min
        ));
    }

    if let Some(max) = max.filter(|max| length > *max) {
        errors.push(format!(
            "{} must be no more than {} characters long",
            field_name, max
        ));
    }

    ValidationResult::from_errors(errors)
}

/// Validates a payment card number
///
/// Spaces and hyphens are ignored. The number must be 13 to 19 digits and
/// pass the Luhn checksum.
pub fn validate_credit_card(card_number: &str) -> ValidationResult {
    let mut errors = Vec::new();

    if card_number.is_empty() {
        errors.push("Credit card number is required".to_string());
        return ValidationResult::from_errors(errors);
    }

    let cleaned: String = card_number
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();

    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        errors.push("Credit card number must contain only digits".to_string());
    } else if !(13..=19).contains(&cleaned.len()) {
        errors.push("Credit card number must be between 13 and 19 digits".to_string());
    } else if !luhn_valid(&cleaned) {
        errors.push("Credit card number is invalid".to_string());
    }

    ValidationResult::from_errors(errors)
}

/// Checks a digit string against the Luhn checksum
///
/// Walking from the rightmost digit, every second digit is doubled and
/// reduced by 9 when the result exceeds 9; the total must be a multiple
/// of 10. Returns `false` for empty input or any non-digit character.
pub fn luhn_valid(digits: &str) -> bool {
    if digits.is_empty() {
        return false;
    }

    let mut sum = 0u32;
    for (position, c) in digits.chars().rev().enumerate() {
        let Some(mut digit) = c.to_digit(10) else {
            return false;
        };
        if position % 2 == 1 {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
    }

    sum % 10 == 0
}
