//! Integration tests for the validators
//!
//! Table-driven checks of the public validation API, plus property tests
//! for the Luhn checksum behind card validation.

use proptest::prelude::*;
use sveltool::utils::validation::{
    luhn_valid, DEFAULT_FIELD_NAME, DEFAULT_PASSWORD_MIN_LENGTH,
};
use sveltool::{
    validate_credit_card, validate_email, validate_length, validate_password,
    validate_phone_number, validate_required, validate_url,
};

#[test]
fn test_validate_email_table() {
    let cases = vec![
        ("user@example.com", true),
        ("first.last+tag@sub.example.co.uk", true),
        ("not-an-email", false),
        ("missing@tld", false),
        ("@example.com", false),
        ("two@@example.com", false),
        ("spaces in@example.com", false),
    ];

    for (input, expected) in cases {
        let result = validate_email(input);
        assert_eq!(result.is_valid(), expected, "Unexpected result for: {}", input);
        assert_eq!(result.is_valid(), result.errors().is_empty());
    }
}

#[test]
fn test_validate_password_rules() {
    assert!(validate_password("Abc123!@", DEFAULT_PASSWORD_MIN_LENGTH).is_valid());
    assert!(validate_password("abc", DEFAULT_PASSWORD_MIN_LENGTH).errors().len() >= 4);

    let result = validate_password("ALLUPPERCASE1!", 8);
    assert_eq!(
        result.errors(),
        ["Password must contain at least one lowercase letter"]
    );

    let result = validate_password("Abc1!", 12);
    assert_eq!(
        result.errors(),
        ["Password must be at least 12 characters long"]
    );
}

#[test]
fn test_validate_phone_number_formats() {
    let valid = vec!["5551234567", "(555) 123-4567", "+1 555 123 4567", "555.123.4567"];
    for input in valid {
        assert!(validate_phone_number(input).is_valid(), "Should accept: {}", input);
    }

    let invalid = vec!["555-1234", "25551234567", "555123456789", "phone"];
    for input in invalid {
        assert!(!validate_phone_number(input).is_valid(), "Should reject: {}", input);
    }
}

#[test]
fn test_validate_url_schemes() {
    assert!(validate_url("https://example.com").is_valid());
    assert!(validate_url("ftp://files.example.com/pub").is_valid());
    assert!(!validate_url("//example.com").is_valid());
    assert!(!validate_url("http://exa mple.com").is_valid());
}

#[test]
fn test_validate_required_and_length_messages() {
    assert_eq!(
        validate_required("", DEFAULT_FIELD_NAME).errors(),
        ["Field is required"]
    );
    assert_eq!(
        validate_length("ab", Some(3), Some(1), "Code").errors(),
        [
            "Code must be at least 3 characters long",
            "Code must be no more than 1 characters long",
        ]
    );
}

#[test]
fn test_validate_credit_card_known_numbers() {
    let valid = vec![
        "4111111111111111",
        "4012 8888 8888 1881",
        "3782-822463-10005",
        "6011111111111117",
        "4222222222222",
    ];
    for input in valid {
        assert!(validate_credit_card(input).is_valid(), "Should accept: {}", input);
    }
}

/// Appends the digit that makes `prefix` pass the Luhn check
fn with_check_digit(prefix: &[u8]) -> String {
    let sum: u32 = prefix
        .iter()
        .rev()
        .enumerate()
        .map(|(position, &d)| {
            let d = u32::from(d);
            if position % 2 == 0 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();
    let check = (10 - sum % 10) % 10;

    let mut number: String = prefix.iter().map(|d| char::from(b'0' + d)).collect();
    number.push(char::from_digit(check, 10).unwrap());
    number
}

proptest! {
    #[test]
    fn prop_luhn_numbers_validate(prefix in prop::collection::vec(0u8..10, 12..=18)) {
        let number = with_check_digit(&prefix);
        prop_assert!(luhn_valid(&number));
        prop_assert!(validate_credit_card(&number).is_valid());
    }

    #[test]
    fn prop_single_digit_mutation_is_rejected(
        prefix in prop::collection::vec(0u8..10, 12..=18),
        index in any::<prop::sample::Index>(),
        delta in 1u8..10,
    ) {
        let number = with_check_digit(&prefix);
        let mut digits: Vec<u8> = number.bytes().map(|b| b - b'0').collect();
        let at = index.index(digits.len());
        digits[at] = (digits[at] + delta) % 10;
        let mutated: String = digits.iter().map(|d| char::from(b'0' + d)).collect();

        prop_assert!(!validate_credit_card(&mutated).is_valid());
    }
}
