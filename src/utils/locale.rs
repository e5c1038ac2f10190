//! Locale and currency tables
//!
//! The small set of number conventions the formatters understand: decimal
//! and grouping separators per locale, and symbols per currency. Anything
//! outside these tables is rejected instead of being rendered with a guess.

use crate::error::{Error, Result};

/// Default locale tag used when none is supplied
pub const DEFAULT_LOCALE: &str = "en-US";

/// Default ISO 4217 currency code used when none is supplied
pub const DEFAULT_CURRENCY: &str = "USD";

/// Where a currency symbol goes relative to the digits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPlacement {
    /// `$1,234.56`
    Prefix,
    /// `1.234,56 €`
    Suffix,
}

/// Number conventions for one locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    /// Canonical BCP 47 tag, e.g. `en-US`
    pub tag: &'static str,
    pub decimal_separator: char,
    pub group_separator: char,
    /// Digits the leading group needs before grouping kicks in; 2 leaves `1234` ungrouped
    pub min_grouping: usize,
    pub symbol_placement: SymbolPlacement,
}

// fr-FR groups with U+202F and both de/fr/es put U+00A0 before a suffixed symbol.
const LOCALES: &[Locale] = &[
    Locale {
        tag: "en-US",
        decimal_separator: '.',
        group_separator: ',',
        min_grouping: 1,
        symbol_placement: SymbolPlacement::Prefix,
    },
    Locale {
        tag: "en-GB",
        decimal_separator: '.',
        group_separator: ',',
        min_grouping: 1,
        symbol_placement: SymbolPlacement::Prefix,
    },
    Locale {
        tag: "de-DE",
        decimal_separator: ',',
        group_separator: '.',
        min_grouping: 1,
        symbol_placement: SymbolPlacement::Suffix,
    },
    Locale {
        tag: "fr-FR",
        decimal_separator: ',',
        group_separator: '\u{202F}',
        min_grouping: 1,
        symbol_placement: SymbolPlacement::Suffix,
    },
    Locale {
        tag: "es-ES",
        decimal_separator: ',',
        group_separator: '.',
        min_grouping: 2,
        symbol_placement: SymbolPlacement::Suffix,
    },
    Locale {
        tag: "ja-JP",
        decimal_separator: '.',
        group_separator: ',',
        min_grouping: 1,
        symbol_placement: SymbolPlacement::Prefix,
    },
];

/// A supported currency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Currency {
    /// ISO 4217 code
    pub code: &'static str,
    pub symbol: &'static str,
}

const CURRENCIES: &[Currency] = &[
    Currency { code: "USD", symbol: "$" },
    Currency { code: "EUR", symbol: "€" },
    Currency { code: "GBP", symbol: "£" },
    Currency { code: "JPY", symbol: "¥" },
    Currency { code: "CAD", symbol: "CA$" },
    Currency { code: "AUD", symbol: "A$" },
    Currency { code: "CHF", symbol: "CHF" },
    Currency { code: "CNY", symbol: "CN¥" },
    Currency { code: "INR", symbol: "₹" },
];

/// Locale-specific symbols that differ from the currency's generic one
const SYMBOL_OVERRIDES: &[(&str, &str, &str)] = &[
    ("en-GB", "USD", "US$"),
    ("en-GB", "JPY", "JP¥"),
    ("de-DE", "AUD", "AU$"),
    ("fr-FR", "USD", "$US"),
    ("fr-FR", "GBP", "£GB"),
    ("fr-FR", "CAD", "$CA"),
    ("fr-FR", "AUD", "$AU"),
    ("es-ES", "USD", "US$"),
    ("ja-JP", "JPY", "￥"),
    ("ja-JP", "CNY", "元"),
];

impl Locale {
    /// Looks up a locale by tag
    ///
    /// Matching is case-insensitive, accepts `_` in place of `-`, and maps a
    /// bare language (`de`) to its default region.
    ///
    /// # Errors
    /// Returns `Error::UnsupportedLocale` for tags outside the table.
    pub fn parse(tag: &str) -> Result<Self> {
        let normalized = tag.trim().replace('_', "-").to_ascii_lowercase();
        let wanted = match normalized.as_str() {
            "en" => "en-us",
            "de" => "de-de",
            "fr" => "fr-fr",
            "es" => "es-es",
            "ja" => "ja-jp",
            other => other,
        };

        LOCALES
            .iter()
            .find(|locale| locale.tag.eq_ignore_ascii_case(wanted))
            .copied()
            .ok_or_else(|| Error::UnsupportedLocale(tag.to_string()))
    }

    /// Symbol this locale shows for `currency`
    pub fn symbol_for(&self, currency: &Currency) -> &'static str {
        SYMBOL_OVERRIDES
            .iter()
            .find(|(tag, code, _)| *tag == self.tag && *code == currency.code)
            .map_or(currency.symbol, |(_, _, symbol)| *symbol)
    }

    /// Whether an integer part of `len` digits gets group separators
    pub fn groups(&self, len: usize) -> bool {
        len >= 3 + self.min_grouping
    }

    /// All supported locales
    pub fn all() -> &'static [Locale] {
        LOCALES
    }
}

impl Currency {
    /// Looks up a currency by its ISO 4217 code (case-insensitive)
    ///
    /// # Errors
    /// Returns `Error::UnsupportedCurrency` for codes outside the table.
    pub fn parse(code: &str) -> Result<Self> {
        let code = code.trim();
        CURRENCIES
            .iter()
            .find(|currency| currency.code.eq_ignore_ascii_case(code))
            .copied()
            .ok_or_else(|| Error::UnsupportedCurrency(code.to_string()))
    }
}

/// Whether a symbol is made of letters and needs a space before digits
pub fn is_alphabetic_symbol(symbol: &str) -> bool {
    symbol.chars().all(|c| c.is_ascii_alphabetic())
}
