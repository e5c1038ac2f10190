//! sveltool library
//!
//! Formatting, validation and helper utilities for question widgets,
//! plus the persisted notepad state they share.
//!
//! # Modules
//!
//! - `utils` - Formatting, validation, helpers, timing and plain-data values
//! - `notes` - Notepad text and enabled flag with persistence
//! - `stores` / `traits` - Key-value storage backing the notepad
//! - `config` - YAML configuration
//! - `types` - Question description records

pub mod config;
pub mod error;
pub mod notes;
pub mod stores;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::Config;
pub use error::{Error, Result};
pub use notes::{NotesStore, NOTES_KEY};
pub use stores::{FileKeyValueStore, MemoryKeyValueStore};
pub use traits::KeyValueStore;
pub use types::{GraphSelectorQuestion, RaySelectorQuestion};
pub use utils::formatting::{
    capitalize, format_currency, format_date, format_number, format_relative_time,
    format_relative_time_from, title_case, truncate_text, DateFormatOptions, DateInput,
    FormatOptions,
};
pub use utils::helpers::{
    clamp, format_bytes, generate_uuid, group_by, random_choice, range, range_step, range_to,
    shuffle,
};
pub use utils::timing::{debounce, sleep, throttle, Debouncer, Throttler};
pub use utils::validation::{
    validate_credit_card, validate_email, validate_length, validate_password,
    validate_phone_number, validate_required, validate_url, ValidationResult,
};
pub use utils::value::{deep_clone, deep_equal, Value};
