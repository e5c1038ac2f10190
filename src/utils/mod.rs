//! Utility functions
//!
//! Pure formatting and validation functions plus the general helpers
//! (identifiers, timing, plain-data comparison) the widgets build on.

pub mod formatting;
pub mod helpers;
pub mod locale;
pub mod timing;
pub mod validation;
pub mod value;
