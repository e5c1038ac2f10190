//! General purpose helpers
//!
//! Identifiers, numeric ranges, byte-size rendering, and the random
//! selection helpers. Randomised helpers come in two forms: one using the
//! thread-local generator and a `_with` form taking any `rand::Rng`.

use rand::Rng;
use std::collections::HashMap;
use std::hash::Hash;
use uuid::Uuid;

use super::formatting::round_half_away;
use crate::error::{Error, Result};

/// Fraction digits used by [`format_bytes`] when callers have no preference
pub const DEFAULT_BYTE_DECIMALS: usize = 2;

const BYTE_UNITS: [&str; 9] = ["Bytes", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Generates a random version 4 UUID in hyphenated form
pub fn generate_uuid() -> String {
    Uuid::new_v4().to_string()
}

/// Numbers from `0` up to, but not including, `end`
pub fn range_to(end: i64) -> Vec<i64> {
    range(0, end)
}

/// Numbers from `start` up to, but not including, `end`
///
/// Empty when `start >= end`.
pub fn range(start: i64, end: i64) -> Vec<i64> {
    (start..end).collect()
}

/// Numbers from `start` towards `end` in increments of `step`
///
/// # Errors
/// Returns `Error::InvalidArgument` if `step` is zero or negative.
pub fn range_step(start: i64, end: i64, step: i64) -> Result<Vec<i64>> {
    let step = usize::try_from(step)
        .ok()
        .filter(|step| *step > 0)
        .ok_or_else(|| Error::invalid_argument(format!("step must be positive, got {}", step)))?;
    Ok((start..end).step_by(step).collect())
}

/// Bounds `value` to `[min, max]`
///
/// Computed as `min(max(value, min), max)`, so when `min > max` the result
/// is `max`. Unlike `Ord::clamp` this never panics.
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    let raised = if value < min { min } else { value };
    if raised > max {
        max
    } else {
        raised
    }
}

/// Renders a byte count with a binary unit, e.g. `1.5 KB`
///
/// Uses the largest unit, up to `YB`, that keeps the value at or above one,
/// rounds to `decimals` fraction digits and drops trailing zeros. Counts
/// below one byte stay in `Bytes`.
///
/// # Arguments
/// - `bytes` - The size in bytes
/// - `decimals` - Maximum fraction digits, see [`DEFAULT_BYTE_DECIMALS`]
///
/// # Errors
/// Returns `Error::InvalidArgument` if `bytes` is negative, NaN or infinite.
pub fn format_bytes(bytes: f64, decimals: usize) -> Result<String> {
    if !bytes.is_finite() || bytes < 0.0 {
        return Err(Error::invalid_argument(format!(
            "byte count must be finite and non-negative, got {}",
            bytes
        )));
    }
    if bytes == 0.0 {
        return Ok("0 Bytes".to_string());
    }

    let mut unit = 0;
    let mut scale = 1.0_f64;
    while unit + 1 < BYTE_UNITS.len() && bytes >= scale * 1024.0 {
        scale *= 1024.0;
        unit += 1;
    }

    let (integer, fraction) = round_half_away(bytes / scale, decimals);
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        Ok(format!("{} {}", integer, BYTE_UNITS[unit]))
    } else {
        Ok(format!("{}.{} {}", integer, fraction, BYTE_UNITS[unit]))
    }
}

/// Picks one element uniformly at random
///
/// # Errors
/// Returns `Error::InvalidArgument` if `items` is empty.
pub fn random_choice<T>(items: &[T]) -> Result<&T> {
    random_choice_with(items, &mut rand::thread_rng())
}

/// [`random_choice`] with an explicit generator
pub fn random_choice_with<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Result<&'a T> {
    if items.is_empty() {
        return Err(Error::invalid_argument("cannot choose from an empty slice"));
    }
    Ok(&items[rng.gen_range(0..items.len())])
}

/// Returns a shuffled copy of `items`, leaving the input untouched
pub fn shuffle<T: Clone>(items: &[T]) -> Vec<T> {
    shuffle_with(items, &mut rand::thread_rng())
}

/// [`shuffle`] with an explicit generator
///
/// Fisher-Yates: walk from the last index down, swapping each slot with a
/// uniformly chosen slot at or below it.
pub fn shuffle_with<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut result = items.to_vec();
    for i in (1..result.len()).rev() {
        let j = rng.gen_range(0..=i);
        result.swap(i, j);
    }
    result
}

/// Items grouped by key, in the order keys were first seen
#[derive(Debug, Clone)]
pub struct Groups<K, T> {
    groups: Vec<(K, Vec<T>)>,
    index: HashMap<K, usize>,
}

impl<K: Eq + Hash, T> Groups<K, T> {
    /// Items sharing `key`, in insertion order
    pub fn get(&self, key: &K) -> Option<&[T]> {
        self.index
            .get(key)
            .map(|&position| self.groups[position].1.as_slice())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Keys in first-seen order
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.groups.iter().map(|(key, _)| key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &[T])> {
        self.groups.iter().map(|(key, items)| (key, items.as_slice()))
    }

    pub fn into_vec(self) -> Vec<(K, Vec<T>)> {
        self.groups
    }
}

/// Groups items by a computed key
///
/// Groups appear in the order their key was first produced and items keep
/// their relative order within a group.
pub fn group_by<I, K, F>(items: I, mut key_fn: F) -> Groups<K, I::Item>
where
    I: IntoIterator,
    K: Eq + Hash + Clone,
    F: FnMut(&I::Item) -> K,
{
    let mut groups: Vec<(K, Vec<I::Item>)> = Vec::new();
    let mut index: HashMap<K, usize> = HashMap::new();

    for item in items {
        let key = key_fn(&item);
        match index.get(&key) {
            Some(&position) => groups[position].1.push(item),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![item]));
            }
        }
    }

    Groups { groups, index }
}
