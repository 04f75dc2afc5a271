//! Serde helpers for request DTOs.

use std::fmt::Display;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// Deserialize a nullable field of a partial-update payload into a tri-state.
///
/// Pair with `#[serde(default, deserialize_with = "double_option")]`:
///
/// - field omitted      -> `None` (keep the stored value)
/// - field is `null`    -> `Some(None)` (clear the stored value)
/// - field has a value  -> `Some(Some(v))` (replace)
///
/// Plain `Option<Option<T>>` cannot tell the first two apart because serde
/// maps `null` to the outer `None`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Deserialize a query-string filter, treating an empty value (`?featured=`)
/// the same as an absent one.
///
/// Pair with `#[serde(default, deserialize_with = "empty_as_none")]`.
pub fn empty_as_none<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: FromStr,
    T::Err: Display,
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim().parse().map(Some).map_err(D::Error::custom)
        }
        _ => Ok(None),
    }
}
