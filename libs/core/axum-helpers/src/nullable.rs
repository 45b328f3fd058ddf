//! Tri-state fields for partial updates.
//!
//! A field typed `Option<Option<T>>` and tagged with
//! `#[serde(default, deserialize_with = "axum_helpers::nullable::deserialize")]` reads as:
//!
//! - absent: `None` (leave unchanged)
//! - `null`: `Some(None)` (clear)
//! - a value: `Some(Some(value))` (set)

use serde::{Deserialize, Deserializer};

/// Deserializes a present field, keeping an explicit `null` as `Some(None)`.
pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
