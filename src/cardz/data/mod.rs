//! # Data Access
//!
//! Load/create/update/delete over the two persisted collections. Every
//! mutation follows the same shape:
//!
//! 1. Re-read the latest persisted collection (never a cached copy).
//! 2. Apply the change.
//! 3. Persist.
//! 4. Emit the matching [`Signal`](crate::bus::Signal) on the bus.
//!
//! A mutation that matches nothing neither writes nor emits, so stored bytes
//! stay exactly as they were.
//!
//! Loads are forgiving: a missing, unreadable or undecodable collection reads
//! as empty. Mutations are strict: they refuse to overwrite a collection they
//! cannot decode and return [`CardzError::Corrupt`].
//!
//! No field validation happens here. Required-field checks belong to the
//! command layer.

use crate::error::{CardzError, Result};
use crate::model::{now_millis, Millis};
use crate::store::RecordStore;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod cards;
pub mod groups;

fn load_lenient<S: RecordStore + ?Sized, T: DeserializeOwned>(store: &S, key: &str) -> Vec<T> {
    let raw = match store.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(key, error = %e, "read failed, treating collection as empty");
            return Vec::new();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(key, error = %e, "collection is not decodable, treating as empty");
            Vec::new()
        }
    }
}

fn load_latest<S: RecordStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Result<Vec<T>> {
    match store.read(key)? {
        None => Ok(Vec::new()),
        Some(raw) => serde_json::from_str(&raw).map_err(|source| CardzError::Corrupt {
            key: key.to_string(),
            source,
        }),
    }
}

fn encode<T: Serialize>(items: &[T]) -> Result<String> {
    serde_json::to_string(items).map_err(CardzError::Serialization)
}

/// Creation timestamp for a new record: wall clock, but never older than the
/// newest record already stored. Keeps `created_at` non-decreasing even if the
/// clock steps backwards.
fn next_timestamp(existing: impl Iterator<Item = Millis>) -> Millis {
    let now = now_millis();
    existing.fold(now, Millis::max)
}
