//! Wire format of a cached collection.
//!
//! ```json
//! { "version": 1, "kind": "news", "cached_at": "...", "items": [ ... ] }
//! ```

use super::{CacheError, CacheResult, CollectionKind, Snapshot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bumped whenever the shape of a cached snapshot changes. Entries written
/// under another version are treated as misses.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    version: u32,
    kind: CollectionKind,
    cached_at: DateTime<Utc>,
    items: &'a [T],
}

#[derive(Deserialize)]
struct Envelope<T> {
    version: u32,
    kind: CollectionKind,
    items: Vec<T>,
}

/// Serializes a full collection.
pub(crate) fn encode<T: Snapshot>(items: &[T], cached_at: DateTime<Utc>) -> CacheResult<Vec<u8>> {
    let envelope = EnvelopeRef {
        version: SCHEMA_VERSION,
        kind: T::KIND,
        cached_at,
        items,
    };
    Ok(serde_json::to_vec(&envelope)?)
}

/// Reads a collection back, rejecting payloads of another version or kind.
pub(crate) fn decode<T: Snapshot>(payload: &[u8]) -> CacheResult<Vec<T>> {
    let envelope: Envelope<T> = serde_json::from_slice(payload)?;

    if envelope.version != SCHEMA_VERSION {
        return Err(CacheError::SerializationFailed(format!(
            "schema version {} (expected {})",
            envelope.version, SCHEMA_VERSION
        )));
    }

    if envelope.kind != T::KIND {
        return Err(CacheError::SerializationFailed(format!(
            "payload holds {} (expected {})",
            envelope.kind,
            T::KIND
        )));
    }

    Ok(envelope.items)
}
