//! Entity snapshots held in the cache.

use super::CollectionKind;
use newsroom_core::{News, User, Video};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A detached copy of a repository row that can live in a cached collection.
pub trait Snapshot: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection the snapshot belongs to.
    const KIND: CollectionKind;

    /// Soft-deleted rows are never served from a collection.
    fn is_deleted(&self) -> bool;
}

impl Snapshot for News {
    const KIND: CollectionKind = CollectionKind::News;

    fn is_deleted(&self) -> bool {
        self.is_deleted
    }
}

impl Snapshot for Video {
    const KIND: CollectionKind = CollectionKind::Videos;

    fn is_deleted(&self) -> bool {
        self.is_deleted
    }
}

impl Snapshot for User {
    const KIND: CollectionKind = CollectionKind::Users;

    fn is_deleted(&self) -> bool {
        self.is_deleted
    }
}
