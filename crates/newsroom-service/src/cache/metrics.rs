//! Prometheus metrics for the collection cache.

use super::CollectionKind;
use metrics::{counter, describe_counter};

/// Metric names for the collection cache.
pub mod names {
    /// Reads answered from the cache.
    pub const CACHE_HITS_TOTAL: &str = "newsroom_cache_hits_total";
    /// Reads that found no usable entry.
    pub const CACHE_MISSES_TOTAL: &str = "newsroom_cache_misses_total";
    /// Operations that fell back because the store was unreachable.
    pub const CACHE_FALLBACKS_TOTAL: &str = "newsroom_cache_fallbacks_total";
    /// Payloads that could not be encoded or decoded.
    pub const CACHE_SERIALIZATION_FAILURES_TOTAL: &str =
        "newsroom_cache_serialization_failures_total";
    /// Entries deleted after a write.
    pub const CACHE_INVALIDATIONS_TOTAL: &str = "newsroom_cache_invalidations_total";
    /// Entries reloaded after a write.
    pub const CACHE_REFRESHES_TOTAL: &str = "newsroom_cache_refreshes_total";
}

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_counter!(
        names::CACHE_HITS_TOTAL,
        "Total number of collection reads served from the cache"
    );
    describe_counter!(
        names::CACHE_MISSES_TOTAL,
        "Total number of collection reads that went to the repository"
    );
    describe_counter!(
        names::CACHE_FALLBACKS_TOTAL,
        "Total number of cache operations skipped because the store was unavailable"
    );
    describe_counter!(
        names::CACHE_SERIALIZATION_FAILURES_TOTAL,
        "Total number of cached payloads that failed to encode or decode"
    );
    describe_counter!(
        names::CACHE_INVALIDATIONS_TOTAL,
        "Total number of collection entries deleted after a write"
    );
    describe_counter!(
        names::CACHE_REFRESHES_TOTAL,
        "Total number of collection entries reloaded after a write"
    );
}

/// Record a cache hit.
pub fn record_hit(kind: CollectionKind) {
    counter!(names::CACHE_HITS_TOTAL, "collection" => kind.as_str()).increment(1);
}

/// Record a cache miss.
pub fn record_miss(kind: CollectionKind) {
    counter!(names::CACHE_MISSES_TOTAL, "collection" => kind.as_str()).increment(1);
}

/// Record a fallback caused by an unreachable store.
pub fn record_fallback(kind: CollectionKind, operation: &'static str) {
    counter!(
        names::CACHE_FALLBACKS_TOTAL,
        "collection" => kind.as_str(),
        "operation" => operation
    )
    .increment(1);
}

/// Record a payload that failed to encode or decode.
pub fn record_serialization_failure(kind: CollectionKind) {
    counter!(
        names::CACHE_SERIALIZATION_FAILURES_TOTAL,
        "collection" => kind.as_str()
    )
    .increment(1);
}

/// Record an invalidation.
pub fn record_invalidation(kind: CollectionKind) {
    counter!(names::CACHE_INVALIDATIONS_TOTAL, "collection" => kind.as_str()).increment(1);
}

/// Record a refresh.
pub fn record_refresh(kind: CollectionKind) {
    counter!(names::CACHE_REFRESHES_TOTAL, "collection" => kind.as_str()).increment(1);
}
