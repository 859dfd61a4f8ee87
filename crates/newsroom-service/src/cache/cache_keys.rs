//! Cache key naming.
//!
//! There is exactly one key per collection. Filters and pages never get keys
//! of their own.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default namespace for every cache key.
pub const DEFAULT_PREFIX: &str = "newsroom:cache";

/// The cached collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    News,
    Videos,
    Users,
}

impl CollectionKind {
    /// Short name, used as key suffix and metric label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::News => "news",
            Self::Videos => "videos",
            Self::Users => "users",
        }
    }

    /// Full cache key for the collection under `prefix`.
    #[must_use]
    pub fn key(&self, prefix: &str) -> String {
        if prefix.is_empty() {
            self.as_str().to_string()
        } else {
            format!("{}:{}", prefix, self.as_str())
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
