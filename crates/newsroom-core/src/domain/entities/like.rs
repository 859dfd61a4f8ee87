//! Likes and the per-article statistics computed from them.

use crate::{ContentTarget, LikeId, NewsId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a reaction is positive or negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LikeKind {
    #[default]
    Like,
    Dislike,
}

impl LikeKind {
    /// Returns the storage/wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }
}

impl fmt::Display for LikeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LikeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "like" => Ok(Self::Like),
            "dislike" => Ok(Self::Dislike),
            other => Err(format!("unknown like kind '{}'", other)),
        }
    }
}

/// One user's reaction to one piece of content.
///
/// A user holds at most one like per target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    pub id: LikeId,
    pub user_id: UserId,
    pub target: ContentTarget,
    pub kind: LikeKind,
    pub created_at: DateTime<Utc>,
}

impl Like {
    /// Creates a new like.
    #[must_use]
    pub fn new(user_id: UserId, target: ContentTarget, kind: LikeKind) -> Self {
        Self {
            id: LikeId::new(),
            user_id,
            target,
            kind,
            created_at: Utc::now(),
        }
    }
}

/// Like and dislike counts for one target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeTally {
    pub likes: u64,
    pub dislikes: u64,
}

impl LikeTally {
    /// Counts one more reaction.
    pub fn add(&mut self, kind: LikeKind) {
        match kind {
            LikeKind::Like => self.likes += 1,
            LikeKind::Dislike => self.dislikes += 1,
        }
    }
}

/// Periodically recalculated reaction totals for an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsStats {
    pub news_id: NewsId,
    pub total_likes: u64,
    pub total_dislikes: u64,
    pub last_calculated_at: DateTime<Utc>,
}

impl NewsStats {
    /// Snapshot of a tally taken at `at`.
    #[must_use]
    pub fn from_tally(news_id: NewsId, tally: LikeTally, at: DateTime<Utc>) -> Self {
        Self {
            news_id,
            total_likes: tally.likes,
            total_dislikes: tally.dislikes,
            last_calculated_at: at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_kind_parse() {
        assert_eq!("Dislike".parse::<LikeKind>().unwrap(), LikeKind::Dislike);
        assert!("meh".parse::<LikeKind>().is_err());
        assert_eq!(LikeKind::default(), LikeKind::Like);
    }

    #[test]
    fn test_tally_counts_each_kind() {
        let mut tally = LikeTally::default();
        tally.add(LikeKind::Like);
        tally.add(LikeKind::Like);
        tally.add(LikeKind::Dislike);
        assert_eq!(tally, LikeTally { likes: 2, dislikes: 1 });
    }

    #[test]
    fn test_stats_from_tally() {
        let news_id = NewsId::new();
        let now = Utc::now();
        let stats = NewsStats::from_tally(news_id, LikeTally { likes: 3, dislikes: 0 }, now);
        assert_eq!(stats.total_likes, 3);
        assert_eq!(stats.last_calculated_at, now);
    }
}
