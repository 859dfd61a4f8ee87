//! Comment entity.

use crate::{CommentId, ContentTarget, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reader comment on an article or a video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,

    /// Who wrote it.
    pub user_id: UserId,

    /// What it is attached to.
    pub target: ContentTarget,

    pub text: String,

    /// Optional reply text shown under the comment.
    pub reply: Option<String>,

    /// Soft-delete marker.
    pub is_deleted: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a new, live comment.
    #[must_use]
    pub fn new(user_id: UserId, target: ContentTarget, text: String, reply: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: CommentId::new(),
            user_id,
            target,
            text,
            reply,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the comment as deleted.
    pub fn soft_delete(&mut self) {
        self.is_deleted = true;
        self.updated_at = Utc::now();
    }

    /// Bumps the update timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NewsId;

    #[test]
    fn test_new_comment_is_live() {
        let target = ContentTarget::News(NewsId::new());
        let comment = Comment::new(UserId::new(), target, "Nice".to_string(), None);
        assert!(!comment.is_deleted);
        assert_eq!(comment.target, target);
        assert_eq!(comment.created_at, comment.updated_at);
    }

    #[test]
    fn test_soft_delete() {
        let mut comment = Comment::new(
            UserId::new(),
            ContentTarget::News(NewsId::new()),
            "Nice".to_string(),
            None,
        );
        comment.soft_delete();
        assert!(comment.is_deleted);
    }
}
