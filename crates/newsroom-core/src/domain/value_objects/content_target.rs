//! What a comment or a like is attached to.

use crate::{NewsId, VideoId};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A piece of published content: a news article or a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum ContentTarget {
    News(NewsId),
    Video(VideoId),
}

impl ContentTarget {
    /// Storage/wire name of the content kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::News(_) => "news",
            Self::Video(_) => "video",
        }
    }

    /// The raw id of the target row.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        match self {
            Self::News(id) => id.into_inner(),
            Self::Video(id) => id.into_inner(),
        }
    }

    /// Rebuilds a target from its stored kind and id.
    pub fn from_parts(kind: &str, id: Uuid) -> Result<Self, String> {
        match kind {
            "news" => Ok(Self::News(NewsId::from_uuid(id))),
            "video" => Ok(Self::Video(VideoId::from_uuid(id))),
            other => Err(format!("unknown content kind '{}'", other)),
        }
    }

    /// Builds a target from the optional id pair used in requests and rows.
    ///
    /// Exactly one of the two must be present.
    pub fn from_options(news_id: Option<NewsId>, video_id: Option<VideoId>) -> Result<Self, String> {
        match (news_id, video_id) {
            (Some(id), None) => Ok(Self::News(id)),
            (None, Some(id)) => Ok(Self::Video(id)),
            _ => Err("Exactly one of news_id or video_id must be provided".to_string()),
        }
    }

    /// The news id, if this targets an article.
    #[must_use]
    pub const fn news_id(&self) -> Option<NewsId> {
        match self {
            Self::News(id) => Some(*id),
            Self::Video(_) => None,
        }
    }

    /// The video id, if this targets a video.
    #[must_use]
    pub const fn video_id(&self) -> Option<VideoId> {
        match self {
            Self::Video(id) => Some(*id),
            Self::News(_) => None,
        }
    }
}

impl fmt::Display for ContentTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.id())
    }
}
