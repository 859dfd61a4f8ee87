//! Typed id and enum parsing for path and query values.

use crate::responses::AppError;
use newsroom_core::{CommentId, NewsId, NewsroomError, UserId, VideoId};
use std::str::FromStr;

/// Ids that can be read from a path segment.
pub trait PathId: Sized {
    /// Resource name used in error messages.
    const RESOURCE: &'static str;

    fn parse_id(raw: &str) -> Option<Self>;
}

macro_rules! path_id {
    ($id:ty, $resource:literal) => {
        impl PathId for $id {
            const RESOURCE: &'static str = $resource;

            fn parse_id(raw: &str) -> Option<Self> {
                <$id>::parse(raw).ok()
            }
        }
    };
}

path_id!(NewsId, "news");
path_id!(VideoId, "video");
path_id!(UserId, "user");
path_id!(CommentId, "comment");

/// Parses a typed id from a path segment, answering 400 on garbage.
pub fn parse_path_id<T: PathId>(raw: &str) -> Result<T, AppError> {
    T::parse_id(raw).ok_or_else(|| {
        AppError(NewsroomError::validation(format!(
            "Invalid {} ID: {}",
            T::RESOURCE,
            raw
        )))
    })
}

/// Parses an optional query value, answering 400 on garbage.
pub fn parse_query<T: FromStr>(field: &str, raw: Option<&str>) -> Result<Option<T>, AppError>
where
    T::Err: std::fmt::Display,
{
    raw.filter(|value| !value.is_empty())
        .map(|value| {
            value
                .parse::<T>()
                .map_err(|e| AppError(NewsroomError::validation(format!("{}: {}", field, e))))
        })
        .transpose()
}
