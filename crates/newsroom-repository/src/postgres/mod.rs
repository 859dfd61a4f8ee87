//! PostgreSQL repository implementations.
//!
//! Expected tables (managed outside this crate):
//!
//! ```sql
//! CREATE TABLE users (
//!     id UUID PRIMARY KEY, nickname TEXT NOT NULL, email TEXT NOT NULL UNIQUE,
//!     about TEXT NOT NULL DEFAULT '', roles TEXT[] NOT NULL,
//!     is_deleted BOOLEAN NOT NULL DEFAULT FALSE,
//!     created_at TIMESTAMPTZ NOT NULL, updated_at TIMESTAMPTZ NOT NULL
//! );
//! CREATE TABLE news (
//!     id UUID PRIMARY KEY, author_id UUID NOT NULL REFERENCES users (id),
//!     title TEXT NOT NULL, content TEXT NOT NULL, category TEXT NOT NULL,
//!     tags TEXT[] NOT NULL, is_deleted BOOLEAN NOT NULL DEFAULT FALSE,
//!     created_at TIMESTAMPTZ NOT NULL, updated_at TIMESTAMPTZ NOT NULL
//! );
//! CREATE TABLE videos (
//!     id UUID PRIMARY KEY, author_id UUID NOT NULL REFERENCES users (id),
//!     title TEXT NOT NULL, description TEXT NOT NULL, video_path TEXT NOT NULL,
//!     is_deleted BOOLEAN NOT NULL DEFAULT FALSE,
//!     created_at TIMESTAMPTZ NOT NULL, updated_at TIMESTAMPTZ NOT NULL
//! );
//! CREATE TABLE comments (
//!     id UUID PRIMARY KEY, user_id UUID NOT NULL REFERENCES users (id),
//!     news_id UUID REFERENCES news (id), video_id UUID REFERENCES videos (id),
//!     text TEXT NOT NULL, reply TEXT, is_deleted BOOLEAN NOT NULL DEFAULT FALSE,
//!     created_at TIMESTAMPTZ NOT NULL, updated_at TIMESTAMPTZ NOT NULL,
//!     CHECK ((news_id IS NULL) <> (video_id IS NULL))
//! );
//! CREATE TABLE likes (
//!     id UUID PRIMARY KEY, user_id UUID NOT NULL REFERENCES users (id),
//!     target_type TEXT NOT NULL, target_id UUID NOT NULL, kind TEXT NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL,
//!     UNIQUE (user_id, target_type, target_id)
//! );
//! CREATE TABLE news_stats (
//!     news_id UUID PRIMARY KEY REFERENCES news (id),
//!     total_likes BIGINT NOT NULL, total_dislikes BIGINT NOT NULL,
//!     last_calculated_at TIMESTAMPTZ NOT NULL
//! );
//! ```

mod comment_repository;
mod like_repository;
mod news_repository;
mod news_stats_repository;
mod user_repository;
mod video_repository;

pub use comment_repository::*;
pub use like_repository::*;
pub use news_repository::*;
pub use news_stats_repository::*;
pub use user_repository::*;
pub use video_repository::*;
