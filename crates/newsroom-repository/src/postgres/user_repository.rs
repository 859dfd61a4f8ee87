//! PostgreSQL user repository implementation.

use crate::{traits::UserRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use newsroom_core::{Email, NewsroomError, NewsroomResult, Role, User, UserId};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

const USER_COLUMNS: &str = "id, nickname, email, about, roles, is_deleted, created_at, updated_at";

/// PostgreSQL user repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = UserRepository)]
pub struct PgUserRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PgUserRepository {
    /// Creates a new PostgreSQL user repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    nickname: String,
    email: String,
    about: String,
    roles: Vec<String>,
    is_deleted: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        let id = UserId::from_uuid(row.id);
        let roles = row
            .roles
            .iter()
            .filter_map(|name| match name.parse::<Role>() {
                Ok(role) => Some(role),
                Err(e) => {
                    warn!("Ignoring role on user {}: {}", id, e);
                    None
                }
            })
            .collect::<Vec<_>>();

        let mut user = User {
            id,
            nickname: row.nickname,
            email: Email::new_unchecked(row.email),
            about: row.about,
            roles: Vec::new(),
            is_deleted: row.is_deleted,
            created_at: row.created_at,
            updated_at: row.updated_at,
        };
        user.set_roles(roles);
        user
    }
}

fn role_names(user: &User) -> Vec<&'static str> {
    user.roles.iter().map(Role::as_str).collect()
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn list_active(&self) -> NewsroomResult<Vec<User>> {
        debug!("Loading all live users");

        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE is_deleted = FALSE ORDER BY created_at, id"
        ))
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find_by_id(&self, id: UserId) -> NewsroomResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND is_deleted = FALSE"
        ))
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(User::from))
    }

    async fn exists_by_email(&self, email: &str) -> NewsroomResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1) AND is_deleted = FALSE)",
        )
        .bind(email)
        .fetch_one(self.pool.inner())
        .await?;

        Ok(exists)
    }

    async fn save(&self, user: &User) -> NewsroomResult<User> {
        debug!("Saving user: {}", user.id);

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (id, nickname, email, about, roles, is_deleted, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.id.into_inner())
        .bind(&user.nickname)
        .bind(user.email.as_str())
        .bind(&user.about)
        .bind(role_names(user))
        .bind(user.is_deleted)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(self.pool.inner())
        .await?;

        Ok(User::from(row))
    }

    async fn update(&self, user: &User) -> NewsroomResult<User> {
        debug!("Updating user: {}", user.id);

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users
            SET nickname = $2, email = $3, about = $4, roles = $5, updated_at = $6
            WHERE id = $1 AND is_deleted = FALSE
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.id.into_inner())
        .bind(&user.nickname)
        .bind(user.email.as_str())
        .bind(&user.about)
        .bind(role_names(user))
        .bind(user.updated_at)
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(User::from)
            .ok_or_else(|| NewsroomError::not_found("User", user.id))
    }

    async fn soft_delete(&self, id: UserId) -> NewsroomResult<bool> {
        debug!("Soft-deleting user: {}", id);

        let result = sqlx::query(
            "UPDATE users SET is_deleted = TRUE, updated_at = NOW() WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id.into_inner())
        .execute(self.pool.inner())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
