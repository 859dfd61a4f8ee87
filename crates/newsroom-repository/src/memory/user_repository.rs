//! In-memory user repository.

use crate::traits::UserRepository;
use async_trait::async_trait;
use newsroom_core::{NewsroomError, NewsroomResult, User, UserId};
use shaku::Component;
use tokio::sync::RwLock;

/// User repository backed by a process-local vector.
#[derive(Component, Default)]
#[shaku(interface = UserRepository)]
pub struct InMemoryUserRepository {
    #[shaku(default)]
    rows: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository seeded with the given rows.
    #[must_use]
    pub fn with_users(rows: Vec<User>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list_active(&self) -> NewsroomResult<Vec<User>> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .filter(|u| !u.is_deleted)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: UserId) -> NewsroomResult<Option<User>> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .find(|u| u.id == id && !u.is_deleted)
            .cloned())
    }

    async fn exists_by_email(&self, email: &str) -> NewsroomResult<bool> {
        let email = email.to_lowercase();
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .any(|u| !u.is_deleted && u.email.as_str() == email))
    }

    async fn save(&self, user: &User) -> NewsroomResult<User> {
        let mut rows = self.rows.write().await;
        if rows
            .iter()
            .any(|u| u.id == user.id || (!u.is_deleted && u.email == user.email))
        {
            return Err(NewsroomError::conflict(format!(
                "User with email {} already exists",
                user.email
            )));
        }
        rows.push(user.clone());
        Ok(user.clone())
    }

    async fn update(&self, user: &User) -> NewsroomResult<User> {
        let mut rows = self.rows.write().await;
        let slot = rows
            .iter_mut()
            .find(|u| u.id == user.id && !u.is_deleted)
            .ok_or_else(|| NewsroomError::not_found("User", user.id))?;
        *slot = User {
            is_deleted: false,
            created_at: slot.created_at,
            ..user.clone()
        };
        Ok(slot.clone())
    }

    async fn soft_delete(&self, id: UserId) -> NewsroomResult<bool> {
        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|u| u.id == id && !u.is_deleted) {
            Some(user) => {
                user.soft_delete();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsroom_core::Email;

    fn create_test_user(nickname: &str, email: &str) -> User {
        User::new(nickname.to_string(), Email::new(email).unwrap(), String::new())
    }

    #[tokio::test]
    async fn test_exists_by_email_case_insensitive() {
        let repo = InMemoryUserRepository::with_users(vec![create_test_user(
            "anchor",
            "anchor@example.com",
        )]);

        assert!(repo.exists_by_email("ANCHOR@example.com").await.unwrap());
        assert!(!repo.exists_by_email("other@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_save_duplicate_email_conflicts() {
        let repo = InMemoryUserRepository::new();
        repo.save(&create_test_user("one", "dup@example.com")).await.unwrap();

        let result = repo.save(&create_test_user("two", "dup@example.com")).await;
        assert!(matches!(result, Err(NewsroomError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_deleted_user_frees_email() {
        let user = create_test_user("one", "reuse@example.com");
        let repo = InMemoryUserRepository::with_users(vec![user.clone()]);
        repo.soft_delete(user.id).await.unwrap();

        assert!(!repo.exists_by_email("reuse@example.com").await.unwrap());
        assert!(repo.save(&create_test_user("two", "reuse@example.com")).await.is_ok());
    }
}
