//! User service implementation.

use crate::cache::{CacheSettings, CacheStore, Clock, CollectionCache, SystemClock};
use crate::dto::{CreateUserRequest, UpdateUserRequest, UserListResponse, UserResponse};
use crate::filters::UserFilter;
use crate::user_service::UserService;
use async_trait::async_trait;
use newsroom_core::{Email, NewsroomError, NewsroomResult, User, UserId, ValidateExt};
use newsroom_repository::UserRepository;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info};

/// User service component for Shaku DI.
#[derive(Component)]
#[shaku(interface = UserService)]
pub struct UserServiceComponent {
    #[shaku(inject)]
    user_repository: Arc<dyn UserRepository>,
    #[shaku(inject)]
    cache_store: Arc<dyn CacheStore>,
    cache_settings: CacheSettings,
    #[shaku(default = Arc::new(SystemClock))]
    clock: Arc<dyn Clock>,
}

impl UserServiceComponent {
    /// Creates a user service outside of a DI module.
    #[must_use]
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        cache_store: Arc<dyn CacheStore>,
        cache_settings: CacheSettings,
    ) -> Self {
        Self {
            user_repository,
            cache_store,
            cache_settings,
            clock: Arc::new(SystemClock),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    fn collection(&self) -> CollectionCache<User> {
        CollectionCache::with_clock(
            self.cache_store.clone(),
            &self.cache_settings,
            self.clock.clone(),
        )
    }

    async fn invalidate(&self) {
        let repository = self.user_repository.clone();
        self.collection()
            .invalidate_collection(move || async move { repository.list_active().await })
            .await;
    }

    fn parse_email(raw: &str) -> NewsroomResult<Email> {
        Email::new(raw).map_err(|e| NewsroomError::validation(format!("email: {}", e)))
    }

    async fn ensure_email_free(&self, email: &Email) -> NewsroomResult<()> {
        if self.user_repository.exists_by_email(email.as_str()).await? {
            return Err(NewsroomError::conflict(format!(
                "Email {} is already registered",
                email
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl UserService for UserServiceComponent {
    async fn list_users(&self, filter: UserFilter) -> NewsroomResult<UserListResponse> {
        debug!(
            "Listing users, page: {}, size: {}",
            filter.page.page_number, filter.page.page_size
        );

        let repository = self.user_repository.clone();
        let page = self
            .collection()
            .get_collection(&filter, move || async move { repository.list_active().await })
            .await?;

        Ok(page.map(UserResponse::from))
    }

    async fn get_user(&self, id: UserId) -> NewsroomResult<UserResponse> {
        debug!("Getting user: {}", id);

        self.user_repository
            .find_by_id(id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| NewsroomError::not_found("User", id))
    }

    async fn create_user(&self, request: CreateUserRequest) -> NewsroomResult<UserResponse> {
        debug!("Creating user: {}", request.nickname);

        request.validate_request()?;

        let email = Self::parse_email(&request.email)?;
        self.ensure_email_free(&email).await?;

        let mut user = User::new(request.nickname, email, request.about);
        if !request.roles.is_empty() {
            user.set_roles(request.roles);
        }

        let saved = self.user_repository.save(&user).await?;
        self.invalidate().await;

        info!("User created: {}", saved.id);
        Ok(UserResponse::from(saved))
    }

    async fn update_user(&self, id: UserId, request: UpdateUserRequest) -> NewsroomResult<UserResponse> {
        debug!("Updating user: {}", id);

        request.validate_request()?;

        let mut user = self
            .user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| NewsroomError::not_found("User", id))?;

        if let Some(raw) = request.email {
            let email = Self::parse_email(&raw)?;
            if email != user.email {
                self.ensure_email_free(&email).await?;
                user.email = email;
            }
        }
        if let Some(nickname) = request.nickname {
            user.nickname = nickname;
        }
        if let Some(about) = request.about {
            user.about = about;
        }
        if let Some(roles) = request.roles {
            user.set_roles(roles);
        }
        user.touch();

        let updated = self.user_repository.update(&user).await?;
        self.invalidate().await;

        info!("User updated: {}", id);
        Ok(UserResponse::from(updated))
    }

    async fn delete_user(&self, id: UserId) -> NewsroomResult<()> {
        debug!("Deleting user: {}", id);

        if !self.user_repository.soft_delete(id).await? {
            return Err(NewsroomError::not_found("User", id));
        }
        self.invalidate().await;

        info!("User deleted: {}", id);
        Ok(())
    }
}

impl std::fmt::Debug for UserServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceComponent")
            .field("cache_settings", &self.cache_settings)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryCacheStore;
    use newsroom_core::{PageRequest, Role};
    use newsroom_repository::InMemoryUserRepository;

    fn service() -> UserServiceComponent {
        UserServiceComponent::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryCacheStore::new()),
            CacheSettings::default(),
        )
    }

    fn create_request(nickname: &str, email: &str) -> CreateUserRequest {
        CreateUserRequest {
            nickname: nickname.to_string(),
            email: email.to_string(),
            about: String::new(),
            roles: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_create_user_defaults_role() {
        let service = service();
        let user = service
            .create_user(create_request("reader", "reader@example.com"))
            .await
            .unwrap();
        assert_eq!(user.roles, vec![Role::User]);
        assert_eq!(user.email, "reader@example.com");
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let service = service();
        service
            .create_user(create_request("first", "dup@example.com"))
            .await
            .unwrap();

        let result = service
            .create_user(create_request("second", "DUP@example.com"))
            .await;
        assert!(matches!(result, Err(NewsroomError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_roles_visible_through_role_filter() {
        let service = service();
        let user = service
            .create_user(create_request("editor", "editor@example.com"))
            .await
            .unwrap();

        let admins = UserFilter {
            role: Some(Role::Admin),
            page: PageRequest::first(),
            ..UserFilter::default()
        };
        assert!(service.list_users(admins.clone()).await.unwrap().is_empty());

        service
            .update_user(
                user.id,
                UpdateUserRequest {
                    roles: Some(vec![Role::Admin, Role::Admin]),
                    ..UpdateUserRequest::default()
                },
            )
            .await
            .unwrap();

        let page = service.list_users(admins).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page.items[0].roles, vec![Role::Admin]);
    }

    #[tokio::test]
    async fn test_update_keeping_own_email_is_allowed() {
        let service = service();
        let user = service
            .create_user(create_request("same", "same@example.com"))
            .await
            .unwrap();

        let updated = service
            .update_user(
                user.id,
                UpdateUserRequest {
                    email: Some("Same@Example.com".to_string()),
                    about: Some("hello".to_string()),
                    ..UpdateUserRequest::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.about, "hello");
    }
}
