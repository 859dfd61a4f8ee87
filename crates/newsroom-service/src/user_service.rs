//! User service trait definition.

use crate::dto::{CreateUserRequest, UpdateUserRequest, UserListResponse, UserResponse};
use crate::filters::UserFilter;
use async_trait::async_trait;
use newsroom_core::{Interface, NewsroomResult, UserId};

/// User service trait.
#[async_trait]
pub trait UserService: Interface + Send + Sync {
    /// Lists live users matching the filter, served through the cache.
    async fn list_users(&self, filter: UserFilter) -> NewsroomResult<UserListResponse>;

    /// Gets a live user by ID.
    async fn get_user(&self, id: UserId) -> NewsroomResult<UserResponse>;

    /// Registers a new user.
    async fn create_user(&self, request: CreateUserRequest) -> NewsroomResult<UserResponse>;

    /// Edits a user's profile or roles.
    async fn update_user(&self, id: UserId, request: UpdateUserRequest) -> NewsroomResult<UserResponse>;

    /// Soft-deletes a user.
    async fn delete_user(&self, id: UserId) -> NewsroomResult<()>;
}
