//! User entity.

use crate::{Email, Role, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A registered platform user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct User {
    /// Unique identifier for the user.
    pub id: UserId,

    /// Public display name.
    #[validate(length(min = 2, max = 32))]
    pub nickname: String,

    /// Contact address.
    pub email: Email,

    /// Free-form profile text.
    #[validate(length(max = 1000))]
    pub about: String,

    /// Granted roles; never empty.
    #[validate(length(min = 1))]
    pub roles: Vec<Role>,

    /// Soft-delete marker.
    pub is_deleted: bool,

    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with the default `user` role.
    #[must_use]
    pub fn new(nickname: String, email: Email, about: String) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            nickname,
            email,
            about,
            roles: vec![Role::User],
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the role set, keeping it non-empty and free of duplicates.
    pub fn set_roles(&mut self, roles: impl IntoIterator<Item = Role>) {
        let mut unique = Vec::new();
        for role in roles {
            if !unique.contains(&role) {
                unique.push(role);
            }
        }
        if unique.is_empty() {
            unique.push(Role::User);
        }
        self.roles = unique;
    }

    /// Checks if the user holds the given role.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Marks the user as deleted.
    pub fn soft_delete(&mut self) {
        self.is_deleted = true;
        self.updated_at = Utc::now();
    }

    /// Bumps the update timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
