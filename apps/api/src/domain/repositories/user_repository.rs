use async_trait::async_trait;
use uuid::Uuid;

use super::errors::RepositoryResult;
use crate::domain::user::Email;

/// User data for persistence
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: Email,
    pub password_hash: String,
    pub full_name: String,
    pub is_active: bool,
}

/// Repository trait for catalog administrators
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user; a taken email yields `RepositoryError::UniqueViolation`
    async fn create(&self, user: User) -> RepositoryResult<Uuid>;

    /// Find a user by email address
    async fn find_by_email(&self, email: &Email) -> RepositoryResult<Option<User>>;
}
