use async_trait::async_trait;
use uuid::Uuid;

use super::RepositoryError;
use crate::domain::user::{Email, User};

/// Repository trait for user accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user. Fails with `Conflict` when the email is taken.
    async fn create(&self, user: User) -> Result<Uuid, RepositoryError>;

    /// Find a user by email address.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError>;
}
