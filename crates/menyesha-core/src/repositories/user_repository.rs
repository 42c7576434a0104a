//! User repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{User, UserRole, UserStatus};
use crate::error::DomainError;

/// Listing filter; results are always ordered newest first.
#[derive(Debug, Clone, Default)]
pub struct UserListFilter {
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    /// Code lookup within one admin role (institution codes are only unique
    /// among institution admins, sector codes among sector admins).
    async fn find_admin_by_code(
        &self,
        role: UserRole,
        code: &str,
    ) -> Result<Option<User>, DomainError>;
    async fn create(&self, user: &User) -> Result<User, DomainError>;
    /// Returns the updated user, `None` when the id is unknown.
    async fn set_status(
        &self,
        id: &Uuid,
        status: UserStatus,
    ) -> Result<Option<User>, DomainError>;
    /// Bulk status flip for every user of `role` currently in `from`.
    /// Returns the number of affected rows.
    async fn set_status_for_role(
        &self,
        role: UserRole,
        from: UserStatus,
        to: UserStatus,
    ) -> Result<u64, DomainError>;
    async fn list(&self, filter: &UserListFilter) -> Result<Vec<User>, DomainError>;
    async fn count(&self, filter: &UserListFilter) -> Result<i64, DomainError>;
}
