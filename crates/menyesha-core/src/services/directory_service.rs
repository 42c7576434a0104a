//! User directory service: admin account creation and status management

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use menyesha_security::PasswordService;

use crate::domain::{InstitutionProfile, SectorProfile, User, UserRole, UserStatus};
use crate::error::DomainError;
use crate::repositories::{UserListFilter, UserRepository};

#[derive(Debug, Clone)]
pub struct CreateInstitutionAdmin {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub institution_name: String,
    pub institution_code: String,
    pub institution_category: Option<String>,
    pub institution_address: Option<String>,
    pub institution_description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateSectorAdmin {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub sector_name: String,
    pub sector_code: String,
    pub province: Option<String>,
    pub district: Option<String>,
}

pub struct DirectoryService {
    user_repo: Arc<dyn UserRepository>,
    passwords: PasswordService,
}

impl DirectoryService {
    pub fn new(user_repo: Arc<dyn UserRepository>, passwords: PasswordService) -> Self {
        Self {
            user_repo,
            passwords,
        }
    }

    /// Create an institution admin. Email must be globally unique, the
    /// institution code unique among institution admins (case-insensitive:
    /// codes are compared and stored upper-cased).
    pub async fn create_institution_admin(
        &self,
        input: CreateInstitutionAdmin,
    ) -> Result<User, DomainError> {
        info!("Creating institution admin: {}", input.email);

        if self.user_repo.find_by_email(&input.email).await?.is_some() {
            warn!("Institution admin creation failed: email exists: {}", input.email);
            return Err(DomainError::EmailAlreadyExists(input.email));
        }

        let code = input.institution_code.to_uppercase();
        if self
            .user_repo
            .find_admin_by_code(UserRole::InstitutionAdmin, &code)
            .await?
            .is_some()
        {
            warn!("Institution admin creation failed: code exists: {}", code);
            return Err(DomainError::CodeAlreadyExists(code));
        }

        let password_hash = self
            .passwords
            .hash(&input.password)
            .map_err(|e| DomainError::PasswordHashError(e.to_string()))?;

        let user = User::new_institution_admin(
            input.full_name,
            input.email,
            password_hash,
            input.phone,
            InstitutionProfile {
                name: input.institution_name,
                code,
                category: input.institution_category,
                address: input.institution_address,
                description: input.institution_description,
            },
        );

        self.user_repo.create(&user).await
    }

    pub async fn create_sector_admin(
        &self,
        input: CreateSectorAdmin,
    ) -> Result<User, DomainError> {
        info!("Creating sector admin: {}", input.email);

        if self.user_repo.find_by_email(&input.email).await?.is_some() {
            warn!("Sector admin creation failed: email exists: {}", input.email);
            return Err(DomainError::EmailAlreadyExists(input.email));
        }

        let code = input.sector_code.to_uppercase();
        if self
            .user_repo
            .find_admin_by_code(UserRole::SectorAdmin, &code)
            .await?
            .is_some()
        {
            warn!("Sector admin creation failed: code exists: {}", code);
            return Err(DomainError::CodeAlreadyExists(code));
        }

        let password_hash = self
            .passwords
            .hash(&input.password)
            .map_err(|e| DomainError::PasswordHashError(e.to_string()))?;

        let user = User::new_sector_admin(
            input.full_name,
            input.email,
            password_hash,
            input.phone,
            SectorProfile {
                name: input.sector_name,
                code,
                province: input.province,
                district: input.district,
            },
        );

        self.user_repo.create(&user).await
    }

    /// Flip a user's active/inactive status. Does not cascade to that
    /// admin's complaints, and does not invalidate outstanding tokens.
    pub async fn set_user_status(
        &self,
        id: &Uuid,
        status: UserStatus,
    ) -> Result<User, DomainError> {
        self.user_repo
            .set_status(id, status)
            .await?
            .ok_or_else(|| DomainError::NotFound("User not found".into()))
    }

    /// Reset every inactive institution admin back to active. Returns the
    /// affected count.
    pub async fn reactivate_institution_admins(&self) -> Result<u64, DomainError> {
        let count = self
            .user_repo
            .set_status_for_role(
                UserRole::InstitutionAdmin,
                UserStatus::Inactive,
                UserStatus::Active,
            )
            .await?;
        info!("Reactivated {} institution admins", count);
        Ok(count)
    }

    pub async fn profile(&self, id: &Uuid) -> Result<User, DomainError> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("User not found".into()))
    }

    pub async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        self.user_repo.list(&UserListFilter::default()).await
    }

    pub async fn list_institution_admins(&self) -> Result<Vec<User>, DomainError> {
        self.user_repo
            .list(&UserListFilter {
                role: Some(UserRole::InstitutionAdmin),
                status: None,
            })
            .await
    }

    pub async fn list_sector_admins(&self) -> Result<Vec<User>, DomainError> {
        self.user_repo
            .list(&UserListFilter {
                role: Some(UserRole::SectorAdmin),
                status: None,
            })
            .await
    }

    /// Active institutions for the public complaint-form dropdown, sorted
    /// by institution name.
    pub async fn active_institutions(&self) -> Result<Vec<User>, DomainError> {
        let mut admins = self
            .user_repo
            .list(&UserListFilter {
                role: Some(UserRole::InstitutionAdmin),
                status: Some(UserStatus::Active),
            })
            .await?;
        admins.sort_by(|a, b| a.institution_name.cmp(&b.institution_name));
        Ok(admins)
    }
}
