//! Authentication service: registration, login, and token verification

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use menyesha_security::{JwtService, PasswordService};
use menyesha_shared::config::BootstrapSettings;

use crate::domain::{Principal, User, UserRole};
use crate::error::DomainError;
use crate::repositories::UserRepository;

/// Citizen self-registration input. Validated at the API boundary; the
/// service only enforces uniqueness.
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub id_type: Option<String>,
    pub id_card: Option<String>,
}

/// Result of a successful registration or login.
#[derive(Debug, Clone)]
pub struct AuthSuccess {
    pub user: User,
    pub token: String,
}

pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    jwt: JwtService,
    passwords: PasswordService,
    bootstrap: BootstrapSettings,
}

impl AuthService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        jwt: JwtService,
        passwords: PasswordService,
        bootstrap: BootstrapSettings,
    ) -> Self {
        Self {
            user_repo,
            jwt,
            passwords,
            bootstrap,
        }
    }

    /// Register a new citizen account and issue a token for it.
    pub async fn register(&self, input: RegisterInput) -> Result<AuthSuccess, DomainError> {
        info!("Registration attempt for email: {}", input.email);

        if self.user_repo.find_by_email(&input.email).await?.is_some() {
            warn!("Registration failed: email already exists: {}", input.email);
            return Err(DomainError::EmailAlreadyExists(input.email));
        }

        let password_hash = self
            .passwords
            .hash(&input.password)
            .map_err(|e| DomainError::PasswordHashError(e.to_string()))?;

        let user = User::new_citizen(
            input.full_name,
            input.email,
            password_hash,
            input.phone,
            input.id_type,
            input.id_card,
        );

        let created = self.user_repo.create(&user).await?;
        let token = self.issue_token(&created)?;

        info!("Registration successful for: {}", created.email);

        Ok(AuthSuccess {
            user: created,
            token,
        })
    }

    /// Login with email and password. Unknown email and wrong password are
    /// indistinguishable to the caller; inactive accounts are rejected here
    /// and only here — outstanding tokens stay valid until expiry.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSuccess, DomainError> {
        info!("Login attempt for email: {}", email);

        // Fixed seed super-admin account, checked before the directory.
        if email == self.bootstrap.super_admin_email {
            if password == self.bootstrap.super_admin_password {
                info!("Bootstrap super admin login");
                let token = self
                    .jwt
                    .generate_token(&Uuid::nil(), email, UserRole::SuperAdmin.as_str())
                    .map_err(|e| DomainError::TokenGenerationError(e.to_string()))?;
                return Ok(AuthSuccess {
                    user: bootstrap_super_admin_user(email),
                    token,
                });
            }
            return Err(DomainError::InvalidCredentials);
        }

        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: email not found: {}", email);
                DomainError::InvalidCredentials
            })?;

        if !user.is_active() {
            warn!("Login failed: account not active: {}", email);
            return Err(DomainError::AccountInactive);
        }

        let password_valid = self
            .passwords
            .verify(password, &user.password_hash)
            .map_err(|_e| DomainError::InvalidCredentials)?;

        if !password_valid {
            warn!("Login failed: invalid password for: {}", email);
            return Err(DomainError::InvalidCredentials);
        }

        let token = self.issue_token(&user)?;

        info!("Login successful for: {} ({})", email, user.role.as_str());

        Ok(AuthSuccess { user, token })
    }

    /// Resolve a bearer token into a [`Principal`]. Invalid, expired, or
    /// unverifiable tokens are rejected uniformly — no endpoint silently
    /// degrades a bad token to anonymous.
    pub async fn authenticate(&self, token: &str) -> Result<Principal, DomainError> {
        let claims = self
            .jwt
            .validate_token(token)
            .map_err(|e| DomainError::TokenInvalid(e.to_string()))?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| DomainError::TokenInvalid("malformed subject".into()))?;

        // Sentinel identifier for the bootstrap super admin: no directory row.
        if user_id.is_nil() && claims.role == UserRole::SuperAdmin.as_str() {
            return Ok(Principal::SuperAdmin { id: user_id });
        }

        let user = self
            .user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| DomainError::TokenInvalid("user not found".into()))?;

        match user.role {
            UserRole::Citizen => Ok(Principal::Citizen { id: user.id }),
            UserRole::InstitutionAdmin => {
                let institution_name = user.institution_name.ok_or_else(|| {
                    DomainError::InternalError("institution admin without institution name".into())
                })?;
                Ok(Principal::InstitutionAdmin {
                    id: user.id,
                    institution_name,
                })
            }
            UserRole::SectorAdmin => {
                let sector_name = user.sector_name.ok_or_else(|| {
                    DomainError::InternalError("sector admin without sector name".into())
                })?;
                Ok(Principal::SectorAdmin {
                    id: user.id,
                    sector_name,
                })
            }
            UserRole::SuperAdmin => Ok(Principal::SuperAdmin { id: user.id }),
        }
    }

    fn issue_token(&self, user: &User) -> Result<String, DomainError> {
        self.jwt
            .generate_token(&user.id, &user.email, user.role.as_str())
            .map_err(|e| DomainError::TokenGenerationError(e.to_string()))
    }
}

/// In-memory stand-in returned for bootstrap super-admin logins; never
/// persisted to the directory.
fn bootstrap_super_admin_user(email: &str) -> User {
    let mut user = User::new_citizen(
        "Menyesha Super Admin".into(),
        email.into(),
        String::new(),
        String::new(),
        None,
        None,
    );
    user.id = Uuid::nil();
    user.role = UserRole::SuperAdmin;
    user
}
