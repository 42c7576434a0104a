//! Domain errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("User with this email already exists")]
    EmailAlreadyExists(String),

    #[error("An account with this code already exists: {0}")]
    CodeAlreadyExists(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Account is not active")]
    AccountInactive,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Invalid token")]
    TokenInvalid(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Cannot move complaint from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Password hash error: {0}")]
    PasswordHashError(String),

    #[error("Token generation error: {0}")]
    TokenGenerationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}
