//! Service tests for registration, login, and token verification.

mod common;

use std::sync::Arc;

use uuid::Uuid;

use common::InMemoryUserRepository;
use menyesha_core::error::DomainError;
use menyesha_core::repositories::UserRepository;
use menyesha_core::services::{AuthService, RegisterInput};
use menyesha_core::{Principal, UserStatus};
use menyesha_security::{JwtService, PasswordService};
use menyesha_shared::config::BootstrapSettings;

fn bootstrap() -> BootstrapSettings {
    BootstrapSettings {
        super_admin_email: "superadmin@menyesha.gov.rw".into(),
        super_admin_password: "SuperAdmin123!".into(),
    }
}

fn service(repo: Arc<InMemoryUserRepository>) -> AuthService {
    AuthService::new(
        repo,
        JwtService::new("test-secret".into(), 604_800),
        PasswordService::new(4),
        bootstrap(),
    )
}

fn register_input(email: &str) -> RegisterInput {
    RegisterInput {
        full_name: "Alice Uwase".into(),
        email: email.into(),
        password: "secret1".into(),
        phone: "+250788123456".into(),
        id_type: None,
        id_card: None,
    }
}

#[tokio::test]
async fn register_hashes_password_and_issues_token() {
    let repo = Arc::new(InMemoryUserRepository::default());
    let svc = service(repo.clone());

    let result = svc.register(register_input("a@x.com")).await.unwrap();

    assert_ne!(result.user.password_hash, "secret1");
    assert!(!result.token.is_empty());

    let stored = repo.find_by_email("a@x.com").await.unwrap().unwrap();
    assert_ne!(stored.password_hash, "secret1");
}

#[tokio::test]
async fn duplicate_email_registration_creates_no_row() {
    let repo = Arc::new(InMemoryUserRepository::default());
    let svc = service(repo.clone());

    svc.register(register_input("a@x.com")).await.unwrap();
    let err = svc.register(register_input("a@x.com")).await.unwrap_err();

    assert!(matches!(err, DomainError::EmailAlreadyExists(_)));
    assert_eq!(repo.len(), 1);
}

#[tokio::test]
async fn login_roundtrip_and_wrong_password() {
    let repo = Arc::new(InMemoryUserRepository::default());
    let svc = service(repo.clone());

    svc.register(register_input("a@x.com")).await.unwrap();

    let ok = svc.login("a@x.com", "secret1").await.unwrap();
    assert_eq!(ok.user.email, "a@x.com");
    assert!(!ok.token.is_empty());

    let err = svc.login("a@x.com", "wrong").await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidCredentials));
}

#[tokio::test]
async fn unknown_email_and_wrong_password_are_indistinguishable() {
    let repo = Arc::new(InMemoryUserRepository::default());
    let svc = service(repo.clone());

    svc.register(register_input("a@x.com")).await.unwrap();

    let unknown = svc.login("nobody@x.com", "secret1").await.unwrap_err();
    let wrong = svc.login("a@x.com", "bad").await.unwrap_err();

    assert!(matches!(unknown, DomainError::InvalidCredentials));
    assert!(matches!(wrong, DomainError::InvalidCredentials));
}

#[tokio::test]
async fn inactive_account_cannot_login() {
    let repo = Arc::new(InMemoryUserRepository::default());
    let svc = service(repo.clone());

    let created = svc.register(register_input("a@x.com")).await.unwrap();
    repo.set_status(&created.user.id, UserStatus::Inactive)
        .await
        .unwrap();

    let err = svc.login("a@x.com", "secret1").await.unwrap_err();
    assert!(matches!(err, DomainError::AccountInactive));
}

#[tokio::test]
async fn authenticate_resolves_citizen_principal() {
    let repo = Arc::new(InMemoryUserRepository::default());
    let svc = service(repo.clone());

    let created = svc.register(register_input("a@x.com")).await.unwrap();
    let principal = svc.authenticate(&created.token).await.unwrap();

    assert_eq!(
        principal,
        Principal::Citizen {
            id: created.user.id
        }
    );
}

#[tokio::test]
async fn bootstrap_super_admin_bypasses_directory() {
    let repo = Arc::new(InMemoryUserRepository::default());
    let svc = service(repo.clone());

    let result = svc
        .login("superadmin@menyesha.gov.rw", "SuperAdmin123!")
        .await
        .unwrap();
    assert_eq!(repo.len(), 0);

    let principal = svc.authenticate(&result.token).await.unwrap();
    assert_eq!(principal, Principal::SuperAdmin { id: Uuid::nil() });
}

#[tokio::test]
async fn bootstrap_email_with_wrong_password_fails() {
    let repo = Arc::new(InMemoryUserRepository::default());
    let svc = service(repo);

    let err = svc
        .login("superadmin@menyesha.gov.rw", "guess")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidCredentials));
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let repo = Arc::new(InMemoryUserRepository::default());
    let svc = service(repo);

    let err = svc.authenticate("not.a.token").await.unwrap_err();
    assert!(matches!(err, DomainError::TokenInvalid(_)));
}

#[tokio::test]
async fn token_for_missing_user_is_rejected() {
    let repo = Arc::new(InMemoryUserRepository::default());
    let svc = service(repo);

    // Token minted outside the directory for a user that does not exist.
    let jwt = JwtService::new("test-secret".into(), 604_800);
    let token = jwt
        .generate_token(&Uuid::new_v4(), "ghost@x.com", "citizen")
        .unwrap();

    let err = svc.authenticate(&token).await.unwrap_err();
    assert!(matches!(err, DomainError::TokenInvalid(_)));
}
