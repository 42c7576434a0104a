//! Password hashing with bcrypt

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Hash error: {0}")]
    HashError(String),
    #[error("Verification failed")]
    VerificationFailed,
}

/// Salted bcrypt hashing with an adjustable cost factor. Hashing is
/// deliberately slow and runs synchronously per request.
#[derive(Clone)]
pub struct PasswordService {
    cost: u32,
}

impl PasswordService {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        bcrypt::hash(password, self.cost).map_err(|e| PasswordError::HashError(e.to_string()))
    }

    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        bcrypt::verify(password, hash).map_err(|e| PasswordError::HashError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> PasswordService {
        // Low cost keeps the test fast; production cost comes from config.
        PasswordService::new(4)
    }

    #[test]
    fn hash_is_never_the_plaintext() {
        let hash = service().hash("secret1").unwrap();
        assert_ne!(hash, "secret1");
        assert!(hash.starts_with("$2"));
    }

    #[test]
    fn correct_password_verifies() {
        let svc = service();
        let hash = svc.hash("secret1").unwrap();
        assert!(svc.verify("secret1", &hash).unwrap());
    }

    #[test]
    fn wrong_password_does_not_verify() {
        let svc = service();
        let hash = svc.hash("secret1").unwrap();
        assert!(!svc.verify("secret2", &hash).unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        let svc = service();
        let h1 = svc.hash("secret1").unwrap();
        let h2 = svc.hash("secret1").unwrap();
        assert_ne!(h1, h2);
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(service().verify("secret1", "not-a-hash").is_err());
    }
}
