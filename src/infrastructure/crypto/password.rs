//! Password hashing utilities

use bcrypt::{hash, verify};

/// Hash with an explicit bcrypt cost; repositories default to `bcrypt::DEFAULT_COST`
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    hash(password, cost)
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password, hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashed_password_verifies() {
        let hash = hash_password_with_cost("secret123", 4).unwrap();
        assert_ne!(hash, "secret123");
        assert!(verify_password("secret123", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }
}
