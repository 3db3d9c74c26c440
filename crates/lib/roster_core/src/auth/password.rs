//! Password hashing via bcrypt.

use super::AuthError;

/// bcrypt cost factor.
const BCRYPT_COST: u32 = 10;

/// Hash a password with bcrypt (cost 10).
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    bcrypt::hash(password, BCRYPT_COST)
        .map_err(|e| AuthError::Internal(format!("bcrypt hash: {e}")))
}

/// Verify a password against a stored bcrypt hash.
///
/// A mismatch and a malformed stored hash are both a plain `false`: wrong
/// credentials are a normal negative result, not an error.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    bcrypt::verify(password, stored_hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_password_verifies() {
        let hash = hash_password("hunter2").expect("hash");
        assert!(verify_password("hunter2", &hash));
    }

    #[test]
    fn wrong_password_is_false() {
        let hash = hash_password("hunter2").expect("hash");
        assert!(!verify_password("hunter3", &hash));
    }

    #[test]
    fn malformed_stored_hash_is_false_not_an_error() {
        assert!(!verify_password("hunter2", "not-a-bcrypt-hash"));
        assert!(!verify_password("hunter2", ""));
    }

    #[test]
    fn hash_is_salted() {
        let a = hash_password("hunter2").expect("hash");
        let b = hash_password("hunter2").expect("hash");
        assert_ne!(a, b);
    }
}
