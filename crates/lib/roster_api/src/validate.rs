//! Request validation helpers for account fields and path parameters.
//!
//! These run before the Authorization Policy is consulted: a request that
//! fails here is a 400, never a policy decision.

use crate::error::AppError;

/// Normalize and validate a username: trimmed, lowercased, non-empty,
/// letters/numbers/dash/dot/underscore only.
pub fn username(raw: &str) -> Result<String, AppError> {
    let name = raw.trim().to_lowercase();
    if name.is_empty() {
        return Err(AppError::Validation("Username cannot be empty".into()));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        return Err(AppError::Validation(
            "Username may contain letters, numbers, dash, dot, and underscore characters only"
                .into(),
        ));
    }
    Ok(name)
}

/// Normalize and validate an email address: trimmed, lowercased, one `@`
/// with a non-empty local part and a dotted domain.
pub fn email(raw: &str) -> Result<String, AppError> {
    let addr = raw.trim().to_lowercase();
    let valid = match addr.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.split('.').count() >= 2
                && domain.split('.').all(|part| !part.is_empty())
        }
        None => false,
    };
    if !valid {
        return Err(AppError::Validation("Invalid email address".into()));
    }
    Ok(addr)
}

/// Parse a path id as a positive integer.
pub fn user_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::Validation("User id must be a positive integer".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_is_normalized() {
        assert_eq!(username("  User_1 ").expect("valid"), "user_1");
        assert_eq!(username("a.b-c").expect("valid"), "a.b-c");
    }

    #[test]
    fn username_rejects_bad_characters_and_empty() {
        assert!(username("test user").is_err());
        assert!(username("   ").is_err());
        assert!(username("héllo").is_err());
    }

    #[test]
    fn email_accepts_ordinary_addresses() {
        assert_eq!(email(" A@Test.IO ").expect("valid"), "a@test.io");
    }

    #[test]
    fn email_rejects_malformed_addresses() {
        for bad in ["test-user-email", "@test.io", "a@b", "a@b..c", "a@b@c.io"] {
            assert!(email(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn user_id_must_be_a_positive_integer() {
        assert_eq!(user_id("7").expect("valid"), 7);
        assert!(user_id("one").is_err());
        assert!(user_id("0").is_err());
        assert!(user_id("-3").is_err());
        assert!(user_id("1.5").is_err());
    }
}
