//! Shared credential shape rules.
//!
//! Usernames, display names, and password strength are validated with the
//! same rules at registration and at password change.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use validator::ValidationError;

/// Letters, numbers, underscores, and hyphens.
pub static RE_USERNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[A-Za-z0-9_-]+$").unwrap());

/// Letters and spaces.
pub static RE_FULL_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s]+$").unwrap());

/// Passwords need an uppercase letter, a lowercase letter, a digit, and a
/// special character. Length bounds are enforced separately.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let missing = if !password.chars().any(|c| c.is_ascii_uppercase()) {
        Some("Password must contain at least one uppercase letter")
    } else if !password.chars().any(|c| c.is_ascii_lowercase()) {
        Some("Password must contain at least one lowercase letter")
    } else if !password.chars().any(|c| c.is_ascii_digit()) {
        Some("Password must contain at least one number")
    } else if password.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some("Password must contain at least one special character")
    } else {
        None
    };

    match missing {
        Some(message) => {
            let mut err = ValidationError::new("password_strength");
            err.message = Some(Cow::Borrowed(message));
            Err(err)
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_regex() {
        assert!(RE_USERNAME.is_match("alice_01"));
        assert!(RE_USERNAME.is_match("a-b"));
        assert!(!RE_USERNAME.is_match("alice 01"));
        assert!(!RE_USERNAME.is_match("alice!"));
    }

    #[test]
    fn test_full_name_regex() {
        assert!(RE_FULL_NAME.is_match("Alice Anderson"));
        assert!(!RE_FULL_NAME.is_match("Alice2"));
    }

    #[test]
    fn test_password_strength() {
        assert!(validate_password_strength("Passw0rd!").is_ok());
        assert!(validate_password_strength("passw0rd!").is_err()); // no uppercase
        assert!(validate_password_strength("PASSW0RD!").is_err()); // no lowercase
        assert!(validate_password_strength("Password!").is_err()); // no digit
        assert!(validate_password_strength("Passw0rd1").is_err()); // no special
    }
}
