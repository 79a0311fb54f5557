use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to verify password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("correcthorse").unwrap();
        assert_ne!(hash, "correcthorse");
        assert!(verify_password("correcthorse", &hash).unwrap());
        assert!(!verify_password("wronghorse", &hash).unwrap());
    }

    #[test]
    fn test_verify_invalid_digest_errors() {
        let result = verify_password("anything", "not_a_valid_bcrypt_hash");
        assert!(result.is_err());
    }

    #[test]
    fn test_hashes_are_salted() {
        let hash1 = hash_password("samepassword").unwrap();
        let hash2 = hash_password("samepassword").unwrap();
        assert_ne!(hash1, hash2);
    }
}
