//! Argon2id password hashing for back-office users

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::errors::{LivescoreError, Result};

pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| LivescoreError::password_hash(e.to_string()))
}

/// `Ok(false)` on mismatch; `Err` only when the stored hash is unreadable
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| LivescoreError::password_hash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

pub fn is_argon2_hash(s: &str) -> bool {
    s.starts_with("$argon2")
}

/// Hash a replacement password. `None` or empty keeps the current one.
pub fn process_update_password(new_password: Option<&str>) -> Result<Option<String>> {
    match new_password {
        Some(pwd) if !pwd.is_empty() => hash_password(pwd).map(Some),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "test_password_123";
        let hash = hash_password(password).expect("hash should succeed");

        assert!(is_argon2_hash(&hash));
        assert!(verify_password(password, &hash).expect("verify should succeed"));
        assert!(!verify_password("wrong_password", &hash).expect("verify should succeed"));
    }

    #[test]
    fn test_legacy_base64_value_is_not_a_hash() {
        // "admin123" base64-encoded, the old storage format
        assert!(!is_argon2_hash("YWRtaW4xMjM="));
        assert!(verify_password("admin123", "YWRtaW4xMjM=").is_err());
    }

    #[test]
    fn test_update_password_keeps_existing_when_blank() {
        assert_eq!(process_update_password(None).unwrap(), None);
        assert_eq!(process_update_password(Some("")).unwrap(), None);
        let hashed = process_update_password(Some("n3w-secret")).unwrap().unwrap();
        assert!(verify_password("n3w-secret", &hashed).unwrap());
    }
}
