//! Argon2id password hashes, stored as PHC strings.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use escrutinio_core::error::CoreError;

/// Shortest password accepted for a new account, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 10;

fn internal(e: password_hash::Error) -> CoreError {
    CoreError::Internal(format!("Password hashing error: {e}"))
}

pub fn hash_password(password: &str) -> Result<String, CoreError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(internal)
}

/// `Ok(false)` on a wrong password; `Err` only when `hash` is unusable.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, CoreError> {
    let parsed = PasswordHash::new(hash).map_err(internal)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(internal(e)),
    }
}

pub fn check_new_password(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("mesa-12-distrito-4").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("mesa-12-distrito-4", &hash).unwrap());
        assert!(!verify_password("mesa-13-distrito-4", &hash).unwrap());
    }

    #[test]
    fn unusable_hash_is_internal() {
        assert_matches!(verify_password("x", "not-a-phc-string"), Err(CoreError::Internal(_)));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        assert_matches!(check_new_password("corto"), Err(CoreError::Validation(_)));
        assert!(check_new_password("contraseña").is_ok());
    }
}
