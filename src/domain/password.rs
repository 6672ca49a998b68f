//! Password value object - hashing and verification.
//!
//! All Argon2 configuration lives here, so no other module touches the
//! hashing crate directly.

use std::sync::OnceLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::errors::{AppError, AppResult};

/// Plain text behind the decoy hash used for unknown usernames.
const DECOY_PLAIN_TEXT: &str = "decoy-password-never-assigned";

/// Hashed password. Never serialized, never printed.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Create a new password by hashing the plain text.
    ///
    /// # Errors
    /// Returns validation error if password is empty.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        if plain_text.is_empty() {
            return Err(AppError::validation(
                "password: This field may not be blank.",
            ));
        }

        let hash = Self::hash(plain_text)?;
        Ok(Self { hash })
    }

    /// Create a Password from an existing hash (from database).
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    /// A real Argon2 hash that no account owns.
    ///
    /// Verifying against it costs the same as verifying a stored password,
    /// so a login for an unknown username takes as long as a wrong password.
    pub fn decoy() -> &'static Password {
        static DECOY: OnceLock<Password> = OnceLock::new();
        DECOY.get_or_init(|| match Self::hash(DECOY_PLAIN_TEXT) {
            Ok(hash) => Self { hash },
            Err(e) => {
                tracing::error!("Failed to build decoy password hash: {}", e);
                Self {
                    hash: String::new(),
                }
            }
        })
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    pub fn verify(&self, plain_text: &str) -> bool {
        Self::verify_hash(plain_text, &self.hash).unwrap_or(false)
    }

    fn hash(plain_text: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;
        Ok(hash.to_string())
    }

    fn verify_hash(plain_text: &str, hash: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid hash format: {}", e)))?;
        Ok(Self::argon2()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok())
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let password = Password::new("password_0").unwrap();

        assert!(password.verify("password_0"));
        assert!(!password.verify("incorrect_password"));
    }

    #[test]
    fn test_password_from_hash() {
        let password = Password::new("test_pass").unwrap();
        let hash = password.as_str().to_string();

        let restored = Password::from_hash(hash);
        assert!(restored.verify("test_pass"));
    }

    #[test]
    fn test_same_password_different_salts() {
        let plain = "SamePassword123";
        let pass1 = Password::new(plain).unwrap();
        let pass2 = Password::new(plain).unwrap();

        assert_ne!(pass1.as_str(), pass2.as_str());
        assert!(pass1.verify(plain));
        assert!(pass2.verify(plain));
    }

    #[test]
    fn test_empty_password_rejected() {
        assert!(matches!(Password::new(""), Err(AppError::Validation(_))));
        // No length floor beyond non-empty
        assert!(Password::new("abc").unwrap().verify("abc"));
    }

    #[test]
    fn test_corrupt_hash_never_verifies() {
        let stored = Password::from_hash("not-a-phc-string".to_string());
        assert!(!stored.verify("anything"));
    }

    #[test]
    fn test_decoy_rejects_ordinary_input() {
        let decoy = Password::decoy();
        assert!(decoy.as_str().starts_with("$argon2"));
        assert!(!decoy.verify("password_0"));
    }

    #[test]
    fn test_debug_redacts_hash() {
        let password = Password::new("password_0").unwrap();
        let rendered = format!("{:?}", password);
        assert!(!rendered.contains(password.as_str()));
    }
}
