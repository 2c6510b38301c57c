//! Argon2id password hashing and verification.
//!
//! Every account gets its own random salt. The salt is stored on its own
//! column and is also embedded in the PHC hash string.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::RngCore;
use tavernkeep_domain::UserCredentials;

/// Raw salt length in bytes before base64 encoding.
const SALT_LEN: usize = 16;

#[derive(Debug, thiserror::Error)]
#[error("Password hashing failed: {0}")]
pub struct PasswordError(String);

impl From<argon2::password_hash::Error> for PasswordError {
    fn from(e: argon2::password_hash::Error) -> Self {
        Self(e.to_string())
    }
}

/// Hash a plaintext password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<UserCredentials, PasswordError> {
    let mut bytes = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut bytes);
    let salt = SaltString::encode_b64(&bytes)?;
    hash_with_salt(password, &salt)
}

fn hash_with_salt(password: &str, salt: &SaltString) -> Result<UserCredentials, PasswordError> {
    let hash = Argon2::default().hash_password(password.as_bytes(), salt)?;
    Ok(UserCredentials {
        password_hash: hash.to_string(),
        salt: salt.as_str().to_string(),
    })
}

/// Returns `Ok(false)` for a wrong password and `Err` only for a malformed hash.
pub fn verify_password(password: &str, credentials: &UserCredentials) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(&credentials.password_hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_password_verifies() {
        let creds = hash_password("hunter2").expect("hash");
        assert!(creds.password_hash.starts_with("$argon2id$"));
        assert!(creds.password_hash.contains(&creds.salt));
        assert!(verify_password("hunter2", &creds).expect("verify"));
    }

    #[test]
    fn wrong_password_is_rejected() {
        let creds = hash_password("hunter2").expect("hash");
        assert!(!verify_password("hunter3", &creds).expect("verify"));
        assert!(!verify_password("", &creds).expect("verify"));
    }

    #[test]
    fn salts_differ_between_accounts() {
        let a = hash_password("same").expect("hash");
        let b = hash_password("same").expect("hash");
        assert_ne!(a.salt, b.salt);
        assert_ne!(a.password_hash, b.password_hash);
    }

    #[test]
    fn malformed_hash_is_an_error() {
        let creds = UserCredentials {
            password_hash: "not a phc string".to_string(),
            salt: String::new(),
        };
        assert!(verify_password("anything", &creds).is_err());
    }
}
