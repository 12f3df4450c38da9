//! Argon2id implementation of the `PasswordHasher` port.
//!
//! Hashes are stored as PHC strings, so the salt and parameters travel with
//! the hash and can change without a migration.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Argon2id hasher with the crate's default parameters.
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        let secret = Zeroizing::new(password.as_bytes().to_vec());
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(&secret, &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| PasswordHashError::hash(err.to_string()))
    }

    fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordHashError> {
        let parsed = PasswordHash::new(stored_hash)
            .map_err(|err| PasswordHashError::malformed_hash(err.to_string()))?;
        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordHashError::hash(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> Argon2PasswordHasher {
        Argon2PasswordHasher::new()
    }

    #[rstest]
    fn hashes_verify_against_the_original_password(hasher: Argon2PasswordHasher) {
        let hash = hasher.hash("correct horse").expect("hash");

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("correct horse", &hash).expect("verify"));
        assert!(!hasher.verify("battery staple", &hash).expect("verify"));
    }

    #[rstest]
    fn hashing_is_salted(hasher: Argon2PasswordHasher) {
        let first = hasher.hash("secret").expect("hash");
        let second = hasher.hash("secret").expect("hash");
        assert_ne!(first, second);
    }

    #[rstest]
    fn malformed_hashes_are_reported(hasher: Argon2PasswordHasher) {
        let err = hasher.verify("secret", "not-a-phc-string").expect_err("malformed");
        assert!(matches!(err, PasswordHashError::MalformedHash { .. }));
    }
}
